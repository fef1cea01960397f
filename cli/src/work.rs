//! The work session: a flat, tag-filtered queue worked one task at a time.
//!
//! Mutating commands advance to the next task afterwards; `prev` steps back
//! (clamped at the first task).

use tagmark_core::{Config, Priority, Step, Task, WorkQueue};

use crate::{editor, launch, render, shell::read_line};

const HELP: &str = "\
Work Commands
=============
?            help
next         go to the next task (aliases: skip, deselect)
prev         go back to the previous task
done         complete the task, then advance
p <key>      set the task's priority, then advance (alias: priority)
tag <t>...   add tags to the task
untag <t>... remove tags from the task
ls           list the queue, marking the current task
e            edit task (alias: edit)
v            view/show task (alias: show)
l            launch URLs (alias: launch)
stop         stop working and return (alias: q)";

pub fn run(tasks: Vec<Task>, config: &Config, editor: &str) -> anyhow::Result<()> {
    println!("{} tasks to work.", tasks.len());
    let mut queue = WorkQueue::new(tasks);

    loop {
        let Some(prompt) = prompt(&queue, config) else {
            break;
        };
        let Some(line) = read_line(&prompt)? else {
            break;
        };
        let line = line.trim();
        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };
        let step = match cmd {
            "" => continue,
            "?" | "help" => {
                println!("{HELP}");
                continue;
            }
            "next" | "skip" | "deselect" => queue.advance(),
            "prev" => {
                queue.retreat();
                continue;
            }
            "done" => {
                if let Some(task) = queue.current_mut() {
                    task.complete()?;
                }
                queue.advance()
            }
            "p" | "priority" => {
                let Some(task) = queue.current_mut() else {
                    continue;
                };
                if rest == "clear" {
                    task.set_priority(None)?;
                } else {
                    match Priority::from_key(rest) {
                        Ok(priority) => task.set_priority(Some(priority))?,
                        Err(err) => {
                            println!("{err}");
                            continue;
                        }
                    }
                }
                queue.advance()
            }
            "tag" => {
                if let Some(task) = queue.current_mut() {
                    task.add_tags(rest.split_whitespace())?;
                }
                continue;
            }
            "untag" => {
                if let Some(task) = queue.current_mut() {
                    for tag in rest.split_whitespace() {
                        if let Err(err) = task.remove_tag(tag) {
                            println!("{err}");
                        }
                    }
                }
                continue;
            }
            "ls" => {
                for (current, task) in queue.iter() {
                    let marker = if current { "\u{21C0} " } else { "" };
                    println!("{marker}{}", render::colorized(task, config));
                }
                continue;
            }
            "e" | "edit" => {
                if let Some(task) = queue.current() {
                    editor::edit(editor, &[], task.path())?;
                }
                continue;
            }
            "v" | "show" => {
                if let Some(task) = queue.current() {
                    println!("{}", "*".repeat(80));
                    println!("{}", task.read()?);
                    println!("{}", "*".repeat(80));
                }
                continue;
            }
            "l" | "launch" => {
                if let Some(task) = queue.current() {
                    launch::launch(task)?;
                }
                continue;
            }
            "stop" | "q" | "quit" => return Ok(()),
            other => {
                println!("Unknown work command {other:?} (try `?`)");
                continue;
            }
        };
        if step == Step::Finished {
            println!("All done! Good job!");
            break;
        }
    }
    Ok(())
}

fn prompt(queue: &WorkQueue, config: &Config) -> Option<String> {
    let task = queue.current()?;
    Some(format!(
        "\u{21C0}\x1b[34mtagmark\x1b[0m:{}\n{}/{}>",
        render::colorized(task, config),
        queue.position(),
        queue.len(),
    ))
}
