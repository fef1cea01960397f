//! The review session: visit every task, least urgent bucket first, and
//! reprioritize or complete each one with a single keystroke.

use tagmark_core::{Buckets, Config, Priority, ReviewQueue, Step};

use crate::{editor, launch, render, shell::read_line};

const HELP: &str = "\
Review Commands
===============
?   help
e   edit task
v   view/show task
l   launch URLs
1-6 set task priority
s   skip/do not modify task
d   mark task as done
n   next priority bucket
q   quit review";

pub fn run(config: &Config, editor: &str) -> anyhow::Result<()> {
    let mut queue = ReviewQueue::new(Buckets::scan(".")?);
    if queue.is_empty() {
        println!("Nothing to review");
        return Ok(());
    }

    loop {
        let Some(prompt) = prompt(&queue, config) else {
            break;
        };
        let Some(line) = read_line(&prompt)? else {
            break;
        };
        let step = match line.trim() {
            "?" => {
                println!("{HELP}");
                continue;
            }
            "e" => {
                if let Some(task) = queue.current() {
                    editor::edit(editor, &[], task.path())?;
                }
                continue;
            }
            "v" => {
                if let Some(task) = queue.current() {
                    println!("{}", "*".repeat(80));
                    println!("{}", task.read()?);
                    println!("{}", "*".repeat(80));
                }
                continue;
            }
            "l" => {
                if let Some(task) = queue.current() {
                    launch::launch(task)?;
                }
                continue;
            }
            key @ ("1" | "2" | "3" | "4" | "5" | "6") => {
                let priority = Priority::from_key(key)?;
                if let Some(task) = queue.current_mut() {
                    task.set_priority(Some(priority))?;
                }
                queue.advance()
            }
            "d" => {
                if let Some(task) = queue.current_mut() {
                    task.complete()?;
                }
                queue.advance()
            }
            "s" => queue.advance(),
            "n" => queue.next_bucket(),
            "q" => {
                println!("Quitting review");
                return Ok(());
            }
            other => {
                println!("Unknown review command {other:?} (try `?`)");
                continue;
            }
        };
        if step == Step::Finished {
            break;
        }
    }
    println!("Review finished");
    Ok(())
}

fn prompt(queue: &ReviewQueue, config: &Config) -> Option<String> {
    let task = queue.current()?;
    let pos = queue.position()?;
    let bucket = render::colorized_label(&pos.bucket.to_string(), config);
    Some(format!(
        "{}\nReview ({}/{}) {bucket} [?/1-6/d/e/v/l/s/n/q]> ",
        render::colorized(task, config),
        pos.index,
        pos.len,
    ))
}
