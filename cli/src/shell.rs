//! The interactive command loop and one-shot dispatcher.
//!
//! Commands are thin wrappers over the core operations; all state mutation
//! happens through [`Task`], so every command leaves the directory and the
//! in-memory selection consistent even when interrupted between commands.

use std::io::Write;
use std::path::Path;

use tracing::debug;

use tagmark_core::{
    Buckets, Config, Error, LAST_SELECTION_FILE, Priority, Task, VERSION, find_tagged,
    normalize_filter_tag, scan,
};

use crate::{editor, git, launch, render, review, work};

const PROMPT_ARROW: char = '\u{21C0}';

const HELP: &str = "\
Commands
========
ls [dir]          list tasks (in dir, or here)
pls [prio]        list tasks with the given priority (default 1)
now .. waiting    shorthand for pls 1 .. pls 6
select <file>     select a task (alias: sel)
deselect          drop the selection (alias: stop)
priority <key>    set selected task's priority; `clear` removes it (alias: p)
tag <t>...        add tags to the selected task
untag <t>...      remove tags from the selected task
complete          mark selected task done, move to completed/ (alias: done)
new [title]       create a task, edit it, select it
show              print the selected task's contents
edit [file]       open in your editor (alias: e)
did               append a dated journal entry, then edit
launch [file]     open URL: headers in the browser
review            review every task bucket by bucket
work [tag]...     work tasks carrying all given tags (default 1-now)
report [prio]     task counts per priority bucket
cd <dir>          change task directory
version           print version
exit              quit (aliases: quit, q)";

pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    config: Config,
    editor: String,
    selected: Option<Task>,
    git_tracked: bool,
}

impl Shell {
    pub fn new(config: Config) -> Shell {
        let editor = editor::editor_command(config.editor.as_deref());
        let mut shell = Shell {
            config,
            editor,
            selected: None,
            git_tracked: git::is_tracked(),
        };
        shell.restore_last_selection();
        shell
    }

    /// The interactive loop. Errors from individual commands are printed,
    /// never fatal.
    pub fn run(&mut self) -> anyhow::Result<()> {
        println!(
            "Welcome to tagmark {VERSION}. Your editor is {}; set $EDITOR to change it.",
            self.editor
        );
        loop {
            match read_line(&self.prompt())? {
                None => break,
                Some(line) => match self.dispatch_line(&line) {
                    Ok(Flow::Quit) => break,
                    Ok(Flow::Continue) => {}
                    Err(err) => println!("{err}"),
                },
            }
        }
        self.save_last_selection();
        println!("Goodbye!");
        Ok(())
    }

    fn prompt(&self) -> String {
        let here = match &self.selected {
            Some(task) => render::colorized(task, &self.config),
            None => std::env::current_dir()
                .map(|d| d.display().to_string())
                .unwrap_or_default(),
        };
        format!("{PROMPT_ARROW}\x1b[34mtagmark\x1b[0m:{here}\n>")
    }

    /// Dispatch one command line, then auto-commit any resulting renames.
    pub fn dispatch_line(&mut self, line: &str) -> anyhow::Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }
        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };
        let flow = self.dispatch(cmd, rest);
        if self.git_tracked {
            git::commit_changes(&format!("tagmark {cmd}"));
        }
        flow
    }

    fn dispatch(&mut self, cmd: &str, rest: &str) -> anyhow::Result<Flow> {
        debug!(cmd, rest, "dispatch");
        match cmd {
            "ls" => self.cmd_ls(rest)?,
            "pls" => self.cmd_pls(if rest.is_empty() { "1" } else { rest })?,
            "now" => self.cmd_pls("1")?,
            "next" => self.cmd_pls("2")?,
            "soon" => self.cmd_pls("3")?,
            "later" => self.cmd_pls("4")?,
            "someday" => self.cmd_pls("5")?,
            "waiting" => self.cmd_pls("6")?,
            "select" | "sel" => self.cmd_select(rest)?,
            "deselect" | "stop" => self.selected = None,
            "priority" | "p" => self.cmd_priority(rest)?,
            "tag" => self.cmd_tag(rest)?,
            "untag" => self.cmd_untag(rest)?,
            "complete" | "done" => self.cmd_complete()?,
            "new" => self.cmd_new(rest)?,
            "show" => self.cmd_show()?,
            "edit" | "e" => self.cmd_edit(rest)?,
            "did" => self.cmd_did()?,
            "launch" | "l" => self.cmd_launch(rest)?,
            "review" => self.cmd_review()?,
            "work" => self.cmd_work(rest)?,
            "report" => self.cmd_report(rest)?,
            "cd" => self.cmd_cd(rest)?,
            "version" => println!("{VERSION}"),
            "help" | "?" => println!("{HELP}"),
            "exit" | "quit" | "q" => return Ok(Flow::Quit),
            other => println!("Unknown command {other:?} (try `help`)"),
        }
        Ok(Flow::Continue)
    }

    fn cmd_ls(&self, dir: &str) -> anyhow::Result<()> {
        let dir = if dir.is_empty() { "." } else { dir };
        for task in scan(dir)? {
            println!("{}", render::colorized(&task, &self.config));
        }
        Ok(())
    }

    fn cmd_pls(&self, key: &str) -> anyhow::Result<()> {
        let target = match Priority::from_key(key) {
            Ok(priority) => priority,
            Err(err) => {
                println!("{err}");
                return Ok(());
            }
        };
        for task in scan(".")? {
            if task.tags().contains(target.as_tag()) {
                println!("{}", render::colorized(&task, &self.config));
            }
        }
        Ok(())
    }

    fn cmd_select(&mut self, file: &str) -> anyhow::Result<()> {
        if file.is_empty() {
            println!("No task provided.");
            return Ok(());
        }
        match Task::open(file) {
            Ok(task) => self.selected = Some(task),
            Err(Error::NotFound { path }) => println!("Unknown file {}", path.display()),
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    fn cmd_priority(&mut self, key: &str) -> anyhow::Result<()> {
        let Some(task) = self.selected.as_mut() else {
            println!("Select a file first and try again");
            return Ok(());
        };
        if key == "clear" {
            task.set_priority(None)?;
            return Ok(());
        }
        match Priority::from_key(key) {
            Ok(priority) => task.set_priority(Some(priority))?,
            Err(err) => println!("{err}"),
        }
        Ok(())
    }

    fn cmd_tag(&mut self, rest: &str) -> anyhow::Result<()> {
        let Some(task) = self.selected.as_mut() else {
            println!("Select a file and try again");
            return Ok(());
        };
        task.add_tags(rest.split_whitespace())?;
        Ok(())
    }

    fn cmd_untag(&mut self, rest: &str) -> anyhow::Result<()> {
        let Some(task) = self.selected.as_mut() else {
            println!("Select a file and try again");
            return Ok(());
        };
        for tag in rest.split_whitespace() {
            if let Err(err) = task.remove_tag(tag) {
                println!("{err}");
            }
        }
        Ok(())
    }

    fn cmd_complete(&mut self) -> anyhow::Result<()> {
        let Some(task) = self.selected.as_mut() else {
            println!("Select a file and try again");
            return Ok(());
        };
        task.complete()?;
        self.selected = None;
        Ok(())
    }

    fn cmd_new(&mut self, title: &str) -> anyhow::Result<()> {
        let title = if title.is_empty() {
            match read_line("Title: ")? {
                Some(line) if !line.trim().is_empty() => line.trim().to_string(),
                _ => return Ok(()),
            }
        } else {
            title.to_string()
        };
        let task = Task::create(".", &title)?;
        editor::edit(&self.editor, &["+normal Go"], task.path())?;
        self.selected = Some(task);
        Ok(())
    }

    fn cmd_show(&self) -> anyhow::Result<()> {
        let Some(task) = &self.selected else {
            println!("Select a file and try again");
            return Ok(());
        };
        println!("{}", "*".repeat(80));
        println!("{}", task.read()?);
        println!("{}", "*".repeat(80));
        Ok(())
    }

    fn cmd_edit(&mut self, file: &str) -> anyhow::Result<()> {
        match (&self.selected, file) {
            (Some(task), "") => editor::edit(&self.editor, &[], task.path()),
            (_, file) if !file.is_empty() => editor::edit(&self.editor, &[], Path::new(file)),
            _ => {
                println!("Select a file and try again");
                Ok(())
            }
        }
    }

    fn cmd_did(&mut self) -> anyhow::Result<()> {
        let Some(task) = &self.selected else {
            println!("Select a file and try again");
            return Ok(());
        };
        let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let header = format!("\n\n{stamp}\n{}\n\n", "-".repeat(19));
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(task.path())?;
        file.write_all(header.as_bytes())?;
        editor::edit(&self.editor, &["+normal Go", "-c", "startinsert"], task.path())
    }

    fn cmd_launch(&self, file: &str) -> anyhow::Result<()> {
        match (&self.selected, file) {
            (Some(task), "") => launch::launch(task),
            (_, file) if !file.is_empty() => launch::launch_path(Path::new(file)),
            _ => {
                println!("Select a file and try again");
                Ok(())
            }
        }
    }

    fn cmd_review(&mut self) -> anyhow::Result<()> {
        review::run(&self.config, &self.editor)?;
        // A reviewed task may have been renamed out from under the selection.
        if let Some(task) = &self.selected {
            if !task.path().exists() {
                println!("Selected task was modified and deselected");
                self.selected = None;
            }
        }
        Ok(())
    }

    fn cmd_work(&mut self, rest: &str) -> anyhow::Result<()> {
        let mut tags: Vec<String> = rest.split_whitespace().map(normalize_filter_tag).collect();
        if tags.is_empty() {
            tags.push(Priority::Now.as_tag().to_string());
        }
        let tasks = find_tagged(".", &tags)?;
        if tasks.is_empty() {
            println!("No tasks for tag set {}", tags.join(", "));
        } else {
            work::run(tasks, &self.config, &self.editor)?;
        }
        Ok(())
    }

    fn cmd_report(&self, key: &str) -> anyhow::Result<()> {
        let target = if key.is_empty() {
            None
        } else {
            match Priority::from_key(key) {
                Ok(priority) => Some(priority.as_tag().to_string()),
                Err(_) if key == "done" => Some("done".to_string()),
                Err(err) => {
                    println!("{err}");
                    return Ok(());
                }
            }
        };
        let buckets = Buckets::scan(".")?;
        let total = buckets.total();
        for (bucket, tasks) in buckets.iter() {
            if target.as_deref().is_some_and(|t| t != bucket.to_string()) {
                continue;
            }
            println!("{bucket} ({}/{total})", tasks.len());
            for task in tasks {
                println!("\t{}", render::colorized(task, &self.config));
            }
        }
        Ok(())
    }

    fn cmd_cd(&mut self, dir: &str) -> anyhow::Result<()> {
        if let Err(err) = std::env::set_current_dir(dir) {
            println!("{err}");
        } else {
            self.git_tracked = git::is_tracked();
        }
        Ok(())
    }

    fn restore_last_selection(&mut self) {
        let Ok(last) = std::fs::read_to_string(LAST_SELECTION_FILE) else {
            return;
        };
        let last = last.trim();
        if !last.is_empty() {
            println!("Found previously selected task, attempting to select");
            if let Ok(task) = Task::open(last) {
                self.selected = Some(task);
            }
        }
    }

    fn save_last_selection(&self) {
        let contents = self
            .selected
            .as_ref()
            .map(Task::file_name)
            .unwrap_or_default();
        if let Err(err) = std::fs::write(LAST_SELECTION_FILE, contents) {
            debug!(%err, "could not persist last selection");
        }
    }
}

/// Print a prompt and read one line. `None` on end of input.
pub fn read_line(prompt: &str) -> std::io::Result<Option<String>> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line)? == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}
