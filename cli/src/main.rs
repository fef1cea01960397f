//! `tagmark` — tasks as plain files, state in the filename.
//!
//! With trailing words a single command is dispatched and the process exits
//! (`tagmark report`, `tagmark new Buy milk`); with none, the interactive
//! shell starts.

mod editor;
mod git;
mod launch;
mod render;
mod review;
mod shell;
mod work;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tagmark_core::{Config, LOG_FILE};

#[derive(Debug, Parser)]
#[command(name = "tagmark", version, about = "Manage tasks encoded in filenames")]
struct Cli {
    /// Task directory to operate in (defaults to the current directory).
    #[arg(long = "dir", short = 'C')]
    dir: Option<PathBuf>,

    /// Also write logs to `tagmark.log` in the task directory.
    #[arg(long = "log")]
    log: bool,

    /// A single command to dispatch instead of starting the shell.
    #[arg(trailing_var_arg = true)]
    command: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(dir) = &cli.dir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("cannot enter task directory {}", dir.display()))?;
    }

    // Keep the appender guard alive for the lifetime of the process.
    let _log_guard = init_logging(cli.log)?;

    let config = Config::load().context("loading config")?;
    let mut shell = shell::Shell::new(config);

    if cli.command.is_empty() {
        shell.run()
    } else {
        shell.dispatch_line(&cli.command.join(" "))?;
        Ok(())
    }
}

fn init_logging(to_file: bool) -> anyhow::Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if to_file {
        let appender = tracing_appender::rolling::never(".", LOG_FILE);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .init();
        Ok(Some(guard))
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        Ok(None)
    }
}
