//! External editor invocation. Blocks until the editor exits.

use std::path::Path;
use std::process::Command;

use anyhow::Context;
use tracing::debug;

/// The editor to use: config override, then `$EDITOR`, then `vim`.
pub fn editor_command(configured: Option<&str>) -> String {
    configured
        .map(str::to_string)
        .or_else(|| std::env::var("EDITOR").ok())
        .unwrap_or_else(|| "vim".to_string())
}

/// Open `path` in the editor. Vim-family editors get `-n` (no swap file,
/// since task files are renamed underneath swap bookkeeping) plus any caller
/// flags; other editors are invoked bare.
pub fn edit(editor: &str, flags: &[&str], path: &Path) -> anyhow::Result<()> {
    let mut cmd = Command::new(editor);
    if matches!(editor.rsplit('/').next(), Some("vi" | "vim" | "nvim")) {
        cmd.arg("-n");
        cmd.args(flags);
    }
    cmd.arg(path);
    debug!(editor, path = %path.display(), "launching editor");
    let status = cmd
        .status()
        .with_context(|| format!("failed to launch editor {editor:?}"))?;
    if !status.success() {
        eprintln!("editor exited with {status}");
    }
    Ok(())
}
