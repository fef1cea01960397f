//! Colorized filename rendering.
//!
//! Each tag substring in the encoded name is wrapped in its configured SGR
//! color when stdout supports it; the filename text itself is untouched so
//! the output remains a valid name to copy-paste.

use tagmark_core::{Config, Task};

pub fn colorized(task: &Task, config: &Config) -> String {
    let mut name = task.file_name();
    if !stdout_supports_color() {
        return name;
    }
    for tag in task.tags().iter() {
        let code = config.color_for(tag);
        name = name.replace(tag, &format!("\x1b[{code}m{tag}\x1b[0m"));
    }
    name
}

/// Color a bucket or priority label for prompts.
pub fn colorized_label(label: &str, config: &Config) -> String {
    if !stdout_supports_color() {
        return label.to_string();
    }
    let code = config.color_for(label);
    format!("\x1b[{code}m{label}\x1b[0m")
}

fn stdout_supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}
