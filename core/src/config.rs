//! Configuration loading.
//!
//! Loads `~/.config/tagmark/config.toml` (or the file named by
//! `TAGMARK_CONFIG`). A missing file yields the defaults; a malformed one is
//! an error the CLI reports at startup.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};

/// ANSI SGR code used for tags without an explicit color.
pub const FALLBACK_COLOR: u8 = 32;

/// Root configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Editor override; `$EDITOR` (default `vim`) applies when unset.
    #[serde(default)]
    pub editor: Option<String>,

    /// ANSI SGR code per tag, for colorized listings.
    #[serde(default = "default_colors")]
    pub colors: HashMap<String, u8>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            editor: None,
            colors: default_colors(),
        }
    }
}

fn default_colors() -> HashMap<String, u8> {
    [
        ("inbox", 34),
        ("1-now", 31),
        ("2-next", 34),
        ("3-soon", 92),
        ("4-later", 32),
        ("5-someday", 90),
        ("6-waiting", 95),
    ]
    .into_iter()
    .map(|(tag, code)| (tag.to_string(), code))
    .collect()
}

impl Config {
    /// Load from `TAGMARK_CONFIG` or the default path.
    pub fn load() -> Result<Config> {
        match config_path() {
            Some(path) if path.is_file() => {
                let raw = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
                toml::from_str(&raw).map_err(|e| Error::Config {
                    path,
                    message: e.to_string(),
                })
            }
            _ => Ok(Config::default()),
        }
    }

    /// The SGR code for a tag, falling back to the default green.
    pub fn color_for(&self, tag: &str) -> u8 {
        self.colors.get(tag).copied().unwrap_or(FALLBACK_COLOR)
    }
}

fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("TAGMARK_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".config").join("tagmark").join("config.toml"))
}
