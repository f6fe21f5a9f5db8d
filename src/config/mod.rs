//! Configuration management for rfind
//!
//! Runtime settings that are not part of the search itself: how results are
//! printed and how much is logged. Values come from the embedded defaults, a
//! TOML file and `RFIND_*` environment variables, in increasing priority.

use serde::{Deserialize, Serialize};

mod core;

pub use self::core::FindConfig;

/// Main settings structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Output settings
    pub output: OutputSettings,

    /// Logging settings
    pub log: LogSettings,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Suppress printing of matched paths
    pub silent: bool,

    /// Style error lines when stderr is a terminal
    pub color: bool,

    /// Print an exit code line after each execution
    #[serde(default = "default_exit_codes")]
    pub exit_codes: bool,
}

fn default_exit_codes() -> bool {
    true
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            silent: false,
            color: true,
            exit_codes: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    /// Filter directive used when no -v flags are given
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}
