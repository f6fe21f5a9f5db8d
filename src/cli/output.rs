//! Output system for rfind
//!
//! Matched paths and exit codes go to stdout exactly as-is, one per line, so
//! the output can be piped. Errors go to stderr with a styled marker.

use crate::config::OutputSettings;
use crate::exec::ExecutionResult;
use crate::walker::{Reporter, WalkError};
use console::{Style, style};
use std::io::{self, Write};
use std::path::Path;

/// Output handler, built once from settings and passed by value
#[derive(Debug, Clone, Copy)]
pub struct Output {
    color: bool,
    exit_codes: bool,
}

impl Output {
    pub fn new(settings: OutputSettings) -> Self {
        Self {
            color: settings.color,
            exit_codes: settings.exit_codes,
        }
    }

    /// Print an error message. Errors are always shown.
    pub fn error(&self, message: &str) {
        let marker = self.stderr_style(Style::new().red()).apply_to("✖");
        // Nowhere left to report a failing stderr
        let _ = writeln!(io::stderr().lock(), "{} {}", marker, message);
    }

    /// Print an informational line on stdout
    pub fn info(&self, message: &str) {
        let _ = writeln!(io::stdout().lock(), "{}", message);
    }

    fn stderr_style(&self, style: Style) -> Style {
        if self.color {
            style.for_stderr()
        } else {
            Style::new().force_styling(false)
        }
    }
}

impl Reporter for Output {
    fn matched(&mut self, path: &Path) -> io::Result<()> {
        // Raw bytes, so names that are not UTF-8 come out unchanged
        let mut stdout = io::stdout().lock();
        stdout.write_all(path.as_os_str().as_encoded_bytes())?;
        stdout.write_all(b"\n")
    }

    fn executed(&mut self, path: &Path, outcome: &ExecutionResult) -> io::Result<()> {
        match outcome {
            Ok(code) if self.exit_codes => writeln!(io::stdout().lock(), "exit code: {}", code),
            Ok(_) => Ok(()),
            Err(e) => {
                self.error(&format!("{}: {}", path.display(), e));
                Ok(())
            }
        }
    }

    fn walk_error(&mut self, error: &WalkError) {
        self.error(&error.to_string());
    }
}

/// One-line reminder printed when no arguments are given
pub fn usage_reminder() -> String {
    format!(
        "Usage: rfind PATH [-inum INUM] [-name NAME] [-size (-|=|+)SIZE] [-nlinks NLINKS] [-exec EPATH] [--silent]\n\
         Run '{}' for details",
        style("rfind -help").bold()
    )
}
