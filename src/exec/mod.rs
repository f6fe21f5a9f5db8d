//! External program execution
//!
//! The executor runs one configured program per matched file, passing the file
//! path as its only argument. Children are spawned directly (no shell) and
//! waited on before the walk moves to the next candidate.

use crate::error::ConfigError;
use std::path::{Component, Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

#[cfg(unix)]
use std::os::unix::process::ExitStatusExt;

/// Outcome of one execution: the child's exit code, or why there is none
pub type ExecutionResult = std::result::Result<i32, ExecError>;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("Target '{}' no longer exists", .0.display())]
    TargetMissing(PathBuf),

    #[error("Failed to run '{}': {source}", .program.display())]
    SpawnFailed {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}' terminated abnormally{}", .program.display(), describe_signal(.signal))]
    AbnormalExit {
        program: PathBuf,
        signal: Option<i32>,
    },
}

/// Optional single external program
#[derive(Debug, Clone, Default)]
pub struct Executor {
    program: Option<PathBuf>,
}

impl Executor {
    /// An executor that never runs anything
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Configure `program`, checking once that it exists.
    ///
    /// An existing file is stored as an absolute path so the file checked here
    /// is the one spawned later. A bare name that is not a file in the working
    /// directory is looked up on `PATH`.
    pub fn new(program: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let program = program.as_ref();
        let resolved = if program.is_file() {
            std::path::absolute(program)
                .map_err(|_| ConfigError::ExecutableNotFound(program.to_path_buf()))?
        } else if is_bare_name(program) {
            which::which(program)
                .map_err(|_| ConfigError::ExecutableNotFound(program.to_path_buf()))?
        } else {
            return Err(ConfigError::ExecutableNotFound(program.to_path_buf()));
        };

        debug!("Executor configured: {}", resolved.display());
        Ok(Self {
            program: Some(resolved),
        })
    }

    pub fn active(&self) -> bool {
        self.program.is_some()
    }

    pub fn program(&self) -> Option<&Path> {
        self.program.as_deref()
    }

    /// Run the program on `file_path` and wait for it.
    ///
    /// A non-zero exit code is a normal result, not an error. Returns
    /// `Ok(0)` without spawning when the executor is disabled.
    pub fn process(&self, file_path: &Path) -> ExecutionResult {
        let Some(program) = &self.program else {
            return Ok(0);
        };

        if std::fs::symlink_metadata(file_path).is_err() {
            return Err(ExecError::TargetMissing(file_path.to_path_buf()));
        }

        debug!("Running {} {}", program.display(), file_path.display());
        let status = Command::new(program)
            .arg(file_path)
            .status()
            .map_err(|source| {
                debug!("Spawn of {} failed: {}", program.display(), source);
                ExecError::SpawnFailed {
                    program: program.clone(),
                    source,
                }
            })?;

        match status.code() {
            Some(code) => Ok(code),
            None => Err(ExecError::AbnormalExit {
                program: program.clone(),
                signal: exit_signal(&status),
            }),
        }
    }
}

fn describe_signal(signal: &Option<i32>) -> String {
    signal.map(|s| format!(" (signal {s})")).unwrap_or_default()
}

fn is_bare_name(program: &Path) -> bool {
    let mut components = program.components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(unix)]
fn exit_signal(status: &std::process::ExitStatus) -> Option<i32> {
    status.signal()
}

#[cfg(not(unix))]
fn exit_signal(_status: &std::process::ExitStatus) -> Option<i32> {
    None
}
