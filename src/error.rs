//! Fatal configuration errors
//!
//! Anything in here stops the run before traversal starts. Errors that happen
//! during traversal live next to the walker and executor and are never fatal.

use crate::filter::FilterError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("Missing value for '{0}'")]
    MissingValue(String),

    #[error("Unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error("'-exec' may only be given once")]
    DuplicateExec,

    #[error("Executable '{}' does not exist", .0.display())]
    ExecutableNotFound(PathBuf),

    #[error("Cannot access '{}': {source}", .path.display())]
    RootInaccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),
}
