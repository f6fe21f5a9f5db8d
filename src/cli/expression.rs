//! Find-style expression parsing
//!
//! Everything after `PATH` on the command line is a flat list of tokens in the
//! classic `find` shape: `-inum N`, `-name S`, `-size (-|=|+)N` (or glued as
//! `-size+N`), `-nlinks N`, `-exec PROG` and `--silent`.

use crate::error::ConfigError;
use crate::filter::{FilterChain, FilterError};
use std::path::PathBuf;

const EXEC_FLAG: &str = "-exec";
const SILENT_FLAG: &str = "--silent";
const SIZE_FLAG: &str = "-size";

/// Parsed form of the trailing expression
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expression {
    pub filters: FilterChain,
    pub exec: Option<PathBuf>,
    pub silent: bool,
}

impl Expression {
    /// Parse `tokens`, stopping at the first problem
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self, ConfigError> {
        let mut expression = Expression::default();
        let mut tokens = tokens.iter().map(AsRef::as_ref);

        while let Some(token) = tokens.next() {
            if token == SILENT_FLAG {
                expression.silent = true;
            } else if token == EXEC_FLAG {
                let program = tokens
                    .next()
                    .ok_or_else(|| ConfigError::MissingValue(token.to_string()))?;
                if expression.exec.replace(PathBuf::from(program)).is_some() {
                    return Err(ConfigError::DuplicateExec);
                }
            } else if let Some(glued) = token.strip_prefix(SIZE_FLAG).filter(|v| !v.is_empty()) {
                expression.filters.add_filter(SIZE_FLAG, glued)?;
            } else if FilterChain::accepts_flag(token) {
                let value = tokens
                    .next()
                    .ok_or_else(|| ConfigError::MissingValue(token.to_string()))?;
                expression.filters.add_filter(token, value)?;
            } else if token.starts_with('-') {
                return Err(FilterError::UnknownFilter(token.to_string()).into());
            } else {
                return Err(ConfigError::UnexpectedArgument(token.to_string()));
            }
        }

        Ok(expression)
    }
}
