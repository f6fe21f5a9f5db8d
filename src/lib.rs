//! # rfind - find regular files by inode, name, size and hardlink count
//!
//! rfind walks a directory tree depth-first and reports every regular file
//! that satisfies all of the given filters, optionally running a program on
//! each match.
//!
//! ## Quick Start
//!
//! ```bash
//! # Files larger than 100 bytes
//! rfind /tmp/project -size +100
//!
//! # Run a program on every file named notes.txt, without printing paths
//! rfind ~/docs -name notes.txt -exec /usr/bin/wc --silent
//! ```
//!
//! ## Library Usage
//!
//! ```no_run
//! use rfind::{FilterChain, OsFileSystem, WalkConfig, Walker, Output};
//! use rfind::config::OutputSettings;
//!
//! let mut filters = FilterChain::new();
//! filters.add_filter("-size", "+100")?;
//!
//! let config = WalkConfig::new("/tmp/project").with_filters(filters);
//! let mut output = Output::new(OutputSettings::default());
//! let summary = Walker::new(config).walk(&OsFileSystem, &mut output)?;
//! println!("{} matches", summary.matches);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Configuration
//!
//! Output and logging defaults can be changed in
//! `~/.config/rfind/config.toml` or with `RFIND_*` environment variables,
//! for example `RFIND_OUTPUT__EXIT_CODES=false`.

pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod filter;
pub mod fs;
pub mod walker;

pub use cli::{Cli, Output};
pub use config::FindConfig;
pub use error::ConfigError;
pub use exec::{Executor, ExecutionResult};
pub use filter::{FilterAtom, FilterChain, FilterError, FilterKind};
pub use fs::{FileStat, FileSystem, OsFileSystem};
pub use walker::{Reporter, WalkConfig, WalkSummary, Walker};

/// Result type alias for rfind operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
