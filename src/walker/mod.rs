//! Depth-first traversal
//!
//! The walker visits a directory tree through a [`FileSystem`], evaluates the
//! [`FilterChain`] against every regular file, and hands matches and failures
//! to a [`Reporter`]. It never prints anything itself.
//!
//! Traversal rules:
//! - entries are visited in the order the listing returns them, recursing into
//!   a subdirectory as soon as it is encountered
//! - only entries that are positively directories or regular files are
//!   considered; symlinks and special files are skipped (no cycle detection)
//! - a directory that cannot be listed or a file that cannot be stat'ed is
//!   reported and skipped, the rest of the tree is still visited
//! - a match is reported before the executor runs on it
//! - if the reporter cannot deliver a result (for example a closed pipe), the
//!   walk stops and the summary records why

use crate::error::ConfigError;
use crate::exec::{ExecutionResult, Executor};
use crate::filter::FilterChain;
use crate::fs::{EntryKind, FileSystem};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, trace};


/// Non-fatal failure isolated to one directory or one file
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("Cannot read directory '{}': {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot stat '{}': {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WalkError {
    pub fn path(&self) -> &Path {
        match self {
            WalkError::ReadDir { path, .. } | WalkError::Stat { path, .. } => path,
        }
    }
}

/// Receives traversal events in discovery order.
///
/// An error from `matched` or `executed` means results can no longer be
/// delivered and stops the walk.
pub trait Reporter {
    /// A regular file matched every filter. Not called in silent mode.
    fn matched(&mut self, path: &Path) -> io::Result<()>;

    /// The executor finished with `path`
    fn executed(&mut self, path: &Path, outcome: &ExecutionResult) -> io::Result<()>;

    /// A directory or file was skipped because of `error`
    fn walk_error(&mut self, error: &WalkError);
}

/// Everything a walk needs, fixed before traversal starts
#[derive(Debug, Clone)]
pub struct WalkConfig {
    pub root: PathBuf,
    pub filters: FilterChain,
    pub executor: Executor,
    /// Suppress match reporting; execution still happens
    pub silent: bool,
}

impl WalkConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            filters: FilterChain::new(),
            executor: Executor::disabled(),
            silent: false,
        }
    }

    pub fn with_filters(mut self, filters: FilterChain) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_executor(mut self, executor: Executor) -> Self {
        self.executor = executor;
        self
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }
}

/// Counters for one completed walk
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkSummary {
    pub directories: usize,
    pub files: usize,
    pub matches: usize,
    pub executed: usize,
    pub errors: usize,
    /// Set when the reporter refused a result and the walk stopped early
    pub interrupted: Option<io::ErrorKind>,
}

pub struct Walker {
    config: WalkConfig,
}

impl Walker {
    pub fn new(config: WalkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// Walk the tree under the configured root.
    ///
    /// Fails only when the root itself is missing, unreadable or not a
    /// directory, in which case nothing is reported.
    pub fn walk<F, R>(&self, fs: &F, reporter: &mut R) -> Result<WalkSummary, ConfigError>
    where
        F: FileSystem + ?Sized,
        R: Reporter + ?Sized,
    {
        let root = &self.config.root;
        match fs.entry_kind(root) {
            Ok(EntryKind::Directory) => {}
            Ok(_) => return Err(ConfigError::NotADirectory(root.clone())),
            Err(source) => {
                return Err(ConfigError::RootInaccessible {
                    path: root.clone(),
                    source,
                });
            }
        }

        info!(
            "Walking {} with {} filter(s)",
            root.display(),
            self.config.filters.len()
        );

        let mut summary = WalkSummary::default();
        if let Err(e) = self.visit_directory(fs, root, reporter, &mut summary) {
            debug!("Walk stopped: reporter failed: {}", e);
            summary.interrupted = Some(e.kind());
        }

        info!(
            "Visited {} directories and {} files: {} matches, {} executed, {} errors",
            summary.directories, summary.files, summary.matches, summary.executed, summary.errors
        );
        Ok(summary)
    }

    fn visit_directory<F, R>(
        &self,
        fs: &F,
        dir: &Path,
        reporter: &mut R,
        summary: &mut WalkSummary,
    ) -> io::Result<()>
    where
        F: FileSystem + ?Sized,
        R: Reporter + ?Sized,
    {
        let entries = match fs.read_dir(dir) {
            Ok(entries) => entries,
            Err(source) => {
                debug!("Skipping directory {}: {}", dir.display(), source);
                summary.errors += 1;
                reporter.walk_error(&WalkError::ReadDir {
                    path: dir.to_path_buf(),
                    source,
                });
                return Ok(());
            }
        };

        summary.directories += 1;
        debug!("Listing {} ({} entries)", dir.display(), entries.len());

        for entry in entries {
            if entry.is_pseudo() {
                continue;
            }
            let path = dir.join(&entry.name);
            match entry.kind {
                EntryKind::Directory => self.visit_directory(fs, &path, reporter, summary)?,
                EntryKind::File => self.visit_file(fs, &path, reporter, summary)?,
                EntryKind::Other => trace!("Skipping {}: not a file or directory", path.display()),
            }
        }
        Ok(())
    }

    fn visit_file<F, R>(
        &self,
        fs: &F,
        path: &Path,
        reporter: &mut R,
        summary: &mut WalkSummary,
    ) -> io::Result<()>
    where
        F: FileSystem + ?Sized,
        R: Reporter + ?Sized,
    {
        summary.files += 1;

        let stat = match fs.stat(path) {
            Ok(stat) => stat,
            Err(source) => {
                debug!("Skipping file {}: {}", path.display(), source);
                summary.errors += 1;
                reporter.walk_error(&WalkError::Stat {
                    path: path.to_path_buf(),
                    source,
                });
                return Ok(());
            }
        };

        if !self.config.filters.apply(&stat) {
            trace!("No match: {}", path.display());
            return Ok(());
        }

        summary.matches += 1;
        if !self.config.silent {
            reporter.matched(path)?;
        }

        if self.config.executor.active() {
            let outcome = self.config.executor.process(path);
            summary.executed += 1;
            reporter.executed(path, &outcome)?;
        }
        Ok(())
    }
}
