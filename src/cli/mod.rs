//! Command-line interface for rfind
//!
//! clap handles the fixed options; everything after `PATH` is handed verbatim
//! to the find-style [`Expression`] parser.

use anyhow::{Result, bail};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::debug;

mod expression;
mod output;

pub use expression::Expression;
pub use output::{Output, usage_reminder};

use crate::config::FindConfig;
use crate::exec::Executor;
use crate::fs::OsFileSystem;
use crate::walker::{WalkConfig, Walker};

const EXPRESSION_HELP: &str = "\
Expression:
  -inum INUM          inode number equals INUM
  -name NAME          file name equals NAME exactly (no globbing)
  -size (-|=|+)SIZE   size in bytes is less than, equal to or greater than SIZE
  -nlinks NLINKS      hardlink count equals NLINKS
  -exec EPATH         run EPATH with each matched file as its only argument
  --silent            do not print matched paths

All filters must match. Only regular files are reported; symbolic links and
special files are neither followed nor reported.";

/// rfind - find regular files by inode, name, size and hardlink count
#[derive(Parser, Debug)]
#[command(name = "rfind", author, version, about, long_about = None)]
#[command(after_long_help = EXPRESSION_HELP)]
pub struct Cli {
    /// Directory to search
    #[arg(value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Do not print matched paths
    #[arg(long)]
    pub silent: bool,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable logging
    #[arg(short, long)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, value_name = "FILE", env = "RFIND_CONFIG")]
    pub config: Option<PathBuf>,

    /// Filter expression (see --help)
    #[arg(
        value_name = "EXPRESSION",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        num_args = 0..
    )]
    pub expression: Vec<String>,
}

impl Cli {
    /// Execute the search
    pub fn run(self) -> Result<()> {
        let settings = FindConfig::load_with_custom_config(self.config.as_deref()).settings();

        // A broken config file must not hide the usage reminder
        let Some(root) = self.root else {
            let output_settings = settings.map(|s| s.output).unwrap_or_default();
            Output::new(output_settings).info(&usage_reminder());
            return Ok(());
        };

        let settings = settings?;
        setup_logging(self.verbose, self.quiet, &settings.log.level);
        let mut output = Output::new(settings.output);

        // Configuration is validated completely before the walk starts
        let expression = Expression::parse(&self.expression)?;
        let executor = match &expression.exec {
            Some(program) => Executor::new(program)?,
            None => Executor::disabled(),
        };

        let config = WalkConfig::new(root)
            .with_filters(expression.filters)
            .with_executor(executor)
            .with_silent(self.silent || expression.silent || settings.output.silent);
        debug!("Walk configuration: {:?}", config);

        let summary = Walker::new(config).walk(&OsFileSystem, &mut output)?;
        debug!("Walk summary: {:?}", summary);

        match summary.interrupted {
            // Reader went away, e.g. `rfind DIR | head -1`
            None | Some(io::ErrorKind::BrokenPipe) => Ok(()),
            Some(kind) => bail!("Failed to write results: {}", kind),
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool, level: &str) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new(level),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // stdout carries results only
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
