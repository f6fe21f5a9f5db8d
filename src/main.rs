use clap::{CommandFactory, Parser};
use rfind::cli::{Cli, Output};
use rfind::config::OutputSettings;
use std::process::ExitCode;

fn main() -> ExitCode {
    // find-style single-dash help
    if std::env::args_os().nth(1).is_some_and(|arg| arg == "-help") {
        let _ = Cli::command().print_long_help();
        return ExitCode::SUCCESS;
    }

    let cli = Cli::parse();
    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            Output::new(OutputSettings::default()).error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
