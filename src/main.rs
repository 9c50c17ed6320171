mod cli;
mod config;
mod convert;
mod ingest;
mod logging;
mod select_cmd;
mod tracking;
mod windows_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Select(args) => select_cmd::run(args),
        Command::Windows(args) => windows_cmd::run(args),
    }
}
