mod accumulated_cmd;
mod cli;
mod config;
mod interval_cmd;
mod logging;
mod table_input;

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
        Command::Interval(args) => interval_cmd::run(args),
        Command::Accumulated(args) => accumulated_cmd::run(args),
    }
}
