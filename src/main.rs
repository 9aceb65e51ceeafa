mod calibrate_cmd;
mod cli;
mod input;
mod logging;
mod models_cmd;
mod simulate_cmd;

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
        Command::Models(args) => models_cmd::run(args),
        Command::Simulate(args) => simulate_cmd::run(args),
        Command::Calibrate(args) => calibrate_cmd::run(args),
    }
}
