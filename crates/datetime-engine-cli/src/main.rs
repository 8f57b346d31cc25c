mod cli;
mod commands;
mod logging;

use std::process;

use anyhow::Result;
use clap::Parser;
use datetime_engine::FormatOptions;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let options = if cli.basic {
        FormatOptions::basic()
    } else {
        FormatOptions::default()
    };

    match run(&cli.command, &options) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    }
}

fn run(command: &Command, options: &FormatOptions) -> Result<String> {
    match command {
        Command::Parse(args) => commands::parse(args, options),
        Command::Add(args) => commands::add(args, options),
        Command::Sub(args) => commands::sub(args, options),
        Command::Diff(args) => commands::diff(args),
        Command::Iter(args) => commands::iter(args, options),
        Command::Week(args) => commands::week(args, options),
        Command::Convert(args) => commands::convert(args, options),
        Command::Now(args) => commands::now(args, options),
    }
}
