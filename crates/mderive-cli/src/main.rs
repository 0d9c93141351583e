//! CLI for deriving child mnemonics from a master mnemonic.

mod cli;
mod handlers;
mod logging;

use std::io;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::handlers::{derive, inspect, new, seed};
use crate::logging::LoggerConfig;

fn main() -> Result<()> {
    let log_line_num = std::env::var("LOG_LINE_NUM").is_ok_and(|v| v == "1");
    logging::init(LoggerConfig::default().with_location(log_line_num));

    let cli = Cli::parse();
    let mut out = io::stdout().lock();
    match cli.command {
        Commands::New(args) => new::handle_new(args, &mut out),
        Commands::Derive(args) => derive::handle_derive(args, &mut out),
        Commands::Seed(args) => seed::handle_seed(args, &mut out),
        Commands::Inspect(args) => inspect::handle_inspect(args, &mut out),
    }
}
