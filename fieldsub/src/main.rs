// fieldsub/src/main.rs
//! fieldsub entry point.

use anyhow::Result;
use clap::Parser;

use fieldsub::cli::{Cli, Commands};
use fieldsub::commands::{apply, check, codec, error_msg};
use fieldsub::logger;

fn main() {
    let cli = Cli::parse();
    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug));

    if let Err(e) = run(&cli) {
        error_msg(format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Apply(cmd) => apply::run_apply(cmd),
        Commands::Check(cmd) => check::run_check(cmd, cli.quiet),
        Commands::Encode(cmd) => codec::run_encode(cmd, cli.quiet),
        Commands::Decode(cmd) => codec::run_decode(cmd),
    }
}
