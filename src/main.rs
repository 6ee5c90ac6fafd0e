//! Command-line entry point for mm12_gene_abundance.

use clap::Parser;
use log::error;
use std::process;
use mm12_gene_abundance::cli::{init_logging, run_cli, Cli};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    if let Err(e) = run_cli(cli) {
        error!("{:#}", e);
        process::exit(1);
    }
}
