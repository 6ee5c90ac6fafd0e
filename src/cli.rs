use crate::config::{AnnotationType, RunConfig};
use clap::{ArgAction, Parser};
use log::{info, LevelFilter};
use std::path::PathBuf;
use std::str::FromStr;

/// Estimate the abundance of genes in a defined community (e.g. MM12) from
/// the relative abundance of its members and their genome annotations.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Tab-separated relative abundances (rows are strains, columns are samples)
    #[arg(short, long)]
    pub relab: PathBuf,

    /// Directory containing one <strain>.tsv annotation file per strain
    #[arg(short = 'd', long)]
    pub annotations_dir: PathBuf,

    /// Which type of annotation to use: gene, ko or cog
    #[arg(short = 't', long, value_parser = AnnotationType::from_str)]
    pub annotation_type: AnnotationType,

    /// Where to write the gene x sample table
    #[arg(short, long)]
    pub outfile: PathBuf,

    /// Write a JSON summary of the run to this path
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Increase logging verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only report warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Default log level for these flags; `RUST_LOG` still takes precedence.
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Warn;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        RunConfig {
            relab: cli.relab,
            annotations_dir: cli.annotations_dir,
            annotation_type: cli.annotation_type,
            outfile: cli.outfile,
            summary: cli.summary,
        }
    }
}

/// Initializes `env_logger` with `level` unless `RUST_LOG` is set.
pub fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Main entry point for CLI
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    info!("Starting gene abundance estimation with arguments: {:?}", cli);
    let config = RunConfig::from(cli);
    let summary = crate::run(&config)?;
    summary.log();
    info!("Analysis finished successfully.");
    Ok(())
}
