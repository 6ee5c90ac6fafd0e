//! Gene relative abundance for defined microbial communities (e.g. MM12).
//!
//! Given the relative abundance of each community member across samples and
//! a prokka-style annotation table per member, every strain's abundance is
//! divided evenly over its annotated features and summed per gene (or EC
//! number, or COG category) across strains. The output is a gene x sample
//! table; which strain a gene came from is not retained.

pub mod abundance_table;
pub mod aggregate;
pub mod annotation;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod relab;
pub mod summary;
pub mod validate;

use anyhow::{Context, Result};
use log::info;
use std::time::Instant;

pub use abundance_table::{DenseAbundanceTable, GeneAbundanceTable};
pub use annotation::{AnnotationCache, AnnotationRecord, StrainAnnotationSet};
pub use config::{AnnotationType, RunConfig};
pub use error::AbundanceError;
pub use relab::StrainAbundanceTable;
pub use summary::RunSummary;

/// Runs the whole workflow: check inputs, load abundances, aggregate and
/// write the gene table.
///
/// Nothing is written unless aggregation succeeds.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let started = Instant::now();

    info!("Checking input files");
    validate::check_files(&config.relab, &config.annotations_dir).with_context(|| {
        format!(
            "Failed to check annotation files in {}",
            config.annotations_dir.display()
        )
    })?;
    info!("Inputs checked...OK");

    info!("Reading relative abundance file...");
    let relab = relab::read_relab(&config.relab).with_context(|| {
        format!(
            "Failed to read relative abundance file {}",
            config.relab.display()
        )
    })?;

    let mut cache = AnnotationCache::new(&config.annotations_dir, config.annotation_type);
    let genes = aggregate::aggregate(&relab, &mut cache)
        .context("Failed to calculate gene relative abundance")?;
    let dense = genes.to_dense();

    info!("Writing results to {}...", config.outfile.display());
    io::write_abundance_file(&dense, &config.outfile)
        .with_context(|| format!("Failed to write {}", config.outfile.display()))?;

    let summary = RunSummary {
        annotation_type: config.annotation_type,
        samples: relab.sample_count(),
        strains: relab.strain_count(),
        identifiers: dense.feature_names().len(),
        sample_totals: genes
            .sample_names()
            .map(|s| (s.to_string(), genes.sample_total(s).unwrap_or_default()))
            .collect(),
        elapsed_seconds: started.elapsed().as_secs_f64(),
    };

    if let Some(path) = &config.summary {
        io::write_summary(&summary, path)
            .with_context(|| format!("Failed to write run summary {}", path.display()))?;
    }

    Ok(summary)
}
