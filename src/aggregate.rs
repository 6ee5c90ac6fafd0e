//! Gene-level abundance from strain-level abundance.
//!
//! Each strain's relative abundance in a sample is split evenly over its
//! annotated features, and shares landing on the same identifier are summed
//! regardless of which strain they came from. Only summation is involved, so
//! the result does not depend on the order samples, strains or annotation
//! rows are visited.

use crate::abundance_table::GeneAbundanceTable;
use crate::annotation::{AnnotationCache, StrainAnnotationSet};
use crate::error::{AbundanceError, Result};
use crate::relab::StrainAbundanceTable;
use log::debug;

/// Identifier that is never counted; guards against a stray header row.
pub const SKIPPED_IDENTIFIER: &str = "gene";

/// Parses a relative abundance cell.
pub fn parse_abundance(sample: &str, strain: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| AbundanceError::InvalidAbundance {
            sample: sample.to_string(),
            strain: strain.to_string(),
            value: value.to_string(),
        })
}

/// Adds one strain's contribution to `sample`.
///
/// Every annotation row gets `abundance / n`, where `n` counts all rows of
/// the strain (including skipped ones). Fails if the strain has no rows.
pub fn add_strain_contribution(
    table: &mut GeneAbundanceTable,
    sample: &str,
    annotations: &StrainAnnotationSet,
    abundance: f64,
) -> Result<()> {
    let n = annotations.len();
    if n == 0 {
        return Err(AbundanceError::EmptyAnnotation {
            strain: annotations.strain.clone(),
            path: annotations.path.clone(),
        });
    }

    let share = abundance / n as f64;
    for identifier in &annotations.identifiers {
        if identifier == SKIPPED_IDENTIFIER {
            continue;
        }
        table.add(sample, identifier, share);
    }
    Ok(())
}

/// Computes gene abundance for every sample in `relab`.
///
/// Annotation files are read through `cache`, so each strain is loaded once
/// however many samples it appears in.
pub fn aggregate(
    relab: &StrainAbundanceTable,
    cache: &mut AnnotationCache,
) -> Result<GeneAbundanceTable> {
    let mut table = GeneAbundanceTable::new();

    for (sample, strains) in relab.iter() {
        table.add_sample(sample);
        for (strain, value) in strains {
            debug!(
                "Calculating gene relative abundance for {} and annotations for {}",
                sample, strain
            );
            let abundance = parse_abundance(sample, strain, value)?;
            let annotations = cache.get(strain)?;
            add_strain_contribution(&mut table, sample, annotations, abundance)?;
        }
    }

    Ok(table)
}
