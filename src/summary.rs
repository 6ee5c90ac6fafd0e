//! End-of-run summary.

use crate::config::AnnotationType;
use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// What a run processed, logged at the end and optionally written as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub annotation_type: AnnotationType,
    pub samples: usize,
    pub strains: usize,
    /// Distinct identifiers in the output table
    pub identifiers: usize,
    /// Sum of all identifier totals per sample
    pub sample_totals: IndexMap<String, f64>,
    pub elapsed_seconds: f64,
}

impl RunSummary {
    pub fn log(&self) {
        info!(
            "Aggregated {} {} identifiers over {} samples and {} strains in {:.2}s",
            self.identifiers, self.annotation_type, self.samples, self.strains, self.elapsed_seconds
        );
        for (sample, total) in &self.sample_totals {
            debug!("Total gene relative abundance in {}: {}", sample, total);
        }
    }
}
