//! Gene abundance tables.
//!
//! [`GeneAbundanceTable`] is the sparse sample -> (identifier -> abundance)
//! mapping the aggregator fills in. [`DenseAbundanceTable`] is its finalized
//! identifier x sample matrix, where cells never observed stay `None`.

use indexmap::IndexMap;
use itertools::Itertools;
use ndarray::{Array2, ArrayView1};

/// Sample -> (identifier -> accumulated relative abundance).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneAbundanceTable {
    samples: IndexMap<String, IndexMap<String, f64>>,
}

impl GeneAbundanceTable {
    /// Creates a new, empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a sample column even if nothing is ever added to it.
    pub fn add_sample(&mut self, sample: &str) {
        self.samples.entry(sample.to_string()).or_default();
    }

    /// Adds `value` to the running total of `identifier` in `sample`.
    pub fn add(&mut self, sample: &str, identifier: &str, value: f64) {
        let totals = self.samples.entry(sample.to_string()).or_default();
        match totals.get_mut(identifier) {
            Some(total) => *total += value,
            None => {
                totals.insert(identifier.to_string(), value);
            }
        }
    }

    pub fn get(&self, sample: &str, identifier: &str) -> Option<f64> {
        self.samples
            .get(sample)
            .and_then(|totals| totals.get(identifier))
            .copied()
    }

    /// Identifier totals for one sample.
    pub fn sample(&self, sample: &str) -> Option<&IndexMap<String, f64>> {
        self.samples.get(sample)
    }

    pub fn sample_names(&self) -> impl Iterator<Item = &str> {
        self.samples.keys().map(String::as_str)
    }

    /// Distinct identifiers over all samples, in order of first appearance.
    pub fn identifiers(&self) -> Vec<&str> {
        self.samples
            .values()
            .flat_map(|totals| totals.keys())
            .map(String::as_str)
            .unique()
            .collect()
    }

    /// Sum of all identifier totals in a sample.
    pub fn sample_total(&self, sample: &str) -> Option<f64> {
        self.samples
            .get(sample)
            .map(|totals| totals.values().sum())
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Finalizes into a dense identifier x sample table.
    pub fn to_dense(&self) -> DenseAbundanceTable {
        let feature_names: Vec<String> =
            self.identifiers().into_iter().map(str::to_string).collect();
        let sample_names: Vec<String> = self.samples.keys().cloned().collect();

        let mut values = Array2::from_elem((feature_names.len(), sample_names.len()), None);
        for (c, totals) in self.samples.values().enumerate() {
            for (r, feature) in feature_names.iter().enumerate() {
                values[[r, c]] = totals.get(feature).copied();
            }
        }

        DenseAbundanceTable {
            values,
            feature_names,
            sample_names,
        }
    }
}

/// Identifier x sample matrix; `None` marks an identifier never observed in
/// that sample.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseAbundanceTable {
    pub values: Array2<Option<f64>>,
    pub feature_names: Vec<String>,
    pub sample_names: Vec<String>,
}

impl DenseAbundanceTable {
    /// Returns the dimensions of the table (features, samples).
    pub fn dimensions(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Values for one identifier across samples.
    pub fn feature_row(&self, feature_name: &str) -> Option<ArrayView1<Option<f64>>> {
        self.feature_names
            .iter()
            .position(|f| f == feature_name)
            .map(|idx| self.values.row(idx))
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn sample_names(&self) -> &[String] {
        &self.sample_names
    }
}
