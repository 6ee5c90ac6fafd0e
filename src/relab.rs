//! Relative abundance table handling.
//!
//! The input is a tab-separated strain x sample matrix:
//!
//! ```text
//! strain  sample1  sample2
//! KB1     0.33     0.20
//! YL32    0.33     0.80
//! ```
//!
//! It is read into a sample -> (strain -> abundance) mapping. Abundances are
//! kept as text here and parsed when the aggregator uses them.

use crate::error::{AbundanceError, Result};
use crate::io::read_lines;
use indexmap::IndexMap;
use log::warn;
use std::path::Path;

/// Sample -> (strain -> relative abundance as written in the file).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrainAbundanceTable {
    samples: IndexMap<String, IndexMap<String, String>>,
    strains: Vec<String>,
}

impl StrainAbundanceTable {
    /// Creates a new, empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the abundance of `strain` in `sample`, replacing any earlier value.
    pub fn insert(&mut self, sample: &str, strain: &str, value: &str) {
        if !self.strains.iter().any(|s| s == strain) {
            self.strains.push(strain.to_string());
        }
        self.samples
            .entry(sample.to_string())
            .or_default()
            .insert(strain.to_string(), value.to_string());
    }

    /// Sample names in header order.
    pub fn sample_names(&self) -> impl Iterator<Item = &str> {
        self.samples.keys().map(String::as_str)
    }

    /// Strain names in row order.
    pub fn strain_names(&self) -> &[String] {
        &self.strains
    }

    /// Strain -> abundance text for one sample.
    pub fn sample(&self, sample: &str) -> Option<&IndexMap<String, String>> {
        self.samples.get(sample)
    }

    pub fn get(&self, sample: &str, strain: &str) -> Option<&str> {
        self.samples
            .get(sample)
            .and_then(|strains| strains.get(strain))
            .map(String::as_str)
    }

    /// Iterates over `(sample, strain -> abundance)` in sample order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexMap<String, String>)> {
        self.samples.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn strain_count(&self) -> usize {
        self.strains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Loads the relative abundance table.
///
/// Columns are matched positionally against the header. A data row with
/// fewer values than there are samples, or a blank line, is an error; extra
/// values are ignored.
pub fn read_relab(path: &Path) -> Result<StrainAbundanceTable> {
    let lines = read_lines(path)?;
    let mut rows = lines.iter().enumerate();

    let header = match rows.next() {
        Some((_, header)) if !header.is_empty() => header,
        _ => {
            return Err(AbundanceError::MalformedAbundance {
                path: path.to_path_buf(),
                line: 1,
                message: "missing header row".to_string(),
            })
        }
    };
    let samples: Vec<&str> = header.split('\t').skip(1).collect();
    if samples.is_empty() {
        warn!(
            "Relative abundance file '{}' has no sample columns.",
            path.display()
        );
    }

    let mut table = StrainAbundanceTable::new();
    for (idx, line) in rows {
        let line_no = idx + 1;
        if line.is_empty() {
            return Err(AbundanceError::MalformedAbundance {
                path: path.to_path_buf(),
                line: line_no,
                message: "blank line".to_string(),
            });
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let strain = fields[0];
        if fields.len() < samples.len() + 1 {
            return Err(AbundanceError::MalformedAbundance {
                path: path.to_path_buf(),
                line: line_no,
                message: format!(
                    "strain '{}' has {} values but the header names {} samples",
                    strain,
                    fields.len() - 1,
                    samples.len()
                ),
            });
        }
        if table.strain_names().iter().any(|s| s == strain) {
            warn!(
                "Strain '{}' appears more than once in '{}'; the later row wins.",
                strain,
                path.display()
            );
        }
        for (sample, value) in samples.iter().zip(&fields[1..]) {
            table.insert(sample, strain, value);
        }
    }

    Ok(table)
}

/// Strain names listed in the relative abundance file, in row order.
///
/// Blank lines are passed over; [`read_relab`] is the one that rejects them.
pub fn read_strain_names(path: &Path) -> Result<Vec<String>> {
    Ok(read_lines(path)?
        .iter()
        .skip(1)
        .filter(|line| !line.is_empty())
        .filter_map(|line| line.split('\t').next())
        .map(str::to_string)
        .collect())
}
