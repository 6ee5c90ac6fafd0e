//! Error types shared by the loaders, the aggregator and the writers.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AbundanceError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Table error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("annotation_type must be one of gene, ko or cog (got '{0}')")]
    InvalidAnnotationType(String),

    #[error("Malformed annotation row at {}:{line}: expected 7 tab-separated fields, found {found}", .path.display())]
    MalformedAnnotation {
        path: PathBuf,
        line: usize,
        found: usize,
    },

    #[error("Malformed relative abundance row at {}:{line}: {message}", .path.display())]
    MalformedAbundance {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("No annotation file found for strain '{0}'")]
    MissingAnnotation(String),

    #[error("Annotation file for strain '{strain}' has no rows ({}); cannot divide abundance", .path.display())]
    EmptyAnnotation { strain: String, path: PathBuf },

    #[error("Relative abundance '{value}' for strain '{strain}' in sample '{sample}' is not a number")]
    InvalidAbundance {
        sample: String,
        strain: String,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, AbundanceError>;
