//! Run configuration.
//!
//! The CLI converts its parsed flags into a [`RunConfig`]; the library's
//! [`crate::run`] entry point only ever sees this validated form.

use crate::error::AbundanceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Which annotation column to aggregate on.
///
/// `Ko` selects the EC-number column, not a KEGG orthology column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationType {
    /// Gene symbol
    Gene,
    /// EC number
    Ko,
    /// COG functional category
    Cog,
}

impl AnnotationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationType::Gene => "gene",
            AnnotationType::Ko => "ko",
            AnnotationType::Cog => "cog",
        }
    }
}

impl FromStr for AnnotationType {
    type Err = AbundanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gene" => Ok(AnnotationType::Gene),
            "ko" => Ok(AnnotationType::Ko),
            "cog" => Ok(AnnotationType::Cog),
            other => Err(AbundanceError::InvalidAnnotationType(other.to_string())),
        }
    }
}

impl fmt::Display for AnnotationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings for a single gene abundance run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Strain x sample relative abundance table
    pub relab: PathBuf,
    /// Directory holding one `<strain>.tsv` annotation file per strain
    pub annotations_dir: PathBuf,
    pub annotation_type: AnnotationType,
    /// Gene x sample output table
    pub outfile: PathBuf,
    /// Optional JSON run summary
    pub summary: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_annotation_types() {
        assert_eq!("gene".parse::<AnnotationType>().unwrap(), AnnotationType::Gene);
        assert_eq!("ko".parse::<AnnotationType>().unwrap(), AnnotationType::Ko);
        assert_eq!("cog".parse::<AnnotationType>().unwrap(), AnnotationType::Cog);
    }

    #[test]
    fn test_parse_invalid_annotation_type() {
        let err = "foo".parse::<AnnotationType>().unwrap_err();
        assert!(matches!(err, AbundanceError::InvalidAnnotationType(ref s) if s == "foo"));

        // case-sensitive, like the accepted choices on the command line
        assert!("Gene".parse::<AnnotationType>().is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        for t in [AnnotationType::Gene, AnnotationType::Ko, AnnotationType::Cog] {
            assert_eq!(t.to_string().parse::<AnnotationType>().unwrap(), t);
        }
    }
}
