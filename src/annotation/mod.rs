//! Per-strain annotation tables.
//!
//! Each strain in the community has one tab-separated annotation file named
//! `<strain>.tsv` (no header, seven columns per row). Loading a file reduces
//! it to the ordered list of identifiers of the requested type; duplicate
//! identifiers are kept because each copy gets its own share of abundance.

pub mod record;

pub use record::AnnotationRecord;

use crate::config::AnnotationType;
use crate::error::{AbundanceError, Result};
use crate::io::read_lines;
use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Extension of annotation files inside the annotation directory.
pub const ANNOTATION_EXTENSION: &str = "tsv";

/// The identifiers contributed by one strain, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct StrainAnnotationSet {
    pub strain: String,
    /// File the identifiers were read from
    pub path: PathBuf,
    pub identifiers: Vec<String>,
}

impl StrainAnnotationSet {
    /// Number of annotated features (rows) for the strain.
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

/// Strain name for an annotation file: base name with `.tsv` removed.
pub fn strain_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.strip_suffix(".tsv") {
        Some(stem) => stem.to_string(),
        None => file_name,
    }
}

/// Location of the annotation file for `strain` inside `annotations_dir`.
pub fn annotation_path(annotations_dir: &Path, strain: &str) -> PathBuf {
    annotations_dir.join(format!("{}.{}", strain, ANNOTATION_EXTENSION))
}

/// Reads every row of an annotation file.
///
/// Fails with [`AbundanceError::MalformedAnnotation`] on the first row with
/// fewer than seven columns, blank lines included.
pub fn read_annotation_records(path: &Path) -> Result<Vec<AnnotationRecord>> {
    let mut records = Vec::new();
    for (idx, line) in read_lines(path)?.iter().enumerate() {
        let fields: Vec<&str> = line.split('\t').collect();
        let record = AnnotationRecord::from_fields(&fields).ok_or_else(|| {
            AbundanceError::MalformedAnnotation {
                path: path.to_path_buf(),
                line: idx + 1,
                found: fields.len(),
            }
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Loads the identifier list of one strain for the given annotation type.
pub fn build_annotation(path: &Path, annotation_type: AnnotationType) -> Result<StrainAnnotationSet> {
    let strain = strain_name(path);
    let identifiers = read_annotation_records(path)?
        .iter()
        .map(|record| record.identifier(annotation_type).to_string())
        .collect::<Vec<_>>();
    debug!(
        "Loaded {} {} annotations for strain {} from {}",
        identifiers.len(),
        annotation_type,
        strain,
        path.display()
    );
    Ok(StrainAnnotationSet {
        strain,
        path: path.to_path_buf(),
        identifiers,
    })
}

/// Loads each strain's annotations at most once per run.
pub struct AnnotationCache {
    annotations_dir: PathBuf,
    annotation_type: AnnotationType,
    loaded: HashMap<String, StrainAnnotationSet>,
}

impl AnnotationCache {
    pub fn new(annotations_dir: &Path, annotation_type: AnnotationType) -> Self {
        AnnotationCache {
            annotations_dir: annotations_dir.to_path_buf(),
            annotation_type,
            loaded: HashMap::new(),
        }
    }

    pub fn annotation_type(&self) -> AnnotationType {
        self.annotation_type
    }

    /// Returns the annotation set for `strain`, reading its file on first use.
    pub fn get(&mut self, strain: &str) -> Result<&StrainAnnotationSet> {
        if !self.loaded.contains_key(strain) {
            let path = annotation_path(&self.annotations_dir, strain);
            if !path.is_file() {
                return Err(AbundanceError::MissingAnnotation(strain.to_string()));
            }
            let set = build_annotation(&path, self.annotation_type)?;
            self.loaded.insert(strain.to_string(), set);
        }
        self.loaded
            .get(strain)
            .ok_or_else(|| AbundanceError::MissingAnnotation(strain.to_string()))
    }

    /// Number of strains loaded so far.
    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const KB1: &str = "\
LHNLDECA_00001\tCDS\t1368\talr\t5.1.1.1\tCOG0787\tAlanine racemase
LHNLDECA_00002\tCDS\t525\t\t\t\thypothetical protein
LHNLDECA_00003\tCDS\t501\tluxS\t4.4.1.21\tCOG1854\tS-ribosylhomocysteine lyase
LHNLDECA_00004\tCDS\t1080\thcxA_2\t1.1.1.-\tCOG0371\tHydroxycarboxylate dehydrogenase A
";

    #[test]
    fn test_strain_name_from_path() {
        assert_eq!(strain_name(Path::new("/data/annotations/KB1.tsv")), "KB1");
        assert_eq!(strain_name(Path::new("YL32.tsv")), "YL32");
        assert_eq!(strain_name(Path::new("dir/I46")), "I46");
    }

    #[test]
    fn test_build_annotation_gene() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("KB1.tsv");
        fs::write(&path, KB1).unwrap();

        let set = build_annotation(&path, AnnotationType::Gene).unwrap();
        assert_eq!(set.strain, "KB1");
        assert_eq!(
            set.identifiers,
            vec!["alr", "unannotated_gene", "luxS", "hcxA"]
        );
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_build_annotation_ko_uses_ec_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("KB1.tsv");
        fs::write(&path, KB1).unwrap();

        let set = build_annotation(&path, AnnotationType::Ko).unwrap();
        assert_eq!(
            set.identifiers,
            vec!["5.1.1.1", "unannotated_ec", "4.4.1.21", "1.1.1.-"]
        );

        let set = build_annotation(&path, AnnotationType::Cog).unwrap();
        assert_eq!(
            set.identifiers,
            vec!["COG0787", "unannotated_cog", "COG1854", "COG0371"]
        );
    }

    #[test]
    fn test_short_row_is_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.tsv");
        fs::write(&path, "t1\tCDS\t100\talr\t1.1.1.1\tCOG1\tprod\nt2\tCDS\t100\n").unwrap();

        let err = build_annotation(&path, AnnotationType::Gene).unwrap_err();
        match err {
            AbundanceError::MalformedAnnotation { path: p, line, found } => {
                assert_eq!(p, path);
                assert_eq!(line, 2);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_blank_line_is_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("KB1.tsv");
        fs::write(
            &path,
            "t1\tCDS\t100\talr\t\t\tprod\n\nt2\tCDS\t100\tluxS\t\t\tprod\n",
        )
        .unwrap();

        let err = build_annotation(&path, AnnotationType::Gene).unwrap_err();
        assert!(matches!(
            err,
            AbundanceError::MalformedAnnotation { line: 2, found: 1, .. }
        ));
    }

    #[test]
    fn test_crlf_line_endings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("KB1.tsv");
        fs::write(&path, "t1\tCDS\t100\talr\t\t\tprod\r\nt2\tCDS\t100\tluxS\t\t\t\r\n").unwrap();

        let records = read_annotation_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].product_description(), "unannotated_gene_product");
    }

    #[test]
    fn test_quotes_in_product_are_literal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("S1.tsv");
        fs::write(&path, "t1\tCDS\t99\tabc\t\t\t\"putative\" protein\n").unwrap();

        let records = read_annotation_records(&path).unwrap();
        assert_eq!(records[0].product_description(), "\"putative\" protein");
    }

    #[test]
    fn test_empty_file_yields_empty_set() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("EMPTY.tsv");
        fs::write(&path, "").unwrap();

        let set = build_annotation(&path, AnnotationType::Gene).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_cache_loads_once_and_reports_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("KB1.tsv");
        fs::write(&path, KB1).unwrap();

        let mut cache = AnnotationCache::new(dir.path(), AnnotationType::Gene);
        assert_eq!(cache.get("KB1").unwrap().len(), 4);

        // a second lookup must not touch the file again
        fs::remove_file(&path).unwrap();
        assert_eq!(cache.get("KB1").unwrap().len(), 4);
        assert_eq!(cache.len(), 1);

        let err = cache.get("YL32").unwrap_err();
        assert!(matches!(err, AbundanceError::MissingAnnotation(ref s) if s == "YL32"));
    }
}
