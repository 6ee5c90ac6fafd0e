//! Input checks run before aggregation.

use crate::annotation::{strain_name, ANNOTATION_EXTENSION};
use crate::error::Result;
use crate::relab::read_strain_names;
use log::{info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Strain names that have an annotation file in `annotations_dir`.
pub fn annotated_strains(annotations_dir: &Path) -> Result<HashSet<String>> {
    let mut strains = HashSet::new();
    for entry in fs::read_dir(annotations_dir)? {
        let path = entry?.path();
        if path.is_file()
            && path
                .extension()
                .map_or(false, |ext| ext == ANNOTATION_EXTENSION)
        {
            strains.insert(strain_name(&path));
        }
    }
    Ok(strains)
}

/// Checks that every strain in the relative abundance table has an
/// annotation file.
///
/// Missing strains are logged as warnings and returned; they only become an
/// error if aggregation later needs the file.
pub fn check_files(relab_path: &Path, annotations_dir: &Path) -> Result<Vec<String>> {
    let available = annotated_strains(annotations_dir)?;
    let missing: Vec<String> = read_strain_names(relab_path)?
        .into_iter()
        .filter(|strain| !available.contains(strain))
        .collect();

    for strain in &missing {
        warn!("strain {} annotation file not found", strain);
    }
    if missing.is_empty() {
        info!(
            "All strains have annotation files in {}",
            annotations_dir.display()
        );
    }
    Ok(missing)
}
