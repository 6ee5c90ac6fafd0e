//! Input/Output operations module.
//!
//! Line-level reading shared by the two input formats, and the writers for
//! the results. Parsing of the inputs lives next to the data it produces
//! ([`crate::relab`], [`crate::annotation`]).

use crate::abundance_table::DenseAbundanceTable;
use crate::error::Result;
use crate::summary::RunSummary;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// First header cell of the output table, whatever the annotation type.
pub const INDEX_LABEL: &str = "gene";

/// Reads the physical lines of a tab-separated file, line endings removed.
///
/// Blank lines are returned as empty strings so callers can reject them
/// with their line number (`index + 1`).
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        match line.strip_suffix('\r') {
            Some(stripped) => lines.push(stripped.to_string()),
            None => lines.push(line),
        }
    }
    Ok(lines)
}

/// Writes a gene abundance table as tab-separated text.
///
/// Rows are identifiers and columns are samples. Cells for identifiers not
/// observed in a sample are left empty.
pub fn write_abundance_table<W: Write>(table: &DenseAbundanceTable, writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);

    // Prepare header: index label followed by sample names
    let mut header = vec![INDEX_LABEL.to_string()];
    header.extend(table.sample_names().iter().cloned());
    writer.write_record(&header)?;

    let (n_features, n_samples) = table.dimensions();
    let feature_names = table.feature_names();
    for r in 0..n_features {
        let mut record = Vec::with_capacity(n_samples + 1);
        record.push(feature_names[r].clone());
        for c in 0..n_samples {
            record.push(
                table.values[[r, c]]
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            );
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes a gene abundance table to `output_path`.
pub fn write_abundance_file(table: &DenseAbundanceTable, output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    write_abundance_table(table, BufWriter::new(file))
}

/// Writes the run summary as pretty-printed JSON.
pub fn write_summary(summary: &RunSummary, output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abundance_table::GeneAbundanceTable;
    use crate::config::AnnotationType;
    use std::fs;
    use tempfile::tempdir;

    fn create_test_table() -> DenseAbundanceTable {
        let mut table = GeneAbundanceTable::new();
        table.add("sample1", "alr", 0.4);
        table.add("sample1", "luxS", 0.6);
        table.add("sample2", "luxS", 1.0);
        table.to_dense()
    }

    #[test]
    fn test_read_lines_keeps_blank_lines() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("rows.tsv");
        fs::write(&file_path, "a\tb\r\n\nc\td\n").unwrap();

        let lines = read_lines(&file_path).unwrap();
        assert_eq!(lines, vec!["a\tb", "", "c\td"]);
    }

    #[test]
    fn test_write_abundance_table_tsv() {
        let table = create_test_table();
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("genes.tsv");

        write_abundance_file(&table, &file_path).unwrap();

        let content = fs::read_to_string(file_path).unwrap();
        let expected_content = "\
gene\tsample1\tsample2\n\
alr\t0.4\t\n\
luxS\t0.6\t1\n";
        assert_eq!(content, expected_content);

        dir.close().unwrap();
    }

    #[test]
    fn test_write_empty_table_has_header() {
        let mut table = GeneAbundanceTable::new();
        table.add_sample("s1");

        let mut buf = Vec::new();
        write_abundance_table(&table.to_dense(), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "gene\ts1\n");
    }

    #[test]
    fn test_write_summary_json() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("summary.json");
        let summary = RunSummary {
            annotation_type: AnnotationType::Ko,
            samples: 2,
            strains: 3,
            identifiers: 10,
            sample_totals: [("s1".to_string(), 1.0), ("s2".to_string(), 0.75)]
                .into_iter()
                .collect(),
            elapsed_seconds: 0.5,
        };

        write_summary(&summary, &file_path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&file_path).unwrap()).unwrap();
        assert_eq!(value["annotation_type"], "ko");
        assert_eq!(value["identifiers"], 10);
        assert_eq!(value["sample_totals"]["s2"], 0.75);
    }
}
