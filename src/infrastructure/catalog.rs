//! Catalog CSV input
//!
//! Reads the vendor export of style codes and EANs. Malformed rows are logged
//! and skipped; an unreadable file is fatal.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use crate::domain::StyleEntry;

/// Read the catalog CSV with "Style Code" / "EAN Code" columns.
///
/// Fields are whitespace-trimmed; rows missing either value are skipped with
/// a warning so one bad export line does not abort the run.
pub fn read_style_entries(path: &Path) -> Result<Vec<StyleEntry>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open catalog CSV: {}", path.display()))?;

    let mut entries = Vec::new();
    for (index, row) in reader.deserialize::<StyleEntry>().enumerate() {
        // +2: one for the header row, one for 1-based line numbers.
        let line = index + 2;
        match row {
            Ok(mut entry) => {
                entry.style_code = entry.style_code.trim().to_string();
                entry.ean = entry.ean.trim().to_string();
                if entry.style_code.is_empty() || entry.ean.is_empty() {
                    warn!(line, "skipping catalog row with empty style code or EAN");
                    continue;
                }
                entries.push(entry);
            }
            Err(error) => {
                warn!(line, %error, "skipping malformed catalog row");
            }
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style_codes.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{content}").unwrap();
        (dir, path)
    }

    #[test]
    fn reads_and_trims_rows() {
        let (_dir, path) = write_csv(
            "Style Code,EAN Code\nCARRERA-1058-S, 00827886014576 \n BOSS-1290 ,8056597123456\n",
        );

        let entries = read_style_entries(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].style_code, "CARRERA-1058-S");
        assert_eq!(entries[0].ean, "00827886014576");
        assert_eq!(entries[1].style_code, "BOSS-1290");
    }

    #[test]
    fn skips_rows_with_empty_fields() {
        let (_dir, path) =
            write_csv("Style Code,EAN Code\n,827886014576\nCARRERA-1058-S,\nBOSS-1290,123\n");

        let entries = read_style_entries(&path).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].style_code, "BOSS-1290");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(read_style_entries(Path::new("/nonexistent/style_codes.csv")).is_err());
    }

    #[test]
    fn extra_columns_are_ignored() {
        let (_dir, path) = write_csv(
            "Style Code,EAN Code,Season\nCARRERA-1058-S,827886014576,SS26\n",
        );

        let entries = read_style_entries(&path).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].ean, "827886014576");
    }
}
