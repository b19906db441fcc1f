//! Tabular import: (label, value) pairs from the first two CSV columns.

use crate::errors::DiaError;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub delimiter: u8,
    pub has_headers: bool,
    /// Skip rows whose value column is not a number instead of failing the import.
    pub skip_errors: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self { delimiter: b',', has_headers: true, skip_errors: true }
    }
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub imported: u64,
    pub skipped: u64,
}

/// Read label/value pairs. Column one becomes the label, column two must be a number;
/// further columns are ignored.
pub fn read_pairs<R: Read>(
    reader: R,
    opts: &ImportOptions,
    report: &mut ImportReport,
) -> Result<Vec<(String, f64)>, DiaError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(opts.has_headers)
        .delimiter(opts.delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut pairs = Vec::new();
    for (row_no, rec) in rdr.records().enumerate() {
        let rec = match rec {
            Ok(r) => r,
            Err(e) if opts.skip_errors => {
                log::warn!("row {}: {e}", row_no + 1);
                report.skipped += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        let (Some(label), Some(raw)) = (rec.get(0), rec.get(1)) else {
            if opts.skip_errors {
                report.skipped += 1;
                continue;
            }
            return Err(DiaError::Parse {
                line: row_no + 1,
                message: "expected at least two columns".into(),
            });
        };
        match raw.parse::<f64>() {
            Ok(value) => {
                pairs.push((label.to_string(), value));
                report.imported += 1;
            }
            Err(_) if opts.skip_errors => {
                log::debug!("row {}: value {raw:?} is not a number", row_no + 1);
                report.skipped += 1;
            }
            Err(e) => {
                return Err(DiaError::Parse {
                    line: row_no + 1,
                    message: format!("invalid value {raw:?}: {e}"),
                });
            }
        }
    }
    log::info!("imported {} rows, skipped {}", report.imported, report.skipped);
    Ok(pairs)
}

/// Convenience over [`read_pairs`] for a file on disk.
pub fn import_csv_file(
    path: &Path,
    opts: &ImportOptions,
) -> Result<(Vec<(String, f64)>, ImportReport), DiaError> {
    let file = std::fs::File::open(path)?;
    let mut report = ImportReport::default();
    let pairs = read_pairs(file, opts, &mut report)?;
    Ok((pairs, report))
}
