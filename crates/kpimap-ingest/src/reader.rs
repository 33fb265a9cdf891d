//! CSV file reading with explicit header row configuration.

use std::path::Path;

use csv::ReaderBuilder;

use kpimap_model::Table;

use crate::error::{IngestError, Result};

/// Lowest accepted 1-based header row index.
pub const MIN_HEADER_ROW: usize = 1;
/// Highest accepted 1-based header row index.
pub const MAX_HEADER_ROW: usize = 10;
/// Default number of data rows kept as a preview sample.
pub const DEFAULT_PREVIEW_ROWS: usize = 20;

/// Options controlling how a data file is parsed.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// 1-based index of the header line; earlier rows are skipped.
    pub header_row: usize,
    /// Upper bound on sampled data rows.
    pub preview_rows: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            header_row: MIN_HEADER_ROW,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl IngestOptions {
    pub fn with_header_row(mut self, header_row: usize) -> Self {
        self.header_row = header_row;
        self
    }

    pub fn with_preview_rows(mut self, preview_rows: usize) -> Self {
        self.preview_rows = preview_rows;
        self
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Decode a raw record, tolerating non-UTF-8 byte sequences.
fn decode_record(record: &csv::ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| normalize_cell(&String::from_utf8_lossy(field)))
        .collect()
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|value| value.is_empty())
}

/// Parse a delimited data file into a [`Table`].
///
/// The row at `options.header_row` (1-based) supplies the column names;
/// rows before it are skipped, rows after it are data. Up to
/// `options.preview_rows` non-blank data rows are kept as a sample; the
/// rest of the file is not read.
pub fn read_table(path: &Path, name: &str, options: &IngestOptions) -> Result<Table> {
    if !(MIN_HEADER_ROW..=MAX_HEADER_ROW).contains(&options.header_row) {
        return Err(IngestError::HeaderRowOutOfRange {
            given: options.header_row,
        });
    }

    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes.as_slice());

    let mut headers: Option<Vec<String>> = None;
    let mut sample_rows: Vec<Vec<String>> = Vec::new();
    let mut record_index = 0usize;

    for record in reader.byte_records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        record_index += 1;

        if record_index < options.header_row {
            continue;
        }

        if record_index == options.header_row {
            let row: Vec<String> = record
                .iter()
                .map(|field| normalize_header(&String::from_utf8_lossy(field)))
                .collect();
            if is_blank(&row) {
                return Err(IngestError::NoHeaderDetected {
                    path: path.to_path_buf(),
                    header_row: options.header_row,
                });
            }
            headers = Some(row);
            continue;
        }

        if sample_rows.len() >= options.preview_rows {
            break;
        }
        let columns = headers.as_ref().expect("header parsed before data rows");
        let row = decode_record(&record);
        if is_blank(&row) {
            continue;
        }
        let mut aligned = Vec::with_capacity(columns.len());
        for idx in 0..columns.len() {
            aligned.push(row.get(idx).cloned().unwrap_or_default());
        }
        sample_rows.push(aligned);
    }

    if record_index == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let Some(columns) = headers else {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
            header_row: options.header_row,
        });
    };

    tracing::debug!(
        table = name,
        path = %path.display(),
        columns = columns.len(),
        sampled = sample_rows.len(),
        "loaded data file"
    );

    Ok(Table {
        name: name.to_string(),
        columns,
        sample_rows,
        header_row: options.header_row,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn reads_single_header_file() {
        let file = temp_csv(b"Amount,Date\n10,2024-01-01\n20,2024-01-02\n");
        let table = read_table(file.path(), "Orders", &IngestOptions::default()).unwrap();
        assert_eq!(table.name, "Orders");
        assert_eq!(table.columns, vec!["Amount", "Date"]);
        assert_eq!(table.sample_rows.len(), 2);
        assert_eq!(table.sample_rows[0], vec!["10", "2024-01-01"]);
    }

    #[test]
    fn skips_preamble_rows_before_header() {
        let file = temp_csv(b"Exported by Tool,\nClient: Acme,\nAmount,Date\n10,2024-01-01\n");
        let options = IngestOptions::default().with_header_row(3);
        let table = read_table(file.path(), "Orders", &options).unwrap();
        assert_eq!(table.columns, vec!["Amount", "Date"]);
        assert_eq!(table.sample_rows.len(), 1);
        assert_eq!(table.header_row, 3);
    }

    #[test]
    fn tolerates_non_utf8_bytes() {
        let file = temp_csv(b"Amount,Caf\xe9\n10,x\n");
        let table = read_table(file.path(), "Orders", &IngestOptions::default()).unwrap();
        assert_eq!(table.columns[0], "Amount");
        assert!(table.columns[1].starts_with("Caf"));
    }

    #[test]
    fn bounds_the_preview_sample() {
        let mut content = b"A,B\n".to_vec();
        for i in 0..50 {
            content.extend_from_slice(format!("{i},{i}\n").as_bytes());
        }
        let file = temp_csv(&content);
        let options = IngestOptions::default().with_preview_rows(5);
        let table = read_table(file.path(), "T", &options).unwrap();
        assert_eq!(table.sample_rows.len(), 5);
    }

    #[test]
    fn rejects_out_of_range_header_row() {
        let file = temp_csv(b"A,B\n1,2\n");
        let options = IngestOptions::default().with_header_row(11);
        let err = read_table(file.path(), "T", &options).unwrap_err();
        assert!(matches!(err, IngestError::HeaderRowOutOfRange { given: 11 }));
    }

    #[test]
    fn empty_file_is_an_error() {
        let file = temp_csv(b"");
        let err = read_table(file.path(), "T", &IngestOptions::default()).unwrap_err();
        assert!(matches!(err, IngestError::EmptyCsv { .. }));
    }

    #[test]
    fn header_row_past_end_of_file_is_an_error() {
        let file = temp_csv(b"A,B\n1,2\n");
        let options = IngestOptions::default().with_header_row(9);
        let err = read_table(file.path(), "T", &options).unwrap_err();
        assert!(matches!(err, IngestError::NoHeaderDetected { header_row: 9, .. }));
    }

    #[test]
    fn strips_bom_and_collapses_header_whitespace() {
        let file = temp_csv("\u{feff}  Sales   Amount ,Date\n1,2\n".as_bytes());
        let table = read_table(file.path(), "T", &IngestOptions::default()).unwrap();
        assert_eq!(table.columns, vec!["Sales Amount", "Date"]);
    }

    #[test]
    fn blank_data_rows_are_skipped() {
        let file = temp_csv(b"A,B\n1,2\n,\n3,4\n");
        let table = read_table(file.path(), "T", &IngestOptions::default()).unwrap();
        assert_eq!(table.sample_rows.len(), 2);
        assert_eq!(table.sample_rows[1], vec!["3", "4"]);
    }

    #[test]
    fn missing_file_reports_not_found() {
        let err = read_table(
            Path::new("/nonexistent/orders.csv"),
            "Orders",
            &IngestOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }
}
