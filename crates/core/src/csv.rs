use crate::cell::CellValue;
use crate::error::{Result, SummaryError};
use crate::source::{RawRow, RowSource};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Row source backed by a delimited text file.
///
/// Cells are type-inferred the same way the workbook decoder types them, so
/// `"12"` arrives at the pipeline as an integer cell and `""` as a null
/// cell. Ragged rows are preserved as-is; the extractor decides whether a
/// short row is usable.
#[derive(Debug, Clone)]
pub struct CsvRowSource {
    rows: Vec<RawRow>,
}

impl CsvRowSource {
    /// Open a comma-delimited file.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::Unreadable` if the file cannot be opened or
    /// parsed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_delimiter(path, b',')
    }

    /// Open a delimited file with a custom delimiter, e.g. `b'\t'` for TSV.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::Unreadable` if the file cannot be opened or
    /// parsed.
    pub fn open_with_delimiter<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file), delimiter)
    }

    /// Read rows from any reader.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::Unreadable` on malformed input.
    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record = result.map_err(|e| {
                SummaryError::Unreadable(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    e.to_string(),
                ))
            })?;
            rows.push(record.iter().map(CellValue::parse).collect());
        }

        Ok(Self { rows })
    }

    /// Number of rows read from the file
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl RowSource for CsvRowSource {
    fn rows(&self, min_row: usize) -> Box<dyn Iterator<Item = RawRow> + '_> {
        Box::new(self.rows.iter().skip(min_row.saturating_sub(1)).cloned())
    }
}
