use crate::cell::CellValue;
use crate::error::{Result, SummaryError};
use crate::source::{RawRow, RowSource};
use calamine::{open_workbook, Data, Reader, Xlsx, XlsxError};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::DateTime(dt) => {
            // Excel stores dates as day serials since 1899-12-30
            CellValue::Float(dt.as_f64())
        }
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#ERROR: {e:?}")),
    }
}

fn unreadable(e: XlsxError) -> SummaryError {
    SummaryError::Unreadable(std::io::Error::new(
        std::io::ErrorKind::Other,
        e.to_string(),
    ))
}

/// Row source backed by the first worksheet of an `.xlsx` workbook.
///
/// The worksheet is decoded into memory when the source is opened, so the
/// underlying file handle is released before `open` returns and repeated
/// `rows` calls observe the same row order.
#[derive(Debug, Clone)]
pub struct XlsxRowSource {
    rows: Vec<RawRow>,
}

impl XlsxRowSource {
    /// Open a workbook and decode its first worksheet.
    ///
    /// A workbook without any sheets yields an empty source rather than an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::Unreadable` if the file cannot be opened or
    /// decoded.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut workbook: Xlsx<BufReader<File>> =
            open_workbook(path.as_ref()).map_err(unreadable)?;

        let rows = match workbook.sheet_names().first().cloned() {
            Some(sheet_name) => {
                let range = workbook.worksheet_range(&sheet_name).map_err(unreadable)?;
                range
                    .rows()
                    .map(|row| row.iter().map(data_to_cell_value).collect())
                    .collect()
            }
            None => Vec::new(),
        };

        Ok(Self { rows })
    }

    /// Number of rows decoded from the worksheet
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl RowSource for XlsxRowSource {
    fn rows(&self, min_row: usize) -> Box<dyn Iterator<Item = RawRow> + '_> {
        Box::new(self.rows.iter().skip(min_row.saturating_sub(1)).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_open_and_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.xlsx");

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "amount").unwrap();
        worksheet.write_number(1, 0, 12.5).unwrap();
        workbook.save(&path).unwrap();

        let source = XlsxRowSource::open(&path).unwrap();
        assert_eq!(source.row_count(), 2);

        let rows: Vec<RawRow> = source.rows(1).collect();
        assert_eq!(rows[0][0], CellValue::String("amount".to_string()));
        assert_eq!(rows[1][0], CellValue::Float(12.5));
    }

    #[test]
    fn test_open_missing_file() {
        let err = XlsxRowSource::open("does-not-exist.xlsx").unwrap_err();
        assert!(matches!(err, SummaryError::Unreadable(_)));
    }

    #[test]
    fn test_open_garbage_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.xlsx");
        let mut file = File::create(&path).unwrap();
        file.write_all(b"this is not a zip archive").unwrap();

        let err = XlsxRowSource::open(&path).unwrap_err();
        assert!(matches!(err, SummaryError::Unreadable(_)));
        assert_eq!(err.to_string(), "Cannot read file");
    }

    #[test]
    fn test_rows_from_offset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("offset.xlsx");

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        for row in 0..3u32 {
            worksheet.write_number(row, 0, f64::from(row)).unwrap();
        }
        workbook.save(&path).unwrap();

        let source = XlsxRowSource::open(&path).unwrap();
        let rows: Vec<RawRow> = source.rows(3).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], CellValue::Float(2.0));
    }
}
