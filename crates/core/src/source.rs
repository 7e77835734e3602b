use crate::cell::CellValue;

/// A single worksheet row as a fixed-width sequence of scalar cells.
pub type RawRow = Vec<CellValue>;

/// Lazy access to the rows of a single worksheet.
///
/// `min_row` is 1-based; values of 0 or 1 both start at the first row. A
/// source must support being consumed any number of times with different
/// offsets against the same opened resource, observing the same row order
/// each time. The summary pipeline relies on this to scan once for the
/// header and a second time for the data rows below it.
pub trait RowSource {
    /// Iterate over rows starting at the given 1-based position.
    fn rows(&self, min_row: usize) -> Box<dyn Iterator<Item = RawRow> + '_>;
}

/// In-memory row source, used in tests and as a substitute for file-backed
/// sources wherever rows are already materialized.
#[derive(Debug, Clone, Default)]
pub struct MemoryRowSource {
    rows: Vec<RawRow>,
}

impl MemoryRowSource {
    #[must_use]
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }

    /// Build a source from anything convertible to cell values.
    #[must_use]
    pub fn from_data<T: Into<CellValue>>(data: Vec<Vec<T>>) -> Self {
        Self {
            rows: data
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Number of rows held by the source
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl RowSource for MemoryRowSource {
    fn rows(&self, min_row: usize) -> Box<dyn Iterator<Item = RawRow> + '_> {
        Box::new(self.rows.iter().skip(min_row.saturating_sub(1)).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_from_start() {
        let source = MemoryRowSource::from_data(vec![vec![1, 2], vec![3, 4]]);

        let rows: Vec<RawRow> = source.rows(1).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], CellValue::Int(1));
    }

    #[test]
    fn test_rows_zero_means_start() {
        let source = MemoryRowSource::from_data(vec![vec![1], vec![2]]);

        assert_eq!(source.rows(0).count(), 2);
        assert_eq!(source.rows(1).count(), 2);
    }

    #[test]
    fn test_rows_from_offset() {
        let source = MemoryRowSource::from_data(vec![vec![1], vec![2], vec![3]]);

        let rows: Vec<RawRow> = source.rows(2).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], CellValue::Int(2));
    }

    #[test]
    fn test_rows_past_end() {
        let source = MemoryRowSource::from_data(vec![vec![1]]);

        assert_eq!(source.rows(5).count(), 0);
    }

    #[test]
    fn test_repeated_consumption_same_order() {
        let source = MemoryRowSource::from_data(vec![vec![1], vec![2], vec![3]]);

        let first: Vec<RawRow> = source.rows(1).collect();
        let second: Vec<RawRow> = source.rows(1).collect();
        assert_eq!(first, second);
    }
}
