use crate::cell::CellValue;
use crate::source::RawRow;
use indexmap::IndexMap;
use thiserror::Error;

/// Positions of the requested columns within the header row, keyed by
/// column name. Built once per request; insertion order follows the header
/// scan, but consumers treat it as a value mapping.
pub type ColumnIndexMap = IndexMap<String, usize>;

/// A data row projected down to the requested columns.
pub type ExtractedRow = IndexMap<String, CellValue>;

/// The row has fewer cells than the highest mapped column index.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("row has fewer cells than the mapped column indexes")]
pub struct RowTooShort;

/// Project a raw row into a name-to-value mapping.
///
/// Fails without a partial result if any mapped index is out of bounds for
/// the row.
///
/// # Errors
///
/// Returns `RowTooShort` when the row cannot satisfy every mapped index.
pub fn extract_row(row: &RawRow, index_map: &ColumnIndexMap) -> Result<ExtractedRow, RowTooShort> {
    let extracted: Result<ExtractedRow, RowTooShort> = index_map
        .iter()
        .map(|(name, &index)| {
            row.get(index)
                .map(|value| (name.clone(), value.clone()))
                .ok_or(RowTooShort)
        })
        .collect();
    if extracted.is_err() {
        tracing::warn!(?row, ?index_map, "unconvertible row");
    }
    extracted
}
