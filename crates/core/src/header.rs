use crate::cell::CellValue;
use crate::error::{Result, SummaryError};
use crate::source::{RawRow, RowSource};
use std::collections::HashSet;

/// Scan the sheet top to bottom for the first row containing every
/// requested column name.
///
/// String cells are compared after trimming surrounding whitespace; other
/// cell types never match a requested name. The subset test uses set
/// semantics, so duplicates in the row or the request are irrelevant.
/// Returns the trimmed row together with its 1-based position.
///
/// # Errors
///
/// Returns `SummaryError::HeaderNotFound` when the source is exhausted
/// without a match.
pub fn find_header_row(source: &dyn RowSource, column_names: &[String]) -> Result<(RawRow, usize)> {
    tracing::debug!(?column_names, "finding column row");
    let wanted: HashSet<&str> = column_names.iter().map(String::as_str).collect();

    for (index, row) in source.rows(1).enumerate() {
        let trimmed: RawRow = row
            .into_iter()
            .map(|cell| match cell {
                CellValue::String(s) => CellValue::String(s.trim().to_string()),
                other => other,
            })
            .collect();

        let present: HashSet<&str> = trimmed
            .iter()
            .filter_map(|cell| match cell {
                CellValue::String(s) => Some(s.as_str()),
                _ => None,
            })
            .collect();

        if wanted.is_subset(&present) {
            let position = index + 1;
            tracing::debug!(position, "found column row");
            return Ok((trimmed, position));
        }
    }

    tracing::warn!(?column_names, "no column row found");
    Err(SummaryError::HeaderNotFound)
}
