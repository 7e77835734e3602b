use crate::coerce::ValueCoercer;
use crate::extract::ExtractedRow;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use thiserror::Error;

/// A data row with every requested value coerced to a decimal.
pub type CoercedRow = IndexMap<String, Decimal>;

/// At least one value in the row failed coercion.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("row contains an unprocessable value")]
pub struct RowUnprocessable;

/// Coerce every extracted value in a row.
///
/// All-or-nothing: one failed coercion discards the whole row, so the
/// per-column counts stay mutually consistent within a single data row.
///
/// # Errors
///
/// Returns `RowUnprocessable` if any value in the row fails coercion.
pub fn aggregate_row(
    row: &ExtractedRow,
    coercer: &ValueCoercer,
) -> Result<CoercedRow, RowUnprocessable> {
    let coerced: Result<CoercedRow, RowUnprocessable> = row
        .iter()
        .map(|(name, value)| {
            coercer
                .coerce(value)
                .map(|decimal| (name.clone(), decimal))
                .map_err(|_| RowUnprocessable)
        })
        .collect();
    if coerced.is_err() {
        tracing::warn!(?row, "failed to process row");
    }
    coerced
}
