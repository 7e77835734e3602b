use crate::aggregate::{aggregate_row, RowUnprocessable};
use crate::cell::CellValue;
use crate::coerce::ValueCoercer;
use crate::error::Result;
use crate::extract::{extract_row, ColumnIndexMap, RowTooShort};
use crate::header::find_header_row;
use crate::source::RowSource;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Rendered result for one requested column.
///
/// `sum` and `avg` are exact-decimal text, or the literal `"N/A"` when no
/// row was aggregable for the column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub column: String,
    pub sum: String,
    pub avg: String,
}

/// Running total and count for one requested column.
#[derive(Debug, Clone)]
struct ColumnTotal {
    name: String,
    total: Decimal,
    count: u64,
}

impl ColumnTotal {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            total: Decimal::ZERO,
            count: 0,
        }
    }

    fn add(&mut self, value: Decimal) {
        self.total += value;
        self.count += 1;
    }

    fn render(&self) -> SummaryRow {
        if self.count == 0 {
            SummaryRow {
                column: self.name.clone(),
                sum: "N/A".to_string(),
                avg: "N/A".to_string(),
            }
        } else {
            // Exact decimal division: up to 28 fractional digits, rounding
            // to nearest-even at the precision limit
            let avg = self.total / Decimal::from(self.count);
            SummaryRow {
                column: self.name.clone(),
                sum: self.total.to_string(),
                avg: avg.to_string(),
            }
        }
    }
}

/// Wires header discovery, row extraction and value coercion into a single
/// streaming pass over a worksheet.
#[derive(Debug, Clone, Default)]
pub struct SummaryGenerator {
    coercer: ValueCoercer,
}

impl SummaryGenerator {
    /// Create a generator using the given value coercer.
    #[must_use]
    pub fn new(coercer: ValueCoercer) -> Self {
        Self { coercer }
    }

    /// Summarize the requested columns of a worksheet.
    ///
    /// Returns one [`SummaryRow`] per requested name, in request order.
    /// Rows that are too short or contain an unprocessable value are
    /// skipped without touching any accumulator; only a missing header row
    /// aborts the request.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::HeaderNotFound` if no row contains all the
    /// requested column names.
    pub fn generate(
        &self,
        source: &dyn RowSource,
        column_names: &[String],
    ) -> Result<Vec<SummaryRow>> {
        tracing::debug!(?column_names, "generating summary");
        let (header_row, header_position) = find_header_row(source, column_names)?;

        let index_map = build_index_map(&header_row, column_names);

        let mut totals: IndexMap<String, ColumnTotal> = column_names
            .iter()
            .map(|name| (name.clone(), ColumnTotal::new(name)))
            .collect();

        for row in source.rows(header_position + 1) {
            let extracted = match extract_row(&row, &index_map) {
                Ok(extracted) => extracted,
                Err(RowTooShort) => continue,
            };
            let coerced = match aggregate_row(&extracted, &self.coercer) {
                Ok(coerced) => coerced,
                Err(RowUnprocessable) => continue,
            };
            for (name, value) in coerced {
                if let Some(total) = totals.get_mut(&name) {
                    total.add(value);
                }
            }
        }

        tracing::debug!("finished generating summary");
        Ok(totals.values().map(ColumnTotal::render).collect())
    }
}

/// Map each requested name to its position in the header row. A name that
/// appears more than once keeps the last occurrence's index.
fn build_index_map(header_row: &[CellValue], column_names: &[String]) -> ColumnIndexMap {
    let mut index_map = ColumnIndexMap::new();
    for (index, cell) in header_row.iter().enumerate() {
        if let CellValue::String(name) = cell {
            if column_names.iter().any(|wanted| wanted == name) {
                index_map.insert(name.clone(), index);
            }
        }
    }
    index_map
}
