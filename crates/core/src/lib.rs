//! Column summary pipeline for spreadsheet files
//!
//! Locates the header row containing a requested set of column names
//! anywhere in a worksheet, then streams the rows below it computing an
//! exact-decimal sum and average per column. Malformed rows are tolerated:
//! a row that is too short, or that holds a value no amount of currency
//! stripping turns into a number, is skipped as a whole and the pass
//! continues.
//!
//! # Examples
//!
//! ## Summarizing in-memory rows
//!
//! ```
//! use sheetsum_core::{MemoryRowSource, SummaryGenerator};
//!
//! let source = MemoryRowSource::from_data(vec![
//!     vec!["a", "b", "c"],
//!     vec!["1", "2", "3"],
//!     vec!["1", "2", "3"],
//! ]);
//!
//! let summary = SummaryGenerator::default()
//!     .generate(&source, &["a".to_string(), "b".to_string()])
//!     .unwrap();
//!
//! assert_eq!(summary[0].sum, "2");
//! assert_eq!(summary[1].avg, "2");
//! ```
//!
//! ## Stripping currency symbols
//!
//! ```
//! use sheetsum_core::{MemoryRowSource, SummaryGenerator, ValueCoercer};
//!
//! let source = MemoryRowSource::from_data(vec![
//!     vec!["price"],
//!     vec!["$10"],
//!     vec!["20$"],
//! ]);
//!
//! let generator = SummaryGenerator::new(ValueCoercer::new(["$"]));
//! let summary = generator.generate(&source, &["price".to_string()]).unwrap();
//!
//! assert_eq!(summary[0].sum, "30");
//! assert_eq!(summary[0].avg, "15");
//! ```
//!
//! ## Loading from a workbook
//!
//! ```no_run
//! use sheetsum_core::{SummaryGenerator, XlsxRowSource};
//!
//! let source = XlsxRowSource::open("report.xlsx").unwrap();
//! let summary = SummaryGenerator::default()
//!     .generate(&source, &["amount".to_string()])
//!     .unwrap();
//! ```
//!
//! # Failure model
//!
//! Only two failures leave the pipeline: [`SummaryError::Unreadable`] when
//! a file-backed source cannot be opened or decoded, and
//! [`SummaryError::HeaderNotFound`] when no row contains all requested
//! names. Everything else is absorbed as a row skip.

mod aggregate;
mod cell;
mod coerce;
mod csv;
mod error;
mod extract;
mod header;
mod source;
mod summary;
mod xlsx;

/// Re-export row aggregation types.
pub use aggregate::{aggregate_row, CoercedRow, RowUnprocessable};
/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export value coercion types.
pub use coerce::{UnprocessableValue, ValueCoercer};
/// Re-export CSV row source.
pub use csv::CsvRowSource;
/// Re-export request-fatal error types.
pub use error::{Result, SummaryError};
/// Re-export row extraction types.
pub use extract::{extract_row, ColumnIndexMap, ExtractedRow, RowTooShort};
/// Re-export header discovery.
pub use header::find_header_row;
/// Re-export row source types.
pub use source::{MemoryRowSource, RawRow, RowSource};
/// Re-export summary generation types.
pub use summary::{SummaryGenerator, SummaryRow};
/// Re-export XLSX row source.
pub use xlsx::XlsxRowSource;
