use thiserror::Error;

/// Errors that abort a whole summary request.
///
/// Per-row and per-value failures are deliberately not represented here:
/// they are absorbed as row skips inside the pipeline and never reach the
/// caller. The error messages are part of the API surface and are returned
/// verbatim to HTTP clients.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The workbook could not be opened or decoded.
    #[error("Cannot read file")]
    Unreadable(#[from] std::io::Error),

    /// No row in the sheet contains all requested column names.
    #[error("Column row cannot be found")]
    HeaderNotFound,
}

pub type Result<T> = std::result::Result<T, SummaryError>;
