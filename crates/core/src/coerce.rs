use crate::cell::CellValue;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// A cell value that cannot be interpreted as a decimal number.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("value is not processable as a number")]
pub struct UnprocessableValue;

/// Converts raw cell values into exact decimals.
///
/// Text cells are trimmed and stripped of configured currency symbols
/// before parsing. Numeric cells convert losslessly: integers directly,
/// floats through their own decimal rendering, so a cell holding `1.5`
/// becomes the decimal `1.5` rather than a long binary expansion.
#[derive(Debug, Clone, Default)]
pub struct ValueCoercer {
    currency_symbols: Vec<String>,
}

impl ValueCoercer {
    /// Create a coercer that strips the given currency symbols from text.
    ///
    /// Symbols may be multi-character tokens such as `"USD"`. Empty tokens
    /// are ignored.
    #[must_use]
    pub fn new<I, S>(currency_symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            currency_symbols: currency_symbols
                .into_iter()
                .map(Into::into)
                .filter(|symbol| !symbol.is_empty())
                .collect(),
        }
    }

    /// Coerce a raw cell value into an exact decimal.
    ///
    /// # Errors
    ///
    /// Returns `UnprocessableValue` for null cells, booleans, and text that
    /// does not parse as a number after trimming and currency stripping.
    pub fn coerce(&self, value: &CellValue) -> Result<Decimal, UnprocessableValue> {
        let result = match value {
            CellValue::Int(i) => Ok(Decimal::from(*i)),
            CellValue::Float(f) => parse_decimal(&f.to_string()),
            CellValue::String(s) => parse_decimal(self.strip_currency(s)),
            CellValue::Null | CellValue::Bool(_) => Err(UnprocessableValue),
        };
        if result.is_err() {
            tracing::warn!(?value, "failed to process value");
        }
        result
    }

    /// Peel configured currency tokens off both ends until neither end
    /// starts or ends with one. Spaces exposed by stripping are re-trimmed,
    /// so `"$ 1 $"` reduces to `"1"`.
    fn strip_currency<'a>(&self, text: &'a str) -> &'a str {
        let mut rest = text.trim_matches(' ');
        loop {
            let mut changed = false;
            for symbol in &self.currency_symbols {
                if let Some(next) = rest.strip_prefix(symbol.as_str()) {
                    rest = next;
                    changed = true;
                }
                if let Some(next) = rest.strip_suffix(symbol.as_str()) {
                    rest = next;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
            rest = rest.trim_matches(' ');
        }
        rest
    }
}

fn parse_decimal(text: &str) -> Result<Decimal, UnprocessableValue> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| UnprocessableValue)
}
