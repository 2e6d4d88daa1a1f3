use chrono::NaiveDate;

use crate::parser::ParseError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid ISO duration: {0}")]
    Parse(#[from] ParseError),

    #[error("invalid ISO date: {0:?}")]
    InvalidIsoDate(String),

    #[error("invalid ISO date range: {0:?}")]
    InvalidIsoDateRange(String),

    /// Range-splitting operations require `from <= to`.
    #[error("date range starts after it ends: {from} > {to}")]
    InvertedRange { from: NaiveDate, to: NaiveDate },
}
