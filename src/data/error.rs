use thiserror::Error;

/// Schema and validation failures while reading launch records.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("invalid class value '{0}' (expected 0 or 1)")]
    InvalidClass(String),

    #[error("invalid payload mass {0} (expected a finite, non-negative number)")]
    InvalidPayload(f64),

    #[error("invalid flight number {0} (expected a whole number that fits u32)")]
    InvalidFlightNumber(String),

    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedColumnType { column: String, data_type: String },

    #[error("null value in required column '{0}'")]
    NullValue(String),
}
