use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterQueryError {
    #[error("Values can not be empty")]
    EmptyValues,
    #[error("Dates can not be empty")]
    EmptyDates,
    #[error("End date must not be before start date: {from} > {to}")]
    InvertedRange {
        from: NaiveDateTime,
        to: NaiveDateTime,
    },
    #[error("Epoch milliseconds out of range: {0}")]
    TimestampOutOfRange(i64),
}
