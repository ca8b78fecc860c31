//! Value-strings embedded into leaf clauses.
//!
//! Everything here runs once, when a leaf is completed. Rendering a tree never
//! formats values again.

use std::collections::HashSet;
use std::fmt::Display;

use chrono::{DateTime, NaiveDateTime, Utc};

use super::{FilterQueryError, JoinOperator};

/// Range bound that renders as the `*` wildcard.
pub const OPEN_BOUND: i64 = -1;
pub const WILDCARD: &str = "*";

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// How far a date range is widened when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePrecision {
    /// Each bound covers its whole calendar day (UTC).
    Day,
    /// Bounds are rendered as exact instants.
    Millisecond,
}

/// Anything that can be resolved to a UTC wall-clock date-time.
///
/// `NaiveDateTime` is taken literally, `DateTime<Utc>` drops its zone and `i64`
/// is read as milliseconds since the Unix epoch.
pub trait DateBound {
    fn into_naive_utc(self) -> Result<NaiveDateTime, FilterQueryError>;
}

impl DateBound for NaiveDateTime {
    fn into_naive_utc(self) -> Result<NaiveDateTime, FilterQueryError> {
        Ok(self)
    }
}

impl DateBound for DateTime<Utc> {
    fn into_naive_utc(self) -> Result<NaiveDateTime, FilterQueryError> {
        Ok(self.naive_utc())
    }
}

impl DateBound for i64 {
    fn into_naive_utc(self) -> Result<NaiveDateTime, FilterQueryError> {
        naive_utc_from_millis(self)
    }
}

pub fn naive_utc_from_millis(millis: i64) -> Result<NaiveDateTime, FilterQueryError> {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.naive_utc())
        .ok_or(FilterQueryError::TimestampOutOfRange(millis))
}

/// Renders `[from TO to]`, where [`OPEN_BOUND`] on either side becomes `*`.
pub fn range_value(from: i64, to: i64) -> String {
    format!("[{} TO {}]", range_item(from), range_item(to))
}

fn range_item(value: i64) -> String {
    if value == OPEN_BOUND {
        WILDCARD.to_string()
    } else {
        value.to_string()
    }
}

/// Joins values with ` OR `, keeping duplicates.
///
/// A single value is returned bare, several are grouped in parentheses.
pub fn join_values<I, T>(values: I) -> Result<String, FilterQueryError>
where
    I: IntoIterator<Item = T>,
    T: Display,
{
    let values: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
    join_or(values)
}

/// Like [`join_values`], but drops exact duplicates, keeping the first one seen.
pub fn join_unique_values<S: AsRef<str>>(values: &[S]) -> Result<String, FilterQueryError> {
    let mut seen = HashSet::with_capacity(values.len());
    let mut unique = Vec::with_capacity(values.len());

    for value in values {
        let value: &str = value.as_ref();
        if seen.insert(value) {
            unique.push(value.to_string());
        }
    }

    join_or(unique)
}

fn join_or(mut values: Vec<String>) -> Result<String, FilterQueryError> {
    match values.len() {
        0 => {
            tracing::debug!("refusing to join an empty value set");
            Err(FilterQueryError::EmptyValues)
        }
        1 => Ok(values.remove(0)),
        _ => Ok(format!("({})", values.join(JoinOperator::Or.as_str()))),
    }
}

/// Renders a date range between two bounds, failing if `from` is after `to`.
///
/// ```
/// use solr_query::filter_query::format::{date_range_value, DatePrecision};
///
/// let day = date_range_value(123_i64, 456_i64, DatePrecision::Day).unwrap();
/// assert_eq!(day, "[1970-01-01T00:00:00.000Z TO 1970-01-01T23:59:59.999Z]");
///
/// let exact = date_range_value(123_i64, 456_i64, DatePrecision::Millisecond).unwrap();
/// assert_eq!(exact, "[1970-01-01T00:00:00.123Z TO 1970-01-01T00:00:00.456Z]");
/// ```
pub fn date_range_value<B: DateBound>(
    from: B,
    to: B,
    precision: DatePrecision,
) -> Result<String, FilterQueryError> {
    let from = from.into_naive_utc()?;
    let to = to.into_naive_utc()?;

    if from > to {
        tracing::debug!(%from, %to, "rejecting inverted date range");
        return Err(FilterQueryError::InvertedRange { from, to });
    }

    Ok(format_date_range(&from, &to, precision))
}

/// Renders the range spanning the earliest and latest of `dates`.
///
/// Order and duplicates do not matter.
pub fn date_range_value_over<I, B>(
    dates: I,
    precision: DatePrecision,
) -> Result<String, FilterQueryError>
where
    I: IntoIterator<Item = B>,
    B: DateBound,
{
    let mut bounds: Option<(NaiveDateTime, NaiveDateTime)> = None;

    for date in dates {
        let date = date.into_naive_utc()?;
        bounds = Some(match bounds {
            Some((min, max)) => (min.min(date), max.max(date)),
            None => (date, date),
        });
    }

    let (min, max) = bounds.ok_or_else(|| {
        tracing::debug!("refusing to build a date range from no dates");
        FilterQueryError::EmptyDates
    })?;

    Ok(format_date_range(&min, &max, precision))
}

fn format_date_range(from: &NaiveDateTime, to: &NaiveDateTime, precision: DatePrecision) -> String {
    match precision {
        DatePrecision::Day => format!(
            "[{}T00:00:00.000Z TO {}T23:59:59.999Z]",
            from.format(DATE_FORMAT),
            to.format(DATE_FORMAT)
        ),
        DatePrecision::Millisecond => format!(
            "[{} TO {}]",
            from.format(DATE_TIME_FORMAT),
            to.format(DATE_TIME_FORMAT)
        ),
    }
}
