use std::fmt::Display;

use super::format::{self, DateBound, DatePrecision};
use super::{FilterQuery, FilterQueryError, Leaf};

/// A field awaiting its value.
///
/// Each value method returns a new completed leaf and leaves the shell
/// untouched, so the same shell can be completed more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldClause {
    prefix: Option<String>,
    field: String,
    exclude: bool,
}

impl FilterQuery {
    pub fn field(field: impl Into<String>) -> FieldClause {
        FieldClause::new(None, field.into(), false)
    }

    /// A field whose rendering starts with a literal `prefix`, e.g. a local-params block.
    pub fn field_with_prefix(prefix: impl Into<String>, field: impl Into<String>) -> FieldClause {
        FieldClause::new(Some(prefix.into()), field.into(), false)
    }

    pub fn exclude_field(field: impl Into<String>) -> FieldClause {
        FieldClause::new(None, field.into(), true)
    }

    pub fn exclude_field_if(exclude: bool, field: impl Into<String>) -> FieldClause {
        FieldClause::new(None, field.into(), exclude)
    }

    /// Matches documents without any value for `field`.
    pub fn absent_field(field: impl Into<String>) -> FilterQuery {
        Self::exclude_field(field).range(format::OPEN_BOUND, format::OPEN_BOUND)
    }
}

impl FieldClause {
    fn new(prefix: Option<String>, field: String, exclude: bool) -> Self {
        Self {
            prefix,
            field,
            exclude,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn is_true(&self) -> FilterQuery {
        self.complete("true".to_string())
    }

    pub fn is_false(&self) -> FilterQuery {
        self.complete("false".to_string())
    }

    /// Uses `value` verbatim; no escaping is applied.
    pub fn value(&self, value: impl Display) -> FilterQuery {
        self.complete(value.to_string())
    }

    /// Matches any of `values`, duplicates included.
    pub fn values<I, T>(&self, values: I) -> Result<FilterQuery, FilterQueryError>
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        format::join_values(values).map(|value| self.complete(value))
    }

    /// Matches any of `values` after dropping repeated entries.
    pub fn unique_values<S: AsRef<str>>(&self, values: &[S]) -> Result<FilterQuery, FilterQueryError> {
        format::join_unique_values(values).map(|value| self.complete(value))
    }

    /// Numeric range; pass `-1` for an open bound.
    pub fn range(&self, from: i64, to: i64) -> FilterQuery {
        self.complete(format::range_value(from, to))
    }

    pub fn date_range<B: DateBound>(&self, from: B, to: B) -> Result<FilterQuery, FilterQueryError> {
        self.dated(format::date_range_value(from, to, DatePrecision::Day))
    }

    /// The whole calendar day containing `date`.
    pub fn date_range_on<B: DateBound + Copy>(&self, date: B) -> Result<FilterQuery, FilterQueryError> {
        self.date_range(date, date)
    }

    pub fn date_range_over<I, B>(&self, dates: I) -> Result<FilterQuery, FilterQueryError>
    where
        I: IntoIterator<Item = B>,
        B: DateBound,
    {
        self.dated(format::date_range_value_over(dates, DatePrecision::Day))
    }

    pub fn date_time_range<B: DateBound>(&self, from: B, to: B) -> Result<FilterQuery, FilterQueryError> {
        self.dated(format::date_range_value(from, to, DatePrecision::Millisecond))
    }

    pub fn date_time_range_on<B: DateBound + Copy>(
        &self,
        date: B,
    ) -> Result<FilterQuery, FilterQueryError> {
        self.date_time_range(date, date)
    }

    pub fn date_time_range_over<I, B>(&self, dates: I) -> Result<FilterQuery, FilterQueryError>
    where
        I: IntoIterator<Item = B>,
        B: DateBound,
    {
        self.dated(format::date_range_value_over(dates, DatePrecision::Millisecond))
    }

    fn dated(&self, value: Result<String, FilterQueryError>) -> Result<FilterQuery, FilterQueryError> {
        value
            .map(|value| self.complete(value))
            .inspect_err(|e| tracing::debug!(field = %self.field, "invalid date range: {}", e))
    }

    fn complete(&self, value: String) -> FilterQuery {
        FilterQuery::Leaf(Leaf {
            prefix: self.prefix.clone(),
            field: self.field.clone(),
            value,
            exclude: self.exclude,
        })
    }
}
