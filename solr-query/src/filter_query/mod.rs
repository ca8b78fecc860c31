//! Filter-query (`fq`) expressions.
//!
//! A [`FilterQuery`] is an immutable tree built bottom-up: leaves are completed
//! from a [`FieldClause`] shell, then joined with [`and`]/[`or`]. Rendering
//! walks the tree once and never fails.
//!
//! ```
//! use solr_query::filter_query::{and, or, FilterQuery};
//!
//! let fq = or([
//!     and([
//!         FilterQuery::field("status").unique_values(&["active", "pending"]).unwrap(),
//!         FilterQuery::exclude_field("country").value("US"),
//!     ]),
//!     FilterQuery::field("pinned").is_true(),
//! ]);
//!
//! assert_eq!(
//!     fq.build(),
//!     "(status:(active OR pending) AND (*:* -country:US)) OR pinned:true"
//! );
//! ```

mod error;
mod field;
pub mod format;
mod join;

use std::fmt::{self, Write};

pub use error::FilterQueryError;
pub use field::FieldClause;
pub use join::{and, or, JoinOperator};

/// Query matching every document; the left operand of an excluded clause.
pub const MATCH_ALL: &str = "*:*";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FilterQuery {
    /// Placeholder skipped by every join it ends up in.
    #[default]
    Empty,
    Leaf(Leaf),
    Composite(Composite),
}

/// A completed `field:value` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    prefix: Option<String>,
    field: String,
    value: String,
    exclude: bool,
}

impl Leaf {
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_excluded(&self) -> bool {
        self.exclude
    }

    fn write(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            f.write_str(prefix)?;
        }
        if self.exclude {
            write!(f, "({MATCH_ALL} -")?;
        }
        write!(f, "{}:{}", self.field, self.value)?;
        if self.exclude {
            f.write_char(')')?;
        }
        Ok(())
    }
}

/// Two or more clauses joined by one operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composite {
    operator: JoinOperator,
    clauses: Vec<FilterQuery>,
    parenthesize: bool,
}

impl Composite {
    pub fn operator(&self) -> JoinOperator {
        self.operator
    }

    pub fn clauses(&self) -> &[FilterQuery] {
        &self.clauses
    }

    /// Whether the join is wrapped in parentheses when nested in another one.
    pub fn is_parenthesized(&self) -> bool {
        self.parenthesize
    }

    fn write(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.parenthesize {
            f.write_char('(')?;
            self.write_clauses(f)?;
            f.write_char(')')
        } else {
            self.write_clauses(f)
        }
    }

    fn write_clauses(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for clause in self.clauses.iter().filter(|c| !c.is_empty()) {
            if !first {
                f.write_str(self.operator.as_str())?;
            }
            first = false;
            clause.write(f)?;
        }
        Ok(())
    }
}

impl FilterQuery {
    pub fn empty() -> Self {
        Self::Empty
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Renders the expression as an `fq` parameter value.
    ///
    /// The outermost join is never parenthesized. An [`FilterQuery::Empty`]
    /// renders as an empty string.
    pub fn build(&self) -> String {
        let rendered = self.to_string();
        tracing::trace!(fq = %rendered, "built filter query");
        rendered
    }

    fn write(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Leaf(leaf) => leaf.write(f),
            Self::Composite(composite) => composite.write(f),
        }
    }
}

impl fmt::Display for FilterQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Composite(composite) => composite.write_clauses(f),
            other => other.write(f),
        }
    }
}
