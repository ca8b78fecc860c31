//! Filter-query building blocks for a Solr client.
//!
//! The [`filter_query`] module builds `fq` expressions. [`SolrUrl`],
//! [`SolrSettings`] and [`domain::InputDoc`] cover the pieces handed to the
//! search client that actually talks to Solr.

pub mod domain;
pub mod filter_query;
mod settings;
mod solr_url;

pub use filter_query::{and, or, FieldClause, FilterQuery, FilterQueryError};
pub use settings::*;
pub use solr_url::*;
