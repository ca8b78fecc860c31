use std::{env, fmt};

use serde::Deserialize;
use strum::{Display, EnumString};
use thiserror::Error;

use crate::filter_query::FilterQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[strum(ascii_case_insensitive, serialize = "ws")]
    Ws,
    #[strum(ascii_case_insensitive, serialize = "http")]
    Http,
    #[strum(ascii_case_insensitive, serialize = "https")]
    Https,
}

impl Protocol {
    const ALL: [Protocol; 3] = [Protocol::Ws, Protocol::Http, Protocol::Https];

    pub fn scheme(&self) -> &'static str {
        match self {
            Protocol::Ws => "ws://",
            Protocol::Http => "http://",
            Protocol::Https => "https://",
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum SolrUrlError {
    #[error("{0} must be set in env")]
    MissingEnvVar(String),
}

/// URL of a Solr collection (or any path below it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolrUrl(String);

impl AsRef<str> for SolrUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SolrUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl SolrUrl {
    pub fn builder() -> SolrUrlBuilder {
        SolrUrlBuilder::default()
    }

    /// Creates a new SolrUrl from the environment variable `SOLR_URL`.
    pub fn from_env() -> Result<Self, SolrUrlError> {
        dotenvy::dotenv().ok();
        Self::from_var("SOLR_URL")
    }

    fn from_var(key: &str) -> Result<Self, SolrUrlError> {
        env::var(key)
            .map(Self)
            .map_err(|_| SolrUrlError::MissingEnvVar(key.to_string()))
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }

    /// Adds the rendered filter query as a percent-encoded `fq` parameter.
    pub fn with_filter_query(&self, filter_query: &FilterQuery) -> Self {
        let fq = filter_query.build();
        let separator = if self.0.contains('?') { '&' } else { '?' };
        Self(format!("{}{}fq={}", self.0, separator, urlencoding::encode(&fq)))
    }
}

/// Assembles a URL piece by piece, in call order.
#[derive(Debug, Clone, Default)]
pub struct SolrUrlBuilder {
    parts: Vec<String>,
}

impl SolrUrlBuilder {
    pub fn protocol(mut self, protocol: Protocol) -> Self {
        self.parts.push(protocol.scheme().to_string());
        self
    }

    pub fn http(self) -> Self {
        self.protocol(Protocol::Http)
    }

    pub fn https(self) -> Self {
        self.protocol(Protocol::Https)
    }

    pub fn ws(self) -> Self {
        self.protocol(Protocol::Ws)
    }

    pub fn host(mut self, host: &str) -> Self {
        self.parts.push(host.to_string());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.parts.push(format!(":{}", port));
        self
    }

    /// Adds `host[:port]`, dropping any scheme already present on it.
    pub fn base_url(mut self, base_url: &str) -> Self {
        let mut base_url = base_url;
        for protocol in Protocol::ALL {
            if let Some(stripped) = base_url.strip_prefix(protocol.scheme()) {
                base_url = stripped;
            }
        }

        self.parts.push(base_url.to_string());
        self
    }

    pub fn path(mut self, path: &str) -> Self {
        if !path.starts_with('/') {
            self.parts.push("/".to_string());
        }
        self.parts.push(path.to_string());
        self
    }

    pub fn build(self) -> SolrUrl {
        SolrUrl(self.parts.concat())
    }
}
