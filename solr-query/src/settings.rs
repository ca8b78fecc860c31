use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use serde_with::serde_as;
use strum::{Display, EnumString};

use crate::solr_url::{Protocol, SolrUrl};

const DEFAULT_CONNECTION_TIMEOUT_MS: u64 = 1000;
const DEFAULT_SOCKET_TIMEOUT_MS: u64 = 30000;

/// Connection settings handed to the search client that executes the queries.
#[serde_as]
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct SolrSettings {
    #[serde(default = "default_protocol")]
    pub protocol: Protocol,
    pub host: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    /// Core or collection path, e.g. `solr/products`.
    pub core: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    #[serde(default = "default_connection_timeout_ms")]
    pub connection_timeout_ms: u64,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    #[serde(default = "default_socket_timeout_ms")]
    pub socket_timeout_ms: u64,
    #[serde(default = "default_soft_commit")]
    pub soft_commit: bool,
}

fn default_protocol() -> Protocol {
    Protocol::Http
}

fn default_connection_timeout_ms() -> u64 {
    DEFAULT_CONNECTION_TIMEOUT_MS
}

fn default_socket_timeout_ms() -> u64 {
    DEFAULT_SOCKET_TIMEOUT_MS
}

fn default_soft_commit() -> bool {
    true
}

impl SolrSettings {
    pub fn url(&self) -> SolrUrl {
        SolrUrl::builder()
            .protocol(self.protocol)
            .host(&self.host)
            .port(self.port)
            .path(&self.core)
            .build()
    }

    pub fn connection_timeout(&self) -> Duration {
        Duration::from_millis(self.connection_timeout_ms)
    }

    pub fn socket_timeout(&self) -> Duration {
        Duration::from_millis(self.socket_timeout_ms)
    }
}

/// Reads `config/base.yaml`, then `config/<APP_ENVIRONMENT>.yaml`, then `SOLR_*`
/// environment variables, later sources winning.
pub fn read_settings() -> Result<SolrSettings, config::ConfigError> {
    dotenvy::dotenv().ok();

    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;

    let environment = Environment::from_str(
        std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .as_str(),
    )
    .map_err(|e| config::ConfigError::Message(format!("Failed to parse APP_ENVIRONMENT: {}", e)))?;

    read_settings_from(&base_path.join("config"), environment)
}

#[tracing::instrument(skip(config_directory), fields(dir = %config_directory.display()))]
pub fn read_settings_from(
    config_directory: &Path,
    environment: Environment,
) -> Result<SolrSettings, config::ConfigError> {
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(config_directory.join(environment_filename)).required(false))
        .add_source(
            config::Environment::with_prefix("SOLR")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize::<SolrSettings>()?;

    tracing::debug!(url = %settings.url(), "loaded solr settings");

    Ok(settings)
}

#[derive(Display, Debug, Clone, Copy, PartialEq, EnumString)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn config_dir(base: &str, local: Option<&str>) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("base.yaml"), base).unwrap();
        if let Some(local) = local {
            fs::write(dir.path().join("local.yaml"), local).unwrap();
        }
        dir
    }

    #[test]
    fn defaults_fill_optional_settings() {
        let dir = config_dir("host: localhost\nport: 8983\ncore: solr/products\n", None);

        let settings = read_settings_from(dir.path(), Environment::Local).unwrap();

        assert_eq!(settings.protocol, Protocol::Http);
        assert_eq!(settings.connection_timeout(), Duration::from_millis(1000));
        assert_eq!(settings.socket_timeout(), Duration::from_secs(30));
        assert!(settings.soft_commit);
        assert_eq!(settings.url().as_ref(), "http://localhost:8983/solr/products");
    }

    #[test]
    fn environment_file_overrides_base() {
        let dir = config_dir(
            "host: localhost\nport: 8983\ncore: products\n",
            Some("protocol: https\nhost: search.internal\nsocket_timeout_ms: 5000\nsoft_commit: false\n"),
        );

        let settings = read_settings_from(dir.path(), Environment::Local).unwrap();

        assert_eq!(settings.url().as_ref(), "https://search.internal:8983/products");
        assert_eq!(settings.socket_timeout_ms, 5000);
        assert!(!settings.soft_commit);
    }

    #[test]
    fn missing_base_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_settings_from(dir.path(), Environment::Production).is_err());
    }

    #[test]
    fn environment_parses_case_insensitively() {
        assert_eq!(Environment::from_str("Production"), Ok(Environment::Production));
        assert_eq!(Environment::Local.to_string(), "local");
        assert!(Environment::from_str("staging").is_err());
    }
}
