//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `ADMATCH_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;

use uuid::Uuid;

use crate::ident::DEFAULT_AD_ID_NAMESPACE;
use crate::vectordb::{DEFAULT_COLLECTION_NAME, DEFAULT_VECTOR_SIZE};

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `ADMATCH_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Qdrant endpoint URL. Default: `http://localhost:6334`.
    pub qdrant_url: String,

    /// Qdrant collection holding the ad inventory. Default: `ads`.
    pub collection_name: String,

    /// Width of the embedding vectors. Default: `384`.
    pub embedding_dimension: u64,

    /// Embedding service base URL. Unset selects the stub embedder.
    pub embedder_url: Option<String>,

    /// Max ads per store write during ingestion. Default: `100`.
    pub max_batch_size: usize,

    /// UUIDv5 namespace for deriving point ids from ad ids.
    pub ad_id_namespace: Uuid,
}

/// Default Qdrant URL used when `ADMATCH_QDRANT_URL` is not set.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

/// Default ingest batch size used when `ADMATCH_MAX_BATCH_SIZE` is not set.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 100;

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            collection_name: DEFAULT_COLLECTION_NAME.to_string(),
            embedding_dimension: DEFAULT_VECTOR_SIZE,
            embedder_url: None,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            ad_id_namespace: DEFAULT_AD_ID_NAMESPACE,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "ADMATCH_PORT";
    const ENV_BIND_ADDR: &'static str = "ADMATCH_BIND_ADDR";
    const ENV_QDRANT_URL: &'static str = "ADMATCH_QDRANT_URL";
    const ENV_COLLECTION_NAME: &'static str = "ADMATCH_COLLECTION_NAME";
    const ENV_EMBEDDING_DIMENSION: &'static str = "ADMATCH_EMBEDDING_DIMENSION";
    const ENV_EMBEDDER_URL: &'static str = "ADMATCH_EMBEDDER_URL";
    const ENV_MAX_BATCH_SIZE: &'static str = "ADMATCH_MAX_BATCH_SIZE";
    const ENV_AD_ID_NAMESPACE: &'static str = "ADMATCH_AD_ID_NAMESPACE";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let qdrant_url = Self::parse_string_from_env(Self::ENV_QDRANT_URL, defaults.qdrant_url);
        let collection_name =
            Self::parse_string_from_env(Self::ENV_COLLECTION_NAME, defaults.collection_name);
        let embedding_dimension = Self::parse_u64_from_env(
            Self::ENV_EMBEDDING_DIMENSION,
            defaults.embedding_dimension,
        )?;
        let embedder_url = Self::parse_optional_string_from_env(Self::ENV_EMBEDDER_URL);
        let max_batch_size =
            Self::parse_u64_from_env(Self::ENV_MAX_BATCH_SIZE, defaults.max_batch_size as u64)?
                as usize;
        let ad_id_namespace = Self::parse_namespace_from_env(defaults.ad_id_namespace)?;

        Ok(Self {
            port,
            bind_addr,
            qdrant_url,
            collection_name,
            embedding_dimension,
            embedder_url,
            max_batch_size,
            ad_id_namespace,
        })
    }

    /// Validates basic invariants (does not reach out to any service).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.embedding_dimension == 0 {
            return Err(ConfigError::InvalidDimension);
        }

        if self.max_batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize);
        }

        if self.collection_name.trim().is_empty() {
            return Err(ConfigError::EmptyCollectionName);
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_u64_from_env(var_name: &'static str, default: u64) -> Result<u64, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|e| ConfigError::NumberParseError {
                name: var_name,
                value,
                source: e,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_namespace_from_env(default: Uuid) -> Result<Uuid, ConfigError> {
        match env::var(Self::ENV_AD_ID_NAMESPACE) {
            Ok(value) => Uuid::parse_str(&value)
                .map_err(|e| ConfigError::InvalidNamespace { value, source: e }),
            Err(_) => Ok(default),
        }
    }
}
