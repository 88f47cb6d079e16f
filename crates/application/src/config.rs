//! Suite configuration.
//!
//! One [`SuiteConfig`] is built before any scenario runs and then only read.
//! It comes from a YAML file, environment overrides, or both.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Default base URL of the user-management service.
pub const DEFAULT_USER_SERVICE_URL: &str = "http://85.192.34.140:8080";
/// Default base URL of the fake store.
pub const DEFAULT_FAKE_STORE_URL: &str = "https://fakestoreapi.com";
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Environment variable naming a YAML configuration file.
pub const ENV_CONFIG: &str = "APICHECK_CONFIG";
/// Overrides the user service base URL.
pub const ENV_USER_SERVICE_URL: &str = "APICHECK_USER_SERVICE_URL";
/// Overrides the fake store base URL.
pub const ENV_FAKE_STORE_URL: &str = "APICHECK_FAKE_STORE_URL";
/// Overrides the timeout of both services.
pub const ENV_TIMEOUT_MS: &str = "APICHECK_TIMEOUT_MS";
/// `true`, `false`, `requests` or `responses`.
pub const ENV_LOG_EXCHANGES: &str = "APICHECK_LOG_EXCHANGES";
/// Path of the reference file for the base download check.
pub const ENV_REFERENCE_FILE: &str = "APICHECK_REFERENCE_FILE";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The YAML document is malformed.
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A base URL is not a valid absolute URL.
    #[error("invalid URL in {key}: {value}")]
    InvalidUrl {
        /// Setting name.
        key: String,
        /// Offending value.
        value: String,
    },

    /// A setting has a value of the wrong kind.
    #[error("invalid value for {key}: {value}")]
    InvalidValue {
        /// Setting name.
        key: String,
        /// Offending value.
        value: String,
    },
}

/// Which sides of each exchange the transport logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeLogging {
    /// Log outgoing requests.
    pub requests: bool,
    /// Log received responses.
    pub responses: bool,
}

impl Default for ExchangeLogging {
    fn default() -> Self {
        Self::all()
    }
}

impl ExchangeLogging {
    /// Logs both sides.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            requests: true,
            responses: true,
        }
    }

    /// Logs nothing.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            requests: false,
            responses: false,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "all" | "yes" => Some(Self::all()),
            "false" | "0" | "none" | "no" => Some(Self::none()),
            "requests" => Some(Self {
                requests: true,
                responses: false,
            }),
            "responses" => Some(Self {
                requests: false,
                responses: true,
            }),
            _ => None,
        }
    }
}

/// Connection settings of one service under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL that relative request paths resolve against.
    pub base_url: Url,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Exchange logging filters.
    #[serde(default)]
    pub logging: ExchangeLogging,
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl ServiceConfig {
    /// Creates a service config with default timeout and logging.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            logging: ExchangeLogging::default(),
        }
    }

    /// Parses `base_url` and creates a service config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] for anything but an absolute URL.
    pub fn parse(base_url: &str) -> Result<Self, ConfigError> {
        parse_url("base_url", base_url).map(Self::new)
    }

    /// Replaces the timeout.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Replaces the logging filters.
    #[must_use]
    pub const fn with_logging(mut self, logging: ExchangeLogging) -> Self {
        self.logging = logging;
        self
    }
}

/// Configuration of a whole scenario run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// The user-management service.
    #[serde(default = "default_user_service")]
    pub user_service: ServiceConfig,
    /// The fake store.
    #[serde(default = "default_fake_store")]
    pub fake_store: ServiceConfig,
    /// File the base download is compared against.
    #[serde(default)]
    pub reference_file: Option<PathBuf>,
}

fn default_user_service() -> ServiceConfig {
    ServiceConfig::new(default_url(DEFAULT_USER_SERVICE_URL))
}

fn default_fake_store() -> ServiceConfig {
    ServiceConfig::new(default_url(DEFAULT_FAKE_STORE_URL))
}

#[allow(clippy::expect_used)]
fn default_url(url: &str) -> Url {
    Url::parse(url).expect("default service URLs are valid")
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            user_service: default_user_service(),
            fake_store: default_fake_store(),
            reference_file: None,
        }
    }
}

impl SuiteConfig {
    /// Parses a YAML document. Missing sections take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed YAML and
    /// [`ConfigError::InvalidUrl`] for a base URL without a host.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        check_host("user_service.base_url", &config.user_service.base_url)?;
        check_host("fake_store.base_url", &config.fake_store.base_url)?;
        Ok(config)
    }

    /// Reads a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, or any
    /// error of [`Self::from_yaml_str`].
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Builds the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`Self::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from a variable lookup.
    ///
    /// Starts from the file named by `APICHECK_CONFIG` (or the defaults) and
    /// applies the individual `APICHECK_*` overrides on top. Empty values
    /// count as unset.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the file or any override is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = match var(ENV_CONFIG) {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };

        if let Some(value) = var(ENV_USER_SERVICE_URL) {
            config.user_service.base_url = parse_url(ENV_USER_SERVICE_URL, &value)?;
        }
        if let Some(value) = var(ENV_FAKE_STORE_URL) {
            config.fake_store.base_url = parse_url(ENV_FAKE_STORE_URL, &value)?;
        }
        if let Some(value) = var(ENV_TIMEOUT_MS) {
            let timeout_ms = value
                .trim()
                .parse()
                .map_err(|_| invalid_value(ENV_TIMEOUT_MS, &value))?;
            config.user_service.timeout_ms = timeout_ms;
            config.fake_store.timeout_ms = timeout_ms;
        }
        if let Some(value) = var(ENV_LOG_EXCHANGES) {
            let logging =
                ExchangeLogging::parse(&value).ok_or_else(|| invalid_value(ENV_LOG_EXCHANGES, &value))?;
            config.user_service.logging = logging;
            config.fake_store.logging = logging;
        }
        if let Some(value) = var(ENV_REFERENCE_FILE) {
            config.reference_file = Some(PathBuf::from(value));
        }

        Ok(config)
    }
}

fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value.trim())
        .ok()
        .filter(Url::has_host)
        .ok_or_else(|| ConfigError::InvalidUrl {
            key: key.to_string(),
            value: value.to_string(),
        })
}

fn check_host(key: &str, url: &Url) -> Result<(), ConfigError> {
    if url.has_host() {
        return Ok(());
    }
    Err(ConfigError::InvalidUrl {
        key: key.to_string(),
        value: url.to_string(),
    })
}

fn invalid_value(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
