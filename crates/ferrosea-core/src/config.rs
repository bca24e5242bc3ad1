//! Client configuration.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FERROSEA_API_KEY` | unset | Sent as `X-API-KEY` when present |
//! | `FERROSEA_BASE_URL` | `https://api.opensea.io/api/v1` | API root the endpoint paths are joined to |
//! | `FERROSEA_TIMEOUT_MS` | `10000` | Per-request transport timeout |

use std::fmt::{Debug, Formatter};

use crate::{ConfigError, HttpAuth};

pub const DEFAULT_BASE_URL: &str = "https://api.opensea.io/api/v1";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

const API_KEY_VAR: &str = "FERROSEA_API_KEY";
const BASE_URL_VAR: &str = "FERROSEA_BASE_URL";
const TIMEOUT_VAR: &str = "FERROSEA_TIMEOUT_MS";

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    auth: HttpAuth,
    timeout_ms: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(BASE_URL_VAR, base_url.into())?,
            ..Self::default()
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source; unset or blank values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let base_url = match read(BASE_URL_VAR) {
            Some(value) => normalize_base_url(BASE_URL_VAR, value)?,
            None => String::from(DEFAULT_BASE_URL),
        };

        let timeout_ms = match read(TIMEOUT_VAR) {
            Some(value) => parse_timeout(TIMEOUT_VAR, &value)?,
            None => DEFAULT_TIMEOUT_MS,
        };

        Ok(Self {
            base_url,
            auth: HttpAuth::from_key(read(API_KEY_VAR).as_deref()),
            timeout_ms,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        self.base_url = normalize_base_url(BASE_URL_VAR, base_url.into())?;
        Ok(self)
    }

    pub fn with_api_key(mut self, key: impl AsRef<str>) -> Self {
        self.auth = HttpAuth::from_key(Some(key.as_ref()));
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Result<Self, ConfigError> {
        if timeout_ms == 0 {
            return Err(ConfigError::InvalidNumber {
                name: "timeout_ms",
                value: timeout_ms.to_string(),
            });
        }
        self.timeout_ms = timeout_ms;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth(&self) -> &HttpAuth {
        &self.auth
    }

    pub const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            auth: HttpAuth::None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl Debug for ClientConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("auth", &self.auth)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

fn normalize_base_url(name: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim().trim_end_matches('/');
    if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
        return Err(ConfigError::InvalidUrl { name, value });
    }
    Ok(trimmed.to_owned())
}

fn parse_timeout(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err(ConfigError::InvalidNumber {
            name,
            value: value.to_owned(),
        }),
    }
}
