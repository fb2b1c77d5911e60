//! # Docket Configuration
//!
//! A string key/value store with dotted keys, in the spirit of
//! `app.set()` / `app.get()`.
//!
//! ```rust
//! use docket_core::DocketConfig;
//! let mut config = DocketConfig::new();
//!
//! config.set("blob.bucket", "my-docs");
//! config.set("database.acquire_timeout", "30s");
//!
//! let snap = config.snapshot();
//! assert_eq!(snap.get("blob.bucket"), Some("my-docs"));
//! assert_eq!(snap.get_duration("database.acquire_timeout").unwrap().as_secs(), 30);
//! ```
//!
//! ## Environment
//! [`DocketConfig::from_env`] reads the well-known variables
//! (`DATABASE_URL`, `S3_BUCKET`, ...) and then any `DOCKET__` prefixed
//! variable, so `DOCKET__DATABASE__POOL_SIZE=10` sets `database.pool_size`.

use std::collections::HashMap;
use std::time::Duration;

use crate::errors::DocError;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const ENV_PREFIX: &str = "DOCKET__";

/// Well-known environment variables and the keys they populate.
const ENV_KEYS: &[(&str, &str)] = &[
    ("DATABASE_URL", "database.url"),
    ("S3_BUCKET", "blob.bucket"),
    ("S3_REGION", "blob.region"),
    ("S3_ENDPOINT_URL", "blob.endpoint_url"),
    ("AWS_REGION", "aws.region"),
    ("HTTP_HOST", "http.host"),
    ("HTTP_PORT", "http.port"),
];

#[derive(Debug, Default, Clone)]
pub struct DocketConfig {
    values: HashMap<String, String>,
}

impl DocketConfig {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Load from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Same as [`DocketConfig::from_env`] over an explicit variable list.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::new();

        for (key, value) in vars {
            let key = key.as_ref();
            let value = value.into();
            if value.is_empty() {
                continue;
            }
            if let Some((_, mapped)) = ENV_KEYS.iter().find(|(env, _)| *env == key) {
                config.set(*mapped, value);
            } else if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                let normalized = stripped.to_lowercase().replace("__", ".");
                config.set(normalized, value);
            }
        }

        config
    }

    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn snapshot(&self) -> DocketConfigSnapshot {
        DocketConfigSnapshot::new(self.values.clone())
    }
}

/// Immutable view of the configuration with typed reads.
#[derive(Debug, Clone, Default)]
pub struct DocketConfigSnapshot {
    map: HashMap<String, String>,
}

impl DocketConfigSnapshot {
    pub(crate) fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    pub fn get_usize(&self, key: &str) -> Option<usize> {
        self.get(key).and_then(|v| v.parse::<usize>().ok())
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.parse::<u64>().ok())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.parse::<bool>().ok())
    }

    /// Durations are written the humantime way: `1h`, `30m`, `90s`.
    pub fn get_duration(&self, key: &str) -> Option<Duration> {
        self.get(key).and_then(|v| humantime::parse_duration(v).ok())
    }

    /// A key that must be present for the process to start.
    pub fn require(&self, key: &str) -> Result<&str, DocError> {
        self.get(key)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| DocError::configuration(format!("missing required configuration: {key}")))
    }
}
