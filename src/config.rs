//! Configuration Module
//!
//! Handles loading and managing proxy configuration from environment variables.

use std::env;
use std::time::Duration;

use thiserror::Error;

// == Config Error ==
/// Raised when an environment variable is present but cannot be parsed.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid value {value:?} for {name}: expected a non-negative integer")]
pub struct ConfigError {
    /// Name of the offending variable
    pub name: &'static str,
    /// Raw value that failed to parse
    pub value: String,
}

/// Proxy configuration parameters.
///
/// Numeric options that are absent fall back to their defaults. For the cache
/// options the default is zero, which the cache reads as "no limit".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of cached keys (0 = unbounded)
    pub key_size: usize,
    /// Lifetime of a cached entry in milliseconds (0 = never expires)
    pub global_expiry_ms: u64,
    /// Backing Redis host
    pub redis_host: String,
    /// Backing Redis port
    pub redis_port: u16,
    /// Listen address of the HTTP front end
    pub http_address: String,
    /// Listen address of the RESP front end
    pub resp_address: String,
    /// Global HTTP request ceiling per second (0 = unlimited)
    pub rate_limit_rps: u32,
    /// Deadline for a single store lookup in milliseconds (0 = none)
    pub store_timeout_ms: u64,
    /// Active expiry sweep interval in milliseconds (0 = lazy expiry only)
    pub cleanup_interval_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `KEY_SIZE` - Cache capacity in keys (default: 0, unbounded)
    /// - `GLOBAL_EXPIRY_MS` - Entry lifetime in ms (default: 0, no expiry)
    /// - `REDIS_HOST` - Redis host (default: 127.0.0.1)
    /// - `REDIS_PORT` - Redis port (default: 6379)
    /// - `HTTP_ADDRESS` - HTTP listen address (default: 0.0.0.0:3000)
    /// - `RESP_ADDRESS` - RESP listen address (default: 0.0.0.0:6380)
    /// - `RATE_LIMIT_RPS` - HTTP requests per second (default: 20)
    /// - `STORE_TIMEOUT_MS` - Store lookup deadline in ms (default: 0, none)
    /// - `CLEANUP_INTERVAL_MS` - Expiry sweep frequency in ms (default: 1000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let string = |name: &str, default: String| {
            lookup(name).filter(|v| !v.is_empty()).unwrap_or(default)
        };

        Ok(Self {
            key_size: parse_number(&lookup, "KEY_SIZE", defaults.key_size)?,
            global_expiry_ms: parse_number(&lookup, "GLOBAL_EXPIRY_MS", defaults.global_expiry_ms)?,
            redis_host: string("REDIS_HOST", defaults.redis_host),
            redis_port: parse_number(&lookup, "REDIS_PORT", defaults.redis_port)?,
            http_address: string("HTTP_ADDRESS", defaults.http_address),
            resp_address: string("RESP_ADDRESS", defaults.resp_address),
            rate_limit_rps: parse_number(&lookup, "RATE_LIMIT_RPS", defaults.rate_limit_rps)?,
            store_timeout_ms: parse_number(&lookup, "STORE_TIMEOUT_MS", defaults.store_timeout_ms)?,
            cleanup_interval_ms: parse_number(
                &lookup,
                "CLEANUP_INTERVAL_MS",
                defaults.cleanup_interval_ms,
            )?,
        })
    }

    /// Connection URL of the backing Redis instance.
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}/", self.redis_host, self.redis_port)
    }

    /// Cache entry lifetime, `None` when entries never expire.
    pub fn global_expiry(&self) -> Option<Duration> {
        non_zero_millis(self.global_expiry_ms)
    }

    /// Store lookup deadline, `None` when lookups may block indefinitely.
    pub fn store_timeout(&self) -> Option<Duration> {
        non_zero_millis(self.store_timeout_ms)
    }

    /// Active expiry interval, `None` when the sweep is disabled.
    pub fn cleanup_interval(&self) -> Option<Duration> {
        non_zero_millis(self.cleanup_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_size: 0,
            global_expiry_ms: 0,
            redis_host: "127.0.0.1".to_string(),
            redis_port: 6379,
            http_address: "0.0.0.0:3000".to_string(),
            resp_address: "0.0.0.0:6380".to_string(),
            rate_limit_rps: 20,
            store_timeout_ms: 0,
            cleanup_interval_ms: 1000,
        }
    }
}

// == Helpers ==
fn parse_number<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError { name, value: raw }),
    }
}

fn non_zero_millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.key_size, 0);
        assert_eq!(config.global_expiry_ms, 0);
        assert_eq!(config.redis_port, 6379);
        assert_eq!(config.rate_limit_rps, 20);
        assert!(config.global_expiry().is_none());
        assert!(config.store_timeout().is_none());
    }

    #[test]
    fn test_config_absent_vars_use_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_reads_all_vars() {
        let config = Config::from_lookup(lookup_from(&[
            ("KEY_SIZE", "10"),
            ("GLOBAL_EXPIRY_MS", "1500"),
            ("REDIS_HOST", "redis"),
            ("REDIS_PORT", "6400"),
            ("HTTP_ADDRESS", "127.0.0.1:8080"),
            ("RESP_ADDRESS", "127.0.0.1:6381"),
            ("RATE_LIMIT_RPS", "5"),
            ("STORE_TIMEOUT_MS", "250"),
            ("CLEANUP_INTERVAL_MS", "0"),
        ]))
        .unwrap();

        assert_eq!(config.key_size, 10);
        assert_eq!(config.global_expiry(), Some(Duration::from_millis(1500)));
        assert_eq!(config.redis_url(), "redis://redis:6400/");
        assert_eq!(config.http_address, "127.0.0.1:8080");
        assert_eq!(config.resp_address, "127.0.0.1:6381");
        assert_eq!(config.rate_limit_rps, 5);
        assert_eq!(config.store_timeout(), Some(Duration::from_millis(250)));
        assert!(config.cleanup_interval().is_none());
    }

    #[test]
    fn test_config_rejects_malformed_number() {
        let err = Config::from_lookup(lookup_from(&[("KEY_SIZE", "ten")])).unwrap_err();
        assert_eq!(err.name, "KEY_SIZE");
        assert_eq!(err.value, "ten");
    }

    #[test]
    fn test_config_rejects_negative_expiry() {
        let result = Config::from_lookup(lookup_from(&[("GLOBAL_EXPIRY_MS", "-1")]));
        assert!(result.is_err());
    }
}
