//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `BESTSTORIES_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::time::Duration;

use crate::constants::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_IDS_TTL_SECS, DEFAULT_IDS_URL, DEFAULT_ITEM_TTL_SECS,
    DEFAULT_ITEM_URL, DEFAULT_MAX_IN_FLIGHT, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_UPSTREAM_TIMEOUT_SECS, MAX_CACHE_TTL_SECS, secs,
};

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `BESTSTORIES_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// URL returning the ranked JSON id array.
    pub identifier_source_url: String,

    /// Base URL for item payloads; `{id}.json` is appended.
    pub detail_source_url: String,

    /// Lifetime of the cached id list. Default: 60s.
    pub identifier_cache_ttl: Duration,

    /// Lifetime of each cached item detail. Default: 300s.
    pub detail_cache_ttl: Duration,

    /// Resolve every id and re-sort by score instead of trusting upstream order.
    pub force_rerank: bool,

    /// Max simultaneous upstream detail requests. Default: `16`.
    pub max_in_flight: usize,

    /// Max entries in the shared cache. Default: `10_000`.
    pub cache_capacity: u64,

    /// Timeout for one upstream HTTP call. Default: 10s.
    pub upstream_timeout: Duration,

    /// End-to-end timeout for one inbound request. Default: 30s.
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            identifier_source_url: DEFAULT_IDS_URL.to_string(),
            detail_source_url: DEFAULT_ITEM_URL.to_string(),
            identifier_cache_ttl: secs(DEFAULT_IDS_TTL_SECS),
            detail_cache_ttl: secs(DEFAULT_ITEM_TTL_SECS),
            force_rerank: false,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            upstream_timeout: secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            request_timeout: secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "BESTSTORIES_PORT";
    const ENV_BIND_ADDR: &'static str = "BESTSTORIES_BIND_ADDR";
    const ENV_IDS_URL: &'static str = "BESTSTORIES_IDS_URL";
    const ENV_ITEM_URL: &'static str = "BESTSTORIES_ITEM_URL";
    const ENV_IDS_TTL_SECS: &'static str = "BESTSTORIES_IDS_TTL_SECS";
    const ENV_ITEM_TTL_SECS: &'static str = "BESTSTORIES_ITEM_TTL_SECS";
    const ENV_FORCE_RERANK: &'static str = "BESTSTORIES_FORCE_RERANK";
    const ENV_MAX_IN_FLIGHT: &'static str = "BESTSTORIES_MAX_IN_FLIGHT";
    const ENV_CACHE_CAPACITY: &'static str = "BESTSTORIES_CACHE_CAPACITY";
    const ENV_UPSTREAM_TIMEOUT_SECS: &'static str = "BESTSTORIES_UPSTREAM_TIMEOUT_SECS";
    const ENV_REQUEST_TIMEOUT_SECS: &'static str = "BESTSTORIES_REQUEST_TIMEOUT_SECS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let identifier_source_url =
            Self::parse_string_from_env(Self::ENV_IDS_URL, defaults.identifier_source_url);
        let detail_source_url =
            Self::parse_string_from_env(Self::ENV_ITEM_URL, defaults.detail_source_url);
        let identifier_cache_ttl =
            Self::parse_secs_from_env(Self::ENV_IDS_TTL_SECS, defaults.identifier_cache_ttl);
        let detail_cache_ttl =
            Self::parse_secs_from_env(Self::ENV_ITEM_TTL_SECS, defaults.detail_cache_ttl);
        let force_rerank = Self::parse_bool_from_env(Self::ENV_FORCE_RERANK, defaults.force_rerank);
        let max_in_flight =
            Self::parse_u64_from_env(Self::ENV_MAX_IN_FLIGHT, defaults.max_in_flight as u64)
                as usize;
        let cache_capacity =
            Self::parse_u64_from_env(Self::ENV_CACHE_CAPACITY, defaults.cache_capacity);
        let upstream_timeout =
            Self::parse_secs_from_env(Self::ENV_UPSTREAM_TIMEOUT_SECS, defaults.upstream_timeout);
        let request_timeout =
            Self::parse_secs_from_env(Self::ENV_REQUEST_TIMEOUT_SECS, defaults.request_timeout);

        Ok(Self {
            port,
            bind_addr,
            identifier_source_url,
            detail_source_url,
            identifier_cache_ttl,
            detail_cache_ttl,
            force_rerank,
            max_in_flight,
            cache_capacity,
            upstream_timeout,
            request_timeout,
        })
    }

    /// Validates URLs and limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::validate_url("identifier source url", &self.identifier_source_url)?;
        Self::validate_url("detail source url", &self.detail_source_url)?;
        Self::validate_ttl("identifier_cache_ttl", self.identifier_cache_ttl)?;
        Self::validate_ttl("detail_cache_ttl", self.detail_cache_ttl)?;

        if self.max_in_flight == 0 {
            return Err(ConfigError::MustBePositive {
                name: "max_in_flight",
            });
        }
        if self.cache_capacity == 0 {
            return Err(ConfigError::MustBePositive {
                name: "cache_capacity",
            });
        }
        if self.upstream_timeout.is_zero() {
            return Err(ConfigError::MustBePositive {
                name: "upstream_timeout",
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::MustBePositive {
                name: "request_timeout",
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        Self::format_addr(self.bind_addr, self.port)
    }

    /// URL of `/healthz` on this server as seen from the same host.
    ///
    /// An unspecified bind address (`0.0.0.0`, `::`) is probed on the loopback
    /// address of the same family.
    pub fn health_check_url(&self) -> String {
        let host = match self.bind_addr {
            IpAddr::V4(addr) if addr.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
            IpAddr::V6(addr) if addr.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
            addr => addr,
        };
        format!("http://{}/healthz", Self::format_addr(host, self.port))
    }

    fn format_addr(ip: IpAddr, port: u16) -> String {
        match ip {
            IpAddr::V4(addr) => format!("{}:{}", addr, port),
            IpAddr::V6(addr) => format!("[{}]:{}", addr, port),
        }
    }

    fn validate_ttl(name: &'static str, ttl: Duration) -> Result<(), ConfigError> {
        if ttl > secs(MAX_CACHE_TTL_SECS) {
            return Err(ConfigError::TtlTooLarge {
                name,
                secs: ttl.as_secs(),
                max_secs: MAX_CACHE_TTL_SECS,
            });
        }
        Ok(())
    }

    fn validate_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidUrl {
            name,
            value: value.to_string(),
            reason,
        };

        if value.trim().is_empty() {
            return Err(invalid("must not be empty".to_string()));
        }

        let url = reqwest::Url::parse(value).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(invalid(format!("unsupported scheme '{other}'"))),
        }
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
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    fn parse_secs_from_env(var_name: &str, default: Duration) -> Duration {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(default)
    }

    fn parse_bool_from_env(var_name: &str, default: bool) -> bool {
        match env::var(var_name) {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => default,
            },
            Err(_) => default,
        }
    }
}
