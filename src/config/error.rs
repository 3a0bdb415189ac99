//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// An upstream URL is empty, unparseable, or not http(s).
    #[error("invalid {name} '{value}': {reason}")]
    InvalidUrl {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// A cache TTL exceeds the accepted maximum.
    #[error("{name} of {secs}s exceeds the maximum of {max_secs}s")]
    TtlTooLarge {
        name: &'static str,
        secs: u64,
        max_secs: u64,
    },

    /// A setting that must be positive was zero.
    #[error("{name} must be greater than zero")]
    MustBePositive { name: &'static str },
}
