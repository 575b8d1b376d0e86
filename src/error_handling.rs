//! Error type definitions.
//!
//! This module defines the typed errors raised while setting up shared
//! resources and while rejecting command-line values. Everything past
//! startup degrades silently instead of erroring (missing DNS answers and
//! unknown ASNs are reported as absence, not failures).

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error initializing the DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),
}

/// Error types for rejected command-line values.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A `--servers` entry that is neither an IP address nor an `ip:port` pair.
    #[error("invalid name server {0:?}: {1}")]
    InvalidNameServer(String, String),

    /// A `--timeout` value that is zero, negative, or not a number.
    #[error("--timeout must be a positive number of seconds, got {0}")]
    InvalidTimeout(f64),

    /// A `--tries` value of zero.
    #[error("--tries must be at least 1")]
    InvalidTries,
}
