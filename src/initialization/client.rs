//! HTTP client initialization.
//!
//! This module provides the client used for ASN lookups.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error_handling::InitializationError;

/// Initializes the HTTP client used for ASN lookups.
///
/// Creates a `reqwest::Client` configured with:
/// - A request timeout so one dead endpoint cannot stall the whole report
/// - A descriptive User-Agent
/// - Rustls TLS backend (no native TLS)
///
/// # Returns
///
/// A configured HTTP client ready for making requests.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client() -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}
