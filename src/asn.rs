//! ASN enrichment via an iptoasn-style HTTP endpoint.
//!
//! Each unique address is looked up once with `GET <base-url>/<address>`.
//! Anything short of a 200 response carrying a JSON body that marks the
//! address as announced comes back as [`None`]; the report renders those
//! addresses with placeholder columns instead of failing the run.

use log::{debug, warn};
use reqwest::StatusCode;
use serde::Deserialize;

/// Metadata about the autonomous system announcing an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsnInfo {
    /// AS number.
    pub number: u32,
    /// Two-letter country code registered for the AS.
    pub country_code: String,
    /// Display string of the form `AS<number>: <description> (<countryCode>)`.
    pub description: String,
}

/// Wire shape of one iptoasn lookup response. Every field is optional on the
/// wire; absent fields default so that a sparse body reads as unannounced.
#[derive(Debug, Deserialize)]
struct IpToAsnReply {
    #[serde(default)]
    announced: bool,
    #[serde(default)]
    as_number: u32,
    #[serde(default)]
    as_country_code: String,
    #[serde(default)]
    as_description: String,
}

impl IpToAsnReply {
    fn into_info(self) -> AsnInfo {
        let description = format!(
            "AS{}: {} ({})",
            self.as_number, self.as_description, self.as_country_code
        );
        AsnInfo {
            number: self.as_number,
            country_code: self.as_country_code,
            description,
        }
    }
}

/// Client for the ASN lookup service.
pub struct AsnClient {
    http: reqwest::Client,
    base_url: String,
}

impl AsnClient {
    /// Creates a client for the service rooted at `base_url`. A trailing
    /// slash on the base URL is tolerated.
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url_for(&self, address: &str) -> String {
        format!("{}/{}", self.base_url, address)
    }

    /// Looks up the AS announcing `address`.
    ///
    /// Returns [`None`] when the request fails, the service answers with a
    /// non-200 status, the body cannot be read as a lookup reply, or the
    /// address is not announced. No retries and no caching; callers decide
    /// how often to ask.
    pub async fn lookup(&self, address: &str) -> Option<AsnInfo> {
        let url = self.url_for(address);
        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("ASN lookup request for {} failed: {}", address, e);
                return None;
            }
        };
        if response.status() != StatusCode::OK {
            debug!("ASN lookup for {} answered {}", address, response.status());
            return None;
        }
        let reply: IpToAsnReply = match response.json().await {
            Ok(reply) => reply,
            Err(e) => {
                debug!("ASN lookup for {} returned an unusable body: {}", address, e);
                return None;
            }
        };
        if !reply.announced {
            debug!("{} is not announced by any AS", address);
            return None;
        }
        Some(reply.into_info())
    }
}
