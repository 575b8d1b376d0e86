//! Concurrent hostname resolution.
//!
//! The resolver fans every requested name out as an address-record query and
//! drains the in-flight set as completions arrive, so one slow or dead name
//! never stalls the rest. Timeouts, retries and server rotation are delegated
//! to the underlying resolution channel, which is configured once at startup
//! (see [`crate::initialization::init_resolver`]).
//!
//! Failures are silent at the result level: a name that cannot be resolved
//! simply contributes no pairs. The reasons are still visible at debug level.

use std::collections::HashSet;

use futures::stream::{FuturesUnordered, StreamExt};
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::TokioAsyncResolver;
use log::debug;


/// Hostname resolver over a shared resolution channel.
pub struct Resolver {
    inner: TokioAsyncResolver,
}

impl Resolver {
    /// Wraps an already configured resolution channel.
    pub(crate) fn new(inner: TokioAsyncResolver) -> Self {
        Self { inner }
    }

    /// Resolves all `names` concurrently and returns the deduplicated set of
    /// (address, name) pairs.
    ///
    /// Every name is submitted as an A-record query up front; completions are
    /// collected in whatever order they arrive. A name resolving to several
    /// addresses contributes one pair per address. Names that fail to resolve
    /// (NXDOMAIN, no data, server errors, timeout exhaustion) contribute
    /// nothing. Duplicate input names are queried again but collapse to the
    /// same pairs.
    ///
    /// An empty `names` iterator returns an empty set without touching the
    /// network.
    pub async fn resolve<I, S>(&self, names: I) -> HashSet<(String, String)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let resolver = &self.inner;
        let mut in_flight: FuturesUnordered<_> = names
            .into_iter()
            .map(|name| async move {
                let result = resolver.ipv4_lookup(name.as_ref()).await;
                (name, result)
            })
            .collect();

        let mut pairs = HashSet::new();
        while let Some((name, result)) = in_flight.next().await {
            let name = name.as_ref();
            match result {
                Ok(response) => {
                    for ip in response.iter() {
                        pairs.insert((ip.to_string(), name.to_string()));
                    }
                }
                Err(e) => match e.kind() {
                    ResolveErrorKind::NoRecordsFound { response_code, .. } => {
                        debug!("No address records for {}: {}", name, response_code);
                    }
                    _ => {
                        debug!("Failed to resolve {}: {}", name, e);
                    }
                },
            }
        }
        pairs
    }
}
