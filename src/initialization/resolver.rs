//! DNS resolver initialization.
//!
//! This module builds the resolution channel from validated settings and
//! wraps it in the crate's [`Resolver`].

use std::time::Duration;

use hickory_resolver::config::{
    NameServerConfig, NameServerConfigGroup, Protocol, ResolverConfig, ResolverOpts,
};
use hickory_resolver::{system_conf, TokioAsyncResolver};
use log::debug;

use crate::config::ResolverSettings;
use crate::dns::Resolver;
use crate::error_handling::InitializationError;

/// Initializes the DNS resolver for hostname lookups.
///
/// The channel is configured once with the caller's timeout, attempt count
/// and name servers; all retry and deadline bookkeeping then happens inside
/// the channel rather than per call site.
///
/// Search-domain appending is disabled unconditionally: extracted names are
/// queried exactly as written, never expanded with local suffixes. The hosts
/// file is not consulted either, so every answer comes off the wire.
///
/// When `settings.servers` is empty, the platform's name servers are used
/// (with the platform's search list stripped). If the platform configuration
/// cannot be read, the well-known public resolvers from
/// `ResolverConfig::default()` stand in.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if the timeout cannot be
/// represented as a duration.
pub fn init_resolver(settings: &ResolverSettings) -> Result<Resolver, InitializationError> {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::try_from_secs_f64(settings.timeout_secs).map_err(|e| {
        InitializationError::DnsResolverError(format!(
            "timeout of {}s is not representable: {}",
            settings.timeout_secs, e
        ))
    })?;
    // The channel counts attempts as retries after the first request.
    opts.attempts = settings.tries.saturating_sub(1);
    // Set ndots to 0 to prevent search domain appending
    opts.ndots = 0;
    opts.use_hosts_file = false;

    let config = if settings.servers.is_empty() {
        platform_config()
    } else {
        let mut group = NameServerConfigGroup::with_capacity(settings.servers.len() * 2);
        for addr in &settings.servers {
            group.push(NameServerConfig::new(*addr, Protocol::Udp));
            group.push(NameServerConfig::new(*addr, Protocol::Tcp));
        }
        ResolverConfig::from_parts(None, Vec::new(), group)
    };

    Ok(Resolver::new(TokioAsyncResolver::tokio(config, opts)))
}

/// Reads the platform's name servers, dropping its search list. Falls back to
/// the public default servers when no platform configuration is readable.
fn platform_config() -> ResolverConfig {
    match system_conf::read_system_conf() {
        Ok((config, _opts)) => {
            ResolverConfig::from_parts(None, Vec::new(), config.name_servers().to_vec())
        }
        Err(e) => {
            debug!(
                "Could not read the system resolver configuration, using public defaults: {}",
                e
            );
            ResolverConfig::default()
        }
    }
}
