use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::error_handling::ConfigError;

// constants (used as defaults)
/// Seconds each name server is given to respond to one query attempt.
pub const DEFAULT_TIMEOUT_SECS: f64 = 5.0;
/// Times the resolver will try contacting each name server before giving up.
pub const DEFAULT_TRIES: usize = 4;
/// Port assumed for `--servers` entries that do not carry one.
pub const DNS_PORT: u16 = 53;
/// Base URL of the public iptoasn lookup endpoint.
pub const IPTOASN_BASE_URL: &str = "https://api.iptoasn.com/v1/as/ip";
/// Request timeout for ASN lookups in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace). Used with the `--log-level` CLI option.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Normal operational messages.
    Info,
    /// Verbose diagnostics, including per-query resolution outcomes.
    Debug,
    /// Everything.
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors.
    Plain,
    /// Structured JSON format.
    Json,
}

/// Command-line options and configuration.
///
/// This struct is automatically generated by `clap` from the field attributes.
/// All options have sensible defaults and can be overridden via command-line flags.
///
/// # Examples
///
/// ```bash
/// # Grep stdin, resolve against the platform's name servers
/// cat mail.txt | ipgrep
///
/// # Grep files with explicit name servers and tighter timeouts
/// ipgrep --servers 8.8.8.8,1.1.1.1:53 --timeout 2.5 --tries 2 dump1.txt dump2.txt
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "ipgrep",
    about = "Greps hostnames and IP addresses out of text, resolves the names, and annotates every address with ASN info."
)]
pub struct Opt {
    /// Files to grep (default: stdin; "-" also reads stdin)
    #[arg(value_name = "FILE", value_parser)]
    pub files: Vec<PathBuf>,

    /// Seconds each name server is given to respond to a query
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: f64,

    /// Times the resolver will try contacting each name server
    #[arg(long, default_value_t = DEFAULT_TRIES)]
    pub tries: usize,

    /// Comma-separated list of name servers used to do the lookups
    /// (entries are IP addresses with an optional :port; default: platform configuration)
    #[arg(long, value_delimiter = ',')]
    pub servers: Vec<String>,

    /// Base URL of the ASN lookup service
    #[arg(long, default_value = IPTOASN_BASE_URL)]
    pub asn_url: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

/// Validated resolution parameters passed to the resolver at construction
/// time.
///
/// The engine delegates all timeout and retry bookkeeping to the underlying
/// resolution channel, so these three values fully describe its behavior.
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    /// Per-attempt timeout in seconds.
    pub timeout_secs: f64,
    /// Total attempts per name server before a query is abandoned.
    pub tries: usize,
    /// Explicit name servers; empty means the platform configuration.
    pub servers: Vec<SocketAddr>,
}

impl Opt {
    /// Validates the resolution flags and parses the name-server list.
    ///
    /// Empty `--servers` entries are ignored, so `--servers ""` behaves the
    /// same as omitting the flag: the platform configuration is used.
    pub fn resolver_settings(&self) -> Result<ResolverSettings, ConfigError> {
        if !self.timeout.is_finite() || self.timeout <= 0.0 {
            return Err(ConfigError::InvalidTimeout(self.timeout));
        }
        if self.tries == 0 {
            return Err(ConfigError::InvalidTries);
        }
        let mut servers = Vec::new();
        for entry in &self.servers {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            servers.push(parse_name_server(entry)?);
        }
        Ok(ResolverSettings {
            timeout_secs: self.timeout,
            tries: self.tries,
            servers,
        })
    }
}

/// Parses one `--servers` entry: `ip:port`, or a bare IP with port 53 assumed.
fn parse_name_server(entry: &str) -> Result<SocketAddr, ConfigError> {
    if let Ok(addr) = entry.parse::<SocketAddr>() {
        return Ok(addr);
    }
    entry
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DNS_PORT))
        .map_err(|e| ConfigError::InvalidNameServer(entry.to_string(), e.to_string()))
}
