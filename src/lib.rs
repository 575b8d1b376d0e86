//! ipgrep library: grep, resolve and annotate network indicators from text
//!
//! This library greps hostnames and IPv4 addresses out of arbitrary byte text
//! (the extraction patterns tolerate common obfuscation spellings such as
//! `example[.]com`), resolves the candidate names concurrently against
//! explicitly configured name servers, annotates every address with the AS
//! announcing it, and renders a tab-separated report sorted by announcing AS.
//!
//! # Example
//!
//! ```no_run
//! use clap::Parser;
//! use ipgrep::{run, Opt};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let opt = Opt::parse_from(["ipgrep", "--timeout", "2.5", "mail.txt"]);
//! let report = run(opt).await?;
//! eprintln!("{} report rows in {:.1}s", report.rows_written, report.elapsed_seconds);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

pub mod asn;
pub mod config;
pub mod dns;
pub mod error_handling;
pub mod extract;
pub mod initialization;
pub mod report;

// Re-export public API
pub use config::{LogFormat, LogLevel, Opt};
pub use run::{run, run_with_output, RunReport};

// Internal run module (contains the pipeline logic)
mod run {
    use std::collections::{HashMap, HashSet};
    use std::io::Write;
    use std::path::Path;

    use anyhow::{Context, Result};
    use log::{debug, info};
    use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

    use crate::asn::{AsnClient, AsnInfo};
    use crate::config::Opt;
    use crate::extract::{extract_ips, extract_names};
    use crate::initialization::{init_client, init_resolver};
    use crate::report::{merge_hosts, write_report};

    /// Results of one grep-resolve-annotate run.
    #[derive(Debug, Clone)]
    pub struct RunReport {
        /// Unique candidate names extracted from the input
        pub names_extracted: usize,
        /// Unique literal addresses extracted from the input
        pub addresses_extracted: usize,
        /// (address, name) pairs obtained through resolution
        pub resolved_pairs: usize,
        /// Unique addresses annotated with ASN data
        pub annotated_addresses: usize,
        /// Report rows written
        pub rows_written: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs the pipeline and writes the report to standard output.
    ///
    /// See [`run_with_output`] for the pipeline itself; this wrapper locks
    /// stdout for the duration so report rows are never interleaved with
    /// other writers.
    pub async fn run(opt: Opt) -> Result<RunReport> {
        run_with_output(opt, std::io::stdout().lock()).await
    }

    /// Runs the pipeline and writes the report rows to `out`.
    ///
    /// The pipeline has four strictly ordered phases: scan the inputs for
    /// candidate names and literal addresses, resolve all names concurrently,
    /// look up the announcing AS once per unique address, and render the
    /// merged host set as sorted tab-separated rows.
    ///
    /// # Errors
    ///
    /// Fails on invalid resolver settings, on unreadable input files and on
    /// report I/O errors. Resolution misses and ASN lookup misses are not
    /// errors; affected rows simply carry placeholder columns.
    pub async fn run_with_output<W: Write>(opt: Opt, out: W) -> Result<RunReport> {
        let start_time = std::time::Instant::now();

        let settings = opt
            .resolver_settings()
            .context("Invalid resolver configuration")?;
        let resolver = init_resolver(&settings).context("Failed to initialize DNS resolver")?;
        let http = init_client().context("Failed to initialize HTTP client")?;
        let asn_client = AsnClient::new(http, &opt.asn_url);

        let mut names = HashSet::new();
        let mut addresses = HashSet::new();
        if opt.files.is_empty() {
            scan_reader(BufReader::new(tokio::io::stdin()), &mut names, &mut addresses)
                .await
                .context("Failed to read standard input")?;
        } else {
            for path in &opt.files {
                if path.as_os_str() == "-" {
                    scan_reader(BufReader::new(tokio::io::stdin()), &mut names, &mut addresses)
                        .await
                        .context("Failed to read standard input")?;
                } else {
                    scan_file(path, &mut names, &mut addresses).await?;
                }
            }
        }
        info!(
            "Extracted {} candidate names and {} literal addresses",
            names.len(),
            addresses.len()
        );

        let resolved = resolver.resolve(&names).await;
        info!("Resolved {} (address, name) pairs", resolved.len());

        let hosts = merge_hosts(&resolved, &addresses);

        // One lookup per unique address, in sorted order so runs are
        // reproducible.
        let mut unique_addresses: Vec<&str> =
            hosts.iter().map(|host| host.address.as_str()).collect();
        unique_addresses.sort_unstable();
        unique_addresses.dedup();

        let mut asn_by_address: HashMap<String, AsnInfo> = HashMap::new();
        for address in unique_addresses {
            match asn_client.lookup(address).await {
                Some(info) => {
                    debug!("{} is announced as {}", address, info.description);
                    asn_by_address.insert(address.to_string(), info);
                }
                None => debug!("No ASN data for {}", address),
            }
        }

        write_report(&hosts, &asn_by_address, out).context("Failed to write report")?;

        Ok(RunReport {
            names_extracted: names.len(),
            addresses_extracted: addresses.len(),
            resolved_pairs: resolved.len(),
            annotated_addresses: asn_by_address.len(),
            rows_written: hosts.len(),
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }

    async fn scan_file(
        path: &Path,
        names: &mut HashSet<String>,
        addresses: &mut HashSet<String>,
    ) -> Result<()> {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open input file: {}", path.display()))?;
        scan_reader(BufReader::new(file), names, addresses)
            .await
            .with_context(|| format!("Failed to read input file: {}", path.display()))
    }

    /// Feeds the input to the extractor one line at a time. Lines keep their
    /// terminator so the boundary-sensitive patterns see the byte that ended
    /// the line, and nothing assumes the input is valid UTF-8.
    async fn scan_reader<R>(
        mut reader: R,
        names: &mut HashSet<String>,
        addresses: &mut HashSet<String>,
    ) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut line = Vec::new();
        loop {
            line.clear();
            let n = reader.read_until(b'\n', &mut line).await?;
            if n == 0 {
                break;
            }
            names.extend(extract_names(&line));
            addresses.extend(extract_ips(&line));
        }
        Ok(())
    }
}
