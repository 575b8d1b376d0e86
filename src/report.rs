//! Report assembly and rendering.
//!
//! The final report is tab-separated, one row per unique (address, name)
//! host, sorted so that rows sharing an announcing AS sit together. No header
//! row; the output is meant to be piped into sort/awk/cut.

use std::collections::{HashMap, HashSet};
use std::io::Write;

use anyhow::{Context, Result};
use csv::WriterBuilder;

use crate::asn::AsnInfo;

/// Column value for fields with nothing to show.
pub const PLACEHOLDER: &str = "-";

/// One reportable host: an address plus the name it was resolved from, if
/// any.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Host {
    /// Address as produced by resolution or extraction.
    pub address: String,
    /// Name that resolved to the address; [`None`] for literal addresses.
    pub name: Option<String>,
}

/// Merges resolved (address, name) pairs with literal addresses into the set
/// of report hosts. Identity is the (address, name) pair, so a literal
/// address and the same address reached through a name stay distinct rows.
pub fn merge_hosts(
    resolved: &HashSet<(String, String)>,
    literals: &HashSet<String>,
) -> HashSet<Host> {
    let mut hosts: HashSet<Host> = resolved
        .iter()
        .map(|(address, name)| Host {
            address: address.clone(),
            name: Some(name.clone()),
        })
        .collect();
    hosts.extend(literals.iter().map(|address| Host {
        address: address.clone(),
        name: None,
    }));
    hosts
}

/// Renders the report to `out` as tab-separated rows of
/// (address, name, ASN description).
///
/// Rows are sorted by (ASN description, address, name) with plain lexical
/// string ordering. A host without a name or without ASN data gets the
/// placeholder in that column, and the placeholder takes part in the sort
/// like any other value, which is why unattributed rows group at the top.
pub fn write_report<W: Write>(
    hosts: &HashSet<Host>,
    asn_by_address: &HashMap<String, AsnInfo>,
    out: W,
) -> Result<()> {
    let mut rows: Vec<(&str, &str, &str)> = hosts
        .iter()
        .map(|host| {
            let asn = asn_by_address
                .get(&host.address)
                .map(|info| info.description.as_str())
                .unwrap_or(PLACEHOLDER);
            let name = host.name.as_deref().unwrap_or(PLACEHOLDER);
            (asn, host.address.as_str(), name)
        })
        .collect();
    rows.sort_unstable();

    let mut writer = WriterBuilder::new().delimiter(b'\t').from_writer(out);
    for (asn, address, name) in rows {
        writer
            .write_record([address, name, asn])
            .context("Failed to write report row")?;
    }
    writer.flush().context("Failed to flush report")?;
    Ok(())
}
