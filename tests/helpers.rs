// Shared test helpers for stub name serving and ASN reply bodies.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use tokio::net::UdpSocket;

/// Spawns a UDP name server that answers A queries from a fixed
/// name-to-address table and replies NXDOMAIN for every other name. Serves
/// until the test runtime shuts down.
#[allow(dead_code)] // Used by other test files
pub async fn spawn_dns_stub(answers: &[(&str, Ipv4Addr)]) -> SocketAddr {
    let table: HashMap<String, Ipv4Addr> = answers
        .iter()
        .map(|(name, addr)| (name.to_string(), *addr))
        .collect();
    let socket = UdpSocket::bind("127.0.0.1:0").await.expect("bind stub server");
    let addr = socket.local_addr().expect("stub server address");
    let socket = Arc::new(socket);

    tokio::spawn(async move {
        let mut buf = [0u8; 512];
        loop {
            let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
                break;
            };
            let query = buf[..len].to_vec();
            let Some((name, question_end)) = parse_question(&query) else {
                continue;
            };
            let reply = match table.get(&name) {
                Some(addr) => encode_reply(&query, question_end, 0x8180, &[*addr]),
                None => encode_reply(&query, question_end, 0x8183, &[]),
            };
            let _ = socket.send_to(&reply, peer).await;
        }
    });

    addr
}

/// Builds the JSON body the ASN service returns for an announced address.
#[allow(dead_code)] // Used by other test files
pub fn announced_body(
    as_number: u32,
    country_code: &str,
    description: &str,
) -> serde_json::Value {
    serde_json::json!({
        "announced": true,
        "as_number": as_number,
        "as_country_code": country_code,
        "as_description": description,
    })
}

/// Builds the JSON body the ASN service returns for an address no AS
/// announces.
#[allow(dead_code)] // Used by other test files
pub fn unannounced_body() -> serde_json::Value {
    serde_json::json!({ "announced": false })
}

/// Walks the question section: returns the queried name in lowercase dotted
/// form and the offset one past QTYPE/QCLASS.
fn parse_question(query: &[u8]) -> Option<(String, usize)> {
    let mut pos = 12;
    let mut labels = Vec::new();
    loop {
        let len = *query.get(pos)? as usize;
        pos += 1;
        if len == 0 {
            break;
        }
        let label = query.get(pos..pos + len)?;
        labels.push(String::from_utf8_lossy(label).to_ascii_lowercase());
        pos += len;
    }
    pos += 4;
    if pos > query.len() {
        return None;
    }
    Some((labels.join("."), pos))
}

/// Builds a reply that echoes the query's ID and question section and appends
/// one A record per address, each pointing back at the question name.
fn encode_reply(query: &[u8], question_end: usize, flags: u16, addrs: &[Ipv4Addr]) -> Vec<u8> {
    let mut reply = Vec::with_capacity(512);
    reply.extend_from_slice(&query[0..2]);
    reply.extend_from_slice(&flags.to_be_bytes());
    reply.extend_from_slice(&[0x00, 0x01]); // QDCOUNT
    reply.extend_from_slice(&(addrs.len() as u16).to_be_bytes()); // ANCOUNT
    reply.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]); // NSCOUNT, ARCOUNT
    reply.extend_from_slice(&query[12..question_end]);
    for addr in addrs {
        reply.extend_from_slice(&[0xc0, 0x0c]); // name: pointer to the question
        reply.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]); // TYPE A, CLASS IN
        reply.extend_from_slice(&[0x00, 0x00, 0x01, 0x2c]); // TTL 300
        reply.extend_from_slice(&[0x00, 0x04]);
        reply.extend_from_slice(&addr.octets());
    }
    reply
}
