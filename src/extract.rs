//! Hostname and IPv4 address extraction from raw byte text.
//!
//! This module scans arbitrary bytes (mail bodies, logs, pastes) for strings
//! that look like hostnames or dotted-quad addresses, tolerating the
//! obfuscation spellings people use to defang indicators: `example[.]com`,
//! `example,com`, `10 [.] 0 [.] 0 [.] 1` and friends.
//!
//! Extraction is deliberately permissive. Candidates are not validated
//! against DNS label rules or octet ranges here; whatever survives cleanup is
//! handed to resolution and enrichment, which are free to fail silently on
//! nonsense.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::bytes::Regex;

/// Helper function to safely compile a regex pattern, panicking with a
/// detailed error message if compilation fails. Used for static extraction
/// patterns that are compile-time constants.
fn compile_extraction_regex(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile extraction pattern '{}' in {}: {}",
            pattern, context, e
        )
    })
}

/// Extracts candidate hostnames from raw bytes.
///
/// Matches runs of 1 to 8 labels (1 to 63 characters of letters, digits and
/// hyphen) joined by a period or an obfuscated period (`[.]`, `[x]` with any
/// single byte inside the brackets, a comma, `.]`, or a space before the
/// period), ending in a final alphanumeric label of 1 to 16 characters.
/// Matching is ASCII case-insensitive.
///
/// Cleanup replaces commas with periods, lowercases, and strips every byte
/// outside `[a-z0-9-.]`. The byte that bounded the final label is part of the
/// match, so a name written with a trailing period (or comma) keeps a trailing
/// period after cleanup and is resolved in that form.
pub fn extract_names(text: &[u8]) -> HashSet<String> {
    // Separator alternatives, in match order: `.`  `[<any byte>]`  `,`
    // `[.]`  `.]`  ` .`
    static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
        compile_extraction_regex(
            r"(?i-u)((?:[a-z0-9-]{1,63}(?:[.]|\[.\]|,|\[[.]\]|[.]\]| [.])){1,8}[a-z0-9]{1,16}(?:$|[^a-z0-9]))[.]?",
            "NAME_PATTERN",
        )
    });
    let mut names = HashSet::new();
    for cap in NAME_PATTERN.captures_iter(text) {
        if let Some(m) = cap.get(1) {
            names.insert(clean_name(m.as_bytes()));
        }
    }
    names
}

/// Extracts candidate IPv4 addresses from raw bytes.
///
/// Matches four runs of 1 to 3 digits joined by a period or a bracketed
/// period (`[.]` or `[]`, with optional surrounding whitespace), bounded on
/// both sides by a non-digit byte or the input boundary. Cleanup strips every
/// byte outside `[0-9.]`.
///
/// Octets are not range-checked, so `999.1.2.3` comes through as written, and
/// the bracket form without an inner period collapses to a bare digit run
/// (`10[]0[]0[]1` cleans to `10001`). Enrichment treats such strings as
/// unannounced.
pub fn extract_ips(text: &[u8]) -> HashSet<String> {
    static IP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
        compile_extraction_regex(
            r"(?-u)(?:[^0-9]|^)([0-9]{1,3}(?:\.|\s*\[\.?\]\s*)[0-9]{1,3}(?:\.|\s*\[\.?\]\s*)[0-9]{1,3}(?:\.|\s*\[\.?\]\s*)[0-9]{1,3})(?:[^0-9]|$)",
            "IP_PATTERN",
        )
    });
    let mut ips = HashSet::new();
    for cap in IP_PATTERN.captures_iter(text) {
        if let Some(m) = cap.get(1) {
            ips.insert(clean_ip(m.as_bytes()));
        }
    }
    ips
}

/// Normalizes a raw name match: commas become periods, ASCII letters are
/// lowercased, and everything outside `[a-z0-9-.]` is dropped. The result is
/// always pure ASCII.
fn clean_name(raw: &[u8]) -> String {
    raw.iter()
        .map(|&b| if b == b',' { b'.' } else { b.to_ascii_lowercase() })
        .filter(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.'))
        .map(char::from)
        .collect()
}

/// Normalizes a raw address match by dropping everything outside `[0-9.]`.
fn clean_ip(raw: &[u8]) -> String {
    raw.iter()
        .copied()
        .filter(|b| matches!(b, b'0'..=b'9' | b'.'))
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(text: &[u8]) -> HashSet<String> {
        extract_names(text)
    }

    fn ips(text: &[u8]) -> HashSet<String> {
        extract_ips(text)
    }

    #[test]
    fn test_extracts_plain_name() {
        let found = names(b"connect to example.com for details");
        assert!(found.contains("example.com"), "found: {:?}", found);
    }

    #[test]
    fn test_obfuscated_names_clean_to_same_string() {
        for text in [
            b"example.com ".as_slice(),
            b"example[.]com ",
            b"example,com ",
            b"example .com ",
            b"example.]com ",
        ] {
            let found = names(text);
            assert!(
                found.contains("example.com"),
                "input {:?} gave {:?}",
                String::from_utf8_lossy(text),
                found
            );
        }
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let found = names(b"EXAMPLE[.]COM");
        assert!(found.contains("example.com"), "found: {:?}", found);
    }

    #[test]
    fn test_multi_label_and_hyphenated_names() {
        let found = names(b"beacon at my-host.cdn.example.net today");
        assert!(found.contains("my-host.cdn.example.net"), "found: {:?}", found);
    }

    #[test]
    fn test_bracket_separator_accepts_any_inner_byte() {
        // `[x]` is a valid separator; the inner byte survives cleanup when it
        // is alphanumeric.
        let found = names(b"example[x]com ");
        assert!(found.contains("examplexcom"), "found: {:?}", found);
    }

    #[test]
    fn test_trailing_period_is_kept() {
        let found = names(b"see example.com. for info");
        assert!(found.contains("example.com."), "found: {:?}", found);
    }

    #[test]
    fn test_comma_boundary_becomes_trailing_period() {
        // The bounding byte is part of the match and cleanup maps commas to
        // periods, so a comma after the name leaves a trailing period.
        let found = names(b"ping example.com, thanks");
        assert!(found.contains("example.com."), "found: {:?}", found);
    }

    #[test]
    fn test_duplicate_names_deduplicate() {
        let found = names(b"example.com example[.]com EXAMPLE,COM ");
        assert_eq!(found.len(), 1, "found: {:?}", found);
    }

    #[test]
    fn test_names_survive_arbitrary_bytes() {
        let found = names(b"\xff\xfe noise evil.example\x80 more \x00 noise");
        assert!(found.contains("evil.example"), "found: {:?}", found);
    }

    #[test]
    fn test_empty_input_yields_no_names() {
        assert!(names(b"").is_empty());
    }

    #[test]
    fn test_extracts_plain_ip() {
        let found = ips(b"the host at 10.0.0.1 answered");
        assert!(found.contains("10.0.0.1"), "found: {:?}", found);
    }

    #[test]
    fn test_obfuscated_ips_clean_to_same_string() {
        for text in [
            b"x 10.0.0.1 x".as_slice(),
            b"x 10[.]0[.]0[.]1 x",
            b"x 10 [.] 0 [.] 0 [.] 1 x",
        ] {
            let found = ips(text);
            assert!(
                found.contains("10.0.0.1"),
                "input {:?} gave {:?}",
                String::from_utf8_lossy(text),
                found
            );
        }
    }

    #[test]
    fn test_ip_at_input_boundaries() {
        assert!(ips(b"10.0.0.1").contains("10.0.0.1"));
        assert!(ips(b"10.0.0.1 tail").contains("10.0.0.1"));
        assert!(ips(b"head 10.0.0.1").contains("10.0.0.1"));
    }

    #[test]
    fn test_out_of_range_octets_are_kept() {
        let found = ips(b"weird 999.123.4.5 address");
        assert!(found.contains("999.123.4.5"), "found: {:?}", found);
    }

    #[test]
    fn test_empty_brackets_collapse_to_digit_run() {
        let found = ips(b"x 10[]0[]0[]1 x");
        assert!(found.contains("10001"), "found: {:?}", found);
    }

    #[test]
    fn test_adjacent_ips_only_first_matches() {
        // The first match consumes the separating byte as its right bound, so
        // the second address has no left bound left to match against.
        let found = ips(b"1.2.3.4 5.6.7.8");
        assert!(found.contains("1.2.3.4"), "found: {:?}", found);
        assert_eq!(found.len(), 1, "found: {:?}", found);
    }

    #[test]
    fn test_short_version_strings_do_not_match() {
        assert!(ips(b"release 1.2.3 is out").is_empty());
    }

    #[test]
    fn test_ips_survive_arbitrary_bytes() {
        let found = ips(b"\x80 10.0.0.1\xff");
        assert!(found.contains("10.0.0.1"), "found: {:?}", found);
    }

    #[test]
    fn test_empty_input_yields_no_ips() {
        assert!(ips(b"").is_empty());
    }
}
