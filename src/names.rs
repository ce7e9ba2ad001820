//! Zone-relative domain-name math: reverse-zone detection, registered-domain
//! extraction, and zone suffix stripping/restoring.
//!
//! All functions are pure and tolerate a single optional trailing dot on
//! their inputs. Comparisons against zone names are case-insensitive;
//! original casing of the record name is preserved wherever possible.

use std::net::{Ipv4Addr, Ipv6Addr};

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Reverse zones under in-addr.arpa / ip6.arpa. A label may carry a
    /// `/<prefix>` CIDR marker, the PowerDNS convention for classless
    /// delegation (e.g. `160/27.236.20.172.in-addr.arpa`).
    static ref REVERSE_ZONE_RE: Regex =
        Regex::new(r"(?i)^([a-z0-9/-]+\.)+(in-addr|ip6)\.arpa\.?$").unwrap();
}

/// Second-level country-code suffixes under which the registered domain
/// keeps three labels instead of two. A simplified fixed set, not a
/// public-suffix list.
const SECOND_LEVEL_CC: &[&str] = &[
    "ac.uk", "co.uk", "gov.uk", "ltd.uk", "me.uk", "net.uk", "org.uk", "plc.uk", "sch.uk",
    "com.au", "net.au", "org.au", "edu.au", "gov.au", "asn.au", "id.au",
    "ac.jp", "co.jp", "go.jp", "ne.jp", "or.jp",
    "ac.nz", "co.nz", "net.nz", "org.nz",
    "co.za", "net.za", "org.za", "web.za",
    "com.br", "net.br", "org.br",
    "com.mx", "com.ar", "com.sg", "com.tr", "com.tw", "co.kr", "co.in", "co.il",
];

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum NameError {
    #[error("domain name is empty")]
    Empty,
    #[error("domain name has too few labels to carry a registered domain")]
    NotEnoughLabels,
}

/// Whether `name` is a reverse zone (`*.in-addr.arpa` / `*.ip6.arpa`).
///
/// The bare suffixes alone do not qualify, and any leading or trailing
/// whitespace disqualifies the name outright.
pub fn is_reverse_zone(name: &str) -> bool {
    REVERSE_ZONE_RE.is_match(name)
}

fn trim_root(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

fn is_second_level_cc(last_two: &str) -> bool {
    let lowered = last_two.to_ascii_lowercase();
    SECOND_LEVEL_CC.contains(&lowered.as_str())
}

/// Number of labels the registered domain spans: three under a recognized
/// second-level ccTLD suffix, two otherwise.
fn registered_label_count(labels: &[&str]) -> usize {
    if labels.len() >= 3 {
        let last_two = format!("{}.{}", labels[labels.len() - 2], labels[labels.len() - 1]);
        if is_second_level_cc(&last_two) {
            return 3;
        }
    }
    2
}

/// The zone-owning portion of `fqdn`: its last two labels, or three under a
/// recognized second-level ccTLD (`example.co.uk`).
///
/// A single-label name has no registered domain and is rejected.
pub fn registered_domain(fqdn: &str) -> Result<String, NameError> {
    let name = trim_root(fqdn);
    if name.is_empty() {
        return Err(NameError::Empty);
    }

    let labels: Vec<&str> = name.split('.').collect();
    if labels.len() < 2 {
        return Err(NameError::NotEnoughLabels);
    }

    let count = registered_label_count(&labels);
    Ok(labels[labels.len() - count..].join("."))
}

/// Every label before the registered domain, joined by dots.
///
/// Names of two or fewer labels come back unchanged; the bare three-label
/// ccTLD form (`example.co.uk`) yields its first label.
pub fn subdomain_part(fqdn: &str) -> String {
    let name = trim_root(fqdn);
    let labels: Vec<&str> = name.split('.').collect();
    if labels.len() <= 2 {
        return name.to_string();
    }

    let count = registered_label_count(&labels);
    if labels.len() > count {
        labels[..labels.len() - count].join(".")
    } else {
        labels[0].to_string()
    }
}

/// Convert a fully-qualified `name` into its zone-relative form: `@` at the
/// apex, the bare prefix for subdomains, and `name` untouched when it does
/// not belong to `zone` at all.
pub fn strip_zone_suffix(name: &str, zone: &str) -> String {
    let name_n = trim_root(name);
    let zone_n = trim_root(zone);

    if name_n.eq_ignore_ascii_case(zone_n) {
        return "@".to_string();
    }

    let suffix = format!(".{zone_n}");
    if name_n.len() > suffix.len()
        && name_n
            .to_ascii_lowercase()
            .ends_with(&suffix.to_ascii_lowercase())
    {
        return name_n[..name_n.len() - suffix.len()].to_string();
    }

    name.to_string()
}

/// Inverse of [`strip_zone_suffix`]: qualify a zone-relative name with its
/// zone. Empty and `@` map to the apex; an already-qualified name is left
/// alone to prevent double qualification.
pub fn restore_zone_suffix(relative: &str, zone: &str) -> String {
    let rel = trim_root(relative);
    let zone_n = trim_root(zone);

    if rel.is_empty() || rel == "@" {
        return zone_n.to_string();
    }
    if rel.eq_ignore_ascii_case(zone_n) {
        return rel.to_string();
    }

    let suffix = format!(".{zone_n}");
    if rel.len() > suffix.len()
        && rel
            .to_ascii_lowercase()
            .ends_with(&suffix.to_ascii_lowercase())
    {
        return rel.to_string();
    }

    format!("{rel}.{zone_n}")
}

/// Reverse-lookup name for an IPv4 address: `50.2.7.10.in-addr.arpa`.
pub fn ptr_name_v4(ip: Ipv4Addr) -> String {
    let o = ip.octets();
    format!("{}.{}.{}.{}.in-addr.arpa", o[3], o[2], o[1], o[0])
}

/// Reverse-lookup name for an IPv6 address: 32 reversed nibbles under
/// `ip6.arpa`.
pub fn ptr_name_v6(ip: Ipv6Addr) -> String {
    let mut nibbles = Vec::with_capacity(32);
    for byte in ip.octets().iter().rev() {
        nibbles.push(format!("{:x}", byte & 0x0f));
        nibbles.push(format!("{:x}", byte >> 4));
    }
    format!("{}.ip6.arpa", nibbles.join("."))
}
