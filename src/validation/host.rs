//! Hostname and numeric-field primitives shared by the per-type validators.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// One hostname label: alphanumerics and inner hyphens.
    static ref LABEL_RE: Regex =
        Regex::new(r"^[a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?$").unwrap();
}

/// Longest name PowerDNS will store.
pub(crate) const MAX_NAME_LEN: usize = 255;

/// Syntax check for a hostname. `allow_wildcard` admits a single leading
/// `*` label, used by record names but never by content targets.
pub(crate) fn check_hostname(name: &str, allow_wildcard: bool) -> Result<(), String> {
    let stripped = name.strip_suffix('.').unwrap_or(name);
    if stripped.is_empty() {
        return Err("hostname is empty".to_string());
    }
    if name.len() > MAX_NAME_LEN {
        return Err(format!(
            "hostname exceeds {MAX_NAME_LEN} characters: {name}"
        ));
    }

    for (i, label) in stripped.split('.').enumerate() {
        if label == "*" && i == 0 && allow_wildcard {
            continue;
        }
        if label.len() > 63 {
            return Err(format!("hostname label too long (max 63): {label}"));
        }
        if !LABEL_RE.is_match(label) {
            return Err(format!("invalid characters in hostname label: {label}"));
        }
    }

    Ok(())
}

/// TTL form field: blank falls back to the zone default, anything else must
/// be a non-negative integer.
pub(crate) fn parse_ttl(raw: &str, default_ttl: u32) -> Result<u32, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(default_ttl);
    }
    raw.parse::<u32>()
        .map_err(|_| format!("TTL must be a non-negative integer, got: {raw}"))
}

/// Priority form field: blank falls back to the type default, anything else
/// must be an integer within the 16-bit range.
pub(crate) fn parse_priority(raw: &str, default_prio: u16) -> Result<u16, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(default_prio);
    }
    let value: i64 = raw
        .parse()
        .map_err(|_| format!("priority must be an integer, got: {raw}"))?;
    if !(0..=65535).contains(&value) {
        return Err(format!("priority must be between 0 and 65535, got: {raw}"));
    }
    Ok(value as u16)
}

/// A named numeric field inside multi-field content (SRV weight/port, CAA
/// flags and the like).
pub(crate) fn parse_ranged_field(field: &str, raw: &str, max: i64) -> Result<i64, String> {
    let value: i64 = raw
        .parse()
        .map_err(|_| format!("{field} must be a number, got: {raw}"))?;
    if !(0..=max).contains(&value) {
        return Err(format!("{field} must be between 0 and {max}, got: {raw}"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hostname_accepts_plain_names() {
        assert!(check_hostname("example.com", false).is_ok());
        assert!(check_hostname("www.example.com.", false).is_ok());
        assert!(check_hostname("a-1.b-2.example.com", false).is_ok());
    }

    #[test]
    fn hostname_wildcard_only_when_allowed() {
        assert!(check_hostname("*.example.com", true).is_ok());
        assert!(check_hostname("*.example.com", false).is_err());
        // wildcard must be the leftmost label
        assert!(check_hostname("www.*.example.com", true).is_err());
    }

    #[test]
    fn hostname_rejects_bad_labels() {
        assert!(check_hostname("", false).is_err());
        assert!(check_hostname("-bad.example.com", false).is_err());
        assert!(check_hostname("bad-.example.com", false).is_err());
        assert!(check_hostname("ba d.example.com", false).is_err());
        assert!(check_hostname("under_score.example.com", false).is_err());
        let long_label = "a".repeat(64);
        assert!(check_hostname(&format!("{long_label}.example.com"), false).is_err());
        let long_name = format!("{}.example.com", "a.".repeat(130));
        assert!(check_hostname(&long_name, false).is_err());
    }

    #[test]
    fn ttl_defaults_and_parses() {
        assert_eq!(parse_ttl("", 86400), Ok(86400));
        assert_eq!(parse_ttl("  ", 86400), Ok(86400));
        assert_eq!(parse_ttl("3600", 86400), Ok(3600));
        assert!(parse_ttl("-1", 86400).is_err());
        assert!(parse_ttl("soon", 86400).is_err());
    }

    #[test]
    fn priority_defaults_and_ranges() {
        assert_eq!(parse_priority("", 10), Ok(10));
        assert_eq!(parse_priority("0", 10), Ok(0));
        assert_eq!(parse_priority("65535", 0), Ok(65535));
        assert!(parse_priority("65536", 0).is_err());
        assert!(parse_priority("-5", 0).is_err());
        assert!(parse_priority("high", 0).is_err());
    }
}
