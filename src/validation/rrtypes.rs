//! The validator set: one implementation per resource-record type, plus
//! shared generic validators for the simple host/address shapes.

use std::net::{Ipv4Addr, Ipv6Addr};

use lazy_static::lazy_static;
use regex::Regex;

use super::host::{check_hostname, parse_priority, parse_ranged_field, parse_ttl, MAX_NAME_LEN};
use super::{RecordValidator, ValidatedRecord, ValidationErrors, ValidationResult};
use crate::names::is_reverse_zone;

lazy_static! {
    /// SRV owner names: `_service._proto.` then at least one domain label.
    static ref SRV_NAME_RE: Regex =
        Regex::new(r"(?i)^_[a-z0-9-]+\._[a-z0-9-]+\.[a-z0-9-]+(\.[a-z0-9-]+)*\.?$").unwrap();
}

enum AddrFamily {
    V4,
    V6,
}

/// Validator for the address types (A, AAAA).
pub struct AddressValidator {
    family: AddrFamily,
}

impl AddressValidator {
    pub const fn v4() -> Self {
        Self {
            family: AddrFamily::V4,
        }
    }

    pub const fn v6() -> Self {
        Self {
            family: AddrFamily::V6,
        }
    }
}

impl RecordValidator for AddressValidator {
    fn validate(
        &self,
        name: &str,
        content: &str,
        prio: &str,
        ttl: &str,
        default_ttl: u32,
    ) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if let Err(e) = check_hostname(name, true) {
            errors.push(e);
        }
        match self.family {
            AddrFamily::V4 => {
                if content.trim().parse::<Ipv4Addr>().is_err() {
                    errors.push(format!("invalid IPv4 address: {content}"));
                }
            }
            AddrFamily::V6 => {
                if content.trim().parse::<Ipv6Addr>().is_err() {
                    errors.push(format!("invalid IPv6 address: {content}"));
                }
            }
        }
        let prio = unwrap_or_push(parse_priority(prio, 0), &mut errors);
        let ttl = unwrap_or_push(parse_ttl(ttl, default_ttl), &mut errors);

        finish(name, content, ttl, prio, errors)
    }
}

/// Shared validator for types whose content is a single hostname
/// (CNAME, NS, MX). MX carries the mail-exchange priority default.
pub struct HostnameValidator {
    default_prio: u16,
}

impl HostnameValidator {
    pub const fn new() -> Self {
        Self { default_prio: 0 }
    }

    pub const fn mail_exchange() -> Self {
        Self { default_prio: 10 }
    }
}

impl RecordValidator for HostnameValidator {
    fn validate(
        &self,
        name: &str,
        content: &str,
        prio: &str,
        ttl: &str,
        default_ttl: u32,
    ) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if let Err(e) = check_hostname(name, true) {
            errors.push(e);
        }
        if let Err(e) = check_hostname(content, false) {
            errors.push(format!("invalid target hostname: {e}"));
        }
        let prio = unwrap_or_push(parse_priority(prio, self.default_prio), &mut errors);
        let ttl = unwrap_or_push(parse_ttl(ttl, default_ttl), &mut errors);

        finish(name, content, ttl, prio, errors)
    }
}

/// PTR records live under reverse zones, so the owner name may be an
/// `in-addr.arpa` / `ip6.arpa` name instead of a plain hostname.
pub struct PtrValidator;

impl RecordValidator for PtrValidator {
    fn validate(
        &self,
        name: &str,
        content: &str,
        prio: &str,
        ttl: &str,
        default_ttl: u32,
    ) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if !is_reverse_zone(name) {
            if let Err(e) = check_hostname(name, true) {
                errors.push(e);
            }
        }
        if let Err(e) = check_hostname(content, false) {
            errors.push(format!("invalid PTR target: {e}"));
        }
        let prio = unwrap_or_push(parse_priority(prio, 0), &mut errors);
        let ttl = unwrap_or_push(parse_ttl(ttl, default_ttl), &mut errors);

        finish(name, content, ttl, prio, errors)
    }
}

/// SRV: owner name `_service._proto.domain`, content exactly
/// `<weight> <port> <target>`.
pub struct SrvValidator;

impl RecordValidator for SrvValidator {
    fn validate(
        &self,
        name: &str,
        content: &str,
        prio: &str,
        ttl: &str,
        default_ttl: u32,
    ) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if name.len() > MAX_NAME_LEN {
            errors.push(format!("SRV name exceeds {MAX_NAME_LEN} characters"));
        } else if !SRV_NAME_RE.is_match(name) {
            errors.push(format!(
                "SRV name must be of the form _service._protocol.domain, got: {name}"
            ));
        }

        let fields: Vec<&str> = content.split_whitespace().collect();
        if fields.len() != 3 {
            errors.push(format!(
                "SRV content must be exactly three fields <weight> <port> <target>, got {} field(s)",
                fields.len()
            ));
        } else {
            if let Err(e) = parse_ranged_field("SRV weight", fields[0], 65535) {
                errors.push(e);
            }
            if let Err(e) = parse_ranged_field("SRV port", fields[1], 65535) {
                errors.push(e);
            }
            if fields[2] != "." {
                if let Err(e) = check_hostname(fields[2], false) {
                    errors.push(format!("invalid SRV target: {e}"));
                }
            }
        }

        let prio = unwrap_or_push(parse_priority(prio, 10), &mut errors);
        let ttl = unwrap_or_push(parse_ttl(ttl, default_ttl), &mut errors);

        finish(name, content, ttl, prio, errors)
    }
}

/// TXT and SPF content: free text, but quoting has to be balanced and
/// control characters are refused.
pub struct TxtValidator;

impl RecordValidator for TxtValidator {
    fn validate(
        &self,
        name: &str,
        content: &str,
        prio: &str,
        ttl: &str,
        default_ttl: u32,
    ) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if let Err(e) = check_hostname(name, true) {
            errors.push(e);
        }
        if content.is_empty() {
            errors.push("text content is empty".to_string());
        } else {
            if content.chars().any(|c| c.is_control()) {
                errors.push("text content contains control characters".to_string());
            }
            let starts = content.starts_with('"');
            let ends = content.len() >= 2 && content.ends_with('"');
            if starts != ends {
                errors.push("text content has unbalanced quoting".to_string());
            }
        }
        let prio = unwrap_or_push(parse_priority(prio, 0), &mut errors);
        let ttl = unwrap_or_push(parse_ttl(ttl, default_ttl), &mut errors);

        finish(name, content, ttl, prio, errors)
    }
}

/// SOA: `primary-ns contact serial refresh retry expire minimum`.
pub struct SoaValidator;

impl RecordValidator for SoaValidator {
    fn validate(
        &self,
        name: &str,
        content: &str,
        prio: &str,
        ttl: &str,
        default_ttl: u32,
    ) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if let Err(e) = check_hostname(name, false) {
            errors.push(e);
        }

        let fields: Vec<&str> = content.split_whitespace().collect();
        if fields.len() != 7 {
            errors.push(format!(
                "SOA content must have seven fields, got {} field(s)",
                fields.len()
            ));
        } else {
            if let Err(e) = check_hostname(fields[0], false) {
                errors.push(format!("invalid SOA primary nameserver: {e}"));
            }
            if let Err(e) = check_hostname(fields[1], false) {
                errors.push(format!("invalid SOA contact: {e}"));
            }
            for (label, raw) in ["serial", "refresh", "retry", "expire", "minimum"]
                .iter()
                .zip(&fields[2..])
            {
                if let Err(e) = parse_ranged_field(&format!("SOA {label}"), raw, u32::MAX as i64) {
                    errors.push(e);
                }
            }
        }

        let prio = unwrap_or_push(parse_priority(prio, 0), &mut errors);
        let ttl = unwrap_or_push(parse_ttl(ttl, default_ttl), &mut errors);

        finish(name, content, ttl, prio, errors)
    }
}

/// CAA: `<flags> <tag> <value>` with flags in 0..=255 and a known tag.
pub struct CaaValidator;

impl RecordValidator for CaaValidator {
    fn validate(
        &self,
        name: &str,
        content: &str,
        prio: &str,
        ttl: &str,
        default_ttl: u32,
    ) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if let Err(e) = check_hostname(name, false) {
            errors.push(e);
        }

        let fields: Vec<&str> = content.split_whitespace().collect();
        if fields.len() < 3 {
            errors.push(format!(
                "CAA content must have three fields <flags> <tag> <value>, got {} field(s)",
                fields.len()
            ));
        } else {
            if let Err(e) = parse_ranged_field("CAA flags", fields[0], 255) {
                errors.push(e);
            }
            let tag = fields[1].to_ascii_lowercase();
            if !matches!(tag.as_str(), "issue" | "issuewild" | "iodef") {
                errors.push(format!("unknown CAA tag: {}", fields[1]));
            }
        }

        let prio = unwrap_or_push(parse_priority(prio, 0), &mut errors);
        let ttl = unwrap_or_push(parse_ttl(ttl, default_ttl), &mut errors);

        finish(name, content, ttl, prio, errors)
    }
}

fn unwrap_or_push<T: Default>(res: Result<T, String>, errors: &mut ValidationErrors) -> T {
    match res {
        Ok(v) => v,
        Err(e) => {
            errors.push(e);
            T::default()
        }
    }
}

fn finish(
    name: &str,
    content: &str,
    ttl: u32,
    prio: u16,
    errors: ValidationErrors,
) -> ValidationResult {
    if errors.is_empty() {
        Ok(ValidatedRecord {
            name: name.to_string(),
            content: content.to_string(),
            ttl,
            prio,
        })
    } else {
        Err(errors)
    }
}
