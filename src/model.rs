//! Record, zone and comment shapes shared across the engine.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Resource-record types this engine knows how to validate.
///
/// The enum is closed on purpose: an unknown type token fails at
/// `RecordType::from_str` instead of falling through to a permissive
/// default validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Caa,
    Cname,
    Mx,
    Ns,
    Ptr,
    Soa,
    Spf,
    Srv,
    Txt,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Caa => "CAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Ptr => "PTR",
            Self::Soa => "SOA",
            Self::Spf => "SPF",
            Self::Srv => "SRV",
            Self::Txt => "TXT",
        }
    }
}

impl std::str::FromStr for RecordType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "CAA" => Ok(Self::Caa),
            "CNAME" => Ok(Self::Cname),
            "MX" => Ok(Self::Mx),
            "NS" => Ok(Self::Ns),
            "PTR" => Ok(Self::Ptr),
            "SOA" => Ok(Self::Soa),
            "SPF" => Ok(Self::Spf),
            "SRV" => Ok(Self::Srv),
            "TXT" => Ok(Self::Txt),
            other => Err(EngineError::unsupported_type(other)),
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored resource record, as read from the `records` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub zone_id: i64,
    /// Fully qualified, no trailing dot (PowerDNS schema convention).
    pub name: String,
    #[serde(rename = "type")]
    pub rtype: RecordType,
    pub content: String,
    pub ttl: u32,
    pub prio: u16,
    #[serde(default)]
    pub disabled: bool,
}

/// Fields for a record about to be inserted.
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub zone_id: i64,
    pub name: String,
    pub rtype: RecordType,
    pub content: String,
    pub ttl: u32,
    pub prio: u16,
}

/// How a zone is replicated. Secondary zones are read-only to this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneKind {
    Primary,
    Secondary,
    Native,
}

impl ZoneKind {
    /// Parse the `domains.type` column ("MASTER", "SLAVE", "NATIVE").
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MASTER" | "PRIMARY" => Some(Self::Primary),
            "SLAVE" | "SECONDARY" => Some(Self::Secondary),
            "NATIVE" => Some(Self::Native),
            _ => None,
        }
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::Secondary)
    }
}

/// What zone lookups return: enough identity to address records and
/// comments without loading the whole zone.
#[derive(Debug, Clone)]
pub struct ZoneRef {
    pub id: i64,
    /// Fully qualified, no trailing dot.
    pub name: String,
    pub kind: ZoneKind,
}

/// A free-text annotation on a `(zone, name, type)` tuple.
///
/// The store keeps at most one per tuple; synchronization overwrites,
/// never duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub zone_id: i64,
    pub name: String,
    pub rtype: RecordType,
    pub text: String,
    pub author: String,
}
