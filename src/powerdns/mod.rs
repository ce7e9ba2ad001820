//! PowerDNS HTTP API access, used for DNSSEC rectification after record
//! mutations. Record and comment rows themselves go through the SQL store.

pub mod client;

use async_trait::async_trait;

use crate::error::Result;

pub use client::PowerDnsClient;

/// The rectify trigger seam, mockable in tests.
#[async_trait]
pub trait DnssecApi: Send + Sync {
    /// Ask the server to rectify the zone (re-order and re-sign).
    async fn rectify_zone(&self, zone_name: &str) -> Result<()>;
}
