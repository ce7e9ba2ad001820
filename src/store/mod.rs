//! Persistence contract consumed by the orchestrator and the comment
//! synchronizer.
//!
//! The engine owns all policy (validation, pairing, fallbacks); a store
//! implementation only executes single-shot reads and writes. It must be
//! thread-safe and usable across async tasks. Transaction demarcation is
//! the caller's concern: the engine issues the forward and reverse comment
//! writes as two separate calls.

pub mod sql;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Comment, NewRecord, Record, RecordType, ZoneRef};

pub use sql::SqlRecordStore;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a record row and return its id.
    async fn insert_record(&self, record: &NewRecord) -> Result<i64>;

    /// Rewrite an existing record row in place.
    async fn update_record(&self, record: &Record) -> Result<()>;

    /// Remove a record row.
    async fn delete_record(&self, record_id: i64) -> Result<()>;

    /// Zone identity for an id, if the zone exists.
    async fn zone_by_id(&self, zone_id: i64) -> Result<Option<ZoneRef>>;

    /// The zone that would authoritatively hold `fqdn`: the longest zone
    /// name that is a suffix of it. Case-insensitive.
    async fn find_zone_for_name(&self, fqdn: &str) -> Result<Option<ZoneRef>>;

    /// Exact-name zone lookup, case-insensitive.
    async fn find_zone_by_name(&self, name: &str) -> Result<Option<ZoneRef>>;

    /// Create or overwrite the comment for `(zone, name, type)`.
    async fn upsert_comment(&self, comment: &Comment) -> Result<()>;

    /// Rewrite the comment row addressed by the old name to a new name and
    /// body, creating it when the old row is missing.
    async fn rename_comment(
        &self,
        zone_id: i64,
        old_name: &str,
        rtype: RecordType,
        new_name: &str,
        text: &str,
        author: &str,
    ) -> Result<()>;

    /// Drop every comment for `(zone, name, type)`.
    async fn delete_comments(&self, zone_id: i64, name: &str, rtype: RecordType) -> Result<()>;
}
