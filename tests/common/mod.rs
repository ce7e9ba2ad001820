//! In-memory test doubles for the store and DNSSEC collaborators.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use kaede::error::{EngineError, Result};
use kaede::model::{Comment, NewRecord, Record, RecordType, ZoneRef};
use kaede::powerdns::DnssecApi;
use kaede::store::RecordStore;

/// Install a subscriber so failing tests show the engine's own logs.
pub fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}

/// A `RecordStore` over plain vectors, with a switch to make inserts fail.
#[derive(Clone, Default)]
pub struct MemoryStore {
    zones: Arc<Mutex<Vec<ZoneRef>>>,
    records: Arc<Mutex<Vec<Record>>>,
    comments: Arc<Mutex<Vec<Comment>>>,
    fail_inserts: Arc<AtomicBool>,
    next_id: Arc<AtomicI64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_zone(&self, zone: ZoneRef) {
        self.zones.lock().unwrap().push(zone);
    }

    pub fn fail_inserts(&self) {
        self.fail_inserts.store(true, Ordering::SeqCst);
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }

    pub fn comments(&self) -> Vec<Comment> {
        self.comments.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert_record(&self, record: &NewRecord) -> Result<i64> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(EngineError::Store(sqlx::Error::RowNotFound));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.records.lock().unwrap().push(Record {
            id,
            zone_id: record.zone_id,
            name: record.name.clone(),
            rtype: record.rtype,
            content: record.content.clone(),
            ttl: record.ttl,
            prio: record.prio,
            disabled: false,
        });
        Ok(id)
    }

    async fn update_record(&self, record: &Record) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        if let Some(stored) = records.iter_mut().find(|r| r.id == record.id) {
            *stored = record.clone();
        }
        Ok(())
    }

    async fn delete_record(&self, record_id: i64) -> Result<()> {
        self.records.lock().unwrap().retain(|r| r.id != record_id);
        Ok(())
    }

    async fn zone_by_id(&self, zone_id: i64) -> Result<Option<ZoneRef>> {
        Ok(self
            .zones
            .lock()
            .unwrap()
            .iter()
            .find(|z| z.id == zone_id)
            .cloned())
    }

    async fn find_zone_for_name(&self, fqdn: &str) -> Result<Option<ZoneRef>> {
        let name = fqdn.strip_suffix('.').unwrap_or(fqdn).to_ascii_lowercase();
        Ok(self
            .zones
            .lock()
            .unwrap()
            .iter()
            .filter(|z| {
                let zone = z.name.to_ascii_lowercase();
                name == zone || name.ends_with(&format!(".{zone}"))
            })
            .max_by_key(|z| z.name.len())
            .cloned())
    }

    async fn find_zone_by_name(&self, name: &str) -> Result<Option<ZoneRef>> {
        let name = name.strip_suffix('.').unwrap_or(name).to_ascii_lowercase();
        Ok(self
            .zones
            .lock()
            .unwrap()
            .iter()
            .find(|z| z.name.to_ascii_lowercase() == name)
            .cloned())
    }

    async fn upsert_comment(&self, comment: &Comment) -> Result<()> {
        let mut comments = self.comments.lock().unwrap();
        if let Some(stored) = comments
            .iter_mut()
            .find(|c| c.zone_id == comment.zone_id && c.name == comment.name && c.rtype == comment.rtype)
        {
            *stored = comment.clone();
        } else {
            comments.push(comment.clone());
        }
        Ok(())
    }

    async fn rename_comment(
        &self,
        zone_id: i64,
        old_name: &str,
        rtype: RecordType,
        new_name: &str,
        text: &str,
        author: &str,
    ) -> Result<()> {
        let mut comments = self.comments.lock().unwrap();
        if let Some(stored) = comments
            .iter_mut()
            .find(|c| c.zone_id == zone_id && c.name == old_name && c.rtype == rtype)
        {
            stored.name = new_name.to_string();
            stored.text = text.to_string();
            stored.author = author.to_string();
        } else {
            comments.push(Comment {
                zone_id,
                name: new_name.to_string(),
                rtype,
                text: text.to_string(),
                author: author.to_string(),
            });
        }
        Ok(())
    }

    async fn delete_comments(&self, zone_id: i64, name: &str, rtype: RecordType) -> Result<()> {
        self.comments
            .lock()
            .unwrap()
            .retain(|c| !(c.zone_id == zone_id && c.name == name && c.rtype == rtype));
        Ok(())
    }
}

/// Records rectify calls instead of talking to a server.
#[derive(Clone, Default)]
pub struct MockDnssec {
    calls: Arc<Mutex<Vec<String>>>,
    fail: Arc<AtomicBool>,
}

impl MockDnssec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_rectify(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn rectified_zones(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnssecApi for MockDnssec {
    async fn rectify_zone(&self, zone_name: &str) -> Result<()> {
        self.calls.lock().unwrap().push(zone_name.to_string());
        if self.fail.load(Ordering::SeqCst) {
            return Err(EngineError::powerdns(anyhow::anyhow!("rectify refused")));
        }
        Ok(())
    }
}
