//! Record mutation orchestration: validate, persist, audit, rectify, sync.
//!
//! Only the persist step decides the outcome. Audit, DNSSEC rectify and
//! comment synchronization are best-effort and never roll back or mask a
//! record write that already succeeded.

use tracing::{error, info, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::model::{NewRecord, Record, RecordType, ZoneRef};
use crate::names::restore_zone_suffix;
use crate::powerdns::DnssecApi;
use crate::store::RecordStore;
use crate::sync::RecordCommentSyncService;
use crate::validation::{validator_for, ValidationResult};

pub struct RecordManager<S, D> {
    store: S,
    dnssec: D,
    config: EngineConfig,
    sync: RecordCommentSyncService,
}

impl<S, D> RecordManager<S, D>
where
    S: RecordStore,
    D: DnssecApi,
{
    pub fn new(store: S, dnssec: D, config: EngineConfig) -> Self {
        let sync = RecordCommentSyncService::new(config.comments_sync_enabled);
        Self {
            store,
            dnssec,
            config,
            sync,
        }
    }

    /// Validation entry point for the form layer: the ordered messages are
    /// meant to be redisplayed next to the offending fields.
    pub fn validate_input(
        &self,
        rtype: RecordType,
        name: &str,
        content: &str,
        prio: &str,
        ttl: &str,
    ) -> ValidationResult {
        validator_for(rtype).validate(name, content, prio, ttl, self.config.default_ttl)
    }

    /// Load the zone and refuse writes into secondary (replicated) zones.
    async fn writable_zone(&self, zone_id: i64) -> Result<ZoneRef> {
        let zone = self
            .store
            .zone_by_id(zone_id)
            .await?
            .ok_or(EngineError::ZoneNotFound(zone_id))?;

        if zone.kind.is_read_only() {
            return Err(EngineError::ReadOnlyZone(zone.name));
        }

        Ok(zone)
    }

    async fn rectify_if_enabled(&self, zone: &ZoneRef) {
        if !self.config.dnssec_enabled {
            return;
        }
        if let Err(err) = self.dnssec.rectify_zone(&zone.name).await {
            warn!(zone = %zone.name, %err, "DNSSEC rectify failed after record write");
        }
    }

    /// Create a record, returning `true` iff the row was persisted.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_record(
        &self,
        zone_id: i64,
        name: &str,
        rtype: RecordType,
        content: &str,
        ttl: &str,
        prio: &str,
        comment: &str,
        author: &str,
        client_addr: &str,
    ) -> bool {
        // 1) resolve the zone and qualify the record name
        let zone = match self.writable_zone(zone_id).await {
            Ok(zone) => zone,
            Err(err) => {
                warn!(zone_id, %err, "record write refused");
                return false;
            }
        };
        let fqdn = restore_zone_suffix(name, &zone.name);

        let validated = match self.validate_input(rtype, &fqdn, content, prio, ttl) {
            Ok(v) => v,
            Err(errors) => {
                info!(zone = %zone.name, name = %fqdn, %rtype, %errors, "record rejected");
                return false;
            }
        };

        // 2) persist; this is the only step that decides the outcome
        let new = NewRecord {
            zone_id,
            name: validated.name.clone(),
            rtype,
            content: validated.content.clone(),
            ttl: validated.ttl,
            prio: validated.prio,
        };
        let record_id = match self.store.insert_record(&new).await {
            Ok(id) => id,
            Err(err) => {
                error!(zone = %zone.name, name = %new.name, %err, "record insert failed");
                return false;
            }
        };

        // 3) audit trail
        info!(
            zone = %zone.name,
            record_id,
            name = %new.name,
            %rtype,
            content = %new.content,
            author,
            client = client_addr,
            "record created"
        );

        // 4) DNSSEC rectify, best-effort
        self.rectify_if_enabled(&zone).await;

        // 5) comment synchronization, best-effort
        if let Err(err) = self
            .sync
            .sync_on_create(
                &self.store,
                zone_id,
                &new.name,
                rtype,
                &new.content,
                comment,
                author,
            )
            .await
        {
            warn!(zone = %zone.name, name = %new.name, %err, "comment sync failed");
        }

        true
    }

    /// Edit an existing record, returning `true` iff the row was rewritten.
    /// `record` is the stored state before the edit.
    #[allow(clippy::too_many_arguments)]
    pub async fn edit_record(
        &self,
        record: &Record,
        name: &str,
        content: &str,
        ttl: &str,
        prio: &str,
        comment: &str,
        author: &str,
        client_addr: &str,
    ) -> bool {
        let zone = match self.writable_zone(record.zone_id).await {
            Ok(zone) => zone,
            Err(err) => {
                warn!(zone_id = record.zone_id, %err, "record write refused");
                return false;
            }
        };
        let fqdn = restore_zone_suffix(name, &zone.name);

        let validated = match self.validate_input(record.rtype, &fqdn, content, prio, ttl) {
            Ok(v) => v,
            Err(errors) => {
                info!(zone = %zone.name, name = %fqdn, rtype = %record.rtype, %errors, "record edit rejected");
                return false;
            }
        };

        let updated = Record {
            id: record.id,
            zone_id: record.zone_id,
            name: validated.name.clone(),
            rtype: record.rtype,
            content: validated.content.clone(),
            ttl: validated.ttl,
            prio: validated.prio,
            disabled: record.disabled,
        };
        if let Err(err) = self.store.update_record(&updated).await {
            error!(zone = %zone.name, record_id = record.id, %err, "record update failed");
            return false;
        }

        info!(
            zone = %zone.name,
            record_id = record.id,
            name = %updated.name,
            rtype = %updated.rtype,
            content = %updated.content,
            author,
            client = client_addr,
            "record updated"
        );

        self.rectify_if_enabled(&zone).await;

        if let Err(err) = self
            .sync
            .sync_on_update(
                &self.store,
                record.zone_id,
                &record.name,
                &record.content,
                &updated.name,
                updated.rtype,
                &updated.content,
                comment,
                author,
            )
            .await
        {
            warn!(zone = %zone.name, name = %updated.name, %err, "comment sync failed");
        }

        true
    }

    /// Delete a record and its comments, returning `true` iff the row was
    /// removed.
    pub async fn delete_record(&self, record: &Record, author: &str, client_addr: &str) -> bool {
        let zone = match self.writable_zone(record.zone_id).await {
            Ok(zone) => zone,
            Err(err) => {
                warn!(zone_id = record.zone_id, %err, "record write refused");
                return false;
            }
        };

        if let Err(err) = self.store.delete_record(record.id).await {
            error!(zone = %zone.name, record_id = record.id, %err, "record delete failed");
            return false;
        }

        if let Err(err) = self
            .store
            .delete_comments(record.zone_id, &record.name, record.rtype)
            .await
        {
            warn!(zone = %zone.name, name = %record.name, %err, "comment cleanup failed");
        }

        info!(
            zone = %zone.name,
            record_id = record.id,
            name = %record.name,
            rtype = %record.rtype,
            author,
            client = client_addr,
            "record deleted"
        );

        self.rectify_if_enabled(&zone).await;

        true
    }
}
