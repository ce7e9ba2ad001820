//! Keeps the free-text comment on a forward record (A/AAAA) and on its
//! reverse (PTR) counterpart in step, across zone boundaries.
//!
//! The two comment writes are deliberately separate store calls; a crash
//! between them leaves one side unsynchronized until the next edit, which
//! heals it through the rename-upsert path.

use std::net::{Ipv4Addr, Ipv6Addr};

use tracing::{debug, warn};

use crate::error::Result;
use crate::model::{Comment, RecordType};
use crate::names::{ptr_name_v4, ptr_name_v6, registered_domain};
use crate::store::RecordStore;

pub struct RecordCommentSyncService {
    enabled: bool,
}

impl RecordCommentSyncService {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Reverse-lookup name for the address in an A/AAAA record's content.
    /// Content has been validated upstream, so a parse miss just means no
    /// pairing is possible.
    fn ptr_name_for(rtype: RecordType, content: &str) -> Option<String> {
        match rtype {
            RecordType::A => content.trim().parse::<Ipv4Addr>().ok().map(ptr_name_v4),
            RecordType::Aaaa => content.trim().parse::<Ipv6Addr>().ok().map(ptr_name_v6),
            _ => None,
        }
    }

    /// Attach comments after a record was created.
    pub async fn sync_on_create<S: RecordStore + ?Sized>(
        &self,
        store: &S,
        zone_id: i64,
        name: &str,
        rtype: RecordType,
        content: &str,
        text: &str,
        author: &str,
    ) -> Result<()> {
        if text.trim().is_empty() {
            return Ok(());
        }

        let forward = Comment {
            zone_id,
            name: name.to_string(),
            rtype,
            text: text.to_string(),
            author: author.to_string(),
        };

        if !self.enabled {
            return store.upsert_comment(&forward).await;
        }

        match rtype {
            RecordType::A | RecordType::Aaaa => {
                let Some(ptr_name) = Self::ptr_name_for(rtype, content) else {
                    warn!(%content, "address record content did not parse, skipping PTR comment");
                    return store.upsert_comment(&forward).await;
                };

                store.upsert_comment(&forward).await?;
                match store.find_zone_for_name(&ptr_name).await? {
                    Some(reverse_zone) => {
                        store
                            .upsert_comment(&Comment {
                                zone_id: reverse_zone.id,
                                name: ptr_name,
                                rtype: RecordType::Ptr,
                                text: text.to_string(),
                                author: author.to_string(),
                            })
                            .await?;
                    }
                    None => {
                        debug!(%ptr_name, "no reverse zone hosts the PTR name, forward comment only");
                    }
                }
            }
            RecordType::Ptr => {
                store.upsert_comment(&forward).await?;

                let target = content.strip_suffix('.').unwrap_or(content);
                let Ok(domain) = registered_domain(target) else {
                    debug!(%target, "PTR target has no registered domain, PTR comment only");
                    return Ok(());
                };
                match store.find_zone_by_name(&domain).await? {
                    Some(forward_zone) => {
                        store
                            .upsert_comment(&Comment {
                                zone_id: forward_zone.id,
                                name: target.to_string(),
                                rtype: RecordType::A,
                                text: text.to_string(),
                                author: author.to_string(),
                            })
                            .await?;
                    }
                    None => {
                        debug!(%domain, "forward zone not found, PTR comment only");
                    }
                }
            }
            _ => {
                store.upsert_comment(&forward).await?;
            }
        }

        Ok(())
    }

    /// Rewrite comments after a record edit, following the record's rename
    /// on both sides of the pairing.
    #[allow(clippy::too_many_arguments)]
    pub async fn sync_on_update<S: RecordStore + ?Sized>(
        &self,
        store: &S,
        zone_id: i64,
        old_name: &str,
        old_content: &str,
        name: &str,
        rtype: RecordType,
        content: &str,
        text: &str,
        author: &str,
    ) -> Result<()> {
        if text.trim().is_empty() {
            return Ok(());
        }

        store
            .rename_comment(zone_id, old_name, rtype, name, text, author)
            .await?;

        if !self.enabled {
            return Ok(());
        }

        match rtype {
            RecordType::A | RecordType::Aaaa => {
                let old_ptr = Self::ptr_name_for(rtype, old_content);
                let Some(new_ptr) = Self::ptr_name_for(rtype, content) else {
                    return Ok(());
                };

                match store.find_zone_for_name(&new_ptr).await? {
                    Some(reverse_zone) => {
                        let old_ptr = old_ptr.unwrap_or_else(|| new_ptr.clone());
                        store
                            .rename_comment(
                                reverse_zone.id,
                                &old_ptr,
                                RecordType::Ptr,
                                &new_ptr,
                                text,
                                author,
                            )
                            .await?;
                    }
                    None => {
                        debug!(ptr_name = %new_ptr, "no reverse zone for edited address record");
                    }
                }
            }
            RecordType::Ptr => {
                let old_target = old_content.strip_suffix('.').unwrap_or(old_content);
                let target = content.strip_suffix('.').unwrap_or(content);
                let Ok(domain) = registered_domain(target) else {
                    return Ok(());
                };
                match store.find_zone_by_name(&domain).await? {
                    Some(forward_zone) => {
                        store
                            .rename_comment(
                                forward_zone.id,
                                old_target,
                                RecordType::A,
                                target,
                                text,
                                author,
                            )
                            .await?;
                    }
                    None => {
                        debug!(%domain, "no forward zone for edited PTR record");
                    }
                }
            }
            _ => {}
        }

        Ok(())
    }
}
