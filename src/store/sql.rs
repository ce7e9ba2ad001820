//! `RecordStore` over the PowerDNS generic-SQL schema
//! (`domains` / `records` / `comments` tables).

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use super::RecordStore;
use crate::error::Result;
use crate::model::{Comment, NewRecord, Record, RecordType, ZoneKind, ZoneRef};

#[derive(Clone)]
pub struct SqlRecordStore {
    db: SqlitePool,
}

impl SqlRecordStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    async fn select_zone(&self, name_lower: &str) -> Result<Option<ZoneRef>> {
        let row = sqlx::query("SELECT id, name, type FROM domains WHERE LOWER(name) = ?")
            .bind(name_lower)
            .fetch_optional(&self.db)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let kind: String = row.get("type");
        Ok(Some(ZoneRef {
            id: row.get("id"),
            name: row.get("name"),
            kind: ZoneKind::from_str_loose(&kind).unwrap_or(ZoneKind::Native),
        }))
    }
}

#[async_trait]
impl RecordStore for SqlRecordStore {
    async fn insert_record(&self, record: &NewRecord) -> Result<i64> {
        let res = sqlx::query(
            r#"
            INSERT INTO records (domain_id, name, type, content, ttl, prio, disabled)
            VALUES (?, ?, ?, ?, ?, ?, 0)
            "#,
        )
        .bind(record.zone_id)
        .bind(&record.name)
        .bind(record.rtype.as_str())
        .bind(&record.content)
        .bind(record.ttl as i64)
        .bind(record.prio as i64)
        .execute(&self.db)
        .await?;

        Ok(res.last_insert_rowid())
    }

    async fn update_record(&self, record: &Record) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE records
            SET name = ?, type = ?, content = ?, ttl = ?, prio = ?, disabled = ?
            WHERE id = ?
            "#,
        )
        .bind(&record.name)
        .bind(record.rtype.as_str())
        .bind(&record.content)
        .bind(record.ttl as i64)
        .bind(record.prio as i64)
        .bind(if record.disabled { 1 } else { 0 })
        .bind(record.id)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn delete_record(&self, record_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM records WHERE id = ?")
            .bind(record_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    async fn zone_by_id(&self, zone_id: i64) -> Result<Option<ZoneRef>> {
        let row = sqlx::query("SELECT id, name, type FROM domains WHERE id = ?")
            .bind(zone_id)
            .fetch_optional(&self.db)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let kind: String = row.get("type");
        Ok(Some(ZoneRef {
            id: row.get("id"),
            name: row.get("name"),
            kind: ZoneKind::from_str_loose(&kind).unwrap_or(ZoneKind::Native),
        }))
    }

    async fn find_zone_for_name(&self, fqdn: &str) -> Result<Option<ZoneRef>> {
        let name = fqdn.strip_suffix('.').unwrap_or(fqdn).to_ascii_lowercase();

        // Walk candidate suffixes from longest to shortest; the first
        // domains row hit is the best match.
        let mut candidate = name.as_str();
        loop {
            if let Some(zone) = self.select_zone(candidate).await? {
                return Ok(Some(zone));
            }
            match candidate.split_once('.') {
                Some((_, rest)) => candidate = rest,
                None => return Ok(None),
            }
        }
    }

    async fn find_zone_by_name(&self, name: &str) -> Result<Option<ZoneRef>> {
        let name = name.strip_suffix('.').unwrap_or(name).to_ascii_lowercase();
        self.select_zone(&name).await
    }

    async fn upsert_comment(&self, comment: &Comment) -> Result<()> {
        let now = Utc::now().timestamp();

        let existing: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM comments WHERE domain_id = ? AND name = ? AND type = ?")
                .bind(comment.zone_id)
                .bind(&comment.name)
                .bind(comment.rtype.as_str())
                .fetch_optional(&self.db)
                .await?;

        match existing {
            Some((id,)) => {
                sqlx::query(
                    "UPDATE comments SET comment = ?, account = ?, modified_at = ? WHERE id = ?",
                )
                .bind(&comment.text)
                .bind(&comment.author)
                .bind(now)
                .bind(id)
                .execute(&self.db)
                .await?;
            }
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO comments (domain_id, name, type, modified_at, account, comment)
                    VALUES (?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(comment.zone_id)
                .bind(&comment.name)
                .bind(comment.rtype.as_str())
                .bind(now)
                .bind(&comment.author)
                .bind(&comment.text)
                .execute(&self.db)
                .await?;
            }
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
        let now = Utc::now().timestamp();

        let res = sqlx::query(
            r#"
            UPDATE comments
            SET name = ?, comment = ?, account = ?, modified_at = ?
            WHERE domain_id = ? AND name = ? AND type = ?
            "#,
        )
        .bind(new_name)
        .bind(text)
        .bind(author)
        .bind(now)
        .bind(zone_id)
        .bind(old_name)
        .bind(rtype.as_str())
        .execute(&self.db)
        .await?;

        // No old row to rewrite: a previous write may have been cut short
        // inside the unsynchronized window, so heal it.
        if res.rows_affected() == 0 {
            self.upsert_comment(&Comment {
                zone_id,
                name: new_name.to_string(),
                rtype,
                text: text.to_string(),
                author: author.to_string(),
            })
            .await?;
        }

        Ok(())
    }

    async fn delete_comments(&self, zone_id: i64, name: &str, rtype: RecordType) -> Result<()> {
        sqlx::query("DELETE FROM comments WHERE domain_id = ? AND name = ? AND type = ?")
            .bind(zone_id)
            .bind(name)
            .bind(rtype.as_str())
            .execute(&self.db)
            .await?;

        Ok(())
    }
}
