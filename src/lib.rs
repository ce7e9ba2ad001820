//! Record validation and forward/reverse synchronization engine for a
//! PowerDNS-backed zone management frontend.
//!
//! The web layer (routing, rendering, auth) lives in the hosting
//! application; this crate owns the per-type record grammar, the
//! zone-relative name math, and the comment synchronization that keeps
//! A/AAAA records and their PTR counterparts annotated in step.

pub mod config;
pub mod error;
pub mod manager;
pub mod model;
pub mod names;
pub mod powerdns;
pub mod store;
pub mod sync;
pub mod validation;

pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use manager::RecordManager;
pub use model::{Comment, NewRecord, Record, RecordType, ZoneKind, ZoneRef};
pub use store::{RecordStore, SqlRecordStore};
pub use sync::RecordCommentSyncService;
pub use validation::{validator_for, ValidatedRecord, ValidationErrors, ValidationResult};
