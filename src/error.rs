// src/error.rs
use thiserror::Error;

/// Result alias for store and orchestrator operations.
pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unsupported record type: {0}")]
    UnsupportedRecordType(String),

    #[error("zone {0} not found")]
    ZoneNotFound(i64),

    #[error("zone {0} is a secondary zone and read-only")]
    ReadOnlyZone(String),

    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("PowerDNS API error: {0}")]
    PowerDns(#[source] anyhow::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl EngineError {
    pub fn unsupported_type(token: impl Into<String>) -> Self {
        EngineError::UnsupportedRecordType(token.into())
    }

    pub fn powerdns(err: anyhow::Error) -> Self {
        EngineError::PowerDns(err)
    }
}
