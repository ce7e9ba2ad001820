//! Per-type record validation.
//!
//! Every resource-record type the engine supports has a validator behind
//! the common [`RecordValidator`] contract; [`validator_for`] is the
//! registry mapping a [`RecordType`] to its instance. Unsupported types
//! never reach the registry — they fail earlier, at
//! `RecordType::from_str`.

mod host;
mod rrtypes;

use crate::model::RecordType;

pub use rrtypes::{
    AddressValidator, CaaValidator, HostnameValidator, PtrValidator, SoaValidator, SrvValidator,
    TxtValidator,
};

/// Ordered, human-readable validation messages. Non-empty by construction:
/// a validator either returns a [`ValidatedRecord`] or at least one error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<String>,
}

impl ValidationErrors {
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub(crate) fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Messages in the order discovered, for redisplay next to form fields.
    pub fn messages(&self) -> &[String] {
        &self.errors
    }

    pub fn into_messages(self) -> Vec<String> {
        self.errors
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.errors.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// A record that passed validation: every field present and coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRecord {
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub prio: u16,
}

/// Result of a validation run.
pub type ValidationResult = Result<ValidatedRecord, ValidationErrors>;

/// Common contract for all per-type validators.
///
/// `prio` and `ttl` arrive as raw form strings; blanks fall back to the
/// type default and `default_ttl` respectively. Errors come back as data,
/// never as panics.
pub trait RecordValidator: Send + Sync {
    fn validate(
        &self,
        name: &str,
        content: &str,
        prio: &str,
        ttl: &str,
        default_ttl: u32,
    ) -> ValidationResult;
}

static A: AddressValidator = AddressValidator::v4();
static AAAA: AddressValidator = AddressValidator::v6();
static CNAME: HostnameValidator = HostnameValidator::new();
static NS: HostnameValidator = HostnameValidator::new();
static MX: HostnameValidator = HostnameValidator::mail_exchange();
static PTR: PtrValidator = PtrValidator;
static SRV: SrvValidator = SrvValidator;
static TXT: TxtValidator = TxtValidator;
static SPF: TxtValidator = TxtValidator;
static SOA: SoaValidator = SoaValidator;
static CAA: CaaValidator = CaaValidator;

/// Registry lookup. The match is total over the closed [`RecordType`]
/// enum, so a new type cannot be added without wiring a validator.
pub fn validator_for(rtype: RecordType) -> &'static dyn RecordValidator {
    match rtype {
        RecordType::A => &A,
        RecordType::Aaaa => &AAAA,
        RecordType::Caa => &CAA,
        RecordType::Cname => &CNAME,
        RecordType::Mx => &MX,
        RecordType::Ns => &NS,
        RecordType::Ptr => &PTR,
        RecordType::Soa => &SOA,
        RecordType::Spf => &SPF,
        RecordType::Srv => &SRV,
        RecordType::Txt => &TXT,
    }
}
