//! Core error types for consumable-core.
//!
//! All failures here are request-scoped: every operation is a deterministic
//! pure computation or a single store write, so a failure is never transient
//! and nothing is retried.

use thiserror::Error;

/// Top-level error type for consumable-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors (bad duration, malformed date, missing field)
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Entity could not be mapped to a consumable record
    #[error("Resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    /// Operation requested before the consumable was configured
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(#[from] ConfigurationMissingError),

    /// Store read/write errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Validation failures surfaced synchronously to the caller.
///
/// Reconciliation is all-or-nothing: a validation failure leaves the
/// previous record untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("duration_days must be at least 1, got {0}")]
    DurationTooShort(u32),

    #[error("duration_days must be at most {max}, got {got}")]
    DurationTooLong { got: u32, max: u32 },

    #[error("invalid date '{input}': expected YYYY-MM-DD")]
    MalformedDate { input: String },

    #[error("missing required field '{0}' and no previous record to fall back on")]
    MissingField(&'static str),
}

/// The caller could not map an entity identifier to a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not resolve a consumable record for entity '{entity_id}'")]
pub struct ResolutionError {
    pub entity_id: String,
}

impl ResolutionError {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
        }
    }
}

/// An operation was requested before a duration was ever configured.
///
/// The requested operation is a no-op; the store is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no duration configured for consumable '{record_id}'")]
pub struct ConfigurationMissingError {
    pub record_id: String,
}

impl ConfigurationMissingError {
    pub fn new(record_id: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
        }
    }
}

/// Store-specific errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read/write consumables file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse consumables TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize consumables TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Consumable '{0}' not found")]
    NotFound(String),

    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}
