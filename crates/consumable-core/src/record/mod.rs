//! Canonical expiration record and partial updates.
//!
//! A consumable's stored state is the `{duration_days, start_date}` pair.
//! Everything else (due date, remaining days, percent used) is derived on
//! demand and never persisted. Records are only ever replaced wholesale:
//! partial updates go through [`reconcile`](reconcile::reconcile) so that a
//! stored record is never missing a field once created.
//!
//! Dates are calendar dates (no time-of-day, no timezone) and serialize to
//! ISO-8601 `YYYY-MM-DD` strings at the persistence boundary.

pub mod reconcile;
pub mod view;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Minimum service life in days.
pub const MIN_DURATION_DAYS: u32 = 1;

/// Maximum service life in days (five years), matching the configuration
/// surface exposed to users.
pub const MAX_DURATION_DAYS: u32 = 1825;

/// Canonical stored state for one consumable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpirationRecord {
    /// Service life length in days. Always `>= 1`.
    pub duration_days: u32,
    /// When the service life began. May be any date, including the future.
    pub start_date: NaiveDate,
}

impl ExpirationRecord {
    /// Create a record, validating the duration bounds.
    pub fn new(duration_days: u32, start_date: NaiveDate) -> Result<Self, ValidationError> {
        validate_duration(duration_days)?;
        Ok(Self {
            duration_days,
            start_date,
        })
    }

    /// Derived due date (`start_date + duration_days`); never stored.
    pub fn due_date(&self) -> NaiveDate {
        add_days(self.start_date, self.duration_days)
    }
}

/// Check the duration bounds shared by the record constructor and the
/// reconciliation engine.
pub fn validate_duration(duration_days: u32) -> Result<(), ValidationError> {
    if duration_days < MIN_DURATION_DAYS {
        return Err(ValidationError::DurationTooShort(duration_days));
    }
    if duration_days > MAX_DURATION_DAYS {
        return Err(ValidationError::DurationTooLong {
            got: duration_days,
            max: MAX_DURATION_DAYS,
        });
    }
    Ok(())
}

/// Parse an ISO-8601 calendar date (`YYYY-MM-DD`).
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::MalformedDate {
            input: input.to_string(),
        }
    })
}

pub(crate) fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

pub(crate) fn sub_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

/// A date as accepted at the input edge: a native value or an ISO-8601
/// string. Normalized to a native date before any arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    Date(NaiveDate),
    Iso(String),
}

impl DateInput {
    /// Resolve to a native date, parsing string inputs.
    pub fn resolve(&self) -> Result<NaiveDate, ValidationError> {
        match self {
            DateInput::Date(date) => Ok(*date),
            DateInput::Iso(raw) => parse_date(raw),
        }
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

impl From<&str> for DateInput {
    fn from(raw: &str) -> Self {
        DateInput::Iso(raw.to_string())
    }
}

impl From<String> for DateInput {
    fn from(raw: String) -> Self {
        DateInput::Iso(raw)
    }
}

/// A partial field update to be reconciled against a previous record.
///
/// Zero or more fields may be set; `mark_replaced` wins over every other
/// start-date input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialUpdate {
    #[serde(default)]
    pub duration_days: Option<u32>,
    #[serde(default)]
    pub start_date: Option<DateInput>,
    #[serde(default)]
    pub expiry_date_override: Option<DateInput>,
    #[serde(default)]
    pub mark_replaced: bool,
}

impl PartialUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the service-life duration.
    pub fn with_duration(mut self, days: u32) -> Self {
        self.duration_days = Some(days);
        self
    }

    /// Set the start date directly.
    pub fn with_start_date(mut self, date: impl Into<DateInput>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    /// Supply an expiry date used to back-compute the start date.
    pub fn with_expiry_override(mut self, date: impl Into<DateInput>) -> Self {
        self.expiry_date_override = Some(date.into());
        self
    }

    /// Request that the start date be reset to the current date.
    pub fn with_mark_replaced(mut self) -> Self {
        self.mark_replaced = true;
        self
    }

    /// True if no field is set.
    pub fn is_empty(&self) -> bool {
        self.duration_days.is_none()
            && self.start_date.is_none()
            && self.expiry_date_override.is_none()
            && !self.mark_replaced
    }
}
