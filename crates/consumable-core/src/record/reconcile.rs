//! Reconciliation of partial updates into a complete record.
//!
//! Merging a [`PartialUpdate`] into a previous [`ExpirationRecord`] always
//! produces a complete `{duration_days, start_date}` pair or fails without
//! touching anything. The start-date inputs have a strict precedence:
//!
//! 1. `mark_replaced` resets the start date to `today` (the injected clock)
//!    and overrides all other start-date inputs.
//! 2. An `expiry_date_override` is converted to a start date by solving
//!    `start = expiry - duration`, using the duration resolved by this same
//!    update. An override equal to the previous record's own due date is
//!    treated as an untouched auto-filled form field and ignored, so a stale
//!    pre-filled expiry never silently overwrites an explicit start-date edit.
//! 3. An explicit `start_date` replaces the previous one directly.
//! 4. Otherwise the previous start date is kept.
//!
//! The suppression rule in step 2 is a heuristic reconstruction of user
//! intent from form-default echoing; hosts with no pre-filled expiry field
//! should use [`reconcile_expiry_unconditional`] instead.

use chrono::NaiveDate;
use log::debug;

use super::{sub_days, validate_duration, DateInput, ExpirationRecord, PartialUpdate};
use crate::error::ValidationError;

/// Merge `update` into `previous`, producing the new canonical record.
///
/// `today` is the injected current date, consulted only for `mark_replaced`.
/// Pure: all persistence is the caller's responsibility.
///
/// # Errors
/// Fails with [`ValidationError`] if the resolved duration is out of bounds,
/// a date input is malformed, or a required field is absent from both the
/// update and the previous record.
pub fn reconcile(
    previous: Option<&ExpirationRecord>,
    update: &PartialUpdate,
    today: NaiveDate,
) -> Result<ExpirationRecord, ValidationError> {
    let duration_days = match (update.duration_days, previous) {
        (Some(days), _) => days,
        (None, Some(prev)) => prev.duration_days,
        (None, None) => return Err(ValidationError::MissingField("duration_days")),
    };
    validate_duration(duration_days)?;

    let start_date = if update.mark_replaced {
        debug!("mark_replaced set; start date reset to {today}");
        today
    } else if let Some(override_input) = &update.expiry_date_override {
        let override_date = override_input.resolve()?;
        let shown_default = previous.map(ExpirationRecord::due_date);
        if shown_default == Some(override_date) {
            debug!(
                "expiry override {override_date} matches the previously shown default; ignoring"
            );
            resolve_start(update.start_date.as_ref(), previous)?
        } else {
            sub_days(override_date, duration_days)
        }
    } else {
        resolve_start(update.start_date.as_ref(), previous)?
    };

    ExpirationRecord::new(duration_days, start_date)
}

/// Solve `start = expiry - duration` against the previous record,
/// unconditionally.
///
/// This is the "set expiry date" service path: the expiry arrives as an
/// explicit request rather than a form field, so there is no previously
/// shown default to suppress against.
pub fn reconcile_expiry_unconditional(
    previous: &ExpirationRecord,
    expiry_date: &DateInput,
) -> Result<ExpirationRecord, ValidationError> {
    let expiry = expiry_date.resolve()?;
    ExpirationRecord::new(
        previous.duration_days,
        sub_days(expiry, previous.duration_days),
    )
}

fn resolve_start(
    explicit: Option<&DateInput>,
    previous: Option<&ExpirationRecord>,
) -> Result<NaiveDate, ValidationError> {
    match (explicit, previous) {
        (Some(input), _) => input.resolve(),
        (None, Some(prev)) => Ok(prev.start_date),
        (None, None) => Err(ValidationError::MissingField("start_date")),
    }
}
