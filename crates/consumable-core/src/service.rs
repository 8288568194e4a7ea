//! Host-facing service verbs.
//!
//! The four verbs mirror the services a home-automation host would expose
//! for a consumable: set the start date, set the duration, set the expiry
//! date, and mark the item replaced. Each verb resolves the target entity,
//! reconciles the update all-or-nothing, and persists the complete record.
//!
//! The current date is injected by the caller so the verbs stay
//! deterministic; nothing here reads the wall clock.

use chrono::NaiveDate;
use log::debug;

use crate::error::{ConfigurationMissingError, CoreError, ResolutionError, StoreError};
use crate::record::reconcile::{reconcile, reconcile_expiry_unconditional};
use crate::record::{DateInput, ExpirationRecord, PartialUpdate};
use crate::storage::ConsumableStore;

/// Service verbs over a consumable store.
///
/// Entity identifiers resolve through the store's alias registry, falling
/// back to treating the identifier as a record id directly (the analog of a
/// host-registry lookup).
pub struct Services<'a> {
    store: &'a mut ConsumableStore,
}

impl<'a> Services<'a> {
    pub fn new(store: &'a mut ConsumableStore) -> Self {
        Self { store }
    }

    /// Set the start date of a consumable directly.
    pub fn set_start_date(
        &mut self,
        entity_id: &str,
        start_date: DateInput,
        today: NaiveDate,
    ) -> Result<ExpirationRecord, CoreError> {
        debug!("set_start_date called for {entity_id}");
        let record_id = self.resolve(entity_id)?;
        let update = PartialUpdate::new().with_start_date(start_date);
        self.apply(&record_id, &update, today)
    }

    /// Set the service-life duration; the start date is left untouched.
    pub fn set_duration(
        &mut self,
        entity_id: &str,
        duration_days: u32,
        today: NaiveDate,
    ) -> Result<ExpirationRecord, CoreError> {
        debug!("set_duration called for {entity_id} with {duration_days}");
        let record_id = self.resolve(entity_id)?;
        let update = PartialUpdate::new().with_duration(duration_days);
        self.apply(&record_id, &update, today)
    }

    /// Set the expiry date, back-computing `start = expiry - duration`.
    ///
    /// Unlike a form submission there is no pre-filled default here, so the
    /// inversion is applied unconditionally.
    pub fn set_expiry_date(
        &mut self,
        entity_id: &str,
        expiry_date: DateInput,
    ) -> Result<ExpirationRecord, CoreError> {
        debug!("set_expiry_date called for {entity_id}");
        let record_id = self.resolve(entity_id)?;
        let previous = self.configured_record(&record_id)?;
        let record = reconcile_expiry_unconditional(&previous, &expiry_date)?;
        self.store.update_record(&record_id, record)?;
        Ok(record)
    }

    /// Reset the start date to today (item was physically replaced).
    pub fn mark_replaced(
        &mut self,
        entity_id: &str,
        today: NaiveDate,
    ) -> Result<ExpirationRecord, CoreError> {
        debug!("mark_replaced called for {entity_id}");
        let record_id = self.resolve(entity_id)?;
        // A replacement only makes sense once a duration exists.
        self.configured_record(&record_id)?;
        let update = PartialUpdate::new().with_mark_replaced();
        self.apply(&record_id, &update, today)
    }

    fn resolve(&self, entity_id: &str) -> Result<String, ResolutionError> {
        self.store.registry().resolve_with_fallback(entity_id, |id| {
            self.store.contains(id).then(|| id.to_string())
        })
    }

    // The id has already been resolved by this point; a miss here means the
    // store entry itself is gone, not the alias.
    fn configured_record(&self, record_id: &str) -> Result<ExpirationRecord, CoreError> {
        let entry = self
            .store
            .get(record_id)
            .ok_or_else(|| StoreError::NotFound(record_id.to_string()))?;
        entry
            .record
            .ok_or_else(|| ConfigurationMissingError::new(record_id).into())
    }

    fn apply(
        &mut self,
        record_id: &str,
        update: &PartialUpdate,
        today: NaiveDate,
    ) -> Result<ExpirationRecord, CoreError> {
        let previous = self
            .store
            .get(record_id)
            .ok_or_else(|| StoreError::NotFound(record_id.to_string()))?
            .record;
        let record = reconcile(previous.as_ref(), update, today)?;
        self.store.update_record(record_id, record)?;
        Ok(record)
    }
}
