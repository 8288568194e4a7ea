//! Entity-to-record resolution.
//!
//! Hosts address consumables through opaque entity identifiers (a sensor id,
//! a button id). The registry is the explicit mapping from those aliases to
//! record ids, owned by the adapter layer and passed by reference into
//! lookups; the core never keeps global state.

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ResolutionError;

/// Mapping from entity identifiers to their owning record identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityRegistry {
    bindings: HashMap<String, String>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an entity alias to a record. Replaces any existing binding.
    pub fn bind(&mut self, entity_id: impl Into<String>, record_id: impl Into<String>) {
        self.bindings.insert(entity_id.into(), record_id.into());
    }

    /// Remove one alias, returning the record id it pointed at.
    pub fn unbind(&mut self, entity_id: &str) -> Option<String> {
        self.bindings.remove(entity_id)
    }

    /// Look up an alias without failing.
    pub fn get(&self, entity_id: &str) -> Option<&str> {
        self.bindings.get(entity_id).map(String::as_str)
    }

    /// Drop every alias pointing at `record_id`, returning how many were
    /// removed. Used when the owning consumable is deleted.
    pub fn remove_record(&mut self, record_id: &str) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|_, bound| bound != record_id);
        before - self.bindings.len()
    }

    /// Resolve an alias to its record id.
    pub fn resolve(&self, entity_id: &str) -> Result<&str, ResolutionError> {
        debug!("resolving record for entity {entity_id}");
        self.get(entity_id)
            .ok_or_else(|| ResolutionError::new(entity_id))
    }

    /// Resolve an alias, consulting `fallback` (e.g. a host-provided
    /// registry) when the alias is unknown here.
    pub fn resolve_with_fallback<F>(
        &self,
        entity_id: &str,
        fallback: F,
    ) -> Result<String, ResolutionError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        if let Some(record_id) = self.get(entity_id) {
            debug!("found record {record_id} in entity map for {entity_id}");
            return Ok(record_id.to_string());
        }
        debug!("entity {entity_id} not in map; consulting fallback");
        fallback(entity_id).ok_or_else(|| ResolutionError::new(entity_id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings
            .iter()
            .map(|(entity, record)| (entity.as_str(), record.as_str()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
