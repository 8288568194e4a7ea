//! File-backed store of consumable entries and entity bindings.
//!
//! The store plays the role of the host's configuration records: one entry
//! per consumable, holding its metadata and the canonical expiration record,
//! plus the entity-alias registry. Everything lives in a single TOML file at
//! `<data_dir>/consumables.toml`.
//!
//! Access is single-threaded; callers that update the same record from more
//! than one place must serialize through one store instance.

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::StoreError;
use crate::record::ExpirationRecord;
use crate::registry::EntityRegistry;

const STORE_FILE: &str = "consumables.toml";

/// One configured consumable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumableEntry {
    /// Opaque record identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text item type; only used for default icon selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    /// Icon name (Material Design Icons).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Canonical expiration record. `None` until a duration has been
    /// configured; service verbs guard against this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<ExpirationRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    consumables: Vec<ConsumableEntry>,
    #[serde(default)]
    entities: EntityRegistry,
}

/// TOML-backed consumable store.
#[derive(Debug)]
pub struct ConsumableStore {
    path: PathBuf,
    file: StoreFile,
}

impl ConsumableStore {
    /// Open (or create) the store in the default data directory.
    pub fn open() -> Result<Self, StoreError> {
        Self::open_at(data_dir()?.join(STORE_FILE))
    }

    /// Open (or create) the store at an explicit path.
    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let file = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            toml::from_str(&raw)?
        } else {
            StoreFile::default()
        };
        Ok(Self { path, file })
    }

    fn save(&self) -> Result<(), StoreError> {
        let raw = toml::to_string_pretty(&self.file)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add a new consumable and persist.
    pub fn add(&mut self, entry: ConsumableEntry) -> Result<(), StoreError> {
        debug!("adding consumable {} ({})", entry.name, entry.id);
        self.file.consumables.push(entry);
        self.save()
    }

    pub fn get(&self, id: &str) -> Option<&ConsumableEntry> {
        self.file.consumables.iter().find(|entry| entry.id == id)
    }

    pub fn list(&self) -> &[ConsumableEntry] {
        &self.file.consumables
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Replace the expiration record of a consumable and persist.
    ///
    /// Always writes a complete record; reconciliation has already merged
    /// any partial update before this point.
    pub fn update_record(&mut self, id: &str, record: ExpirationRecord) -> Result<(), StoreError> {
        let entry = self
            .file
            .consumables
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        debug!(
            "updating record for {id}: duration {} days, start {}",
            record.duration_days, record.start_date
        );
        entry.record = Some(record);
        self.save()
    }

    /// Update display metadata (name, item type, icon) and persist.
    pub fn update_meta(
        &mut self,
        id: &str,
        name: Option<String>,
        item_type: Option<String>,
        icon: Option<String>,
    ) -> Result<(), StoreError> {
        let entry = self
            .file
            .consumables
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if let Some(name) = name {
            entry.name = name;
        }
        if let Some(item_type) = item_type {
            entry.item_type = Some(item_type);
        }
        if let Some(icon) = icon {
            entry.icon = Some(icon);
        }
        self.save()
    }

    /// Remove a consumable, dropping its entity aliases, and persist.
    pub fn remove(&mut self, id: &str) -> Result<ConsumableEntry, StoreError> {
        let index = self
            .file
            .consumables
            .iter()
            .position(|entry| entry.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let entry = self.file.consumables.remove(index);
        let dropped = self.file.entities.remove_record(id);
        debug!("removed consumable {id} and {dropped} entity alias(es)");
        self.save()?;
        Ok(entry)
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.file.entities
    }

    /// Bind an entity alias to a consumable and persist.
    pub fn bind_entity(&mut self, entity_id: &str, record_id: &str) -> Result<(), StoreError> {
        if !self.contains(record_id) {
            return Err(StoreError::NotFound(record_id.to_string()));
        }
        self.file.entities.bind(entity_id, record_id);
        self.save()
    }

    /// Remove an entity alias and persist.
    pub fn unbind_entity(&mut self, entity_id: &str) -> Result<Option<String>, StoreError> {
        let removed = self.file.entities.unbind(entity_id);
        self.save()?;
        Ok(removed)
    }
}
