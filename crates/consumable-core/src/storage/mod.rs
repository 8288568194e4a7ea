//! TOML-based persistence for consumable records.

mod store;

pub use store::{ConsumableEntry, ConsumableStore};

use std::path::PathBuf;

use crate::error::StoreError;

/// Returns `~/.config/consumable[-dev]/` based on CONSUMABLE_ENV.
///
/// Set CONSUMABLE_ENV=dev to use a development data directory, or
/// CONSUMABLE_DATA_DIR to point somewhere else entirely (tests use this).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let dir = if let Ok(explicit) = std::env::var("CONSUMABLE_DATA_DIR") {
        PathBuf::from(explicit)
    } else {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");
        let env = std::env::var("CONSUMABLE_ENV").unwrap_or_else(|_| "production".to_string());
        if env == "dev" {
            base_dir.join("consumable-dev")
        } else {
            base_dir.join("consumable")
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StoreError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
