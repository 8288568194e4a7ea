//! Entity alias management commands for CLI.

use clap::Subcommand;
use consumable_core::ConsumableStore;

#[derive(Subcommand)]
pub enum EntityAction {
    /// Bind an entity alias to a consumable
    Bind {
        /// Entity identifier (e.g. sensor.water_filter_days)
        entity_id: String,
        /// Record ID
        record_id: String,
    },
    /// Remove an entity alias
    Unbind {
        /// Entity identifier
        entity_id: String,
    },
    /// List entity aliases
    List,
}

pub fn run(action: EntityAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = ConsumableStore::open()?;

    match action {
        EntityAction::Bind {
            entity_id,
            record_id,
        } => {
            store.bind_entity(&entity_id, &record_id)?;
            println!("Bound {entity_id} -> {record_id}");
        }
        EntityAction::Unbind { entity_id } => match store.unbind_entity(&entity_id)? {
            Some(record_id) => println!("Unbound {entity_id} (was {record_id})"),
            None => println!("No binding for {entity_id}"),
        },
        EntityAction::List => {
            let mut bindings: Vec<_> = store.registry().iter().collect();
            bindings.sort();
            for (entity_id, record_id) in bindings {
                println!("{entity_id} -> {record_id}");
            }
        }
    }

    Ok(())
}
