//! Consumable management commands for CLI.

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use consumable_core::record::{parse_date, MAX_DURATION_DAYS};
use consumable_core::{
    catalog, derive, reconcile_expiry_unconditional, ConsumableEntry, ConsumableStore,
    ExpirationRecord, Services,
};
use log::debug;
use uuid::Uuid;

#[derive(Subcommand)]
pub enum ItemAction {
    /// Add a consumable
    Add {
        /// Display name
        name: String,
        /// Item type (influences the default icon)
        #[arg(long)]
        item_type: Option<String>,
        /// Icon name (Material Design Icons)
        #[arg(long)]
        icon: Option<String>,
        /// Service life in days
        #[arg(long, default_value = "90", value_parser = clap::value_parser!(u32).range(1..=MAX_DURATION_DAYS as i64))]
        duration: u32,
        /// Start date (YYYY-MM-DD, default: today)
        #[arg(long)]
        start_date: Option<String>,
        /// Expiry date (YYYY-MM-DD); back-computes the start date
        #[arg(long, conflicts_with = "start_date")]
        expiry_date: Option<String>,
    },
    /// List consumables
    List,
    /// Get consumable details
    Get {
        /// Record ID or entity alias
        id: String,
    },
    /// Remove a consumable
    Remove {
        /// Record ID
        id: String,
    },
    /// Rename a consumable
    Rename {
        /// Record ID
        id: String,
        /// New display name
        name: String,
    },
    /// Set the start date
    SetStart {
        /// Record ID or entity alias
        id: String,
        /// Start date (YYYY-MM-DD)
        date: String,
    },
    /// Set the service-life duration
    SetDuration {
        /// Record ID or entity alias
        id: String,
        /// Duration in days
        #[arg(value_parser = clap::value_parser!(u32).range(1..=MAX_DURATION_DAYS as i64))]
        days: u32,
    },
    /// Set the expiry date (back-computes the start date)
    SetExpiry {
        /// Record ID or entity alias
        id: String,
        /// Expiry date (YYYY-MM-DD)
        date: String,
    },
    /// Mark the consumable as replaced today
    Replace {
        /// Record ID or entity alias
        id: String,
    },
}

pub fn run(action: ItemAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = ConsumableStore::open()?;
    let today = Local::now().date_naive();
    debug!("opened store at {} (today: {today})", store.path().display());

    match action {
        ItemAction::Add {
            name,
            item_type,
            icon,
            duration,
            start_date,
            expiry_date,
        } => {
            let record = initial_record(duration, start_date, expiry_date, today)?;
            let entry = ConsumableEntry {
                id: Uuid::new_v4().to_string(),
                name: name.trim().to_string(),
                icon: Some(catalog::select_icon(
                    icon.as_deref(),
                    item_type.as_deref(),
                    &name,
                )),
                item_type,
                record: Some(record),
            };
            let id = entry.id.clone();
            store.add(entry)?;
            println!("Added '{}' ({id})", name.trim());
            print_record(&record);
        }
        ItemAction::List => {
            for entry in store.list() {
                let summary = match &entry.record {
                    Some(record) => {
                        let view = derive(record, today);
                        if view.expired {
                            "expired".to_string()
                        } else {
                            format!("{} days remaining", view.remaining_days)
                        }
                    }
                    None => "not configured".to_string(),
                };
                println!("{}  {}  ({summary})", entry.id, entry.name);
            }
        }
        ItemAction::Get { id } => {
            let record_id = resolve(&store, &id)?;
            let entry = store
                .get(&record_id)
                .ok_or_else(|| format!("consumable '{record_id}' not found"))?;
            println!("ID:        {}", entry.id);
            println!("Name:      {}", entry.name);
            if let Some(item_type) = &entry.item_type {
                println!("Type:      {item_type}");
            }
            if let Some(icon) = &entry.icon {
                println!("Icon:      {icon}");
            }
            match &entry.record {
                Some(record) => print_record(record),
                None => println!("Schedule:  not configured"),
            }
        }
        ItemAction::Remove { id } => {
            let removed = store.remove(&id)?;
            println!("Removed '{}' ({})", removed.name, removed.id);
        }
        ItemAction::Rename { id, name } => {
            store.update_meta(&id, Some(name.trim().to_string()), None, None)?;
            println!("Renamed {id} to '{}'", name.trim());
        }
        ItemAction::SetStart { id, date } => {
            let record = Services::new(&mut store).set_start_date(&id, date.as_str().into(), today)?;
            print_record(&record);
        }
        ItemAction::SetDuration { id, days } => {
            let record = Services::new(&mut store).set_duration(&id, days, today)?;
            print_record(&record);
        }
        ItemAction::SetExpiry { id, date } => {
            let record = Services::new(&mut store).set_expiry_date(&id, date.as_str().into())?;
            print_record(&record);
        }
        ItemAction::Replace { id } => {
            let record = Services::new(&mut store).mark_replaced(&id, today)?;
            println!("Marked replaced on {}", record.start_date);
            print_record(&record);
        }
    }

    Ok(())
}

/// Build the initial record from the add flags, defaulting the start date to
/// today and letting an expiry date back-compute it.
fn initial_record(
    duration: u32,
    start_date: Option<String>,
    expiry_date: Option<String>,
    today: NaiveDate,
) -> Result<ExpirationRecord, Box<dyn std::error::Error>> {
    let base = ExpirationRecord::new(
        duration,
        match start_date {
            Some(raw) => parse_date(&raw)?,
            None => today,
        },
    )?;
    match expiry_date {
        Some(raw) => Ok(reconcile_expiry_unconditional(&base, &raw.into())?),
        None => Ok(base),
    }
}

fn resolve(store: &ConsumableStore, id: &str) -> Result<String, Box<dyn std::error::Error>> {
    Ok(store
        .registry()
        .resolve_with_fallback(id, |raw| store.contains(raw).then(|| raw.to_string()))?)
}

fn print_record(record: &ExpirationRecord) {
    println!(
        "Schedule:  {} days from {} (due {})",
        record.duration_days,
        record.start_date,
        record.due_date()
    );
}
