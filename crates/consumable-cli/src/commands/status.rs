//! Derived expiration status output.
//!
//! Recomputes the display values from the stored records and today's date;
//! nothing is cached, so this doubles as the "periodic refresh" the host
//! would otherwise schedule.

use chrono::Local;
use clap::Args;
use consumable_core::{derive, ConsumableStore, DerivedView};
use serde::Serialize;

#[derive(Args)]
pub struct StatusArgs {
    /// Record ID or entity alias (default: all consumables)
    pub id: Option<String>,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct StatusRow<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    view: Option<DerivedView>,
}

pub fn run(args: StatusArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = ConsumableStore::open()?;
    let today = Local::now().date_naive();

    let ids: Vec<String> = match &args.id {
        Some(raw) => {
            let record_id = store
                .registry()
                .resolve_with_fallback(raw, |id| store.contains(id).then(|| id.to_string()))?;
            vec![record_id]
        }
        None => store.list().iter().map(|entry| entry.id.clone()).collect(),
    };

    let mut rows = Vec::with_capacity(ids.len());
    for id in &ids {
        let entry = store
            .get(id)
            .ok_or_else(|| format!("consumable '{id}' not found"))?;
        rows.push(StatusRow {
            id: &entry.id,
            name: &entry.name,
            view: entry.record.as_ref().map(|record| derive(record, today)),
        });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for row in &rows {
        match &row.view {
            Some(view) if view.expired => {
                println!(
                    "{}: EXPIRED (due {}, {} days elapsed)",
                    row.name, view.due_date, view.elapsed_days
                );
            }
            Some(view) => {
                println!(
                    "{}: {} days remaining (due {}, {:.1}% used)",
                    row.name, view.remaining_days, view.due_date, view.percent_used
                );
            }
            None => println!("{}: not configured", row.name),
        }
    }

    Ok(())
}
