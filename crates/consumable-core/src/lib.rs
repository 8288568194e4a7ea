//! # Consumable Core Library
//!
//! This library provides the core logic for tracking "consumable" items
//! (filters, brushes, bulbs) with a configured start date and an expected
//! service-life duration. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary, with any host
//! integration being a thin adapter over the same core library.
//!
//! ## Architecture
//!
//! - **Record model**: the canonical `{duration_days, start_date}` pair per
//!   consumable, exchanged as ISO-8601 dates at the persistence boundary
//! - **Reconciliation**: pure merge of a partial field update into a previous
//!   record, with a well-defined precedence for the start-date inputs
//! - **Derived views**: remaining/elapsed days, percent used, and the expired
//!   flag, recomputed on demand from a record and the current date
//! - **Storage**: TOML-based consumable store plus entity-alias registry
//! - **Services**: the four host-facing verbs (set start date, set duration,
//!   set expiry date, mark replaced)
//!
//! ## Key Components
//!
//! - [`ExpirationRecord`]: canonical stored state
//! - [`reconcile`]: the reconciliation engine
//! - [`derive`]: the derived-view calculator
//! - [`ConsumableStore`]: record persistence and entity bindings
//! - [`Services`]: service verbs over a store

pub mod catalog;
pub mod error;
pub mod record;
pub mod registry;
pub mod service;
pub mod storage;

pub use error::{ConfigurationMissingError, CoreError, ResolutionError, ValidationError};
pub use record::reconcile::{reconcile, reconcile_expiry_unconditional};
pub use record::view::{derive, DerivedView};
pub use record::{DateInput, ExpirationRecord, PartialUpdate};
pub use registry::EntityRegistry;
pub use service::Services;
pub use storage::{ConsumableEntry, ConsumableStore};
