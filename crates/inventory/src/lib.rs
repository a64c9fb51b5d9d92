//! Inventory domain module.
//!
//! Item model, the item store boundary, and the pure derived-state functions
//! (alerts, scan identity, dashboard aggregates, reorder proposals). Nothing
//! here performs IO; callers own the store and re-run these on every change.

pub mod alerts;
pub mod identity;
pub mod item;
pub mod patch;
pub mod reorder;
pub mod stats;
pub mod store;

pub use alerts::{Alert, AlertConfig, AlertKind, DEFAULT_HORIZON_DAYS, compute_alerts, is_low_stock};
pub use identity::{Resolution, encode_identity, legacy_hash, resolve_identity};
pub use item::{InventoryItem, InventoryItemRecord, ItemStatus, format_timestamp, parse_timestamp};
pub use patch::ItemPatch;
pub use reorder::{ReorderLine, ReorderProposal, ReorderReason, reorder_proposals};
pub use stats::{InventoryStats, lowest_stocked, most_stocked, quantity_by_type};
pub use store::{InMemoryItemStore, ItemStore, NewItem, add_item, delete_item, update_item};
