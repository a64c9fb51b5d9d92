//! Reorder proposals: which items to buy again, grouped per supplier.
//!
//! This is the deterministic pre-pass behind purchase-order generation; the
//! report flow only has to word it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use stocktrack_core::ItemId;

use crate::item::{InventoryItem, ItemStatus};

/// Order size when an item has no `reorder_quantity`.
pub const DEFAULT_REORDER_QUANTITY: u32 = 50;

/// Supplier bucket for items without one.
pub const UNKNOWN_SUPPLIER: &str = "Unknown Supplier";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReorderReason {
    /// Quantity is at or below the reorder threshold.
    BelowThreshold,
    /// Status is `Low Stock` (demand outpaces the threshold).
    HighDemand,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderLine {
    pub item_id: ItemId,
    pub item_name: String,
    pub current_quantity: u32,
    pub order_quantity: u32,
    pub reason: ReorderReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderProposal {
    pub supplier: String,
    pub lines: Vec<ReorderLine>,
}

/// Why `item` needs reordering, if it does.
///
/// Unlike alerting, an empty shelf counts: `0 <= threshold` is exactly when a
/// purchase order is most needed.
pub fn reorder_reason(item: &InventoryItem) -> Option<ReorderReason> {
    if item
        .reorder_threshold()
        .is_some_and(|threshold| item.quantity() <= threshold)
    {
        return Some(ReorderReason::BelowThreshold);
    }
    if item.status() == ItemStatus::LowStock {
        return Some(ReorderReason::HighDemand);
    }
    None
}

/// Group items needing reorder by supplier (suppliers sorted by name, lines in
/// input order). Empty when nothing needs ordering.
pub fn reorder_proposals(items: &[InventoryItem]) -> Vec<ReorderProposal> {
    let mut by_supplier: BTreeMap<String, Vec<ReorderLine>> = BTreeMap::new();

    for item in items {
        let Some(reason) = reorder_reason(item) else {
            continue;
        };
        let supplier = item
            .supplier()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_SUPPLIER);

        by_supplier
            .entry(supplier.to_string())
            .or_default()
            .push(ReorderLine {
                item_id: item.id().clone(),
                item_name: item.name().to_string(),
                current_quantity: item.quantity(),
                order_quantity: item.reorder_quantity().unwrap_or(DEFAULT_REORDER_QUANTITY),
                reason,
            });
    }

    by_supplier
        .into_iter()
        .map(|(supplier, lines)| ReorderProposal { supplier, lines })
        .collect()
}
