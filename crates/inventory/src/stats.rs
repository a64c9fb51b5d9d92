//! Dashboard and chart aggregates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::alerts::is_low_stock;
use crate::item::InventoryItem;

/// Headline numbers for the dashboard cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_items: usize,
    pub total_quantity: u64,
    pub low_stock_items: usize,
    pub out_of_stock_items: usize,
}

impl InventoryStats {
    pub fn from_items(items: &[InventoryItem]) -> Self {
        items.iter().fold(Self::default(), |mut stats, item| {
            stats.total_items += 1;
            stats.total_quantity += u64::from(item.quantity());
            if is_low_stock(item) {
                stats.low_stock_items += 1;
            }
            if item.quantity() == 0 {
                stats.out_of_stock_items += 1;
            }
            stats
        })
    }
}

/// Total quantity per item type, ordered by type name.
pub fn quantity_by_type(items: &[InventoryItem]) -> BTreeMap<String, u64> {
    let mut totals = BTreeMap::new();
    for item in items {
        *totals.entry(item.item_type().to_string()).or_insert(0) += u64::from(item.quantity());
    }
    totals
}

/// The `limit` in-stock items with the smallest quantity (ties keep input order).
pub fn lowest_stocked(items: &[InventoryItem], limit: usize) -> Vec<&InventoryItem> {
    let mut in_stock: Vec<&InventoryItem> = items.iter().filter(|i| i.quantity() > 0).collect();
    in_stock.sort_by_key(|item| item.quantity());
    in_stock.truncate(limit);
    in_stock
}

/// The `limit` items with the largest quantity (ties keep input order).
pub fn most_stocked(items: &[InventoryItem], limit: usize) -> Vec<&InventoryItem> {
    let mut all: Vec<&InventoryItem> = items.iter().collect();
    all.sort_by_key(|item| core::cmp::Reverse(item.quantity()));
    all.truncate(limit);
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemStatus;
    use stocktrack_core::ItemId;

    fn item(id: &str, item_type: &str, quantity: u32) -> InventoryItem {
        InventoryItem::new(ItemId::parse(id).unwrap(), format!("Item {id}"), item_type, quantity)
            .unwrap()
    }

    fn sample() -> Vec<InventoryItem> {
        vec![
            item("1", "Electronics", 10).with_reorder_threshold(5),
            item("2", "Furniture", 1).with_reorder_threshold(2),
            item("3", "Accessories", 0).with_reorder_threshold(5),
            item("4", "Electronics", 1),
            item("5", "Accessories", 2).with_status(ItemStatus::LowStock),
        ]
    }

    #[test]
    fn stats_follow_alert_rules() {
        let stats = InventoryStats::from_items(&sample());
        assert_eq!(
            stats,
            InventoryStats {
                total_items: 5,
                total_quantity: 14,
                low_stock_items: 2,
                out_of_stock_items: 1,
            }
        );
    }

    #[test]
    fn empty_inventory_has_zero_stats() {
        assert_eq!(InventoryStats::from_items(&[]), InventoryStats::default());
    }

    #[test]
    fn quantity_by_type_sums_per_type() {
        let totals = quantity_by_type(&sample());
        assert_eq!(totals.get("Electronics"), Some(&11));
        assert_eq!(totals.get("Accessories"), Some(&2));
        assert_eq!(totals.keys().next().map(String::as_str), Some("Accessories"));
    }

    #[test]
    fn lowest_stocked_skips_empty_and_is_stable() {
        let items = sample();
        let ids: Vec<&str> = lowest_stocked(&items, 3).iter().map(|i| i.id().as_str()).collect();
        assert_eq!(ids, vec!["2", "4", "5"]);
    }

    #[test]
    fn most_stocked_orders_descending() {
        let items = sample();
        let ids: Vec<&str> = most_stocked(&items, 2).iter().map(|i| i.id().as_str()).collect();
        assert_eq!(ids, vec!["1", "5"]);
        assert_eq!(most_stocked(&items, 50).len(), 5);
    }
}
