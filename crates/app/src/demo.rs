//! Built-in demo inventory, used when no items file is configured.

use chrono::{DateTime, Duration, Utc};

use stocktrack_core::{DomainResult, ItemId};
use stocktrack_inventory::{InventoryItem, ItemStatus};

/// Five sample items; dates are relative to `now`.
///
/// The set exercises every alert kind: items 2, 4 and 5 are low on stock, item 3
/// expires in 15 days (and is out of stock), item 4 needs maintenance in 25.
pub fn demo_items(now: DateTime<Utc>) -> DomainResult<Vec<InventoryItem>> {
    Ok(vec![
        InventoryItem::new(ItemId::parse("1")?, "Laptop Pro", "Electronics", 10)?
            .with_date_added(now)
            .with_image_url("https://picsum.photos/400/300?id=1")
            .with_location("Office A")
            .with_supplier("TechSupplier Inc.")
            .with_reorder_threshold(5)
            .with_reorder_quantity(10),
        InventoryItem::new(ItemId::parse("2")?, "Office Chair", "Furniture", 1)?
            .with_status(ItemStatus::CheckedOut)
            .with_date_added(now)
            .with_image_url("https://picsum.photos/400/300?id=2")
            .with_location("Office B")
            .with_supplier("Comfort Seating")
            .with_reorder_threshold(2)
            .with_reorder_quantity(5),
        InventoryItem::new(ItemId::parse("3")?, "Wireless Mouse", "Accessories", 0)?
            .with_date_added(now)
            .with_image_url("https://picsum.photos/400/300?id=3")
            .with_expiry_date(now + Duration::days(15))
            .with_location("Storage")
            .with_supplier("TechSupplier Inc.")
            .with_reorder_threshold(5)
            .with_reorder_quantity(20),
        InventoryItem::new(ItemId::parse("4")?, "Projector", "Electronics", 1)?
            .with_status(ItemStatus::InMaintenance)
            .with_date_added(now)
            .with_image_url("https://picsum.photos/400/300?id=4")
            .with_location("Meeting Room 1")
            .with_supplier("AV World")
            .with_next_maintenance_date(now + Duration::days(25))
            .with_reorder_threshold(2)
            .with_reorder_quantity(3),
        InventoryItem::new(ItemId::parse("5")?, "External Hard Drive", "Accessories", 2)?
            .with_status(ItemStatus::LowStock)
            .with_date_added(now)
            .with_image_url("https://picsum.photos/400/300?id=5")
            .with_location("Storage")
            .with_supplier("DataSafe")
            .with_reorder_threshold(3)
            .with_reorder_quantity(15),
    ])
}
