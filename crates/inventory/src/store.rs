use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use stocktrack_core::{DomainError, DomainResult, ItemId};

use crate::item::{InventoryItem, ItemStatus};
use crate::patch::ItemPatch;

/// Item store abstraction.
///
/// The persistence transport (browser storage mirror, hosted database, file)
/// lives behind this trait; alerting and scan resolution only read from it.
pub trait ItemStore: Send + Sync {
    fn get_by_id(&self, id: &ItemId) -> Option<InventoryItem>;
    /// All items, in insertion order.
    fn list(&self) -> Vec<InventoryItem>;
    /// Insert, or replace the item with the same id in place.
    fn upsert(&self, item: InventoryItem);
    /// Remove an item. Returns whether it existed.
    fn delete(&self, id: &ItemId) -> bool;
}

impl<S> ItemStore for Arc<S>
where
    S: ItemStore + ?Sized,
{
    fn get_by_id(&self, id: &ItemId) -> Option<InventoryItem> {
        (**self).get_by_id(id)
    }

    fn list(&self) -> Vec<InventoryItem> {
        (**self).list()
    }

    fn upsert(&self, item: InventoryItem) {
        (**self).upsert(item)
    }

    fn delete(&self, id: &ItemId) -> bool {
        (**self).delete(id)
    }
}

/// In-memory store for tests/dev. Keeps insertion order like the stored array.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    inner: RwLock<Vec<InventoryItem>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with items; later duplicates replace earlier ones.
    pub fn with_items(items: impl IntoIterator<Item = InventoryItem>) -> Self {
        let store = Self::new();
        for item in items {
            store.upsert(item);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ItemStore for InMemoryItemStore {
    fn get_by_id(&self, id: &ItemId) -> Option<InventoryItem> {
        let items = self.inner.read().ok()?;
        items.iter().find(|item| item.id() == id).cloned()
    }

    fn list(&self) -> Vec<InventoryItem> {
        match self.inner.read() {
            Ok(items) => items.clone(),
            Err(_) => vec![],
        }
    }

    fn upsert(&self, item: InventoryItem) {
        if let Ok(mut items) = self.inner.write() {
            match items.iter_mut().find(|existing| existing.id() == item.id()) {
                Some(existing) => *existing = item,
                None => items.push(item),
            }
        }
    }

    fn delete(&self, id: &ItemId) -> bool {
        match self.inner.write() {
            Ok(mut items) => {
                let before = items.len();
                items.retain(|item| item.id() != id);
                items.len() != before
            }
            Err(_) => false,
        }
    }
}

/// Fields supplied when adding an item; id and `dateAdded` are assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub status: ItemStatus,
    pub quantity: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub next_maintenance_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reorder_threshold: Option<u32>,
    #[serde(default)]
    pub reorder_quantity: Option<u32>,
}

impl NewItem {
    fn into_item(self, id: ItemId, now: DateTime<Utc>) -> DomainResult<InventoryItem> {
        let mut item = InventoryItem::new(id, self.name, self.item_type, self.quantity)?
            .with_status(self.status)
            .with_date_added(now);
        if let Some(url) = self.image_url {
            item = item.with_image_url(url);
        }
        if let Some(location) = self.location {
            item = item.with_location(location);
        }
        if let Some(supplier) = self.supplier {
            item = item.with_supplier(supplier);
        }
        if let Some(at) = self.expiry_date {
            item = item.with_expiry_date(at);
        }
        if let Some(at) = self.next_maintenance_date {
            item = item.with_next_maintenance_date(at);
        }
        if let Some(threshold) = self.reorder_threshold {
            item = item.with_reorder_threshold(threshold);
        }
        if let Some(quantity) = self.reorder_quantity {
            item = item.with_reorder_quantity(quantity);
        }
        Ok(item)
    }
}

/// Add a new item with a freshly generated id.
pub fn add_item<S>(store: &S, new_item: NewItem, now: DateTime<Utc>) -> DomainResult<InventoryItem>
where
    S: ItemStore + ?Sized,
{
    let item = new_item.into_item(ItemId::generate(), now)?;
    store.upsert(item.clone());
    info!(item = %item.id(), name = item.name(), "item added");
    Ok(item)
}

/// Merge a partial update into a stored item and persist it.
pub fn update_item<S>(store: &S, id: &ItemId, patch: &ItemPatch) -> DomainResult<InventoryItem>
where
    S: ItemStore + ?Sized,
{
    let mut item = store.get_by_id(id).ok_or_else(DomainError::not_found)?;
    patch.apply_to(&mut item)?;
    store.upsert(item.clone());
    info!(item = %id, fields = ?patch.touched_fields(), "item updated");
    Ok(item)
}

pub fn delete_item<S>(store: &S, id: &ItemId) -> DomainResult<()>
where
    S: ItemStore + ?Sized,
{
    if !store.delete(id) {
        return Err(DomainError::not_found());
    }
    info!(item = %id, "item deleted");
    Ok(())
}
