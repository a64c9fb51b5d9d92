use serde::{Deserialize, Serialize};

use stocktrack_core::DomainResult;

use crate::item::{InventoryItem, ItemStatus};

/// Partial update of an item: only the fields present are changed.
///
/// This is the shape a parsed voice/text command produces ("set quantity to
/// 12 and move it to Storage").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ItemStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        self == &ItemPatch::default()
    }

    /// Names of the fields this patch touches, in schema order.
    pub fn touched_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.item_type.is_some() {
            fields.push("type");
        }
        if self.quantity.is_some() {
            fields.push("quantity");
        }
        if self.status.is_some() {
            fields.push("status");
        }
        if self.location.is_some() {
            fields.push("location");
        }
        if self.supplier.is_some() {
            fields.push("supplier");
        }
        fields
    }

    /// Merge into `item`. Validation failures leave `item` untouched.
    pub fn apply_to(&self, item: &mut InventoryItem) -> DomainResult<()> {
        let mut next = item.clone();
        if let Some(name) = &self.name {
            next.set_name(name.clone())?;
        }
        if let Some(item_type) = &self.item_type {
            next.set_item_type(item_type.clone())?;
        }
        if let Some(quantity) = self.quantity {
            next.set_quantity(quantity);
        }
        if let Some(status) = self.status {
            next.set_status(status);
        }
        if let Some(location) = &self.location {
            next.set_location(location.clone());
        }
        if let Some(supplier) = &self.supplier {
            next.set_supplier(supplier.clone());
        }
        *item = next;
        Ok(())
    }
}
