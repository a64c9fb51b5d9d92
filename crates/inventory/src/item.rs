use core::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use stocktrack_core::{DomainError, DomainResult, ItemId};

/// Item status lifecycle.
///
/// Serialized with the display names used by the stored records
/// (`"Checked Out"`, `"Low Stock"`, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    Available,
    #[serde(rename = "Checked Out")]
    CheckedOut,
    #[serde(rename = "In Maintenance")]
    InMaintenance,
    #[serde(rename = "Low Stock")]
    LowStock,
    Wasted,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 5] = [
        ItemStatus::Available,
        ItemStatus::CheckedOut,
        ItemStatus::InMaintenance,
        ItemStatus::LowStock,
        ItemStatus::Wasted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Available => "Available",
            ItemStatus::CheckedOut => "Checked Out",
            ItemStatus::InMaintenance => "In Maintenance",
            ItemStatus::LowStock => "Low Stock",
            ItemStatus::Wasted => "Wasted",
        }
    }
}

impl core::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown item status: {s}")))
    }
}

/// Inventory item as read from the item store.
///
/// Construct through [`InventoryItem::new`] plus the `with_*` builders, or
/// deserialize an [`InventoryItemRecord`]. Either way the invariants hold:
/// valid id, non-empty name and type, dates are real instants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "InventoryItemRecord", into = "InventoryItemRecord")]
pub struct InventoryItem {
    id: ItemId,
    name: String,
    item_type: String,
    status: ItemStatus,
    quantity: u32,
    date_added: Option<DateTime<Utc>>,
    image_url: Option<String>,
    location: Option<String>,
    supplier: Option<String>,
    expiry_date: Option<DateTime<Utc>>,
    next_maintenance_date: Option<DateTime<Utc>>,
    reorder_threshold: Option<u32>,
    reorder_quantity: Option<u32>,
    voice_notes: Option<JsonValue>,
}

impl InventoryItem {
    /// Create an `Available` item with no optional fields set.
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        item_type: impl Into<String>,
        quantity: u32,
    ) -> DomainResult<Self> {
        let name = name.into();
        let item_type = item_type.into();
        ensure_not_blank("name", &name)?;
        ensure_not_blank("type", &item_type)?;

        Ok(Self {
            id,
            name,
            item_type,
            status: ItemStatus::Available,
            quantity,
            date_added: None,
            image_url: None,
            location: None,
            supplier: None,
            expiry_date: None,
            next_maintenance_date: None,
            reorder_threshold: None,
            reorder_quantity: None,
            voice_notes: None,
        })
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_date_added(mut self, at: DateTime<Utc>) -> Self {
        self.date_added = Some(at);
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    pub fn with_expiry_date(mut self, at: DateTime<Utc>) -> Self {
        self.expiry_date = Some(at);
        self
    }

    pub fn with_next_maintenance_date(mut self, at: DateTime<Utc>) -> Self {
        self.next_maintenance_date = Some(at);
        self
    }

    pub fn with_reorder_threshold(mut self, threshold: u32) -> Self {
        self.reorder_threshold = Some(threshold);
        self
    }

    pub fn with_reorder_quantity(mut self, quantity: u32) -> Self {
        self.reorder_quantity = Some(quantity);
        self
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn item_type(&self) -> &str {
        &self.item_type
    }

    pub fn status(&self) -> ItemStatus {
        self.status
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn date_added(&self) -> Option<DateTime<Utc>> {
        self.date_added
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn supplier(&self) -> Option<&str> {
        self.supplier.as_deref()
    }

    pub fn expiry_date(&self) -> Option<DateTime<Utc>> {
        self.expiry_date
    }

    pub fn next_maintenance_date(&self) -> Option<DateTime<Utc>> {
        self.next_maintenance_date
    }

    pub fn reorder_threshold(&self) -> Option<u32> {
        self.reorder_threshold
    }

    pub fn reorder_quantity(&self) -> Option<u32> {
        self.reorder_quantity
    }

    /// Recorded voice notes, kept verbatim so a stored record survives a
    /// load/save cycle.
    pub fn voice_notes(&self) -> Option<&JsonValue> {
        self.voice_notes.as_ref()
    }

    pub(crate) fn set_name(&mut self, name: String) -> DomainResult<()> {
        ensure_not_blank("name", &name)?;
        self.name = name;
        Ok(())
    }

    pub(crate) fn set_item_type(&mut self, item_type: String) -> DomainResult<()> {
        ensure_not_blank("type", &item_type)?;
        self.item_type = item_type;
        Ok(())
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    pub(crate) fn set_status(&mut self, status: ItemStatus) {
        self.status = status;
    }

    pub(crate) fn set_location(&mut self, location: String) {
        self.location = Some(location);
    }

    pub(crate) fn set_supplier(&mut self, supplier: String) {
        self.supplier = Some(supplier);
    }
}

fn ensure_not_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Stored (wire) shape of an item: camelCase JSON with ISO-8601 date strings.
///
/// This is the untrusted side of the boundary. Converting into
/// [`InventoryItem`] validates identity, names and counts, and drops any date
/// that cannot be parsed. Date fields are read as raw JSON so that a number or
/// any other stray value degrades to "no date" instead of failing the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub status: ItemStatus,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_maintenance_date: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reorder_threshold: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reorder_quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_notes: Option<JsonValue>,
}

impl TryFrom<InventoryItemRecord> for InventoryItem {
    type Error = DomainError;

    fn try_from(record: InventoryItemRecord) -> Result<Self, Self::Error> {
        let id = ItemId::parse(record.id)?;
        let quantity = count("quantity", record.quantity)?;
        let reorder_threshold = record
            .reorder_threshold
            .map(|v| count("reorderThreshold", v))
            .transpose()?;
        let reorder_quantity = record
            .reorder_quantity
            .map(|v| count("reorderQuantity", v))
            .transpose()?;

        let date_added = lenient_date(&id, "dateAdded", record.date_added.as_ref());
        let expiry_date = lenient_date(&id, "expiryDate", record.expiry_date.as_ref());
        let next_maintenance_date = lenient_date(
            &id,
            "nextMaintenanceDate",
            record.next_maintenance_date.as_ref(),
        );

        let mut item = InventoryItem::new(id, record.name, record.item_type, quantity)?
            .with_status(record.status);
        item.date_added = date_added;
        item.image_url = record.image_url;
        item.location = record.location;
        item.supplier = record.supplier;
        item.expiry_date = expiry_date;
        item.next_maintenance_date = next_maintenance_date;
        item.reorder_threshold = reorder_threshold;
        item.reorder_quantity = reorder_quantity;
        item.voice_notes = record.voice_notes.filter(|notes| !notes.is_null());
        Ok(item)
    }
}

impl From<InventoryItem> for InventoryItemRecord {
    fn from(item: InventoryItem) -> Self {
        Self {
            id: item.id.into(),
            name: item.name,
            item_type: item.item_type,
            status: item.status,
            quantity: i64::from(item.quantity),
            date_added: item.date_added.map(timestamp_value),
            image_url: item.image_url,
            location: item.location,
            supplier: item.supplier,
            expiry_date: item.expiry_date.map(timestamp_value),
            next_maintenance_date: item.next_maintenance_date.map(timestamp_value),
            reorder_threshold: item.reorder_threshold.map(i64::from),
            reorder_quantity: item.reorder_quantity.map(i64::from),
            voice_notes: item.voice_notes,
        }
    }
}

fn count(field: &str, value: i64) -> DomainResult<u32> {
    u32::try_from(value)
        .map_err(|_| DomainError::validation(format!("{field} out of range: {value}")))
}

/// Strings go through [`parse_timestamp`], integers are epoch milliseconds,
/// `null` is absent. Anything else is logged and dropped.
fn lenient_date(
    id: &ItemId,
    field: &'static str,
    raw: Option<&JsonValue>,
) -> Option<DateTime<Utc>> {
    let raw = raw?;
    let parsed = match raw {
        JsonValue::Null => return None,
        JsonValue::String(s) => parse_timestamp(s),
        JsonValue::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    };
    if parsed.is_none() {
        tracing::debug!(item = %id, field, value = %raw, "discarding unparseable date");
    }
    parsed
}

fn timestamp_value(at: DateTime<Utc>) -> JsonValue {
    JsonValue::String(format_timestamp(at))
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339 (`2024-03-01T10:00:00.000Z`), a naive date-time
/// (`2024-03-01T10:00:00`, read as UTC) and a bare date (`2024-03-01`, UTC
/// midnight). Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Millisecond-precision ISO-8601 with a `Z` suffix, the stored format.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn record_json() -> serde_json::Value {
        json!({
            "id": "3",
            "name": "Wireless Mouse",
            "type": "Accessories",
            "status": "Available",
            "quantity": 0,
            "dateAdded": "2024-05-01T09:30:00.000Z",
            "expiryDate": "2024-05-16",
            "location": "Storage",
            "supplier": "TechSupplier Inc.",
            "reorderThreshold": 5,
            "reorderQuantity": 20
        })
    }

    #[test]
    fn deserializes_stored_record() {
        let item: InventoryItem = serde_json::from_value(record_json()).unwrap();

        assert_eq!(item.id().as_str(), "3");
        assert_eq!(item.item_type(), "Accessories");
        assert_eq!(item.status(), ItemStatus::Available);
        assert_eq!(item.quantity(), 0);
        assert_eq!(item.reorder_threshold(), Some(5));
        assert_eq!(item.supplier(), Some("TechSupplier Inc."));
        assert_eq!(
            item.expiry_date(),
            Some(Utc.with_ymd_and_hms(2024, 5, 16, 0, 0, 0).unwrap())
        );
        assert_eq!(item.next_maintenance_date(), None);
    }

    #[test]
    fn malformed_dates_become_absent() {
        let mut raw = record_json();
        raw["expiryDate"] = json!("next tuesday");
        raw["nextMaintenanceDate"] = json!("2024-13-45");
        raw["dateAdded"] = json!("");

        let item: InventoryItem = serde_json::from_value(raw).unwrap();
        assert_eq!(item.expiry_date(), None);
        assert_eq!(item.next_maintenance_date(), None);
        assert_eq!(item.date_added(), None);
    }

    #[test]
    fn non_string_dates_become_absent() {
        let mut raw = record_json();
        raw["expiryDate"] = json!(1_717_200_000_000_i64);
        raw["nextMaintenanceDate"] = json!({});
        raw["dateAdded"] = json!(true);

        let item: InventoryItem = serde_json::from_value(raw).unwrap();
        assert_eq!(
            item.expiry_date(),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(item.next_maintenance_date(), None);
        assert_eq!(item.date_added(), None);

        let mut raw = record_json();
        raw["expiryDate"] = json!(1.5);
        raw["nextMaintenanceDate"] = json!(null);
        let item: InventoryItem = serde_json::from_value(raw).unwrap();
        assert_eq!(item.expiry_date(), None);
        assert_eq!(item.next_maintenance_date(), None);
    }

    #[test]
    fn voice_notes_survive_a_load_save_cycle() {
        let notes = json!([{
            "id": "vn-1",
            "audioDataUri": "data:audio/webm;base64,AAAA",
            "transcription": "two chairs broken",
            "summary": "Two chairs need repair.",
            "createdAt": "2024-05-02T08:00:00.000Z"
        }]);
        let mut raw = record_json();
        raw["voiceNotes"] = notes.clone();

        let item: InventoryItem = serde_json::from_value(raw).unwrap();
        assert_eq!(item.voice_notes(), Some(&notes));

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["voiceNotes"], notes);

        let plain: InventoryItem = serde_json::from_value(record_json()).unwrap();
        assert!(serde_json::to_value(&plain).unwrap().get("voiceNotes").is_none());
    }

    #[test]
    fn rejects_negative_quantity_and_blank_names() {
        let mut raw = record_json();
        raw["quantity"] = json!(-1);
        assert!(serde_json::from_value::<InventoryItem>(raw).is_err());

        let mut raw = record_json();
        raw["name"] = json!("   ");
        assert!(serde_json::from_value::<InventoryItem>(raw).is_err());

        let mut raw = record_json();
        raw["id"] = json!("");
        assert!(serde_json::from_value::<InventoryItem>(raw).is_err());
    }

    #[test]
    fn status_uses_display_names_on_the_wire() {
        let mut raw = record_json();
        raw["status"] = json!("Checked Out");
        let item: InventoryItem = serde_json::from_value(raw).unwrap();
        assert_eq!(item.status(), ItemStatus::CheckedOut);

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["status"], json!("Checked Out"));
        assert_eq!(back["type"], json!("Accessories"));
        assert_eq!(back["expiryDate"], json!("2024-05-16T00:00:00.000Z"));
        assert!(back.get("imageUrl").is_none());
    }

    #[test]
    fn status_from_str_matches_wire_names() {
        for status in ItemStatus::ALL {
            assert_eq!(status.as_str().parse::<ItemStatus>().unwrap(), status);
        }
        assert!("Broken".parse::<ItemStatus>().is_err());
    }

    #[test]
    fn parse_timestamp_accepts_supported_shapes() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-03-01T10:00:00.000Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01T12:00:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01T10:00:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-03-01"),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("soon"), None);
        assert_eq!(parse_timestamp("  "), None);
    }
}
