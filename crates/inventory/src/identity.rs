//! Scan identity: what goes into an item's QR code and how a scanned payload
//! is mapped back to an item.
//!
//! Three payload generations exist in printed labels:
//! - raw id (current, produced by [`encode_identity`]);
//! - a JSON record `{"id": …, "name": …, "type": …}`;
//! - a 32-bit FNV-1a hash of the id in lowercase hex.
//!
//! Resolution never fails loudly: anything that does not lead to exactly one
//! stored item is [`Resolution::NotFound`], so the scanner UI has a single
//! error branch.

use serde::Deserialize;
use tracing::{debug, warn};

use stocktrack_core::ItemId;

use crate::item::InventoryItem;
use crate::store::ItemStore;

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// Outcome of resolving a scanned payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(InventoryItem),
    NotFound,
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    pub fn into_item(self) -> Option<InventoryItem> {
        match self {
            Resolution::Found(item) => Some(item),
            Resolution::NotFound => None,
        }
    }
}

/// Payload to place in a generated code: the opaque id and nothing else.
pub fn encode_identity(item: &InventoryItem) -> String {
    item.id().as_str().to_owned()
}

/// Map a scanned payload to a stored item. Read-only with respect to `store`.
pub fn resolve_identity<S>(payload: &str, store: &S) -> Resolution
where
    S: ItemStore + ?Sized,
{
    let payload = payload.trim();
    if payload.is_empty() {
        debug!("empty scan payload");
        return Resolution::NotFound;
    }

    if let Some(id) = structured_id(payload) {
        if let Some(item) = store.get_by_id(&id) {
            return Resolution::Found(item);
        }
    }

    if let Ok(id) = ItemId::parse(payload) {
        if let Some(item) = store.get_by_id(&id) {
            return Resolution::Found(item);
        }
    }

    if let Some(item) = resolve_legacy_hash(payload, store) {
        return Resolution::Found(item);
    }

    debug!(payload_len = payload.len(), "scan payload did not match any item");
    Resolution::NotFound
}

/// Legacy label hash: FNV-1a over the id's UTF-16 code units, lowercase hex
/// without padding.
pub fn legacy_hash(id: &str) -> String {
    let hash = id.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    });
    format!("{hash:x}")
}

#[derive(Deserialize)]
struct StructuredPayload {
    id: String,
}

fn structured_id(payload: &str) -> Option<ItemId> {
    if !payload.starts_with('{') {
        return None;
    }
    let decoded: StructuredPayload = serde_json::from_str(payload).ok()?;
    ItemId::parse(decoded.id.trim()).ok()
}

fn resolve_legacy_hash<S>(payload: &str, store: &S) -> Option<InventoryItem>
where
    S: ItemStore + ?Sized,
{
    if payload.len() > 8 || !payload.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let wanted = payload.to_ascii_lowercase();

    let mut matches = store
        .list()
        .into_iter()
        .filter(|item| legacy_hash(item.id().as_str()) == wanted);
    let first = matches.next()?;
    if matches.next().is_some() {
        warn!(payload = %wanted, "legacy scan hash matches several items; refusing to guess");
        return None;
    }
    Some(first)
}
