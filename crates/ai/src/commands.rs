//! Voice/text commands turned into item updates.

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use tracing::{debug, info, warn};

use stocktrack_core::{DomainError, ItemId};
use stocktrack_inventory::{InventoryItem, ItemPatch, ItemStatus, ItemStore, update_item};

use crate::capability::CommandParser;
use crate::result::AiError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Count,
    OneOf(Vec<&'static str>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
}

/// Fields a command may set, as sent to the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSchema {
    pub fields: Vec<FieldSpec>,
}

impl FieldSchema {
    /// Schema of [`ItemPatch`].
    pub fn item_patch() -> Self {
        Self {
            fields: vec![
                FieldSpec {
                    name: "name",
                    kind: FieldKind::Text,
                    description: "display name of the item",
                },
                FieldSpec {
                    name: "type",
                    kind: FieldKind::Text,
                    description: "category, e.g. Electronics or Furniture",
                },
                FieldSpec {
                    name: "quantity",
                    kind: FieldKind::Count,
                    description: "units currently in stock",
                },
                FieldSpec {
                    name: "status",
                    kind: FieldKind::OneOf(ItemStatus::ALL.iter().map(|s| s.as_str()).collect()),
                    description: "availability status",
                },
                FieldSpec {
                    name: "location",
                    kind: FieldKind::Text,
                    description: "where the item is kept",
                },
                FieldSpec {
                    name: "supplier",
                    kind: FieldKind::Text,
                    description: "who the item is bought from",
                },
            ],
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Validate a parser's partial record and turn it into an [`ItemPatch`].
///
/// Keys outside the schema and `null` values are ignored. Counts may arrive as
/// JSON numbers or numeric strings. Any other type mismatch, and any status
/// outside the enumeration, rejects the whole output.
pub fn patch_from_output(output: &Map<String, JsonValue>) -> Result<ItemPatch, AiError> {
    let mut patch = ItemPatch::default();

    for (key, value) in output {
        if value.is_null() {
            continue;
        }
        match key.as_str() {
            "name" => patch.name = Some(text(key, value)?),
            "type" => patch.item_type = Some(text(key, value)?),
            "location" => patch.location = Some(text(key, value)?),
            "supplier" => patch.supplier = Some(text(key, value)?),
            "quantity" => patch.quantity = Some(count(key, value)?),
            "status" => {
                let raw = text(key, value)?;
                let status = raw
                    .parse::<ItemStatus>()
                    .map_err(|_| AiError::InvalidOutput(format!("status: unknown value {raw:?}")))?;
                patch.status = Some(status);
            }
            other => debug!(field = other, "ignoring field outside the command schema"),
        }
    }

    Ok(patch)
}

fn text(key: &str, value: &JsonValue) -> Result<String, AiError> {
    value
        .as_str()
        .map(|s| s.trim().to_string())
        .ok_or_else(|| AiError::InvalidOutput(format!("{key}: expected a string, got {value}")))
}

fn count(key: &str, value: &JsonValue) -> Result<u32, AiError> {
    let parsed = match value {
        JsonValue::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64)),
        JsonValue::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| AiError::InvalidOutput(format!("{key}: expected a non-negative count, got {value}")))
}

/// Applies natural-language commands to items through a [`CommandParser`].
#[derive(Debug, Clone)]
pub struct CommandService<P> {
    parser: P,
    schema: FieldSchema,
}

impl<P: CommandParser> CommandService<P> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            schema: FieldSchema::item_patch(),
        }
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    /// Parse `text` into a patch. An empty patch means "nothing to change".
    pub fn interpret(&self, text: &str) -> Result<ItemPatch, AiError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AiError::InvalidInput("command text is empty".to_string()));
        }

        let output = self.parser.parse_command(text, &self.schema)?;
        patch_from_output(&output).inspect_err(|e| {
            warn!(error = %e, "rejected parsed command output");
        })
    }

    /// Interpret `text` and merge the result into item `id`.
    ///
    /// Returns `Ok(None)` when the parser found nothing to change; the item is
    /// left as is.
    pub fn apply<S>(&self, store: &S, id: &ItemId, text: &str) -> Result<Option<InventoryItem>, AiError>
    where
        S: ItemStore + ?Sized,
    {
        if store.get_by_id(id).is_none() {
            return Err(DomainError::not_found().into());
        }

        let patch = self.interpret(text)?;
        if patch.is_empty() {
            info!(item = %id, "command produced no changes");
            return Ok(None);
        }

        let updated = update_item(store, id, &patch)?;
        Ok(Some(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;
    use stocktrack_inventory::InMemoryItemStore;

    /// Parser that replays a canned answer and records what it was asked.
    struct ScriptedParser {
        answer: JsonValue,
        seen: Mutex<Vec<String>>,
    }

    impl ScriptedParser {
        fn new(answer: JsonValue) -> Self {
            Self {
                answer,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl CommandParser for ScriptedParser {
        fn parse_command(
            &self,
            text: &str,
            schema: &FieldSchema,
        ) -> Result<Map<String, JsonValue>, AiError> {
            assert!(schema.field("quantity").is_some());
            self.seen.lock().unwrap().push(text.to_string());
            match &self.answer {
                JsonValue::Object(map) => Ok(map.clone()),
                _ => Err(AiError::InferenceFailed("quota exceeded".to_string())),
            }
        }
    }

    fn store() -> InMemoryItemStore {
        InMemoryItemStore::with_items([InventoryItem::new(
            ItemId::parse("4").unwrap(),
            "Projector",
            "Electronics",
            1,
        )
        .unwrap()
        .with_location("Meeting Room 1")])
    }

    #[test]
    fn output_is_coerced_into_patch() {
        let output = json!({
            "quantity": "12",
            "status": "In Maintenance",
            "location": " Storage ",
            "mood": "cheerful",
            "supplier": null
        });
        let patch = patch_from_output(output.as_object().unwrap()).unwrap();

        assert_eq!(
            patch,
            ItemPatch {
                quantity: Some(12),
                status: Some(ItemStatus::InMaintenance),
                location: Some("Storage".to_string()),
                ..ItemPatch::default()
            }
        );
    }

    #[test]
    fn invalid_output_is_rejected() {
        for bad in [
            json!({"status": "Broken"}),
            json!({"quantity": -3}),
            json!({"quantity": "lots"}),
            json!({"quantity": 2.5}),
            json!({"name": 42}),
        ] {
            let err = patch_from_output(bad.as_object().unwrap()).unwrap_err();
            assert!(matches!(err, AiError::InvalidOutput(_)), "{bad}");
        }
    }

    #[test]
    fn integral_float_counts_are_accepted() {
        let patch = patch_from_output(json!({"quantity": 7.0}).as_object().unwrap()).unwrap();
        assert_eq!(patch.quantity, Some(7));
    }

    #[test]
    fn apply_updates_the_item() {
        let store = store();
        let service = CommandService::new(ScriptedParser::new(json!({"quantity": 3})));
        let id = ItemId::parse("4").unwrap();

        let updated = service.apply(&store, &id, "we now have three projectors").unwrap().unwrap();

        assert_eq!(updated.quantity(), 3);
        assert_eq!(updated.location(), Some("Meeting Room 1"));
        assert_eq!(store.get_by_id(&id).unwrap().quantity(), 3);
    }

    #[test]
    fn declined_command_changes_nothing() {
        let store = store();
        let before = store.list();
        let service = CommandService::new(ScriptedParser::new(json!({})));

        let result = service
            .apply(&store, &ItemId::parse("4").unwrap(), "what's the weather?")
            .unwrap();

        assert!(result.is_none());
        assert_eq!(store.list(), before);
    }

    #[test]
    fn unknown_item_is_checked_before_calling_the_model() {
        let parser = ScriptedParser::new(json!({"quantity": 1}));
        let service = CommandService::new(&parser);

        let err = service
            .apply(&store(), &ItemId::parse("99").unwrap(), "set quantity to 1")
            .unwrap_err();

        assert!(matches!(err, AiError::Domain(DomainError::NotFound)));
        assert!(parser.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn empty_text_and_parser_failures_surface() {
        let service = CommandService::new(ScriptedParser::new(JsonValue::Null));
        assert!(matches!(service.interpret("   "), Err(AiError::InvalidInput(_))));
        assert!(matches!(
            service.interpret("set quantity to 2"),
            Err(AiError::InferenceFailed(_))
        ));
    }

    #[test]
    fn schema_lists_status_values() {
        let schema = FieldSchema::item_patch();
        let status = schema.field("status").unwrap();
        assert_eq!(
            status.kind,
            FieldKind::OneOf(vec!["Available", "Checked Out", "In Maintenance", "Low Stock", "Wasted"])
        );
        let wire = serde_json::to_value(&schema).unwrap();
        assert_eq!(wire["fields"][2]["kind"], json!({"kind": "count"}));
    }
}
