//! Report flows: fixed instruction templates over an inventory snapshot.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use tracing::info;

use stocktrack_inventory::{InventoryItem, reorder_proposals};

use crate::capability::ReportGenerator;
use crate::result::{AiError, Report};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Demand forecast, optimal stock levels, trending products.
    InventorySummary,
    /// Purchase order proposals per supplier plus delivery alerts.
    PurchaseOrders,
    /// What gets wasted, why, and how to buy differently.
    Wastage,
    /// Stockout forecasts, fast/slow movers, reorder trends.
    AnalyticsInsights,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::InventorySummary,
        ReportKind::PurchaseOrders,
        ReportKind::Wastage,
        ReportKind::AnalyticsInsights,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::InventorySummary => "inventory_summary",
            ReportKind::PurchaseOrders => "purchase_orders",
            ReportKind::Wastage => "wastage",
            ReportKind::AnalyticsInsights => "analytics_insights",
        }
    }

    pub fn instruction(&self) -> &'static str {
        match self {
            ReportKind::InventorySummary => {
                "You are an inventory analyst. From the inventory data, forecast demand per \
                 item type, suggest an optimal stock level for each item, and list trending \
                 products and waste-reduction opportunities in a markdown table. Answer in \
                 markdown."
            }
            ReportKind::PurchaseOrders => {
                "You are a purchasing assistant. The data holds the inventory and \
                 `reorderProposals`, already grouped by supplier with order quantities and \
                 reasons. Write one purchase order per supplier: a heading with the supplier \
                 name, today's date, a table (Item Name, Current Quantity, Reorder Quantity, \
                 Reason) and a signature line. Start with a 'Delivery Alerts' section. If \
                 `reorderProposals` is empty, state that stock levels are sufficient and no \
                 action is needed."
            }
            ReportKind::Wastage => {
                "You are an inventory optimisation analyst. Using items with status \
                 'Wasted', list the most wasted products (Product Name, Type, Total Wasted \
                 Quantity), explain likely causes, recommend purchasing changes and close \
                 with a short summary. If nothing is wasted, say there is no wastage data to \
                 analyse. Answer in markdown."
            }
            ReportKind::AnalyticsInsights => {
                "You are a supply-chain data analyst. From the inventory data, identify \
                 items likely to stock out soon, fast-moving and slow-moving stock, reorder \
                 trends relative to thresholds, and any seasonal patterns. Answer in \
                 markdown with one section per topic."
            }
        }
    }
}

impl core::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One turn of an investigation conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

const INVESTIGATOR_INSTRUCTION: &str = "You are an inventory investigator. Answer the user's \
     question using only the inventory data provided; filter it by item name or type as the \
     question requires. Be concise and use markdown tables or lists where they help. Ask for \
     clarification when the question is ambiguous and decline questions unrelated to the \
     inventory.";

/// Runs report flows through a [`ReportGenerator`].
#[derive(Debug, Clone)]
pub struct ReportService<G> {
    generator: G,
}

impl<G: ReportGenerator> ReportService<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generate(&self, kind: ReportKind, items: &[InventoryItem]) -> Result<Report, AiError> {
        let data = encode(&snapshot_for(kind, items)?)?;
        info!(kind = %kind, items = items.len(), "generating report");

        let body = non_empty(self.generator.generate_report(kind.instruction(), &data)?)?;
        info!(kind = %kind, chars = body.len(), "report generated");
        Ok(Report { kind, body })
    }

    /// Answer a free-form question about `items`, continuing `history`.
    pub fn investigate(
        &self,
        question: &str,
        history: &[ChatTurn],
        items: &[InventoryItem],
    ) -> Result<String, AiError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AiError::InvalidInput("question is empty".to_string()));
        }

        let mut instruction = String::from(INVESTIGATOR_INSTRUCTION);
        instruction.push_str("\n\nConversation so far:\n");
        for turn in history {
            let role = match turn.role {
                ChatRole::User => "user",
                ChatRole::Model => "model",
            };
            instruction.push_str(&format!("{role}: {}\n", turn.content));
        }
        instruction.push_str(&format!("user: {question}\n"));

        let data = encode(&JsonValue::Array(records(items)?))?;
        info!(history = history.len(), items = items.len(), "investigating inventory");
        non_empty(self.generator.generate_report(&instruction, &data)?)
    }
}

/// Data handed to the generator for `kind`.
///
/// Purchase orders get the deterministic reorder proposals next to the raw
/// items so the model only has to word them.
fn snapshot_for(kind: ReportKind, items: &[InventoryItem]) -> Result<JsonValue, AiError> {
    let items_json = JsonValue::Array(records(items)?);
    if kind != ReportKind::PurchaseOrders {
        return Ok(items_json);
    }

    let proposals = serde_json::to_value(reorder_proposals(items))
        .map_err(|e| AiError::Internal(e.to_string()))?;
    let mut data = Map::new();
    data.insert("items".to_string(), items_json);
    data.insert("reorderProposals".to_string(), proposals);
    Ok(JsonValue::Object(data))
}

fn records(items: &[InventoryItem]) -> Result<Vec<JsonValue>, AiError> {
    items
        .iter()
        .map(|item| serde_json::to_value(item).map_err(|e| AiError::Internal(e.to_string())))
        .collect()
}

fn encode(value: &JsonValue) -> Result<String, AiError> {
    serde_json::to_string(value).map_err(|e| AiError::Internal(e.to_string()))
}

fn non_empty(text: String) -> Result<String, AiError> {
    if text.trim().is_empty() {
        return Err(AiError::InferenceFailed("model returned an empty response".to_string()));
    }
    Ok(text)
}
