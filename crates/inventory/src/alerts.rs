//! Notification engine: low-stock, expiry and maintenance alerts.
//!
//! Alerts are derived state. They carry no identity of their own and are
//! recomputed from the item snapshot on every call.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use stocktrack_core::{Clock, ItemId};

use crate::item::{InventoryItem, ItemStatus};

/// Default look-ahead window for expiry and maintenance alerts.
pub const DEFAULT_HORIZON_DAYS: u32 = 30;

/// Alert category. Output is grouped in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    LowStock,
    ExpiringSoon,
    MaintenanceDue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub kind: AlertKind,
    pub item_id: ItemId,
    pub item_name: String,
    /// Human-readable one-liner for badges and notification lists.
    pub detail: String,
}

/// Alerting configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Days after "now" within which a future date counts as "soon".
    pub horizon_days: u32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}

impl AlertConfig {
    pub fn with_horizon_days(mut self, horizon_days: u32) -> Self {
        self.horizon_days = horizon_days;
        self
    }

    pub fn compute(&self, items: &[InventoryItem], now: DateTime<Utc>) -> Vec<Alert> {
        compute_alerts(items, now, self.horizon_days)
    }

    pub fn compute_with_clock<C: Clock + ?Sized>(
        &self,
        items: &[InventoryItem],
        clock: &C,
    ) -> Vec<Alert> {
        self.compute(items, clock.now())
    }
}

/// Compute every active alert for `items` as of `now`.
///
/// Rules, applied per item independently:
/// - low stock: status is `LowStock`, or `0 < quantity <= reorder_threshold`;
/// - expiring soon: `now < expiry_date <= now + horizon_days`;
/// - maintenance due: `now < next_maintenance_date <= now + horizon_days`.
///
/// Output is grouped by [`AlertKind`]; within a kind, input order is kept.
pub fn compute_alerts(items: &[InventoryItem], now: DateTime<Utc>, horizon_days: u32) -> Vec<Alert> {
    let end = horizon_end(now, horizon_days);

    let mut low_stock = Vec::new();
    let mut expiring = Vec::new();
    let mut maintenance = Vec::new();

    for item in items {
        if is_low_stock(item) {
            low_stock.push(alert(
                AlertKind::LowStock,
                item,
                format!("{} has only {} unit(s) left.", item.name(), item.quantity()),
            ));
        }

        if let Some(at) = item.expiry_date().filter(|at| within(*at, now, end)) {
            expiring.push(alert(
                AlertKind::ExpiringSoon,
                item,
                format!("{} will expire on {}.", item.name(), at.format("%Y-%m-%d")),
            ));
        }

        if let Some(at) = item
            .next_maintenance_date()
            .filter(|at| within(*at, now, end))
        {
            maintenance.push(alert(
                AlertKind::MaintenanceDue,
                item,
                format!("{} is due for maintenance on {}.", item.name(), at.format("%Y-%m-%d")),
            ));
        }
    }

    tracing::debug!(
        items = items.len(),
        low_stock = low_stock.len(),
        expiring = expiring.len(),
        maintenance = maintenance.len(),
        "alerts computed"
    );

    low_stock.extend(expiring);
    low_stock.extend(maintenance);
    low_stock
}

/// Low-stock rule shared by alerts and dashboard counts.
///
/// A zero quantity alone never qualifies (that is "out of stock"), and a
/// threshold of zero can therefore only be met through the status.
pub fn is_low_stock(item: &InventoryItem) -> bool {
    if item.status() == ItemStatus::LowStock {
        return true;
    }
    match item.reorder_threshold() {
        Some(threshold) => item.quantity() > 0 && item.quantity() <= threshold,
        None => false,
    }
}

fn within(at: DateTime<Utc>, now: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    at > now && at <= end
}

fn horizon_end(now: DateTime<Utc>, horizon_days: u32) -> DateTime<Utc> {
    now.checked_add_signed(Duration::days(i64::from(horizon_days)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

fn alert(kind: AlertKind, item: &InventoryItem, detail: String) -> Alert {
    Alert {
        kind,
        item_id: item.id().clone(),
        item_name: item.name().to_string(),
        detail,
    }
}
