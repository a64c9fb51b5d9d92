//! `stocktrack-app` — wiring for the `stocktrack` binary.
//!
//! Loads a snapshot (file or demo data), then prints the derived dashboard:
//! alerts, headline stats and reorder proposals.

pub mod config;
pub mod demo;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use stocktrack_inventory::{
    Alert, AlertConfig, InventoryItem, InventoryStats, ReorderProposal, reorder_proposals,
};

pub use config::AppConfig;
pub use demo::demo_items;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse items in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read a JSON array of stored item records.
///
/// Records are validated on the way in; a single bad record rejects the file.
/// Bad dates inside a record do not: they are dropped.
pub fn load_items(path: &Path) -> Result<Vec<InventoryItem>, LoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_items(&raw).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_items(raw: &str) -> Result<Vec<InventoryItem>, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Everything the dashboard renders, derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub generated_at: DateTime<Utc>,
    pub stats: InventoryStats,
    pub alerts: Vec<Alert>,
    pub reorder_proposals: Vec<ReorderProposal>,
}

impl Dashboard {
    pub fn build(items: &[InventoryItem], alerts: &AlertConfig, now: DateTime<Utc>) -> Self {
        Self {
            generated_at: now,
            stats: InventoryStats::from_items(items),
            alerts: alerts.compute(items, now),
            reorder_proposals: reorder_proposals(items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use stocktrack_inventory::{AlertKind, InMemoryItemStore, Resolution, resolve_identity};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn demo_dashboard_covers_every_alert_kind() {
        let items = demo_items(now()).unwrap();
        let dashboard = Dashboard::build(&items, &AlertConfig::default(), now());

        let summary: Vec<(AlertKind, &str)> = dashboard
            .alerts
            .iter()
            .map(|a| (a.kind, a.item_id.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (AlertKind::LowStock, "2"),
                (AlertKind::LowStock, "4"),
                (AlertKind::LowStock, "5"),
                (AlertKind::ExpiringSoon, "3"),
                (AlertKind::MaintenanceDue, "4"),
            ]
        );
        assert_eq!(dashboard.stats.total_items, 5);
        assert_eq!(dashboard.stats.total_quantity, 14);
        assert_eq!(dashboard.stats.out_of_stock_items, 1);
        assert_eq!(dashboard.stats.low_stock_items, 3);
    }

    #[test]
    fn shorter_horizon_drops_maintenance_alert() {
        let items = demo_items(now()).unwrap();
        let config = AlertConfig::default().with_horizon_days(20);
        let dashboard = Dashboard::build(&items, &config, now());
        assert!(dashboard.alerts.iter().all(|a| a.kind != AlertKind::MaintenanceDue));
    }

    #[test]
    fn parse_items_accepts_stored_array_and_tolerates_bad_dates() {
        let raw = r#"[
            {"id": "a1", "name": "Gloves", "type": "Safety", "status": "Wasted",
             "quantity": 3, "expiryDate": "31/12/2024"}
        ]"#;
        let items = parse_items(raw).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].expiry_date(), None);

        let store = InMemoryItemStore::with_items(items);
        assert!(matches!(resolve_identity("a1", &store), Resolution::Found(_)));
    }

    #[test]
    fn parse_items_rejects_invalid_records() {
        let raw = r#"[{"id": "a1", "name": "", "type": "Safety", "status": "Available", "quantity": 1}]"#;
        assert!(parse_items(raw).is_err());
    }

    #[test]
    fn load_items_reports_missing_file() {
        let path = std::env::temp_dir().join("stocktrack-definitely-missing.json");
        match load_items(&path) {
            Err(LoadError::Io { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn dashboard_serializes_camel_case() {
        let items = demo_items(now()).unwrap();
        let json = serde_json::to_value(Dashboard::build(&items, &AlertConfig::default(), now()))
            .unwrap();
        assert_eq!(json["stats"]["lowStockItems"], 3);
        assert_eq!(json["alerts"][0]["itemName"], "Office Chair");
        assert_eq!(json["alerts"][0]["kind"], "low_stock");
    }
}
