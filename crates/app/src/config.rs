//! Environment-driven configuration.

use std::path::PathBuf;

use tracing::warn;

use stocktrack_inventory::AlertConfig;

pub const HORIZON_DAYS_ENV: &str = "STOCKTRACK_HORIZON_DAYS";
pub const ITEMS_FILE_ENV: &str = "STOCKTRACK_ITEMS_FILE";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub alerts: AlertConfig,
    /// JSON array of stored item records. Demo data is used when unset.
    pub items_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Bad values are logged and replaced
    /// by defaults rather than aborting startup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut alerts = AlertConfig::default();
        if let Some(raw) = lookup(HORIZON_DAYS_ENV) {
            match raw.trim().parse::<u32>() {
                Ok(days) => alerts = alerts.with_horizon_days(days),
                Err(_) => warn!(
                    var = HORIZON_DAYS_ENV,
                    value = %raw,
                    default = alerts.horizon_days,
                    "horizon is not a non-negative integer; using default"
                ),
            }
        }

        let items_file = lookup(ITEMS_FILE_ENV)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        Self { alerts, items_file }
    }
}
