use anyhow::Context;
use tracing::info;

use stocktrack_app::{AppConfig, Dashboard, demo_items, load_items};
use stocktrack_core::{Clock, SystemClock};
use stocktrack_inventory::{InMemoryItemStore, ItemStore, Resolution, resolve_identity};

fn main() -> anyhow::Result<()> {
    stocktrack_observability::init();

    let config = AppConfig::from_env();
    let now = SystemClock.now();

    let items = match &config.items_file {
        Some(path) => load_items(path).with_context(|| format!("loading {}", path.display()))?,
        None => {
            info!("no items file configured; using demo inventory");
            demo_items(now).context("building demo inventory")?
        }
    };
    let store = InMemoryItemStore::with_items(items);
    info!(items = store.len(), horizon_days = config.alerts.horizon_days, "inventory loaded");

    let dashboard = Dashboard::build(&store.list(), &config.alerts, now);
    println!("{}", serde_json::to_string_pretty(&dashboard)?);

    // Optional scanned payload: `stocktrack <payload>`.
    if let Some(payload) = std::env::args().nth(1) {
        match resolve_identity(&payload, &store) {
            Resolution::Found(item) => println!("{}", serde_json::to_string_pretty(&item)?),
            Resolution::NotFound => {
                eprintln!("Item not found in inventory. Please scan a valid item QR code.");
                std::process::exit(2);
            }
        }
    }

    Ok(())
}
