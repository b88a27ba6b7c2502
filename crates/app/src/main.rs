use anyhow::Context;

use stockroom_app::{AppConfig, report, seed};
use stockroom_inventory::Inventory;

fn main() -> anyhow::Result<()> {
    let (config, warnings) = AppConfig::from_env();
    stockroom_observability::init(config.log_format);
    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    let inventory = Inventory::new();
    let changes = inventory.subscribe();
    tracing::info!(registry_id = %inventory.id(), seed = config.seed, "inventory ready");

    if config.seed {
        seed::load_sample_inventory(&inventory).context("failed to load sample inventory")?;
    } else {
        tracing::warn!("STOCKROOM_SEED is off; starting with an empty inventory");
    }

    tracing::debug!(events = changes.drain().len(), "change events during startup");
    report::log_listing(&inventory);

    let snapshot = report::snapshot_json(&inventory).context("failed to serialize inventory")?;
    tracing::debug!(%snapshot, "inventory snapshot");

    Ok(())
}
