//! # Fleet Map
//!
//! Runs the live vessel map against an in-process vessel API and a logging
//! map surface until interrupted.

mod config;
mod provider;
mod surface;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};
use vessel_map::{MapConfig, MapView, MemoryHistory};

use crate::provider::AppContext;
use crate::surface::LogBackend;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(filter).with(fmt::layer()).init();

    let map_config = MapConfig::from_env();
    let provider = AppContext::new(&map_config).context("creating vessel provider")?;
    let location = MemoryHistory::new(config::get_start_href());
    let mut view = MapView::new(provider, LogBackend, location, map_config);

    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to listen for ctrl-c");
        }
    };
    view.run(shutdown).await.context("running map view")?;

    let model = view.view_model();
    for row in &model.rows {
        info!(
            id = row.id,
            name = %row.name,
            vessel_type = %row.vessel_type,
            speed = %row.speed_label(),
            voltage = %row.voltage_label(),
            rotation = row.icon_rotation,
            selected = row.is_selected,
            "vessel"
        );
    }
    Ok(())
}
