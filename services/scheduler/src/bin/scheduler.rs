//! services/scheduler/src/bin/scheduler.rs
//!
//! Boots the schedule service against the in-memory store and prints the current
//! availability report as JSON on stdout. Logs go to stderr.

use scheduler_lib::{
    adapters::InMemoryStore, config::Config, error::AppError, report::availability_report,
};
use scheduling_core::{ScheduleBuilder, ScheduleService};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!("Configuration loaded. Starting scheduler...");

    // --- 2. Build the Catalog and the Store ---
    let builder = ScheduleBuilder::new(config.rules)?;
    info!(
        "Slot catalog {} - {} every {} minutes ({} slots)",
        config.rules.window_start,
        config.rules.window_end,
        config.rules.step_minutes,
        builder.catalog().len()
    );
    let store = match &config.seed_path {
        Some(path) => Arc::new(InMemoryStore::from_seed_file(path).await?),
        None => Arc::new(InMemoryStore::default()),
    };

    // --- 3. Hydrate the Service ---
    let service = ScheduleService::new(builder, store.clone(), store)
        .with_store_timeout(config.store_timeout);
    service.load().await?;

    // --- 4. Report ---
    let report = availability_report(&service).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
