//! `skybrief monitor` — Run the background weather monitor.

use std::sync::Arc;
use std::time::Duration;

use skybrief_config::AppConfig;
use skybrief_monitor::{HistoryStore, WeatherMonitor};

pub async fn run(once: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let provider = super::build_provider(&config)?;
    let service = super::build_weather_service(&config)?;
    let store = HistoryStore::new(config.history_file(), config.monitor.max_entries);

    let monitor = Arc::new(WeatherMonitor::new(
        service,
        store,
        provider,
        &config.model,
        &config.monitor.city,
        Duration::from_secs(u64::from(config.monitor.summary_interval_minutes) * 60),
    ));

    if once {
        monitor.poll_once().await?;
        println!("Recorded one observation for {}", config.monitor.city);
        return Ok(());
    }

    println!(
        "Monitoring {} every {} minutes (history: {})",
        config.monitor.city,
        config.monitor.poll_interval_minutes,
        config.history_file().display()
    );
    println!("Press Ctrl+C to stop.");

    let handle = monitor.start(Duration::from_secs(
        u64::from(config.monitor.poll_interval_minutes) * 60,
    ));

    tokio::signal::ctrl_c().await?;
    handle.abort();
    println!("\nMonitor stopped.");

    Ok(())
}
