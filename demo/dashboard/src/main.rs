mod config;
use config::PulseDemoConfig;
use pulse_core::{DashboardServer, Pulse, SummaryClient};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging / tracing
    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info,pulse_core=info,pulse_dashboard=info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(
        target = "pulse_dashboard",
        "Starting dashboard demo: narrative dataset -> pipeline -> HTTP dashboard"
    );

    // Load configuration (defaults + env + optional TOML overlay)
    let cfg = PulseDemoConfig::load();

    // Materialize the dataset and wire the runtime; a malformed narrative
    // date is fatal here.
    let mut pulse = Pulse::new(cfg.pipeline.clone())?;

    let store = pulse.store.clone();
    let outages = Arc::clone(&pulse.outages);
    let broadcaster = pulse.broadcaster.clone();
    let expected_total = pulse.expected_total;

    let summarizer = Arc::new(SummaryClient::new(cfg.llm.clone())?);

    // Feed the store from a background task after a short delay, so the
    // first dashboard poll sees the stream arriving live.
    let startup_delay = cfg.startup_delay;
    tokio::spawn(async move {
        tokio::time::sleep(startup_delay).await;
        match pulse.start() {
            Ok(handle) => match handle.await {
                Ok(processed) => {
                    info!(target = "pulse_dashboard", processed, "Pipeline run finished")
                }
                Err(e) => error!(target = "pulse_dashboard", error = %e, "Pipeline task panicked"),
            },
            Err(e) => error!(target = "pulse_dashboard", error = %e, "Failed to start pipeline"),
        }
    });

    let server = DashboardServer::new(
        cfg.dashboard.clone(),
        store,
        outages,
        broadcaster,
        summarizer,
        expected_total,
    );

    // Serve until Ctrl+C
    tokio::select! {
        res = server.serve() => {
            if let Err(e) = res {
                error!(target = "pulse_dashboard", error = %e, "Dashboard server failed");
            }
        }
        _ = signal::ctrl_c() => {
            info!(target = "pulse_dashboard", "Shutdown requested");
        }
    }

    Ok(())
}
