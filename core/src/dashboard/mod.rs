// Dashboard module - customer experience monitoring UI
//
// Provides an HTTP server with REST endpoints and SSE for streaming
// pipeline progress to a web UI.

mod api;
mod event_stream;
mod static_assets;

pub use api::DashboardServer;
pub use event_stream::{PipelineEvent, PipelineEventType, RecordBroadcaster};

/// Dashboard configuration
#[derive(Clone, Debug)]
pub struct DashboardConfig {
    pub port: u16,
    pub host: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            port: 5001,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PULSE_DASHBOARD_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5001),
            host: std::env::var("PULSE_DASHBOARD_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
        }
    }
}
