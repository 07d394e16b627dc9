use std::fs;
use std::path::Path;
use std::time::Duration;

use pulse_core::{DashboardConfig, PipelineConfig, SummaryConfig};

/// High-level configuration for the dashboard demo
#[derive(Clone, Debug)]
pub struct PulseDemoConfig {
    pub dashboard: DashboardConfig,
    pub pipeline: PipelineConfig,
    pub llm: SummaryConfig,
    /// Delay before the pipeline consumer starts feeding the store
    pub startup_delay: Duration,
}

impl Default for PulseDemoConfig {
    fn default() -> Self {
        Self {
            dashboard: DashboardConfig::from_env(),
            pipeline: PipelineConfig::from_env(),
            llm: SummaryConfig::default(),
            startup_delay: std::env::var("PULSE_STARTUP_DELAY_MS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(Duration::from_millis(1000)),
        }
    }
}

impl PulseDemoConfig {
    /// Load configuration from a TOML file (path via PULSE_CONFIG or
    /// ./pulse.toml), overlaying values onto env-driven defaults.
    pub fn load() -> Self {
        let default = Self::default();
        let path = std::env::var("PULSE_CONFIG").unwrap_or_else(|_| "pulse.toml".into());
        let p = Path::new(&path);
        if !p.exists() {
            tracing::info!(target: "pulse_dashboard", path = %path, "No TOML config found; using defaults/env");
            return default;
        }
        match fs::read_to_string(p) {
            Ok(s) => match toml::from_str::<PulseToml>(&s) {
                Ok(t) => t.overlay(default),
                Err(e) => {
                    tracing::warn!(target: "pulse_dashboard", error = %e, "Failed to parse TOML; using defaults");
                    default
                }
            },
            Err(e) => {
                tracing::warn!(target: "pulse_dashboard", error = %e, "Failed to read TOML; using defaults");
                default
            }
        }
    }
}

// =========================
// TOML overlay definitions
// =========================

#[derive(Debug, Clone, Default, serde::Deserialize)]
struct PulseToml {
    pub startup_delay_ms: Option<u64>,
    pub dashboard: Option<DashboardToml>,
    pub pipeline: Option<PipelineToml>,
    pub llm: Option<LlmToml>,
}

impl PulseToml {
    fn overlay(self, mut base: PulseDemoConfig) -> PulseDemoConfig {
        if let Some(ms) = self.startup_delay_ms {
            base.startup_delay = Duration::from_millis(ms);
        }
        if let Some(d) = self.dashboard {
            d.apply(&mut base.dashboard);
        }
        if let Some(p) = self.pipeline {
            p.apply(&mut base.pipeline);
        }
        if let Some(l) = self.llm {
            l.apply(&mut base.llm);
        }
        base
    }
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
struct DashboardToml {
    pub host: Option<String>,
    pub port: Option<u16>,
}
impl DashboardToml {
    fn apply(self, d: &mut DashboardConfig) {
        if let Some(v) = self.host {
            d.host = v;
        }
        if let Some(v) = self.port {
            d.port = v;
        }
    }
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
struct PipelineToml {
    pub record_delay_ms: Option<u64>,
    pub empty_read_delay_ms: Option<u64>,
}
impl PipelineToml {
    fn apply(self, p: &mut PipelineConfig) {
        if let Some(v) = self.record_delay_ms {
            p.record_delay = Duration::from_millis(v);
        }
        if let Some(v) = self.empty_read_delay_ms {
            p.empty_read_delay = Duration::from_millis(v);
        }
    }
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
struct LlmToml {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub request_timeout_ms: Option<u64>,
    pub temperature: Option<f32>,
}
impl LlmToml {
    fn apply(self, l: &mut SummaryConfig) {
        if let Some(x) = self.base_url {
            l.base_url = x;
        }
        if let Some(x) = self.model {
            l.model = x;
        }
        if let Some(x) = self.api_key {
            l.api_key = Some(x);
        }
        if let Some(x) = self.request_timeout_ms {
            l.request_timeout_ms = x;
        }
        if let Some(x) = self.temperature {
            l.temperature = x;
        }
    }
}
