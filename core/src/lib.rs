// Pulse Core Library
// Customer experience monitoring runtime: contact record pipeline and dashboard

pub mod analytics;
pub mod classify;
pub mod dashboard;
pub mod dataset;
pub mod outage;
pub mod pipeline;
pub mod record;
pub mod sentiment;
pub mod store;
pub mod stream;
pub mod summary;

// Export core types
pub use classify::{Classifier, IssueCategory};
pub use dashboard::{DashboardConfig, DashboardServer, PipelineEvent, RecordBroadcaster};
pub use dataset::NarrativeDataset;
pub use outage::{OutageEvent, OutageTable};
pub use pipeline::{PipelineConfig, PipelineConsumer};
pub use record::{AnalyzedRecord, ContactRecord, RecordFactory, Sentiment, Source};
pub use sentiment::SentimentScorer;
pub use store::AnalyzedStore;
pub use summary::{SummaryClient, SummaryConfig};

use std::sync::Arc;
use tokio::task::JoinHandle;

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PulseError {
    #[error("Record error: {0}")]
    RecordError(String),

    #[error("Pipeline error: {0}")]
    PipelineError(String),

    #[error("Summary error: {0}")]
    SummaryError(String),

    #[error("Dashboard error: {0}")]
    DashboardError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
pub type Result<T> = std::result::Result<T, PulseError>;

/// Core runtime: one fully wired monitoring run.
///
/// Owns the shared analyzed-record store, the outage table, and the
/// broadcast channel, and holds the pipeline consumer until `start` hands
/// it to a background task. A consumer is one-shot; build a new `Pulse`
/// to run the narrative again.
pub struct Pulse {
    pub store: AnalyzedStore,
    pub outages: Arc<OutageTable>,
    pub broadcaster: RecordBroadcaster,
    pub expected_total: usize,
    consumer: Option<PipelineConsumer>,
}

impl Pulse {
    /// Materialize the narrative dataset and wire up all components.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let dataset = NarrativeDataset::build()?;
        let expected_total = dataset.expected_total();

        let store = AnalyzedStore::new();
        let outages = Arc::new(OutageTable::narrative(dataset::narrative_start_date()));
        let broadcaster = RecordBroadcaster::default();

        let consumer = PipelineConsumer::new(
            dataset.calls,
            dataset.feedbacks,
            store.clone(),
            broadcaster.clone(),
            config,
        );

        Ok(Self {
            store,
            outages,
            broadcaster,
            expected_total,
            consumer: Some(consumer),
        })
    }

    /// Start the pipeline consumer in a background task.
    ///
    /// May be called exactly once per `Pulse`; the returned handle resolves
    /// to the number of records processed.
    pub fn start(&mut self) -> Result<JoinHandle<usize>> {
        let consumer = self
            .consumer
            .take()
            .ok_or_else(|| PulseError::PipelineError("pipeline already started".to_string()))?;

        tracing::info!(target: "pulse", expected = self.expected_total, "Starting pipeline consumer");
        Ok(tokio::spawn(consumer.run()))
    }
}
