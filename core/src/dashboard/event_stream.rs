// Pipeline event streaming for the dashboard
//
// Uses a tokio broadcast channel to stream pipeline progress to multiple
// SSE clients.

use crate::classify::IssueCategory;
use crate::record::{Sentiment, Source};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Event sent to dashboard clients as the pipeline progresses.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineEvent {
    /// Timestamp (ISO 8601)
    pub timestamp: String,
    /// Event type
    pub event_type: PipelineEventType,
    /// Record id, when the event concerns a single record
    pub record_id: Option<String>,
    /// Record source
    pub source: Option<Source>,
    /// Assigned issue category
    pub issue: Option<IssueCategory>,
    /// Fixed sentiment label
    pub sentiment: Option<Sentiment>,
    /// Records appended to the store so far
    pub processed: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineEventType {
    /// A record was enriched and appended to the store
    RecordAnalyzed,
    /// A record failed enrichment and was skipped
    RecordSkipped,
    /// The multiplexed tag sequence is exhausted
    PipelineComplete,
}

/// Broadcaster for pipeline events.
#[derive(Clone)]
pub struct RecordBroadcaster {
    sender: broadcast::Sender<PipelineEvent>,
}

impl RecordBroadcaster {
    /// Create a new broadcaster with buffer size
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Broadcast an event to all subscribers
    pub fn broadcast(&self, event: PipelineEvent) {
        // Ignore error if no subscribers
        let _ = self.sender.send(event);
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<PipelineEvent> {
        self.sender.subscribe()
    }

    /// Get number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for RecordBroadcaster {
    fn default() -> Self {
        Self::new(1000) // Buffer last 1000 events
    }
}
