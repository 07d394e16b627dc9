// Pipeline consumer
//
// Drains the multiplexed record stream, enriches each record, and appends
// the result to the shared store. A consumer instance runs to completion
// exactly once; restart requires rebuilding it from the source lists.

use crate::classify::Classifier;
use crate::dashboard::{PipelineEvent, PipelineEventType, RecordBroadcaster};
use crate::record::{AnalyzedRecord, ContactRecord, Source};
use crate::sentiment::SentimentScorer;
use crate::store::AnalyzedStore;
use crate::stream::{interleave_tags, ReplaySource, SourceTag};
use crate::{PulseError, Result};
use std::time::Duration;
use tracing::{info, warn};

/// Pacing configuration for the consumer loop.
///
/// The delays simulate live arrival for the dashboard; they are not
/// backpressure.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Delay after each appended record.
    pub record_delay: Duration,
    /// Delay applied when a tag requests an exhausted source.
    pub empty_read_delay: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            record_delay: Duration::from_millis(50),
            empty_read_delay: Duration::from_millis(100),
        }
    }
}

impl PipelineConfig {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            record_delay: std::env::var("PULSE_RECORD_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(default.record_delay),
            empty_read_delay: std::env::var("PULSE_EMPTY_READ_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(default.empty_read_delay),
        }
    }
}

/// State machine over the two source cursors and the multiplexed tag
/// sequence. RUNNING while tags remain; COMPLETE once the sequence is
/// exhausted.
pub struct PipelineConsumer {
    calls: ReplaySource,
    feedbacks: ReplaySource,
    tags: Vec<SourceTag>,
    classifier: Classifier,
    scorer: SentimentScorer,
    store: AnalyzedStore,
    broadcaster: RecordBroadcaster,
    config: PipelineConfig,
}

impl PipelineConsumer {
    pub fn new(
        calls: Vec<ContactRecord>,
        feedbacks: Vec<ContactRecord>,
        store: AnalyzedStore,
        broadcaster: RecordBroadcaster,
        config: PipelineConfig,
    ) -> Self {
        let tags = interleave_tags(calls.len(), feedbacks.len());
        Self {
            calls: ReplaySource::new(calls),
            feedbacks: ReplaySource::new(feedbacks),
            tags,
            classifier: Classifier::new(),
            scorer: SentimentScorer::new(),
            store,
            broadcaster,
            config,
        }
    }

    /// Drain the tag sequence to completion.
    ///
    /// A record that fails enrichment is logged and skipped; the run
    /// continues with the next tag. Returns the number of records
    /// appended to the store.
    pub async fn run(mut self) -> usize {
        let tags = std::mem::take(&mut self.tags);
        let mut processed = 0usize;

        for tag in tags {
            let record = match tag {
                SourceTag::Call => self.calls.next_record(),
                SourceTag::Feedback => self.feedbacks.next_record(),
            };

            // Defensive: the interleave contract never requests an
            // exhausted source, but an empty read must not crash the run.
            let Some(record) = record else {
                warn!(target: "pipeline", ?tag, "Empty read from exhausted source");
                tokio::time::sleep(self.config.empty_read_delay).await;
                continue;
            };

            match self.enrich(&record) {
                Ok(analyzed) => {
                    processed += 1;
                    self.store.append(analyzed.clone()).await;
                    self.broadcaster.broadcast(PipelineEvent {
                        timestamp: chrono::Utc::now().to_rfc3339(),
                        event_type: PipelineEventType::RecordAnalyzed,
                        record_id: Some(analyzed.record_id),
                        source: Some(analyzed.source),
                        issue: Some(analyzed.issue),
                        sentiment: Some(analyzed.sentiment),
                        processed,
                    });
                }
                Err(e) => {
                    warn!(
                        target: "pipeline",
                        record_id = %record.record_id,
                        source = record.source.label(),
                        error = %e,
                        "Skipping record that failed enrichment"
                    );
                    self.broadcaster.broadcast(PipelineEvent {
                        timestamp: chrono::Utc::now().to_rfc3339(),
                        event_type: PipelineEventType::RecordSkipped,
                        record_id: Some(record.record_id.clone()),
                        source: Some(record.source),
                        issue: None,
                        sentiment: None,
                        processed,
                    });
                }
            }

            tokio::time::sleep(self.config.record_delay).await;
        }

        info!(target: "pipeline", processed, "Pipeline complete");
        self.broadcaster.broadcast(PipelineEvent {
            timestamp: chrono::Utc::now().to_rfc3339(),
            event_type: PipelineEventType::PipelineComplete,
            record_id: None,
            source: None,
            issue: None,
            sentiment: None,
            processed,
        });

        processed
    }

    /// Classify and score one record.
    ///
    /// The sentiment label is copied from the record's `fixed_sentiment`;
    /// the computed score rides along for display only.
    fn enrich(&self, record: &ContactRecord) -> Result<AnalyzedRecord> {
        if record.description.trim().is_empty() {
            return Err(PulseError::PipelineError(format!(
                "record {} has an empty description",
                record.record_id
            )));
        }

        let issue = self.classifier.classify(&record.description);
        let sentiment_score = self.scorer.score(&record.description);

        let extra_data = match record.source {
            Source::CallLog => match record.network.get("latency_ms") {
                Some(ms) => format!("Latency: {ms}ms"),
                None => "Latency: N/A".to_string(),
            },
            Source::FeedbackForm => "N/A".to_string(),
        };

        Ok(AnalyzedRecord {
            record_id: record.record_id.clone(),
            source: record.source,
            date: record.date,
            user_id: record.user_id.clone(),
            description: record.description.clone(),
            sentiment: record.fixed_sentiment,
            issue,
            sentiment_score,
            extra_data,
        })
    }
}
