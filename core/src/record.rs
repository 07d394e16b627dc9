// Contact record model and factory
//
// Immutable source records plus the enriched records the pipeline appends
// to the shared store.

use crate::classify::IssueCategory;
use crate::{PulseError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Calendar date format used by record construction and the HTTP API.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Sentiment label fixed at record creation; never derived from a score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// Where a contact record came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "Call Log")]
    CallLog,
    #[serde(rename = "Feedback Form")]
    FeedbackForm,
}

impl Source {
    /// Record id prefix (`CALL_n` / `FEEDBACK_n`).
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Source::CallLog => "CALL",
            Source::FeedbackForm => "FEEDBACK",
        }
    }

    /// User id prefix (`call_user_n` / `feedback_user_n`).
    pub fn user_prefix(&self) -> &'static str {
        match self {
            Source::CallLog => "call",
            Source::FeedbackForm => "feedback",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Source::CallLog => "Call Log",
            Source::FeedbackForm => "Feedback Form",
        }
    }
}

/// A raw customer contact, immutable once created.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContactRecord {
    pub record_id: String,
    pub date: NaiveDate,
    pub user_id: String,
    pub description: String,
    /// Ground-truth label attached at creation, independent of any score.
    pub fixed_sentiment: Sentiment,
    /// Auxiliary network fields (latency for call logs); empty for feedback.
    pub network: HashMap<String, i64>,
    pub source: Source,
}

/// A pipeline-enriched record, appended to the shared store and never
/// mutated afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalyzedRecord {
    pub record_id: String,
    pub source: Source,
    pub date: NaiveDate,
    pub user_id: String,
    pub description: String,
    /// Copied from the source record's `fixed_sentiment`.
    pub sentiment: Sentiment,
    pub issue: IssueCategory,
    /// Compound polarity in [-1, 1], display-only.
    pub sentiment_score: f64,
    /// Formatted latency for calls, "N/A" for feedback.
    pub extra_data: String,
}

/// Builds contact records with monotonically assigned, source-prefixed ids.
///
/// The factory owns the id counter, so ids are unique for as long as all
/// records of a run come from the same factory. Not `Sync` by design:
/// constructing records from multiple threads through one factory would
/// race the counter.
#[derive(Debug, Default)]
pub struct RecordFactory {
    counter: u64,
}

impl RecordFactory {
    pub fn new() -> Self {
        Self { counter: 0 }
    }

    /// Build a record from a `%Y-%m-%d` date string.
    ///
    /// Fails if the date string does not match the format; dataset
    /// construction treats that as fatal.
    pub fn create(
        &mut self,
        date_str: &str,
        source: Source,
        sentiment: Sentiment,
        description: &str,
        network: HashMap<String, i64>,
    ) -> Result<ContactRecord> {
        let date = NaiveDate::parse_from_str(date_str, DATE_FORMAT).map_err(|e| {
            PulseError::RecordError(format!("invalid record date {date_str:?}: {e}"))
        })?;

        self.counter += 1;

        Ok(ContactRecord {
            record_id: format!("{}_{}", source.id_prefix(), self.counter),
            date,
            user_id: format!("{}_user_{}", source.user_prefix(), self.counter),
            description: description.to_string(),
            fixed_sentiment: sentiment,
            network,
            source,
        })
    }

    /// Number of records created so far.
    pub fn created(&self) -> u64 {
        self.counter
    }
}
