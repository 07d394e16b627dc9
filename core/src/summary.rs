// Executive summary client
//
// Sends the filtered analyzed records to an OpenAI-compatible
// chat-completions endpoint and returns the prose report. Transient
// server errors are retried with exponential backoff; everything else is
// surfaced as a distinct human-readable failure.

use crate::classify::IssueCategory;
use crate::record::{AnalyzedRecord, Sentiment, Source};
use crate::{PulseError, Result};
use chrono::NaiveDate;
use reqwest::Client;
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

/// At most this many of the most recent filtered records are sent.
const MAX_RECORDS: usize = 50;

const SYSTEM_PROMPT: &str = "You are a Senior Customer Experience Analyst for a major telecom company. \
Analyze the provided JSON data of customer contacts (Call Logs and Feedback Forms). \
Provide a concise, professional, and actionable report focused on the filter period. \
1. **Executive Summary:** A two-sentence summary of the overall sentiment and primary issue during this period. \
2. **Key Findings:** Detail the most critical issue, noting any difference between Call Logs and Feedback Forms. \
3. **Recommendation:** Offer one specific, immediate action to improve the customer experience. \
Format your response clearly using markdown headings and bold text.";

/// Configuration for SummaryClient loaded from environment variables
#[derive(Debug, Clone)]
pub struct SummaryConfig {
    pub base_url: String, // e.g., http://localhost:8000/v1
    pub model: String,
    pub api_key: Option<String>,
    pub request_timeout_ms: u64,
    pub temperature: f32,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("PULSE_LLM_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "http://localhost:8000/v1".to_string()),
            model: std::env::var("PULSE_LLM_MODEL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "qwen2.5-0.5b-instruct".to_string()),
            api_key: std::env::var("PULSE_LLM_API_KEY").ok().filter(|s| !s.is_empty()),
            request_timeout_ms: std::env::var("PULSE_LLM_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(30_000),
            temperature: std::env::var("PULSE_LLM_TEMPERATURE")
                .ok()
                .and_then(|v| v.parse::<f32>().ok())
                .unwrap_or(0.3),
        }
    }
}

/// Retry policy for transient endpoint failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub backoff_multiplier: f64,
    pub retryable_status_codes: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            backoff_multiplier: 2.0,
            retryable_status_codes: vec![429, 500, 503],
        }
    }
}

impl RetryPolicy {
    /// Delay before the attempt after `attempt` (0-based) has failed.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.initial_delay
            .mul_f64(self.backoff_multiplier.powi(attempt as i32))
    }

    pub fn is_retryable(&self, status: u16) -> bool {
        self.retryable_status_codes.contains(&status)
    }
}

/// Subset of analyzed-record fields sent to the endpoint.
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    date: NaiveDate,
    issue: IssueCategory,
    sentiment: Sentiment,
    description: &'a str,
    source: Source,
}

/// HTTP client for the summarization endpoint.
#[derive(Clone)]
pub struct SummaryClient {
    http: Client,
    cfg: SummaryConfig,
    retry: RetryPolicy,
}

impl SummaryClient {
    pub fn new(cfg: SummaryConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(cfg.request_timeout_ms))
            .build()
            .map_err(|e| PulseError::SummaryError(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            cfg,
            retry: RetryPolicy::default(),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(SummaryConfig::default())
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Summarize the filtered records for the given date-range label.
    ///
    /// Sends at most the 50 most recent records. Errors are distinct,
    /// human-readable messages: missing key and empty data never touch
    /// the network; 429/500/503 retry with exponential backoff before
    /// surfacing a final failure; other non-success statuses and network
    /// or parse failures are terminal.
    pub async fn summarize(
        &self,
        records: &[AnalyzedRecord],
        date_range_label: &str,
    ) -> Result<String> {
        if self.cfg.api_key.is_none() {
            return Err(PulseError::SummaryError(
                "API key missing: set PULSE_LLM_API_KEY to enable AI analysis".to_string(),
            ));
        }
        if records.is_empty() {
            return Err(PulseError::SummaryError(
                "No data for analysis: the current filter selections returned no records"
                    .to_string(),
            ));
        }

        let tail_start = records.len().saturating_sub(MAX_RECORDS);
        let rows: Vec<SummaryRow<'_>> = records[tail_start..]
            .iter()
            .map(|r| SummaryRow {
                date: r.date,
                issue: r.issue,
                sentiment: r.sentiment,
                description: &r.description,
                source: r.source,
            })
            .collect();
        let data_json = serde_json::to_string_pretty(&rows)?;

        let user_query = format!(
            "Analyze the following recent customer contact data (filtered for {date_range_label}). \
             DATA (Top {MAX_RECORDS} Records):\n```json\n{data_json}\n```"
        );

        let url = format!(
            "{}/chat/completions",
            self.cfg.base_url.trim_end_matches('/')
        );
        let body = json!({
            "model": self.cfg.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": user_query},
            ],
            "temperature": self.cfg.temperature,
        });

        for attempt in 0..self.retry.max_attempts {
            debug!(target: "summary", %url, attempt, "POST chat completions");

            let mut req = self.http.post(&url).header("content-type", "application/json");
            if let Some(key) = &self.cfg.api_key {
                req = req.bearer_auth(key);
            }

            let resp = req.json(&body).send().await.map_err(|e| {
                PulseError::SummaryError(format!(
                    "Network error: could not reach the summarization endpoint: {e}"
                ))
            })?;

            let status = resp.status();
            if status.is_success() {
                let val: serde_json::Value = resp.json().await.map_err(|e| {
                    PulseError::SummaryError(format!("Failed to parse endpoint JSON: {e}"))
                })?;
                return extract_text_from_chat_completions(&val).ok_or_else(|| {
                    PulseError::SummaryError(
                        "Malformed response: endpoint returned no assistant text".to_string(),
                    )
                });
            }

            if self.retry.is_retryable(status.as_u16()) {
                let delay = self.retry.delay_for(attempt);
                warn!(
                    target: "summary",
                    %status,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Transient endpoint error; backing off"
                );
                if attempt + 1 < self.retry.max_attempts {
                    tokio::time::sleep(delay).await;
                }
                continue;
            }

            let text = resp.text().await.unwrap_or_default();
            return Err(PulseError::SummaryError(format!(
                "Analysis error (HTTP {status}): {text}"
            )));
        }

        Err(PulseError::SummaryError(format!(
            "Analysis failed: the endpoint did not return a valid response after {} attempts",
            self.retry.max_attempts
        )))
    }
}

fn extract_text_from_chat_completions(v: &serde_json::Value) -> Option<String> {
    v.get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
        .map(|s| s.to_string())
}
