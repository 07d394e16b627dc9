// Shared analyzed-record store
//
// Append-only sequence with a single writer (the pipeline consumer) and
// concurrent readers (HTTP handlers). The RwLock is the explicit
// synchronization the dashboard needs; readers never observe a partially
// appended sequence.

use crate::record::AnalyzedRecord;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::RwLock;

type Shared<T> = Arc<RwLock<T>>;

/// Process-wide analyzed-record sequence, in arrival order.
#[derive(Clone, Default)]
pub struct AnalyzedStore {
    records: Shared<Vec<AnalyzedRecord>>,
}

impl AnalyzedStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Append one record. Insertion order is arrival order, which is the
    /// interleaved-source order, not chronological date order.
    pub async fn append(&self, record: AnalyzedRecord) {
        self.records.write().await.push(record);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Full snapshot of the current sequence.
    pub async fn snapshot(&self) -> Vec<AnalyzedRecord> {
        self.records.read().await.clone()
    }

    /// Records with `date` in the half-open range `[start, end)`, in
    /// arrival order.
    pub async fn in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<AnalyzedRecord> {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.date >= start && r.date < end)
            .cloned()
            .collect()
    }
}
