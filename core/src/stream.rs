// Record sources and stream multiplexing
//
// Two finite, pre-built record lists are replayed behind monotonic
// cursors and interleaved round-robin into a single tag sequence.

use crate::record::ContactRecord;
use std::sync::Arc;

/// Which source the next pipeline read should come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceTag {
    Call,
    Feedback,
}

/// Round-robin interleave of two finite sources.
///
/// Tags alternate call/feedback while both remain; once one source is
/// exhausted the remaining tags come from the other in original order.
pub fn interleave_tags(call_count: usize, feedback_count: usize) -> Vec<SourceTag> {
    let mut tags = Vec::with_capacity(call_count + feedback_count);
    let pairs = call_count.max(feedback_count);
    for i in 0..pairs {
        if i < call_count {
            tags.push(SourceTag::Call);
        }
        if i < feedback_count {
            tags.push(SourceTag::Feedback);
        }
    }
    tags
}

/// Replays a pre-built record list in order.
///
/// Restartable only by constructing a new source over the same list.
pub struct ReplaySource {
    records: Arc<Vec<ContactRecord>>,
    position: usize,
}

impl ReplaySource {
    pub fn new(records: Vec<ContactRecord>) -> Self {
        Self {
            records: Arc::new(records),
            position: 0,
        }
    }

    /// Next record, advancing the cursor; `None` once exhausted.
    pub fn next_record(&mut self) -> Option<ContactRecord> {
        let record = self.records.get(self.position).cloned()?;
        self.position += 1;
        Some(record)
    }

    pub fn has_more(&self) -> bool {
        self.position < self.records.len()
    }

    pub fn remaining(&self) -> usize {
        self.records.len() - self.position
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
