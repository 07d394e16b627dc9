//! Stream Multiplexer Tests
//!
//! Round-robin interleave with longer-tail fill, and the replay source
//! cursor contract.

use pulse_core::record::{RecordFactory, Sentiment, Source};
use pulse_core::stream::{interleave_tags, ReplaySource, SourceTag};
use std::collections::HashMap;

#[test]
fn interleaves_three_calls_with_five_feedbacks() {
    use SourceTag::{Call, Feedback};

    let tags = interleave_tags(3, 5);
    assert_eq!(
        tags,
        vec![Call, Feedback, Call, Feedback, Call, Feedback, Feedback, Feedback]
    );
}

#[test]
fn interleave_never_over_requests_a_source() {
    let tags = interleave_tags(3, 5);
    assert_eq!(tags.len(), 8);
    assert_eq!(tags.iter().filter(|t| **t == SourceTag::Call).count(), 3);
    assert_eq!(
        tags.iter().filter(|t| **t == SourceTag::Feedback).count(),
        5
    );
}

#[test]
fn interleave_handles_empty_sources() {
    assert!(interleave_tags(0, 0).is_empty());

    let only_calls = interleave_tags(4, 0);
    assert_eq!(only_calls, vec![SourceTag::Call; 4]);

    let only_feedback = interleave_tags(0, 2);
    assert_eq!(only_feedback, vec![SourceTag::Feedback; 2]);
}

#[test]
fn interleave_is_deterministic() {
    assert_eq!(interleave_tags(7, 4), interleave_tags(7, 4));
}

fn sample_records(count: usize) -> Vec<pulse_core::ContactRecord> {
    let mut factory = RecordFactory::new();
    (0..count)
        .map(|_| {
            factory
                .create(
                    "2025-10-05",
                    Source::CallLog,
                    Sentiment::Neutral,
                    "Standard inquiry.",
                    HashMap::new(),
                )
                .unwrap()
        })
        .collect()
}

#[test]
fn replay_source_drains_in_order() {
    let mut source = ReplaySource::new(sample_records(3));

    assert_eq!(source.len(), 3);
    assert!(source.has_more());
    assert_eq!(source.remaining(), 3);

    assert_eq!(source.next_record().unwrap().record_id, "CALL_1");
    assert_eq!(source.next_record().unwrap().record_id, "CALL_2");
    assert_eq!(source.remaining(), 1);
    assert_eq!(source.next_record().unwrap().record_id, "CALL_3");

    assert!(!source.has_more());
    assert!(source.next_record().is_none());
    // Reads past the end stay empty.
    assert!(source.next_record().is_none());
}

#[test]
fn empty_replay_source_has_nothing() {
    let mut source = ReplaySource::new(Vec::new());
    assert!(source.is_empty());
    assert!(!source.has_more());
    assert!(source.next_record().is_none());
}
