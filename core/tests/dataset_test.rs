//! Narrative Dataset Tests
//!
//! Shape of the eagerly materialized 15-day narrative.

use chrono::Days;
use pulse_core::dataset::{narrative_start_date, NUM_DAYS};
use pulse_core::{NarrativeDataset, Sentiment, Source};
use std::collections::HashSet;

#[test]
fn narrative_has_both_sources_and_a_stable_total() {
    let dataset = NarrativeDataset::build().unwrap();

    assert!(!dataset.calls.is_empty());
    assert!(!dataset.feedbacks.is_empty());
    assert_eq!(
        dataset.expected_total(),
        dataset.calls.len() + dataset.feedbacks.len()
    );

    // The narrative is fixed; rebuilding yields the same shape.
    let again = NarrativeDataset::build().unwrap();
    assert_eq!(again.calls.len(), dataset.calls.len());
    assert_eq!(again.feedbacks.len(), dataset.feedbacks.len());
}

#[test]
fn all_dates_fall_inside_the_narrative_window() {
    let dataset = NarrativeDataset::build().unwrap();
    let start = narrative_start_date();
    let end = start + Days::new(NUM_DAYS);

    for record in dataset.calls.iter().chain(dataset.feedbacks.iter()) {
        assert!(record.date >= start && record.date < end);
    }
}

#[test]
fn sources_are_partitioned_correctly() {
    let dataset = NarrativeDataset::build().unwrap();

    assert!(dataset.calls.iter().all(|r| r.source == Source::CallLog));
    assert!(dataset
        .feedbacks
        .iter()
        .all(|r| r.source == Source::FeedbackForm));

    // Only call logs carry network data.
    assert!(dataset
        .calls
        .iter()
        .all(|r| r.network.contains_key("latency_ms")));
    assert!(dataset.feedbacks.iter().all(|r| r.network.is_empty()));
}

#[test]
fn record_ids_are_unique_across_the_narrative() {
    let dataset = NarrativeDataset::build().unwrap();

    let ids: HashSet<&str> = dataset
        .calls
        .iter()
        .chain(dataset.feedbacks.iter())
        .map(|r| r.record_id.as_str())
        .collect();
    assert_eq!(ids.len(), dataset.expected_total());
}

#[test]
fn day_five_carries_the_outage_spike() {
    let dataset = NarrativeDataset::build().unwrap();
    let outage_day = narrative_start_date() + Days::new(4);

    let negatives_on_outage_day = dataset
        .calls
        .iter()
        .chain(dataset.feedbacks.iter())
        .filter(|r| r.date == outage_day && r.fixed_sentiment == Sentiment::Negative)
        .count();

    // 9 negative calls plus 2 negative feedback forms.
    assert_eq!(negatives_on_outage_day, 11);

    let descriptions_mention_trouble = dataset
        .calls
        .iter()
        .filter(|r| r.date == outage_day)
        .all(|r| !r.description.is_empty());
    assert!(descriptions_mention_trouble);
}
