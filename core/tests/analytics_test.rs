//! Analytics Tests
//!
//! Chart aggregates computed over analyzed-record snapshots.

use chrono::NaiveDate;
use pulse_core::analytics::{daily_happy_index, daily_negative_trend, issue_breakdown};
use pulse_core::{AnalyzedRecord, IssueCategory, Sentiment, Source};

fn record(day: u32, sentiment: Sentiment, issue: IssueCategory, source: Source) -> AnalyzedRecord {
    AnalyzedRecord {
        record_id: format!("CALL_{day}"),
        source,
        date: NaiveDate::from_ymd_opt(2025, 10, day).unwrap(),
        user_id: format!("call_user_{day}"),
        description: "sample".to_string(),
        sentiment,
        issue,
        sentiment_score: 0.0,
        extra_data: "N/A".to_string(),
    }
}

#[test]
fn issue_breakdown_groups_by_issue_sentiment_source() {
    let records = vec![
        record(1, Sentiment::Negative, IssueCategory::Network, Source::CallLog),
        record(1, Sentiment::Negative, IssueCategory::Network, Source::CallLog),
        record(2, Sentiment::Negative, IssueCategory::Network, Source::FeedbackForm),
        record(2, Sentiment::Positive, IssueCategory::Support, Source::CallLog),
    ];

    let rows = issue_breakdown(&records);
    assert_eq!(rows.len(), 3);

    let network_calls = rows
        .iter()
        .find(|r| {
            r.issue == IssueCategory::Network
                && r.sentiment == Sentiment::Negative
                && r.source == Source::CallLog
        })
        .unwrap();
    assert_eq!(network_calls.count, 2);

    let total: u64 = rows.iter().map(|r| r.count).sum();
    assert_eq!(total, records.len() as u64);
}

#[test]
fn negative_trend_counts_only_negative_records() {
    let records = vec![
        record(1, Sentiment::Negative, IssueCategory::Network, Source::CallLog),
        record(1, Sentiment::Positive, IssueCategory::Support, Source::CallLog),
        record(1, Sentiment::Negative, IssueCategory::Billing, Source::FeedbackForm),
        record(3, Sentiment::Negative, IssueCategory::Network, Source::CallLog),
    ];

    let trend = daily_negative_trend(&records);
    assert_eq!(trend.len(), 2);
    assert_eq!(trend[0].date, NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
    assert_eq!(trend[0].count, 2);
    assert_eq!(trend[1].date, NaiveDate::from_ymd_opt(2025, 10, 3).unwrap());
    assert_eq!(trend[1].count, 1);
}

#[test]
fn negative_trend_is_empty_without_negatives() {
    let records = vec![record(
        4,
        Sentiment::Positive,
        IssueCategory::Other,
        Source::CallLog,
    )];
    assert!(daily_negative_trend(&records).is_empty());
}

#[test]
fn happy_index_follows_the_formula() {
    // Day 1: 2 positive, 1 negative, 1 neutral -> (2 - 1) / 4 = 0.25
    let records = vec![
        record(1, Sentiment::Positive, IssueCategory::Other, Source::CallLog),
        record(1, Sentiment::Positive, IssueCategory::Other, Source::CallLog),
        record(1, Sentiment::Negative, IssueCategory::Other, Source::CallLog),
        record(1, Sentiment::Neutral, IssueCategory::Other, Source::CallLog),
    ];

    let series = daily_happy_index(&records);
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].total, 4);
    assert!((series[0].index - 0.25).abs() < f64::EPSILON);
}

#[test]
fn happy_index_stays_in_bounds() {
    let all_negative = vec![
        record(1, Sentiment::Negative, IssueCategory::Network, Source::CallLog),
        record(1, Sentiment::Negative, IssueCategory::Network, Source::CallLog),
    ];
    let series = daily_happy_index(&all_negative);
    assert_eq!(series[0].index, -1.0);

    let all_positive = vec![record(
        2,
        Sentiment::Positive,
        IssueCategory::Support,
        Source::CallLog,
    )];
    let series = daily_happy_index(&all_positive);
    assert_eq!(series[0].index, 1.0);

    for point in daily_happy_index(&all_negative) {
        assert!((-1.0..=1.0).contains(&point.index));
    }
}

#[test]
fn aggregates_over_empty_snapshots_are_empty() {
    assert!(issue_breakdown(&[]).is_empty());
    assert!(daily_negative_trend(&[]).is_empty());
    assert!(daily_happy_index(&[]).is_empty());
}
