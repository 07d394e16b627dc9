// Chart-ready aggregates over analyzed records
//
// Pure functions over a snapshot; the dashboard API serializes these
// directly. Rendering stays in the UI.

use crate::classify::IssueCategory;
use crate::record::{AnalyzedRecord, Sentiment, Source};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One bar of the issue-volume chart: count per (issue, sentiment, source).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IssueBreakdownRow {
    pub issue: IssueCategory,
    pub sentiment: Sentiment,
    pub source: Source,
    pub count: u64,
}

/// One point of a per-day count series.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// One point of the daily happy index: `(positive - negative) / total`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HappyIndexPoint {
    pub date: NaiveDate,
    pub index: f64,
    pub total: u64,
}

/// Counts grouped by (issue, sentiment, source), in stable key order.
pub fn issue_breakdown(records: &[AnalyzedRecord]) -> Vec<IssueBreakdownRow> {
    let mut counts: BTreeMap<(IssueCategory, Sentiment, Source), u64> = BTreeMap::new();
    for record in records {
        *counts
            .entry((record.issue, record.sentiment, record.source))
            .or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|((issue, sentiment, source), count)| IssueBreakdownRow {
            issue,
            sentiment,
            source,
            count,
        })
        .collect()
}

/// Per-date count of NEGATIVE records, ascending by date. Days without a
/// negative record are omitted.
pub fn daily_negative_trend(records: &[AnalyzedRecord]) -> Vec<DailyCount> {
    let mut counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in records {
        if record.sentiment == Sentiment::Negative {
            *counts.entry(record.date).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect()
}

/// Daily happy index, ascending by date. The index is always in [-1, 1];
/// a day with no records would be 0, but such days are simply absent from
/// the series.
pub fn daily_happy_index(records: &[AnalyzedRecord]) -> Vec<HappyIndexPoint> {
    #[derive(Default)]
    struct DayTally {
        positive: u64,
        negative: u64,
        total: u64,
    }

    let mut days: BTreeMap<NaiveDate, DayTally> = BTreeMap::new();
    for record in records {
        let tally = days.entry(record.date).or_default();
        tally.total += 1;
        match record.sentiment {
            Sentiment::Positive => tally.positive += 1,
            Sentiment::Negative => tally.negative += 1,
            Sentiment::Neutral => {}
        }
    }

    days.into_iter()
        .map(|(date, tally)| {
            let index = if tally.total > 0 {
                (tally.positive as f64 - tally.negative as f64) / tally.total as f64
            } else {
                0.0
            };
            HappyIndexPoint {
                date,
                index,
                total: tally.total,
            }
        })
        .collect()
}
