// Static outage event table
//
// Read-only after construction; queried by half-open date range.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// One reported outage day.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutageEvent {
    pub date: NaiveDate,
    pub reported_count: u32,
    pub issue: String,
}

/// Lookup table of outage events, in stable insertion order.
#[derive(Clone, Debug, Default)]
pub struct OutageTable {
    rows: Vec<OutageEvent>,
}

impl OutageTable {
    pub fn new(rows: Vec<OutageEvent>) -> Self {
        Self { rows }
    }

    /// The demo narrative's outage week: a total failure on day 5 with
    /// degraded service on the two days after.
    pub fn narrative(start_date: NaiveDate) -> Self {
        let day = |offset: u64| start_date + Days::new(offset);
        Self::new(vec![
            OutageEvent {
                date: day(4),
                reported_count: 450,
                issue: "Total Network Failure".to_string(),
            },
            OutageEvent {
                date: day(5),
                reported_count: 150,
                issue: "4G/5G Slowdown".to_string(),
            },
            OutageEvent {
                date: day(6),
                reported_count: 75,
                issue: "App Log-in Failure".to_string(),
            },
        ])
    }

    /// Rows with `date` in `[start, end)`, in table order. Idempotent.
    pub fn query(&self, start: NaiveDate, end: NaiveDate) -> Vec<OutageEvent> {
        self.rows
            .iter()
            .filter(|row| row.date >= start && row.date < end)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
