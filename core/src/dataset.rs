// Hand-crafted narrative dataset
//
// The demo replays a fixed 15-day story for the fictional carrier Helio:
// a stable baseline, a day-5 network outage, a recovery window, and a new
// stable baseline. All records are materialized eagerly at startup; the
// pipeline only paces their visibility.

use crate::record::{ContactRecord, RecordFactory, Sentiment, Source, DATE_FORMAT};
use crate::Result;
use chrono::{Days, NaiveDate};
use rand::Rng;
use std::collections::HashMap;
use std::ops::RangeInclusive;

/// Number of narrative days.
pub const NUM_DAYS: u64 = 15;

/// First day of the narrative.
pub fn narrative_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
}

fn latency(range: RangeInclusive<i64>) -> HashMap<String, i64> {
    let ms = rand::thread_rng().gen_range(range);
    HashMap::from([("latency_ms".to_string(), ms)])
}

/// The fixed call and feedback record lists for one run.
pub struct NarrativeDataset {
    pub calls: Vec<ContactRecord>,
    pub feedbacks: Vec<ContactRecord>,
}

impl NarrativeDataset {
    /// Materialize the full narrative.
    ///
    /// Fails fast on any malformed date string; a broken narrative is
    /// fatal to startup.
    pub fn build() -> Result<Self> {
        let mut factory = RecordFactory::new();
        let mut records: Vec<ContactRecord> = Vec::new();
        let start = narrative_start_date();
        let day = |offset: u64| (start + Days::new(offset)).format(DATE_FORMAT).to_string();

        // Days 1-4: baseline stability
        for i in 0..4 {
            let date = day(i);
            records.push(factory.create(
                &date,
                Source::CallLog,
                Sentiment::Positive,
                "The agent was fantastic, very friendly and helped me set up my new device line without any trouble.",
                latency(30..=80),
            )?);
            records.push(factory.create(
                &date,
                Source::CallLog,
                Sentiment::Neutral,
                "I called to change my payment method and update my address. Standard procedure.",
                latency(60..=100),
            )?);
            records.push(factory.create(
                &date,
                Source::CallLog,
                Sentiment::Negative,
                "My Helio app keeps crashing when I try to view my data usage. Very frustrating user experience.",
                latency(100..=200),
            )?);
            records.push(factory.create(
                &date,
                Source::FeedbackForm,
                Sentiment::Positive,
                "Excellent 5G coverage in downtown area, speeds are consistently fast!",
                HashMap::new(),
            )?);
            records.push(factory.create(
                &date,
                Source::FeedbackForm,
                Sentiment::Neutral,
                "The email marketing I received was a little confusing regarding the new plan.",
                HashMap::new(),
            )?);
        }

        // Day 5: major network outage
        let date = day(4);
        for _ in 0..8 {
            records.push(factory.create(
                &date,
                Source::CallLog,
                Sentiment::Negative,
                "My phone has zero service, zero bars! This is the worst network reliability I've ever experienced. I need this fixed immediately!",
                HashMap::from([("latency_ms".to_string(), 500)]),
            )?);
        }
        records.push(factory.create(
            &date,
            Source::CallLog,
            Sentiment::Negative,
            "I was on hold for over an hour and then the call dropped! Unacceptable support during a complete network failure.",
            HashMap::from([("latency_ms".to_string(), 650)]),
        )?);
        records.push(factory.create(
            &date,
            Source::FeedbackForm,
            Sentiment::Negative,
            "Complete network down in my area for 4 hours. No data, no calls. This is a business risk.",
            HashMap::new(),
        )?);
        records.push(factory.create(
            &date,
            Source::FeedbackForm,
            Sentiment::Negative,
            "Helio failed us today. Total lack of communication about the system outage.",
            HashMap::new(),
        )?);

        // Days 6-8: post-crisis recovery
        for i in 5..8 {
            let date = day(i);
            records.push(factory.create(
                &date,
                Source::CallLog,
                Sentiment::Positive,
                "I understand there was an outage, but the agent was extremely empathetic and applied a credit for my inconvenience. Thank you!",
                latency(80..=150),
            )?);
            records.push(factory.create(
                &date,
                Source::CallLog,
                Sentiment::Negative,
                "I need to know exactly how much credit I will receive for the downtime. I was told two different amounts!",
                latency(150..=250),
            )?);
            records.push(factory.create(
                &date,
                Source::CallLog,
                Sentiment::Neutral,
                "My signal is back, but my data speed is still slow compared to before the outage.",
                latency(100..=180),
            )?);
            records.push(factory.create(
                &date,
                Source::FeedbackForm,
                Sentiment::Positive,
                "The quick resolution and the proactive credit offered was fantastic customer service.",
                HashMap::new(),
            )?);
            records.push(factory.create(
                &date,
                Source::FeedbackForm,
                Sentiment::Negative,
                "The auto-pay failed because of the system issues. I was charged a late fee which is unfair!",
                HashMap::new(),
            )?);
            records.push(factory.create(
                &date,
                Source::FeedbackForm,
                Sentiment::Positive,
                "Network is fully functional now. Speeds seem even faster than before the issue.",
                HashMap::new(),
            )?);
        }

        // Days 9-15: new stable baseline
        for i in 8..NUM_DAYS {
            let date = day(i);
            records.push(factory.create(
                &date,
                Source::CallLog,
                Sentiment::Positive,
                "Just called to upgrade my plan. The agent made the process seamless and explained all the options clearly.",
                latency(30..=70),
            )?);
            records.push(factory.create(
                &date,
                Source::CallLog,
                Sentiment::Neutral,
                "Checking on the availability of the new iPhone model. Standard inquiry.",
                latency(50..=100),
            )?);
            records.push(factory.create(
                &date,
                Source::FeedbackForm,
                Sentiment::Positive,
                "I'm still impressed by the 5G speed! Helio clearly invested heavily in this.",
                HashMap::new(),
            )?);
            records.push(factory.create(
                &date,
                Source::FeedbackForm,
                Sentiment::Positive,
                "Resolved my issue through the app's chat feature in under five minutes. Perfect.",
                HashMap::new(),
            )?);
        }

        let (calls, feedbacks): (Vec<ContactRecord>, Vec<ContactRecord>) = records
            .into_iter()
            .partition(|r| r.source == Source::CallLog);

        Ok(Self { calls, feedbacks })
    }

    /// Total records a complete pipeline run is expected to produce.
    pub fn expected_total(&self) -> usize {
        self.calls.len() + self.feedbacks.len()
    }
}
