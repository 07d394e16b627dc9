//! Dashboard Unit Tests
//!
//! Unit tests for dashboard components:
//! - RecordBroadcaster: SSE event broadcasting
//! - DashboardConfig: configuration management
//! - PipelineEvent: wire format

use pulse_core::dashboard::{PipelineEvent, PipelineEventType};
use pulse_core::{DashboardConfig, IssueCategory, RecordBroadcaster, Sentiment, Source};
use tokio::time::{sleep, Duration};

fn sample_event(id: &str, processed: usize) -> PipelineEvent {
    PipelineEvent {
        timestamp: chrono::Utc::now().to_rfc3339(),
        event_type: PipelineEventType::RecordAnalyzed,
        record_id: Some(id.to_string()),
        source: Some(Source::CallLog),
        issue: Some(IssueCategory::Network),
        sentiment: Some(Sentiment::Negative),
        processed,
    }
}

// =============================================================================
// RecordBroadcaster Tests
// =============================================================================

#[tokio::test]
async fn broadcaster_creates_with_capacity() {
    let broadcaster = RecordBroadcaster::new(100);
    assert_eq!(broadcaster.subscriber_count(), 0);
}

#[tokio::test]
async fn broadcaster_accepts_subscriptions() {
    let broadcaster = RecordBroadcaster::new(8);
    let _rx1 = broadcaster.subscribe();
    assert_eq!(broadcaster.subscriber_count(), 1);

    let _rx2 = broadcaster.subscribe();
    assert_eq!(broadcaster.subscriber_count(), 2);
}

#[tokio::test]
async fn broadcaster_delivers_to_all_subscribers() {
    let broadcaster = RecordBroadcaster::new(16);

    let mut rx1 = broadcaster.subscribe();
    let mut rx2 = broadcaster.subscribe();

    broadcaster.broadcast(sample_event("CALL_1", 1));

    let e1 = rx1.try_recv().expect("rx1 should receive event");
    let e2 = rx2.try_recv().expect("rx2 should receive event");

    assert_eq!(e1.record_id.as_deref(), Some("CALL_1"));
    assert_eq!(e2.record_id.as_deref(), Some("CALL_1"));
}

#[tokio::test]
async fn broadcaster_handles_no_subscribers() {
    let broadcaster = RecordBroadcaster::new(8);

    // Should not panic with no subscribers
    broadcaster.broadcast(sample_event("CALL_9", 9));
}

#[tokio::test]
async fn broadcaster_subscriber_drop_reduces_count() {
    let broadcaster = RecordBroadcaster::new(8);

    let rx1 = broadcaster.subscribe();
    let rx2 = broadcaster.subscribe();
    assert_eq!(broadcaster.subscriber_count(), 2);

    drop(rx1);
    sleep(Duration::from_millis(10)).await;
    assert_eq!(broadcaster.subscriber_count(), 1);

    drop(rx2);
    sleep(Duration::from_millis(10)).await;
    assert_eq!(broadcaster.subscriber_count(), 0);
}

#[tokio::test]
async fn broadcaster_preserves_event_order() {
    let broadcaster = RecordBroadcaster::new(16);
    let mut rx = broadcaster.subscribe();

    for i in 1..=5 {
        broadcaster.broadcast(sample_event(&format!("CALL_{i}"), i));
    }

    for i in 1..=5 {
        let event = rx.try_recv().expect("should receive event");
        assert_eq!(event.processed, i);
    }
}

// =============================================================================
// PipelineEvent Wire Format Tests
// =============================================================================

#[test]
fn pipeline_event_serializes_snake_case_types() {
    let json = serde_json::to_string(&sample_event("CALL_1", 1)).unwrap();
    assert!(json.contains("\"record_analyzed\""));
    assert!(json.contains("\"Call Log\""));
    assert!(json.contains("\"NEGATIVE\""));

    let complete = PipelineEvent {
        timestamp: chrono::Utc::now().to_rfc3339(),
        event_type: PipelineEventType::PipelineComplete,
        record_id: None,
        source: None,
        issue: None,
        sentiment: None,
        processed: 77,
    };
    let json = serde_json::to_string(&complete).unwrap();
    assert!(json.contains("\"pipeline_complete\""));
}

// =============================================================================
// DashboardConfig Tests
// =============================================================================

#[test]
fn dashboard_config_default_values() {
    let config = DashboardConfig::default();

    assert_eq!(config.port, 5001);
    assert_eq!(config.host, "127.0.0.1");
}

#[test]
fn dashboard_config_from_env_custom_port() {
    std::env::set_var("PULSE_DASHBOARD_PORT", "8080");

    let config = DashboardConfig::from_env();

    assert_eq!(config.port, 8080);

    std::env::remove_var("PULSE_DASHBOARD_PORT");
}

#[test]
fn dashboard_config_from_env_custom_host() {
    std::env::set_var("PULSE_DASHBOARD_HOST", "0.0.0.0");

    let config = DashboardConfig::from_env();

    assert_eq!(config.host, "0.0.0.0");

    std::env::remove_var("PULSE_DASHBOARD_HOST");
}
