// Dashboard HTTP API server
//
// Provides REST endpoints and SSE streaming for the dashboard UI

use crate::analytics;
use crate::dashboard::event_stream::RecordBroadcaster;
use crate::dashboard::DashboardConfig;
use crate::outage::{OutageEvent, OutageTable};
use crate::record::DATE_FORMAT;
use crate::store::AnalyzedStore;
use crate::summary::SummaryClient;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{
        sse::{Event, KeepAlive},
        Html, IntoResponse, Sse,
    },
    routing::{get, post},
    Json, Router,
};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tokio_stream::{wrappers::BroadcastStream, StreamExt};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

/// Dashboard server state
#[derive(Clone)]
struct DashboardState {
    store: AnalyzedStore,
    outages: Arc<OutageTable>,
    broadcaster: RecordBroadcaster,
    summarizer: Arc<SummaryClient>,
    expected_total: usize,
}

/// Dashboard HTTP server
pub struct DashboardServer {
    config: DashboardConfig,
    store: AnalyzedStore,
    outages: Arc<OutageTable>,
    broadcaster: RecordBroadcaster,
    summarizer: Arc<SummaryClient>,
    expected_total: usize,
}

impl DashboardServer {
    pub fn new(
        config: DashboardConfig,
        store: AnalyzedStore,
        outages: Arc<OutageTable>,
        broadcaster: RecordBroadcaster,
        summarizer: Arc<SummaryClient>,
        expected_total: usize,
    ) -> Self {
        Self {
            config,
            store,
            outages,
            broadcaster,
            summarizer,
            expected_total,
        }
    }

    /// Start the dashboard server
    pub async fn serve(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        info!(
            target: "dashboard",
            addr = %addr,
            "Starting dashboard server"
        );

        let state = DashboardState {
            store: self.store,
            outages: self.outages,
            broadcaster: self.broadcaster,
            summarizer: self.summarizer,
            expected_total: self.expected_total,
        };

        // Build router
        let app = Router::new()
            .route("/", get(index_handler))
            .route("/static/*asset", get(static_asset_handler))
            .route("/api/records", get(records_handler))
            .route("/api/records/stream", get(record_stream_handler))
            .route("/api/charts", get(charts_handler))
            .route("/api/outages", get(outages_handler))
            .route("/api/status", get(status_handler))
            .route("/api/summary", post(summary_handler))
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .with_state(state);

        // Start server
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!(
            target: "dashboard",
            url = %format!("http://{}", addr),
            "Dashboard server ready"
        );

        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Date-range filter, inclusive on both ends like the UI's date picker.
/// Missing bounds widen to the full dataset.
#[derive(Debug, Deserialize)]
struct RangeQuery {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl RangeQuery {
    /// Half-open `[start, end)` bounds for store and outage queries.
    fn bounds(&self) -> (NaiveDate, NaiveDate) {
        let start = self.start.unwrap_or(NaiveDate::MIN);
        let end = self
            .end
            .and_then(|d| d.checked_add_days(Days::new(1)))
            .unwrap_or(NaiveDate::MAX);
        (start, end)
    }

    fn label(&self) -> String {
        match (self.start, self.end) {
            (Some(s), Some(e)) => format!(
                "{} to {}",
                s.format(DATE_FORMAT),
                e.format(DATE_FORMAT)
            ),
            _ => "the full dataset".to_string(),
        }
    }
}

/// Serve the main HTML page
const FALLBACK_INDEX: &str = r#"<!DOCTYPE html><html><head><meta charset="utf-8"><title>Pulse Dashboard</title></head><body><h1>Pulse dashboard assets not found</h1></body></html>"#;

async fn index_handler() -> Html<&'static str> {
    let html = crate::dashboard::static_assets::get_text("index.html").unwrap_or(FALLBACK_INDEX);
    Html(html)
}

async fn static_asset_handler(Path(asset): Path<String>) -> impl IntoResponse {
    match crate::dashboard::static_assets::get(asset.as_str()) {
        Some(asset) => {
            let mut headers = HeaderMap::new();
            if let Ok(value) = header::HeaderValue::from_str(asset.content_type) {
                headers.insert(header::CONTENT_TYPE, value);
            }
            (StatusCode::OK, headers, asset.body).into_response()
        }
        None => {
            let headers = HeaderMap::new();
            (StatusCode::NOT_FOUND, headers, b"Not found".as_slice()).into_response()
        }
    }
}

/// Get the date-filtered analyzed-record snapshot
async fn records_handler(
    State(state): State<DashboardState>,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let (start, end) = query.bounds();
    let records = state.store.in_range(start, end).await;
    match serde_json::to_string(&records) {
        Ok(json) => Ok((StatusCode::OK, json)),
        Err(e) => {
            warn!(target: "dashboard", error = %e, "Failed to serialize records");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Chart aggregates for one date range.
#[derive(Debug, Serialize)]
struct ChartsResponse {
    issue_breakdown: Vec<analytics::IssueBreakdownRow>,
    negative_trend: Vec<analytics::DailyCount>,
    outages: Vec<OutageEvent>,
    happy_index: Vec<analytics::HappyIndexPoint>,
}

/// Get all four chart datasets for the filtered range
async fn charts_handler(
    State(state): State<DashboardState>,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let (start, end) = query.bounds();
    let records = state.store.in_range(start, end).await;

    let response = ChartsResponse {
        issue_breakdown: analytics::issue_breakdown(&records),
        negative_trend: analytics::daily_negative_trend(&records),
        outages: state.outages.query(start, end),
        happy_index: analytics::daily_happy_index(&records),
    };

    match serde_json::to_string(&response) {
        Ok(json) => Ok((StatusCode::OK, json)),
        Err(e) => {
            warn!(target: "dashboard", error = %e, "Failed to serialize charts");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get outage rows in the filtered range
async fn outages_handler(
    State(state): State<DashboardState>,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let (start, end) = query.bounds();
    match serde_json::to_string(&state.outages.query(start, end)) {
        Ok(json) => Ok((StatusCode::OK, json)),
        Err(e) => {
            warn!(target: "dashboard", error = %e, "Failed to serialize outages");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    processed: usize,
    expected: usize,
    complete: bool,
}

/// Pipeline progress for the footer status line
async fn status_handler(State(state): State<DashboardState>) -> Json<StatusResponse> {
    let processed = state.store.len().await;
    Json(StatusResponse {
        processed,
        expected: state.expected_total,
        complete: processed >= state.expected_total,
    })
}

/// SSE endpoint for real-time pipeline events
async fn record_stream_handler(
    State(state): State<DashboardState>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    info!(target: "dashboard", "New SSE client connected");

    let rx = state.broadcaster.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(event) => match serde_json::to_string(&event) {
            Ok(json) => Some(Ok(Event::default().data(json))),
            Err(e) => {
                warn!(target: "dashboard", error = %e, "Failed to serialize event");
                None
            }
        },
        Err(e) => {
            warn!(target: "dashboard", error = %e, "Broadcast error");
            None
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[derive(Debug, Deserialize)]
struct SummaryRequest {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct SummaryResponse {
    summary: Option<String>,
    error: Option<String>,
}

/// Run the AI analysis over the filtered snapshot.
///
/// Failures come back as human-readable messages in `error`; the HTTP
/// status stays 200 so the UI can always render the panel text.
async fn summary_handler(
    State(state): State<DashboardState>,
    Json(request): Json<SummaryRequest>,
) -> Json<SummaryResponse> {
    let range = RangeQuery {
        start: request.start,
        end: request.end,
    };
    let (start, end) = range.bounds();
    let records = state.store.in_range(start, end).await;

    match state.summarizer.summarize(&records, &range.label()).await {
        Ok(summary) => Json(SummaryResponse {
            summary: Some(summary),
            error: None,
        }),
        Err(e) => {
            warn!(target: "dashboard", error = %e, "Summary request failed");
            Json(SummaryResponse {
                summary: None,
                error: Some(e.to_string()),
            })
        }
    }
}
