//! HTTP surface: axum router, query-parameter decoding, and handlers.
//!
//! The dataset is loaded once in `main` and injected here as immutable
//! shared state. Every request recomputes the pipeline over it; handlers
//! never mutate anything.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::analytics::pipeline;
use crate::analytics::types::{DashboardData, FilterCriteria};
use crate::loader::Dataset;
use crate::render;

/// Raw dashboard query parameters as they arrive on the wire.
///
/// The selector params default to `"all"` in the page's form; both `"all"`
/// and malformed date strings decode to "no restriction" rather than a
/// request failure.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub driver: Option<String>,
    pub from_city: Option<String>,
    pub to_city: Option<String>,
}

impl DashboardQuery {
    pub fn into_criteria(self) -> FilterCriteria {
        FilterCriteria {
            date_from: self.date_from.as_deref().and_then(parse_bound),
            date_to: self.date_to.as_deref().and_then(parse_bound),
            driver: selection(self.driver),
            from_city: selection(self.from_city),
            to_city: selection(self.to_city),
        }
    }
}

/// Decodes an ISO date bound. An unparsable value drops the bound.
fn parse_bound(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            warn!(raw, "Unparsable date parameter, ignoring bound");
            None
        }
    }
}

/// Maps the `"all"` sentinel (and empty values) to "no restriction".
fn selection(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != "all")
}

/// Builds the application router over the shared dataset.
pub fn router(dataset: Arc<Dataset>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(dashboard_page))
        .route("/api/dashboard", get(dashboard_json))
        .route("/healthz", get(healthz))
        .with_state(dataset)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn dashboard_page(
    State(dataset): State<Arc<Dataset>>,
    Query(query): Query<DashboardQuery>,
) -> Html<String> {
    let data = pipeline::run(&dataset, &query.into_criteria());
    Html(render::page(&data))
}

async fn dashboard_json(
    State(dataset): State<Arc<Dataset>>,
    Query(query): Query<DashboardQuery>,
) -> Json<DashboardData> {
    Json(pipeline::run(&dataset, &query.into_criteria()))
}

async fn healthz() -> &'static str {
    "ok"
}
