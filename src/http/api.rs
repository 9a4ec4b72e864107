//! JSON view of the route table.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::time::Instant;

use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::RouteSummary;

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub path: String,
}

pub async fn list_routes(State(state): State<AppState>) -> Json<Vec<RouteSummary>> {
    let start = Instant::now();
    let routes = state.table.load().summaries();
    metrics::record_request("api", 200, start);
    Json(routes)
}

pub async fn resolve_route(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Response {
    let start = Instant::now();
    match state.table.load().resolve(&query.path) {
        Some(route) => {
            metrics::record_request("api", 200, start);
            Json(route).into_response()
        }
        None => {
            tracing::debug!(path = %query.path, "No route matched");
            metrics::record_request("api", 404, start);
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({
                    "error": "no route matches",
                    "path": query.path,
                })),
            )
                .into_response()
        }
    }
}
