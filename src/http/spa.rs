//! Static file serving with client-side route fallback.
//!
//! # Responsibilities
//! - Serve files from the built client directory
//! - Serve the index document for every other path under the base, so the
//!   client router can render it
//! - Tag fallback responses with the route the table resolved
//!
//! # Design Decisions
//! - Unmatched client routes still get the index document (200); rendering a
//!   not-found view is the client's job
//! - Paths outside the base path are 404
//! - Path traversal is rejected by `ServeDir`

use std::convert::Infallible;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{header::HeaderValue, request::Parts, Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

use crate::history::strip_base;
use crate::http::request::RequestIdExt;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Response header naming the route the fallback resolved to.
pub const X_ROUTE_NAME: &str = "x-route-name";

pub async fn spa_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    // Body is not Sync; keep only the parts across awaits.
    let (request, _) = request.into_parts();
    let request_id = request.request_id().to_string();

    if request.method != Method::GET && request.method != Method::HEAD {
        metrics::record_request("spa", 405, start);
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let path_and_query = request
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let Some(location) = strip_base(&state.base, path_and_query) else {
        tracing::debug!(request_id = %request_id, uri = %request.uri, "Outside base path");
        metrics::record_request("outside_base", 404, start);
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    };

    // Static assets first.
    if let Some(response) = serve_static(&state, &request, &location).await {
        metrics::record_request("static", response.status().as_u16(), start);
        return response;
    }

    let route = state.table.load().resolve(&location);
    let route_name = route.as_ref().map(|r| r.name.as_str());
    metrics::record_resolution(route_name);
    match route_name {
        Some(name) => tracing::debug!(request_id = %request_id, location = %location, route = name, "Serving index for route"),
        None => tracing::debug!(request_id = %request_id, location = %location, "Serving index for unmatched location"),
    }

    let index_request = rebuild(&request, Uri::from_static("/"));
    let mut response = into_axum(ServeFile::new(&state.index_file).oneshot(index_request).await);
    if response.status() == StatusCode::NOT_FOUND {
        tracing::error!(
            request_id = %request_id,
            index = ?state.index_file,
            "Index document is missing"
        );
        metrics::record_request("index", 404, start);
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    }

    if let Some(value) = route_name.and_then(|n| HeaderValue::from_str(n).ok()) {
        response.headers_mut().insert(X_ROUTE_NAME, value);
    }
    metrics::record_request("index", response.status().as_u16(), start);
    response
}

/// Try the static directory. `None` when no file exists at that path.
async fn serve_static(state: &AppState, request: &Parts, location: &str) -> Option<Response> {
    let path = location.split(['?', '#']).next().unwrap_or("/");
    if path == "/" {
        return None;
    }
    let uri: Uri = path.parse().ok()?;

    let dir = ServeDir::new(&state.static_dir).append_index_html_on_directories(false);
    let response = into_axum(dir.oneshot(rebuild(request, uri)).await);
    match response.status() {
        StatusCode::NOT_FOUND => None,
        _ => Some(response),
    }
}

/// Copy method and headers onto a new bodiless request for a file service.
fn rebuild(request: &Parts, uri: Uri) -> Request<Body> {
    let mut out = Request::new(Body::empty());
    *out.method_mut() = request.method.clone();
    *out.uri_mut() = uri;
    *out.headers_mut() = request.headers.clone();
    out
}

fn into_axum<B>(result: Result<axum::http::Response<B>, Infallible>) -> Response
where
    B: axum::body::HttpBody<Data = axum::body::Bytes> + Send + 'static,
    B::Error: Into<axum::BoxError>,
{
    match result {
        Ok(response) => response.map(Body::new),
        Err(never) => match never {},
    }
}
