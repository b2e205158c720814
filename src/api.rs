// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! HTTP API for the viewer page.
//!
//! Endpoints (all take the page query `booking_id`, `s`, `e`, `c`):
//!   GET    /api/playlist?index=N     → playlist view with loaded sources
//!   GET    /api/next?index=N         → view after item N ended (204 at end)
//!   GET    /api/download?index=N     → download plan for the view
//!   GET    /api/filter               → time filter form values
//!   POST   /api/filter               → validate + store filter, returns query
//!   DELETE /api/filter               → clear filter, returns query
//!
//! Page assets are served from `api.static_dir` when configured.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::download;
use crate::error::ViewerError;
use crate::fetch::{fetch_playlist, RecordingSource};
use crate::filters::{self, FilterStore, TimeRangeInput};
use crate::player::{Layout, Playback, PlaylistRow, Viewer};
use crate::query::ViewerQuery;

/// Shared state passed to all handlers.
pub struct AppState {
    pub config: Config,
    pub source: Arc<dyn RecordingSource>,
    pub filters: Mutex<FilterStore>,
}

impl AppState {
    pub fn new(config: Config, source: Arc<dyn RecordingSource>) -> Self {
        let store = FilterStore::new(config.viewer.filter_store.clone());
        Self { config, source, filters: Mutex::new(store) }
    }
}

// ──────────────── request / response types ────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ViewParams {
    booking_id: Option<String>,
    s: Option<String>,
    e: Option<String>,
    c: Option<String>,
    index: Option<usize>,
}

impl ViewParams {
    fn query(&self) -> ViewerQuery {
        ViewerQuery {
            booking_id: self.booking_id.clone(),
            s: self.s.clone(),
            e: self.e.clone(),
            c: self.c.clone(),
        }
    }
}

#[derive(Serialize)]
struct PlaylistView<'a> {
    camera: String,
    layout: Layout,
    date: Option<&'a str>,
    current_index: Option<usize>,
    items: Vec<PlaylistRow<'a>>,
    playback: &'a Playback,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

#[derive(Serialize)]
struct FilterResponse {
    start: String,
    end: String,
    /// Query string the page should navigate to.
    query: String,
}

// ──────────────── router ──────────────────────────────────────────────────

/// Build the axum router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_dir = state.config.api.static_dir.clone();
    let router = Router::new()
        .route("/api/playlist", get(handle_playlist))
        .route("/api/next", get(handle_next))
        .route("/api/download", get(handle_download))
        .route(
            "/api/filter",
            get(handle_filter_get).post(handle_filter_submit).delete(handle_filter_clear),
        )
        .layer(CorsLayer::permissive())
        .with_state(state);

    match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}

/// Start the HTTP server on `port`.
pub async fn start_server(state: Arc<AppState>, port: u16) {
    let addr = format!("0.0.0.0:{}", port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            error!(error = %e, "Failed to bind HTTP server");
            return;
        }
    };
    info!(port, "HTTP API listening on http://{}", addr);
    serve(listener, state).await;
}

/// Serve on an already bound listener.
pub async fn serve(listener: tokio::net::TcpListener, state: Arc<AppState>) {
    let app = build_router(state);
    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "HTTP server error");
    }
}

// ──────────────── helpers ─────────────────────────────────────────────────

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

fn viewer_error_response(err: &ViewerError) -> Response {
    match err {
        // Recorder details stay in the log.
        ViewerError::Http { .. } | ViewerError::Decode(_) => {
            error_response(StatusCode::BAD_GATEWAY, "Error loading playlist.")
        }
        ViewerError::InvalidFilter(_)
        | ViewerError::LiveUnavailable
        | ViewerError::StreamNotDownloadable
        | ViewerError::Unsupported(_) => error_response(StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
        ViewerError::CameraNotFound { .. }
        | ViewerError::RecordingNotFound(_)
        | ViewerError::NoRecordings => {
            error_response(StatusCode::NOT_FOUND, err.to_string())
        }
        _ => error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

/// Fetch the playlist for `params` and select the requested camera and item.
async fn load_viewer(state: &AppState, params: &ViewParams) -> Result<Viewer, ViewerError> {
    let query = params.query();
    let playlist = fetch_playlist(state.source.as_ref(), &state.config, &query.recording_query()).await?;

    let mut viewer = Viewer::new(playlist, state.config.dual_pair());
    let loaded = viewer
        .apply_filter(query.camera_filter(state.config.default_camera()))?
        .is_some();
    if loaded {
        if let Some(index) = params.index {
            viewer.load(index)?;
        }
    }
    Ok(viewer)
}

fn render(viewer: &Viewer) -> Response {
    let rows = viewer.rows();
    let message = if viewer.playlist().is_empty() {
        Some("No recordings found for this booking.")
    } else if rows.is_empty() {
        Some("No video available for this camera.")
    } else {
        None
    };
    let view = PlaylistView {
        camera: viewer.filter().to_string(),
        layout: viewer.layout(),
        date: viewer.playlist().headline_date(),
        current_index: (!rows.is_empty()).then_some(viewer.current_index()),
        items: rows,
        playback: viewer.playback(),
        message,
    };
    (StatusCode::OK, Json(view)).into_response()
}

// ──────────────── handlers ────────────────────────────────────────────────

async fn handle_playlist(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ViewParams>,
) -> Response {
    match load_viewer(&state, &params).await {
        Ok(viewer) => render(&viewer),
        Err(e) => viewer_error_response(&e),
    }
}

async fn handle_next(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ViewParams>,
) -> Response {
    let mut viewer = match load_viewer(&state, &params).await {
        Ok(v) => v,
        Err(e) => return viewer_error_response(&e),
    };
    match viewer.on_ended() {
        Ok(Some(_)) => render(&viewer),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => viewer_error_response(&e),
    }
}

async fn handle_download(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ViewParams>,
) -> Response {
    let viewer = match load_viewer(&state, &params).await {
        Ok(v) => v,
        Err(e) => return viewer_error_response(&e),
    };
    match download::plan(&viewer) {
        Ok(plan) => (StatusCode::OK, Json(plan)).into_response(),
        Err(e) => {
            warn!(error = %e, "Download rejected");
            viewer_error_response(&e)
        }
    }
}

async fn handle_filter_get(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ViewParams>,
) -> Response {
    let query = params.query();
    let values = filters::initial_values(&query, &state.filters.lock());
    let resp = FilterResponse {
        start: values.start,
        end: values.end,
        query: query.to_query_string(),
    };
    (StatusCode::OK, Json(resp)).into_response()
}

async fn handle_filter_submit(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ViewParams>,
    Json(input): Json<TimeRangeInput>,
) -> Response {
    let result = filters::submit(&input, &state.filters.lock(), &params.query());
    match result {
        Ok(next) => {
            let resp = FilterResponse {
                start: input.start,
                end: input.end,
                query: next.to_query_string(),
            };
            (StatusCode::OK, Json(resp)).into_response()
        }
        Err(e) => viewer_error_response(&e),
    }
}

async fn handle_filter_clear(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ViewParams>,
) -> Response {
    let result = filters::clear(&state.filters.lock(), &params.query());
    match result {
        Ok(next) => {
            let resp = FilterResponse {
                start: String::new(),
                end: String::new(),
                query: next.to_query_string(),
            };
            (StatusCode::OK, Json(resp)).into_response()
        }
        Err(e) => viewer_error_response(&e),
    }
}
