//! Shared fixtures: a three-camera config and a mock recorder API.

#![allow(dead_code)]

use std::net::SocketAddr;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use recplay::config::Config;
use recplay::fetch::build_playlist;
use recplay::playlist::Playlist;
use recplay::recording::RawRecording;

pub fn config_toml(base_url: &str, filter_store: &str) -> String {
    format!(
        r#"
[recorder]
base_url = "{base_url}"

[[cameras]]
id = "7554"
name = "Left"

[[cameras]]
id = "7555"
name = "Right"

[[cameras]]
id = "7556"
name = "Overview"

[viewer]
default_camera = "7554"
dual_cameras = ["7554", "7555"]
filter_store = "{filter_store}"
"#
    )
}

pub fn test_config() -> Config {
    Config::from_toml(&config_toml("http://127.0.0.1:1/api", "filters.json")).expect("config")
}

pub fn raw(start: &str, end: &str, url: &str) -> RawRecording {
    RawRecording {
        start_time: start.into(),
        end_time: end.into(),
        url: url.into(),
        category: None,
    }
}

pub fn cam_7554() -> Vec<RawRecording> {
    vec![
        raw("01-05-2025 6:00:00 PM", "01-05-2025 6:30:00 PM", "https://cdn.test/rec/7554/a.mp4"),
        raw("01-05-2025 6:30:00 PM", "01-05-2025 7:00:00 PM", "https://cdn.test/rec/7554/b.mp4"),
    ]
}

pub fn cam_7555() -> Vec<RawRecording> {
    vec![
        raw("01-05-2025 6:30:00 PM", "01-05-2025 7:00:00 PM", "https://cdn.test/rec/7555/b.mp4"),
        raw("01-05-2025 6:00:00 PM", "01-05-2025 6:30:00 PM", "https://cdn.test/rec/7555/a.mp4"),
    ]
}

pub fn cam_7556() -> Vec<RawRecording> {
    vec![raw("01-05-2025 5:00:00 PM", "01-05-2025 5:30:00 PM", "rtsp://cam.test/7556/live")]
}

pub fn fixture_playlist() -> Playlist {
    build_playlist(&test_config(), vec![cam_7554(), cam_7555(), cam_7556()])
}

#[derive(Deserialize)]
struct RecorderParams {
    booking_id: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
}

async fn recordings(
    Path(camera): Path<String>,
    Query(params): Query<RecorderParams>,
) -> axum::response::Response {
    if params.booking_id.as_deref() == Some("broken") {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    if params.booking_id.as_deref() == Some("empty") {
        return Json(serde_json::json!({})).into_response();
    }
    // One camera answers `data: null`, another a JSON 404; both mean "none".
    if params.booking_id.as_deref() == Some("partial") {
        match camera.as_str() {
            "camera-7555" => return Json(serde_json::json!({ "data": null })).into_response(),
            "camera-7556" => {
                return (
                    StatusCode::NOT_FOUND,
                    Json(serde_json::json!({ "message": "No recordings for this booking" })),
                )
                    .into_response();
            }
            _ => {}
        }
    }
    // Ranges only return the first camera's footage.
    if params.start_time.is_some() && params.end_time.is_some() && camera != "camera-7554" {
        return Json(serde_json::json!({ "data": [] })).into_response();
    }
    let data = match camera.as_str() {
        "camera-7554" => cam_7554(),
        "camera-7555" => cam_7555(),
        "camera-7556" => cam_7556(),
        _ => return StatusCode::NOT_FOUND.into_response(),
    };
    Json(serde_json::json!({ "data": data })).into_response()
}

async fn media(Path(file): Path<String>) -> impl IntoResponse {
    format!("video-bytes:{file}")
}

/// Sends part of a body, then fails the stream.
async fn media_cut() -> axum::body::Body {
    let parts: Vec<Result<&'static str, std::io::Error>> = vec![
        Ok("partial-video-bytes"),
        Err(std::io::Error::other("connection cut")),
    ];
    axum::body::Body::from_stream(futures::stream::iter(parts))
}

/// Start a mock recorder; returns its `/api` base URL.
pub async fn spawn_recorder() -> String {
    let app = Router::new()
        .route("/api/{camera}/recordings", get(recordings))
        .route("/media/{file}", get(media))
        .route("/media-cut/{file}", get(media_cut));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr: SocketAddr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock recorder");
    });
    format!("http://{addr}/api")
}
