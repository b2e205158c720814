// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! Viewer query parameters and the recorder query derived from them.
//!
//! Page parameters:
//!   booking_id   booking whose recordings are listed
//!   s, e         start / end of a time range (`yyyy-mm-dd hh:mm:ss`)
//!   c            camera id; absent means the default camera

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::config::CameraConfig;
use crate::error::{ViewerError, Result};
use crate::playlist::CameraFilter;

/// Query parameters of the viewer page. Empty values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ViewerQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c: Option<String>,
}

fn present(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

/// What the recorder is asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordingQuery {
    Range { start: String, end: String },
    Booking(String),
    Unfiltered,
}

impl ViewerQuery {
    /// A complete time range wins over a booking id.
    pub fn recording_query(&self) -> RecordingQuery {
        match (present(&self.s), present(&self.e), present(&self.booking_id)) {
            (Some(start), Some(end), _) => RecordingQuery::Range {
                start: start.to_string(),
                end: end.to_string(),
            },
            (_, _, Some(id)) => RecordingQuery::Booking(id.to_string()),
            _ => RecordingQuery::Unfiltered,
        }
    }

    /// Camera filter named by `c`, or the default camera.
    pub fn camera_filter(&self, default_camera: &str) -> CameraFilter {
        match present(&self.c).unwrap_or(default_camera) {
            "all" => CameraFilter::All,
            "live" => CameraFilter::Live,
            id => CameraFilter::Camera(id.to_string()),
        }
    }

    /// Query after switching camera: the default camera drops `c`.
    pub fn with_camera(&self, filter: &CameraFilter, default_camera: &str) -> Self {
        let mut next = self.clone();
        next.c = match filter {
            CameraFilter::Camera(id) if id == default_camera => None,
            CameraFilter::Camera(id) => Some(id.clone()),
            other => Some(other.to_string()),
        };
        next
    }

    /// Query after applying a time filter: booking is dropped.
    pub fn with_range(&self, start: String, end: String) -> Self {
        let mut next = self.clone();
        next.s = Some(start);
        next.e = Some(end);
        next.booking_id = None;
        next
    }

    /// Query after clearing the time filter.
    pub fn without_range(&self) -> Self {
        let mut next = self.clone();
        next.s = None;
        next.e = None;
        next
    }

    /// Encode as `?k=v&...`, or an empty string when nothing is set.
    pub fn to_query_string(&self) -> String {
        let pairs: Vec<(&str, &str)> = [
            ("booking_id", present(&self.booking_id)),
            ("s", present(&self.s)),
            ("e", present(&self.e)),
            ("c", present(&self.c)),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .collect();

        if pairs.is_empty() {
            return String::new();
        }
        // Any absolute base works; only the encoded query is kept.
        match Url::parse_with_params("http://localhost/", &pairs) {
            Ok(url) => format!("?{}", url.query().unwrap_or_default()),
            Err(_) => String::new(),
        }
    }
}

/// Recorder listing URL for `camera`.
pub fn recordings_url(base_url: &str, camera: &CameraConfig, query: &RecordingQuery) -> Result<Url> {
    let raw = format!(
        "{}/{}/recordings",
        base_url.trim_end_matches('/'),
        camera.category()
    );
    let mut url = Url::parse(&raw)
        .map_err(|e| ViewerError::Config(format!("Invalid recorder URL {raw:?}: {e}")))?;

    match query {
        RecordingQuery::Range { start, end } => {
            url.query_pairs_mut()
                .append_pair("start_time", start)
                .append_pair("end_time", end);
        }
        RecordingQuery::Booking(id) => {
            url.query_pairs_mut().append_pair("booking_id", id);
        }
        RecordingQuery::Unfiltered => {}
    }
    Ok(url)
}
