// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! Recording model: the recorder's wire items and the playlist view model
//! derived from them.

use serde::{Deserialize, Serialize};

use crate::config::CameraConfig;
use crate::timefmt::format_date_range;

/// One item of a recorder `/recordings` response.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RawRecording {
    pub start_time: String,
    pub end_time: String,
    pub url: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Response envelope. A missing or null `data` field means no recordings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RecordingList {
    #[serde(default)]
    pub data: Option<Vec<RawRecording>>,
}

impl RecordingList {
    pub fn into_items(self) -> Vec<RawRecording> {
        self.data.unwrap_or_default()
    }
}

/// A playable playlist entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recording {
    pub title: String,
    pub url: String,
    /// `camera-{id}` of the camera that served the item.
    pub category: String,
    pub thumbnail: String,
    pub date: String,
    pub time: String,
    pub live: bool,
}

impl Recording {
    /// Map the `part`-th (0-based) item of camera number `camera_pos`
    /// (0-based, configuration order) into a playlist entry.
    pub fn from_raw(
        raw: RawRecording,
        camera: &CameraConfig,
        camera_pos: usize,
        part: usize,
        thumbnail: &str,
    ) -> Self {
        let label = format_date_range(&raw.start_time, &raw.end_time);
        Recording {
            title: format!("Cam{} - Part {}", camera_pos + 1, part + 1),
            url: raw.url,
            category: camera.category(),
            thumbnail: thumbnail.to_string(),
            date: label.date,
            time: label.time,
            live: false,
        }
    }

    /// Live items and RTSP sources cannot be saved to disk.
    pub fn is_streaming(&self) -> bool {
        self.live || self.url.starts_with("rtsp://")
    }
}
