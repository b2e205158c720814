// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! Merged playlist across cameras and the camera filter applied to it.

use std::fmt;
use std::str::FromStr;

use crate::error::ViewerError;
use crate::recording::Recording;

/// Camera selection: every camera, one camera, or the (unavailable) live feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraFilter {
    All,
    Camera(String),
    Live,
}

impl CameraFilter {
    /// Camera id for a single-camera selection (the part after `camera-`).
    pub fn camera_id(&self) -> Option<&str> {
        match self {
            CameraFilter::Camera(id) => Some(id),
            _ => None,
        }
    }

    pub fn matches(&self, rec: &Recording) -> bool {
        match self {
            CameraFilter::All => true,
            CameraFilter::Camera(id) => rec.category == format!("camera-{id}"),
            CameraFilter::Live => false,
        }
    }
}

impl FromStr for CameraFilter {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(CameraFilter::All),
            "live" => Ok(CameraFilter::Live),
            other => match other.strip_prefix("camera-") {
                Some(id) if !id.is_empty() => Ok(CameraFilter::Camera(id.to_string())),
                _ => Err(ViewerError::CameraNotFound { id: other.to_string() }),
            },
        }
    }
}

impl fmt::Display for CameraFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraFilter::All => f.write_str("all"),
            CameraFilter::Camera(id) => write!(f, "camera-{id}"),
            CameraFilter::Live => f.write_str("live"),
        }
    }
}

/// Ordered recordings: camera configuration order, then recorder order.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    items: Vec<Recording>,
    headline_date: Option<String>,
}

impl Playlist {
    pub fn new(items: Vec<Recording>, headline_date: Option<String>) -> Self {
        Self { items, headline_date }
    }

    /// Items visible under `filter`.
    pub fn filtered(&self, filter: &CameraFilter) -> Vec<&Recording> {
        self.items.iter().filter(|r| filter.matches(r)).collect()
    }

    /// First item of camera `camera_id` whose time label equals `time`.
    pub fn find_by_time(&self, camera_id: &str, time: &str) -> Option<&Recording> {
        let category = format!("camera-{camera_id}");
        self.items.iter().find(|r| r.category == category && r.time == time)
    }

    pub fn find_by_url(&self, url: &str) -> Option<&Recording> {
        self.items.iter().find(|r| r.url == url)
    }

    /// Date label of the first camera's recordings.
    pub fn headline_date(&self) -> Option<&str> {
        self.headline_date.as_deref()
    }

    pub fn items(&self) -> &[Recording] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Clamp `index` into `len`, falling back to the first item.
pub fn bounded_index(index: usize, len: usize) -> usize {
    if index < len { index } else { 0 }
}
