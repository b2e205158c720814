// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! Recorder client: fetch every camera's recordings and merge them into a
//! [`Playlist`].

use std::time::Duration;

use async_trait::async_trait;
use futures::future::try_join_all;
use tracing::{debug, error, info, warn};

use crate::config::{CameraConfig, Config};
use crate::error::{ViewerError, Result};
use crate::playlist::Playlist;
use crate::query::{recordings_url, RecordingQuery};
use crate::recording::{RawRecording, Recording, RecordingList};

/// Anything that can list a camera's recordings.
#[async_trait]
pub trait RecordingSource: Send + Sync {
    async fn fetch(&self, camera: &CameraConfig, query: &RecordingQuery) -> Result<Vec<RawRecording>>;
}

/// The recorder HTTP API.
pub struct HttpRecordingSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRecordingSource {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.recorder.timeout_secs))
            .build()
            .map_err(|e| ViewerError::Config(format!("HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.recorder.base_url.clone(),
        })
    }

    /// Shared client, reused for downloads.
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

#[async_trait]
impl RecordingSource for HttpRecordingSource {
    async fn fetch(&self, camera: &CameraConfig, query: &RecordingQuery) -> Result<Vec<RawRecording>> {
        let url = recordings_url(&self.base_url, camera, query)?;
        debug!(camera = camera.id, %url, "Fetching recordings");

        let http_err = |reason: String| ViewerError::Http {
            camera: camera.id.clone(),
            reason,
        };

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| http_err(e.to_string()))?;

        // Error statuses still carry a JSON body; only an undecodable body
        // fails the camera.
        let status = resp.status();
        if !status.is_success() {
            warn!(camera = camera.id, %status, "Recorder returned an error status");
        }

        let list: RecordingList = resp
            .json()
            .await
            .map_err(|e| ViewerError::Decode(format!("camera {} ({status}): {e}", camera.id)))?;
        Ok(list.into_items())
    }
}

/// Fetch all configured cameras concurrently and build the playlist.
///
/// One failing camera fails the whole load.
pub async fn fetch_playlist<S>(source: &S, config: &Config, query: &RecordingQuery) -> Result<Playlist>
where
    S: RecordingSource + ?Sized,
{
    let lists = try_join_all(config.cameras.iter().map(|cam| source.fetch(cam, query)))
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch recordings");
            e
        })?;

    let playlist = build_playlist(config, lists);
    info!(
        cameras = config.cameras.len(),
        recordings = playlist.len(),
        ?query,
        "Playlist loaded"
    );
    Ok(playlist)
}

/// Map per-camera lists (configuration order) into a playlist.
pub fn build_playlist(config: &Config, lists: Vec<Vec<RawRecording>>) -> Playlist {
    let thumbnail = &config.viewer.thumbnail;
    let mut headline_date = None;
    let mut items = Vec::new();

    for (pos, (camera, raws)) in config.cameras.iter().zip(lists).enumerate() {
        for (part, raw) in raws.into_iter().enumerate() {
            let rec = Recording::from_raw(raw, camera, pos, part, thumbnail);
            if pos == 0 {
                headline_date = Some(rec.date.clone());
            }
            items.push(rec);
        }
    }

    Playlist::new(items, headline_date)
}
