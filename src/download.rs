// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! Download: save the recording(s) currently on screen as `.mp4` files.
//!
//! Single layout saves the active item. Dual layout saves what both players
//! have loaded, the second file one second after the first.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::error::{ViewerError, Result};
use crate::player::{Layout, Viewer};
use crate::recording::Recording;

/// Delay between the two files of a dual download.
pub const DUAL_STAGGER: Duration = Duration::from_secs(1);

const MAX_FILENAME_LEN: usize = 50;

/// One file to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadItem {
    pub url: String,
    pub filename: String,
    /// Wait this long after the previous file before starting.
    #[serde(skip)]
    pub delay: Duration,
    pub delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadPlan {
    pub items: Vec<DownloadItem>,
    pub message: String,
}

/// Replace everything but ASCII letters and digits with `_`, capped at 50
/// characters.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(MAX_FILENAME_LEN)
        .collect()
}

fn item(rec: &Recording, delay: Duration) -> DownloadItem {
    DownloadItem {
        url: rec.url.clone(),
        filename: format!("{}.mp4", sanitize_filename(&rec.title)),
        delay,
        delay_ms: delay.as_millis() as u64,
    }
}

/// Work out which files a download of the current view saves.
pub fn plan(viewer: &Viewer) -> Result<DownloadPlan> {
    match viewer.layout() {
        Layout::Dual => {
            let playlist = viewer.playlist();
            let playback = viewer.playback();
            let main = playback.primary.as_deref().and_then(|u| playlist.find_by_url(u));
            let secondary = playback.secondary.as_deref().and_then(|u| playlist.find_by_url(u));

            let (Some(main), Some(secondary)) = (main, secondary) else {
                return Err(ViewerError::RecordingNotFound(
                    "Could not find video information for download".into(),
                ));
            };
            if main.is_streaming() || secondary.is_streaming() {
                return Err(ViewerError::StreamNotDownloadable);
            }
            Ok(DownloadPlan {
                items: vec![item(main, Duration::ZERO), item(secondary, DUAL_STAGGER)],
                message: "Download started for both camera angles".into(),
            })
        }
        Layout::Single => {
            let Some(current) = viewer.current() else {
                return Err(ViewerError::RecordingNotFound("No video found for download".into()));
            };
            if current.is_streaming() {
                return Err(ViewerError::StreamNotDownloadable);
            }
            Ok(DownloadPlan {
                items: vec![item(current, Duration::ZERO)],
                message: "Download started".into(),
            })
        }
    }
}

/// Fetch every planned file into `dir`. Returns the written paths.
pub async fn execute(client: &reqwest::Client, plan: &DownloadPlan, dir: &Path) -> Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(dir).await?;

    let mut written = Vec::with_capacity(plan.items.len());
    for entry in &plan.items {
        if !entry.delay.is_zero() {
            tokio::time::sleep(entry.delay).await;
        }

        let http_err = |e: reqwest::Error| ViewerError::Download {
            file: entry.filename.clone(),
            reason: e.to_string(),
        };
        let mut resp = client
            .get(&entry.url)
            .send()
            .await
            .map_err(http_err)?
            .error_for_status()
            .map_err(http_err)?;

        let path = dir.join(&entry.filename);
        let copied: Result<u64> = async {
            let mut out = tokio::fs::File::create(&path).await?;
            let mut bytes: u64 = 0;
            while let Some(chunk) = resp.chunk().await.map_err(http_err)? {
                out.write_all(&chunk).await?;
                bytes += chunk.len() as u64;
            }
            out.flush().await?;
            Ok::<u64, ViewerError>(bytes)
        }
        .await;

        let bytes = match copied {
            Ok(bytes) => bytes,
            Err(e) => {
                // No truncated files left behind.
                if let Err(rm) = tokio::fs::remove_file(&path).await {
                    warn!(output = ?path, error = %rm, "Cannot remove partial download");
                }
                return Err(e);
            }
        };

        info!(url = entry.url, output = ?path, bytes, "Recording downloaded");
        written.push(path);
    }
    Ok(written)
}
