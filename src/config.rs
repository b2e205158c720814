// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use crate::error::{ViewerError, Result};

/// Top-level configuration loaded from a TOML file.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Upstream recorder API.
    pub recorder: RecorderConfig,
    /// Cameras whose recordings make up the playlist, in display order.
    pub cameras: Vec<CameraConfig>,
    /// Player / playlist behaviour.
    #[serde(default)]
    pub viewer: ViewerConfig,
    /// HTTP API configuration (optional).
    #[serde(default)]
    pub api: ApiConfig,
}

/// Recorder API endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct RecorderConfig {
    /// Base URL; recordings live at `{base_url}/camera-{id}/recordings`.
    pub base_url: String,
    /// Per-request timeout.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Per-camera configuration.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CameraConfig {
    /// Recorder camera number, e.g. `7554`.
    pub id: String,
    /// Human-readable label shown in listings.
    #[serde(default)]
    pub name: String,
}

impl CameraConfig {
    /// Playlist category for items served by this camera.
    pub fn category(&self) -> String {
        format!("camera-{}", self.id)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ViewerConfig {
    /// Camera selected when the query carries no `c`.
    #[serde(default)]
    pub default_camera: Option<String>,
    /// Pair of camera ids played side by side. Empty disables dual mode.
    #[serde(default)]
    pub dual_cameras: Vec<String>,
    #[serde(default = "default_thumbnail")]
    pub thumbnail: String,
    /// JSON file holding the persisted time-range filter.
    #[serde(default = "default_filter_store")]
    pub filter_store: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            default_camera: None,
            dual_cameras: Vec::new(),
            thumbnail: default_thumbnail(),
            filter_store: default_filter_store(),
        }
    }
}

/// HTTP API configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Whether `serve` starts the HTTP API.
    #[serde(default = "default_api_enabled")]
    pub enabled: bool,
    /// Port to listen on.
    #[serde(default = "default_api_port")]
    pub port: u16,
    /// Directory with the page assets, served at `/`.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { enabled: default_api_enabled(), port: default_api_port(), static_dir: None }
    }
}

fn default_api_enabled() -> bool { true }
fn default_api_port() -> u16 { 8080 }
fn default_timeout() -> u64 { 30 }
fn default_thumbnail() -> String { "thumbnail.png".into() }
fn default_filter_store() -> PathBuf { PathBuf::from("filters.json") }

impl Config {
    /// Load configuration from a TOML file at `path`.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ViewerError::Config(format!("Cannot read config file: {e}")))?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ViewerError::Config(format!("Invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.cameras.is_empty() {
            return Err(ViewerError::Config("No cameras defined".into()));
        }
        if self.recorder.base_url.trim().is_empty() {
            return Err(ViewerError::Config("recorder.base_url must not be empty".into()));
        }
        if self.recorder.timeout_secs == 0 {
            return Err(ViewerError::Config("timeout_secs must be > 0".into()));
        }
        let mut seen = HashSet::new();
        for cam in &self.cameras {
            if !seen.insert(cam.id.as_str()) {
                return Err(ViewerError::Config(format!("Duplicate camera id '{}'", cam.id)));
            }
        }
        let dual = &self.viewer.dual_cameras;
        if !dual.is_empty() {
            if dual.len() != 2 || dual[0] == dual[1] {
                return Err(ViewerError::Config(
                    "dual_cameras must name exactly two distinct cameras".into(),
                ));
            }
            if let Some(missing) = dual.iter().find(|id| self.camera(id).is_none()) {
                return Err(ViewerError::Config(format!(
                    "dual camera '{missing}' is not configured"
                )));
            }
        }
        if let Some(default) = &self.viewer.default_camera {
            if self.camera(default).is_none() {
                return Err(ViewerError::Config(format!(
                    "default_camera '{default}' is not configured"
                )));
            }
        }
        Ok(())
    }

    /// Look up a configured camera by id.
    pub fn camera(&self, id: &str) -> Option<&CameraConfig> {
        self.cameras.iter().find(|c| c.id == id)
    }

    /// Camera selected when the viewer query names none.
    pub fn default_camera(&self) -> &str {
        self.viewer
            .default_camera
            .as_deref()
            .unwrap_or(&self.cameras[0].id)
    }

    /// The configured dual-camera pair, if any.
    pub fn dual_pair(&self) -> Option<(String, String)> {
        match self.viewer.dual_cameras.as_slice() {
            [a, b] => Some((a.clone(), b.clone())),
            _ => None,
        }
    }
}
