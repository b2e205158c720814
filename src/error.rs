// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Recorder request for camera '{camera}' failed: {reason}")]
    Http { camera: String, reason: String },

    #[error("Download of '{file}' failed: {reason}")]
    Download { file: String, reason: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("{0}")]
    InvalidFilter(String),

    #[error("We are working on it. Coming soon...")]
    LiveUnavailable,

    #[error("Camera '{id}' not found")]
    CameraNotFound { id: String },

    #[error("{0}")]
    RecordingNotFound(String),

    #[error("No recordings to play")]
    NoRecordings,

    #[error("Live streams cannot be downloaded")]
    StreamNotDownloadable,

    #[error("{0}")]
    Unsupported(String),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
