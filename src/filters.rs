// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! Time-range filter: validation of the start/end inputs and the small JSON
//! store that remembers them between sessions.

use std::path::{Path, PathBuf};

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ViewerError, Result};
use crate::query::ViewerQuery;
use crate::timefmt::format_to_sql;

/// Raw start/end values as entered (`yyyy-mm-ddThh:mm`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TimeRangeInput {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

/// Persisted filter values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoredFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_end_time: Option<String>,
}

fn parse_input(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

fn on_half_hour(dt: &NaiveDateTime) -> bool {
    matches!(dt.minute(), 0 | 30)
}

impl TimeRangeInput {
    /// Check the inputs and return the parsed range.
    pub fn validate(&self) -> Result<(NaiveDateTime, NaiveDateTime)> {
        if self.start.trim().is_empty() || self.end.trim().is_empty() {
            return Err(ViewerError::InvalidFilter(
                "Please select both start and end time.".into(),
            ));
        }
        let bad = || ViewerError::InvalidFilter("Invalid start or end time.".into());
        let start = parse_input(&self.start).ok_or_else(bad)?;
        let end = parse_input(&self.end).ok_or_else(bad)?;

        if !on_half_hour(&start) || !on_half_hour(&end) {
            return Err(ViewerError::InvalidFilter(
                "Time must be in 30-minute steps (:00 or :30 only).".into(),
            ));
        }
        if start >= end {
            return Err(ViewerError::InvalidFilter(
                "End time must be after start time.".into(),
            ));
        }
        Ok((start, end))
    }
}

/// JSON-file backed store for the last submitted filter.
pub struct FilterStore {
    path: PathBuf,
}

impl FilterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored values; a missing or unreadable file counts as empty.
    pub fn load(&self) -> StoredFilter {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return StoredFilter::default(),
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Cannot read filter store");
                return StoredFilter::default();
            }
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = ?self.path, error = %e, "Corrupt filter store, ignoring");
            StoredFilter::default()
        })
    }

    pub fn save(&self, input: &TimeRangeInput) -> Result<()> {
        let stored = StoredFilter {
            filter_start_time: Some(input.start.clone()),
            filter_end_time: Some(input.end.clone()),
        };
        let json = serde_json::to_string_pretty(&stored)
            .map_err(|e| ViewerError::Decode(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Values the filter form starts with: query parameters win over the store.
pub fn initial_values(query: &ViewerQuery, store: &FilterStore) -> TimeRangeInput {
    let stored = store.load();
    let pick = |q: &Option<String>, s: Option<String>| {
        q.clone().filter(|v| !v.is_empty()).or(s).unwrap_or_default()
    };
    TimeRangeInput {
        start: pick(&query.s, stored.filter_start_time),
        end: pick(&query.e, stored.filter_end_time),
    }
}

/// Validate and remember `input`; returns the query to navigate to.
pub fn submit(input: &TimeRangeInput, store: &FilterStore, query: &ViewerQuery) -> Result<ViewerQuery> {
    let (start, end) = input.validate()?;
    store.save(input)?;
    let next = query.with_range(format_to_sql(start), format_to_sql(end));
    info!(start = %start, end = %end, "Time filter applied");
    Ok(next)
}

/// Forget the stored filter; returns the query without a time range.
pub fn clear(store: &FilterStore, query: &ViewerQuery) -> Result<ViewerQuery> {
    store.clear()?;
    info!("Time filter cleared");
    Ok(query.without_range())
}
