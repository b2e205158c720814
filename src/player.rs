// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! Viewer session: which playlist item is active, what each player slot has
//! loaded, and the transport controls around them.
//!
//! Layout is single (one player) or dual (the configured camera pair played
//! side by side). In dual layout the secondary slot plays the other camera's
//! recording with the same time label.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ViewerError, Result};
use crate::playlist::{bounded_index, CameraFilter, Playlist};
use crate::recording::Recording;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Single,
    Dual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Primary,
    Secondary,
}

/// Element a fullscreen request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FullscreenTarget {
    Primary,
    DualContainer,
}

/// Sources loaded into the player slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Playback {
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

/// One rendered playlist row.
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistRow<'a> {
    pub index: usize,
    pub active: bool,
    #[serde(flatten)]
    pub recording: &'a Recording,
}

/// Result of a control toggle, with the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlOutcome {
    pub active: bool,
    pub message: String,
}

/// Player session over a loaded playlist.
#[derive(Debug)]
pub struct Viewer {
    playlist: Playlist,
    dual_pair: Option<(String, String)>,
    filter: CameraFilter,
    layout: Layout,
    current_index: usize,
    last_selected: usize,
    playback: Playback,
    paused: [bool; 2],
    muted: [bool; 2],
    pip: Option<Slot>,
    fullscreen: Option<FullscreenTarget>,
}

impl Viewer {
    /// Players start muted with nothing loaded.
    pub fn new(playlist: Playlist, dual_pair: Option<(String, String)>) -> Self {
        Self {
            playlist,
            dual_pair,
            filter: CameraFilter::All,
            layout: Layout::Single,
            current_index: 0,
            last_selected: 0,
            playback: Playback::default(),
            paused: [true, true],
            muted: [true, true],
            pip: None,
            fullscreen: None,
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn filter(&self) -> &CameraFilter {
        &self.filter
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_muted(&self, slot: Slot) -> bool {
        match slot {
            Slot::Primary => self.muted[0],
            Slot::Secondary => self.muted[1],
        }
    }

    /// Items visible under the active filter.
    pub fn visible(&self) -> Vec<&Recording> {
        self.playlist.filtered(&self.filter)
    }

    /// Item currently loaded in the primary slot.
    pub fn current(&self) -> Option<&Recording> {
        self.visible().get(self.current_index).copied()
    }

    /// Playlist rows with the active flag set on the current item.
    pub fn rows(&self) -> Vec<PlaylistRow<'_>> {
        self.visible()
            .into_iter()
            .enumerate()
            .map(|(index, recording)| PlaylistRow {
                index,
                active: index == self.current_index,
                recording,
            })
            .collect()
    }

    /// The other member of the dual pair if `camera_id` belongs to it.
    fn dual_partner(&self, camera_id: &str) -> Option<&str> {
        let (a, b) = self.dual_pair.as_ref()?;
        if camera_id == a {
            Some(b)
        } else if camera_id == b {
            Some(a)
        } else {
            None
        }
    }

    /// Switch camera and load the last selected index (or the first item).
    ///
    /// Returns `None` when the camera has no recordings; the players are
    /// cleared in that case.
    pub fn apply_filter(&mut self, filter: CameraFilter) -> Result<Option<&Playback>> {
        if filter == CameraFilter::Live {
            return Err(ViewerError::LiveUnavailable);
        }

        self.layout = match filter.camera_id() {
            Some(id) if self.dual_partner(id).is_some() => Layout::Dual,
            _ => Layout::Single,
        };
        self.filter = filter;

        let len = self.visible().len();
        if len == 0 {
            info!(filter = %self.filter, "No recordings for camera");
            self.playback = Playback::default();
            self.paused = [true, true];
            return Ok(None);
        }

        let start = bounded_index(self.last_selected, len);
        self.load(start).map(Some)
    }

    /// Load the `index`-th visible item. Out-of-range indices load the
    /// first item.
    pub fn load(&mut self, index: usize) -> Result<&Playback> {
        let visible = self.visible();
        let index = bounded_index(index, visible.len());
        let Some(video) = visible.get(index).copied() else {
            return Err(ViewerError::NoRecordings);
        };

        let playback = match (self.layout, self.filter.camera_id()) {
            (Layout::Dual, Some(camera_id)) => {
                let other = self.dual_partner(camera_id).unwrap_or(camera_id);
                let matching = self.playlist.find_by_time(other, &video.time).unwrap_or(video);
                Playback {
                    primary: Some(video.url.clone()),
                    secondary: Some(matching.url.replacen(camera_id, other, 1)),
                }
            }
            _ => Playback {
                primary: Some(video.url.clone()),
                secondary: None,
            },
        };

        debug!(index, title = video.title, layout = ?self.layout, "Loading recording");
        self.current_index = index;
        self.last_selected = index;
        self.playback = playback;
        self.paused = [false, self.layout == Layout::Single];
        Ok(&self.playback)
    }

    /// Primary player reached its end: advance within the active filter.
    pub fn on_ended(&mut self) -> Result<Option<&Playback>> {
        let next = self.current_index + 1;
        if next < self.visible().len() {
            self.load(next).map(Some)
        } else {
            self.paused[0] = true;
            Ok(None)
        }
    }

    /// A slot started playing. In dual layout the other slot follows if it
    /// is paused; returns the slot that was started.
    pub fn on_play(&mut self, slot: Slot) -> Option<Slot> {
        let (this, other, other_slot) = match slot {
            Slot::Primary => (0, 1, Slot::Secondary),
            Slot::Secondary => (1, 0, Slot::Primary),
        };
        self.paused[this] = false;
        if self.layout == Layout::Dual && self.paused[other] {
            self.paused[other] = false;
            return Some(other_slot);
        }
        None
    }

    pub fn on_pause(&mut self, slot: Slot) {
        match slot {
            Slot::Primary => self.paused[0] = true,
            Slot::Secondary => self.paused[1] = true,
        }
    }

    pub fn is_paused(&self, slot: Slot) -> bool {
        match slot {
            Slot::Primary => self.paused[0],
            Slot::Secondary => self.paused[1],
        }
    }

    /// Flip mute on the primary player; in dual layout the secondary
    /// follows it. A hidden secondary keeps its own state.
    pub fn toggle_mute(&mut self) -> ControlOutcome {
        let muted = !self.muted[0];
        self.muted[0] = muted;
        if self.layout == Layout::Dual {
            self.muted[1] = muted;
        }
        ControlOutcome {
            active: muted,
            message: if muted { "Muted" } else { "Unmuted" }.into(),
        }
    }

    /// Enter or leave picture-in-picture. Dual layout pops out the secondary
    /// player.
    pub fn toggle_pip(&mut self, supported: bool) -> Result<ControlOutcome> {
        if self.pip.take().is_some() {
            return Ok(ControlOutcome { active: false, message: "Picture-in-picture closed".into() });
        }
        if !supported {
            return Err(ViewerError::Unsupported("PiP not supported in your browser".into()));
        }
        let slot = match self.layout {
            Layout::Single => Slot::Primary,
            Layout::Dual => Slot::Secondary,
        };
        self.pip = Some(slot);
        Ok(ControlOutcome { active: true, message: format!("Picture-in-picture on {slot:?} player") })
    }

    pub fn pip_slot(&self) -> Option<Slot> {
        self.pip
    }

    /// Enter or leave fullscreen. Dual layout expands both players together.
    pub fn toggle_fullscreen(&mut self) -> ControlOutcome {
        if self.fullscreen.take().is_some() {
            return ControlOutcome { active: false, message: "Exited fullscreen".into() };
        }
        let target = match self.layout {
            Layout::Single => FullscreenTarget::Primary,
            Layout::Dual => FullscreenTarget::DualContainer,
        };
        self.fullscreen = Some(target);
        ControlOutcome { active: true, message: format!("Fullscreen: {target:?}") }
    }

    pub fn fullscreen_target(&self) -> Option<FullscreenTarget> {
        self.fullscreen
    }
}
