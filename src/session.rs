// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! Line-oriented commands for the interactive `play` session.
//!
//!   list                 show the playlist
//!   select N             load item N of the current camera
//!   camera all|live|ID   switch camera (`camera-ID` also accepted)
//!   ended                the primary player reached its end
//!   play [2]             primary (or secondary) player started
//!   pause [2]            primary (or secondary) player paused
//!   pip [unsupported]    toggle picture-in-picture; `unsupported` simulates
//!                        a player without it
//!   mute | fullscreen
//!   download             plan a download of what is on screen
//!   quit

use std::fmt::Write as FmtWrite;
use std::str::FromStr;

use crate::download::{self, DownloadPlan};
use crate::error::{ViewerError, Result};
use crate::player::{Playback, Slot, Viewer};
use crate::playlist::CameraFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Select(usize),
    Camera(CameraFilter),
    Ended,
    Play(Slot),
    Pause(Slot),
    Mute,
    Pip { supported: bool },
    Fullscreen,
    Download,
    Help,
    Quit,
}

fn slot_arg(arg: Option<&str>) -> Result<Slot> {
    match arg {
        None | Some("1") => Ok(Slot::Primary),
        Some("2") => Ok(Slot::Secondary),
        Some(other) => Err(ViewerError::Unsupported(format!("Unknown player '{other}'"))),
    }
}

impl FromStr for Command {
    type Err = ViewerError;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or_default();
        let arg = words.next();
        let cmd = match verb {
            "list" | "ls" => Command::List,
            "select" | "s" => {
                let n = arg
                    .and_then(|a| a.parse().ok())
                    .ok_or_else(|| ViewerError::Unsupported("usage: select N".into()))?;
                Command::Select(n)
            }
            "camera" | "c" => {
                let name = arg.ok_or_else(|| ViewerError::Unsupported("usage: camera ID".into()))?;
                let filter = if name.contains('-') || name == "all" || name == "live" {
                    name.parse()?
                } else {
                    CameraFilter::Camera(name.to_string())
                };
                Command::Camera(filter)
            }
            "ended" => Command::Ended,
            "play" => Command::Play(slot_arg(arg)?),
            "pause" => Command::Pause(slot_arg(arg)?),
            "mute" => Command::Mute,
            "pip" => match arg {
                None => Command::Pip { supported: true },
                Some("unsupported") => Command::Pip { supported: false },
                Some(other) => return Err(ViewerError::Unsupported(format!("Unknown pip option '{other}'"))),
            },
            "fullscreen" | "fs" => Command::Fullscreen,
            "download" | "dl" => Command::Download,
            "help" | "?" | "" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(ViewerError::Unsupported(format!("Unknown command '{other}'"))),
        };
        Ok(cmd)
    }
}

/// What the session loop should do after a command.
#[derive(Debug)]
pub enum Reply {
    Text(String),
    Download(DownloadPlan),
    Quit,
}

fn describe(playback: &Playback) -> String {
    match (&playback.primary, &playback.secondary) {
        (Some(p), Some(s)) => format!("▶ {p}\n▶ {s}"),
        (Some(p), None) => format!("▶ {p}"),
        _ => "No video".into(),
    }
}

/// Render the playlist of the current camera.
pub fn render_list(viewer: &Viewer) -> String {
    let rows = viewer.rows();
    if viewer.playlist().is_empty() {
        return "No recordings found for this booking.".into();
    }
    if rows.is_empty() {
        return format!("No video for {}", viewer.filter());
    }
    let mut out = String::new();
    if let Some(date) = viewer.playlist().headline_date() {
        let _ = writeln!(out, "{date}  [{}]", viewer.filter());
    }
    for row in rows {
        let marker = if row.active { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {:>3}  {:<20} {}",
            row.index, row.recording.time, row.recording.title
        );
    }
    out
}

/// Apply one command to the viewer.
pub fn apply(viewer: &mut Viewer, cmd: Command) -> Result<Reply> {
    let text = match cmd {
        Command::List => render_list(viewer),
        Command::Select(n) => describe(viewer.load(n)?),
        Command::Camera(filter) => match viewer.apply_filter(filter)? {
            Some(playback) => describe(playback),
            None => "No video".into(),
        },
        Command::Ended => match viewer.on_ended()? {
            Some(playback) => describe(playback),
            None => "End of playlist".into(),
        },
        Command::Play(slot) => match viewer.on_play(slot) {
            Some(other) => format!("Playing; {other:?} player started in sync"),
            None => "Playing".into(),
        },
        Command::Pause(slot) => {
            viewer.on_pause(slot);
            "Paused".into()
        }
        Command::Mute => viewer.toggle_mute().message,
        Command::Pip { supported } => viewer.toggle_pip(supported)?.message,
        Command::Fullscreen => viewer.toggle_fullscreen().message,
        Command::Download => return download::plan(viewer).map(Reply::Download),
        Command::Help => HELP.trim().to_string(),
        Command::Quit => return Ok(Reply::Quit),
    };
    Ok(Reply::Text(text))
}

const HELP: &str = "
list | select N | camera all|live|ID | ended | play [2] | pause [2]
mute | pip [unsupported] | fullscreen | download | quit
";
