//! Interactive `play` commands.

mod common;

use recplay::player::{Slot, Viewer};
use recplay::playlist::CameraFilter;
use recplay::session::{apply, render_list, Command, Reply};

fn viewer() -> Viewer {
    Viewer::new(common::fixture_playlist(), common::test_config().dual_pair())
}

fn text(reply: Reply) -> String {
    match reply {
        Reply::Text(t) => t,
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn test_parse_commands() {
    assert_eq!("select 3".parse::<Command>().expect("parse"), Command::Select(3));
    assert_eq!("camera 7555".parse::<Command>().expect("parse"), Command::Camera(CameraFilter::Camera("7555".into())));
    assert_eq!("camera camera-7556".parse::<Command>().expect("parse"), Command::Camera(CameraFilter::Camera("7556".into())));
    assert_eq!("c all".parse::<Command>().expect("parse"), Command::Camera(CameraFilter::All));
    assert_eq!("play 2".parse::<Command>().expect("parse"), Command::Play(Slot::Secondary));
    assert_eq!("pause".parse::<Command>().expect("parse"), Command::Pause(Slot::Primary));
    assert_eq!("q".parse::<Command>().expect("parse"), Command::Quit);
    assert!("select".parse::<Command>().is_err());
    assert!("rewind".parse::<Command>().is_err());
    assert!("camera foo-7554".parse::<Command>().is_err());
    assert_eq!("pip".parse::<Command>().expect("parse"), Command::Pip { supported: true });
    assert_eq!("pip unsupported".parse::<Command>().expect("parse"), Command::Pip { supported: false });
    assert!("pip sideways".parse::<Command>().is_err());
}

#[test]
fn test_session_flow() {
    let mut v = viewer();
    let out = text(apply(&mut v, Command::Camera(CameraFilter::Camera("7554".into()))).expect("camera"));
    assert!(out.contains("7554/a.mp4"));
    assert!(out.contains("7555/a.mp4"));

    let out = text(apply(&mut v, Command::Ended).expect("ended"));
    assert!(out.contains("7554/b.mp4"));
    assert_eq!(text(apply(&mut v, Command::Ended).expect("ended")), "End of playlist");

    assert_eq!(text(apply(&mut v, Command::Mute).expect("mute")), "Unmuted");
    assert!(matches!(apply(&mut v, Command::Download).expect("download"), Reply::Download(_)));
    assert!(matches!(apply(&mut v, Command::Quit).expect("quit"), Reply::Quit));

    assert!(apply(&mut v, Command::Camera(CameraFilter::Live)).is_err());
}

#[test]
fn test_render_list_marks_active() {
    let mut v = viewer();
    v.apply_filter(CameraFilter::Camera("7555".into())).expect("filter");
    let listing = render_list(&v);
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines[0], "01/05/2025  [camera-7555]");
    assert!(lines[1].starts_with('*'));
    assert!(lines[1].contains("Cam2 - Part 1"));
    assert!(lines[2].starts_with(' '));
}

#[test]
fn test_pip_without_support() {
    let mut v = viewer();
    v.apply_filter(CameraFilter::Camera("7554".into())).expect("filter");
    let err = apply(&mut v, Command::Pip { supported: false }).expect_err("unsupported");
    assert_eq!(err.to_string(), "PiP not supported in your browser");
    assert_eq!(v.pip_slot(), None);

    let out = text(apply(&mut v, Command::Pip { supported: true }).expect("pip"));
    assert_eq!(out, "Picture-in-picture on Secondary player");
    assert_eq!(v.pip_slot(), Some(Slot::Secondary));
}
