//! Viewer query handling and recorder URL construction.

mod common;

use recplay::playlist::CameraFilter;
use recplay::query::{recordings_url, RecordingQuery, ViewerQuery};

fn q(booking: Option<&str>, s: Option<&str>, e: Option<&str>, c: Option<&str>) -> ViewerQuery {
    ViewerQuery {
        booking_id: booking.map(String::from),
        s: s.map(String::from),
        e: e.map(String::from),
        c: c.map(String::from),
    }
}

#[test]
fn test_range_wins_over_booking() {
    let query = q(Some("42"), Some("2025-05-01 18:00:00"), Some("2025-05-01 19:00:00"), None);
    assert_eq!(
        query.recording_query(),
        RecordingQuery::Range {
            start: "2025-05-01 18:00:00".into(),
            end: "2025-05-01 19:00:00".into(),
        }
    );
}

#[test]
fn test_half_range_falls_back_to_booking() {
    assert_eq!(
        q(Some("42"), Some("2025-05-01 18:00:00"), None, None).recording_query(),
        RecordingQuery::Booking("42".into())
    );
    assert_eq!(q(Some(""), None, None, None).recording_query(), RecordingQuery::Unfiltered);
}

#[test]
fn test_recordings_url() {
    let cfg = common::test_config();
    let cam = &cfg.cameras[0];

    let url = recordings_url("https://rec.test/api/", cam, &RecordingQuery::Booking("42".into()))
        .expect("url");
    assert_eq!(url.as_str(), "https://rec.test/api/camera-7554/recordings?booking_id=42");

    let range = RecordingQuery::Range {
        start: "2025-05-01 18:00:00".into(),
        end: "2025-05-01 19:00:00".into(),
    };
    let url = recordings_url("https://rec.test/api", cam, &range).expect("url");
    assert_eq!(
        url.query(),
        Some("start_time=2025-05-01+18%3A00%3A00&end_time=2025-05-01+19%3A00%3A00")
    );

    let url = recordings_url("https://rec.test/api", cam, &RecordingQuery::Unfiltered).expect("url");
    assert_eq!(url.query(), None);
}

#[test]
fn test_camera_filter_from_query() {
    assert_eq!(q(None, None, None, None).camera_filter("7554"), CameraFilter::Camera("7554".into()));
    assert_eq!(q(None, None, None, Some("7556")).camera_filter("7554"), CameraFilter::Camera("7556".into()));
    assert_eq!(q(None, None, None, Some("all")).camera_filter("7554"), CameraFilter::All);
}

#[test]
fn test_switching_camera_updates_query() {
    let query = q(Some("42"), None, None, Some("7556"));
    let back = query.with_camera(&CameraFilter::Camera("7554".into()), "7554");
    assert_eq!(back.c, None);
    assert_eq!(back.booking_id.as_deref(), Some("42"));

    let other = back.with_camera(&CameraFilter::Camera("7555".into()), "7554");
    assert_eq!(other.c.as_deref(), Some("7555"));
    assert_eq!(other.to_query_string(), "?booking_id=42&c=7555");
}

#[test]
fn test_range_edits() {
    let query = q(Some("42"), None, None, Some("7555"));
    let ranged = query.with_range("2025-05-01 18:00:00".into(), "2025-05-01 19:00:00".into());
    assert_eq!(ranged.booking_id, None);
    assert_eq!(ranged.c.as_deref(), Some("7555"));

    let cleared = q(Some("42"), Some("a"), Some("b"), None).without_range();
    assert_eq!(cleared, q(Some("42"), None, None, None));
    assert_eq!(ViewerQuery::default().to_query_string(), "");
}
