//! Recorder response envelope decoding.

use recplay::recording::RecordingList;

#[test]
fn test_null_or_missing_data_is_empty() {
    let list: RecordingList = serde_json::from_str(r#"{"data": null}"#).expect("decode");
    assert!(list.into_items().is_empty());

    let list: RecordingList = serde_json::from_str(r#"{"message": "not found"}"#).expect("decode");
    assert!(list.into_items().is_empty());
}

#[test]
fn test_items_decode_with_optional_category() {
    let list: RecordingList = serde_json::from_str(
        r#"{"data": [
            {"start_time": "01-05-2025 6:00:00 PM", "end_time": "01-05-2025 6:30:00 PM", "url": "https://cdn.test/a.mp4"},
            {"start_time": "01-05-2025 6:30:00 PM", "end_time": "01-05-2025 7:00:00 PM", "url": "https://cdn.test/b.mp4", "category": "camera-7554"}
        ]}"#,
    )
    .expect("decode");
    let items = list.into_items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].category, None);
    assert_eq!(items[1].category.as_deref(), Some("camera-7554"));
}

#[test]
fn test_non_json_body_is_rejected() {
    assert!(serde_json::from_str::<RecordingList>("boom").is_err());
}
