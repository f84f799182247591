// tests/export_status_tests.rs - Export toast state machine

use std::time::Duration;

use catalog_proposals::web_app::export::status::{ERROR_HIDE_AFTER, SUCCESS_HIDE_AFTER};
use catalog_proposals::web_app::export::{ExportStatus, ExportStatusTracker};

#[test]
fn test_starts_hidden() {
    let tracker = ExportStatusTracker::new();
    assert_eq!(tracker.status(), &ExportStatus::Hidden);
    assert!(!tracker.status().is_visible());
    assert_eq!(tracker.generation(), 0);
}

#[test]
fn test_success_path_hides_after_three_seconds() {
    let mut tracker = ExportStatusTracker::new();
    let generation = tracker.begin();
    assert_eq!(tracker.status(), &ExportStatus::Processing);
    assert_eq!(tracker.status().auto_hide_after(), None);

    assert_eq!(tracker.succeed(generation), Ok(true));
    assert_eq!(tracker.status().auto_hide_after(), Some(SUCCESS_HIDE_AFTER));
    assert_eq!(SUCCESS_HIDE_AFTER, Duration::from_secs(3));

    assert!(tracker.hide_if_current(generation));
    assert_eq!(tracker.status(), &ExportStatus::Hidden);
}

#[test]
fn test_error_keeps_message_and_hides_after_five_seconds() {
    let mut tracker = ExportStatusTracker::new();
    let generation = tracker.begin();
    tracker.fail(generation, "Error generating the Word file: zip").unwrap();

    assert_eq!(
        tracker.status(),
        &ExportStatus::Error("Error generating the Word file: zip".to_string())
    );
    assert_eq!(tracker.status().auto_hide_after(), Some(ERROR_HIDE_AFTER));
    assert_eq!(ERROR_HIDE_AFTER, Duration::from_secs(5));
}

#[test]
fn test_stale_timer_does_not_hide_newer_export() {
    let mut tracker = ExportStatusTracker::new();
    let first = tracker.begin();
    tracker.succeed(first).unwrap();

    // A second export starts before the first toast's timer fires
    let second = tracker.begin();
    assert!(!tracker.hide_if_current(first));
    assert_eq!(tracker.status(), &ExportStatus::Processing);

    tracker.fail(second, "boom").unwrap();
    assert!(!tracker.hide_if_current(first));
    assert!(tracker.hide_if_current(second));
}

#[test]
fn test_resolving_without_begin_is_rejected() {
    let mut tracker = ExportStatusTracker::new();
    let idle = tracker.generation();
    let err = tracker.fail(idle, "late").unwrap_err();
    assert_eq!(err.to_string(), "cannot fail an export that is hidden");
    assert_eq!(tracker.status(), &ExportStatus::Hidden);

    let generation = tracker.begin();
    tracker.succeed(generation).unwrap();
    assert!(tracker.succeed(generation).is_err());
}

#[test]
fn test_dismiss_ignored_while_processing() {
    let mut tracker = ExportStatusTracker::new();
    let generation = tracker.begin();
    tracker.dismiss();
    assert_eq!(tracker.status(), &ExportStatus::Processing);

    tracker.succeed(generation).unwrap();
    tracker.dismiss();
    assert_eq!(tracker.status(), &ExportStatus::Hidden);
}

#[test]
fn test_overlapping_exports_report_the_latest_outcome() {
    let mut tracker = ExportStatusTracker::new();
    let first = tracker.begin();
    let second = tracker.begin();

    // The first export finishes while the second is still running
    assert_eq!(tracker.succeed(first), Ok(false));
    assert_eq!(tracker.status(), &ExportStatus::Processing);

    assert_eq!(tracker.fail(second, "Could not load export settings"), Ok(true));
    assert_eq!(
        tracker.status(),
        &ExportStatus::Error("Could not load export settings".to_string())
    );
    assert_eq!(tracker.status().auto_hide_after(), Some(ERROR_HIDE_AFTER));
    assert!(!tracker.hide_if_current(first));
    assert!(tracker.hide_if_current(second));
}
