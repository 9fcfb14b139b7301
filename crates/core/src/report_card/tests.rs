//! Tests for report card derivation.

use rust_decimal_macros::dec;

use acadia_shared::types::Patch;

use crate::grading::{LetterGrade, MarksPatch};

use super::error::ReportCardError;
use super::service::ReportCardService;
use super::types::AttendancePatch;

#[test]
fn test_derive_marks_fills_all_three_fields() {
    let derived = ReportCardService::derive_marks(dec!(425), dec!(500)).unwrap();
    assert_eq!(derived.percentage, dec!(85));
    assert_eq!(derived.letter_grade, LetterGrade::A);
    assert_eq!(derived.grade_points, dec!(3.7));
}

#[test]
fn test_derive_marks_rejects_obtained_above_possible() {
    assert!(ReportCardService::derive_marks(dec!(501), dec!(500)).is_err());
}

#[test]
fn test_attendance_zero_total_classes_is_zero_percent() {
    // Not an error, not NaN: a fresh card simply has no attendance yet.
    assert_eq!(
        ReportCardService::attendance_percentage(0, 0).unwrap(),
        dec!(0)
    );
}

#[test]
fn test_attendance_percentage_basic() {
    assert_eq!(
        ReportCardService::attendance_percentage(45, 50).unwrap(),
        dec!(90)
    );
}

#[test]
fn test_attendance_rejects_attended_above_total() {
    assert_eq!(
        ReportCardService::attendance_percentage(51, 50),
        Err(ReportCardError::AttendanceExceedsTotal {
            attended: 51,
            total: 50,
        })
    );
}

#[test]
fn test_marks_patch_does_not_touch_attendance() {
    let patch = AttendancePatch::default();
    let result = ReportCardService::rederive_attendance(40, 50, patch).unwrap();
    assert!(result.is_none());
}

#[test]
fn test_attendance_patch_does_not_touch_marks() {
    let result = ReportCardService::rederive_marks(dec!(425), dec!(500), MarksPatch::default())
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn test_rederive_marks_with_partial_patch() {
    let patch = MarksPatch {
        marks_obtained: Patch::Set(dec!(300)),
        total_marks: Patch::Keep,
    };
    let derived = ReportCardService::rederive_marks(dec!(425), dec!(500), patch)
        .unwrap()
        .unwrap();
    assert_eq!(derived.percentage, dec!(60));
    assert_eq!(derived.letter_grade, LetterGrade::D);
    assert_eq!(derived.grade_points, dec!(2.0));
}

#[test]
fn test_rederive_attendance_with_partial_patch() {
    let patch = AttendancePatch {
        classes_attended: Patch::Keep,
        total_classes: Patch::Set(80),
    };
    let percentage = ReportCardService::rederive_attendance(40, 50, patch)
        .unwrap()
        .unwrap();
    assert_eq!(percentage, dec!(50));
}
