//! Tests for the grading scale and derivation policy.

use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use acadia_shared::types::Patch;

use super::error::GradingError;
use super::scale::{self, GRADING_SCALE, PASS_MARK_PERCENT};
use super::service::GradingService;
use super::types::{LetterGrade, MarksPatch};

#[rstest]
#[case(dec!(100), LetterGrade::APlus, dec!(4.0))]
#[case(dec!(90), LetterGrade::APlus, dec!(4.0))]
#[case(dec!(89.999), LetterGrade::A, dec!(3.7))]
#[case(dec!(85), LetterGrade::A, dec!(3.7))]
#[case(dec!(80), LetterGrade::BPlus, dec!(3.3))]
#[case(dec!(75), LetterGrade::B, dec!(3.0))]
#[case(dec!(70), LetterGrade::CPlus, dec!(2.7))]
#[case(dec!(65), LetterGrade::C, dec!(2.3))]
#[case(dec!(60), LetterGrade::D, dec!(2.0))]
#[case(dec!(59.999), LetterGrade::F, dec!(0.0))]
#[case(dec!(0), LetterGrade::F, dec!(0.0))]
fn test_scale_bucket_edges_are_inclusive(
    #[case] percentage: Decimal,
    #[case] letter: LetterGrade,
    #[case] points: Decimal,
) {
    assert_eq!(scale::letter_grade(percentage), letter);
    assert_eq!(scale::gpa_points(percentage), points);
}

#[test]
fn test_percentage_exact() {
    assert_eq!(scale::percentage(dec!(40), dec!(50)).unwrap(), dec!(80));
    assert_eq!(scale::percentage(dec!(1), dec!(3)).unwrap().round_dp(4), dec!(33.3333));
}

#[test]
fn test_percentage_guards_non_positive_total() {
    assert_eq!(
        scale::percentage(dec!(10), dec!(0)),
        Err(GradingError::InvalidTotalMarks(dec!(0)))
    );
    assert!(scale::percentage(dec!(10), dec!(-5)).is_err());
}

#[test]
fn test_pass_mark_is_independent_of_the_scale() {
    // Both are 60 today, but deliberately not derived from each other.
    assert_eq!(PASS_MARK_PERCENT, 60);
    assert_eq!(GRADING_SCALE.last().unwrap().floor, 60);
}

#[test]
fn test_derive_computes_both_fields() {
    let derived = GradingService::derive(dec!(40), dec!(50)).unwrap();
    assert_eq!(derived.percentage, dec!(80));
    assert_eq!(derived.letter_grade, LetterGrade::BPlus);
}

#[test]
fn test_derive_rejects_marks_above_total() {
    assert_eq!(
        GradingService::derive(dec!(60), dec!(50)),
        Err(GradingError::MarksExceedTotal {
            obtained: dec!(60),
            total: dec!(50),
        })
    );
}

#[test]
fn test_derive_rejects_negative_marks() {
    assert!(matches!(
        GradingService::derive(dec!(-1), dec!(50)),
        Err(GradingError::NegativeMarks(_))
    ));
}

#[test]
fn test_rederive_skips_when_marks_untouched() {
    let result = GradingService::rederive(dec!(40), dec!(50), MarksPatch::default()).unwrap();
    assert!(result.is_none());
}

#[test]
fn test_rederive_uses_stored_value_for_omitted_field() {
    // 40/50 is a B+ at 80%; doubling the total without touching obtained
    // drops the record to 40% and an F.
    let patch = MarksPatch {
        marks_obtained: Patch::Keep,
        total_marks: Patch::Set(dec!(100)),
    };
    let derived = GradingService::rederive(dec!(40), dec!(50), patch)
        .unwrap()
        .unwrap();
    assert_eq!(derived.percentage, dec!(40));
    assert_eq!(derived.letter_grade, LetterGrade::F);
}

#[test]
fn test_rederive_validates_effective_pair() {
    // Lowering the total below the stored obtained marks must fail even
    // though the patch itself only carries one field.
    let patch = MarksPatch {
        marks_obtained: Patch::Keep,
        total_marks: Patch::Set(dec!(30)),
    };
    assert!(GradingService::rederive(dec!(40), dec!(50), patch).is_err());
}

proptest! {
    /// For any valid pair, the derived percentage is exactly
    /// obtained/total*100 and the chosen band's floor never exceeds it.
    #[test]
    fn test_band_floor_never_exceeds_percentage(
        obtained in 0u32..=200,
        total in 1u32..=200,
    ) {
        prop_assume!(obtained <= total);

        let obtained = Decimal::from(obtained);
        let total = Decimal::from(total);
        let derived = GradingService::derive(obtained, total).unwrap();

        prop_assert_eq!(derived.percentage, obtained / total * Decimal::ONE_HUNDRED);

        let band = scale::band_for(derived.percentage);
        prop_assert!(Decimal::from(band.floor) <= derived.percentage);
        prop_assert_eq!(band.letter, derived.letter_grade);
    }

    /// Letter grade and GPA points always express the same tier: both
    /// come from the same band, so ordering by letter matches ordering
    /// by points.
    #[test]
    fn test_letter_and_points_stay_aligned(percent in 0u32..=100) {
        let p = Decimal::from(percent);
        let band = scale::band_for(p);
        prop_assert_eq!(scale::letter_grade(p), band.letter);
        prop_assert_eq!(scale::gpa_points(p), band.points());
    }
}
