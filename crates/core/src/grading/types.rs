//! Grading data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use acadia_shared::types::Patch;

/// Letter grade tiers, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    /// 90% and above.
    #[serde(rename = "A+")]
    APlus,
    /// 85% to below 90%.
    A,
    /// 80% to below 85%.
    #[serde(rename = "B+")]
    BPlus,
    /// 75% to below 80%.
    B,
    /// 70% to below 75%.
    #[serde(rename = "C+")]
    CPlus,
    /// 65% to below 70%.
    C,
    /// 60% to below 65%.
    D,
    /// Below 60%.
    F,
}

impl LetterGrade {
    /// Returns the display form ("A+", "B", ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl std::fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LetterGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A+" => Ok(Self::APlus),
            "A" => Ok(Self::A),
            "B+" => Ok(Self::BPlus),
            "B" => Ok(Self::B),
            "C+" => Ok(Self::CPlus),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            "F" => Ok(Self::F),
            other => Err(format!("unknown letter grade: {other}")),
        }
    }
}

/// Derived fields computed from a (marks obtained, total marks) pair.
///
/// Always written together with the base fields; a stored record never has
/// a percentage that disagrees with its marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkDerivation {
    /// Percentage in 0..=100.
    pub percentage: Decimal,
    /// Letter grade classified from the percentage.
    pub letter_grade: LetterGrade,
}

/// The marks portion of a grade update.
///
/// Derived fields are recomputed only when at least one of these is set;
/// patches touching other fields leave percentage and letter grade alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarksPatch {
    /// New marks obtained, if supplied.
    pub marks_obtained: Patch<Decimal>,
    /// New total marks, if supplied.
    pub total_marks: Patch<Decimal>,
}

impl MarksPatch {
    /// Returns `true` if the patch touches neither marks field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.marks_obtained.is_set() && !self.total_marks.is_set()
    }
}
