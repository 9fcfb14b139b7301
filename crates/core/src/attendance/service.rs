//! Attendance rate calculation.

use rust_decimal::Decimal;

/// Attendance rate over marked days: present / (present + absent) * 100.
///
/// Pending rows are excluded by the caller; zero marked days yields zero
/// rather than a division error.
#[must_use]
pub fn attendance_rate(present: u64, absent: u64) -> Decimal {
    let marked = present + absent;
    if marked == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(present) / Decimal::from(marked) * Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rate_over_marked_days() {
        assert_eq!(attendance_rate(18, 2), dec!(90));
    }

    #[test]
    fn test_no_marked_days_is_zero() {
        assert_eq!(attendance_rate(0, 0), dec!(0));
    }

    #[test]
    fn test_all_absent_is_zero() {
        assert_eq!(attendance_rate(0, 5), dec!(0));
    }
}
