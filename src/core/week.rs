//! Week-of-month classification and the alternating-week rule.
//!
//! Weeks are Monday-aligned and counted from the first Monday of the month.
//! Days before that Monday belong to week 1, so the 1st is always week 1.

use crate::core::align::monday_on_or_after;
use crate::domain::model::{CalendarDate, Parity, RecurrenceDecision, WeekOfMonthResult};

/// 1-based week of the month for `date`.
pub fn week_of_month(date: CalendarDate) -> u32 {
    let first_monday = monday_on_or_after(date.first_of_month());

    // First Monday rolled into the next month: count plain 7-day blocks.
    if !first_monday.same_month(&date) {
        return date.day().div_ceil(7);
    }

    let week = date.days_since(first_monday).div_euclid(7) + 1;
    u32::try_from(week.max(1)).unwrap_or(1)
}

pub fn week_of_month_result(date: CalendarDate) -> WeekOfMonthResult {
    WeekOfMonthResult {
        week_number: week_of_month(date),
        reference_date: date,
    }
}

pub fn is_recurrence_week(week_number: u32, parity: Parity) -> bool {
    parity.matches(week_number)
}

pub fn classify(date: CalendarDate, parity: Parity) -> RecurrenceDecision {
    let week_number = week_of_month(date);
    RecurrenceDecision {
        is_recurrence_week: is_recurrence_week(week_number, parity),
        week_number,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, day).unwrap()
    }

    fn each_day(from_year: i32, to_year: i32) -> impl Iterator<Item = CalendarDate> {
        let start = d(from_year, 1, 1);
        let end = d(to_year, 12, 31);
        let total = end.days_since(start) as u64;
        (0..=total).map(move |offset| start.add_days(offset))
    }

    #[test]
    fn test_first_of_month_is_week_one() {
        for date in each_day(2020, 2030).filter(|date| date.day() == 1) {
            assert_eq!(week_of_month(date), 1, "{}", date);
        }
    }

    #[test]
    fn test_week_number_never_decreases_within_month() {
        let mut previous: Option<(CalendarDate, u32)> = None;
        for date in each_day(2020, 2030) {
            let week = week_of_month(date);
            assert!(week >= 1);
            if let Some((prev_date, prev_week)) = previous {
                if prev_date.same_month(&date) {
                    assert!(week >= prev_week, "{} -> {}", prev_date, date);
                    assert!(week - prev_week <= 1);
                }
            }
            previous = Some((date, week));
        }
    }

    #[test]
    fn test_month_starting_mid_week() {
        // August 2025 starts on a Friday; first Monday is the 4th.
        assert_eq!(week_of_month(d(2025, 8, 1)), 1);
        assert_eq!(week_of_month(d(2025, 8, 3)), 1);
        assert_eq!(week_of_month(d(2025, 8, 4)), 1);
        assert_eq!(week_of_month(d(2025, 8, 10)), 1);
        assert_eq!(week_of_month(d(2025, 8, 11)), 2);
        assert_eq!(week_of_month(d(2025, 8, 16)), 2);
        assert_eq!(week_of_month(d(2025, 8, 31)), 4);
    }

    #[test]
    fn test_month_starting_on_monday_and_sunday() {
        // September 2025 starts on a Monday.
        assert_eq!(week_of_month(d(2025, 9, 7)), 1);
        assert_eq!(week_of_month(d(2025, 9, 8)), 2);
        assert_eq!(week_of_month(d(2025, 9, 29)), 5);
        // June 2025 starts on a Sunday; the 1st stays in week 1 with the 2nd.
        assert_eq!(week_of_month(d(2025, 6, 1)), 1);
        assert_eq!(week_of_month(d(2025, 6, 2)), 1);
        assert_eq!(week_of_month(d(2025, 6, 9)), 2);
    }

    #[test]
    fn test_parity_conventions() {
        assert!(is_recurrence_week(2, Parity::Even));
        assert!(!is_recurrence_week(3, Parity::Even));
        assert!(is_recurrence_week(1, Parity::Odd));
        assert!(is_recurrence_week(5, Parity::Odd));
        assert!(!is_recurrence_week(4, Parity::Odd));
    }

    #[test]
    fn test_classify_uses_requested_parity() {
        let saturday = d(2025, 8, 16);
        let even = classify(saturday, Parity::Even);
        let odd = classify(saturday, Parity::Odd);
        assert_eq!(even.week_number, 2);
        assert!(even.is_recurrence_week);
        assert!(!odd.is_recurrence_week);
    }

    #[test]
    fn test_idempotent() {
        let date = d(2024, 2, 29);
        let before = date;
        assert_eq!(week_of_month(date), week_of_month(date));
        assert_eq!(week_of_month_result(date).reference_date, before);
    }
}
