//! Monday alignment shared by the week classifier and the period resolver.

use crate::domain::model::CalendarDate;

/// The Monday starting the week that contains `date`. A Sunday belongs to
/// the week that just ended, so it steps back six days.
pub fn monday_on_or_before(date: CalendarDate) -> CalendarDate {
    date.sub_days(u64::from(date.weekday().num_days_from_monday()))
}

/// The first Monday on or after `date`.
pub fn monday_on_or_after(date: CalendarDate) -> CalendarDate {
    let offset = (7 - date.weekday().num_days_from_monday()) % 7;
    date.add_days(u64::from(offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn d(y: i32, m: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_monday_on_or_before() {
        // Mon through Sun of the week of 2025-08-11
        for day in 11..=17 {
            assert_eq!(monday_on_or_before(d(2025, 8, day)), d(2025, 8, 11));
        }
        assert_eq!(monday_on_or_before(d(2025, 8, 18)), d(2025, 8, 18));
    }

    #[test]
    fn test_sunday_belongs_to_previous_week() {
        let sunday = d(2025, 8, 3);
        assert_eq!(sunday.weekday(), Weekday::Sun);
        assert_eq!(monday_on_or_before(sunday), d(2025, 7, 28));
    }

    #[test]
    fn test_monday_on_or_after() {
        assert_eq!(monday_on_or_after(d(2025, 8, 1)), d(2025, 8, 4));
        assert_eq!(monday_on_or_after(d(2025, 9, 1)), d(2025, 9, 1));
        assert_eq!(monday_on_or_after(d(2025, 6, 1)), d(2025, 6, 2));
    }
}
