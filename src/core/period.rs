use crate::core::align::monday_on_or_before;
use crate::domain::model::{CalendarDate, VisitPeriod};

/// Period for `date`: from its Monday to the following Monday.
pub fn resolve_period(date: CalendarDate) -> VisitPeriod {
    let start_date = monday_on_or_before(date);
    VisitPeriod {
        start_date,
        end_date: start_date.add_days(7),
        source_date: date,
    }
}

/// Day-of-month numbers of `date`'s Monday-to-Sunday week that fall inside
/// `date`'s own month, in order.
pub fn week_days_in_month(date: CalendarDate) -> Vec<u32> {
    resolve_period(date)
        .days()
        .filter(|day| day.same_month(&date))
        .map(|day| day.day())
        .collect()
}
