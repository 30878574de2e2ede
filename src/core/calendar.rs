//! Per-day classification of one month, for calendar grids.

use crate::core::period::week_days_in_month;
use crate::core::week::classify;
use crate::domain::model::{CalendarDate, Parity, VisitOutcome};
use crate::utils::error::{Result, VisitError};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        CalendarDate::from_ymd(year, month, 1)?;
        Ok(Self { year, month })
    }

    pub fn containing(date: CalendarDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn first_day(&self) -> CalendarDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(CalendarDate::from)
            .unwrap_or_else(|| CalendarDate::from(NaiveDate::MIN))
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.next().first_day();
        u32::try_from(next.days_since(self.first_day())).unwrap_or(0)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = VisitError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| VisitError::InvalidDate {
            input: s.to_string(),
            reason: reason.to_string(),
        };
        let (year, month) = s.trim().split_once('-').ok_or_else(|| invalid("expected YYYY-MM"))?;
        let year: i32 = year.parse().map_err(|_| invalid("invalid year"))?;
        let month: u32 = month.parse().map_err(|_| invalid("invalid month"))?;
        Self::new(year, month)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    ConsultedVisit,
    ConsultedNoVisit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: CalendarDate,
    pub week_number: u32,
    pub has_visit: bool,
    pub highlight: Option<Highlight>,
}

/// The queried week to mark on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Consulted {
    date: CalendarDate,
    has_visit: bool,
}

/// A month's classification. Holds only its inputs; every call to
/// [`MonthView::days`] recomputes from the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthView {
    month: YearMonth,
    parity: Parity,
    consulted: Option<Consulted>,
}

impl MonthView {
    pub fn new(month: YearMonth, parity: Parity) -> Self {
        Self {
            month,
            parity,
            consulted: None,
        }
    }

    /// Marks the queried week when it falls in this month.
    pub fn with_consulted(mut self, outcome: &VisitOutcome) -> Self {
        self.consulted = Some(Consulted {
            date: outcome.queried_date,
            has_visit: outcome.has_visit,
        });
        self
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    /// Empty cells before the 1st on a Sunday-first grid.
    pub fn leading_blanks(&self) -> u32 {
        self.month.first_day().naive().weekday().num_days_from_sunday()
    }

    pub fn days(&self) -> impl Iterator<Item = CalendarDay> + '_ {
        let first = self.month.first_day();
        let consulted_week = self
            .consulted
            .filter(|c| c.date.same_month(&first))
            .map(|c| (week_days_in_month(c.date), c.has_visit));

        (0..self.month.days_in_month()).map(move |offset| {
            let date = first.add_days(u64::from(offset));
            let decision = classify(date, self.parity);
            let highlight = consulted_week
                .as_ref()
                .filter(|(days, _)| days.contains(&date.day()))
                .map(|&(_, has_visit)| {
                    if has_visit {
                        Highlight::ConsultedVisit
                    } else {
                        Highlight::ConsultedNoVisit
                    }
                });
            CalendarDay {
                date,
                week_number: decision.week_number,
                has_visit: decision.is_recurrence_week,
                highlight,
            }
        })
    }
}
