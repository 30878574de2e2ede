use crate::utils::error::{Result, VisitError};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A day on the calendar, without time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| VisitError::InvalidDate {
                input: format!("{:04}-{:02}-{:02}", year, month, day),
                reason: "no such calendar day".to_string(),
            })
    }

    /// Parses `YYYY-MM-DD`.
    pub fn parse_iso(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(Self)
            .map_err(|e| VisitError::InvalidDate {
                input: trimmed.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn today() -> Self {
        Self(chrono::Local::now().date_naive())
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Saturates at the calendar bounds chrono supports.
    pub fn add_days(&self, days: u64) -> Self {
        Self(self.0.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX))
    }

    pub fn sub_days(&self, days: u64) -> Self {
        Self(self.0.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN))
    }

    /// Signed number of days from `other` to `self`.
    pub fn days_since(&self, other: CalendarDate) -> i64 {
        self.0.signed_duration_since(other.0).num_days()
    }

    pub fn first_of_month(&self) -> Self {
        Self(self.0.with_day(1).unwrap_or(self.0))
    }

    pub fn same_month(&self, other: &CalendarDate) -> bool {
        self.year() == other.year() && self.month() == other.month()
    }

    pub fn iso(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// Long Spanish form, e.g. `sábado, 16 de agosto de 2025`.
    pub fn long_es(&self) -> String {
        let weekday = match self.weekday() {
            Weekday::Mon => "lunes",
            Weekday::Tue => "martes",
            Weekday::Wed => "miércoles",
            Weekday::Thu => "jueves",
            Weekday::Fri => "viernes",
            Weekday::Sat => "sábado",
            Weekday::Sun => "domingo",
        };
        format!(
            "{}, {} de {} de {}",
            weekday,
            self.day(),
            month_name_es(self.month()).to_lowercase(),
            self.year()
        )
    }
}

/// Capitalised Spanish month name for a 1-based month.
pub fn month_name_es(month: u32) -> String {
    let name = MONTHS_ES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("?");
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CalendarDate {
    type Err = VisitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_iso(s)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekOfMonthResult {
    pub week_number: u32,
    pub reference_date: CalendarDate,
}

/// Which week numbers count as recurrence weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    Odd,
    Even,
}

impl Parity {
    fn remainder(self) -> u32 {
        match self {
            Parity::Odd => 1,
            Parity::Even => 0,
        }
    }

    pub fn matches(self, week_number: u32) -> bool {
        week_number % 2 == self.remainder()
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parity::Odd => write!(f, "odd"),
            Parity::Even => write!(f, "even"),
        }
    }
}

impl FromStr for Parity {
    type Err = VisitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "odd" => Ok(Parity::Odd),
            "even" => Ok(Parity::Even),
            other => Err(VisitError::InvalidConfigValueError {
                field: "parity".to_string(),
                value: other.to_string(),
                reason: "Expected 'odd' or 'even'".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceDecision {
    pub is_recurrence_week: bool,
    pub week_number: u32,
}

/// Monday-to-Monday span. `end_date` is the next Monday and is displayed as
/// inclusive; `source_date` lies in `[start_date, end_date)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitPeriod {
    pub start_date: CalendarDate,
    pub end_date: CalendarDate,
    pub source_date: CalendarDate,
}

impl VisitPeriod {
    pub fn contains(&self, date: CalendarDate) -> bool {
        date >= self.start_date && date < self.end_date
    }

    /// Days in `[start_date, end_date)`.
    pub fn days(self) -> impl Iterator<Item = CalendarDate> {
        let start = self.start_date;
        (0..7).map(move |offset| start.add_days(offset))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    /// Blank tokens yield an anonymous session.
    pub fn authenticated(token: impl Into<String>) -> Self {
        let token = token.into();
        if token.trim().is_empty() {
            Self::anonymous()
        } else {
            Self { token: Some(token) }
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Where a visit answer came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum VisitSource {
    Remote,
    Local { reason: String },
}

impl VisitSource {
    pub fn is_local(&self) -> bool {
        matches!(self, VisitSource::Local { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitOutcome {
    pub queried_date: CalendarDate,
    pub has_visit: bool,
    pub week_number: u32,
    pub period: VisitPeriod,
    pub message: String,
    pub contact_email: Option<String>,
    pub source: VisitSource,
}

/// Result of the odd-week travel check; the period is only set when travel is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelOutcome {
    pub queried_date: CalendarDate,
    pub needs_travel: bool,
    pub week_number: u32,
    pub period: Option<VisitPeriod>,
}

/// Body of `GET /fecha/{date}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitResponse {
    #[serde(rename = "fechaInicio")]
    pub fecha_inicio: String,
    #[serde(rename = "fechaFin")]
    pub fecha_fin: String,
    pub mensaje: String,
    pub correo: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: String,
}
