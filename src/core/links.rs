//! Reminder e-mail and calendar-event links for a visit week. Only built
//! here; opening them is up to the caller.

use crate::domain::model::VisitOutcome;
use chrono::{Days, NaiveTime};

const DEFAULT_TITLE: &str = "Tiempo con mi hija";
const EVENT_TITLE_FALLBACK: &str = "Tiempo con mi hija 💝";
const EVENT_DETAILS: &str = "Tiempo especial programado para estar con mi hija. ¡A disfrutar juntos!";
const GOOGLE_CALENDAR_BASE: &str = "https://calendar.google.com/calendar/render";

/// Event length for calendar entries: from the queried day to 8 days later.
pub const EVENT_SPAN_DAYS: u64 = 8;

fn title_or(outcome: &VisitOutcome, fallback: &str) -> String {
    if outcome.message.trim().is_empty() {
        fallback.to_string()
    } else {
        outcome.message.clone()
    }
}

/// `mailto:` reminder for a visit week. `None` when there is no visit or
/// no address.
pub fn reminder_mailto(outcome: &VisitOutcome, email: &str) -> Option<String> {
    let email = email.trim();
    if !outcome.has_visit || email.is_empty() {
        return None;
    }

    let start = outcome.period.start_date.long_es();
    let end = outcome.period.end_date.long_es();
    let subject = format!("Recordatorio: {} - {}", title_or(outcome, DEFAULT_TITLE), start);
    let body = format!(
        "¡Hola!\n\nTe recuerdo que tienes tiempo programado con tu hija:\n\nFecha de inicio: {}\nFecha de fin: {}\n\n¡Que disfruten mucho juntos! 💝",
        start, end
    );

    Some(format!(
        "mailto:{}?subject={}&body={}",
        email,
        urlencoding::encode(&subject),
        urlencoding::encode(&body)
    ))
}

/// Google Calendar template link for a visit week, 09:00 on the queried day
/// through 09:00 eight days later, in the calendar's own time zone.
pub fn google_calendar_link(outcome: &VisitOutcome) -> Option<String> {
    if !outcome.has_visit {
        return None;
    }

    let nine = NaiveTime::from_hms_opt(9, 0, 0)?;
    let start = outcome.queried_date.naive().and_time(nine);
    let end = start.checked_add_days(Days::new(EVENT_SPAN_DAYS))?;
    let stamp = "%Y%m%dT%H%M%S";

    Some(format!(
        "{}?action=TEMPLATE&text={}&dates={}/{}&details={}",
        GOOGLE_CALENDAR_BASE,
        urlencoding::encode(&title_or(outcome, EVENT_TITLE_FALLBACK)),
        start.format(stamp),
        end.format(stamp),
        urlencoding::encode(EVENT_DETAILS)
    ))
}
