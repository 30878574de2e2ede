use crate::core::period::resolve_period;
use crate::core::week::{classify, week_of_month};
use crate::domain::model::{
    CalendarDate, Parity, Session, TravelOutcome, VisitOutcome, VisitPeriod, VisitResponse,
    VisitSource,
};
use crate::domain::ports::VisitLookup;
use crate::utils::error::{Result, VisitError};

/// The only remote `mensaje` that means "visit week" (compared trimmed).
pub const VISIT_WEEK_MESSAGE: &str = "Semana con Cony";

const LOCAL_VISIT_MESSAGE: &str = "Semana con Cony (modo local)";
const LOCAL_NO_VISIT_MESSAGE: &str = "Sin visita (modo local)";
const PERIOD_LENGTH_DAYS: i64 = 7;

/// Answers "is this a visit week?" from the lookup service, or locally when
/// the service cannot be used.
pub struct VisitChecker<L: VisitLookup> {
    lookup: L,
    fallback_parity: Parity,
    travel_parity: Parity,
}

impl<L: VisitLookup> VisitChecker<L> {
    pub fn new(lookup: L, fallback_parity: Parity, travel_parity: Parity) -> Self {
        Self {
            lookup,
            fallback_parity,
            travel_parity,
        }
    }

    /// Never fails: any remote failure turns into a local answer.
    pub async fn check(&self, date: CalendarDate, session: &Session) -> VisitOutcome {
        match self.check_remote(date, session).await {
            Ok(outcome) => {
                tracing::info!(
                    "✅ Remote answer for {}: {:?} (visit: {})",
                    date,
                    outcome.message,
                    outcome.has_visit
                );
                outcome
            }
            Err(e) if e.is_fallback_eligible() => {
                tracing::warn!(
                    "⚠️ Lookup for {} failed ({:?}): {}; using local {} rule",
                    date,
                    e.category(),
                    e,
                    self.fallback_parity
                );
                local_outcome(date, self.fallback_parity, e.to_string())
            }
            Err(e) => {
                tracing::error!(
                    "❌ Unexpected {:?} error during lookup for {}: {}; using local {} rule",
                    e.category(),
                    date,
                    e,
                    self.fallback_parity
                );
                local_outcome(date, self.fallback_parity, format!("unexpected: {}", e))
            }
        }
    }

    pub async fn check_remote(&self, date: CalendarDate, session: &Session) -> Result<VisitOutcome> {
        let token = session.token().ok_or_else(|| VisitError::AuthorizationFailure {
            status: None,
            message: "No hay sesión activa".to_string(),
        })?;

        let response = self.lookup.lookup(date, Some(token)).await?;
        tracing::debug!("Lookup response: {:?}", response);
        reconcile(date, &response)
    }

    pub fn travel_check(&self, date: CalendarDate) -> TravelOutcome {
        travel_outcome(date, self.travel_parity)
    }
}

/// Builds the outcome from a successful remote response. The remote message
/// decides the visit flag; the week number is always computed locally.
/// The remote span must be seven days long and cover `date`.
pub fn reconcile(date: CalendarDate, response: &VisitResponse) -> Result<VisitOutcome> {
    let start_date = parse_remote_date("fechaInicio", &response.fecha_inicio)?;
    let end_date = parse_remote_date("fechaFin", &response.fecha_fin)?;
    let period = VisitPeriod {
        start_date,
        end_date,
        source_date: date,
    };

    if end_date.days_since(start_date) != PERIOD_LENGTH_DAYS {
        return Err(VisitError::MalformedResponse {
            message: format!(
                "Remote period {}..{} does not span {} days",
                start_date, end_date, PERIOD_LENGTH_DAYS
            ),
        });
    }
    if !period.contains(date) {
        return Err(VisitError::MalformedResponse {
            message: format!(
                "Remote period {}..{} does not contain {}",
                start_date, end_date, date
            ),
        });
    }

    let correo = response.correo.trim();
    Ok(VisitOutcome {
        queried_date: date,
        has_visit: response.mensaje.trim() == VISIT_WEEK_MESSAGE,
        week_number: week_of_month(date),
        period,
        message: response.mensaje.clone(),
        contact_email: (!correo.is_empty()).then(|| correo.to_string()),
        source: VisitSource::Remote,
    })
}

pub fn local_outcome(date: CalendarDate, parity: Parity, reason: String) -> VisitOutcome {
    let decision = classify(date, parity);
    let message = if decision.is_recurrence_week {
        LOCAL_VISIT_MESSAGE
    } else {
        LOCAL_NO_VISIT_MESSAGE
    };

    VisitOutcome {
        queried_date: date,
        has_visit: decision.is_recurrence_week,
        week_number: decision.week_number,
        period: resolve_period(date),
        message: message.to_string(),
        contact_email: None,
        source: VisitSource::Local { reason },
    }
}

pub fn travel_outcome(date: CalendarDate, parity: Parity) -> TravelOutcome {
    let decision = classify(date, parity);
    TravelOutcome {
        queried_date: date,
        needs_travel: decision.is_recurrence_week,
        week_number: decision.week_number,
        period: decision
            .is_recurrence_week
            .then(|| resolve_period(date)),
    }
}

fn parse_remote_date(field: &str, value: &str) -> Result<CalendarDate> {
    CalendarDate::parse_iso(value).map_err(|e| VisitError::MalformedResponse {
        message: format!("{} is not an ISO date: {}", field, e),
    })
}
