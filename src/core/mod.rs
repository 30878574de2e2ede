pub mod align;
pub mod auth;
pub mod calendar;
pub mod checker;
pub mod links;
pub mod period;
pub mod week;

pub use crate::domain::model::{CalendarDate, Parity, Session, VisitOutcome, VisitPeriod};
pub use crate::domain::ports::{Authenticator, SessionStore, VisitLookup};
pub use crate::utils::error::Result;
