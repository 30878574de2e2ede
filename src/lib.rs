pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{FileSessionStore, MemorySessionStore, RemoteVisitClient};
pub use self::core::{auth::AuthFlow, calendar::MonthView, checker::VisitChecker};
pub use domain::model::{CalendarDate, Parity, Session, VisitOutcome, VisitPeriod, VisitSource};
pub use utils::error::{Result, VisitError};
