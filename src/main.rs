use clap::Parser;
use visit_week::config::cli::Command;
use visit_week::core::calendar::{Highlight, MonthView, YearMonth};
use visit_week::core::checker::local_outcome;
use visit_week::core::links::{google_calendar_link, reminder_mailto};
use visit_week::domain::model::{month_name_es, TravelOutcome};
use visit_week::utils::error::ErrorSeverity;
use visit_week::utils::logger::{self, LogFormat};
use visit_week::utils::validation::Validate;
use visit_week::{
    AuthFlow, CalendarDate, CliConfig, FileSessionStore, RemoteVisitClient, Result, VisitChecker,
    VisitError, VisitOutcome,
};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    let log_format = if config.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(log_format, config.verbose);

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 2,
            ErrorSeverity::Medium => 3,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 4,
        };
        std::process::exit(exit_code);
    }
}

async fn run(config: CliConfig) -> Result<()> {
    let settings = config.settings()?;
    settings.validate()?;

    let client = RemoteVisitClient::new(&settings.service.base_url, settings.timeout())?
        .with_paths(&settings.service.login_path, &settings.service.lookup_path);
    let store = FileSessionStore::new(settings.session_dir(), settings.session.key.clone());
    let auth = AuthFlow::new(client.clone(), store);
    let checker = VisitChecker::new(
        client,
        settings.recurrence.lookup_fallback,
        settings.recurrence.travel,
    );

    match config.command {
        Command::Login { email, password } => {
            auth.login(&email, &password).await?;
            println!("✅ Sesión iniciada");
        }
        Command::Logout => {
            auth.logout().await?;
            println!("Sesión cerrada");
        }
        Command::Check {
            date,
            offline,
            json,
        } => {
            let date = CalendarDate::parse_iso(&date)?;
            let outcome = if offline {
                local_outcome(date, settings.recurrence.lookup_fallback, "offline".to_string())
            } else {
                checker.check(date, &auth.restore().await?).await
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print_outcome(&outcome);
            }
        }
        Command::Travel { date } => {
            let date = CalendarDate::parse_iso(&date)?;
            print_travel(&checker.travel_check(date));
        }
        Command::Calendar { month, consulted } => {
            let month = match month {
                Some(month) => month.parse::<YearMonth>()?,
                None => YearMonth::containing(CalendarDate::today()),
            };
            let mut view = MonthView::new(month, settings.recurrence.calendar);
            if let Some(consulted) = consulted {
                let date = CalendarDate::parse_iso(&consulted)?;
                let outcome = checker.check(date, &auth.restore().await?).await;
                view = view.with_consulted(&outcome);
            }
            print_month(&view);
        }
        Command::Reminder { date, email } => {
            let date = CalendarDate::parse_iso(&date)?;
            let session = auth.restore().await?;
            print_reminder(&checker.check(date, &session).await, email)?;
        }
    }

    Ok(())
}

fn print_outcome(outcome: &VisitOutcome) {
    if outcome.has_visit {
        println!("💝 ¡Semana con visita!");
    } else {
        println!("Sin visita esta semana");
    }
    println!("Fecha consultada: {}", outcome.queried_date.long_es());
    println!("Semana del mes: Semana {}", outcome.week_number);
    println!("Mensaje: {}", outcome.message);
    println!("Desde: {}", outcome.period.start_date.long_es());
    println!("Hasta (incluido): {}", outcome.period.end_date.long_es());
    if let Some(email) = &outcome.contact_email {
        println!("Correo: {}", email);
    }
    if outcome.source.is_local() {
        println!("⚠️ Resultado calculado localmente (servicio no disponible)");
    }
}

fn print_travel(outcome: &TravelOutcome) {
    println!("Fecha consultada: {}", outcome.queried_date.long_es());
    println!("Semana del mes: Semana {}", outcome.week_number);
    match &outcome.period {
        Some(period) => {
            println!("✈️ ¡Sí necesitas viajar!");
            println!("Desde: {}", period.start_date.long_es());
            println!("Hasta: {}", period.end_date.long_es());
        }
        None => println!("No necesitas viajar"),
    }
}

fn print_month(view: &MonthView) {
    let month = view.month();
    println!("{} {}", month_name_es(month.month()), month.year());
    println!(" Dom  Lun  Mar  Mié  Jue  Vie  Sáb");

    let mut cells: Vec<String> = (0..view.leading_blanks()).map(|_| "    ".to_string()).collect();
    for day in view.days() {
        let marker = match (day.highlight, day.has_visit) {
            (Some(Highlight::ConsultedVisit), _) => '+',
            (Some(Highlight::ConsultedNoVisit), _) => '-',
            (None, true) => '*',
            (None, false) => ' ',
        };
        cells.push(format!("{:>3}{}", day.date.day(), marker));
    }

    for row in cells.chunks(7) {
        println!("{}", row.join(" "));
    }
    println!("* día de visita  + semana consultada con visita  - semana consultada sin visita");
}

fn print_reminder(outcome: &VisitOutcome, email: Option<String>) -> Result<()> {
    if !outcome.has_visit {
        return Err(VisitError::ValidationError {
            message: format!(
                "{} no cae en una semana de visita",
                outcome.queried_date.long_es()
            ),
        });
    }

    let email = email.or_else(|| outcome.contact_email.clone()).unwrap_or_default();
    match reminder_mailto(outcome, &email) {
        Some(link) => println!("📧 {}", link),
        None => println!("📧 Sin correo para el recordatorio"),
    }
    if let Some(link) = google_calendar_link(outcome) {
        println!("📅 {}", link);
    }
    Ok(())
}
