use anyhow::Result;
use httpmock::prelude::*;
use std::time::Duration;
use visit_week::domain::ports::VisitLookup;
use visit_week::{CalendarDate, Parity, RemoteVisitClient, Session, VisitChecker, VisitSource};

fn checker_for(server: &MockServer) -> Result<VisitChecker<RemoteVisitClient>> {
    let client = RemoteVisitClient::new(&server.base_url(), Duration::from_secs(5))?;
    Ok(VisitChecker::new(client, Parity::Even, Parity::Odd))
}

fn visit_body(mensaje: &str) -> serde_json::Value {
    serde_json::json!({
        "fechaInicio": "2025-08-18",
        "fechaFin": "2025-08-25",
        "mensaje": mensaje,
        "correo": "mama@example.com"
    })
}

/// The remote message decides the visit flag even against the local rule
#[tokio::test]
async fn test_remote_visit_overrides_local_parity() -> Result<()> {
    let server = MockServer::start();
    let lookup_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/fecha/2025-08-20")
            .header("Authorization", "Bearer tok-123")
            .header("Accept", "application/json");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(visit_body("Semana con Cony"));
    });

    let date = CalendarDate::parse_iso("2025-08-20")?;
    let outcome = checker_for(&server)?
        .check(date, &Session::authenticated("tok-123"))
        .await;

    lookup_mock.assert();
    assert_eq!(outcome.source, VisitSource::Remote);
    assert!(outcome.has_visit);
    assert_eq!(outcome.week_number, 3);
    assert_eq!(outcome.period.start_date, CalendarDate::parse_iso("2025-08-18")?);
    assert_eq!(outcome.period.end_date, CalendarDate::parse_iso("2025-08-25")?);
    assert_eq!(outcome.contact_email.as_deref(), Some("mama@example.com"));
    Ok(())
}

#[tokio::test]
async fn test_other_remote_message_is_no_visit() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/fecha/2025-08-22");
        then.status(200)
            .header("content-type", "application/json; charset=utf-8")
            .json_body(visit_body("Otra cosa"));
    });

    let date = CalendarDate::parse_iso("2025-08-22")?;
    let outcome = checker_for(&server)?
        .check(date, &Session::authenticated("tok"))
        .await;

    assert_eq!(outcome.source, VisitSource::Remote);
    assert!(!outcome.has_visit);
    assert_eq!(outcome.message, "Otra cosa");
    Ok(())
}

#[tokio::test]
async fn test_remote_period_elsewhere_falls_back() -> Result<()> {
    let server = MockServer::start();
    let lookup_mock = server.mock(|when, then| {
        when.method(GET).path("/fecha/2025-08-16");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!({
                "fechaInicio": "2025-09-03",
                "fechaFin": "2025-09-05",
                "mensaje": "Semana con Cony",
                "correo": ""
            }));
    });

    let date = CalendarDate::parse_iso("2025-08-16")?;
    let outcome = checker_for(&server)?
        .check(date, &Session::authenticated("tok"))
        .await;

    lookup_mock.assert();
    assert!(outcome.source.is_local());
    assert_eq!(outcome.period.start_date, CalendarDate::parse_iso("2025-08-11")?);
    assert_eq!(outcome.period.end_date, CalendarDate::parse_iso("2025-08-18")?);
    Ok(())
}

#[tokio::test]
async fn test_server_error_falls_back_to_local_rule() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/fecha/2025-08-16");
        then.status(500);
    });

    let date = CalendarDate::parse_iso("2025-08-16")?;
    let outcome = checker_for(&server)?
        .check(date, &Session::authenticated("tok"))
        .await;

    assert!(outcome.source.is_local());
    assert!(outcome.has_visit);
    assert_eq!(outcome.message, "Semana con Cony (modo local)");
    assert_eq!(outcome.period.start_date, CalendarDate::parse_iso("2025-08-11")?);
    assert_eq!(outcome.period.end_date, CalendarDate::parse_iso("2025-08-18")?);
    Ok(())
}

#[tokio::test]
async fn test_non_json_body_falls_back() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/fecha/2025-08-06");
        then.status(200)
            .header("content-type", "text/html")
            .body("<html>login</html>");
    });

    let date = CalendarDate::parse_iso("2025-08-06")?;
    let outcome = checker_for(&server)?
        .check(date, &Session::authenticated("tok"))
        .await;

    assert!(outcome.source.is_local());
    assert!(!outcome.has_visit);
    assert_eq!(outcome.message, "Sin visita (modo local)");
    Ok(())
}

#[tokio::test]
async fn test_missing_field_is_malformed() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/fecha/2025-08-16");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!({ "mensaje": "Semana con Cony" }));
    });

    let client = RemoteVisitClient::new(&server.base_url(), Duration::from_secs(5))?;
    let date = CalendarDate::parse_iso("2025-08-16")?;
    let err = client.lookup(date, Some("tok")).await.unwrap_err();
    assert!(matches!(
        err,
        visit_week::VisitError::MalformedResponse { .. }
    ));
    assert!(err.is_fallback_eligible());
    Ok(())
}

#[tokio::test]
async fn test_unreachable_service_falls_back() -> Result<()> {
    let client = RemoteVisitClient::new("http://127.0.0.1:1", Duration::from_secs(2))?;
    let checker = VisitChecker::new(client, Parity::Even, Parity::Odd);

    let date = CalendarDate::parse_iso("2025-08-01")?;
    let outcome = checker.check(date, &Session::authenticated("tok")).await;

    assert!(outcome.source.is_local());
    assert_eq!(outcome.week_number, 1);
    assert!(!outcome.has_visit);
    Ok(())
}

#[tokio::test]
async fn test_anonymous_session_never_calls_service() -> Result<()> {
    let server = MockServer::start();
    let lookup_mock = server.mock(|when, then| {
        when.method(GET).path("/fecha/2025-08-16");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(visit_body("Semana con Cony"));
    });

    let date = CalendarDate::parse_iso("2025-08-16")?;
    let outcome = checker_for(&server)?.check(date, &Session::anonymous()).await;

    lookup_mock.assert_hits(0);
    assert!(outcome.source.is_local());
    Ok(())
}
