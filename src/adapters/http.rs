use crate::domain::model::{CalendarDate, LoginRequest, LoginResponse, VisitResponse};
use crate::domain::ports::{Authenticator, VisitLookup};
use crate::utils::error::{Result, VisitError};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://control-semana-hija-production.up.railway.app";
pub const DEFAULT_LOGIN_PATH: &str = "/auth/login";
pub const DEFAULT_LOOKUP_PATH: &str = "/fecha";

/// HTTP client for the Auth Service and the Visit Lookup Service.
#[derive(Debug, Clone)]
pub struct RemoteVisitClient {
    client: Client,
    base_url: String,
    login_path: String,
    lookup_path: String,
}

impl RemoteVisitClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            lookup_path: DEFAULT_LOOKUP_PATH.to_string(),
        })
    }

    pub fn with_paths(mut self, login_path: &str, lookup_path: &str) -> Self {
        self.login_path = login_path.to_string();
        self.lookup_path = lookup_path.trim_end_matches('/').to_string();
        self
    }

    pub fn login_url(&self) -> String {
        format!("{}{}", self.base_url, self.login_path)
    }

    pub fn lookup_url(&self, date: CalendarDate) -> String {
        format!("{}{}/{}", self.base_url, self.lookup_path, date.iso())
    }
}

/// Login status handling, with the messages the login form shows.
fn login_status_error(status: StatusCode) -> VisitError {
    match status.as_u16() {
        401 => VisitError::AuthenticationFailure {
            message: "Email o contraseña incorrectos".to_string(),
        },
        403 => VisitError::AuthorizationFailure {
            status: Some(403),
            message: "Acceso denegado. Contacta al administrador".to_string(),
        },
        code @ (404 | 500) => VisitError::ServiceUnavailable { status: code },
        code => VisitError::UnexpectedStatus { status: code },
    }
}

fn lookup_status_error(status: StatusCode) -> VisitError {
    match status.as_u16() {
        code @ (401 | 403) => VisitError::AuthorizationFailure {
            status: Some(code),
            message: "Token rechazado por el servicio".to_string(),
        },
        code if status.is_server_error() || code == 404 => {
            VisitError::ServiceUnavailable { status: code }
        }
        code => VisitError::UnexpectedStatus { status: code },
    }
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"))
}

#[async_trait]
impl Authenticator for RemoteVisitClient {
    async fn login(&self, username: &str, password: &str) -> Result<String> {
        let url = self.login_url();
        tracing::debug!("Making login request to: {}", url);

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        tracing::debug!("Login response status: {}", response.status());
        if !response.status().is_success() {
            return Err(login_status_error(response.status()));
        }

        let body = response.text().await?;
        let parsed: LoginResponse =
            serde_json::from_str(&body).map_err(|e| VisitError::InvalidLoginBody {
                detail: e.to_string(),
            })?;

        Ok(parsed.token)
    }
}

#[async_trait]
impl VisitLookup for RemoteVisitClient {
    async fn lookup(&self, date: CalendarDate, token: Option<&str>) -> Result<VisitResponse> {
        let url = self.lookup_url(date);
        tracing::debug!("Querying lookup service at: {}", url);

        let mut request = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        match token {
            Some(token) => {
                tracing::debug!("Bearer token attached ({} chars)", token.len());
                request = request.header(AUTHORIZATION, format!("Bearer {}", token));
            }
            None => tracing::debug!("No token available for lookup"),
        }

        let response = request.send().await?;
        tracing::debug!("Lookup response status: {}", response.status());

        if !response.status().is_success() {
            return Err(lookup_status_error(response.status()));
        }

        if !is_json(&response) {
            let text = response.text().await.unwrap_or_default();
            tracing::debug!("Non-JSON lookup body: {}", text.chars().take(200).collect::<String>());
            return Err(VisitError::MalformedResponse {
                message: "El microservicio no devolvió JSON válido".to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| VisitError::MalformedResponse {
            message: format!("Invalid lookup body: {}", e),
        })
    }
}
