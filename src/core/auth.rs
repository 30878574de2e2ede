use crate::domain::model::Session;
use crate::domain::ports::{Authenticator, SessionStore};
use crate::utils::error::{Result, VisitError};
use crate::utils::validation::validate_credentials;

/// Session lifecycle: restore at startup, create on login, destroy on logout.
pub struct AuthFlow<A: Authenticator, S: SessionStore> {
    authenticator: A,
    store: S,
}

impl<A: Authenticator, S: SessionStore> AuthFlow<A, S> {
    pub fn new(authenticator: A, store: S) -> Self {
        Self {
            authenticator,
            store,
        }
    }

    /// Token expiry is only enforced by the remote service.
    pub async fn restore(&self) -> Result<Session> {
        let session = self.store.load().await?;
        tracing::debug!("Restored session (authenticated: {})", session.is_authenticated());
        Ok(session)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        validate_credentials(email, password)?;

        let token = self.authenticator.login(email.trim(), password).await?;
        let session = Session::authenticated(token);
        if !session.is_authenticated() {
            return Err(VisitError::MalformedResponse {
                message: "No se recibió el token de autenticación".to_string(),
            });
        }

        self.store.save(&session).await?;
        tracing::info!("🔑 Logged in as {}", email.trim());
        Ok(session)
    }

    pub async fn logout(&self) -> Result<Session> {
        self.store.clear().await?;
        tracing::info!("Logged out");
        Ok(Session::anonymous())
    }
}
