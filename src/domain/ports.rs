use crate::domain::model::{CalendarDate, Session, VisitResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Durable slot holding the bearer token between runs.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> impl std::future::Future<Output = Result<Session>> + Send;
    fn save(&self, session: &Session) -> impl std::future::Future<Output = Result<()>> + Send;
    fn clear(&self) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Remote Auth Service: exchanges credentials for a bearer token.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<String>;
}

/// Remote Visit Lookup Service.
#[async_trait]
pub trait VisitLookup: Send + Sync {
    async fn lookup(&self, date: CalendarDate, token: Option<&str>) -> Result<VisitResponse>;
}
