use crate::domain::model::Session;
use crate::domain::ports::SessionStore;
use crate::utils::error::Result;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

pub const DEFAULT_SESSION_KEY: &str = "auth_token";

/// Keeps the token in `<base_path>/<key>`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    base_path: PathBuf,
    key: String,
}

impl FileSessionStore {
    pub fn new(base_path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            key: key.into(),
        }
    }

    pub fn slot_path(&self) -> PathBuf {
        Path::new(&self.base_path).join(&self.key)
    }
}

impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Session> {
        match tokio::fs::read_to_string(self.slot_path()).await {
            Ok(token) => Ok(Session::authenticated(token.trim())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Session::anonymous()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let Some(token) = session.token() else {
            return self.clear().await;
        };

        let full_path = self.slot_path();
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full_path, token.as_bytes()).await?;
        tracing::debug!("Session saved to {}", full_path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(self.slot_path()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process slot, for tests and one-shot runs.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    token: Arc<Mutex<Option<String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Session> {
        let token = self.token.lock().await;
        Ok(token.clone().map(Session::authenticated).unwrap_or_default())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        *self.token.lock().await = session.token().map(str::to_string);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.token.lock().await = None;
        Ok(())
    }
}
