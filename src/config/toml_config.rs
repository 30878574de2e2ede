use crate::adapters::http::{DEFAULT_BASE_URL, DEFAULT_LOGIN_PATH, DEFAULT_LOOKUP_PATH};
use crate::adapters::storage::DEFAULT_SESSION_KEY;
use crate::domain::model::Parity;
use crate::utils::error::{Result, VisitError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub service: ServiceConfig,
    pub session: SessionConfig,
    pub recurrence: RecurrenceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    pub login_path: String,
    pub lookup_path: String,
    pub timeout_seconds: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            lookup_path: DEFAULT_LOOKUP_PATH.to_string(),
            timeout_seconds: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Directory holding the token slot. Defaults to `$HOME/.visit-week`.
    pub dir: Option<String>,
    pub key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dir: None,
            key: DEFAULT_SESSION_KEY.to_string(),
        }
    }
}

/// The two historical conventions are kept apart on purpose: the visit
/// calendar and the lookup fallback count even weeks, the travel check odd ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecurrenceConfig {
    pub calendar: Parity,
    pub lookup_fallback: Parity,
    pub travel: Parity,
}

impl Default for RecurrenceConfig {
    fn default() -> Self {
        Self {
            calendar: Parity::Even,
            lookup_fallback: Parity::Even,
            travel: Parity::Odd,
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(VisitError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| VisitError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| VisitError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.service.timeout_seconds)
    }

    pub fn session_dir(&self) -> String {
        self.session.dir.clone().unwrap_or_else(|| {
            std::env::var("HOME")
                .map(|home| format!("{}/.visit-week", home))
                .unwrap_or_else(|_| ".visit-week".to_string())
        })
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("service.base_url", &self.service.base_url)?;
        validation::validate_endpoint_path("service.login_path", &self.service.login_path)?;
        validation::validate_endpoint_path("service.lookup_path", &self.service.lookup_path)?;
        validation::validate_range("service.timeout_seconds", self.service.timeout_seconds, 1, 300)?;
        validation::validate_path("session.dir", &self.session_dir())?;
        validation::validate_slot_key("session.key", &self.session.key)?;
        Ok(())
    }
}
