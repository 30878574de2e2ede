use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisitError {
    #[error("Authentication failed: {message}")]
    AuthenticationFailure { message: String },

    #[error("Authorization failed (status {status:?}): {message}")]
    AuthorizationFailure { status: Option<u16>, message: String },

    #[error("Service unavailable (status {status})")]
    ServiceUnavailable { status: u16 },

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("Invalid login body: {detail}")]
    InvalidLoginBody { detail: String },

    #[error("Invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    Remote,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl VisitError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            VisitError::AuthenticationFailure { .. } | VisitError::AuthorizationFailure { .. } => {
                ErrorCategory::Authentication
            }
            VisitError::ServiceUnavailable { .. }
            | VisitError::NetworkFailure(_)
            | VisitError::UnexpectedStatus { .. }
            | VisitError::MalformedResponse { .. }
            | VisitError::InvalidLoginBody { .. } => ErrorCategory::Remote,
            VisitError::InvalidDate { .. } | VisitError::ValidationError { .. } => {
                ErrorCategory::Input
            }
            VisitError::ConfigError { .. }
            | VisitError::ConfigValidationError { .. }
            | VisitError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            VisitError::IoError(_) | VisitError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Remote => ErrorSeverity::Medium,
            ErrorCategory::Authentication | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Whether a date lookup that failed this way may be answered locally.
    pub fn is_fallback_eligible(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Remote | ErrorCategory::Authentication
        )
    }

    /// Message shown to the person using the app.
    pub fn user_friendly_message(&self) -> String {
        match self {
            VisitError::AuthenticationFailure { message }
            | VisitError::AuthorizationFailure { message, .. } => message.clone(),
            VisitError::ServiceUnavailable { status: 500 } => {
                "Error del servidor. Intenta más tarde".to_string()
            }
            VisitError::ServiceUnavailable { .. } => {
                "Servicio no disponible. Intenta más tarde".to_string()
            }
            VisitError::NetworkFailure(_) => {
                "No se puede conectar al servidor. Verifica que esté ejecutándose".to_string()
            }
            VisitError::UnexpectedStatus { .. } => {
                "Error de conexión. Verifica tu internet".to_string()
            }
            VisitError::MalformedResponse { message } => message.clone(),
            VisitError::InvalidLoginBody { .. } => "Error inesperado. Intenta de nuevo".to_string(),
            VisitError::InvalidDate { input, .. } => format!("Fecha inválida: {}", input),
            VisitError::ValidationError { message } => message.clone(),
            VisitError::ConfigError { .. }
            | VisitError::ConfigValidationError { .. }
            | VisitError::InvalidConfigValueError { .. } => format!("Configuración inválida: {}", self),
            VisitError::IoError(_) | VisitError::SerializationError(_) => {
                "Error inesperado. Intenta de nuevo".to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            VisitError::AuthenticationFailure { .. } => "Check the email and password and log in again",
            VisitError::AuthorizationFailure { .. } => {
                "The token was rejected; run `visit-week login` to obtain a new one"
            }
            VisitError::ServiceUnavailable { .. } | VisitError::UnexpectedStatus { .. } => {
                "Retry later; the lookup service is not answering normally"
            }
            VisitError::NetworkFailure(_) => "Verify the service base URL and network connectivity",
            VisitError::MalformedResponse { .. } | VisitError::InvalidLoginBody { .. } => {
                "The service returned an unexpected body; verify the base URL points at the right API"
            }
            VisitError::InvalidDate { .. } => "Use the ISO format YYYY-MM-DD",
            VisitError::ValidationError { .. } => "Fill in every field with a valid value",
            VisitError::ConfigError { .. }
            | VisitError::ConfigValidationError { .. }
            | VisitError::InvalidConfigValueError { .. } => "Review the configuration file and CLI flags",
            VisitError::IoError(_) => "Check that the session directory is writable",
            VisitError::SerializationError(_) => "Report the failing input",
        }
    }
}

pub type Result<T> = std::result::Result<T, VisitError>;
