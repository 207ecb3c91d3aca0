use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignupError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Backend returned {status}: {message}")]
    BackendError { status: u16, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Invalid date '{input}': {reason}")]
    InvalidDateError { input: String, reason: String },

    #[error("Session {session_id} not found")]
    SessionNotFound { session_id: i64 },

    #[error("Session {session_id} is full ({max_players} players)")]
    SessionFull { session_id: i64, max_players: u32 },

    #[error("User {user_id} is already signed up for session {session_id}")]
    AlreadySignedUp { session_id: i64, user_id: String },

    #[error("User {user_id} is not signed up for session {session_id}")]
    NotSignedUp { session_id: i64, user_id: String },

    #[error("User {user_id} is not a game master")]
    NotGameMaster { user_id: String },

    #[error("Session date '{date}' is not in the future")]
    PastDate { date: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Backend,
    System,
    Configuration,
    Validation,
    Rule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SignupError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SignupError::ApiError(_) => ErrorCategory::Network,
            SignupError::BackendError { .. } => ErrorCategory::Backend,
            SignupError::IoError(_) | SignupError::SerializationError(_) => ErrorCategory::System,
            SignupError::ConfigValidationError { .. }
            | SignupError::MissingConfigError { .. }
            | SignupError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SignupError::ValidationError { .. } | SignupError::InvalidDateError { .. } => {
                ErrorCategory::Validation
            }
            SignupError::SessionNotFound { .. }
            | SignupError::SessionFull { .. }
            | SignupError::AlreadySignedUp { .. }
            | SignupError::NotSignedUp { .. }
            | SignupError::NotGameMaster { .. }
            | SignupError::PastDate { .. } => ErrorCategory::Rule,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Rule => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Backend => match self {
                SignupError::BackendError { status, .. } if *status >= 500 => {
                    ErrorSeverity::Medium
                }
                _ => ErrorSeverity::High,
            },
            ErrorCategory::Validation | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit status for the CLI. Never zero.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SignupError::ApiError(_) => "Could not reach the session backend".to_string(),
            SignupError::BackendError { status, .. } => {
                format!("The session backend rejected the request (HTTP {})", status)
            }
            SignupError::IoError(e) => format!("File system error: {}", e),
            SignupError::SerializationError(_) => {
                "Received data in an unexpected format".to_string()
            }
            SignupError::SessionNotFound { session_id } => {
                format!("Session #{} does not exist", session_id)
            }
            SignupError::SessionFull { .. } => "This session is already full".to_string(),
            SignupError::AlreadySignedUp { .. } => {
                "You are already signed up for this session".to_string()
            }
            SignupError::NotSignedUp { .. } => {
                "You are not signed up for this session".to_string()
            }
            SignupError::NotGameMaster { .. } => {
                "Only game masters can create sessions".to_string()
            }
            SignupError::PastDate { .. } => {
                "Please choose a date in the future (MST)".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection and the backend URL",
            ErrorCategory::Backend => "Check the API key and access token, then retry",
            ErrorCategory::System => "Check file permissions and available disk space",
            ErrorCategory::Configuration => "Fix the configuration file and run again",
            ErrorCategory::Validation => "Correct the input values and try again",
            ErrorCategory::Rule => "Refresh the session list and pick another action",
        }
    }
}

pub type Result<T> = std::result::Result<T, SignupError>;
