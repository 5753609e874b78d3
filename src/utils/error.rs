use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillScapeError {
    #[error("No location found for '{query}'")]
    LocationNotFound { query: String },

    #[error("Geocoding request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Geocoding transport failure: {message}")]
    TransportFailure { message: String },

    #[error("Draft is missing required fields: {}", fields.join(", "))]
    ValidationGap { fields: Vec<String> },

    #[error("Cannot {action} while onboarding is {from}")]
    InvalidTransition { from: String, action: String },

    #[error("Voice recognition failed: {message}")]
    RecognitionFailed { message: String },

    #[error("Microphone permission denied")]
    PermissionDenied,

    #[error("Unknown profile id: {id}")]
    UnknownProfile { id: u32 },

    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Location,
    Onboarding,
    Catalog,
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

impl SkillScapeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::LocationNotFound { .. }
            | Self::TransportError(_)
            | Self::TransportFailure { .. } => ErrorCategory::Location,
            Self::ValidationGap { .. }
            | Self::InvalidTransition { .. }
            | Self::RecognitionFailed { .. }
            | Self::PermissionDenied => ErrorCategory::Onboarding,
            Self::UnknownProfile { .. } | Self::CatalogError { .. } => ErrorCategory::Catalog,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 使用者可以直接修正再送出
            Self::LocationNotFound { .. }
            | Self::ValidationGap { .. }
            | Self::InvalidTransition { .. }
            | Self::UnknownProfile { .. } => ErrorSeverity::Low,
            Self::TransportError(_)
            | Self::TransportFailure { .. }
            | Self::RecognitionFailed { .. }
            | Self::PermissionDenied => ErrorSeverity::Medium,
            Self::CatalogError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::LocationNotFound { .. } => {
                "Try a more specific place name, such as a neighborhood and city".to_string()
            }
            Self::TransportError(_) | Self::TransportFailure { .. } => {
                "Check your network connection and geocoding token, then search again".to_string()
            }
            Self::ValidationGap { fields } => {
                format!("Fill in the following before submitting: {}", fields.join(", "))
            }
            Self::InvalidTransition { .. } => {
                "Finish or restart the current onboarding step first".to_string()
            }
            Self::RecognitionFailed { .. } => "Record your introduction again".to_string(),
            Self::PermissionDenied => {
                "Allow microphone access and start recording again".to_string()
            }
            Self::UnknownProfile { .. } => {
                "Use the search command to list available profile ids".to_string()
            }
            Self::CatalogError { .. } => {
                "Check the catalog JSON file against the profile format".to_string()
            }
            Self::ConfigValidationError { field, .. }
            | Self::InvalidConfigValueError { field, .. }
            | Self::MissingConfigError { field } => {
                format!("Review the '{}' setting in your configuration file", field)
            }
            Self::IoError(_) => "Check that the file exists and is readable".to_string(),
            Self::SerializationError(_) => "Check the file contents are valid JSON".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::LocationNotFound { query } => format!("Couldn't find \"{}\"", query),
            Self::TransportError(_) | Self::TransportFailure { .. } => {
                "Couldn't reach the location service".to_string()
            }
            Self::ValidationGap { .. } => "Your profile is incomplete".to_string(),
            Self::RecognitionFailed { .. } => "Couldn't understand. Please try again.".to_string(),
            Self::PermissionDenied => "Microphone access is required to record".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SkillScapeError>;
