use thiserror::Error;

/// Failure of a single fetch against the API.
///
/// Every variant ends up as "no result" for the orchestrator; the variant
/// only tells the diagnostic trace what went wrong.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Cannot build request URL from '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Server answered {status} for {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("No response body returned from {url}")]
    MissingBody { url: String },

    #[error("Response from {url} does not match the expected shape: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    UrlConstruction,
    Transport,
    Status,
    MissingBody,
    Decode,
}

impl FetchError {
    pub fn invalid_url(url: impl Into<String>, reason: impl ToString) -> Self {
        FetchError::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::InvalidUrl { .. } => FetchErrorKind::UrlConstruction,
            FetchError::Transport { .. } => FetchErrorKind::Transport,
            FetchError::UnexpectedStatus { .. } => FetchErrorKind::Status,
            FetchError::MissingBody { .. } => FetchErrorKind::MissingBody,
            FetchError::Decode { .. } => FetchErrorKind::Decode,
        }
    }

    /// The URL (or raw reference) the failed request was aimed at.
    pub fn url(&self) -> &str {
        match self {
            FetchError::InvalidUrl { url, .. }
            | FetchError::Transport { url, .. }
            | FetchError::UnexpectedStatus { url, .. }
            | FetchError::MissingBody { url }
            | FetchError::Decode { url, .. } => url,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl AppError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::IoError(e) => format!("Could not read a file: {}", e),
            AppError::TomlError(_) => "The configuration file is not valid TOML".to_string(),
            AppError::ConfigError { message } => format!("Configuration problem: {}", message),
            AppError::InvalidConfigValueError { field, value, .. } => {
                format!("'{}' is not a valid value for {}", value, field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AppError::IoError(_) => "Check that the --config path exists and is readable".to_string(),
            AppError::TomlError(e) => format!("Fix the configuration file syntax: {}", e),
            AppError::ConfigError { .. } => "Review the configuration file".to_string(),
            AppError::InvalidConfigValueError { reason, .. } => reason.clone(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
