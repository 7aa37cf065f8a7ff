//! Error types for OpsTeam

use thiserror::Error;

use crate::team::CreateStage;

/// Result type alias for OpsTeam operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A team creation failed after the team already existed remotely.
    ///
    /// `source` is the failure that aborted the workflow. The half-created team
    /// was deleted on a best-effort basis; `rollback_error` is set when that
    /// delete failed too.
    #[error("{source} (created team was rolled back{})", rollback_note(.rollback_error))]
    RolledBack {
        stage: CreateStage,
        source: Box<Error>,
        rollback_error: Option<String>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn rollback_note(rollback_error: &Option<String>) -> String {
    match rollback_error {
        Some(err) => format!(", but the rollback failed: {}", err),
        None => String::new(),
    }
}

impl Error {
    /// The failure that started it all, looking through rollback wrapping.
    pub fn root(&self) -> &Error {
        match self {
            Error::RolledBack { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// An entry of the per-member error list returned by membership calls.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberOperationError {
    #[serde(default)]
    pub account_id: Option<String>,

    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

impl std::fmt::Display for MemberOperationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let account = self.account_id.as_deref().unwrap_or("<unknown>");
        match (&self.code, &self.message) {
            (Some(code), Some(msg)) => write!(f, "{}: {} ({})", account, msg, code),
            (None, Some(msg)) => write!(f, "{}: {}", account, msg),
            (Some(code), None) => write!(f, "{}: {}", account, code),
            (None, None) => write!(f, "{}", account),
        }
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was obtained from the remote system.
    #[error("Network error: {0}")]
    Transport(String),

    /// The remote system answered with a non-2xx status.
    #[error("Unable to {action}, status code: {status}{}", body_note(.body))]
    Remote {
        action: String,
        status: u16,
        body: Option<String>,
    },

    /// A membership call succeeded at the HTTP level but reported per-member errors.
    #[error("Unable to {action}, got errors: {}", join_errors(.errors))]
    PartialMemberOperation {
        action: String,
        errors: Vec<MemberOperationError>,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

fn body_note(body: &Option<String>) -> String {
    match body {
        Some(body) => format!(". Got response: {}", body),
        None => String::new(),
    }
}

fn join_errors(errors: &[MemberOperationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ApiError {
    /// HTTP status of a remote error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Transport("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Transport("Failed to connect to API".to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Client-side validation failures, detected before any remote call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid update: {field} cannot be changed once a team is created")]
    ImmutableField { field: &'static str },

    #[error("Expected import identifier with format: {expected}. Got: {got:?}")]
    ImportId { expected: &'static str, got: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `opsteam init` or pass --config.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("API credentials not configured. Set `email` and `api_token` in the config file.")]
    MissingCredentials,

    #[error("Organization not configured. Pass --org or set `org_id` in the config file.")]
    MissingOrgId,

    #[error("Cloud ID not configured. Pass --cloud-id or set `cloud_id` in the config file.")]
    MissingCloudId,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
