use thiserror::Error;

/// Client error types
///
/// Only conditions that must stop the caller end up here. Expected outcomes
/// such as a missing job or a disabled crumb issuer are carried inside
/// [`crate::RequestStatus`], [`crate::IntegerResponse`] or an `Option`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JenkinsError {
    #[error("Unable to detect identity information from credentials: {0}")]
    IdentityDetection(String),

    #[error("Unable to resolve Jenkins crumb: {0}")]
    CrumbResolution(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load configuration: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type JenkinsResult<T> = Result<T, JenkinsError>;

impl From<serde_json::Error> for JenkinsError {
    fn from(err: serde_json::Error) -> Self {
        JenkinsError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for JenkinsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            JenkinsError::Serialization(err.to_string())
        } else if err.is_builder() {
            JenkinsError::InvalidConfig(err.to_string())
        } else {
            JenkinsError::Network(err.to_string())
        }
    }
}
