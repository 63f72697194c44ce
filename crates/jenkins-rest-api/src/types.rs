use reqwest::StatusCode;
use serde::{
    Deserialize,
    Serialize,
};

/// Classification of a failed call, replacing exception-name matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Unauthorized,
    Forbidden,
    Conflict,
    Server,
    Transport,
    NumberFormat,
    Parse,
    Other,
}

impl ErrorKind {
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::NOT_FOUND => ErrorKind::NotFound,
            StatusCode::UNAUTHORIZED => ErrorKind::Unauthorized,
            StatusCode::FORBIDDEN => ErrorKind::Forbidden,
            StatusCode::CONFLICT => ErrorKind::Conflict,
            s if s.is_server_error() => ErrorKind::Server,
            _ => ErrorKind::Other,
        }
    }
}

/// A single error recorded while talking to Jenkins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub context: Option<String>,
    pub message: String,
    pub kind: ErrorKind,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            context: None,
            message: message.into(),
            kind,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Builds an error from a non-success HTTP status and the response body.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() || body.contains("<html") || body.contains("<!DOCTYPE") {
            format!("HTTP {status}")
        } else if body.len() > 300 {
            let cut = body
                .char_indices()
                .map(|(i, _)| i)
                .take_while(|i| *i <= 300)
                .last()
                .unwrap_or(0);
            format!("HTTP {status}: {}...", &body[..cut])
        } else {
            format!("HTTP {status}: {body}")
        };
        Self::new(ErrorKind::from_status(status), message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

/// Outcome of an operation whose only result is success or failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestStatus {
    pub value: bool,
    #[serde(default)]
    pub errors: Vec<ApiError>,
}

impl RequestStatus {
    pub fn success() -> Self {
        Self {
            value: true,
            errors: Vec::new(),
        }
    }

    pub fn failure(error: ApiError) -> Self {
        Self {
            value: false,
            errors: vec![error],
        }
    }
}

/// Outcome of an operation that yields a number, such as a queue item id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegerResponse {
    pub value: Option<i64>,
    #[serde(default)]
    pub errors: Vec<ApiError>,
}

impl IntegerResponse {
    pub fn of(value: i64) -> Self {
        Self {
            value: Some(value),
            errors: Vec::new(),
        }
    }

    pub fn failure(error: ApiError) -> Self {
        Self {
            value: None,
            errors: vec![error],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_status() {
        assert_eq!(
            ErrorKind::from_status(StatusCode::NOT_FOUND),
            ErrorKind::NotFound
        );
        assert_eq!(
            ErrorKind::from_status(StatusCode::FORBIDDEN),
            ErrorKind::Forbidden
        );
        assert_eq!(
            ErrorKind::from_status(StatusCode::BAD_GATEWAY),
            ErrorKind::Server
        );
        assert_eq!(
            ErrorKind::from_status(StatusCode::BAD_REQUEST),
            ErrorKind::Other
        );
    }

    #[test]
    fn test_error_from_status_hides_html() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, "<html><body>nope</body></html>");
        assert_eq!(err.message, "HTTP 404 Not Found");
        assert!(err.is_not_found());

        let err = ApiError::from_status(StatusCode::CONFLICT, "job already exists");
        assert_eq!(err.message, "HTTP 409 Conflict: job already exists");
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[test]
    fn test_error_from_status_truncates_long_body() {
        let body = "x".repeat(500);
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, &body);
        assert!(err.message.ends_with("..."));
        assert!(err.message.len() < 330);
    }
}
