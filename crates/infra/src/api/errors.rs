//! API-specific error types
//!
//! Classifies REST failures before they are folded into the domain error.

use std::time::Duration;

use stockdesk_domain::StockDeskError;
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Authentication errors (401, 403)
    Authentication,
    /// Rate limiting errors (429)
    RateLimit,
    /// Server errors (5xx)
    Server,
    /// Client errors (4xx except auth)
    Client,
    /// Network/connection errors and timeouts
    Network,
    /// Configuration errors and undecodable responses
    Config,
}

/// API operation errors
///
/// `message` fields carry the backend's own `message`/`error` text when the
/// response body had one.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limit exceeded: {}", .message.as_deref().unwrap_or("no detail"))]
    RateLimit { message: Option<String> },

    #[error("Server error ({status}): {}", .message.as_deref().unwrap_or("no detail"))]
    Server { status: u16, message: Option<String> },

    #[error("Client error ({status}): {}", .message.as_deref().unwrap_or("no detail"))]
    Client { status: u16, message: Option<String> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth(_) => ApiErrorCategory::Authentication,
            Self::RateLimit { .. } => ApiErrorCategory::RateLimit,
            Self::Server { .. } => ApiErrorCategory::Server,
            Self::Client { .. } | Self::NotFound(_) => ApiErrorCategory::Client,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Config(_) | Self::Decode(_) => ApiErrorCategory::Config,
        }
    }

    /// HTTP status the backend answered with, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimit { .. } => Some(429),
            Self::Server { status, .. } | Self::Client { status, .. } => Some(*status),
            Self::NotFound(_) => Some(404),
            _ => None,
        }
    }

    /// Backend-provided message, when the response carried one.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            Self::RateLimit { message }
            | Self::Server { message, .. }
            | Self::Client { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<ApiError> for StockDeskError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Auth(message) => Self::Auth(message),
            ApiError::NotFound(message) => Self::NotFound(message),
            ApiError::Network(message) => Self::Network(message),
            ApiError::Timeout(after) => Self::Network(format!("request timed out after {after:?}")),
            ApiError::Config(message) => Self::Config(message),
            ApiError::Decode(detail) => {
                tracing::debug!(%detail, "api.response.undecodable");
                Self::Remote { status: None, message: String::new() }
            }
            ApiError::RateLimit { message } => {
                Self::Remote { status: Some(429), message: message.unwrap_or_default() }
            }
            ApiError::Server { status, message } | ApiError::Client { status, message } => {
                Self::Remote { status: Some(status), message: message.unwrap_or_default() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(ApiError::Auth("test".into()).category(), ApiErrorCategory::Authentication);
        assert_eq!(ApiError::RateLimit { message: None }.category(), ApiErrorCategory::RateLimit);
        assert_eq!(
            ApiError::Server { status: 502, message: None }.category(),
            ApiErrorCategory::Server
        );
        assert_eq!(ApiError::NotFound("x".into()).category(), ApiErrorCategory::Client);
        assert_eq!(
            ApiError::Timeout(Duration::from_secs(1)).category(),
            ApiErrorCategory::Network
        );
    }

    #[test]
    fn remote_message_survives_conversion() {
        let err = ApiError::Client {
            status: 400,
            message: Some("Insufficient stock at source".into()),
        };
        assert_eq!(err.status(), Some(400));

        let domain: StockDeskError = err.into();
        assert_eq!(domain.user_message(), "Insufficient stock at source");
        assert!(matches!(domain, StockDeskError::Remote { status: Some(400), .. }));
    }

    #[test]
    fn missing_remote_message_falls_back_to_generic_text() {
        let domain: StockDeskError = ApiError::Server { status: 500, message: None }.into();
        assert_eq!(
            domain.user_message(),
            stockdesk_domain::constants::GENERIC_FAILURE_MESSAGE
        );

        let domain: StockDeskError = ApiError::Decode("expected value".into()).into();
        assert!(matches!(domain, StockDeskError::Remote { status: None, .. }));
    }

    #[test]
    fn transport_failures_become_network_errors() {
        let domain: StockDeskError = ApiError::Timeout(Duration::from_secs(3)).into();
        assert!(matches!(domain, StockDeskError::Network(msg) if msg.contains("3s")));
        assert!(matches!(
            StockDeskError::from(ApiError::Auth("expired".into())),
            StockDeskError::Auth(_)
        ));
    }
}
