//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use stockdesk_common::ValidationError;
use thiserror::Error;

use crate::constants::GENERIC_FAILURE_MESSAGE;

/// Main error type for StockDesk
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum StockDeskError {
    /// Field-scoped input problems; rendered next to the offending fields.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The local snapshot needed to validate is missing or unusable.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// The precondition held on the snapshot the user saw but not on the
    /// freshly fetched one.
    #[error("Stock changed, please refresh and retry: {0}")]
    StaleState(String),

    /// The backend answered with a non-success status.
    #[error("Remote error{}: {message}", status_suffix(.status))]
    Remote { status: Option<u16>, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Another mutation holds the exclusive ticket.
    #[error("Another stock mutation is in progress: {0}")]
    Busy(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StockDeskError {
    /// Remote error without a status code
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote { status: None, message: message.into() }
    }

    /// Field errors, when this is a validation failure
    pub fn validation_errors(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Errors the user can fix without talking to the server again.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidInput(_))
    }

    /// Errors that tell the caller to refetch the stock snapshot first.
    pub fn requires_refetch(&self) -> bool {
        matches!(self, Self::Precondition(_) | Self::StaleState(_))
    }

    /// Message suitable for a toast or banner.
    ///
    /// Remote failures surface the backend's own message when it sent one;
    /// transport-level failures fall back to a generic text.
    pub fn user_message(&self) -> String {
        match self {
            Self::Remote { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Remote { .. } | Self::Network(_) | Self::Internal(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
            Self::StaleState(_) => {
                "Stock changed since the form was opened, please refresh and retry".to_string()
            }
            Self::Precondition(_) => {
                "Stock information is not loaded, please refresh and retry".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Stable label for logging fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Precondition(_) => "precondition",
            Self::StaleState(_) => "stale_state",
            Self::Remote { .. } => "remote",
            Self::Network(_) => "network",
            Self::Auth(_) => "auth",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::Busy(_) => "busy",
            Self::Internal(_) => "internal",
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|code| format!(" ({code})")).unwrap_or_default()
}

/// Result type alias for StockDesk operations
pub type Result<T> = std::result::Result<T, StockDeskError>;
