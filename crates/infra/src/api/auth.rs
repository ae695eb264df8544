//! Bearer-token session
//!
//! The token lives in an explicit [`SessionContext`] handed to the API client
//! at construction. Nothing falls back to a built-in token.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use stockdesk_domain::AuthConfig;
use tracing::{debug, info};

use super::errors::ApiError;

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get the token to send as `Authorization: Bearer <token>`
    async fn access_token(&self) -> Result<String, ApiError>;
}

/// Shared, mutable holder of the current session token.
///
/// Clones share the same slot, so a sign-in through one handle is seen by
/// every client built from another.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    token: Arc<RwLock<Option<String>>>,
}

impl SessionContext {
    /// Session with no token; requests fail with `ApiError::Auth` until
    /// [`set_token`](Self::set_token) is called.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set_token(token);
        session
    }

    /// Session seeded from configuration. Only an explicitly configured
    /// `static_token` is used.
    pub fn from_config(config: &AuthConfig) -> Self {
        match config.static_token.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            Some(token) => {
                debug!("session.static_token_configured");
                Self::with_token(token)
            }
            None => Self::new(),
        }
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
        info!("session.token_set");
    }

    /// Sign out
    pub fn clear(&self) {
        if self.token.write().take().is_some() {
            info!("session.token_cleared");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }
}

#[async_trait]
impl AccessTokenProvider for SessionContext {
    async fn access_token(&self) -> Result<String, ApiError> {
        self.token.read().clone().ok_or_else(|| ApiError::Auth("no active session".into()))
    }
}
