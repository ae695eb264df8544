//! Shared fixtures for infra integration tests

#![allow(dead_code)]

use std::sync::Arc;

use stockdesk_infra::{ApiClient, ApiClientConfig, SessionContext};
use wiremock::MockServer;

pub const TOKEN: &str = "integration-token";

/// API client pointed at `server`, authenticated with [`TOKEN`].
pub fn api_client(server: &MockServer) -> Arc<ApiClient> {
    let config = ApiClientConfig { base_url: server.uri(), ..ApiClientConfig::default() };
    let client = ApiClient::new(config, Arc::new(SessionContext::with_token(TOKEN)))
        .expect("api client should build");
    Arc::new(client)
}

pub fn bearer() -> String {
    format!("Bearer {TOKEN}")
}
