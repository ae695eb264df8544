//! REST API client
//!
//! Authenticated JSON requests against the StockDesk backend. Every call is
//! bounded by a timeout and sent exactly once.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use stockdesk_domain::constants::{DEFAULT_API_BASE_URL, DEFAULT_API_TIMEOUT_SECS};
use stockdesk_domain::{ApiConfig, StockDeskError};
use tracing::{debug, instrument, warn};

use super::auth::AccessTokenProvider;
use super::errors::ApiError;
use crate::http::HttpClient;

/// Configuration for API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for API (e.g., "http://localhost:5000/api")
    pub base_url: String,
    /// Timeout for API requests
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
        }
    }
}

impl From<&ApiConfig> for ApiClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

/// Authenticated JSON client
pub struct ApiClient {
    http_client: HttpClient,
    auth: Arc<dyn AccessTokenProvider>,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HttpClient cannot be created
    pub fn new(
        config: ApiClientConfig,
        auth: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {}", e)))?;

        Ok(Self {
            http_client,
            auth,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
        })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` and decode the JSON body
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send::<(), ()>(Method::GET, path, None, None).await?;
        Self::decode(response).await
    }

    /// GET `path` with query parameters
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn get_with_query<Q, T>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self.send::<Q, ()>(Method::GET, path, Some(query), None).await?;
        Self::decode(response).await
    }

    /// POST a JSON body
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let response = self.send::<(), B>(Method::POST, path, None, Some(body)).await?;
        Self::decode(response).await
    }

    /// PUT a JSON body
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let response = self.send::<(), B>(Method::PUT, path, None, Some(body)).await?;
        Self::decode(response).await
    }

    /// DELETE `path`, ignoring any response body
    #[instrument(skip(self), fields(path = %path))]
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send::<(), ()>(Method::DELETE, path, None, None).await?;
        Ok(())
    }

    async fn send<Q, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<Response, ApiError>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let token = self.auth.access_token().await?;

        let mut request = self
            .http_client
            .request(method.clone(), &url)
            .bearer_auth(token)
            .header("Accept", "application/json");
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(%method, url = %url, "api.request");

        let sent = tokio::time::timeout(self.timeout, self.http_client.send(request)).await;
        let response = match sent {
            Ok(Ok(resp)) => resp,
            Ok(Err(err)) => return Err(Self::map_domain_error(err)),
            Err(_) => return Err(ApiError::Timeout(self.timeout)),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = Self::map_status_error(status, &url, &body);
            warn!(
                %method,
                url = %url,
                status = status.as_u16(),
                category = ?err.category(),
                "api.request.rejected"
            );
            return Err(err);
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();

        // 204/205 carry no body; only types that accept null decode from them
        if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
            return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                ApiError::Decode(format!(
                    "No content response ({}), but response type cannot be deserialized from empty body",
                    status.as_u16()
                ))
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response: {}", e)))?;
        let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) { b"null" } else { &bytes };

        serde_json::from_slice(body)
            .map_err(|e| ApiError::Decode(format!("Failed to parse response: {}", e)))
    }

    /// Backend's `message` (or `error`) field from a JSON error body.
    fn remote_message(body: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        ["message", "error"]
            .iter()
            .filter_map(|key| value.get(*key).and_then(serde_json::Value::as_str))
            .map(str::trim)
            .find(|m| !m.is_empty())
            .map(str::to_string)
    }

    fn map_status_error(status: StatusCode, url: &str, body: &str) -> ApiError {
        let message = Self::remote_message(body);
        let code = status.as_u16();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            ApiError::Auth(message.unwrap_or_else(|| format!("{} returned status {}", url, status)))
        } else if status == StatusCode::NOT_FOUND {
            ApiError::NotFound(message.unwrap_or_else(|| url.to_string()))
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            ApiError::RateLimit { message }
        } else if status.is_server_error() {
            ApiError::Server { status: code, message }
        } else if status.is_client_error() {
            ApiError::Client { status: code, message }
        } else {
            ApiError::Network(format!("{} returned unexpected status {}", url, status))
        }
    }

    fn map_domain_error(err: StockDeskError) -> ApiError {
        match err {
            StockDeskError::Network(message) => ApiError::Network(message),
            StockDeskError::Auth(message) => ApiError::Auth(message),
            StockDeskError::Config(message) => ApiError::Config(message),
            StockDeskError::NotFound(message) => ApiError::NotFound(message),
            StockDeskError::Remote { status, message } => {
                let message = (!message.is_empty()).then_some(message);
                match status {
                    Some(code) if code >= 500 => ApiError::Server { status: code, message },
                    Some(code) => ApiError::Client { status: code, message },
                    None => ApiError::Decode(message.unwrap_or_default()),
                }
            }
            other => ApiError::Network(other.to_string()),
        }
    }
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiClientConfig>,
    auth: Option<Arc<dyn AccessTokenProvider>>,
}

impl ApiClientBuilder {
    /// Set the API configuration
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the authentication provider
    pub fn auth(mut self, auth: Arc<dyn AccessTokenProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if required fields are missing or client creation fails
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let auth =
            self.auth.ok_or_else(|| ApiError::Config("Auth provider not set".to_string()))?;

        ApiClient::new(config, auth)
    }
}
