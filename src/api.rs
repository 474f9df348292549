//! API gateway wrapper for Taskora
//!
//! A thin layer over `reqwest` that builds full URLs from the configured
//! base, attaches the JSON content type and (when a live session exists)
//! the bearer token, and normalizes failures: server rejections carry the
//! HTTP status and a best-effort parsed body, while transport failures
//! that produced no response at all surface as a distinct "unavailable"
//! kind.

use crate::config::ApiConfig;
use crate::error::{Result, TaskoraError};
use crate::session::SessionStore;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// HTTP client for the task service
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use taskora::api::ApiClient;
/// use taskora::config::ApiConfig;
/// use taskora::session::SessionStore;
/// use taskora::storage::LocalStore;
///
/// # fn example() -> taskora::error::Result<()> {
/// let sessions = Arc::new(SessionStore::new(LocalStore::new()?));
/// let api = ApiClient::new(&ApiConfig::default(), sessions)?;
/// # Ok(())
/// # }
/// ```
pub struct ApiClient {
    client: Client,
    base_url: String,
    sessions: Arc<SessionStore>,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Arguments
    ///
    /// * `config` - API configuration (base URL, timeout)
    /// * `sessions` - Session store consulted for the bearer token
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: &ApiConfig, sessions: Arc<SessionStore>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("taskora/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                TaskoraError::Config(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!("Initialized API client: base_url={}", config.base_url);

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            sessions,
        })
    }

    /// Build a full URL from the configured base and an endpoint path
    fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Perform a request and normalize the outcome
    ///
    /// On success returns the parsed JSON body; empty and non-JSON bodies
    /// come back as JSON null. On a non-2xx response returns
    /// [`TaskoraError::Api`] with the status and a message pulled from a
    /// JSON `message` field when the body carries one. Failures with no
    /// HTTP response at all return [`TaskoraError::Unavailable`].
    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        query: Option<&HashMap<String, String>>,
        body: Option<serde_json::Value>,
    ) -> Result<serde_json::Value> {
        let url = self.endpoint_url(endpoint);

        let mut builder = self
            .client
            .request(method.clone(), &url)
            .header("Content-Type", "application/json");

        if let Some(params) = query {
            // Flat key-value map serialized into the query string
            let mut pairs: Vec<(&String, &String)> = params.iter().collect();
            pairs.sort();
            builder = builder.query(&pairs);
        }

        if let Some(token) = self.sessions.token() {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        if let Some(body) = &body {
            builder = builder.json(body);
        }

        tracing::debug!("{} {}", method, url);

        let response = builder.send().await.map_err(|e| {
            tracing::error!("{} {} produced no response: {}", method, url, e);
            TaskoraError::Unavailable(format!("Network error or server unavailable: {}", e))
        })?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(Self::rejection(status, &text).into());
        }

        if text.is_empty() {
            return Ok(serde_json::Value::Null);
        }

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(e) => {
                // Non-JSON success bodies are tolerated as an empty result
                tracing::debug!("Response from {} was not JSON ({}); returning null", url, e);
                Ok(serde_json::Value::Null)
            }
        }
    }

    /// Build the error for a non-2xx response
    fn rejection(status: StatusCode, body: &str) -> TaskoraError {
        let payload: Option<serde_json::Value> = serde_json::from_str(body).ok();

        let message = payload
            .as_ref()
            .and_then(|p| p.get("message"))
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));

        TaskoraError::Api {
            status: status.as_u16(),
            message,
            payload,
        }
    }

    /// GET request with an optional flat key-value query map
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: Option<&HashMap<String, String>>,
    ) -> Result<T> {
        let value = self.request(Method::GET, endpoint, params, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// POST request with an optional JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let body = body.map(serde_json::to_value).transpose()?;
        let value = self.request(Method::POST, endpoint, None, body).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// PUT request with an optional JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let body = body.map(serde_json::to_value).transpose()?;
        let value = self.request(Method::PUT, endpoint, None, body).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// PATCH request with an optional JSON body
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let body = body.map(serde_json::to_value).transpose()?;
        let value = self.request(Method::PATCH, endpoint, None, body).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// DELETE request
    pub async fn delete(&self, endpoint: &str) -> Result<serde_json::Value> {
        self.request(Method::DELETE, endpoint, None, None).await
    }
}
