// # Datadog Downtime API
//
// This crate provides the Datadog v1 implementation of `DowntimeApi`.
//
// ## Implementation Status
//
// - ✅ One HTTP request per trait call
// - ✅ Full error propagation (host + status) to the resource adapter
// - ✅ HTTP timeout configured (default 30 seconds)
// - ✅ Specific messages for HTTP status codes (401/403, 404, 409, 429, 5xx)
// - ❌ NO retry logic (owned by the host framework)
// - ❌ NO backoff logic (owned by the host framework)
// - ❌ NO rate limiting (owned by the host framework)
// - ❌ NO caching between calls
//
// ## Security Requirements
//
// - API and application keys NEVER appear in logs or Debug output
// - Construction fails fast if either key is empty
//
// ## API Reference
//
// - Datadog API v1: https://docs.datadoghq.com/api/latest/downtimes/
// - Create: POST `/api/v1/downtime`
// - Get: GET `/api/v1/downtime/:downtime_id`
// - Update: PUT `/api/v1/downtime/:downtime_id`
// - Cancel: DELETE `/api/v1/downtime/:downtime_id`

use async_trait::async_trait;
use downtime_core::config::ApiConfig;
use downtime_core::traits::{DowntimeApi, DowntimeApiFactory};
use downtime_core::{ApiError, ApiRegistry, Downtime, Error};
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use std::time::Duration;

const API_KEY_HEADER: &str = "DD-API-KEY";
const APP_KEY_HEADER: &str = "DD-APPLICATION-KEY";
const DOWNTIME_PATH: &str = "api/v1/downtime";

/// Datadog downtime API client
///
/// Stateless apart from the connection pool inside `reqwest::Client`.
pub struct DatadogDowntimeApi {
    /// ⚠️ NEVER log this value
    api_key: String,

    /// ⚠️ NEVER log this value
    app_key: String,

    /// Base URL, always ending in `/`
    base_url: Url,

    /// Host name reported in errors
    host: String,

    client: reqwest::Client,
}

// Custom Debug implementation that hides the keys
impl std::fmt::Debug for DatadogDowntimeApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatadogDowntimeApi")
            .field("api_key", &"<REDACTED>")
            .field("app_key", &"<REDACTED>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl DatadogDowntimeApi {
    /// Create a client with its own HTTP connection pool
    ///
    /// # Parameters
    ///
    /// - `api_key`: Datadog API key
    /// - `app_key`: Datadog application key with downtime write access
    /// - `api_url`: Site base URL, e.g. `https://api.datadoghq.eu`
    /// - `timeout`: Per-request timeout
    pub fn new(
        api_key: impl Into<String>,
        app_key: impl Into<String>,
        api_url: &str,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Self::with_client(client, api_key, app_key, api_url)
    }

    /// Create a client on top of a caller-provided `reqwest::Client`
    ///
    /// Useful when the caller needs custom TLS roots or proxy settings.
    pub fn with_client(
        client: reqwest::Client,
        api_key: impl Into<String>,
        app_key: impl Into<String>,
        api_url: &str,
    ) -> Result<Self, Error> {
        let api_key = api_key.into();
        let app_key = app_key.into();
        if api_key.is_empty() {
            return Err(Error::config("Datadog API key cannot be empty"));
        }
        if app_key.is_empty() {
            return Err(Error::config("Datadog application key cannot be empty"));
        }

        let mut base_url = Url::parse(api_url)
            .map_err(|e| Error::config(format!("Invalid Datadog API URL {}: {}", api_url, e)))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let host = base_url
            .host_str()
            .ok_or_else(|| Error::config(format!("Datadog API URL has no host: {}", api_url)))?
            .to_string();

        Ok(Self {
            api_key,
            app_key,
            base_url,
            host,
            client,
        })
    }

    /// URL of the downtime collection, or of one downtime
    fn downtime_url(&self, id: Option<i64>) -> Result<Url, ApiError> {
        let path = match id {
            Some(id) => format!("{}/{}", DOWNTIME_PATH, id),
            None => DOWNTIME_PATH.to_string(),
        };
        self.base_url
            .join(&path)
            .map_err(|e| ApiError::transport(&self.host, format!("Invalid request URL: {}", e)))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(API_KEY_HEADER, &self.api_key)
            .header(APP_KEY_HEADER, &self.app_key)
            .header("Accept", "application/json")
    }

    /// Send a request and turn non-2xx answers into `ApiError`
    async fn execute(&self, request: RequestBuilder, action: &str) -> Result<Response, ApiError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| ApiError::transport(&self.host, format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());
        Err(status_error(&self.host, status, action, &error_text))
    }

    async fn parse(&self, response: Response) -> Result<Downtime, ApiError> {
        let status = response.status().as_u16();
        response.json::<Downtime>().await.map_err(|e| {
            ApiError::status(&self.host, status, format!("Failed to parse response: {}", e))
        })
    }
}

/// Map a non-2xx status to an error message
fn status_error(host: &str, status: StatusCode, action: &str, body: &str) -> ApiError {
    let message = match status.as_u16() {
        401 | 403 => format!(
            "Authentication failed: invalid API/application key or insufficient permissions. Status: {}",
            status
        ),
        404 => format!("Downtime not found. Status: {}", status),
        409 => format!("Conflict: {} - {}", status, body),
        429 => format!("Rate limit exceeded. Please retry later. Status: {}", status),
        500..=599 => format!("Datadog server error (transient): {} - {}", status, body),
        _ => format!("{} failed: {} - {}", action, status, body),
    };
    ApiError::status(host, status.as_u16(), message)
}

#[async_trait]
impl DowntimeApi for DatadogDowntimeApi {
    async fn create_downtime(&self, request: &Downtime) -> Result<Downtime, ApiError> {
        let url = self.downtime_url(None)?;
        tracing::debug!("POST {}", url);

        let response = self
            .execute(self.client.post(url).json(request), "Create downtime")
            .await?;
        self.parse(response).await
    }

    async fn get_downtime(&self, id: i64) -> Result<Downtime, ApiError> {
        let url = self.downtime_url(Some(id))?;
        tracing::debug!("GET {}", url);

        let response = self.execute(self.client.get(url), "Get downtime").await?;
        self.parse(response).await
    }

    async fn update_downtime(&self, id: i64, request: &Downtime) -> Result<Downtime, ApiError> {
        let url = self.downtime_url(Some(id))?;
        tracing::debug!("PUT {}", url);

        let response = self
            .execute(self.client.put(url).json(request), "Update downtime")
            .await?;
        self.parse(response).await
    }

    async fn cancel_downtime(&self, id: i64) -> Result<(), ApiError> {
        let url = self.downtime_url(Some(id))?;
        tracing::debug!("DELETE {}", url);

        self.execute(self.client.delete(url), "Cancel downtime")
            .await?;
        Ok(())
    }

    fn api_name(&self) -> &'static str {
        "datadog"
    }
}

/// Factory for creating Datadog clients
pub struct DatadogFactory;

impl DowntimeApiFactory for DatadogFactory {
    fn create(&self, config: &ApiConfig) -> Result<Box<dyn DowntimeApi>, Error> {
        match config {
            ApiConfig::Datadog {
                api_key,
                app_key,
                api_url,
                http_timeout_secs,
            } => Ok(Box::new(DatadogDowntimeApi::new(
                api_key.clone(),
                app_key.clone(),
                api_url,
                Duration::from_secs(*http_timeout_secs),
            )?)),
            _ => Err(Error::config("Invalid config for Datadog client")),
        }
    }
}

/// Register the Datadog client with a registry
///
/// # Example
///
/// ```rust
/// use downtime_core::ApiRegistry;
///
/// let registry = ApiRegistry::new();
/// downtime_api_datadog::register(&registry);
/// assert!(registry.has_api("datadog"));
/// ```
pub fn register(registry: &ApiRegistry) {
    registry.register_api("datadog", Box::new(DatadogFactory));
}
