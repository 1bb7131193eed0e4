// # Downtime API Trait
//
// Defines the interface the resource adapter uses to talk to the monitoring
// service's downtime endpoints.
//
// ## Implementations
//
// - Datadog v1: `downtime-api-datadog` crate
// - Tests: in-memory doubles under `tests/common`
//
// ## Usage
//
// ```rust,ignore
// use downtime_core::{DowntimeApi, Downtime};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let api = /* DowntimeApi implementation */;
//
//     let created = api.create_downtime(&Downtime {
//         scope: Some(vec!["host:web-1".into()]),
//         ..Default::default()
//     }).await?;
//
//     api.cancel_downtime(created.id.unwrap_or_default()).await?;
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::error::ApiError;
use crate::model::Downtime;

/// Trait for downtime API clients
///
/// Each method maps to exactly one HTTP call. Failures come back as
/// [`ApiError`] carrying the host and, when a response arrived, its status;
/// the adapter decides which statuses are fatal.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// # Boundaries
///
/// ## Allowed
/// - ✅ Perform HTTP/HTTPS calls to the configured endpoint only
/// - ✅ Parse vendor responses into [`Downtime`]
/// - ✅ Return success or failure for a single call
///
/// ## Forbidden
/// - ❌ Retry, back off, or rate limit (owned by the host framework)
/// - ❌ Cache responses between calls
/// - ❌ Interpret 404 or cancellation (owned by the resource adapter)
/// - ❌ Spawn tasks or threads
#[async_trait]
pub trait DowntimeApi: Send + Sync {
    /// Create a downtime and return the stored resource
    async fn create_downtime(&self, request: &Downtime) -> Result<Downtime, ApiError>;

    /// Fetch a downtime by identifier
    ///
    /// A missing downtime is reported as an `ApiError` with status 404.
    async fn get_downtime(&self, id: i64) -> Result<Downtime, ApiError>;

    /// Update a downtime and return the stored resource
    ///
    /// Fields left as `None` in `request` are not sent and stay untouched on
    /// the server.
    async fn update_downtime(&self, id: i64, request: &Downtime) -> Result<Downtime, ApiError>;

    /// Cancel a downtime
    async fn cancel_downtime(&self, id: i64) -> Result<(), ApiError>;

    /// Get the client name (for logging/debugging)
    ///
    /// # Returns
    ///
    /// A static string identifying the client (e.g., "datadog")
    fn api_name(&self) -> &'static str;
}

/// Helper trait for constructing API clients from configuration
pub trait DowntimeApiFactory: Send + Sync {
    /// Create a DowntimeApi instance from configuration
    ///
    /// # Parameters
    ///
    /// - `config`: Configuration specific to this client
    ///
    /// # Returns
    ///
    /// A boxed DowntimeApi trait object
    fn create(
        &self,
        config: &crate::config::ApiConfig,
    ) -> Result<Box<dyn DowntimeApi>, crate::Error>;
}

// Lets `DowntimeResource<Box<dyn DowntimeApi>>` hold a registry-built client.
#[async_trait]
impl DowntimeApi for Box<dyn DowntimeApi> {
    async fn create_downtime(&self, request: &Downtime) -> Result<Downtime, ApiError> {
        (**self).create_downtime(request).await
    }

    async fn get_downtime(&self, id: i64) -> Result<Downtime, ApiError> {
        (**self).get_downtime(id).await
    }

    async fn update_downtime(&self, id: i64, request: &Downtime) -> Result<Downtime, ApiError> {
        (**self).update_downtime(id, request).await
    }

    async fn cancel_downtime(&self, id: i64) -> Result<(), ApiError> {
        (**self).cancel_downtime(id).await
    }

    fn api_name(&self) -> &'static str {
        (**self).api_name()
    }
}
