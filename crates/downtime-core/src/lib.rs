// # downtime-core
//
// Core library for the downtime resource of an infrastructure-as-code
// provider plugin.
//
// ## Architecture Overview
//
// - **DowntimeApi**: Trait for the monitoring service's downtime endpoints
// - **DowntimeResource**: Create/read/update/delete/import entry points
// - **DowntimeConfig**: Typed user configuration (explicit presence per field)
// - **DowntimeState**: What the host framework stores between operations
// - **schema**: Attribute descriptor exposed to the host framework
// - **ApiRegistry**: Plugin-based registry for API clients
//
// ## Design Principles
//
// 1. **Omission is meaningful**: an unset attribute is never sent as zero
// 2. **Drift-aware updates**: start/end are resent only when they drifted or changed
// 3. **No hidden policy**: no retries, caching, or background work; the host owns that
// 4. **Library-First**: vendor clients plug in through `DowntimeApi`

pub mod config;
pub mod error;
pub mod model;
pub mod registry;
pub mod resource;
pub mod schema;
pub mod traits;

// Re-export core types for convenience
pub use config::ApiConfig;
pub use error::{ApiError, Error, Result};
pub use model::{Downtime, DowntimeRecurrence};
pub use registry::ApiRegistry;
pub use resource::{DowntimeConfig, DowntimeResource, DowntimeState, ReadOutcome};
pub use traits::{DowntimeApi, DowntimeApiFactory};
