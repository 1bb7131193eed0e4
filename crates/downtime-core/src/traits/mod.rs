//! Core traits for the downtime adapter
//!
//! - [`DowntimeApi`]: Remote downtime endpoints (create/get/update/cancel)
//! - [`DowntimeApiFactory`]: Builds a client from [`crate::config::ApiConfig`]

pub mod downtime_api;

pub use downtime_api::{DowntimeApi, DowntimeApiFactory};
