//! Plugin-based API client registry
//!
//! Client crates register a factory under a type name; the adapter is then
//! built from an [`ApiConfig`] without hard-coding vendors.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use downtime_core::{ApiConfig, ApiRegistry, DowntimeResource};
//!
//! let registry = ApiRegistry::new();
//! downtime_api_datadog::register(&registry);
//!
//! let api = registry.create_api(&ApiConfig::from_env()?)?;
//! let resource = DowntimeResource::new(api);
//! ```

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::traits::{DowntimeApi, DowntimeApiFactory};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Registry of API client factories
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes.
#[derive(Default)]
pub struct ApiRegistry {
    factories: RwLock<HashMap<String, Box<dyn DowntimeApiFactory>>>,
}

impl ApiRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an API client factory
    ///
    /// # Parameters
    ///
    /// - `name`: Client type name (e.g., "datadog"), matched against
    ///   [`ApiConfig::type_name`]
    /// - `factory`: Factory object for creating client instances
    pub fn register_api(&self, name: impl Into<String>, factory: Box<dyn DowntimeApiFactory>) {
        let mut factories = self.factories.write().unwrap_or_else(PoisonError::into_inner);
        factories.insert(name.into(), factory);
    }

    /// Create an API client from configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn DowntimeApi>)`: Created client
    /// - `Err(Error)`: If the configuration is invalid, the type is not
    ///   registered, or creation fails
    pub fn create_api(&self, config: &ApiConfig) -> Result<Box<dyn DowntimeApi>> {
        config.validate()?;

        let api_type = config.type_name();
        let factories = self.factories.read().unwrap_or_else(PoisonError::into_inner);

        let factory = factories
            .get(api_type)
            .ok_or_else(|| Error::config(format!("Unknown API client type: {}", api_type)))?;

        factory.create(config)
    }

    /// List all registered client types
    pub fn list_apis(&self) -> Vec<String> {
        let factories = self.factories.read().unwrap_or_else(PoisonError::into_inner);
        factories.keys().cloned().collect()
    }

    /// Check if a client type is registered
    pub fn has_api(&self, name: &str) -> bool {
        let factories = self.factories.read().unwrap_or_else(PoisonError::into_inner);
        factories.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockApiFactory;

    impl DowntimeApiFactory for MockApiFactory {
        fn create(&self, _config: &ApiConfig) -> Result<Box<dyn DowntimeApi>> {
            Err(Error::config("Mock client not implemented"))
        }
    }

    #[test]
    fn test_registry_registration() {
        let registry = ApiRegistry::new();

        assert!(!registry.has_api("mock"));

        registry.register_api("mock", Box::new(MockApiFactory));

        assert!(registry.has_api("mock"));
        assert!(registry.list_apis().contains(&"mock".to_string()));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let registry = ApiRegistry::new();
        let config = ApiConfig::datadog("key", "app");

        match registry.create_api(&config) {
            Err(Error::Config(msg)) => assert!(msg.contains("datadog")),
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(_) => panic!("unregistered client type must not resolve"),
        }
    }

    #[test]
    fn test_invalid_config_is_rejected_before_lookup() {
        let registry = ApiRegistry::new();
        registry.register_api("datadog", Box::new(MockApiFactory));

        let err = registry.create_api(&ApiConfig::datadog("", "app"));
        assert!(matches!(err, Err(Error::Config(msg)) if msg.contains("API key")));
    }
}
