//! Test doubles and common utilities for resource contract tests
//!
//! `MockDowntimeApi` behaves like a tiny in-memory downtime service and
//! records every call so tests can assert on the exact request bodies.

#![allow(dead_code)]

use downtime_core::error::ApiError;
use downtime_core::model::Downtime;
use downtime_core::traits::DowntimeApi;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

/// Host reported in mock errors
pub const MOCK_HOST: &str = "api.mock.test";

/// Cancellation timestamp the mock stamps on canceled downtimes
pub const CANCELED_AT: i64 = 1_700_009_999;

/// A recorded API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(Downtime),
    Get(i64),
    Update(i64, Downtime),
    Cancel(i64),
}

type CreateHook = Box<dyn FnOnce(&mut Downtime) + Send>;

/// In-memory downtime service
pub struct MockDowntimeApi {
    downtimes: Arc<Mutex<HashMap<i64, Downtime>>>,
    calls: Arc<Mutex<Vec<Call>>>,
    next_id: Arc<AtomicI64>,
    fail_next: Arc<Mutex<Option<ApiError>>>,
    create_hook: Arc<Mutex<Option<CreateHook>>>,
}

impl MockDowntimeApi {
    pub fn new() -> Self {
        Self {
            downtimes: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicI64::new(1000)),
            fail_next: Arc::new(Mutex::new(None)),
            create_hook: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a new MockDowntimeApi that shares storage and counters with an existing one
    pub fn sharing_state_with(other: &Self) -> Self {
        Self {
            downtimes: Arc::clone(&other.downtimes),
            calls: Arc::clone(&other.calls),
            next_id: Arc::clone(&other.next_id),
            fail_next: Arc::clone(&other.fail_next),
            create_hook: Arc::clone(&other.create_hook),
        }
    }

    /// Put a downtime straight into the server table
    pub fn insert(&self, dt: Downtime) {
        let id = dt.id.expect("seeded downtime needs an id");
        self.downtimes.lock().unwrap().insert(id, dt);
    }

    /// Current server copy of a downtime
    pub fn stored(&self, id: i64) -> Option<Downtime> {
        self.downtimes.lock().unwrap().get(&id).cloned()
    }

    /// Make the next call fail with the given HTTP status
    pub fn fail_next_with(&self, status: u16) {
        *self.fail_next.lock().unwrap() =
            Some(ApiError::status(MOCK_HOST, status, format!("mock status {status}")));
    }

    /// Let the next create store (and return) a modified downtime
    pub fn on_next_create(&self, hook: impl FnOnce(&mut Downtime) + Send + 'static) {
        *self.create_hook.lock().unwrap() = Some(Box::new(hook));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        match self.fail_next.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn not_found(id: i64) -> ApiError {
        ApiError::status(MOCK_HOST, 404, format!("downtime {id} not found"))
    }
}

#[async_trait::async_trait]
impl DowntimeApi for MockDowntimeApi {
    async fn create_downtime(&self, request: &Downtime) -> Result<Downtime, ApiError> {
        self.record(Call::Create(request.clone()))?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut stored = Downtime {
            id: Some(id),
            active: Some(true),
            disabled: Some(false),
            canceled: None,
            monitor_tags: request
                .monitor_tags
                .clone()
                .or_else(|| Some(vec!["*".to_string()])),
            timezone: request.timezone.clone().or_else(|| Some("UTC".to_string())),
            ..request.clone()
        };
        if let Some(hook) = self.create_hook.lock().unwrap().take() {
            hook(&mut stored);
        }
        self.downtimes.lock().unwrap().insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_downtime(&self, id: i64) -> Result<Downtime, ApiError> {
        self.record(Call::Get(id))?;
        self.stored(id).ok_or_else(|| Self::not_found(id))
    }

    async fn update_downtime(&self, id: i64, request: &Downtime) -> Result<Downtime, ApiError> {
        self.record(Call::Update(id, request.clone()))?;

        let mut table = self.downtimes.lock().unwrap();
        let current = table.get_mut(&id).ok_or_else(|| Self::not_found(id))?;

        // Fields absent from the request keep their server value
        macro_rules! merge {
            ($($field:ident),*) => {
                $(if request.$field.is_some() {
                    current.$field = request.$field.clone();
                })*
            };
        }
        merge!(start, end, message, monitor_id, monitor_tags, scope, timezone, recurrence);

        Ok(current.clone())
    }

    async fn cancel_downtime(&self, id: i64) -> Result<(), ApiError> {
        self.record(Call::Cancel(id))?;

        let mut table = self.downtimes.lock().unwrap();
        let current = table.get_mut(&id).ok_or_else(|| Self::not_found(id))?;
        current.canceled = Some(CANCELED_AT);
        current.active = Some(false);
        Ok(())
    }

    fn api_name(&self) -> &'static str {
        "mock"
    }
}

/// A downtime as the server would hold it
pub fn remote_downtime(id: i64) -> Downtime {
    Downtime {
        id: Some(id),
        active: Some(true),
        disabled: Some(false),
        start: Some(1_700_000_000),
        end: Some(1_700_003_600),
        message: Some("planned maintenance".to_string()),
        monitor_tags: Some(vec!["*".to_string()]),
        scope: Some(vec!["host:web-1".to_string()]),
        timezone: Some("UTC".to_string()),
        ..Default::default()
    }
}
