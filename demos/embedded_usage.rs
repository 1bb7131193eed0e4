//! Minimal embedding example for downtime-core
//!
//! This example drives the downtime resource from a custom application with
//! an in-process API client, so it runs without network access.

use downtime_core::resource::{DowntimeConfig, RecurrenceConfig, RecurrenceType, Weekday};
use downtime_core::{ApiError, Downtime, DowntimeApi, DowntimeResource, Result};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

/// Custom API client for embedded usage
struct EmbeddedApi {
    downtimes: Mutex<HashMap<i64, Downtime>>,
    next_id: AtomicI64,
}

impl EmbeddedApi {
    fn new() -> Self {
        Self {
            downtimes: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn missing(id: i64) -> ApiError {
        ApiError::status("embedded", 404, format!("downtime {} not found", id))
    }
}

#[async_trait::async_trait]
impl DowntimeApi for EmbeddedApi {
    async fn create_downtime(&self, request: &Downtime) -> std::result::Result<Downtime, ApiError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        println!("[Embedded] Creating downtime {}", id);

        let stored = Downtime {
            id: Some(id),
            active: Some(true),
            disabled: Some(false),
            monitor_tags: request
                .monitor_tags
                .clone()
                .or_else(|| Some(vec!["*".to_string()])),
            ..request.clone()
        };
        self.downtimes.lock().unwrap().insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_downtime(&self, id: i64) -> std::result::Result<Downtime, ApiError> {
        self.downtimes
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::missing(id))
    }

    async fn update_downtime(
        &self,
        id: i64,
        request: &Downtime,
    ) -> std::result::Result<Downtime, ApiError> {
        println!(
            "[Embedded] Updating downtime {} (start sent: {}, end sent: {})",
            id,
            request.start.is_some(),
            request.end.is_some()
        );

        let mut table = self.downtimes.lock().unwrap();
        let current = table.get_mut(&id).ok_or_else(|| Self::missing(id))?;
        if request.end.is_some() {
            current.end = request.end;
        }
        if request.start.is_some() {
            current.start = request.start;
        }
        current.message = request.message.clone().or(current.message.take());
        current.scope = request.scope.clone().or(current.scope.take());
        current.recurrence = request.recurrence.clone().or(current.recurrence.take());
        Ok(current.clone())
    }

    async fn cancel_downtime(&self, id: i64) -> std::result::Result<(), ApiError> {
        println!("[Embedded] Canceling downtime {}", id);
        let mut table = self.downtimes.lock().unwrap();
        let current = table.get_mut(&id).ok_or_else(|| Self::missing(id))?;
        current.canceled = Some(1);
        current.active = Some(false);
        Ok(())
    }

    fn api_name(&self) -> &'static str {
        "embedded"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Embedded downtime-core Example ===\n");

    let resource = DowntimeResource::new(EmbeddedApi::new());

    // Weekly maintenance window on the database hosts
    let desired = DowntimeConfig {
        start_date: Some("2030-01-07T02:00:00Z".to_string()),
        end_date: Some("2030-01-07T04:00:00Z".to_string()),
        message: Some("weekly db maintenance".to_string()),
        recurrence: Some(RecurrenceConfig {
            kind: Some(RecurrenceType::Weeks),
            period: Some(1),
            week_days: Some(vec![Weekday::Mon]),
            ..Default::default()
        }),
        ..DowntimeConfig::new(["role:db"])
    };

    println!("1. Creating downtime...");
    let mut state = resource.create(&desired).await?;
    println!(
        "   id={} start={:?} end={:?}",
        state.id, state.config.start, state.config.end
    );

    println!("\n2. Refreshing state...");
    let outcome = resource.read(&mut state).await?;
    println!("   outcome={:?}", outcome);
    println!(
        "   state={}",
        serde_json::to_string_pretty(&state).unwrap_or_default()
    );

    println!("\n3. Widening the scope (boundaries are not resent)...");
    let desired = DowntimeConfig {
        scope: vec!["role:db".to_string(), "role:cache".to_string()],
        ..desired
    };
    resource.update(&mut state, &desired).await?;
    println!("   scope={:?}", state.config.scope);

    println!("\n4. Deleting downtime...");
    let id = state.id.clone();
    resource.delete(&mut state).await?;
    println!("   state id after delete: {:?}", state.id);

    println!("\n5. Refreshing the canceled downtime...");
    let mut stale = downtime_core::DowntimeState::with_id(id);
    let outcome = resource.read(&mut stale).await?;
    println!("   outcome={:?} exists={}", outcome, stale.exists());

    println!("\n=== Embedding Successful ===");
    Ok(())
}
