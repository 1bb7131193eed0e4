// # Datadog Downtime Real Environment Validation Tool
//
// Exercises the full resource lifecycle against the real Datadog API.
//
// ## Usage
//
// ```bash
// # Dry-run mode (default - safe, prints the create request only)
// DD_API_KEY=your_api_key \
// DD_APP_KEY=your_app_key \
// DOWNTIME_SCOPE=env:staging \
// cargo run --bin datadog_validation
//
// # Live mode (creates, updates, and cancels a real downtime!)
// DOWNTIME_MODE=live \
// DD_API_KEY=your_api_key \
// DD_APP_KEY=your_app_key \
// DOWNTIME_SCOPE=env:staging \
// cargo run --bin datadog_validation
// ```
//
// ## Environment Variables
//
// Required:
// - `DD_API_KEY` / `DATADOG_API_KEY`: Datadog API key
// - `DD_APP_KEY` / `DATADOG_APP_KEY`: Datadog application key
//
// Optional:
// - `DD_HOST` / `DATADOG_HOST`: API base URL (default: https://api.datadoghq.com)
// - `DOWNTIME_SCOPE`: Scope to mute (default: env:downtime-validation)
// - `DOWNTIME_MODE`: "dry-run" or "live" (default: dry-run)

use downtime_core::resource::{ApplyMode, DowntimeConfig, compose_request};
use downtime_core::{ApiConfig, ApiRegistry, DowntimeResource};
use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("=== Datadog Downtime Real Environment Validation ===");

    let config = ApiConfig::from_env()?;
    let scope = env::var("DOWNTIME_SCOPE").unwrap_or_else(|_| "env:downtime-validation".to_string());
    let mode = env::var("DOWNTIME_MODE").unwrap_or_else(|_| "dry-run".to_string());
    let dry_run = mode.to_lowercase() != "live";

    if dry_run {
        tracing::warn!("Running in DRY-RUN mode - no changes will be made");
    } else {
        tracing::warn!("Running in LIVE mode - will create and cancel a real downtime!");
    }

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as i64;
    let desired = DowntimeConfig {
        start: Some(now + 300),
        end: Some(now + 900),
        message: Some("downtime adapter validation".to_string()),
        ..DowntimeConfig::new([scope.as_str()])
    };
    desired.validate()?;

    tracing::info!("Configuration:");
    tracing::info!("  Scope: {}", scope);
    tracing::info!("  Mode: {}", mode);

    if dry_run {
        let request = compose_request(&desired, ApplyMode::Create);
        tracing::info!(
            "Would POST /api/v1/downtime with body:\n{}",
            serde_json::to_string_pretty(&request)?
        );
        return Ok(());
    }

    tracing::info!("--- Step 1: Creating Datadog client ---");
    let registry = ApiRegistry::new();
    downtime_api_datadog::register(&registry);
    let resource = DowntimeResource::new(registry.create_api(&config)?);

    tracing::info!("--- Step 2: Create ---");
    let mut state = resource.create(&desired).await?;
    tracing::info!("Created downtime {}", state.id);

    tracing::info!("--- Step 3: Read ---");
    let outcome = resource.read(&mut state).await?;
    tracing::info!("Read outcome: {:?}", outcome);

    tracing::info!("--- Step 4: Update (extend end by 10 minutes) ---");
    let desired = DowntimeConfig {
        end: desired.end.map(|end| end + 600),
        ..desired
    };
    resource.update(&mut state, &desired).await?;
    tracing::info!("Updated end: {:?}", state.config.end);

    tracing::info!("--- Step 5: Delete ---");
    resource.delete(&mut state).await?;
    tracing::info!("Downtime canceled");

    tracing::info!("=== Validation Complete ===");
    Ok(())
}
