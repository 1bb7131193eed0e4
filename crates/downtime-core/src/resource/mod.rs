//! Downtime resource adapter
//!
//! [`DowntimeResource`] implements the lifecycle entry points the host
//! framework calls for a downtime resource:
//!
//! ```text
//!  create(desired) ──► compose_request ──► POST ──► project ──► DowntimeState
//!  read(state)     ──► GET ──┬─ 404 / canceled ──► clear id
//!                            └─ found ───────────► project
//!  update(state, desired) ──► GET (drift) ──► compose_request ──► PUT ──► project
//!  delete(state)   ──► cancel
//!  import(id)      ──► read
//! ```
//!
//! Every call is awaited in sequence; nothing is retried or cached between
//! operations. The host framework serializes operations per resource.

pub mod boundary;
pub mod config;
pub mod request;
pub mod state;

pub use boundary::{ApplyMode, Boundary, ResolvedBoundary, needs_apply, resolve_boundary};
pub use config::{
    Attribute, ChangeSet, DowntimeConfig, RecurrenceConfig, RecurrenceType, Weekday,
};
pub use request::compose_request;
pub use state::DowntimeState;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::model::Downtime;
use crate::schema::{ResourceSchema, downtime_schema};
use crate::traits::DowntimeApi;

/// Result of a read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The downtime exists and was projected into state
    Found,
    /// The server answered 404; the local identifier was cleared
    NotFound,
    /// The downtime was canceled; the local identifier was cleared
    Canceled,
}

impl ReadOutcome {
    /// True when the local record should be kept
    pub fn exists(&self) -> bool {
        matches!(self, ReadOutcome::Found)
    }
}

/// Lifecycle handler for the downtime resource
pub struct DowntimeResource<A> {
    api: A,
}

impl<A: DowntimeApi> DowntimeResource<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// The underlying API client
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Schema descriptor of the resource
    pub fn schema(&self) -> ResourceSchema {
        downtime_schema()
    }

    /// Create the downtime described by `desired`
    ///
    /// # Returns
    ///
    /// - `Ok(DowntimeState)`: State carrying the server-assigned identifier
    /// - `Err(Error::PartialCreate)`: The downtime was created but the response
    ///   could not be projected; the error carries the state with its id
    /// - `Err(Error)`: Validation or API failure
    pub async fn create(&self, desired: &DowntimeConfig) -> Result<DowntimeState> {
        desired.validate()?;

        let request = compose_request(desired, ApplyMode::Create);
        debug!("create downtime request: {:?}", request);

        let created = self
            .api
            .create_downtime(&request)
            .await
            .map_err(|e| Error::translate(e, "error creating downtime"))?;

        let id = created
            .id
            .ok_or_else(|| Error::invalid_response("created downtime carries no id"))?;
        info!("Created downtime {} via {}", id, self.api.api_name());

        let mut state = DowntimeState {
            config: desired.clone(),
            ..DowntimeState::default()
        };
        state.set_id(id);
        if let Err(e) = state.project(&created) {
            warn!("Downtime {} created but its state could not be recorded: {}", id, e);
            return Err(Error::PartialCreate {
                state: Box::new(state),
                source: Box::new(e),
            });
        }
        Ok(state)
    }

    /// Refresh `state` from the server
    ///
    /// A 404 or a canceled downtime is not an error: the identifier is
    /// cleared and the rest of the state is left as it was.
    pub async fn read(&self, state: &mut DowntimeState) -> Result<ReadOutcome> {
        let id = state.parse_id()?;

        let dt = match self.api.get_downtime(id).await {
            Ok(dt) => dt,
            Err(e) if e.is_not_found() => {
                warn!("Downtime {} not found, removing from state", id);
                state.clear_id();
                return Ok(ReadOutcome::NotFound);
            }
            Err(e) => return Err(Error::translate(e, "error getting downtime")),
        };

        if dt.is_canceled() {
            warn!("Downtime {} is canceled, removing from state", id);
            state.clear_id();
            return Ok(ReadOutcome::Canceled);
        }

        state.project(&dt)?;
        Ok(ReadOutcome::Found)
    }

    /// Apply `desired` to the downtime tracked by `state`
    ///
    /// `state.config` is the last applied snapshot; the difference between it
    /// and `desired` decides whether unchanged boundaries are resent.
    pub async fn update(&self, state: &mut DowntimeState, desired: &DowntimeConfig) -> Result<()> {
        desired.validate()?;
        let id = state.parse_id()?;

        let request = self.build_update_request(id, &state.config, desired).await?;
        debug!("update downtime {} request: {:?}", id, request);

        let updated = self
            .api
            .update_downtime(id, &request)
            .await
            .map_err(|e| Error::translate(e, "error updating downtime"))?;
        info!("Updated downtime {} via {}", id, self.api.api_name());

        let mut next = DowntimeState {
            config: desired.clone(),
            ..state.clone()
        };
        next.set_id(updated.id.unwrap_or(id));
        next.project(&updated)?;
        *state = next;
        Ok(())
    }

    /// Cancel the downtime tracked by `state` and clear its identifier
    pub async fn delete(&self, state: &mut DowntimeState) -> Result<()> {
        let id = state.parse_id()?;

        self.api
            .cancel_downtime(id)
            .await
            .map_err(|e| Error::translate(e, "error deleting downtime"))?;
        info!("Canceled downtime {} via {}", id, self.api.api_name());

        state.clear_id();
        Ok(())
    }

    /// Import an existing downtime; `state` must already carry its identifier
    pub async fn import(&self, mut state: DowntimeState) -> Result<Vec<DowntimeState>> {
        self.read(&mut state).await?;
        Ok(vec![state])
    }

    /// Build the update body against the server's current copy
    ///
    /// The identifier is forced to `id` so the body never carries an unset id.
    async fn build_update_request(
        &self,
        id: i64,
        prior: &DowntimeConfig,
        desired: &DowntimeConfig,
    ) -> Result<Downtime> {
        let current = self
            .api
            .get_downtime(id)
            .await
            .map_err(|e| Error::translate(e, "error getting downtime"))?;
        let changes = ChangeSet::between(prior, desired);

        Ok(Downtime {
            id: Some(id),
            ..compose_request(
                desired,
                ApplyMode::Update {
                    current: &current,
                    changes: &changes,
                },
            )
        })
    }
}
