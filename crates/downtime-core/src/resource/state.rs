//! Local state of a downtime resource and projection of remote values into it

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::config::{DowntimeConfig, RecurrenceConfig, RecurrenceType, Weekday};
use crate::error::{Error, Result};
use crate::model::{Downtime, DowntimeRecurrence};

/// The server's implicit `monitor_tags` value, meaning "all monitors"
pub const ALL_MONITORS_TAG: &str = "*";

/// What the host framework stores for one downtime resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DowntimeState {
    /// Remote identifier; empty when the resource does not exist
    #[serde(default)]
    pub id: String,

    /// Attribute values as last applied or observed
    pub config: DowntimeConfig,

    /// Server computed
    #[serde(default)]
    pub active: bool,

    /// Server computed
    #[serde(default)]
    pub disabled: bool,
}

impl DowntimeState {
    /// State for a resource known only by its identifier (import)
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// True once the resource has an identifier
    pub fn exists(&self) -> bool {
        !self.id.is_empty()
    }

    /// Parse the identifier as the integer the API expects
    pub fn parse_id(&self) -> Result<i64> {
        self.id
            .parse()
            .map_err(|e| Error::invalid_id(self.id.as_str(), e))
    }

    pub fn set_id(&mut self, id: i64) {
        self.id = id.to_string();
    }

    /// Forget the identifier, marking the resource as gone
    pub fn clear_id(&mut self) {
        self.id.clear();
    }

    /// Copy a remote downtime into this state
    ///
    /// The new values are computed first and written only if every one of
    /// them is representable, so a failure leaves the state untouched.
    pub fn project(&mut self, dt: &Downtime) -> Result<()> {
        tracing::debug!("downtime: {:?}", dt);

        let recurrence = dt.recurrence.as_ref().map(project_recurrence).transpose()?;

        let mut config = self.config.clone();
        config.end = dt.end;
        config.message = dt.message.clone();
        if dt.monitor_id.is_some() {
            config.monitor_id = dt.monitor_id;
        }
        config.timezone = dt.timezone.clone();
        if recurrence.is_some() {
            config.recurrence = recurrence;
        }
        config.scope = dt.scope.clone().unwrap_or_default();
        if let Some(tags) = &dt.monitor_tags
            && !is_all_monitors(tags)
        {
            config.monitor_tags = Some(tags.iter().cloned().collect());
        }
        config.start = dt.start;

        self.config = config;
        self.active = dt.active.unwrap_or_default();
        self.disabled = dt.disabled.unwrap_or_default();
        Ok(())
    }
}

/// True for exactly `["*"]`
fn is_all_monitors(tags: &[String]) -> bool {
    matches!(tags, [only] if only == ALL_MONITORS_TAG)
}

fn project_recurrence(rec: &DowntimeRecurrence) -> Result<RecurrenceConfig> {
    let kind = rec
        .kind
        .as_deref()
        .map(RecurrenceType::from_str)
        .transpose()
        .map_err(|e| Error::state_write("recurrence.type", e))?;

    let week_days = rec
        .week_days
        .as_ref()
        .map(|days| {
            days.iter()
                .map(|d| Weekday::from_str(d))
                .collect::<std::result::Result<Vec<_>, _>>()
        })
        .transpose()
        .map_err(|e| Error::state_write("recurrence.week_days", e))?;

    Ok(RecurrenceConfig {
        period: rec.period,
        kind,
        until_date: rec.until_date,
        until_occurrences: rec.until_occurrences,
        week_days,
        rrule: rec.rrule.clone(),
    })
}
