//! Wire model of a downtime as stored by the monitoring service
//!
//! Every field is optional. A field left as `None` is omitted from the JSON
//! body entirely, which the downtime API treats differently from an explicit
//! zero or empty value.

use serde::{Deserialize, Serialize};

/// A downtime as sent to and returned by the remote API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Downtime {
    /// Server-assigned identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Server computed: the downtime is currently applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    /// Server computed: the downtime is not being applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,

    /// Epoch seconds at which the downtime was canceled, null while live
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canceled: Option<i64>,

    /// Start boundary, epoch seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,

    /// End boundary, epoch seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitor_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitor_tags: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<DowntimeRecurrence>,
}

impl Downtime {
    /// True when the server reports a cancellation timestamp
    pub fn is_canceled(&self) -> bool {
        self.canceled.is_some()
    }
}

/// Repeating schedule attached to a downtime
///
/// `type` and `week_days` stay strings here; the service owns their
/// vocabulary and the local model parses them on projection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DowntimeRecurrence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<i32>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until_date: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until_occurrences: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_days: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rrule: Option<String>,
}
