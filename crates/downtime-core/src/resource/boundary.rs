//! Start/end boundary handling
//!
//! Each boundary can be configured either as an epoch timestamp (`start`,
//! `end`) or as an RFC3339 string (`start_date`, `end_date`). On update a
//! boundary is only resent when it drifted or the user changed it, so that
//! editing e.g. the message does not push a start time that already passed.

use chrono::DateTime;

use super::config::{Attribute, ChangeSet, DowntimeConfig};
use crate::model::Downtime;

/// The two time boundaries of a downtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Start,
    End,
}

impl Boundary {
    /// Attribute carrying the RFC3339 form
    pub fn date_attr(&self) -> Attribute {
        match self {
            Boundary::Start => Attribute::StartDate,
            Boundary::End => Attribute::EndDate,
        }
    }

    /// Attribute carrying the epoch form
    pub fn timestamp_attr(&self) -> Attribute {
        match self {
            Boundary::Start => Attribute::Start,
            Boundary::End => Attribute::End,
        }
    }

    /// Current server-side value of this boundary
    pub fn remote_value(&self, dt: &Downtime) -> Option<i64> {
        match self {
            Boundary::Start => dt.start,
            Boundary::End => dt.end,
        }
    }
}

/// Effective value of a boundary and the attribute it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedBoundary {
    /// Epoch seconds; 0 when `source` is `None`
    pub timestamp: i64,
    /// `None` when the boundary is not configured
    pub source: Option<Attribute>,
}

impl ResolvedBoundary {
    const UNSET: Self = Self {
        timestamp: 0,
        source: None,
    };

    pub fn is_set(&self) -> bool {
        self.source.is_some()
    }
}

/// Resolve a boundary from configuration
///
/// The date string wins when present. A date string that fails to parse
/// resolves to unset; it does not fall back to the epoch attribute.
pub fn resolve_boundary(config: &DowntimeConfig, boundary: Boundary) -> ResolvedBoundary {
    let (date, timestamp) = match boundary {
        Boundary::Start => (config.start_date.as_deref(), config.start),
        Boundary::End => (config.end_date.as_deref(), config.end),
    };

    if let Some(date) = date {
        return match DateTime::parse_from_rfc3339(date) {
            Ok(parsed) => ResolvedBoundary {
                timestamp: parsed.timestamp(),
                source: Some(boundary.date_attr()),
            },
            Err(e) => {
                tracing::debug!("ignoring unparsable {}: {}", boundary.date_attr(), e);
                ResolvedBoundary::UNSET
            }
        };
    }

    match timestamp {
        Some(ts) => ResolvedBoundary {
            timestamp: ts,
            source: Some(boundary.timestamp_attr()),
        },
        None => ResolvedBoundary::UNSET,
    }
}

/// Whether a request is being built for a create or an update
#[derive(Debug, Clone, Copy)]
pub enum ApplyMode<'a> {
    Create,
    Update {
        /// Downtime as currently stored on the server
        current: &'a Downtime,
        /// Attributes changed since the last apply
        changes: &'a ChangeSet,
    },
}

/// Decide whether a resolved boundary goes into the outbound request
///
/// - unset boundaries are never sent
/// - on create, a set boundary is always sent
/// - on update, it is sent when the server value differs from the configured
///   one or when its source attribute changed
pub fn needs_apply(boundary: Boundary, resolved: &ResolvedBoundary, mode: ApplyMode<'_>) -> bool {
    let Some(source) = resolved.source else {
        return false;
    };

    match mode {
        ApplyMode::Create => true,
        ApplyMode::Update { current, changes } => {
            boundary.remote_value(current) != Some(resolved.timestamp) || changes.has_changed(source)
        }
    }
}
