//! Typed downtime configuration
//!
//! Every optional attribute is an `Option`: `None` means the user did not set
//! it, `Some(v)` means they did, even when `v` is zero or empty. The request
//! builder relies on that distinction to decide what to leave out of a call.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::schema::downtime_schema;

/// User-declared downtime configuration
///
/// The computed `active`/`disabled` flags are not part of this struct and are
/// rejected if supplied (see [`crate::resource::DowntimeState`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DowntimeConfig {
    /// Start boundary, epoch seconds
    #[serde(default)]
    pub start: Option<i64>,

    /// Start boundary, RFC3339
    #[serde(default)]
    pub start_date: Option<String>,

    /// End boundary, epoch seconds
    #[serde(default)]
    pub end: Option<i64>,

    /// End boundary, RFC3339
    #[serde(default)]
    pub end_date: Option<String>,

    #[serde(default = "default_timezone")]
    pub timezone: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub recurrence: Option<RecurrenceConfig>,

    /// Group scope expressions; `"*"` means everything
    pub scope: Vec<String>,

    #[serde(default)]
    pub monitor_id: Option<i64>,

    #[serde(default)]
    pub monitor_tags: Option<BTreeSet<String>>,
}

impl Default for DowntimeConfig {
    fn default() -> Self {
        Self {
            start: None,
            start_date: None,
            end: None,
            end_date: None,
            timezone: default_timezone(),
            message: None,
            recurrence: None,
            scope: Vec::new(),
            monitor_id: None,
            monitor_tags: None,
        }
    }
}

fn default_timezone() -> Option<String> {
    Some("UTC".to_string())
}

impl DowntimeConfig {
    /// Create a configuration covering the given scope
    pub fn new<I, S>(scope: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            scope: scope.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Whether the attribute at `path` is set
    ///
    /// Paths follow the schema (`"monitor_tags"`, `"recurrence.rrule"`).
    /// Unknown paths are reported as unset; see [`Self::presence`].
    pub fn is_set(&self, path: &str) -> bool {
        self.presence(path).unwrap_or(false)
    }

    /// Presence of the attribute at `path`, or `None` for an unknown path
    pub fn presence(&self, path: &str) -> Option<bool> {
        let rec = self.recurrence.as_ref();
        let set = match path {
            "start" => self.start.is_some(),
            "start_date" => self.start_date.is_some(),
            "end" => self.end.is_some(),
            "end_date" => self.end_date.is_some(),
            "timezone" => self.timezone.is_some(),
            "message" => self.message.is_some(),
            "recurrence" => rec.is_some(),
            "scope" => !self.scope.is_empty(),
            "monitor_id" => self.monitor_id.is_some(),
            "monitor_tags" => self.monitor_tags.is_some(),
            "recurrence.period" => rec.is_some_and(|r| r.period.is_some()),
            "recurrence.type" => rec.is_some_and(|r| r.kind.is_some()),
            "recurrence.until_date" => rec.is_some_and(|r| r.until_date.is_some()),
            "recurrence.until_occurrences" => rec.is_some_and(|r| r.until_occurrences.is_some()),
            "recurrence.week_days" => rec.is_some_and(|r| r.week_days.is_some()),
            "recurrence.rrule" => rec.is_some_and(|r| r.rrule.is_some()),
            _ => return None,
        };
        Some(set)
    }

    /// Validate the configuration against the downtime schema
    ///
    /// Rejects:
    /// - both sides of any declared ConflictsWith pair
    /// - an empty `scope`
    /// - a recurrence block without `type`
    /// - malformed `start_date`/`end_date` and unknown timezones
    pub fn validate(&self) -> Result<()> {
        let schema = downtime_schema();

        for (a, b) in schema.conflict_pairs() {
            let (Some(a_set), Some(b_set)) = (self.presence(&a), self.presence(&b)) else {
                return Err(Error::validation(format!(
                    "conflict between \"{a}\" and \"{b}\" names an unknown attribute"
                )));
            };
            if a_set && b_set {
                return Err(Error::validation(format!(
                    "\"{a}\" conflicts with \"{b}\"; only one of them can be set"
                )));
            }
        }

        if self.scope.is_empty() {
            return Err(Error::validation("\"scope\" is required"));
        }

        if let Some(rec) = &self.recurrence
            && rec.kind.is_none()
        {
            return Err(Error::validation("\"recurrence.type\" is required"));
        }

        let string_attrs = [
            ("start_date", self.start_date.as_deref()),
            ("end_date", self.end_date.as_deref()),
            ("timezone", self.timezone.as_deref()),
        ];
        for (name, value) in string_attrs {
            if let (Some(value), Some(attr)) = (value, schema.attribute(name)) {
                attr.check_str(value)?;
            }
        }

        Ok(())
    }
}

/// Repeating schedule of a downtime
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecurrenceConfig {
    #[serde(default)]
    pub period: Option<i32>,

    #[serde(rename = "type", default)]
    pub kind: Option<RecurrenceType>,

    /// Recurrence end, epoch seconds
    #[serde(default)]
    pub until_date: Option<i64>,

    #[serde(default)]
    pub until_occurrences: Option<i32>,

    /// Only meaningful for `type = weeks`; order is kept as configured
    #[serde(default)]
    pub week_days: Option<Vec<Weekday>>,

    /// iCalendar RRULE, exclusive with the interval fields above
    #[serde(default)]
    pub rrule: Option<String>,
}

/// Unit of a recurrence period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceType {
    Days,
    Weeks,
    Months,
    Years,
    /// Schedule defined by `rrule`
    Rrule,
}

impl RecurrenceType {
    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceType::Days => "days",
            RecurrenceType::Weeks => "weeks",
            RecurrenceType::Months => "months",
            RecurrenceType::Years => "years",
            RecurrenceType::Rrule => "rrule",
        }
    }
}

impl FromStr for RecurrenceType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "days" => Ok(RecurrenceType::Days),
            "weeks" => Ok(RecurrenceType::Weeks),
            "months" => Ok(RecurrenceType::Months),
            "years" => Ok(RecurrenceType::Years),
            "rrule" => Ok(RecurrenceType::Rrule),
            other => Err(format!("unknown recurrence type {other:?}")),
        }
    }
}

impl fmt::Display for RecurrenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day of week, in the vendor's three-letter spelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Mon" => Ok(Weekday::Mon),
            "Tue" => Ok(Weekday::Tue),
            "Wed" => Ok(Weekday::Wed),
            "Thu" => Ok(Weekday::Thu),
            "Fri" => Ok(Weekday::Fri),
            "Sat" => Ok(Weekday::Sat),
            "Sun" => Ok(Weekday::Sun),
            other => Err(format!("unknown week day {other:?}")),
        }
    }
}

/// Top-level attributes a [`ChangeSet`] can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attribute {
    Start,
    StartDate,
    End,
    EndDate,
    Timezone,
    Message,
    Recurrence,
    Scope,
    MonitorId,
    MonitorTags,
}

impl Attribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Start => "start",
            Attribute::StartDate => "start_date",
            Attribute::End => "end",
            Attribute::EndDate => "end_date",
            Attribute::Timezone => "timezone",
            Attribute::Message => "message",
            Attribute::Recurrence => "recurrence",
            Attribute::Scope => "scope",
            Attribute::MonitorId => "monitor_id",
            Attribute::MonitorTags => "monitor_tags",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes that differ between the last applied configuration and the
/// desired one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changed: BTreeSet<Attribute>,
}

impl ChangeSet {
    /// Diff two snapshots of the same configuration
    pub fn between(prior: &DowntimeConfig, desired: &DowntimeConfig) -> Self {
        let mut changed = BTreeSet::new();
        let mut note = |attr, differs: bool| {
            if differs {
                changed.insert(attr);
            }
        };

        note(Attribute::Start, prior.start != desired.start);
        note(Attribute::StartDate, prior.start_date != desired.start_date);
        note(Attribute::End, prior.end != desired.end);
        note(Attribute::EndDate, prior.end_date != desired.end_date);
        note(Attribute::Timezone, prior.timezone != desired.timezone);
        note(Attribute::Message, prior.message != desired.message);
        note(Attribute::Recurrence, prior.recurrence != desired.recurrence);
        note(Attribute::Scope, prior.scope != desired.scope);
        note(Attribute::MonitorId, prior.monitor_id != desired.monitor_id);
        note(Attribute::MonitorTags, prior.monitor_tags != desired.monitor_tags);

        Self { changed }
    }

    /// A change set that reports the given attributes as changed
    pub fn from_attributes(attrs: impl IntoIterator<Item = Attribute>) -> Self {
        Self {
            changed: attrs.into_iter().collect(),
        }
    }

    pub fn has_changed(&self, attr: Attribute) -> bool {
        self.changed.contains(&attr)
    }

    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Attribute> + '_ {
        self.changed.iter().copied()
    }
}
