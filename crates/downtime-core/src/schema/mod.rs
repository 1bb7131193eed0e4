//! Schema descriptor for the downtime resource
//!
//! The host framework uses this to render documentation, plan diffs and
//! reject invalid configurations. The adapter itself reads the ConflictsWith
//! pairs and string validators from here, so the descriptor and
//! [`crate::resource::DowntimeConfig::validate`] cannot drift apart.
//!
//! ## Usage
//!
//! ```rust
//! use downtime_core::schema::downtime_schema;
//!
//! let schema = downtime_schema();
//! let start_date = schema.attribute("start_date").unwrap();
//! assert_eq!(start_date.conflicts_with, vec!["start"]);
//! ```

use chrono::DateTime;
use chrono_tz::Tz;
use serde_json::Value;

/// Resource type name registered with the host framework
pub const DOWNTIME_RESOURCE_TYPE: &str = "datadog_downtime";

/// Value type of an attribute
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeType {
    Bool,
    Int,
    String,
    /// Ordered list
    List(Box<AttributeType>),
    /// Unordered set
    Set(Box<AttributeType>),
    /// Nested block with its own attributes
    Block(Vec<AttributeSchema>),
}

/// Validation applied to a string value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    /// RFC3339 date-time string
    Rfc3339,
    /// IANA timezone identifier
    Timezone,
    /// One of a fixed vocabulary
    OneOf(&'static [&'static str]),
}

impl Validator {
    /// Check a single string value
    pub fn check(&self, value: &str) -> Result<(), String> {
        match self {
            Validator::Rfc3339 => DateTime::parse_from_rfc3339(value)
                .map(|_| ())
                .map_err(|e| format!("{value:?} is not a valid RFC3339 date: {e}")),
            Validator::Timezone => value
                .parse::<Tz>()
                .map(|_| ())
                .map_err(|_| format!("{value:?} is not a supported timezone")),
            Validator::OneOf(allowed) => {
                if allowed.contains(&value) {
                    Ok(())
                } else {
                    Err(format!("{value:?} must be one of {}", allowed.join(", ")))
                }
            }
        }
    }
}

/// Description of a single attribute
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSchema {
    pub name: &'static str,
    pub ty: AttributeType,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub default: Option<Value>,
    /// Attribute paths that may not be set together with this one
    pub conflicts_with: Vec<&'static str>,
    pub max_items: Option<usize>,
    pub validators: Vec<Validator>,
    pub description: &'static str,
}

impl AttributeSchema {
    fn new(name: &'static str, ty: AttributeType) -> Self {
        Self {
            name,
            ty,
            required: false,
            optional: false,
            computed: false,
            default: None,
            conflicts_with: Vec::new(),
            max_items: None,
            validators: Vec::new(),
            description: "",
        }
    }

    /// A user-supplied attribute that must be present
    pub fn required(name: &'static str, ty: AttributeType) -> Self {
        Self {
            required: true,
            ..Self::new(name, ty)
        }
    }

    /// A user-supplied attribute that may be omitted
    pub fn optional(name: &'static str, ty: AttributeType) -> Self {
        Self {
            optional: true,
            ..Self::new(name, ty)
        }
    }

    /// A server-populated attribute the user cannot set
    pub fn computed(name: &'static str, ty: AttributeType) -> Self {
        Self {
            computed: true,
            ..Self::new(name, ty)
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn conflicts_with(mut self, paths: &[&'static str]) -> Self {
        self.conflicts_with.extend_from_slice(paths);
        self
    }

    pub fn with_max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Nested attributes when this is a block
    pub fn nested(&self) -> &[AttributeSchema] {
        match &self.ty {
            AttributeType::Block(attrs) => attrs,
            _ => &[],
        }
    }

    /// Run every validator against `value`
    pub fn check_str(&self, value: &str) -> Result<(), crate::Error> {
        for validator in &self.validators {
            validator
                .check(value)
                .map_err(|msg| crate::Error::validation(format!("{}: {}", self.name, msg)))?;
        }
        Ok(())
    }
}

/// Description of a whole resource type
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSchema {
    pub type_name: &'static str,
    pub description: &'static str,
    pub attributes: Vec<AttributeSchema>,
}

impl ResourceSchema {
    /// Look up an attribute by path (`"scope"`, `"recurrence.rrule"`)
    pub fn attribute(&self, path: &str) -> Option<&AttributeSchema> {
        let mut parts = path.split('.');
        let first = parts.next()?;
        let mut current = self.attributes.iter().find(|a| a.name == first)?;
        for part in parts {
            current = current.nested().iter().find(|a| a.name == part)?;
        }
        Some(current)
    }

    /// Every declared ConflictsWith pair, qualified by path, reported once
    ///
    /// Pairs are ordered lexically within and across pairs so the result is
    /// stable regardless of which side declared the conflict.
    pub fn conflict_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        collect_conflicts(&self.attributes, "", &mut pairs);
        pairs.sort();
        pairs.dedup();
        pairs
    }
}

fn collect_conflicts(attrs: &[AttributeSchema], prefix: &str, out: &mut Vec<(String, String)>) {
    for attr in attrs {
        let path = format!("{prefix}{}", attr.name);
        for other in &attr.conflicts_with {
            let other = other.to_string();
            if path <= other {
                out.push((path.clone(), other));
            } else {
                out.push((other, path.clone()));
            }
        }
        if !attr.nested().is_empty() {
            collect_conflicts(attr.nested(), &format!("{path}."), out);
        }
    }
}

/// Accepted values of `recurrence.type`
pub const RECURRENCE_TYPES: &[&str] = &["days", "weeks", "months", "years", "rrule"];

/// Accepted values of `recurrence.week_days`
pub const WEEK_DAYS: &[&str] = &["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Build the downtime resource schema
pub fn downtime_schema() -> ResourceSchema {
    use AttributeType::*;

    let recurrence = vec![
        AttributeSchema::optional("period", Int).describe(
            "How often to repeat as an integer. For example to repeat every 3 days, \
             select a `type` of `days` and a `period` of `3`.",
        ),
        AttributeSchema::required("type", String)
            .with_validator(Validator::OneOf(RECURRENCE_TYPES))
            .describe("One of `days`, `weeks`, `months`, `years` or `rrule`"),
        AttributeSchema::optional("until_date", Int)
            .conflicts_with(&["recurrence.until_occurrences"])
            .describe("The date at which the recurrence should end as a POSIX timestamp."),
        AttributeSchema::optional("until_occurrences", Int)
            .conflicts_with(&["recurrence.until_date"])
            .describe("How many times the downtime will be rescheduled."),
        AttributeSchema::optional("week_days", List(Box::new(String)))
            .with_validator(Validator::OneOf(WEEK_DAYS))
            .describe(
                "A list of week days to repeat on. Only applicable when `type` is `weeks`. \
                 First letter must be capitalized.",
            ),
        AttributeSchema::optional("rrule", String)
            .conflicts_with(&[
                "recurrence.period",
                "recurrence.until_date",
                "recurrence.until_occurrences",
                "recurrence.week_days",
            ])
            .describe(
                "The RRULE standard for defining recurring events, e.g. \
                 `FREQ=MONTHLY;INTERVAL=1`. Duration attributes (`DTSTART`, `DTEND`, \
                 `DURATION`) are not supported.",
            ),
    ];

    ResourceSchema {
        type_name: DOWNTIME_RESOURCE_TYPE,
        description: "Provides a Datadog downtime resource. This can be used to create and \
                      manage Datadog downtimes.",
        attributes: vec![
            AttributeSchema::computed("active", Bool)
                .describe("When true indicates this downtime is being actively applied"),
            AttributeSchema::computed("disabled", Bool)
                .describe("When true indicates this downtime is not being applied"),
            AttributeSchema::optional("start", Int)
                .describe("Specify when this downtime should start"),
            AttributeSchema::optional("start_date", String)
                .conflicts_with(&["start"])
                .with_validator(Validator::Rfc3339)
                .describe("String representing date and time to start the downtime in RFC3339 format."),
            AttributeSchema::optional("end", Int)
                .describe("Optionally specify an end date when this downtime should expire"),
            AttributeSchema::optional("end_date", String)
                .conflicts_with(&["end"])
                .with_validator(Validator::Rfc3339)
                .describe("String representing date and time to end the downtime in RFC3339 format."),
            AttributeSchema::optional("timezone", String)
                .with_default(Value::from("UTC"))
                .with_validator(Validator::Timezone)
                .describe("The timezone for the downtime, default UTC"),
            AttributeSchema::optional("message", String).describe(
                "An optional message to provide when creating the downtime, can include \
                 notification handles",
            ),
            AttributeSchema::optional("recurrence", Block(recurrence))
                .with_max_items(1)
                .describe("Optional recurring schedule for this downtime"),
            AttributeSchema::required("scope", List(Box::new(String))).describe(
                "specify the group scope to which this downtime applies. For everything use '*'",
            ),
            AttributeSchema::optional("monitor_id", Int)
                .conflicts_with(&["monitor_tags"])
                .describe("When specified, this downtime will only apply to this monitor"),
            // The server defaults monitor_tags to ["*"]; that default is
            // filtered out during state projection, not declared here.
            AttributeSchema::optional("monitor_tags", Set(Box::new(String)))
                .conflicts_with(&["monitor_id"])
                .describe(
                    "A list of monitor tags (up to 25), i.e. tags that are applied directly \
                     to monitors to which the downtime applies",
                ),
        ],
    }
}
