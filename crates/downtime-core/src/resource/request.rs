//! Outbound request construction
//!
//! Builds the [`Downtime`] body for a create or update call in one step.
//! Attributes the user left unset stay `None` and are therefore not sent.

use super::boundary::{ApplyMode, Boundary, needs_apply, resolve_boundary};
use super::config::{DowntimeConfig, RecurrenceConfig};
use crate::model::{Downtime, DowntimeRecurrence};

/// Build the request body for `config`
///
/// `mode` carries, for updates, the downtime currently stored on the server
/// and the attributes changed since the last apply; it only affects the
/// start/end boundaries.
pub fn compose_request(config: &DowntimeConfig, mode: ApplyMode<'_>) -> Downtime {
    let boundary = |b: Boundary| {
        let resolved = resolve_boundary(config, b);
        needs_apply(b, &resolved, mode).then_some(resolved.timestamp)
    };

    Downtime {
        start: boundary(Boundary::Start),
        end: boundary(Boundary::End),
        message: config.message.as_deref().map(|m| m.trim().to_string()),
        monitor_id: config.monitor_id,
        monitor_tags: config
            .monitor_tags
            .as_ref()
            .map(|tags| tags.iter().cloned().collect()),
        scope: Some(config.scope.clone()),
        timezone: config.timezone.clone(),
        recurrence: config.recurrence.as_ref().map(recurrence_request),
        ..Default::default()
    }
}

fn recurrence_request(rec: &RecurrenceConfig) -> DowntimeRecurrence {
    DowntimeRecurrence {
        period: rec.period,
        kind: rec.kind.map(|k| k.as_str().to_string()),
        until_date: rec.until_date,
        until_occurrences: rec.until_occurrences,
        week_days: rec
            .week_days
            .as_ref()
            .map(|days| days.iter().map(|d| d.as_str().to_string()).collect()),
        rrule: rec.rrule.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::config::{Attribute, ChangeSet, RecurrenceType, Weekday};

    #[test]
    fn create_with_start_only() {
        let config = DowntimeConfig {
            start: Some(1_700_000_000),
            ..DowntimeConfig::new(["host:web-1"])
        };

        let req = compose_request(&config, ApplyMode::Create);
        assert_eq!(req.start, Some(1_700_000_000));
        assert_eq!(req.end, None);
        assert_eq!(req.scope, Some(vec!["host:web-1".to_string()]));
        assert_eq!(req.timezone.as_deref(), Some("UTC"));
        assert_eq!(req.id, None);

        let body = serde_json::to_value(&req).unwrap();
        assert!(body.get("end").is_none());
        assert!(body.get("monitor_id").is_none());
        assert!(body.get("monitor_tags").is_none());
        assert!(body.get("recurrence").is_none());
    }

    #[test]
    fn message_is_trimmed_and_scope_order_kept() {
        let config = DowntimeConfig {
            message: Some("  deploying @ops \n".into()),
            ..DowntimeConfig::new(["role:db", "env:prod", "az:b"])
        };

        let req = compose_request(&config, ApplyMode::Create);
        assert_eq!(req.message.as_deref(), Some("deploying @ops"));
        assert_eq!(
            req.scope,
            Some(vec!["role:db".into(), "env:prod".into(), "az:b".into()])
        );
    }

    #[test]
    fn explicit_zero_values_are_sent() {
        let config = DowntimeConfig {
            monitor_id: Some(0),
            ..DowntimeConfig::new(["*"])
        };

        let body = serde_json::to_value(compose_request(&config, ApplyMode::Create)).unwrap();
        assert_eq!(body["monitor_id"], serde_json::json!(0));
    }

    #[test]
    fn partial_recurrence_keeps_only_set_fields() {
        let config = DowntimeConfig {
            recurrence: Some(RecurrenceConfig {
                kind: Some(RecurrenceType::Weeks),
                week_days: Some(vec![Weekday::Fri, Weekday::Mon]),
                ..Default::default()
            }),
            ..DowntimeConfig::new(["*"])
        };

        let req = compose_request(&config, ApplyMode::Create);
        let rec = req.recurrence.unwrap();
        assert_eq!(rec.kind.as_deref(), Some("weeks"));
        assert_eq!(rec.week_days, Some(vec!["Fri".into(), "Mon".into()]));
        assert_eq!(rec.period, None);
        assert_eq!(rec.until_date, None);
        assert_eq!(rec.until_occurrences, None);
        assert_eq!(rec.rrule, None);
    }

    #[test]
    fn update_omits_untouched_end() {
        let config = DowntimeConfig {
            end: Some(1_700_003_600),
            message: Some("new text".into()),
            ..DowntimeConfig::new(["*"])
        };
        let current = Downtime {
            id: Some(11),
            end: Some(1_700_003_600),
            ..Default::default()
        };
        let changes = ChangeSet::from_attributes([Attribute::Message]);

        let req = compose_request(
            &config,
            ApplyMode::Update {
                current: &current,
                changes: &changes,
            },
        );
        assert_eq!(req.end, None);
        assert_eq!(req.message.as_deref(), Some("new text"));
    }

    #[test]
    fn monitor_tags_sent_as_list() {
        let config = DowntimeConfig {
            monitor_tags: Some(["b".to_string(), "a".to_string()].into()),
            ..DowntimeConfig::new(["*"])
        };

        let req = compose_request(&config, ApplyMode::Create);
        let mut tags = req.monitor_tags.unwrap();
        tags.sort();
        assert_eq!(tags, vec!["a".to_string(), "b".to_string()]);
    }
}
