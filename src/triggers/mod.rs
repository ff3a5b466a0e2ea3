//! Trigger description resolution — why did this build run?
//!
//! A build's `triggers` field is a sequence of heterogeneous JSON records in
//! one of two encodings: an object with a `type` field naming the trigger
//! kind, or an object whose key *is* the kind name and whose value holds the
//! kind's payload. Each record resolves to one human-readable description;
//! records that cannot be interpreted resolve to the unknown-trigger
//! message rather than failing, so one malformed trigger never hides the
//! rest.

use serde::Deserialize;
use serde_json::Value;

use crate::messages::{keys, MessageLookup};
use crate::server::Server;

// ---------------------------------------------------------------------------
// Trigger kinds
// ---------------------------------------------------------------------------

/// The closed set of trigger kinds the build server reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    /// Downstream build of another project.
    Project,
    /// Remote API call, optionally carrying the caller's host and a note.
    Remote,
    /// Source-control change.
    Scm,
    /// Scheduled timer.
    Time,
    /// Manual start by a user.
    User,
    /// Anything the resolver does not recognize.
    Unknown,
}

impl TriggerKind {
    /// Resolve a kind from the name the status API uses.
    pub fn from_wire(name: &str) -> Self {
        match name {
            "ProjectTrigger" => Self::Project,
            "RemoteTrigger" => Self::Remote,
            "SCMTrigger" => Self::Scm,
            "TimeTrigger" => Self::Time,
            "UserTrigger" => Self::User,
            _ => Self::Unknown,
        }
    }
}

// ---------------------------------------------------------------------------
// Kind payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ProjectPayload {
    name: String,
    url: String,
    #[serde(rename = "buildNumber")]
    build_number: i64,
}

#[derive(Debug, Default, Deserialize)]
struct RemotePayload {
    #[serde(default)]
    host: Option<String>,
    #[serde(default)]
    note: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    username: String,
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve a build's trigger records into display descriptions.
///
/// Descriptions keep the order the records first produced them; exact
/// duplicates are suppressed. The result is never empty — when nothing is
/// recognized it holds exactly one unknown-trigger message.
pub fn describe_triggers(
    server: &Server,
    triggers: &[Value],
    messages: &dyn MessageLookup,
) -> Vec<String> {
    let mut descriptions: Vec<String> = Vec::new();

    for record in triggers {
        if let Some(type_field) = record.get("type") {
            let kind = type_field
                .as_str()
                .map_or(TriggerKind::Unknown, TriggerKind::from_wire);
            push_unique(&mut descriptions, describe_one(server, kind, record, messages));
        } else if let Some(fields) = record.as_object() {
            // Key-named encoding: the kind name is the record's key and the
            // payload is the value beneath it.
            for (name, payload) in fields {
                let kind = TriggerKind::from_wire(name);
                push_unique(&mut descriptions, describe_one(server, kind, payload, messages));
            }
        } else {
            push_unique(&mut descriptions, messages.message(keys::TRIGGER_UNKNOWN));
        }
    }

    if descriptions.is_empty() {
        descriptions.push(messages.message(keys::TRIGGER_UNKNOWN));
    }
    descriptions
}

/// Resolve one record; any payload mismatch falls back to the unknown
/// message.
fn describe_one(
    server: &Server,
    kind: TriggerKind,
    payload: &Value,
    messages: &dyn MessageLookup,
) -> String {
    format_kind(server, kind, payload, messages)
        .unwrap_or_else(|| messages.message(keys::TRIGGER_UNKNOWN))
}

fn format_kind(
    server: &Server,
    kind: TriggerKind,
    payload: &Value,
    messages: &dyn MessageLookup,
) -> Option<String> {
    match kind {
        TriggerKind::Project => {
            let project: ProjectPayload = serde_json::from_value(payload.clone()).ok()?;
            Some(messages.format(
                keys::TRIGGER_PROJECT,
                &[
                    &server.host,
                    &project.name,
                    &project.url,
                    &project.build_number.to_string(),
                ],
            ))
        }
        TriggerKind::Remote => {
            let remote: RemotePayload = serde_json::from_value(payload.clone()).unwrap_or_default();
            match (non_empty(remote.host.as_deref()), non_empty(remote.note.as_deref())) {
                (Some(host), Some(note)) => Some(messages.format(
                    keys::TRIGGER_REMOTE_HOST_NOTE,
                    &[&server.host, host, note],
                )),
                (None, Some(note)) => {
                    Some(messages.format(keys::TRIGGER_REMOTE_NOTE, &[&server.host, note]))
                }
                _ => Some(messages.message(keys::TRIGGER_REMOTE)),
            }
        }
        TriggerKind::Scm => Some(messages.message(keys::TRIGGER_SCM)),
        TriggerKind::Time => Some(messages.message(keys::TRIGGER_TIME)),
        TriggerKind::User => {
            let user: UserPayload = serde_json::from_value(payload.clone()).ok()?;
            Some(messages.format(keys::TRIGGER_USER, &[&server.host, &user.username]))
        }
        TriggerKind::Unknown => None,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn push_unique(descriptions: &mut Vec<String>, description: String) {
    if !descriptions.contains(&description) {
        descriptions.push(description);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Catalog;
    use serde_json::json;

    fn server() -> Server {
        Server {
            base_url: "https://tracker.example.org".to_string(),
            host: "https://ci.example.org".to_string(),
            secured: false,
        }
    }

    #[test]
    fn kind_names_resolve() {
        assert_eq!(TriggerKind::from_wire("SCMTrigger"), TriggerKind::Scm);
        assert_eq!(TriggerKind::from_wire("UserTrigger"), TriggerKind::User);
        assert_eq!(TriggerKind::from_wire("NightlyTrigger"), TriggerKind::Unknown);
    }

    #[test]
    fn type_field_encoding() {
        let triggers = vec![json!({"type": "SCMTrigger"})];
        let descriptions = describe_triggers(&server(), &triggers, &Catalog);
        assert_eq!(descriptions, vec!["Started by an SCM change".to_string()]);
    }

    #[test]
    fn key_named_encoding() {
        let triggers = vec![json!({"TimeTrigger": {}})];
        let descriptions = describe_triggers(&server(), &triggers, &Catalog);
        assert_eq!(descriptions, vec!["Started by a timer".to_string()]);
    }

    #[test]
    fn project_trigger_links_to_the_upstream_build() {
        let triggers = vec![json!({
            "type": "ProjectTrigger",
            "name": "upstream",
            "url": "job/upstream/",
            "buildNumber": 7
        })];
        let descriptions = describe_triggers(&server(), &triggers, &Catalog);
        assert_eq!(
            descriptions,
            vec![
                "Started by build #7 of <a href=\"https://ci.example.org/job/upstream/\" \
                 target=\"_parent\">upstream</a>"
                    .to_string()
            ]
        );
    }

    #[test]
    fn remote_trigger_variants() {
        let with_both = vec![json!({"type": "RemoteTrigger", "host": "deploy01", "note": "nightly push"})];
        assert_eq!(
            describe_triggers(&server(), &with_both, &Catalog),
            vec!["Started by remote host deploy01: nightly push".to_string()]
        );

        let note_only = vec![json!({"type": "RemoteTrigger", "note": "nightly push"})];
        assert_eq!(
            describe_triggers(&server(), &note_only, &Catalog),
            vec!["Started by remote host: nightly push".to_string()]
        );

        let bare = vec![json!({"type": "RemoteTrigger"})];
        assert_eq!(
            describe_triggers(&server(), &bare, &Catalog),
            vec!["Started by a remote host".to_string()]
        );

        // An empty host counts as absent.
        let empty_host = vec![json!({"type": "RemoteTrigger", "host": "", "note": "n"})];
        assert_eq!(
            describe_triggers(&server(), &empty_host, &Catalog),
            vec!["Started by remote host: n".to_string()]
        );
    }

    #[test]
    fn user_trigger_names_the_user() {
        let triggers = vec![json!({"UserTrigger": {"username": "mara"}})];
        let descriptions = describe_triggers(&server(), &triggers, &Catalog);
        assert_eq!(descriptions.len(), 1);
        assert!(descriptions[0].contains("mara"));
        assert!(descriptions[0].contains("https://ci.example.org/user/mara"));
    }

    #[test]
    fn malformed_payload_becomes_unknown() {
        // A project trigger without its required fields.
        let triggers = vec![json!({"type": "ProjectTrigger", "name": "upstream"})];
        let descriptions = describe_triggers(&server(), &triggers, &Catalog);
        assert_eq!(descriptions, vec!["Unknown build trigger".to_string()]);
    }

    #[test]
    fn non_object_record_becomes_unknown() {
        let triggers = vec![json!("SCMTrigger")];
        let descriptions = describe_triggers(&server(), &triggers, &Catalog);
        assert_eq!(descriptions, vec!["Unknown build trigger".to_string()]);
    }

    #[test]
    fn unrecognized_kind_becomes_unknown() {
        let triggers = vec![json!({"type": "NightlyTrigger"})];
        let descriptions = describe_triggers(&server(), &triggers, &Catalog);
        assert_eq!(descriptions, vec!["Unknown build trigger".to_string()]);
    }

    #[test]
    fn empty_input_yields_one_unknown_message() {
        let descriptions = describe_triggers(&server(), &[], &Catalog);
        assert_eq!(descriptions, vec!["Unknown build trigger".to_string()]);
    }

    #[test]
    fn exact_duplicates_are_suppressed() {
        let triggers = vec![
            json!({"type": "SCMTrigger"}),
            json!({"SCMTrigger": {}}),
            json!({"type": "TimeTrigger"}),
        ];
        let descriptions = describe_triggers(&server(), &triggers, &Catalog);
        assert_eq!(
            descriptions,
            vec![
                "Started by an SCM change".to_string(),
                "Started by a timer".to_string(),
            ]
        );
    }

    #[test]
    fn different_parameters_are_not_duplicates() {
        let triggers = vec![
            json!({"type": "ProjectTrigger", "name": "up", "url": "job/up/", "buildNumber": 1}),
            json!({"type": "ProjectTrigger", "name": "up", "url": "job/up/", "buildNumber": 2}),
        ];
        let descriptions = describe_triggers(&server(), &triggers, &Catalog);
        assert_eq!(descriptions.len(), 2);
    }

    #[test]
    fn one_bad_record_does_not_hide_the_rest() {
        let triggers = vec![
            json!({"type": "ProjectTrigger"}),
            json!({"type": "SCMTrigger"}),
        ];
        let descriptions = describe_triggers(&server(), &triggers, &Catalog);
        assert_eq!(
            descriptions,
            vec![
                "Unknown build trigger".to_string(),
                "Started by an SCM change".to_string(),
            ]
        );
    }
}
