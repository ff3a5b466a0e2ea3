//! Trigger resolver contract tests.
//!
//! Exercises both record encodings, the unknown fallback, duplicate
//! suppression, and the guarantee that resolution always yields at least
//! one description.

use serde_json::json;

use glance::messages::{Catalog, MessageLookup};
use glance::server::parse_server;
use glance::triggers::describe_triggers;

fn server() -> glance::server::Server {
    parse_server("https://tracker.example.org", "https://ci.example.org")
}

#[test]
fn empty_trigger_list_yields_one_unknown_message() {
    let descriptions = describe_triggers(&server(), &[], &Catalog);
    assert_eq!(descriptions, vec!["Unknown build trigger".to_string()]);
}

#[test]
fn unrecognized_kind_yields_one_unknown_message() {
    let triggers = vec![json!({"type": "GerritTrigger", "patchset": 3})];
    let descriptions = describe_triggers(&server(), &triggers, &Catalog);
    assert_eq!(descriptions, vec!["Unknown build trigger".to_string()]);
}

#[test]
fn identical_project_descriptions_collapse_to_one() {
    let record = json!({
        "type": "ProjectTrigger",
        "name": "upstream",
        "url": "job/upstream/",
        "buildNumber": 12
    });
    let triggers = vec![record.clone(), record];
    let descriptions = describe_triggers(&server(), &triggers, &Catalog);
    assert_eq!(descriptions.len(), 1);
}

#[test]
fn different_build_numbers_stay_distinct() {
    let triggers = vec![
        json!({"type": "ProjectTrigger", "name": "upstream", "url": "job/upstream/", "buildNumber": 12}),
        json!({"type": "ProjectTrigger", "name": "upstream", "url": "job/upstream/", "buildNumber": 13}),
    ];
    let descriptions = describe_triggers(&server(), &triggers, &Catalog);
    assert_eq!(descriptions.len(), 2);
}

#[test]
fn both_encodings_resolve_to_the_same_description() {
    let typed = vec![json!({"type": "TimeTrigger"})];
    let keyed = vec![json!({"TimeTrigger": {}})];
    assert_eq!(
        describe_triggers(&server(), &typed, &Catalog),
        describe_triggers(&server(), &keyed, &Catalog)
    );
}

#[test]
fn a_realistic_mixed_build() {
    let triggers = vec![
        json!({"type": "SCMTrigger"}),
        json!({"UserTrigger": {"username": "mara"}}),
        json!({"type": "SCMTrigger"}),
        json!({"type": "RemoteTrigger", "host": "deploy01", "note": "release"}),
        json!({"type": "FutureTrigger"}),
    ];
    let descriptions = describe_triggers(&server(), &triggers, &Catalog);
    assert_eq!(descriptions.len(), 4);
    assert_eq!(descriptions[0], "Started by an SCM change");
    assert!(descriptions[1].contains("mara"));
    assert_eq!(descriptions[2], "Started by remote host deploy01: release");
    assert_eq!(descriptions[3], "Unknown build trigger");
}

#[test]
fn resolution_goes_through_the_injected_provider() {
    struct Upper;
    impl MessageLookup for Upper {
        fn message(&self, key: &str) -> String {
            Catalog.message(key).to_uppercase()
        }
    }

    let triggers = vec![json!({"type": "SCMTrigger"})];
    let descriptions = describe_triggers(&server(), &triggers, &Upper);
    assert_eq!(descriptions, vec!["STARTED BY AN SCM CHANGE".to_string()]);
}
