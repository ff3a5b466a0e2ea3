//! Message templates — localized display strings with positional parameters.
//!
//! Every user-facing string goes through a [`MessageLookup`]: the embedding
//! dashboard host can inject its own localized provider, while the built-in
//! [`Catalog`] supplies the English defaults. Templates use positional
//! `{0}`, `{1}`, … placeholders.

use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Message keys
// ---------------------------------------------------------------------------

/// Well-known message keys used by the resolver and status renderer.
pub mod keys {
    pub const TRIGGER_PROJECT: &str = "trigger.project";
    pub const TRIGGER_REMOTE_HOST_NOTE: &str = "trigger.remote.host.note";
    pub const TRIGGER_REMOTE_NOTE: &str = "trigger.remote.note";
    pub const TRIGGER_REMOTE: &str = "trigger.remote";
    pub const TRIGGER_SCM: &str = "trigger.scm";
    pub const TRIGGER_TIME: &str = "trigger.time";
    pub const TRIGGER_USER: &str = "trigger.user";
    pub const TRIGGER_UNKNOWN: &str = "trigger.unknown";
    pub const STATUS_RAN: &str = "status.ran";
    pub const STATUS_TOOK: &str = "status.took";
    pub const STATUS_NOT_BUILT: &str = "status.not-built";
    pub const STATUS_CONNECTED_TO: &str = "status.connected-to";
    pub const CHART_NOT_GENERATED: &str = "chart.not-generated";
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Provider of display message templates.
///
/// `message` returns the raw template for a key; `format` applies positional
/// parameters to it. Unknown keys resolve to the key itself so a missing
/// translation degrades visibly instead of failing.
pub trait MessageLookup {
    fn message(&self, key: &str) -> String;

    fn format(&self, key: &str, params: &[&str]) -> String {
        format_template(&self.message(key), params)
    }
}

// ---------------------------------------------------------------------------
// Built-in English catalog
// ---------------------------------------------------------------------------

static TEMPLATES: &[(&str, &str)] = &[
    (
        keys::TRIGGER_PROJECT,
        "Started by build #{3} of <a href=\"{0}/{2}\" target=\"_parent\">{1}</a>",
    ),
    (
        keys::TRIGGER_REMOTE_HOST_NOTE,
        "Started by remote host {1}: {2}",
    ),
    (keys::TRIGGER_REMOTE_NOTE, "Started by remote host: {1}"),
    (keys::TRIGGER_REMOTE, "Started by a remote host"),
    (keys::TRIGGER_SCM, "Started by an SCM change"),
    (keys::TRIGGER_TIME, "Started by a timer"),
    (
        keys::TRIGGER_USER,
        "Started by user <a href=\"{0}/user/{1}\" target=\"_parent\">{1}</a>",
    ),
    (keys::TRIGGER_UNKNOWN, "Unknown build trigger"),
    (keys::STATUS_RAN, "Ran {0}"),
    (keys::STATUS_TOOK, "Took {0}"),
    (keys::STATUS_NOT_BUILT, "This project has not been built yet"),
    (keys::STATUS_CONNECTED_TO, "Connected to"),
    (
        keys::CHART_NOT_GENERATED,
        "The chart has not been generated on the build server",
    ),
];

/// Built-in English message catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct Catalog;

impl MessageLookup for Catalog {
    fn message(&self, key: &str) -> String {
        TEMPLATES
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, template)| (*template).to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

// ---------------------------------------------------------------------------
// Template formatting
// ---------------------------------------------------------------------------

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\d+)\}").expect("placeholder regex must compile"));

/// Substitute positional `{N}` placeholders with the given parameters.
///
/// A placeholder with no matching parameter is left verbatim.
pub fn format_template(template: &str, params: &[&str]) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &regex::Captures<'_>| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| params.get(index))
                .map_or_else(|| caps[0].to_string(), |param| (*param).to_string())
        })
        .into_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_positional_parameters() {
        assert_eq!(format_template("{0} and {1}", &["a", "b"]), "a and b");
    }

    #[test]
    fn repeated_placeholders_substitute_everywhere() {
        assert_eq!(format_template("{0} = {0}", &["x"]), "x = x");
    }

    #[test]
    fn missing_parameters_stay_verbatim() {
        assert_eq!(format_template("{0} and {2}", &["a"]), "a and {2}");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(format_template("no placeholders", &[]), "no placeholders");
    }

    #[test]
    fn catalog_resolves_known_keys() {
        let catalog = Catalog;
        assert_eq!(catalog.message(keys::TRIGGER_SCM), "Started by an SCM change");
    }

    #[test]
    fn catalog_falls_back_to_the_key() {
        let catalog = Catalog;
        assert_eq!(catalog.message("no.such.key"), "no.such.key");
    }

    #[test]
    fn catalog_formats_with_parameters() {
        let catalog = Catalog;
        assert_eq!(
            catalog.format(keys::STATUS_RAN, &["2 min 30 sec ago"]),
            "Ran 2 min 30 sec ago"
        );
    }
}
