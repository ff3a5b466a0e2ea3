//! Data model for the build-server status API.
//!
//! Mirrors the JSON payloads the build server's remote API hands to the
//! dashboard: projects with their most recent builds, build results, the
//! raw trigger records, and chart references. Decoding is tolerant —
//! unknown fields are ignored and missing optional fields default — since
//! payloads vary between build-server versions.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Status payload
// ---------------------------------------------------------------------------

/// Top-level payload of the status API.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusPayload {
    /// Named view the projects belong to, if the server scopes them.
    #[serde(default)]
    pub view: Option<String>,
    #[serde(default)]
    pub projects: Vec<ProjectStatus>,
}

/// One project (job) and its recent builds, newest first.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectStatus {
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    /// Set by the server for projects that have never run.
    #[serde(default, rename = "notYetBuild")]
    pub not_yet_built: bool,
    #[serde(default)]
    pub builds: Vec<Build>,
}

impl ProjectStatus {
    /// The most recent build, if any.
    pub fn latest_build(&self) -> Option<&Build> {
        self.builds.first()
    }
}

// ---------------------------------------------------------------------------
// Builds
// ---------------------------------------------------------------------------

/// One execution record of a CI job.
#[derive(Debug, Clone, Deserialize)]
pub struct Build {
    pub number: u32,
    /// Start instant, milliseconds since the epoch.
    #[serde(default)]
    pub timestamp: i64,
    /// Run time in milliseconds.
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub result: BuildResult,
    /// Raw trigger records exactly as delivered; interpretation belongs to
    /// the trigger resolver.
    #[serde(default)]
    pub triggers: Vec<Value>,
}

/// Outcome of a build. The server spells these upper-case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildResult {
    #[serde(alias = "SUCCESS")]
    Success,
    #[serde(alias = "FAILURE")]
    Failure,
    #[serde(alias = "UNSTABLE")]
    Unstable,
    #[serde(alias = "ABORTED")]
    Aborted,
    #[default]
    #[serde(alias = "NOT_BUILT", alias = "not_built")]
    NotBuilt,
}

impl fmt::Display for BuildResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::Unstable => write!(f, "unstable"),
            Self::Aborted => write!(f, "aborted"),
            Self::NotBuilt => write!(f, "not_built"),
        }
    }
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Reference to a chart image rendered by the build server.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartRef {
    #[serde(default)]
    pub generated: bool,
    /// Server-side file name of the rendered image.
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default, rename = "imageMap")]
    pub image_map: Option<String>,
    #[serde(default, rename = "imageMapName")]
    pub image_map_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
