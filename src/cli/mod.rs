//! CLI command implementations for glance.
//!
//! Provides subcommand handlers for:
//! - `glance status` — render the build status overview
//! - `glance triggers <file>` — resolve trigger descriptions for a build
//! - `glance health` — check that the build server is reachable
//! - `glance config show|init` — configuration management

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::Value;

use crate::client;
use crate::config::{self, GlanceConfig};
use crate::messages::{keys, Catalog, MessageLookup};
use crate::model::{BuildResult, StatusPayload};
use crate::server::{parse_server, plan_request, Server};
use crate::status::{project_overview, ProjectOverview};
use crate::triggers::describe_triggers;

/// API path of the status endpoint on the build server.
const STATUS_API_PATH: &str = "/api/json";

// ---------------------------------------------------------------------------
// glance status
// ---------------------------------------------------------------------------

/// Show the status overview, fetched from the server or read from a file.
pub fn run_status(file: Option<&Path>, host_override: Option<&str>) -> Result<()> {
    let config = config::load();
    apply_color_preference(&config);
    let server = resolve_server(&config, host_override);

    let payload = match file {
        Some(path) => read_status_file(path)?,
        None => client::fetch_status(&plan_request(&server, STATUS_API_PATH))?,
    };

    if payload.projects.is_empty() {
        println!("{}", "No projects in the status payload.".yellow());
        return Ok(());
    }

    if let Some(view) = &payload.view {
        println!("{}", view.bold().cyan());
        println!();
    }

    for project in &payload.projects {
        let overview = project_overview(
            &server,
            project,
            &Catalog,
            &config.display.date_format,
        );
        print_project(&overview);
    }

    println!(
        "{}: {}",
        Catalog.message(keys::STATUS_CONNECTED_TO).dimmed(),
        server.host
    );
    Ok(())
}

fn print_project(overview: &ProjectOverview) {
    let mut lines = overview.lines.iter();
    if let Some(header) = lines.next() {
        println!("{}", colorize_header(header, overview.result));
    }
    for line in lines {
        println!("{line}");
    }
    println!();
}

fn colorize_header(header: &str, result: Option<BuildResult>) -> String {
    match result {
        Some(BuildResult::Success) => header.green().to_string(),
        Some(BuildResult::Failure) => header.red().to_string(),
        Some(BuildResult::Unstable) => header.yellow().to_string(),
        Some(BuildResult::Aborted) => header.magenta().to_string(),
        Some(BuildResult::NotBuilt) | None => header.dimmed().to_string(),
    }
}

fn read_status_file(path: &Path) -> Result<StatusPayload> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("{} is not a status payload", path.display()))
}

// ---------------------------------------------------------------------------
// glance triggers
// ---------------------------------------------------------------------------

/// Print the resolved trigger descriptions for a build JSON file.
///
/// The file may hold a full build object (its `triggers` field is used) or
/// a bare array of trigger records.
pub fn run_triggers(path: &Path) -> Result<()> {
    let config = config::load();
    apply_color_preference(&config);
    let server = resolve_server(&config, None);

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    let records = extract_trigger_records(&value)
        .with_context(|| format!("{} holds neither a build nor a trigger array", path.display()))?;

    println!("{}", "Build triggers".bold().cyan());
    for description in describe_triggers(&server, records, &Catalog) {
        println!("  - {description}");
    }
    Ok(())
}

fn extract_trigger_records(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Array(records) => Some(records),
        Value::Object(fields) => match fields.get("triggers") {
            Some(Value::Array(records)) => Some(records),
            _ => None,
        },
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// glance health
// ---------------------------------------------------------------------------

/// Probe the configured build server and report reachability.
pub fn run_health() -> Result<()> {
    let config = config::load();
    apply_color_preference(&config);
    let server = resolve_server(&config, None);
    let plan = plan_request(&server, STATUS_API_PATH);

    println!("{}", "glance health".bold().cyan());
    println!("  server: {}", server.host);
    if server.secured {
        println!("  access: {}", "relayed through the dashboard host".yellow());
        println!("  relay:  {}", plan.url);
    } else {
        println!("  access: direct");
    }

    if client::probe(&plan) {
        println!("  status: {}", "reachable".green());
    } else {
        println!("  status: {}", "unreachable".red());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// glance config
// ---------------------------------------------------------------------------

/// Print the fully resolved configuration.
pub fn run_config_show() -> Result<()> {
    let config = config::load();
    println!("{}", "Resolved configuration".bold().cyan());
    let rendered = toml::to_string_pretty(&config).context("failed to render configuration")?;
    println!("{rendered}");

    if let Some(path) = config::global_config_path() {
        let marker = if path.exists() { "present" } else { "absent" };
        println!("global config: {} ({marker})", path.display());
    }
    if let Some(path) = config::project_config_path() {
        let marker = if path.exists() { "present" } else { "absent" };
        println!("project config: {} ({marker})", path.display());
    }
    Ok(())
}

/// Write the default global config file, unless one already exists.
pub fn run_config_init() -> Result<()> {
    let path = config::global_config_path().context("cannot determine the home directory")?;
    if path.exists() {
        println!(
            "{} {}",
            "Config already exists:".yellow(),
            path.display()
        );
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&path, config::default_toml())
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("{} {}", "Wrote".green(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn resolve_server(config: &GlanceConfig, host_override: Option<&str>) -> Server {
    let host = host_override.unwrap_or(&config.server.host);
    parse_server(&config.server.base_url, host)
}

fn apply_color_preference(config: &GlanceConfig) {
    if !config.display.color {
        colored::control::set_override(false);
    }
}
