//! Status overview rendering — projects and builds as display lines.
//!
//! Computes plain display strings from the status payload; printing (and
//! coloring) is the CLI's job, embedding hosts can place the lines however
//! they like.

use crate::format::{format_duration, Timestamp};
use crate::messages::{keys, MessageLookup};
use crate::model::{BuildResult, ChartRef, ProjectStatus};
use crate::server::Server;
use crate::triggers::describe_triggers;

// ---------------------------------------------------------------------------
// Project overviews
// ---------------------------------------------------------------------------

/// Display block for one project.
#[derive(Debug, Clone)]
pub struct ProjectOverview {
    /// Result of the latest build; `None` for never-built projects.
    pub result: Option<BuildResult>,
    pub lines: Vec<String>,
}

/// Render one project's overview block.
pub fn project_overview(
    server: &Server,
    project: &ProjectStatus,
    messages: &dyn MessageLookup,
    date_format: &str,
) -> ProjectOverview {
    let latest = if project.not_yet_built {
        None
    } else {
        project.latest_build()
    };

    match latest {
        Some(build) => {
            let mut lines = vec![format!(
                "{} #{} [{}]",
                project.name, build.number, build.result
            )];
            let ran = Timestamp::from_millis_local(build.timestamp)
                .map(|t| t.format(date_format))
                .unwrap_or_default();
            let triggers = describe_triggers(server, &build.triggers, messages).join(", ");
            lines.push(format!(
                "  {} | {}",
                messages.format(keys::STATUS_RAN, &[&ran]),
                triggers
            ));
            lines.push(format!(
                "  {}",
                messages.format(keys::STATUS_TOOK, &[&format_duration(build.duration)])
            ));
            ProjectOverview {
                result: Some(build.result),
                lines,
            }
        }
        None => ProjectOverview {
            result: None,
            lines: vec![
                project.name.clone(),
                format!("  {}", messages.message(keys::STATUS_NOT_BUILT)),
            ],
        },
    }
}

/// Render the whole overview: one block per project plus the footer naming
/// the connected server.
pub fn render_overview(
    server: &Server,
    projects: &[ProjectStatus],
    messages: &dyn MessageLookup,
    date_format: &str,
) -> Vec<String> {
    let mut lines = Vec::new();
    for project in projects {
        lines.extend(project_overview(server, project, messages, date_format).lines);
    }
    lines.push(format!(
        "{}: {}",
        messages.message(keys::STATUS_CONNECTED_TO),
        server.host
    ));
    lines
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// A chart reference resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartView {
    /// A rendered image served by the dashboard host.
    Image {
        url: String,
        width: u32,
        height: u32,
        map_name: Option<String>,
    },
    /// The chart was not generated; holds the display message.
    Error(String),
}

/// Resolve a chart reference against the dashboard host.
pub fn resolve_chart(base_url: &str, chart: &ChartRef, messages: &dyn MessageLookup) -> ChartView {
    if chart.generated {
        ChartView::Image {
            url: format!("{}/charts?filename={}", base_url, chart.location),
            width: chart.width,
            height: chart.height,
            map_name: chart.image_map_name.clone(),
        }
    } else {
        ChartView::Error(messages.message(keys::CHART_NOT_GENERATED))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Catalog;
    use crate::server::parse_server;
    use serde_json::json;

    fn server() -> Server {
        parse_server("https://tracker.example.org", "https://ci.example.org")
    }

    fn built_project() -> ProjectStatus {
        serde_json::from_value(json!({
            "name": "gadget",
            "url": "job/gadget/",
            "builds": [{
                "number": 42,
                "timestamp": 1215500704000i64,
                "duration": 90000,
                "result": "SUCCESS",
                "triggers": [{"type": "SCMTrigger"}]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn built_project_block_has_header_ran_and_took_lines() {
        let overview = project_overview(&server(), &built_project(), &Catalog, "Y-m-d");
        assert_eq!(overview.result, Some(BuildResult::Success));
        assert_eq!(overview.lines.len(), 3);
        assert_eq!(overview.lines[0], "gadget #42 [success]");
        assert!(overview.lines[1].contains("Ran "));
        assert!(overview.lines[1].contains("Started by an SCM change"));
        assert_eq!(overview.lines[2], "  Took 2 min 30 sec");
    }

    #[test]
    fn never_built_project_shows_the_not_built_message() {
        let project: ProjectStatus =
            serde_json::from_value(json!({"name": "fresh", "notYetBuild": true})).unwrap();
        let overview = project_overview(&server(), &project, &Catalog, "Y-m-d");
        assert_eq!(overview.result, None);
        assert_eq!(
            overview.lines,
            vec![
                "fresh".to_string(),
                "  This project has not been built yet".to_string(),
            ]
        );
    }

    #[test]
    fn project_without_builds_is_treated_as_never_built() {
        let project: ProjectStatus = serde_json::from_value(json!({"name": "bare"})).unwrap();
        let overview = project_overview(&server(), &project, &Catalog, "Y-m-d");
        assert_eq!(overview.result, None);
        assert!(overview.lines[1].contains("not been built"));
    }

    #[test]
    fn overview_ends_with_the_footer() {
        let lines = render_overview(&server(), &[built_project()], &Catalog, "Y-m-d");
        assert_eq!(
            lines.last().map(String::as_str),
            Some("Connected to: https://ci.example.org")
        );
    }

    #[test]
    fn generated_chart_resolves_to_an_image() {
        let chart: ChartRef = serde_json::from_value(json!({
            "generated": true,
            "location": "trend.png",
            "width": 350,
            "height": 200
        }))
        .unwrap();
        let view = resolve_chart("https://tracker.example.org", &chart, &Catalog);
        assert_eq!(
            view,
            ChartView::Image {
                url: "https://tracker.example.org/charts?filename=trend.png".to_string(),
                width: 350,
                height: 200,
                map_name: None,
            }
        );
    }

    #[test]
    fn ungenerated_chart_resolves_to_the_error_message() {
        let chart: ChartRef = serde_json::from_value(json!({"generated": false})).unwrap();
        let view = resolve_chart("https://tracker.example.org", &chart, &Catalog);
        assert_eq!(
            view,
            ChartView::Error("The chart has not been generated on the build server".to_string())
        );
    }
}
