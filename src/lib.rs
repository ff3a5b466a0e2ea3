//! glance — build-server status at a glance for issue-tracker dashboards.
//!
//! Turns the JSON a build server's status API delivers into display
//! strings: trigger descriptions, formatted durations and timestamps,
//! per-project build overviews, and chart references. The rendering layer
//! of the embedding dashboard (and the bundled CLI) consume plain strings;
//! nothing here owns presentation state.

pub mod cli;
pub mod client;
pub mod config;
pub mod format;
pub mod messages;
pub mod model;
pub mod server;
pub mod status;
pub mod triggers;
