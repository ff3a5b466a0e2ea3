//! Status API client.
//!
//! Executes a [`RequestPlan`](crate::server::RequestPlan) against the build
//! server (or the dashboard host's relay) using the synchronous `ureq`
//! client and decodes the JSON status payload.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::model::StatusPayload;
use crate::server::RequestPlan;

/// Timeout for status fetches.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Short timeout for the health probe so `glance health` never stalls.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Fetch and decode the status payload described by the plan.
pub fn fetch_status(plan: &RequestPlan) -> Result<StatusPayload> {
    let mut request = ureq::get(&plan.url).timeout(REQUEST_TIMEOUT);
    for (key, value) in &plan.params {
        request = request.query(key, value);
    }

    let response = request
        .call()
        .with_context(|| format!("status request to {} failed", plan.url))?;
    response
        .into_json()
        .context("failed to decode status payload")
}

/// Check whether the planned endpoint is reachable at all.
pub fn probe(plan: &RequestPlan) -> bool {
    let mut request = ureq::get(&plan.url).timeout(PROBE_TIMEOUT);
    for (key, value) in &plan.params {
        request = request.query(key, value);
    }
    request.call().is_ok()
}
