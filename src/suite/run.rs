use std::time::Instant;

use tracing::{info, instrument, warn};

use crate::{
    auth::Session,
    checks::{CheckKind, CheckOutcome, CheckResult, CheckSpec},
    config::Settings,
    http::ApiClient,
};

const NO_TOKEN: &str = "no token, check skipped";

/// Execute `plan` in order, one request at a time.
///
/// Every check runs regardless of earlier failures. With no session, every
/// authenticated check is skipped and the token check fails.
#[instrument(skip_all, fields(checks = plan.len(), authenticated = session.is_some()))]
pub async fn run_checks(
    client: &ApiClient,
    settings: &Settings,
    session: Option<&Session>,
    plan: &[CheckSpec],
) -> Vec<CheckResult> {
    let mut results = Vec::with_capacity(plan.len());
    for check in plan {
        let result = run_check(client, settings, session, check).await;
        match &result.outcome {
            CheckOutcome::Passed => info!(order = check.order, name = %check.name, "check passed"),
            CheckOutcome::Failed(reason) => {
                warn!(order = check.order, name = %check.name, %reason, "check failed")
            }
            CheckOutcome::Skipped(reason) => {
                info!(order = check.order, name = %check.name, %reason, "check skipped")
            }
        }
        results.push(result);
    }
    results
}

pub async fn run_check(
    client: &ApiClient,
    settings: &Settings,
    session: Option<&Session>,
    check: &CheckSpec,
) -> CheckResult {
    let t0 = Instant::now();
    let (status, outcome) = match (&check.kind, session) {
        (CheckKind::TokenPresent, Some(_)) => (None, CheckOutcome::Passed),
        (CheckKind::TokenPresent, None) => {
            (None, CheckOutcome::Failed("token not obtained".to_string()))
        }
        (CheckKind::Get { .. }, None) => (None, CheckOutcome::Skipped(NO_TOKEN.to_string())),
        (CheckKind::Get { path, expect }, Some(session)) => {
            let response = match settings.endpoint(path) {
                Ok(url) => client.get(url, &session.authorization()).await,
                Err(e) => Err(e),
            };
            match response {
                Ok(resp) if expect.matches(resp.status) => {
                    if let Some(items) = resp.item_count() {
                        info!(%path, items, "list payload");
                    }
                    (Some(resp.status), CheckOutcome::Passed)
                }
                Ok(resp) => (
                    Some(resp.status),
                    CheckOutcome::Failed(format!(
                        "expected {}, got {}",
                        expect.description(),
                        resp.status
                    )),
                ),
                Err(e) => (None, CheckOutcome::Failed(format!("request error: {e}"))),
            }
        }
    };

    CheckResult {
        order: check.order,
        name: check.name.clone(),
        status,
        elapsed_ms: t0.elapsed().as_millis() as u64,
        outcome,
    }
}
