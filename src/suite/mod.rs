pub mod run;

use serde::Serialize;
use std::fmt;
use std::time::Instant;
use tracing::{info, instrument};

use crate::auth;
use crate::checks::{default_plan, CheckOutcome, CheckResult};
use crate::config::Settings;
use crate::errors::Result;
use crate::http::ApiClient;

/// Outcome of a whole run. Only produced when setup succeeded, so a
/// `Report` always implies a token was acquired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub results: Vec<CheckResult>,
}

impl Report {
    pub fn new(results: Vec<CheckResult>) -> Self {
        Self { results }
    }

    fn count(&self, pred: impl Fn(&CheckOutcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }

    pub fn passed(&self) -> usize {
        self.count(|o| matches!(o, CheckOutcome::Passed))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, CheckOutcome::Failed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, CheckOutcome::Skipped(_)))
    }

    /// True when nothing failed. Skipped checks do not count as failures.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in &self.results {
            writeln!(f, "{result}")?;
        }
        write!(
            f,
            "{} checks: {} passed, {} failed, {} skipped",
            self.results.len(),
            self.passed(),
            self.failed(),
            self.skipped()
        )
    }
}

/// Setup (login) then the default check plan.
///
/// A login failure is returned as an error and no check runs.
#[instrument(skip_all, fields(base_url = %settings.base_url))]
pub async fn run_suite(settings: &Settings) -> Result<Report> {
    let t0 = Instant::now();
    let client = ApiClient::new(settings.timeout)?;

    let session = auth::login(&client, settings).await?;

    let plan = default_plan(settings.resource_id);
    let results = run::run_checks(&client, settings, Some(&session), &plan).await;
    let report = Report::new(results);

    info!(
        passed = report.passed(),
        failed = report.failed(),
        skipped = report.skipped(),
        total_ms = t0.elapsed().as_millis() as u64,
        "smoke run finished"
    );
    Ok(report)
}
