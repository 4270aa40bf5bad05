use serde::Serialize;
use std::fmt;

/// API resources covered by the smoke run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Motos,
    Beacons,
    Localizacoes,
}

impl Resource {
    pub const ALL: [Resource; 3] = [Resource::Motos, Resource::Beacons, Resource::Localizacoes];

    pub const fn collection_path(self) -> &'static str {
        match self {
            Self::Motos => "/api/motos",
            Self::Beacons => "/api/beacons",
            Self::Localizacoes => "/api/localizacoes",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Motos => "Motos",
            Self::Beacons => "Beacons",
            Self::Localizacoes => "Localizacoes",
        }
    }

    pub fn item_path(self, id: u64) -> String {
        format!("{}/{}", self.collection_path(), id)
    }
}

/// Accepted status codes for a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    Status(u16),
    AnyOf(Vec<u16>),
}

impl Expectation {
    pub fn matches(&self, status: u16) -> bool {
        match self {
            Self::Status(expected) => *expected == status,
            Self::AnyOf(codes) => codes.contains(&status),
        }
    }

    pub fn description(&self) -> String {
        match self {
            Self::Status(expected) => expected.to_string(),
            Self::AnyOf(codes) => codes
                .iter()
                .map(u16::to_string)
                .collect::<Vec<_>>()
                .join(" or "),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckKind {
    /// Passes when login produced a session. Never skipped.
    TokenPresent,
    /// Authenticated GET; skipped when there is no session.
    Get { path: String, expect: Expectation },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSpec {
    pub order: u32,
    pub name: String,
    pub kind: CheckKind,
}

impl CheckSpec {
    pub fn requires_session(&self) -> bool {
        matches!(self.kind, CheckKind::Get { .. })
    }
}

/// The fixed check sequence: token presence, then list + by-id for each resource.
pub fn default_plan(resource_id: u64) -> Vec<CheckSpec> {
    let mut plan = Vec::with_capacity(1 + 2 * Resource::ALL.len());
    plan.push(CheckSpec {
        order: 1,
        name: "Auth | should authenticate and return a token".to_string(),
        kind: CheckKind::TokenPresent,
    });

    for resource in Resource::ALL {
        let next = plan.len() as u32 + 1;
        plan.push(CheckSpec {
            order: next,
            name: format!("{} | should list all (200)", resource.label()),
            kind: CheckKind::Get {
                path: resource.collection_path().to_string(),
                expect: Expectation::Status(200),
            },
        });
        plan.push(CheckSpec {
            order: next + 1,
            name: format!("{} | should fetch by id (200 or 404)", resource.label()),
            kind: CheckKind::Get {
                path: resource.item_path(resource_id),
                expect: Expectation::AnyOf(vec![200, 404]),
            },
        });
    }
    plan
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum CheckOutcome {
    Passed,
    Failed(String),
    Skipped(String),
}

impl CheckOutcome {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Passed => "PASS",
            Self::Failed(_) => "FAIL",
            Self::Skipped(_) => "SKIP",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub order: u32,
    pub name: String,
    pub status: Option<u16>,
    pub elapsed_ms: u64,
    pub outcome: CheckOutcome,
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}. {}", self.outcome.tag(), self.order, self.name)?;
        match &self.outcome {
            CheckOutcome::Passed => Ok(()),
            CheckOutcome::Failed(reason) | CheckOutcome::Skipped(reason) => {
                write!(f, " - {reason}")
            }
        }
    }
}
