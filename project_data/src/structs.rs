use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ProjectDataError;

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDefinition {
    pub name: String,
    // display names
    pub labels: Vec<ActivityLabel>,
    // precedence relations
    pub precedence_relations: Vec<PrecedenceRelation>,
    // durations, one set per scenario
    pub scenarios: Vec<ScenarioDurations>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityLabel {
    pub code: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrecedenceRelation {
    pub code: String,
    pub prerequisites: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityDuration {
    pub code: String,
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioDurations {
    pub scenario: Scenario,
    pub durations: Vec<ActivityDuration>,
}

/// Duration assumption applied to every activity of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Optimistic,
    Expected,
    Pessimistic,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [
        Scenario::Optimistic,
        Scenario::Expected,
        Scenario::Pessimistic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::Optimistic => "Optimistic",
            Scenario::Expected => "Expected",
            Scenario::Pessimistic => "Pessimistic",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = ProjectDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "optimistic" | "best" => Ok(Scenario::Optimistic),
            "expected" => Ok(Scenario::Expected),
            "pessimistic" | "worst" => Ok(Scenario::Pessimistic),
            _ => Err(ProjectDataError::UnknownScenario(s.to_string())),
        }
    }
}
