// Activity data for the client proposal project.
// Everything is compiled in, there is no runtime input format.

use hashbrown::HashSet;
use structs::{
    ActivityDuration, ActivityLabel, PrecedenceRelation, ProjectDefinition, Scenario,
    ScenarioDurations,
};
use thiserror::Error;

pub mod structs;

#[derive(Debug, Error, PartialEq)]
pub enum ProjectDataError {
    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),
    #[error("Duplicate activity: {0}")]
    DuplicateActivity(String),
    #[error("Activity {activity} references unknown prerequisite {prerequisite}")]
    UnknownPrerequisite {
        activity: String,
        prerequisite: String,
    },
    #[error("Activity {activity} has invalid duration {duration} in the {scenario} scenario")]
    InvalidDuration {
        activity: String,
        scenario: Scenario,
        duration: f64,
    },
    #[error("Activity {activity} in the {scenario} scenario is not declared")]
    UndeclaredActivity { activity: String, scenario: Scenario },
    #[error("Activity {activity} has no duration in the {scenario} scenario")]
    MissingDuration { activity: String, scenario: Scenario },
    #[error("No durations defined for the {0} scenario")]
    MissingScenario(Scenario),
}

struct ActivityRow {
    code: &'static str,
    label: &'static str,
    optimistic: f64,
    expected: f64,
    pessimistic: f64,
    prerequisites: &'static [&'static str],
}

/// Declaration order is the display order of every table and chart.
static PROPOSAL_ACTIVITIES: [ActivityRow; 16] = [
    ActivityRow {
        code: "A",
        label: "Describe product",
        optimistic: 4.25,
        expected: 5.0,
        pessimistic: 5.75,
        prerequisites: &[],
    },
    ActivityRow {
        code: "B",
        label: "Develop marketing strategy",
        optimistic: 6.8,
        expected: 8.0,
        pessimistic: 9.2,
        prerequisites: &[],
    },
    ActivityRow {
        code: "C",
        label: "Design brochure",
        optimistic: 5.1,
        expected: 6.0,
        pessimistic: 6.9,
        prerequisites: &["A"],
    },
    ActivityRow {
        code: "D",
        label: "Develop product prototype",
        optimistic: 0.0,
        expected: 0.0,
        pessimistic: 0.0,
        prerequisites: &[],
    },
    ActivityRow {
        code: "D1",
        label: "Requirements analysis",
        optimistic: 6.8,
        expected: 8.0,
        pessimistic: 9.2,
        prerequisites: &["A"],
    },
    ActivityRow {
        code: "D2",
        label: "Software design",
        optimistic: 6.8,
        expected: 8.0,
        pessimistic: 9.2,
        prerequisites: &["D1"],
    },
    ActivityRow {
        code: "D3",
        label: "System design",
        optimistic: 6.8,
        expected: 8.0,
        pessimistic: 9.2,
        prerequisites: &["D1"],
    },
    ActivityRow {
        code: "D4",
        label: "Coding",
        optimistic: 40.8,
        expected: 48.0,
        pessimistic: 55.2,
        prerequisites: &["D2", "D3"],
    },
    ActivityRow {
        code: "D5",
        label: "Write documentation",
        optimistic: 6.8,
        expected: 8.0,
        pessimistic: 9.2,
        prerequisites: &["D4"],
    },
    ActivityRow {
        code: "D6",
        label: "Unit testing",
        optimistic: 13.6,
        expected: 16.0,
        pessimistic: 18.4,
        prerequisites: &["D4"],
    },
    ActivityRow {
        code: "D7",
        label: "System testing",
        optimistic: 13.6,
        expected: 16.0,
        pessimistic: 18.4,
        prerequisites: &["D6"],
    },
    ActivityRow {
        code: "D8",
        label: "Package deliverables",
        optimistic: 6.8,
        expected: 8.0,
        pessimistic: 9.2,
        prerequisites: &["D5", "D7"],
    },
    ActivityRow {
        code: "E",
        label: "Survey potential market",
        optimistic: 20.4,
        expected: 24.0,
        pessimistic: 27.6,
        prerequisites: &["B", "C"],
    },
    ActivityRow {
        code: "F",
        label: "Develop pricing plan",
        optimistic: 10.2,
        expected: 12.0,
        pessimistic: 13.8,
        prerequisites: &["D8", "E"],
    },
    ActivityRow {
        code: "G",
        label: "Develop implementation plan",
        optimistic: 13.6,
        expected: 16.0,
        pessimistic: 18.4,
        prerequisites: &["A", "D8"],
    },
    ActivityRow {
        code: "H",
        label: "Write client proposal",
        optimistic: 6.8,
        expected: 8.0,
        pessimistic: 9.2,
        prerequisites: &["F", "G"],
    },
];

impl ActivityRow {
    fn duration(&self, scenario: Scenario) -> f64 {
        match scenario {
            Scenario::Optimistic => self.optimistic,
            Scenario::Expected => self.expected,
            Scenario::Pessimistic => self.pessimistic,
        }
    }
}

/// The 16 activity client proposal project with all three scenarios.
pub fn proposal_project() -> ProjectDefinition {
    let labels = PROPOSAL_ACTIVITIES
        .iter()
        .map(|row| ActivityLabel {
            code: row.code.to_string(),
            label: row.label.to_string(),
        })
        .collect();

    let precedence_relations = PROPOSAL_ACTIVITIES
        .iter()
        .map(|row| PrecedenceRelation {
            code: row.code.to_string(),
            prerequisites: row.prerequisites.iter().map(|p| p.to_string()).collect(),
        })
        .collect();

    let scenarios = Scenario::ALL
        .iter()
        .map(|&scenario| ScenarioDurations {
            scenario,
            durations: PROPOSAL_ACTIVITIES
                .iter()
                .map(|row| ActivityDuration {
                    code: row.code.to_string(),
                    duration: row.duration(scenario),
                })
                .collect(),
        })
        .collect();

    ProjectDefinition {
        name: "Client proposal".to_string(),
        labels,
        precedence_relations,
        scenarios,
    }
}

impl ProjectDefinition {
    pub fn durations(&self, scenario: Scenario) -> Result<&[ActivityDuration], ProjectDataError> {
        self.scenarios
            .iter()
            .find(|s| s.scenario == scenario)
            .map(|s| s.durations.as_slice())
            .ok_or(ProjectDataError::MissingScenario(scenario))
    }

    /// Display name of an activity, falling back to its code.
    pub fn label<'a>(&'a self, code: &'a str) -> &'a str {
        self.labels
            .iter()
            .find(|l| l.code == code)
            .map(|l| l.label.as_str())
            .unwrap_or(code)
    }

    /// Checks that every scenario covers exactly the declared activities with
    /// usable durations and that every prerequisite is declared.
    pub fn validate(&self) -> Result<(), ProjectDataError> {
        let mut codes = HashSet::new();
        for relation in &self.precedence_relations {
            if !codes.insert(relation.code.as_str()) {
                return Err(ProjectDataError::DuplicateActivity(relation.code.clone()));
            }
        }

        for relation in &self.precedence_relations {
            if let Some(prerequisite) = relation
                .prerequisites
                .iter()
                .find(|p| !codes.contains(p.as_str()))
            {
                return Err(ProjectDataError::UnknownPrerequisite {
                    activity: relation.code.clone(),
                    prerequisite: prerequisite.clone(),
                });
            }
        }

        for scenario in Scenario::ALL {
            let durations = self.durations(scenario)?;

            for duration in durations {
                if !codes.contains(duration.code.as_str()) {
                    return Err(ProjectDataError::UndeclaredActivity {
                        activity: duration.code.clone(),
                        scenario,
                    });
                }
                if !duration.duration.is_finite() || duration.duration < 0.0 {
                    return Err(ProjectDataError::InvalidDuration {
                        activity: duration.code.clone(),
                        scenario,
                        duration: duration.duration,
                    });
                }
            }

            if let Some(missing) = self
                .precedence_relations
                .iter()
                .find(|r| !durations.iter().any(|d| d.code == r.code))
            {
                return Err(ProjectDataError::MissingDuration {
                    activity: missing.code.clone(),
                    scenario,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        proposal_project,
        structs::{ActivityDuration, Scenario},
        ProjectDataError,
    };

    #[test]
    fn proposal_project_is_valid() {
        let project = proposal_project();

        assert_eq!(project.precedence_relations.len(), 16);
        assert_eq!(project.labels.len(), 16);
        assert_eq!(project.scenarios.len(), 3);
        assert!(project.validate().is_ok());
    }

    #[test]
    fn declaration_order_is_kept() {
        let project = proposal_project();
        let codes: Vec<&str> = project
            .precedence_relations
            .iter()
            .map(|r| r.code.as_str())
            .collect();

        assert_eq!(
            codes,
            [
                "A", "B", "C", "D", "D1", "D2", "D3", "D4", "D5", "D6", "D7", "D8", "E", "F", "G",
                "H"
            ]
        );
    }

    #[test]
    fn scenario_durations() {
        let project = proposal_project();

        let optimistic = project.durations(Scenario::Optimistic).unwrap();
        assert_eq!(optimistic[0].code, "A");
        assert_eq!(optimistic[0].duration, 4.25);

        let pessimistic = project.durations(Scenario::Pessimistic).unwrap();
        let coding = pessimistic.iter().find(|d| d.code == "D4").unwrap();
        assert_eq!(coding.duration, 55.2);
    }

    #[test]
    fn labels_fall_back_to_code() {
        let project = proposal_project();

        assert_eq!(project.label("D4"), "Coding");
        assert_eq!(project.label("Z"), "Z");
    }

    #[test]
    fn scenario_parsing() {
        assert_eq!("best".parse::<Scenario>(), Ok(Scenario::Optimistic));
        assert_eq!("Expected".parse::<Scenario>(), Ok(Scenario::Expected));
        assert_eq!(" WORST ".parse::<Scenario>(), Ok(Scenario::Pessimistic));
        assert_eq!(
            "likely".parse::<Scenario>(),
            Err(ProjectDataError::UnknownScenario("likely".to_string()))
        );
    }

    #[test]
    fn unknown_prerequisite_fails_validation() {
        let mut project = proposal_project();
        project.precedence_relations[0]
            .prerequisites
            .push("Z".to_string());

        assert_eq!(
            project.validate(),
            Err(ProjectDataError::UnknownPrerequisite {
                activity: "A".to_string(),
                prerequisite: "Z".to_string(),
            })
        );
    }

    #[test]
    fn negative_duration_fails_validation() {
        let mut project = proposal_project();
        project.scenarios[1].durations[2] = ActivityDuration {
            code: "C".to_string(),
            duration: -1.0,
        };

        assert!(matches!(
            project.validate(),
            Err(ProjectDataError::InvalidDuration { scenario: Scenario::Expected, .. })
        ));
    }

    #[test]
    fn missing_duration_fails_validation() {
        let mut project = proposal_project();
        project.scenarios[2].durations.pop();

        assert_eq!(
            project.validate(),
            Err(ProjectDataError::MissingDuration {
                activity: "H".to_string(),
                scenario: Scenario::Pessimistic,
            })
        );
    }
}
