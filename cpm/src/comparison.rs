use std::fmt;

use hashbrown::HashMap;
use project_data::structs::Scenario;
use serde::{Deserialize, Serialize};

use crate::schedule::Schedule;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub variable: String,
    /// One value per scenario, in the comparison's scenario order.
    pub values: Vec<f64>,
}

/// Solver variable tables of several scenarios joined on variable name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub scenarios: Vec<Scenario>,
    pub makespans: Vec<f64>,
    pub rows: Vec<ComparisonRow>,
}

impl ScenarioComparison {
    /// Inner join: a variable missing from any schedule is dropped. Rows keep
    /// the order of the first schedule's variable table.
    pub fn merge(results: &[(Scenario, &Schedule)]) -> Self {
        let scenarios = results.iter().map(|(scenario, _)| *scenario).collect();
        let makespans = results
            .iter()
            .map(|(_, schedule)| schedule.makespan())
            .collect();

        let tables: Vec<HashMap<String, f64>> = results
            .iter()
            .map(|(_, schedule)| {
                schedule
                    .variables()
                    .into_iter()
                    .map(|v| (v.name, v.value))
                    .collect()
            })
            .collect();

        let rows = match results.first() {
            Some((_, first)) => first
                .variables()
                .into_iter()
                .filter_map(|variable| {
                    let values: Option<Vec<f64>> = tables
                        .iter()
                        .map(|table| table.get(&variable.name).copied())
                        .collect();

                    values.map(|values| ComparisonRow {
                        variable: variable.name,
                        values,
                    })
                })
                .collect(),
            None => vec![],
        };

        Self {
            scenarios,
            makespans,
            rows,
        }
    }

    pub fn column_names(&self) -> Vec<String> {
        self.scenarios
            .iter()
            .map(|scenario| format!("Value_{}", scenario.name()))
            .collect()
    }

    pub fn row(&self, variable: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|row| row.variable == variable)
    }
}

impl fmt::Display for ScenarioComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self.column_names();
        let name_width = self
            .rows
            .iter()
            .map(|row| row.variable.len())
            .chain(std::iter::once("Variable".len()))
            .max()
            .unwrap_or_default();

        write!(f, "{:<name_width$}", "Variable")?;
        for column in &columns {
            write!(f, "  {column:>18}")?;
        }
        writeln!(f)?;

        for row in &self.rows {
            write!(f, "{:<name_width$}", row.variable)?;
            for value in &row.values {
                write!(f, "  {value:>18.2}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use project_data::structs::Scenario;

    use super::ScenarioComparison;
    use crate::schedule::{Schedule, ScheduledActivity};

    fn schedule(entries: &[(&str, f64, f64)]) -> Schedule {
        Schedule::new(
            entries
                .iter()
                .map(|(code, start, end)| ScheduledActivity {
                    code: code.to_string(),
                    duration: end - start,
                    start: *start,
                    end: *end,
                })
                .collect(),
        )
    }

    #[test]
    fn merge_joins_on_variable_name() {
        let best = schedule(&[("A", 0.0, 4.0), ("B", 4.0, 6.0)]);
        let worst = schedule(&[("A", 0.0, 6.0), ("B", 6.0, 9.0)]);

        let comparison = ScenarioComparison::merge(&[
            (Scenario::Optimistic, &best),
            (Scenario::Pessimistic, &worst),
        ]);

        assert_eq!(
            comparison.column_names(),
            ["Value_Optimistic", "Value_Pessimistic"]
        );
        assert_eq!(comparison.makespans, [6.0, 9.0]);
        assert_eq!(comparison.rows.len(), 4);
        assert_eq!(comparison.rows[0].variable, "end_A");
        assert_eq!(comparison.row("start_B").unwrap().values, [4.0, 6.0]);
    }

    #[test]
    fn merge_drops_unmatched_variables() {
        let left = schedule(&[("A", 0.0, 1.0), ("B", 1.0, 2.0)]);
        let right = schedule(&[("A", 0.0, 2.0)]);

        let comparison =
            ScenarioComparison::merge(&[(Scenario::Expected, &left), (Scenario::Pessimistic, &right)]);

        let variables: Vec<&str> = comparison.rows.iter().map(|r| r.variable.as_str()).collect();
        assert_eq!(variables, ["end_A", "start_A"]);
    }

    #[test]
    fn merge_of_nothing_is_empty() {
        let comparison = ScenarioComparison::merge(&[]);

        assert!(comparison.rows.is_empty());
        assert!(comparison.scenarios.is_empty());
    }

    #[test]
    fn renders_aligned_table() {
        let only = schedule(&[("A", 0.0, 4.25)]);
        let comparison = ScenarioComparison::merge(&[(Scenario::Optimistic, &only)]);

        let rendered = comparison.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Variable"));
        assert!(lines[0].ends_with("Value_Optimistic"));
        assert!(lines[1].starts_with("end_A"));
        assert!(lines[1].ends_with("4.25"));
    }
}
