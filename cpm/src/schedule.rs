use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledActivity {
    pub code: String,
    pub duration: f64,
    pub start: f64,
    pub end: f64,
}

/// Start/end times of every activity, in declaration order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schedule {
    activities: Vec<ScheduledActivity>,
}

/// One solver variable and its value, e.g. `start_D4 = 17.85`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableValue {
    pub name: String,
    pub value: f64,
}

impl Schedule {
    pub fn new(activities: Vec<ScheduledActivity>) -> Self {
        Self { activities }
    }

    pub fn get(&self, code: &str) -> Option<&ScheduledActivity> {
        self.activities.iter().find(|a| a.code == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledActivity> {
        self.activities.iter()
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Project completion time, 0 for an empty schedule.
    pub fn makespan(&self) -> f64 {
        self.activities
            .iter()
            .map(|a| a.end)
            .fold(0.0, f64::max)
    }

    /// Activities starting at time 0.
    pub fn starting_at_zero(&self, tolerance: f64) -> Vec<&ScheduledActivity> {
        self.activities
            .iter()
            .filter(|a| a.start.abs() <= tolerance)
            .collect()
    }

    /// Activities whose end time is the makespan.
    pub fn ending_at_makespan(&self, tolerance: f64) -> Vec<&ScheduledActivity> {
        let makespan = self.makespan();
        self.activities
            .iter()
            .filter(|a| (makespan - a.end).abs() <= tolerance)
            .collect()
    }

    /// `start_<code>` and `end_<code>` for every activity, sorted by name.
    pub fn variables(&self) -> Vec<VariableValue> {
        let mut variables: Vec<VariableValue> = self
            .activities
            .iter()
            .flat_map(|a| {
                [
                    VariableValue {
                        name: format!("start_{}", a.code),
                        value: a.start,
                    },
                    VariableValue {
                        name: format!("end_{}", a.code),
                        value: a.end,
                    },
                ]
            })
            .collect();

        variables.sort_by(|a, b| a.name.cmp(&b.name));
        variables
    }
}

#[cfg(test)]
mod tests {
    use super::{Schedule, ScheduledActivity};

    fn activity(code: &str, start: f64, end: f64) -> ScheduledActivity {
        ScheduledActivity {
            code: code.to_string(),
            duration: end - start,
            start,
            end,
        }
    }

    fn sample() -> Schedule {
        Schedule::new(vec![
            activity("A", 0.0, 5.0),
            activity("B", 0.0, 8.0),
            activity("C", 5.0, 11.0),
            activity("E", 11.0, 35.0),
        ])
    }

    #[test]
    fn makespan_is_latest_end() {
        assert_eq!(sample().makespan(), 35.0);
        assert_eq!(Schedule::default().makespan(), 0.0);
    }

    #[test]
    fn announcements() {
        let schedule = sample();

        let starting: Vec<&str> = schedule
            .starting_at_zero(1e-9)
            .into_iter()
            .map(|a| a.code.as_str())
            .collect();
        assert_eq!(starting, ["A", "B"]);

        let ending: Vec<&str> = schedule
            .ending_at_makespan(1e-9)
            .into_iter()
            .map(|a| a.code.as_str())
            .collect();
        assert_eq!(ending, ["E"]);
    }

    #[test]
    fn variables_are_sorted_by_name() {
        let names: Vec<String> = sample().variables().into_iter().map(|v| v.name).collect();

        assert_eq!(
            names,
            [
                "end_A", "end_B", "end_C", "end_E", "start_A", "start_B", "start_C", "start_E"
            ]
        );
    }

    #[test]
    fn lookup_by_code() {
        let schedule = sample();

        assert_eq!(schedule.get("C").map(|a| a.start), Some(5.0));
        assert!(schedule.get("Z").is_none());
        assert_eq!(schedule.len(), 4);
    }
}
