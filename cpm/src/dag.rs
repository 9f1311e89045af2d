use hashbrown::HashMap;

use log::trace;
use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use project_data::structs::{ActivityDuration, PrecedenceRelation};

use crate::error::ScheduleError;
use crate::schedule::{Schedule, ScheduledActivity};

// Node weights are activity indices, node `i` is activity `i`.
type Graph = DiGraph<usize, ()>;

/// Precedence network of a single scenario.
///
/// Activities keep the order of the duration table. An edge `p -> a` means
/// `a` cannot start before `p` ends.
#[derive(Debug, Clone)]
pub struct Network {
    codes: Vec<String>,
    durations: Vec<f64>,
    graph: Graph,
    code_to_node: HashMap<String, NodeIndex>,
}

impl Network {
    pub fn new(
        durations: &[ActivityDuration],
        precedences: &[PrecedenceRelation],
    ) -> Result<Self, ScheduleError> {
        let mut graph = Graph::with_capacity(durations.len(), durations.len());
        let mut code_to_node = HashMap::with_capacity(durations.len());
        let mut codes = Vec::with_capacity(durations.len());
        let mut activity_durations = Vec::with_capacity(durations.len());

        for duration in durations {
            if !duration.duration.is_finite() || duration.duration < 0.0 {
                return Err(ScheduleError::InvalidDuration {
                    activity: duration.code.clone(),
                    duration: duration.duration,
                });
            }
            if code_to_node.contains_key(&duration.code) {
                return Err(ScheduleError::DuplicateActivity(duration.code.clone()));
            }

            let node = graph.add_node(codes.len());
            code_to_node.insert(duration.code.clone(), node);
            codes.push(duration.code.clone());
            activity_durations.push(duration.duration);
        }

        for relation in precedences {
            let activity = *code_to_node
                .get(&relation.code)
                .ok_or_else(|| ScheduleError::MissingDuration(relation.code.clone()))?;

            for prerequisite in &relation.prerequisites {
                let predecessor = *code_to_node.get(prerequisite).ok_or_else(|| {
                    ScheduleError::UnknownActivity {
                        activity: relation.code.clone(),
                        reference: prerequisite.clone(),
                    }
                })?;

                graph.update_edge(predecessor, activity, ());
            }
        }

        trace!(
            "network with {} activities and {} precedences",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(Self {
            codes,
            durations: activity_durations,
            graph,
            code_to_node,
        })
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn code(&self, index: usize) -> &str {
        &self.codes[index]
    }

    pub fn duration(&self, index: usize) -> f64 {
        self.durations[index]
    }

    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.code_to_node.get(code).map(|node| node.index())
    }

    pub fn predecessors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors_directed(NodeIndex::new(index), Direction::Incoming)
            .map(|node| self.graph[node])
    }

    pub fn successors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors_directed(NodeIndex::new(index), Direction::Outgoing)
            .map(|node| self.graph[node])
    }

    /// All precedences as `(predecessor, activity)` index pairs.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges: Vec<(usize, usize)> = self
            .graph
            .raw_edges()
            .iter()
            .map(|edge| (self.graph[edge.source()], self.graph[edge.target()]))
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Activity indices in an order where every predecessor comes first.
    pub fn topological_order(&self) -> Result<Vec<usize>, ScheduleError> {
        algo::toposort(&self.graph, None)
            .map(|order| order.into_iter().map(|node| self.graph[node]).collect())
            .map_err(|cycle| ScheduleError::Cycle(self.codes[self.graph[cycle.node_id()]].clone()))
    }

    /// Latest time any activity can end: every activity run back to back.
    pub fn horizon(&self) -> f64 {
        self.durations.iter().sum()
    }

    /// Earliest start/finish of every activity.
    ///
    /// Each activity starts at the latest finish among its predecessors, or
    /// at 0 when it has none.
    pub fn forward_pass(&self) -> Result<Schedule, ScheduleError> {
        let mut earliest_finish = vec![0.0_f64; self.len()];
        let mut earliest_start = vec![0.0_f64; self.len()];

        for index in self.topological_order()? {
            let start = self
                .predecessors(index)
                .map(|predecessor| earliest_finish[predecessor])
                .fold(0.0, f64::max);

            earliest_start[index] = start;
            earliest_finish[index] = start + self.durations[index];
        }

        Ok(self.schedule_from(&earliest_start))
    }

    /// Latest start/finish of every activity that still meets `project_end`.
    pub fn backward_pass(&self, project_end: f64) -> Result<Vec<(f64, f64)>, ScheduleError> {
        let mut latest = vec![(project_end, project_end); self.len()];

        let mut order = self.topological_order()?;
        order.reverse();

        for index in order {
            let finish = self
                .successors(index)
                .map(|successor| latest[successor].0)
                .fold(project_end, f64::min);

            latest[index] = (finish - self.durations[index], finish);
        }

        Ok(latest)
    }

    /// Longest duration-weighted chain from a source to a sink activity,
    /// found by enumerating every simple path.
    pub fn longest_path(&self) -> Option<(f64, Vec<String>)> {
        let sources: Vec<NodeIndex> = self
            .graph
            .externals(Direction::Incoming)
            .collect();
        let sinks: Vec<NodeIndex> = self
            .graph
            .externals(Direction::Outgoing)
            .collect();

        let weight = |path: &[NodeIndex]| -> f64 {
            path.iter()
                .map(|node| self.durations[self.graph[*node]])
                .sum()
        };

        let mut paths: Vec<Vec<NodeIndex>> = vec![];
        for &from in &sources {
            for &to in &sinks {
                if from == to {
                    paths.push(vec![from]);
                } else {
                    paths.extend(algo::all_simple_paths::<Vec<_>, _>(
                        &self.graph,
                        from,
                        to,
                        0,
                        None,
                    ));
                }
            }
        }

        paths
            .into_iter()
            .map(|path| (weight(path.as_slice()), path))
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(weight, path)| {
                (
                    weight,
                    path.into_iter()
                        .map(|node| self.codes[self.graph[node]].clone())
                        .collect(),
                )
            })
    }

    /// Builds a schedule from per-activity start times.
    pub(crate) fn schedule_from(&self, starts: &[f64]) -> Schedule {
        Schedule::new(
            self.codes
                .iter()
                .zip(&self.durations)
                .zip(starts)
                .map(|((code, &duration), &start)| ScheduledActivity {
                    code: code.clone(),
                    duration,
                    start,
                    end: start + duration,
                })
                .collect(),
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use project_data::structs::{ActivityDuration, PrecedenceRelation};

    use super::Network;
    use crate::error::ScheduleError;

    pub(crate) fn durations(entries: &[(&str, f64)]) -> Vec<ActivityDuration> {
        entries
            .iter()
            .map(|(code, duration)| ActivityDuration {
                code: code.to_string(),
                duration: *duration,
            })
            .collect()
    }

    pub(crate) fn precedences(entries: &[(&str, &[&str])]) -> Vec<PrecedenceRelation> {
        entries
            .iter()
            .map(|(code, prerequisites)| PrecedenceRelation {
                code: code.to_string(),
                prerequisites: prerequisites.iter().map(|p| p.to_string()).collect(),
            })
            .collect()
    }

    // 1(2) -> {2(3), 3(1)} -> 4(2), plus an unrelated 5(4)
    pub(crate) fn diamond() -> Network {
        Network::new(
            &durations(&[("T1", 2.0), ("T2", 3.0), ("T3", 1.0), ("T4", 2.0), ("T5", 4.0)]),
            &precedences(&[
                ("T1", &[]),
                ("T2", &["T1"]),
                ("T3", &["T1"]),
                ("T4", &["T2", "T3"]),
                ("T5", &[]),
            ]),
        )
        .unwrap()
    }

    #[test]
    fn forward_pass_computes_earliest_times() {
        let schedule = diamond().forward_pass().unwrap();

        let times: Vec<(f64, f64)> = schedule.iter().map(|a| (a.start, a.end)).collect();
        assert_eq!(
            times,
            [(0.0, 2.0), (2.0, 5.0), (2.0, 3.0), (5.0, 7.0), (0.0, 4.0)]
        );
        assert_eq!(schedule.makespan(), 7.0);
    }

    #[test]
    fn backward_pass_computes_latest_times() {
        let latest = diamond().backward_pass(7.0).unwrap();

        assert_eq!(latest[0], (0.0, 2.0));
        assert_eq!(latest[1], (2.0, 5.0));
        assert_eq!(latest[2], (4.0, 5.0));
        assert_eq!(latest[3], (5.0, 7.0));
        assert_eq!(latest[4], (3.0, 7.0));
    }

    #[test]
    fn longest_path_follows_heaviest_chain() {
        let (weight, path) = diamond().longest_path().unwrap();

        assert_eq!(weight, 7.0);
        assert_eq!(path, ["T1", "T2", "T4"]);
    }

    #[test]
    fn horizon_bounds_the_longest_path() {
        let network = diamond();

        assert_eq!(network.horizon(), 12.0);
        let (length, _) = network.longest_path().unwrap();
        assert!(length <= network.horizon());
    }

    #[test]
    fn edges_and_neighbours() {
        let network = diamond();

        assert_eq!(network.edges(), [(0, 1), (0, 2), (1, 3), (2, 3)]);
        let mut predecessors: Vec<usize> = network.predecessors(3).collect();
        predecessors.sort_unstable();
        assert_eq!(predecessors, [1, 2]);
        assert_eq!(network.successors(4).count(), 0);
        assert_eq!(network.index_of("T3"), Some(2));
    }

    #[test]
    fn activities_without_relation_have_no_prerequisites() {
        let network = Network::new(&durations(&[("X", 1.0), ("Y", 2.0)]), &[]).unwrap();

        assert!(network.edges().is_empty());
        assert_eq!(network.forward_pass().unwrap().makespan(), 2.0);
    }

    #[test]
    fn cycle_is_detected() {
        let network = Network::new(
            &durations(&[("X", 1.0), ("Y", 1.0), ("Z", 1.0)]),
            &precedences(&[("X", &["Z"]), ("Y", &["X"]), ("Z", &["Y"])]),
        )
        .unwrap();

        assert!(matches!(
            network.topological_order(),
            Err(ScheduleError::Cycle(_))
        ));
        assert!(matches!(
            network.forward_pass(),
            Err(ScheduleError::Cycle(_))
        ));
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let network = Network::new(
            &durations(&[("X", 0.0)]),
            &precedences(&[("X", &["X"])]),
        )
        .unwrap();

        assert_eq!(
            network.topological_order(),
            Err(ScheduleError::Cycle("X".to_string()))
        );
    }

    #[test]
    fn unknown_prerequisite_is_rejected() {
        let result = Network::new(
            &durations(&[("X", 1.0)]),
            &precedences(&[("X", &["W"])]),
        );

        assert_eq!(
            result.err(),
            Some(ScheduleError::UnknownActivity {
                activity: "X".to_string(),
                reference: "W".to_string(),
            })
        );
    }

    #[test]
    fn relation_without_duration_is_rejected() {
        let result = Network::new(&durations(&[("X", 1.0)]), &precedences(&[("Y", &[])]));

        assert_eq!(
            result.err(),
            Some(ScheduleError::MissingDuration("Y".to_string()))
        );
    }

    #[test]
    fn invalid_durations_are_rejected() {
        for duration in [-1.0, f64::NAN, f64::INFINITY] {
            let result = Network::new(&durations(&[("X", duration)]), &[]);
            assert!(matches!(
                result,
                Err(ScheduleError::InvalidDuration { .. })
            ));
        }
    }

    #[test]
    fn duplicate_activity_is_rejected() {
        let result = Network::new(&durations(&[("X", 1.0), ("X", 2.0)]), &[]);

        assert_eq!(
            result.err(),
            Some(ScheduleError::DuplicateActivity("X".to_string()))
        );
    }
}
