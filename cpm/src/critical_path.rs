use log::debug;
use serde::{Deserialize, Serialize};

use crate::{dag::Network, error::ScheduleError, schedule::Schedule};

/// Earliest/latest times and slack of one activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityFloat {
    pub code: String,
    pub duration: f64,
    pub earliest_start: f64,
    pub earliest_finish: f64,
    pub latest_start: f64,
    pub latest_finish: f64,
    pub total_float: f64,
    pub critical: bool,
}

/// Time comparisons need a finite, non-negative tolerance.
pub(crate) fn check_tolerance(tolerance: f64) -> Result<f64, ScheduleError> {
    if tolerance.is_finite() && tolerance >= 0.0 {
        Ok(tolerance)
    } else {
        Err(ScheduleError::InvalidTolerance(tolerance))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalPathAnalysis {
    pub makespan: f64,
    pub activities: Vec<ActivityFloat>,
    /// Every source to sink chain of zero-float activities with no gap
    /// between consecutive activities.
    pub chains: Vec<Vec<String>>,
}

impl CriticalPathAnalysis {
    pub fn new(
        network: &Network,
        schedule: &Schedule,
        tolerance: f64,
    ) -> Result<Self, ScheduleError> {
        check_tolerance(tolerance)?;

        let makespan = schedule.makespan();
        let latest = network.backward_pass(makespan)?;

        let mut activities = Vec::with_capacity(network.len());
        for (index, code) in network.codes().iter().enumerate() {
            let earliest = schedule
                .get(code)
                .ok_or_else(|| ScheduleError::MissingDuration(code.clone()))?;
            let (latest_start, latest_finish) = latest[index];
            let total_float = (latest_start - earliest.start).max(0.0);

            activities.push(ActivityFloat {
                code: code.clone(),
                duration: earliest.duration,
                earliest_start: earliest.start,
                earliest_finish: earliest.end,
                latest_start,
                latest_finish,
                total_float,
                critical: total_float <= tolerance,
            });
        }

        let chains = critical_chains(network, &activities, makespan, tolerance);
        debug!("critical chains: {chains:?}");

        Ok(Self {
            makespan,
            activities,
            chains,
        })
    }

    pub fn get(&self, code: &str) -> Option<&ActivityFloat> {
        self.activities.iter().find(|a| a.code == code)
    }

    pub fn is_critical(&self, code: &str) -> bool {
        self.get(code).map(|a| a.critical).unwrap_or(false)
    }

    /// Codes of all zero-float activities, in declaration order.
    pub fn critical_activities(&self) -> Vec<&str> {
        self.activities
            .iter()
            .filter(|a| a.critical)
            .map(|a| a.code.as_str())
            .collect()
    }

    /// Whether the precedence `from -> to` lies on a critical chain.
    pub fn is_critical_edge(&self, from: &str, to: &str) -> bool {
        self.chains
            .iter()
            .any(|chain| chain.windows(2).any(|pair| pair[0] == from && pair[1] == to))
    }
}

fn critical_chains(
    network: &Network,
    activities: &[ActivityFloat],
    makespan: f64,
    tolerance: f64,
) -> Vec<Vec<String>> {
    let mut chains = vec![];

    for index in 0..network.len() {
        let activity = &activities[index];
        let is_start = activity.critical
            && activity.earliest_start.abs() <= tolerance
            && network.predecessors(index).next().is_none();

        if is_start {
            let mut path = vec![index];
            extend_chain(network, activities, makespan, tolerance, &mut path, &mut chains);
        }
    }

    chains
}

fn extend_chain(
    network: &Network,
    activities: &[ActivityFloat],
    makespan: f64,
    tolerance: f64,
    path: &mut Vec<usize>,
    chains: &mut Vec<Vec<String>>,
) {
    let Some(&current) = path.last() else {
        return;
    };

    let mut next: Vec<usize> = network
        .successors(current)
        .filter(|&successor| {
            let successor = &activities[successor];
            successor.critical
                && (successor.earliest_start - activities[current].earliest_finish).abs()
                    <= tolerance
        })
        .collect();
    next.sort_unstable();

    if next.is_empty() {
        if (makespan - activities[current].earliest_finish).abs() <= tolerance {
            chains.push(
                path.iter()
                    .map(|&index| network.code(index).to_string())
                    .collect(),
            );
        }
        return;
    }

    for successor in next {
        path.push(successor);
        extend_chain(network, activities, makespan, tolerance, path, chains);
        path.pop();
    }
}
