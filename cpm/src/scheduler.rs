use std::{fmt, str::FromStr};

use log::{debug, info};
use project_data::structs::{
    ActivityDuration, PrecedenceRelation, ProjectDefinition, Scenario,
};
use serde::{Deserialize, Serialize};

use crate::{
    critical_path::{check_tolerance, CriticalPathAnalysis},
    dag::Network,
    error::ScheduleError,
    lp::solve_lp,
    schedule::Schedule,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolveMethod {
    /// Minimise the sum of end times with a linear program.
    #[default]
    LinearProgram,
    /// Topological forward pass.
    ForwardPass,
}

impl fmt::Display for SolveMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveMethod::LinearProgram => f.write_str("lp"),
            SolveMethod::ForwardPass => f.write_str("forward-pass"),
        }
    }
}

impl FromStr for SolveMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lp" | "linear-program" => Ok(SolveMethod::LinearProgram),
            "forward-pass" | "forward" => Ok(SolveMethod::ForwardPass),
            _ => Err(format!("unknown solve method: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolverOptions {
    pub method: SolveMethod,
    /// Absolute tolerance for comparing times (zero float, ties at 0 and at
    /// the makespan).
    pub tolerance: f64,
}

impl SolverOptions {
    pub fn validate(&self) -> Result<(), ScheduleError> {
        check_tolerance(self.tolerance).map(|_| ())
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            method: SolveMethod::default(),
            tolerance: 1e-6,
        }
    }
}

/// Earliest schedule for one set of durations.
pub fn solve(
    durations: &[ActivityDuration],
    precedences: &[PrecedenceRelation],
    options: &SolverOptions,
) -> Result<Schedule, ScheduleError> {
    options.validate()?;
    let network = Network::new(durations, precedences)?;
    solve_network(&network, options)
}

fn solve_network(network: &Network, options: &SolverOptions) -> Result<Schedule, ScheduleError> {
    debug!("solving {} activities with {}", network.len(), options.method);

    match options.method {
        SolveMethod::LinearProgram => solve_lp(network),
        SolveMethod::ForwardPass => network.forward_pass(),
    }
}

/// Everything computed for one scenario.
#[derive(Debug, Clone)]
pub struct ScenarioPlan {
    pub scenario: Scenario,
    pub network: Network,
    pub schedule: Schedule,
    pub analysis: CriticalPathAnalysis,
}

pub fn plan_scenario(
    project: &ProjectDefinition,
    scenario: Scenario,
    options: &SolverOptions,
) -> Result<ScenarioPlan, ScheduleError> {
    options.validate()?;
    let network = Network::new(project.durations(scenario)?, &project.precedence_relations)?;
    let schedule = solve_network(&network, options)?;
    let analysis = CriticalPathAnalysis::new(&network, &schedule, options.tolerance)?;

    info!(
        "{scenario} scenario: makespan {} with {} critical chain(s)",
        analysis.makespan,
        analysis.chains.len()
    );

    Ok(ScenarioPlan {
        scenario,
        network,
        schedule,
        analysis,
    })
}

/// Plans every scenario of the project, in `Scenario::ALL` order.
pub fn plan_all(
    project: &ProjectDefinition,
    options: &SolverOptions,
) -> Result<Vec<ScenarioPlan>, ScheduleError> {
    Scenario::ALL
        .iter()
        .map(|&scenario| plan_scenario(project, scenario, options))
        .collect()
}
