//! Linear program formulation of the earliest schedule.
//!
//! Every activity `a` gets two non-negative variables `start_a` and `end_a`:
//!
//! * `end_a - start_a = duration_a`
//! * `start_a - end_p >= 0` for every predecessor `p` of `a`
//!
//! and the objective minimises `sum(end_a)`. Every variable is bounded by
//! the network horizon. With finish-to-start precedences only, the optimum
//! is the left-justified schedule the forward pass produces.

use log::{debug, trace};
use minilp::{ComparisonOp, OptimizationDirection, Problem, Variable};

use crate::{dag::Network, error::ScheduleError, schedule::Schedule};

const HORIZON_SLACK: f64 = 1e-9;

pub fn solve_lp(network: &Network) -> Result<Schedule, ScheduleError> {
    // The LP happily accepts cycles of zero-duration activities
    network.topological_order()?;

    if network.is_empty() {
        return Ok(Schedule::default());
    }

    // slack for summation order differences against the forward pass
    let horizon = network.horizon() * (1.0 + HORIZON_SLACK) + HORIZON_SLACK;
    let mut problem = Problem::new(OptimizationDirection::Minimize);

    let variables: Vec<(Variable, Variable)> = (0..network.len())
        .map(|_| {
            let start = problem.add_var(0.0, (0.0, horizon));
            let end = problem.add_var(1.0, (0.0, horizon));
            (start, end)
        })
        .collect();

    let mut constraint_count = 0;
    for (index, &(start, end)) in variables.iter().enumerate() {
        problem.add_constraint(
            &[(end, 1.0), (start, -1.0)],
            ComparisonOp::Eq,
            network.duration(index),
        );
        constraint_count += 1;

        for predecessor in network.predecessors(index) {
            let (_, predecessor_end) = variables[predecessor];
            problem.add_constraint(
                &[(start, 1.0), (predecessor_end, -1.0)],
                ComparisonOp::Ge,
                0.0,
            );
            constraint_count += 1;
        }
    }

    debug!(
        "solving LP with {} variables and {constraint_count} constraints",
        variables.len() * 2
    );

    // Acyclic and bounded by the horizon, so only a solver fault lands here
    let solution = problem.solve().map_err(|err| {
        debug!("LP solver failed: {err}");
        ScheduleError::Infeasible
    })?;

    trace!("objective: {}", solution.objective());

    let starts: Vec<f64> = variables
        .iter()
        .map(|&(start, _)| solution[start].max(0.0))
        .collect();

    Ok(network.schedule_from(&starts))
}
