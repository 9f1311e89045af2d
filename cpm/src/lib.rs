pub mod comparison;
pub mod critical_path;
pub mod dag;
pub mod error;
pub mod lp;
pub mod schedule;
pub mod scheduler;

pub use comparison::ScenarioComparison;
pub use critical_path::CriticalPathAnalysis;
pub use error::ScheduleError;
pub use schedule::Schedule;
pub use scheduler::{plan_all, plan_scenario, solve, ScenarioPlan, SolveMethod, SolverOptions};
