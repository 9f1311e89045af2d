#![forbid(unsafe_code)]
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::Verbosity;
use cpm::{SolveMethod, SolverOptions};
use log::{debug, error};
use project_data::structs::Scenario;

use crate::commands::OutputFormat;

mod commands;

#[derive(Debug, Parser)]
#[command(author, version)]
/// Critical path planner for the client proposal project
struct App {
    #[command(flatten)]
    verbose: Verbosity,

    /// How the earliest schedule is computed (lp or forward-pass)
    #[arg(long, global = true, env = "PLANNER_METHOD", default_value_t = SolveMethod::LinearProgram)]
    method: SolveMethod,

    /// Absolute tolerance used when comparing times
    #[arg(long, global = true, env = "PLANNER_TOLERANCE", default_value_t = 1e-6, value_parser = parse_tolerance)]
    tolerance: f64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the schedule and critical path of one scenario
    Schedule {
        #[arg(short, long, env = "PLANNER_SCENARIO", default_value_t = Scenario::Expected)]
        scenario: Scenario,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Create a graphviz notation of the precedence network of one scenario
    Graph {
        #[arg(short, long, env = "PLANNER_SCENARIO", default_value_t = Scenario::Expected)]
        scenario: Scenario,
        #[arg(required = true)]
        output: PathBuf,
    },
    /// Draw a Gantt chart of one scenario
    Gantt {
        #[arg(short, long, env = "PLANNER_SCENARIO", default_value_t = Scenario::Expected)]
        scenario: Scenario,
        /// Width of the time axis in characters
        #[arg(short, long, default_value_t = 60, value_parser = clap::value_parser!(u16).range(1..))]
        width: u16,
    },
    /// Solve every scenario and print the merged comparison table
    Compare {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn parse_tolerance(value: &str) -> Result<f64, String> {
    let tolerance: f64 = value
        .parse()
        .map_err(|err| format!("{value} is not a number: {err}"))?;
    if tolerance.is_finite() && tolerance >= 0.0 {
        Ok(tolerance)
    } else {
        Err(format!("{value} is not a finite, non-negative tolerance"))
    }
}

fn main() {
    let args: App = App::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    debug!("{args:?}");

    let options = SolverOptions {
        method: args.method,
        tolerance: args.tolerance,
    };

    let mut stdout = std::io::stdout().lock();

    if let Err(err) = commands::load_project().and_then(|project| match args.command {
        Commands::Schedule { scenario, format } => {
            commands::schedule(&project, scenario, format, &options, &mut stdout)
        }
        Commands::Graph { scenario, output } => {
            commands::graph(&project, scenario, output, &options)
        }
        Commands::Gantt { scenario, width } => {
            commands::gantt(&project, scenario, width.into(), &options, &mut stdout)
        }
        Commands::Compare { format } => commands::compare(&project, format, &options, &mut stdout),
    }) {
        error!("An error occurred: {err:#}");
        std::process::exit(1);
    }
}
