use std::io::Write;

use anyhow::Result;
use cpm::{plan_all, ScenarioComparison, SolverOptions};
use log::debug;
use project_data::structs::ProjectDefinition;

use super::{format_time, OutputFormat};

pub fn compare(
    project: &ProjectDefinition,
    format: OutputFormat,
    options: &SolverOptions,
    out: &mut impl Write,
) -> Result<()> {
    let plans = plan_all(project, options)?;

    let tables: Vec<_> = plans
        .iter()
        .map(|plan| (plan.scenario, &plan.schedule))
        .collect();
    let comparison = ScenarioComparison::merge(&tables);
    debug!("merged {} variables", comparison.rows.len());

    match format {
        OutputFormat::Text => {
            for plan in &plans {
                writeln!(
                    out,
                    "{} scenario: makespan {}",
                    plan.scenario,
                    format_time(plan.analysis.makespan)
                )?;
                for chain in &plan.analysis.chains {
                    writeln!(out, "  critical path {}", chain.join(" -> "))?;
                }
            }
            writeln!(out)?;
            write!(out, "{comparison}")?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &comparison)?;
            writeln!(out)?;
        }
    }

    Ok(())
}
