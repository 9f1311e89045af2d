use std::io::Write;

use anyhow::Result;
use cpm::{plan_scenario, ScenarioPlan, SolverOptions};
use log::debug;
use project_data::structs::{ProjectDefinition, Scenario};
use serde_json::json;

use super::{format_time, OutputFormat};

pub fn schedule(
    project: &ProjectDefinition,
    scenario: Scenario,
    format: OutputFormat,
    options: &SolverOptions,
    out: &mut impl Write,
) -> Result<()> {
    let plan = plan_scenario(project, scenario, options)?;
    debug!("schedule: {:?}", plan.schedule);

    match format {
        OutputFormat::Text => write_report(project, &plan, options, out)?,
        OutputFormat::Json => {
            let report = json!({
                "scenario": plan.scenario,
                "method": options.method,
                "makespan": plan.analysis.makespan,
                "chains": plan.analysis.chains,
                "activities": plan.analysis.activities,
                "variables": plan.schedule.variables(),
            });
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

fn write_report(
    project: &ProjectDefinition,
    plan: &ScenarioPlan,
    options: &SolverOptions,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "{} scenario ({})", plan.scenario, options.method)?;
    writeln!(out)?;

    writeln!(out, "Critical Path time:")?;
    for activity in plan.schedule.starting_at_zero(options.tolerance) {
        writeln!(out, "{} starts at time 0", activity.code)?;
    }
    for activity in plan.schedule.ending_at_makespan(options.tolerance) {
        writeln!(
            out,
            "{} ends at {} hours in duration",
            activity.code,
            format_time(activity.end)
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Critical chains:")?;
    for chain in &plan.analysis.chains {
        writeln!(out, "  {}", chain.join(" -> "))?;
    }
    writeln!(out, "Makespan: {}", format_time(plan.analysis.makespan))?;
    writeln!(out)?;

    let label_width = plan
        .analysis
        .activities
        .iter()
        .map(|a| project.label(&a.code).len())
        .max()
        .unwrap_or_default()
        .max("Activity".len());

    writeln!(
        out,
        "{:<4}  {:<label_width$}  {:>8}  {:>8}  {:>8}  {:>8}  Critical",
        "Code", "Activity", "Duration", "Start", "End", "Float"
    )?;
    for activity in &plan.analysis.activities {
        writeln!(
            out,
            "{:<4}  {:<label_width$}  {:>8.2}  {:>8.2}  {:>8.2}  {:>8.2}  {}",
            activity.code,
            project.label(&activity.code),
            activity.duration,
            activity.earliest_start,
            activity.earliest_finish,
            activity.total_float,
            if activity.critical { "*" } else { "" }
        )?;
    }

    Ok(())
}
