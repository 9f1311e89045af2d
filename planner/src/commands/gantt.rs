use std::io::Write;

use anyhow::{bail, Result};
use cpm::{plan_scenario, ScenarioPlan, SolverOptions};
use project_data::structs::{ProjectDefinition, Scenario};

use super::format_time;

const CRITICAL_BAR: char = '#';
const BAR: char = '=';

pub fn gantt(
    project: &ProjectDefinition,
    scenario: Scenario,
    width: usize,
    options: &SolverOptions,
    out: &mut impl Write,
) -> Result<()> {
    if width == 0 {
        bail!("Gantt chart width must be at least 1");
    }

    let plan = plan_scenario(project, scenario, options)?;
    draw(&plan, width, out)
}

/// One row per activity in declaration order, `#` marking critical
/// activities.
pub(crate) fn draw(plan: &ScenarioPlan, width: usize, out: &mut impl Write) -> Result<()> {
    let makespan = plan.analysis.makespan;
    let scale = if makespan > 0.0 {
        width as f64 / makespan
    } else {
        0.0
    };
    let code_width = plan
        .schedule
        .iter()
        .map(|a| a.code.len())
        .max()
        .unwrap_or_default()
        .max("Activities".len());

    writeln!(out, "Gantt Chart {} Scenario", plan.scenario)?;
    writeln!(out)?;

    for activity in plan.schedule.iter() {
        let from = ((activity.start * scale).round() as usize).min(width);
        let mut to = ((activity.end * scale).round() as usize).min(width);
        if activity.duration > 0.0 && to == from {
            // keep very short activities visible
            to = (from + 1).min(width);
        }

        let fill = if plan.analysis.is_critical(&activity.code) {
            CRITICAL_BAR
        } else {
            BAR
        };
        let bar: String = (0..width)
            .map(|column| if (from..to).contains(&column) { fill } else { ' ' })
            .collect();

        writeln!(
            out,
            "{:>code_width$} |{}| {:>8} - {:>8}",
            activity.code,
            bar,
            format_time(activity.start),
            format_time(activity.end)
        )?;
    }

    let axis_end = format_time(makespan);
    writeln!(
        out,
        "{:>code_width$} |0{:>pad$}|",
        "Activities",
        axis_end,
        pad = width.saturating_sub(1)
    )?;
    writeln!(out, "{:>code_width$}  Time", "")?;

    Ok(())
}
