use anyhow::Result;
use cpm::{plan_scenario, ScenarioPlan, SolverOptions};
use log::{debug, info};
use project_data::structs::{ProjectDefinition, Scenario};
use std::{borrow::Cow, fs, io::Write, path::PathBuf};

use super::format_time;

pub fn graph(
    project: &ProjectDefinition,
    scenario: Scenario,
    output_path: PathBuf,
    options: &SolverOptions,
) -> Result<()> {
    let plan = plan_scenario(project, scenario, options)?;

    debug!(
        "Creating graph for the {} scenario with {} activities",
        scenario,
        plan.network.len()
    );

    let mut output_file = fs::File::create(&output_path)?;
    render(&plan, &mut output_file)?;

    info!("Wrote graphviz dot file to: {:?}", output_path);

    Ok(())
}

pub(crate) fn render(plan: &ScenarioPlan, output: &mut impl Write) -> Result<()> {
    let graph = PrecedenceGraph {
        name: format!("critical_path_{}", plan.scenario.name().to_lowercase()),
        plan,
        edges: plan.network.edges(),
    };
    dot::render(&graph, output)?;

    Ok(())
}

type Nd = usize;
type Ed = (usize, usize);

struct PrecedenceGraph<'p> {
    name: String,
    plan: &'p ScenarioPlan,
    edges: Vec<Ed>,
}

impl<'a, 'p> dot::Labeller<'a, Nd, Ed> for PrecedenceGraph<'p> {
    fn graph_id(&'a self) -> dot::Id<'a> {
        // scenario names are plain identifiers
        dot::Id::new(self.name.clone()).expect("Failed to get graph id")
    }

    fn node_id(&'a self, n: &Nd) -> dot::Id<'a> {
        let id = format!("N{}", *n);
        dot::Id::new(id).expect("Failed to label graph node")
    }

    fn node_label(&'a self, n: &Nd) -> dot::LabelText<'a> {
        let code = self.plan.network.code(*n);
        let (start, end) = self
            .plan
            .schedule
            .get(code)
            .map(|a| (a.start, a.end))
            .unwrap_or_default();

        dot::LabelText::label(format!(
            "{}\n{}-{}",
            code,
            format_time(start),
            format_time(end)
        ))
    }

    fn node_style(&'a self, n: &Nd) -> dot::Style {
        if self.plan.analysis.is_critical(self.plan.network.code(*n)) {
            dot::Style::Bold
        } else {
            dot::Style::None
        }
    }

    fn edge_style(&'a self, e: &Ed) -> dot::Style {
        let network = &self.plan.network;
        if self
            .plan
            .analysis
            .is_critical_edge(network.code(e.0), network.code(e.1))
        {
            dot::Style::Bold
        } else {
            dot::Style::None
        }
    }
}

impl<'a, 'p> dot::GraphWalk<'a, Nd, Ed> for PrecedenceGraph<'p> {
    fn nodes(&self) -> dot::Nodes<'a, Nd> {
        // activities without any precedence are drawn as well
        Cow::Owned((0..self.plan.network.len()).collect())
    }

    fn edges(&'a self) -> dot::Edges<'a, Ed> {
        Cow::Borrowed(&self.edges[..])
    }

    fn source(&self, e: &Ed) -> Nd {
        e.0
    }

    fn target(&self, e: &Ed) -> Nd {
        e.1
    }
}
