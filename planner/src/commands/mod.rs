use anyhow::Result;
use clap::ValueEnum;
use log::trace;
use project_data::{proposal_project, structs::ProjectDefinition};

mod compare;
mod gantt;
mod graph;
mod schedule;

pub use compare::compare;
pub use gantt::gantt;
pub use graph::graph;
pub use schedule::schedule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn load_project() -> Result<ProjectDefinition> {
    let project = proposal_project();
    project.validate()?;
    trace!("project: {project:#?}");

    Ok(project)
}

/// Formats a time without trailing zeros, `133` rather than `133.00`.
pub(crate) fn format_time(time: f64) -> String {
    let rounded = format!("{time:.2}");
    rounded
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{format_time, load_project};

    #[test]
    fn time_formatting() {
        assert_eq!(format_time(133.0), "133");
        assert_eq!(format_time(113.05), "113.05");
        assert_eq!(format_time(4.25), "4.25");
        assert_eq!(format_time(9.2000000001), "9.2");
        assert_eq!(format_time(0.0), "0");
    }

    #[test]
    fn built_in_project_loads() {
        assert_eq!(load_project().unwrap().precedence_relations.len(), 16);
    }
}
