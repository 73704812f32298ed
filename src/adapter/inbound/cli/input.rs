//! Reads graph files for the model commands.

use miette::Report;
use tracing::debug;

use super::command::ModelArgs;
use super::diagnostic::{CommandError, InputDiagnostic};
use crate::adapter::inbound::graph_file::{self, GraphFile};
use crate::domain::graph::Instance;
use crate::error::Error;

/// Parse and validate the graph file named in `args`, applying `--palette`.
///
/// Parse failures come back as diagnostics that point into the file.
pub fn read_instance(args: &ModelArgs) -> Result<Instance, Report> {
    let text = graph_file::read(&args.file).map_err(|e| {
        Report::new(CommandError::new(format!(
            "cannot read {}: {e}",
            args.file.display()
        )))
    })?;

    let file = GraphFile::parse(&text).map_err(|e| {
        Report::new(InputDiagnostic::new(
            args.file.display().to_string(),
            text.clone(),
            &e,
        ))
    })?;

    let instance = file.into_instance().map_err(|e| report(&e))?;
    let instance = match &args.palette {
        Some(palette) => instance.with_palette(palette.clone()).map_err(|e| report(&e))?,
        None => instance,
    };

    debug!(
        file = %args.file.display(),
        nodes = instance.graph().node_count(),
        arcs = instance.graph().arc_count(),
        colors = instance.palette().len(),
        "Instance loaded"
    );
    Ok(instance)
}

/// Wrap a crate error for rendering.
pub fn report(error: &Error) -> Report {
    Report::new(CommandError::from(error))
}
