use anyhow::{Context, Result};
use checker_core::{evaluate, Outcome};
use checker_platform::{CommandRunner, FileRunner, SystemRunner, TopologyResolver};
use tracing::info;

use crate::config::CheckOptions;
use crate::context::RunContext;
use crate::report;

/// Resolve the topology, report it, and evaluate every expectation.
///
/// Resolution failures are returned as errors; mismatches are not errors and
/// only show up in the returned [`Outcome`].
pub fn execute(options: &CheckOptions, ctx: &RunContext) -> Result<Outcome> {
    let runner: Box<dyn CommandRunner> = match &options.from_file {
        Some(path) => {
            info!("Reading recorded inventory output from {}", path.display());
            Box::new(FileRunner::new(path))
        }
        None => Box::new(SystemRunner::new(options.timeout)),
    };

    let mut resolver = TopologyResolver::new(options.platform, runner);
    if let Some(dir) = &options.raw_output_dir {
        resolver = resolver.with_raw_output_dir(dir);
    }

    let topology = resolver
        .resolve()
        .with_context(|| format!("Could not determine the {} CPU topology", options.platform))?;
    report::report_topology(&topology, &ctx.host);

    let verdicts = evaluate(&topology, &options.expectations);
    report::report_verdicts(&verdicts);
    let outcome = Outcome::from_verdicts(&verdicts);
    info!(%outcome, "Core check finished");

    if options.json {
        println!(
            "{}",
            report::json_report(&topology, &ctx.host, &verdicts, outcome)?
        );
    }

    Ok(outcome)
}
