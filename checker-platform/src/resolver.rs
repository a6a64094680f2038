use checker_core::{CpuTopology, Result};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::registry::{PlatformFamily, PlatformRegistry};
use crate::traits::{CommandRunner, TopologyParser};

/// Resolves the CPU topology for one platform family.
///
/// The parser is chosen once at construction; [`resolve`](Self::resolve)
/// runs the inventory command exactly once and never retries.
pub struct TopologyResolver {
    family: PlatformFamily,
    parser: Box<dyn TopologyParser>,
    runner: Box<dyn CommandRunner>,
    raw_output_dir: Option<PathBuf>,
}

impl TopologyResolver {
    pub fn new(family: PlatformFamily, runner: Box<dyn CommandRunner>) -> Self {
        Self {
            family,
            parser: PlatformRegistry::parser_for(family),
            runner,
            raw_output_dir: None,
        }
    }

    /// Archive the raw command output in `dir` before parsing.
    pub fn with_raw_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.raw_output_dir = Some(dir.into());
        self
    }

    pub fn parser(&self) -> &dyn TopologyParser {
        self.parser.as_ref()
    }

    pub fn resolve(&self) -> Result<CpuTopology> {
        let command = self.parser.command();
        info!(
            platform = %self.family,
            command = %command.display(),
            "Resolving CPU topology"
        );

        let raw = self.runner.run(&command)?;
        self.archive_raw_output(command.raw_log_name, &raw);

        self.parser.parse(&raw)
    }

    // Archiving is diagnostic only; a failed write never fails the run.
    fn archive_raw_output(&self, file_name: &str, raw: &str) {
        let Some(dir) = &self.raw_output_dir else {
            return;
        };

        let path = dir.join(file_name);
        let result = std::fs::create_dir_all(dir).and_then(|()| std::fs::write(&path, raw));
        if let Err(e) = result {
            warn!("Could not save raw output to {}: {}", path.display(), e);
        }
    }
}
