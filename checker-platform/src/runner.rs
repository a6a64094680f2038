//! Command runner implementations.

use checker_core::command_stream::{normalize_line_endings, run_capture};
use checker_core::{CheckerError, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::traits::{CommandRunner, InventoryCommand};

/// Default upper bound for a single inventory command.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs the inventory command as a child process.
pub struct SystemRunner {
    timeout: Option<Duration>,
}

impl SystemRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(Some(DEFAULT_TIMEOUT))
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &InventoryCommand) -> Result<String> {
        run_capture(command.program, command.args, self.timeout)
    }
}

/// Returns previously recorded inventory output from a file.
///
/// Used for offline checks and tests; a file that cannot be read is treated
/// like a command that could not be run.
pub struct FileRunner {
    path: PathBuf,
}

impl FileRunner {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CommandRunner for FileRunner {
    fn run(&self, command: &InventoryCommand) -> Result<String> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            CheckerError::command(
                command.display(),
                format!("could not read recorded output {}: {}", self.path.display(), e),
            )
        })?;
        Ok(normalize_line_endings(&raw))
    }
}
