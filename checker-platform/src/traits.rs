//! Core traits for topology resolution.
//!
//! A parser knows which command its platform runs and how to read that
//! command's output. A runner knows how to obtain the output. Keeping them
//! apart lets parsers stay pure and lets tests feed recorded output.

use checker_core::{CpuTopology, Result};

/// A platform inventory command and where its raw output is archived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryCommand {
    pub program: &'static str,
    pub args: &'static [&'static str],
    /// File name used when the raw output is saved for inspection.
    pub raw_log_name: &'static str,
}

impl InventoryCommand {
    /// The command line as a user would type it.
    pub fn display(&self) -> String {
        std::iter::once(self.program)
            .chain(self.args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Converts one platform's inventory output into a [`CpuTopology`].
///
/// Implementations are pure: parsing the same text twice yields equal values.
pub trait TopologyParser: Send + Sync {
    /// Short parser name (e.g., "lscpu", "wmic")
    fn name(&self) -> &'static str;

    /// The command whose output this parser understands
    fn command(&self) -> InventoryCommand;

    /// Parse raw command output
    fn parse(&self, raw: &str) -> Result<CpuTopology>;
}

/// Obtains the raw text output of an inventory command.
pub trait CommandRunner {
    /// Run `command` once and return its stdout with `\n` line endings.
    fn run(&self, command: &InventoryCommand) -> Result<String>;
}
