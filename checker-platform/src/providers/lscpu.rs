//! Parser for `lscpu` output on Linux-like systems.
//!
//! Output example (util-linux 2.37+, labels indented under "Model name"):
//!
//! ```text
//! Architecture:            x86_64
//! CPU(s):                  8
//!   On-line CPU(s) list:   0-7
//! Vendor ID:               AuthenticAMD
//!   Model name:            AMD Ryzen 7 5800U with Radeon Graphics
//!     Thread(s) per core:  2
//!     Core(s) per socket:  4
//!     Socket(s):           1
//! ```

use checker_core::command_stream::normalize_line_endings;
use checker_core::{CheckerError, CpuTopology, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::parse_count;
use crate::traits::{InventoryCommand, TopologyParser};

const LSCPU: InventoryCommand = InventoryCommand {
    program: "lscpu",
    args: &[],
    raw_log_name: "lscpu_stdout.log",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    LogicalCpus,
    Sockets,
    VendorId,
    ModelName,
    ThreadsPerCore,
    CoresPerSocket,
}

impl Field {
    const ALL: [Field; 6] = [
        Field::LogicalCpus,
        Field::Sockets,
        Field::VendorId,
        Field::ModelName,
        Field::ThreadsPerCore,
        Field::CoresPerSocket,
    ];

    fn label(self) -> &'static str {
        match self {
            Field::LogicalCpus => "CPU(s)",
            Field::Sockets => "Socket(s)",
            Field::VendorId => "Vendor ID",
            Field::ModelName => "Model name",
            Field::ThreadsPerCore => "Thread(s) per core",
            Field::CoresPerSocket => "Core(s) per socket",
        }
    }
}

// Labels are anchored at line start so "CPU(s):" does not match
// "On-line CPU(s) list:" or "NUMA node0 CPU(s):".
static FIELD_PATTERNS: Lazy<Vec<(Field, Regex)>> = Lazy::new(|| {
    Field::ALL
        .iter()
        .map(|&field| {
            let pattern = format!(
                r"(?m)^[ \t]*{}:[ \t]*(.*?)[ \t]*$",
                regex::escape(field.label())
            );
            let regex = Regex::new(&pattern)
                .expect("lscpu label regex should compile - labels are static");
            (field, regex)
        })
        .collect()
});

/// First value reported for `field`, or a parse error when the label is absent.
fn extract(raw: &str, field: Field) -> Result<String> {
    FIELD_PATTERNS
        .iter()
        .find(|(f, _)| *f == field)
        .and_then(|(_, regex)| regex.captures(raw))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| CheckerError::parse(field.label(), "label not found in lscpu output"))
}

fn extract_count(raw: &str, field: Field) -> Result<u32> {
    parse_count(field.label(), &extract(raw, field)?)
}

/// Socket/core-table parser for `lscpu`.
///
/// Physical cores are `Core(s) per socket * Socket(s)`. Logical cores are the
/// reported `CPU(s)` total rather than a product of per-core thread counts, so
/// asymmetric layouts are reported as the kernel sees them.
pub struct LscpuParser;

impl TopologyParser for LscpuParser {
    fn name(&self) -> &'static str {
        "lscpu"
    }

    fn command(&self) -> InventoryCommand {
        LSCPU
    }

    fn parse(&self, raw: &str) -> Result<CpuTopology> {
        let raw = normalize_line_endings(raw);

        let logical = extract_count(&raw, Field::LogicalCpus)?;
        let sockets = extract_count(&raw, Field::Sockets)?;
        let vendor_id = extract(&raw, Field::VendorId)?;
        let model_name = extract(&raw, Field::ModelName)?;
        let threads_per_core = extract_count(&raw, Field::ThreadsPerCore)?;
        let cores_per_socket = extract_count(&raw, Field::CoresPerSocket)?;

        let physical = cores_per_socket.checked_mul(sockets).ok_or_else(|| {
            CheckerError::parse(
                "physical cores",
                format!("{} cores x {} sockets overflows", cores_per_socket, sockets),
            )
        })?;

        debug!(
            sockets,
            cores_per_socket, threads_per_core, logical, "Parsed lscpu fields"
        );

        CpuTopology::new(vendor_id, model_name, physical, logical)
    }
}
