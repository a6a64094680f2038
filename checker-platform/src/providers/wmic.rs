//! Parser for `wmic cpu get` output on Windows.
//!
//! Output example:
//!
//! ```text
//! Manufacturer  Name                                      NumberOfCores  ThreadCount
//! GenuineIntel  Intel(R) Core(TM) i5-6300U CPU @ 2.40GHz  2              4
//! ```

use checker_core::command_stream::normalize_line_endings;
use checker_core::{CheckerError, CpuTopology, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use super::parse_count;
use crate::traits::{InventoryCommand, TopologyParser};

const WMIC: InventoryCommand = InventoryCommand {
    program: "wmic",
    args: &["cpu", "get", "Manufacturer,Name,NumberOfCores,ThreadCount"],
    raw_log_name: "wmic_cpu_stdout.log",
};

/// Columns are padded with runs of two or more spaces; single spaces belong to values.
static COLUMN_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s{2,}")
        .expect("wmic column separator regex should compile - this is a static pattern")
});

const COLUMN_COUNT: usize = 4;

fn split_columns(line: &str) -> Vec<&str> {
    COLUMN_SEPARATOR
        .split(line.trim())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Columnar-table parser for `wmic cpu get Manufacturer,Name,NumberOfCores,ThreadCount`.
///
/// wmic sorts the requested properties alphabetically, which is also the
/// order the tokens are read in: vendor, model, physical cores, threads.
pub struct WmicParser;

impl TopologyParser for WmicParser {
    fn name(&self) -> &'static str {
        "wmic"
    }

    fn command(&self) -> InventoryCommand {
        WMIC
    }

    fn parse(&self, raw: &str) -> Result<CpuTopology> {
        let raw = normalize_line_endings(raw);
        let mut lines = raw.lines().filter(|line| !line.trim().is_empty());

        lines
            .next()
            .ok_or_else(|| CheckerError::parse("header line", "wmic output is empty"))?;
        let data = lines
            .next()
            .ok_or_else(|| CheckerError::parse("data line", "wmic output has no data line"))?;
        if lines.next().is_some() {
            return Err(CheckerError::parse(
                "data line",
                "wmic output has more than one data line",
            ));
        }

        let tokens = split_columns(data);
        if tokens.len() < COLUMN_COUNT {
            return Err(CheckerError::parse(
                "data line",
                format!(
                    "expected {} columns (Manufacturer, Name, NumberOfCores, ThreadCount), found {}",
                    COLUMN_COUNT,
                    tokens.len()
                ),
            ));
        }

        // Older Xeon names pad the model with runs of spaces, which splits it
        // into several tokens. Vendor is always first and the counts last.
        let last = tokens.len() - 1;
        let vendor_id = tokens[0];
        let model_name = tokens[1..last - 1].join(" ");
        let physical = parse_count("NumberOfCores", tokens[last - 1])?;
        let logical = parse_count("ThreadCount", tokens[last])?;

        CpuTopology::new(vendor_id, model_name, physical, logical)
    }
}
