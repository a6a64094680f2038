//! Rendering of the topology report, verdicts and final exit status.

use checker_core::host::HostInfo;
use checker_core::{CpuTopology, Outcome, Result, Verdict};
use serde::Serialize;
use tracing::{error, info, warn};

const RULE: &str = "====================================";

pub fn report_topology(topology: &CpuTopology, host: &HostInfo) {
    info!("{}", RULE);
    info!("         SYSTEM INFORMATION         ");
    info!("{}", RULE);
    info!("CPU VENDOR: {}", topology.vendor_id());
    info!("CPU NAME: {}", topology.model_name());
    info!("Number of Physical Cores: {}", topology.physical_cores());
    info!("Number of Logical Cores: {}", topology.logical_cores());
    info!("");
    info!("USER: {}", host.user);
    info!("HOSTNAME: {}", host.hostname);
    info!("Runtime: {}", host.runtime);
    info!("OS type: {}", host.os_name);
    info!("OS version: {}", host.os_version);
    info!("Kernel version: {}", host.kernel_version);
    info!("{}", RULE);
}

pub fn verdict_message(verdict: &Verdict) -> String {
    if verdict.matched {
        format!(
            "Actual {} Cores is same as expected ({})",
            verdict.kind, verdict.expected_count
        )
    } else {
        format!(
            "Expected {} Cores: {}, Actual: {}",
            verdict.kind, verdict.expected_count, verdict.actual_count
        )
    }
}

pub fn report_verdicts(verdicts: &[Verdict]) {
    if verdicts.is_empty() {
        warn!("No expectations specified, assuming no checking is needed.");
        return;
    }

    for verdict in verdicts {
        if verdict.matched {
            info!(kind = %verdict.kind, "{}", verdict_message(verdict));
        } else {
            error!(kind = %verdict.kind, "{}", verdict_message(verdict));
        }
    }
}

/// Last line of every run, stating the exit code about to be used.
pub fn report_exit(exit_code: i32) {
    if exit_code == 0 {
        warn!("Exit with exit code {}", exit_code);
    } else {
        error!("Exiting with exit code {}", exit_code);
    }
}

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    topology: &'a CpuTopology,
    host: &'a HostInfo,
    verdicts: &'a [Verdict],
    outcome: Outcome,
    exit_code: i32,
}

/// Machine-readable summary of a completed check.
pub fn json_report(
    topology: &CpuTopology,
    host: &HostInfo,
    verdicts: &[Verdict],
    outcome: Outcome,
) -> Result<String> {
    let report = CheckReport {
        topology,
        host,
        verdicts,
        outcome,
        exit_code: outcome.exit_code(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
