//! Normalized CPU topology snapshot.

use serde::Serialize;
use std::fmt;

use crate::error::{CheckerError, Result};

/// Immutable snapshot of the host CPU layout.
///
/// Constructed once per run through [`CpuTopology::new`], which enforces
/// `logical_cores >= physical_cores >= 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CpuTopology {
    vendor_id: String,
    model_name: String,
    physical_cores: u32,
    logical_cores: u32,
}

impl CpuTopology {
    /// Build a topology, rejecting inconsistent core counts as a parse error.
    ///
    /// Values are never clamped or swapped: an inventory tool that reports
    /// fewer logical than physical cores produced malformed output.
    pub fn new(
        vendor_id: impl Into<String>,
        model_name: impl Into<String>,
        physical_cores: u32,
        logical_cores: u32,
    ) -> Result<Self> {
        if physical_cores == 0 {
            return Err(CheckerError::parse(
                "physical cores",
                "reported physical core count is 0",
            ));
        }
        if logical_cores < physical_cores {
            return Err(CheckerError::parse(
                "logical cores",
                format!(
                    "logical core count ({}) is lower than physical core count ({})",
                    logical_cores, physical_cores
                ),
            ));
        }

        Ok(Self {
            vendor_id: vendor_id.into(),
            model_name: model_name.into(),
            physical_cores,
            logical_cores,
        })
    }

    pub fn vendor_id(&self) -> &str {
        &self.vendor_id
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn physical_cores(&self) -> u32 {
        self.physical_cores
    }

    pub fn logical_cores(&self) -> u32 {
        self.logical_cores
    }
}

impl fmt::Display for CpuTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} physical / {} logical)",
            self.vendor_id, self.model_name, self.physical_cores, self.logical_cores
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_topology() {
        let topology = CpuTopology::new("GenuineIntel", "Intel(R) Xeon(R)", 4, 8).unwrap();
        assert_eq!(topology.vendor_id(), "GenuineIntel");
        assert_eq!(topology.model_name(), "Intel(R) Xeon(R)");
        assert_eq!(topology.physical_cores(), 4);
        assert_eq!(topology.logical_cores(), 8);
    }

    #[test]
    fn test_equal_physical_and_logical_is_valid() {
        assert!(CpuTopology::new("AuthenticAMD", "EPYC", 2, 2).is_ok());
    }

    #[test]
    fn test_empty_vendor_is_allowed() {
        let topology = CpuTopology::new("", "Cortex-A72", 4, 4).unwrap();
        assert_eq!(topology.vendor_id(), "");
    }

    #[test]
    fn test_zero_physical_cores_rejected() {
        let err = CpuTopology::new("GenuineIntel", "Core", 0, 0).unwrap_err();
        assert_eq!(err.stage(), "parse");
    }

    #[test]
    fn test_logical_below_physical_rejected() {
        let err = CpuTopology::new("GenuineIntel", "Core", 8, 4).unwrap_err();
        assert!(matches!(err, CheckerError::Parse { .. }));
        assert!(err.to_string().contains("lower than physical"));
    }
}
