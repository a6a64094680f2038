use serde::Serialize;
use std::env;
use sysinfo::System;

const UNKNOWN: &str = "unknown";

/// Identity of the machine and process being inspected.
///
/// Captured once at startup and handed to the reporter; nothing else reads
/// the environment for these values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostInfo {
    pub user: String,
    pub hostname: String,
    pub os_name: String,
    pub os_version: String,
    pub kernel_version: String,
    pub runtime: String,
}

impl HostInfo {
    /// Take a snapshot of the current host.
    pub fn detect() -> Self {
        let user = env::var("USER")
            .or_else(|_| env::var("USERNAME"))
            .unwrap_or_else(|_| UNKNOWN.to_string());

        Self {
            user,
            hostname: System::host_name().unwrap_or_else(|| UNKNOWN.to_string()),
            os_name: System::name().unwrap_or_else(|| env::consts::OS.to_string()),
            os_version: System::long_os_version()
                .or_else(System::os_version)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            kernel_version: System::kernel_version().unwrap_or_else(|| UNKNOWN.to_string()),
            runtime: runtime_description(),
        }
    }
}

/// Tool version plus the target it was built for, e.g. `core-checker 0.3.0 (linux/x86_64)`.
pub fn runtime_description() -> String {
    format!(
        "core-checker {} ({}/{})",
        env!("CARGO_PKG_VERSION"),
        env::consts::OS,
        env::consts::ARCH
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_fills_every_field() {
        let host = HostInfo::detect();
        assert!(!host.user.is_empty());
        assert!(!host.hostname.is_empty());
        assert!(!host.os_name.is_empty());
        assert!(!host.os_version.is_empty());
        assert!(host.runtime.starts_with("core-checker "));
    }

    #[test]
    fn test_runtime_mentions_target() {
        let runtime = runtime_description();
        assert!(runtime.contains(env::consts::OS));
        assert!(runtime.contains(env::consts::ARCH));
    }
}
