use checker_core::host::HostInfo;
use checker_logging::{init_subscriber, LogSettings, WorkerGuard};

/// Process-wide state for one run, created once at startup.
///
/// Holds the host snapshot shown in the report and keeps the log file
/// writer alive; dropping the context flushes pending log lines.
pub struct RunContext {
    pub host: HostInfo,
    _log_guard: Option<WorkerGuard>,
}

impl RunContext {
    /// Install logging and capture host identity.
    ///
    /// A logging setup failure is reported on stderr and the run continues
    /// without a subscriber.
    pub fn init(settings: &LogSettings) -> Self {
        let log_guard = match init_subscriber(settings) {
            Ok(guard) => guard,
            Err(e) => {
                eprintln!("Warning: failed to initialize logging: {:#}", e);
                None
            }
        };

        Self {
            host: HostInfo::detect(),
            _log_guard: log_guard,
        }
    }
}
