// CLI argument parsing and definitions

use anyhow::Result;
use checker_logging::{ConsoleStream, LogFormat, LogOutput, LogSettings};
use checker_platform::PlatformFamily;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "core-checker")]
#[command(about = "Report the host CPU topology and verify its core counts")]
#[command(version)]
pub struct Args {
    /// Expected number of physical cores (also --expected_physical_cores or --epc;
    /// the single-dash -epc spelling is not accepted)
    #[arg(
        short = 'p',
        long,
        value_name = "N",
        alias = "expected_physical_cores",
        alias = "epc"
    )]
    pub expected_physical_cores: Option<u32>,

    /// Expected number of logical cores, including SMT siblings (also
    /// --expected_logical_cores or --elc; the single-dash -elc spelling is not accepted)
    #[arg(
        short = 'l',
        long,
        value_name = "N",
        alias = "expected_logical_cores",
        alias = "elc"
    )]
    pub expected_logical_cores: Option<u32>,

    /// YAML profile with expected core counts; flags override its values
    #[arg(long, value_name = "PATH")]
    pub profile: Option<PathBuf>,

    /// Platform family whose inventory command and parser are used (windows, linux)
    #[arg(long, value_name = "PLATFORM")]
    pub platform: Option<PlatformFamily>,

    /// Parse previously recorded inventory output instead of running the command
    #[arg(long, value_name = "PATH")]
    pub from_file: Option<PathBuf>,

    /// Seconds to wait for the inventory command (0 disables the timeout) [default: 30]
    #[arg(long, value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Save the raw inventory output in this directory
    #[arg(long, value_name = "DIR")]
    pub raw_output_dir: Option<PathBuf>,

    /// Print a JSON report of the topology and verdicts to stdout; console logs move to stderr
    #[arg(long)]
    pub json: bool,

    /// Log level or filter directive [env: LOG_LEVEL]
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Log destination: console, file, both or none [env: LOG_OUTPUT]
    #[arg(long, value_name = "OUTPUT")]
    pub log_output: Option<LogOutput>,

    /// Log format: human or json [env: LOG_FORMAT]
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Log file, truncated on every run [env: LOG_FILE_PATH]
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Logging settings from the environment, overridden by explicit flags.
    ///
    /// With `--json`, console logs go to stderr so stdout holds only the report.
    pub fn log_settings(&self) -> Result<LogSettings> {
        let mut settings = LogSettings::from_env()?;

        if self.json {
            settings.console = ConsoleStream::Stderr;
        }

        if let Some(level) = &self.log_level {
            settings.level = level.clone();
        }
        if let Some(output) = self.log_output {
            settings.output = output;
        }
        if let Some(format) = self.log_format {
            settings.format = format;
        }
        if let Some(path) = &self.log_file {
            settings.file_path = path.clone();
        }

        Ok(settings)
    }
}
