use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckerError {
    /// The inventory command could not be started or exited unsuccessfully.
    #[error("Command failed: {command}: {reason}")]
    CommandExecution { command: String, reason: String },

    #[error("Command timed out after {limit:?}: {command}")]
    Timeout { command: String, limit: Duration },

    /// A required field was missing, non-numeric, or the topology is inconsistent.
    #[error("Failed to parse {field}: {reason}")]
    Parse { field: String, reason: String },

    #[error("Invalid core expectation: {0}")]
    InvalidExpectation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CheckerError {
    pub fn command(command: impl Into<String>, reason: impl Into<String>) -> Self {
        CheckerError::CommandExecution {
            command: command.into(),
            reason: reason.into(),
        }
    }

    pub fn parse(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CheckerError::Parse {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the stage that produced this error, used when logging fatal errors.
    pub fn stage(&self) -> &'static str {
        match self {
            CheckerError::CommandExecution { .. } | CheckerError::Timeout { .. } => "command",
            CheckerError::Parse { .. } => "parse",
            CheckerError::InvalidExpectation(_) => "expectation",
            CheckerError::Config(_) => "config",
        }
    }

    pub fn is_command_failure(&self) -> bool {
        matches!(
            self,
            CheckerError::CommandExecution { .. } | CheckerError::Timeout { .. }
        )
    }
}

impl From<serde_yaml_ng::Error> for CheckerError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        CheckerError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for CheckerError {
    fn from(err: serde_json::Error) -> Self {
        CheckerError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CheckerError>;
