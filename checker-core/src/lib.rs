pub mod command_stream;
pub mod error;
pub mod host;
pub mod topology;
pub mod validation;

// Re-export the data model for convenience
pub use error::{CheckerError, Result};
pub use topology::CpuTopology;
pub use validation::{evaluate, CoreExpectation, CoreKind, Outcome, Verdict};
