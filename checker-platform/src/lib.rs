//! Platform-specific CPU topology resolution.
//!
//! Each supported platform family has exactly one inventory command and one
//! parser for its output. The [`PlatformRegistry`] maps a family to its
//! parser once per run, and the [`TopologyResolver`] drives a
//! [`CommandRunner`] and hands the raw text to that parser.

pub mod providers;
pub mod registry;
pub mod resolver;
pub mod runner;
pub mod traits;

// Re-export commonly used items
pub use registry::{PlatformFamily, PlatformRegistry};
pub use resolver::TopologyResolver;
pub use runner::{FileRunner, SystemRunner};
pub use traits::{CommandRunner, InventoryCommand, TopologyParser};
