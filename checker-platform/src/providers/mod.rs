//! Parser implementations, one per platform family.
//!
//! Parsers only transform text, so all of them are compiled on every
//! platform and can be tested anywhere.

pub mod lscpu;
pub mod wmic;

pub use lscpu::LscpuParser;
pub use wmic::WmicParser;

use checker_core::{CheckerError, Result};

/// Parse a count field as a non-negative integer.
pub(crate) fn parse_count(field: &str, value: &str) -> Result<u32> {
    value.trim().parse::<u32>().map_err(|_| {
        CheckerError::parse(
            field,
            format!("'{}' is not a non-negative integer", value.trim()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("CPU(s)", " 8 ").unwrap(), 8);
        assert!(parse_count("CPU(s)", "-1").is_err());
        assert!(parse_count("CPU(s)", "eight").is_err());
        assert!(parse_count("CPU(s)", "").is_err());
    }
}
