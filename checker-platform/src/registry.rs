//! Platform registry for detecting the platform family and providing its parser.

use checker_core::{CheckerError, Result};
use std::fmt;
use std::str::FromStr;

use crate::providers::{LscpuParser, WmicParser};
use crate::traits::TopologyParser;

/// Platform families with a known inventory command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformFamily {
    /// `wmic` columnar output
    Windows,
    /// `lscpu` key/value output
    LinuxLike,
}

impl PlatformFamily {
    pub fn name(self) -> &'static str {
        match self {
            PlatformFamily::Windows => "windows",
            PlatformFamily::LinuxLike => "linux",
        }
    }
}

impl fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlatformFamily {
    type Err = CheckerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "windows" | "win32" => Ok(PlatformFamily::Windows),
            "linux" | "linux-like" | "unix" => Ok(PlatformFamily::LinuxLike),
            other => Err(CheckerError::Config(format!(
                "unsupported platform '{}', expected one of: {}",
                other,
                PlatformRegistry::supported_platforms().join(", ")
            ))),
        }
    }
}

/// Platform registry mapping a family to its topology parser.
pub struct PlatformRegistry;

impl PlatformRegistry {
    /// Family of the running operating system.
    ///
    /// Everything that is not Windows is expected to provide `lscpu`.
    pub fn current_family() -> PlatformFamily {
        if cfg!(windows) {
            PlatformFamily::Windows
        } else {
            PlatformFamily::LinuxLike
        }
    }

    /// Parser for the given family.
    pub fn parser_for(family: PlatformFamily) -> Box<dyn TopologyParser> {
        match family {
            PlatformFamily::Windows => Box::new(WmicParser),
            PlatformFamily::LinuxLike => Box::new(LscpuParser),
        }
    }

    /// List all accepted platform names.
    pub fn supported_platforms() -> Vec<&'static str> {
        vec!["windows", "win32", "linux", "linux-like", "unix"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_family_has_parser() {
        let parser = PlatformRegistry::parser_for(PlatformRegistry::current_family());
        assert!(!parser.name().is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn test_unix_uses_lscpu() {
        assert_eq!(PlatformRegistry::current_family(), PlatformFamily::LinuxLike);
    }

    #[test]
    fn test_parser_per_family() {
        assert_eq!(PlatformRegistry::parser_for(PlatformFamily::Windows).name(), "wmic");
        assert_eq!(PlatformRegistry::parser_for("Linux".parse().unwrap()).name(), "lscpu");
    }

    #[test]
    fn test_every_supported_name_parses() {
        for name in PlatformRegistry::supported_platforms() {
            assert!(name.parse::<PlatformFamily>().is_ok(), "{name} should parse");
        }
    }

    #[test]
    fn test_unknown_platform_error_lists_choices() {
        let err = "solaris".parse::<PlatformFamily>().unwrap_err();
        assert!(err.to_string().contains("solaris"));
        assert!(err.to_string().contains("windows"));
    }

    #[test]
    fn test_family_display_round_trip() {
        for family in [PlatformFamily::Windows, PlatformFamily::LinuxLike] {
            assert_eq!(family.to_string().parse::<PlatformFamily>().unwrap(), family);
        }
    }
}
