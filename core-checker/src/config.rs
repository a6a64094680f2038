//! Check options assembled from the command line and an optional profile file.
//!
//! A profile captures what a machine class is supposed to look like:
//!
//! ```yaml
//! expected:
//!   physical: 8
//!   logical: 16
//! timeout_secs: 10
//! platform: linux
//! ```

use checker_core::{CheckerError, CoreExpectation, CoreKind, Result};
use checker_platform::runner::DEFAULT_TIMEOUT;
use checker_platform::{PlatformFamily, PlatformRegistry};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Args;

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckProfile {
    /// Core kind name to expected count, in file order.
    #[serde(default)]
    pub expected: IndexMap<String, u32>,
    pub timeout_secs: Option<u64>,
    pub platform: Option<String>,
}

impl CheckProfile {
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CheckerError::Config(format!("could not read profile {}: {}", path.display(), e))
        })?;
        let profile: Self = serde_yaml_ng::from_str(&contents)?;
        Ok(profile)
    }

    /// Expectations declared by the profile, rejecting unknown or repeated kinds.
    pub fn expectations(&self) -> Result<Vec<CoreExpectation>> {
        let mut expectations: Vec<CoreExpectation> = Vec::with_capacity(self.expected.len());
        for (kind, count) in &self.expected {
            let expectation = CoreExpectation::parse(kind, *count)?;
            if expectations.iter().any(|e| e.kind == expectation.kind) {
                return Err(CheckerError::InvalidExpectation(format!(
                    "{} core count is specified more than once in the profile",
                    expectation.kind
                )));
            }
            expectations.push(expectation);
        }
        Ok(expectations)
    }
}

/// Everything a single check run needs, after merging flags over the profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    pub expectations: Vec<CoreExpectation>,
    pub platform: PlatformFamily,
    pub timeout: Option<Duration>,
    pub from_file: Option<PathBuf>,
    pub raw_output_dir: Option<PathBuf>,
    pub json: bool,
}

impl CheckOptions {
    pub fn from_args(args: &Args) -> Result<Self> {
        let profile = match &args.profile {
            Some(path) => CheckProfile::load_from_path(path)?,
            None => CheckProfile::default(),
        };
        Self::merge(args, &profile)
    }

    /// Flags win over profile values, per core kind and per field.
    pub fn merge(args: &Args, profile: &CheckProfile) -> Result<Self> {
        let mut expectations = profile.expectations()?;
        let overrides = [
            (CoreKind::Physical, args.expected_physical_cores),
            (CoreKind::Logical, args.expected_logical_cores),
        ];
        for (kind, count) in overrides {
            let Some(count) = count else { continue };
            match expectations.iter_mut().find(|e| e.kind == kind) {
                Some(existing) => existing.expected_count = count,
                None => expectations.push(CoreExpectation::new(kind, count)),
            }
        }

        let platform = match (args.platform, &profile.platform) {
            (Some(platform), _) => platform,
            (None, Some(name)) => name.parse()?,
            (None, None) => PlatformRegistry::current_family(),
        };

        let timeout = match args.timeout_secs.or(profile.timeout_secs) {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => Some(DEFAULT_TIMEOUT),
        };

        Ok(Self {
            expectations,
            platform,
            timeout,
            from_file: args.from_file.clone(),
            raw_output_dir: args.raw_output_dir.clone(),
            json: args.json,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["core-checker"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    fn profile(yaml: &str) -> CheckProfile {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    #[test]
    fn test_no_flags_no_profile_has_no_expectations() {
        let options = CheckOptions::merge(&args(&[]), &CheckProfile::default()).unwrap();
        assert!(options.expectations.is_empty());
        assert_eq!(options.platform, PlatformRegistry::current_family());
        assert_eq!(options.timeout, Some(DEFAULT_TIMEOUT));
    }

    #[test]
    fn test_flags_are_physical_then_logical() {
        let options = CheckOptions::merge(&args(&["-l", "8", "-p", "4"]), &CheckProfile::default())
            .unwrap();
        assert_eq!(
            options.expectations,
            vec![
                CoreExpectation::new(CoreKind::Physical, 4),
                CoreExpectation::new(CoreKind::Logical, 8),
            ]
        );
    }

    #[test]
    fn test_profile_order_is_kept_and_flags_override() {
        let profile = profile("expected:\n  logical: 16\n  physical: 8\n");
        let options = CheckOptions::merge(&args(&["-p", "6"]), &profile).unwrap();
        assert_eq!(
            options.expectations,
            vec![
                CoreExpectation::new(CoreKind::Logical, 16),
                CoreExpectation::new(CoreKind::Physical, 6),
            ]
        );
    }

    #[test]
    fn test_unknown_kind_in_profile_rejected() {
        let profile = profile("expected:\n  hyperthreads: 2\n");
        let err = CheckOptions::merge(&args(&[]), &profile).unwrap_err();
        assert!(matches!(err, CheckerError::InvalidExpectation(_)));
    }

    #[test]
    fn test_repeated_kind_in_profile_rejected() {
        let profile = profile("expected:\n  physical: 2\n  p: 2\n");
        let err = CheckOptions::merge(&args(&[]), &profile).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_unknown_profile_key_rejected() {
        let result: std::result::Result<CheckProfile, _> =
            serde_yaml_ng::from_str("expected_cores: 4\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_timeout_resolution() {
        let profile = profile("timeout_secs: 5\n");
        let from_profile = CheckOptions::merge(&args(&[]), &profile).unwrap();
        assert_eq!(from_profile.timeout, Some(Duration::from_secs(5)));

        let from_flag = CheckOptions::merge(&args(&["--timeout-secs", "2"]), &profile).unwrap();
        assert_eq!(from_flag.timeout, Some(Duration::from_secs(2)));

        let disabled = CheckOptions::merge(&args(&["--timeout-secs", "0"]), &profile).unwrap();
        assert_eq!(disabled.timeout, None);
    }

    #[test]
    fn test_platform_resolution() {
        let profile = profile("platform: windows\n");
        let from_profile = CheckOptions::merge(&args(&[]), &profile).unwrap();
        assert_eq!(from_profile.platform, PlatformFamily::Windows);

        let from_flag = CheckOptions::merge(&args(&["--platform", "linux"]), &profile).unwrap();
        assert_eq!(from_flag.platform, PlatformFamily::LinuxLike);

        let bad = self::profile("platform: amiga\n");
        assert!(CheckOptions::merge(&args(&[]), &bad).is_err());
    }

    #[test]
    fn test_load_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("profile.yaml");
        std::fs::write(&path, "expected:\n  physical: 2\n  logical: 4\n").unwrap();

        let loaded = CheckProfile::load_from_path(&path).unwrap();
        assert_eq!(loaded.expected.get("physical"), Some(&2));
        assert_eq!(loaded.expected.get("logical"), Some(&4));
    }

    #[test]
    fn test_missing_profile_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = CheckProfile::load_from_path(&temp_dir.path().join("nope.yaml")).unwrap_err();
        assert_eq!(err.stage(), "config");
    }
}
