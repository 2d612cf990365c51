//! Template manifest version against the running CLI

use semver::Version;
use std::fmt;

/// How to get a newer CLI
pub const UPGRADE_COMMAND: &str = "cargo install next-start --force";

/// A template that expects a newer CLI than the one running
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionMismatch {
    pub required: Version,
    pub running: Version,
}

impl fmt::Display for VersionMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Template expects next-start {} or newer, this is {}. Update with: {}",
            self.required, self.running, UPGRADE_COMMAND
        )
    }
}

/// `None` when compatible or when either version can't be read
pub fn check_compatibility(cli_version: &str, template_version: &str) -> Option<VersionMismatch> {
    let running = lenient_parse(cli_version)?;
    let required = lenient_parse(template_version)?;
    (running < required).then_some(VersionMismatch { required, running })
}

/// Accepts `v1.2.3`, `1.2` and `1`
fn lenient_parse(raw: &str) -> Option<Version> {
    let raw = raw.trim();
    let raw = raw.strip_prefix('v').unwrap_or(raw);
    match raw.split('.').count() {
        1 => Version::parse(&format!("{raw}.0.0")).ok(),
        2 => Version::parse(&format!("{raw}.0")).ok(),
        _ => Version::parse(raw).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_template_is_reported() {
        let mismatch = check_compatibility("2.0.0", "2.1.0").unwrap();
        assert_eq!(mismatch.required, Version::new(2, 1, 0));
        assert_eq!(mismatch.running, Version::new(2, 0, 0));

        let message = mismatch.to_string();
        assert!(message.contains("2.1.0 or newer"));
        assert!(message.contains(UPGRADE_COMMAND));
    }

    #[test]
    fn test_bundled_templates_are_compatible() {
        assert_eq!(check_compatibility("2.0.0", "0.1.0"), None);
        assert_eq!(check_compatibility("2.0.0", "2.0.0"), None);
    }

    #[test]
    fn test_partial_and_prefixed_versions() {
        assert!(check_compatibility("v2.0.0", "3").is_some());
        assert!(check_compatibility("2.0", "2.0.1").is_some());
        assert_eq!(check_compatibility("2", "v1.9"), None);
    }

    #[test]
    fn test_unreadable_versions_skip_the_check() {
        assert_eq!(check_compatibility("dev", "0.1.0"), None);
        assert_eq!(check_compatibility("2.0.0", "latest"), None);
    }
}
