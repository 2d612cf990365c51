//! Project name and Next.js version validation
//!
//! Project names follow npm package naming rules, since the generated
//! directory name becomes the `name` field of the project's `package.json`.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

/// npm limit on package name length
pub const MAX_NAME_LENGTH: usize = 214;

/// Node.js built-in modules plus package names that would shadow the stack
pub const RESERVED_NAMES: &[&str] = &[
    "node_modules",
    "test",
    "tests",
    "assert",
    "buffer",
    "child_process",
    "cluster",
    "crypto",
    "dgram",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "https",
    "net",
    "os",
    "path",
    "punycode",
    "querystring",
    "readline",
    "stream",
    "string_decoder",
    "timers",
    "tls",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "zlib",
    "next",
    "react",
    "node",
    "npm",
    "yarn",
];

/// Characters that are unsafe in a directory name on at least one platform
const UNSAFE_CHARACTERS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(@[a-z0-9~-][a-z0-9._~-]*/)?[a-z0-9~-][a-z0-9._~-]*$")
        .expect("project name pattern is valid")
});

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([\^~>=<]+)?(\d+)(\.\d+)?(\.\d+)?(-[a-z]+(\.\d+)?)?$")
        .expect("version pattern is valid")
});

/// Why a project name, version or target directory was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Project name cannot be empty")]
    EmptyName,

    #[error("Project name must be 214 characters or less")]
    NameTooLong,

    #[error("Project name cannot start with a dot (.) or underscore (_)")]
    LeadingDotOrUnderscore,

    #[error("Project name cannot contain spaces. Use hyphens (-) instead")]
    ContainsSpaces,

    #[error("Project name must be lowercase")]
    NotLowercase,

    #[error(
        "Project name can only contain lowercase letters, numbers, hyphens (-), underscores (_), and dots (.)"
    )]
    InvalidCharacters,

    #[error("\"{0}\" is a reserved name and cannot be used as a project name")]
    Reserved(String),

    #[error("Project name contains invalid characters")]
    UnsafeCharacters,

    #[error("Version is required")]
    EmptyVersion,

    #[error("Invalid version format: \"{0}\". Use format like \"14.0.0\", \"14\", \"latest\", or \"canary\"")]
    InvalidVersion(String),

    #[error("Directory \"{0}\" already exists")]
    DirectoryExists(String),
}

/// Validate a project name. Checks run in a fixed order and the first failure wins.
pub fn validate_project_name(name: &str) -> Result<(), ValidationError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong);
    }
    if name.starts_with('.') || name.starts_with('_') {
        return Err(ValidationError::LeadingDotOrUnderscore);
    }
    if name.contains(' ') {
        return Err(ValidationError::ContainsSpaces);
    }
    if name != name.to_lowercase() {
        return Err(ValidationError::NotLowercase);
    }
    if !NAME_PATTERN.is_match(name) {
        return Err(ValidationError::InvalidCharacters);
    }
    if RESERVED_NAMES.contains(&name) {
        return Err(ValidationError::Reserved(name.to_string()));
    }
    // Scoped names get past the pattern but cannot be used as a directory
    if name.contains(UNSAFE_CHARACTERS) {
        return Err(ValidationError::UnsafeCharacters);
    }

    Ok(())
}

/// Validate a Next.js version: `latest`, `canary`, or a (range-prefixed) version number
pub fn validate_nextjs_version(version: &str) -> Result<(), ValidationError> {
    let version = version.trim();

    if version.is_empty() {
        return Err(ValidationError::EmptyVersion);
    }
    if version == "latest" || version == "canary" {
        return Ok(());
    }
    if !VERSION_PATTERN.is_match(version) {
        return Err(ValidationError::InvalidVersion(version.to_string()));
    }

    Ok(())
}

/// Fail when something is already accessible at `path`
pub fn check_directory_exists(path: &Path) -> Result<(), ValidationError> {
    if std::fs::metadata(path).is_ok() {
        return Err(ValidationError::DirectoryExists(path.display().to_string()));
    }
    Ok(())
}
