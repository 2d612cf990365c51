//! Project configuration threaded through every step

use std::path::{Path, PathBuf};

/// Default project name offered by the name prompt
pub const DEFAULT_PROJECT_NAME: &str = "my-app";

/// Default Next.js version offered by the version prompt
pub const DEFAULT_NEXTJS_VERSION: &str = "latest";

/// Feature switches parsed from the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// Include the admin dashboard, login, form-table and mock API
    pub admin: bool,
    /// Skip the git commits made during setup
    pub no_git: bool,
    /// Offer unit and end-to-end test framework setup
    pub tests: bool,
}

/// Everything the steps need to know about the project being generated.
///
/// Built once after the prompts and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    pub name: String,
    pub framework_version: String,
    pub flags: Flags,
}

impl ProjectConfig {
    pub fn new(name: impl Into<String>, framework_version: impl Into<String>, flags: Flags) -> Self {
        Self {
            name: name.into(),
            framework_version: framework_version.into(),
            flags,
        }
    }

    /// Directory the generator creates for this project under `base`
    pub fn project_dir(&self, base: &Path) -> PathBuf {
        base.join(&self.name)
    }

    /// Generator package passed to npx, e.g. `create-next-app@14.2.0`
    pub fn generator_package(&self) -> String {
        if self.framework_version == DEFAULT_NEXTJS_VERSION {
            "create-next-app".to_string()
        } else {
            format!("create-next-app@{}", self.framework_version)
        }
    }
}
