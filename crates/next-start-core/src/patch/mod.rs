//! Targeted text substitutions on generated project files
//!
//! Generated files come from upstream generators whose formatting can drift
//! between releases, so every rule is best-effort: a rule whose pattern is
//! not found is reported as [`RuleOutcome::Unmatched`] rather than failing.
//! Only reading or writing the file itself is an error.

mod package_json;

pub use package_json::merge_package_scripts;

use anyhow::{Context, Result};
use regex::{NoExpand, Regex};
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

/// What a rule looks for
#[derive(Debug, Clone)]
pub enum Pattern {
    Literal(String),
    Regex(Regex),
}

/// A single substitution applied to the first match of its pattern
#[derive(Debug, Clone)]
pub struct PatchRule {
    description: String,
    pattern: Pattern,
    replacement: String,
    guard: Option<String>,
}

impl PatchRule {
    /// Replace the first occurrence of `find`
    pub fn literal(
        description: impl Into<String>,
        find: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            pattern: Pattern::Literal(find.into()),
            replacement: replacement.into(),
            guard: None,
        }
    }

    /// Replace the first match of `pattern`. The replacement is inserted
    /// literally, `$` has no special meaning.
    pub fn regex(
        description: impl Into<String>,
        pattern: &str,
        replacement: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            description: description.into(),
            pattern: Pattern::Regex(Regex::new(pattern)?),
            replacement: replacement.into(),
            guard: None,
        })
    }

    /// Skip the rule when `marker` is already present in the file
    pub fn unless_contains(mut self, marker: impl Into<String>) -> Self {
        self.guard = Some(marker.into());
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    fn apply(&self, text: &str) -> (Option<String>, RuleOutcome) {
        if let Some(marker) = &self.guard {
            if text.contains(marker.as_str()) {
                return (None, RuleOutcome::AlreadyApplied);
            }
        }

        let patched = match &self.pattern {
            Pattern::Literal(find) => text
                .contains(find.as_str())
                .then(|| text.replacen(find.as_str(), &self.replacement, 1)),
            Pattern::Regex(re) => re
                .is_match(text)
                .then(|| re.replace(text, NoExpand(&self.replacement)).into_owned()),
        };

        match patched {
            Some(patched) => (Some(patched), RuleOutcome::Applied),
            None => (None, RuleOutcome::Unmatched),
        }
    }
}

/// Result of one rule against one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    Applied,
    AlreadyApplied,
    Unmatched,
}

/// Per-rule outcomes for one file, in rule order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchReport {
    pub outcomes: Vec<(String, RuleOutcome)>,
}

impl PatchReport {
    /// Whether any rule changed the text
    pub fn changed(&self) -> bool {
        self.outcomes
            .iter()
            .any(|(_, outcome)| *outcome == RuleOutcome::Applied)
    }

    /// Descriptions of rules whose pattern was not found
    pub fn unmatched(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| *outcome == RuleOutcome::Unmatched)
            .map(|(description, _)| description.as_str())
    }

    pub fn outcome(&self, description: &str) -> Option<RuleOutcome> {
        self.outcomes
            .iter()
            .find(|(d, _)| d == description)
            .map(|(_, outcome)| *outcome)
    }
}

/// Apply rules in order to the evolving text
pub fn apply_rules(text: &str, rules: &[PatchRule]) -> (String, PatchReport) {
    let mut current = text.to_string();
    let mut report = PatchReport::default();

    for rule in rules {
        let (patched, outcome) = rule.apply(&current);
        if let Some(patched) = patched {
            current = patched;
        }
        report.outcomes.push((rule.description.clone(), outcome));
    }

    (current, report)
}

/// Read `path`, apply `rules`, and write back only if something changed
pub async fn patch_file(path: &Path, rules: &[PatchRule]) -> Result<PatchReport> {
    let original = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let (patched, report) = apply_rules(&original, rules);

    if report.changed() {
        fs::write(path, patched)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    for description in report.unmatched() {
        warn!(file = %path.display(), rule = description, "patch pattern not found");
    }
    debug!(file = %path.display(), ?report, "patched file");

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const LAYOUT: &str = r#"import type { Metadata } from "next";
import "./globals.css";

export const metadata: Metadata = {
  title: "Create Next App",
  description: "Generated by create next app",
};

export default function RootLayout({ children }) {
  return (
    <html lang="en">
      <body>
        {children}
      </body>
    </html>
  );
}
"#;

    fn toaster_rules() -> Vec<PatchRule> {
        vec![
            PatchRule::literal(
                "import Toaster",
                r#"import "./globals.css";"#,
                "import \"./globals.css\";\nimport { Toaster } from \"@/components/ui/sonner\";",
            )
            .unless_contains("@/components/ui/sonner"),
            PatchRule::literal(
                "render Toaster",
                "{children}",
                "{children}\n        <Toaster richColors />",
            )
            .unless_contains("<Toaster"),
        ]
    }

    #[test]
    fn test_literal_rules_apply() {
        let (patched, report) = apply_rules(LAYOUT, &toaster_rules());

        assert!(patched.contains("import { Toaster } from \"@/components/ui/sonner\";"));
        assert!(patched.contains("{children}\n        <Toaster richColors />"));
        assert_eq!(report.outcome("import Toaster"), Some(RuleOutcome::Applied));
        assert_eq!(report.outcome("render Toaster"), Some(RuleOutcome::Applied));
    }

    #[test]
    fn test_guard_prevents_double_patching() {
        let (once, _) = apply_rules(LAYOUT, &toaster_rules());
        let (twice, report) = apply_rules(&once, &toaster_rules());

        assert_eq!(once, twice);
        assert!(!report.changed());
        assert_eq!(
            report.outcome("render Toaster"),
            Some(RuleOutcome::AlreadyApplied)
        );
    }

    #[test]
    fn test_unmatched_rule_leaves_text_untouched() {
        let rules = vec![PatchRule::literal("missing", "<main>", "<main id=\"root\">")];
        let (patched, report) = apply_rules(LAYOUT, &rules);

        assert_eq!(patched, LAYOUT);
        assert_eq!(report.unmatched().collect::<Vec<_>>(), vec!["missing"]);
    }

    #[test]
    fn test_regex_replaces_first_match_only() {
        let text = "FROM node:18-alpine AS base\nFROM node:18-alpine AS runner\n";
        let rules = vec![
            PatchRule::regex("base image", r"FROM node:.*-alpine AS base", "FROM node:20.11.0-alpine AS base")
                .unwrap(),
        ];
        let (patched, _) = apply_rules(text, &rules);
        assert_eq!(
            patched,
            "FROM node:20.11.0-alpine AS base\nFROM node:18-alpine AS runner\n"
        );
    }

    #[test]
    fn test_regex_replacement_is_literal() {
        let rules = vec![PatchRule::regex("price", r"PRICE", "$1 and ${name}").unwrap()];
        let (patched, _) = apply_rules("cost: PRICE", &rules);
        assert_eq!(patched, "cost: $1 and ${name}");
    }

    #[test]
    fn test_multiline_regex_block() {
        let rules = vec![PatchRule::regex(
            "metadata",
            r"(?s)export const metadata: Metadata = \{.*?\};",
            "export const metadata: Metadata = {\n  title: BRAND.productName,\n};",
        )
        .unwrap()];
        let (patched, report) = apply_rules(LAYOUT, &rules);
        assert!(report.changed());
        assert!(patched.contains("title: BRAND.productName"));
        assert!(!patched.contains("Create Next App"));
        assert!(patched.contains("export default function RootLayout"));
    }

    #[test]
    fn test_invalid_regex_is_rejected() {
        assert!(PatchRule::regex("broken", r"(unclosed", "").is_err());
    }

    #[tokio::test]
    async fn test_patch_file_writes_only_on_change() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("layout.tsx");
        std::fs::write(&path, LAYOUT).unwrap();

        let report = patch_file(&path, &toaster_rules()).await.unwrap();
        assert!(report.changed());
        let patched = std::fs::read_to_string(&path).unwrap();
        assert!(patched.contains("<Toaster richColors />"));

        let again = patch_file(&path, &toaster_rules()).await.unwrap();
        assert!(!again.changed());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), patched);
    }

    #[tokio::test]
    async fn test_patch_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let result = patch_file(&temp.path().join("nope.tsx"), &toaster_rules()).await;
        assert!(result.is_err());
    }
}
