use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::HookSource;
use crate::error::Error;

/// Manifest file names probed by `discover`, in preference order
pub const MANIFEST_FILE_NAMES: [&str; 2] = [".pre-commit-config.yaml", ".pre-commit-config.yml"];

/// The parsed manifest: the top-level `repos` sequence plus the handful of
/// global settings the consuming framework reads from the same file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Ordered hook source entries
    pub repos: Vec<HookSource>,

    /// Default language runtime versions, keyed by language name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub default_language_version: BTreeMap<String, String>,

    /// Global file-exclusion regex applied before any per-hook filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    /// Stop at the first failing hook
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_fast: Option<bool>,

    /// Minimum framework version this manifest requires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_pre_commit_version: Option<String>,
}

impl Manifest {
    /// Parse a manifest from YAML. Unknown keys are rejected.
    pub fn parse(content: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Serialize to canonical YAML. Parsing the output yields an equal
    /// `Manifest`: optional fields left at their defaults are omitted, so
    /// normalization never invents keys.
    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load a manifest from a file
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!("loading manifest from {:?}", path);
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest file: {:?}", path))?;

        Self::parse(&content).with_context(|| format!("Failed to parse manifest file: {:?}", path))
    }

    /// Save the manifest in canonical form, atomically (temp file + rename)
    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = self.to_yaml().context("Failed to serialize manifest")?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("Manifest path has no file name: {:?}", path))?;
        let temp_path = match path.parent() {
            Some(parent) => parent.join(format!(".{}.tmp", file_name)),
            None => PathBuf::from(format!(".{}.tmp", file_name)),
        };

        fs::write(&temp_path, yaml)
            .with_context(|| format!("Failed to write temp manifest file: {:?}", temp_path))?;

        // Atomic on POSIX systems
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to replace manifest file: {:?}", path))?;

        Ok(())
    }

    /// Look for a manifest in `dir`, probing the standard file names
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        for name in MANIFEST_FILE_NAMES {
            let candidate = dir.join(name);
            if candidate.exists() {
                tracing::debug!("discovered manifest at {:?}", candidate);
                return Some(candidate);
            }
        }
        None
    }

    /// Total hook invocation count across all sources
    pub fn hook_count(&self) -> usize {
        self.repos.iter().map(|source| source.hooks.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    const SAMPLE: &str = r#"
repos:
  - repo: https://github.com/pre-commit/pre-commit-hooks
    rev: v4.5.0
    hooks:
      - id: check-merge-conflict
      - id: trailing-whitespace
      - id: end-of-file-fixer
  - repo: https://github.com/psf/black-pre-commit-mirror
    rev: 24.1.1
    hooks:
      - id: black
        language_version: python3.11
  - repo: https://github.com/pycqa/flake8
    rev: 7.0.0
    hooks:
      - id: flake8
        additional_dependencies:
          - flake8-bugbear==24.1.17
  - repo: https://github.com/asottile/pyupgrade
    rev: v3.15.0
    hooks:
      - id: pyupgrade
        args: ["--py37-plus"]
"#;

    #[test]
    fn test_parse_sample() {
        let manifest = Manifest::parse(SAMPLE).unwrap();

        assert_eq!(manifest.repos.len(), 4);
        assert_eq!(manifest.hook_count(), 6);

        let first = &manifest.repos[0];
        assert_eq!(first.repo, "https://github.com/pre-commit/pre-commit-hooks");
        assert_eq!(first.rev, "v4.5.0");
        assert_eq!(first.hooks[0].id, "check-merge-conflict");

        let black = &manifest.repos[1].hooks[0];
        assert_eq!(black.language_version.as_deref(), Some("python3.11"));

        let pyupgrade = &manifest.repos[3].hooks[0];
        assert_eq!(pyupgrade.args, vec!["--py37-plus"]);
    }

    #[test]
    fn test_parse_global_settings() {
        let content = r#"
fail_fast: true
exclude: ^vendored/
default_language_version:
  python: python3.11
repos: []
"#;
        let manifest = Manifest::parse(content).unwrap();
        assert_eq!(manifest.fail_fast, Some(true));
        assert_eq!(manifest.exclude.as_deref(), Some("^vendored/"));
        assert_eq!(
            manifest.default_language_version.get("python"),
            Some(&"python3.11".to_string())
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let content = r#"
repos:
  - repo: https://github.com/psf/black
    rev: 24.1.1
    branch: main
    hooks:
      - id: black
"#;
        assert!(Manifest::parse(content).is_err());
    }

    #[test]
    fn test_missing_repos_rejected() {
        assert!(Manifest::parse("fail_fast: true\n").is_err());
    }

    #[test]
    fn test_round_trip_is_identity() {
        let manifest = Manifest::parse(SAMPLE).unwrap();
        let yaml = manifest.to_yaml().unwrap();
        let reparsed = Manifest::parse(&yaml).unwrap();

        assert_eq!(manifest, reparsed);

        // Serializing again must produce the same bytes
        assert_eq!(yaml, reparsed.to_yaml().unwrap());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".pre-commit-config.yaml");

        let manifest = Manifest::parse(SAMPLE).unwrap();
        manifest.save(&path).unwrap();

        let loaded = Manifest::load(&path).unwrap();
        assert_eq!(loaded, manifest);

        // No temp file left behind
        assert!(!dir.path().join("..pre-commit-config.yaml.tmp").exists());
    }

    #[test]
    fn test_discover_prefers_yaml_spelling() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".pre-commit-config.yml"), "repos: []\n").unwrap();

        let found = Manifest::discover(dir.path()).unwrap();
        assert_eq!(
            found.file_name().and_then(|n| n.to_str()),
            Some(".pre-commit-config.yml")
        );

        fs::write(dir.path().join(".pre-commit-config.yaml"), "repos: []\n").unwrap();
        let found = Manifest::discover(dir.path()).unwrap();
        assert_eq!(
            found.file_name().and_then(|n| n.to_str()),
            Some(".pre-commit-config.yaml")
        );
    }

    #[test]
    fn test_discover_empty_dir() {
        let dir = tempdir().unwrap();
        assert!(Manifest::discover(dir.path()).is_none());
    }
}
