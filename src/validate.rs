//! Structural checks over a parsed manifest.
//!
//! Everything here is schema-level: no network, no filesystem, no attempt to
//! resolve whether a hook id actually exists in the referenced repository at
//! the pinned rev (that needs the external framework and a clone).

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use url::Url;

use crate::manifest::{HookInvocation, HookSource, Manifest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One validator result, locatable in the document.
/// `source` is the index into `repos`; `hook` is set for per-hook findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub source: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook: Option<String>,
    pub message: String,
}

impl Finding {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.severity)?;
        if let (Some(index), Some(repo)) = (self.source, &self.repo) {
            write!(f, "repos[{}] ({}): ", index, repo)?;
        }
        if let Some(hook) = &self.hook {
            write!(f, "hook `{}`: ", hook)?;
        }
        write!(f, "{}", self.message)
    }
}

/// Run every structural check, returning findings in document order
pub fn validate(manifest: &Manifest) -> Vec<Finding> {
    let mut findings = Vec::new();

    if let Some(pattern) = &manifest.exclude {
        check_regex(&mut findings, None, None, None, "exclude", pattern);
    }

    for (index, source) in manifest.repos.iter().enumerate() {
        validate_source(&mut findings, index, source);
    }

    findings
}

fn validate_source(findings: &mut Vec<Finding>, index: usize, source: &HookSource) {
    let at = |severity, hook: Option<&str>, message: String| Finding {
        severity,
        source: Some(index),
        repo: Some(source.repo.clone()),
        hook: hook.map(str::to_string),
        message,
    };

    if source.is_sentinel() {
        // Sentinel sources reference no repository; the framework ignores
        // their rev entirely
        if !source.rev.trim().is_empty() {
            findings.push(at(
                Severity::Warning,
                None,
                format!("rev `{}` has no effect on a `{}` source", source.rev, source.repo),
            ));
        }
    } else if Url::parse(&source.repo).is_err() {
        findings.push(at(
            Severity::Error,
            None,
            "repo is not a valid URI".to_string(),
        ));
    }

    if !source.is_sentinel() && source.rev.trim().is_empty() {
        findings.push(at(Severity::Error, None, "rev must be non-empty".to_string()));
    }

    if source.hooks.is_empty() {
        findings.push(at(
            Severity::Warning,
            None,
            "source declares no hooks".to_string(),
        ));
    }

    let mut seen_ids = HashSet::new();
    for hook in &source.hooks {
        if hook.id.trim().is_empty() {
            findings.push(at(
                Severity::Error,
                None,
                "hook id must be non-empty".to_string(),
            ));
        } else if !seen_ids.insert(hook.id.as_str()) {
            findings.push(at(
                Severity::Error,
                Some(&hook.id),
                "hook id listed twice for the same source".to_string(),
            ));
        }

        validate_hook(findings, index, &source.repo, hook);
    }
}

fn validate_hook(findings: &mut Vec<Finding>, index: usize, repo: &str, hook: &HookInvocation) {
    if let Some(pattern) = &hook.files {
        check_regex(
            findings,
            Some(index),
            Some(repo),
            Some(&hook.id),
            "files",
            pattern,
        );
    }
    if let Some(pattern) = &hook.exclude {
        check_regex(
            findings,
            Some(index),
            Some(repo),
            Some(&hook.id),
            "exclude",
            pattern,
        );
    }

    for (field, values) in [
        ("types", &hook.types),
        ("args", &hook.args),
        ("additional_dependencies", &hook.additional_dependencies),
        ("stages", &hook.stages),
    ] {
        if values.iter().any(|value| value.trim().is_empty()) {
            findings.push(Finding {
                severity: Severity::Warning,
                source: Some(index),
                repo: Some(repo.to_string()),
                hook: Some(hook.id.clone()),
                message: format!("`{}` contains an empty entry", field),
            });
        }
    }
}

fn check_regex(
    findings: &mut Vec<Finding>,
    source: Option<usize>,
    repo: Option<&str>,
    hook: Option<&str>,
    field: &str,
    pattern: &str,
) {
    if let Err(e) = regex::Regex::new(pattern) {
        findings.push(Finding {
            severity: Severity::Error,
            source,
            repo: repo.map(str::to_string),
            hook: hook.map(str::to_string),
            message: format!("`{}` is not a valid regex: {}", field, e),
        });
    }
}
