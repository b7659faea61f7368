use serde::{Deserialize, Serialize};

/// One external hook-provider repository plus the hooks drawn from it.
///
/// `repo` is normally a clonable URI; the consuming framework also accepts
/// the sentinels `local` and `meta`, which reference no repository at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HookSource {
    /// URI of the hook-provider repository (or `local` / `meta`)
    pub repo: String,
    /// Pinned tag or commit, for reproducible tool versions
    pub rev: String,
    /// Ordered hook invocations drawn from this repository
    pub hooks: Vec<HookInvocation>,
}

/// A single hook selected from its providing repository, identified by `id`.
/// Everything else overrides defaults defined by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HookInvocation {
    pub id: String,
    /// Display-name override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Language runtime version override (e.g. `python3.11`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_version: Option<String>,
    /// Regex the changed-file path must match for the hook to run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<String>,
    /// Regex excluding changed-file paths
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
    /// File-type tag filter
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    /// Extra command-line arguments passed to the hook
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// Extra packages installed into the hook's environment
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_dependencies: Vec<String>,
    /// Git stages the hook is limited to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stages: Vec<String>,
}

impl HookSource {
    /// Whether `repo` is one of the framework's non-URI sentinels
    pub fn is_sentinel(&self) -> bool {
        self.repo == "local" || self.repo == "meta"
    }
}
