use serde::{Deserialize, Serialize};

/// What to do when a key reaches the loader for a path that no rule
/// configures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnconfiguredPathAction {
    /// Log loudly and fail just that load.
    #[default]
    FailRequest,
    /// Log and terminate the process.
    Abort,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CachingConfig {
    #[serde(default)]
    pub on_unconfigured_path: UnconfiguredPathAction,

    #[serde(default)]
    pub rules: Vec<CachingRule>,
}

/// One routing rule: a name matcher plus the TTLs of every operation it
/// caches. Operations left out are not cached for matching names.
///
/// ```toml
/// [[caching.rules]]
/// name = "metafile"
/// match = { suffix = "meta.json" }
/// content = { ttl_secs = 300 }
/// exists = { exists_ttl_secs = 300, absent_ttl_secs = 30 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CachingRule {
    pub name: String,

    #[serde(rename = "match")]
    pub matcher: NameMatcherConfig,

    #[serde(default)]
    pub attributes: Option<TtlConfig>,

    #[serde(default)]
    pub iter: Option<TtlConfig>,

    #[serde(default)]
    pub content: Option<TtlConfig>,

    #[serde(default)]
    pub exists: Option<ExistsTtlConfig>,

    #[serde(default)]
    pub subrange: Option<TtlConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameMatcherConfig {
    Any,
    Exact(String),
    Prefix(String),
    Suffix(String),
    Regex(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct TtlConfig {
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExistsTtlConfig {
    pub exists_ttl_secs: u64,
    pub absent_ttl_secs: u64,
}
