//! Per-operation TTL routing table
//!
//! Built once from `[[caching.rules]]` at startup and shared read-only.

use crate::cache_key::Operation;
use crate::config::caching::{CachingRule, ExistsTtlConfig, NameMatcherConfig, TtlConfig};
use crate::config::ConfigError;
use fancy_regex::Regex;
use std::sync::Arc;
use std::time::Duration;

/// Cache duration(s) configured for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationTtl {
    Single(Duration),
    /// `Exists` results are cached with a different lifetime depending on
    /// whether the object was found.
    Exists { present: Duration, absent: Duration },
}

impl OperationTtl {
    /// TTL for a finished exists check. Single TTLs ignore the flag.
    pub fn for_existence(&self, exists: bool) -> Duration {
        match *self {
            Self::Single(ttl) => ttl,
            Self::Exists { present, absent } => {
                if exists {
                    present
                } else {
                    absent
                }
            }
        }
    }

    pub fn single(&self) -> Duration {
        match *self {
            Self::Single(ttl) => ttl,
            Self::Exists { present, .. } => present,
        }
    }
}

/// Outcome of a successful policy lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPolicy<'a> {
    pub rule: &'a str,
    pub ttl: OperationTtl,
}

#[derive(Debug)]
enum NameMatcher {
    Any,
    Exact(String),
    Prefix(String),
    Suffix(String),
    Regex(Regex),
}

impl NameMatcher {
    fn compile(config: &NameMatcherConfig) -> Result<Self, ConfigError> {
        Ok(match config {
            NameMatcherConfig::Any => Self::Any,
            NameMatcherConfig::Exact(s) => Self::Exact(s.clone()),
            NameMatcherConfig::Prefix(s) => Self::Prefix(s.clone()),
            NameMatcherConfig::Suffix(s) => Self::Suffix(s.clone()),
            NameMatcherConfig::Regex(pattern) => Self::Regex(Regex::new(pattern).map_err(|e| {
                ConfigError::Validation(format!("invalid regex '{}': {}", pattern, e))
            })?),
        })
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(s) => name == s,
            Self::Prefix(s) => name.starts_with(s.as_str()),
            Self::Suffix(s) => name.ends_with(s.as_str()),
            // A regex that fails at match time (backtrack limit) is a miss.
            Self::Regex(re) => re.is_match(name).unwrap_or(false),
        }
    }

    /// Higher sorts first: exact > prefix/suffix (longer first) > regex > any.
    fn specificity(&self) -> (u8, usize) {
        match self {
            Self::Exact(s) => (3, s.len()),
            Self::Prefix(s) | Self::Suffix(s) => (2, s.len()),
            Self::Regex(_) => (1, 0),
            Self::Any => (0, 0),
        }
    }
}

#[derive(Debug)]
struct CompiledRule {
    name: Arc<str>,
    matcher: NameMatcher,
    attributes: Option<OperationTtl>,
    list: Option<OperationTtl>,
    content: Option<OperationTtl>,
    exists: Option<OperationTtl>,
    subrange: Option<OperationTtl>,
}

impl CompiledRule {
    fn ttl_for(&self, operation: Operation) -> Option<OperationTtl> {
        match operation {
            Operation::Attributes => self.attributes,
            Operation::List => self.list,
            Operation::Content => self.content,
            Operation::Exists => self.exists,
            Operation::Subrange => self.subrange,
        }
    }
}

#[derive(Debug, Default)]
pub struct CachingPolicy {
    rules: Vec<CompiledRule>,
}

impl CachingPolicy {
    pub fn from_rules(rules: &[CachingRule]) -> Result<Self, ConfigError> {
        let mut compiled = Vec::with_capacity(rules.len());

        for rule in rules {
            compiled.push(CompiledRule {
                name: Arc::from(rule.name.as_str()),
                matcher: NameMatcher::compile(&rule.matcher)?,
                attributes: single_ttl(&rule.name, "attributes", rule.attributes.as_ref())?,
                list: single_ttl(&rule.name, "iter", rule.iter.as_ref())?,
                content: single_ttl(&rule.name, "content", rule.content.as_ref())?,
                exists: exists_ttl(&rule.name, rule.exists.as_ref())?,
                subrange: single_ttl(&rule.name, "subrange", rule.subrange.as_ref())?,
            });
        }

        // Stable sort keeps declaration order among equally specific rules.
        compiled.sort_by(|a, b| b.matcher.specificity().cmp(&a.matcher.specificity()));

        Ok(Self { rules: compiled })
    }

    /// Finds the most specific rule that matches `name` and configures
    /// `operation`. `None` means the path was never meant to be cached for
    /// this operation.
    pub fn resolve(&self, operation: Operation, name: &str) -> Option<ResolvedPolicy<'_>> {
        self.rules
            .iter()
            .filter(|rule| rule.matcher.matches(name))
            .find_map(|rule| {
                rule.ttl_for(operation).map(|ttl| ResolvedPolicy {
                    rule: &rule.name,
                    ttl,
                })
            })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn single_ttl(
    rule: &str,
    operation: &str,
    config: Option<&TtlConfig>,
) -> Result<Option<OperationTtl>, ConfigError> {
    config
        .map(|c| Ok(OperationTtl::Single(positive_secs(rule, operation, c.ttl_secs)?)))
        .transpose()
}

fn exists_ttl(rule: &str, config: Option<&ExistsTtlConfig>) -> Result<Option<OperationTtl>, ConfigError> {
    config
        .map(|c| {
            Ok(OperationTtl::Exists {
                present: positive_secs(rule, "exists", c.exists_ttl_secs)?,
                absent: positive_secs(rule, "exists (absent)", c.absent_ttl_secs)?,
            })
        })
        .transpose()
}

fn positive_secs(rule: &str, operation: &str, secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::Validation(format!(
            "rule '{}': {} TTL must be greater than zero",
            rule, operation
        )));
    }
    Ok(Duration::from_secs(secs))
}
