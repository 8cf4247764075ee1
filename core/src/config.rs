use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a single search or match is evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionPolicy {
    #[default]
    Sequential,
    /// Score plus-words on the rayon pool through a sharded accumulator.
    Parallel,
}

impl std::str::FromStr for ExecutionPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" | "seq" => Ok(Self::Sequential),
            "parallel" | "par" => Ok(Self::Parallel),
            other => bail!("unknown execution policy {other:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub stop_words: Vec<String>,
    /// Shards in the accumulator used by parallel scoring.
    pub shard_count: usize,
    /// Policy used by the calls that take no explicit one.
    pub execution: ExecutionPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { stop_words: Vec::new(), shard_count: 100, execution: ExecutionPolicy::Sequential }
    }
}

impl SearchConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("parsing search config")
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading search config {}", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Read `SEARCH_STOP_WORDS` (space separated), `SEARCH_SHARD_COUNT` and
    /// `SEARCH_EXECUTION`. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(words) = var("SEARCH_STOP_WORDS") {
            config.stop_words = words.split(' ').filter(|w| !w.is_empty()).map(str::to_string).collect();
        }
        if let Some(count) = var("SEARCH_SHARD_COUNT") {
            config.shard_count = count
                .trim()
                .parse()
                .with_context(|| format!("SEARCH_SHARD_COUNT={count:?} is not a number"))?;
        }
        if let Some(policy) = var("SEARCH_EXECUTION") {
            config.execution = policy.parse()?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn json_fills_defaults() {
        let config = SearchConfig::from_json_str(r#"{"stop_words": ["and", "in"], "execution": "parallel"}"#).unwrap();
        assert_eq!(config.stop_words, vec!["and", "in"]);
        assert_eq!(config.shard_count, 100);
        assert_eq!(config.execution, ExecutionPolicy::Parallel);
    }

    #[test]
    fn vars_override_defaults() {
        let vars: HashMap<&str, &str> =
            [("SEARCH_STOP_WORDS", " and  in "), ("SEARCH_SHARD_COUNT", "8"), ("SEARCH_EXECUTION", "PAR")].into();
        let config = SearchConfig::from_vars(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.stop_words, vec!["and", "in"]);
        assert_eq!(config.shard_count, 8);
        assert_eq!(config.execution, ExecutionPolicy::Parallel);
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(SearchConfig::from_vars(|k| (k == "SEARCH_SHARD_COUNT").then(|| "many".to_string())).is_err());
        assert!(SearchConfig::from_vars(|k| (k == "SEARCH_EXECUTION").then(|| "async".to_string())).is_err());
        assert!(SearchConfig::from_json_str("{").is_err());
    }

    #[test]
    fn reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search.json");
        std::fs::write(&path, r#"{"shard_count": 4}"#).unwrap();
        assert_eq!(SearchConfig::from_path(&path).unwrap().shard_count, 4);
        assert!(SearchConfig::from_path(dir.path().join("missing.json")).is_err());
    }
}
