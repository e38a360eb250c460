use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PARAM_STRING: &str = "<*>";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("depth must be at least 3, got {0}")]
    DepthTooSmall(usize),
}

/// Tuning knobs for the miner. All fields have serde defaults so a
/// config can be loaded from a partial JSON/TOML document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MinerConfig {
    /// Total depth of the prefix tree, counting the root and the
    /// token-count level; the tree branches on the first `depth - 2`
    /// token positions. Minimum is 3.
    pub depth: usize,
    /// Minimum similarity for a line to join an existing cluster
    /// instead of starting a new one.
    pub sim_threshold: f64,
    /// Cap on child edges per tree node.
    pub max_children: usize,
    /// LRU capacity of the cluster store; 0 keeps every cluster.
    pub max_clusters: usize,
    /// Substrings replaced by a space before tokenization.
    pub extra_delimiters: Vec<String>,
    /// Wildcard marker used in templates. Assumed to never appear
    /// verbatim in input lines.
    pub param_string: String,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            sim_threshold: 0.4,
            max_children: 100,
            max_clusters: 0,
            extra_delimiters: Vec::new(),
            param_string: DEFAULT_PARAM_STRING.to_string(),
        }
    }
}

impl MinerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth < 3 {
            return Err(ConfigError::DepthTooSmall(self.depth));
        }
        Ok(())
    }

    /// Number of tree levels that branch on token values.
    pub(crate) fn max_node_depth(&self) -> usize {
        self.depth - 2
    }
}
