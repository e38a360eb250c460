use ahash::AHashMap;

use crate::cluster::{ClusterId, LogCluster};
use crate::config::MinerConfig;
use crate::similarity::seq_distance;
use crate::store::ClusterStore;
use crate::tokenize::has_digit;

#[derive(Default)]
struct Node {
    children: AHashMap<String, Node>,
    cluster_ids: Vec<ClusterId>,
}

/// Fixed-depth prefix tree over tokenized log lines.
///
/// The root branches on token count (decimal string keys); deeper
/// levels branch on the token at the corresponding position, or on the
/// wildcard marker. Cluster ids are stored at leaves: either at the
/// maximum node depth or where the template runs out of tokens,
/// whichever comes first.
pub struct PrefixTree {
    root: Node,
    max_node_depth: usize,
    max_children: usize,
    wildcard: String,
}

impl PrefixTree {
    pub fn new(config: &MinerConfig) -> Self {
        Self {
            root: Node::default(),
            max_node_depth: config.max_node_depth(),
            max_children: config.max_children,
            wildcard: config.param_string.clone(),
        }
    }

    /// Descends to the leaf for `tokens` and returns the best-matching
    /// live cluster id there, or `None` when no prefix path exists or
    /// no candidate reaches the similarity threshold.
    pub fn search(
        &self,
        tokens: &[String],
        sim_threshold: f64,
        include_params: bool,
        store: &ClusterStore,
    ) -> Option<ClusterId> {
        let token_count = tokens.len();
        let mut node = self.root.children.get(token_count.to_string().as_str())?;

        // Empty log line: the count node is its own single-cluster bucket.
        if token_count == 0 {
            return node
                .cluster_ids
                .first()
                .copied()
                .filter(|&id| store.peek(id).is_some());
        }

        let mut depth = 1;
        for token in tokens {
            if depth >= self.max_node_depth || depth >= token_count {
                break;
            }
            node = match node.children.get(token.as_str()) {
                Some(child) => child,
                None => node.children.get(self.wildcard.as_str())?,
            };
            depth += 1;
        }

        self.fast_match(&node.cluster_ids, tokens, sim_threshold, include_params, store)
    }

    /// Scores every live candidate at a leaf and returns the best one.
    /// Ties prefer the more-generalized template (higher wildcard
    /// count), then the first candidate encountered.
    fn fast_match(
        &self,
        cluster_ids: &[ClusterId],
        tokens: &[String],
        sim_threshold: f64,
        include_params: bool,
        store: &ClusterStore,
    ) -> Option<ClusterId> {
        let mut best: Option<ClusterId> = None;
        let mut best_sim = -1.0f64;
        let mut best_params = -1i64;

        for &id in cluster_ids {
            // Stale ids linger after LRU eviction; skip them here.
            let Some(cluster) = store.peek(id) else { continue };
            let (sim, param_count) =
                seq_distance(&cluster.template_tokens, tokens, &self.wildcard, include_params);
            if sim > best_sim || (sim == best_sim && param_count as i64 > best_params) {
                best_sim = sim;
                best_params = param_count as i64;
                best = Some(id);
            }
        }

        if best_sim >= sim_threshold {
            best
        } else {
            None
        }
    }

    /// Splices a newly created cluster into the tree, growing the path
    /// for its template as needed.
    ///
    /// Growth policy per node: tokens containing a digit always route
    /// through the wildcard child. Literal children are added while the
    /// node has room; the last slot under `max_children` is reserved
    /// for the wildcard catch-all.
    pub fn insert(&mut self, cluster: &LogCluster, store: &ClusterStore) {
        let template = &cluster.template_tokens;
        let token_count = template.len();
        let mut node = self
            .root
            .children
            .entry(token_count.to_string())
            .or_default();

        if token_count == 0 {
            node.cluster_ids.push(cluster.id);
            return;
        }

        let mut depth = 1;
        for token in template {
            if depth >= self.max_node_depth || depth >= token_count {
                // Leaf reached: drop ids whose clusters were evicted,
                // then record the new one.
                node.cluster_ids.retain(|&id| store.peek(id).is_some());
                node.cluster_ids.push(cluster.id);
                break;
            }

            let next = if node.children.contains_key(token.as_str()) {
                token.clone()
            } else if has_digit(token) {
                self.wildcard.clone()
            } else if node.children.contains_key(self.wildcard.as_str()) {
                if node.children.len() < self.max_children {
                    token.clone()
                } else {
                    self.wildcard.clone()
                }
            } else if node.children.len() + 1 < self.max_children {
                token.clone()
            } else {
                // One slot left (or none): it belongs to the wildcard.
                self.wildcard.clone()
            };
            node = node.children.entry(next).or_default();
            depth += 1;
        }
    }
}
