use tracing::debug;

use crate::cluster::{ClusterId, LogCluster};
use crate::config::{ConfigError, MinerConfig};
use crate::similarity::merge_template;
use crate::store::ClusterStore;
use crate::tokenize::tokenize;
use crate::tree::PrefixTree;

/// Online log-template miner.
///
/// Owns the prefix tree and the cluster store exclusively; the core is
/// single-threaded and callers must serialize access. `train` mutates
/// the model, `match_line` and `clusters` are read-only.
pub struct Miner {
    config: MinerConfig,
    tree: PrefixTree,
    store: ClusterStore,
    cluster_counter: ClusterId,
}

impl Miner {
    pub fn new(config: MinerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let tree = PrefixTree::new(&config);
        let store = ClusterStore::new(config.max_clusters);
        Ok(Self { config, tree, store, cluster_counter: 0 })
    }

    /// Ingests one line: merges it into the best-matching cluster
    /// (generalizing template positions that differ) or creates a new
    /// cluster and splices it into the tree. Returns the cluster the
    /// line landed in.
    pub fn train(&mut self, content: &str) -> &LogCluster {
        let tokens = tokenize(content, &self.config.extra_delimiters);

        match self
            .tree
            .search(&tokens, self.config.sim_threshold, false, &self.store)
        {
            Some(id) => {
                // get_mut refreshes the cluster's LRU recency as well.
                let cluster = self
                    .store
                    .get_mut(id)
                    .expect("matched cluster is live");
                let merged =
                    merge_template(&cluster.template_tokens, &tokens, &self.config.param_string);
                cluster.template_tokens = merged;
                cluster.size += 1;
                &*cluster
            }
            None => {
                self.cluster_counter += 1;
                let id = self.cluster_counter;
                debug!(cluster_id = id, token_count = tokens.len(), "created new cluster");
                self.store.set(id, LogCluster::new(id, tokens));
                let cluster = self.store.peek(id).expect("cluster was just inserted");
                self.tree.insert(cluster, &self.store);
                self.store.peek(id).expect("cluster was just inserted")
            }
        }
    }

    /// Classifies a line against the trained model without mutating it.
    /// Wildcard positions count toward similarity here, so queries are
    /// not punished by heavy generalization.
    pub fn match_line(&self, content: &str) -> Option<&LogCluster> {
        let tokens = tokenize(content, &self.config.extra_delimiters);
        let id = self
            .tree
            .search(&tokens, self.config.sim_threshold, true, &self.store)?;
        self.store.peek(id)
    }

    /// All live clusters, in creation (id) order.
    pub fn clusters(&self) -> Vec<&LogCluster> {
        self.store.values()
    }
}
