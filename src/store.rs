use std::num::NonZeroUsize;

use lru::LruCache;
use tracing::debug;

use crate::cluster::{ClusterId, LogCluster};

/// Bounded cluster store with least-recently-used eviction.
///
/// `set`, `get` and `get_mut` promote the entry to most recently used;
/// `peek` and `values` leave recency untouched, so candidate scoring and
/// listing never perturb eviction order. A capacity of zero means
/// unbounded.
///
/// Eviction does not reach back into the prefix tree: leaves keep the
/// evicted id until it is filtered on read or pruned on the next
/// insertion through that leaf.
pub struct ClusterStore {
    cache: LruCache<ClusterId, LogCluster>,
}

impl ClusterStore {
    pub fn new(capacity: usize) -> Self {
        let cache = match NonZeroUsize::new(capacity) {
            Some(capacity) => LruCache::new(capacity),
            None => LruCache::unbounded(),
        };
        Self { cache }
    }

    /// Inserts or replaces a cluster and marks it most recently used.
    /// Evicts the least recently used entry when over capacity.
    pub fn set(&mut self, id: ClusterId, cluster: LogCluster) {
        if let Some((evicted, _)) = self.cache.push(id, cluster) {
            if evicted != id {
                debug!(cluster_id = evicted, "evicted least recently used cluster");
            }
        }
    }

    /// Looks up a cluster and marks it most recently used.
    pub fn get(&mut self, id: ClusterId) -> Option<&LogCluster> {
        self.cache.get(&id)
    }

    /// Mutable lookup; touches recency like [`ClusterStore::get`].
    pub fn get_mut(&mut self, id: ClusterId) -> Option<&mut LogCluster> {
        self.cache.get_mut(&id)
    }

    /// Lookup without touching recency.
    pub fn peek(&self, id: ClusterId) -> Option<&LogCluster> {
        self.cache.peek(&id)
    }

    /// Live clusters in id order (ids are assigned monotonically, so
    /// this is creation order). Does not touch recency.
    pub fn values(&self) -> Vec<&LogCluster> {
        let mut clusters: Vec<&LogCluster> =
            self.cache.iter().map(|(_, cluster)| cluster).collect();
        clusters.sort_by_key(|cluster| cluster.id);
        clusters
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
