use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Identity of a user in the retweet network
pub type NodeId = u64;

/// A single user in the retweet graph.
///
/// Edges are stored as weighted adjacency maps: `follows` keys the users this
/// node has retweeted to the number of times it retweeted them, `followed_by`
/// keys the users that retweeted this node to their retweet counts. The two
/// totals are always the weight-sums of the respective maps - they are only
/// ever updated together with the maps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    id: NodeId,
    follows: AHashMap<NodeId, u32>,
    followed_by: AHashMap<NodeId, u32>,
    total_retweets_made: u64,
    total_times_retweeted: u64,
}

impl GraphNode {
    #[inline]
    #[must_use]
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            follows: AHashMap::new(),
            followed_by: AHashMap::new(),
            total_retweets_made: 0,
            total_times_retweeted: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Record one retweet of this node's content by `follower`
    pub fn record_follower(&mut self, follower: NodeId) {
        *self.followed_by.entry(follower).or_insert(0) += 1;
        self.total_times_retweeted += 1;
    }

    /// Record one retweet this node made of `target`'s content
    pub fn record_follows(&mut self, target: NodeId) {
        *self.follows.entry(target).or_insert(0) += 1;
        self.total_retweets_made += 1;
    }

    /// Users this node has retweeted, keyed to retweet counts.
    ///
    /// The returned view is read-only; internal state cannot be reached
    /// mutably through it.
    #[inline]
    #[must_use]
    pub fn follows(&self) -> &AHashMap<NodeId, u32> {
        &self.follows
    }

    /// Users that have retweeted this node, keyed to retweet counts
    #[inline]
    #[must_use]
    pub fn followed_by(&self) -> &AHashMap<NodeId, u32> {
        &self.followed_by
    }

    /// Weight of the edge from this node toward `target`, if it exists
    #[inline]
    #[must_use]
    pub fn follow_weight(&self, target: NodeId) -> Option<u32> {
        self.follows.get(&target).copied()
    }

    #[inline]
    #[must_use]
    pub fn total_retweets_made(&self) -> u64 {
        self.total_retweets_made
    }

    #[inline]
    #[must_use]
    pub fn total_times_retweeted(&self) -> u64 {
        self.total_times_retweeted
    }
}

impl std::fmt::Display for GraphNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: follows {} users, followed by {} users, made {} retweets, retweeted {} times",
            self.id,
            self.follows.len(),
            self.followed_by.len(),
            self.total_retweets_made,
            self.total_times_retweeted,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_track_map_weights() {
        let mut node = GraphNode::new(7);
        node.record_follows(1);
        node.record_follows(1);
        node.record_follows(2);
        node.record_follower(9);

        assert_eq!(node.follows().get(&1), Some(&2));
        assert_eq!(node.follows().get(&2), Some(&1));
        assert_eq!(node.total_retweets_made(), 3);

        assert_eq!(node.followed_by().get(&9), Some(&1));
        assert_eq!(node.total_times_retweeted(), 1);

        let follows_sum: u64 = node.follows().values().map(|w| u64::from(*w)).sum();
        let followed_sum: u64 = node.followed_by().values().map(|w| u64::from(*w)).sum();
        assert_eq!(follows_sum, node.total_retweets_made());
        assert_eq!(followed_sum, node.total_times_retweeted());
    }

    #[test]
    fn display_summarizes_activity() {
        let mut node = GraphNode::new(3);
        node.record_follows(1);
        node.record_follower(2);
        assert_eq!(
            node.to_string(),
            "3: follows 1 users, followed by 1 users, made 1 retweets, retweeted 1 times"
        );
    }

    #[test]
    fn fresh_node_is_isolated() {
        let node = GraphNode::new(1);
        assert!(node.follows().is_empty());
        assert!(node.followed_by().is_empty());
        assert_eq!(node.total_retweets_made(), 0);
        assert_eq!(node.total_times_retweeted(), 0);
        assert_eq!(node.follow_weight(2), None);
    }
}
