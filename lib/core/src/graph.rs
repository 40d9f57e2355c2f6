use crate::error::{Error, Result};
use crate::influencer::InfluencerGraph;
use crate::node::{GraphNode, NodeId};
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Ordering used for influencer ranking: nodes compare by how often
/// they were retweeted; ties compare equal.
fn by_times_retweeted(a: &GraphNode, b: &GraphNode) -> Ordering {
    a.total_times_retweeted().cmp(&b.total_times_retweeted())
}

/// The directed, weighted retweet graph.
///
/// Vertices are user ids; an edge `(from, to)` means `to` retweeted content
/// originating at `from`, and its weight counts how many times. Both edge
/// directions are bookkept on the endpoints (see [`GraphNode`]), so a single
/// `add_edge` call updates two adjacency maps atomically.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    nodes: AHashMap<NodeId, GraphNode>,
}

impl Graph {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: AHashMap::new(),
        }
    }

    /// Number of vertices
    #[inline]
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Look up a single vertex
    #[inline]
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(&id)
    }

    /// Iterate all vertices, in no particular order
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    /// Ids of all vertices, in no particular order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Insert a vertex. A no-op if `id` is already present.
    pub fn add_vertex(&mut self, id: NodeId) {
        self.nodes.entry(id).or_insert_with(|| GraphNode::new(id));
    }

    /// Record one retweet: `to` retweeted content originating at `from`.
    ///
    /// Both endpoints must already be vertices. Calling this twice for the
    /// same pair raises the edge weight instead of duplicating the edge.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        if !self.nodes.contains_key(&from) {
            return Err(Error::UnknownVertex(from));
        }
        if !self.nodes.contains_key(&to) {
            return Err(Error::UnknownVertex(to));
        }
        // Both directions update together; the endpoint checks above make
        // the unwraps unreachable.
        if let Some(from_node) = self.nodes.get_mut(&from) {
            from_node.record_follows(to);
        }
        if let Some(to_node) = self.nodes.get_mut(&to) {
            to_node.record_follower(from);
        }
        Ok(())
    }

    /// Structurally identical, fully independent copy.
    ///
    /// Every outgoing edge of weight `w` is replayed `w` times into the new
    /// graph, which rebuilds both adjacency directions and the derived
    /// totals. Vertices with no outgoing edges are copied explicitly so
    /// isolated nodes survive the copy.
    #[must_use]
    pub fn deep_copy(&self) -> Graph {
        let mut copy = Graph::new();
        for node in self.nodes.values() {
            copy.add_vertex(node.id());
            for (&target, &weight) in node.follows() {
                copy.add_vertex(target);
                for _ in 0..weight {
                    // Endpoints were just added; replay cannot fail.
                    let _ = copy.add_edge(node.id(), target);
                }
            }
        }
        copy
    }

    /// The `k` most-retweeted vertices, most-retweeted first.
    ///
    /// Ties may land in either order.
    pub fn find_influencers(&self, k: usize) -> Result<Vec<NodeId>> {
        if k > self.num_nodes() {
            return Err(Error::TooManyInfluencers {
                requested: k,
                available: self.num_nodes(),
            });
        }
        let mut ranked: Vec<&GraphNode> = self.nodes.values().collect();
        ranked.sort_unstable_by(|a, b| by_times_retweeted(b, a));
        Ok(ranked.into_iter().take(k).map(GraphNode::id).collect())
    }

    /// Extract the sphere-of-influence subgraph rooted at `id`: every vertex
    /// transitively reachable by walking follower edges outward from the
    /// root, with the follower edges rebuilt at their original weight.
    pub fn influencer_subgraph(&self, id: NodeId) -> Result<InfluencerGraph> {
        if !self.nodes.contains_key(&id) {
            return Err(Error::UnknownVertex(id));
        }
        let mut subgraph = InfluencerGraph::new(id);
        let mut visited: AHashSet<NodeId> = AHashSet::new();
        let mut frontier: Vec<NodeId> = vec![id];
        while let Some(current) = frontier.pop() {
            if !visited.insert(current) {
                continue;
            }
            subgraph.graph_mut().add_vertex(current);
            let Some(node) = self.nodes.get(&current) else {
                continue;
            };
            for &follower in node.followed_by().keys() {
                if visited.contains(&follower) {
                    continue;
                }
                subgraph.graph_mut().add_vertex(follower);
                let weight = self
                    .nodes
                    .get(&follower)
                    .and_then(|n| n.follow_weight(current))
                    .unwrap_or(0);
                for _ in 0..weight {
                    let _ = subgraph.graph_mut().add_edge(follower, current);
                }
                frontier.push(follower);
            }
        }
        Ok(subgraph)
    }

    /// [`Self::find_influencers`] followed by [`Self::influencer_subgraph`]
    /// for each, in ranking order.
    pub fn influencer_graphs(&self, k: usize) -> Result<Vec<InfluencerGraph>> {
        let influencers = self.find_influencers(k)?;
        influencers
            .into_iter()
            .map(|id| self.influencer_subgraph(id))
            .collect()
    }
}

impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "graph with {} nodes", self.num_nodes())
    }
}
