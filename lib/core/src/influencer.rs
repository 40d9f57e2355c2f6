use crate::graph::Graph;
use crate::node::NodeId;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A [`Graph`] centered on one designated influencer vertex.
///
/// Built by [`Graph::influencer_subgraph`]; holds the influencer's sphere of
/// influence and answers reach and hop-distance queries about it. The
/// designated id never changes after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfluencerGraph {
    graph: Graph,
    influencer: NodeId,
}

impl InfluencerGraph {
    #[inline]
    #[must_use]
    pub(crate) fn new(influencer: NodeId) -> Self {
        Self {
            graph: Graph::new(),
            influencer,
        }
    }

    /// The designated influencer vertex
    #[inline]
    #[must_use]
    pub fn influencer(&self) -> NodeId {
        self.influencer
    }

    #[inline]
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    #[inline]
    pub(crate) fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    /// Number of vertices within the influencer's sphere, the influencer
    /// itself excluded
    #[inline]
    #[must_use]
    pub fn reach(&self) -> usize {
        self.graph.num_nodes().saturating_sub(1)
    }

    /// Shortest retweet-chain path from `target` back to the influencer.
    ///
    /// Runs a breadth-first search over follower edges starting at the
    /// influencer and reconstructs the path from parent pointers. The
    /// returned sequence starts at `target` and ends at the influencer,
    /// both inclusive. `None` when either endpoint is missing from the
    /// subgraph, when `target` is the influencer itself, or when no
    /// follower chain connects the two.
    #[must_use]
    pub fn shortest_path(&self, target: NodeId) -> Option<Vec<NodeId>> {
        if !self.graph.contains(target) || !self.graph.contains(self.influencer) {
            return None;
        }
        if target == self.influencer {
            return None;
        }
        let parents = self.bfs_parents(target)?;
        Some(self.rebuild_path(target, &parents))
    }

    /// BFS from the influencer toward `target`, recording each node's parent
    /// the first time it is discovered. `None` if `target` is never reached.
    fn bfs_parents(&self, target: NodeId) -> Option<AHashMap<NodeId, NodeId>> {
        let mut parents: AHashMap<NodeId, NodeId> = AHashMap::new();
        let mut visited: AHashSet<NodeId> = AHashSet::new();
        let mut frontier: VecDeque<NodeId> = VecDeque::new();
        frontier.push_back(self.influencer);
        while let Some(current) = frontier.pop_front() {
            if current == target {
                return Some(parents);
            }
            let Some(node) = self.graph.node(current) else {
                continue;
            };
            for &follower in node.followed_by().keys() {
                if visited.insert(follower) {
                    parents.insert(follower, current);
                    frontier.push_back(follower);
                }
            }
        }
        None
    }

    fn rebuild_path(&self, target: NodeId, parents: &AHashMap<NodeId, NodeId>) -> Vec<NodeId> {
        let mut path = vec![target];
        let mut current = target;
        while let Some(&parent) = parents.get(&current) {
            path.push(parent);
            if parent == self.influencer {
                break;
            }
            current = parent;
        }
        path
    }
}

impl std::fmt::Display for InfluencerGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} centered on influencer {} (reach {})",
            self.graph,
            self.influencer,
            self.reach(),
        )
    }
}
