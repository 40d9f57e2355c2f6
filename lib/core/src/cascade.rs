use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::node::{GraphNode, NodeId};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// Parameters for a cascade run.
///
/// All three values must be strictly positive. The adoption threshold is
/// `reward_for_inertia / (reward_for_inertia + reward_for_change)`: the
/// fraction of a candidate's retweets that must target already-active nodes
/// before the candidate adopts. A higher inertia reward makes conversion
/// harder.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CascadeParams {
    pub max_generations: u32,
    pub reward_for_inertia: u32,
    pub reward_for_change: u32,
}

impl CascadeParams {
    pub fn validate(&self) -> Result<()> {
        if self.max_generations == 0 {
            return Err(Error::InvalidArgument(
                "max_generations must be positive".to_string(),
            ));
        }
        if self.reward_for_inertia == 0 || self.reward_for_change == 0 {
            return Err(Error::InvalidArgument(
                "reward values must be positive".to_string(),
            ));
        }
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn threshold(&self) -> f64 {
        let inertia = f64::from(self.reward_for_inertia);
        let change = f64::from(self.reward_for_change);
        inertia / (inertia + change)
    }
}

/// One generation of a cascade run: the cumulative number of active nodes
/// after the generation, and the nodes activated during it. The first entry
/// of a run is always the seed set keyed by its own size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CascadeEntry {
    pub total_active: usize,
    pub newly_active: AHashSet<NodeId>,
}

/// Generational behavior-adoption simulation over a borrowed [`Graph`].
///
/// The graph is never mutated; each [`Self::simulate`] call is an
/// independent run with its own active set, so one model can drive any
/// number of runs.
#[derive(Debug, Clone, Copy)]
pub struct CascadeModel<'g> {
    graph: &'g Graph,
}

impl<'g> CascadeModel<'g> {
    #[inline]
    #[must_use]
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// Run a cascade seeded at a single node
    pub fn simulate(&self, seed: NodeId, params: &CascadeParams) -> Result<Vec<CascadeEntry>> {
        self.simulate_many(&[seed], params)
    }

    /// Run a cascade with every node in `seeds` active from the start
    pub fn simulate_many(
        &self,
        seeds: &[NodeId],
        params: &CascadeParams,
    ) -> Result<Vec<CascadeEntry>> {
        params.validate()?;
        for &seed in seeds {
            if !self.graph.contains(seed) {
                return Err(Error::UnknownVertex(seed));
            }
        }
        let active: AHashSet<NodeId> = seeds.iter().copied().collect();
        Ok(self.run_generations(active, params))
    }

    fn run_generations(
        &self,
        mut active: AHashSet<NodeId>,
        params: &CascadeParams,
    ) -> Vec<CascadeEntry> {
        let threshold = params.threshold();
        let mut entries = vec![CascadeEntry {
            total_active: active.len(),
            newly_active: active.clone(),
        }];
        for _ in 0..params.max_generations {
            let newly_active = self.next_generation(&active, threshold);
            if newly_active.is_empty() {
                break;
            }
            active.extend(newly_active.iter().copied());
            entries.push(CascadeEntry {
                total_active: active.len(),
                newly_active,
            });
        }
        entries
    }

    /// Evaluate one generation: every follower of an active node that is not
    /// itself active is a candidate, each judged at most once against the
    /// active set as it stood when the generation began.
    fn next_generation(&self, active: &AHashSet<NodeId>, threshold: f64) -> AHashSet<NodeId> {
        let mut evaluated: AHashSet<NodeId> = AHashSet::new();
        let mut newly_active: AHashSet<NodeId> = AHashSet::new();
        for &active_id in active {
            let Some(active_node) = self.graph.node(active_id) else {
                continue;
            };
            for &candidate in active_node.followed_by().keys() {
                if active.contains(&candidate) || !evaluated.insert(candidate) {
                    continue;
                }
                let Some(candidate_node) = self.graph.node(candidate) else {
                    continue;
                };
                if influence_fraction(candidate_node, active) > threshold {
                    newly_active.insert(candidate);
                }
            }
        }
        newly_active
    }
}

/// Fraction of `node`'s retweets that target currently-active nodes.
///
/// A node that has never retweeted anyone has no measurable susceptibility:
/// its fraction is defined as zero, so it can never adopt.
fn influence_fraction(node: &GraphNode, active: &AHashSet<NodeId>) -> f64 {
    if node.total_retweets_made() == 0 {
        return 0.0;
    }
    let active_weight: u64 = node
        .follows()
        .iter()
        .filter(|(target, _)| active.contains(target))
        .map(|(_, &weight)| u64::from(weight))
        .sum();
    active_weight as f64 / node.total_retweets_made() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(generations: u32, inertia: u32, change: u32) -> CascadeParams {
        CascadeParams {
            max_generations: generations,
            reward_for_inertia: inertia,
            reward_for_change: change,
        }
    }

    fn retweet_graph() -> Graph {
        // 2 retweeted 1 twice, 3 retweeted 1 once, 4 retweeted 2 once
        let mut graph = Graph::new();
        for id in 1..=4 {
            graph.add_vertex(id);
        }
        graph.add_edge(1, 2).unwrap();
        graph.add_edge(1, 2).unwrap();
        graph.add_edge(1, 3).unwrap();
        graph.add_edge(2, 4).unwrap();
        graph
    }

    #[test]
    fn rejects_non_positive_arguments() {
        let graph = retweet_graph();
        let model = CascadeModel::new(&graph);
        for bad in [params(0, 1, 1), params(5, 0, 1), params(5, 1, 0)] {
            assert!(matches!(
                model.simulate(1, &bad),
                Err(Error::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn rejects_unknown_seeds() {
        let graph = retweet_graph();
        let model = CascadeModel::new(&graph);
        assert_eq!(
            model.simulate(42, &params(5, 1, 1)),
            Err(Error::UnknownVertex(42))
        );
    }

    #[test]
    fn equal_rewards_cascade_from_the_top_influencer() {
        // threshold 0.5; candidate 2 has fraction 2/3, candidate 3 has 1/1,
        // both adopt in the first generation. 4 follows only 2, so in the
        // second generation its fraction is 1/1 and it adopts too.
        let graph = retweet_graph();
        let model = CascadeModel::new(&graph);
        let entries = model.simulate(1, &params(5, 1, 1)).unwrap();

        assert_eq!(entries[0].total_active, 1);
        assert_eq!(entries[0].newly_active, AHashSet::from_iter([1]));

        assert_eq!(entries[1].total_active, 3);
        assert_eq!(entries[1].newly_active, AHashSet::from_iter([2, 3]));

        assert_eq!(entries[2].total_active, 4);
        assert_eq!(entries[2].newly_active, AHashSet::from_iter([4]));

        // quiescent after everyone adopted
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn high_inertia_blocks_adoption() {
        // threshold 3/4; candidate 2's fraction 2/3 falls short, candidate 3
        // still adopts with 1/1
        let graph = retweet_graph();
        let model = CascadeModel::new(&graph);
        let entries = model.simulate(1, &params(5, 3, 1)).unwrap();

        assert_eq!(entries[1].newly_active, AHashSet::from_iter([3]));
        // 4 follows only 2, which never adopted; run ends there
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].total_active, 2);
    }

    #[test]
    fn node_without_retweets_never_adopts() {
        // a node with an empty follows map gets fraction 0, not NaN
        let mut node = GraphNode::new(9);
        let active: AHashSet<NodeId> = AHashSet::from_iter([1]);
        assert_eq!(influence_fraction(&node, &active), 0.0);

        node.record_follows(1);
        assert!(influence_fraction(&node, &active) > 0.0);
    }

    #[test]
    fn active_set_growth_is_monotonic_and_bounded() {
        let graph = retweet_graph();
        let model = CascadeModel::new(&graph);
        let run = params(3, 1, 2);
        let entries = model.simulate(1, &run).unwrap();

        assert!(entries.len() <= run.max_generations as usize + 1);
        for pair in entries.windows(2) {
            assert!(pair[1].total_active > pair[0].total_active);
            assert_eq!(
                pair[1].total_active - pair[0].total_active,
                pair[1].newly_active.len()
            );
        }
    }

    #[test]
    fn max_generations_caps_the_run() {
        let graph = retweet_graph();
        let model = CascadeModel::new(&graph);
        let entries = model.simulate(1, &params(1, 1, 1)).unwrap();
        // one generation allowed: seed entry plus one generation entry
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].newly_active, AHashSet::from_iter([2, 3]));
    }

    #[test]
    fn multi_seed_runs_start_with_the_whole_seed_set() {
        let graph = retweet_graph();
        let model = CascadeModel::new(&graph);
        let entries = model.simulate_many(&[1, 2], &params(5, 1, 1)).unwrap();

        assert_eq!(entries[0].total_active, 2);
        assert_eq!(entries[0].newly_active, AHashSet::from_iter([1, 2]));
        // 3 adopts (1/1 toward 1), 4 adopts (1/1 toward 2)
        assert_eq!(entries[1].newly_active, AHashSet::from_iter([3, 4]));
        assert_eq!(entries[1].total_active, 4);
    }

    #[test]
    fn simulation_leaves_the_graph_untouched() {
        let graph = retweet_graph();
        let before: Vec<(NodeId, u64)> = {
            let mut totals: Vec<_> = graph
                .nodes()
                .map(|n| (n.id(), n.total_times_retweeted()))
                .collect();
            totals.sort_unstable();
            totals
        };
        let model = CascadeModel::new(&graph);
        model.simulate(1, &params(5, 1, 1)).unwrap();

        let mut after: Vec<_> = graph
            .nodes()
            .map(|n| (n.id(), n.total_times_retweeted()))
            .collect();
        after.sort_unstable();
        assert_eq!(before, after);
    }
}
