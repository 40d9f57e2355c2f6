//! # cascata Core
//!
//! Core library for the cascata retweet-network analyzer.
//!
//! This crate provides the graph representation and the algorithms that run
//! on it:
//!
//! - [`Graph`] - directed, weighted retweet graph built from vertices and
//!   `(from, to)` retweet edges
//! - [`GraphNode`] - one user with weighted `follows` / `followed_by`
//!   adjacency maps and derived retweet totals
//! - [`InfluencerGraph`] - a graph centered on one influencer, with reach
//!   and BFS shortest-path queries
//! - [`CascadeModel`] - threshold-based, generational behavior-adoption
//!   simulation seeded at one or more nodes
//!
//! ## Example
//!
//! ```rust
//! use cascata_core::{CascadeModel, CascadeParams, Graph};
//!
//! let mut graph = Graph::new();
//! for id in 1..=3 {
//!     graph.add_vertex(id);
//! }
//! // 2 retweeted 1 twice, 3 retweeted 1 once
//! graph.add_edge(1, 2).unwrap();
//! graph.add_edge(1, 2).unwrap();
//! graph.add_edge(1, 3).unwrap();
//!
//! let influencers = graph.find_influencers(1).unwrap();
//! assert_eq!(influencers, vec![1]);
//!
//! let model = CascadeModel::new(&graph);
//! let params = CascadeParams {
//!     max_generations: 5,
//!     reward_for_inertia: 1,
//!     reward_for_change: 1,
//! };
//! let entries = model.simulate(1, &params).unwrap();
//! assert_eq!(entries.last().unwrap().total_active, 3);
//! ```

pub mod cascade;
pub mod error;
pub mod graph;
pub mod influencer;
pub mod node;

pub use cascade::{CascadeEntry, CascadeModel, CascadeParams};
pub use error::{Error, Result};
pub use graph::Graph;
pub use influencer::InfluencerGraph;
pub use node::{GraphNode, NodeId};
