//! # cascata
//!
//! Influencer extraction and behavior-cascade simulation over directed,
//! weighted retweet graphs.
//!
//! cascata analyzes a social-retweet network to find the most-retweeted
//! influencer nodes, extract each influencer's sphere-of-influence subgraph,
//! answer shortest retweet-chain queries within a sphere, and simulate a
//! multi-generation behavior-adoption cascade seeded at one or more
//! influencers under a reward-ratio threshold rule.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! cascata retweets.txt --influencers 3 --generations 10 \
//!     --reward-inertia 1 --reward-change 2 --seeding one
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use cascata::prelude::*;
//!
//! let mut graph = Graph::new();
//! graph.add_vertex(1);
//! graph.add_vertex(2);
//! graph.add_edge(1, 2).unwrap();
//!
//! let model = CascadeModel::new(&graph);
//! let params = CascadeParams {
//!     max_generations: 5,
//!     reward_for_inertia: 1,
//!     reward_for_change: 1,
//! };
//! let entries = model.simulate(1, &params).unwrap();
//! assert_eq!(entries.last().unwrap().total_active, 2);
//! ```
//!
//! ## Crate Structure
//!
//! - [`cascata-core`](https://docs.rs/cascata-core) - graph representation,
//!   influencer extraction, shortest paths, cascade simulation
//! - [`cascata-io`](https://docs.rs/cascata-io) - edge-list loading and
//!   text/CSV result reporting

// Re-export core types
pub use cascata_core::{
    CascadeEntry, CascadeModel, CascadeParams,
    Graph, GraphNode, InfluencerGraph, NodeId,
    Error, Result,
};

// Re-export I/O collaborators
pub use cascata_io::{cascade_file_name, load_graph, write_cascade_report, write_influencer_report};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CascadeEntry, CascadeModel, CascadeParams,
        Graph, GraphNode, InfluencerGraph, NodeId,
        Error, Result,
        load_graph, write_cascade_report, write_influencer_report,
    };
}
