//! # cascata I/O
//!
//! The file collaborators around the cascata core: an edge-list loader that
//! populates a [`cascata_core::Graph`] from a text file, and report writers
//! that serialize influencer-extraction and cascade results to text and CSV
//! files.

pub mod loader;
pub mod report;

pub use loader::load_graph;
pub use report::{cascade_file_name, write_cascade_report, write_influencer_report};
