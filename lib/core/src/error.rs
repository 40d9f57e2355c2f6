use crate::node::NodeId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown vertex: {0}")]
    UnknownVertex(NodeId),

    #[error("Requested {requested} influencers but the graph has {available} vertices")]
    TooManyInfluencers { requested: usize, available: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
