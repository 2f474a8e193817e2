use crate::{EdgeId, NodeId};

pub type Result<T> = std::result::Result<T, Error>;

/// Graph-edit precondition failures. These are programmer errors surfaced as
/// values, not recoverable runtime states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("edge endpoints must be two distinct nodes")]
    SelfLoop,

    #[error("node {0:?} is not part of this graph")]
    MissingNode(NodeId),

    #[error("edge {0:?} is not part of this graph")]
    MissingEdge(EdgeId),

    #[error("edge weights must be non-negative, got {0}")]
    NegativeWeight(i64),
}
