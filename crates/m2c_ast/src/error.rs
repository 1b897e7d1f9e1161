use crate::arena::NodeId;
use crate::kind::{Arity, NodeKind};
use thiserror::Error;

/// Errors from building or changing a syntax tree
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AstError {
    #[error("no node with id {0}")]
    InvalidNode(NodeId),
    #[error("{kind} expects {expected:?} but got {found} children")]
    ArityMismatch {
        kind: NodeKind,
        expected: Arity,
        found: usize,
    },
    #[error("child index {index} out of bounds for {kind}")]
    IndexOutOfBounds { kind: NodeKind, index: usize },
    #[error("slot {index} of {kind} can not be replaced")]
    NotSpliceable { kind: NodeKind, index: usize },
}
