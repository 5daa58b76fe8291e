//! # World Errors
//!
//! Error types for the node graph and edit actions.

use smaug_mesh::MeshError;
use thiserror::Error;

use crate::node::NodeId;

/// Errors raised while editing the world.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorldError {
    /// An explicit id is already held by a live node.
    #[error("Node id {0} is already in use")]
    IdInUse(NodeId),

    /// The reserved invalid id was requested.
    #[error("Node id {0} is reserved")]
    ReservedId(NodeId),

    /// Every id up to `u32::MAX` has been handed out.
    #[error("Node ids are exhausted")]
    IdsExhausted,

    /// No live node carries this id.
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    /// An action was handed a selection it cannot work on.
    #[error("Invalid selection: {reason}")]
    InvalidSelection {
        /// What is wrong with the selection.
        reason: String,
    },

    /// The mesh engine gave up on an update.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Result alias for world operations.
pub type WorldResult<T> = Result<T, WorldError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WorldError::IdInUse(NodeId(7));
        assert_eq!(err.to_string(), "Node id 7 is already in use");
    }

    #[test]
    fn test_mesh_error_is_transparent() {
        let err: WorldError = MeshError::DegenerateLoop { points: 2 }.into();
        assert_eq!(
            err.to_string(),
            MeshError::DegenerateLoop { points: 2 }.to_string()
        );
    }
}
