//! # Error Types
//!
//! Errors raised by the half-edge engine.
//!
//! ## Error Policy
//!
//! - Every variant is a broken topological invariant or a stale handle
//! - The engine never recovers from them; callers abandon the update
//! - Degenerate geometry is repaired in place and only logged, never an error

use thiserror::Error;

use crate::halfedge::{EdgeKey, FaceKey, PointKey, VertKey};

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Fatal conditions reported by the mesh engine.
///
/// ## Example
///
/// ```rust
/// use smaug_mesh::{MeshError, Topology};
///
/// let mut topology = Topology::new();
/// match topology.new_face(&[]) {
///     Err(MeshError::DegenerateLoop { points }) => assert_eq!(points, 0),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// A face loop was requested with fewer than three points.
    #[error("Face loop needs at least 3 points, got {points}")]
    DegenerateLoop {
        /// Number of points supplied.
        points: usize,
    },

    /// A split would leave one side with fewer than three vertices.
    #[error("Splitting face {face:?} would leave a side with {arc} of {vertices} vertices")]
    DegenerateSplit {
        /// Face being split.
        face: FaceKey,
        /// Vertices on the arc cut away.
        arc: usize,
        /// Vertices of the face before the split.
        vertices: usize,
    },

    /// A point handle does not resolve in the pool.
    #[error("Invalid point handle: {0:?}")]
    InvalidPoint(PointKey),

    /// A vertex handle does not resolve in the arena.
    #[error("Invalid vertex handle: {0:?}")]
    InvalidVertex(VertKey),

    /// A half-edge handle does not resolve in the arena.
    #[error("Invalid half-edge handle: {0:?}")]
    InvalidHalfEdge(EdgeKey),

    /// A face handle does not resolve in the arena.
    #[error("Invalid face handle: {0:?}")]
    InvalidFace(FaceKey),

    /// A primitive was asked for a non-positive or non-finite size.
    #[error("Invalid primitive size: {value}")]
    InvalidSize {
        /// Size supplied.
        value: f64,
    },

    /// A part index is out of range for its mesh.
    #[error("Invalid part index {index} (mesh has {count} parts)")]
    InvalidPart {
        /// Requested index.
        index: usize,
        /// Parts in the mesh.
        count: usize,
    },

    /// Following `next` did not return to the start after `|verts|` steps.
    #[error("Face {face:?} loop mismatch: walked {walked} vertices, face owns {owned}")]
    LoopMismatch {
        /// Face whose loop is broken.
        face: FaceKey,
        /// Vertices visited before giving up or closing.
        walked: usize,
        /// Vertices the face owns.
        owned: usize,
    },

    /// An edge or vertex claims a face that is neither side of a split.
    #[error("Custody violation while settling face {face:?}")]
    CustodyViolation {
        /// Face being settled.
        face: FaceKey,
    },

    /// Convex decomposition did not terminate within its iteration bound.
    #[error("Convex decomposition of face {face:?} did not converge ({vertices} vertices)")]
    ConvexifyDiverged {
        /// Face being decomposed.
        face: FaceKey,
        /// Vertices left when the bound was hit.
        vertices: usize,
    },

    /// An ear cut during triangulation did not produce a triangle.
    #[error("Triangulating face {face:?} produced a {vertices}-gon ear")]
    BadEar {
        /// Face being triangulated.
        face: FaceKey,
        /// Vertices of the produced ear.
        vertices: usize,
    },

    /// The snip walk exceeded its roll-over or step bound.
    #[error("Slicing gave up after {rollovers} roll-overs (bound {limit})")]
    SliceDiverged {
        /// Roll-overs performed.
        rollovers: usize,
        /// The bound that was hit.
        limit: usize,
    },

    /// A snip walk finished while a seam was still open.
    #[error("Slicing finished with an open seam")]
    SeamLeftOpen,
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Test error display messages.
    #[test]
    fn test_error_display() {
        let err = MeshError::DegenerateLoop { points: 2 };
        assert!(err.to_string().contains("at least 3"));

        let err = MeshError::SliceDiverged {
            rollovers: 5,
            limit: 4,
        };
        assert!(err.to_string().contains("5"));
        assert!(err.to_string().contains("bound 4"));
    }

    /// Test error types are Send + Sync so callers can ship them across threads.
    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MeshError>();
    }
}
