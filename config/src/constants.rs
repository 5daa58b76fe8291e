//! # Configuration Constants
//!
//! Tolerances and limits used by the half-edge engine.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Slicing**: Thresholds used while classifying and snipping faces
//! - **Limits**: Hard bounds imposed by the render buffers

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Tolerance for "close to" comparisons.
///
/// Used when checking that two normals are antiparallel, that an
/// intersection parameter sits on a segment end, or that two positions
/// coincide while fusing edges.
///
/// # Example
///
/// ```rust
/// use config::constants::NEAR_EPSILON;
///
/// fn close_to(a: f64, b: f64) -> bool {
///     (a - b).abs() < NEAR_EPSILON
/// }
///
/// assert!(close_to(-1.0, -1.0 + 1e-6));
/// ```
pub const NEAR_EPSILON: f64 = 1e-4;

/// Tolerance of the segment/segment intersection test.
///
/// Both the closest-approach distance and the parameter range overshoot
/// are measured against this value.
pub const LINE_EPSILON: f64 = 1e-3;

/// Band around a convex loop edge inside which a point counts as on the edge.
pub const ON_EDGE_EPSILON: f64 = 1e-3;

// =============================================================================
// SLICING CONSTANTS
// =============================================================================

/// Maximum distance between two planes, measured along the part normal,
/// for them to be treated as coincident.
pub const COPLANAR_EPSILON: f64 = 1e-2;

/// Maximum distance of a part edge from the line through a parallel cutter
/// edge for both to lie on a shared line.
pub const SHARED_LINE_EPSILON: f64 = 1e-4;

/// Distance from a part edge endpoint under which an intersection on a
/// shared line is suppressed.
pub const ENDPOINT_EPSILON: f64 = 1e-3;

/// Slack added around bounding boxes before testing whether two nodes can
/// touch at all.
pub const AABB_MARGIN: f64 = 1e-2;

// =============================================================================
// LIMITS
// =============================================================================

/// Largest vertex buffer the 16-bit index buffer can address.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_RENDER_VERTICES;
/// assert_eq!(MAX_RENDER_VERTICES, u16::MAX as usize + 1);
/// ```
pub const MAX_RENDER_VERTICES: usize = u16::MAX as usize + 1;
