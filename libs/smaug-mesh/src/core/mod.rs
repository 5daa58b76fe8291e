//! Geometry primitives shared by the half-edge engine.
//!
//! Includes the vector alias (`Vec3`), bounding boxes, exact orientation
//! predicates, segment intersection and point-in-convex-loop classification.

pub mod aabb;
pub mod containment;
pub mod predicates;
pub mod segment;
pub mod vec3;

pub use aabb::Aabb;
pub use containment::{classify_point, point_strictly_inside, tally_points, Containment, ConvexLoop, PointClass};
pub use predicates::{collinear, parallel};
pub use segment::{intersect_segments, Segment, SegmentHit};
pub use vec3::Vec3;
