//! Point classification against convex loops.
//!
//! Queries walk the loop edges and measure the signed in-plane distance of
//! the point to each edge line. Edges that are not part of the outer
//! boundary (diagonals introduced by convex decomposition) never report a
//! point as "on edge": a point sitting on such a diagonal is inside.

use serde::{Deserialize, Serialize};

use super::vec3::Vec3;

/// Classification of one point against one convex loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointClass {
    /// Strictly inside every edge.
    Inside,
    /// Within the on-edge band of at least one outer edge.
    OnEdge,
    /// Outside at least one edge.
    Outside,
}

/// A convex loop in world space with per-edge outer flags.
///
/// `outer[i]` describes the edge from `points[i]` to `points[i + 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvexLoop {
    /// Loop positions in winding order.
    pub points: Vec<Vec3>,
    /// Whether each edge belongs to the outer boundary.
    pub outer: Vec<bool>,
    /// Unit normal the loop winds around.
    pub normal: Vec3,
}

impl ConvexLoop {
    /// Loop whose edges are all outer boundary edges.
    pub fn closed(points: Vec<Vec3>, normal: Vec3) -> Self {
        let outer = vec![true; points.len()];
        Self {
            points,
            outer,
            normal,
        }
    }
}

/// Per-polygon tally of point classifications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Containment {
    /// Points strictly inside.
    pub inside: usize,
    /// Points on an outer edge.
    pub on_edge: usize,
    /// Points outside every loop.
    pub outside: usize,
}

impl Containment {
    /// Total points tallied.
    pub fn total(&self) -> usize {
        self.inside + self.on_edge + self.outside
    }
}

fn edge_distance(a: Vec3, b: Vec3, normal: Vec3, point: Vec3) -> Option<f64> {
    let edge = b - a;
    let length = edge.length();
    if length == 0.0 {
        return None;
    }
    Some(edge.cross(point - a).dot(normal) / length)
}

/// Classifies `point` against a convex loop.
///
/// # Examples
/// ```
/// use smaug_mesh::{classify_point, ConvexLoop, PointClass, Vec3};
/// let square = ConvexLoop::closed(
///     vec![
///         Vec3::new(0.0, 0.0, 0.0),
///         Vec3::new(2.0, 0.0, 0.0),
///         Vec3::new(2.0, 2.0, 0.0),
///         Vec3::new(0.0, 2.0, 0.0),
///     ],
///     Vec3::Z,
/// );
/// assert_eq!(classify_point(&square, Vec3::new(1.0, 1.0, 0.0), 1e-3), PointClass::Inside);
/// assert_eq!(classify_point(&square, Vec3::new(2.0, 1.0, 0.0), 1e-3), PointClass::OnEdge);
/// assert_eq!(classify_point(&square, Vec3::new(3.0, 1.0, 0.0), 1e-3), PointClass::Outside);
/// ```
pub fn classify_point(convex: &ConvexLoop, point: Vec3, epsilon: f64) -> PointClass {
    let n = convex.points.len();
    let mut on_edge = false;
    for i in 0..n {
        let a = convex.points[i];
        let b = convex.points[(i + 1) % n];
        let Some(distance) = edge_distance(a, b, convex.normal, point) else {
            continue;
        };
        if distance < -epsilon {
            return PointClass::Outside;
        }
        if distance <= epsilon && convex.outer.get(i).copied().unwrap_or(true) {
            on_edge = true;
        }
    }
    if on_edge {
        PointClass::OnEdge
    } else {
        PointClass::Inside
    }
}

/// Whether `point` lies strictly inside the loop, clear of every edge band.
pub fn point_strictly_inside(points: &[Vec3], normal: Vec3, point: Vec3, epsilon: f64) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    (0..n).all(|i| {
        edge_distance(points[i], points[(i + 1) % n], normal, point)
            .map_or(true, |distance| distance > epsilon)
    })
}

/// Tallies each point against a set of convex loops.
///
/// A point takes the class of the first loop that does not report it
/// outside. An empty loop set yields an empty tally.
pub fn tally_points(points: &[Vec3], loops: &[ConvexLoop], epsilon: f64) -> Containment {
    let mut tally = Containment::default();
    if loops.is_empty() {
        return tally;
    }
    for &p in points {
        let class = loops
            .iter()
            .map(|l| classify_point(l, p, epsilon))
            .find(|c| *c != PointClass::Outside)
            .unwrap_or(PointClass::Outside);
        match class {
            PointClass::Inside => tally.inside += 1,
            PointClass::OnEdge => tally.on_edge += 1,
            PointClass::Outside => tally.outside += 1,
        }
    }
    tally
}

#[cfg(test)]
mod tests;
