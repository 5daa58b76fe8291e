//! Segment/segment intersection for coplanar edges.

use super::vec3::Vec3;

/// A segment stored as stem plus delta, `end = stem + delta`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start point.
    pub stem: Vec3,
    /// Direction and length.
    pub delta: Vec3,
}

impl Segment {
    /// Segment from `start` to `end`.
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self {
            stem: start,
            delta: end - start,
        }
    }

    /// End point.
    pub fn end(&self) -> Vec3 {
        self.stem + self.delta
    }

    /// Point at parameter `t` along the segment.
    pub fn at(&self, t: f64) -> Vec3 {
        self.stem + self.delta * t
    }
}

/// Where two segments cross.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    /// Parameter along the first segment, clamped to `[0, 1]`.
    pub t_first: f64,
    /// Parameter along the second segment, clamped to `[0, 1]`.
    pub t_second: f64,
    /// Intersection point on the first segment.
    pub point: Vec3,
}

/// Intersects two segments that are expected to be coplanar.
///
/// The closest points of both supporting lines are computed; the hit is
/// accepted when both parameters fall inside their segment, allowing an
/// overshoot of `epsilon` in distance, and the closest points are within
/// `epsilon` of each other. Parallel segments never hit.
///
/// # Examples
/// ```
/// use smaug_mesh::{intersect_segments, Segment, Vec3};
/// let a = Segment::new(Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
/// let b = Segment::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
/// let hit = intersect_segments(&a, &b, 1e-3).unwrap();
/// assert_eq!(hit.point, Vec3::ZERO);
/// assert_eq!(hit.t_first, 0.5);
/// ```
pub fn intersect_segments(first: &Segment, second: &Segment, epsilon: f64) -> Option<SegmentHit> {
    let a = first.delta.length_squared();
    let c = second.delta.length_squared();
    if a == 0.0 || c == 0.0 {
        return None;
    }
    let b = first.delta.dot(second.delta);
    let denom = a * c - b * b;
    if denom <= f64::EPSILON * a * c {
        return None;
    }

    let w = first.stem - second.stem;
    let d = first.delta.dot(w);
    let e = second.delta.dot(w);
    let t1 = (b * e - c * d) / denom;
    let t2 = (a * e - b * d) / denom;

    let slack1 = epsilon / a.sqrt();
    let slack2 = epsilon / c.sqrt();
    if t1 < -slack1 || t1 > 1.0 + slack1 || t2 < -slack2 || t2 > 1.0 + slack2 {
        return None;
    }

    let t1 = t1.clamp(0.0, 1.0);
    let t2 = t2.clamp(0.0, 1.0);
    let p1 = first.at(t1);
    let p2 = second.at(t2);
    if p1.distance(p2) > epsilon {
        return None;
    }

    Some(SegmentHit {
        t_first: t1,
        t_second: t2,
        point: p1,
    })
}
