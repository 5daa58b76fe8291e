//! Thin wrapper around `glam::DVec3` shared across engine modules.

pub use glam::DVec3 as Vec3;

/// Returns true when `a` and `b` differ by less than `epsilon`.
///
/// # Examples
/// ```
/// use smaug_mesh::core::vec3::close_to;
/// assert!(close_to(-1.0, -0.99999, 1e-4));
/// assert!(!close_to(0.0, 0.1, 1e-4));
/// ```
pub fn close_to(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Arithmetic mean of a set of positions, `None` when empty.
///
/// # Examples
/// ```
/// use smaug_mesh::core::vec3::{centroid, Vec3};
/// let c = centroid([Vec3::ZERO, Vec3::new(2.0, 4.0, 0.0)]).unwrap();
/// assert_eq!(c, Vec3::new(1.0, 2.0, 0.0));
/// ```
pub fn centroid<I>(points: I) -> Option<Vec3>
where
    I: IntoIterator<Item = Vec3>,
{
    let mut sum = Vec3::ZERO;
    let mut count = 0usize;
    for p in points {
        sum += p;
        count += 1;
    }
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests;
