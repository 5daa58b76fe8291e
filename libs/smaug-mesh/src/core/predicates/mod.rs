//! Exact orientation predicates.
//!
//! The three coordinate projections of `cross(b - a, c - a)` are 2D
//! orientation determinants, so evaluating each with `robust::orient2d` tells
//! exactly whether three 3D points are collinear.

use robust::{orient2d, Coord};

use super::vec3::Vec3;

fn project_xy(p: Vec3) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

fn project_yz(p: Vec3) -> Coord<f64> {
    Coord { x: p.y, y: p.z }
}

fn project_zx(p: Vec3) -> Coord<f64> {
    Coord { x: p.z, y: p.x }
}

/// Exact test for `cross(a - b, b - c) == 0`.
///
/// Coincident points count as collinear.
///
/// # Examples
/// ```
/// use smaug_mesh::{collinear, Vec3};
/// assert!(collinear(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0), Vec3::new(3.0, 3.0, 3.0)));
/// assert!(!collinear(Vec3::ZERO, Vec3::X, Vec3::Y));
/// ```
pub fn collinear(a: Vec3, b: Vec3, c: Vec3) -> bool {
    orient2d(project_xy(a), project_xy(b), project_xy(c)) == 0.0
        && orient2d(project_yz(a), project_yz(b), project_yz(c)) == 0.0
        && orient2d(project_zx(a), project_zx(b), project_zx(c)) == 0.0
}

/// Exact test for `cross(d1, d2) == 0`.
pub fn parallel(d1: Vec3, d2: Vec3) -> bool {
    collinear(Vec3::ZERO, d1, d2)
}

#[cfg(test)]
mod tests;
