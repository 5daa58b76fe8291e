//! Cube room primitive.
//!
//! A room is a cube whose six parts wind inward, so their normals face the
//! inside of the room where the camera sits.

mod tests;

use crate::core::vec3::Vec3;
use crate::error::{MeshError, MeshResult};
use crate::mesh::{CuttableMesh, Mesh};

/// Part names in construction order.
pub const PART_NAMES: [&str; 6] = ["front", "back", "left", "right", "bottom", "top"];

/// Index of the front part (+z).
pub const FRONT: usize = 0;
/// Index of the back part (-z).
pub const BACK: usize = 1;
/// Index of the left part (-x).
pub const LEFT: usize = 2;
/// Index of the right part (+x).
pub const RIGHT: usize = 3;
/// Index of the bottom part (-y).
pub const BOTTOM: usize = 4;
/// Index of the top part (+y).
pub const TOP: usize = 5;

const CORNER_LOOPS: [[usize; 4]; 6] = [
    [7, 6, 5, 4],
    [0, 1, 2, 3],
    [3, 7, 4, 0],
    [2, 1, 5, 6],
    [4, 5, 1, 0],
    [3, 2, 6, 7],
];

/// Creates a cube room centred on the local origin.
///
/// # Arguments
/// * `half_size` - Distance from the centre to each side
///
/// # Examples
/// ```
/// use smaug_mesh::primitives::cube::{cube_room, TOP};
/// use smaug_mesh::Vec3;
///
/// let mut room = cube_room(1.0).unwrap();
/// room.define_part_faces().unwrap();
/// assert_eq!(room.part_count(), 6);
/// // Parts face into the room.
/// assert_eq!(room.part(TOP).unwrap().normal, Vec3::NEG_Y);
/// ```
pub fn cube_room(half_size: f64) -> MeshResult<CuttableMesh> {
    if !half_size.is_finite() || half_size <= 0.0 {
        return Err(MeshError::InvalidSize { value: half_size });
    }

    let h = half_size;
    let mut mesh = Mesh::new(Vec3::ZERO);
    let corners = mesh.add_points(&[
        Vec3::new(-h, -h, -h),
        Vec3::new(h, -h, -h),
        Vec3::new(h, h, -h),
        Vec3::new(-h, h, -h),
        Vec3::new(-h, -h, h),
        Vec3::new(h, -h, h),
        Vec3::new(h, h, h),
        Vec3::new(-h, h, h),
    ]);
    for corner_loop in CORNER_LOOPS {
        let keys: Vec<_> = corner_loop.iter().map(|&i| corners[i]).collect();
        mesh.add_part(&keys)?;
    }
    Ok(CuttableMesh::new(mesh))
}
