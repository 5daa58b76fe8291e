//! Render and export views of a cut mesh.
//!
//! The renderer takes flat `f32` positions and `u16` triangle indices. The
//! exporter walks the same triangles in world space.

use std::collections::HashMap;

use config::constants::MAX_RENDER_VERTICES;
use serde::Serialize;
use tracing::error;

use crate::core::vec3::Vec3;
use crate::error::MeshResult;
use crate::halfedge::PointKey;
use crate::mesh::CuttableMesh;

/// Buffers suitable for upload to the renderer.
///
/// Positions are local to the mesh origin.
///
/// # Examples
/// ```
/// use config::Tolerances;
/// use smaug_mesh::{cube_room, RenderBuffers};
///
/// let tolerances = Tolerances::default();
/// let mut room = cube_room(1.0).unwrap();
/// room.fit_collision(&tolerances).unwrap();
/// room.tessellate(&tolerances).unwrap();
///
/// let buffers = RenderBuffers::build(&room).unwrap();
/// assert_eq!(buffers.vertex_count(), 8);
/// assert_eq!(buffers.indices.len(), 12 * 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderBuffers {
    /// Vertex positions as flat array [x, y, z, x, y, z, ...].
    pub vertices: Vec<f32>,

    /// Triangle indices as flat array [i0, i1, i2, i0, i1, i2, ...].
    pub indices: Vec<u16>,
}

impl RenderBuffers {
    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Returns the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Flattens the mesh's own positions followed by its cut positions, and
    /// indexes every part triangle into them.
    ///
    /// Triangles referring to a position outside the buffer, or beyond the
    /// range of a 16-bit index, are logged and skipped.
    pub fn build(mesh: &CuttableMesh) -> MeshResult<Self> {
        let mut buffers = Self::default();
        let mut slots: HashMap<PointKey, usize> = HashMap::new();
        for &key in mesh.base_points().iter().chain(mesh.cut_points()) {
            let p = mesh.position(key)?;
            slots.insert(key, buffers.vertex_count());
            buffers
                .vertices
                .extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
        }
        if buffers.vertex_count() > MAX_RENDER_VERTICES {
            error!(
                vertices = buffers.vertex_count(),
                "vertex buffer exceeds 16-bit index range"
            );
        }

        for (part_index, part) in mesh.parts().iter().enumerate() {
            let topology = part.topology();
            for &tri in &part.tris {
                let mut corners = [0u16; 3];
                let mut valid = true;
                for (slot, key) in corners.iter_mut().zip(topology.loop_points(tri)?) {
                    match slots.get(&key).map(|&i| u16::try_from(i)) {
                        Some(Ok(index)) => *slot = index,
                        Some(Err(_)) | None => {
                            error!(
                                part = part_index,
                                ?tri,
                                ?key,
                                "triangle index out of range, skipped"
                            );
                            valid = false;
                            break;
                        }
                    }
                }
                if valid {
                    buffers.indices.extend_from_slice(&corners);
                }
            }
        }
        Ok(buffers)
    }
}

/// One world-space triangle handed to an exporter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExportTriangle {
    /// Corners in winding order.
    pub corners: [Vec3; 3],
    /// Unit normal of the owning part.
    pub normal: Vec3,
}

/// Walks every final triangle of `mesh` in world space.
pub fn export_triangles(mesh: &CuttableMesh) -> MeshResult<Vec<ExportTriangle>> {
    let mut triangles = Vec::new();
    for part in mesh.parts() {
        let topology = part.topology();
        for &tri in &part.tris {
            let positions = topology.loop_positions(mesh.points(), tri)?;
            if let [a, b, c] = positions[..] {
                triangles.push(ExportTriangle {
                    corners: [a + mesh.origin, b + mesh.origin, c + mesh.origin],
                    normal: part.normal,
                });
            }
        }
    }
    Ok(triangles)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use config::Tolerances;

    use super::*;
    use crate::primitives::cube_room;

    fn tessellated_room() -> CuttableMesh {
        let tolerances = Tolerances::default();
        let mut room = cube_room(1.0).unwrap();
        room.fit_collision(&tolerances).unwrap();
        room.tessellate(&tolerances).unwrap();
        room
    }

    #[test]
    fn test_buffers_index_every_triangle() {
        let room = tessellated_room();
        let buffers = RenderBuffers::build(&room).unwrap();
        assert_eq!(buffers.vertex_count(), 8);
        assert_eq!(buffers.triangle_count(), 12);
        assert!(buffers.indices.iter().all(|&i| (i as usize) < 8));
    }

    #[test]
    fn test_buffers_skip_triangles_with_unknown_points() {
        let mut room = tessellated_room();
        // A part built on a position that is neither a base nor a cut point.
        let (pool, _) = room.pool_and_parts();
        let stray = pool.insert(Vec3::new(0.0, 0.0, 5.0));
        let corners = room.base_points()[..2].to_vec();
        let part = room.add_part(&[corners[0], corners[1], stray]).unwrap();
        room.fit_collision(&Tolerances::default()).unwrap();
        room.tessellate(&Tolerances::default()).unwrap();
        assert_eq!(room.part(part).unwrap().tris.len(), 1);

        let buffers = RenderBuffers::build(&room).unwrap();
        assert_eq!(buffers.triangle_count(), 12);
    }

    #[test]
    fn test_export_is_world_space() {
        let mut room = tessellated_room();
        room.origin = Vec3::new(10.0, 0.0, 0.0);
        let triangles = export_triangles(&room).unwrap();
        assert_eq!(triangles.len(), 12);
        for tri in &triangles {
            for corner in tri.corners {
                assert!((9.0..=11.0).contains(&corner.x));
            }
            assert_relative_eq!(tri.normal.length(), 1.0);
        }
    }
}
