//! Meshes, parts and the cut-vertex pool.
//!
//! A [`Mesh`] owns the positions its parts reference and an origin placing
//! it in the world. Each [`MeshPart`] owns a topology arena holding its outer
//! loop and every face derived from it. [`CuttableMesh`] adds the pool of
//! positions synthesized while cutting, released together on every recut.

mod edit;

use std::ops::{Deref, DerefMut};

use tracing::warn;

use crate::core::aabb::Aabb;
use crate::core::vec3::{centroid, Vec3};
use crate::error::{MeshError, MeshResult};
use crate::halfedge::{
    position, EdgeFlags, FaceFlags, FaceKey, PointKey, PointPool, Topology, VertKey,
};

pub use edit::Stem;

// =============================================================================
// PARTS
// =============================================================================

/// Faces produced by cutting a part, plus what they were decomposed into.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlicedFaces {
    /// Surviving fragments of the part loop, flagged [`FaceFlags::CUT`].
    pub faces: Vec<FaceKey>,
    /// Convex decomposition of `faces`.
    pub collision: Vec<FaceKey>,
    /// Positions synthesized while cutting this part.
    pub cut_points: Vec<PointKey>,
}

/// One planar side of a mesh.
#[derive(Debug, Clone)]
pub struct MeshPart {
    pub(crate) topology: Topology,
    face: FaceKey,
    /// Unit normal of the outer loop.
    pub normal: Vec3,
    /// Convex faces covering the outer loop.
    pub collision: Vec<FaceKey>,
    /// Cut result, `None` when no slicer touches the part.
    pub sliced: Option<SlicedFaces>,
    /// Final triangles.
    pub tris: Vec<FaceKey>,
}

impl MeshPart {
    /// Creates a part from an ordered point loop.
    pub fn new(points: &[PointKey]) -> MeshResult<Self> {
        let mut topology = Topology::new();
        let face = topology.new_face(points)?;
        topology.mark_face(face, FaceFlags::MESH_PART)?;
        Ok(Self {
            topology,
            face,
            normal: Vec3::ZERO,
            collision: Vec::new(),
            sliced: None,
            tris: Vec::new(),
        })
    }

    /// The outer loop face.
    pub fn face(&self) -> FaceKey {
        self.face
    }

    /// Arena holding the loop and all derived faces.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub(crate) fn topology_mut(&mut self) -> &mut Topology {
        &mut self.topology
    }

    /// Point handles of the outer loop in winding order.
    pub fn loop_points(&self) -> MeshResult<Vec<PointKey>> {
        self.topology.loop_points(self.face)
    }

    /// Vertices of the outer loop in winding order.
    pub fn loop_verts(&self) -> MeshResult<Vec<VertKey>> {
        self.topology.loop_verts(self.face)
    }

    /// Number of vertices on the outer loop.
    pub fn vertex_count(&self) -> usize {
        self.topology
            .face(self.face)
            .map(|f| f.verts.len())
            .unwrap_or(0)
    }

    /// Faces to render: the sliced decomposition's triangles when cut,
    /// otherwise the collision triangles.
    pub fn triangles(&self) -> &[FaceKey] {
        &self.tris
    }

    /// Whether a slicer dropped every fragment of this part.
    pub fn is_fully_cut_away(&self) -> bool {
        self.sliced.as_ref().is_some_and(|s| s.faces.is_empty())
    }

    /// Discards the sliced bundle, if any.
    pub fn discard_sliced(&mut self) -> MeshResult<()> {
        if let Some(mut sliced) = self.sliced.take() {
            self.topology.discard_faces(&mut sliced.faces)?;
            self.topology.discard_faces(&mut sliced.collision)?;
        }
        Ok(())
    }

    /// Rebuilds the part's derived state from its loop.
    ///
    /// Clears collision, triangles and the sliced bundle, clones the loop
    /// into a single collision face flagged with part edges, and recomputes
    /// the unit normal.
    pub fn define_faces(&mut self, points: &PointPool) -> MeshResult<()> {
        self.topology.discard_faces(&mut self.collision)?;
        self.topology.discard_faces(&mut self.tris)?;
        self.discard_sliced()?;

        let clone = self.topology.clone_face(self.face)?;
        self.topology.unmark_face(clone, FaceFlags::MESH_PART)?;
        self.topology.mark_edges(clone, EdgeFlags::PART_EDGE)?;
        self.collision.push(clone);

        let normal = self.topology.face_normal(points, self.face)?;
        if normal.length_squared() == 0.0 {
            warn!(face = ?self.face, "part loop has no area, normal left at zero");
        }
        self.normal = normal.normalize_or_zero();
        Ok(())
    }
}

// =============================================================================
// MESH
// =============================================================================

/// A set of parts sharing one position pool.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// World placement of the local coordinates.
    pub origin: Vec3,
    points: PointPool,
    base_points: Vec<PointKey>,
    parts: Vec<MeshPart>,
}

impl Mesh {
    /// Creates an empty mesh at `origin`.
    pub fn new(origin: Vec3) -> Self {
        Self {
            origin,
            ..Self::default()
        }
    }

    /// Appends positions to the pool, returning their handles in order.
    pub fn add_points(&mut self, positions: &[Vec3]) -> Vec<PointKey> {
        let keys: Vec<PointKey> = positions.iter().map(|&p| self.points.insert(p)).collect();
        self.base_points.extend_from_slice(&keys);
        keys
    }

    /// Adds a part built from existing point handles.
    pub fn add_part(&mut self, points: &[PointKey]) -> MeshResult<usize> {
        for &p in points {
            position(&self.points, p)?;
        }
        self.parts.push(MeshPart::new(points)?);
        Ok(self.parts.len() - 1)
    }

    /// Position pool, including cut points when the mesh is cuttable.
    pub fn points(&self) -> &PointPool {
        &self.points
    }

    /// Handles of the mesh's own positions, in insertion order.
    pub fn base_points(&self) -> &[PointKey] {
        &self.base_points
    }

    /// Local position of `key`.
    pub fn position(&self, key: PointKey) -> MeshResult<Vec3> {
        position(&self.points, key)
    }

    /// World position of `key`.
    pub fn world_position(&self, key: PointKey) -> MeshResult<Vec3> {
        Ok(self.position(key)? + self.origin)
    }

    /// Overwrites the local position of `key`.
    pub fn set_position(&mut self, key: PointKey, value: Vec3) -> MeshResult<()> {
        let slot = self
            .points
            .get_mut(key)
            .ok_or(MeshError::InvalidPoint(key))?;
        *slot = value;
        Ok(())
    }

    /// Moves `key` by `delta`.
    pub fn translate_point(&mut self, key: PointKey, delta: Vec3) -> MeshResult<()> {
        let p = self.position(key)?;
        self.set_position(key, p + delta)
    }

    /// All parts.
    pub fn parts(&self) -> &[MeshPart] {
        &self.parts
    }

    /// Number of parts.
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Part by index.
    pub fn part(&self, index: usize) -> MeshResult<&MeshPart> {
        let count = self.parts.len();
        self.parts
            .get(index)
            .ok_or(MeshError::InvalidPart { index, count })
    }

    /// Mutable part by index.
    pub fn part_mut(&mut self, index: usize) -> MeshResult<&mut MeshPart> {
        let count = self.parts.len();
        self.parts
            .get_mut(index)
            .ok_or(MeshError::InvalidPart { index, count })
    }

    /// Splits the borrow into the pool and the parts.
    pub(crate) fn pool_and_parts(&mut self) -> (&mut PointPool, &mut Vec<MeshPart>) {
        (&mut self.points, &mut self.parts)
    }

    /// Moves the centroid of the mesh's own positions into `origin`.
    pub fn recenter(&mut self) {
        let positions = self.base_points.iter().filter_map(|&k| self.points.get(k).copied());
        let Some(center) = centroid(positions) else {
            return;
        };
        self.origin += center;
        for &k in &self.base_points {
            if let Some(p) = self.points.get_mut(k) {
                *p -= center;
            }
        }
    }

    /// Local bounding box of the mesh's own positions.
    pub fn aabb(&self) -> Option<Aabb> {
        Aabb::from_points(self.base_points.iter().filter_map(|&k| self.points.get(k).copied()))
    }

    /// Bounding box in world space.
    pub fn world_aabb(&self) -> Option<Aabb> {
        self.aabb().map(|b| b.translated(self.origin))
    }

    /// Runs [`MeshPart::define_faces`] on every part.
    pub fn define_part_faces(&mut self) -> MeshResult<()> {
        let (points, parts) = self.pool_and_parts();
        for part in parts.iter_mut() {
            part.define_faces(points)?;
        }
        Ok(())
    }
}

// =============================================================================
// CUTTABLE MESH
// =============================================================================

/// A mesh that other meshes can cut into.
#[derive(Debug, Clone, Default)]
pub struct CuttableMesh {
    mesh: Mesh,
    cut_points: Vec<PointKey>,
}

impl CuttableMesh {
    /// Wraps a mesh with an empty cut pool.
    pub fn new(mesh: Mesh) -> Self {
        Self {
            mesh,
            cut_points: Vec::new(),
        }
    }

    /// Positions synthesized by the last cut pass.
    pub fn cut_points(&self) -> &[PointKey] {
        &self.cut_points
    }

    /// Frees every cut position from the pool.
    pub fn release_cut_points(&mut self) {
        let (points, _) = self.mesh.pool_and_parts();
        for key in self.cut_points.drain(..) {
            points.remove(key);
        }
    }

    pub(crate) fn adopt_cut_points(&mut self, keys: &[PointKey]) {
        self.cut_points.extend_from_slice(keys);
    }
}

impl From<Mesh> for CuttableMesh {
    fn from(mesh: Mesh) -> Self {
        Self::new(mesh)
    }
}

impl Deref for CuttableMesh {
    type Target = Mesh;

    fn deref(&self) -> &Mesh {
        &self.mesh
    }
}

impl DerefMut for CuttableMesh {
    fn deref_mut(&mut self) -> &mut Mesh {
        &mut self.mesh
    }
}
