//! Half-edge geometry engine for the Smaug level editor.
//!
//! Rooms are meshes of planar parts. Each part keeps its outer loop in an
//! index-based half-edge arena together with everything derived from it:
//! convex collision faces, faces carved by coincident opposing parts of other
//! meshes, and the final triangles handed to the renderer.

pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod halfedge;
pub mod mesh;
pub mod primitives;
pub mod slice;
pub mod tessellate;

pub use self::config::KernelConfig;
pub use core::*;
pub use error::{MeshError, MeshResult};
pub use export::{export_triangles, ExportTriangle, RenderBuffers};
pub use halfedge::{
    EdgeFlags, EdgeKey, Face, FaceFlags, FaceKey, HalfEdge, PointKey, PointPool, Topology,
    VertKey, Vertex,
};
pub use mesh::{CuttableMesh, Mesh, MeshPart, SlicedFaces, Stem};
pub use primitives::cube_room;
pub use slice::{apply_cuts, CutterSnapshot, SlicerPart};
