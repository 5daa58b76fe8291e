//! Addressable rooms of the world.
//!
//! A node owns one cuttable mesh together with the render buffers last built
//! from it. Nodes refer to each other only through [`NodeId`]s, so a deleted
//! peer simply stops resolving.

use std::collections::BTreeSet;
use std::fmt;

use config::Tolerances;
use smaug_mesh::{
    apply_cuts, Aabb, CuttableMesh, CutterSnapshot, MeshResult, RenderBuffers, Vec3,
};

use crate::error::WorldResult;

/// Stable identity of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Id carried by a node the world has not registered yet.
    pub const INVALID: NodeId = NodeId(0);

    /// Whether this is a real, assignable id.
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One room of the level.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) id: NodeId,
    mesh: CuttableMesh,
    pub(crate) cutting: BTreeSet<NodeId>,
    pub(crate) cut_by: BTreeSet<NodeId>,
    buffers: RenderBuffers,
}

impl Node {
    /// Wraps `mesh`, fitting its collision faces and building uncut render
    /// buffers so the node can act as a cutter straight away.
    pub fn new(mut mesh: CuttableMesh, tolerances: &Tolerances) -> WorldResult<Self> {
        mesh.fit_collision(tolerances)?;
        mesh.tessellate(tolerances)?;
        let buffers = RenderBuffers::build(&mesh)?;
        Ok(Self {
            id: NodeId::INVALID,
            mesh,
            cutting: BTreeSet::new(),
            cut_by: BTreeSet::new(),
            buffers,
        })
    }

    /// Identity assigned by the world, [`NodeId::INVALID`] until registered.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node's mesh.
    pub fn mesh(&self) -> &CuttableMesh {
        &self.mesh
    }

    /// Mutable access for edits. Changes show up after the next update.
    pub fn mesh_mut(&mut self) -> &mut CuttableMesh {
        &mut self.mesh
    }

    /// World placement of the mesh.
    pub fn origin(&self) -> Vec3 {
        self.mesh.origin
    }

    /// World bounds of the mesh's own positions.
    pub fn world_aabb(&self) -> Option<Aabb> {
        self.mesh.world_aabb()
    }

    /// Nodes this node cuts into.
    pub fn cutting(&self) -> &BTreeSet<NodeId> {
        &self.cutting
    }

    /// Nodes cutting into this node.
    pub fn cut_by(&self) -> &BTreeSet<NodeId> {
        &self.cut_by
    }

    /// Render data from the last successful rebuild.
    pub fn buffers(&self) -> &RenderBuffers {
        &self.buffers
    }

    /// Recomputes collision, cuts and triangles against `cutters`.
    ///
    /// The render buffers are replaced only when every stage succeeds.
    pub fn rebuild(&mut self, cutters: &[CutterSnapshot], tolerances: &Tolerances) -> MeshResult<()> {
        self.mesh.fit_collision(tolerances)?;
        apply_cuts(&mut self.mesh, cutters, tolerances)?;
        self.mesh.tessellate(tolerances)?;
        self.buffers = RenderBuffers::build(&self.mesh)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
