//! # World Editor
//!
//! Owns every node, hands out their identities and runs their updates.
//!
//! ## Identity
//!
//! Ids start at 1 and only grow; a deleted node's id is never handed out
//! again by [`World::register_node`]. [`World::assign_id`] places a node
//! under an explicit id, which is how a redo brings a node back under the
//! identity other actions still refer to.
//!
//! ## Updates
//!
//! - [`World::preview_update_this_only`]: fit, cut and tessellate one node
//! - [`World::preview_update_node`]: the same, then every node it cuts
//! - [`World::update_this_only`]: recentre first, then preview-update
//! - [`World::update_node`]: update this node, then every node it cuts
//!
//! The set of peers is copied before the loop, so an update that reaches
//! back into this node never observes a half-visited set.

use std::collections::BTreeMap;

use config::constants::AABB_MARGIN;
use smaug_mesh::{cube_room, CutterSnapshot, KernelConfig, Vec3};
use tracing::{debug, error, warn};

use crate::error::{WorldError, WorldResult};
use crate::node::{Node, NodeId};

/// The node table and identity authority.
#[derive(Debug, Clone)]
pub struct World {
    nodes: BTreeMap<NodeId, Node>,
    /// `None` once `u32::MAX` has been handed out.
    next_id: Option<u32>,
    config: KernelConfig,
}

impl Default for World {
    fn default() -> Self {
        Self::new(KernelConfig::default())
    }
}

impl World {
    /// Creates an empty world using `config` for every update.
    pub fn new(config: KernelConfig) -> Self {
        Self {
            nodes: BTreeMap::new(),
            next_id: Some(1),
            config,
        }
    }

    /// Configuration handed to the mesh engine.
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    // =========================================================================
    // NODE TABLE
    // =========================================================================

    /// Builds a cube room centred on `origin` and registers it.
    pub fn create_cube_node(&mut self, origin: Vec3, half_size: f64) -> WorldResult<NodeId> {
        let mut mesh = cube_room(half_size)?;
        mesh.origin = origin;
        let node = Node::new(mesh, &self.config.tolerances)?;
        self.register_node(node)
    }

    /// Registers `node` under a fresh id.
    ///
    /// Fails with [`WorldError::IdsExhausted`] once the id space is used up.
    pub fn register_node(&mut self, mut node: Node) -> WorldResult<NodeId> {
        let id = NodeId(self.next_id.ok_or(WorldError::IdsExhausted)?);
        self.next_id = id.0.checked_add(1);
        node.id = id;
        self.nodes.insert(id, node);
        debug!(node = %id, "node registered");
        Ok(id)
    }

    /// Registers `node` under the explicit `id`.
    ///
    /// Fails when the id is live or reserved. Later fresh ids are allocated
    /// above it.
    pub fn assign_id(&mut self, mut node: Node, id: NodeId) -> WorldResult<()> {
        if !id.is_valid() {
            return Err(WorldError::ReservedId(id));
        }
        if self.nodes.contains_key(&id) {
            return Err(WorldError::IdInUse(id));
        }
        if self.next_id.is_some_and(|next| id.0 >= next) {
            self.next_id = id.0.checked_add(1);
        }
        node.id = id;
        self.nodes.insert(id, node);
        debug!(node = %id, "node assigned explicit id");
        Ok(())
    }

    /// Removes a node and every reference other nodes hold to it.
    ///
    /// Returns `None`, with a warning, when the id is not live.
    pub fn delete_node(&mut self, id: NodeId) -> Option<Node> {
        let Some(node) = self.nodes.remove(&id) else {
            warn!(node = %id, "delete_node called with unregistered node");
            return None;
        };
        for other in self.nodes.values_mut() {
            other.cutting.remove(&id);
            other.cut_by.remove(&id);
        }
        debug!(node = %id, "node deleted");
        Some(node)
    }

    /// Node by id.
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Mutable node by id.
    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub(crate) fn node(&self, id: NodeId) -> WorldResult<&Node> {
        self.nodes.get(&id).ok_or(WorldError::UnknownNode(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> WorldResult<&mut Node> {
        self.nodes.get_mut(&id).ok_or(WorldError::UnknownNode(id))
    }

    /// Live ids in ascending order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the world has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drops every node. Ids keep counting from where they were.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    // =========================================================================
    // CUT RELATION
    // =========================================================================

    /// Makes `a` and `b` cut each other.
    ///
    /// `a` must be live. A `b` that no longer resolves only enters `a`'s sets.
    pub fn connect(&mut self, a: NodeId, b: NodeId) -> WorldResult<()> {
        if a == b {
            warn!(node = %a, "node cannot cut itself");
            return Ok(());
        }
        let node = self.node_mut(a)?;
        node.cutting.insert(b);
        node.cut_by.insert(b);
        if let Some(other) = self.nodes.get_mut(&b) {
            other.cutting.insert(a);
            other.cut_by.insert(a);
        }
        Ok(())
    }

    /// Undoes [`World::connect`].
    pub fn disconnect(&mut self, a: NodeId, b: NodeId) -> WorldResult<()> {
        let node = self.node_mut(a)?;
        node.cutting.remove(&b);
        node.cut_by.remove(&b);
        if let Some(other) = self.nodes.get_mut(&b) {
            other.cutting.remove(&a);
            other.cut_by.remove(&a);
        }
        Ok(())
    }

    // =========================================================================
    // UPDATES
    // =========================================================================

    /// Snapshots every other node whose bounds touch `id`'s.
    fn cutters_for(&self, id: NodeId) -> WorldResult<Vec<CutterSnapshot>> {
        let Some(bounds) = self.node(id)?.world_aabb() else {
            return Ok(Vec::new());
        };
        let mut cutters = Vec::new();
        for (&other_id, other) in &self.nodes {
            if other_id == id {
                continue;
            }
            let touches = other
                .world_aabb()
                .is_some_and(|b| b.overlaps(&bounds, AABB_MARGIN));
            if touches {
                cutters.push(CutterSnapshot::capture(other.mesh())?);
            }
        }
        Ok(cutters)
    }

    fn peers(&self, id: NodeId) -> WorldResult<Vec<NodeId>> {
        Ok(self.node(id)?.cutting.iter().copied().collect())
    }

    /// Rebuilds one node against its current neighbours, without recentring.
    pub fn preview_update_this_only(&mut self, id: NodeId) -> WorldResult<()> {
        let result = self.rebuild(id);
        if let Err(err) = &result {
            error!(node = %id, %err, "node update failed");
        }
        result
    }

    fn rebuild(&mut self, id: NodeId) -> WorldResult<()> {
        let cutters = self.cutters_for(id)?;
        let tolerances = self.config.tolerances;
        self.node_mut(id)?.rebuild(&cutters, &tolerances)?;
        Ok(())
    }

    /// Preview-updates `id`, then every node it cuts.
    pub fn preview_update_node(&mut self, id: NodeId) -> WorldResult<()> {
        self.preview_update_this_only(id)?;
        for peer in self.peers(id)? {
            if self.nodes.contains_key(&peer) {
                self.preview_update_this_only(peer)?;
            }
        }
        Ok(())
    }

    /// Recentres `id`'s mesh, then preview-updates it and what it cuts.
    pub fn update_this_only(&mut self, id: NodeId) -> WorldResult<()> {
        self.node_mut(id)?.mesh_mut().recenter();
        self.preview_update_node(id)
    }

    /// Commits an edit of `id`: updates it, then every node it cuts.
    pub fn update_node(&mut self, id: NodeId) -> WorldResult<()> {
        self.update_this_only(id)?;
        for peer in self.peers(id)? {
            if self.nodes.contains_key(&peer) {
                self.update_this_only(peer)?;
            }
        }
        Ok(())
    }
}
