//! Edit actions.
//!
//! An action is created from a selection, previewed any number of times
//! while the user drags, committed once, and then undone or redone. The
//! caller owns the history; actions only know how to apply and reverse
//! themselves against a [`World`].
//!
//! Previews move geometry without recentring. A commit recentres, so a
//! drag captures the node's origin and local positions on either side of
//! the commit; undo and redo put one capture back verbatim and rebuild
//! without recentring.

use smaug_mesh::primitives::cube::{cube_room, BACK, FRONT};
use smaug_mesh::{PointKey, Vec3};
use tracing::debug;

use crate::error::{WorldError, WorldResult};
use crate::node::{Node, NodeId};
use crate::world::World;

/// Contract between the input layer and the world.
pub trait EditAction {
    /// Name shown in the history.
    fn name(&self) -> &'static str;

    /// Shows the effect of `delta` without committing it.
    fn preview(&mut self, world: &mut World, delta: Vec3) -> WorldResult<()>;

    /// Applies `delta` permanently.
    fn commit(&mut self, world: &mut World, delta: Vec3) -> WorldResult<()>;

    /// Reverses the committed delta.
    fn undo(&mut self, world: &mut World) -> WorldResult<()>;

    /// Reapplies the committed delta.
    fn redo(&mut self, world: &mut World) -> WorldResult<()>;
}

fn invalid(reason: impl Into<String>) -> WorldError {
    WorldError::InvalidSelection {
        reason: reason.into(),
    }
}

/// Points of a part, checked against the node.
fn side_points(world: &World, node: NodeId, part: usize) -> WorldResult<Vec<PointKey>> {
    Ok(world.node(node)?.mesh().part_points(part)?)
}

// =============================================================================
// DRAGS
// =============================================================================

/// Origin and local positions of every own point of a node.
#[derive(Debug, Clone, PartialEq)]
struct Placement {
    origin: Vec3,
    positions: Vec<(PointKey, Vec3)>,
}

impl Placement {
    fn capture(world: &World, node: NodeId) -> WorldResult<Self> {
        let mesh = world.node(node)?.mesh();
        let positions = mesh
            .base_points()
            .iter()
            .map(|&key| Ok((key, mesh.position(key)?)))
            .collect::<WorldResult<Vec<_>>>()?;
        Ok(Self {
            origin: mesh.origin,
            positions,
        })
    }

    /// Writes the capture back and rebuilds the node and what it cuts.
    fn restore(&self, world: &mut World, node: NodeId) -> WorldResult<()> {
        let mesh = world.node_mut(node)?.mesh_mut();
        mesh.origin = self.origin;
        for &(key, value) in &self.positions {
            mesh.set_position(key, value)?;
        }
        world.preview_update_node(node)
    }
}

/// Moves a set of points of one node by the same delta.
#[derive(Debug, Clone)]
struct PointDrag {
    node: NodeId,
    points: Vec<PointKey>,
    original: Vec<Vec3>,
    before: Placement,
    after: Option<Placement>,
}

impl PointDrag {
    fn new(world: &World, node: NodeId, points: Vec<PointKey>) -> WorldResult<Self> {
        let mesh = world.node(node)?.mesh();
        let original = points
            .iter()
            .map(|&p| mesh.position(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            node,
            points,
            original,
            before: Placement::capture(world, node)?,
            after: None,
        })
    }

    fn place(&self, world: &mut World, delta: Vec3) -> WorldResult<()> {
        let mesh = world.node_mut(self.node)?.mesh_mut();
        for (&key, &start) in self.points.iter().zip(&self.original) {
            mesh.set_position(key, start + delta)?;
        }
        Ok(())
    }

    fn preview(&mut self, world: &mut World, delta: Vec3) -> WorldResult<()> {
        self.place(world, delta)?;
        world.preview_update_node(self.node)
    }

    fn commit(&mut self, world: &mut World, delta: Vec3) -> WorldResult<()> {
        self.place(world, delta)?;
        world.update_node(self.node)?;
        self.after = Some(Placement::capture(world, self.node)?);
        Ok(())
    }

    fn undo(&self, world: &mut World) -> WorldResult<()> {
        self.before.restore(world, self.node)
    }

    fn redo(&self, world: &mut World) -> WorldResult<()> {
        self.after
            .as_ref()
            .ok_or_else(|| invalid("redo of a drag that was never committed"))?
            .restore(world, self.node)
    }
}

/// Drags one vertex of a node.
#[derive(Debug, Clone)]
pub struct VertexDragAction {
    drag: PointDrag,
}

impl VertexDragAction {
    /// Selects `point`, which must be one of the node's own positions.
    pub fn new(world: &World, node: NodeId, point: PointKey) -> WorldResult<Self> {
        if !world.node(node)?.mesh().base_points().contains(&point) {
            return Err(invalid(format!("point {point:?} is not a vertex of node {node}")));
        }
        Ok(Self {
            drag: PointDrag::new(world, node, vec![point])?,
        })
    }
}

impl EditAction for VertexDragAction {
    fn name(&self) -> &'static str {
        "Drag Vertex"
    }

    fn preview(&mut self, world: &mut World, delta: Vec3) -> WorldResult<()> {
        self.drag.preview(world, delta)
    }

    fn commit(&mut self, world: &mut World, delta: Vec3) -> WorldResult<()> {
        self.drag.commit(world, delta)
    }

    fn undo(&mut self, world: &mut World) -> WorldResult<()> {
        self.drag.undo(world)
    }

    fn redo(&mut self, world: &mut World) -> WorldResult<()> {
        self.drag.redo(world)
    }
}

/// Drags every vertex of one part.
#[derive(Debug, Clone)]
pub struct SideDragAction {
    drag: PointDrag,
}

impl SideDragAction {
    /// Selects part `part` of `node`.
    pub fn new(world: &World, node: NodeId, part: usize) -> WorldResult<Self> {
        let points = side_points(world, node, part)?;
        Ok(Self {
            drag: PointDrag::new(world, node, points)?,
        })
    }
}

impl EditAction for SideDragAction {
    fn name(&self) -> &'static str {
        "Drag Side"
    }

    fn preview(&mut self, world: &mut World, delta: Vec3) -> WorldResult<()> {
        self.drag.preview(world, delta)
    }

    fn commit(&mut self, world: &mut World, delta: Vec3) -> WorldResult<()> {
        self.drag.commit(world, delta)
    }

    fn undo(&mut self, world: &mut World) -> WorldResult<()> {
        self.drag.undo(world)
    }

    fn redo(&mut self, world: &mut World) -> WorldResult<()> {
        self.drag.redo(world)
    }
}

// =============================================================================
// WALL EXTRUDE
// =============================================================================

/// Pushes a four-sided part out into a new room connected to the source.
///
/// The new room's front part is the selected part reversed, so the two face
/// each other and cut one another away, opening the wall. Its back part is
/// the selected part moved by the delta.
#[derive(Debug, Clone)]
pub struct WallExtrudeAction {
    node: NodeId,
    part: usize,
    delta: Vec3,
    guides: Vec<(Vec3, Vec3)>,
    extrusion: Option<NodeId>,
}

impl WallExtrudeAction {
    /// Selects part `part` of `node`, which must have exactly four vertices.
    pub fn new(world: &World, node: NodeId, part: usize) -> WorldResult<Self> {
        let sides = side_points(world, node, part)?.len();
        if sides != 4 {
            return Err(invalid(format!(
                "wall extrude needs a 4-sided part, part {part} of node {node} has {sides}"
            )));
        }
        Ok(Self {
            node,
            part,
            delta: Vec3::ZERO,
            guides: Vec::new(),
            extrusion: None,
        })
    }

    /// Node created by the last commit or redo.
    pub fn extrusion(&self) -> Option<NodeId> {
        self.extrusion
    }

    /// World-space start and offset of one guide line per selected vertex,
    /// refreshed by every preview.
    pub fn guides(&self) -> &[(Vec3, Vec3)] {
        &self.guides
    }

    fn create_extrusion(&self, world: &World) -> WorldResult<Node> {
        let source = world.node(self.node)?.mesh();
        let selected = source
            .part_points(self.part)?
            .into_iter()
            .map(|p| source.position(p))
            .collect::<Result<Vec<_>, _>>()?;

        let mut room = cube_room(1.0)?;
        room.origin = source.origin;
        let front = room.part_points(FRONT)?;
        let back = room.part_points(BACK)?;
        for ((&p, &b), &f) in selected.iter().zip(&back).zip(front.iter().rev()) {
            room.set_position(b, p + self.delta)?;
            room.set_position(f, p)?;
        }
        Node::new(room, &world.config().tolerances)
    }

    fn connect_and_update(&self, world: &mut World, id: NodeId) -> WorldResult<()> {
        world.connect(id, self.node)?;
        world.update_node(id)
    }
}

impl EditAction for WallExtrudeAction {
    fn name(&self) -> &'static str {
        "Extrude Wall"
    }

    fn preview(&mut self, world: &mut World, delta: Vec3) -> WorldResult<()> {
        let source = world.node(self.node)?.mesh();
        let outward = source.part(self.part)?.normal.dot(delta) < 0.0;
        let mut guides = Vec::with_capacity(4);
        for p in source.part_points(self.part)? {
            guides.push((source.world_position(p)?, delta));
        }
        self.guides = guides;
        self.delta = delta;
        debug!(node = %self.node, part = self.part, outward, "extrude preview");
        Ok(())
    }

    fn commit(&mut self, world: &mut World, delta: Vec3) -> WorldResult<()> {
        self.delta = delta;
        let node = self.create_extrusion(world)?;
        let id = world.register_node(node)?;
        self.extrusion = Some(id);
        self.connect_and_update(world, id)
    }

    fn undo(&mut self, world: &mut World) -> WorldResult<()> {
        let Some(id) = self.extrusion else {
            return Ok(());
        };
        world.delete_node(id);
        world.disconnect(self.node, id)?;
        world.update_this_only(self.node)
    }

    fn redo(&mut self, world: &mut World) -> WorldResult<()> {
        let id = self
            .extrusion
            .ok_or_else(|| invalid("redo of a wall extrude that was never committed"))?;
        let node = self.create_extrusion(world)?;
        world.assign_id(node, id)?;
        self.connect_and_update(world, id)
    }
}
