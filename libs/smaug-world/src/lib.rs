//! # Smaug World
//!
//! Nodes, the world editor that owns them, and the edit actions that move
//! their geometry.
//!
//! ## Architecture
//!
//! ```text
//! EditAction (preview / commit / undo / redo)
//!       ↓
//! World::update_node → recenter → fit collision → apply cuts → tessellate
//!       ↓
//! Node::buffers (RenderBuffers)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use smaug_mesh::Vec3;
//! use smaug_world::World;
//!
//! let mut world = World::default();
//! let room = world.create_cube_node(Vec3::ZERO, 1.0).unwrap();
//! world.update_node(room).unwrap();
//! assert_eq!(world.get_node(room).unwrap().buffers().triangle_count(), 12);
//! ```

pub mod actions;
pub mod error;
pub mod node;
pub mod world;

pub use actions::{EditAction, SideDragAction, VertexDragAction, WallExtrudeAction};
pub use error::{WorldError, WorldResult};
pub use node::{Node, NodeId};
pub use world::World;
