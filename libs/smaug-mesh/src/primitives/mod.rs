//! Ready-made meshes.

pub mod cube;

pub use cube::cube_room;
