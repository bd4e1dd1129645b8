//! Static geometry uploaded once and drawn every frame.

mod quad;

pub use quad::{QuadMesh, QuadVertex, QUAD_INDICES, QUAD_VERTICES};
