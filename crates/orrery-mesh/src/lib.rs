//! Procedural meshes: the latitude/longitude sphere shared by every body and
//! the screen-aligned background quad.

mod quad;
mod sphere;

pub use quad::{QuadMesh, background_quad};
pub use sphere::{MeshError, SphereMesh, generate_sphere};
