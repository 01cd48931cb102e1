//! Shapes supported by shatter3d.

pub use self::hull_mesh::{HullMesh, HullMeshError};
pub use self::plane::Plane;
pub use self::segment::Segment;
pub use self::triangle::Triangle;

mod hull_mesh;
mod plane;
mod segment;
mod triangle;
