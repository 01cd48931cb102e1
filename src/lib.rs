/*!
shatter3d
=========

**shatter3d** is a 3-dimensional convex-hull shattering library written with
the rust programming language. Given a closed convex triangle mesh and a set
of shots fired at it, it computes where each shot crosses the hull, plants
fracture seeds around the wound channels, carves the hull into shards along
the Voronoi diagram of those seeds, and distributes an outward velocity to
every shard.

The main entry point is [`fracture::shatter_hull`].

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)] // TODO: deny this
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)] // Maybe revisit this one later.
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![deny(unused_qualifications)]
#![doc(html_root_url = "https://docs.rs/shatter3d/0.1.0")]

#[cfg(all(feature = "f32", feature = "f64"))]
std::compile_error!(
    "The `f32` and `f64` features cannot be enabled at the same time. Please enable exactly one of them."
);

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[cfg(test)]
#[macro_use]
extern crate approx;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod fracture;
pub mod query;
pub mod shape;
pub mod transformation;
pub mod utils;

mod real {
    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub use f64 as Real;

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f32")]
    pub use f32 as Real;
}

/// Compilation flags dependent aliases for mathematical types.
pub mod math {
    pub use super::real::*;
    use na::U3;

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The dimension of the ambient space.
    pub type Dim = U3;

    /// The point type.
    pub use na::Point3 as Point;

    /// The vector type.
    pub use na::Vector3 as Vector;

    /// The unit vector type.
    pub use na::UnitVector3 as UnitVector;

    /// The rotation type.
    pub use na::UnitQuaternion as Rotation;

    /// The translation type.
    pub use na::Translation3 as Translation;
}
