//! Bounding volumes.

#[doc(inline)]
pub use self::aabb::Aabb;

#[doc(hidden)]
pub mod aabb;
