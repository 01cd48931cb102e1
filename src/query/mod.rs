//! Non-persistent geometric queries.

pub use self::ray::{ray_crossings_with_hull, ray_toi_with_triangle, Ray};

pub mod ray;
