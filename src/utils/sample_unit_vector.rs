use crate::math::{Real, Vector};
use na::{RealField, Unit};
use rand::Rng;

/// Samples a direction uniformly distributed on the unit sphere.
#[inline]
pub fn sample_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Unit<Vector<Real>> {
    let z: Real = rng.gen_range(-1.0..=1.0);
    let theta: Real = rng.gen_range(0.0..Real::two_pi());
    let r = (1.0 - z * z).max(0.0).sqrt();

    Unit::new_unchecked(Vector::new(r * theta.cos(), r * theta.sin(), z))
}
