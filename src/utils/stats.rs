use crate::math::Real;

/// Computes the mean and the population standard deviation of a set of values.
///
/// Returns `None` if `vals` is empty.
#[inline]
pub fn mean_std_dev(vals: &[Real]) -> Option<(Real, Real)> {
    if vals.is_empty() {
        return None;
    }

    let n = vals.len() as Real;
    let mean = vals.iter().sum::<Real>() / n;
    let variance = vals.iter().map(|v| (*v - mean) * (*v - mean)).sum::<Real>() / n;

    Some((mean, variance.sqrt()))
}
