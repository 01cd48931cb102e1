use crate::math::{Point, Real, Vector};

/// A single impact applied to a hull.
///
/// A shot is a ray carrying a force: its `direction` is not normalized, the
/// vector length is the force magnitude.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Shot {
    /// The point the shot was fired from.
    pub origin: Point<Real>,
    /// The direction the shot travels along. Its length is the force magnitude.
    pub direction: Vector<Real>,
    /// How deep the shot penetrates the hull, from `0.0` (stops at the
    /// surface) to `1.0` (traverses the hull completely).
    pub penetration_percent: Real,
}

impl Shot {
    /// Creates a shot from its origin, its direction (with the force
    /// magnitude as its length), and its penetration in `[0, 1]`.
    pub fn new(origin: Point<Real>, direction: Vector<Real>, penetration_percent: Real) -> Self {
        Self {
            origin,
            direction,
            penetration_percent,
        }
    }
}

/// Parameters controlling how a hull is shattered.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ShatterOptions {
    /// Run a cosmetic smoothing pass on every shard mesh.
    pub should_smooth_shards: bool,
    /// Scales the force of every shot.
    pub shot_multiplier: Real,
    /// Moves the apparent blast source of each shot from its entry point
    /// toward its interior point, by this fraction of the penetration
    /// segment. Values large enough to push the source past a shard center
    /// invert that shard's outward direction; no clamping is applied.
    pub interior_velocity_center_percent: Option<Real>,
    /// Exponent of the direction-alignment warp applied to shard distances
    /// before distributing forces. `None` disables the warp.
    pub distance_dot_power: Option<Real>,
    /// Perturbs every final velocity by a random offset of this fraction of
    /// the velocity's own magnitude.
    pub random_velocity_percent: Option<Real>,
    /// The fewest Voronoi seeds ever handed to the diagram builder. Shortfall
    /// is padded with decoy points far outside the hull.
    pub min_control_points: u32,
    /// Hard cap on the number of Voronoi seeds.
    pub max_control_points: u32,
}

impl Default for ShatterOptions {
    fn default() -> Self {
        Self {
            should_smooth_shards: false,
            shot_multiplier: 1.0,
            interior_velocity_center_percent: None,
            distance_dot_power: Some(0.4),
            random_velocity_percent: None,
            min_control_points: 5,
            max_control_points: 33,
        }
    }
}
