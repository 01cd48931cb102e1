use crate::fracture::{ShatterOptions, ShotHit};
use crate::math::{Point, Real, Rotation, Vector, DEFAULT_EPSILON};
use crate::shape::HullMesh;
use crate::utils::sample_unit_vector;
use arrayvec::ArrayVec;
use na::{RealField, Unit};
use rand::Rng;

/// Ring radius at the entry point, as a fraction of the hull AABB diagonal.
const ENTRY_RADIUS_PERCENT: Real = 0.05;
/// Ring radius at the exit of a longest-possible hit, as a fraction of the
/// hull AABB diagonal.
const EXIT_RADIUS_PERCENT: Real = 0.35;
/// Hit length considered "longest possible", as a fraction of the hull AABB
/// diagonal. The exit radius of shorter hits shrinks proportionally.
const MAX_AXIS_PERCENT: Real = 0.75;
/// Penetration length granted one extra ring, as a fraction of the hull AABB
/// diagonal.
const RING_SPACING_PERCENT: Real = 0.1;
/// Distance of decoy points from the hull center, in hull AABB diagonals.
const DECOY_DISTANCE: Real = 20.0;

/// Quantiles of the axial bell distribution at 16 evenly spaced cumulative
/// probabilities. Ring positions drawn from it crowd around a quarter of the
/// way down the penetration segment, where real impact craters concentrate
/// their fragmentation.
const AXIAL_BELL: [Real; 17] = [
    0.0, 0.086349, 0.127536, 0.162108, 0.193764, 0.224009, 0.253704, 0.283461, 0.313810, 0.345293,
    0.378547, 0.414419, 0.454181, 0.500000, 0.556301, 0.635537, 1.0,
];

static_assertions::const_assert!(AXIAL_BELL[0] == 0.0);
static_assertions::const_assert!(AXIAL_BELL[16] == 1.0);

/// Builds the Voronoi seed points for a set of hits on a hull.
///
/// Each hit line receives rings of 2 to 4 points, placed along the
/// penetration segment at axial positions drawn from a bell distribution and
/// widened with depth so the seeds outline a fracture cone. The total number
/// of points is driven to `2 × hits + 1` per tenth-of-a-diagonal of
/// accumulated penetration length, clamped to the configured maximum; longer,
/// sparsely seeded hit lines are favored when distributing the extra rings.
///
/// The result never has fewer than `options.min_control_points` points: any
/// shortfall is padded with decoy points far outside the hull, so that a
/// Voronoi construction downstream gets enough seeds without the decoys
/// carving the hull.
pub fn sample_control_points<R: Rng + ?Sized>(
    hull: &HullMesh,
    hits: &[ShotHit],
    options: &ShatterOptions,
    rng: &mut R,
) -> Vec<Point<Real>> {
    let diag = hull.aabb().diagonal_length();
    let mut lines: Vec<LineRings> = hits.iter().map(|hit| LineRings::new(hit, diag)).collect();

    let total_length: Real = hits.iter().map(|hit| hit.segment.length()).sum();
    let target = (2 * hits.len() + (total_length / (diag * RING_SPACING_PERCENT)).round() as usize)
        .min(options.max_control_points as usize);

    // Every hit line gets one ring no matter the budget.
    for line in &mut lines {
        line.push_ring(rng);
    }

    // Grow toward the budget, a whole ring at a time, favoring the lines
    // with the fewest points per unit of length.
    let mut count: usize = lines.iter().map(|line| line.count()).sum();
    while count < target {
        let mut order: Vec<usize> = (0..lines.len()).collect();
        order.sort_by(|a, b| {
            lines[*a]
                .points_per_length()
                .total_cmp(&lines[*b].points_per_length())
        });

        let line = &mut lines[order[skewed_index(rng, order.len())]];
        line.push_ring(rng);
        count = lines.iter().map(|line| line.count()).sum();
    }

    // Rings are indivisible, so the fill phase can overshoot. Bleed points
    // one by one out of the most crowded rings.
    while count > target {
        let mut rings = Vec::new();
        for (li, line) in lines.iter().enumerate() {
            for (ri, ring) in line.rings.iter().enumerate() {
                if !ring.is_empty() {
                    rings.push((li, ri));
                }
            }
        }

        rings.sort_by(|a, b| {
            let la = lines[a.0].rings[a.1].len();
            let lb = lines[b.0].rings[b.1].len();
            lb.cmp(&la)
        });

        let (li, ri) = rings[skewed_index(rng, rings.len())];
        let ring = &mut lines[li].rings[ri];
        let _ = ring.remove(rng.gen_range(0..ring.len()));
        count -= 1;
    }

    let mut points: Vec<Point<Real>> = lines
        .iter()
        .flat_map(|line| line.rings.iter().flatten().copied())
        .collect();

    // Pad up to the minimum with points far enough away that their cells
    // cannot touch the hull.
    let center = hull.aabb().center();
    while points.len() < options.min_control_points as usize {
        points.push(center + *sample_unit_vector(rng) * (diag * DECOY_DISTANCE));
    }

    log::trace!(
        "sampled {} control points for {} hits (budget {})",
        points.len(),
        hits.len(),
        target
    );

    points
}

/// The rings of control points grown along one hit line.
struct LineRings {
    entry: Point<Real>,
    axis: Vector<Real>,
    length: Real,
    rotation: Rotation<Real>,
    entry_radius: Real,
    exit_radius: Real,
    jitter_floor: Real,
    rings: Vec<ArrayVec<Point<Real>, 4>>,
}

impl LineRings {
    fn new(hit: &ShotHit, diag: Real) -> Self {
        let axis = hit.segment.interior - hit.segment.entry;
        let length = axis.norm();

        // For a grazing hit the segment has no usable direction, fall back to
        // the direction the shot was fired along.
        let dir = Unit::try_new(axis, DEFAULT_EPSILON)
            .or_else(|| Unit::try_new(hit.shot.direction, DEFAULT_EPSILON))
            .unwrap_or_else(Vector::z_axis);
        let rotation = Rotation::rotation_between(&Vector::z(), &dir.into_inner())
            .unwrap_or_else(|| Rotation::from_axis_angle(&Vector::x_axis(), Real::pi()));

        Self {
            entry: hit.segment.entry,
            axis,
            length,
            rotation,
            entry_radius: diag * ENTRY_RADIUS_PERCENT,
            exit_radius: diag * EXIT_RADIUS_PERCENT * (length / (diag * MAX_AXIS_PERCENT)),
            jitter_floor: diag * 5.0e-4,
            rings: Vec::new(),
        }
    }

    fn count(&self) -> usize {
        self.rings.iter().map(|ring| ring.len()).sum()
    }

    fn points_per_length(&self) -> Real {
        self.count() as Real / self.length
    }

    /// Adds one ring of 2 to 4 points at a bell-distributed axial position.
    fn push_ring<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let axial = sample_axial_percent(rng);
        let radius = self.entry_radius + (self.exit_radius - self.entry_radius) * axial;
        let center = self.entry + self.axis * axial;

        // Exactly coplanar seeds break the Voronoi construction downstream,
        // so the jitter never drops below a floor even for tiny rings.
        let jitter_radius = (radius / 20.0).max(self.jitter_floor);

        let mut ring = ArrayVec::new();
        for _ in 0..rng.gen_range(2..=4usize) {
            let angle = rng.gen_range(0.0..Real::two_pi());
            let local = Vector::new(angle.cos() * radius, angle.sin() * radius, 0.0);
            let jitter = *sample_unit_vector(rng) * jitter_radius;
            ring.push(center + self.rotation * local + jitter);
        }

        self.rings.push(ring);
    }
}

/// Interpolated draw from the axial bell quantile table.
fn sample_axial_percent<R: Rng + ?Sized>(rng: &mut R) -> Real {
    let t = rng.gen::<Real>() * (AXIAL_BELL.len() - 1) as Real;
    let k = (t as usize).min(AXIAL_BELL.len() - 2);
    let frac = t - k as Real;
    AXIAL_BELL[k] + (AXIAL_BELL[k + 1] - AXIAL_BELL[k]) * frac
}

/// A random index in `0..len`, strongly skewed toward 0.
fn skewed_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> usize {
    let t = rng.gen::<Real>().powf(3.0);
    ((t * len as Real) as usize).min(len - 1)
}
