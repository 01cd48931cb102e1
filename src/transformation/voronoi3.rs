use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::shape::{Plane, Segment};
use crate::transformation::{clip_polygon_with_plane, ordered_section_polygon};
use crate::utils::{PointKey, SortedPair};
use na::Unit;
use std::collections::HashSet;
use std::mem;

/// Error indicating that a Voronoi diagram could not be computed.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum VoronoiError {
    /// A Voronoi diagram requires at least two seeds.
    #[error("a Voronoi diagram requires at least two seeds.")]
    TooFewSeeds,
    /// Found a seed with a NaN or infinite coordinate.
    #[error("the seed {0} has a non-finite coordinate.")]
    NonFiniteSeed(u32),
    /// Found a seed lying outside of the domain box.
    #[error("the seed {0} lies outside of the diagram domain.")]
    SeedOutsideDomain(u32),
    /// Two seeds are so close to each other that their cells cannot be separated.
    #[error("the seeds {0} and {1} are coincident.")]
    CoincidentSeeds(u32, u32),
}

/// One planar face of a bounded Voronoi cell.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct VoronoiFace {
    /// The seed this face separates the cell from, or `None` if the face lies
    /// on the boundary of the diagram domain.
    pub neighbor: Option<u32>,
    /// The plane supporting this face, with its normal pointing out of the cell.
    pub plane: Plane,
    /// The vertices of this face, wound counter-clockwise around the plane normal.
    pub polygon: Vec<Point<Real>>,
}

/// A single Voronoi cell, bounded by the diagram domain.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct VoronoiCell {
    /// The index of the seed this cell was grown from.
    pub seed: u32,
    /// The faces enclosing this cell.
    ///
    /// Every point of the cell is on the non-positive side of every face
    /// plane. Bisecting planes whose face was completely swallowed by closer
    /// neighbors are not listed: they are redundant within the domain box.
    pub faces: Vec<VoronoiFace>,
}

/// A Voronoi diagram of a set of 3D seed points, bounded by a domain box.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct VoronoiDiagram {
    /// The box the diagram was bounded by.
    pub domain: Aabb,
    /// The seeds the diagram was computed from.
    pub seeds: Vec<Point<Real>>,
    /// One bounded cell per seed, in seed order.
    pub cells: Vec<VoronoiCell>,
    /// All the distinct edges of the cell faces.
    pub edges: Vec<Segment>,
}

/// Computes the Voronoi diagram of `seeds`, with all its cells clipped to the
/// `domain` box.
///
/// Every cell is the convex region of the domain whose points lie closer to
/// the cell seed than to any other seed. Cells are built by clipping the
/// domain box against the bisecting plane of the cell seed and each of its
/// neighbors, from the nearest neighbor to the farthest; neighbors too far
/// away to carve the cell are skipped without being tested.
pub fn try_voronoi3(seeds: &[Point<Real>], domain: &Aabb) -> Result<VoronoiDiagram, VoronoiError> {
    if seeds.len() < 2 {
        return Err(VoronoiError::TooFewSeeds);
    }

    for (i, seed) in seeds.iter().enumerate() {
        if !seed.coords.iter().all(|x| x.is_finite()) {
            return Err(VoronoiError::NonFiniteSeed(i as u32));
        }

        if !domain.contains_local_point(seed) {
            return Err(VoronoiError::SeedOutsideDomain(i as u32));
        }
    }

    let eps = domain.diagonal_length() * 1.0e-6;
    let mut cells = Vec::with_capacity(seeds.len());

    // Scratch buffers reused by every clip.
    let mut buffer = Vec::new();
    let mut section = Vec::new();

    for i in 0..seeds.len() {
        let seed = seeds[i];
        let mut faces = domain_box_faces(domain);
        let mut max_radius_sq = cell_radius_sq(&faces, &seed);

        // Nearest neighbors are the most likely to carve the cell, and let us
        // stop early once the remaining ones are all out of reach.
        let mut neighbors: Vec<u32> = (0..seeds.len() as u32)
            .filter(|j| *j as usize != i)
            .collect();
        neighbors.sort_by(|a, b| {
            let da = na::distance_squared(&seeds[*a as usize], &seed);
            let db = na::distance_squared(&seeds[*b as usize], &seed);
            da.total_cmp(&db)
        });

        for j in neighbors {
            let neighbor = seeds[j as usize];
            let dist_sq = na::distance_squared(&neighbor, &seed);

            // The bisecting plane lies at half this distance from the seed. If
            // that is farther than the farthest cell vertex, neither this
            // neighbor nor any of the remaining ones can carve the cell.
            if dist_sq / 4.0 > max_radius_sq {
                break;
            }

            let plane = Plane::bisecting(&seed, &neighbor)
                .ok_or(VoronoiError::CoincidentSeeds(i as u32, j))?;

            let mut any_changed = false;

            for face in &mut faces {
                if clip_polygon_with_plane(&face.polygon, &plane, eps, &mut buffer) {
                    any_changed = true;
                    mem::swap(&mut face.polygon, &mut buffer);
                }
            }

            if !any_changed {
                continue;
            }

            faces.retain(|face| face.polygon.len() >= 3);

            section.clear();
            for face in &faces {
                for pt in &face.polygon {
                    if plane.signed_distance(pt).abs() <= eps * 2.0 {
                        section.push(*pt);
                    }
                }
            }

            let cap = ordered_section_polygon(&section, &plane, eps);
            if cap.len() >= 3 {
                faces.push(VoronoiFace {
                    neighbor: Some(j),
                    plane,
                    polygon: cap,
                });
            }

            if faces.is_empty() {
                return Err(VoronoiError::CoincidentSeeds(i as u32, j));
            }

            max_radius_sq = cell_radius_sq(&faces, &seed);
        }

        cells.push(VoronoiCell {
            seed: i as u32,
            faces,
        });
    }

    let edges = distinct_edges(&cells, eps);

    Ok(VoronoiDiagram {
        domain: *domain,
        seeds: seeds.to_vec(),
        cells,
        edges,
    })
}

/// The six faces of the domain box, wound counter-clockwise seen from outside.
fn domain_box_faces(domain: &Aabb) -> Vec<VoronoiFace> {
    let vertices = domain.vertices();
    let normals: [Vector<Real>; 6] = [
        Vector::x(),
        -Vector::x(),
        Vector::y(),
        -Vector::y(),
        Vector::z(),
        -Vector::z(),
    ];

    Aabb::FACES_VERTEX_IDS
        .iter()
        .zip(normals.iter())
        .map(|(&(i0, i1, i2, i3), normal)| {
            let polygon = vec![vertices[i0], vertices[i1], vertices[i2], vertices[i3]];
            VoronoiFace {
                neighbor: None,
                plane: Plane::new(Unit::new_unchecked(*normal), &polygon[0]),
                polygon,
            }
        })
        .collect()
}

fn cell_radius_sq(faces: &[VoronoiFace], seed: &Point<Real>) -> Real {
    let mut radius_sq = 0.0;

    for face in faces {
        for pt in &face.polygon {
            radius_sq = na::distance_squared(pt, seed).max(radius_sq);
        }
    }

    radius_sq
}

fn distinct_edges(cells: &[VoronoiCell], weld_dist: Real) -> Vec<Segment> {
    let mut keys = HashSet::new();
    let mut edges = Vec::new();

    for cell in cells {
        for face in &cell.faces {
            let n = face.polygon.len();

            for k in 0..n {
                let a = face.polygon[k];
                let b = face.polygon[(k + 1) % n];
                let key = SortedPair::new(
                    PointKey::new(&a, weld_dist),
                    PointKey::new(&b, weld_dist),
                );

                if keys.insert(key) {
                    edges.push(Segment::new(a, b));
                }
            }
        }
    }

    edges
}
