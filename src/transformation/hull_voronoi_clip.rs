use crate::math::{Point, Real};
use crate::shape::{HullMesh, Triangle};
use crate::transformation::{clip_polygon_with_plane, ordered_section_polygon, VoronoiDiagram};
use crate::utils::PointKey;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::mem;

/// Error indicating that a hull could not be split along a Voronoi diagram.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum HullClipError {
    /// The hull sticks out of the diagram domain, so the diagram cells do not
    /// cover it completely.
    #[error("the hull is not contained in the Voronoi diagram domain.")]
    HullOutsideDomain,
}

/// A closed piece of a convex hull, cut out by one Voronoi cell.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CellShard {
    /// The index of the Voronoi cell this shard was cut by.
    pub cell: u32,
    /// The vertex buffer of the shard.
    pub vertices: Vec<Point<Real>>,
    /// The triangles of the shard, wound counter-clockwise seen from outside.
    pub indices: Vec<[u32; 3]>,
}

/// Splits a convex hull into one shard per Voronoi cell overlapping it.
///
/// Each shard is the intersection of the hull with one cell of `diagram`,
/// closed by flat cap faces along the cell boundaries. Cells that do not
/// overlap the hull produce no shard; the `cell` index of each shard tells
/// which cell it was cut by.
///
/// The shards partition the hull: their volumes sum to the hull volume. This
/// only holds if the hull is entirely inside the diagram domain, so the cells
/// cover it; an `Err` is returned otherwise.
pub fn clip_hull_with_voronoi(
    hull: &HullMesh,
    diagram: &VoronoiDiagram,
) -> Result<Vec<CellShard>, HullClipError> {
    if !diagram.domain.contains(hull.aabb()) {
        return Err(HullClipError::HullOutsideDomain);
    }

    let eps = diagram.domain.diagonal_length() * 1.0e-6;
    let mut shards = Vec::new();

    // Scratch buffers reused by every clip.
    let mut buffer = Vec::new();
    let mut section = Vec::new();

    for cell in &diagram.cells {
        let mut polygons: Vec<Vec<Point<Real>>> = hull
            .triangles()
            .map(|tri| vec![tri.a, tri.b, tri.c])
            .collect();

        // Only the bisecting planes matter: the domain faces cannot cut a
        // hull the domain contains.
        for face in cell.faces.iter().filter(|f| f.neighbor.is_some()) {
            let mut any_changed = false;

            for polygon in &mut polygons {
                if clip_polygon_with_plane(polygon, &face.plane, eps, &mut buffer) {
                    any_changed = true;
                    mem::swap(polygon, &mut buffer);
                }
            }

            polygons.retain(|polygon| polygon.len() >= 3);

            if !any_changed {
                continue;
            }

            // Close the shard along the cutting plane.
            section.clear();
            for polygon in &polygons {
                for pt in polygon {
                    if face.plane.signed_distance(pt).abs() <= eps * 2.0 {
                        section.push(*pt);
                    }
                }
            }

            let cap = ordered_section_polygon(&section, &face.plane, eps);
            if cap.len() >= 3 {
                polygons.push(cap);
            }
        }

        if let Some(shard) = weld_shard(cell.seed, &polygons, eps) {
            shards.push(shard);
        }
    }

    Ok(shards)
}

/// Welds the clipped polygons of one cell into an indexed triangle mesh.
///
/// Returns `None` if nothing of the hull was left in the cell.
fn weld_shard(cell: u32, polygons: &[Vec<Point<Real>>], weld_dist: Real) -> Option<CellShard> {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let mut keys: HashMap<PointKey, u32> = HashMap::new();
    let mut ids = Vec::new();

    for polygon in polygons {
        ids.clear();
        ids.extend(polygon.iter().map(|pt| {
            match keys.entry(PointKey::new(pt, weld_dist)) {
                Entry::Occupied(entry) => *entry.get(),
                Entry::Vacant(entry) => {
                    let id = vertices.len() as u32;
                    vertices.push(*pt);
                    *entry.insert(id)
                }
            }
        }));

        for k in 1..ids.len().saturating_sub(1) {
            let (ia, ib, ic) = (ids[0], ids[k], ids[k + 1]);

            if ia == ib || ib == ic || ic == ia {
                continue;
            }

            let tri = Triangle::new(
                vertices[ia as usize],
                vertices[ib as usize],
                vertices[ic as usize],
            );

            // Welding can flatten a sliver into a segment.
            if tri.scaled_normal().norm() <= weld_dist * weld_dist {
                continue;
            }

            indices.push([ia, ib, ic]);
        }
    }

    if indices.is_empty() {
        None
    } else {
        Some(CellShard {
            cell,
            vertices,
            indices,
        })
    }
}
