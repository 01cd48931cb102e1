use crate::math::{Point, Real, Vector};
use smallvec::SmallVec;

/// Smooths a triangle mesh by moving each vertex toward the average of its
/// neighbors.
///
/// Runs `iterations` rounds of uniform Laplacian smoothing. At each round,
/// every vertex is displaced by `factor` times the vector from itself to the
/// centroid of the vertices it shares an edge with. All displacements of one
/// round are computed from the positions at the start of the round, so the
/// result does not depend on the vertex order.
///
/// Smoothing shrinks the mesh slightly. It does not preserve convexity or
/// planarity of faces, so it is meant as a cosmetic pass on visual meshes,
/// not on collision geometry.
pub fn laplacian_smooth(
    vertices: &mut [Point<Real>],
    indices: &[[u32; 3]],
    iterations: usize,
    factor: Real,
) {
    assert!(
        factor >= 0.0 && factor <= 1.0,
        "the smoothing factor must be in [0, 1]."
    );

    if vertices.is_empty() || iterations == 0 || factor == 0.0 {
        return;
    }

    let mut neighbors: Vec<SmallVec<[u32; 8]>> = vec![SmallVec::new(); vertices.len()];

    for idx in indices {
        for k in 0..3 {
            let a = idx[k];
            let b = idx[(k + 1) % 3];

            if !neighbors[a as usize].contains(&b) {
                neighbors[a as usize].push(b);
            }

            if !neighbors[b as usize].contains(&a) {
                neighbors[b as usize].push(a);
            }
        }
    }

    let mut displacements = vec![Vector::zeros(); vertices.len()];

    for _ in 0..iterations {
        for (i, adj) in neighbors.iter().enumerate() {
            if adj.is_empty() {
                displacements[i] = Vector::zeros();
                continue;
            }

            let mut centroid = Vector::zeros();
            for j in adj {
                centroid += vertices[*j as usize].coords;
            }
            centroid /= adj.len() as Real;

            displacements[i] = (centroid - vertices[i].coords) * factor;
        }

        for (vertex, displacement) in vertices.iter_mut().zip(displacements.iter()) {
            vertex.coords += displacement;
        }
    }
}
