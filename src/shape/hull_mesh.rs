use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::shape::Triangle;
use na::RealField;

/// Indicates an inconsistency while building a convex hull mesh.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum HullMeshError {
    /// A hull mesh must contain at least one triangle.
    #[error("a hull mesh must contain at least one triangle.")]
    EmptyIndices,
    /// Found a triangle referencing a vertex that is not part of the vertex buffer.
    #[error("the triangle {triangle} references the out-of-bounds vertex {index}.")]
    OutOfBoundsIndex {
        /// The triangle containing the out-of-bounds index.
        triangle: u32,
        /// The offending vertex index.
        index: u32,
    },
    /// Found a vertex with a NaN or infinite coordinate.
    #[error("the vertex {0} has a non-finite coordinate.")]
    NonFiniteVertex(u32),
}

/// A closed convex triangle mesh.
///
/// The triangles are expected to be wound counter-clockwise when seen from
/// outside the hull, so that all the triangle normals point outward. The
/// constructor validates the index buffer and the vertex coordinates, but
/// neither convexity nor watertightness: operations on a hull that does not
/// uphold these return truncated or empty results instead of failing.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct HullMesh {
    vertices: Vec<Point<Real>>,
    indices: Vec<[u32; 3]>,
    aabb: Aabb,
}

impl HullMesh {
    /// Creates a hull mesh from a vertex buffer and an index buffer.
    pub fn try_new(
        vertices: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
    ) -> Result<HullMesh, HullMeshError> {
        if indices.is_empty() {
            return Err(HullMeshError::EmptyIndices);
        }

        for (tri_id, idx) in indices.iter().enumerate() {
            for index in idx {
                if *index as usize >= vertices.len() {
                    return Err(HullMeshError::OutOfBoundsIndex {
                        triangle: tri_id as u32,
                        index: *index,
                    });
                }
            }
        }

        for (vtx_id, pt) in vertices.iter().enumerate() {
            if !pt.coords.iter().all(|x| x.is_finite()) {
                return Err(HullMeshError::NonFiniteVertex(vtx_id as u32));
            }
        }

        let aabb = Aabb::from_points(&vertices);

        Ok(HullMesh {
            vertices,
            indices,
            aabb,
        })
    }

    /// Creates the hull mesh of a box centered at the origin, with the given half-extents.
    pub fn cuboid(half_extents: Vector<Real>) -> HullMesh {
        let he = half_extents;
        let vertices = vec![
            Point::new(-he.x, -he.y, he.z),
            Point::new(-he.x, -he.y, -he.z),
            Point::new(he.x, -he.y, -he.z),
            Point::new(he.x, -he.y, he.z),
            Point::new(-he.x, he.y, he.z),
            Point::new(-he.x, he.y, -he.z),
            Point::new(he.x, he.y, -he.z),
            Point::new(he.x, he.y, he.z),
        ];

        let indices = vec![
            [4, 5, 0],
            [5, 1, 0],
            [5, 6, 1],
            [6, 2, 1],
            [6, 7, 3],
            [2, 6, 3],
            [7, 4, 0],
            [3, 7, 0],
            [0, 1, 2],
            [3, 0, 2],
            [7, 6, 5],
            [4, 7, 5],
        ];

        let aabb = Aabb::from_points(&vertices);

        HullMesh {
            vertices,
            indices,
            aabb,
        }
    }

    /// Creates the hull mesh of a ball centered at the origin, discretized as an UV-sphere.
    ///
    /// # Panics
    ///
    /// Panics if `ntheta_subdiv < 3` or `nphi_subdiv < 2`.
    pub fn ball(radius: Real, ntheta_subdiv: u32, nphi_subdiv: u32) -> HullMesh {
        assert!(
            ntheta_subdiv >= 3,
            "A ball hull requires at least 3 subdivisions around its axis."
        );
        assert!(
            nphi_subdiv >= 2,
            "A ball hull requires at least 2 subdivisions along its axis."
        );

        let dtheta = Real::two_pi() / (ntheta_subdiv as Real);
        let dphi = Real::pi() / (nphi_subdiv as Real);

        let mut vertices = Vec::with_capacity(((nphi_subdiv - 1) * ntheta_subdiv) as usize + 2);
        vertices.push(Point::new(0.0, -radius, 0.0));

        for i in 1..nphi_subdiv {
            let phi = -Real::frac_pi_2() + dphi * (i as Real);
            let (sin_phi, cos_phi) = phi.sin_cos();

            for j in 0..ntheta_subdiv {
                let theta = dtheta * (j as Real);
                vertices.push(Point::new(
                    radius * cos_phi * theta.cos(),
                    radius * sin_phi,
                    radius * cos_phi * theta.sin(),
                ));
            }
        }

        vertices.push(Point::new(0.0, radius, 0.0));

        // Index of the `j`-th point of the `i`-th ring, wrapping around the seam.
        let ring = |i: u32, j: u32| 1 + (i - 1) * ntheta_subdiv + (j % ntheta_subdiv);
        let top = (vertices.len() - 1) as u32;

        let mut indices = Vec::new();

        for j in 0..ntheta_subdiv {
            indices.push([0, ring(1, j), ring(1, j + 1)]);
        }

        for i in 1..nphi_subdiv - 1 {
            for j in 0..ntheta_subdiv {
                indices.push([ring(i, j), ring(i + 1, j), ring(i + 1, j + 1)]);
                indices.push([ring(i, j), ring(i + 1, j + 1), ring(i, j + 1)]);
            }
        }

        for j in 0..ntheta_subdiv {
            indices.push([top, ring(nphi_subdiv - 1, j + 1), ring(nphi_subdiv - 1, j)]);
        }

        let aabb = Aabb::from_points(&vertices);

        HullMesh {
            vertices,
            indices,
            aabb,
        }
    }

    /// The vertex buffer of this mesh.
    #[inline]
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The index buffer of this mesh.
    #[inline]
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// The axis-aligned bounding box of this mesh.
    #[inline]
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// The number of triangles forming this mesh.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len()
    }

    /// An iterator through all the triangles of this mesh.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = Triangle> + '_ {
        self.indices.iter().map(move |ids| {
            Triangle::new(
                self.vertices[ids[0] as usize],
                self.vertices[ids[1] as usize],
                self.vertices[ids[2] as usize],
            )
        })
    }

    /// Returns the same mesh with all its vertices shifted by `shift`.
    pub fn translated(mut self, shift: &Vector<Real>) -> HullMesh {
        for pt in &mut self.vertices {
            *pt += *shift;
        }

        self.aabb = Aabb::new(self.aabb.mins + shift, self.aabb.maxs + shift);
        self
    }

    /// The signed volume enclosed by this mesh.
    ///
    /// The volume is positive whenever the mesh triangles are wound
    /// counter-clockwise seen from the outside, and negative if they are all
    /// wound the other way around.
    pub fn signed_volume(&self) -> Real {
        let mut volume = 0.0;

        for idx in &self.indices {
            let a = self.vertices[idx[0] as usize].coords;
            let b = self.vertices[idx[1] as usize].coords;
            let c = self.vertices[idx[2] as usize].coords;
            volume += a.dot(&b.cross(&c));
        }

        volume / 6.0
    }
}

#[cfg(test)]
mod test {
    use super::{HullMesh, HullMeshError};
    use crate::math::{Point, Real, Vector};
    use na::RealField;

    #[test]
    fn cuboid_signed_volume() {
        let cuboid = HullMesh::cuboid(Vector::new(1.0, 2.0, 3.0));
        assert_relative_eq!(cuboid.signed_volume(), 48.0, epsilon = 1.0e-4);
    }

    #[test]
    fn ball_signed_volume_approaches_the_exact_volume() {
        let ball = HullMesh::ball(1.0, 50, 50);
        let exact = Real::pi() * 4.0 / 3.0;

        // An inscribed discretization is always a bit smaller than the ball.
        let volume = ball.signed_volume();
        assert!(volume > exact * 0.98 && volume < exact);
    }

    #[test]
    fn translated_mesh_keeps_its_volume() {
        let cuboid = HullMesh::cuboid(Vector::new(1.0, 1.0, 1.0));
        let shifted = cuboid.translated(&Vector::new(10.0, -4.0, 2.0));

        assert_relative_eq!(shifted.signed_volume(), 8.0, epsilon = 1.0e-4);
        assert_eq!(shifted.aabb().mins, Point::new(9.0, -5.0, 1.0));
    }

    #[test]
    fn try_new_rejects_empty_indices() {
        let result = HullMesh::try_new(vec![Point::origin()], vec![]);
        assert_eq!(result.unwrap_err(), HullMeshError::EmptyIndices);
    }

    #[test]
    fn try_new_rejects_out_of_bounds_indices() {
        let vertices = vec![Point::origin(), Point::new(1.0, 0.0, 0.0)];
        let result = HullMesh::try_new(vertices, vec![[0, 1, 2]]);
        assert_eq!(
            result.unwrap_err(),
            HullMeshError::OutOfBoundsIndex {
                triangle: 0,
                index: 2
            }
        );
    }

    #[test]
    fn try_new_rejects_non_finite_vertices() {
        let vertices = vec![
            Point::origin(),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, Real::NAN, 0.0),
        ];
        let result = HullMesh::try_new(vertices, vec![[0, 1, 2]]);
        assert_eq!(result.unwrap_err(), HullMeshError::NonFiniteVertex(2));
    }
}
