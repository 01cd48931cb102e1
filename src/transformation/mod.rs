//! Transformation, clipping and fracture of meshes.

pub use self::hull_voronoi_clip::{clip_hull_with_voronoi, CellShard, HullClipError};
pub use self::mesh_smooth::laplacian_smooth;
pub use self::polyhedron_clip::{clip_polygon_with_plane, ordered_section_polygon};
pub use self::voronoi3::{
    try_voronoi3, VoronoiCell, VoronoiDiagram, VoronoiError, VoronoiFace,
};

mod hull_voronoi_clip;
mod mesh_smooth;
mod polyhedron_clip;
mod voronoi3;
