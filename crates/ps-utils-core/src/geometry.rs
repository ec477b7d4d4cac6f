//! Unit-cube geometry and voxel mesh construction.

use glam::{IVec3, UVec3, Vec3};

/// Corners of the unit cube.
pub const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(1.0, 1.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(1.0, 0.0, 1.0),
    Vec3::new(0.0, 1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
];

/// Edges of the unit cube, as pairs of [`CUBE_VERTICES`] indices.
pub const CUBE_EDGES: [[u32; 2]; 12] = [
    [4, 5],
    [5, 7],
    [7, 6],
    [6, 4],
    [0, 1],
    [1, 3],
    [3, 2],
    [2, 0],
    [4, 0],
    [5, 1],
    [7, 3],
    [6, 2],
];

/// Outward-facing triangles of the unit cube (two per side).
pub const CUBE_TRIANGLES: [[u32; 3]; 12] = [
    [4, 5, 7],
    [7, 6, 4],
    [3, 1, 0],
    [0, 2, 3],
    [1, 7, 5],
    [7, 1, 3],
    [4, 6, 0],
    [0, 6, 2],
    [7, 3, 6],
    [6, 3, 2],
    [4, 0, 5],
    [5, 0, 1],
];

/// Triangle mesh of a voxel set: 8 vertices and 12 faces per voxel.
#[derive(Debug, Clone, Default)]
pub struct VoxelMesh {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<UVec3>,
}

impl VoxelMesh {
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Axis-aligned bounds of the mesh, or `None` if it is empty.
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
        )
    }
}

/// Builds the cube mesh of voxels at `coords` on a `resolution³` grid spanning
/// `[bbox_min, bbox_max]` on every axis.
///
/// Each voxel is centred on its grid coordinate, so voxel `c` covers
/// `[c - 0.5, c + 0.5]` in grid units before scaling.
pub fn voxel_mesh(
    coords: &[IVec3],
    resolution: u32,
    bbox_min: f32,
    bbox_max: f32,
    offset: Option<Vec3>,
) -> VoxelMesh {
    let scale = (bbox_max - bbox_min) / resolution.max(1) as f32;
    let offset = offset.unwrap_or(Vec3::ZERO);

    let mut vertices = Vec::with_capacity(coords.len() * CUBE_VERTICES.len());
    let mut faces = Vec::with_capacity(coords.len() * CUBE_TRIANGLES.len());

    for (voxel, coord) in coords.iter().enumerate() {
        let center = coord.as_vec3();
        for corner in CUBE_VERTICES {
            let grid = corner - Vec3::splat(0.5) + center;
            vertices.push(scale * grid + Vec3::splat(bbox_min) + offset);
        }

        let base = (voxel * CUBE_VERTICES.len()) as u32;
        for [a, b, c] in CUBE_TRIANGLES {
            faces.push(UVec3::new(base + a, base + b, base + c));
        }
    }

    VoxelMesh { vertices, faces }
}

/// Corners and edges of the box `[min, max]`.
pub fn bbox_wireframe(min: Vec3, max: Vec3) -> (Vec<Vec3>, Vec<[u32; 2]>) {
    let extent = max - min;
    let vertices = CUBE_VERTICES.iter().map(|&c| min + extent * c).collect();
    (vertices, CUBE_EDGES.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voxel_mesh_counts() {
        let coords = [IVec3::new(0, 0, 0), IVec3::new(1, 2, 3)];
        let mesh = voxel_mesh(&coords, 4, -1.0, 1.0, None);
        assert_eq!(mesh.vertices.len(), 16);
        assert_eq!(mesh.num_faces(), 24);
        // Second voxel's faces index its own vertices
        assert!(mesh.faces[12..].iter().all(|f| f.min_element() >= 8));
    }

    #[test]
    fn test_voxel_mesh_scaling() {
        let mesh = voxel_mesh(&[IVec3::ZERO], 2, -1.0, 1.0, None);
        let (lo, hi) = mesh.bounding_box().unwrap();
        assert!((lo - Vec3::splat(-1.5)).length() < 1e-6);
        assert!((hi - Vec3::splat(-0.5)).length() < 1e-6);

        let shifted = voxel_mesh(&[IVec3::ZERO], 2, -1.0, 1.0, Some(Vec3::X));
        let (lo, _) = shifted.bounding_box().unwrap();
        assert!((lo - Vec3::new(-0.5, -1.5, -1.5)).length() < 1e-6);
    }

    #[test]
    fn test_cube_triangles_face_outward() {
        let center = Vec3::splat(0.5);
        for [a, b, c] in CUBE_TRIANGLES {
            let (a, b, c) = (
                CUBE_VERTICES[a as usize],
                CUBE_VERTICES[b as usize],
                CUBE_VERTICES[c as usize],
            );
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid - center) > 0.0);
        }
    }

    #[test]
    fn test_bbox_wireframe() {
        let (vertices, edges) = bbox_wireframe(Vec3::splat(-1.0), Vec3::splat(1.0));
        assert_eq!(vertices.len(), 8);
        assert_eq!(edges.len(), 12);
        assert_eq!(vertices[7], Vec3::splat(1.0));
        for [a, b] in edges {
            // Every edge is axis aligned with length 2
            assert!((vertices[a as usize].distance(vertices[b as usize]) - 2.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_empty_mesh_has_no_bounds() {
        assert!(VoxelMesh::default().bounding_box().is_none());
    }
}
