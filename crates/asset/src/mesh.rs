//! CPU-side mesh representation produced by importers.

use corelib::{Vec2, Vec3};

/// Options accepted by mesh importers.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeshImportOptions {
    /// When the file supplies no normals, compute them at import time.
    /// Declared but not wired to any behavior yet; callers must not rely
    /// on it.
    pub calculate_normals: bool,
}

/// Flattened mesh: one entry per face corner, no vertex welding.
///
/// `texture_coordinates` and `normals` are empty when the source supplied
/// none; when present they run parallel to `vertices` in corner order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub vertices: Vec<Vec3>,
    pub texture_coordinates: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Returns `true` if both vertex and index buffers are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty() && !self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::vec3;

    #[test]
    fn mesh_validity() {
        let mesh = Mesh {
            name: "tri".to_string(),
            vertices: vec![vec3(0.0, 0.0, 0.0)],
            indices: vec![0],
            ..Mesh::default()
        };
        assert!(mesh.is_valid());
        assert!(!Mesh::default().is_valid());
    }
}
