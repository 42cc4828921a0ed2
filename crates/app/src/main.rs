//! Command-line front-end: import an OBJ scene and report its meshes.

use std::path::PathBuf;

use anyhow::{Result, bail};
use asset::{mesh::MeshImportOptions, obj};

fn parse_calculate_normals_arg() -> bool {
    std::env::args().any(|arg| arg == "--calculate-normals")
}

fn parse_path_arg() -> Option<PathBuf> {
    // First argument that isn't a flag is the scene path.
    std::env::args()
        .skip(1)
        .find(|arg| !arg.starts_with("--"))
        .map(PathBuf::from)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(path) = parse_path_arg() else {
        bail!("usage: app [--calculate-normals] <scene.obj>");
    };
    let options = MeshImportOptions {
        calculate_normals: parse_calculate_normals_arg(),
    };

    let meshes = obj::import_obj_from_path(&path, options)?;
    for mesh in &meshes {
        log::info!(
            "mesh '{}': {} vertices, {} texture coordinates, {} normals, {} indices",
            mesh.name,
            mesh.vertices.len(),
            mesh.texture_coordinates.len(),
            mesh.normals.len(),
            mesh.indices.len(),
        );
    }
    log::info!("Imported {} mesh(es) from {}", meshes.len(), path.display());
    Ok(())
}
