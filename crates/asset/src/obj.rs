//! Wavefront OBJ scene importer.
//!
//! One left-to-right pass over an in-memory byte buffer: statements are
//! recognised by keyword, attribute pools grow in file order, and face
//! references are resolved to absolute indices while scanning. Negative
//! OBJ indices are relative to the pool size at the point of reference,
//! so resolving after the pools are fully populated would give wrong
//! answers; resolution has to live inside the scan. A second pass then
//! flattens every face corner into renderer-ready parallel arrays.
//!
//! Faces are assumed to be triangulated already. Material libraries,
//! groups, smoothing groups and free-form geometry are skipped without
//! error.

use std::{fs, path::Path};

use anyhow::Context;
use corelib::{Vec2, Vec3, vec2, vec3};
use thiserror::Error;

use crate::mesh::{Mesh, MeshImportOptions};
use crate::scan::Cursor;

/// Why an OBJ import failed. Any error aborts the whole import; no
/// partial mesh list is ever returned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ImportError {
    /// A statement the grammar supports could not be parsed.
    #[error("syntax error: {0}")]
    Syntax(String),
    /// A face statement appeared before any `o` statement.
    #[error("face statement before any object name")]
    FaceBeforeObject,
    /// An `o` statement ended before a name was found.
    #[error("object statement is missing a name")]
    MissingObjectName,
    /// A resolved face reference points outside its attribute pool.
    #[error("{attribute} index {index} is out of bounds (pool holds {len})")]
    IndexOutOfBounds {
        attribute: &'static str,
        index: i64,
        len: usize,
    },
}

/// One polygon: parallel per-corner index lists, already resolved to
/// zero-based absolute values. Texture coordinates and normals may be
/// absent entirely; when present they match `vertex_indices` in length.
#[derive(Debug, Default)]
struct FaceRecord {
    vertex_indices: Vec<i64>,
    texture_coordinate_indices: Vec<i64>,
    normal_indices: Vec<i64>,
}

#[derive(Debug, Default)]
struct ObjectRecord {
    name: String,
    faces: Vec<FaceRecord>,
}

/// Attribute pools plus per-object topology accumulated by the scan.
/// Pools are append-only and span the whole file, independent of object
/// boundaries.
#[derive(Debug, Default)]
struct ObjScene {
    vertices: Vec<Vec3>,
    normals: Vec<Vec3>,
    texture_coordinates: Vec<Vec2>,
    objects: Vec<ObjectRecord>,
}

/// Import a Wavefront OBJ scene from an in-memory byte buffer.
///
/// Produces one [`Mesh`] per `o` statement, in file order. Corners are
/// flattened without welding, so the index buffer of each mesh is the
/// identity sequence `0..count`.
pub fn import_obj(data: &[u8], _options: MeshImportOptions) -> Result<Vec<Mesh>, ImportError> {
    let scene = parse(data)?;
    let meshes = assemble(scene)?;
    // TODO: synthesize normals when options.calculate_normals is set and
    // the file carried none.
    log::debug!("imported {} mesh(es) from {} bytes", meshes.len(), data.len());
    Ok(meshes)
}

/// Convenience helper to import an OBJ string literal.
pub fn import_obj_from_str(
    contents: &str,
    options: MeshImportOptions,
) -> Result<Vec<Mesh>, ImportError> {
    import_obj(contents.as_bytes(), options)
}

/// Import an OBJ scene from a file path.
pub fn import_obj_from_path(
    path: impl AsRef<Path>,
    options: MeshImportOptions,
) -> anyhow::Result<Vec<Mesh>> {
    let path = path.as_ref();
    log::info!("Loading OBJ scene from {:?}", path);
    let data = fs::read(path)
        .with_context(|| format!("Failed to read OBJ file: {}", path.display()))?;
    let meshes = import_obj(&data, options)?;
    log::info!("Imported {} mesh(es) from {:?}", meshes.len(), path);
    Ok(meshes)
}

/// OBJ reference numbers are 1-based when positive; negative values count
/// backwards from the current end of the pool. `-1` is the most recently
/// added entry, so no further adjustment is needed on that branch. No
/// bounds check happens here; the assembler rejects out-of-range values.
fn resolve_index(raw: i64, pool_len: usize) -> i64 {
    if raw < 0 {
        pool_len as i64 + raw
    } else {
        raw - 1
    }
}

fn require_float(cursor: &mut Cursor<'_>, what: &'static str) -> Result<f32, ImportError> {
    cursor
        .read_float()
        .ok_or_else(|| ImportError::Syntax(format!("expected number in {what}")))
}

fn require_int(cursor: &mut Cursor<'_>, what: &'static str) -> Result<i64, ImportError> {
    cursor
        .read_int64()
        .ok_or_else(|| ImportError::Syntax(format!("expected {what} in 'f' statement")))
}

fn parse(data: &[u8]) -> Result<ObjScene, ImportError> {
    let mut scene = ObjScene::default();
    let mut current_object: Option<usize> = None;
    let mut cursor = Cursor::new(data);

    while !cursor.at_end() {
        cursor.skip_whitespace();
        if cursor.at_end() {
            break;
        }

        if cursor.match_literal(b"v ") {
            // Geometric vertex. A rational curve or surface may carry a
            // 4th (w) component; everything after z is discarded.
            let x = require_float(&mut cursor, "'v' statement")?;
            let y = require_float(&mut cursor, "'v' statement")?;
            let z = require_float(&mut cursor, "'v' statement")?;
            cursor.skip_until_newline();
            scene.vertices.push(vec3(x, y, z));
        } else if cursor.match_literal(b"vn") {
            let x = require_float(&mut cursor, "'vn' statement")?;
            let y = require_float(&mut cursor, "'vn' statement")?;
            let z = require_float(&mut cursor, "'vn' statement")?;
            scene.normals.push(vec3(x, y, z));
        } else if cursor.match_literal(b"vt") {
            let u = require_float(&mut cursor, "'vt' statement")?;
            // v is optional and defaults to 0; a third (w) component would
            // be a 3D texture coordinate, which we don't support, so it is
            // probed and discarded.
            let v = cursor.read_float().unwrap_or(0.0);
            let _w = cursor.read_float();
            scene.texture_coordinates.push(vec2(u, v));
        } else if cursor.match_literal(b"f") {
            let Some(object_index) = current_object else {
                return Err(ImportError::FaceBeforeObject);
            };
            let face = parse_face(
                &mut cursor,
                scene.vertices.len(),
                scene.texture_coordinates.len(),
                scene.normals.len(),
            )?;
            scene.objects[object_index].faces.push(face);
        } else if cursor.match_literal(b"o") {
            cursor.skip_whitespace_until_newline();
            if cursor.at_end() || cursor.peek() == Some(b'\n') {
                return Err(ImportError::MissingObjectName);
            }
            let name = String::from_utf8_lossy(cursor.take_word()).into_owned();
            scene.objects.push(ObjectRecord {
                name,
                faces: Vec::new(),
            });
            current_object = Some(scene.objects.len() - 1);
        } else {
            // Comments and unsupported or unknown statements.
            cursor.skip_until_newline();
        }
    }

    Ok(scene)
}

/// Parse the corner groups of one `f` statement. Index resolution uses the
/// pool sizes captured when the statement started, which is the scan-time
/// state the relative-index rule demands.
fn parse_face(
    cursor: &mut Cursor<'_>,
    vertex_count: usize,
    texture_coordinate_count: usize,
    normal_count: usize,
) -> Result<FaceRecord, ImportError> {
    let mut face = FaceRecord::default();
    loop {
        let raw = require_int(cursor, "vertex index")?;
        face.vertex_indices.push(resolve_index(raw, vertex_count));

        // `v//vn` corners skip the texture coordinate entirely; a single
        // `/` introduces one and a second `/` must close it. A corner with
        // no slash at all is a complete vertex-only reference.
        if !cursor.match_literal(b"//") && cursor.match_literal(b"/") {
            let raw = require_int(cursor, "texture coordinate index")?;
            face.texture_coordinate_indices
                .push(resolve_index(raw, texture_coordinate_count));
            if !cursor.match_literal(b"/") {
                return Err(ImportError::Syntax(
                    "expected '/' in 'f' statement".to_string(),
                ));
            }
        }

        // A newline (or the end of input) ends the statement and a space
        // ends the corner; anything else must be the corner's normal index.
        loop {
            if cursor.at_end() || cursor.match_literal(b"\n") {
                return finish_face(face);
            }
            if cursor.match_literal(b" ") {
                break;
            }
            let raw = require_int(cursor, "normal index")?;
            face.normal_indices.push(resolve_index(raw, normal_count));
        }
    }
}

/// Corners of one face must agree on their attribute layout: when texture
/// coordinate or normal references are present at all, every corner must
/// carry one.
fn finish_face(face: FaceRecord) -> Result<FaceRecord, ImportError> {
    let corners = face.vertex_indices.len();
    let texture_ok = face.texture_coordinate_indices.is_empty()
        || face.texture_coordinate_indices.len() == corners;
    let normals_ok = face.normal_indices.is_empty() || face.normal_indices.len() == corners;
    if !texture_ok || !normals_ok {
        return Err(ImportError::Syntax(
            "face corners mix attribute layouts".to_string(),
        ));
    }
    Ok(face)
}

/// Flatten every face corner of every object into its own output slot, in
/// file order and without welding. The index buffer therefore comes out as
/// the identity sequence; kept that way for consumers expecting an indexed
/// mesh.
fn assemble(scene: ObjScene) -> Result<Vec<Mesh>, ImportError> {
    let mut meshes = Vec::with_capacity(scene.objects.len());
    for object in scene.objects {
        let mut mesh = Mesh {
            name: object.name,
            ..Mesh::default()
        };
        for face in &object.faces {
            for &index in &face.vertex_indices {
                mesh.vertices.push(lookup(&scene.vertices, index, "vertex")?);
                mesh.indices.push((mesh.vertices.len() - 1) as u32);
            }
            for &index in &face.normal_indices {
                mesh.normals.push(lookup(&scene.normals, index, "normal")?);
            }
            for &index in &face.texture_coordinate_indices {
                mesh.texture_coordinates.push(lookup(
                    &scene.texture_coordinates,
                    index,
                    "texture coordinate",
                )?);
            }
        }
        meshes.push(mesh);
    }
    Ok(meshes)
}

fn lookup<T: Copy>(pool: &[T], index: i64, attribute: &'static str) -> Result<T, ImportError> {
    usize::try_from(index)
        .ok()
        .and_then(|i| pool.get(i).copied())
        .ok_or(ImportError::IndexOutOfBounds {
            attribute,
            index,
            len: pool.len(),
        })
}
