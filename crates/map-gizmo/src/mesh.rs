//! CPU-side mesh geometry and material definitions for the gizmo handles.
//!
//! Handle meshes are authored as plain object-geometry text (`v`/`f`
//! statements) and materials as a small JSON document. The host's asset
//! provider reads the files and typically parses them with [`MeshData::from_obj`]
//! and [`MaterialDesc::from_json`].

use std::collections::BTreeMap;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("invalid obj geometry at line {line}: {message}")]
    Obj { line: usize, message: String },
    #[error("invalid material definition: {0}")]
    Material(#[from] serde_json::Error),
    #[error("asset could not be read: {0}")]
    Provider(String),
}

/// Indexed triangle geometry, used both for hit-testing and for creating
/// the renderer-side mesh through the asset provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<DVec3>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Parses the supported subset of the obj text format: `v` vertex
    /// positions and `f` faces with 1-based or negative indices. Faces with
    /// more than three corners are fan-triangulated. Other statements
    /// (normals, texture coordinates, groups) are ignored.
    pub fn from_obj(source: &str) -> Result<Self, AssetError> {
        let mut mesh = Self::default();

        for (index, raw_line) in source.lines().enumerate() {
            let line = index + 1;
            let mut tokens = raw_line.split_whitespace();

            match tokens.next() {
                Some("v") => {
                    let mut component = |name: &str| -> Result<f64, AssetError> {
                        tokens
                            .next()
                            .ok_or_else(|| AssetError::Obj {
                                line,
                                message: format!("missing {name} component"),
                            })?
                            .parse()
                            .map_err(|_| AssetError::Obj {
                                line,
                                message: format!("malformed {name} component"),
                            })
                    };

                    let x = component("x")?;
                    let y = component("y")?;
                    let z = component("z")?;
                    mesh.positions.push(DVec3::new(x, y, z));
                }
                Some("f") => {
                    let mut corners = Vec::new();
                    for token in tokens {
                        corners.push(resolve_vertex_index(token, mesh.positions.len(), line)?);
                    }

                    if corners.len() < 3 {
                        return Err(AssetError::Obj {
                            line,
                            message: format!("face with {} corners", corners.len()),
                        });
                    }

                    for i in 1..corners.len() - 1 {
                        mesh.indices
                            .extend([corners[0], corners[i], corners[i + 1]]);
                    }
                }
                _ => {}
            }
        }

        if mesh.indices.is_empty() {
            return Err(AssetError::Obj {
                line: 0,
                message: "no face data".into(),
            });
        }

        Ok(mesh)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates over the triangles of this mesh.
    pub fn triangles(&self) -> impl Iterator<Item = [DVec3; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|chunk| [0, 1, 2].map(|i| self.positions[chunk[i] as usize]))
    }
}

/// Resolves an obj face corner (`7`, `7/1/3`, `-2`) to a vertex index.
fn resolve_vertex_index(token: &str, vertex_count: usize, line: usize) -> Result<u32, AssetError> {
    let index_part = token.split('/').next().unwrap_or(token);

    let index: i64 = index_part.parse().map_err(|_| AssetError::Obj {
        line,
        message: format!("malformed face index `{token}`"),
    })?;

    let resolved = if index > 0 {
        index - 1
    } else if index < 0 {
        vertex_count as i64 + index
    } else {
        -1
    };

    if resolved < 0 || resolved >= vertex_count as i64 {
        return Err(AssetError::Obj {
            line,
            message: format!("face index `{token}` out of range"),
        });
    }

    Ok(resolved as u32)
}

/// Material definition for the gizmo, loaded from a JSON configuration
/// resource. Render state (blending, depth) is decided per draw call and is
/// deliberately not part of the material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDesc {
    pub shader: String,
    /// Default uniform values, keyed by uniform name.
    #[serde(default)]
    pub uniforms: BTreeMap<String, [f32; 4]>,
}

impl MaterialDesc {
    pub fn from_json(source: &str) -> Result<Self, AssetError> {
        Ok(serde_json::from_str(source)?)
    }
}
