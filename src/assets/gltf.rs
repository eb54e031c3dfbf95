use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use std::path::Path;

use crate::render::mesh::{MeshData, Vertex};

/// Import every mesh primitive from a glTF file, flattening node transforms
/// into the vertex data the way the scene expects (one rigid body per file).
pub fn load_meshes(path: &Path) -> Result<Vec<MeshData>> {
    let (document, buffers, _images) = gltf::import(path)
        .with_context(|| format!("failed to load model {}", path.display()))?;

    let mut meshes = Vec::new();
    for scene in document.scenes() {
        for node in scene.nodes() {
            visit_node(&node, &buffers, Mat4::IDENTITY, &mut meshes)?;
        }
    }

    if meshes.is_empty() {
        anyhow::bail!("no mesh primitives in {}", path.display());
    }
    Ok(meshes)
}

fn visit_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent: Mat4,
    out: &mut Vec<MeshData>,
) -> Result<()> {
    let local = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global = parent * local;

    if let Some(mesh) = node.mesh() {
        read_mesh(&mesh, buffers, global, out)?;
    }
    for child in node.children() {
        visit_node(&child, buffers, global, out)?;
    }
    Ok(())
}

fn read_mesh(
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    transform: Mat4,
    out: &mut Vec<MeshData>,
) -> Result<()> {
    for primitive in mesh.primitives() {
        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let positions = reader
            .read_positions()
            .with_context(|| format!("mesh {:?} primitive has no positions", mesh.name()))?;

        let uvs: Vec<[f32; 2]> = reader
            .read_tex_coords(0)
            .map(|tc| tc.into_f32().collect())
            .unwrap_or_default();
        let normals: Vec<[f32; 3]> = reader
            .read_normals()
            .map(|n| n.collect())
            .unwrap_or_default();

        let vertices: Vec<Vertex> = positions
            .enumerate()
            .map(|(i, pos)| {
                let position = transform.transform_point3(Vec3::from_array(pos));
                let normal = normals
                    .get(i)
                    .map(|n| {
                        transform
                            .transform_vector3(Vec3::from_array(*n))
                            .normalize_or_zero()
                    })
                    .unwrap_or(Vec3::Y);
                Vertex {
                    position: position.to_array(),
                    uv: uvs.get(i).copied().unwrap_or([0.0, 0.0]),
                    normal: normal.to_array(),
                }
            })
            .collect();

        let indices: Vec<u32> = match reader.read_indices() {
            Some(read) => read.into_u32().collect(),
            // Unindexed primitive: treat as a plain triangle list.
            None => (0..vertices.len() as u32).collect(),
        };

        out.push(MeshData { vertices, indices });
    }
    Ok(())
}
