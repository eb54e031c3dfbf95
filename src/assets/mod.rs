pub mod gltf;

use std::path::PathBuf;
use std::sync::Arc;

use crate::anim::pose::{all_groups, ObjectGroup};
use crate::render::mesh::{ground_plane, GpuMesh};
use crate::render::texture::GpuTexture;

/// One drawable group: its meshes, its texture, and the pose key used to
/// look up its model matrix each frame.
pub struct RenderGroup {
    pub group: ObjectGroup,
    pub meshes: Vec<GpuMesh>,
    pub texture: Arc<GpuTexture>,
}

/// Every GPU-resident asset the scene draws.
///
/// A group whose model file is missing or unreadable is simply absent here:
/// the frame skips it instead of failing. A missing texture degrades to a
/// flat white fallback so the group still animates.
pub struct SceneAssets {
    groups: Vec<RenderGroup>,
}

impl SceneAssets {
    pub fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        texture_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let root = asset_root();
        log::info!("Loading scene assets from {}", root.display());

        let white = Arc::new(GpuTexture::white(device, queue, texture_layout));
        let load_texture = |name: &str| -> Arc<GpuTexture> {
            let path = root.join("textures").join(name);
            match GpuTexture::load(device, queue, texture_layout, &path) {
                Ok(texture) => Arc::new(texture),
                Err(e) => {
                    log::warn!("{e:#}; using white fallback");
                    white.clone()
                }
            }
        };

        let dirt = load_texture("dirt.jpg");
        let trolley = load_texture("trolley.jpg");
        let rail = load_texture("rail.jpg");
        let human = load_texture("human.jpg");
        let rope = load_texture("rope.jpg");
        let lever = load_texture("lever.jpg");

        let mut groups = Vec::new();
        for group in all_groups() {
            let texture = match group {
                ObjectGroup::Plane(_) => &dirt,
                ObjectGroup::TrolleyBody | ObjectGroup::Wheel(_) => &trolley,
                ObjectGroup::RailSegment(_) => &rail,
                ObjectGroup::Human(_) => &human,
                ObjectGroup::Rope => &rope,
                ObjectGroup::Lever => &lever,
            }
            .clone();

            let meshes = match model_file(group) {
                // The ground patch is generated, not loaded.
                None => vec![GpuMesh::upload(device, &ground_plane(), "plane")],
                Some(file) => {
                    let path = root.join("models").join(&file);
                    match gltf::load_meshes(&path) {
                        Ok(data) => data
                            .iter()
                            .map(|mesh| GpuMesh::upload(device, mesh, &file))
                            .collect(),
                        Err(e) => {
                            log::warn!("{e:#}; skipping {group:?}");
                            continue;
                        }
                    }
                }
            };

            groups.push(RenderGroup {
                group,
                meshes,
                texture,
            });
        }

        log::info!("Loaded {} of {} object groups", groups.len(), all_groups().count());
        Self { groups }
    }

    pub fn groups(&self) -> &[RenderGroup] {
        &self.groups
    }
}

/// Model file for a group, or None for generated geometry.
fn model_file(group: ObjectGroup) -> Option<String> {
    match group {
        ObjectGroup::Plane(_) => None,
        ObjectGroup::TrolleyBody => Some("trolley_body.gltf".into()),
        ObjectGroup::Wheel(i) => Some(format!("wheel{}.gltf", i + 1)),
        ObjectGroup::RailSegment(i) => Some(format!("rail{}.gltf", i + 1)),
        ObjectGroup::Human(i) => Some(format!("human{}.gltf", i + 1)),
        ObjectGroup::Rope => Some("rope1.gltf".into()),
        ObjectGroup::Lever => Some("lever.gltf".into()),
    }
}

/// Asset directory, overridable for packaged installs.
fn asset_root() -> PathBuf {
    std::env::var("TROLLEY_ASSETS")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("assets"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_group_maps_to_a_source() {
        // Each drawable group either names a model file or is generated.
        for group in all_groups() {
            match group {
                ObjectGroup::Plane(_) => assert!(model_file(group).is_none()),
                _ => assert!(model_file(group).is_some()),
            }
        }
    }

    #[test]
    fn wheel_files_are_one_indexed() {
        assert_eq!(model_file(ObjectGroup::Wheel(0)).unwrap(), "wheel1.gltf");
        assert_eq!(model_file(ObjectGroup::Wheel(5)).unwrap(), "wheel6.gltf");
    }
}
