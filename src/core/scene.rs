// Copyright @yucwang 2026

use crate::core::probe_store::{LightProbeGroup, ProbeStore};
use crate::core::shape::{HeightField, Shape};
use crate::math::aabb::AABB;
use crate::math::constants::Vector3f;
use crate::math::transform::Transform;
use std::sync::Arc;

/// Tag carried by objects that contribute to baked lighting.
pub const LIGHTMAP_STATIC_TAG: &str = "lightmap_static";

/// Terrain attached to a scene object. The local frame spans
/// `[0, size.x] x [0, size.y] x [0, size.z]`, with `size.y` the
/// vertical range.
#[derive(Clone)]
pub struct TerrainComponent {
    pub size: Vector3f,
    pub field: Option<Arc<dyn HeightField>>,
}

impl TerrainComponent {
    pub fn new(size: Vector3f, field: Arc<dyn HeightField>) -> Self {
        Self { size, field: Some(field) }
    }

    pub fn local_bounds(&self) -> AABB {
        AABB::new(Vector3f::zeros(), self.size)
    }
}

pub struct SceneObject {
    pub name: String,
    pub tags: Vec<String>,
    pub to_world: Transform,
    pub renderer: Option<Arc<dyn Shape>>,
    pub collider: Option<Arc<dyn Shape>>,
    pub terrain: Option<TerrainComponent>,
    pub light_probe_group: Option<LightProbeGroup>,
}

impl SceneObject {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tags: Vec::new(),
            to_world: Transform::default(),
            renderer: None,
            collider: None,
            terrain: None,
            light_probe_group: None,
        }
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    pub fn with_transform(mut self, to_world: Transform) -> Self {
        self.to_world = to_world;
        self
    }

    pub fn with_renderer(mut self, shape: Arc<dyn Shape>) -> Self {
        self.renderer = Some(shape);
        self
    }

    pub fn with_collider(mut self, shape: Arc<dyn Shape>) -> Self {
        self.collider = Some(shape);
        self
    }

    pub fn with_terrain(mut self, terrain: TerrainComponent) -> Self {
        self.terrain = Some(terrain);
        self
    }

    pub fn with_light_probe_group(mut self) -> Self {
        self.light_probe_group = Some(LightProbeGroup::new());
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn world_position(&self) -> Vector3f {
        self.to_world.translation()
    }

    pub fn render_bounds(&self) -> Option<AABB> {
        self.renderer.as_ref().map(|s| s.world_bounding_box(&self.to_world))
    }

    pub fn collider_bounds(&self) -> Option<AABB> {
        self.collider.as_ref().map(|s| s.world_bounding_box(&self.to_world))
    }

    pub fn terrain_bounds(&self) -> Option<AABB> {
        self.terrain.as_ref().map(|t| self.to_world.apply_aabb(&t.local_bounds()))
    }
}

/// Read access to the host scene graph.
pub trait SceneQuery {
    fn find_tagged_objects(&self, tag: &str) -> Vec<&SceneObject>;
    fn find_object(&self, name: &str) -> Option<&SceneObject>;
}

/// Write access a build needs: the probe store on the owning object and
/// the signal that persisted state changed.
pub trait SceneHost: SceneQuery {
    fn probe_store_mut(&mut self, name: &str) -> Option<&mut dyn ProbeStore>;
    fn mark_changed(&mut self);
}

#[derive(Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    revision: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self { objects: Vec::new(), revision: 0 }
    }

    pub fn with_objects(objects: Vec<SceneObject>) -> Self {
        Self { objects, revision: 0 }
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Bumped on every `mark_changed`; hosts persist when it moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn light_probe_group(&self, name: &str) -> Option<&LightProbeGroup> {
        self.find_object(name).and_then(|o| o.light_probe_group.as_ref())
    }
}

impl SceneQuery for Scene {
    fn find_tagged_objects(&self, tag: &str) -> Vec<&SceneObject> {
        self.objects.iter().filter(|o| o.has_tag(tag)).collect()
    }

    fn find_object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }
}

impl SceneHost for Scene {
    fn probe_store_mut(&mut self, name: &str) -> Option<&mut dyn ProbeStore> {
        self.objects
            .iter_mut()
            .find(|o| o.name == name)
            .and_then(|o| o.light_probe_group.as_mut())
            .map(|g| g as &mut dyn ProbeStore)
    }

    fn mark_changed(&mut self) {
        self.revision += 1;
    }
}
