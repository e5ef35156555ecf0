// Copyright @yucwang 2026

use crate::core::shape::Shape;
use crate::io::obj_utils::{load_obj_vertices, ObjLoadError};
use crate::math::aabb::AABB;
use crate::math::constants::Vector3f;
use crate::math::transform::Transform;

/// Render mesh reduced to its vertex cloud; only its bounds matter here.
pub struct MeshShape {
    name: String,
    vertices: Vec<Vector3f>,
}

impl MeshShape {
    pub fn new(name: &str, vertices: Vec<Vector3f>) -> Self {
        Self { name: name.to_string(), vertices }
    }

    pub fn from_obj(path: &str) -> Result<Self, ObjLoadError> {
        let vertices = load_obj_vertices(path)?;
        let mesh = Self::new(path, vertices);
        log::debug!("Loaded mesh {} with {} vertices.", mesh.name, mesh.vertex_count());
        Ok(mesh)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

impl Shape for MeshShape {
    fn bounding_box(&self) -> AABB {
        let mut bounds = AABB::default();
        for v in &self.vertices {
            bounds.expand_by_point(v);
        }
        bounds
    }

    // Tighter than transforming the local box under rotation.
    fn world_bounding_box(&self, to_world: &Transform) -> AABB {
        let mut bounds = AABB::default();
        for v in &self.vertices {
            bounds.expand_by_point(&to_world.apply_point(*v));
        }
        bounds
    }
}
