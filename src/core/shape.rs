// Copyright @yucwang 2023

use crate::math::aabb::AABB;
use crate::math::constants::Vector3f;
use crate::math::ray::Ray3f;
use crate::math::transform::Transform;

/// Anything that can report an axis-aligned bounding box: render meshes
/// and collision volumes.
pub trait Shape: Send + Sync {
    /// Bounds in the shape's own frame.
    fn bounding_box(&self) -> AABB;

    fn world_bounding_box(&self, to_world: &Transform) -> AABB {
        to_world.apply_aabb(&self.bounding_box())
    }
}

/// Terrain-like surface that can be queried with rays. Rays and hit
/// points are in world space.
pub trait HeightField: Send + Sync {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<Vector3f>;
}
