// Copyright @yucwang 2026

use crate::math::aabb::AABB;
use crate::math::constants::{ Vector3f, Vector3i };
use crate::math::transform::Transform;

/// Region probes are placed in. `offset` and `size` are relative to the
/// anchor object; `density` is the grid resolution per axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ProbeVolume {
    pub offset: Vector3f,
    pub size: Vector3f,
    pub density: Vector3i,
}

impl Default for ProbeVolume {
    fn default() -> Self {
        Self {
            offset: Vector3f::zeros(),
            size: Vector3f::new(10.0, 10.0, 10.0),
            density: Vector3i::new(2, 2, 2),
        }
    }
}

impl ProbeVolume {
    pub fn new(offset: Vector3f, size: Vector3f, density: Vector3i) -> Self {
        Self { offset, size, density }
    }

    /// Grid sampling needs at least two samples along every axis.
    pub fn has_grid(&self) -> bool {
        self.density.x > 1 && self.density.y > 1 && self.density.z > 1
    }

    pub fn grid_len(&self) -> usize {
        if self.has_grid() {
            self.density.iter().map(|d| *d as usize).product()
        } else {
            0
        }
    }

    pub fn local_bounds(&self) -> AABB {
        AABB::from_center_size(self.offset, self.size)
    }

    /// World box enclosing the local volume under the anchor transform.
    /// Lattice points built in the anchor frame always fall inside it.
    pub fn world_bounds(&self, anchor: &Transform) -> AABB {
        anchor.apply_aabb(&self.local_bounds())
    }
}

/// Keep only the points inside `bounds`, preserving order.
pub fn filter_inside(points: Vec<Vector3f>, bounds: &AABB) -> Vec<Vector3f> {
    points.into_iter().filter(|p| bounds.contains_point(p)).collect()
}
