// Copyright @yucwang 2026

use crate::core::shape::Shape;
use crate::math::aabb::AABB;
use crate::math::constants::Vector3f;

/// Box given by its local center and full size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoxShape {
    center: Vector3f,
    size: Vector3f,
}

impl BoxShape {
    pub fn new(center: Vector3f, size: Vector3f) -> Self {
        Self { center, size: size.abs() }
    }

    pub fn unit() -> Self {
        Self::new(Vector3f::zeros(), Vector3f::new(1.0, 1.0, 1.0))
    }
}

impl Shape for BoxShape {
    fn bounding_box(&self) -> AABB {
        AABB::from_center_size(self.center, self.size)
    }
}
