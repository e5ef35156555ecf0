// Copyright 2020 @TwoCookingMice

use super::aabb::AABB;
use super::constants::{ Matrix4f, Point3f, Vector3f, DEG_TO_RAD, FLOAT_MAX };
use super::ray::Ray3f;

use nalgebra::Rotation3;

/// Local-to-world transform of a scene object, with its inverse cached.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    matrix: Matrix4f,
    inv_matrix: Matrix4f
}

impl Default for Transform {
    fn default() -> Self {
        Self { matrix: Matrix4f::identity(),
               inv_matrix: Matrix4f::identity() }
    }
}

impl Transform {
    pub fn new(matrix: Matrix4f) -> Self {
        Self { matrix,
               inv_matrix: matrix.try_inverse().unwrap_or_else(Matrix4f::identity) }
    }

    pub fn from_translation(t: Vector3f) -> Self {
        Self::new(Matrix4f::new_translation(&t))
    }

    /// Translate * rotate * scale. `euler_deg` holds rotations about the
    /// x, y and z axes in degrees, applied x first.
    pub fn from_trs(translate: Vector3f, euler_deg: Vector3f, scale: Vector3f) -> Self {
        let r = euler_deg * DEG_TO_RAD;
        let rotation = Rotation3::from_euler_angles(r.x, r.y, r.z).to_homogeneous();
        Self::new(Matrix4f::new_translation(&translate) * rotation *
                  Matrix4f::new_nonuniform_scaling(&scale))
    }

    /// World position of the local origin.
    pub fn translation(&self) -> Vector3f {
        Vector3f::new(self.matrix[(0, 3)], self.matrix[(1, 3)], self.matrix[(2, 3)])
    }

    pub fn apply_point(&self, p: Vector3f) -> Vector3f {
        self.matrix.transform_point(&Point3f::from(p)).coords
    }

    pub fn apply_vector(&self, v: Vector3f) -> Vector3f {
        self.matrix.transform_vector(&v)
    }

    pub fn inv_apply_point(&self, p: Vector3f) -> Vector3f {
        self.inv_matrix.transform_point(&Point3f::from(p)).coords
    }

    pub fn inv_apply_vector(&self, v: Vector3f) -> Vector3f {
        self.inv_matrix.transform_vector(&v)
    }

    // Bounded rays map both ends of their segment so that the range
    // survives non-uniform scaling.
    pub fn apply_ray(&self, ray: &Ray3f) -> Ray3f {
        let start = self.apply_point(ray.at(ray.min_t));
        if ray.max_t >= FLOAT_MAX {
            return Ray3f::new(start, self.apply_vector(ray.dir()), None, None);
        }
        Ray3f::between(start, self.apply_point(ray.end()))
    }

    pub fn inv_apply_ray(&self, ray: &Ray3f) -> Ray3f {
        let start = self.inv_apply_point(ray.at(ray.min_t));
        if ray.max_t >= FLOAT_MAX {
            return Ray3f::new(start, self.inv_apply_vector(ray.dir()), None, None);
        }
        Ray3f::between(start, self.inv_apply_point(ray.end()))
    }

    /// World-space box enclosing the transformed local box.
    pub fn apply_aabb(&self, local: &AABB) -> AABB {
        let mut bbox = AABB::default();
        for corner in local.corners().iter() {
            bbox.expand_by_point(&self.apply_point(*corner));
        }
        bbox
    }
}

#[cfg(test)]
mod tests {
    use super::Transform;
    use crate::math::aabb::AABB;
    use crate::math::constants::Vector3f;
    use crate::math::ray::Ray3f;

    fn approx(a: Vector3f, b: Vector3f) -> bool {
        (a - b).norm() < 1e-4
    }

    #[test]
    fn test_transform_trs_point() {
        let t = Transform::from_trs(Vector3f::new(1.0, 2.0, 3.0),
                                    Vector3f::new(0.0, 90.0, 0.0),
                                    Vector3f::new(2.0, 2.0, 2.0));
        let p = t.apply_point(Vector3f::new(1.0, 0.0, 0.0));
        assert!(approx(p, Vector3f::new(1.0, 2.0, 1.0)));
        assert!(approx(t.inv_apply_point(p), Vector3f::new(1.0, 0.0, 0.0)));
        assert_eq!(t.translation(), Vector3f::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_transform_aabb() {
        let t = Transform::from_trs(Vector3f::new(0.0, 1.0, 0.0),
                                    Vector3f::new(0.0, 45.0, 0.0),
                                    Vector3f::new(1.0, 1.0, 1.0));
        let local = AABB::from_center_extents(Vector3f::zeros(), Vector3f::new(1.0, 1.0, 1.0));
        let world = t.apply_aabb(&local);
        let half_diag = (2.0f32).sqrt();
        assert!(approx(world.extents(), Vector3f::new(half_diag, 1.0, half_diag)));
        assert!(approx(world.center(), Vector3f::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_transform_ray_keeps_segment() {
        let t = Transform::from_trs(Vector3f::zeros(), Vector3f::zeros(), Vector3f::new(1.0, 4.0, 1.0));
        let ray = Ray3f::new(Vector3f::new(0.0, 8.0, 0.0), Vector3f::new(0.0, -1.0, 0.0), None, Some(8.0));
        let local = t.inv_apply_ray(&ray);
        assert!(approx(local.origin(), Vector3f::new(0.0, 2.0, 0.0)));
        assert!((local.max_t - 2.0).abs() < 1e-5);
        let back = t.apply_ray(&local);
        assert!(approx(back.end(), Vector3f::zeros()));
    }

    #[test]
    fn test_transform_unbounded_ray() {
        let t = Transform::from_translation(Vector3f::new(0.0, 5.0, 0.0));
        let ray = Ray3f::new(Vector3f::new(1.0, 5.0, 1.0), Vector3f::new(0.0, -2.0, 0.0), None, None);
        let local = t.inv_apply_ray(&ray);
        assert!(approx(local.origin(), Vector3f::new(1.0, 0.0, 1.0)));
        assert!(approx(local.dir(), Vector3f::new(0.0, -1.0, 0.0)));
        assert!(local.max_t >= std::f32::MAX);
    }
}
