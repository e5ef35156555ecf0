// Copyright @yucwang 2023

use crate::math::constants::{ Float, Vector3f };
use crate::math::ray::Ray3f;

// Slack on barycentric coordinates so that rays through a shared edge
// hit at least one of its triangles.
const EDGE_TOLERANCE: Float = 1e-5;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Triangle {
    p0: Vector3f,
    p1: Vector3f,
    p2: Vector3f
}

impl Triangle {
    pub fn new(p0: Vector3f, p1: Vector3f, p2: Vector3f) -> Self {
        Triangle { p0, p1, p2 }
    }

    /// Ray parameter of the hit, two-sided.
    pub fn ray_intersection_t(&self, ray: &Ray3f) -> Option<Float> {
        let edge0 = self.p1 - self.p0;
        let edge1 = self.p2 - self.p0;
        let p_vec = ray.dir().cross(&edge1);
        let det = edge0.dot(&p_vec);
        if det.abs() < 1e-12 {
            return None;
        }

        let inv_det = 1.0 / det;
        let t_vec = ray.origin() - self.p0;
        let u = t_vec.dot(&p_vec) * inv_det;
        if u < -EDGE_TOLERANCE || u > 1.0 + EDGE_TOLERANCE {
            return None;
        }

        let q_vec = t_vec.cross(&edge0);
        let v = ray.dir().dot(&q_vec) * inv_det;
        if v < -EDGE_TOLERANCE || u + v > 1.0 + EDGE_TOLERANCE {
            return None;
        }

        let t = edge1.dot(&q_vec) * inv_det;
        if ray.test_segment(t) {
            Some(t)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Triangle;
    use crate::math::constants::Vector3f;
    use crate::math::ray::Ray3f;

    fn floor_triangle() -> Triangle {
        Triangle::new(Vector3f::new(0.0, 0.0, 0.0),
                      Vector3f::new(2.0, 0.0, 0.0),
                      Vector3f::new(0.0, 0.0, 2.0))
    }

    #[test]
    fn test_triangle_hit_from_above() {
        let tri = floor_triangle();
        let ray = Ray3f::new(Vector3f::new(0.5, 3.0, 0.5), Vector3f::new(0.0, -1.0, 0.0), None, None);
        let t = tri.ray_intersection_t(&ray).unwrap();
        assert!((t - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_triangle_edge_and_miss() {
        let tri = floor_triangle();
        let on_edge = Ray3f::new(Vector3f::new(1.0, 1.0, 1.0), Vector3f::new(0.0, -1.0, 0.0), None, None);
        assert!(tri.ray_intersection_t(&on_edge).is_some());

        let outside = Ray3f::new(Vector3f::new(1.5, 1.0, 1.5), Vector3f::new(0.0, -1.0, 0.0), None, None);
        assert!(tri.ray_intersection_t(&outside).is_none());

        let too_short = Ray3f::new(Vector3f::new(0.5, 3.0, 0.5), Vector3f::new(0.0, -1.0, 0.0), None, Some(2.0));
        assert!(tri.ray_intersection_t(&too_short).is_none());
    }
}
