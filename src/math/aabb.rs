// Copyright 2020 @TwoCookingMice

use super::constants::{ Float, Vector3f, FLOAT_MIN, FLOAT_MAX };
use super::ray::Ray3f;

/// Axis-aligned box. All tests against it use closed intervals, so
/// touching faces and points lying on a face count as inside.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AABB {
    pub p_min: Vector3f,
    pub p_max: Vector3f
}

impl Default for AABB {
    fn default() -> Self {
        Self { p_min: Vector3f::new(FLOAT_MAX, FLOAT_MAX, FLOAT_MAX),
               p_max: Vector3f::new(FLOAT_MIN, FLOAT_MIN, FLOAT_MIN) }
    }
}

impl AABB {
    pub fn new(p_min: Vector3f, p_max: Vector3f) -> Self {
        Self { p_min: p_min.inf(&p_max), p_max: p_max.sup(&p_min) }
    }

    /// Box from a center and half-extents. Negative extents are folded
    /// back to their absolute value.
    pub fn from_center_extents(center: Vector3f, extents: Vector3f) -> Self {
        let extents = extents.abs();
        Self { p_min: center - extents, p_max: center + extents }
    }

    /// Box from a center and full size, the way volumes and colliders
    /// are authored.
    pub fn from_center_size(center: Vector3f, size: Vector3f) -> Self {
        Self::from_center_extents(center, size * 0.5)
    }

    pub fn center(&self) -> Vector3f {
        0.5 * self.p_min + 0.5 * self.p_max
    }

    /// Half-extents.
    pub fn extents(&self) -> Vector3f {
        0.5 * (self.p_max - self.p_min)
    }

    pub fn size(&self) -> Vector3f {
        self.p_max - self.p_min
    }

    pub fn expand_by_point(&mut self, p: &Vector3f) {
        self.p_min = self.p_min.inf(p);
        self.p_max = self.p_max.sup(p);
    }

    pub fn expand_by_aabb(&mut self, other: &AABB) {
        self.p_min = self.p_min.inf(&other.p_min);
        self.p_max = self.p_max.sup(&other.p_max);
    }

    /// Grow the box by `margin` on every side. Margins below zero are
    /// clamped to zero.
    pub fn inflated(&self, margin: Float) -> AABB {
        let m = Vector3f::repeat(margin.max(0.0));
        AABB { p_min: self.p_min - m, p_max: self.p_max + m }
    }

    pub fn intersects(&self, other: &AABB) -> bool {
        (0..3).all(|idx| self.p_min[idx] <= other.p_max[idx] &&
                         other.p_min[idx] <= self.p_max[idx])
    }

    pub fn contains_point(&self, p: &Vector3f) -> bool {
        (0..3).all(|idx| p[idx] >= self.p_min[idx] && p[idx] <= self.p_max[idx])
    }

    /// The eight corners, `x` varying fastest.
    pub fn corners(&self) -> [Vector3f; 8] {
        let (a, b) = (self.p_min, self.p_max);
        [
            Vector3f::new(a.x, a.y, a.z),
            Vector3f::new(b.x, a.y, a.z),
            Vector3f::new(a.x, b.y, a.z),
            Vector3f::new(b.x, b.y, a.z),
            Vector3f::new(a.x, a.y, b.z),
            Vector3f::new(b.x, a.y, b.z),
            Vector3f::new(a.x, b.y, b.z),
            Vector3f::new(b.x, b.y, b.z),
        ]
    }

    /// Parametric range `[t_enter, t_exit]` of the ray segment inside the box.
    pub fn ray_intersect_range(&self, ray: &Ray3f) -> Option<(Float, Float)> {
        if !self.is_valid() {
            return None;
        }

        let o = ray.origin();
        let d = ray.dir();
        let mut t_min = ray.min_t;
        let mut t_max = ray.max_t;

        for idx in 0..3 {
            if d[idx].abs() < 1e-8 {
                if o[idx] < self.p_min[idx] || o[idx] > self.p_max[idx] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d[idx];
            let mut t0 = (self.p_min[idx] - o[idx]) * inv;
            let mut t1 = (self.p_max[idx] - o[idx]) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_max < t_min {
                return None;
            }
        }

        Some((t_min, t_max))
    }

    pub fn is_valid(&self) -> bool {
        (0..3).all(|idx| self.p_min[idx] <= self.p_max[idx])
    }
}

/* Test for AABB */
