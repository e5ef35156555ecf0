// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Vector3f};

pub struct Ray3f {
    origin: Vector3f,
    dir: Vector3f,
    pub min_t: Float,
    pub max_t: Float
}

impl Ray3f {
    pub fn new(o: Vector3f, d: Vector3f,
               min_t: Option<Float>, max_t: Option<Float>) -> Self {
        Self { origin: o, dir: d.normalize(),
               min_t: min_t.unwrap_or(0.0),
               max_t: max_t.unwrap_or(std::f32::MAX)}
    }

    /// Segment ray from `from` to `to`. Degenerate segments yield a ray
    /// with an empty range.
    pub fn between(from: Vector3f, to: Vector3f) -> Self {
        let delta = to - from;
        let length = delta.norm();
        if length <= 0.0 {
            return Self { origin: from, dir: Vector3f::new(0.0, -1.0, 0.0), min_t: 0.0, max_t: 0.0 };
        }
        Self { origin: from, dir: delta / length, min_t: 0.0, max_t: length }
    }

    pub fn origin(&self) -> Vector3f {
        self.origin
    }

    pub fn dir(&self) -> Vector3f {
        self.dir
    }

    pub fn at(&self, t: Float) -> Vector3f {
        self.origin + self.dir * t
    }

    /// Point at the far end of the valid range.
    pub fn end(&self) -> Vector3f {
        self.at(self.max_t)
    }

    pub fn test_segment(&self, t: Float) -> bool {
        t >= self.min_t && t <= self.max_t
    }
}

/* Tests for Ray */

#[cfg(test)]
mod tests {
    use super::Vector3f;
    use super::Ray3f;

    #[test]
    fn test_ray3f() {
        let o = Vector3f::new(0.0, 0.0, 0.0);
        let ray = Ray3f::new(o, Vector3f::new(0.0, -3.0, 0.0), None, Some(10.0));
        assert_eq!(o, ray.origin());
        assert_eq!(ray.dir(), Vector3f::new(0.0, -1.0, 0.0));
        assert_eq!(ray.end(), Vector3f::new(0.0, -10.0, 0.0));
        assert!(ray.test_segment(10.0));
        assert!(!ray.test_segment(10.5));
    }

    #[test]
    fn test_ray_between() {
        let ray = Ray3f::between(Vector3f::new(1.0, 4.0, 1.0), Vector3f::new(1.0, 0.0, 1.0));
        assert!((ray.max_t - 4.0).abs() < 1e-6);
        assert_eq!(ray.end(), Vector3f::new(1.0, 0.0, 1.0));

        let empty = Ray3f::between(Vector3f::zeros(), Vector3f::zeros());
        assert!(empty.test_segment(0.0));
        assert!(!empty.test_segment(0.1));
    }
}
