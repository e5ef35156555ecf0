// Copyright @yucwang 2026

use super::triangle::Triangle;

use crate::core::shape::HeightField;
use crate::io::heightmap_io::HeightSamples;
use crate::math::aabb::AABB;
use crate::math::constants::{ Float, Vector3f };
use crate::math::ray::Ray3f;
use crate::math::transform::Transform;

/// Regular grid of heights spanning `[0, size.x] x [0, size.z]` in its
/// local frame. Samples are normalised to `[0, 1]` and scaled by `size.y`.
/// Every grid cell is split into two triangles.
pub struct Heightmap {
    to_world: Transform,
    size: Vector3f,
    columns: usize,
    rows: usize,
    heights: Vec<Float>,
}

impl Heightmap {
    pub fn from_samples(samples: HeightSamples, size: Vector3f, to_world: Transform) -> Result<Self, String> {
        let samples = samples.ensure_min_size();
        if samples.data.len() != samples.width * samples.height {
            return Err(format!("heightmap expects {} samples, got {}",
                               samples.width * samples.height, samples.data.len()));
        }

        Ok(Self {
            to_world,
            size,
            columns: samples.width,
            rows: samples.height,
            heights: samples.data,
        })
    }

    pub fn flat(size: Vector3f, to_world: Transform) -> Self {
        Self { to_world, size, columns: 2, rows: 2, heights: vec![0.0; 4] }
    }

    pub fn local_bounds(&self) -> AABB {
        AABB::new(Vector3f::zeros(), self.size)
    }

    fn vertex(&self, cx: usize, cz: usize) -> Vector3f {
        let h = self.heights[cz * self.columns + cx].max(0.0).min(1.0);
        Vector3f::new(self.size.x * cx as Float / (self.columns - 1) as Float,
                      self.size.y * h,
                      self.size.z * cz as Float / (self.rows - 1) as Float)
    }

    fn cell_triangles(&self, cx: usize, cz: usize) -> [Triangle; 2] {
        let p00 = self.vertex(cx, cz);
        let p10 = self.vertex(cx + 1, cz);
        let p01 = self.vertex(cx, cz + 1);
        let p11 = self.vertex(cx + 1, cz + 1);
        [Triangle::new(p00, p10, p11), Triangle::new(p00, p11, p01)]
    }

    fn cell_of(&self, p: Vector3f) -> (usize, usize) {
        let cells_x = self.columns - 1;
        let cells_z = self.rows - 1;
        let fx = (p.x / self.size.x * cells_x as Float).floor().max(0.0) as usize;
        let fz = (p.z / self.size.z * cells_z as Float).floor().max(0.0) as usize;
        (fx.min(cells_x - 1), fz.min(cells_z - 1))
    }

    fn intersect_local(&self, ray: &Ray3f) -> Option<Float> {
        if self.size.x <= 0.0 || self.size.z <= 0.0 {
            return None;
        }

        let (t_enter, t_exit) = self.local_bounds().ray_intersect_range(ray)?;
        let (ax, az) = self.cell_of(ray.at(t_enter));
        let (bx, bz) = self.cell_of(ray.at(t_exit));

        // Cells covering the ray's footprint between entry and exit.
        let mut closest: Option<Float> = None;
        for cz in az.min(bz)..=az.max(bz) {
            for cx in ax.min(bx)..=ax.max(bx) {
                for tri in self.cell_triangles(cx, cz).iter() {
                    if let Some(t) = tri.ray_intersection_t(ray) {
                        if closest.map_or(true, |c| t < c) {
                            closest = Some(t);
                        }
                    }
                }
            }
        }
        closest
    }
}

impl HeightField for Heightmap {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<Vector3f> {
        let local = self.to_world.inv_apply_ray(ray);
        let t = self.intersect_local(&local)?;
        Some(self.to_world.apply_point(local.at(t)))
    }
}
