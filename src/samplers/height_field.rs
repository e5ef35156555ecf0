// Copyright @yucwang 2026

use crate::core::occupant_index::HeightFieldOccupant;
use crate::core::sampler::{ProbeSampler, SampleContext};
use crate::core::settings::BuilderSettings;
use crate::math::constants::{Float, Vector2i, Vector3f};
use crate::math::ray::Ray3f;

/// Rays start this far above the top of the terrain, in its local frame.
pub const RAY_START_MARGIN: Float = 10.0;
/// Rays travel the terrain height plus this much, in its local frame.
pub const RAY_LENGTH_MARGIN: Float = 20.0;

/// Probes dropped onto terrain surfaces from a regular grid of columns.
pub struct HeightFieldSampler;

impl ProbeSampler for HeightFieldSampler {
    fn name(&self) -> &'static str {
        "height_field"
    }

    fn enabled(&self, settings: &BuilderSettings) -> bool {
        settings.use_terrains
    }

    fn sample(&self, ctx: &SampleContext<'_>) -> Vec<Vector3f> {
        ctx.occupants
            .height_fields
            .iter()
            .flat_map(|o| column_hits(o, ctx.settings.terrain_grid, ctx.settings.terrain_offset))
            .collect()
    }
}

/// Cast one downward ray per interior grid point of the terrain and lift
/// every hit by `offset`. Columns that miss are skipped. Both ends of each
/// column are mapped to world space, so scaled terrains keep their reach.
pub fn column_hits(occupant: &HeightFieldOccupant, grid: Vector2i, offset: Float) -> Vec<Vector3f> {
    if grid.x <= 1 || grid.y <= 1 {
        return Vec::new();
    }

    let width = occupant.size.x;
    let height = occupant.size.y;
    let depth = occupant.size.z;
    let cell_x = width / (grid.x + 1) as Float;
    let cell_z = depth / (grid.y + 1) as Float;
    let bottom = RAY_START_MARGIN - RAY_LENGTH_MARGIN;
    let lift = Vector3f::new(0.0, offset, 0.0);

    let mut hits = Vec::new();
    let mut misses = 0usize;
    for i in 0..grid.x {
        for j in 0..grid.y {
            let x = cell_x * (i + 1) as Float;
            let z = cell_z * (j + 1) as Float;
            let top = occupant.to_world.apply_point(Vector3f::new(x, height + RAY_START_MARGIN, z));
            let end = occupant.to_world.apply_point(Vector3f::new(x, bottom, z));
            let ray = Ray3f::between(top, end);
            match occupant.field.ray_intersection(&ray) {
                Some(p) => hits.push(p + lift),
                None => misses += 1,
            }
        }
    }

    if misses > 0 {
        log::debug!("{}: {} of {} terrain columns missed", occupant.name, misses, grid.x * grid.y);
    }
    hits
}
