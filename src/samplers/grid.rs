// Copyright @yucwang 2026

use crate::core::sampler::{ProbeSampler, SampleContext};
use crate::core::settings::BuilderSettings;
use crate::core::volume::ProbeVolume;
use crate::math::constants::{Float, Vector3f};
use crate::math::transform::Transform;

/// Uniform lattice spanning the volume, corners included.
pub struct GridSampler;

impl ProbeSampler for GridSampler {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn enabled(&self, settings: &BuilderSettings) -> bool {
        settings.use_grid
    }

    fn sample(&self, ctx: &SampleContext<'_>) -> Vec<Vector3f> {
        grid_positions(&ctx.settings.volume, Some(ctx.anchor))
    }
}

/// Lattice points with `x` outermost and `z` innermost. Points stay in the
/// volume's local frame unless `to_world` is given.
pub fn grid_positions(volume: &ProbeVolume, to_world: Option<&Transform>) -> Vec<Vector3f> {
    if !volume.has_grid() {
        return Vec::new();
    }

    let d = volume.density;
    let cell = Vector3f::new(volume.size.x / (d.x - 1) as Float,
                             volume.size.y / (d.y - 1) as Float,
                             volume.size.z / (d.z - 1) as Float);
    let start = volume.offset - volume.size * 0.5;

    let mut positions = Vec::with_capacity(volume.grid_len());
    for x in 0..d.x {
        for y in 0..d.y {
            for z in 0..d.z {
                let step = Vector3f::new(cell.x * x as Float, cell.y * y as Float, cell.z * z as Float);
                let p = start + step;
                positions.push(match to_world {
                    Some(t) => t.apply_point(p),
                    None => p,
                });
            }
        }
    }
    positions
}
