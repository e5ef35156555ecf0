// Copyright @yucwang 2026

use crate::core::occupant_index::BoxedOccupant;
use crate::core::sampler::{ProbeSampler, SampleContext};
use crate::core::settings::BuilderSettings;
use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector3f};

/// Sign pattern of the emitted corners. Output order is part of the
/// contract: reference probe sets depend on it.
pub const CORNER_SIGNS: [(Float, Float, Float); 8] = [
    ( 1.0,  1.0,  1.0),
    (-1.0, -1.0,  1.0),
    ( 1.0, -1.0,  1.0),
    (-1.0,  1.0,  1.0),
    ( 1.0,  1.0, -1.0),
    (-1.0, -1.0, -1.0),
    ( 1.0, -1.0, -1.0),
    (-1.0,  1.0, -1.0),
];

/// Eight probes on the corners of every boxed occupant. All renderer
/// occupants come first in scan order, then all collider occupants, so an
/// object with both contributes two blocks that are not adjacent.
pub struct BoundsSampler;

impl ProbeSampler for BoundsSampler {
    fn name(&self) -> &'static str {
        "bounds"
    }

    fn enabled(&self, settings: &BuilderSettings) -> bool {
        settings.uses_bounds()
    }

    fn sample(&self, ctx: &SampleContext<'_>) -> Vec<Vector3f> {
        corner_positions(ctx.occupants.boxed())
    }
}

pub fn box_corners(bounds: &AABB) -> [Vector3f; 8] {
    let c = bounds.center();
    let e = bounds.extents();
    let mut corners = [Vector3f::zeros(); 8];
    for (corner, s) in corners.iter_mut().zip(CORNER_SIGNS.iter()) {
        *corner = c + Vector3f::new(s.0 * e.x, s.1 * e.y, s.2 * e.z);
    }
    corners
}

/// Corners of occupants whose bounds were inflated at index time.
pub fn corner_positions<'a, I>(occupants: I) -> Vec<Vector3f>
where
    I: IntoIterator<Item = &'a BoxedOccupant>,
{
    occupants
        .into_iter()
        .flat_map(|o| box_corners(&o.bounds).to_vec())
        .collect()
}

/// Corners of raw bounds, inflating each box by `extent` first.
pub fn sample_raw_bounds(bounds: &[AABB], extent: Float) -> Vec<Vector3f> {
    bounds
        .iter()
        .flat_map(|b| box_corners(&b.inflated(extent)).to_vec())
        .collect()
}
