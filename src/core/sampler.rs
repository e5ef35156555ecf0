// Copyright @yucwang 2026

use crate::core::occupant_index::OccupantIndex;
use crate::core::settings::BuilderSettings;
use crate::math::constants::Vector3f;
use crate::math::transform::Transform;

/// Everything a placement strategy may look at during one build.
pub struct SampleContext<'a> {
    pub settings: &'a BuilderSettings,
    pub anchor: &'a Transform,
    pub occupants: &'a OccupantIndex,
}

/// One probe placement strategy. Disabled or degenerate configurations
/// return an empty list rather than failing.
pub trait ProbeSampler {
    fn name(&self) -> &'static str;
    fn enabled(&self, settings: &BuilderSettings) -> bool;
    fn sample(&self, ctx: &SampleContext<'_>) -> Vec<Vector3f>;
}
