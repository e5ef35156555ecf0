// Copyright @yucwang 2026

use crate::math::constants::Vector3f;

/// Destination of a probe build, owned by the lighting baker.
pub trait ProbeStore {
    fn set_probe_positions(&mut self, positions: Vec<Vector3f>);
    fn probe_positions(&self) -> &[Vector3f];

    fn probe_count(&self) -> usize {
        self.probe_positions().len()
    }
}

/// In-memory probe group attached to a scene object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightProbeGroup {
    positions: Vec<Vector3f>,
}

impl LightProbeGroup {
    pub fn new() -> Self {
        Self { positions: Vec::new() }
    }
}

impl ProbeStore for LightProbeGroup {
    fn set_probe_positions(&mut self, positions: Vec<Vector3f>) {
        self.positions = positions;
    }

    fn probe_positions(&self) -> &[Vector3f] {
        &self.positions
    }
}
