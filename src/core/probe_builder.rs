// Copyright @yucwang 2026

use crate::core::occupant_index::OccupantIndex;
use crate::core::probe_store::ProbeStore;
use crate::core::sampler::{ProbeSampler, SampleContext};
use crate::core::scene::{SceneHost, SceneQuery};
use crate::core::settings::BuilderSettings;
use crate::core::volume::filter_inside;
use crate::math::constants::Vector3f;
use crate::math::transform::Transform;
use crate::samplers::bounds::BoundsSampler;
use crate::samplers::grid::GridSampler;
use crate::samplers::height_field::HeightFieldSampler;

use std::fmt;

/// Broken scene wiring. Degenerate settings never produce one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    MissingAnchor(String),
    MissingProbeStore(String),
    MissingRayQuery(String),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::MissingAnchor(name) => write!(f, "anchor object not found: {}", name),
            BuildError::MissingProbeStore(name) => write!(f, "object {} has no light probe group", name),
            BuildError::MissingRayQuery(name) => write!(f, "terrain on {} cannot be ray cast", name),
        }
    }
}

impl std::error::Error for BuildError {}

/// Probe counts per strategy for one build.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub grid: usize,
    pub bounds: usize,
    pub height_field: usize,
    pub removed: usize,
    pub total: usize,
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} probes (grid: {}, bounds: {}, height field: {}, removed outside volume: {})",
               self.total, self.grid, self.bounds, self.height_field, self.removed)
    }
}

/// Places the probes of the light probe group attached to `anchor`.
pub struct ProbeGroupBuilder {
    pub settings: BuilderSettings,
    anchor: String,
    occupants: OccupantIndex,
}

impl ProbeGroupBuilder {
    pub fn new(anchor: &str, settings: BuilderSettings) -> Self {
        Self { settings, anchor: anchor.to_string(), occupants: OccupantIndex::default() }
    }

    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    /// Occupants found by the last scan.
    pub fn occupants(&self) -> &OccupantIndex {
        &self.occupants
    }

    fn anchor_transform<Q: SceneQuery + ?Sized>(&self, scene: &Q) -> Result<Transform, BuildError> {
        scene
            .find_object(&self.anchor)
            .map(|o| o.to_world)
            .ok_or_else(|| BuildError::MissingAnchor(self.anchor.clone()))
    }

    /// Rescan the scene and replace the cached occupant lists.
    pub fn update_occupants<Q: SceneQuery + ?Sized>(&mut self, scene: &Q) -> Result<&OccupantIndex, BuildError> {
        let anchor = self.anchor_transform(scene)?;
        self.occupants = OccupantIndex::scan(scene, &self.settings, &anchor)?;
        Ok(&self.occupants)
    }

    /// Run every enabled strategy and the optional volume filter without
    /// touching the probe store.
    pub fn compute_positions<Q: SceneQuery + ?Sized>(&mut self, scene: &Q)
            -> Result<(Vec<Vector3f>, BuildReport), BuildError> {
        let anchor = self.anchor_transform(scene)?;
        self.settings.warn_degenerate();
        if self.settings.needs_occupants() {
            self.occupants = OccupantIndex::scan(scene, &self.settings, &anchor)?;
        } else {
            self.occupants = OccupantIndex::default();
        }

        let ctx = SampleContext { settings: &self.settings, anchor: &anchor, occupants: &self.occupants };
        let settings = &self.settings;
        let mut positions = Vec::new();
        let mut run = |sampler: &dyn ProbeSampler| -> usize {
            if !sampler.enabled(settings) {
                return 0;
            }
            let samples = sampler.sample(&ctx);
            log::debug!("{} sampler produced {} probes", sampler.name(), samples.len());
            let count = samples.len();
            positions.extend(samples);
            count
        };

        let mut report = BuildReport::default();
        report.grid = run(&GridSampler);
        report.bounds = run(&BoundsSampler);
        report.height_field = run(&HeightFieldSampler);

        if self.settings.remove_outside_volume {
            let before = positions.len();
            positions = filter_inside(positions, &self.settings.volume.world_bounds(&anchor));
            report.removed = before - positions.len();
        }
        report.total = positions.len();
        Ok((positions, report))
    }

    /// Recompute the probe set and write it to the anchor's probe store.
    pub fn build(&mut self, host: &mut dyn SceneHost) -> Result<BuildReport, BuildError> {
        self.ensure_probe_store(&*host)?;
        let (positions, report) = self.compute_positions(&*host)?;
        self.write_positions(host, positions)?;
        log::info!("Built light probes for {}: {}.", self.anchor, report);
        Ok(report)
    }

    pub fn clear(&mut self, host: &mut dyn SceneHost) -> Result<(), BuildError> {
        self.ensure_probe_store(&*host)?;
        self.write_positions(host, Vec::new())?;
        log::info!("Cleared light probes for {}.", self.anchor);
        Ok(())
    }

    pub fn probe_count<Q: SceneQuery + ?Sized>(&self, scene: &Q) -> Result<usize, BuildError> {
        let object = scene
            .find_object(&self.anchor)
            .ok_or_else(|| BuildError::MissingAnchor(self.anchor.clone()))?;
        object
            .light_probe_group
            .as_ref()
            .map(|g| g.probe_count())
            .ok_or_else(|| BuildError::MissingProbeStore(self.anchor.clone()))
    }

    fn ensure_probe_store<Q: SceneQuery + ?Sized>(&self, scene: &Q) -> Result<(), BuildError> {
        self.probe_count(scene).map(|_| ())
    }

    fn write_positions(&self, host: &mut dyn SceneHost, positions: Vec<Vector3f>) -> Result<(), BuildError> {
        let store = host
            .probe_store_mut(&self.anchor)
            .ok_or_else(|| BuildError::MissingProbeStore(self.anchor.clone()))?;
        store.set_probe_positions(positions);
        host.mark_changed();
        Ok(())
    }
}
