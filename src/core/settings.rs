// Copyright @yucwang 2026

use crate::core::volume::ProbeVolume;
use crate::math::constants::{ Float, Vector2i };

/// Every toggle a probe build reads.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BuilderSettings {
    pub volume: ProbeVolume,
    /// Margin added around every boxed occupant before testing and sampling.
    pub bounds_extent: Float,
    pub use_grid: bool,
    pub use_renderers: bool,
    pub use_colliders: bool,
    pub use_terrains: bool,
    /// Interior columns per terrain along its width and depth.
    pub terrain_grid: Vector2i,
    /// Height added above every terrain hit.
    pub terrain_offset: Float,
    pub remove_outside_volume: bool,
}

impl Default for BuilderSettings {
    fn default() -> Self {
        Self {
            volume: ProbeVolume::default(),
            bounds_extent: 0.0,
            use_grid: true,
            use_renderers: true,
            use_colliders: false,
            use_terrains: false,
            terrain_grid: Vector2i::new(8, 8),
            terrain_offset: 0.5,
            remove_outside_volume: false,
        }
    }
}

impl BuilderSettings {
    pub fn uses_bounds(&self) -> bool {
        self.use_renderers || self.use_colliders
    }

    pub fn needs_occupants(&self) -> bool {
        self.uses_bounds() || self.use_terrains
    }

    /// Log settings that silently turn a strategy off.
    pub fn warn_degenerate(&self) {
        if self.use_grid && !self.volume.has_grid() {
            log::warn!("grid sampling enabled but density {:?} has an axis <= 1, grid is skipped",
                       self.volume.density);
        }
        if self.volume.size.iter().any(|s| *s < 0.0) {
            log::warn!("volume size {:?} has a negative axis", self.volume.size);
        }
        if self.use_terrains && (self.terrain_grid.x <= 1 || self.terrain_grid.y <= 1) {
            log::warn!("terrain sampling enabled but terrain grid {:?} has an axis <= 1, terrains are skipped",
                       self.terrain_grid);
        }
        if self.bounds_extent < 0.0 {
            log::warn!("bounds extent {} is negative and is treated as 0", self.bounds_extent);
        }
    }
}
