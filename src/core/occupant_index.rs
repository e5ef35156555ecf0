// Copyright @yucwang 2026

use crate::core::probe_builder::BuildError;
use crate::core::scene::{SceneObject, SceneQuery, LIGHTMAP_STATIC_TAG};
use crate::core::settings::BuilderSettings;
use crate::core::shape::HeightField;
use crate::math::aabb::AABB;
use crate::math::constants::Vector3f;
use crate::math::transform::Transform;
use std::sync::Arc;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoundsKind {
    Renderer,
    Collider,
}

/// An occupant known only by its box. `bounds` are world space and
/// already inflated by the bounds extent.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxedOccupant {
    pub name: String,
    pub kind: BoundsKind,
    pub bounds: AABB,
}

#[derive(Clone)]
pub struct HeightFieldOccupant {
    pub name: String,
    pub to_world: Transform,
    pub size: Vector3f,
    pub field: Arc<dyn HeightField>,
}

/// Result of one scan over the scene. Each scan replaces the previous
/// index as a whole.
#[derive(Clone, Default)]
pub struct OccupantIndex {
    pub renderers: Vec<BoxedOccupant>,
    pub colliders: Vec<BoxedOccupant>,
    pub height_fields: Vec<HeightFieldOccupant>,
}

impl OccupantIndex {
    pub fn scan<Q: SceneQuery + ?Sized>(scene: &Q,
                                        settings: &BuilderSettings,
                                        anchor: &Transform) -> Result<Self, BuildError> {
        let volume_bounds = settings.volume.world_bounds(anchor);
        let mut index = OccupantIndex::default();

        for object in scene.find_tagged_objects(LIGHTMAP_STATIC_TAG) {
            if settings.use_renderers {
                if let Some(bounds) = object.render_bounds() {
                    index.push_boxed(object, BoundsKind::Renderer, bounds, settings, &volume_bounds);
                }
            }
            if settings.use_colliders {
                if let Some(bounds) = object.collider_bounds() {
                    index.push_boxed(object, BoundsKind::Collider, bounds, settings, &volume_bounds);
                }
            }
            if settings.use_terrains {
                index.push_height_field(object, &volume_bounds)?;
            }
        }

        log::info!("Occupant index: {} renderers, {} colliders, {} height fields in volume.",
                   index.renderers.len(), index.colliders.len(), index.height_fields.len());
        Ok(index)
    }

    fn push_boxed(&mut self,
                  object: &SceneObject,
                  kind: BoundsKind,
                  bounds: AABB,
                  settings: &BuilderSettings,
                  volume_bounds: &AABB) {
        let bounds = bounds.inflated(settings.bounds_extent);
        if !bounds.intersects(volume_bounds) {
            log::debug!("{} {:?} bounds outside volume, skipped", object.name, kind);
            return;
        }

        let occupant = BoxedOccupant { name: object.name.clone(), kind, bounds };
        match kind {
            BoundsKind::Renderer => self.renderers.push(occupant),
            BoundsKind::Collider => self.colliders.push(occupant),
        }
    }

    fn push_height_field(&mut self, object: &SceneObject, volume_bounds: &AABB) -> Result<(), BuildError> {
        let terrain = match &object.terrain {
            Some(terrain) => terrain,
            None => return Ok(()),
        };
        let field = terrain
            .field
            .clone()
            .ok_or_else(|| BuildError::MissingRayQuery(object.name.clone()))?;

        let in_volume = object.terrain_bounds().map_or(false, |b| b.intersects(volume_bounds));
        if !in_volume {
            log::debug!("{} terrain outside volume, skipped", object.name);
            return Ok(());
        }

        self.height_fields.push(HeightFieldOccupant {
            name: object.name.clone(),
            to_world: object.to_world,
            size: terrain.size,
            field,
        });
        Ok(())
    }

    pub fn boxed_len(&self) -> usize {
        self.renderers.len() + self.colliders.len()
    }

    pub fn len(&self) -> usize {
        self.boxed_len() + self.height_fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renderer occupants then collider occupants, in scan order.
    pub fn boxed(&self) -> impl Iterator<Item = &BoxedOccupant> {
        self.renderers.iter().chain(self.colliders.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::{Scene, TerrainComponent};
    use crate::shapes::box_shape::BoxShape;
    use crate::shapes::heightmap::Heightmap;

    fn boxed_object(name: &str, at: Vector3f) -> SceneObject {
        SceneObject::new(name)
            .with_tag(LIGHTMAP_STATIC_TAG)
            .with_transform(Transform::from_translation(at))
            .with_renderer(Arc::new(BoxShape::unit()))
            .with_collider(Arc::new(BoxShape::unit()))
    }

    fn settings() -> BuilderSettings {
        let mut settings = BuilderSettings::default();
        settings.volume.size = Vector3f::new(4.0, 4.0, 4.0);
        settings
    }

    #[test]
    fn test_scan_filters_by_volume() {
        let scene = Scene::with_objects(vec![
            boxed_object("inside", Vector3f::zeros()),
            boxed_object("touching", Vector3f::new(2.5, 0.0, 0.0)),
            boxed_object("outside", Vector3f::new(10.0, 0.0, 0.0)),
            SceneObject::new("untagged").with_renderer(Arc::new(BoxShape::unit())),
        ]);
        let index = OccupantIndex::scan(&scene, &settings(), &Transform::default()).unwrap();
        let names: Vec<&str> = index.renderers.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["inside", "touching"]);
        assert!(index.colliders.is_empty());
        assert!(index.height_fields.is_empty());
    }

    #[test]
    fn test_scan_inflates_bounds_once() {
        let scene = Scene::with_objects(vec![boxed_object("near", Vector3f::new(3.0, 0.0, 0.0))]);
        let mut settings = settings();
        let index = OccupantIndex::scan(&scene, &settings, &Transform::default()).unwrap();
        assert!(index.is_empty());

        settings.bounds_extent = 0.5;
        let index = OccupantIndex::scan(&scene, &settings, &Transform::default()).unwrap();
        assert_eq!(index.renderers.len(), 1);
        assert_eq!(index.renderers[0].bounds.extents(), Vector3f::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_scan_respects_flags() {
        let scene = Scene::with_objects(vec![boxed_object("both", Vector3f::zeros())]);
        let mut settings = settings();
        settings.use_renderers = false;
        settings.use_colliders = true;
        let index = OccupantIndex::scan(&scene, &settings, &Transform::default()).unwrap();
        assert!(index.renderers.is_empty());
        assert_eq!(index.colliders.len(), 1);
        assert_eq!(index.colliders[0].kind, BoundsKind::Collider);

        settings.use_renderers = true;
        let index = OccupantIndex::scan(&scene, &settings, &Transform::default()).unwrap();
        assert_eq!(index.boxed_len(), 2);
    }

    #[test]
    fn test_scan_uses_anchor_position() {
        let scene = Scene::with_objects(vec![boxed_object("far", Vector3f::new(20.0, 0.0, 0.0))]);
        let anchor = Transform::from_translation(Vector3f::new(19.0, 0.0, 0.0));
        let index = OccupantIndex::scan(&scene, &settings(), &anchor).unwrap();
        assert_eq!(index.renderers.len(), 1);
    }

    #[test]
    fn test_scan_height_fields() {
        let size = Vector3f::new(8.0, 2.0, 8.0);
        let ground = Transform::from_translation(Vector3f::new(-4.0, -1.0, -4.0));
        let far = Transform::from_translation(Vector3f::new(100.0, 0.0, 0.0));
        let scene = Scene::with_objects(vec![
            SceneObject::new("ground")
                .with_tag(LIGHTMAP_STATIC_TAG)
                .with_transform(ground)
                .with_terrain(TerrainComponent::new(size, Arc::new(Heightmap::flat(size, ground)))),
            SceneObject::new("far")
                .with_tag(LIGHTMAP_STATIC_TAG)
                .with_transform(far)
                .with_terrain(TerrainComponent::new(size, Arc::new(Heightmap::flat(size, far)))),
        ]);
        let mut settings = settings();
        let index = OccupantIndex::scan(&scene, &settings, &Transform::default()).unwrap();
        assert!(index.height_fields.is_empty());

        settings.use_terrains = true;
        let index = OccupantIndex::scan(&scene, &settings, &Transform::default()).unwrap();
        assert_eq!(index.height_fields.len(), 1);
        assert_eq!(index.height_fields[0].name, "ground");
    }

    #[test]
    fn test_scan_missing_ray_query_is_an_error() {
        let broken = TerrainComponent { size: Vector3f::new(1.0, 1.0, 1.0), field: None };
        let scene = Scene::with_objects(vec![
            SceneObject::new("broken").with_tag(LIGHTMAP_STATIC_TAG).with_terrain(broken),
        ]);
        let mut settings = settings();
        settings.use_terrains = true;
        match OccupantIndex::scan(&scene, &settings, &Transform::default()) {
            Err(BuildError::MissingRayQuery(name)) => assert_eq!(name, "broken"),
            _ => panic!("expected MissingRayQuery"),
        }
    }
}
