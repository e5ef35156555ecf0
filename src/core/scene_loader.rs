// Copyright @yucwang 2026

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::core::probe_builder::ProbeGroupBuilder;
use crate::core::scene::{Scene, SceneObject, TerrainComponent};
use crate::core::settings::BuilderSettings;
use crate::core::shape::Shape;
use crate::io::heightmap_io::load_heightmap;
use crate::math::constants::{Float, Int, Vector2i, Vector3f, Vector3i};
use crate::math::transform::Transform;
use crate::shapes::box_shape::BoxShape;
use crate::shapes::heightmap::Heightmap;
use crate::shapes::mesh::MeshShape;

#[derive(Debug)]
pub enum SceneLoadError {
    Io(std::io::Error),
    Parse(String),
    MissingField(&'static str),
}

impl From<std::io::Error> for SceneLoadError {
    fn from(err: std::io::Error) -> Self {
        SceneLoadError::Io(err)
    }
}

impl fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneLoadError::Io(err) => write!(f, "io error: {}", err),
            SceneLoadError::Parse(msg) => write!(f, "parse error: {}", msg),
            SceneLoadError::MissingField(field) => write!(f, "missing field: {}", field),
        }
    }
}

impl std::error::Error for SceneLoadError {}

pub struct SceneLoadResult {
    pub scene: Scene,
    /// Object owning the light probe group, from `<probe_group anchor=...>`.
    pub anchor: Option<String>,
    pub settings: BuilderSettings,
}

impl SceneLoadResult {
    pub fn builder(&self) -> Result<ProbeGroupBuilder, SceneLoadError> {
        let anchor = self.anchor.as_deref().ok_or(SceneLoadError::MissingField("probe_group.anchor"))?;
        Ok(ProbeGroupBuilder::new(anchor, self.settings))
    }
}

pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<SceneLoadResult, SceneLoadError> {
    let path = path.as_ref();
    log::info!("Loading scene: {}.", path.display());
    let xml = fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    parse_scene(&xml, base_dir)
}

/// Parse scene XML. Relative asset paths resolve against `base_dir`.
pub fn parse_scene(xml: &str, base_dir: &Path) -> Result<SceneLoadResult, SceneLoadError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut parser = SceneParser::new(base_dir);

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => {
                parser.open(&e)?;
            }
            Ok(Event::Empty(e)) => {
                parser.open(&e)?;
                parser.close(e.name().as_ref())?;
            }
            Ok(Event::End(e)) => {
                parser.close(e.name().as_ref())?;
            }
            Err(e) => {
                return Err(SceneLoadError::Parse(e.to_string()));
            }
            _ => {}
        }

        buf.clear();
    }

    if parser.object.is_some() {
        return Err(SceneLoadError::Parse(String::from("unterminated <object>")));
    }

    log::info!("Scene loaded with {} objects.", parser.scene.len());
    Ok(SceneLoadResult { scene: parser.scene, anchor: parser.anchor, settings: parser.settings })
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ComponentKind {
    Renderer,
    Collider,
    Terrain,
}

struct ComponentDraft {
    kind: ComponentKind,
    shape_type: String,
    props: HashMap<String, String>,
}

impl ComponentDraft {
    fn vec3(&self, key: &str, default: Vector3f) -> Result<Vector3f, SceneLoadError> {
        match self.props.get(key) {
            Some(value) => parse_vec3(value),
            None => Ok(default),
        }
    }

    fn filename(&self, base_dir: &Path, field: &'static str) -> Result<String, SceneLoadError> {
        let filename = self.props.get("filename").ok_or(SceneLoadError::MissingField(field))?;
        if Path::new(filename).is_absolute() {
            Ok(filename.clone())
        } else {
            Ok(base_dir.join(filename).to_string_lossy().to_string())
        }
    }
}

struct ObjectDraft {
    name: String,
    tags: Vec<String>,
    translate: Vector3f,
    rotate: Vector3f,
    scale: Vector3f,
    probe_group: bool,
    renderer: Option<ComponentDraft>,
    collider: Option<ComponentDraft>,
    terrain: Option<ComponentDraft>,
}

impl ObjectDraft {
    fn new(name: String, tags: Vec<String>) -> Self {
        Self {
            name,
            tags,
            translate: Vector3f::zeros(),
            rotate: Vector3f::zeros(),
            scale: Vector3f::new(1.0, 1.0, 1.0),
            probe_group: false,
            renderer: None,
            collider: None,
            terrain: None,
        }
    }
}

struct SceneParser<'a> {
    base_dir: &'a Path,
    defaults: HashMap<String, String>,
    scene: Scene,
    anchor: Option<String>,
    settings: BuilderSettings,
    in_probe_group: bool,
    in_transform: bool,
    object: Option<ObjectDraft>,
    component: Option<ComponentDraft>,
}

impl<'a> SceneParser<'a> {
    fn new(base_dir: &'a Path) -> Self {
        Self {
            base_dir,
            defaults: HashMap::new(),
            scene: Scene::new(),
            anchor: None,
            settings: BuilderSettings::default(),
            in_probe_group: false,
            in_transform: false,
            object: None,
            component: None,
        }
    }

    fn attributes(&self, e: &BytesStart) -> HashMap<String, String> {
        let mut attrs = HashMap::new();
        for attr in e.attributes().flatten() {
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = resolve_value(&attr.unescape_value().unwrap_or_default(), &self.defaults);
            attrs.insert(key, value);
        }
        attrs
    }

    fn open(&mut self, e: &BytesStart) -> Result<(), SceneLoadError> {
        let attrs = self.attributes(e);
        match e.name().as_ref() {
            b"scene" => {}
            b"default" => {
                if let (Some(k), Some(v)) = (attrs.get("name"), attrs.get("value")) {
                    self.defaults.insert(k.clone(), v.clone());
                }
            }
            b"probe_group" => {
                let anchor = attrs.get("anchor").ok_or(SceneLoadError::MissingField("probe_group.anchor"))?;
                self.anchor = Some(anchor.clone());
                self.in_probe_group = true;
            }
            b"object" => {
                if self.object.is_some() {
                    return Err(SceneLoadError::Parse(String::from("nested <object>")));
                }
                let id = attrs.get("id").ok_or(SceneLoadError::MissingField("object.id"))?;
                let tags: Vec<String> = attrs
                    .get("tags")
                    .map(|t| t.split(',').map(|s| s.trim()).filter(|s| !s.is_empty()).map(String::from).collect())
                    .unwrap_or_default();
                self.object = Some(ObjectDraft::new(id.clone(), tags));
            }
            b"transform" => {
                self.in_transform = self.object.is_some()
                    && attrs.get("name").map_or(true, |n| n == "to_world");
            }
            b"translate" | b"rotate" | b"scale" => {
                if self.in_transform {
                    let tag = e.name().as_ref().to_vec();
                    self.apply_transform_step(&tag, &attrs)?;
                }
            }
            b"renderer" | b"collider" | b"terrain" => {
                let kind = match e.name().as_ref() {
                    b"renderer" => ComponentKind::Renderer,
                    b"collider" => ComponentKind::Collider,
                    _ => ComponentKind::Terrain,
                };
                if self.object.is_none() {
                    return Err(SceneLoadError::Parse(format!("{:?} outside <object>", kind)));
                }
                let shape_type = attrs.get("type").cloned().ok_or(match kind {
                    ComponentKind::Renderer => SceneLoadError::MissingField("renderer.type"),
                    ComponentKind::Collider => SceneLoadError::MissingField("collider.type"),
                    ComponentKind::Terrain => SceneLoadError::MissingField("terrain.type"),
                })?;
                self.component = Some(ComponentDraft { kind, shape_type, props: HashMap::new() });
            }
            b"light_probe_group" => match self.object.as_mut() {
                Some(object) => object.probe_group = true,
                None => return Err(SceneLoadError::Parse(String::from("<light_probe_group> outside <object>"))),
            },
            b"float" | b"integer" | b"boolean" | b"vector" | b"string" => {
                let name = attrs.get("name").ok_or(SceneLoadError::MissingField("property.name"))?;
                let value = attrs.get("value").ok_or(SceneLoadError::MissingField("property.value"))?;
                if let Some(component) = self.component.as_mut() {
                    component.props.insert(name.clone(), value.clone());
                } else if self.in_probe_group {
                    apply_setting(&mut self.settings, name, value)?;
                } else {
                    log::warn!("Property {} outside of any component, ignored.", name);
                }
            }
            other => {
                log::warn!("Unknown element <{}>, ignored.", String::from_utf8_lossy(other));
            }
        }
        Ok(())
    }

    fn close(&mut self, name: &[u8]) -> Result<(), SceneLoadError> {
        match name {
            b"probe_group" => self.in_probe_group = false,
            b"transform" => self.in_transform = false,
            b"renderer" | b"collider" | b"terrain" => {
                if let (Some(component), Some(object)) = (self.component.take(), self.object.as_mut()) {
                    match component.kind {
                        ComponentKind::Renderer => object.renderer = Some(component),
                        ComponentKind::Collider => object.collider = Some(component),
                        ComponentKind::Terrain => object.terrain = Some(component),
                    }
                }
            }
            b"object" => {
                if let Some(draft) = self.object.take() {
                    let object = self.build_object(draft)?;
                    self.scene.add_object(object);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn apply_transform_step(&mut self, tag: &[u8], attrs: &HashMap<String, String>) -> Result<(), SceneLoadError> {
        let object = match self.object.as_mut() {
            Some(object) => object,
            None => return Ok(()),
        };
        let axis = |key: &str, default: Float| -> Result<Float, SceneLoadError> {
            attrs.get(key).map_or(Ok(default), |v| parse_float(v))
        };

        match tag {
            b"translate" => {
                object.translate += Vector3f::new(axis("x", 0.0)?, axis("y", 0.0)?, axis("z", 0.0)?);
            }
            b"rotate" => {
                object.rotate += Vector3f::new(axis("x", 0.0)?, axis("y", 0.0)?, axis("z", 0.0)?);
            }
            _ => {
                let s = match attrs.get("value") {
                    Some(v) => {
                        let u = parse_float(v)?;
                        Vector3f::new(u, u, u)
                    }
                    None => Vector3f::new(axis("x", 1.0)?, axis("y", 1.0)?, axis("z", 1.0)?),
                };
                object.scale = object.scale.component_mul(&s);
            }
        }
        Ok(())
    }

    fn build_object(&self, draft: ObjectDraft) -> Result<SceneObject, SceneLoadError> {
        let to_world = Transform::from_trs(draft.translate, draft.rotate, draft.scale);
        let mut object = SceneObject::new(&draft.name).with_transform(to_world);
        for tag in &draft.tags {
            object = object.with_tag(tag);
        }
        if let Some(renderer) = &draft.renderer {
            object = object.with_renderer(self.build_shape(renderer)?);
        }
        if let Some(collider) = &draft.collider {
            object = object.with_collider(self.build_shape(collider)?);
        }
        if let Some(terrain) = &draft.terrain {
            object = object.with_terrain(self.build_terrain(terrain, to_world)?);
        }
        if draft.probe_group {
            object = object.with_light_probe_group();
        }

        log::debug!("Loaded object {} (tags: {:?}).", object.name, object.tags);
        Ok(object)
    }

    fn build_shape(&self, component: &ComponentDraft) -> Result<Arc<dyn Shape>, SceneLoadError> {
        match (component.kind, component.shape_type.as_str()) {
            (_, "box") => {
                let center = component.vec3("center", Vector3f::zeros())?;
                let size = component.vec3("size", Vector3f::new(1.0, 1.0, 1.0))?;
                Ok(Arc::new(BoxShape::new(center, size)))
            }
            (ComponentKind::Renderer, "obj") => {
                let filename = component.filename(self.base_dir, "renderer.filename")?;
                let mesh = MeshShape::from_obj(&filename)
                    .map_err(|e| SceneLoadError::Parse(format!("obj load failed: {}", e)))?;
                Ok(Arc::new(mesh))
            }
            (kind, other) => Err(SceneLoadError::Parse(format!("unsupported {:?} type: {}", kind, other))),
        }
    }

    fn build_terrain(&self, component: &ComponentDraft, to_world: Transform) -> Result<TerrainComponent, SceneLoadError> {
        let size = component.vec3("size", Vector3f::new(1.0, 1.0, 1.0))?;
        let heightmap = match component.shape_type.as_str() {
            "flat" => Heightmap::flat(size, to_world),
            "heightmap" => {
                let filename = component.filename(self.base_dir, "terrain.filename")?;
                let samples = load_heightmap(&filename).map_err(SceneLoadError::Parse)?;
                Heightmap::from_samples(samples, size, to_world).map_err(SceneLoadError::Parse)?
            }
            other => return Err(SceneLoadError::Parse(format!("unsupported terrain type: {}", other))),
        };
        Ok(TerrainComponent::new(size, Arc::new(heightmap)))
    }
}

fn apply_setting(settings: &mut BuilderSettings, name: &str, value: &str) -> Result<(), SceneLoadError> {
    match name {
        "offset" => settings.volume.offset = parse_vec3(value)?,
        "size" => settings.volume.size = parse_vec3(value)?,
        "density" => settings.volume.density = parse_vec3i(value)?,
        "bounds_extent" => settings.bounds_extent = parse_float(value)?,
        "use_grid" => settings.use_grid = parse_bool(value)?,
        "use_renderers" => settings.use_renderers = parse_bool(value)?,
        "use_colliders" => settings.use_colliders = parse_bool(value)?,
        "use_terrains" => settings.use_terrains = parse_bool(value)?,
        "terrain_grid" => settings.terrain_grid = parse_vec2i(value)?,
        "terrain_offset" => settings.terrain_offset = parse_float(value)?,
        "remove_outside_volume" => settings.remove_outside_volume = parse_bool(value)?,
        _ => log::warn!("Unknown probe group setting {}, ignored.", name),
    }
    Ok(())
}

fn resolve_value(raw: &str, defaults: &HashMap<String, String>) -> String {
    let mut out = raw.to_string();
    for (k, v) in defaults {
        out = out.replace(&format!("${}", k), v);
    }
    out
}

pub fn parse_float(value: &str) -> Result<Float, SceneLoadError> {
    value.trim().parse::<Float>().map_err(|_| SceneLoadError::Parse(format!("invalid float: {}", value)))
}

fn parse_int(value: &str) -> Result<Int, SceneLoadError> {
    value.trim().parse::<Int>().map_err(|_| SceneLoadError::Parse(format!("invalid integer: {}", value)))
}

fn parse_bool(value: &str) -> Result<bool, SceneLoadError> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(SceneLoadError::Parse(format!("invalid boolean: {}", other))),
    }
}

fn split_components<'v>(value: &'v str, count: usize) -> Result<Vec<&'v str>, SceneLoadError> {
    let parts: Vec<&str> = value.split(',').map(|s| s.trim()).filter(|s| !s.is_empty()).collect();
    if parts.len() != count {
        return Err(SceneLoadError::Parse(format!("expected {} components: {}", count, value)));
    }
    Ok(parts)
}

pub fn parse_vec3(value: &str) -> Result<Vector3f, SceneLoadError> {
    let p = split_components(value, 3)?;
    Ok(Vector3f::new(parse_float(p[0])?, parse_float(p[1])?, parse_float(p[2])?))
}

fn parse_vec3i(value: &str) -> Result<Vector3i, SceneLoadError> {
    let p = split_components(value, 3)?;
    Ok(Vector3i::new(parse_int(p[0])?, parse_int(p[1])?, parse_int(p[2])?))
}

pub fn parse_vec2i(value: &str) -> Result<Vector2i, SceneLoadError> {
    let p = split_components(value, 2)?;
    Ok(Vector2i::new(parse_int(p[0])?, parse_int(p[1])?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::{SceneQuery, LIGHTMAP_STATIC_TAG};

    const SCENE_XML: &str = r#"
<scene>
  <default name="extent" value="0.25"/>
  <probe_group anchor="ProbeRoot">
    <vector name="size" value="6,6,6"/>
    <vector name="density" value="3,3,3"/>
    <float name="bounds_extent" value="$extent"/>
    <boolean name="use_colliders" value="true"/>
    <boolean name="use_terrains" value="true"/>
    <vector name="terrain_grid" value="2, 2"/>
    <float name="terrain_offset" value="1"/>
    <boolean name="remove_outside_volume" value="true"/>
  </probe_group>
  <object id="ProbeRoot">
    <transform name="to_world"><translate x="0" y="1" z="0"/></transform>
    <light_probe_group/>
  </object>
  <object id="Crate" tags="lightmap_static, props">
    <transform name="to_world">
      <translate x="1" y="0" z="2"/>
      <scale value="2"/>
    </transform>
    <renderer type="box"/>
    <collider type="box"><vector name="size" value="1,3,1"/></collider>
  </object>
  <object id="Ground" tags="lightmap_static">
    <terrain type="flat"><vector name="size" value="6,0,6"/></terrain>
    <transform name="to_world"><translate x="-3" y="-2" z="-3"/></transform>
  </object>
</scene>
"#;

    #[test]
    fn test_parse_settings_and_defaults() {
        let result = parse_scene(SCENE_XML, Path::new(".")).unwrap();
        let settings = result.settings;
        assert_eq!(result.anchor.as_deref(), Some("ProbeRoot"));
        assert_eq!(settings.volume.size, Vector3f::new(6.0, 6.0, 6.0));
        assert_eq!(settings.volume.density, Vector3i::new(3, 3, 3));
        assert_eq!(settings.volume.offset, Vector3f::zeros());
        assert!((settings.bounds_extent - 0.25).abs() < 1e-6);
        assert!(settings.use_grid);
        assert!(settings.use_renderers);
        assert!(settings.use_colliders);
        assert!(settings.use_terrains);
        assert_eq!(settings.terrain_grid, Vector2i::new(2, 2));
        assert!(settings.remove_outside_volume);
    }

    #[test]
    fn test_parse_objects() {
        let result = parse_scene(SCENE_XML, Path::new(".")).unwrap();
        let scene = &result.scene;
        assert_eq!(scene.len(), 3);
        assert!(scene.light_probe_group("ProbeRoot").is_some());

        let tagged = scene.find_tagged_objects(LIGHTMAP_STATIC_TAG);
        assert_eq!(tagged.len(), 2);

        let crate_object = scene.find_object("Crate").unwrap();
        assert!(crate_object.has_tag("props"));
        let bounds = crate_object.render_bounds().unwrap();
        assert!((bounds.p_min - Vector3f::new(0.0, -1.0, 1.0)).norm() < 1e-5);
        assert!((bounds.p_max - Vector3f::new(2.0, 1.0, 3.0)).norm() < 1e-5);
        let collider = crate_object.collider_bounds().unwrap();
        assert!((collider.size() - Vector3f::new(2.0, 6.0, 2.0)).norm() < 1e-5);

        // The terrain picks up a transform declared after it.
        let ground = scene.find_object("Ground").unwrap();
        let terrain = ground.terrain_bounds().unwrap();
        assert!((terrain.p_min - Vector3f::new(-3.0, -2.0, -3.0)).norm() < 1e-5);
    }

    #[test]
    fn test_loaded_scene_builds() {
        let result = parse_scene(SCENE_XML, Path::new(".")).unwrap();
        let mut scene = result.scene;
        let mut builder = ProbeGroupBuilder::new(result.anchor.as_deref().unwrap(), result.settings);
        let report = builder.build(&mut scene).unwrap();
        assert_eq!(report.grid, 27);
        assert_eq!(report.bounds, 16);
        assert_eq!(report.height_field, 4);
        // Volume spans [-3, 3] x [-2, 4] x [-3, 3]: the crate's far corners
        // (z = 3.25) and the collider's lowest ones (y = -3.25) fall outside.
        assert_eq!(report.removed, 10);
        assert_eq!(builder.probe_count(&scene).unwrap(), 37);
    }

    #[test]
    fn test_parse_errors() {
        let missing_id = "<scene><object tags=\"lightmap_static\"/></scene>";
        match parse_scene(missing_id, Path::new(".")) {
            Err(SceneLoadError::MissingField(field)) => assert_eq!(field, "object.id"),
            _ => panic!("expected missing object id"),
        }

        let bad_type = "<scene><object id=\"a\"><renderer type=\"sphere\"/></object></scene>";
        assert!(matches!(parse_scene(bad_type, Path::new(".")), Err(SceneLoadError::Parse(_))));

        let bad_bool = "<scene><probe_group anchor=\"a\"><boolean name=\"use_grid\" value=\"yes\"/></probe_group></scene>";
        assert!(matches!(parse_scene(bad_bool, Path::new(".")), Err(SceneLoadError::Parse(_))));

        let stray = "<scene><renderer type=\"box\"/></scene>";
        assert!(parse_scene(stray, Path::new(".")).is_err());
    }

    #[test]
    fn test_obj_renderer_relative_path() {
        let dir = std::env::temp_dir().join("light_probe_builder_scene_loader_test");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("wedge.obj"), "v 0 0 0\nv 2 0 0\nv 0 3 0\nv 0 0 4\nf 1 2 3\nf 1 3 4\n").unwrap();

        let xml = r#"<scene>
            <object id="Wedge" tags="lightmap_static">
              <renderer type="obj"><string name="filename" value="wedge.obj"/></renderer>
            </object>
        </scene>"#;
        let result = parse_scene(xml, &dir).unwrap();
        let bounds = result.scene.find_object("Wedge").unwrap().render_bounds().unwrap();
        assert_eq!(bounds.p_max, Vector3f::new(2.0, 3.0, 4.0));
        assert!(result.builder().is_err());
    }
}
