// Copyright @yucwang 2026

use crate::math::constants::Vector3f;

use std::fmt;
use std::fs;
use std::path::Path;
use wavefront_obj::{obj, ParseError};

#[derive(Debug)]
pub enum ObjLoadError {
    Io(std::io::Error),
    Parse(ParseError),
    Empty,
}

impl From<std::io::Error> for ObjLoadError {
    fn from(err: std::io::Error) -> Self {
        ObjLoadError::Io(err)
    }
}

impl From<ParseError> for ObjLoadError {
    fn from(err: ParseError) -> Self {
        ObjLoadError::Parse(err)
    }
}

impl fmt::Display for ObjLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjLoadError::Io(err) => write!(f, "io error: {}", err),
            ObjLoadError::Parse(err) => write!(f, "parse error: {}", err),
            ObjLoadError::Empty => write!(f, "obj has no vertices"),
        }
    }
}

impl std::error::Error for ObjLoadError {}

/// Every vertex position of every object in the file, in file order.
pub fn obj_vertices_from_str<S: AsRef<str>>(input: S) -> Result<Vec<Vector3f>, ObjLoadError> {
    let obj_set = obj::parse(fan_triangulate(input.as_ref()))?;
    let vertices: Vec<Vector3f> = obj_set
        .objects
        .iter()
        .flat_map(|o| o.vertices.iter())
        .map(|v| Vector3f::new(v.x as f32, v.y as f32, v.z as f32))
        .collect();

    if vertices.is_empty() {
        return Err(ObjLoadError::Empty);
    }
    Ok(vertices)
}

pub fn load_obj_vertices<P: AsRef<Path>>(path: P) -> Result<Vec<Vector3f>, ObjLoadError> {
    let data = fs::read_to_string(path)?;
    obj_vertices_from_str(data)
}

// The parser only accepts triangles and quads; larger polygons become fans.
fn fan_triangulate(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for line in input.lines() {
        let mut tokens = line.split_whitespace();
        if tokens.next() == Some("f") {
            let indices: Vec<&str> = tokens.collect();
            if indices.len() > 4 {
                for pair in indices[1..].windows(2) {
                    out.push_str(&format!("f {} {} {}\n", indices[0], pair[0], pair[1]));
                }
                continue;
            }
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertices_from_str() {
        let input = "\
o tri
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 2.0 0.0
f 1 2 3
";
        let vertices = obj_vertices_from_str(input).unwrap();
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[2], Vector3f::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_pentagon_is_fanned() {
        let fanned = fan_triangulate("f 1 2 3 4 5\n");
        assert_eq!(fanned, "f 1 2 3\nf 1 3 4\nf 1 4 5\n");
        assert_eq!(fan_triangulate("f 1 2 3 4\n"), "f 1 2 3 4\n");
    }

    #[test]
    fn test_empty_obj_is_rejected() {
        assert!(obj_vertices_from_str("# nothing here\n").is_err());
    }
}
