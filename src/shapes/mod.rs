// Copyright @yucwang 2026

pub mod box_shape;
pub mod heightmap;
pub mod mesh;
pub mod triangle;
