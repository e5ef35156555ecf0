// Copyright @yucwang 2026

pub mod bounds;
pub mod grid;
pub mod height_field;
