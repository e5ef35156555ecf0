// Copyright @yucwang 2026

pub mod heightmap_io;
pub mod obj_utils;
pub mod probe_io;
