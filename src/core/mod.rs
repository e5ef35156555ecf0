// Copyright @yucwang 2021

pub mod occupant_index;
pub mod probe_builder;
pub mod probe_store;
pub mod sampler;
pub mod scene;
pub mod scene_loader;
pub mod settings;
pub mod shape;
pub mod volume;
