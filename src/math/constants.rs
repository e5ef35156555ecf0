/* Copyright 2020 @Yuchen Wong */

pub type Float = f32;
pub type Int = i32;

pub type Vector3f = nalgebra::Vector3<Float>;
pub type Vector2i = nalgebra::Vector2<Int>;
pub type Vector3i = nalgebra::Vector3<Int>;
pub type Point3f = nalgebra::Point3<Float>;
pub type Matrix4f = nalgebra::Matrix4<Float>;

pub const FLOAT_MAX: Float = std::f32::MAX;
pub const FLOAT_MIN: Float = std::f32::MIN;
pub const DEG_TO_RAD: Float = 0.01745329252;
