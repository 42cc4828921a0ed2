//! Core math types shared by loaders and renderers: glam re-exports.
//!
//! Importers consume these as opaque component-wise value types, so
//! swapping the math crate only touches this file.

pub use glam::{Vec2, Vec3, vec2, vec3};
