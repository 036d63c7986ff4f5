//! Math foundation for the glimmer ray tracer.
//!
//! Wraps glam's f64 types in the point/vector/color vocabulary the renderer
//! is written in, and adds the transform and bounding-volume helpers the
//! scene model needs. Everything here is plain data; nothing knows about
//! shapes or shading.

// Re-export the glam types that appear in public signatures
pub use glam::{DMat4, DVec3};

mod bounds;
mod color;
mod ray;
mod transform;
mod tuple;

pub use bounds::{check_axis, BoundingBox};
pub use color::Color;
pub use ray::Ray;
pub use transform::{
    rotation_x, rotation_y, rotation_z, scaling, shearing, translation, view_transform, Mat4Ext,
    Transform,
};
pub use tuple::{Point, Vector};

/// Comparison tolerance shared by the geometric predicates and tests.
pub const EPSILON: f64 = 1e-5;

/// Compare two floats within [`EPSILON`].
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}
