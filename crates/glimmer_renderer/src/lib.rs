//! glimmer renderer - CPU ray tracing
//!
//! A Whitted-style recursive ray tracer: primitives with cached-inverse
//! transforms, a coarse group BVH, Phong shading with patterns and soft
//! shadows, and pluggable per-pixel samplers over a parallel render loop.

mod camera;
mod canvas;
mod cone;
mod cube;
mod cylinder;
mod group;
mod intersection;
mod light;
mod material;
mod pattern;
mod plane;
mod sampler;
mod shape;
mod sphere;
mod stats;
mod texture;
mod triangle;
mod world;

pub use camera::Camera;
pub use canvas::Canvas;
pub use group::Group;
pub use intersection::{hit, prepare_computations, schlick, Comps, Intersection};
pub use light::{AreaLight, Light, LightSamples, PointLight};
pub use material::Material;
pub use pattern::{CubeFace, Pattern, PatternKind, UvMapping, UvPattern};
pub use sampler::{Antialias, FocalBlur, PixelCenter, Sampler, SteppedPreview, SuperSample};
pub use shape::{Geometry, LocalHit, RayKind, RayMask, Shape, ShapeId};
pub use stats::{RenderStats, StatsSnapshot};
pub use texture::{ImageTexture, TextureError, TextureResult};
pub use triangle::{SmoothTriangle, Triangle};
pub use world::{World, MAX_BOUNCES};

/// Re-export the math types scenes are built from
pub use glimmer_math::{
    rotation_x, rotation_y, rotation_z, scaling, shearing, translation, view_transform,
    BoundingBox, Color, Mat4Ext, Point, Ray, Transform, Vector, EPSILON,
};

use rand::RngCore;

/// Uniform sample in [0, 1) with 53 bits of precision.
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}
