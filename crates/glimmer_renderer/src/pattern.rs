//! Surface patterns: procedural 3d patterns plus uv-mapped textures.
//!
//! A pattern carries its own transform on top of the shape's, so the
//! lookup chain for a world-space point is world -> object -> pattern
//! space. `at` evaluates in pattern space; `at_object` and `at_shape`
//! peel off the outer transforms first.

use std::sync::Arc;

use glimmer_math::{Color, DMat4, Mat4Ext, Point, Transform};

use crate::shape::ShapeId;
use crate::texture::ImageTexture;
use crate::world::World;

#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    transform: Transform,
    pub kind: PatternKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PatternKind {
    Solid(Color),
    /// Alternates along x in unit-wide bands.
    Stripe(Color, Color),
    /// Linear blend along x within each unit interval.
    Gradient(Color, Color),
    /// Concentric bands around the y axis.
    Ring(Color, Color),
    /// Unit cubes alternating in all three dimensions.
    Checkers(Color, Color),
    /// A uv pattern applied through a projection of 3d points to uv.
    Texture {
        mapping: UvMapping,
        uv: UvPattern,
    },
    /// One uv pattern per cube face, indexed left/front/right/back/up/down.
    CubeMap(Box<[UvPattern; 6]>),
}

/// Projection from pattern-space points to uv coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UvMapping {
    Spherical,
    Planar,
    Cylindrical,
    Cube,
}

impl UvMapping {
    pub fn uv_at(self, p: Point) -> (f64, f64) {
        match self {
            Self::Spherical => {
                let theta = p.x().atan2(p.z());
                let radius = (p - Point::ORIGIN).length();
                let phi = (p.y() / radius).acos();
                let raw_u = theta / (2.0 * std::f64::consts::PI);
                (1.0 - (raw_u + 0.5), 1.0 - phi / std::f64::consts::PI)
            }
            Self::Planar => (p.x().rem_euclid(1.0), p.z().rem_euclid(1.0)),
            Self::Cylindrical => {
                let theta = p.x().atan2(p.z());
                let raw_u = theta / (2.0 * std::f64::consts::PI);
                (1.0 - (raw_u + 0.5), p.y().rem_euclid(1.0))
            }
            Self::Cube => CubeFace::of(p).uv(p),
        }
    }
}

/// Cube face a point projects onto. The discriminants index the
/// `CubeMap` face array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeFace {
    Left = 0,
    Front = 1,
    Right = 2,
    Back = 3,
    Up = 4,
    Down = 5,
}

impl CubeFace {
    pub fn of(p: Point) -> Self {
        let coord = p.x().abs().max(p.y().abs()).max(p.z().abs());
        if coord == p.x() {
            Self::Right
        } else if coord == -p.x() {
            Self::Left
        } else if coord == p.y() {
            Self::Up
        } else if coord == -p.y() {
            Self::Down
        } else if coord == p.z() {
            Self::Front
        } else {
            Self::Back
        }
    }

    pub fn uv(self, p: Point) -> (f64, f64) {
        match self {
            Self::Front => (
                (p.x() + 1.0).rem_euclid(2.0) / 2.0,
                (p.y() + 1.0).rem_euclid(2.0) / 2.0,
            ),
            Self::Back => (
                (1.0 - p.x()).rem_euclid(2.0) / 2.0,
                (p.y() + 1.0).rem_euclid(2.0) / 2.0,
            ),
            Self::Left => (
                (p.z() + 1.0).rem_euclid(2.0) / 2.0,
                (p.y() + 1.0).rem_euclid(2.0) / 2.0,
            ),
            Self::Right => (
                (1.0 - p.z()).rem_euclid(2.0) / 2.0,
                (p.y() + 1.0).rem_euclid(2.0) / 2.0,
            ),
            Self::Up => (
                (p.x() + 1.0).rem_euclid(2.0) / 2.0,
                (1.0 - p.z()).rem_euclid(2.0) / 2.0,
            ),
            Self::Down => (
                (p.x() + 1.0).rem_euclid(2.0) / 2.0,
                (p.z() + 1.0).rem_euclid(2.0) / 2.0,
            ),
        }
    }
}

/// Pattern evaluated in uv space.
#[derive(Debug, Clone, PartialEq)]
pub enum UvPattern {
    Checkers {
        width: u32,
        height: u32,
        a: Color,
        b: Color,
    },
    /// Distinct corner swatches over a main color, for checking that a
    /// mapping orients the way you expect.
    AlignCheck {
        main: Color,
        ul: Color,
        ur: Color,
        bl: Color,
        br: Color,
    },
    Image(Arc<ImageTexture>),
}

impl UvPattern {
    pub fn checkers(width: u32, height: u32, a: Color, b: Color) -> Self {
        Self::Checkers {
            width,
            height,
            a,
            b,
        }
    }

    pub fn align_check(main: Color, ul: Color, ur: Color, bl: Color, br: Color) -> Self {
        Self::AlignCheck {
            main,
            ul,
            ur,
            bl,
            br,
        }
    }

    pub fn image(texture: ImageTexture) -> Self {
        Self::Image(Arc::new(texture))
    }

    pub fn at(&self, u: f64, v: f64) -> Color {
        match self {
            Self::Checkers {
                width,
                height,
                a,
                b,
            } => {
                let u2 = (u * *width as f64).floor() as i64;
                let v2 = (v * *height as f64).floor() as i64;
                if (u2 + v2) % 2 == 0 {
                    *a
                } else {
                    *b
                }
            }
            Self::AlignCheck {
                main,
                ul,
                ur,
                bl,
                br,
            } => {
                if v > 0.8 {
                    if u < 0.2 {
                        *ul
                    } else if u > 0.8 {
                        *ur
                    } else {
                        *main
                    }
                } else if v < 0.2 {
                    if u < 0.2 {
                        *bl
                    } else if u > 0.8 {
                        *br
                    } else {
                        *main
                    }
                } else {
                    *main
                }
            }
            Self::Image(texture) => texture.sample(u, v),
        }
    }
}

impl Pattern {
    fn from_kind(kind: PatternKind) -> Self {
        Self {
            transform: Transform::IDENTITY,
            kind,
        }
    }

    pub fn solid(color: Color) -> Self {
        Self::from_kind(PatternKind::Solid(color))
    }

    pub fn stripe(a: Color, b: Color) -> Self {
        Self::from_kind(PatternKind::Stripe(a, b))
    }

    pub fn gradient(a: Color, b: Color) -> Self {
        Self::from_kind(PatternKind::Gradient(a, b))
    }

    pub fn ring(a: Color, b: Color) -> Self {
        Self::from_kind(PatternKind::Ring(a, b))
    }

    pub fn checkers(a: Color, b: Color) -> Self {
        Self::from_kind(PatternKind::Checkers(a, b))
    }

    pub fn texture(mapping: UvMapping, uv: UvPattern) -> Self {
        Self::from_kind(PatternKind::Texture { mapping, uv })
    }

    pub fn cube_map(
        left: UvPattern,
        front: UvPattern,
        right: UvPattern,
        back: UvPattern,
        up: UvPattern,
        down: UvPattern,
    ) -> Self {
        Self::from_kind(PatternKind::CubeMap(Box::new([
            left, front, right, back, up, down,
        ])))
    }

    pub fn with_transform(mut self, matrix: DMat4) -> Self {
        self.set_transform(matrix);
        self
    }

    pub fn set_transform(&mut self, matrix: DMat4) {
        self.transform = Transform::new(matrix);
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Evaluate at a point already in pattern space.
    pub fn at(&self, p: Point) -> Color {
        match &self.kind {
            PatternKind::Solid(c) => *c,
            PatternKind::Stripe(a, b) => {
                if p.x().floor() as i64 % 2 == 0 {
                    *a
                } else {
                    *b
                }
            }
            PatternKind::Gradient(a, b) => *a + (*b - *a) * (p.x() - p.x().floor()),
            PatternKind::Ring(a, b) => {
                let distance = (p.x() * p.x() + p.z() * p.z()).sqrt();
                if distance.floor() as i64 % 2 == 0 {
                    *a
                } else {
                    *b
                }
            }
            PatternKind::Checkers(a, b) => {
                let sum = p.x().floor() + p.y().floor() + p.z().floor();
                if sum as i64 % 2 == 0 {
                    *a
                } else {
                    *b
                }
            }
            PatternKind::Texture { mapping, uv } => {
                let (u, v) = mapping.uv_at(p);
                uv.at(u, v)
            }
            PatternKind::CubeMap(faces) => {
                let face = CubeFace::of(p);
                let (u, v) = face.uv(p);
                faces[face as usize].at(u, v)
            }
        }
    }

    /// Evaluate at a point in a shape's object space.
    pub fn at_object(&self, object_point: Point) -> Color {
        self.at(self.transform.inverse().transform_point(object_point))
    }

    /// Evaluate at a world-space point on `shape`, honoring the whole
    /// group transform chain.
    pub fn at_shape(&self, world: &World, shape: ShapeId, world_point: Point) -> Color {
        self.at_object(world.world_to_object(shape, world_point))
    }
}
