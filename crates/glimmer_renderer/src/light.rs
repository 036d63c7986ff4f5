//! Light sources: point lights and jittered-grid area lights.

use glimmer_math::{Color, Point, Vector};
use rand::RngCore;

use crate::gen_f64;
use crate::world::World;

#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    pub position: Point,
    pub intensity: Color,
}

/// Rectangular light split into a `usteps` x `vsteps` grid. One shadow
/// sample is drawn from each cell, jittered within it.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaLight {
    pub corner: Point,
    /// One cell along the u edge (full edge divided by `usteps`).
    pub uvec: Vector,
    pub vvec: Vector,
    pub usteps: u32,
    pub vsteps: u32,
    pub intensity: Color,
    /// Geometric center, used as the light direction for shading.
    pub position: Point,
}

impl AreaLight {
    fn point_on(&self, u: u32, v: u32, rng: &mut dyn RngCore) -> Point {
        let u_offset = u as f64 + gen_f64(rng);
        let v_offset = v as f64 + gen_f64(rng);
        self.corner + self.uvec * u_offset + self.vvec * v_offset
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    Point(PointLight),
    Area(AreaLight),
}

impl Light {
    pub fn point_light(position: Point, intensity: Color) -> Self {
        Self::Point(PointLight { position, intensity })
    }

    /// Build an area light from its corner and two full edge vectors.
    ///
    /// # Panics
    ///
    /// Panics if either step count is zero.
    pub fn area_light(
        corner: Point,
        full_uvec: Vector,
        usteps: u32,
        full_vvec: Vector,
        vsteps: u32,
        intensity: Color,
    ) -> Self {
        assert!(
            usteps >= 1 && vsteps >= 1,
            "area light needs at least one sample per axis"
        );
        let position = corner + full_uvec * 0.5 + full_vvec * 0.5;
        Self::Area(AreaLight {
            corner,
            uvec: full_uvec / usteps as f64,
            vvec: full_vvec / vsteps as f64,
            usteps,
            vsteps,
            intensity,
            position,
        })
    }

    pub fn intensity(&self) -> Color {
        match self {
            Self::Point(l) => l.intensity,
            Self::Area(l) => l.intensity,
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Self::Point(l) => l.position,
            Self::Area(l) => l.position,
        }
    }

    pub fn sample_count(&self) -> u32 {
        match self {
            Self::Point(_) => 1,
            Self::Area(l) => l.usteps * l.vsteps,
        }
    }

    /// Iterate the shadow-test sample points for this light. Area light
    /// samples are re-jittered on every pass.
    pub fn samples<'a>(&'a self, rng: &'a mut dyn RngCore) -> LightSamples<'a> {
        LightSamples {
            light: self,
            rng,
            index: 0,
        }
    }

    /// Fraction of this light's samples with an unobstructed path to
    /// `point`, in `0.0..=1.0`.
    pub fn intensity_at(&self, world: &World, point: Point, rng: &mut dyn RngCore) -> f64 {
        match self {
            Self::Point(l) => {
                if world.is_shadowed(l.position, point) {
                    0.0
                } else {
                    1.0
                }
            }
            Self::Area(_) => {
                let total = self.sample_count();
                let mut lit = 0u32;
                for sample in self.samples(rng) {
                    if !world.is_shadowed(sample, point) {
                        lit += 1;
                    }
                }
                lit as f64 / total as f64
            }
        }
    }
}

pub struct LightSamples<'a> {
    light: &'a Light,
    rng: &'a mut dyn RngCore,
    index: u32,
}

impl Iterator for LightSamples<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        match self.light {
            Light::Point(l) => {
                if self.index >= 1 {
                    return None;
                }
                self.index += 1;
                Some(l.position)
            }
            Light::Area(l) => {
                if self.index >= l.usteps * l.vsteps {
                    return None;
                }
                let u = self.index % l.usteps;
                let v = self.index / l.usteps;
                self.index += 1;
                Some(l.point_on(u, v, self.rng))
            }
        }
    }
}
