//! Phong materials with pattern, specular map, and bump map hooks.

use glimmer_math::{Color, Point, Vector};
use rand::RngCore;

use crate::light::Light;
use crate::pattern::Pattern;
use crate::shape::ShapeId;
use crate::world::World;

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: Color,
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,
    pub reflective: f64,
    pub transparency: f64,
    pub refractive_index: f64,
    /// Overrides `color` when set.
    pub pattern: Option<Pattern>,
    /// Per-point specular strength; overrides `specular` when set.
    pub specular_map: Option<Pattern>,
    /// Normal perturbation sampled in object space.
    pub bump_map: Option<Pattern>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,
            reflective: 0.0,
            transparency: 0.0,
            refractive_index: 1.0,
            pattern: None,
            specular_map: None,
            bump_map: None,
        }
    }
}

impl Material {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_ambient(mut self, ambient: f64) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_diffuse(mut self, diffuse: f64) -> Self {
        self.diffuse = diffuse;
        self
    }

    pub fn with_specular(mut self, specular: f64) -> Self {
        self.specular = specular;
        self
    }

    pub fn with_shininess(mut self, shininess: f64) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_reflective(mut self, reflective: f64) -> Self {
        self.reflective = reflective;
        self
    }

    pub fn with_transparency(mut self, transparency: f64) -> Self {
        self.transparency = transparency;
        self
    }

    pub fn with_refractive_index(mut self, refractive_index: f64) -> Self {
        self.refractive_index = refractive_index;
        self
    }

    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn with_specular_map(mut self, map: Pattern) -> Self {
        self.specular_map = Some(map);
        self
    }

    pub fn with_bump_map(mut self, map: Pattern) -> Self {
        self.bump_map = Some(map);
        self
    }

    /// Phong shading at a surface point. `intensity` is the fraction of
    /// the light that reaches the point (from the shadow samples); the
    /// diffuse and specular terms are averaged over the light's samples
    /// and scaled by it. Ambient always applies.
    #[allow(clippy::too_many_arguments)]
    pub fn lighting(
        &self,
        world: &World,
        shape: ShapeId,
        light: &Light,
        point: Point,
        eyev: Vector,
        normalv: Vector,
        intensity: f64,
        rng: &mut dyn RngCore,
    ) -> Color {
        let base = match &self.pattern {
            Some(pattern) => pattern.at_shape(world, shape, point),
            None => self.color,
        };
        let effective_color = base * light.intensity();
        let ambient = effective_color * self.ambient;
        if intensity == 0.0 {
            return ambient;
        }

        let specular_base = match &self.specular_map {
            Some(map) => light.intensity() * map.at_shape(world, shape, point),
            None => light.intensity() * self.specular,
        };

        let mut sum = Color::BLACK;
        for sample in light.samples(rng) {
            let lightv = (sample - point).normalize();
            let light_dot_normal = lightv.dot(normalv);
            if light_dot_normal >= 0.0 {
                sum += effective_color * self.diffuse * light_dot_normal;
                let reflect_dot_eye = (-lightv).reflect(normalv).dot(eyev);
                if reflect_dot_eye > 0.0 {
                    sum += specular_base * reflect_dot_eye.powf(self.shininess);
                }
            }
        }

        ambient + sum / light.sample_count() as f64 * intensity
    }
}
