//! Pixel sampling strategies layered over the camera.
//!
//! The render loop hands each pixel to a sampler, which decides how
//! many rays to fire and where. All randomness comes through the
//! per-row rng, keeping renders reproducible for a fixed camera seed.

use glimmer_math::{Color, Mat4Ext, Point, Ray};
use rand::RngCore;

use crate::camera::Camera;
use crate::gen_f64;
use crate::world::World;

pub trait Sampler: Send + Sync {
    fn sample_pixel(
        &self,
        camera: &Camera,
        world: &World,
        x: u32,
        y: u32,
        rng: &mut dyn RngCore,
    ) -> Color;
}

/// One ray through the pixel center. The fastest option and the
/// reference the fancier samplers are tested against.
#[derive(Debug, Clone, Copy, Default)]
pub struct PixelCenter;

impl Sampler for PixelCenter {
    fn sample_pixel(
        &self,
        camera: &Camera,
        world: &World,
        x: u32,
        y: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        world.color_for(&camera.ray_for_pixel(x, y), rng)
    }
}

/// Adaptive stratified supersampling: one jittered ray per grid cell,
/// stopping early once the running mean settles.
#[derive(Debug, Clone)]
pub struct SuperSample {
    grid: u32,
}

impl SuperSample {
    const MIN_SAMPLES: u32 = 4;
    const CONVERGENCE: f64 = 1e-3;

    pub fn new(grid: u32) -> Self {
        assert!(grid >= 1, "sampling grid must be at least 1x1");
        Self { grid }
    }
}

impl Sampler for SuperSample {
    fn sample_pixel(
        &self,
        camera: &Camera,
        world: &World,
        x: u32,
        y: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        let cell = 1.0 / self.grid as f64;
        let mut sum = Color::BLACK;
        let mut count = 0u32;
        let mut mean = Color::BLACK;
        for sv in 0..self.grid {
            for su in 0..self.grid {
                let dx = (su as f64 + gen_f64(rng)) * cell;
                let dy = (sv as f64 + gen_f64(rng)) * cell;
                let ray = camera.ray_through(x as f64 + dx, y as f64 + dy);
                sum += world.color_for(&ray, rng);
                count += 1;
                let next = sum / count as f64;
                if count >= Self::MIN_SAMPLES && next.abs_diff_eq(mean, Self::CONVERGENCE) {
                    return next;
                }
                mean = next;
            }
        }
        mean
    }
}

/// Fixed-count antialiasing: `samples` rays jittered across the whole
/// pixel, averaged.
#[derive(Debug, Clone)]
pub struct Antialias {
    samples: u32,
}

impl Antialias {
    pub fn new(samples: u32) -> Self {
        assert!(samples >= 1, "need at least one sample per pixel");
        Self { samples }
    }
}

impl Sampler for Antialias {
    fn sample_pixel(
        &self,
        camera: &Camera,
        world: &World,
        x: u32,
        y: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        let mut sum = Color::BLACK;
        for _ in 0..self.samples {
            let ray = camera.ray_through(x as f64 + gen_f64(rng), y as f64 + gen_f64(rng));
            sum += world.color_for(&ray, rng);
        }
        sum / self.samples as f64
    }
}

/// Depth of field: rays originate on an aperture disk around the eye
/// and converge on the focal plane, blurring anything off it.
#[derive(Debug, Clone)]
pub struct FocalBlur {
    samples: u32,
    aperture: f64,
    focal_distance: f64,
}

impl FocalBlur {
    pub fn new(samples: u32, aperture: f64, focal_distance: f64) -> Self {
        assert!(samples >= 1, "need at least one sample per pixel");
        assert!(aperture > 0.0, "aperture must be positive");
        assert!(focal_distance > 0.0, "focal distance must be positive");
        Self {
            samples,
            aperture,
            focal_distance,
        }
    }
}

impl Sampler for FocalBlur {
    fn sample_pixel(
        &self,
        camera: &Camera,
        world: &World,
        x: u32,
        y: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        let canonical = camera.ray_for_pixel(x, y);
        let focal_point = canonical.position(self.focal_distance);
        let inverse = camera.transform().inverse();

        let mut sum = Color::BLACK;
        for _ in 0..self.samples {
            let (dx, dy) = random_in_unit_disk(rng);
            let origin =
                inverse.transform_point(Point::new(dx * self.aperture, dy * self.aperture, 0.0));
            let direction = (focal_point - origin).normalize();
            sum += world.color_for(&Ray::new(origin, direction), rng);
        }
        sum / self.samples as f64
    }
}

fn random_in_unit_disk(rng: &mut dyn RngCore) -> (f64, f64) {
    loop {
        let x = gen_f64(rng) * 2.0 - 1.0;
        let y = gen_f64(rng) * 2.0 - 1.0;
        if x * x + y * y < 1.0 {
            return (x, y);
        }
    }
}

/// Trace every `stride`th pixel and leave the rest black, for quick
/// scene-framing passes.
#[derive(Debug, Clone)]
pub struct SteppedPreview {
    stride: u32,
}

impl SteppedPreview {
    pub fn new(stride: u32) -> Self {
        assert!(stride >= 1, "stride must be at least 1");
        Self { stride }
    }
}

impl Sampler for SteppedPreview {
    fn sample_pixel(
        &self,
        camera: &Camera,
        world: &World,
        x: u32,
        y: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        if x % self.stride != 0 || y % self.stride != 0 {
            return Color::BLACK;
        }
        world.color_for(&camera.ray_for_pixel(x, y), rng)
    }
}
