//! Pinhole camera and the parallel render loop.
//!
//! Rendering is deterministic for a fixed seed: every canvas row gets
//! its own `StdRng` seeded from the camera seed plus the row index, so
//! rows can be traced on any thread in any order without changing the
//! image.

use glimmer_math::{view_transform, DMat4, Mat4Ext, Point, Ray, Transform, Vector};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::canvas::Canvas;
use crate::sampler::Sampler;
use crate::world::World;

#[derive(Debug, Clone)]
pub struct Camera {
    hsize: u32,
    vsize: u32,
    field_of_view: f64,
    transform: Transform,
    seed: u64,
    pixel_size: f64,
    half_width: f64,
    half_height: f64,
}

impl Camera {
    pub fn new(hsize: u32, vsize: u32, field_of_view: f64) -> Self {
        let half_view = (field_of_view / 2.0).tan();
        let aspect = hsize as f64 / vsize as f64;
        let (half_width, half_height) = if aspect >= 1.0 {
            (half_view, half_view / aspect)
        } else {
            (half_view * aspect, half_view)
        };
        Self {
            hsize,
            vsize,
            field_of_view,
            transform: Transform::IDENTITY,
            seed: 0,
            pixel_size: half_width * 2.0 / hsize as f64,
            half_width,
            half_height,
        }
    }

    pub fn with_transform(mut self, matrix: DMat4) -> Self {
        self.set_transform(matrix);
        self
    }

    /// Convenience for the common look-at construction.
    pub fn looking(mut self, from: Point, to: Point, up: Vector) -> Self {
        self.set_transform(view_transform(from, to, up));
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn set_transform(&mut self, matrix: DMat4) {
        self.transform = Transform::new(matrix);
    }

    pub fn hsize(&self) -> u32 {
        self.hsize
    }

    pub fn vsize(&self) -> u32 {
        self.vsize
    }

    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    /// Ray through the center of pixel `(px, py)`.
    pub fn ray_for_pixel(&self, px: u32, py: u32) -> Ray {
        self.ray_through(px as f64 + 0.5, py as f64 + 0.5)
    }

    /// Ray through an arbitrary canvas position, in pixel units. Used
    /// by samplers that place rays off pixel centers.
    pub fn ray_through(&self, px: f64, py: f64) -> Ray {
        let world_x = self.half_width - px * self.pixel_size;
        let world_y = self.half_height - py * self.pixel_size;

        let inverse = self.transform.inverse();
        let pixel = inverse.transform_point(Point::new(world_x, world_y, -1.0));
        let origin = inverse.transform_point(Point::ORIGIN);
        let direction = (pixel - origin).normalize();
        Ray::new(origin, direction)
    }

    /// Trace every pixel through `sampler`, one canvas row per rayon
    /// task.
    pub fn render(&self, world: &World, sampler: &dyn Sampler) -> Canvas {
        log::info!(
            "rendering {}x{} ({} threads)",
            self.hsize,
            self.vsize,
            rayon::current_num_threads()
        );

        let mut canvas = Canvas::new(self.hsize, self.vsize);
        let width = self.hsize as usize;
        canvas
            .pixels
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(y as u64));
                for (x, pixel) in row.iter_mut().enumerate() {
                    *pixel = sampler.sample_pixel(self, world, x as u32, y as u32, &mut rng);
                }
            });

        let stats = world.stats.snapshot();
        log::debug!(
            "rays: {} primary, {} secondary, {} shadow; {} intersection tests",
            stats.primary_rays,
            stats.secondary_rays,
            stats.shadow_rays,
            stats.intersection_tests
        );
        canvas
    }
}
