//! Rays parameterized as origin + t * direction.

use glam::DMat4;

use crate::{Mat4Ext, Point, Vector};

/// A ray in whatever space its caller is working in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point,
    pub direction: Vector,
}

impl Ray {
    pub fn new(origin: Point, direction: Vector) -> Self {
        Self { origin, direction }
    }

    /// The point at parameter `t` along the ray.
    #[inline]
    pub fn position(&self, t: f64) -> Point {
        self.origin + self.direction * t
    }

    /// Apply `matrix` to origin and direction. The direction is left
    /// unnormalized so that t keeps its meaning across spaces.
    #[inline]
    pub fn transform(&self, matrix: &DMat4) -> Ray {
        Ray {
            origin: matrix.transform_point(self.origin),
            direction: matrix.transform_vector(self.direction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{scaling, translation};

    #[test]
    fn test_ray_stores_origin_and_direction() {
        let r = Ray::new(Point::new(1.0, 2.0, 3.0), Vector::new(4.0, 5.0, 6.0));
        assert_eq!(r.origin, Point::new(1.0, 2.0, 3.0));
        assert_eq!(r.direction, Vector::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_position_walks_along_the_ray() {
        let r = Ray::new(Point::new(2.0, 3.0, 4.0), Vector::new(1.0, 0.0, 0.0));
        assert_eq!(r.position(0.0), Point::new(2.0, 3.0, 4.0));
        assert_eq!(r.position(1.0), Point::new(3.0, 3.0, 4.0));
        assert_eq!(r.position(-1.0), Point::new(1.0, 3.0, 4.0));
        assert_eq!(r.position(2.5), Point::new(4.5, 3.0, 4.0));
    }

    #[test]
    fn test_translating_a_ray_moves_only_the_origin() {
        let r = Ray::new(Point::new(1.0, 2.0, 3.0), Vector::new(0.0, 1.0, 0.0));
        let r2 = r.transform(&translation(3.0, 4.0, 5.0));
        assert_eq!(r2.origin, Point::new(4.0, 6.0, 8.0));
        assert_eq!(r2.direction, Vector::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_scaling_a_ray_leaves_direction_unnormalized() {
        let r = Ray::new(Point::new(1.0, 2.0, 3.0), Vector::new(0.0, 1.0, 0.0));
        let r2 = r.transform(&scaling(2.0, 3.0, 4.0));
        assert_eq!(r2.origin, Point::new(2.0, 6.0, 12.0));
        assert_eq!(r2.direction, Vector::new(0.0, 3.0, 0.0));
    }
}
