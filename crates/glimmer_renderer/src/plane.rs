//! The y = 0 plane, infinite in x and z.

use glimmer_math::{BoundingBox, Point, Ray, Vector, EPSILON};

use crate::shape::LocalHit;

pub(crate) fn local_intersect(ray: &Ray) -> Vec<LocalHit> {
    // Parallel rays, including coplanar ones, miss.
    if ray.direction.y().abs() < EPSILON {
        return Vec::new();
    }
    vec![LocalHit::new(-ray.origin.y() / ray.direction.y())]
}

pub(crate) fn local_normal_at(_point: Point) -> Vector {
    Vector::new(0.0, 1.0, 0.0)
}

pub(crate) fn bounds() -> BoundingBox {
    BoundingBox::new(
        Point::new(f64::NEG_INFINITY, 0.0, f64::NEG_INFINITY),
        Point::new(f64::INFINITY, 0.0, f64::INFINITY),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_is_constant() {
        let up = Vector::new(0.0, 1.0, 0.0);
        assert_eq!(local_normal_at(Point::ORIGIN), up);
        assert_eq!(local_normal_at(Point::new(10.0, 0.0, -10.0)), up);
        assert_eq!(local_normal_at(Point::new(-5.0, 0.0, 150.0)), up);
    }

    #[test]
    fn test_parallel_ray_misses() {
        let r = Ray::new(Point::new(0.0, 10.0, 0.0), Vector::new(0.0, 0.0, 1.0));
        assert!(local_intersect(&r).is_empty());
    }

    #[test]
    fn test_coplanar_ray_misses() {
        let r = Ray::new(Point::ORIGIN, Vector::new(0.0, 0.0, 1.0));
        assert!(local_intersect(&r).is_empty());
    }

    #[test]
    fn test_ray_from_above() {
        let r = Ray::new(Point::new(0.0, 1.0, 0.0), Vector::new(0.0, -1.0, 0.0));
        let xs = local_intersect(&r);
        assert_eq!(xs.len(), 1);
        assert_eq!(xs[0].t, 1.0);
    }

    #[test]
    fn test_ray_from_below() {
        let r = Ray::new(Point::new(0.0, -1.0, 0.0), Vector::new(0.0, 1.0, 0.0));
        let xs = local_intersect(&r);
        assert_eq!(xs.len(), 1);
        assert_eq!(xs[0].t, 1.0);
    }

    #[test]
    fn test_bounds_are_infinite_in_x_and_z() {
        let b = bounds();
        assert_eq!(b.min.x(), f64::NEG_INFINITY);
        assert_eq!(b.max.z(), f64::INFINITY);
        assert_eq!(b.min.y(), 0.0);
        assert_eq!(b.max.y(), 0.0);
    }
}
