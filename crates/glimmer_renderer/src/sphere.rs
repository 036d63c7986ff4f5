//! Unit sphere centered at the origin.

use glimmer_math::{BoundingBox, Point, Ray, Vector};

use crate::shape::LocalHit;

pub(crate) fn local_intersect(ray: &Ray) -> Vec<LocalHit> {
    let sphere_to_ray = ray.origin - Point::ORIGIN;
    let a = ray.direction.dot(ray.direction);
    let b = 2.0 * ray.direction.dot(sphere_to_ray);
    let c = sphere_to_ray.dot(sphere_to_ray) - 1.0;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return Vec::new();
    }
    let root = discriminant.sqrt();
    vec![
        LocalHit::new((-b - root) / (2.0 * a)),
        LocalHit::new((-b + root) / (2.0 * a)),
    ]
}

pub(crate) fn local_normal_at(point: Point) -> Vector {
    point - Point::ORIGIN
}

pub(crate) fn bounds() -> BoundingBox {
    BoundingBox::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0))
}
