//! Radius-1 cylinder around the y axis, optionally truncated and capped.

use glimmer_math::{BoundingBox, Point, Ray, Vector, EPSILON};

use crate::shape::LocalHit;

pub(crate) fn local_intersect(ray: &Ray, minimum: f64, maximum: f64, closed: bool) -> Vec<LocalHit> {
    let mut xs = Vec::new();

    let a = ray.direction.x().powi(2) + ray.direction.z().powi(2);
    // a ~ 0 means the ray runs parallel to the y axis: walls are missed
    // but the caps may still be hit.
    if a.abs() >= EPSILON {
        let b = 2.0 * ray.origin.x() * ray.direction.x() + 2.0 * ray.origin.z() * ray.direction.z();
        let c = ray.origin.x().powi(2) + ray.origin.z().powi(2) - 1.0;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant >= 0.0 {
            let root = discriminant.sqrt();
            let mut t0 = (-b - root) / (2.0 * a);
            let mut t1 = (-b + root) / (2.0 * a);
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            for t in [t0, t1] {
                let y = ray.origin.y() + t * ray.direction.y();
                if minimum < y && y < maximum {
                    xs.push(LocalHit::new(t));
                }
            }
        }
    }

    intersect_caps(ray, minimum, maximum, closed, &mut xs);
    xs
}

/// Whether the ray at `t` lands within `radius` of the y axis.
fn check_cap(ray: &Ray, t: f64, radius: f64) -> bool {
    let x = ray.origin.x() + t * ray.direction.x();
    let z = ray.origin.z() + t * ray.direction.z();
    x * x + z * z <= radius * radius
}

fn intersect_caps(ray: &Ray, minimum: f64, maximum: f64, closed: bool, xs: &mut Vec<LocalHit>) {
    if !closed || ray.direction.y().abs() < EPSILON {
        return;
    }
    let t = (minimum - ray.origin.y()) / ray.direction.y();
    if check_cap(ray, t, 1.0) {
        xs.push(LocalHit::new(t));
    }
    let t = (maximum - ray.origin.y()) / ray.direction.y();
    if check_cap(ray, t, 1.0) {
        xs.push(LocalHit::new(t));
    }
}

pub(crate) fn local_normal_at(point: Point, minimum: f64, maximum: f64) -> Vector {
    let dist = point.x().powi(2) + point.z().powi(2);
    if dist < 1.0 && point.y() >= maximum - EPSILON {
        Vector::new(0.0, 1.0, 0.0)
    } else if dist < 1.0 && point.y() <= minimum + EPSILON {
        Vector::new(0.0, -1.0, 0.0)
    } else {
        Vector::new(point.x(), 0.0, point.z())
    }
}

pub(crate) fn bounds(minimum: f64, maximum: f64) -> BoundingBox {
    BoundingBox::new(Point::new(-1.0, minimum, -1.0), Point::new(1.0, maximum, 1.0))
}
