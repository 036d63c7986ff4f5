//! Double-napped cone with its apex at the origin, optionally truncated
//! and capped. The cap radius grows with |y|.

use glimmer_math::{BoundingBox, Point, Ray, Vector, EPSILON};

use crate::shape::LocalHit;

pub(crate) fn local_intersect(ray: &Ray, minimum: f64, maximum: f64, closed: bool) -> Vec<LocalHit> {
    let mut xs = Vec::new();

    let (dx, dy, dz) = (ray.direction.x(), ray.direction.y(), ray.direction.z());
    let (ox, oy, oz) = (ray.origin.x(), ray.origin.y(), ray.origin.z());

    let a = dx * dx - dy * dy + dz * dz;
    let b = 2.0 * (ox * dx - oy * dy + oz * dz);
    let c = ox * ox - oy * oy + oz * oz;

    if a.abs() < EPSILON {
        // Parallel to one of the cone's halves: at most one wall hit.
        if b.abs() >= EPSILON {
            push_wall_hit(-c / (2.0 * b), ray, minimum, maximum, &mut xs);
        }
    } else {
        let discriminant = b * b - 4.0 * a * c;
        if discriminant >= 0.0 {
            let root = discriminant.sqrt();
            let mut t0 = (-b - root) / (2.0 * a);
            let mut t1 = (-b + root) / (2.0 * a);
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            push_wall_hit(t0, ray, minimum, maximum, &mut xs);
            push_wall_hit(t1, ray, minimum, maximum, &mut xs);
        }
    }

    intersect_caps(ray, minimum, maximum, closed, &mut xs);
    xs
}

fn push_wall_hit(t: f64, ray: &Ray, minimum: f64, maximum: f64, xs: &mut Vec<LocalHit>) {
    let y = ray.origin.y() + t * ray.direction.y();
    if minimum < y && y < maximum {
        xs.push(LocalHit::new(t));
    }
}

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
    if check_cap(ray, t, minimum.abs()) {
        xs.push(LocalHit::new(t));
    }
    let t = (maximum - ray.origin.y()) / ray.direction.y();
    if check_cap(ray, t, maximum.abs()) {
        xs.push(LocalHit::new(t));
    }
}

pub(crate) fn local_normal_at(point: Point, minimum: f64, maximum: f64) -> Vector {
    let dist = point.x().powi(2) + point.z().powi(2);
    if dist < maximum * maximum && point.y() >= maximum - EPSILON {
        Vector::new(0.0, 1.0, 0.0)
    } else if dist < minimum * minimum && point.y() <= minimum + EPSILON {
        Vector::new(0.0, -1.0, 0.0)
    } else {
        let mut y = dist.sqrt();
        if point.y() > 0.0 {
            y = -y;
        }
        Vector::new(point.x(), y, point.z())
    }
}

pub(crate) fn bounds(minimum: f64, maximum: f64) -> BoundingBox {
    let limit = minimum.abs().max(maximum.abs());
    BoundingBox::new(
        Point::new(-limit, minimum, -limit),
        Point::new(limit, maximum, limit),
    )
}
