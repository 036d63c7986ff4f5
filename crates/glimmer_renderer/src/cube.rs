//! Axis-aligned box. The default shape is the unit cube, but debug
//! proxies configure arbitrary min/max corners.

use glimmer_math::{check_axis, Point, Ray, Vector};

use crate::shape::LocalHit;

pub(crate) fn local_intersect(ray: &Ray, min: Point, max: Point) -> Vec<LocalHit> {
    let (xtmin, xtmax) = check_axis(ray.origin.x(), ray.direction.x(), min.x(), max.x());
    let (ytmin, ytmax) = check_axis(ray.origin.y(), ray.direction.y(), min.y(), max.y());
    let (ztmin, ztmax) = check_axis(ray.origin.z(), ray.direction.z(), min.z(), max.z());

    let tmin = xtmin.max(ytmin).max(ztmin);
    let tmax = xtmax.min(ytmax).min(ztmax);
    if tmin > tmax {
        return Vec::new();
    }
    vec![LocalHit::new(tmin), LocalHit::new(tmax)]
}

/// Face normal: the axis whose component is largest relative to the
/// box's extents, so elongated proxies still pick the correct face.
pub(crate) fn local_normal_at(point: Point, min: Point, max: Point) -> Vector {
    let center = min + (max - min) * 0.5;
    let half = (max - min) * 0.5;
    let sx = (point.x() - center.x()) / half.x();
    let sy = (point.y() - center.y()) / half.y();
    let sz = (point.z() - center.z()) / half.z();

    let maxc = sx.abs().max(sy.abs()).max(sz.abs());
    if maxc == sx.abs() {
        Vector::new(sx, 0.0, 0.0)
    } else if maxc == sy.abs() {
        Vector::new(0.0, sy, 0.0)
    } else {
        Vector::new(0.0, 0.0, sz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT_MIN: Point = Point::new(-1.0, -1.0, -1.0);
    const UNIT_MAX: Point = Point::new(1.0, 1.0, 1.0);

    #[test]
    fn test_rays_hit_every_face() {
        let cases = [
            (Point::new(5.0, 0.5, 0.0), Vector::new(-1.0, 0.0, 0.0), 4.0, 6.0),
            (Point::new(-5.0, 0.5, 0.0), Vector::new(1.0, 0.0, 0.0), 4.0, 6.0),
            (Point::new(0.5, 5.0, 0.0), Vector::new(0.0, -1.0, 0.0), 4.0, 6.0),
            (Point::new(0.5, -5.0, 0.0), Vector::new(0.0, 1.0, 0.0), 4.0, 6.0),
            (Point::new(0.5, 0.0, 5.0), Vector::new(0.0, 0.0, -1.0), 4.0, 6.0),
            (Point::new(0.5, 0.0, -5.0), Vector::new(0.0, 0.0, 1.0), 4.0, 6.0),
            (Point::new(0.0, 0.5, 0.0), Vector::new(0.0, 0.0, 1.0), -1.0, 1.0),
        ];
        for (origin, direction, t0, t1) in cases {
            let xs = local_intersect(&Ray::new(origin, direction), UNIT_MIN, UNIT_MAX);
            assert_eq!(xs.len(), 2, "origin {origin:?}");
            assert_eq!(xs[0].t, t0);
            assert_eq!(xs[1].t, t1);
        }
    }

    #[test]
    fn test_rays_miss() {
        let cases = [
            (Point::new(-2.0, 0.0, 0.0), Vector::new(0.2673, 0.5345, 0.8018)),
            (Point::new(0.0, -2.0, 0.0), Vector::new(0.8018, 0.2673, 0.5345)),
            (Point::new(0.0, 0.0, -2.0), Vector::new(0.5345, 0.8018, 0.2673)),
            (Point::new(2.0, 0.0, 2.0), Vector::new(0.0, 0.0, -1.0)),
            (Point::new(0.0, 2.0, 2.0), Vector::new(0.0, -1.0, 0.0)),
            (Point::new(2.0, 2.0, 0.0), Vector::new(-1.0, 0.0, 0.0)),
        ];
        for (origin, direction) in cases {
            let xs = local_intersect(&Ray::new(origin, direction), UNIT_MIN, UNIT_MAX);
            assert!(xs.is_empty(), "origin {origin:?}");
        }
    }

    #[test]
    fn test_normals_on_faces_and_corners() {
        let cases = [
            (Point::new(1.0, 0.5, -0.8), Vector::new(1.0, 0.0, 0.0)),
            (Point::new(-1.0, -0.2, 0.9), Vector::new(-1.0, 0.0, 0.0)),
            (Point::new(-0.4, 1.0, -0.1), Vector::new(0.0, 1.0, 0.0)),
            (Point::new(0.3, -1.0, -0.7), Vector::new(0.0, -1.0, 0.0)),
            (Point::new(-0.6, 0.3, 1.0), Vector::new(0.0, 0.0, 1.0)),
            (Point::new(0.4, 0.4, -1.0), Vector::new(0.0, 0.0, -1.0)),
            (Point::new(1.0, 1.0, 1.0), Vector::new(1.0, 0.0, 0.0)),
            (Point::new(-1.0, -1.0, -1.0), Vector::new(-1.0, 0.0, 0.0)),
        ];
        for (point, expected) in cases {
            let n = local_normal_at(point, UNIT_MIN, UNIT_MAX);
            assert_eq!(n, expected, "point {point:?}");
        }
    }

    #[test]
    fn test_elongated_box_picks_face_by_extent() {
        // |x| is largest in absolute terms, but the point sits on the
        // top face of this stretched box.
        let min = Point::new(0.0, 0.0, 0.0);
        let max = Point::new(4.0, 1.0, 1.0);
        let n = local_normal_at(Point::new(2.0, 1.0, 0.5), min, max);
        assert_eq!(n, Vector::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_custom_box_intersection() {
        let min = Point::new(0.0, 0.0, 0.0);
        let max = Point::new(4.0, 1.0, 1.0);
        let r = Ray::new(Point::new(2.0, 0.5, -5.0), Vector::new(0.0, 0.0, 1.0));
        let xs = local_intersect(&r, min, max);
        assert_eq!(xs.len(), 2);
        assert_eq!(xs[0].t, 5.0);
        assert_eq!(xs[1].t, 6.0);
    }
}
