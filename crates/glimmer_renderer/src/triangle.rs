//! Flat and smooth (normal-interpolating) triangles.

use glimmer_math::{BoundingBox, Point, Ray, Vector, EPSILON};

use crate::shape::LocalHit;

/// Triangle with edges and face normal precomputed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
    pub e1: Vector,
    pub e2: Vector,
    pub normal: Vector,
}

impl Triangle {
    pub fn new(p1: Point, p2: Point, p3: Point) -> Self {
        let e1 = p2 - p1;
        let e2 = p3 - p1;
        let normal = e2.cross(e1).normalize();
        Self {
            p1,
            p2,
            p3,
            e1,
            e2,
            normal,
        }
    }

    pub(crate) fn bounds(&self) -> BoundingBox {
        let mut b = BoundingBox::empty();
        b.add_point(self.p1);
        b.add_point(self.p2);
        b.add_point(self.p3);
        b
    }
}

/// Triangle carrying per-vertex normals for interpolated shading.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothTriangle {
    pub tri: Triangle,
    pub n1: Vector,
    pub n2: Vector,
    pub n3: Vector,
}

impl SmoothTriangle {
    pub fn new(p1: Point, p2: Point, p3: Point, n1: Vector, n2: Vector, n3: Vector) -> Self {
        Self {
            tri: Triangle::new(p1, p2, p3),
            n1,
            n2,
            n3,
        }
    }
}

/// Moller-Trumbore: returns (t, u, v), or None when the ray is parallel
/// to the plane or the barycentric coordinates fall outside the triangle.
fn intersect_barycentric(tri: &Triangle, ray: &Ray) -> Option<(f64, f64, f64)> {
    let dir_cross_e2 = ray.direction.cross(tri.e2);
    let det = tri.e1.dot(dir_cross_e2);
    if det.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / det;
    let p1_to_origin = ray.origin - tri.p1;
    let u = f * p1_to_origin.dot(dir_cross_e2);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let origin_cross_e1 = p1_to_origin.cross(tri.e1);
    let v = f * ray.direction.dot(origin_cross_e1);
    if v < 0.0 || (u + v) > 1.0 {
        return None;
    }

    let t = f * tri.e2.dot(origin_cross_e1);
    Some((t, u, v))
}

pub(crate) fn local_intersect(tri: &Triangle, ray: &Ray) -> Vec<LocalHit> {
    match intersect_barycentric(tri, ray) {
        Some((t, _, _)) => vec![LocalHit::new(t)],
        None => Vec::new(),
    }
}

pub(crate) fn local_intersect_smooth(tri: &SmoothTriangle, ray: &Ray) -> Vec<LocalHit> {
    match intersect_barycentric(&tri.tri, ray) {
        Some((t, u, v)) => vec![LocalHit::with_uv(t, u, v)],
        None => Vec::new(),
    }
}

pub(crate) fn local_normal_at(tri: &Triangle) -> Vector {
    tri.normal
}

pub(crate) fn local_normal_at_smooth(tri: &SmoothTriangle, uv: Option<(f64, f64)>) -> Vector {
    match uv {
        Some((u, v)) => tri.n2 * u + tri.n3 * v + tri.n1 * (1.0 - u - v),
        None => tri.tri.normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_triangle() -> Triangle {
        Triangle::new(
            Point::new(0.0, 1.0, 0.0),
            Point::new(-1.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
        )
    }

    fn default_smooth_triangle() -> SmoothTriangle {
        SmoothTriangle::new(
            Point::new(0.0, 1.0, 0.0),
            Point::new(-1.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Vector::new(0.0, 1.0, 0.0),
            Vector::new(-1.0, 0.0, 0.0),
            Vector::new(1.0, 0.0, 0.0),
        )
    }

    #[test]
    fn test_construction_precomputes_edges_and_normal() {
        let t = default_triangle();
        assert_eq!(t.e1, Vector::new(-1.0, -1.0, 0.0));
        assert_eq!(t.e2, Vector::new(1.0, -1.0, 0.0));
        assert_eq!(t.normal, Vector::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_normal_is_the_face_normal_everywhere() {
        let t = default_triangle();
        assert_eq!(local_normal_at(&t), t.normal);
    }

    #[test]
    fn test_parallel_ray_misses() {
        let t = default_triangle();
        let r = Ray::new(Point::new(0.0, -1.0, -2.0), Vector::new(0.0, 1.0, 0.0));
        assert!(local_intersect(&t, &r).is_empty());
    }

    #[test]
    fn test_ray_misses_each_edge() {
        let t = default_triangle();
        let beyond_p1_p3 = Ray::new(Point::new(1.0, 1.0, -2.0), Vector::new(0.0, 0.0, 1.0));
        assert!(local_intersect(&t, &beyond_p1_p3).is_empty());
        let beyond_p1_p2 = Ray::new(Point::new(-1.0, 1.0, -2.0), Vector::new(0.0, 0.0, 1.0));
        assert!(local_intersect(&t, &beyond_p1_p2).is_empty());
        let beyond_p2_p3 = Ray::new(Point::new(0.0, -1.0, -2.0), Vector::new(0.0, 0.0, 1.0));
        assert!(local_intersect(&t, &beyond_p2_p3).is_empty());
    }

    #[test]
    fn test_ray_strikes_the_interior() {
        let t = default_triangle();
        let r = Ray::new(Point::new(0.0, 0.5, -2.0), Vector::new(0.0, 0.0, 1.0));
        let xs = local_intersect(&t, &r);
        assert_eq!(xs.len(), 1);
        assert_eq!(xs[0].t, 2.0);
        assert_eq!(xs[0].uv, None);
    }

    #[test]
    fn test_bounds_wrap_the_vertices() {
        let t = Triangle::new(
            Point::new(-3.0, 7.0, 2.0),
            Point::new(6.0, 2.0, -4.0),
            Point::new(2.0, -1.0, -1.0),
        );
        let b = t.bounds();
        assert_eq!(b.min, Point::new(-3.0, -1.0, -4.0));
        assert_eq!(b.max, Point::new(6.0, 7.0, 2.0));
    }

    #[test]
    fn test_smooth_intersection_records_uv() {
        let t = default_smooth_triangle();
        let r = Ray::new(Point::new(-0.2, 0.3, -2.0), Vector::new(0.0, 0.0, 1.0));
        let xs = local_intersect_smooth(&t, &r);
        assert_eq!(xs.len(), 1);
        let (u, v) = xs[0].uv.unwrap();
        assert!((u - 0.45).abs() < 1e-9);
        assert!((v - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_smooth_normal_interpolates_vertex_normals() {
        let t = default_smooth_triangle();
        let n = local_normal_at_smooth(&t, Some((0.45, 0.25)));
        assert!(n.approx_eq(Vector::new(-0.2, 0.3, 0.0)));
        assert!(n.normalize().approx_eq(Vector::new(-0.5547, 0.83205, 0.0)));
    }

    #[test]
    fn test_smooth_normal_without_uv_falls_back_to_face() {
        let t = default_smooth_triangle();
        assert_eq!(local_normal_at_smooth(&t, None), t.tri.normal);
    }
}
