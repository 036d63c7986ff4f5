//! Ray-shape intersections and the precomputed shading state.

use glimmer_math::{Point, Ray, Vector, EPSILON};

use crate::shape::ShapeId;
use crate::world::World;

/// A single ray-shape crossing, tagged with the shape it belongs to.
/// `uv` carries barycentric coordinates for smooth triangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub t: f64,
    pub shape: ShapeId,
    pub uv: Option<(f64, f64)>,
}

impl Intersection {
    pub fn new(t: f64, shape: ShapeId) -> Self {
        Self { t, shape, uv: None }
    }

    pub fn with_uv(t: f64, shape: ShapeId, u: f64, v: f64) -> Self {
        Self {
            t,
            shape,
            uv: Some((u, v)),
        }
    }
}

/// The visible intersection: lowest non-negative `t`, if any.
pub fn hit(xs: &[Intersection]) -> Option<Intersection> {
    xs.iter()
        .filter(|i| i.t >= 0.0)
        .min_by(|a, b| a.t.total_cmp(&b.t))
        .copied()
}

/// Shading state derived from a hit, ready for the Phong and
/// reflection/refraction passes.
#[derive(Debug, Clone, Copy)]
pub struct Comps {
    pub t: f64,
    pub shape: ShapeId,
    pub point: Point,
    /// Hit point nudged along the normal, for shadow and reflection rays.
    pub over_point: Point,
    /// Hit point nudged against the normal, for refraction rays.
    pub under_point: Point,
    pub eyev: Vector,
    pub normalv: Vector,
    pub reflectv: Vector,
    pub inside: bool,
    /// Refractive index of the medium the ray is leaving.
    pub n1: f64,
    /// Refractive index of the medium the ray is entering.
    pub n2: f64,
}

/// Derive the shading state for `hit`. The full sorted intersection
/// list is needed to work out which media the ray passes between.
pub fn prepare_computations(
    world: &World,
    hit: Intersection,
    ray: &Ray,
    xs: &[Intersection],
) -> Comps {
    let point = ray.position(hit.t);
    let eyev = -ray.direction;
    let mut normalv = world.normal_at(hit.shape, point, hit);
    let inside = normalv.dot(eyev) < 0.0;
    if inside {
        normalv = -normalv;
    }
    let reflectv = ray.direction.reflect(normalv);
    let (n1, n2) = refractive_pair(world, hit, xs);

    Comps {
        t: hit.t,
        shape: hit.shape,
        point,
        over_point: point + normalv * EPSILON,
        under_point: point - normalv * EPSILON,
        eyev,
        normalv,
        reflectv,
        inside,
        n1,
        n2,
    }
}

/// Walk the sorted intersections up to `hit`, tracking which shapes the
/// ray is currently inside of, to find the indices either side of the
/// boundary being crossed.
fn refractive_pair(world: &World, hit: Intersection, xs: &[Intersection]) -> (f64, f64) {
    let mut n1 = 1.0;
    let mut n2 = 1.0;
    let mut containers: Vec<ShapeId> = Vec::new();

    for &i in xs {
        let at_hit = i == hit;
        if at_hit {
            n1 = containers
                .last()
                .map_or(1.0, |&id| world[id].material.refractive_index);
        }
        if let Some(pos) = containers.iter().position(|&id| id == i.shape) {
            containers.remove(pos);
        } else {
            containers.push(i.shape);
        }
        if at_hit {
            n2 = containers
                .last()
                .map_or(1.0, |&id| world[id].material.refractive_index);
            break;
        }
    }

    (n1, n2)
}

/// Schlick approximation to the Fresnel reflectance at the hit.
pub fn schlick(comps: &Comps) -> f64 {
    let mut cos = comps.eyev.dot(comps.normalv);

    if comps.n1 > comps.n2 {
        let n = comps.n1 / comps.n2;
        let sin2_t = n * n * (1.0 - cos * cos);
        if sin2_t > 1.0 {
            return 1.0;
        }
        cos = (1.0 - sin2_t).sqrt();
    }

    let r0 = ((comps.n1 - comps.n2) / (comps.n1 + comps.n2)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cos).powi(5)
}
