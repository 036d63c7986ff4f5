//! Scene container and the recursive shading pipeline.
//!
//! Shapes live in a flat arena indexed by `ShapeId`; groups refer to
//! their children by id. Rays enter through `color_for`, which tracks
//! stats and kicks off the bounce-limited shade/reflect/refract
//! recursion.

use std::ops::{Index, IndexMut};

use glimmer_math::{Color, DMat4, Mat4Ext, Point, Ray, Vector};
use rand::RngCore;

use crate::intersection::{hit, prepare_computations, schlick, Comps, Intersection};
use crate::light::Light;
use crate::pattern::Pattern;
use crate::shape::{Geometry, RayKind, Shape, ShapeId};
use crate::stats::RenderStats;

/// Recursion limit shared by reflection and refraction.
pub const MAX_BOUNCES: u32 = 5;

#[derive(Debug, Default)]
pub struct World {
    pub(crate) shapes: Vec<Shape>,
    /// Shapes not owned by any group, in insertion order.
    pub(crate) roots: Vec<ShapeId>,
    pub(crate) lights: Vec<Light>,
    pub stats: RenderStats,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape as a scene root and return its id. Ids are stable
    /// for the lifetime of the world.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = ShapeId(self.shapes.len());
        self.shapes.push(shape);
        self.roots.push(id);
        id
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn roots(&self) -> &[ShapeId] {
        &self.roots
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Replace a shape's transform, keeping any enclosing group's
    /// cached bounds in sync.
    pub fn set_transform(&mut self, id: ShapeId, matrix: DMat4) {
        self.shapes[id.0].set_transform(matrix);
        if let Some(parent) = self.shapes[id.0].parent {
            self.refresh_bounds(parent);
        }
    }

    /// All intersections of `ray` with the scene, sorted by `t`.
    pub fn intersect(&self, ray: &Ray, kind: RayKind) -> Vec<Intersection> {
        let mut xs = Vec::new();
        for &root in &self.roots {
            self.intersect_shape(root, ray, kind, &mut xs);
        }
        xs.sort_by(|a, b| a.t.total_cmp(&b.t));
        xs
    }

    pub(crate) fn intersect_shape(
        &self,
        id: ShapeId,
        ray: &Ray,
        kind: RayKind,
        out: &mut Vec<Intersection>,
    ) {
        let shape = &self[id];
        if !shape.mask.allows(kind) {
            return;
        }
        self.stats.count_intersection_test();

        let local_ray = ray.transform(shape.transform().inverse());
        match &shape.geometry {
            Geometry::Group(group) => {
                if !group.bounds.intersects(&local_ray) {
                    return;
                }
                for &child in &group.children {
                    self.intersect_shape(child, &local_ray, kind, out);
                }
            }
            geometry => {
                for local in geometry.local_intersect(&local_ray) {
                    out.push(Intersection {
                        t: local.t,
                        shape: id,
                        uv: local.uv,
                    });
                }
            }
        }
    }

    /// Map a world-space point into `id`'s object space, applying every
    /// enclosing group transform on the way down.
    pub fn world_to_object(&self, id: ShapeId, point: Point) -> Point {
        let point = match self[id].parent {
            Some(parent) => self.world_to_object(parent, point),
            None => point,
        };
        self[id].transform().inverse().transform_point(point)
    }

    /// Map an object-space normal back out to world space.
    pub fn normal_to_world(&self, id: ShapeId, normal: Vector) -> Vector {
        let normal = self[id]
            .transform()
            .inverse_transpose()
            .transform_vector(normal)
            .normalize();
        match self[id].parent {
            Some(parent) => self.normal_to_world(parent, normal),
            None => normal,
        }
    }

    /// World-space surface normal at `world_point`. The hit supplies
    /// barycentric coordinates for smooth triangles, and the material's
    /// bump map perturbs the normal in object space.
    pub fn normal_at(&self, id: ShapeId, world_point: Point, hit: Intersection) -> Vector {
        let local_point = self.world_to_object(id, world_point);
        let mut local_normal = self[id].geometry.local_normal_at(local_point, hit.uv);
        if let Some(map) = &self[id].material.bump_map {
            local_normal = perturb(map, local_normal, local_point);
        }
        self.normal_to_world(id, local_normal)
    }

    /// Trace a camera ray to its final color.
    pub fn color_for(&self, ray: &Ray, rng: &mut dyn RngCore) -> Color {
        self.stats.count_primary_ray();
        self.color_at(ray, RayKind::Primary, MAX_BOUNCES, rng)
    }

    pub(crate) fn color_at(
        &self,
        ray: &Ray,
        kind: RayKind,
        remaining: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        let xs = self.intersect(ray, kind);
        match hit(&xs) {
            Some(h) => {
                let comps = prepare_computations(self, h, ray, &xs);
                self.shade_hit(&comps, remaining, rng)
            }
            None => Color::BLACK,
        }
    }

    pub(crate) fn shade_hit(&self, comps: &Comps, remaining: u32, rng: &mut dyn RngCore) -> Color {
        let material = &self[comps.shape].material;

        let mut surface = Color::BLACK;
        for light in &self.lights {
            let intensity = light.intensity_at(self, comps.over_point, rng);
            surface += material.lighting(
                self,
                comps.shape,
                light,
                comps.over_point,
                comps.eyev,
                comps.normalv,
                intensity,
                rng,
            );
        }

        let reflected = self.reflected_color(comps, remaining, rng);
        let refracted = self.refracted_color(comps, remaining, rng);

        if material.reflective > 0.0 && material.transparency > 0.0 {
            let reflectance = schlick(comps);
            surface + reflected * reflectance + refracted * (1.0 - reflectance)
        } else {
            surface + reflected + refracted
        }
    }

    pub(crate) fn reflected_color(
        &self,
        comps: &Comps,
        remaining: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        if remaining == 0 {
            return Color::BLACK;
        }
        let reflective = self[comps.shape].material.reflective;
        if reflective == 0.0 {
            return Color::BLACK;
        }
        self.stats.count_secondary_ray();
        let reflect_ray = Ray::new(comps.over_point, comps.reflectv);
        self.color_at(&reflect_ray, RayKind::Reflection, remaining - 1, rng) * reflective
    }

    pub(crate) fn refracted_color(
        &self,
        comps: &Comps,
        remaining: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        if remaining == 0 {
            return Color::BLACK;
        }
        let transparency = self[comps.shape].material.transparency;
        if transparency == 0.0 {
            return Color::BLACK;
        }

        // Snell's law, checking for total internal reflection.
        let n_ratio = comps.n1 / comps.n2;
        let cos_i = comps.eyev.dot(comps.normalv);
        let sin2_t = n_ratio * n_ratio * (1.0 - cos_i * cos_i);
        if sin2_t > 1.0 {
            return Color::BLACK;
        }

        self.stats.count_secondary_ray();
        let cos_t = (1.0 - sin2_t).sqrt();
        let direction = comps.normalv * (n_ratio * cos_i - cos_t) - comps.eyev * n_ratio;
        let refract_ray = Ray::new(comps.under_point, direction);
        self.color_at(&refract_ray, RayKind::Refraction, remaining - 1, rng) * transparency
    }

    /// Whether anything sits between `point` and the given light
    /// position. Shapes masked out of shadow rays never occlude.
    pub fn is_shadowed(&self, light_position: Point, point: Point) -> bool {
        self.stats.count_shadow_ray();
        let v = light_position - point;
        let shadow_ray = Ray::new(point, v.normalize());
        match hit(&self.intersect(&shadow_ray, RayKind::Shadow)) {
            Some(h) => h.t < v.length(),
            None => false,
        }
    }
}

impl Index<ShapeId> for World {
    type Output = Shape;

    fn index(&self, id: ShapeId) -> &Shape {
        &self.shapes[id.0]
    }
}

impl IndexMut<ShapeId> for World {
    fn index_mut(&mut self, id: ShapeId) -> &mut Shape {
        &mut self.shapes[id.0]
    }
}

fn perturb(map: &Pattern, normal: Vector, local_point: Point) -> Vector {
    let c = map.at_object(local_point);
    normal
        + Vector::new(
            (c.r() - 0.5) * 2.0,
            (c.g() - 0.5) * 2.0,
            (c.b() - 0.5) * 2.0,
        )
}

/// Two-sphere scene most shading tests run against.
#[cfg(test)]
pub(crate) fn default_world() -> World {
    use crate::material::Material;
    use glimmer_math::scaling;

    let mut w = World::new();
    w.add_light(Light::point_light(Point::new(-10.0, 10.0, -10.0), Color::WHITE));
    w.add_shape(
        Shape::sphere().with_material(
            Material::new()
                .with_color(Color::new(0.8, 1.0, 0.6))
                .with_diffuse(0.7)
                .with_specular(0.2),
        ),
    );
    w.add_shape(Shape::sphere().with_transform(scaling(0.5, 0.5, 0.5)));
    w
}
