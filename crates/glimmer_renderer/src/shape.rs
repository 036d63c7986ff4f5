//! The shape arena types and the closed geometry variant set.

use glam::DMat4;
use glimmer_math::{BoundingBox, Mat4Ext, Point, Ray, Transform, Vector};

use crate::group::Group;
use crate::material::Material;
use crate::triangle::{SmoothTriangle, Triangle};
use crate::{cone, cube, cylinder, plane, sphere, triangle};

/// Index of a shape in the world's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(pub(crate) usize);

impl ShapeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// What a ray is being cast for. Drives the telemetry counters and the
/// per-shape participation mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RayKind {
    Primary,
    Shadow,
    Reflection,
    Refraction,
}

/// Which ray kinds a shape participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RayMask {
    pub primary: bool,
    pub shadow: bool,
    pub reflection: bool,
    pub refraction: bool,
}

impl RayMask {
    pub const ALL: RayMask = RayMask {
        primary: true,
        shadow: true,
        reflection: true,
        refraction: true,
    };

    /// Visible to camera rays only; casts no shadows and never shows up
    /// in bounces. Used for debug proxies.
    pub const PRIMARY_ONLY: RayMask = RayMask {
        primary: true,
        shadow: false,
        reflection: false,
        refraction: false,
    };

    pub fn allows(&self, kind: RayKind) -> bool {
        match kind {
            RayKind::Primary => self.primary,
            RayKind::Shadow => self.shadow,
            RayKind::Reflection => self.reflection,
            RayKind::Refraction => self.refraction,
        }
    }
}

impl Default for RayMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// A local-space hit, before it is attached to a shape id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalHit {
    pub t: f64,
    /// Barycentric coordinates, recorded by smooth triangles only.
    pub uv: Option<(f64, f64)>,
}

impl LocalHit {
    pub fn new(t: f64) -> Self {
        Self { t, uv: None }
    }

    pub fn with_uv(t: f64, u: f64, v: f64) -> Self {
        Self {
            t,
            uv: Some((u, v)),
        }
    }
}

/// The closed set of geometry variants.
#[derive(Debug, Clone)]
pub enum Geometry {
    Sphere,
    Plane,
    Cube {
        min: Point,
        max: Point,
    },
    Cylinder {
        minimum: f64,
        maximum: f64,
        closed: bool,
    },
    Cone {
        minimum: f64,
        maximum: f64,
        closed: bool,
    },
    Triangle(Triangle),
    SmoothTriangle(SmoothTriangle),
    Group(Group),
}

impl Geometry {
    /// Local-space intersection for every variant except groups, which
    /// need the arena and are traversed by the world instead.
    pub(crate) fn local_intersect(&self, ray: &Ray) -> Vec<LocalHit> {
        match self {
            Geometry::Sphere => sphere::local_intersect(ray),
            Geometry::Plane => plane::local_intersect(ray),
            Geometry::Cube { min, max } => cube::local_intersect(ray, *min, *max),
            Geometry::Cylinder {
                minimum,
                maximum,
                closed,
            } => cylinder::local_intersect(ray, *minimum, *maximum, *closed),
            Geometry::Cone {
                minimum,
                maximum,
                closed,
            } => cone::local_intersect(ray, *minimum, *maximum, *closed),
            Geometry::Triangle(tri) => triangle::local_intersect(tri, ray),
            Geometry::SmoothTriangle(tri) => triangle::local_intersect_smooth(tri, ray),
            Geometry::Group(_) => Vec::new(),
        }
    }

    /// Local-space surface normal. `uv` carries the barycentric weights
    /// smooth triangles interpolate with.
    pub(crate) fn local_normal_at(&self, point: Point, uv: Option<(f64, f64)>) -> Vector {
        match self {
            Geometry::Sphere => sphere::local_normal_at(point),
            Geometry::Plane => plane::local_normal_at(point),
            Geometry::Cube { min, max } => cube::local_normal_at(point, *min, *max),
            Geometry::Cylinder {
                minimum, maximum, ..
            } => cylinder::local_normal_at(point, *minimum, *maximum),
            Geometry::Cone {
                minimum, maximum, ..
            } => cone::local_normal_at(point, *minimum, *maximum),
            Geometry::Triangle(tri) => triangle::local_normal_at(tri),
            Geometry::SmoothTriangle(tri) => triangle::local_normal_at_smooth(tri, uv),
            Geometry::Group(_) => unreachable!("groups have no surface of their own"),
        }
    }

    /// Bounds in the variant's own local space.
    pub fn bounds(&self) -> BoundingBox {
        match self {
            Geometry::Sphere => sphere::bounds(),
            Geometry::Plane => plane::bounds(),
            Geometry::Cube { min, max } => BoundingBox::new(*min, *max),
            Geometry::Cylinder {
                minimum, maximum, ..
            } => cylinder::bounds(*minimum, *maximum),
            Geometry::Cone {
                minimum, maximum, ..
            } => cone::bounds(*minimum, *maximum),
            Geometry::Triangle(tri) => tri.bounds(),
            Geometry::SmoothTriangle(tri) => tri.tri.bounds(),
            Geometry::Group(group) => group.bounds,
        }
    }
}

/// A scene object: geometry plus transform, material, and ray filter.
///
/// Shapes live in the world's arena and reference each other by
/// [`ShapeId`]; parent links are set when a shape is attached to a group.
#[derive(Debug, Clone)]
pub struct Shape {
    pub(crate) transform: Transform,
    pub material: Material,
    pub mask: RayMask,
    pub(crate) parent: Option<ShapeId>,
    pub(crate) geometry: Geometry,
}

impl Shape {
    fn with_geometry(geometry: Geometry) -> Self {
        Self {
            transform: Transform::IDENTITY,
            material: Material::default(),
            mask: RayMask::default(),
            parent: None,
            geometry,
        }
    }

    /// Unit sphere at the origin.
    pub fn sphere() -> Self {
        Self::with_geometry(Geometry::Sphere)
    }

    /// Sphere of refractive glass, transparency 1.0 and index 1.5.
    pub fn glass_sphere() -> Self {
        Self::sphere().with_material(
            Material::new()
                .with_transparency(1.0)
                .with_refractive_index(1.5),
        )
    }

    /// The y = 0 plane.
    pub fn plane() -> Self {
        Self::with_geometry(Geometry::Plane)
    }

    /// Unit cube spanning -1..1 on every axis.
    pub fn cube() -> Self {
        Self::with_geometry(Geometry::Cube {
            min: Point::new(-1.0, -1.0, -1.0),
            max: Point::new(1.0, 1.0, 1.0),
        })
    }

    /// Infinite open cylinder of radius 1 around the y axis.
    pub fn cylinder() -> Self {
        Self::with_geometry(Geometry::Cylinder {
            minimum: f64::NEG_INFINITY,
            maximum: f64::INFINITY,
            closed: false,
        })
    }

    /// Infinite open double cone with its apex at the origin.
    pub fn cone() -> Self {
        Self::with_geometry(Geometry::Cone {
            minimum: f64::NEG_INFINITY,
            maximum: f64::INFINITY,
            closed: false,
        })
    }

    pub fn triangle(p1: Point, p2: Point, p3: Point) -> Self {
        Self::with_geometry(Geometry::Triangle(Triangle::new(p1, p2, p3)))
    }

    pub fn smooth_triangle(
        p1: Point,
        p2: Point,
        p3: Point,
        n1: Vector,
        n2: Vector,
        n3: Vector,
    ) -> Self {
        Self::with_geometry(Geometry::SmoothTriangle(SmoothTriangle::new(
            p1, p2, p3, n1, n2, n3,
        )))
    }

    /// Empty group; attach children through [`crate::World::add_child`].
    pub fn group() -> Self {
        Self::with_geometry(Geometry::Group(Group::default()))
    }

    /// Visualization cube over `bounds` that only primary rays can see.
    pub fn bounding_proxy(bounds: BoundingBox) -> Self {
        Self::with_geometry(Geometry::Cube {
            min: bounds.min,
            max: bounds.max,
        })
        .with_mask(RayMask::PRIMARY_ONLY)
    }

    pub fn with_transform(mut self, matrix: DMat4) -> Self {
        self.set_transform(matrix);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_mask(mut self, mask: RayMask) -> Self {
        self.mask = mask;
        self
    }

    /// Truncate a cylinder or cone to `minimum..maximum` in local y.
    /// No effect on other variants.
    pub fn with_range(mut self, min_y: f64, max_y: f64) -> Self {
        match &mut self.geometry {
            Geometry::Cylinder {
                minimum, maximum, ..
            }
            | Geometry::Cone {
                minimum, maximum, ..
            } => {
                *minimum = min_y;
                *maximum = max_y;
            }
            _ => {}
        }
        self
    }

    /// Close the end caps of a truncated cylinder or cone. No effect on
    /// other variants.
    pub fn with_closed(mut self, value: bool) -> Self {
        match &mut self.geometry {
            Geometry::Cylinder { closed, .. } | Geometry::Cone { closed, .. } => {
                *closed = value;
            }
            _ => {}
        }
        self
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Reassign the transform, recomputing the cached inverse pair.
    ///
    /// # Panics
    ///
    /// Panics if `matrix` is singular.
    pub fn set_transform(&mut self, matrix: DMat4) {
        self.transform = Transform::new(matrix);
    }

    pub fn parent(&self) -> Option<ShapeId> {
        self.parent
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Bounds in the shape's own local space.
    pub fn bounds(&self) -> BoundingBox {
        self.geometry.bounds()
    }

    /// Local bounds mapped through this shape's own transform, i.e. the
    /// box an enclosing group sees.
    pub fn parent_space_bounds(&self) -> BoundingBox {
        self.transform.matrix().transform_bounds(&self.bounds())
    }
}
