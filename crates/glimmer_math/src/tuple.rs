//! Positions and directions.
//!
//! `Point` and `Vector` are separate newtypes over `glam::DVec3` so the
//! affine algebra holds at compile time: point − point is a vector,
//! point + vector is a point, and point + point does not exist.

use std::ops::{Add, Div, Mul, Neg, Sub};

use glam::DVec3;

use crate::EPSILON;

/// A position in some coordinate space (homogeneous w = 1).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point(pub DVec3);

/// A direction or displacement (homogeneous w = 0).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector(pub DVec3);

impl Point {
    pub const ORIGIN: Point = Point(DVec3::ZERO);

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Componentwise comparison within `max_abs_diff`.
    #[inline]
    pub fn abs_diff_eq(&self, other: Point, max_abs_diff: f64) -> bool {
        self.0.abs_diff_eq(other.0, max_abs_diff)
    }

    /// Componentwise comparison within the crate tolerance.
    #[inline]
    pub fn approx_eq(&self, other: Point) -> bool {
        self.abs_diff_eq(other, EPSILON)
    }
}

impl Vector {
    pub const ZERO: Vector = Vector(DVec3::ZERO);

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.0.length()
    }

    #[inline]
    pub fn normalize(&self) -> Vector {
        Vector(self.0.normalize())
    }

    #[inline]
    pub fn dot(&self, other: Vector) -> f64 {
        self.0.dot(other.0)
    }

    #[inline]
    pub fn cross(&self, other: Vector) -> Vector {
        Vector(self.0.cross(other.0))
    }

    /// Mirror this vector about `normal`.
    #[inline]
    pub fn reflect(&self, normal: Vector) -> Vector {
        *self - normal * (2.0 * self.dot(normal))
    }

    #[inline]
    pub fn abs_diff_eq(&self, other: Vector, max_abs_diff: f64) -> bool {
        self.0.abs_diff_eq(other.0, max_abs_diff)
    }

    #[inline]
    pub fn approx_eq(&self, other: Vector) -> bool {
        self.abs_diff_eq(other, EPSILON)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point(self.0 + rhs.0)
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    fn sub(self, rhs: Vector) -> Point {
        Point(self.0 - rhs.0)
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        Vector(self.0 - rhs.0)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector(self.0 + rhs.0)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector(self.0 - rhs.0)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector(-self.0)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector(self.0 * rhs)
    }
}

impl Div<f64> for Vector {
    type Output = Vector;

    fn div(self, rhs: f64) -> Vector {
        Vector(self.0 / rhs)
    }
}
