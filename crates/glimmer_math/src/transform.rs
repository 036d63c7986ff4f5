//! Affine transform constructors and the cached-inverse bundle.
//!
//! Every ray query applies a shape's *inverse* transform and every normal
//! the inverse-transpose, so [`Transform`] computes both once at assignment
//! time instead of per ray.

use glam::{DMat4, DVec3};

use crate::{BoundingBox, Point, Vector};

/// Translation by (x, y, z).
pub fn translation(x: f64, y: f64, z: f64) -> DMat4 {
    DMat4::from_translation(DVec3::new(x, y, z))
}

/// Scaling by (x, y, z).
pub fn scaling(x: f64, y: f64, z: f64) -> DMat4 {
    DMat4::from_scale(DVec3::new(x, y, z))
}

/// Rotation about the x axis, radians.
pub fn rotation_x(radians: f64) -> DMat4 {
    DMat4::from_rotation_x(radians)
}

/// Rotation about the y axis, radians.
pub fn rotation_y(radians: f64) -> DMat4 {
    DMat4::from_rotation_y(radians)
}

/// Rotation about the z axis, radians.
pub fn rotation_z(radians: f64) -> DMat4 {
    DMat4::from_rotation_z(radians)
}

/// Shear where each coordinate moves in proportion to the other two:
/// `xy` is x per unit y, `zx` is z per unit x, and so on.
pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> DMat4 {
    // from_cols_array_2d takes columns, not rows
    DMat4::from_cols_array_2d(&[
        [1.0, yx, zx, 0.0],
        [xy, 1.0, zy, 0.0],
        [xz, yz, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// World-to-camera transform looking from `from` toward `to` with `up`
/// suggesting which way is up.
pub fn view_transform(from: Point, to: Point, up: Vector) -> DMat4 {
    let forward = (to - from).normalize();
    let left = forward.cross(up.normalize());
    let true_up = left.cross(forward);
    let orientation = DMat4::from_cols_array_2d(&[
        [left.x(), true_up.x(), -forward.x(), 0.0],
        [left.y(), true_up.y(), -forward.y(), 0.0],
        [left.z(), true_up.z(), -forward.z(), 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    orientation * translation(-from.x(), -from.y(), -from.z())
}

/// Applies 4x4 matrices to the renderer's geometric types.
pub trait Mat4Ext {
    /// Transform a position (w = 1).
    fn transform_point(&self, p: Point) -> Point;

    /// Transform a direction (w = 0); translation does not apply.
    fn transform_vector(&self, v: Vector) -> Vector;

    /// Transform a bounding box by transforming all 8 corners and
    /// re-unioning the results.
    fn transform_bounds(&self, bounds: &BoundingBox) -> BoundingBox;
}

impl Mat4Ext for DMat4 {
    #[inline]
    fn transform_point(&self, p: Point) -> Point {
        Point(self.transform_point3(p.0))
    }

    #[inline]
    fn transform_vector(&self, v: Vector) -> Vector {
        Vector(self.transform_vector3(v.0))
    }

    fn transform_bounds(&self, bounds: &BoundingBox) -> BoundingBox {
        if bounds.is_empty() {
            return BoundingBox::empty();
        }
        // Corners with infinite components would turn 0 * inf into NaN in
        // the matrix product; fall back to the everything box instead.
        if !bounds.is_finite() {
            return BoundingBox::infinite();
        }
        let mut out = BoundingBox::empty();
        for corner in bounds.corners() {
            out.add_point(self.transform_point(corner));
        }
        out
    }
}

/// A matrix bundled with its inverse and inverse-transpose.
///
/// Constructing one from a singular matrix panics; the renderer never
/// silently substitutes the identity for a broken transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: DMat4,
    inverse: DMat4,
    inverse_transpose: DMat4,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        matrix: DMat4::IDENTITY,
        inverse: DMat4::IDENTITY,
        inverse_transpose: DMat4::IDENTITY,
    };

    /// Cache the inverse and inverse-transpose of `matrix`.
    ///
    /// # Panics
    ///
    /// Panics if `matrix` is not invertible.
    pub fn new(matrix: DMat4) -> Self {
        let det = matrix.determinant();
        assert!(
            det != 0.0 && det.is_finite(),
            "transform matrix is not invertible (determinant = {det})"
        );
        let inverse = matrix.inverse();
        Self {
            matrix,
            inverse,
            inverse_transpose: inverse.transpose(),
        }
    }

    #[inline]
    pub fn matrix(&self) -> &DMat4 {
        &self.matrix
    }

    #[inline]
    pub fn inverse(&self) -> &DMat4 {
        &self.inverse
    }

    #[inline]
    pub fn inverse_transpose(&self) -> &DMat4 {
        &self.inverse_transpose
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<DMat4> for Transform {
    fn from(matrix: DMat4) -> Self {
        Self::new(matrix)
    }
}
