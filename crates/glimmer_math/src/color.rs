//! RGB colors.
//!
//! Channels are unclamped f64s; values above 1.0 are legal and expected
//! during shading. Clamping and tone mapping belong to whatever encodes the
//! final image.

use std::ops::{Add, AddAssign, Div, Mul, Sub};

use glam::DVec3;

use crate::EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color(pub DVec3);

impl Color {
    pub const BLACK: Color = Color(DVec3::ZERO);
    pub const WHITE: Color = Color(DVec3::ONE);

    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self(DVec3::new(r, g, b))
    }

    #[inline]
    pub fn r(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn g(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn b(&self) -> f64 {
        self.0.z
    }

    #[inline]
    pub fn abs_diff_eq(&self, other: Color, max_abs_diff: f64) -> bool {
        self.0.abs_diff_eq(other.0, max_abs_diff)
    }

    #[inline]
    pub fn approx_eq(&self, other: Color) -> bool {
        self.abs_diff_eq(other, EPSILON)
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color(self.0 + rhs.0)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        self.0 += rhs.0;
    }
}

impl Sub for Color {
    type Output = Color;

    fn sub(self, rhs: Color) -> Color {
        Color(self.0 - rhs.0)
    }
}

/// Hadamard product; how a surface color filters a light color.
impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        Color(self.0 * rhs.0)
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, rhs: f64) -> Color {
        Color(self.0 * rhs)
    }
}

impl Div<f64> for Color {
    type Output = Color;

    fn div(self, rhs: f64) -> Color {
        Color(self.0 / rhs)
    }
}
