//! Axis-aligned bounding boxes used to prune ray/group tests.

use crate::{Point, Ray, EPSILON};

/// Axis-aligned box, possibly empty or unbounded on some axes.
///
/// The empty box uses the +inf/-inf sentinel so that `add_point` and
/// `add_box` need no special cases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// The box containing nothing.
    pub fn empty() -> Self {
        Self {
            min: Point::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// The box containing everything.
    pub fn infinite() -> Self {
        Self {
            min: Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            max: Point::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x() > self.max.x() || self.min.y() > self.max.y() || self.min.z() > self.max.z()
    }

    pub fn is_finite(&self) -> bool {
        self.min.0.is_finite() && self.max.0.is_finite()
    }

    /// Grow to include `point`.
    pub fn add_point(&mut self, point: Point) {
        self.min = Point(self.min.0.min(point.0));
        self.max = Point(self.max.0.max(point.0));
    }

    /// Grow to include all of `other`.
    pub fn add_box(&mut self, other: &BoundingBox) {
        if other.is_empty() {
            return;
        }
        self.add_point(other.min);
        self.add_point(other.max);
    }

    pub fn contains_point(&self, point: Point) -> bool {
        self.min.x() <= point.x()
            && point.x() <= self.max.x()
            && self.min.y() <= point.y()
            && point.y() <= self.max.y()
            && self.min.z() <= point.z()
            && point.z() <= self.max.z()
    }

    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        if other.is_empty() {
            return true;
        }
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    /// Slab test. Grazing hits count; an empty box intersects nothing.
    pub fn intersects(&self, ray: &Ray) -> bool {
        if self.is_empty() {
            return false;
        }
        let (xtmin, xtmax) = check_axis(
            ray.origin.x(),
            ray.direction.x(),
            self.min.x(),
            self.max.x(),
        );
        let (ytmin, ytmax) = check_axis(
            ray.origin.y(),
            ray.direction.y(),
            self.min.y(),
            self.max.y(),
        );
        let (ztmin, ztmax) = check_axis(
            ray.origin.z(),
            ray.direction.z(),
            self.min.z(),
            self.max.z(),
        );
        // f64::max/min skip NaN, which absorbs the 0 * inf slabs from
        // check_axis on rays lying in a face plane.
        let tmin = xtmin.max(ytmin).max(ztmin);
        let tmax = xtmax.min(ytmax).min(ztmax);
        tmin <= tmax
    }

    /// Cut the box in half across its longest axis. Ties prefer x, then y.
    pub fn split(&self) -> (BoundingBox, BoundingBox) {
        let dx = self.max.x() - self.min.x();
        let dy = self.max.y() - self.min.y();
        let dz = self.max.z() - self.min.z();

        let mut left_max = self.max;
        let mut right_min = self.min;
        if dx >= dy && dx >= dz {
            let mid = self.min.x() + dx / 2.0;
            left_max.0.x = mid;
            right_min.0.x = mid;
        } else if dy >= dz {
            let mid = self.min.y() + dy / 2.0;
            left_max.0.y = mid;
            right_min.0.y = mid;
        } else {
            let mid = self.min.z() + dz / 2.0;
            left_max.0.z = mid;
            right_min.0.z = mid;
        }
        (
            BoundingBox::new(self.min, left_max),
            BoundingBox::new(right_min, self.max),
        )
    }

    /// All 8 corner points.
    pub fn corners(&self) -> [Point; 8] {
        let (min, max) = (self.min, self.max);
        [
            Point::new(min.x(), min.y(), min.z()),
            Point::new(max.x(), min.y(), min.z()),
            Point::new(min.x(), max.y(), min.z()),
            Point::new(max.x(), max.y(), min.z()),
            Point::new(min.x(), min.y(), max.z()),
            Point::new(max.x(), min.y(), max.z()),
            Point::new(min.x(), max.y(), max.z()),
            Point::new(max.x(), max.y(), max.z()),
        ]
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

/// Entry and exit parameters for one slab pair.
///
/// Near-zero directions multiply the plane offsets by infinity instead of
/// dividing, which yields the correct infinite extents for rays parallel
/// to the slab.
pub fn check_axis(origin: f64, direction: f64, min: f64, max: f64) -> (f64, f64) {
    let tmin_numerator = min - origin;
    let tmax_numerator = max - origin;

    let (tmin, tmax) = if direction.abs() >= EPSILON {
        (tmin_numerator / direction, tmax_numerator / direction)
    } else {
        (
            tmin_numerator * f64::INFINITY,
            tmax_numerator * f64::INFINITY,
        )
    };

    if tmin > tmax {
        (tmax, tmin)
    } else {
        (tmin, tmax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vector;

    #[test]
    fn test_empty_box_uses_infinite_sentinel() {
        let b = BoundingBox::empty();
        assert!(b.is_empty());
        assert_eq!(b.min.x(), f64::INFINITY);
        assert_eq!(b.max.x(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_add_point_grows_the_box() {
        let mut b = BoundingBox::empty();
        b.add_point(Point::new(-5.0, 2.0, 0.0));
        b.add_point(Point::new(7.0, 0.0, -3.0));
        assert_eq!(b.min, Point::new(-5.0, 0.0, -3.0));
        assert_eq!(b.max, Point::new(7.0, 2.0, 0.0));
        assert!(!b.is_empty());
    }

    #[test]
    fn test_add_box_merges_extents() {
        let mut b1 = BoundingBox::new(Point::new(-5.0, -2.0, 0.0), Point::new(7.0, 4.0, 4.0));
        let b2 = BoundingBox::new(Point::new(8.0, -7.0, -2.0), Point::new(14.0, 2.0, 8.0));
        b1.add_box(&b2);
        assert_eq!(b1.min, Point::new(-5.0, -7.0, -2.0));
        assert_eq!(b1.max, Point::new(14.0, 4.0, 8.0));
    }

    #[test]
    fn test_add_empty_box_is_a_no_op() {
        let mut b = BoundingBox::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0));
        let before = b;
        b.add_box(&BoundingBox::empty());
        assert_eq!(b, before);
    }

    #[test]
    fn test_contains_point() {
        let b = BoundingBox::new(Point::new(5.0, -2.0, 0.0), Point::new(11.0, 4.0, 7.0));
        let cases = [
            (Point::new(5.0, -2.0, 0.0), true),
            (Point::new(11.0, 4.0, 7.0), true),
            (Point::new(8.0, 1.0, 3.0), true),
            (Point::new(3.0, 0.0, 3.0), false),
            (Point::new(8.0, -4.0, 3.0), false),
            (Point::new(8.0, 1.0, -1.0), false),
            (Point::new(13.0, 1.0, 3.0), false),
            (Point::new(8.0, 5.0, 3.0), false),
            (Point::new(8.0, 1.0, 8.0), false),
        ];
        for (p, expected) in cases {
            assert_eq!(b.contains_point(p), expected, "point {p:?}");
        }
    }

    #[test]
    fn test_contains_box() {
        let b = BoundingBox::new(Point::new(5.0, -2.0, 0.0), Point::new(11.0, 4.0, 7.0));
        let cases = [
            (Point::new(5.0, -2.0, 0.0), Point::new(11.0, 4.0, 7.0), true),
            (Point::new(6.0, -1.0, 1.0), Point::new(10.0, 3.0, 6.0), true),
            (Point::new(4.0, -3.0, -1.0), Point::new(10.0, 3.0, 6.0), false),
            (Point::new(6.0, -1.0, 1.0), Point::new(12.0, 5.0, 8.0), false),
        ];
        for (min, max, expected) in cases {
            let inner = BoundingBox::new(min, max);
            assert_eq!(b.contains_box(&inner), expected, "box {min:?}..{max:?}");
        }
    }

    #[test]
    fn test_intersects_cubic_box() {
        let b = BoundingBox::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0));
        let cases = [
            (Point::new(5.0, 0.5, 0.0), Vector::new(-1.0, 0.0, 0.0), true),
            (Point::new(-5.0, 0.5, 0.0), Vector::new(1.0, 0.0, 0.0), true),
            (Point::new(0.5, 5.0, 0.0), Vector::new(0.0, -1.0, 0.0), true),
            (Point::new(0.5, -5.0, 0.0), Vector::new(0.0, 1.0, 0.0), true),
            (Point::new(0.5, 0.0, 5.0), Vector::new(0.0, 0.0, -1.0), true),
            (Point::new(0.5, 0.0, -5.0), Vector::new(0.0, 0.0, 1.0), true),
            (Point::new(0.0, 0.5, 0.0), Vector::new(0.0, 0.0, 1.0), true),
            (Point::new(-2.0, 0.0, 0.0), Vector::new(2.0, 4.0, 6.0), false),
            (Point::new(0.0, -2.0, 0.0), Vector::new(6.0, 2.0, 4.0), false),
            (Point::new(0.0, 0.0, -2.0), Vector::new(4.0, 6.0, 2.0), false),
            (Point::new(2.0, 0.0, 2.0), Vector::new(0.0, 0.0, -1.0), false),
            (Point::new(0.0, 2.0, 2.0), Vector::new(0.0, -1.0, 0.0), false),
            (Point::new(2.0, 2.0, 0.0), Vector::new(-1.0, 0.0, 0.0), false),
        ];
        for (origin, direction, expected) in cases {
            let ray = Ray::new(origin, direction.normalize());
            assert_eq!(b.intersects(&ray), expected, "origin {origin:?}");
        }
    }

    #[test]
    fn test_intersects_non_cubic_box() {
        let b = BoundingBox::new(Point::new(5.0, -2.0, 0.0), Point::new(11.0, 4.0, 7.0));
        let cases = [
            (Point::new(15.0, 1.0, 2.0), Vector::new(-1.0, 0.0, 0.0), true),
            (Point::new(-5.0, -1.0, 4.0), Vector::new(1.0, 0.0, 0.0), true),
            (Point::new(7.0, 6.0, 5.0), Vector::new(0.0, -1.0, 0.0), true),
            (Point::new(9.0, -5.0, 6.0), Vector::new(0.0, 1.0, 0.0), true),
            (Point::new(8.0, 2.0, 12.0), Vector::new(0.0, 0.0, -1.0), true),
            (Point::new(6.0, 0.0, -5.0), Vector::new(0.0, 0.0, 1.0), true),
            (Point::new(8.0, 1.0, 3.5), Vector::new(0.0, 0.0, 1.0), true),
            (Point::new(9.0, -1.0, -8.0), Vector::new(2.0, 4.0, 6.0), false),
            (Point::new(8.0, 3.0, -4.0), Vector::new(6.0, 2.0, 4.0), false),
            (Point::new(9.0, -1.0, -2.0), Vector::new(4.0, 6.0, 2.0), false),
            (Point::new(4.0, 0.0, 9.0), Vector::new(0.0, 0.0, -1.0), false),
            (Point::new(8.0, 6.0, -1.0), Vector::new(0.0, -1.0, 0.0), false),
            (Point::new(12.0, 5.0, 4.0), Vector::new(-1.0, 0.0, 0.0), false),
        ];
        for (origin, direction, expected) in cases {
            let ray = Ray::new(origin, direction.normalize());
            assert_eq!(b.intersects(&ray), expected, "origin {origin:?}");
        }
    }

    #[test]
    fn test_empty_box_intersects_nothing() {
        let b = BoundingBox::empty();
        let ray = Ray::new(Point::new(0.0, 0.0, -5.0), Vector::new(0.0, 0.0, 1.0));
        assert!(!b.intersects(&ray));
    }

    #[test]
    fn test_ray_grazing_a_face_plane_still_hits() {
        // Origin sits exactly on the x = -1 plane with zero x direction,
        // which drives one slab through the 0 * inf = NaN path.
        let b = BoundingBox::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Point::new(-1.0, 0.0, -5.0), Vector::new(0.0, 0.0, 1.0));
        assert!(b.intersects(&ray));
    }

    #[test]
    fn test_split_perfect_cube() {
        let b = BoundingBox::new(Point::new(-1.0, -4.0, -5.0), Point::new(9.0, 6.0, 5.0));
        let (left, right) = b.split();
        assert_eq!(left.min, Point::new(-1.0, -4.0, -5.0));
        assert_eq!(left.max, Point::new(4.0, 6.0, 5.0));
        assert_eq!(right.min, Point::new(4.0, -4.0, -5.0));
        assert_eq!(right.max, Point::new(9.0, 6.0, 5.0));
    }

    #[test]
    fn test_split_x_wide_box() {
        let b = BoundingBox::new(Point::new(-1.0, -2.0, -3.0), Point::new(9.0, 5.5, 3.0));
        let (left, right) = b.split();
        assert_eq!(left.max, Point::new(4.0, 5.5, 3.0));
        assert_eq!(right.min, Point::new(4.0, -2.0, -3.0));
    }

    #[test]
    fn test_split_y_wide_box() {
        let b = BoundingBox::new(Point::new(-1.0, -2.0, -3.0), Point::new(5.0, 8.0, 3.0));
        let (left, right) = b.split();
        assert_eq!(left.max, Point::new(5.0, 3.0, 3.0));
        assert_eq!(right.min, Point::new(-1.0, 3.0, -3.0));
    }

    #[test]
    fn test_split_z_wide_box() {
        let b = BoundingBox::new(Point::new(-1.0, -2.0, -3.0), Point::new(5.0, 3.0, 7.0));
        let (left, right) = b.split();
        assert_eq!(left.max, Point::new(5.0, 3.0, 2.0));
        assert_eq!(right.min, Point::new(-1.0, -2.0, 2.0));
    }
}
