//! Shape groups and the coarse BVH built over them.
//!
//! Structural mutations go through the world so the cached group bounds
//! and parent links stay consistent; the box is recomputed from the
//! current child set on every change and the recompute propagates up
//! through enclosing groups.

use glimmer_math::BoundingBox;

use crate::shape::{Geometry, Shape, ShapeId};
use crate::world::World;

/// Composite shape: an ordered set of child ids plus the union, in the
/// group's local space, of every child's parent-space bounds.
#[derive(Debug, Clone, Default)]
pub struct Group {
    pub(crate) children: Vec<ShapeId>,
    pub(crate) bounds: BoundingBox,
}

impl Group {
    pub fn children(&self) -> &[ShapeId] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl World {
    /// Attach `child` to `group`, removing it from the scene roots.
    ///
    /// # Panics
    ///
    /// Panics if `group` is not a group, if `child` already has a parent,
    /// or if the two ids are the same. Re-parenting is not supported;
    /// shapes belong to at most one group.
    pub fn add_child(&mut self, group: ShapeId, child: ShapeId) {
        assert!(group != child, "a group cannot contain itself");
        assert!(
            matches!(self[group].geometry, Geometry::Group(_)),
            "add_child target must be a group"
        );
        assert!(
            self[child].parent.is_none(),
            "shape is already parented to a group"
        );

        self.shapes[child.0].parent = Some(group);
        self.roots.retain(|&id| id != child);
        match &mut self.shapes[group.0].geometry {
            Geometry::Group(g) => g.children.push(child),
            _ => unreachable!(),
        }
        self.refresh_bounds(group);
    }

    /// Recompute `group`'s box from its current children, then walk up
    /// the parent chain doing the same.
    pub(crate) fn refresh_bounds(&mut self, group: ShapeId) {
        let children = match &self[group].geometry {
            Geometry::Group(g) => g.children.clone(),
            _ => return,
        };
        let mut bounds = BoundingBox::empty();
        for child in children {
            bounds.add_box(&self[child].parent_space_bounds());
        }
        if let Geometry::Group(g) = &mut self.shapes[group.0].geometry {
            g.bounds = bounds;
        }
        if let Some(parent) = self.shapes[group.0].parent {
            self.refresh_bounds(parent);
        }
    }

    /// Pull out the children fully contained in the left or right half
    /// of the group's box; straddlers stay to keep pruning correct. The
    /// extracted children are left unparented for the caller to re-home.
    pub fn partition_children(&mut self, group: ShapeId) -> (Vec<ShapeId>, Vec<ShapeId>) {
        let (children, left_box, right_box) = match &self[group].geometry {
            Geometry::Group(g) => {
                let (l, r) = g.bounds.split();
                (g.children.clone(), l, r)
            }
            _ => return (Vec::new(), Vec::new()),
        };

        let mut left = Vec::new();
        let mut right = Vec::new();
        let mut remaining = Vec::new();
        for child in children {
            let child_bounds = self[child].parent_space_bounds();
            if left_box.contains_box(&child_bounds) {
                left.push(child);
            } else if right_box.contains_box(&child_bounds) {
                right.push(child);
            } else {
                remaining.push(child);
            }
        }

        for &id in left.iter().chain(right.iter()) {
            self.shapes[id.0].parent = None;
        }
        if let Geometry::Group(g) = &mut self.shapes[group.0].geometry {
            g.children = remaining;
        }
        self.refresh_bounds(group);
        (left, right)
    }

    /// Wrap `children` in a fresh sub-group attached to `group`.
    pub fn make_subgroup(&mut self, group: ShapeId, children: Vec<ShapeId>) -> ShapeId {
        let sub = self.add_shape(Shape::group());
        for child in children {
            self.add_child(sub, child);
        }
        self.add_child(group, sub);
        sub
    }

    /// Recursively partition `id` (and its descendants) into sub-groups
    /// until every group has fewer than `threshold` direct children.
    /// No effect on non-group shapes.
    pub fn divide(&mut self, id: ShapeId, threshold: usize) {
        let child_count = match &self[id].geometry {
            Geometry::Group(g) => g.children.len(),
            _ => return,
        };

        if child_count >= threshold {
            let (left, right) = self.partition_children(id);
            if !left.is_empty() || !right.is_empty() {
                log::debug!(
                    "divide: group {} split into {} left / {} right",
                    id.index(),
                    left.len(),
                    right.len()
                );
            }
            if !left.is_empty() {
                self.make_subgroup(id, left);
            }
            if !right.is_empty() {
                self.make_subgroup(id, right);
            }
        }

        let children = match &self[id].geometry {
            Geometry::Group(g) => g.children.clone(),
            _ => return,
        };
        for child in children {
            self.divide(child, threshold);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glimmer_math::{scaling, translation, Point};

    fn children_of(world: &World, id: ShapeId) -> Vec<ShapeId> {
        match &world[id].geometry {
            Geometry::Group(g) => g.children.clone(),
            other => panic!("expected a group, got {other:?}"),
        }
    }

    fn bounds_of(world: &World, id: ShapeId) -> BoundingBox {
        world[id].bounds()
    }

    #[test]
    fn test_new_group_is_empty() {
        let mut w = World::new();
        let g = w.add_shape(Shape::group());
        assert!(children_of(&w, g).is_empty());
        assert!(bounds_of(&w, g).is_empty());
    }

    #[test]
    fn test_add_child_sets_parent_and_membership() {
        let mut w = World::new();
        let g = w.add_shape(Shape::group());
        let s = w.add_shape(Shape::sphere());
        w.add_child(g, s);
        assert_eq!(children_of(&w, g), vec![s]);
        assert_eq!(w[s].parent(), Some(g));
        // child left the root list
        assert_eq!(w.roots(), &[g]);
    }

    #[test]
    #[should_panic(expected = "already parented")]
    fn test_reparenting_is_rejected() {
        let mut w = World::new();
        let g1 = w.add_shape(Shape::group());
        let g2 = w.add_shape(Shape::group());
        let s = w.add_shape(Shape::sphere());
        w.add_child(g1, s);
        w.add_child(g2, s);
    }

    #[test]
    #[should_panic(expected = "must be a group")]
    fn test_add_child_to_non_group_is_rejected() {
        let mut w = World::new();
        let s1 = w.add_shape(Shape::sphere());
        let s2 = w.add_shape(Shape::sphere());
        w.add_child(s1, s2);
    }

    #[test]
    fn test_group_bounds_union_child_parent_space_bounds() {
        let mut w = World::new();
        let g = w.add_shape(Shape::group());
        let s = w.add_shape(
            Shape::sphere().with_transform(translation(2.0, 5.0, -3.0) * scaling(2.0, 2.0, 2.0)),
        );
        let c = w.add_shape(
            Shape::cylinder()
                .with_range(-2.0, 2.0)
                .with_transform(translation(-4.0, -1.0, 4.0) * scaling(0.5, 1.0, 0.5)),
        );
        w.add_child(g, s);
        w.add_child(g, c);
        let b = bounds_of(&w, g);
        assert_eq!(b.min, Point::new(-4.5, -3.0, -5.0));
        assert_eq!(b.max, Point::new(4.0, 7.0, 4.5));
    }

    #[test]
    fn test_bounds_refresh_propagates_to_enclosing_groups() {
        let mut w = World::new();
        let outer = w.add_shape(Shape::group());
        let inner = w.add_shape(Shape::group());
        w.add_child(outer, inner);
        let s = w.add_shape(Shape::sphere().with_transform(translation(5.0, 0.0, 0.0)));
        w.add_child(inner, s);
        let b = bounds_of(&w, outer);
        assert_eq!(b.min, Point::new(4.0, -1.0, -1.0));
        assert_eq!(b.max, Point::new(6.0, 1.0, 1.0));
    }

    #[test]
    fn test_partition_pulls_out_contained_children() {
        let mut w = World::new();
        let s1 = w.add_shape(Shape::sphere().with_transform(translation(-2.0, 0.0, 0.0)));
        let s2 = w.add_shape(Shape::sphere().with_transform(translation(2.0, 0.0, 0.0)));
        let s3 = w.add_shape(Shape::sphere());
        let g = w.add_shape(Shape::group());
        w.add_child(g, s1);
        w.add_child(g, s2);
        w.add_child(g, s3);

        let (left, right) = w.partition_children(g);
        assert_eq!(left, vec![s1]);
        assert_eq!(right, vec![s2]);
        assert_eq!(children_of(&w, g), vec![s3]);
    }

    #[test]
    fn test_make_subgroup_wraps_children() {
        let mut w = World::new();
        let s1 = w.add_shape(Shape::sphere().with_transform(translation(-2.0, 0.0, 0.0)));
        let s2 = w.add_shape(Shape::sphere().with_transform(translation(2.0, 0.0, 0.0)));
        let g = w.add_shape(Shape::group());
        let sub = w.make_subgroup(g, vec![s1, s2]);
        assert_eq!(children_of(&w, g), vec![sub]);
        assert_eq!(children_of(&w, sub), vec![s1, s2]);
        assert_eq!(w[sub].parent(), Some(g));
    }

    #[test]
    fn test_divide_builds_nested_subgroups() {
        let mut w = World::new();
        let s1 = w.add_shape(Shape::sphere().with_transform(translation(-2.0, -2.0, 0.0)));
        let s2 = w.add_shape(Shape::sphere().with_transform(translation(-2.0, 2.0, 0.0)));
        let s3 = w.add_shape(Shape::sphere().with_transform(scaling(4.0, 4.0, 4.0)));
        let g = w.add_shape(Shape::group());
        w.add_child(g, s1);
        w.add_child(g, s2);
        w.add_child(g, s3);

        w.divide(g, 1);

        let top = children_of(&w, g);
        assert_eq!(top.len(), 2);
        // the oversized sphere straddles the split and stays put
        assert_eq!(top[0], s3);
        let sub = top[1];
        let halves = children_of(&w, sub);
        assert_eq!(halves.len(), 2);
        assert_eq!(children_of(&w, halves[0]), vec![s1]);
        assert_eq!(children_of(&w, halves[1]), vec![s2]);
    }

    #[test]
    fn test_divide_respects_threshold() {
        let mut w = World::new();
        let s1 = w.add_shape(Shape::sphere().with_transform(translation(-2.0, 0.0, 0.0)));
        let s2 = w.add_shape(Shape::sphere().with_transform(translation(2.0, 1.0, 0.0)));
        let g = w.add_shape(Shape::group());
        w.add_child(g, s1);
        w.add_child(g, s2);

        w.divide(g, 3);
        assert_eq!(children_of(&w, g), vec![s1, s2]);
    }

    #[test]
    fn test_divide_keeps_every_child_inside_group_bounds() {
        let mut w = World::new();
        let mut ids = Vec::new();
        for i in 0..6 {
            let offset = (i as f64) * 1.5 - 4.0;
            ids.push(w.add_shape(Shape::sphere().with_transform(translation(offset, 0.0, 0.0))));
        }
        let g = w.add_shape(Shape::group());
        for &id in &ids {
            w.add_child(g, id);
        }
        let before = bounds_of(&w, g);
        w.divide(g, 2);
        let after = bounds_of(&w, g);
        assert_eq!(before.min, after.min);
        assert_eq!(before.max, after.max);
        // every leaf still sits inside the top-level box after re-homing
        for &id in &ids {
            assert!(after.contains_box(&w[id].parent_space_bounds()));
        }
    }
}
