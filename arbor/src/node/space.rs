use std::rc::Rc;

use super::{Children, Node, NodeBase, NodeBox, NodeId};
use crate::layout::{Layout, Rect, Vector2};
use crate::tree::LayoutTree;
use crate::types::Theme;

/// Lays its children out in a row or a column.
///
/// Children with `expand == 0` get their minimum size along the main axis.
/// Expanding children share what is left, proportionally to their weight:
/// in a 250 wide row holding `{0 (min 50), 1, 1}` the last two get 100 each.
#[derive(Debug)]
pub struct Space {
    base: NodeBase,
    children: Children,
    axis: usize,
    gap: f32,
}

impl Space {
    fn new(axis: usize) -> Self {
        Self {
            base: NodeBase::default(),
            children: Children::new(),
            axis,
            gap: 0.0,
        }
    }

    pub fn row() -> Self {
        Self::new(0)
    }

    pub fn col() -> Self {
        Self::new(1)
    }

    pub fn is_row(&self) -> bool {
        self.axis == 0
    }

    pub fn id(&self) -> NodeId {
        self.base.id()
    }

    /// Space between visible children.
    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.base.set_layout(layout);
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.base.set_theme(Rc::new(theme));
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.base.set_disabled(disabled);
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.base.set_hidden(hidden);
        self
    }

    pub fn child(mut self, node: impl Node + 'static) -> Self {
        self.children.push(node);
        self
    }

    pub fn with_children(mut self, nodes: impl IntoIterator<Item = NodeBox>) -> Self {
        for node in nodes {
            self.children.push_boxed(node);
        }
        self
    }

    pub fn nodes(&self) -> &Children {
        &self.children
    }

    /// Direct access to the children. Call
    /// [`NodeBase::update_size`] after changing them.
    pub fn nodes_mut(&mut self) -> &mut Children {
        &mut self.children
    }

    pub fn push(&mut self, node: impl Node + 'static) {
        self.children.push(node);
        self.base.update_size();
    }

    pub fn insert(&mut self, index: usize, node: NodeBox) {
        self.children.insert(index, node);
        self.base.update_size();
    }

    pub fn remove_at(&mut self, index: usize) -> NodeBox {
        let node = self.children.remove_at(index);
        self.base.update_size();
        node
    }

    pub fn clear(&mut self) {
        self.children.clear();
        self.base.update_size();
    }

    /// Main axis space taken by fixed children and gaps, and the sum of
    /// expand weights.
    fn reserved(&self) -> (f32, u32) {
        let mut reserved = 0.0;
        let mut denominator = 0;
        let mut visible = 0usize;

        for child in self.children.iter() {
            let base = child.base();
            if base.is_hidden() {
                continue;
            }
            visible += 1;
            match base.layout().expand {
                0 => reserved += base.min_size().axis(self.axis),
                expand => denominator += expand,
            }
        }

        let gaps = self.gap * visible.saturating_sub(1) as f32;
        (reserved + gaps, denominator)
    }
}

impl Node for Space {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "space"
    }

    fn resize_impl(&mut self, tree: &mut LayoutTree, theme: &Rc<Theme>, space: Vector2) -> Vector2 {
        self.children.compact();

        let main = self.axis;
        let cross = 1 - main;

        // Expanding children need room for their minimum at the shared rate,
        // so the widest one per unit of weight sets the rate for all
        let mut per_unit: f32 = 0.0;
        let mut cross_size: f32 = 0.0;

        for child in self.children.iter_mut() {
            let size = child.resize(tree, theme, space);
            let base = child.base();
            if base.is_hidden() {
                continue;
            }
            cross_size = cross_size.max(size.axis(cross));
            let expand = base.layout().expand;
            if expand > 0 {
                per_unit = per_unit.max(size.axis(main) / expand as f32);
            }
        }

        let (reserved, denominator) = self.reserved();

        let mut size = Vector2::ZERO;
        *size.axis_mut(main) = reserved + per_unit * denominator as f32;
        *size.axis_mut(cross) = cross_size;
        size
    }

    fn draw_impl(&mut self, tree: &mut LayoutTree, _outer: Rect, inner: Rect) {
        self.children.compact();

        let main = self.axis;
        let (reserved, denominator) = self.reserved();
        let leftover = (inner.size().axis(main) - reserved).max(0.0);
        let gap = self.gap;

        let mut cursor = inner.start().axis(main);
        let mut first = true;

        self.children.lock();
        for child in self.children.iter_mut() {
            if child.base().is_hidden() {
                continue;
            }
            if !first {
                cursor += gap;
            }
            first = false;

            let length = match child.base().layout().expand {
                0 => child.base().min_size().axis(main),
                expand => leftover * expand as f32 / denominator as f32,
            };

            let slot = if main == 0 {
                Rect::new(cursor, inner.y, length, inner.height)
            } else {
                Rect::new(inner.x, cursor, inner.width, length)
            };
            child.draw(tree, slot);
            cursor += length;
        }
        self.children.unlock();
    }

    fn children(&self) -> &[NodeBox] {
        self.children.as_slice()
    }

    fn children_mut(&mut self) -> &mut [NodeBox] {
        self.children.as_mut_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "cannot mutate children while the tree is being drawn")]
    fn locked_children_reject_push() {
        let mut space = Space::row();
        space.nodes_mut().lock();
        space.push(Space::col());
    }

    #[test]
    fn builders_keep_order() {
        let a = Space::col();
        let b = Space::col();
        let (a_id, b_id) = (a.id(), b.id());
        let row = Space::row().gap(1.0).child(a).child(b);
        let ids: Vec<NodeId> = row.nodes().iter().map(|node| node.base().id()).collect();
        assert_eq!(ids, vec![a_id, b_id]);
        assert!(row.is_row());
    }
}
