//! Hover and focus capabilities, and the per-frame focus navigation data.

use crate::input::InputOrigin;
use crate::layout::Rect;
use crate::node::NodeId;
use crate::tree::LayoutTree;

/// A node that reacts to the mouse.
///
/// Nodes opt in through [`Node::as_hoverable_mut`](crate::node::Node::as_hoverable_mut).
pub trait Hoverable {
    /// Run the node's input actions, usually through its
    /// [`ActionTable`](crate::input::ActionTable). Returns true if one fired.
    fn run_input_actions(&mut self, _tree: &mut LayoutTree, _origin: InputOrigin) -> bool {
        false
    }

    /// Raw mouse input, called when no action fired this frame.
    fn mouse_impl(&mut self, _tree: &mut LayoutTree) -> bool {
        false
    }
}

/// A node that can hold keyboard focus.
pub trait Focusable: Hoverable {
    /// Raw keyboard and gamepad input, called when neither the node's nor the
    /// tree's navigation actions fired this frame.
    fn focus_impl(&mut self, _tree: &mut LayoutTree) -> bool {
        false
    }
}

/// A direction for positional focus navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Up,
    Down,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Up, Side::Down];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// `0` for horizontal sides, `1` for vertical.
    pub const fn axis(self) -> usize {
        match self {
            Self::Left | Self::Right => 0,
            Self::Up | Self::Down => 1,
        }
    }

    const fn sign(self) -> f32 {
        match self {
            Self::Left | Self::Up => -1.0,
            Self::Right | Self::Down => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    id: NodeId,
    priority: i64,
    distance: f32,
}

/// Focus navigation targets collected while the tree is drawn.
///
/// Reset at the start of every frame and fed every drawn node in draw order.
/// Once the walk is over it knows the previous, next, first and last
/// focusable node, and the closest one on each side of the focused node.
///
/// Positional candidates are measured against the focused node's last known
/// box. It comes from the previous walk, so nodes drawn before the focused
/// one are placed correctly even on the frame right after focus moved.
#[derive(Debug, Default)]
pub struct FocusDirection {
    focus: Option<NodeId>,
    focus_box: Option<Rect>,
    drawn: Vec<(NodeId, Rect)>,
    previous: Option<NodeId>,
    next: Option<NodeId>,
    first: Option<NodeId>,
    last: Option<NodeId>,
    positional: [Option<Candidate>; 4],
    priority: i64,
    last_depth: usize,
    passed_focus: bool,
}

impl FocusDirection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new walk. A newly focused node takes its box from the last
    /// walk it was drawn in.
    pub fn reset(&mut self, focus: Option<NodeId>) {
        let focus_box = if focus == self.focus {
            self.focus_box
        } else {
            focus.and_then(|id| self.box_of(id))
        };
        let mut drawn = std::mem::take(&mut self.drawn);
        drawn.clear();
        *self = Self {
            focus,
            focus_box,
            drawn,
            ..Self::default()
        };
    }

    /// Box a focusable node was drawn in during this walk.
    pub fn box_of(&self, id: NodeId) -> Option<Rect> {
        self.drawn
            .iter()
            .find(|(drawn, _)| *drawn == id)
            .map(|&(_, rect)| rect)
    }

    /// Record a drawn node. `focusable` is false for nodes that can't take
    /// focus right now, including disabled ones.
    pub fn visit(&mut self, id: NodeId, rect: Rect, depth: usize, focusable: bool) {
        let change = depth.abs_diff(self.last_depth) as i64;
        self.last_depth = depth;
        if self.passed_focus {
            self.priority -= change;
        } else {
            self.priority += change;
        }

        if !focusable {
            return;
        }

        self.drawn.push((id, rect));
        if self.first.is_none() {
            self.first = Some(id);
        }

        if self.focus == Some(id) {
            self.previous = self.last;
            self.next = None;
            self.passed_focus = true;
            self.focus_box = Some(rect);
            self.last = Some(id);
            return;
        }

        if self.passed_focus && self.next.is_none() {
            self.next = Some(id);
        }
        self.last = Some(id);

        if let Some(focus_box) = self.focus_box {
            for side in Side::ALL {
                self.check_direction(side, id, rect, focus_box);
            }
        }
    }

    fn check_direction(&mut self, side: Side, id: NodeId, rect: Rect, focus_box: Rect) {
        let axis = side.axis();
        let cross = 1 - axis;

        let overlaps = rect.start().axis(cross) < focus_box.end().axis(cross)
            && focus_box.start().axis(cross) < rect.end().axis(cross);
        if !overlaps {
            return;
        }

        // Both edges have to move the same way, a box that contains the
        // focused one is on no side of it
        let sign = side.sign();
        let start_offset = (rect.start().axis(axis) - focus_box.start().axis(axis)) * sign;
        let end_offset = (rect.end().axis(axis) - focus_box.end().axis(axis)) * sign;
        if start_offset <= 0.0 || end_offset <= 0.0 {
            return;
        }

        let candidate = Candidate {
            id,
            priority: self.priority,
            distance: rect.center().distance_squared(focus_box.center()),
        };

        let slot = &mut self.positional[side.index()];
        let better = match slot {
            None => true,
            Some(current) => {
                candidate.priority > current.priority
                    || (candidate.priority == current.priority
                        && candidate.distance < current.distance)
            }
        };
        if better {
            *slot = Some(candidate);
        }
    }

    /// The focused node this walk was started for.
    pub fn focus(&self) -> Option<NodeId> {
        self.focus
    }

    /// Box of the focused node, from this frame or the last one it was drawn.
    pub fn focus_box(&self) -> Option<Rect> {
        self.focus_box
    }

    /// Focusable node drawn right before the focused one.
    pub fn previous(&self) -> Option<NodeId> {
        self.previous
    }

    /// Focusable node drawn right after the focused one.
    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    pub fn first(&self) -> Option<NodeId> {
        self.first
    }

    pub fn last(&self) -> Option<NodeId> {
        self.last
    }

    /// Best candidate on the given side of the focused node.
    pub fn positional(&self, side: Side) -> Option<NodeId> {
        self.positional[side.index()].map(|candidate| candidate.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(focus: Option<NodeId>, nodes: &[(NodeId, Rect)]) -> FocusDirection {
        let mut direction = FocusDirection::new();
        // Two walks, so the focus box is known from the start of the second
        for _ in 0..2 {
            direction.reset(focus);
            for &(id, rect) in nodes {
                direction.visit(id, rect, 1, true);
            }
        }
        direction
    }

    #[test]
    fn right_needs_overlap() {
        let a = NodeId::new();
        let b = NodeId::new();
        let focused = Rect::new(0.0, 10.0, 10.0, 10.0);

        let beside = walk(Some(a), &[(a, focused), (b, Rect::new(20.0, 15.0, 10.0, 10.0))]);
        assert_eq!(beside.positional(Side::Right), Some(b));
        assert_eq!(beside.positional(Side::Left), None);

        let above = walk(Some(a), &[(a, focused), (b, Rect::new(20.0, 0.0, 10.0, 5.0))]);
        assert_eq!(above.positional(Side::Right), None);
        assert_eq!(above.positional(Side::Up), None);
    }

    #[test]
    fn containing_box_is_on_no_side() {
        let a = NodeId::new();
        let b = NodeId::new();
        let direction = walk(
            Some(a),
            &[
                (b, Rect::new(0.0, 0.0, 100.0, 100.0)),
                (a, Rect::new(10.0, 10.0, 10.0, 10.0)),
            ],
        );
        for side in Side::ALL {
            assert_eq!(direction.positional(side), None, "{side:?}");
        }
    }

    #[test]
    fn closer_candidate_wins_on_equal_priority() {
        let a = NodeId::new();
        let near = NodeId::new();
        let far = NodeId::new();
        let direction = walk(
            Some(a),
            &[
                (a, Rect::new(0.0, 0.0, 10.0, 10.0)),
                (far, Rect::new(0.0, 50.0, 10.0, 10.0)),
                (near, Rect::new(0.0, 20.0, 10.0, 10.0)),
            ],
        );
        // Same depth everywhere, so priority is equal
        assert_eq!(direction.positional(Side::Down), Some(near));
    }

    #[test]
    fn previous_next_first_last() {
        let ids: Vec<NodeId> = (0..4).map(|_| NodeId::new()).collect();
        let nodes: Vec<(NodeId, Rect)> = ids
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, Rect::new(i as f32 * 10.0, 0.0, 10.0, 10.0)))
            .collect();

        let direction = walk(Some(ids[1]), &nodes);
        assert_eq!(direction.previous(), Some(ids[0]));
        assert_eq!(direction.next(), Some(ids[2]));
        assert_eq!(direction.first(), Some(ids[0]));
        assert_eq!(direction.last(), Some(ids[3]));

        let at_end = walk(Some(ids[3]), &nodes);
        assert_eq!(at_end.next(), None);
        assert_eq!(at_end.previous(), Some(ids[2]));

        let at_start = walk(Some(ids[0]), &nodes);
        assert_eq!(at_start.previous(), None);
    }

    #[test]
    fn focus_box_follows_focus_change() {
        let a = NodeId::new();
        let b = NodeId::new();
        let b_box = Rect::new(10.0, 0.0, 5.0, 5.0);
        let mut direction = walk(Some(a), &[(a, Rect::new(0.0, 0.0, 5.0, 5.0)), (b, b_box)]);

        direction.reset(Some(b));
        assert_eq!(direction.focus_box(), Some(b_box));

        direction.reset(Some(NodeId::new()));
        assert_eq!(direction.focus_box(), None, "never drawn, so no box");
    }

    #[test]
    fn earlier_nodes_are_placed_right_after_focus_moves() {
        let a = NodeId::new();
        let b = NodeId::new();
        let a_box = Rect::new(0.0, 0.0, 5.0, 5.0);
        let b_box = Rect::new(10.0, 0.0, 5.0, 5.0);

        // One walk focused on a, then focus jumps to b
        let mut direction = FocusDirection::new();
        direction.reset(Some(a));
        direction.visit(a, a_box, 1, true);
        direction.visit(b, b_box, 1, true);

        direction.reset(Some(b));
        direction.visit(a, a_box, 1, true);
        direction.visit(b, b_box, 1, true);
        assert_eq!(direction.positional(Side::Left), Some(a));
    }

    #[test]
    fn unfocusable_nodes_only_shift_priority() {
        let a = NodeId::new();
        let plain = NodeId::new();
        let mut direction = FocusDirection::new();
        direction.reset(Some(a));
        direction.visit(a, Rect::new(0.0, 0.0, 5.0, 5.0), 1, true);
        direction.visit(plain, Rect::new(10.0, 0.0, 5.0, 5.0), 2, false);
        assert_eq!(direction.next(), None);
        assert_eq!(direction.positional(Side::Right), None);
        assert_eq!(direction.last(), Some(a));
    }
}
