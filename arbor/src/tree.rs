//! Shared state of a node tree.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::actions::{ActionQueue, TreeAction};
use crate::backend::{Backend, ButtonState, MouseButton};
use crate::focus::{FocusDirection, Side};
use crate::input::{Bindings, InputActionId, InputStroke};
use crate::layout::{Rect, Vector2};
use crate::node::NodeId;
use crate::types::CursorIcon;

/// Action waiting in a [`TreeHandle`] until the next frame picks it up.
pub(crate) struct DetachedAction {
    pub action: Box<dyn TreeAction>,
    pub scope: Option<NodeId>,
}

#[derive(Default)]
struct TreeShared {
    resize_requested: Cell<bool>,
    queued: RefCell<Vec<DetachedAction>>,
}

/// Non-owning reference to a tree, kept by every node that took part in a
/// resize. Lets nodes request a relayout or queue actions outside of a draw.
#[derive(Clone)]
pub struct TreeHandle(Weak<TreeShared>);

impl TreeHandle {
    /// Relayout the tree on the next frame.
    pub fn request_resize(&self) {
        if let Some(shared) = self.0.upgrade() {
            shared.resize_requested.set(true);
        }
    }

    /// Queue an action, run from the next frame on. `scope` limits the draw
    /// hooks to that node's subtree.
    pub fn queue_action(&self, action: Box<dyn TreeAction>, scope: Option<NodeId>) {
        match self.0.upgrade() {
            Some(shared) => shared
                .queued
                .borrow_mut()
                .push(DetachedAction { action, scope }),
            None => log::debug!("[actions] tree is gone, dropping queued action"),
        }
    }

    /// True while the tree is alive.
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    pub fn same_tree(&self, other: &TreeHandle) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

impl std::fmt::Debug for TreeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}

/// State shared by every node of one tree: the backend, hover and focus, the
/// action queue, input bindings and the draw walk's bookkeeping.
///
/// Nodes get it as `&mut LayoutTree` during resize, draw and input handling.
pub struct LayoutTree {
    shared: Rc<TreeShared>,
    backend: Box<dyn Backend>,
    root: Option<NodeId>,
    hover: Option<NodeId>,
    pointer: Option<NodeId>,
    pointer_cursor: CursorIcon,
    focus: Option<NodeId>,
    focus_drawn: bool,
    focus_direction: FocusDirection,
    pub(crate) actions: ActionQueue,
    bindings: Bindings,
    depth: usize,
    scissors: Vec<Rect>,
    disabled_branch: bool,
}

impl LayoutTree {
    /// A tree with the default input bindings.
    pub fn new(backend: Box<dyn Backend>) -> Self {
        Self::with_bindings(backend, Bindings::with_defaults())
    }

    pub fn with_bindings(backend: Box<dyn Backend>, bindings: Bindings) -> Self {
        Self {
            shared: Rc::default(),
            backend,
            root: None,
            hover: None,
            pointer: None,
            pointer_cursor: CursorIcon::Default,
            focus: None,
            focus_drawn: false,
            focus_direction: FocusDirection::new(),
            actions: ActionQueue::default(),
            bindings,
            depth: 0,
            scissors: Vec::new(),
            disabled_branch: false,
        }
    }

    pub fn handle(&self) -> TreeHandle {
        TreeHandle(Rc::downgrade(&self.shared))
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub fn backend_mut(&mut self) -> &mut dyn Backend {
        self.backend.as_mut()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn set_root(&mut self, root: NodeId) {
        self.root = Some(root);
    }

    pub fn mouse_position(&self) -> Vector2 {
        self.backend.mouse_position()
    }

    // Hover

    /// Node that receives mouse input this frame.
    ///
    /// While the primary button is held this stays on the node it was
    /// pressed over, even if the pointer moved away.
    pub fn hover(&self) -> Option<NodeId> {
        self.hover
    }

    pub fn is_hovered(&self, id: NodeId) -> bool {
        self.hover == Some(id)
    }

    /// Topmost node under the pointer this frame, regardless of capture.
    pub fn pointer_target(&self) -> Option<NodeId> {
        self.pointer
    }

    /// Cursor requested by the node under the pointer.
    pub fn pointer_cursor(&self) -> CursorIcon {
        self.pointer_cursor
    }

    fn hover_captured(&self) -> bool {
        matches!(
            self.backend.mouse_state(MouseButton::Left),
            ButtonState::Held | ButtonState::Released
        )
    }

    /// Called by nodes whose border box contains the pointer, in draw order.
    pub(crate) fn note_pointer(&mut self, id: NodeId, cursor: CursorIcon) {
        self.pointer = Some(id);
        self.pointer_cursor = cursor;
        if !self.hover_captured() {
            self.hover = Some(id);
        }
    }

    /// True if the pointer is within the current clip area.
    pub(crate) fn pointer_visible(&self) -> bool {
        let position = self.mouse_position();
        self.scissor().map_or(true, |area| area.contains(position))
    }

    // Focus

    pub fn focus(&self) -> Option<NodeId> {
        self.focus
    }

    pub fn is_focused(&self, id: NodeId) -> bool {
        self.focus == Some(id)
    }

    /// Move focus. Nodes that aren't focusable lose it on the next frame.
    pub fn set_focus(&mut self, focus: Option<NodeId>) {
        if self.focus != focus {
            log::debug!("[focus] {:?} -> {:?}", self.focus, focus);
            self.focus = focus;
        }
    }

    pub fn clear_focus(&mut self) {
        self.set_focus(None);
    }

    pub fn focus_direction(&self) -> &FocusDirection {
        &self.focus_direction
    }

    /// Focus the next focusable node, wrapping around to the first.
    pub fn focus_next(&mut self) -> bool {
        let direction = &self.focus_direction;
        let target = match self.focus {
            Some(_) => direction.next().or(direction.first()),
            None => direction.first(),
        };
        self.move_focus(target)
    }

    /// Focus the previous focusable node, wrapping around to the last.
    pub fn focus_previous(&mut self) -> bool {
        let direction = &self.focus_direction;
        let target = match self.focus {
            Some(_) => direction.previous().or(direction.last()),
            None => direction.last(),
        };
        self.move_focus(target)
    }

    /// Focus the closest node on the given side of the focused one.
    pub fn focus_towards(&mut self, side: Side) -> bool {
        if self.focus.is_none() {
            return false;
        }
        let target = self.focus_direction.positional(side);
        self.move_focus(target)
    }

    fn move_focus(&mut self, target: Option<NodeId>) -> bool {
        match target {
            Some(target) if Some(target) != self.focus => {
                self.set_focus(Some(target));
                true
            }
            _ => false,
        }
    }

    // Bindings

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut Bindings {
        &mut self.bindings
    }

    pub fn bind(&mut self, action: impl Into<InputActionId>, stroke: InputStroke) {
        self.bindings.bind(action, stroke);
    }

    pub fn bind_many(
        &mut self,
        action: impl Into<InputActionId>,
        strokes: impl IntoIterator<Item = InputStroke>,
    ) {
        self.bindings.bind_many(action, strokes);
    }

    pub fn clear_bound(&mut self, action: impl Into<InputActionId>) {
        self.bindings.clear_bound(action);
    }

    pub fn clear_all_bindings(&mut self) {
        self.bindings.clear_all();
    }

    pub fn bound_strokes(&self, action: impl Into<InputActionId>) -> &[InputStroke] {
        self.bindings.strokes(action.into())
    }

    /// True if any stroke bound to the action is held down.
    pub fn is_down(&self, action: impl Into<InputActionId>) -> bool {
        let io = self.backend();
        self.bound_strokes(action)
            .iter()
            .any(|stroke| stroke.is_down(io))
    }

    /// True if any stroke bound to the action triggers this frame.
    pub fn is_active(&self, action: impl Into<InputActionId>) -> bool {
        let io = self.backend();
        self.bound_strokes(action)
            .iter()
            .any(|stroke| stroke.is_active(io))
    }

    // Actions

    /// Queue a tree action. Queued during a hook pass, it joins from the
    /// next pass on.
    pub fn queue_action(&mut self, action: impl TreeAction, scope: Option<NodeId>) {
        self.actions.push(Box::new(action), scope);
    }

    pub(crate) fn queue_boxed(&mut self, action: Box<dyn TreeAction>, scope: Option<NodeId>) {
        self.actions.push(action, scope);
    }

    pub fn action_queue(&self) -> &ActionQueue {
        &self.actions
    }

    // Draw walk

    /// Depth of the node being drawn, the root being 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn enter(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn leave(&mut self) {
        self.depth -= 1;
    }

    /// True while drawing inside a disabled node.
    pub fn disabled_branch(&self) -> bool {
        self.disabled_branch
    }

    /// Mark the branch disabled if `disabled`; returns the previous state.
    pub(crate) fn enter_branch(&mut self, disabled: bool) -> bool {
        let previous = self.disabled_branch;
        self.disabled_branch |= disabled;
        previous
    }

    pub(crate) fn leave_branch(&mut self, previous: bool) {
        self.disabled_branch = previous;
    }

    /// Feed a drawn node to focus navigation.
    pub(crate) fn visit_focus(&mut self, id: NodeId, rect: Rect, focusable: bool) {
        self.focus_direction.visit(id, rect, self.depth, focusable);
        if focusable && self.focus == Some(id) {
            self.focus_drawn = true;
        }
    }

    /// Restrict drawing to `area`, intersected with the current clip area.
    pub fn push_scissor(&mut self, area: Rect) {
        let area = match self.scissors.last() {
            Some(current) => current.intersect(&area),
            None => area,
        };
        self.scissors.push(area);
        self.backend.set_area(area);
    }

    pub fn pop_scissor(&mut self) {
        let popped = self.scissors.pop();
        assert!(popped.is_some(), "scissor stack underflow");
        match self.scissors.last() {
            Some(&area) => self.backend.set_area(area),
            None => self.backend.restore_area(),
        }
    }

    /// Current clip area, if any.
    pub fn scissor(&self) -> Option<Rect> {
        self.scissors.last().copied()
    }

    // Frame

    /// Reset the per-frame state. Returns true if a relayout was requested.
    pub(crate) fn begin_frame(&mut self) -> bool {
        let queued = std::mem::take(&mut *self.shared.queued.borrow_mut());
        for detached in queued {
            self.actions.push(detached.action, detached.scope);
        }

        if !self.hover_captured() {
            self.hover = None;
        }
        self.pointer = None;
        self.pointer_cursor = CursorIcon::Default;
        self.focus_direction.reset(self.focus);
        self.focus_drawn = false;
        self.depth = 0;
        self.disabled_branch = false;
        if !self.scissors.is_empty() {
            log::warn!("[layout] {} scissors left on the stack", self.scissors.len());
            self.scissors.clear();
            self.backend.restore_area();
        }

        self.shared.resize_requested.replace(false)
    }

    /// Drop focus from a node that wasn't drawn as an enabled focusable.
    pub(crate) fn finish_walk(&mut self) {
        if let Some(focus) = self.focus {
            if !self.focus_drawn {
                log::debug!("[focus] {focus:?} is no longer focusable, dropping focus");
                self.focus = None;
            }
        }
    }
}

impl std::fmt::Debug for LayoutTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutTree")
            .field("root", &self.root)
            .field("hover", &self.hover)
            .field("focus", &self.focus)
            .field("actions", &self.actions.len())
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}
