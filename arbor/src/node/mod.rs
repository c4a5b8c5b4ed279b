//! Nodes and the two-pass layout protocol.
//!
//! Every frame that needs a relayout calls [`resize`](dyn Node::resize) on
//! the root, which computes each node's minimum size bottom-up. Every frame
//! then calls [`draw`](dyn Node::draw), which hands each node its final box
//! top-down and paints it.

mod children;
mod space;

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

pub use children::Children;
pub use space::Space;

use crate::actions::{self, FocusRecurse, TreeAction};
use crate::focus::{Focusable, Hoverable};
use crate::layout::{Layout, Rect, Vector2};
use crate::tree::{LayoutTree, TreeHandle};
use crate::types::{Style, StyleState, Theme};

static NEXT_NODE: AtomicU64 = AtomicU64::new(1);

/// Process-unique node identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(NEXT_NODE.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub type NodeBox = Box<dyn Node>;

/// State every node carries. Concrete nodes embed one and expose it through
/// [`Node::base`].
pub struct NodeBase {
    id: NodeId,
    layout: Layout,
    hidden: bool,
    disabled: bool,
    to_remove: bool,
    ignore_mouse: bool,
    min_size: Option<Vector2>,
    box_style: Style,
    tree: Option<TreeHandle>,
    theme: Option<Rc<Theme>>,
    theme_explicit: bool,
    pending_actions: Vec<(Box<dyn TreeAction>, bool)>,
    disabled_inherited: bool,
    last_box: Option<Rect>,
    needs_resize: bool,
}

impl Default for NodeBase {
    fn default() -> Self {
        Self::new(Layout::default())
    }
}

impl NodeBase {
    pub fn new(layout: Layout) -> Self {
        Self {
            id: NodeId::new(),
            layout,
            hidden: false,
            disabled: false,
            to_remove: false,
            ignore_mouse: false,
            min_size: None,
            box_style: Style::default(),
            tree: None,
            theme: None,
            theme_explicit: false,
            pending_actions: Vec::new(),
            disabled_inherited: false,
            last_box: None,
            needs_resize: true,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
        self.update_size();
    }

    // Visibility

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        if self.hidden != hidden {
            self.hidden = hidden;
            self.update_size();
        }
    }

    pub fn hide(&mut self) {
        self.set_hidden(true);
    }

    pub fn show(&mut self) {
        self.set_hidden(false);
    }

    /// Hide the node and have its container drop it on the next pass.
    pub fn remove(&mut self) {
        self.hide();
        self.to_remove = true;
    }

    pub fn is_removed(&self) -> bool {
        self.to_remove
    }

    // Interaction

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Disabled nodes and everything inside them ignore input and can't be
    /// focused.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Disabled itself or drawn inside a disabled node, as of the last draw.
    pub fn is_disabled_inherited(&self) -> bool {
        self.disabled_inherited
    }

    pub fn ignores_mouse(&self) -> bool {
        self.ignore_mouse
    }

    /// Let the pointer pass through to whatever is behind the node.
    pub fn set_ignore_mouse(&mut self, ignore: bool) {
        self.ignore_mouse = ignore;
    }

    // Layout state

    /// Size computed by the last resize, zero before the first one.
    pub fn min_size(&self) -> Vector2 {
        self.min_size.unwrap_or_default()
    }

    pub fn is_resized(&self) -> bool {
        self.min_size.is_some()
    }

    /// True if the node asked for a relayout since its last resize.
    pub fn needs_resize(&self) -> bool {
        self.needs_resize
    }

    /// Border box of the last draw.
    pub fn last_box(&self) -> Option<Rect> {
        self.last_box
    }

    pub fn tree(&self) -> Option<&TreeHandle> {
        self.tree.as_ref()
    }

    /// Ask for the tree to be resized before the next draw.
    pub fn update_size(&mut self) {
        self.needs_resize = true;
        if let Some(tree) = &self.tree {
            tree.request_resize();
        }
    }

    // Theme

    pub fn theme(&self) -> Option<&Rc<Theme>> {
        self.theme.as_ref()
    }

    /// Use `theme` for this node and its subtree instead of the inherited one.
    pub fn set_theme(&mut self, theme: impl Into<Rc<Theme>>) {
        self.theme = Some(theme.into());
        self.theme_explicit = true;
        self.update_size();
    }

    pub fn style_state(&self, tree: &LayoutTree) -> StyleState {
        StyleState {
            hovered: tree.is_hovered(self.id),
            focused: tree.is_focused(self.id),
            disabled: self.disabled || self.disabled_inherited,
        }
    }

    /// The node's current style from its theme.
    pub fn style(&self, kind: &str, tree: &LayoutTree) -> Style {
        match &self.theme {
            Some(theme) => theme.pick(kind, self.style_state(tree)).clone(),
            None => Style::default(),
        }
    }

    // Actions

    /// Queue a tree action, scoped to this node's subtree if `scoped`.
    ///
    /// Before the node joins a tree the action is held back and queued on
    /// its first resize.
    pub fn queue_action(&mut self, action: impl TreeAction, scoped: bool) {
        let scope = scoped.then_some(self.id);
        match &self.tree {
            Some(tree) => tree.queue_action(Box::new(action), scope),
            None => self.pending_actions.push((Box::new(action), scoped)),
        }
    }

    /// Focus the first (or with `last`, the last) enabled focusable node in
    /// this subtree, this node included.
    pub fn focus_recurse(&mut self, last: bool) {
        let action = if last {
            FocusRecurse::last()
        } else {
            FocusRecurse::first()
        };
        self.queue_action(action, true);
    }

    fn attach(&mut self, tree: &mut LayoutTree, inherited: &Rc<Theme>) -> Rc<Theme> {
        let handle_matches = self
            .tree
            .as_ref()
            .is_some_and(|handle| handle.same_tree(&tree.handle()));
        if !handle_matches {
            self.tree = Some(tree.handle());
        }

        for (action, scoped) in self.pending_actions.drain(..) {
            tree.queue_boxed(action, scoped.then_some(self.id));
        }

        if !self.theme_explicit {
            self.theme = Some(Rc::clone(inherited));
        }
        self.needs_resize = false;
        self.theme.clone().unwrap_or_else(|| Rc::clone(inherited))
    }
}

impl fmt::Debug for NodeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeBase")
            .field("id", &self.id)
            .field("layout", &self.layout)
            .field("hidden", &self.hidden)
            .field("disabled", &self.disabled)
            .field("to_remove", &self.to_remove)
            .field("min_size", &self.min_size)
            .finish_non_exhaustive()
    }
}

/// A node in the tree.
///
/// Implementors provide the two layout hooks; the inherent
/// [`resize`](dyn Node::resize) and [`draw`](dyn Node::draw) wrap them with
/// box metrics, hover, focus, clipping and tree actions.
pub trait Node {
    fn base(&self) -> &NodeBase;

    fn base_mut(&mut self) -> &mut NodeBase;

    /// Key used to look the node's style up in the theme.
    fn kind(&self) -> &'static str {
        "node"
    }

    /// Compute the content size given the space left after box metrics.
    /// Containers resize their children here.
    fn resize_impl(&mut self, tree: &mut LayoutTree, theme: &Rc<Theme>, space: Vector2)
        -> Vector2;

    /// Paint the content. `outer` is the padding box, `inner` the content box.
    fn draw_impl(&mut self, tree: &mut LayoutTree, outer: Rect, inner: Rect);

    fn children(&self) -> &[NodeBox] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [NodeBox] {
        &mut []
    }

    fn as_hoverable_mut(&mut self) -> Option<&mut dyn Hoverable> {
        None
    }

    fn as_focusable_mut(&mut self) -> Option<&mut dyn Focusable> {
        None
    }
}

impl<'a> dyn Node + 'a {
    /// Compute and cache the node's minimum size for `available` space.
    pub fn resize(
        &mut self,
        tree: &mut LayoutTree,
        theme: &Rc<Theme>,
        available: Vector2,
    ) -> Vector2 {
        let kind = self.kind();
        let base = self.base_mut();
        let theme = base.attach(tree, theme);

        if base.hidden {
            base.min_size = Some(Vector2::ZERO);
            return Vector2::ZERO;
        }

        let style = theme.pick(kind, base.style_state(tree)).clone();
        let metrics = style.box_metrics();
        let extra = Vector2::new(
            f32::from(metrics.horizontal_total()),
            f32::from(metrics.vertical_total()),
        );
        base.box_style = style;

        let inner = Vector2::new(
            (available.x - extra.x).max(0.0),
            (available.y - extra.y).max(0.0),
        );
        let content = self.resize_impl(tree, &theme, inner);
        let id = self.base().id;
        assert!(
            content.is_finite(),
            "{kind} {id} reported a non-finite size {content:?}"
        );

        let size = content + extra;
        self.base_mut().min_size = Some(size);
        size
    }

    /// Draw the node inside `space`.
    ///
    /// Panics if the node hasn't been resized or is pending removal.
    pub fn draw(&mut self, tree: &mut LayoutTree, space: Rect) {
        let kind = self.kind();
        let base = self.base();
        let id = base.id;
        assert!(
            !base.to_remove,
            "{kind} {id} is pending removal and can't be drawn"
        );
        assert!(
            base.tree.is_some() && base.min_size.is_some(),
            "{kind} {id} was drawn before being resized"
        );
        if base.hidden {
            return;
        }

        let margin_box = base.layout.place(space, base.min_size());
        let border_box = margin_box.shrink(&base.box_style.margin);
        let padding_box = border_box.shrink(&base.box_style.border);
        let content_box = padding_box.shrink(&base.box_style.padding);
        let overflows = base.min_size().x > space.width || base.min_size().y > space.height;
        let ignore_mouse = base.ignore_mouse;

        let focusable = self.as_focusable_mut().is_some();
        let base = self.base_mut();
        let branch = tree.enter_branch(base.disabled);
        let disabled = tree.disabled_branch();
        base.disabled_inherited = disabled;
        base.last_box = Some(border_box);

        let style = base.style(kind, tree);
        if !ignore_mouse
            && !disabled
            && border_box.contains(tree.mouse_position())
            && tree.pointer_visible()
        {
            tree.note_pointer(id, style.cursor);
        }
        tree.visit_focus(id, border_box, focusable && !disabled);

        if overflows {
            tree.push_scissor(space);
        }

        actions::run_before_draw(tree, self, space);
        // Hooks may change hover or focus
        let style = self.base().style(kind, tree);
        style.draw_background(tree.backend_mut(), border_box);

        tree.enter();
        self.draw_impl(tree, padding_box, content_box);
        tree.leave();

        actions::run_after_draw(tree, self, space);

        if overflows {
            tree.pop_scissor();
        }
        tree.leave_branch(branch);
    }

    /// Give this node focus if it can take it.
    pub fn focus(&mut self, tree: &mut LayoutTree) -> bool {
        let id = self.base().id;
        let enabled = !self.base().disabled && !self.base().disabled_inherited;
        if enabled && self.as_focusable_mut().is_some() {
            tree.set_focus(Some(id));
            true
        } else {
            false
        }
    }

    pub fn is_focused(&self, tree: &LayoutTree) -> bool {
        tree.is_focused(self.base().id)
    }

    pub fn is_hovered(&self, tree: &LayoutTree) -> bool {
        tree.is_hovered(self.base().id)
    }
}

/// Find a node by id in the subtree rooted at `node`.
pub fn find_node_mut(node: &mut dyn Node, id: NodeId) -> Option<&mut dyn Node> {
    if node.base().id == id {
        return Some(node);
    }
    node.children_mut()
        .iter_mut()
        .find_map(|child| find_node_mut(child.as_mut(), id))
}

/// Find a node by id in the subtree rooted at `node`.
pub fn find_node(node: &dyn Node, id: NodeId) -> Option<&dyn Node> {
    if node.base().id == id {
        return Some(node);
    }
    node.children()
        .iter()
        .find_map(|child| find_node(child.as_ref(), id))
}
