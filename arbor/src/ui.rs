//! Frame driver: owns the root node and the tree, and runs one frame at a time.

use std::rc::Rc;

use crate::actions;
use crate::backend::{Backend, MouseButton};
use crate::input::{Bindings, InputActionId, InputOrigin, InputStroke, Navigator};
use crate::layout::Rect;
use crate::node::{find_node_mut, Node, NodeBox, NodeId};
use crate::tree::LayoutTree;
use crate::types::{default_theme, Theme};

/// Settings for a [`Ui`].
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Theme for nodes that don't set their own. Defaults to
    /// [`default_theme`].
    pub theme: Option<Theme>,
    /// Seed the tree with the default input bindings.
    pub default_bindings: bool,
    /// Bindings added on top of the defaults.
    pub bindings: Vec<(InputActionId, InputStroke)>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: None,
            default_bindings: true,
            bindings: Vec::new(),
        }
    }
}

impl UiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Start with an empty binding table.
    pub fn without_default_bindings(mut self) -> Self {
        self.default_bindings = false;
        self
    }

    pub fn bind(mut self, action: impl Into<InputActionId>, stroke: InputStroke) -> Self {
        self.bindings.push((action.into(), stroke));
        self
    }
}

/// A node tree bound to a backend.
///
/// ```
/// use arbor::backend::HeadlessBackend;
/// use arbor::node::Space;
/// use arbor::Ui;
///
/// let mut ui = Ui::new(Space::col(), HeadlessBackend::default());
/// ui.draw_frame();
/// ```
pub struct Ui {
    root: NodeBox,
    tree: LayoutTree,
    theme: Rc<Theme>,
    first_frame: bool,
}

impl Ui {
    pub fn new(root: impl Node + 'static, backend: impl Backend) -> Self {
        Self::with_config(root, backend, UiConfig::default())
    }

    pub fn with_config(root: impl Node + 'static, backend: impl Backend, config: UiConfig) -> Self {
        let mut bindings = if config.default_bindings {
            Bindings::with_defaults()
        } else {
            Bindings::new()
        };
        for (action, stroke) in config.bindings {
            bindings.bind(action, stroke);
        }

        let root: NodeBox = Box::new(root);
        let mut tree = LayoutTree::with_bindings(Box::new(backend), bindings);
        tree.set_root(root.base().id());

        Self {
            root,
            tree,
            theme: Rc::new(config.theme.unwrap_or_else(default_theme)),
            first_frame: true,
        }
    }

    /// Run one frame: layout if needed, draw, then handle input.
    pub fn draw_frame(&mut self) {
        let Self {
            root,
            tree,
            theme,
            first_frame,
        } = self;
        let root = root.as_mut();

        tree.backend_mut().begin_frame();
        let requested = tree.begin_frame();

        let size = tree.backend().window_size();
        if *first_frame || requested || tree.backend().has_just_resized() {
            log::debug!("[layout] resizing tree to {}x{}", size.x, size.y);
            root.resize(tree, theme, size);
            *first_frame = false;
        }

        let viewport = Rect::from_size(size);
        actions::run_before_tree(tree, root, viewport);
        root.draw(tree, viewport);
        tree.finish_walk();
        actions::run_after_tree(tree);

        let cursor = tree.pointer_cursor();
        if tree.backend().cursor_icon() != cursor {
            tree.backend_mut().set_cursor_icon(cursor);
        }

        Self::dispatch_mouse(root, tree);
        Self::dispatch_keyboard(root, tree);

        tree.backend_mut().end_frame();
    }

    fn dispatch_mouse(root: &mut dyn Node, tree: &mut LayoutTree) {
        let Some(hover) = tree.hover() else {
            return;
        };
        // Pressed over one node and released over another: nobody gets it
        if tree.pointer_target() != Some(hover) {
            return;
        }
        let Some(node) = find_node_mut(root, hover) else {
            return;
        };

        if tree.backend().mouse_state(MouseButton::Left).is_pressed()
            && node.as_focusable_mut().is_some()
        {
            tree.set_focus(Some(hover));
        }

        if let Some(hoverable) = node.as_hoverable_mut() {
            if !hoverable.run_input_actions(tree, InputOrigin::Hover) {
                hoverable.mouse_impl(tree);
            }
        }
    }

    fn dispatch_keyboard(root: &mut dyn Node, tree: &mut LayoutTree) {
        let focused = tree.focus().and_then(|focus| find_node_mut(root, focus));
        let Some(focusable) = focused.and_then(|node| node.as_focusable_mut()) else {
            Navigator::run(tree);
            return;
        };

        if focusable.run_input_actions(tree, InputOrigin::Focus) {
            return;
        }
        if Navigator::run(tree) {
            return;
        }
        focusable.focus_impl(tree);
    }

    pub fn tree(&self) -> &LayoutTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut LayoutTree {
        &mut self.tree
    }

    pub fn root(&self) -> &dyn Node {
        self.root.as_ref()
    }

    pub fn root_mut(&mut self) -> &mut dyn Node {
        self.root.as_mut()
    }

    /// Look a node up by id.
    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut dyn Node> {
        find_node_mut(self.root.as_mut(), id)
    }

    /// Run `f` with a node and the tree, e.g. to focus a node or change it
    /// between frames.
    pub fn with_node<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn Node, &mut LayoutTree) -> R,
    ) -> Option<R> {
        let node = find_node_mut(self.root.as_mut(), id)?;
        Some(f(node, &mut self.tree))
    }

    /// Focus a node by id. Returns false if it isn't focusable.
    pub fn focus(&mut self, id: NodeId) -> bool {
        self.with_node(id, |node, tree| node.focus(tree)).unwrap_or(false)
    }

    pub fn backend(&self) -> &dyn Backend {
        self.tree.backend()
    }

    /// The backend as its concrete type.
    pub fn backend_as<B: Backend>(&self) -> Option<&B> {
        self.tree.backend().as_any().downcast_ref()
    }

    pub fn backend_as_mut<B: Backend>(&mut self) -> Option<&mut B> {
        self.tree.backend_mut().as_any_mut().downcast_mut()
    }
}

impl std::fmt::Debug for Ui {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ui")
            .field("root", &self.root.base().id())
            .field("tree", &self.tree)
            .finish_non_exhaustive()
    }
}
