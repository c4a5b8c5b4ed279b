//! Tree actions: visitors that hook into the draw walk.
//!
//! An action is queued on the tree, optionally scoped to a node, and gets
//! called around the whole walk and around every node's draw. Returning
//! [`ControlFlow::Break`] from any hook stops the action; it gets no further
//! calls and leaves the queue once the outermost hook pass is over.

use std::cell::Cell;
use std::ops::ControlFlow;
use std::rc::Rc;

use crate::layout::Rect;
use crate::node::{Node, NodeId};
use crate::tree::LayoutTree;

pub trait TreeAction: 'static {
    /// Before the root is drawn. Always called, scoped or not.
    fn before_tree(
        &mut self,
        _tree: &mut LayoutTree,
        _root: &mut dyn Node,
        _viewport: Rect,
    ) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// Before a node draws itself, after its box and hover state are known.
    fn before_draw(
        &mut self,
        _tree: &mut LayoutTree,
        _node: &mut dyn Node,
        _space: Rect,
    ) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// After a node and all of its children were drawn.
    fn after_draw(
        &mut self,
        _tree: &mut LayoutTree,
        _node: &mut dyn Node,
        _space: Rect,
    ) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// After the whole tree was drawn. Stops by default, so an action runs
    /// for a single frame unless it overrides this.
    fn after_tree(&mut self, _tree: &mut LayoutTree) -> ControlFlow<()> {
        ControlFlow::Break(())
    }
}

/// Where a scoped action is in the walk.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scope {
    node: Option<NodeId>,
    inside: bool,
}

impl Scope {
    /// Whether draw hooks apply to `id`, tracking entry into the scope.
    fn enter(&mut self, id: NodeId) -> bool {
        match self.node {
            None => true,
            Some(scope) => {
                if scope == id {
                    self.inside = true;
                }
                self.inside
            }
        }
    }

    fn leave(&mut self, id: NodeId) -> bool {
        match self.node {
            None => true,
            Some(scope) => {
                let inside = self.inside;
                if scope == id {
                    self.inside = false;
                }
                inside
            }
        }
    }
}

pub(crate) struct QueuedAction {
    /// Taken out while one of its own hooks runs.
    action: Option<Box<dyn TreeAction>>,
    scope: Scope,
    stopped: bool,
}

/// FIFO queue of tree actions.
///
/// Hook passes walk the live queue, so a hook that draws (a popup, say)
/// starts a nested pass that reaches every queued action except the one
/// running. Stopped actions stay in place until the outermost pass is over.
/// Actions queued during a pass are appended and join from the next pass on.
#[derive(Default)]
pub struct ActionQueue {
    entries: Vec<QueuedAction>,
    running: usize,
}

impl ActionQueue {
    pub(crate) fn push(&mut self, action: Box<dyn TreeAction>, scope: Option<NodeId>) {
        self.entries.push(QueuedAction {
            action: Some(action),
            scope: Scope {
                node: scope,
                inside: false,
            },
            stopped: false,
        });
    }

    /// Number of queued actions that haven't stopped.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.stopped).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of hook passes currently running; above 1 when a hook draws.
    pub fn running(&self) -> usize {
        self.running
    }
}

impl std::fmt::Debug for ActionQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionQueue")
            .field("len", &self.len())
            .field("running", &self.running)
            .finish()
    }
}

fn run_pass(
    tree: &mut LayoutTree,
    mut hook: impl FnMut(&mut Scope, &mut dyn TreeAction, &mut LayoutTree) -> ControlFlow<()>,
) {
    let end = tree.actions.entries.len();
    if end == 0 {
        return;
    }
    tree.actions.running += 1;

    // Entries are only appended while any pass runs, so indices stay valid
    for index in 0..end {
        let entry = &mut tree.actions.entries[index];
        if entry.stopped {
            continue;
        }
        let Some(mut action) = entry.action.take() else {
            continue;
        };
        let mut scope = entry.scope;

        let flow = hook(&mut scope, action.as_mut(), tree);

        let entry = &mut tree.actions.entries[index];
        entry.action = Some(action);
        entry.scope = scope;
        if flow.is_break() {
            entry.stopped = true;
        }
    }

    tree.actions.running -= 1;
    if tree.actions.running == 0 {
        tree.actions.entries.retain(|entry| !entry.stopped);
    }
}

pub(crate) fn run_before_tree(tree: &mut LayoutTree, root: &mut dyn Node, viewport: Rect) {
    run_pass(tree, |scope, action, tree| {
        scope.inside = false;
        action.before_tree(tree, root, viewport)
    });
}

pub(crate) fn run_before_draw(tree: &mut LayoutTree, node: &mut dyn Node, space: Rect) {
    let id = node.base().id();
    run_pass(tree, |scope, action, tree| {
        if scope.enter(id) {
            action.before_draw(tree, node, space)
        } else {
            ControlFlow::Continue(())
        }
    });
}

pub(crate) fn run_after_draw(tree: &mut LayoutTree, node: &mut dyn Node, space: Rect) {
    let id = node.base().id();
    run_pass(tree, |scope, action, tree| {
        if scope.leave(id) {
            action.after_draw(tree, node, space)
        } else {
            ControlFlow::Continue(())
        }
    });
}

pub(crate) fn run_after_tree(tree: &mut LayoutTree) {
    run_pass(tree, |_, action, tree| action.after_tree(tree));
}

/// Focus the first (or last) enabled focusable node in a subtree.
///
/// Queue it scoped to the subtree's root; see
/// [`NodeBase::focus_recurse`](crate::node::NodeBase::focus_recurse).
#[derive(Debug, Default)]
pub struct FocusRecurse {
    last: bool,
    found: Option<NodeId>,
}

impl FocusRecurse {
    pub fn first() -> Self {
        Self::default()
    }

    pub fn last() -> Self {
        Self {
            last: true,
            found: None,
        }
    }
}

impl TreeAction for FocusRecurse {
    fn before_draw(
        &mut self,
        _tree: &mut LayoutTree,
        node: &mut dyn Node,
        _space: Rect,
    ) -> ControlFlow<()> {
        let wanted = self.last || self.found.is_none();
        let enabled = !node.base().is_disabled_inherited();
        if wanted && enabled && node.as_focusable_mut().is_some() {
            self.found = Some(node.base().id());
        }
        ControlFlow::Continue(())
    }

    fn after_tree(&mut self, tree: &mut LayoutTree) -> ControlFlow<()> {
        match self.found {
            Some(id) => tree.set_focus(Some(id)),
            None => log::debug!("[focus] no focusable node to recurse into"),
        }
        ControlFlow::Break(())
    }
}

/// Report the box a node was drawn in, e.g. to scroll it into view or to
/// anchor a popup next to it.
#[derive(Debug)]
pub struct FindNodeBox {
    target: NodeId,
    result: Rc<Cell<Option<Rect>>>,
}

impl FindNodeBox {
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            result: Rc::default(),
        }
    }

    /// Filled with the node's border box once it is drawn.
    pub fn result(&self) -> Rc<Cell<Option<Rect>>> {
        Rc::clone(&self.result)
    }
}

impl TreeAction for FindNodeBox {
    fn before_draw(
        &mut self,
        _tree: &mut LayoutTree,
        node: &mut dyn Node,
        _space: Rect,
    ) -> ControlFlow<()> {
        if node.base().id() != self.target {
            return ControlFlow::Continue(());
        }
        self.result.set(node.base().last_box());
        ControlFlow::Break(())
    }
}
