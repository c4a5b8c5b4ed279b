use std::collections::HashMap;
use std::sync::OnceLock;

use super::{default_bindings, CoreAction, InputAction, InputActionId, InputStroke};
use crate::focus::Side;
use crate::tree::LayoutTree;

/// Where a node's input came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOrigin {
    /// The node is under the pointer; only mouse strokes apply.
    Hover,
    /// The node has focus; only keyboard and gamepad strokes apply.
    Focus,
}

impl InputOrigin {
    pub fn accepts(self, stroke: &InputStroke) -> bool {
        match self {
            Self::Hover => stroke.is_mouse(),
            Self::Focus => !stroke.is_mouse(),
        }
    }
}

/// Strokes bound to each action.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    map: HashMap<InputActionId, Vec<InputStroke>>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table seeded with [`default_bindings`].
    pub fn with_defaults() -> Self {
        let mut bindings = Self::new();
        for (action, strokes) in default_bindings() {
            bindings.bind_many(action, strokes);
        }
        bindings
    }

    /// Add a stroke to the action. Earlier strokes are checked first.
    pub fn bind(&mut self, action: impl Into<InputActionId>, stroke: InputStroke) {
        self.map.entry(action.into()).or_default().push(stroke);
    }

    pub fn bind_many(
        &mut self,
        action: impl Into<InputActionId>,
        strokes: impl IntoIterator<Item = InputStroke>,
    ) {
        self.map.entry(action.into()).or_default().extend(strokes);
    }

    /// Remove every stroke bound to the action.
    pub fn clear_bound(&mut self, action: impl Into<InputActionId>) {
        self.map.remove(&action.into());
    }

    pub fn clear_all(&mut self) {
        self.map.clear();
    }

    pub fn strokes(&self, action: InputActionId) -> &[InputStroke] {
        self.map.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Called with the node, the tree and the action that fired.
pub type ActionCallback<N> = fn(&mut N, &mut LayoutTree, InputActionId);

struct Handler<N> {
    actions: Vec<InputActionId>,
    while_down: bool,
    callback: ActionCallback<N>,
}

/// The input actions a node type reacts to, in priority order.
///
/// Build one per type and keep it in a `static`:
///
/// ```ignore
/// fn actions() -> &'static ActionTable<Button> {
///     static TABLE: OnceLock<ActionTable<Button>> = OnceLock::new();
///     TABLE.get_or_init(|| ActionTable::new().on(CoreAction::Press, Button::press))
/// }
/// ```
pub struct ActionTable<N> {
    handlers: Vec<Handler<N>>,
}

impl<N> Default for ActionTable<N> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

impl<N> ActionTable<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `callback` when the action triggers.
    pub fn on(self, action: impl InputAction, callback: ActionCallback<N>) -> Self {
        self.handler(vec![action.id()], false, callback)
    }

    /// Run `callback` when any of the actions triggers.
    pub fn on_any(self, actions: &[InputActionId], callback: ActionCallback<N>) -> Self {
        self.handler(actions.to_vec(), false, callback)
    }

    /// Run `callback` on every frame the action is held down.
    pub fn while_down(self, action: impl InputAction, callback: ActionCallback<N>) -> Self {
        self.handler(vec![action.id()], true, callback)
    }

    fn handler(
        mut self,
        actions: Vec<InputActionId>,
        while_down: bool,
        callback: ActionCallback<N>,
    ) -> Self {
        self.handlers.push(Handler {
            actions,
            while_down,
            callback,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run at most one handler for this frame's input.
    ///
    /// For each handler action, the first bound stroke (matching the origin)
    /// that is held down decides: the handler runs if that stroke is active,
    /// or regardless for `while_down` handlers. Returns true if one ran.
    pub fn dispatch(&self, node: &mut N, tree: &mut LayoutTree, origin: InputOrigin) -> bool {
        for handler in &self.handlers {
            for &action in &handler.actions {
                let fire = {
                    let io = tree.backend();
                    let held = tree
                        .bound_strokes(action)
                        .iter()
                        .filter(|stroke| origin.accepts(stroke))
                        .find(|stroke| stroke.is_down(io));
                    match held {
                        Some(stroke) => handler.while_down || stroke.is_active(io),
                        None => false,
                    }
                };

                if fire {
                    log::debug!("[input] {} fired ({origin:?})", action.name());
                    (handler.callback)(node, tree, action);
                    return true;
                }
            }
        }
        false
    }
}

/// Tree-wide focus navigation, run after the focused node declined input.
#[derive(Debug, Default)]
pub struct Navigator;

impl Navigator {
    pub fn actions() -> &'static ActionTable<Navigator> {
        static TABLE: OnceLock<ActionTable<Navigator>> = OnceLock::new();
        // shift+tab also holds tab, so previous has to come first
        TABLE.get_or_init(|| {
            ActionTable::<Navigator>::new()
                .on(CoreAction::FocusPrevious, |_, tree, _| {
                    tree.focus_previous();
                })
                .on(CoreAction::FocusNext, |_, tree, _| {
                    tree.focus_next();
                })
                .on(CoreAction::FocusLeft, |_, tree, _| {
                    tree.focus_towards(Side::Left);
                })
                .on(CoreAction::FocusRight, |_, tree, _| {
                    tree.focus_towards(Side::Right);
                })
                .on(CoreAction::FocusUp, |_, tree, _| {
                    tree.focus_towards(Side::Up);
                })
                .on(CoreAction::FocusDown, |_, tree, _| {
                    tree.focus_towards(Side::Down);
                })
        })
    }

    /// Dispatch navigation input against the tree.
    pub fn run(tree: &mut LayoutTree) -> bool {
        Self::actions().dispatch(&mut Navigator, tree, InputOrigin::Focus)
    }
}
