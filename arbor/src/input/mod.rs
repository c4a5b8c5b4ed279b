//! Input strokes, action identities and their per-frame resolution.
//!
//! Physical inputs are combined into [`InputStroke`]s, which the tree's
//! [`Bindings`] map to [`InputActionId`]s. Nodes declare which actions they
//! handle in an [`ActionTable`], and once a frame the table picks at most one
//! action to run.

mod action;
mod table;

use std::fmt;
use std::str::FromStr;

pub use action::{default_bindings, CoreAction, InputAction, InputActionId};
pub use table::{ActionCallback, ActionTable, Bindings, InputOrigin, Navigator};

use crate::backend::{Backend, GamepadButton, KeyboardKey, MouseButton};
use crate::error::StrokeParseError;

/// A single physical input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputItem {
    Keyboard(KeyboardKey),
    Mouse(MouseButton),
    Gamepad(GamepadButton),
}

impl InputItem {
    /// Held down. Mouse buttons still count on the frame they are released.
    pub fn is_down(self, io: &dyn Backend) -> bool {
        match self {
            Self::Keyboard(key) => io.key_state(key).is_held(),
            Self::Mouse(button) => !io.mouse_state(button).is_up(),
            Self::Gamepad(button) => io.gamepad_state(button).is_held(),
        }
    }

    /// Fires this frame: keys and gamepad buttons on press or repeat, mouse
    /// buttons on release.
    pub fn is_triggered(self, io: &dyn Backend) -> bool {
        match self {
            Self::Keyboard(key) => io.key_state(key).is_pressed() || io.key_repeated(key),
            Self::Mouse(button) => io.mouse_state(button).is_released(),
            Self::Gamepad(button) => {
                io.gamepad_state(button).is_pressed() || io.gamepad_repeated(button)
            }
        }
    }

    pub fn is_mouse(self) -> bool {
        matches!(self, Self::Mouse(_))
    }
}

impl From<KeyboardKey> for InputItem {
    fn from(key: KeyboardKey) -> Self {
        Self::Keyboard(key)
    }
}

impl From<MouseButton> for InputItem {
    fn from(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

impl From<GamepadButton> for InputItem {
    fn from(button: GamepadButton) -> Self {
        Self::Gamepad(button)
    }
}

impl fmt::Display for InputItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyboard(key) => f.write_str(key.name()),
            Self::Mouse(button) => write!(f, "mouse-{}", button.name()),
            Self::Gamepad(button) => write!(f, "gamepad-{}", button.name()),
        }
    }
}

impl FromStr for InputItem {
    type Err = StrokeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let unknown = || StrokeParseError::UnknownInput(name.to_string());

        if let Some(button) = name.strip_prefix("mouse-") {
            return MouseButton::from_name(button)
                .map(Self::Mouse)
                .ok_or_else(unknown);
        }
        if let Some(button) = name.strip_prefix("gamepad-") {
            return GamepadButton::from_name(button)
                .map(Self::Gamepad)
                .ok_or_else(unknown);
        }
        KeyboardKey::from_name(name)
            .map(Self::Keyboard)
            .ok_or_else(unknown)
    }
}

/// An ordered, non-empty combination of inputs, e.g. `ctrl+enter`.
///
/// Every item but the last acts as a modifier that must be held; the last
/// item is the trigger.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputStroke {
    modifiers: Vec<InputItem>,
    trigger: InputItem,
}

impl InputStroke {
    /// Panics if `items` is empty.
    pub fn new(items: impl IntoIterator<Item = InputItem>) -> Self {
        let mut modifiers: Vec<InputItem> = items.into_iter().collect();
        let Some(trigger) = modifiers.pop() else {
            panic!("input stroke must contain at least one input");
        };
        Self { modifiers, trigger }
    }

    pub fn key(key: KeyboardKey) -> Self {
        Self::single(InputItem::Keyboard(key))
    }

    pub fn mouse(button: MouseButton) -> Self {
        Self::single(InputItem::Mouse(button))
    }

    pub fn gamepad(button: GamepadButton) -> Self {
        Self::single(InputItem::Gamepad(button))
    }

    pub fn single(item: InputItem) -> Self {
        Self {
            modifiers: Vec::new(),
            trigger: item,
        }
    }

    /// Prepend a modifier that has to be held along with the rest.
    pub fn with(mut self, modifier: impl Into<InputItem>) -> Self {
        self.modifiers.insert(0, modifier.into());
        self
    }

    pub fn modifiers(&self) -> &[InputItem] {
        &self.modifiers
    }

    pub fn trigger(&self) -> InputItem {
        self.trigger
    }

    pub fn items(&self) -> impl Iterator<Item = InputItem> + '_ {
        self.modifiers.iter().copied().chain(std::iter::once(self.trigger))
    }

    pub fn len(&self) -> usize {
        self.modifiers.len() + 1
    }

    /// Strokes are never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Mouse strokes go to the hovered node, the rest to the focused one.
    pub fn is_mouse(&self) -> bool {
        self.trigger.is_mouse()
    }

    /// Every item is held.
    pub fn is_down(&self, io: &dyn Backend) -> bool {
        self.items().all(|item| item.is_down(io))
    }

    /// Every modifier is held and the trigger fires this frame.
    pub fn is_active(&self, io: &dyn Backend) -> bool {
        self.modifiers.iter().all(|item| item.is_down(io)) && self.trigger.is_triggered(io)
    }
}

impl From<InputItem> for InputStroke {
    fn from(item: InputItem) -> Self {
        Self::single(item)
    }
}

impl From<KeyboardKey> for InputStroke {
    fn from(key: KeyboardKey) -> Self {
        Self::key(key)
    }
}

impl From<MouseButton> for InputStroke {
    fn from(button: MouseButton) -> Self {
        Self::mouse(button)
    }
}

impl From<GamepadButton> for InputStroke {
    fn from(button: GamepadButton) -> Self {
        Self::gamepad(button)
    }
}

impl fmt::Display for InputStroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.modifiers {
            write!(f, "{item}+")?;
        }
        write!(f, "{}", self.trigger)
    }
}

impl FromStr for InputStroke {
    type Err = StrokeParseError;

    /// Parse `+`-separated inputs: `ctrl+enter`, `mouse-left`, `gamepad-a`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(StrokeParseError::Empty);
        }

        let items = s
            .split('+')
            .map(str::parse::<InputItem>)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(items))
    }
}
