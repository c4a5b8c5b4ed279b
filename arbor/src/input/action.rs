use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::InputStroke;
use crate::backend::{GamepadButton, KeyboardKey, MouseButton};

/// Identity of an input action: the enum that declares it plus the variant.
///
/// Two enums may both have a `Press` variant; their ids never compare equal.
/// The name is carried along for logging only.
#[derive(Clone, Copy)]
pub struct InputActionId {
    owner: TypeId,
    index: u32,
    name: &'static str,
}

impl InputActionId {
    pub fn of<A: InputAction>(action: A) -> Self {
        Self {
            owner: TypeId::of::<A>(),
            index: action.index(),
            name: action.name(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True if the id was declared by `A`.
    pub fn is<A: InputAction>(&self) -> bool {
        self.owner == TypeId::of::<A>()
    }
}

impl PartialEq for InputActionId {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.index == other.index
    }
}

impl Eq for InputActionId {}

impl Hash for InputActionId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.index.hash(state);
    }
}

impl fmt::Debug for InputActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InputActionId({})", self.name)
    }
}

/// An enum of input actions. Implementors are usually fieldless enums:
///
/// ```
/// use arbor::input::InputAction;
///
/// #[derive(Debug, Clone, Copy)]
/// enum EditorAction {
///     Save,
///     Reload,
/// }
///
/// impl InputAction for EditorAction {
///     fn index(self) -> u32 {
///         self as u32
///     }
///
///     fn name(self) -> &'static str {
///         match self {
///             Self::Save => "save",
///             Self::Reload => "reload",
///         }
///     }
/// }
///
/// assert_ne!(EditorAction::Save.id(), EditorAction::Reload.id());
/// ```
pub trait InputAction: Copy + 'static {
    /// Position of the variant within its enum.
    fn index(self) -> u32;

    fn name(self) -> &'static str;

    fn id(self) -> InputActionId {
        InputActionId::of(self)
    }
}

/// Actions understood by the tree and shared by most widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoreAction {
    Press,
    Submit,
    Cancel,
    ContextMenu,
    FocusPrevious,
    FocusNext,
    FocusLeft,
    FocusRight,
    FocusUp,
    FocusDown,
    EntryPrevious,
    EntryNext,
    EntryUp,
    ScrollLeft,
    ScrollRight,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ToStart,
    ToEnd,
    SelectAll,
    Copy,
    Cut,
    Paste,
    Undo,
    Redo,
    Backspace,
    DeleteChar,
}

impl CoreAction {
    pub const ALL: [CoreAction; 29] = [
        Self::Press,
        Self::Submit,
        Self::Cancel,
        Self::ContextMenu,
        Self::FocusPrevious,
        Self::FocusNext,
        Self::FocusLeft,
        Self::FocusRight,
        Self::FocusUp,
        Self::FocusDown,
        Self::EntryPrevious,
        Self::EntryNext,
        Self::EntryUp,
        Self::ScrollLeft,
        Self::ScrollRight,
        Self::ScrollUp,
        Self::ScrollDown,
        Self::PageUp,
        Self::PageDown,
        Self::ToStart,
        Self::ToEnd,
        Self::SelectAll,
        Self::Copy,
        Self::Cut,
        Self::Paste,
        Self::Undo,
        Self::Redo,
        Self::Backspace,
        Self::DeleteChar,
    ];
}

impl InputAction for CoreAction {
    fn index(self) -> u32 {
        self as u32
    }

    fn name(self) -> &'static str {
        match self {
            Self::Press => "press",
            Self::Submit => "submit",
            Self::Cancel => "cancel",
            Self::ContextMenu => "context-menu",
            Self::FocusPrevious => "focus-previous",
            Self::FocusNext => "focus-next",
            Self::FocusLeft => "focus-left",
            Self::FocusRight => "focus-right",
            Self::FocusUp => "focus-up",
            Self::FocusDown => "focus-down",
            Self::EntryPrevious => "entry-previous",
            Self::EntryNext => "entry-next",
            Self::EntryUp => "entry-up",
            Self::ScrollLeft => "scroll-left",
            Self::ScrollRight => "scroll-right",
            Self::ScrollUp => "scroll-up",
            Self::ScrollDown => "scroll-down",
            Self::PageUp => "page-up",
            Self::PageDown => "page-down",
            Self::ToStart => "to-start",
            Self::ToEnd => "to-end",
            Self::SelectAll => "select-all",
            Self::Copy => "copy",
            Self::Cut => "cut",
            Self::Paste => "paste",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::Backspace => "backspace",
            Self::DeleteChar => "delete-char",
        }
    }
}

impl From<CoreAction> for InputActionId {
    fn from(action: CoreAction) -> Self {
        action.id()
    }
}

fn key(key: KeyboardKey) -> InputStroke {
    InputStroke::key(key)
}

fn ctrl(trigger: KeyboardKey) -> InputStroke {
    InputStroke::key(trigger).with(KeyboardKey::LeftControl)
}

fn ctrl_shift(trigger: KeyboardKey) -> InputStroke {
    InputStroke::key(trigger)
        .with(KeyboardKey::LeftShift)
        .with(KeyboardKey::LeftControl)
}

fn pad(button: GamepadButton) -> InputStroke {
    InputStroke::gamepad(button)
}

/// Bindings every tree starts with.
pub fn default_bindings() -> Vec<(CoreAction, Vec<InputStroke>)> {
    use CoreAction as A;
    use GamepadButton as G;
    use KeyboardKey as K;

    vec![
        (
            A::Press,
            vec![
                InputStroke::mouse(MouseButton::Left),
                key(K::Enter),
                key(K::Space),
                pad(G::A),
            ],
        ),
        (A::Submit, vec![key(K::Enter), pad(G::A)]),
        (A::Cancel, vec![key(K::Escape), pad(G::B)]),
        (
            A::ContextMenu,
            vec![
                InputStroke::mouse(MouseButton::Right),
                key(K::F10).with(K::LeftShift),
                pad(G::X),
            ],
        ),
        (
            A::FocusPrevious,
            vec![key(K::Tab).with(K::LeftShift), pad(G::LeftButton)],
        ),
        (A::FocusNext, vec![key(K::Tab), pad(G::RightButton)]),
        (A::FocusLeft, vec![key(K::Left), pad(G::DpadLeft)]),
        (A::FocusRight, vec![key(K::Right), pad(G::DpadRight)]),
        (A::FocusUp, vec![key(K::Up), pad(G::DpadUp)]),
        (A::FocusDown, vec![key(K::Down), pad(G::DpadDown)]),
        (A::EntryPrevious, vec![key(K::Up), pad(G::DpadUp)]),
        (A::EntryNext, vec![key(K::Down), pad(G::DpadDown)]),
        (A::EntryUp, vec![key(K::Up).with(K::LeftAlt)]),
        (A::ScrollLeft, vec![key(K::Left)]),
        (A::ScrollRight, vec![key(K::Right)]),
        (A::ScrollUp, vec![key(K::Up)]),
        (A::ScrollDown, vec![key(K::Down)]),
        (A::PageUp, vec![key(K::PageUp)]),
        (A::PageDown, vec![key(K::PageDown)]),
        (A::ToStart, vec![key(K::Home)]),
        (A::ToEnd, vec![key(K::End)]),
        (A::SelectAll, vec![ctrl(K::A)]),
        (A::Copy, vec![ctrl(K::C)]),
        (A::Cut, vec![ctrl(K::X)]),
        (A::Paste, vec![ctrl(K::V)]),
        (A::Undo, vec![ctrl(K::Z)]),
        (A::Redo, vec![ctrl_shift(K::Z), ctrl(K::Y)]),
        (A::Backspace, vec![key(K::Backspace)]),
        (A::DeleteChar, vec![key(K::Delete)]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy)]
    enum Other {
        Press,
    }

    impl InputAction for Other {
        fn index(self) -> u32 {
            self as u32
        }

        fn name(self) -> &'static str {
            "press"
        }
    }

    #[test]
    fn ids_are_per_enum() {
        assert_eq!(CoreAction::Press.id(), CoreAction::Press.id());
        assert_ne!(CoreAction::Press.id(), Other::Press.id());
        assert_eq!(CoreAction::Press.index(), Other::Press.index());
        assert!(Other::Press.id().is::<Other>());
    }

    #[test]
    fn every_core_action_is_listed() {
        for (index, action) in CoreAction::ALL.iter().enumerate() {
            assert_eq!(action.index() as usize, index);
        }
    }

    #[test]
    fn redo_prefers_ctrl_shift_z() {
        let redo = default_bindings()
            .into_iter()
            .find(|(action, _)| *action == CoreAction::Redo)
            .map(|(_, strokes)| strokes)
            .unwrap();
        assert_eq!(redo[0].to_string(), "ctrl+shift+z");
    }
}
