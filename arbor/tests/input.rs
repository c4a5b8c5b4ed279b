mod common;

use arbor::backend::{GamepadButton, KeyboardKey, MouseButton};
use arbor::input::{Bindings, CoreAction, InputAction, InputItem, InputStroke};
use arbor::{Space, StrokeParseError};
use common::{backend, ui};

#[derive(Debug, Clone, Copy)]
enum EditorAction {
    Save,
    Press,
}

impl InputAction for EditorAction {
    fn index(self) -> u32 {
        self as u32
    }

    fn name(self) -> &'static str {
        match self {
            Self::Save => "save",
            Self::Press => "press",
        }
    }
}

// ============================================================================
// Action Identity
// ============================================================================

#[test]
fn test_same_variant_in_different_enums_differs() {
    assert_ne!(EditorAction::Press.id(), CoreAction::Press.id());
    assert_eq!(EditorAction::Press.id().name(), CoreAction::Press.id().name());
    assert!(EditorAction::Save.id().is::<EditorAction>());
    assert!(!EditorAction::Save.id().is::<CoreAction>());
}

#[test]
fn test_custom_actions_bind_independently() {
    let mut bindings = Bindings::with_defaults();
    bindings.bind(EditorAction::Press.id(), InputStroke::key(KeyboardKey::P));

    assert_eq!(
        bindings.strokes(EditorAction::Press.id()),
        &[InputStroke::key(KeyboardKey::P)]
    );
    assert!(
        bindings.strokes(CoreAction::Press.id()).len() > 1,
        "core bindings should be untouched"
    );
}

// ============================================================================
// Stroke Parsing
// ============================================================================

#[test]
fn test_parse_and_display() {
    let stroke: InputStroke = "ctrl+s".parse().unwrap();
    assert_eq!(stroke.len(), 2);
    assert_eq!(stroke.trigger(), InputItem::Keyboard(KeyboardKey::S));
    assert_eq!(stroke.to_string(), "ctrl+s");

    let pad: InputStroke = "gamepad-lb+gamepad-a".parse().unwrap();
    assert_eq!(pad.modifiers(), &[InputItem::Gamepad(GamepadButton::LeftButton)]);
    assert!(!pad.is_mouse());
}

#[test]
fn test_parse_errors() {
    assert_eq!("".parse::<InputStroke>(), Err(StrokeParseError::Empty));
    assert_eq!(
        "ctrl+hyper".parse::<InputStroke>(),
        Err(StrokeParseError::UnknownInput("hyper".to_string()))
    );
}

// ============================================================================
// Down and Active
// ============================================================================

#[test]
fn test_mouse_press_is_active_on_release() {
    let mut ui = ui(Space::row());

    backend(&mut ui).press_mouse(MouseButton::Left);
    assert!(ui.tree().is_down(CoreAction::Press));
    assert!(!ui.tree().is_active(CoreAction::Press));

    ui.draw_frame();
    assert!(ui.tree().is_down(CoreAction::Press), "held after a frame");
    assert!(!ui.tree().is_active(CoreAction::Press));

    backend(&mut ui).release_mouse(MouseButton::Left);
    assert!(ui.tree().is_down(CoreAction::Press), "down on the release frame");
    assert!(ui.tree().is_active(CoreAction::Press));

    ui.draw_frame();
    assert!(!ui.tree().is_down(CoreAction::Press));
    assert!(!ui.tree().is_active(CoreAction::Press));
}

#[test]
fn test_key_is_active_on_press_and_repeat() {
    let mut ui = ui(Space::row());

    backend(&mut ui).press_key(KeyboardKey::Enter);
    assert!(ui.tree().is_active(CoreAction::Submit));

    ui.draw_frame();
    assert!(ui.tree().is_down(CoreAction::Submit));
    assert!(!ui.tree().is_active(CoreAction::Submit), "holding doesn't retrigger");

    backend(&mut ui).repeat_key(KeyboardKey::Enter);
    assert!(ui.tree().is_active(CoreAction::Submit), "repeats do");

    ui.draw_frame();
    backend(&mut ui).release_key(KeyboardKey::Enter);
    assert!(!ui.tree().is_down(CoreAction::Submit));
}

#[test]
fn test_modifiers_must_be_held() {
    let mut ui = ui(Space::row());

    backend(&mut ui).press_key(KeyboardKey::Z);
    assert!(!ui.tree().is_active(CoreAction::Undo));
    ui.draw_frame();

    backend(&mut ui).press_key(KeyboardKey::LeftControl);
    backend(&mut ui).press_key(KeyboardKey::Z);
    assert!(ui.tree().is_active(CoreAction::Undo));
    assert!(!ui.tree().is_active(CoreAction::Redo));

    backend(&mut ui).press_key(KeyboardKey::LeftShift);
    assert!(ui.tree().is_active(CoreAction::Redo));
}

#[test]
fn test_gamepad_buttons_merge_across_controllers() {
    let mut ui = ui(Space::row());
    backend(&mut ui).press_gamepad(1, GamepadButton::A);
    assert!(ui.tree().is_active(CoreAction::Press));
    assert!(ui.tree().is_active(CoreAction::Submit));
}

// ============================================================================
// Rebinding
// ============================================================================

#[test]
fn test_rebind_and_clear() {
    let mut ui = ui(Space::row());
    let tree = ui.tree_mut();

    tree.clear_bound(CoreAction::Submit);
    assert!(tree.bound_strokes(CoreAction::Submit).is_empty());

    tree.bind(CoreAction::Submit, "ctrl+enter".parse().unwrap());
    tree.bind_many(
        EditorAction::Save.id(),
        [
            InputStroke::key(KeyboardKey::S).with(KeyboardKey::LeftControl),
            InputStroke::key(KeyboardKey::F2),
        ],
    );
    assert_eq!(tree.bound_strokes(EditorAction::Save.id()).len(), 2);

    backend(&mut ui).press_key(KeyboardKey::Enter);
    assert!(!ui.tree().is_active(CoreAction::Submit), "plain enter was unbound");
    backend(&mut ui).press_key(KeyboardKey::LeftControl);
    assert!(ui.tree().is_active(CoreAction::Submit));

    ui.tree_mut().clear_all_bindings();
    assert!(ui.tree().bindings().is_empty());
    assert!(!ui.tree().is_active(CoreAction::Submit));
}

#[test]
fn test_later_strokes_are_alternatives() {
    let mut bindings = Bindings::new();
    bindings.bind(CoreAction::Cancel, InputStroke::key(KeyboardKey::Escape));
    bindings.bind(CoreAction::Cancel, InputStroke::mouse(MouseButton::Right));

    let strokes = bindings.strokes(CoreAction::Cancel.id());
    assert_eq!(strokes[0].to_string(), "escape");
    assert_eq!(strokes[1].to_string(), "mouse-right");
    assert_eq!(bindings.len(), 1);
}
