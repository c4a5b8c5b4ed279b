mod common;

use arbor::backend::{HeadlessBackend, KeyboardKey};
use arbor::input::CoreAction;
use arbor::{CursorIcon, Layout, Space, Ui};
use common::{backend, click, move_mouse, press_mouse, release_mouse, tap, ui, Block, Button};

/// Two 10x1 buttons side by side, the second starting at x = 10.
fn pair() -> (Space, Button, Button) {
    (Space::row(), Button::new(10.0, 1.0), Button::new(10.0, 1.0))
}

// ============================================================================
// Mouse
// ============================================================================

#[test]
fn test_click_presses_once() {
    let (row, left, right) = pair();
    let (left_counters, right_counters) = (left.counters(), right.counters());
    let mut ui = ui(row.child(left).child(right));

    click(&mut ui, 3.0, 0.5);
    ui.draw_frame();
    ui.draw_frame();

    assert_eq!(left_counters.presses.get(), 1);
    assert_eq!(right_counters.presses.get(), 0);
    assert!(left_counters.mouse.get() > 0, "frames without an action reach mouse_impl");
}

#[test]
fn test_press_fires_on_release_frame() {
    let (row, left, right) = pair();
    let presses = left.counters().presses;
    let mut ui = ui(row.child(left).child(right));

    move_mouse(&mut ui, 1.0, 0.0);
    press_mouse(&mut ui);
    ui.draw_frame();
    assert_eq!(presses.get(), 0, "pressing alone doesn't fire");

    ui.draw_frame();
    assert_eq!(presses.get(), 0);

    release_mouse(&mut ui);
    ui.draw_frame();
    assert_eq!(presses.get(), 1);
}

#[test]
fn test_slip_off_cancels_press() {
    let (row, left, right) = pair();
    let (left_counters, right_counters) = (left.counters(), right.counters());
    let left_id = left.id();
    let mut ui = ui(row.child(left).child(right));

    move_mouse(&mut ui, 2.0, 0.0);
    ui.draw_frame();
    press_mouse(&mut ui);
    ui.draw_frame();

    move_mouse(&mut ui, 15.0, 0.0);
    ui.draw_frame();
    assert_eq!(ui.tree().hover(), Some(left_id), "hover stays while the button is held");
    assert_ne!(ui.tree().pointer_target(), Some(left_id));

    release_mouse(&mut ui);
    ui.draw_frame();
    ui.draw_frame();

    assert_eq!(left_counters.presses.get(), 0, "released elsewhere");
    assert_eq!(right_counters.presses.get(), 0, "pressed elsewhere");
}

#[test]
fn test_slip_back_still_presses() {
    let (row, left, right) = pair();
    let presses = left.counters().presses;
    let mut ui = ui(row.child(left).child(right));

    move_mouse(&mut ui, 2.0, 0.0);
    press_mouse(&mut ui);
    ui.draw_frame();
    move_mouse(&mut ui, 15.0, 0.0);
    ui.draw_frame();
    move_mouse(&mut ui, 4.0, 0.0);
    ui.draw_frame();
    release_mouse(&mut ui);
    ui.draw_frame();

    assert_eq!(presses.get(), 1);
}

#[test]
fn test_hover_follows_pointer() {
    let (row, left, right) = pair();
    let (left_id, right_id) = (left.id(), right.id());
    let mut ui = ui(row.child(left).child(right));

    move_mouse(&mut ui, 1.0, 0.0);
    ui.draw_frame();
    assert_eq!(ui.tree().hover(), Some(left_id));

    move_mouse(&mut ui, 11.0, 0.0);
    ui.draw_frame();
    assert_eq!(ui.tree().hover(), Some(right_id));
    assert!(ui.tree().is_hovered(right_id));

    move_mouse(&mut ui, 500.0, 500.0);
    ui.draw_frame();
    assert_eq!(ui.tree().hover(), None, "nothing under the pointer");
}

#[test]
fn test_topmost_node_wins() {
    let inner = Button::new(2.0, 2.0);
    let inner_id = inner.id();
    let column = Space::col().layout(Layout::fill()).child(inner);
    let column_id = column.id();
    let outer = Button::new(5.0, 5.0).layout(Layout::fill());
    let outer_id = outer.id();

    // Children are drawn after their parent, on top of it
    let mut ui = ui(Space::row().child(column).child(outer));

    move_mouse(&mut ui, 1.0, 1.0);
    ui.draw_frame();
    assert_eq!(ui.tree().hover(), Some(inner_id));

    move_mouse(&mut ui, 3.0, 1.0);
    ui.draw_frame();
    assert_eq!(ui.tree().hover(), Some(column_id), "containers take the pointer too");

    move_mouse(&mut ui, 7.0, 1.0);
    ui.draw_frame();
    assert_eq!(ui.tree().hover(), Some(outer_id));
}

#[test]
fn test_ignore_mouse_passes_through() {
    let block = Block::new(10.0, 1.0);
    let block_id = block.id();
    let row = Space::row().layout(Layout::fill()).child(block);
    let row_id = row.id();
    let mut ui = ui(row);

    ui.with_node(block_id, |node, _| node.base_mut().set_ignore_mouse(true));
    move_mouse(&mut ui, 1.0, 0.0);
    ui.draw_frame();
    assert_eq!(ui.tree().hover(), Some(row_id));
}

#[test]
fn test_disabled_nodes_ignore_the_mouse() {
    let button = Button::new(10.0, 1.0).disabled();
    let presses = button.counters().presses;
    let mut ui = ui(Space::row().child(button));

    click(&mut ui, 1.0, 0.0);
    assert_eq!(presses.get(), 0);
    assert_eq!(ui.tree().focus(), None);
}

#[test]
fn test_clipped_nodes_ignore_the_mouse() {
    let hidden_part = Button::new(10.0, 1.0);
    let hidden_id = hidden_part.id();
    let root = Space::row()
        .child(Block::new(15.0, 1.0))
        .child(hidden_part);
    let mut ui = Ui::new(root, HeadlessBackend::new(arbor::Vector2::new(20.0, 5.0)));

    move_mouse(&mut ui, 18.0, 0.0);
    ui.draw_frame();
    assert_eq!(ui.tree().hover(), Some(hidden_id));

    move_mouse(&mut ui, 22.0, 0.0);
    ui.draw_frame();
    assert_ne!(ui.tree().hover(), Some(hidden_id), "outside the viewport clip");
}

// ============================================================================
// Focus and Keyboard
// ============================================================================

#[test]
fn test_press_focuses_focusable() {
    let (row, left, right) = pair();
    let right_id = right.id();
    let mut ui = ui(row.child(left).child(right));

    move_mouse(&mut ui, 12.0, 0.0);
    press_mouse(&mut ui);
    ui.draw_frame();
    assert_eq!(ui.tree().focus(), Some(right_id));
}

#[test]
fn test_keyboard_goes_to_focused_node() {
    let (row, left, right) = pair();
    let (left_id, left_counters, right_counters) = (left.id(), left.counters(), right.counters());
    let mut ui = ui(row.child(left).child(right));
    ui.draw_frame();
    ui.focus(left_id);
    ui.draw_frame();

    tap(&mut ui, KeyboardKey::Enter);
    assert_eq!(left_counters.presses.get(), 1);
    assert_eq!(left_counters.submits.get(), 0, "one action per frame, in table order");
    assert_eq!(right_counters.presses.get(), 0);

    backend(&mut ui).type_text("hi");
    ui.draw_frame();
    assert_eq!(left_counters.typed.borrow().as_str(), "hi", "typed text reaches focus_impl");
    assert!(right_counters.typed.borrow().is_empty());
}

#[test]
fn test_held_key_does_not_repeat_without_repeat_events() {
    let button = Button::new(4.0, 1.0);
    let (id, presses) = (button.id(), button.counters().presses);
    let mut ui = ui(Space::row().child(button));
    ui.draw_frame();
    ui.focus(id);

    backend(&mut ui).press_key(KeyboardKey::Space);
    ui.draw_frame();
    ui.draw_frame();
    ui.draw_frame();
    assert_eq!(presses.get(), 1);

    backend(&mut ui).repeat_key(KeyboardKey::Space);
    ui.draw_frame();
    assert_eq!(presses.get(), 2);
}

#[test]
fn test_custom_binding_reaches_node() {
    let button = Button::new(4.0, 1.0);
    let (id, submits) = (button.id(), button.counters().submits);
    let mut ui = ui(Space::row().child(button));
    ui.tree_mut().clear_bound(CoreAction::Press);
    ui.tree_mut().clear_bound(CoreAction::Submit);
    ui.tree_mut().bind(CoreAction::Submit, "ctrl+s".parse().unwrap());
    ui.draw_frame();
    ui.focus(id);

    backend(&mut ui).press_key(KeyboardKey::LeftControl);
    tap(&mut ui, KeyboardKey::S);
    assert_eq!(submits.get(), 1);
}

// ============================================================================
// Cursor
// ============================================================================

#[test]
fn test_cursor_follows_hovered_style() {
    let (row, left, right) = pair();
    let mut ui = Ui::new(row.child(left).child(right), HeadlessBackend::default());

    move_mouse(&mut ui, 1.0, 0.0);
    ui.draw_frame();
    assert_eq!(ui.backend().cursor_icon(), CursorIcon::Pointer);

    move_mouse(&mut ui, 300.0, 300.0);
    ui.draw_frame();
    assert_eq!(ui.backend().cursor_icon(), CursorIcon::Default);
}
