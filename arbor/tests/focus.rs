mod common;

use arbor::backend::KeyboardKey;
use arbor::{Node, NodeId, Side, Space};
use common::{backend, move_mouse, press_mouse, tap, ui, Block, Button};

/// A column of three 10x1 buttons.
fn column() -> (Space, [NodeId; 3]) {
    let buttons = [
        Button::new(10.0, 1.0),
        Button::new(10.0, 1.0),
        Button::new(10.0, 1.0),
    ];
    let ids = [buttons[0].id(), buttons[1].id(), buttons[2].id()];
    let root = buttons
        .into_iter()
        .fold(Space::col(), |space, button| space.child(button));
    (root, ids)
}

// ============================================================================
// Tab Order
// ============================================================================

#[test]
fn test_tab_cycles_in_draw_order() {
    let (root, ids) = column();
    let mut ui = ui(root);
    ui.draw_frame();
    assert_eq!(ui.tree().focus(), None);

    tap(&mut ui, KeyboardKey::Tab);
    assert_eq!(ui.tree().focus(), Some(ids[0]), "tab with no focus goes to the first");

    tap(&mut ui, KeyboardKey::Tab);
    assert_eq!(ui.tree().focus(), Some(ids[1]));

    tap(&mut ui, KeyboardKey::Tab);
    tap(&mut ui, KeyboardKey::Tab);
    assert_eq!(ui.tree().focus(), Some(ids[0]), "tab wraps around");
}

#[test]
fn test_shift_tab_goes_backwards() {
    let (root, ids) = column();
    let mut ui = ui(root);
    ui.draw_frame();

    backend(&mut ui).press_key(KeyboardKey::LeftShift);
    tap(&mut ui, KeyboardKey::Tab);
    assert_eq!(ui.tree().focus(), Some(ids[2]), "shift+tab with no focus goes to the last");

    tap(&mut ui, KeyboardKey::Tab);
    assert_eq!(ui.tree().focus(), Some(ids[1]));
}

#[test]
fn test_disabled_nodes_are_skipped() {
    let first = Button::new(10.0, 1.0);
    let disabled = Button::new(10.0, 1.0).disabled();
    let last = Button::new(10.0, 1.0);
    let (first_id, disabled_id, last_id) = (first.id(), disabled.id(), last.id());

    let mut ui = ui(Space::col().child(first).child(disabled).child(last));
    ui.draw_frame();

    assert!(!ui.focus(disabled_id), "disabled nodes can't take focus");
    assert!(ui.focus(first_id));
    ui.draw_frame();

    tap(&mut ui, KeyboardKey::Tab);
    assert_eq!(ui.tree().focus(), Some(last_id));
}

#[test]
fn test_disabled_container_disables_descendants() {
    let inner = Button::new(10.0, 1.0);
    let inner_id = inner.id();
    let outside = Button::new(10.0, 1.0);
    let outside_id = outside.id();

    let root = Space::col()
        .child(Space::row().disabled(true).child(inner))
        .child(outside);
    let mut ui = ui(root);
    ui.draw_frame();

    let inherited = ui
        .with_node(inner_id, |node, _| node.base().is_disabled_inherited())
        .unwrap_or(false);
    assert!(inherited);
    assert!(!ui.focus(inner_id));

    tap(&mut ui, KeyboardKey::Tab);
    assert_eq!(ui.tree().focus(), Some(outside_id));
}

#[test]
fn test_plain_nodes_are_not_focusable() {
    let block = Block::new(5.0, 5.0);
    let id = block.id();
    let mut ui = ui(Space::row().child(block));
    ui.draw_frame();

    assert!(!ui.focus(id));
    tap(&mut ui, KeyboardKey::Tab);
    assert_eq!(ui.tree().focus(), None);
}

// ============================================================================
// Directional Navigation
// ============================================================================

#[test]
fn test_arrows_move_between_neighbors() {
    let top_left = Button::new(10.0, 2.0);
    let top_right = Button::new(10.0, 2.0);
    let bottom_left = Button::new(10.0, 2.0);
    let ids = [top_left.id(), top_right.id(), bottom_left.id()];

    let root = Space::col()
        .child(Space::row().gap(2.0).child(top_left).child(top_right))
        .child(Space::row().child(bottom_left));
    let mut ui = ui(root);
    ui.draw_frame();
    ui.focus(ids[0]);
    ui.draw_frame();

    tap(&mut ui, KeyboardKey::Right);
    assert_eq!(ui.tree().focus(), Some(ids[1]));

    tap(&mut ui, KeyboardKey::Left);
    assert_eq!(ui.tree().focus(), Some(ids[0]));

    tap(&mut ui, KeyboardKey::Down);
    assert_eq!(ui.tree().focus(), Some(ids[2]));

    tap(&mut ui, KeyboardKey::Left);
    assert_eq!(ui.tree().focus(), Some(ids[2]), "nothing to the left stays put");
}

#[test]
fn test_arrows_need_a_focused_node() {
    let (root, _) = column();
    let mut ui = ui(root);
    ui.draw_frame();

    tap(&mut ui, KeyboardKey::Down);
    assert_eq!(ui.tree().focus(), None);
}

#[test]
fn test_direction_candidates_after_frame() {
    let (root, ids) = column();
    let mut ui = ui(root);
    ui.draw_frame();
    ui.focus(ids[1]);
    ui.draw_frame();

    let direction = ui.tree().focus_direction();
    assert_eq!(direction.previous(), Some(ids[0]));
    assert_eq!(direction.next(), Some(ids[2]));
    assert_eq!(direction.first(), Some(ids[0]));
    assert_eq!(direction.last(), Some(ids[2]));
    assert_eq!(direction.positional(Side::Up), Some(ids[0]));
    assert_eq!(direction.positional(Side::Down), Some(ids[2]));
    assert_eq!(direction.positional(Side::Left), None);
}

#[test]
fn test_arrow_on_the_frame_after_focus_call() {
    let left = Button::new(10.0, 1.0);
    let right = Button::new(10.0, 1.0);
    let (left_id, right_id) = (left.id(), right.id());
    let mut ui = ui(Space::row().child(left).child(right));
    ui.draw_frame();

    assert!(ui.focus(right_id));
    backend(&mut ui).press_key(KeyboardKey::Left);
    ui.draw_frame();
    assert_eq!(ui.tree().focus(), Some(left_id));
}

#[test]
fn test_arrow_on_the_frame_after_click() {
    let left = Button::new(10.0, 1.0);
    let right = Button::new(10.0, 1.0);
    let (left_id, right_id) = (left.id(), right.id());
    let mut ui = ui(Space::row().child(left).child(right));

    move_mouse(&mut ui, 15.0, 0.5);
    ui.draw_frame();
    press_mouse(&mut ui);
    ui.draw_frame();
    assert_eq!(ui.tree().focus(), Some(right_id), "pressing focuses");

    backend(&mut ui).press_key(KeyboardKey::Left);
    ui.draw_frame();
    assert_eq!(ui.tree().focus(), Some(left_id));
}

#[test]
fn test_arrow_on_the_frame_after_tab() {
    let (root, ids) = column();
    let mut ui = ui(root);
    ui.draw_frame();
    tap(&mut ui, KeyboardKey::Tab);
    assert_eq!(ui.tree().focus(), Some(ids[0]));

    backend(&mut ui).press_key(KeyboardKey::Tab);
    ui.draw_frame();
    assert_eq!(ui.tree().focus(), Some(ids[1]));

    backend(&mut ui).release_key(KeyboardKey::Tab);
    backend(&mut ui).press_key(KeyboardKey::Up);
    ui.draw_frame();
    assert_eq!(ui.tree().focus(), Some(ids[0]));
}

// ============================================================================
// Losing Focus
// ============================================================================

#[test]
fn test_hidden_node_loses_focus() {
    let (root, ids) = column();
    let mut ui = ui(root);
    ui.draw_frame();
    assert!(ui.focus(ids[1]));
    ui.draw_frame();
    assert_eq!(ui.tree().focus(), Some(ids[1]));

    ui.with_node(ids[1], |node, _| node.base_mut().hide());
    ui.draw_frame();
    assert_eq!(ui.tree().focus(), None);
}

#[test]
fn test_disabling_drops_focus() {
    let (root, ids) = column();
    let mut ui = ui(root);
    ui.draw_frame();
    ui.focus(ids[0]);
    ui.draw_frame();

    ui.with_node(ids[0], |node, _| node.base_mut().set_disabled(true));
    ui.draw_frame();
    assert_eq!(ui.tree().focus(), None);
}

// ============================================================================
// Focus Recursion
// ============================================================================

#[test]
fn test_focus_recurse_first_and_last() {
    let (list, ids) = column();
    let column_id = list.id();
    let mut ui = ui(Space::row().child(Block::new(3.0, 3.0)).child(list));
    ui.draw_frame();

    ui.with_node(column_id, |node, _| node.base_mut().focus_recurse(false));
    ui.draw_frame();
    assert_eq!(ui.tree().focus(), Some(ids[0]));

    ui.with_node(column_id, |node, _| node.base_mut().focus_recurse(true));
    ui.draw_frame();
    assert_eq!(ui.tree().focus(), Some(ids[2]));
    assert!(ui.tree().action_queue().is_empty(), "recursion runs once");
}

#[test]
fn test_focus_recurse_queued_before_attach() {
    let disabled = Button::new(4.0, 1.0).disabled();
    let enabled = Button::new(4.0, 1.0);
    let enabled_id = enabled.id();

    let mut root = Space::col().child(disabled).child(enabled);
    root.base_mut().focus_recurse(false);

    let mut ui = ui(root);
    ui.draw_frame();
    assert_eq!(ui.tree().focus(), Some(enabled_id), "disabled nodes are skipped");
}

#[test]
fn test_focus_recurse_without_focusables() {
    let block = Block::new(2.0, 2.0);
    let id = block.id();
    let mut ui = ui(Space::row().child(block));
    ui.draw_frame();

    ui.with_node(id, |node, _| node.base_mut().focus_recurse(false));
    ui.draw_frame();
    assert_eq!(ui.tree().focus(), None);
    assert!(ui.tree().action_queue().is_empty());
}
