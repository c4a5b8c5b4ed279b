#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::OnceLock;

use arbor::backend::{HeadlessBackend, KeyboardKey, MouseButton};
use arbor::focus::{Focusable, Hoverable};
use arbor::input::{ActionTable, CoreAction, InputOrigin};
use arbor::{Layout, LayoutTree, Node, NodeBase, NodeId, Rect, Theme, Ui, UiConfig, Vector2};

/// Leaf with a fixed content size that records where it was drawn.
pub struct Block {
    base: NodeBase,
    size: Vector2,
    drawn: Rc<Cell<Option<Rect>>>,
    draws: Rc<Cell<u32>>,
    resizes: Rc<Cell<u32>>,
}

impl Block {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            base: NodeBase::default(),
            size: Vector2::new(width, height),
            drawn: Rc::default(),
            draws: Rc::default(),
            resizes: Rc::default(),
        }
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.base.set_layout(layout);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.base.hide();
        self
    }

    pub fn id(&self) -> NodeId {
        self.base.id()
    }

    /// Content box of the last draw.
    pub fn drawn_box(&self) -> Rc<Cell<Option<Rect>>> {
        Rc::clone(&self.drawn)
    }

    pub fn draw_count(&self) -> Rc<Cell<u32>> {
        Rc::clone(&self.draws)
    }

    pub fn resize_count(&self) -> Rc<Cell<u32>> {
        Rc::clone(&self.resizes)
    }
}

impl Node for Block {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "block"
    }

    fn resize_impl(
        &mut self,
        _tree: &mut LayoutTree,
        _theme: &Rc<Theme>,
        _space: Vector2,
    ) -> Vector2 {
        self.resizes.set(self.resizes.get() + 1);
        self.size
    }

    fn draw_impl(&mut self, _tree: &mut LayoutTree, _outer: Rect, inner: Rect) {
        self.drawn.set(Some(inner));
        self.draws.set(self.draws.get() + 1);
    }
}

/// Counters shared between a [`Button`] and the test that owns it.
#[derive(Debug, Default, Clone)]
pub struct Counters {
    pub presses: Rc<Cell<u32>>,
    pub submits: Rc<Cell<u32>>,
    pub mouse: Rc<Cell<u32>>,
    pub keyboard: Rc<Cell<u32>>,
    pub typed: Rc<RefCell<String>>,
}

/// Focusable leaf that counts its input.
pub struct Button {
    base: NodeBase,
    size: Vector2,
    counters: Counters,
}

impl Button {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            base: NodeBase::default(),
            size: Vector2::new(width, height),
            counters: Counters::default(),
        }
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.base.set_layout(layout);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.base.set_disabled(true);
        self
    }

    pub fn id(&self) -> NodeId {
        self.base.id()
    }

    pub fn counters(&self) -> Counters {
        self.counters.clone()
    }

    fn actions() -> &'static ActionTable<Button> {
        static TABLE: OnceLock<ActionTable<Button>> = OnceLock::new();
        TABLE.get_or_init(|| {
            ActionTable::<Button>::new()
                .on(CoreAction::Press, |button, _, _| {
                    let presses = &button.counters.presses;
                    presses.set(presses.get() + 1);
                })
                .on(CoreAction::Submit, |button, _, _| {
                    let submits = &button.counters.submits;
                    submits.set(submits.get() + 1);
                })
        })
    }
}

impl Node for Button {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "button"
    }

    fn resize_impl(
        &mut self,
        _tree: &mut LayoutTree,
        _theme: &Rc<Theme>,
        _space: Vector2,
    ) -> Vector2 {
        self.size
    }

    fn draw_impl(&mut self, _tree: &mut LayoutTree, _outer: Rect, _inner: Rect) {}

    fn as_hoverable_mut(&mut self) -> Option<&mut dyn Hoverable> {
        Some(self)
    }

    fn as_focusable_mut(&mut self) -> Option<&mut dyn Focusable> {
        Some(self)
    }
}

impl Hoverable for Button {
    fn run_input_actions(&mut self, tree: &mut LayoutTree, origin: InputOrigin) -> bool {
        Self::actions().dispatch(self, tree, origin)
    }

    fn mouse_impl(&mut self, _tree: &mut LayoutTree) -> bool {
        self.counters.mouse.set(self.counters.mouse.get() + 1);
        true
    }
}

impl Focusable for Button {
    fn focus_impl(&mut self, tree: &mut LayoutTree) -> bool {
        self.counters.keyboard.set(self.counters.keyboard.get() + 1);
        while let Some(c) = tree.backend_mut().input_character() {
            self.counters.typed.borrow_mut().push(c);
        }
        true
    }
}

/// A frame driver over a headless 800x600 window with no box metrics.
pub fn ui(root: impl Node + 'static) -> Ui {
    Ui::with_config(
        root,
        HeadlessBackend::default(),
        UiConfig::new().theme(Theme::empty()),
    )
}

pub fn backend(ui: &mut Ui) -> &mut HeadlessBackend {
    ui.backend_as_mut::<HeadlessBackend>()
        .expect("tests run on the headless backend")
}

pub fn move_mouse(ui: &mut Ui, x: f32, y: f32) {
    backend(ui).move_mouse(Vector2::new(x, y));
}

pub fn press_mouse(ui: &mut Ui) {
    backend(ui).press_mouse(MouseButton::Left);
}

pub fn release_mouse(ui: &mut Ui) {
    backend(ui).release_mouse(MouseButton::Left);
}

/// Press a key for a single frame.
pub fn tap(ui: &mut Ui, key: KeyboardKey) {
    backend(ui).press_key(key);
    ui.draw_frame();
    backend(ui).release_key(key);
    ui.draw_frame();
}

/// Click at a point: press, hold a frame, release.
pub fn click(ui: &mut Ui, x: f32, y: f32) {
    move_mouse(ui, x, y);
    ui.draw_frame();
    press_mouse(ui);
    ui.draw_frame();
    ui.draw_frame();
    release_mouse(ui);
    ui.draw_frame();
}
