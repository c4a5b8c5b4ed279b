//! Interactive terminal demo. Tab and the arrow keys move focus, enter or a
//! click presses the focused button, escape quits.
//!
//! Logs go to `arbor-demo.log` in the working directory.

use std::cell::{Cell, RefCell};
use std::error::Error;
use std::fs::File;
use std::rc::Rc;
use std::sync::OnceLock;
use std::time::Duration;

use arbor::focus::{Focusable, Hoverable};
use arbor::input::{ActionTable, CoreAction, InputOrigin};
use arbor::{
    default_theme, AxisAlign, Color, Edges, InputActionId, Layout, LayoutTree, Node, NodeBase,
    Rect, Space, Style, StyleRule, TerminalBackend, Theme, Ui, UiConfig, Vector2,
};
use simplelog::{Config, LevelFilter, WriteLogger};

/// Wrapped text, shared with whoever updates it.
struct Label {
    base: NodeBase,
    text: Rc<RefCell<String>>,
}

impl Label {
    fn new(text: &str) -> Self {
        Self {
            base: NodeBase::new(Layout::new(0).align(AxisAlign::Fill, AxisAlign::Start)),
            text: Rc::new(RefCell::new(text.to_string())),
        }
    }

    fn text(&self) -> Rc<RefCell<String>> {
        Rc::clone(&self.text)
    }
}

impl Node for Label {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "label"
    }

    fn resize_impl(
        &mut self,
        tree: &mut LayoutTree,
        _theme: &Rc<Theme>,
        space: Vector2,
    ) -> Vector2 {
        let style = self.base.style(self.kind(), tree);
        style.measure_text(space.x, &self.text.borrow(), true)
    }

    fn draw_impl(&mut self, tree: &mut LayoutTree, _outer: Rect, inner: Rect) {
        let style = self.base.style(self.kind(), tree);
        style.draw_text(tree.backend_mut(), inner, &self.text.borrow(), true);
    }
}

/// What a [`DemoButton`] does when pressed.
#[derive(Clone)]
enum OnPress {
    Count {
        clicks: Rc<Cell<u32>>,
        status: Rc<RefCell<String>>,
    },
    Quit,
}

struct DemoButton {
    base: NodeBase,
    text: String,
    on_press: OnPress,
    quit: Rc<Cell<bool>>,
}

impl DemoButton {
    fn new(text: &str, on_press: OnPress, quit: &Rc<Cell<bool>>) -> Self {
        Self {
            base: NodeBase::default(),
            text: text.to_string(),
            on_press,
            quit: Rc::clone(quit),
        }
    }

    fn actions() -> &'static ActionTable<DemoButton> {
        static TABLE: OnceLock<ActionTable<DemoButton>> = OnceLock::new();
        TABLE.get_or_init(|| {
            ActionTable::<DemoButton>::new()
                .on(CoreAction::Press, DemoButton::press)
                .on(CoreAction::Submit, DemoButton::press)
                .on(CoreAction::Cancel, |button, _, _| button.quit.set(true))
        })
    }

    fn press(&mut self, tree: &mut LayoutTree, _action: InputActionId) {
        match &self.on_press {
            OnPress::Count { clicks, status } => {
                clicks.set(clicks.get() + 1);
                *status.borrow_mut() = format!("{} pressed {} time(s)", self.text, clicks.get());
                log::info!("[demo] {} pressed, total {}", self.text, clicks.get());
                tree.handle().request_resize();
            }
            OnPress::Quit => {
                log::info!("[demo] quit requested");
                self.quit.set(true);
            }
        }
    }
}

impl Node for DemoButton {
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
        tree: &mut LayoutTree,
        _theme: &Rc<Theme>,
        space: Vector2,
    ) -> Vector2 {
        let style = self.base.style(self.kind(), tree);
        style.measure_text(space.x, &self.text, false)
    }

    fn draw_impl(&mut self, tree: &mut LayoutTree, _outer: Rect, inner: Rect) {
        let style = self.base.style(self.kind(), tree);
        style.draw_text(tree.backend_mut(), inner, &self.text, false);
    }

    fn as_hoverable_mut(&mut self) -> Option<&mut dyn Hoverable> {
        Some(self)
    }

    fn as_focusable_mut(&mut self) -> Option<&mut dyn Focusable> {
        Some(self)
    }
}

impl Hoverable for DemoButton {
    fn run_input_actions(&mut self, tree: &mut LayoutTree, origin: InputOrigin) -> bool {
        Self::actions().dispatch(self, tree, origin)
    }
}

impl Focusable for DemoButton {}

fn theme() -> Theme {
    let panel = Color::oklch(0.22, 0.02, 250.0);
    default_theme()
        .rule(
            "space",
            StyleRule::new(Style::new().background(Color::oklch(0.15, 0.0, 0.0))),
        )
        .rule(
            "label",
            StyleRule::new(
                Style::new()
                    .background(panel)
                    .padding(Edges::symmetric(0, 1))
                    .text_color(Color::oklch(0.9, 0.05, 90.0)),
            ),
        )
}

fn build(quit: &Rc<Cell<bool>>) -> Space {
    let status = Label::new("Nothing pressed yet");
    let status_text = status.text();

    let counter = |name: &str| {
        DemoButton::new(
            name,
            OnPress::Count {
                clicks: Rc::default(),
                status: Rc::clone(&status_text),
            },
            quit,
        )
    };

    let mut buttons = Space::row()
        .gap(2.0)
        .child(counter("Alpha"))
        .child(counter("Beta"))
        .child(counter("Gamma"))
        .child(DemoButton::new("Quit", OnPress::Quit, quit));
    buttons.base_mut().focus_recurse(false);

    Space::col()
        .layout(Layout::fill())
        .gap(1.0)
        .child(Label::new(
            "arbor demo. Tab, shift+tab and the arrow keys move focus; \
             enter or a click presses; escape quits.",
        ))
        .child(buttons)
        .child(Space::row().layout(Layout::fill()))
        .child(status)
}

fn main() -> Result<(), Box<dyn Error>> {
    WriteLogger::init(
        LevelFilter::Info,
        Config::default(),
        File::create("arbor-demo.log")?,
    )?;

    let quit = Rc::new(Cell::new(false));
    let backend = TerminalBackend::new()?;
    let mut ui = Ui::with_config(build(&quit), backend, UiConfig::new().theme(theme()));

    while !quit.get() {
        ui.draw_frame();
        if let Some(terminal) = ui.backend_as::<TerminalBackend>() {
            terminal.wait(Duration::from_millis(50))?;
        }
    }

    log::info!("[demo] exiting");
    Ok(())
}
