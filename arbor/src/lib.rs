pub mod actions;
pub mod backend;
pub mod error;
pub mod focus;
pub mod input;
pub mod layout;
pub mod node;
pub mod terminal;
pub mod text;
pub mod tree;
pub mod types;
pub mod ui;

pub use actions::{FindNodeBox, FocusRecurse, TreeAction};
pub use backend::{Backend, HeadlessBackend};
pub use error::StrokeParseError;
pub use focus::{Focusable, Hoverable, Side};
pub use input::{CoreAction, InputAction, InputActionId, InputStroke};
pub use layout::{AxisAlign, Layout, Rect, Vector2};
pub use node::{Node, NodeBase, NodeBox, NodeId, Space};
pub use terminal::TerminalBackend;
pub use tree::{LayoutTree, TreeHandle};
pub use types::*;
pub use ui::{Ui, UiConfig};
