mod color;
mod edges;
mod enums;
mod style;
mod theme;

pub use color::Color;
pub use edges::Edges;
pub use enums::CursorIcon;
pub use style::Style;
pub use theme::{default_theme, StyleRule, StyleState, Theme};
