use super::{Color, CursorIcon, Edges};
use crate::backend::Backend;
use crate::layout::{Rect, Vector2};
use crate::text::{display_width, wrap_words};

/// Box metrics and drawing parameters for a node.
///
/// Text is measured on a monospace grid: every display column is
/// `char_width` wide and every line `line_height` tall. The terminal backend
/// uses 1×1 cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub margin: Edges,
    pub border: Edges,
    pub padding: Edges,
    pub background: Option<Color>,
    pub border_color: Option<Color>,
    pub text_color: Color,
    pub cursor: CursorIcon,
    pub char_width: f32,
    pub line_height: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            margin: Edges::default(),
            border: Edges::default(),
            padding: Edges::default(),
            background: None,
            border_color: None,
            text_color: Color::WHITE,
            cursor: CursorIcon::Default,
            char_width: 1.0,
            line_height: 1.0,
        }
    }
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn margin(mut self, margin: Edges) -> Self {
        self.margin = margin;
        self
    }

    pub fn border(mut self, border: Edges) -> Self {
        self.border = border;
        self
    }

    pub fn padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = Some(color);
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn cursor(mut self, cursor: CursorIcon) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn font_metrics(mut self, char_width: f32, line_height: f32) -> Self {
        self.char_width = char_width;
        self.line_height = line_height;
        self
    }

    /// Margin, border and padding combined.
    pub fn box_metrics(&self) -> Edges {
        self.margin + self.border + self.padding
    }

    /// Size of `text` when laid out in `available_width`.
    ///
    /// Without `wrap` the text only breaks on explicit newlines.
    pub fn measure_text(&self, available_width: f32, text: &str, wrap: bool) -> Vector2 {
        let lines = self.text_lines(available_width, text, wrap);
        let columns = lines.iter().map(|line| display_width(line)).max().unwrap_or(0);

        Vector2::new(
            columns as f32 * self.char_width,
            lines.len() as f32 * self.line_height,
        )
    }

    /// Fill the background and paint the border strips.
    pub fn draw_background(&self, io: &mut dyn Backend, rect: Rect) {
        if let Some(background) = self.background {
            io.draw_rectangle(rect, background);
        }

        let Some(color) = self.border_color else {
            return;
        };
        if self.border.is_zero() {
            return;
        }

        let top = f32::from(self.border.top);
        let right = f32::from(self.border.right);
        let bottom = f32::from(self.border.bottom);
        let left = f32::from(self.border.left);

        let strips = [
            Rect::new(rect.x, rect.y, rect.width, top),
            Rect::new(rect.x, rect.bottom() - bottom, rect.width, bottom),
            Rect::new(rect.x, rect.y + top, left, rect.height - top - bottom),
            Rect::new(rect.right() - right, rect.y + top, right, rect.height - top - bottom),
        ];
        for strip in strips.into_iter().filter(|strip| !strip.is_empty()) {
            io.draw_rectangle(strip, color);
        }
    }

    /// Draw `text` line by line starting at the top-left corner of `rect`.
    pub fn draw_text(&self, io: &mut dyn Backend, rect: Rect, text: &str, wrap: bool) {
        let lines = self.text_lines(rect.width, text, wrap);
        for (index, line) in lines.iter().enumerate() {
            let position = Vector2::new(rect.x, rect.y + index as f32 * self.line_height);
            io.draw_text(position, line, self.text_color);
        }
    }

    fn text_lines(&self, available_width: f32, text: &str, wrap: bool) -> Vec<String> {
        if wrap && available_width.is_finite() {
            let columns = (available_width / self.char_width).floor().max(1.0) as usize;
            wrap_words(text, columns)
        } else {
            text.split('\n').map(String::from).collect()
        }
    }
}
