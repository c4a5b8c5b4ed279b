use crate::types::Color;

/// A single terminal cell: a glyph over a background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub fg: Color,
    pub bg: Color,
    /// Right half of a wide character drawn in the cell before.
    pub wide_continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: ' ',
            fg: Color::WHITE,
            bg: Color::BLACK,
            wide_continuation: false,
        }
    }
}

impl Cell {
    pub fn with_bg(mut self, bg: Color) -> Self {
        self.bg = bg;
        self
    }

    /// Replace the glyph, keeping the background.
    pub fn set_glyph(&mut self, ch: char, fg: Color) {
        self.char = ch;
        self.fg = fg;
        self.wide_continuation = false;
    }

    /// Paint the background, blending by the color's alpha.
    pub fn fill(&mut self, color: Color) {
        match color.a {
            0 => {}
            255 => self.bg = color,
            alpha => self.bg = self.bg.mix(color.with_alpha(255), f32::from(alpha) / 255.0),
        }
    }
}
