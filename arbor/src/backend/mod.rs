//! Capability interface between the node tree and whatever shows it.
//!
//! The core never talks to a window system directly. Everything it needs,
//! input state, clipping, the cursor and a handful of drawing primitives,
//! goes through [`Backend`]. Two implementations ship with the crate: the
//! [`HeadlessBackend`] test double and the crossterm
//! [`TerminalBackend`](crate::terminal::TerminalBackend).

use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::layout::{Rect, Vector2};
use crate::types::{Color, CursorIcon};

mod headless;
mod keys;

pub use headless::{DrawCall, HeadlessBackend};
pub use keys::{ButtonState, GamepadButton, KeyboardKey, MouseButton};

static NEXT_TEXTURE: AtomicU64 = AtomicU64::new(1);

/// Backend-assigned texture handle. Unique across all backends in the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(u64);

impl TextureId {
    pub fn next() -> Self {
        Self(NEXT_TEXTURE.fetch_add(1, Ordering::Relaxed))
    }
}

/// A texture uploaded to a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    pub id: TextureId,
    pub width: u32,
    pub height: u32,
}

/// Pixels in row-major order, ready to be uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl Image {
    pub fn new(width: u32, height: u32, pixels: Vec<Color>) -> Self {
        assert_eq!(
            pixels.len(),
            width as usize * height as usize,
            "image pixel count doesn't match its size"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self::new(width, height, vec![color; width as usize * height as usize])
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }
}

pub trait Backend: Any {
    /// Called by the frame driver before anything else in a frame.
    fn begin_frame(&mut self) {}

    /// Called by the frame driver once the frame is done: present output and
    /// advance input edges (pressed becomes held, released becomes up).
    fn end_frame(&mut self) {}

    // Input

    fn mouse_state(&self, button: MouseButton) -> ButtonState;

    fn key_state(&self, key: KeyboardKey) -> ButtonState;

    /// True if the key sent an auto-repeat this frame.
    fn key_repeated(&self, key: KeyboardKey) -> bool;

    /// Number of connected controllers.
    fn gamepad_count(&self) -> usize {
        0
    }

    fn gamepad_state_for(&self, controller: usize, button: GamepadButton) -> ButtonState;

    /// State of a gamepad button merged across every controller.
    fn gamepad_state(&self, button: GamepadButton) -> ButtonState {
        (0..self.gamepad_count())
            .map(|controller| self.gamepad_state_for(controller, button))
            .fold(ButtonState::Up, ButtonState::merge)
    }

    fn gamepad_repeated(&self, _button: GamepadButton) -> bool {
        false
    }

    /// Next character typed by the user, if any is queued.
    fn input_character(&mut self) -> Option<char>;

    // Output state

    fn mouse_position(&self) -> Vector2;

    fn set_mouse_position(&mut self, position: Vector2);

    fn window_size(&self) -> Vector2;

    fn set_window_size(&mut self, size: Vector2);

    fn hidpi_scale(&self) -> Vector2 {
        Vector2::new(1.0, 1.0)
    }

    /// True if the window changed size since the last frame.
    fn has_just_resized(&self) -> bool;

    /// Time since the previous frame.
    fn delta_time(&self) -> Duration;

    // Clipping

    /// Current clip area, `None` if drawing is unrestricted.
    fn area(&self) -> Option<Rect>;

    /// Replace the clip area.
    fn set_area(&mut self, area: Rect);

    /// Remove any clip area.
    fn restore_area(&mut self);

    // Cursor

    fn cursor_icon(&self) -> CursorIcon;

    fn set_cursor_icon(&mut self, icon: CursorIcon);

    // Drawing

    fn draw_line(&mut self, start: Vector2, end: Vector2, color: Color);

    /// Fill a triangle. Points are given in clockwise order.
    fn draw_triangle(&mut self, a: Vector2, b: Vector2, c: Vector2, color: Color);

    fn draw_rectangle(&mut self, rect: Rect, color: Color);

    /// Draw a single line of text starting at `position`.
    fn draw_text(&mut self, position: Vector2, text: &str, color: Color);

    fn load_texture(&mut self, image: &Image) -> Texture;

    /// Free a texture. Panics if the texture isn't loaded in this backend.
    fn unload_texture(&mut self, texture: Texture);

    fn draw_texture(&mut self, texture: Texture, position: Vector2, tint: Color);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
