use std::any::Any;
use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Duration;

use super::{
    Backend, ButtonState, GamepadButton, Image, KeyboardKey, MouseButton, Texture, TextureId,
};
use crate::layout::{Rect, Vector2};
use crate::types::{Color, CursorIcon};

/// A draw call recorded by [`HeadlessBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Line {
        start: Vector2,
        end: Vector2,
        color: Color,
    },
    Triangle {
        points: [Vector2; 3],
        color: Color,
    },
    Rectangle {
        rect: Rect,
        color: Color,
    },
    Text {
        position: Vector2,
        text: String,
        color: Color,
    },
    Texture {
        id: TextureId,
        position: Vector2,
        tint: Color,
    },
}

/// Backend without a window. Input is scripted between frames and every draw
/// call is recorded, which makes it the backend of choice for tests.
///
/// Scripted input follows the same edges a real backend reports: a pressed
/// button becomes held on the next frame, a released one becomes up.
#[derive(Debug)]
pub struct HeadlessBackend {
    mouse: HashMap<MouseButton, ButtonState>,
    keys: HashMap<KeyboardKey, ButtonState>,
    repeated: HashSet<KeyboardKey>,
    gamepads: Vec<HashMap<GamepadButton, ButtonState>>,
    characters: VecDeque<char>,
    mouse_position: Vector2,
    window_size: Vector2,
    scale: Vector2,
    just_resized: bool,
    delta: Duration,
    area: Option<Rect>,
    area_history: Vec<Option<Rect>>,
    cursor: CursorIcon,
    draws: Vec<DrawCall>,
    textures: HashMap<TextureId, Image>,
    frame: u64,
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new(Vector2::new(800.0, 600.0))
    }
}

impl HeadlessBackend {
    pub fn new(window_size: Vector2) -> Self {
        Self {
            mouse: HashMap::new(),
            keys: HashMap::new(),
            repeated: HashSet::new(),
            gamepads: Vec::new(),
            characters: VecDeque::new(),
            mouse_position: Vector2::ZERO,
            window_size,
            scale: Vector2::new(1.0, 1.0),
            just_resized: false,
            delta: Duration::from_millis(16),
            area: None,
            area_history: Vec::new(),
            cursor: CursorIcon::Default,
            draws: Vec::new(),
            textures: HashMap::new(),
            frame: 0,
        }
    }

    pub fn press_mouse(&mut self, button: MouseButton) {
        self.mouse.insert(button, ButtonState::Pressed);
    }

    pub fn release_mouse(&mut self, button: MouseButton) {
        self.mouse.insert(button, ButtonState::Released);
    }

    pub fn move_mouse(&mut self, position: Vector2) {
        self.mouse_position = position;
    }

    pub fn press_key(&mut self, key: KeyboardKey) {
        self.keys.insert(key, ButtonState::Pressed);
    }

    pub fn release_key(&mut self, key: KeyboardKey) {
        self.keys.insert(key, ButtonState::Released);
    }

    /// Emit an auto-repeat for a key, holding it if it wasn't down.
    pub fn repeat_key(&mut self, key: KeyboardKey) {
        let state = self.keys.entry(key).or_default();
        if !state.is_held() {
            *state = ButtonState::Held;
        }
        self.repeated.insert(key);
    }

    pub fn press_gamepad(&mut self, controller: usize, button: GamepadButton) {
        self.controller(controller).insert(button, ButtonState::Pressed);
    }

    pub fn release_gamepad(&mut self, controller: usize, button: GamepadButton) {
        self.controller(controller).insert(button, ButtonState::Released);
    }

    /// Queue characters as if typed.
    pub fn type_text(&mut self, text: &str) {
        self.characters.extend(text.chars());
    }

    /// Change the window size and report a resize on the next frame.
    pub fn resize(&mut self, size: Vector2) {
        self.window_size = size;
        self.just_resized = true;
    }

    pub fn set_scale(&mut self, scale: Vector2) {
        self.scale = scale;
    }

    /// Draw calls of the current (or last finished) frame.
    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    /// Every clip change since creation, `None` standing for a restore.
    pub fn area_history(&self) -> &[Option<Rect>] {
        &self.area_history
    }

    pub fn loaded_textures(&self) -> usize {
        self.textures.len()
    }

    /// Number of frames finished so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    fn controller(&mut self, controller: usize) -> &mut HashMap<GamepadButton, ButtonState> {
        if self.gamepads.len() <= controller {
            self.gamepads.resize_with(controller + 1, HashMap::new);
        }
        &mut self.gamepads[controller]
    }
}

fn advance<K>(states: &mut HashMap<K, ButtonState>) {
    states.retain(|_, state| {
        *state = state.advance();
        !state.is_up()
    });
}

impl Backend for HeadlessBackend {
    fn begin_frame(&mut self) {
        self.draws.clear();
    }

    fn end_frame(&mut self) {
        advance(&mut self.mouse);
        advance(&mut self.keys);
        for controller in &mut self.gamepads {
            advance(controller);
        }
        self.repeated.clear();
        self.just_resized = false;
        self.frame += 1;
    }

    fn mouse_state(&self, button: MouseButton) -> ButtonState {
        self.mouse.get(&button).copied().unwrap_or_default()
    }

    fn key_state(&self, key: KeyboardKey) -> ButtonState {
        self.keys.get(&key).copied().unwrap_or_default()
    }

    fn key_repeated(&self, key: KeyboardKey) -> bool {
        self.repeated.contains(&key)
    }

    fn gamepad_count(&self) -> usize {
        self.gamepads.len()
    }

    fn gamepad_state_for(&self, controller: usize, button: GamepadButton) -> ButtonState {
        self.gamepads
            .get(controller)
            .and_then(|buttons| buttons.get(&button))
            .copied()
            .unwrap_or_default()
    }

    fn input_character(&mut self) -> Option<char> {
        self.characters.pop_front()
    }

    fn mouse_position(&self) -> Vector2 {
        self.mouse_position
    }

    fn set_mouse_position(&mut self, position: Vector2) {
        self.mouse_position = position;
    }

    fn window_size(&self) -> Vector2 {
        self.window_size
    }

    fn set_window_size(&mut self, size: Vector2) {
        self.resize(size);
    }

    fn hidpi_scale(&self) -> Vector2 {
        self.scale
    }

    fn has_just_resized(&self) -> bool {
        self.just_resized
    }

    fn delta_time(&self) -> Duration {
        self.delta
    }

    fn area(&self) -> Option<Rect> {
        self.area
    }

    fn set_area(&mut self, area: Rect) {
        self.area = Some(area);
        self.area_history.push(Some(area));
    }

    fn restore_area(&mut self) {
        self.area = None;
        self.area_history.push(None);
    }

    fn cursor_icon(&self) -> CursorIcon {
        self.cursor
    }

    fn set_cursor_icon(&mut self, icon: CursorIcon) {
        self.cursor = icon;
    }

    fn draw_line(&mut self, start: Vector2, end: Vector2, color: Color) {
        self.draws.push(DrawCall::Line { start, end, color });
    }

    fn draw_triangle(&mut self, a: Vector2, b: Vector2, c: Vector2, color: Color) {
        self.draws.push(DrawCall::Triangle {
            points: [a, b, c],
            color,
        });
    }

    fn draw_rectangle(&mut self, rect: Rect, color: Color) {
        self.draws.push(DrawCall::Rectangle { rect, color });
    }

    fn draw_text(&mut self, position: Vector2, text: &str, color: Color) {
        self.draws.push(DrawCall::Text {
            position,
            text: text.to_string(),
            color,
        });
    }

    fn load_texture(&mut self, image: &Image) -> Texture {
        let id = TextureId::next();
        self.textures.insert(id, image.clone());
        Texture {
            id,
            width: image.width,
            height: image.height,
        }
    }

    fn unload_texture(&mut self, texture: Texture) {
        assert!(
            self.textures.remove(&texture.id).is_some(),
            "texture {:?} is not loaded in this backend",
            texture.id
        );
    }

    fn draw_texture(&mut self, texture: Texture, position: Vector2, tint: Color) {
        assert!(
            self.textures.contains_key(&texture.id),
            "texture {:?} is not loaded in this backend",
            texture.id
        );
        self.draws.push(DrawCall::Texture {
            id: texture.id,
            position,
            tint,
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
