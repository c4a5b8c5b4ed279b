//! Crossterm backend. One cell is one layout unit.

mod buffer;
mod cell;

use std::any::Any;
use std::collections::{HashMap, HashSet, VecDeque};
use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        MouseButton as CtMouseButton, MouseEventKind,
    },
    execute, queue,
    style::{Attribute, Color as CtColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

pub use buffer::Buffer;
pub use cell::Cell;

use crate::backend::{
    Backend, ButtonState, GamepadButton, Image, KeyboardKey, MouseButton, Texture, TextureId,
};
use crate::layout::{Rect, Vector2};
use crate::text::char_width;
use crate::types::{Color, CursorIcon};

/// Draws into the terminal through crossterm.
///
/// Terminals only report key presses, so a key is seen as pressed on the
/// frame its event arrives and released on the next one. A press arriving
/// while the key still counts as down is reported as a repeat.
pub struct TerminalBackend {
    stdout: io::Stdout,
    current_buffer: Buffer,
    previous_buffer: Buffer,
    mouse: HashMap<MouseButton, ButtonState>,
    keys: HashMap<KeyboardKey, ButtonState>,
    repeated: HashSet<KeyboardKey>,
    characters: VecDeque<char>,
    mouse_position: Vector2,
    just_resized: bool,
    last_frame: Instant,
    delta: Duration,
    area: Option<Rect>,
    cursor: CursorIcon,
    textures: HashMap<TextureId, Image>,
}

impl TerminalBackend {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        let (width, height) = terminal::size()?;
        log::debug!("[terminal] started at {width}x{height}");

        Ok(Self {
            stdout,
            current_buffer: Buffer::new(width, height),
            previous_buffer: Buffer::new(width, height),
            mouse: HashMap::new(),
            keys: HashMap::new(),
            repeated: HashSet::new(),
            characters: VecDeque::new(),
            mouse_position: Vector2::ZERO,
            just_resized: false,
            last_frame: Instant::now(),
            delta: Duration::ZERO,
            area: None,
            cursor: CursorIcon::Default,
            textures: HashMap::new(),
        })
    }

    /// Block until input arrives or `timeout` passes. Returns true if input
    /// is waiting for the next frame.
    pub fn wait(&self, timeout: Duration) -> io::Result<bool> {
        event::poll(timeout)
    }

    pub fn buffer(&self) -> &Buffer {
        &self.current_buffer
    }

    fn poll(&mut self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                CrosstermEvent::Key(key) => self.on_key(key),
                CrosstermEvent::Mouse(mouse) => {
                    self.mouse_position =
                        Vector2::new(f32::from(mouse.column), f32::from(mouse.row));
                    match mouse.kind {
                        MouseEventKind::Down(button) => {
                            self.mouse.insert(mouse_button(button), ButtonState::Pressed);
                        }
                        MouseEventKind::Up(button) => {
                            self.mouse.insert(mouse_button(button), ButtonState::Released);
                        }
                        _ => {}
                    }
                }
                CrosstermEvent::Resize(width, height) => {
                    log::debug!("[terminal] resized to {width}x{height}");
                    self.current_buffer = Buffer::new(width, height);
                    self.previous_buffer = Buffer::new(width, height);
                    self.just_resized = true;
                    queue!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn on_key(&mut self, event: KeyEvent) {
        if event.kind == KeyEventKind::Release {
            if let Some(key) = keyboard_key(event.code) {
                self.keys.insert(key, ButtonState::Released);
            }
            return;
        }

        let modifiers = [
            (KeyModifiers::SHIFT, KeyboardKey::LeftShift),
            (KeyModifiers::CONTROL, KeyboardKey::LeftControl),
            (KeyModifiers::ALT, KeyboardKey::LeftAlt),
            (KeyModifiers::SUPER, KeyboardKey::LeftSuper),
        ];
        for (flag, key) in modifiers {
            if event.modifiers.contains(flag) {
                self.press(key);
            }
        }
        if event.code == KeyCode::BackTab {
            self.press(KeyboardKey::LeftShift);
        }

        if let KeyCode::Char(c) = event.code {
            let plain = !event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
            if plain {
                self.characters.push_back(c);
            }
        }

        if let Some(key) = keyboard_key(event.code) {
            self.press(key);
        }
    }

    fn press(&mut self, key: KeyboardKey) {
        let state = self.keys.entry(key).or_default();
        if state.is_up() {
            *state = ButtonState::Pressed;
        } else {
            *state = ButtonState::Held;
            self.repeated.insert(key);
        }
    }

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_x = u16::MAX;
        let mut last_y = u16::MAX;
        let mut last_char_width: u16 = 1;
        let mut last_fg = Color::WHITE;
        let mut last_bg = Color::BLACK;

        queue!(
            self.stdout,
            SetAttribute(Attribute::Reset),
            SetForegroundColor(rgb(last_fg)),
            SetBackgroundColor(rgb(last_bg))
        )?;

        for (x, y, cell) in self.current_buffer.changes(&self.previous_buffer) {
            // The wide character before already covers this cell
            if cell.wide_continuation {
                continue;
            }

            if y != last_y || x != last_x.wrapping_add(last_char_width) {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }

            if cell.fg != last_fg {
                queue!(self.stdout, SetForegroundColor(rgb(cell.fg)))?;
                last_fg = cell.fg;
            }
            if cell.bg != last_bg {
                queue!(self.stdout, SetBackgroundColor(rgb(cell.bg)))?;
                last_bg = cell.bg;
            }

            write!(self.stdout, "{}", cell.char)?;

            last_x = x;
            last_y = y;
            last_char_width = char_width(cell.char).max(1) as u16;
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }

    fn present(&mut self) -> io::Result<()> {
        self.flush_diff()?;
        std::mem::swap(&mut self.current_buffer, &mut self.previous_buffer);
        self.current_buffer.reset();
        Ok(())
    }
}

fn rgb(color: Color) -> CtColor {
    CtColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

fn mouse_button(button: CtMouseButton) -> MouseButton {
    match button {
        CtMouseButton::Left => MouseButton::Left,
        CtMouseButton::Right => MouseButton::Right,
        CtMouseButton::Middle => MouseButton::Middle,
    }
}

fn keyboard_key(code: KeyCode) -> Option<KeyboardKey> {
    let key = match code {
        KeyCode::Backspace => KeyboardKey::Backspace,
        KeyCode::Enter => KeyboardKey::Enter,
        KeyCode::Left => KeyboardKey::Left,
        KeyCode::Right => KeyboardKey::Right,
        KeyCode::Up => KeyboardKey::Up,
        KeyCode::Down => KeyboardKey::Down,
        KeyCode::Home => KeyboardKey::Home,
        KeyCode::End => KeyboardKey::End,
        KeyCode::PageUp => KeyboardKey::PageUp,
        KeyCode::PageDown => KeyboardKey::PageDown,
        KeyCode::Tab | KeyCode::BackTab => KeyboardKey::Tab,
        KeyCode::Delete => KeyboardKey::Delete,
        KeyCode::Insert => KeyboardKey::Insert,
        KeyCode::Esc => KeyboardKey::Escape,
        KeyCode::F(n) => return function_key(n),
        KeyCode::Char(' ') => KeyboardKey::Space,
        KeyCode::Char(c) => return char_key(c),
        _ => return None,
    };
    Some(key)
}

fn function_key(n: u8) -> Option<KeyboardKey> {
    const KEYS: [KeyboardKey; 12] = [
        KeyboardKey::F1,
        KeyboardKey::F2,
        KeyboardKey::F3,
        KeyboardKey::F4,
        KeyboardKey::F5,
        KeyboardKey::F6,
        KeyboardKey::F7,
        KeyboardKey::F8,
        KeyboardKey::F9,
        KeyboardKey::F10,
        KeyboardKey::F11,
        KeyboardKey::F12,
    ];
    KEYS.get(usize::from(n).checked_sub(1)?).copied()
}

fn char_key(c: char) -> Option<KeyboardKey> {
    let key = match c {
        '-' => KeyboardKey::Minus,
        '=' => KeyboardKey::Equal,
        ',' => KeyboardKey::Comma,
        '.' => KeyboardKey::Period,
        '/' => KeyboardKey::Slash,
        ';' => KeyboardKey::Semicolon,
        '\'' => KeyboardKey::Apostrophe,
        '[' => KeyboardKey::LeftBracket,
        ']' => KeyboardKey::RightBracket,
        '\\' => KeyboardKey::Backslash,
        '`' => KeyboardKey::Grave,
        c => return KeyboardKey::from_char(c.to_ascii_lowercase()),
    };
    Some(key)
}

/// Release keys that weren't pressed again, and advance everything else.
fn advance_keys(keys: &mut HashMap<KeyboardKey, ButtonState>) {
    keys.retain(|_, state| {
        *state = match *state {
            ButtonState::Pressed | ButtonState::Held => ButtonState::Released,
            ButtonState::Released | ButtonState::Up => ButtonState::Up,
        };
        !state.is_up()
    });
}

impl Backend for TerminalBackend {
    fn begin_frame(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_frame;
        self.last_frame = now;

        if let Err(err) = self.poll() {
            log::warn!("[terminal] failed to read input: {err}");
        }
    }

    fn end_frame(&mut self) {
        if let Err(err) = self.present() {
            log::warn!("[terminal] failed to draw: {err}");
        }

        self.mouse.retain(|_, state| {
            *state = state.advance();
            !state.is_up()
        });
        advance_keys(&mut self.keys);
        self.repeated.clear();
        self.just_resized = false;
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

    fn gamepad_state_for(&self, _controller: usize, _button: GamepadButton) -> ButtonState {
        ButtonState::Up
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
        self.current_buffer.size()
    }

    fn set_window_size(&mut self, size: Vector2) {
        log::debug!("[terminal] can't resize the terminal to {}x{}", size.x, size.y);
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
    }

    fn restore_area(&mut self) {
        self.area = None;
    }

    fn cursor_icon(&self) -> CursorIcon {
        self.cursor
    }

    fn set_cursor_icon(&mut self, icon: CursorIcon) {
        self.cursor = icon;
    }

    fn draw_line(&mut self, start: Vector2, end: Vector2, color: Color) {
        let glyph = if start.y == end.y {
            '─'
        } else if start.x == end.x {
            '│'
        } else {
            '•'
        };

        let (mut x, mut y) = (start.x.round() as i32, start.y.round() as i32);
        let (x1, y1) = (end.x.round() as i32, end.y.round() as i32);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.current_buffer.put(x, y, glyph, color, self.area);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_triangle(&mut self, a: Vector2, b: Vector2, c: Vector2, color: Color) {
        let bounds = Rect::new(
            a.x.min(b.x).min(c.x),
            a.y.min(b.y).min(c.y),
            a.x.max(b.x).max(c.x) - a.x.min(b.x).min(c.x),
            a.y.max(b.y).max(c.y) - a.y.min(b.y).min(c.y),
        );
        let edge = |p: Vector2, q: Vector2, r: Vector2| {
            (q.x - p.x) * (r.y - p.y) - (q.y - p.y) * (r.x - p.x)
        };

        let (columns, rows) = self.current_buffer.span(bounds, self.area);
        for y in rows {
            for x in columns.clone() {
                let center = Vector2::new(f32::from(x) + 0.5, f32::from(y) + 0.5);
                let inside = edge(a, b, center) >= 0.0
                    && edge(b, c, center) >= 0.0
                    && edge(c, a, center) >= 0.0;
                if inside {
                    if let Some(cell) = self.current_buffer.visible_mut(x.into(), y.into(), None) {
                        cell.fill(color);
                    }
                }
            }
        }
    }

    fn draw_rectangle(&mut self, rect: Rect, color: Color) {
        self.current_buffer.fill(rect, self.area, color);
    }

    fn draw_text(&mut self, position: Vector2, text: &str, color: Color) {
        let mut x = position.x.round() as i32;
        let y = position.y.round() as i32;
        for ch in text.chars() {
            x += self.current_buffer.put(x, y, ch, color, self.area);
        }
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

    /// One pixel per cell, painted as background.
    fn draw_texture(&mut self, texture: Texture, position: Vector2, tint: Color) {
        let Some(image) = self.textures.get(&texture.id) else {
            panic!("texture {:?} is not loaded in this backend", texture.id);
        };

        let mut painted = Vec::new();
        for py in 0..image.height {
            for px in 0..image.width {
                let x = position.x.round() as i32 + px as i32;
                let y = position.y.round() as i32 + py as i32;
                if let Some(color) = image.get(px, py) {
                    painted.push((x, y, color.tint(tint)));
                }
            }
        }

        for (x, y, color) in painted {
            if let Some(cell) = self.current_buffer.visible_mut(x, y, self.area) {
                cell.fill(color);
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Drop for TerminalBackend {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            SetAttribute(Attribute::Reset),
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
