/// Per-frame state of a physical button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonState {
    #[default]
    Up,
    /// Went down this frame.
    Pressed,
    /// Down since an earlier frame.
    Held,
    /// Went up this frame.
    Released,
}

impl ButtonState {
    pub const fn is_pressed(self) -> bool {
        matches!(self, Self::Pressed)
    }

    pub const fn is_released(self) -> bool {
        matches!(self, Self::Released)
    }

    /// Pressed this frame or held from before.
    pub const fn is_held(self) -> bool {
        matches!(self, Self::Pressed | Self::Held)
    }

    pub const fn is_up(self) -> bool {
        matches!(self, Self::Up)
    }

    /// State the button is in on the next frame if nothing happens.
    pub const fn advance(self) -> Self {
        match self {
            Self::Pressed | Self::Held => Self::Held,
            Self::Released | Self::Up => Self::Up,
        }
    }

    /// Combine the state of the same button on two devices.
    pub fn merge(self, other: Self) -> Self {
        let rank = |state: Self| match state {
            Self::Up => 0,
            Self::Released => 1,
            Self::Held => 2,
            Self::Pressed => 3,
        };
        if rank(other) > rank(self) {
            other
        } else {
            self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    /// Bottom face button (A / cross).
    A,
    /// Right face button (B / circle).
    B,
    /// Left face button (X / square).
    X,
    /// Top face button (Y / triangle).
    Y,
    LeftButton,
    RightButton,
    LeftTrigger,
    RightTrigger,
    Select,
    Start,
    LeftStick,
    RightStick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyboardKey {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Space,
    Enter,
    Escape,
    Backspace,
    Tab,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
    LeftSuper,
    RightSuper,
    Minus,
    Equal,
    Comma,
    Period,
    Slash,
    Semicolon,
    Apostrophe,
    LeftBracket,
    RightBracket,
    Backslash,
    Grave,
}

const MOUSE_NAMES: &[(MouseButton, &str)] = &[
    (MouseButton::Left, "left"),
    (MouseButton::Right, "right"),
    (MouseButton::Middle, "middle"),
    (MouseButton::Back, "back"),
    (MouseButton::Forward, "forward"),
];

const GAMEPAD_NAMES: &[(GamepadButton, &str)] = &[
    (GamepadButton::DpadUp, "up"),
    (GamepadButton::DpadDown, "down"),
    (GamepadButton::DpadLeft, "left"),
    (GamepadButton::DpadRight, "right"),
    (GamepadButton::A, "a"),
    (GamepadButton::B, "b"),
    (GamepadButton::X, "x"),
    (GamepadButton::Y, "y"),
    (GamepadButton::LeftButton, "lb"),
    (GamepadButton::RightButton, "rb"),
    (GamepadButton::LeftTrigger, "lt"),
    (GamepadButton::RightTrigger, "rt"),
    (GamepadButton::Select, "select"),
    (GamepadButton::Start, "start"),
    (GamepadButton::LeftStick, "ls"),
    (GamepadButton::RightStick, "rs"),
];

const KEY_NAMES: &[(KeyboardKey, &str)] = &[
    (KeyboardKey::A, "a"),
    (KeyboardKey::B, "b"),
    (KeyboardKey::C, "c"),
    (KeyboardKey::D, "d"),
    (KeyboardKey::E, "e"),
    (KeyboardKey::F, "f"),
    (KeyboardKey::G, "g"),
    (KeyboardKey::H, "h"),
    (KeyboardKey::I, "i"),
    (KeyboardKey::J, "j"),
    (KeyboardKey::K, "k"),
    (KeyboardKey::L, "l"),
    (KeyboardKey::M, "m"),
    (KeyboardKey::N, "n"),
    (KeyboardKey::O, "o"),
    (KeyboardKey::P, "p"),
    (KeyboardKey::Q, "q"),
    (KeyboardKey::R, "r"),
    (KeyboardKey::S, "s"),
    (KeyboardKey::T, "t"),
    (KeyboardKey::U, "u"),
    (KeyboardKey::V, "v"),
    (KeyboardKey::W, "w"),
    (KeyboardKey::X, "x"),
    (KeyboardKey::Y, "y"),
    (KeyboardKey::Z, "z"),
    (KeyboardKey::Digit0, "0"),
    (KeyboardKey::Digit1, "1"),
    (KeyboardKey::Digit2, "2"),
    (KeyboardKey::Digit3, "3"),
    (KeyboardKey::Digit4, "4"),
    (KeyboardKey::Digit5, "5"),
    (KeyboardKey::Digit6, "6"),
    (KeyboardKey::Digit7, "7"),
    (KeyboardKey::Digit8, "8"),
    (KeyboardKey::Digit9, "9"),
    (KeyboardKey::F1, "f1"),
    (KeyboardKey::F2, "f2"),
    (KeyboardKey::F3, "f3"),
    (KeyboardKey::F4, "f4"),
    (KeyboardKey::F5, "f5"),
    (KeyboardKey::F6, "f6"),
    (KeyboardKey::F7, "f7"),
    (KeyboardKey::F8, "f8"),
    (KeyboardKey::F9, "f9"),
    (KeyboardKey::F10, "f10"),
    (KeyboardKey::F11, "f11"),
    (KeyboardKey::F12, "f12"),
    (KeyboardKey::Space, "space"),
    (KeyboardKey::Enter, "enter"),
    (KeyboardKey::Escape, "escape"),
    (KeyboardKey::Backspace, "backspace"),
    (KeyboardKey::Tab, "tab"),
    (KeyboardKey::Insert, "insert"),
    (KeyboardKey::Delete, "delete"),
    (KeyboardKey::Home, "home"),
    (KeyboardKey::End, "end"),
    (KeyboardKey::PageUp, "pageup"),
    (KeyboardKey::PageDown, "pagedown"),
    (KeyboardKey::Up, "up"),
    (KeyboardKey::Down, "down"),
    (KeyboardKey::Left, "left"),
    (KeyboardKey::Right, "right"),
    (KeyboardKey::LeftShift, "shift"),
    (KeyboardKey::RightShift, "rshift"),
    (KeyboardKey::LeftControl, "ctrl"),
    (KeyboardKey::RightControl, "rctrl"),
    (KeyboardKey::LeftAlt, "alt"),
    (KeyboardKey::RightAlt, "ralt"),
    (KeyboardKey::LeftSuper, "super"),
    (KeyboardKey::RightSuper, "rsuper"),
    (KeyboardKey::Minus, "minus"),
    (KeyboardKey::Equal, "equal"),
    (KeyboardKey::Comma, "comma"),
    (KeyboardKey::Period, "period"),
    (KeyboardKey::Slash, "slash"),
    (KeyboardKey::Semicolon, "semicolon"),
    (KeyboardKey::Apostrophe, "apostrophe"),
    (KeyboardKey::LeftBracket, "lbracket"),
    (KeyboardKey::RightBracket, "rbracket"),
    (KeyboardKey::Backslash, "backslash"),
    (KeyboardKey::Grave, "grave"),
];

fn lookup<T: Copy + PartialEq>(table: &[(T, &'static str)], name: &str) -> Option<T> {
    table
        .iter()
        .find(|(_, entry)| entry.eq_ignore_ascii_case(name))
        .map(|(value, _)| *value)
}

fn name_of<T: Copy + PartialEq>(table: &[(T, &'static str)], value: T) -> &'static str {
    table
        .iter()
        .find(|(entry, _)| *entry == value)
        .map(|(_, name)| *name)
        .unwrap_or("?")
}

impl MouseButton {
    pub fn from_name(name: &str) -> Option<Self> {
        lookup(MOUSE_NAMES, name)
    }

    pub fn name(self) -> &'static str {
        name_of(MOUSE_NAMES, self)
    }
}

impl GamepadButton {
    pub fn from_name(name: &str) -> Option<Self> {
        lookup(GAMEPAD_NAMES, name)
    }

    pub fn name(self) -> &'static str {
        name_of(GAMEPAD_NAMES, self)
    }
}

impl KeyboardKey {
    /// Parse a key name. Accepts a few aliases (`esc`, `return`, `control`, `cmd`).
    pub fn from_name(name: &str) -> Option<Self> {
        let canonical = match name.to_ascii_lowercase().as_str() {
            "esc" => "escape",
            "return" => "enter",
            "control" | "lctrl" => "ctrl",
            "lshift" => "shift",
            "lalt" | "option" => "alt",
            "cmd" | "meta" | "win" | "lsuper" => "super",
            _ => return lookup(KEY_NAMES, name),
        };
        lookup(KEY_NAMES, canonical)
    }

    pub fn name(self) -> &'static str {
        name_of(KEY_NAMES, self)
    }

    /// Key for a typed ASCII letter or digit.
    pub fn from_char(c: char) -> Option<Self> {
        if c.is_ascii_alphanumeric() {
            lookup(KEY_NAMES, c.encode_utf8(&mut [0; 4]))
        } else {
            None
        }
    }
}
