//! Input state
//!
//! [`InputState`] is a per-frame snapshot of the keyboard and mouse. The
//! platform layer feeds it events; systems only read it through the
//! [`FrameContext`](crate::context::FrameContext).
//!
//! Cursor movement is measured against the position at the end of the
//! previous frame, so [`InputState::mouse_delta`] is the motion during the
//! current frame on both axes.

use std::collections::HashSet;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec2;

/// Key codes
///
/// Discriminants are the GLFW key codes, which most windowing layers expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum KeyCode {
    /// Space key
    Space = 32,
    /// `'` key
    Apostrophe = 39,
    /// `,` key
    Comma = 44,
    /// `-` key
    Minus = 45,
    /// `.` key
    Period = 46,
    /// `/` key
    Slash = 47,
    /// 0 key on the main row
    Num0 = 48,
    /// 1 key on the main row
    Num1 = 49,
    /// 2 key on the main row
    Num2 = 50,
    /// 3 key on the main row
    Num3 = 51,
    /// 4 key on the main row
    Num4 = 52,
    /// 5 key on the main row
    Num5 = 53,
    /// 6 key on the main row
    Num6 = 54,
    /// 7 key on the main row
    Num7 = 55,
    /// 8 key on the main row
    Num8 = 56,
    /// 9 key on the main row
    Num9 = 57,
    /// `;` key
    Semicolon = 59,
    /// `=` key
    Equal = 61,
    /// A key
    A = 65,
    /// B key
    B = 66,
    /// C key
    C = 67,
    /// D key
    D = 68,
    /// E key
    E = 69,
    /// F key
    F = 70,
    /// G key
    G = 71,
    /// H key
    H = 72,
    /// I key
    I = 73,
    /// J key
    J = 74,
    /// K key
    K = 75,
    /// L key
    L = 76,
    /// M key
    M = 77,
    /// N key
    N = 78,
    /// O key
    O = 79,
    /// P key
    P = 80,
    /// Q key
    Q = 81,
    /// R key
    R = 82,
    /// S key
    S = 83,
    /// T key
    T = 84,
    /// U key
    U = 85,
    /// V key
    V = 86,
    /// W key
    W = 87,
    /// X key
    X = 88,
    /// Y key
    Y = 89,
    /// Z key
    Z = 90,
    /// `[` key
    LeftBracket = 91,
    /// `\` key
    Backslash = 92,
    /// `]` key
    RightBracket = 93,
    /// `` ` `` key
    GraveAccent = 96,
    /// Escape key
    Escape = 256,
    /// Enter key
    Enter = 257,
    /// Tab key
    Tab = 258,
    /// Backspace key
    Backspace = 259,
    /// Insert key
    Insert = 260,
    /// Delete key
    Delete = 261,
    /// Right arrow
    Right = 262,
    /// Left arrow
    Left = 263,
    /// Down arrow
    Down = 264,
    /// Up arrow
    Up = 265,
    /// Page up
    PageUp = 266,
    /// Page down
    PageDown = 267,
    /// Home key
    Home = 268,
    /// End key
    End = 269,
    /// Caps lock
    CapsLock = 280,
    /// Scroll lock
    ScrollLock = 281,
    /// Num lock
    NumLock = 282,
    /// Print screen
    PrintScreen = 283,
    /// Pause key
    Pause = 284,
    /// F1 key
    F1 = 290,
    /// F2 key
    F2 = 291,
    /// F3 key
    F3 = 292,
    /// F4 key
    F4 = 293,
    /// F5 key
    F5 = 294,
    /// F6 key
    F6 = 295,
    /// F7 key
    F7 = 296,
    /// F8 key
    F8 = 297,
    /// F9 key
    F9 = 298,
    /// F10 key
    F10 = 299,
    /// F11 key
    F11 = 300,
    /// F12 key
    F12 = 301,
    /// F13 key
    F13 = 302,
    /// F14 key
    F14 = 303,
    /// F15 key
    F15 = 304,
    /// F16 key
    F16 = 305,
    /// F17 key
    F17 = 306,
    /// F18 key
    F18 = 307,
    /// F19 key
    F19 = 308,
    /// F20 key
    F20 = 309,
    /// F21 key
    F21 = 310,
    /// F22 key
    F22 = 311,
    /// F23 key
    F23 = 312,
    /// F24 key
    F24 = 313,
    /// F25 key
    F25 = 314,
    /// Keypad 0
    Keypad0 = 320,
    /// Keypad 1
    Keypad1 = 321,
    /// Keypad 2
    Keypad2 = 322,
    /// Keypad 3
    Keypad3 = 323,
    /// Keypad 4
    Keypad4 = 324,
    /// Keypad 5
    Keypad5 = 325,
    /// Keypad 6
    Keypad6 = 326,
    /// Keypad 7
    Keypad7 = 327,
    /// Keypad 8
    Keypad8 = 328,
    /// Keypad 9
    Keypad9 = 329,
    /// Keypad `.`
    KeypadDecimal = 330,
    /// Keypad `/`
    KeypadDivide = 331,
    /// Keypad `*`
    KeypadMultiply = 332,
    /// Keypad `-`
    KeypadSubtract = 333,
    /// Keypad `+`
    KeypadAdd = 334,
    /// Keypad enter
    KeypadEnter = 335,
    /// Keypad `=`
    KeypadEqual = 336,
    /// Left shift
    LeftShift = 340,
    /// Left control
    LeftControl = 341,
    /// Left alt
    LeftAlt = 342,
    /// Left super (Windows/Command)
    LeftSuper = 343,
    /// Right shift
    RightShift = 344,
    /// Right control
    RightControl = 345,
    /// Right alt
    RightAlt = 346,
    /// Right super (Windows/Command)
    RightSuper = 347,
    /// Menu key
    Menu = 348,
}

impl KeyCode {
    /// Every key, in code order
    pub const ALL: [Self; 118] = [
        Self::Space,
        Self::Apostrophe,
        Self::Comma,
        Self::Minus,
        Self::Period,
        Self::Slash,
        Self::Num0,
        Self::Num1,
        Self::Num2,
        Self::Num3,
        Self::Num4,
        Self::Num5,
        Self::Num6,
        Self::Num7,
        Self::Num8,
        Self::Num9,
        Self::Semicolon,
        Self::Equal,
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
        Self::I,
        Self::J,
        Self::K,
        Self::L,
        Self::M,
        Self::N,
        Self::O,
        Self::P,
        Self::Q,
        Self::R,
        Self::S,
        Self::T,
        Self::U,
        Self::V,
        Self::W,
        Self::X,
        Self::Y,
        Self::Z,
        Self::LeftBracket,
        Self::Backslash,
        Self::RightBracket,
        Self::GraveAccent,
        Self::Escape,
        Self::Enter,
        Self::Tab,
        Self::Backspace,
        Self::Insert,
        Self::Delete,
        Self::Right,
        Self::Left,
        Self::Down,
        Self::Up,
        Self::PageUp,
        Self::PageDown,
        Self::Home,
        Self::End,
        Self::CapsLock,
        Self::ScrollLock,
        Self::NumLock,
        Self::PrintScreen,
        Self::Pause,
        Self::F1,
        Self::F2,
        Self::F3,
        Self::F4,
        Self::F5,
        Self::F6,
        Self::F7,
        Self::F8,
        Self::F9,
        Self::F10,
        Self::F11,
        Self::F12,
        Self::F13,
        Self::F14,
        Self::F15,
        Self::F16,
        Self::F17,
        Self::F18,
        Self::F19,
        Self::F20,
        Self::F21,
        Self::F22,
        Self::F23,
        Self::F24,
        Self::F25,
        Self::Keypad0,
        Self::Keypad1,
        Self::Keypad2,
        Self::Keypad3,
        Self::Keypad4,
        Self::Keypad5,
        Self::Keypad6,
        Self::Keypad7,
        Self::Keypad8,
        Self::Keypad9,
        Self::KeypadDecimal,
        Self::KeypadDivide,
        Self::KeypadMultiply,
        Self::KeypadSubtract,
        Self::KeypadAdd,
        Self::KeypadEnter,
        Self::KeypadEqual,
        Self::LeftShift,
        Self::LeftControl,
        Self::LeftAlt,
        Self::LeftSuper,
        Self::RightShift,
        Self::RightControl,
        Self::RightAlt,
        Self::RightSuper,
        Self::Menu,
    ];

    /// GLFW key code
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Key for a GLFW key code, if it is one the engine knows
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.code() == code)
    }
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
    /// Fourth button, usually back
    Button4,
    /// Fifth button, usually forward
    Button5,
    /// Sixth button
    Button6,
    /// Seventh button
    Button7,
    /// Eighth button
    Button8,
}

impl MouseButton {
    /// Every button, in code order
    pub const ALL: [Self; 8] = [
        Self::Left,
        Self::Right,
        Self::Middle,
        Self::Button4,
        Self::Button5,
        Self::Button6,
        Self::Button7,
        Self::Button8,
    ];

    /// GLFW button code
    pub const fn code(self) -> i32 {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Middle => 2,
            Self::Button4 => 3,
            Self::Button5 => 4,
            Self::Button6 => 5,
            Self::Button7 => 6,
            Self::Button8 => 7,
        }
    }

    /// Button for a GLFW button code
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Left),
            1 => Some(Self::Right),
            2 => Some(Self::Middle),
            3 => Some(Self::Button4),
            4 => Some(Self::Button5),
            5 => Some(Self::Button6),
            6 => Some(Self::Button7),
            7 => Some(Self::Button8),
            _ => None,
        }
    }
}

bitflags! {
    /// Set of mouse buttons held down
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        /// Left button is down.
        const LEFT    = 0b0000_0001;
        /// Right button is down.
        const RIGHT   = 0b0000_0010;
        /// Middle button is down.
        const MIDDLE  = 0b0000_0100;
        /// Button 4 is down.
        const BUTTON4 = 0b0000_1000;
        /// Button 5 is down.
        const BUTTON5 = 0b0001_0000;
        /// Button 6 is down.
        const BUTTON6 = 0b0010_0000;
        /// Button 7 is down.
        const BUTTON7 = 0b0100_0000;
        /// Button 8 is down.
        const BUTTON8 = 0b1000_0000;
    }
}

impl From<MouseButton> for MouseButtons {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => Self::LEFT,
            MouseButton::Right => Self::RIGHT,
            MouseButton::Middle => Self::MIDDLE,
            MouseButton::Button4 => Self::BUTTON4,
            MouseButton::Button5 => Self::BUTTON5,
            MouseButton::Button6 => Self::BUTTON6,
            MouseButton::Button7 => Self::BUTTON7,
            MouseButton::Button8 => Self::BUTTON8,
        }
    }
}

/// Keyboard and mouse snapshot for the current frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    buttons: MouseButtons,
    cursor: Vec2,
    previous_cursor: Vec2,
    cursor_seen: bool,
    scroll: Vec2,
}

impl InputState {
    /// Nothing pressed, cursor at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press or release
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_down.insert(key);
        } else {
            self.keys_down.remove(&key);
        }
    }

    /// Record a mouse button press or release
    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        self.buttons.set(button.into(), pressed);
    }

    /// Record a cursor position in window coordinates
    ///
    /// The first position ever reported also becomes the previous position,
    /// so the cursor entering the window does not register as motion.
    #[allow(clippy::cast_possible_truncation)]
    pub fn handle_mouse_move(&mut self, x: f64, y: f64) {
        self.cursor = Vec2::new(x as f32, y as f32);
        if !self.cursor_seen {
            self.previous_cursor = self.cursor;
            self.cursor_seen = true;
        }
    }

    /// Accumulate scroll wheel motion
    pub fn handle_mouse_wheel(&mut self, delta_x: f32, delta_y: f32) {
        self.scroll += Vec2::new(delta_x, delta_y);
    }

    /// Close the current frame: the current cursor becomes the previous one
    /// and accumulated scroll is cleared
    pub fn end_frame(&mut self) {
        self.previous_cursor = self.cursor;
        self.scroll = Vec2::ZERO;
    }

    /// Whether `key` is held
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Whether `key` is released
    pub fn is_key_up(&self, key: KeyCode) -> bool {
        !self.is_key_down(key)
    }

    /// Whether `button` is held
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons.contains(button.into())
    }

    /// Whether `button` is released
    pub fn is_button_up(&self, button: MouseButton) -> bool {
        !self.is_button_down(button)
    }

    /// Every held button
    pub const fn buttons(&self) -> MouseButtons {
        self.buttons
    }

    /// Cursor position in window coordinates
    pub const fn mouse_position(&self) -> Vec2 {
        self.cursor
    }

    /// Cursor position at the end of the previous frame
    pub const fn previous_mouse_position(&self) -> Vec2 {
        self.previous_cursor
    }

    /// Cursor motion during this frame
    pub fn mouse_delta(&self) -> Vec2 {
        self.cursor - self.previous_cursor
    }

    /// Scroll accumulated during this frame
    pub const fn scroll_delta(&self) -> Vec2 {
        self.scroll
    }
}
