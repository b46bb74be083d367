#![forbid(unsafe_code)]

//! Input the page reacts to.
//!
//! Three notifications drive the page: pointer activity (moves, clicks and
//! wheel), viewport resize, and a frame tick. Keys are carried for panel
//! navigation, scrolling and quitting. Everything else the terminal can
//! report (paste, media keys, horizontal wheel) is dropped at the crossterm
//! boundary, so the rest of the workspace never sees it.
//!
//! Pointer coordinates are 0-indexed cells, origin top-left.

use bitflags::bitflags;
#[cfg(not(target_arch = "wasm32"))]
use crossterm::event as cte;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Viewport size in cells.
    Resize { width: u16, height: u16 },
    /// `true` when focus was gained.
    Focus(bool),
    /// Runtime timer tick.
    Tick,
}

impl Event {
    /// Map a crossterm event, or `None` if the page has no use for it.
    #[must_use]
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        Some(match event {
            cte::Event::Key(key) => Self::Key(KeyEvent::from_crossterm(key)?),
            cte::Event::Mouse(mouse) => Self::Mouse(MouseEvent::from_crossterm(mouse)?),
            cte::Event::Resize(width, height) => Self::Resize { width, height },
            cte::Event::FocusGained => Self::Focus(true),
            cte::Event::FocusLost => Self::Focus(false),
            cte::Event::Paste(_) => return None,
        })
    }

    #[must_use]
    pub const fn pointer_moved(x: u16, y: u16) -> Self {
        Self::Mouse(MouseEvent::new(MouseEventKind::Moved, x, y))
    }

    /// Left-button press at `(x, y)`.
    #[must_use]
    pub const fn click(x: u16, y: u16) -> Self {
        Self::Mouse(MouseEvent::new(MouseEventKind::Down(MouseButton::Left), x, y))
    }

    /// Plain key press.
    #[must_use]
    pub const fn key(code: KeyCode) -> Self {
        Self::Key(KeyEvent::new(code))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A press with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        self.code == KeyCode::Char(c)
    }

    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn from_crossterm(key: cte::KeyEvent) -> Option<Self> {
        let code = match key.code {
            cte::KeyCode::Char(c) => KeyCode::Char(c),
            cte::KeyCode::Enter => KeyCode::Enter,
            cte::KeyCode::Esc => KeyCode::Escape,
            cte::KeyCode::Tab => KeyCode::Tab,
            cte::KeyCode::BackTab => KeyCode::BackTab,
            cte::KeyCode::Home => KeyCode::Home,
            cte::KeyCode::End => KeyCode::End,
            cte::KeyCode::PageUp => KeyCode::PageUp,
            cte::KeyCode::PageDown => KeyCode::PageDown,
            cte::KeyCode::Up => KeyCode::Up,
            cte::KeyCode::Down => KeyCode::Down,
            cte::KeyCode::Left => KeyCode::Left,
            cte::KeyCode::Right => KeyCode::Right,
            _ => return None,
        };
        let kind = match key.kind {
            cte::KeyEventKind::Press => KeyEventKind::Press,
            cte::KeyEventKind::Repeat => KeyEventKind::Repeat,
            cte::KeyEventKind::Release => KeyEventKind::Release,
        };
        Some(Self {
            code,
            modifiers: Modifiers::from_crossterm(key.modifiers),
            kind,
        })
    }
}

/// Keys the page binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Tab,
    /// Shift+Tab.
    BackTab,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
}

/// Press unless the terminal reports otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    #[default]
    Press,
    Repeat,
    Release,
}

bitflags! {
    /// Modifier keys held during an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const NONE  = 0;
        const SHIFT = 1 << 0;
        const ALT   = 1 << 1;
        const CTRL  = 1 << 2;
        /// Super, Meta, Hyper or Command.
        const SUPER = 1 << 3;
    }
}

impl Modifiers {
    #[cfg(not(target_arch = "wasm32"))]
    fn from_crossterm(m: cte::KeyModifiers) -> Self {
        [
            (cte::KeyModifiers::SHIFT, Self::SHIFT),
            (cte::KeyModifiers::ALT, Self::ALT),
            (cte::KeyModifiers::CONTROL, Self::CTRL),
            (cte::KeyModifiers::SUPER, Self::SUPER),
            (cte::KeyModifiers::HYPER, Self::SUPER),
            (cte::KeyModifiers::META, Self::SUPER),
        ]
        .into_iter()
        .filter(|(flag, _)| m.contains(*flag))
        .fold(Self::NONE, |acc, (_, ours)| acc | ours)
    }
}

/// A pointer event at cell `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub x: u16,
    pub y: u16,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub const fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn from_crossterm(mouse: cte::MouseEvent) -> Option<Self> {
        let button = |b: cte::MouseButton| match b {
            cte::MouseButton::Left => MouseButton::Left,
            cte::MouseButton::Right => MouseButton::Right,
            cte::MouseButton::Middle => MouseButton::Middle,
        };
        let kind = match mouse.kind {
            cte::MouseEventKind::Down(b) => MouseEventKind::Down(button(b)),
            cte::MouseEventKind::Up(b) => MouseEventKind::Up(button(b)),
            cte::MouseEventKind::Drag(b) => MouseEventKind::Drag(button(b)),
            cte::MouseEventKind::Moved => MouseEventKind::Moved,
            cte::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
            cte::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
            // The page only scrolls vertically.
            cte::MouseEventKind::ScrollLeft | cte::MouseEventKind::ScrollRight => return None,
        };
        Some(
            Self::new(kind, mouse.column, mouse.row)
                .with_modifiers(Modifiers::from_crossterm(mouse.modifiers)),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
    /// Moved with a button held.
    Drag(MouseButton),
    /// Moved with no button held.
    Moved,
    ScrollUp,
    ScrollDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crossterm::event as ct;

    fn ct_mouse(kind: ct::MouseEventKind, column: u16, row: u16) -> ct::Event {
        ct::Event::Mouse(ct::MouseEvent {
            kind,
            column,
            row,
            modifiers: ct::KeyModifiers::NONE,
        })
    }

    #[test]
    fn is_char_matches_only_that_char() {
        let event = KeyEvent::new(KeyCode::Char('q'));
        assert!(event.is_char('q'));
        assert!(!event.is_char('x'));
        assert!(!KeyEvent::new(KeyCode::Tab).is_char('\t'));
    }

    #[test]
    fn ctrl_c_from_crossterm() {
        let key = ct::KeyEvent::new(ct::KeyCode::Char('c'), ct::KeyModifiers::CONTROL);
        let Some(Event::Key(mapped)) = Event::from_crossterm(ct::Event::Key(key)) else {
            panic!("expected a key event");
        };
        assert!(mapped.ctrl());
        assert!(mapped.is_char('c'));
    }

    #[test]
    fn meta_and_hyper_fold_into_super() {
        let m = Modifiers::from_crossterm(ct::KeyModifiers::META | ct::KeyModifiers::SHIFT);
        assert_eq!(m, Modifiers::SUPER | Modifiers::SHIFT);
        assert_eq!(Modifiers::from_crossterm(ct::KeyModifiers::HYPER), Modifiers::SUPER);
    }

    #[test]
    fn pointer_move_and_click_map_to_shorthands() {
        assert_eq!(
            Event::from_crossterm(ct_mouse(ct::MouseEventKind::Moved, 12, 4)),
            Some(Event::pointer_moved(12, 4))
        );
        assert_eq!(
            Event::from_crossterm(ct_mouse(ct::MouseEventKind::Down(ct::MouseButton::Left), 3, 9)),
            Some(Event::click(3, 9))
        );
    }

    #[test]
    fn horizontal_wheel_and_paste_are_dropped() {
        assert_eq!(Event::from_crossterm(ct_mouse(ct::MouseEventKind::ScrollLeft, 0, 0)), None);
        assert_eq!(Event::from_crossterm(ct::Event::Paste("x".into())), None);
    }

    #[test]
    fn unbound_keys_are_dropped() {
        let f1 = ct::KeyEvent::new(ct::KeyCode::F(1), ct::KeyModifiers::NONE);
        assert_eq!(Event::from_crossterm(ct::Event::Key(f1)), None);
    }

    #[test]
    fn resize_and_escape_map() {
        assert_eq!(
            Event::from_crossterm(ct::Event::Resize(120, 40)),
            Some(Event::Resize {
                width: 120,
                height: 40
            })
        );
        let esc = ct::KeyEvent::new(ct::KeyCode::Esc, ct::KeyModifiers::NONE);
        assert_eq!(
            Event::from_crossterm(ct::Event::Key(esc)),
            Some(Event::key(KeyCode::Escape))
        );
    }
}
