//! Key events, decoupled from crossterm.
//!
//! Besides ordinary keys, [`Key`] carries two pseudo-keys delivered by the
//! backend: [`Key::Resize`] when the terminal changed size and
//! [`Key::Interrupt`] (Ctrl+C), which always stops the main loop.

use std::ops::BitOr;

use crossterm::event::KeyModifiers;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    /// The terminal was resized.
    Resize,
    /// Stop request (Ctrl+C).
    Interrupt,
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Held modifier keys, as a bit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);

    /// Whether every modifier of `other` is held.
    pub fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(held: KeyModifiers) -> Self {
        [
            (KeyModifiers::SHIFT, Modifiers::SHIFT),
            (KeyModifiers::CONTROL, Modifiers::CTRL),
            (KeyModifiers::ALT, Modifiers::ALT),
        ]
        .into_iter()
        .filter(|(flag, _)| held.contains(*flag))
        .fold(Modifiers::NONE, |acc, (_, modifier)| acc | modifier)
    }
}

// ---------------------------------------------------------------------------
// KeyEvent
// ---------------------------------------------------------------------------

/// A keyboard event with key and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event.
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// The printable ASCII character this event types, if any.
    pub fn printable(self) -> Option<char> {
        match self.code {
            Key::Char(ch) if (' '..='~').contains(&ch) && !self.modifiers.contains(Modifiers::CTRL) => {
                Some(ch)
            }
            _ => None,
        }
    }
}

impl From<Key> for KeyEvent {
    fn from(code: Key) -> Self {
        Self { code, modifiers: Modifiers::NONE }
    }
}

// ---------------------------------------------------------------------------
// From<crossterm> conversions
// ---------------------------------------------------------------------------

/// Convert a crossterm key event. Ctrl+C becomes [`Key::Interrupt`].
impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(ct: crossterm::event::KeyEvent) -> Self {
        use crossterm::event::KeyCode;

        let modifiers = Modifiers::from(ct.modifiers);
        let code = match ct.code {
            KeyCode::Char('c') | KeyCode::Char('C') if modifiers.contains(Modifiers::CTRL) => {
                Key::Interrupt
            }
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Escape,
        };
        KeyEvent { code, modifiers }
    }
}

/// Convert a crossterm terminal event into a key event.
///
/// Resizes become [`Key::Resize`]. Key releases, mouse, focus and paste
/// events yield `None`.
pub fn from_crossterm(event: crossterm::event::Event) -> Option<KeyEvent> {
    use crossterm::event::{Event, KeyEventKind};

    match event {
        Event::Key(ke) if ke.kind != KeyEventKind::Release => Some(KeyEvent::from(ke)),
        Event::Resize(_, _) => Some(KeyEvent::from(Key::Resize)),
        _ => None,
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_combined() {
        let mods = Modifiers::CTRL | Modifiers::ALT;
        assert!(mods.contains(Modifiers::CTRL));
        assert!(mods.contains(Modifiers::ALT));
        assert!(!mods.contains(Modifiers::SHIFT));
        assert!(Modifiers::NONE.is_empty());
    }

    #[test]
    fn modifiers_from_crossterm() {
        let held = KeyModifiers::CONTROL | KeyModifiers::SHIFT | KeyModifiers::SUPER;
        assert_eq!(Modifiers::from(held), Modifiers::CTRL | Modifiers::SHIFT);
        assert!(Modifiers::from(KeyModifiers::NONE).is_empty());
    }

    #[test]
    fn printable_range() {
        assert_eq!(KeyEvent::from(Key::Char('a')).printable(), Some('a'));
        assert_eq!(KeyEvent::from(Key::Char(' ')).printable(), Some(' '));
        assert_eq!(KeyEvent::from(Key::Char('~')).printable(), Some('~'));
        assert_eq!(KeyEvent::from(Key::Char('\u{7f}')).printable(), None);
        assert_eq!(KeyEvent::from(Key::Char('é')).printable(), None);
        assert_eq!(KeyEvent::from(Key::Enter).printable(), None);
        assert_eq!(KeyEvent::new(Key::Char('s'), Modifiers::CTRL).printable(), None);
    }

    #[test]
    fn from_crossterm_char() {
        let ct = crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Char('x'),
            crossterm::event::KeyModifiers::NONE,
        );
        let ke = KeyEvent::from(ct);
        assert_eq!(ke.code, Key::Char('x'));
        assert!(ke.modifiers.is_empty());
    }

    #[test]
    fn from_crossterm_ctrl_c_interrupts() {
        let ct = crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Char('c'),
            crossterm::event::KeyModifiers::CONTROL,
        );
        assert_eq!(KeyEvent::from(ct).code, Key::Interrupt);
    }

    #[test]
    fn from_crossterm_back_tab() {
        let ct = crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::BackTab,
            crossterm::event::KeyModifiers::SHIFT,
        );
        let ke = KeyEvent::from(ct);
        assert_eq!(ke.code, Key::BackTab);
        assert!(ke.modifiers.contains(Modifiers::SHIFT));
    }

    #[test]
    fn from_crossterm_events() {
        use crossterm::event::Event;

        assert_eq!(from_crossterm(Event::Resize(80, 24)), Some(KeyEvent::from(Key::Resize)));
        assert_eq!(from_crossterm(Event::FocusGained), None);

        let mut release = crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Char('a'),
            crossterm::event::KeyModifiers::NONE,
        );
        release.kind = crossterm::event::KeyEventKind::Release;
        assert_eq!(from_crossterm(Event::Key(release)), None);
    }
}
