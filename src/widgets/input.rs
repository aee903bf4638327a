//! Input widget: a single-line edit buffer shown through a text window.
//!
//! The buffer holds printable ASCII only, so byte and column positions are
//! the same. The text window shows the visible part of the buffer with a
//! cursor escape at the edit position; call [`Input::refresh`] after any
//! change made outside [`Input::event`].

use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;

use crate::app::Tui;
use crate::error::{Error, Result};
use crate::event::{Key, KeyEvent};
use crate::tree::WindowId;

/// Marks the edit position inside the display string.
pub const CURSOR_ESCAPE: &str = "\x1b[5m";

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A fixed-capacity edit buffer bound to a text window.
///
/// # Examples
///
/// ```
/// use tui_forest::widgets::Input;
/// use tui_forest::testing::Pilot;
/// use tui_forest::config::TextConfig;
/// use tui_forest::Owner;
///
/// let mut pilot = Pilot::new(10, 1);
/// let id = pilot.tui_mut().create_text(Owner::Root, TextConfig::new("")).unwrap();
/// let mut input = Input::new(id, 8);
/// input.insert('h');
/// input.insert('i');
/// assert_eq!(input.value(), "hi");
/// assert_eq!(input.display(pilot.tui()), "hi\x1b[5m");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    window: WindowId,
    buffer: String,
    capacity: usize,
    cursor: usize,
    scroll: usize,
}

impl Input {
    /// An empty buffer of `capacity` characters shown in `window`.
    pub fn new(window: WindowId, capacity: usize) -> Self {
        Self {
            window,
            buffer: String::with_capacity(capacity),
            capacity,
            cursor: 0,
            scroll: 0,
        }
    }

    /// Create an input for the text window `window` and install hooks on it.
    ///
    /// The window's key hook edits the buffer (falling back to any previous
    /// key hook for keys the input ignores), and its enter/exit hooks refresh
    /// the display so the trailing cursor cell follows focus.
    pub fn attach(tui: &mut Tui, window: WindowId, capacity: usize) -> Result<Rc<RefCell<Input>>> {
        let input = Rc::new(RefCell::new(Input::new(window, capacity)));
        input.borrow().refresh(tui)?;

        let target = tui.window_mut(window).ok_or(Error::WindowNotFound)?;
        let hooks = &mut target.hooks;

        let shared = input.clone();
        let previous = hooks.key.take();
        hooks.key = Some(Rc::new(move |tui: &mut Tui, id: WindowId, key: KeyEvent| {
            let handled = match shared.borrow_mut().event(tui, key) {
                Ok(handled) => handled,
                Err(err) => {
                    warn!(%err, "input refresh failed");
                    false
                }
            };
            handled || previous.as_ref().is_some_and(|hook| hook(tui, id, key))
        }));

        for slot in [&mut hooks.enter, &mut hooks.exit] {
            let shared = input.clone();
            let previous = slot.take();
            *slot = Some(Rc::new(move |tui: &mut Tui, id: WindowId| {
                if let Some(hook) = &previous {
                    hook(tui, id);
                }
                if let Err(err) = shared.borrow().refresh(tui) {
                    warn!(%err, "input refresh failed");
                }
            }));
        }

        Ok(input)
    }

    // -- accessors ----------------------------------------------------------

    pub fn window(&self) -> WindowId {
        self.window
    }

    /// The edited text.
    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Edit position, `0..=len`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// First buffer position shown.
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    fn is_active(&self, tui: &Tui) -> bool {
        tui.active_window() == Some(self.window)
    }

    // -- editing ------------------------------------------------------------

    /// Insert `ch` at the cursor. Rejects non-printable characters and input
    /// at capacity.
    pub fn insert(&mut self, ch: char) -> bool {
        if self.buffer.len() >= self.capacity || !(' '..='~').contains(&ch) {
            return false;
        }
        self.buffer.insert(self.cursor, ch);
        self.cursor += 1;
        true
    }

    /// Delete the character before the cursor.
    pub fn delete(&mut self) -> bool {
        if self.cursor == 0 || self.buffer.is_empty() {
            return false;
        }
        self.buffer.remove(self.cursor - 1);
        self.cursor = (self.cursor - 1).min(self.buffer.len());
        true
    }

    /// Empty the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.scroll = 0;
    }

    /// Move the cursor right. Only while the input's window is active.
    pub fn move_right(&mut self, tui: &Tui) -> bool {
        if !self.is_active(tui) || self.cursor >= self.buffer.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Move the cursor left, scrolling back if it leaves the visible part.
    /// Only while the input's window is active.
    pub fn move_left(&mut self, tui: &Tui) -> bool {
        if !self.is_active(tui) || self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        }
        true
    }

    // -- display ------------------------------------------------------------

    /// The string shown in the window: the visible buffer with the cursor
    /// escape at the edit position, plus a cell for the cursor when it sits
    /// at the end of an active input.
    pub fn display(&self, tui: &Tui) -> String {
        let mut display = String::with_capacity(self.buffer.len() + CURSOR_ESCAPE.len() + 1);
        display.push_str(&self.buffer[self.scroll.min(self.cursor)..self.cursor]);
        display.push_str(CURSOR_ESCAPE);
        display.push_str(&self.buffer[self.cursor..]);
        if self.cursor == self.buffer.len() && self.is_active(tui) {
            display.push(' ');
        }
        display
    }

    /// Write the display string into the window.
    pub fn refresh(&self, tui: &mut Tui) -> Result<()> {
        let display = self.display(tui);
        tui.set_text(self.window, display)
    }

    /// Right and Left move the cursor, Backspace deletes, anything else is
    /// inserted. The window is refreshed when the buffer changed.
    pub fn event(&mut self, tui: &mut Tui, key: KeyEvent) -> Result<bool> {
        let changed = match key.code {
            Key::Right => self.move_right(tui),
            Key::Left => self.move_left(tui),
            Key::Backspace => self.delete(),
            _ => match key.printable() {
                Some(ch) => self.insert(ch),
                None => false,
            },
        };
        if changed {
            self.refresh(tui)?;
        }
        Ok(changed)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
