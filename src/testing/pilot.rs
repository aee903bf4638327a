//! Pilot: programmatic interaction with a headless [`Tui`].
//!
//! The `Pilot` wraps a [`Tui`] over a [`HeadlessBackend`] and provides
//! methods to simulate key presses and resizes, render frames, and read the
//! screen back as text for snapshot testing.

use crate::app::{Tui, TuiConfig};
use crate::backend::HeadlessBackend;
use crate::error::Result;
use crate::event::{Key, KeyEvent, Modifiers};
use crate::geometry::{Offset, Size};

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless driver for testing.
///
/// Every simulated key goes through the same path as in the main loop: it is
/// routed through the focus chain, and the frame is rendered again.
///
/// # Examples
///
/// ```
/// use tui_forest::config::TextConfig;
/// use tui_forest::testing::Pilot;
/// use tui_forest::Owner;
///
/// let mut pilot = Pilot::new(10, 1);
/// pilot.tui_mut().create_text(Owner::Root, TextConfig::new("hello")).unwrap();
/// pilot.render().unwrap();
/// assert_eq!(pilot.screen_text(), "hello");
/// ```
pub struct Pilot {
    tui: Tui,
}

impl Pilot {
    /// A root with default config over a headless screen of the given size.
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_config(TuiConfig::new(), width, height)
    }

    /// A root built from `config` over a headless screen.
    ///
    /// Construction cannot fail for the headless backend, so this panics
    /// only if that invariant is broken.
    pub fn with_config(config: TuiConfig, width: i32, height: i32) -> Self {
        let backend = HeadlessBackend::new(Size::new(width, height));
        match Tui::new(config, backend) {
            Ok(tui) => Self { tui },
            Err(err) => panic!("headless backend failed to start: {err}"),
        }
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Route a key press with no modifiers, then render. Returns whether a
    /// hook consumed the key.
    pub fn press_key(&mut self, key: Key) -> Result<bool> {
        self.press_key_with(key, Modifiers::NONE)
    }

    /// Route a key press with the given modifiers, then render.
    pub fn press_key_with(&mut self, key: Key, modifiers: Modifiers) -> Result<bool> {
        let handled = self.tui.event(KeyEvent::new(key, modifiers));
        self.tui.render()?;
        Ok(handled)
    }

    /// Press each character of `text` as a separate key.
    pub fn type_text(&mut self, text: &str) -> Result<()> {
        for ch in text.chars() {
            self.press_key(Key::Char(ch))?;
        }
        Ok(())
    }

    /// Change the terminal size and render at the new size.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<()> {
        self.backend_mut().set_size(Size::new(width, height));
        self.tui.render()
    }

    /// Queue keys and run the main loop until the queue is drained or a hook
    /// stops it.
    pub fn run<I, K>(&mut self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = K>,
        K: Into<KeyEvent>,
    {
        for key in keys {
            self.backend_mut().push_key(key);
        }
        self.tui.start()
    }

    // ── Rendering ────────────────────────────────────────────────────

    pub fn render(&mut self) -> Result<()> {
        self.tui.render()
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn tui(&self) -> &Tui {
        &self.tui
    }

    pub fn tui_mut(&mut self) -> &mut Tui {
        &mut self.tui
    }

    pub fn backend(&self) -> &HeadlessBackend {
        match self.tui.backend_as::<HeadlessBackend>() {
            Some(backend) => backend,
            None => unreachable!("pilot always drives a headless backend"),
        }
    }

    pub fn backend_mut(&mut self) -> &mut HeadlessBackend {
        match self.tui.backend_as_mut::<HeadlessBackend>() {
            Some(backend) => backend,
            None => unreachable!("pilot always drives a headless backend"),
        }
    }

    /// The last presented screen, rows right-trimmed and joined by `'\n'`.
    pub fn screen_text(&self) -> String {
        super::snapshot::surface_to_string(self.backend().screen_surface())
    }

    /// Visible cursor position after the last frame.
    pub fn cursor(&self) -> Option<Offset> {
        self.backend().cursor()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::app::Owner;
    use crate::config::{ConfigExt, TextConfig};
    use crate::event::hooks::Hooks;

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn new_sets_screen_dimensions() {
        let mut pilot = Pilot::new(12, 4);
        pilot.render().unwrap();
        assert_eq!(pilot.tui().size(), Size::new(12, 4));
        assert_eq!(pilot.screen_text(), "\n\n\n");
    }

    #[test]
    fn with_config_runs_root_init() {
        let seen = Rc::new(Cell::new(false));
        let flag = seen.clone();
        let config = TuiConfig::new().with_hooks(Hooks::new().on_init(move |_, ()| flag.set(true)));
        let _pilot = Pilot::with_config(config, 4, 4);
        assert!(seen.get());
    }

    // ── Key input ────────────────────────────────────────────────────

    #[test]
    fn press_key_routes_and_renders() {
        let mut pilot = Pilot::new(10, 1);
        let id = pilot
            .tui_mut()
            .create_text(
                Owner::Root,
                TextConfig::new("")
                    .with_interactive(true)
                    .on_key(|tui, id, key| match key.printable() {
                        Some(ch) => {
                            let mut text = tui.text(id).unwrap_or_default().to_owned();
                            text.push(ch);
                            tui.set_text(id, text).is_ok()
                        }
                        None => false,
                    }),
            )
            .unwrap();
        pilot.render().unwrap();
        pilot.tui_mut().set_active_window(id);

        assert!(pilot.press_key(Key::Char('o')).unwrap());
        pilot.type_text("k!").unwrap();
        assert!(!pilot.press_key(Key::Up).unwrap());
        assert_eq!(pilot.screen_text(), "ok!");
    }

    #[test]
    fn type_text_empty_string() {
        let mut pilot = Pilot::new(4, 1);
        pilot.type_text("").unwrap();
        assert_eq!(pilot.backend().frames(), 0);
    }

    // ── Resize ───────────────────────────────────────────────────────

    #[test]
    fn resize_updates_screen() {
        let mut pilot = Pilot::new(4, 1);
        pilot.resize(6, 2).unwrap();
        assert_eq!(pilot.tui().size(), Size::new(6, 2));
        assert_eq!(pilot.backend().screen_lines().len(), 2);
    }

    // ── Main loop ────────────────────────────────────────────────────

    #[test]
    fn run_drains_queue_and_stops() {
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let config = TuiConfig::new().with_hooks(Hooks::new().on_key(move |_, (), _| {
            counter.set(counter.get() + 1);
            true
        }));
        let mut pilot = Pilot::with_config(config, 4, 1);
        pilot.run([Key::Char('a'), Key::Char('b'), Key::Resize]).unwrap();
        assert_eq!(count.get(), 3);
        assert!(!pilot.tui().is_running());
    }
}
