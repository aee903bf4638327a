//! In-memory backend for tests and headless runs.

use std::any::Any;
use std::collections::{HashMap, VecDeque};

use crate::error::{Error, Result};
use crate::event::{Key, KeyEvent};
use crate::geometry::{Offset, Region, Size};
use crate::render::surface::{Cell, Surface, SurfaceId, Surfaces};
use crate::style::{Color, PairId};

use super::Backend;

/// A backend that renders into memory and reads keys from a script.
///
/// Reading from an empty script yields [`Key::Interrupt`], so a main loop
/// driven by a `HeadlessBackend` always terminates.
#[derive(Debug)]
pub struct HeadlessBackend {
    size: Size,
    surfaces: Surfaces,
    keys: VecDeque<KeyEvent>,
    pairs: HashMap<PairId, Color>,
    max_pairs: u16,
    fail_pairs: bool,
    cursor: Option<Offset>,
    active: bool,
    frames: usize,
}

impl HeadlessBackend {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            surfaces: Surfaces::new(size),
            keys: VecDeque::new(),
            pairs: HashMap::new(),
            max_pairs: 256,
            fail_pairs: false,
            cursor: None,
            active: false,
            frames: 0,
        }
    }

    /// Limit the number of pair slots (builder).
    pub fn with_max_pairs(mut self, max: u16) -> Self {
        self.max_pairs = max;
        self
    }

    /// Refuse every color pair registration (builder).
    pub fn failing_pairs(mut self) -> Self {
        self.fail_pairs = true;
        self
    }

    /// Queue keys to be read (builder).
    pub fn with_keys<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<KeyEvent>,
    {
        self.keys.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn push_key(&mut self, key: impl Into<KeyEvent>) {
        self.keys.push_back(key.into());
    }

    /// Keys not yet read.
    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }

    /// Change the terminal size seen by the next frame.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Color registered for a pair slot.
    pub fn pair_color(&self, pair: PairId) -> Option<Color> {
        self.pairs.get(&pair).copied()
    }

    /// Color a screen cell is drawn with. The default slot reads as
    /// [`Color::INHERIT`].
    pub fn color_at(&self, x: i32, y: i32) -> Option<Color> {
        let cell = self.screen_surface().get(x, y)?;
        Some(self.pair_color(cell.pair).unwrap_or(Color::INHERIT))
    }

    /// Visible cursor position, `None` when hidden.
    pub fn cursor(&self) -> Option<Offset> {
        self.cursor
    }

    pub fn screen_surface(&self) -> &Surface {
        self.surfaces.screen_surface()
    }

    /// Screen glyphs row by row.
    pub fn screen_lines(&self) -> Vec<String> {
        self.screen_surface().lines()
    }

    /// Number of surfaces alive, the screen included.
    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    /// Frames presented so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Whether `init` ran without a matching `shutdown`.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Backend for HeadlessBackend {
    fn init(&mut self) -> Result<()> {
        self.active = true;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.active = false;
        Ok(())
    }

    fn terminal_size(&mut self) -> Result<Size> {
        if self.surfaces.screen_surface().region().size() != self.size {
            self.surfaces.resize_screen(self.size);
        }
        Ok(self.size)
    }

    fn screen(&self) -> SurfaceId {
        self.surfaces.screen()
    }

    fn create_surface(&mut self, region: Region) -> Result<Option<SurfaceId>> {
        Ok(self.surfaces.create(region))
    }

    fn resize_surface(&mut self, surface: SurfaceId, region: Region) -> Result<()> {
        if self.surfaces.resize(surface, region) {
            Ok(())
        } else {
            Err(Error::Surface(region))
        }
    }

    fn destroy_surface(&mut self, surface: SurfaceId) {
        self.surfaces.destroy(surface);
    }

    fn fill(&mut self, surface: SurfaceId, cell: Cell) {
        if let Some(surface) = self.surfaces.get_mut(surface) {
            surface.fill(cell);
        }
    }

    fn draw_char(&mut self, surface: SurfaceId, x: i32, y: i32, glyph: char, pair: PairId) {
        if let Some(surface) = self.surfaces.get_mut(surface) {
            surface.put(x, y, Cell::new(glyph, pair));
        }
    }

    fn composite(&mut self, src: SurfaceId, dst: SurfaceId) {
        self.surfaces.composite(src, dst);
    }

    fn max_color_pairs(&self) -> u16 {
        self.max_pairs
    }

    fn register_color_pair(&mut self, pair: PairId, color: Color) -> Result<()> {
        if self.fail_pairs {
            return Err(Error::Backend(format!("pair {} refused", pair.0)));
        }
        self.pairs.insert(pair, color);
        Ok(())
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = Some(Offset::new(x, y));
    }

    fn hide_cursor(&mut self) {
        self.cursor = None;
    }

    fn present(&mut self) -> Result<()> {
        self.frames += 1;
        Ok(())
    }

    fn read_key(&mut self) -> Result<KeyEvent> {
        Ok(self.keys.pop_front().unwrap_or_else(|| Key::Interrupt.into()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_script_reads_interrupt() {
        let mut backend = HeadlessBackend::new(Size::new(4, 2)).with_keys([Key::Char('a')]);
        assert_eq!(backend.read_key().unwrap().code, Key::Char('a'));
        assert_eq!(backend.read_key().unwrap().code, Key::Interrupt);
    }

    #[test]
    fn screen_follows_size() {
        let mut backend = HeadlessBackend::new(Size::new(4, 2));
        backend.set_size(Size::new(6, 3));
        assert_eq!(backend.terminal_size().unwrap(), Size::new(6, 3));
        assert_eq!(backend.screen_lines(), vec!["      "; 3]);
    }

    #[test]
    fn draw_and_composite_reach_the_screen() {
        let mut backend = HeadlessBackend::new(Size::new(4, 2));
        let id = backend.create_surface(Region::new(1, 1, 2, 1)).unwrap().unwrap();
        backend.draw_char(id, 0, 0, 'o', PairId::DEFAULT);
        backend.draw_char(id, 1, 0, 'k', PairId::DEFAULT);
        let screen = backend.screen();
        backend.composite(id, screen);
        assert_eq!(backend.screen_lines(), vec!["    ", " ok "]);
    }

    #[test]
    fn cursor_state_is_recorded() {
        let mut backend = HeadlessBackend::new(Size::new(4, 2));
        backend.set_cursor(2, 1);
        assert_eq!(backend.cursor(), Some(Offset::new(2, 1)));
        backend.hide_cursor();
        assert_eq!(backend.cursor(), None);
    }

    #[test]
    fn resizing_a_missing_surface_fails() {
        let mut backend = HeadlessBackend::new(Size::new(4, 2));
        let id = backend.create_surface(Region::new(0, 0, 1, 1)).unwrap().unwrap();
        backend.destroy_surface(id);
        assert!(backend.resize_surface(id, Region::new(0, 0, 2, 2)).is_err());
    }
}
