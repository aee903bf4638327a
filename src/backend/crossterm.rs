//! Real terminal backend on crossterm.

use std::any::Any;
use std::collections::HashMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::event::{from_crossterm, KeyEvent};
use crate::geometry::{Offset, Region, Size};
use crate::render::driver::Driver;
use crate::render::surface::{Cell, Surface, SurfaceId, Surfaces};
use crate::style::{Color, PairId};

use super::Backend;

/// Draws into in-memory surfaces and writes only changed screen cells.
pub struct CrosstermBackend {
    driver: Driver,
    surfaces: Surfaces,
    previous: Option<Surface>,
    pairs: HashMap<PairId, Color>,
    cursor: Option<Offset>,
    active: bool,
}

impl CrosstermBackend {
    pub fn new() -> Result<Self> {
        let (w, h) = Driver::terminal_size()?;
        Ok(Self {
            driver: Driver::new()?,
            surfaces: Surfaces::new(Size::new(w as i32, h as i32)),
            previous: None,
            pairs: HashMap::new(),
            cursor: None,
            active: false,
        })
    }
}

impl Backend for CrosstermBackend {
    fn init(&mut self) -> Result<()> {
        self.driver.enter_alt_screen()?;
        self.active = true;
        self.previous = None;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        if self.active {
            self.active = false;
            self.driver.leave_alt_screen()?;
        }
        Ok(())
    }

    fn terminal_size(&mut self) -> Result<Size> {
        let (w, h) = Driver::terminal_size()?;
        let size = Size::new(w as i32, h as i32);
        if self.surfaces.screen_surface().region().size() != size {
            debug!(width = w, height = h, "terminal resized");
            self.surfaces.resize_screen(size);
            self.previous = None;
        }
        Ok(size)
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
        256
    }

    fn register_color_pair(&mut self, pair: PairId, color: Color) -> Result<()> {
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
        let screen = self.surfaces.screen_surface();
        let updates = match &self.previous {
            Some(previous) => screen.diff(previous),
            None => {
                self.driver.clear()?;
                screen.diff(&Surface::new(Region::EMPTY))
            }
        };
        self.driver.apply_updates(&updates, &self.pairs)?;

        match self.cursor {
            Some(Offset { x, y }) if x >= 0 && y >= 0 => {
                self.driver.show_cursor_at(x as u16, y as u16)?;
            }
            _ => self.driver.hide_cursor()?,
        }
        self.driver.flush()?;
        self.previous = Some(screen.clone());
        Ok(())
    }

    fn read_key(&mut self) -> Result<KeyEvent> {
        loop {
            if let Some(key) = from_crossterm(::crossterm::event::read()?) {
                return Ok(key);
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

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}
