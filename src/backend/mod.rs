//! Terminal backends.
//!
//! The toolkit draws through the [`Backend`] trait: surfaces for off-screen
//! drawing, color pair registration, the hardware cursor and blocking key
//! input. [`CrosstermBackend`] drives a real terminal; [`HeadlessBackend`]
//! keeps everything in memory and replays scripted keys for tests.

pub mod crossterm;
pub mod headless;

use std::any::Any;

use crate::error::Result;
use crate::event::KeyEvent;
use crate::geometry::{Region, Size};
use crate::render::surface::{Cell, SurfaceId};
use crate::style::{Color, PairId};

pub use self::crossterm::CrosstermBackend;
pub use headless::HeadlessBackend;

/// The operations the toolkit needs from a terminal.
pub trait Backend {
    /// Take over the terminal.
    fn init(&mut self) -> Result<()>;

    /// Give the terminal back. Safe to call more than once.
    fn shutdown(&mut self) -> Result<()>;

    /// Current terminal size. The screen surface follows it.
    fn terminal_size(&mut self) -> Result<Size>;

    /// The surface representing the whole screen.
    fn screen(&self) -> SurfaceId;

    /// Allocate a surface at `region`. An empty region yields `None`.
    fn create_surface(&mut self, region: Region) -> Result<Option<SurfaceId>>;

    /// Move or resize a surface.
    fn resize_surface(&mut self, surface: SurfaceId, region: Region) -> Result<()>;

    fn destroy_surface(&mut self, surface: SurfaceId);

    /// Overwrite every cell of a surface.
    fn fill(&mut self, surface: SurfaceId, cell: Cell);

    /// Draw one glyph at surface-local coordinates. Out-of-bounds draws are
    /// dropped.
    fn draw_char(&mut self, surface: SurfaceId, x: i32, y: i32, glyph: char, pair: PairId);

    /// Copy the screen area shared by `src` and `dst` from `src` to `dst`.
    fn composite(&mut self, src: SurfaceId, dst: SurfaceId);

    /// Number of pair slots, the default slot 0 included.
    fn max_color_pairs(&self) -> u16;

    /// Bind `color` to a pair slot.
    fn register_color_pair(&mut self, pair: PairId, color: Color) -> Result<()>;

    /// Show the cursor at screen coordinates.
    fn set_cursor(&mut self, x: i32, y: i32);

    fn hide_cursor(&mut self);

    /// Send the finished frame to the terminal.
    fn present(&mut self) -> Result<()>;

    /// Block until the next key.
    fn read_key(&mut self) -> Result<KeyEvent>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
