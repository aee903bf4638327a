//! Off-screen cell buffers and compositing.
//!
//! Every visible window draws into its own [`Surface`], positioned at the
//! window's rect in screen coordinates. Drawing uses surface-local
//! coordinates. [`Surfaces::composite`] copies the area two surfaces share,
//! which is how a window's contents reach its parent and finally the screen
//! surface. Backends keep the screen from the previous frame and send only
//! the [`CellUpdate`]s produced by [`Surface::diff`] to the terminal.

use slotmap::{new_key_type, SlotMap};

use crate::geometry::{Region, Size};
use crate::style::PairId;

new_key_type! {
    /// Handle of a backend surface.
    pub struct SurfaceId;
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// One terminal cell: a glyph drawn with a color pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub glyph: char,
    pub pair: PairId,
}

impl Cell {
    /// A space in the default pair.
    pub const BLANK: Cell = Cell { glyph: ' ', pair: PairId::DEFAULT };

    pub const fn new(glyph: char, pair: PairId) -> Self {
        Self { glyph, pair }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::BLANK
    }
}

/// A single cell that changed between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellUpdate {
    pub x: u16,
    pub y: u16,
    pub cell: Cell,
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// A rectangular buffer of cells placed somewhere on the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    region: Region,
    /// `cells[y][x]` in surface-local coordinates.
    cells: Vec<Vec<Cell>>,
}

impl Surface {
    /// A blank surface covering `region`.
    pub fn new(region: Region) -> Self {
        Self {
            region,
            cells: Self::blank(region.size()),
        }
    }

    fn blank(size: Size) -> Vec<Vec<Cell>> {
        let size = size.clamp_positive();
        vec![vec![Cell::BLANK; size.width as usize]; size.height as usize]
    }

    /// Screen area covered.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Move and resize. Contents are reset when the size changes.
    pub fn set_region(&mut self, region: Region) {
        if region.size() != self.region.size() {
            self.cells = Self::blank(region.size());
        }
        self.region = region;
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.cells.get(y as usize).and_then(|row| row.get(x as usize))
    }

    /// Write one cell. Out-of-bounds writes are dropped.
    pub fn put(&mut self, x: i32, y: i32, cell: Cell) {
        if x < 0 || y < 0 {
            return;
        }
        if let Some(slot) = self.cells.get_mut(y as usize).and_then(|row| row.get_mut(x as usize)) {
            *slot = cell;
        }
    }

    /// Overwrite every cell.
    pub fn fill(&mut self, cell: Cell) {
        for row in &mut self.cells {
            row.fill(cell);
        }
    }

    /// Copy the screen area shared with `src` from `src` into this surface.
    pub fn copy_from(&mut self, src: &Surface) {
        let shared = self.region.intersection(src.region);
        for sy in shared.y..shared.bottom() {
            for sx in shared.x..shared.right() {
                if let Some(&cell) = src.get(sx - src.region.x, sy - src.region.y) {
                    self.put(sx - self.region.x, sy - self.region.y, cell);
                }
            }
        }
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    /// Cells that differ from `previous`, by local position. Cells outside
    /// the previous surface's size are always reported.
    pub fn diff(&self, previous: &Surface) -> Vec<CellUpdate> {
        let mut updates = Vec::new();
        for (y, row) in self.cells.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let before = previous.cells.get(y).and_then(|r| r.get(x));
                if before != Some(cell) {
                    updates.push(CellUpdate { x: x as u16, y: y as u16, cell: *cell });
                }
            }
        }
        updates
    }

    /// The glyphs of each row as strings.
    pub fn lines(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|c| c.glyph).collect())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Surfaces
// ---------------------------------------------------------------------------

/// Arena of surfaces, one of which is the screen.
#[derive(Debug, Clone)]
pub struct Surfaces {
    map: SlotMap<SurfaceId, Surface>,
    screen: SurfaceId,
}

impl Surfaces {
    /// An arena holding just a blank screen of `size`.
    pub fn new(size: Size) -> Self {
        let mut map = SlotMap::with_key();
        let screen = map.insert(Surface::new(size.to_region()));
        Self { map, screen }
    }

    /// The screen surface.
    pub fn screen(&self) -> SurfaceId {
        self.screen
    }

    pub fn screen_surface(&self) -> &Surface {
        &self.map[self.screen]
    }

    /// Resize the screen, clearing it.
    pub fn resize_screen(&mut self, size: Size) {
        if let Some(screen) = self.map.get_mut(self.screen) {
            screen.set_region(size.to_region());
            screen.fill(Cell::BLANK);
        }
    }

    /// Allocate a surface. An empty region yields no surface.
    pub fn create(&mut self, region: Region) -> Option<SurfaceId> {
        if region.is_empty() {
            return None;
        }
        Some(self.map.insert(Surface::new(region)))
    }

    /// Move or resize a surface. Returns `false` if it does not exist.
    pub fn resize(&mut self, id: SurfaceId, region: Region) -> bool {
        match self.map.get_mut(id) {
            Some(surface) => {
                surface.set_region(region);
                true
            }
            None => false,
        }
    }

    /// Release a surface. The screen cannot be destroyed.
    pub fn destroy(&mut self, id: SurfaceId) -> bool {
        id != self.screen && self.map.remove(id).is_some()
    }

    pub fn get(&self, id: SurfaceId) -> Option<&Surface> {
        self.map.get(id)
    }

    pub fn get_mut(&mut self, id: SurfaceId) -> Option<&mut Surface> {
        self.map.get_mut(id)
    }

    /// Copy the overlapping area of `src` into `dst`.
    pub fn composite(&mut self, src: SurfaceId, dst: SurfaceId) -> bool {
        if src == dst {
            return self.map.contains_key(src);
        }
        match self.map.get_disjoint_mut([src, dst]) {
            Some([src, dst]) => {
                dst.copy_from(src);
                true
            }
            None => false,
        }
    }

    /// Number of surfaces, screen included.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
