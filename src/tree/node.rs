//! Window and menu node types.

use std::any::Any;
use std::fmt;

use slotmap::new_key_type;

use crate::error::{Error, Result};
use crate::event::hooks::Hooks;
use crate::geometry::{Axis, Rect, Region, Size, Spacing};
use crate::layout::{Align, Position};
use crate::render::surface::SurfaceId;
use crate::style::{Border, Color};
use crate::text::plain_text;

new_key_type! {
    /// Handle of a window. Copy, lightweight, and safe to keep after the
    /// window is gone: lookups simply fail.
    pub struct WindowId;

    /// Handle of a menu.
    pub struct MenuId;
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// Layout results for the current frame. Meaningless between frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Frame {
    /// Intrinsic size from the size pass.
    pub size: Size,
    /// Placed rect in screen coordinates from the rect pass.
    pub rect: Region,
    /// Whether the window is drawn this frame.
    pub visible: bool,
    /// Color after inheritance.
    pub color: Color,
    /// The text could not be wrapped at the root width.
    pub unwrappable: bool,
}

// ---------------------------------------------------------------------------
// Variants
// ---------------------------------------------------------------------------

/// A window that lays out and owns children along one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Container {
    pub axis: Axis,
    pub border: Border,
    pub shadow: bool,
    pub padding: bool,
    pub gap: bool,
    /// Cross-axis placement of children.
    pub pos: Position,
    /// Main-axis distribution of children.
    pub align: Align,
}

impl Container {
    /// Space taken by border, padding and shadow on each side.
    pub fn insets(&self) -> Spacing {
        let mut insets = Spacing::ZERO;
        if self.border.active {
            insets = insets + Spacing::symmetric(1, 1);
        }
        if self.padding {
            insets = insets + Spacing::symmetric(1, 2);
        }
        if self.shadow {
            insets = insets + Spacing::new(0, 2, 1, 0);
        }
        insets
    }

    /// Cells covered by the shadow: two columns on the right, one row below.
    pub fn shadow_size(&self) -> Size {
        if self.shadow {
            Size::new(2, 1)
        } else {
            Size::ZERO
        }
    }
}

/// A block of reflowed text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text {
    string: String,
    plain: String,
    /// Draw every glyph as `*`.
    pub secret: bool,
    /// Vertical placement inside the window.
    pub pos: Position,
    /// Horizontal placement of each line.
    pub align: Position,
}

impl Text {
    pub fn new(string: impl Into<String>) -> Self {
        let mut text = Self::default();
        text.set_string(string);
        text
    }

    /// The raw string, style escapes included.
    pub fn string(&self) -> &str {
        &self.string
    }

    /// The string with style escapes removed.
    pub fn plain(&self) -> &str {
        &self.plain
    }

    pub fn set_string(&mut self, string: impl Into<String>) {
        self.string = string.into();
        self.plain = plain_text(&self.string);
    }
}

/// One cell of a grid window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridCell {
    /// `None` draws a space.
    pub symbol: Option<char>,
    pub color: Color,
}

impl GridCell {
    pub const fn new(symbol: char, color: Color) -> Self {
        Self { symbol: Some(symbol), color }
    }
}

/// Number of cells in a grid of `size`. Non-positive or overflowing sizes
/// are rejected.
fn cell_count(size: Size) -> Result<usize> {
    if size.is_empty() {
        return Err(Error::InvalidGridSize(size));
    }
    size.width
        .checked_mul(size.height)
        .and_then(|count| usize::try_from(count).ok())
        .ok_or(Error::InvalidGridSize(size))
}

/// A dense row-major array of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    requested: Size,
    size: Size,
    cells: Vec<GridCell>,
}

impl Grid {
    /// A grid of empty cells. Both dimensions must be positive.
    pub fn new(size: Size) -> Result<Self> {
        let count = cell_count(size)?;
        Ok(Self {
            requested: size,
            size,
            cells: vec![GridCell::default(); count],
        })
    }

    /// Size the grid was created with.
    pub fn requested(&self) -> Size {
        self.requested
    }

    /// Current size of the cell array.
    pub fn size(&self) -> Size {
        self.size
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.size
            .contains(x, y)
            .then(|| (y * self.size.width + x) as usize)
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<&GridCell> {
        self.index(x, y).and_then(|i| self.cells.get(i))
    }

    pub fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut GridCell> {
        self.index(x, y).and_then(|i| self.cells.get_mut(i))
    }

    /// Replace a cell. Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: i32, y: i32, cell: GridCell) -> bool {
        match self.cell_mut(x, y) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Overlay a cell: only a present symbol and concrete color channels
    /// replace what is there.
    pub fn modify(&mut self, x: i32, y: i32, cell: GridCell) -> bool {
        let Some(slot) = self.cell_mut(x, y) else {
            return false;
        };
        if cell.symbol.is_some() {
            slot.symbol = cell.symbol;
        }
        if cell.color.fg.is_some() {
            slot.color.fg = cell.color.fg;
        }
        if cell.color.bg.is_some() {
            slot.color.bg = cell.color.bg;
        }
        true
    }

    /// Reallocate the cell array. All cells are reset to empty.
    pub fn resize(&mut self, size: Size) -> Result<()> {
        let count = cell_count(size)?;
        self.size = size;
        self.cells = vec![GridCell::default(); count];
        Ok(())
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(self.size.width.max(1) as usize)
    }
}

/// Variant data of a window.
#[derive(Debug, Clone)]
pub enum WindowKind {
    Container(Container),
    Text(Text),
    Grid(Grid),
}

impl WindowKind {
    /// Human-readable variant name.
    pub fn name(&self) -> &'static str {
        match self {
            WindowKind::Container(_) => "container",
            WindowKind::Text(_) => "text",
            WindowKind::Grid(_) => "grid",
        }
    }
}

// ---------------------------------------------------------------------------
// Window
// ---------------------------------------------------------------------------

/// A node in the window forest.
pub struct Window {
    /// Name used by path lookup.
    pub name: Option<String>,
    /// Requested rect.
    pub rect: Rect,
    /// Requested color.
    pub color: Color,
    /// Never shown, regardless of space.
    pub hidden: bool,
    /// Can receive focus.
    pub interactive: bool,
    /// Shown completely or not at all.
    pub atomic: bool,
    /// Excluded from driving the container's size, fills the cross axis.
    pub contain: bool,
    pub grow_width: bool,
    pub grow_height: bool,
    pub kind: WindowKind,
    pub(crate) menu: Option<MenuId>,
    pub(crate) frame: Frame,
    pub(crate) surface: Option<SurfaceId>,
    pub(crate) hooks: Hooks<WindowId>,
    pub(crate) data: Option<Box<dyn Any>>,
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("name", &self.name)
            .field("kind", &self.kind.name())
            .field("rect", &self.rect)
            .field("color", &self.color)
            .field("hidden", &self.hidden)
            .field("interactive", &self.interactive)
            .field("menu", &self.menu)
            .field("frame", &self.frame)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}

impl Window {
    /// A window with default flags around `kind`.
    pub fn new(kind: WindowKind) -> Self {
        Self {
            name: None,
            rect: Rect::Auto,
            color: Color::INHERIT,
            hidden: false,
            interactive: false,
            atomic: false,
            contain: false,
            grow_width: false,
            grow_height: false,
            kind,
            menu: None,
            frame: Frame::default(),
            surface: None,
            hooks: Hooks::default(),
            data: None,
        }
    }

    /// Whether the window grows along `axis`.
    pub fn grows(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.grow_width,
            Axis::Vertical => self.grow_height,
        }
    }

    /// Owning menu, if any.
    pub fn menu(&self) -> Option<MenuId> {
        self.menu
    }

    /// This frame's layout result.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, WindowKind::Container(_))
    }

    pub fn as_container(&self) -> Option<&Container> {
        match &self.kind {
            WindowKind::Container(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match &self.kind {
            WindowKind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match &mut self.kind {
            WindowKind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_grid(&self) -> Option<&Grid> {
        match &self.kind {
            WindowKind::Grid(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_grid_mut(&mut self) -> Option<&mut Grid> {
        match &mut self.kind {
            WindowKind::Grid(g) => Some(g),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

/// A group of top-level windows that is shown while it is the active menu.
pub struct Menu {
    pub name: Option<String>,
    /// Requested color.
    pub color: Color,
    pub(crate) resolved: Color,
    pub(crate) windows: Vec<WindowId>,
    pub(crate) hooks: Hooks<MenuId>,
}

impl fmt::Debug for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Menu")
            .field("name", &self.name)
            .field("color", &self.color)
            .field("windows", &self.windows)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}

impl Menu {
    pub fn new(name: Option<String>, color: Color, hooks: Hooks<MenuId>) -> Self {
        Self {
            name,
            color,
            resolved: color,
            windows: Vec::new(),
            hooks,
        }
    }

    /// Owned top-level windows in registration order.
    pub fn windows(&self) -> &[WindowId] {
        &self.windows
    }

    /// Color after inheriting from the root, valid for the current frame.
    pub fn resolved_color(&self) -> Color {
        self.resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Depth, Palette};

    #[test]
    fn container_insets_add_up() {
        let plain = Container::default();
        assert_eq!(plain.insets(), Spacing::ZERO);

        let full = Container {
            border: Border::new(Depth::None),
            padding: true,
            shadow: true,
            ..Container::default()
        };
        let insets = full.insets();
        assert_eq!((insets.left, insets.top), (3, 2));
        assert_eq!(insets.size(), Size::new(8, 5));
    }

    #[test]
    fn text_caches_plain_string() {
        let mut text = Text::new("\x1b[31mred\x1b[0m");
        assert_eq!(text.plain(), "red");
        text.set_string("blue");
        assert_eq!(text.string(), "blue");
        assert_eq!(text.plain(), "blue");
    }

    #[test]
    fn grid_rejects_empty_size() {
        assert!(matches!(Grid::new(Size::new(0, 3)), Err(Error::InvalidGridSize(_))));
        let mut grid = Grid::new(Size::new(2, 2)).unwrap();
        assert!(grid.resize(Size::new(3, -1)).is_err());
        assert_eq!(grid.size(), Size::new(2, 2));
    }

    #[test]
    fn grid_rejects_overflowing_size() {
        let huge = Size::new(70_000, 70_000);
        assert!(matches!(Grid::new(huge), Err(Error::InvalidGridSize(size)) if size == huge));
        let mut grid = Grid::new(Size::new(2, 2)).unwrap();
        assert!(matches!(grid.resize(huge), Err(Error::InvalidGridSize(_))));
        assert_eq!(grid.size(), Size::new(2, 2));
    }

    #[test]
    fn grid_set_and_modify() {
        let mut grid = Grid::new(Size::new(3, 2)).unwrap();
        assert!(grid.set(1, 1, GridCell::new('#', Color::new(Palette::Red, Palette::Black))));
        assert!(!grid.set(3, 0, GridCell::new('x', Color::INHERIT)));

        grid.modify(1, 1, GridCell { symbol: None, color: Color::bg(Palette::Blue) });
        let cell = grid.cell(1, 1).unwrap();
        assert_eq!(cell.symbol, Some('#'));
        assert_eq!(cell.color, Color::new(Palette::Red, Palette::Blue));

        grid.modify(1, 1, GridCell::new('@', Color::INHERIT));
        assert_eq!(grid.cell(1, 1).unwrap().symbol, Some('@'));
        assert_eq!(grid.cell(1, 1).unwrap().color, Color::new(Palette::Red, Palette::Blue));
    }

    #[test]
    fn grid_resize_resets_cells() {
        let mut grid = Grid::new(Size::new(2, 2)).unwrap();
        grid.set(0, 0, GridCell::new('a', Color::INHERIT));
        grid.resize(Size::new(4, 1)).unwrap();
        assert_eq!(grid.size(), Size::new(4, 1));
        assert_eq!(grid.requested(), Size::new(2, 2));
        assert!(grid.rows().all(|row| row.iter().all(|c| c.symbol.is_none())));
        assert_eq!(grid.rows().count(), 1);
    }

    #[test]
    fn window_grows_per_axis() {
        let mut window = Window::new(WindowKind::Text(Text::new("x")));
        window.grow_width = true;
        assert!(window.grows(Axis::Horizontal));
        assert!(!window.grows(Axis::Vertical));
        assert!(window.as_text().is_some());
        assert!(window.as_grid().is_none());
    }
}
