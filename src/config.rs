//! Builder-style configuration for windows and menus.
//!
//! Options every window kind shares live in [`WindowConfig`]; the
//! [`ConfigExt`] trait gives each kind-specific config the same builder
//! methods for them.
//!
//! ```
//! use tui_forest::config::{ConfigExt, ContainerConfig};
//! use tui_forest::geometry::Axis;
//! use tui_forest::layout::Align;
//!
//! let row = ContainerConfig::new()
//!     .with_axis(Axis::Horizontal)
//!     .with_align(Align::Between)
//!     .with_gap(true)
//!     .with_name("buttons");
//! assert_eq!(row.common.name.as_deref(), Some("buttons"));
//! ```

use std::any::Any;
use std::fmt;

use crate::event::hooks::Hooks;
use crate::event::KeyEvent;
use crate::geometry::{Axis, Rect, Size};
use crate::layout::{Align, Position};
use crate::style::{Border, Color};
use crate::tree::{Container, MenuId, Window, WindowId, WindowKind};
use crate::Tui;

// ---------------------------------------------------------------------------
// WindowConfig
// ---------------------------------------------------------------------------

/// Options shared by every window kind.
#[derive(Default)]
pub struct WindowConfig {
    pub name: Option<String>,
    pub rect: Rect,
    pub grow_width: bool,
    pub grow_height: bool,
    pub color: Color,
    pub hidden: bool,
    pub atomic: bool,
    pub interactive: bool,
    pub contain: bool,
    pub hooks: Hooks<WindowId>,
    pub data: Option<Box<dyn Any>>,
}

impl fmt::Debug for WindowConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowConfig")
            .field("name", &self.name)
            .field("rect", &self.rect)
            .field("grow_width", &self.grow_width)
            .field("grow_height", &self.grow_height)
            .field("color", &self.color)
            .field("hidden", &self.hidden)
            .field("atomic", &self.atomic)
            .field("interactive", &self.interactive)
            .field("contain", &self.contain)
            .field("hooks", &self.hooks)
            .field("data", &self.data.is_some())
            .finish()
    }
}

impl WindowConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a detached window of `kind` from these options.
    pub(crate) fn into_window(self, kind: WindowKind) -> Window {
        let mut window = Window::new(kind);
        window.name = self.name;
        window.rect = self.rect;
        window.grow_width = self.grow_width;
        window.grow_height = self.grow_height;
        window.color = self.color;
        window.hidden = self.hidden;
        window.atomic = self.atomic;
        window.interactive = self.interactive;
        window.contain = self.contain;
        window.hooks = self.hooks;
        window.data = self.data;
        window
    }
}

// ---------------------------------------------------------------------------
// ConfigExt
// ---------------------------------------------------------------------------

/// Builder methods for the shared window options.
pub trait ConfigExt: Sized {
    /// The shared options of this config.
    fn common_mut(&mut self) -> &mut WindowConfig;

    /// Name used by path lookup (builder).
    fn with_name(mut self, name: impl Into<String>) -> Self {
        self.common_mut().name = Some(name.into());
        self
    }

    /// Requested rect (builder).
    fn with_rect(mut self, rect: Rect) -> Self {
        self.common_mut().rect = rect;
        self
    }

    fn with_grow_width(mut self, grow: bool) -> Self {
        self.common_mut().grow_width = grow;
        self
    }

    fn with_grow_height(mut self, grow: bool) -> Self {
        self.common_mut().grow_height = grow;
        self
    }

    /// Requested color; `None` channels inherit (builder).
    fn with_color(mut self, color: Color) -> Self {
        self.common_mut().color = color;
        self
    }

    fn with_hidden(mut self, hidden: bool) -> Self {
        self.common_mut().hidden = hidden;
        self
    }

    /// Show completely or not at all (builder).
    fn with_atomic(mut self, atomic: bool) -> Self {
        self.common_mut().atomic = atomic;
        self
    }

    /// Allow focus (builder).
    fn with_interactive(mut self, interactive: bool) -> Self {
        self.common_mut().interactive = interactive;
        self
    }

    /// Keep out of the parent's size and fill its cross axis (builder).
    fn with_contain(mut self, contain: bool) -> Self {
        self.common_mut().contain = contain;
        self
    }

    /// Replace all hooks (builder).
    fn with_hooks(mut self, hooks: Hooks<WindowId>) -> Self {
        self.common_mut().hooks = hooks;
        self
    }

    /// Attach a user payload (builder).
    fn with_data(mut self, data: impl Any) -> Self {
        self.common_mut().data = Some(Box::new(data));
        self
    }

    fn on_init(mut self, f: impl Fn(&mut Tui, WindowId) + 'static) -> Self {
        let hooks = std::mem::take(&mut self.common_mut().hooks);
        self.common_mut().hooks = hooks.on_init(f);
        self
    }

    fn on_enter(mut self, f: impl Fn(&mut Tui, WindowId) + 'static) -> Self {
        let hooks = std::mem::take(&mut self.common_mut().hooks);
        self.common_mut().hooks = hooks.on_enter(f);
        self
    }

    fn on_exit(mut self, f: impl Fn(&mut Tui, WindowId) + 'static) -> Self {
        let hooks = std::mem::take(&mut self.common_mut().hooks);
        self.common_mut().hooks = hooks.on_exit(f);
        self
    }

    fn on_update(mut self, f: impl Fn(&mut Tui, WindowId) + 'static) -> Self {
        let hooks = std::mem::take(&mut self.common_mut().hooks);
        self.common_mut().hooks = hooks.on_update(f);
        self
    }

    fn on_render(mut self, f: impl Fn(&mut Tui, WindowId) + 'static) -> Self {
        let hooks = std::mem::take(&mut self.common_mut().hooks);
        self.common_mut().hooks = hooks.on_render(f);
        self
    }

    fn on_free(mut self, f: impl Fn(&mut Tui, WindowId) + 'static) -> Self {
        let hooks = std::mem::take(&mut self.common_mut().hooks);
        self.common_mut().hooks = hooks.on_free(f);
        self
    }

    fn on_key(mut self, f: impl Fn(&mut Tui, WindowId, KeyEvent) -> bool + 'static) -> Self {
        let hooks = std::mem::take(&mut self.common_mut().hooks);
        self.common_mut().hooks = hooks.on_key(f);
        self
    }
}

// ---------------------------------------------------------------------------
// ContainerConfig
// ---------------------------------------------------------------------------

/// Options for a container window.
#[derive(Debug, Default)]
pub struct ContainerConfig {
    pub common: WindowConfig,
    pub container: Container,
}

impl ContainerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.container.axis = axis;
        self
    }

    pub fn with_border(mut self, border: Border) -> Self {
        self.container.border = border;
        self
    }

    pub fn with_shadow(mut self, shadow: bool) -> Self {
        self.container.shadow = shadow;
        self
    }

    pub fn with_padding(mut self, padding: bool) -> Self {
        self.container.padding = padding;
        self
    }

    pub fn with_gap(mut self, gap: bool) -> Self {
        self.container.gap = gap;
        self
    }

    /// Cross-axis placement of children (builder).
    pub fn with_pos(mut self, pos: Position) -> Self {
        self.container.pos = pos;
        self
    }

    /// Main-axis distribution of children (builder).
    pub fn with_align(mut self, align: Align) -> Self {
        self.container.align = align;
        self
    }

    pub(crate) fn into_window(self) -> Window {
        self.common.into_window(WindowKind::Container(self.container))
    }
}

impl ConfigExt for ContainerConfig {
    fn common_mut(&mut self) -> &mut WindowConfig {
        &mut self.common
    }
}

// ---------------------------------------------------------------------------
// TextConfig
// ---------------------------------------------------------------------------

/// Options for a text window.
#[derive(Debug, Default)]
pub struct TextConfig {
    pub common: WindowConfig,
    pub string: String,
    pub secret: bool,
    /// Vertical placement.
    pub pos: Position,
    /// Horizontal placement of each line.
    pub align: Position,
}

impl TextConfig {
    pub fn new(string: impl Into<String>) -> Self {
        Self {
            string: string.into(),
            ..Self::default()
        }
    }

    /// Mask every glyph (builder).
    pub fn with_secret(mut self, secret: bool) -> Self {
        self.secret = secret;
        self
    }

    pub fn with_pos(mut self, pos: Position) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_align(mut self, align: Position) -> Self {
        self.align = align;
        self
    }

    pub(crate) fn into_window(self) -> Window {
        let mut text = crate::tree::Text::new(self.string);
        text.secret = self.secret;
        text.pos = self.pos;
        text.align = self.align;
        self.common.into_window(WindowKind::Text(text))
    }
}

impl ConfigExt for TextConfig {
    fn common_mut(&mut self) -> &mut WindowConfig {
        &mut self.common
    }
}

// ---------------------------------------------------------------------------
// GridConfig
// ---------------------------------------------------------------------------

/// Options for a grid window.
#[derive(Debug, Default)]
pub struct GridConfig {
    pub common: WindowConfig,
    /// Initial grid size; both dimensions must be positive.
    pub size: Size,
}

impl GridConfig {
    pub fn new(size: Size) -> Self {
        Self { size, ..Self::default() }
    }
}

impl ConfigExt for GridConfig {
    fn common_mut(&mut self) -> &mut WindowConfig {
        &mut self.common
    }
}

// ---------------------------------------------------------------------------
// MenuConfig
// ---------------------------------------------------------------------------

/// Options for a menu.
#[derive(Debug, Default)]
pub struct MenuConfig {
    pub name: Option<String>,
    pub color: Color,
    pub hooks: Hooks<MenuId>,
}

impl MenuConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_hooks(mut self, hooks: Hooks<MenuId>) -> Self {
        self.hooks = hooks;
        self
    }
}
