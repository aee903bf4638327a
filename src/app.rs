//! The root object: window forest, backend, focus and the main loop.
//!
//! [`Tui`] owns every window and menu, the [`Backend`] it draws through, and
//! the focus state. Construction takes over the terminal; dropping it frees
//! every window (running free hooks) and gives the terminal back.

use std::any::Any;

use tracing::{debug, info, warn};

use crate::backend::{Backend, CrosstermBackend};
use crate::config::{ContainerConfig, GridConfig, MenuConfig, TextConfig};
use crate::error::{Error, Result};
use crate::event::hooks::{Hook, Hooks, KeyHook};
use crate::event::{Key, KeyEvent};
use crate::geometry::{Offset, Size};
use crate::style::{Color, ColorPairs};
use crate::tree::{Grid, GridCell, Menu, MenuId, Window, WindowId, WindowKind, WindowTree};

// ---------------------------------------------------------------------------
// TuiConfig
// ---------------------------------------------------------------------------

/// Configuration for the root.
#[derive(Debug, Default)]
pub struct TuiConfig {
    /// Global color every inherited channel ultimately falls back to.
    pub color: Color,
    /// Root hooks: `init` fires on construction, `key` is the last handler
    /// a key reaches.
    pub hooks: Hooks<()>,
}

impl TuiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the global color (builder).
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the root hooks (builder).
    pub fn with_hooks(mut self, hooks: Hooks<()>) -> Self {
        self.hooks = hooks;
        self
    }
}

// ---------------------------------------------------------------------------
// Owner
// ---------------------------------------------------------------------------

/// Where a new window is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    /// A top-level window of the root.
    Root,
    /// A top-level window of a menu.
    Menu(MenuId),
    /// The last child of a container.
    Parent(WindowId),
}

impl From<MenuId> for Owner {
    fn from(menu: MenuId) -> Self {
        Owner::Menu(menu)
    }
}

impl From<WindowId> for Owner {
    fn from(parent: WindowId) -> Self {
        Owner::Parent(parent)
    }
}

// ---------------------------------------------------------------------------
// Tui
// ---------------------------------------------------------------------------

/// The root of a terminal UI.
pub struct Tui {
    pub(crate) backend: Box<dyn Backend>,
    pub(crate) tree: WindowTree,
    pub(crate) pairs: ColorPairs,
    pub(crate) size: Size,
    pub(crate) color: Color,
    pub(crate) hooks: Hooks<()>,
    pub(crate) active_window: Option<WindowId>,
    pub(crate) active_menu: Option<MenuId>,
    /// Text cursor for this frame, set by the focused text window.
    pub(crate) cursor: Option<Offset>,
    running: bool,
}

impl Tui {
    /// Take over `backend` and run the root init hook.
    pub fn new(config: TuiConfig, backend: impl Backend + 'static) -> Result<Self> {
        let mut backend: Box<dyn Backend> = Box::new(backend);
        backend.init()?;
        let size = backend.terminal_size()?;
        let mut tui = Self {
            backend,
            tree: WindowTree::new(),
            pairs: ColorPairs::new(),
            size,
            color: config.color,
            hooks: config.hooks,
            active_window: None,
            active_menu: None,
            cursor: None,
            running: false,
        };
        if let Some(init) = tui.hooks.init.clone() {
            init(&mut tui, ());
        }
        Ok(tui)
    }

    /// A root drawing to the real terminal.
    pub fn terminal(config: TuiConfig) -> Result<Self> {
        Self::new(config, CrosstermBackend::new()?)
    }

    // -- accessors ----------------------------------------------------------

    pub fn tree(&self) -> &WindowTree {
        &self.tree
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.tree.get(id)
    }

    /// Mutable access to a window's flags, rect and color.
    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.tree.get_mut(id)
    }

    pub fn menu(&self, id: MenuId) -> Option<&Menu> {
        self.tree.menu(id)
    }

    pub fn menu_mut(&mut self, id: MenuId) -> Option<&mut Menu> {
        self.tree.menu_mut(id)
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub fn backend_mut(&mut self) -> &mut dyn Backend {
        self.backend.as_mut()
    }

    /// The backend as its concrete type.
    pub fn backend_as<B: Backend + 'static>(&self) -> Option<&B> {
        self.backend.as_any().downcast_ref()
    }

    pub fn backend_as_mut<B: Backend + 'static>(&mut self) -> Option<&mut B> {
        self.backend.as_any_mut().downcast_mut()
    }

    /// Terminal size as of the last frame.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The global color.
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn active_window(&self) -> Option<WindowId> {
        self.active_window
    }

    pub fn active_menu(&self) -> Option<MenuId> {
        self.active_menu
    }

    /// Whether the window was drawn in the last frame.
    pub fn is_visible(&self, id: WindowId) -> bool {
        self.tree.get(id).is_some_and(|w| w.frame.visible)
    }

    /// Text cursor position of the last frame, if any text window placed it.
    pub fn cursor(&self) -> Option<Offset> {
        self.cursor
    }

    // -- creation -----------------------------------------------------------

    /// Create a container window.
    pub fn create_container(&mut self, owner: impl Into<Owner>, config: ContainerConfig) -> Result<WindowId> {
        self.attach(owner.into(), config.into_window())
    }

    /// Create a text window.
    pub fn create_text(&mut self, owner: impl Into<Owner>, config: TextConfig) -> Result<WindowId> {
        self.attach(owner.into(), config.into_window())
    }

    /// Create a grid window. Fails on a non-positive grid size.
    pub fn create_grid(&mut self, owner: impl Into<Owner>, config: GridConfig) -> Result<WindowId> {
        let grid = Grid::new(config.size)?;
        self.attach(owner.into(), config.common.into_window(WindowKind::Grid(grid)))
    }

    fn attach(&mut self, owner: Owner, window: Window) -> Result<WindowId> {
        let id = match owner {
            Owner::Root => self.tree.insert_root(window),
            Owner::Menu(menu) => self.tree.insert_in_menu(menu, window)?,
            Owner::Parent(parent) => self.tree.insert_child(parent, window)?,
        };
        debug!(?id, ?owner, "window created");
        self.fire(id, |h| h.init.clone());
        Ok(id)
    }

    /// Create a menu and run its init hook.
    pub fn create_menu(&mut self, config: MenuConfig) -> MenuId {
        let id = self
            .tree
            .insert_menu(Menu::new(config.name, config.color, config.hooks));
        debug!(?id, "menu created");
        self.fire_menu(id, |h| h.init.clone());
        id
    }

    // -- destruction --------------------------------------------------------

    /// Remove a window and its subtree. Free hooks run children first.
    pub fn remove_window(&mut self, id: WindowId) -> Result<()> {
        if !self.tree.contains(id) {
            return Err(Error::WindowNotFound);
        }
        for window in self.tree.post_order(id) {
            self.fire(window, |h| h.free.clone());
        }
        for (removed, window) in self.tree.remove_window(id) {
            if let Some(surface) = window.surface {
                self.backend.destroy_surface(surface);
            }
            if self.active_window == Some(removed) {
                self.active_window = None;
            }
        }
        Ok(())
    }

    /// Remove a menu together with its windows.
    pub fn remove_menu(&mut self, id: MenuId) -> Result<()> {
        let windows = self.tree.menu(id).ok_or(Error::MenuNotFound)?.windows.clone();
        for window in windows {
            if self.tree.contains(window) {
                self.remove_window(window)?;
            }
        }
        self.tree.remove_menu(id);
        if self.active_menu == Some(id) {
            self.active_menu = None;
        }
        Ok(())
    }

    // -- text and grid ------------------------------------------------------

    /// Raw string of a text window.
    pub fn text(&self, id: WindowId) -> Option<&str> {
        self.tree.get(id)?.as_text().map(|t| t.string())
    }

    /// Replace the string of a text window.
    pub fn set_text(&mut self, id: WindowId, string: impl Into<String>) -> Result<()> {
        let window = self.tree.get_mut(id).ok_or(Error::WindowNotFound)?;
        let text = window.as_text_mut().ok_or(Error::WrongKind { expected: "text" })?;
        text.set_string(string);
        Ok(())
    }

    fn grid_mut(&mut self, id: WindowId) -> Result<&mut Grid> {
        let window = self.tree.get_mut(id).ok_or(Error::WindowNotFound)?;
        window.as_grid_mut().ok_or(Error::WrongKind { expected: "grid" })
    }

    /// Current size of a grid window.
    pub fn grid_size(&self, id: WindowId) -> Option<Size> {
        self.tree.get(id)?.as_grid().map(Grid::size)
    }

    pub fn grid_cell(&self, id: WindowId, x: i32, y: i32) -> Option<GridCell> {
        self.tree.get(id)?.as_grid()?.cell(x, y).copied()
    }

    /// Replace a grid cell. `Ok(false)` when the position is outside the grid.
    pub fn set_grid_cell(&mut self, id: WindowId, x: i32, y: i32, cell: GridCell) -> Result<bool> {
        Ok(self.grid_mut(id)?.set(x, y, cell))
    }

    /// Overlay a grid cell: only a present symbol and concrete channels apply.
    pub fn modify_grid_cell(&mut self, id: WindowId, x: i32, y: i32, cell: GridCell) -> Result<bool> {
        Ok(self.grid_mut(id)?.modify(x, y, cell))
    }

    /// Reallocate a grid. Every cell is reset.
    pub fn resize_grid(&mut self, id: WindowId, size: Size) -> Result<()> {
        self.grid_mut(id)?.resize(size)
    }

    // -- user data ----------------------------------------------------------

    pub fn data<T: Any>(&self, id: WindowId) -> Option<&T> {
        self.tree.get(id)?.data.as_ref()?.downcast_ref()
    }

    pub fn data_mut<T: Any>(&mut self, id: WindowId) -> Option<&mut T> {
        self.tree.get_mut(id)?.data.as_mut()?.downcast_mut()
    }

    pub fn set_data(&mut self, id: WindowId, data: impl Any) -> Result<()> {
        let window = self.tree.get_mut(id).ok_or(Error::WindowNotFound)?;
        window.data = Some(Box::new(data));
        Ok(())
    }

    // -- search -------------------------------------------------------------

    /// Find a window among the root's windows by path.
    pub fn find(&self, path: &str) -> Option<WindowId> {
        self.tree.find(path)
    }

    /// Find a window among a menu's windows by path.
    pub fn find_in_menu(&self, menu: MenuId, path: &str) -> Option<WindowId> {
        self.tree.find_in_menu(menu, path)
    }

    /// Find a window relative to `from`; `.` segments move to the parent.
    pub fn find_from(&self, from: WindowId, path: &str) -> Option<WindowId> {
        self.tree.find_from(from, path)
    }

    pub fn find_text(&self, from: WindowId, path: &str) -> Option<WindowId> {
        self.find_from(from, path)
            .filter(|&id| self.tree.get(id).is_some_and(|w| w.as_text().is_some()))
    }

    pub fn find_container(&self, from: WindowId, path: &str) -> Option<WindowId> {
        self.find_from(from, path)
            .filter(|&id| self.tree.get(id).is_some_and(Window::is_container))
    }

    pub fn find_grid(&self, from: WindowId, path: &str) -> Option<WindowId> {
        self.find_from(from, path)
            .filter(|&id| self.tree.get(id).is_some_and(|w| w.as_grid().is_some()))
    }

    /// Search a menu and make the result the active window.
    pub fn focus_path(&mut self, menu: MenuId, path: &str) -> Result<()> {
        let id = self.find_in_menu(menu, path).ok_or(Error::WindowNotFound)?;
        self.set_active_window(id);
        Ok(())
    }

    // -- main loop ----------------------------------------------------------

    /// Render, then read and route keys until stopped or interrupted.
    pub fn start(&mut self) -> Result<()> {
        info!("main loop started");
        self.running = true;
        self.render()?;

        while self.running {
            let key = self.backend.read_key()?;
            if key.code == Key::Interrupt {
                self.running = false;
                break;
            }
            if key.code == Key::Resize {
                self.resize()?;
            }
            self.event(key);
            self.render()?;
        }

        info!("main loop stopped");
        Ok(())
    }

    /// Ask the main loop to finish after the current key.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // -- hook plumbing ------------------------------------------------------

    pub(crate) fn fire(&mut self, id: WindowId, pick: impl Fn(&Hooks<WindowId>) -> Option<Hook<WindowId>>) {
        let hook = self.tree.get(id).and_then(|w| pick(&w.hooks));
        if let Some(hook) = hook {
            hook(self, id);
        }
    }

    pub(crate) fn fire_menu(&mut self, id: MenuId, pick: impl Fn(&Hooks<MenuId>) -> Option<Hook<MenuId>>) {
        let hook = self.tree.menu(id).and_then(|m| pick(&m.hooks));
        if let Some(hook) = hook {
            hook(self, id);
        }
    }

    pub(crate) fn window_key_hook(&self, id: WindowId) -> Option<KeyHook<WindowId>> {
        self.tree.get(id)?.hooks.key.clone()
    }

    pub(crate) fn menu_key_hook(&self, id: MenuId) -> Option<KeyHook<MenuId>> {
        self.tree.menu(id)?.hooks.key.clone()
    }

    /// Route `key` through the root key hook only.
    pub(crate) fn root_key(&mut self, key: KeyEvent) -> bool {
        match self.hooks.key.clone() {
            Some(hook) => hook(self, (), key),
            None => false,
        }
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let menus = self.tree.menu_ids().to_vec();
        for menu in menus {
            if let Err(err) = self.remove_menu(menu) {
                warn!(%err, ?menu, "menu teardown failed");
            }
        }
        let roots = self.tree.roots().to_vec();
        for window in roots {
            if let Err(err) = self.remove_window(window) {
                warn!(%err, ?window, "window teardown failed");
            }
        }
        if let Err(err) = self.backend.shutdown() {
            debug!(%err, "backend shutdown failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::backend::HeadlessBackend;
    use crate::config::ConfigExt;
    use crate::style::Palette;

    fn tui() -> Tui {
        Tui::new(TuiConfig::new(), HeadlessBackend::new(Size::new(20, 6))).unwrap()
    }

    #[test]
    fn construction_runs_root_init() {
        let seen = Rc::new(RefCell::new(false));
        let flag = seen.clone();
        let config = TuiConfig::new().with_hooks(Hooks::new().on_init(move |_, ()| *flag.borrow_mut() = true));
        let tui = Tui::new(config, HeadlessBackend::new(Size::new(4, 4))).unwrap();
        assert!(*seen.borrow());
        assert!(tui.backend_as::<HeadlessBackend>().unwrap().is_active());
    }

    #[test]
    fn window_init_sees_attached_window() {
        let mut tui = tui();
        let parent = tui.create_container(Owner::Root, ContainerConfig::new()).unwrap();
        let child = tui
            .create_text(
                parent,
                TextConfig::new("x").on_init(|tui, id| {
                    assert!(tui.tree().parent(id).is_some());
                    tui.set_text(id, "initialized").unwrap();
                }),
            )
            .unwrap();
        assert_eq!(tui.text(child), Some("initialized"));
    }

    #[test]
    fn stale_owner_fails_without_side_effects() {
        let mut tui = tui();
        let menu = tui.create_menu(MenuConfig::new());
        tui.remove_menu(menu).unwrap();
        assert!(matches!(
            tui.create_text(menu, TextConfig::new("x")),
            Err(Error::MenuNotFound)
        ));
        let text = tui.create_text(Owner::Root, TextConfig::new("x")).unwrap();
        assert!(matches!(
            tui.create_text(text, TextConfig::new("y")),
            Err(Error::WrongKind { .. })
        ));
        assert_eq!(tui.tree().len(), 1);
    }

    #[test]
    fn remove_runs_free_hooks_children_first() {
        let mut tui = tui();
        let order = Rc::new(RefCell::new(Vec::new()));
        let log = |name: &'static str, order: &Rc<RefCell<Vec<&'static str>>>| {
            let order = order.clone();
            move |_: &mut Tui, _: WindowId| order.borrow_mut().push(name)
        };
        let parent = tui
            .create_container(Owner::Root, ContainerConfig::new().on_free(log("parent", &order)))
            .unwrap();
        tui.create_text(parent, TextConfig::new("a").on_free(log("a", &order))).unwrap();
        tui.create_text(parent, TextConfig::new("b").on_free(log("b", &order))).unwrap();

        tui.remove_window(parent).unwrap();
        assert_eq!(*order.borrow(), vec!["a", "b", "parent"]);
        assert!(tui.tree().is_empty());
        assert!(matches!(tui.remove_window(parent), Err(Error::WindowNotFound)));
    }

    #[test]
    fn removing_active_window_clears_focus() {
        let mut tui = tui();
        let id = tui
            .create_text(Owner::Root, TextConfig::new("x").with_interactive(true))
            .unwrap();
        tui.render().unwrap();
        tui.set_active_window(id);
        assert_eq!(tui.active_window(), Some(id));
        tui.remove_window(id).unwrap();
        assert_eq!(tui.active_window(), None);
    }

    #[test]
    fn grid_operations() {
        let mut tui = tui();
        let grid = tui.create_grid(Owner::Root, GridConfig::new(Size::new(3, 2))).unwrap();
        assert!(tui.set_grid_cell(grid, 1, 0, GridCell::new('#', Color::fg(Palette::Red))).unwrap());
        assert!(!tui.set_grid_cell(grid, 5, 0, GridCell::default()).unwrap());
        tui.modify_grid_cell(grid, 1, 0, GridCell { symbol: None, color: Color::bg(Palette::Blue) })
            .unwrap();
        assert_eq!(
            tui.grid_cell(grid, 1, 0),
            Some(GridCell::new('#', Color::new(Palette::Red, Palette::Blue)))
        );
        tui.resize_grid(grid, Size::new(4, 4)).unwrap();
        assert_eq!(tui.grid_size(grid), Some(Size::new(4, 4)));
        assert_eq!(tui.grid_cell(grid, 1, 0), Some(GridCell::default()));
        assert!(matches!(
            tui.resize_grid(grid, Size::new(0, 4)),
            Err(Error::InvalidGridSize(_))
        ));
    }

    #[test]
    fn invalid_grid_is_rejected() {
        let mut tui = tui();
        assert!(tui.create_grid(Owner::Root, GridConfig::new(Size::new(2, 0))).is_err());
        assert!(matches!(
            tui.create_grid(Owner::Root, GridConfig::new(Size::new(70_000, 70_000))),
            Err(Error::InvalidGridSize(_))
        ));
        assert!(tui.tree().is_empty());
    }

    #[test]
    fn grid_ops_on_text_fail() {
        let mut tui = tui();
        let text = tui.create_text(Owner::Root, TextConfig::new("x")).unwrap();
        assert!(matches!(
            tui.set_grid_cell(text, 0, 0, GridCell::default()),
            Err(Error::WrongKind { expected: "grid" })
        ));
        assert!(matches!(tui.set_text(text, "ok"), Ok(())));
    }

    #[test]
    fn user_data_round_trip() {
        let mut tui = tui();
        let id = tui
            .create_text(Owner::Root, TextConfig::new("x").with_data(String::from("payload")))
            .unwrap();
        assert_eq!(tui.data::<String>(id).map(String::as_str), Some("payload"));
        assert!(tui.data::<u32>(id).is_none());
        tui.data_mut::<String>(id).unwrap().push('!');
        assert_eq!(tui.data::<String>(id).map(String::as_str), Some("payload!"));
    }

    #[test]
    fn typed_search() {
        let mut tui = tui();
        let menu = tui.create_menu(MenuConfig::new());
        let form = tui
            .create_container(menu, ContainerConfig::new().with_name("form"))
            .unwrap();
        let name = tui
            .create_text(form, TextConfig::new("n").with_name("name").with_interactive(true))
            .unwrap();
        assert_eq!(tui.find_text(form, "name"), Some(name));
        assert_eq!(tui.find_grid(form, "name"), None);
        assert_eq!(tui.find_container(name, "."), Some(form));

        tui.set_active_menu(menu);
        tui.render().unwrap();
        tui.focus_path(menu, "form name").unwrap();
        assert_eq!(tui.active_window(), Some(name));
        assert!(tui.focus_path(menu, "form nope").is_err());
    }

    #[test]
    fn main_loop_stops_on_interrupt() {
        let backend = HeadlessBackend::new(Size::new(10, 2)).with_keys([Key::Char('a'), Key::Char('b')]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let config = TuiConfig::new().with_hooks(Hooks::new().on_key(move |_, (), key| {
            log.borrow_mut().push(key.code);
            true
        }));
        let mut tui = Tui::new(config, backend).unwrap();
        tui.start().unwrap();
        assert!(!tui.is_running());
        assert_eq!(*seen.borrow(), vec![Key::Char('a'), Key::Char('b')]);
        // initial frame plus one per key
        assert_eq!(tui.backend_as::<HeadlessBackend>().unwrap().frames(), 3);
    }

    #[test]
    fn stop_from_hook_ends_loop() {
        let backend = HeadlessBackend::new(Size::new(10, 2)).with_keys([Key::Char('q'), Key::Char('z')]);
        let config = TuiConfig::new().with_hooks(Hooks::new().on_key(|tui, (), key| {
            if key.code == Key::Char('q') {
                tui.stop();
            }
            true
        }));
        let mut tui = Tui::new(config, backend).unwrap();
        tui.start().unwrap();
        assert_eq!(tui.backend_as::<HeadlessBackend>().unwrap().pending_keys(), 1);
    }
}
