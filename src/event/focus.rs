//! Active window and menu, and tab traversal across the forest.

use tracing::debug;

use crate::app::Tui;
use crate::tree::{MenuId, WindowId};

impl Tui {
    fn focusable(&self, id: WindowId) -> bool {
        self.tree
            .get(id)
            .is_some_and(|w| w.frame.visible && w.interactive)
    }

    /// Make `id` the active window. Only visible windows can be activated.
    ///
    /// Fires the previous window's exit hook, then the new window's enter
    /// hook, and makes the window's menu the active menu. Returns whether the
    /// focus moved.
    pub fn set_active_window(&mut self, id: WindowId) -> bool {
        if self.active_window == Some(id) {
            return false;
        }
        let Some(window) = self.tree.get(id) else {
            return false;
        };
        if !window.frame.visible {
            return false;
        }
        let menu = window.menu;

        let previous = self.active_window.replace(id);
        debug!(?previous, ?id, "focus changed");
        if let Some(previous) = previous {
            self.fire(previous, |h| h.exit.clone());
        }
        self.fire(id, |h| h.enter.clone());

        if menu.is_some() {
            self.active_menu = menu;
        }
        true
    }

    /// Drop focus without activating another window.
    pub fn clear_active_window(&mut self) {
        if let Some(previous) = self.active_window.take() {
            self.fire(previous, |h| h.exit.clone());
        }
    }

    /// Make `menu` the active menu.
    ///
    /// When no window is active, or the active window belongs to another
    /// menu, the menu's first focusable window becomes active.
    pub fn set_active_menu(&mut self, menu: MenuId) {
        if self.active_menu == Some(menu) || !self.tree.contains_menu(menu) {
            return;
        }
        if let Some(previous) = self.active_menu {
            self.fire_menu(previous, |h| h.exit.clone());
        }
        debug!(?menu, "menu changed");
        self.active_menu = Some(menu);

        let foreign = match self.active_window.and_then(|id| self.tree.get(id)) {
            None => true,
            Some(window) => window.menu.is_some_and(|owner| owner != menu),
        };
        if foreign {
            let windows = self.tree.top_level(Some(menu));
            let first = windows
                .iter()
                .copied()
                .find(|&id| self.focusable(id))
                .or_else(|| windows.first().copied());
            if let Some(first) = first {
                self.set_active_window(first);
            }
        }

        self.fire_menu(menu, |h| h.enter.clone());
    }

    /// Move focus to the next focusable window in document order.
    ///
    /// An active container is entered first. Each level searches the
    /// siblings after the current window, then climbs to the parent. After
    /// the top-level list, the search wraps to the root's windows and then
    /// the active menu's windows from the start.
    pub fn tab_forward(&mut self) -> bool {
        let mut current = self.active_window;

        if let Some(active) = current {
            if self.tree.get(active).is_some_and(|w| w.is_container()) {
                if let Some(found) = self.next_in(self.tree.children(active), None) {
                    return self.set_active_window(found);
                }
            }
        }

        while let Some(id) = current {
            let Some(parent) = self.tree.parent(id) else {
                break;
            };
            let siblings = self.tree.children(parent);
            let position = siblings.iter().position(|&s| s == id);
            if let Some(found) = self.next_in(siblings, position) {
                return self.set_active_window(found);
            }
            current = Some(parent);
        }

        let owner = current
            .and_then(|id| self.tree.get(id))
            .map(|w| w.menu)
            .unwrap_or(self.active_menu);
        let index = current.and_then(|id| self.tree.top_level(owner).iter().position(|&s| s == id));
        if let Some(found) = self.next_in(self.tree.top_level(owner), index) {
            return self.set_active_window(found);
        }

        let wrapped = self
            .next_in(self.tree.roots(), None)
            .or_else(|| self.active_menu.and_then(|menu| self.next_in(self.tree.top_level(Some(menu)), None)));
        match wrapped {
            Some(found) => self.set_active_window(found),
            None => false,
        }
    }

    /// Move focus to the previous focusable window in document order.
    ///
    /// Mirrors [`tab_forward`](Self::tab_forward) without entering
    /// containers. The final wrap cycles to the last focusable window of the
    /// active menu, or of the root when no menu is active.
    pub fn tab_backward(&mut self) -> bool {
        let mut current = self.active_window;

        while let Some(id) = current {
            let Some(parent) = self.tree.parent(id) else {
                break;
            };
            let siblings = self.tree.children(parent);
            let position = siblings.iter().position(|&s| s == id);
            if let Some(found) = self.previous_in(siblings, position) {
                return self.set_active_window(found);
            }
            current = Some(parent);
        }

        let owner = current
            .and_then(|id| self.tree.get(id))
            .map(|w| w.menu)
            .unwrap_or(self.active_menu);
        let index = current.and_then(|id| self.tree.top_level(owner).iter().position(|&s| s == id));
        if let Some(found) = self.previous_in(self.tree.top_level(owner), index) {
            return self.set_active_window(found);
        }

        match self.previous_in(self.tree.top_level(self.active_menu), None) {
            Some(found) => self.set_active_window(found),
            None => false,
        }
    }

    /// First focusable window after `after`, or from the start when `None`.
    fn next_in(&self, list: &[WindowId], after: Option<usize>) -> Option<WindowId> {
        let start = after.map_or(0, |i| i + 1);
        list.iter()
            .skip(start)
            .copied()
            .find(|&id| self.focusable(id))
    }

    /// Last focusable window before `before`, or from the end when `None`.
    fn previous_in(&self, list: &[WindowId], before: Option<usize>) -> Option<WindowId> {
        let end = before.unwrap_or(list.len()).min(list.len());
        list[..end]
            .iter()
            .rev()
            .copied()
            .find(|&id| self.focusable(id))
    }
}
