//! Window forest operations: insert, remove, walk.

use slotmap::{SecondaryMap, SlotMap};

use crate::error::{Error, Result};
use crate::geometry::Region;

use super::node::{Menu, MenuId, Window, WindowId};

const EMPTY: &[WindowId] = &[];

/// Arena holding every window and menu of a [`Tui`](crate::Tui).
///
/// Windows live in one `SlotMap`. Container children and parent links are
/// kept in secondary maps, so removing a subtree is O(subtree size) and
/// lookups are O(1). Top-level windows are owned either by the root list or
/// by exactly one menu.
#[derive(Debug)]
pub struct WindowTree {
    pub(crate) windows: SlotMap<WindowId, Window>,
    children: SecondaryMap<WindowId, Vec<WindowId>>,
    parent: SecondaryMap<WindowId, WindowId>,
    pub(crate) menus: SlotMap<MenuId, Menu>,
    roots: Vec<WindowId>,
    menu_order: Vec<MenuId>,
}

impl WindowTree {
    pub fn new() -> Self {
        Self {
            windows: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            menus: SlotMap::with_key(),
            roots: Vec::new(),
            menu_order: Vec::new(),
        }
    }

    fn attach(&mut self, window: Window) -> WindowId {
        let is_container = window.is_container();
        let id = self.windows.insert(window);
        if is_container {
            self.children.insert(id, Vec::new());
        }
        id
    }

    /// Add a top-level window owned by the root.
    pub fn insert_root(&mut self, mut window: Window) -> WindowId {
        window.menu = None;
        let id = self.attach(window);
        self.roots.push(id);
        id
    }

    /// Register a menu.
    pub fn insert_menu(&mut self, menu: Menu) -> MenuId {
        let id = self.menus.insert(menu);
        self.menu_order.push(id);
        id
    }

    /// Add a top-level window owned by `menu`.
    pub fn insert_in_menu(&mut self, menu: MenuId, mut window: Window) -> Result<WindowId> {
        if !self.menus.contains_key(menu) {
            return Err(Error::MenuNotFound);
        }
        window.menu = Some(menu);
        let id = self.attach(window);
        if let Some(owner) = self.menus.get_mut(menu) {
            owner.windows.push(id);
        }
        Ok(id)
    }

    /// Add `window` as the last child of the container `parent`.
    ///
    /// The child inherits the parent's owning menu.
    pub fn insert_child(&mut self, parent: WindowId, mut window: Window) -> Result<WindowId> {
        let owner = self.windows.get(parent).ok_or(Error::WindowNotFound)?;
        if !owner.is_container() {
            return Err(Error::WrongKind { expected: "container" });
        }
        window.menu = owner.menu;
        let id = self.attach(window);
        self.parent.insert(id, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(id);
        }
        Ok(id)
    }

    /// Detach and remove `id` with its whole subtree.
    ///
    /// Returns the removed windows children-before-parent, so the caller can
    /// release their resources in that order.
    pub fn remove_window(&mut self, id: WindowId) -> Vec<(WindowId, Window)> {
        if !self.windows.contains_key(id) {
            return Vec::new();
        }

        if let Some(parent) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent) {
                siblings.retain(|&child| child != id);
            }
        } else if let Some(menu) = self.windows[id].menu {
            if let Some(owner) = self.menus.get_mut(menu) {
                owner.windows.retain(|&w| w != id);
            }
        } else {
            self.roots.retain(|&w| w != id);
        }

        let order = self.post_order(id);
        let mut removed = Vec::with_capacity(order.len());
        for current in order {
            self.children.remove(current);
            self.parent.remove(current);
            if let Some(window) = self.windows.remove(current) {
                removed.push((current, window));
            }
        }
        removed
    }

    /// Unregister a menu. Its windows must have been removed already.
    pub fn remove_menu(&mut self, id: MenuId) -> Option<Menu> {
        self.menu_order.retain(|&m| m != id);
        self.menus.remove(id)
    }

    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(id)
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.get_mut(id)
    }

    pub fn menu(&self, id: MenuId) -> Option<&Menu> {
        self.menus.get(id)
    }

    pub fn menu_mut(&mut self, id: MenuId) -> Option<&mut Menu> {
        self.menus.get_mut(id)
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(id)
    }

    pub fn contains_menu(&self, id: MenuId) -> bool {
        self.menus.contains_key(id)
    }

    /// Number of windows.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Parent container, `None` for top-level windows.
    pub fn parent(&self, id: WindowId) -> Option<WindowId> {
        self.parent.get(id).copied()
    }

    /// Children of a container in order. Empty for other windows.
    pub fn children(&self, id: WindowId) -> &[WindowId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(EMPTY)
    }

    /// Top-level windows owned by the root.
    pub fn roots(&self) -> &[WindowId] {
        &self.roots
    }

    /// Menus in creation order.
    pub fn menu_ids(&self) -> &[MenuId] {
        &self.menu_order
    }

    /// Top-level windows of `menu`, or of the root when `menu` is `None`.
    pub fn top_level(&self, menu: Option<MenuId>) -> &[WindowId] {
        match menu {
            Some(menu) => self.menus.get(menu).map(|m| m.windows.as_slice()).unwrap_or(EMPTY),
            None => &self.roots,
        }
    }

    /// The ordered list that `id` belongs to: its parent's children, or the
    /// top-level list of its owner.
    pub fn siblings(&self, id: WindowId) -> &[WindowId] {
        match self.parent(id) {
            Some(parent) => self.children(parent),
            None => match self.windows.get(id) {
                Some(window) => self.top_level(window.menu),
                None => EMPTY,
            },
        }
    }

    /// Walk from `id` up to its top-level window, `id` first.
    pub fn ancestors(&self, id: WindowId) -> Vec<WindowId> {
        let mut chain = Vec::new();
        if !self.windows.contains_key(id) {
            return chain;
        }
        let mut current = Some(id);
        while let Some(window) = current {
            chain.push(window);
            current = self.parent(window);
        }
        chain
    }

    /// Pre-order walk: a window before its children.
    pub fn pre_order(&self, start: WindowId) -> Vec<WindowId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.windows.contains_key(current) {
                continue;
            }
            result.push(current);
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// Post-order walk: children before their parent.
    pub fn post_order(&self, start: WindowId) -> Vec<WindowId> {
        let mut result = Vec::new();
        self.collect_post_order(start, &mut result);
        result
    }

    fn collect_post_order(&self, id: WindowId, out: &mut Vec<WindowId>) {
        if !self.windows.contains_key(id) {
            return;
        }
        for &child in self.children(id) {
            self.collect_post_order(child, out);
        }
        out.push(id);
    }

    /// Mark `id` and its subtree invisible with an empty rect for this frame.
    pub fn set_invisible(&mut self, id: WindowId) {
        for window in self.pre_order(id) {
            if let Some(window) = self.windows.get_mut(window) {
                window.frame.visible = false;
                window.frame.rect = Region::EMPTY;
            }
        }
    }
}

impl Default for WindowTree {
    fn default() -> Self {
        Self::new()
    }
}
