//! Path lookup of windows by name.
//!
//! A path is a space-separated list of segments. Each segment names a window
//! in the current list; the next segment continues among that window's
//! children. A `.` segment moves to the parent; from a top-level window it
//! continues in the owning menu, or the root. Searches starting at the root
//! or a menu cannot begin with `.`.

use super::node::{MenuId, WindowId};
use super::tree::WindowTree;

fn split(path: &str) -> (&str, Option<&str>) {
    match path.split_once(' ') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    }
}

impl WindowTree {
    /// Search the root's top-level windows.
    pub fn find(&self, path: &str) -> Option<WindowId> {
        let (head, _) = split(path);
        if head == "." {
            return None;
        }
        self.find_in_list(self.roots(), path)
    }

    /// Search a menu's top-level windows.
    pub fn find_in_menu(&self, menu: MenuId, path: &str) -> Option<WindowId> {
        let (head, _) = split(path);
        if head == "." {
            return None;
        }
        let menu = self.menu(menu)?;
        self.find_in_list(&menu.windows, path)
    }

    /// Search relative to `start`. An empty path yields `start` itself.
    pub fn find_from(&self, start: WindowId, path: &str) -> Option<WindowId> {
        let window = self.get(start)?;
        if path.is_empty() {
            return Some(start);
        }

        let (head, rest) = split(path);
        if head == "." {
            let parent = self.parent(start);
            return match (rest, parent) {
                (None, parent) => parent,
                (Some(rest), Some(parent)) => self.find_from(parent, rest),
                (Some(rest), None) => match window.menu {
                    Some(menu) => self.find_in_menu(menu, rest),
                    None => self.find(rest),
                },
            };
        }

        if window.is_container() {
            self.find_in_list(self.children(start), path)
        } else {
            None
        }
    }

    fn find_in_list(&self, list: &[WindowId], path: &str) -> Option<WindowId> {
        let (head, rest) = split(path);
        let found = list.iter().copied().find(|&id| {
            self.get(id)
                .and_then(|w| w.name.as_deref())
                .is_some_and(|name| name == head)
        })?;
        match rest {
            None => Some(found),
            Some(rest) => self.find_from(found, rest),
        }
    }
}
