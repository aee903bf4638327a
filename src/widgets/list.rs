//! List widget: a selection over a sequence of windows.
//!
//! Only visible windows can be selected. Scrolling stops at either end
//! instead of wrapping.

use crate::app::Tui;
use crate::event::{Key, KeyEvent};
use crate::geometry::Axis;
use crate::tree::WindowId;

/// An ordered set of windows with one selected entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct List {
    items: Vec<WindowId>,
    index: usize,
    axis: Axis,
}

impl List {
    /// An empty list navigated along `axis`.
    pub fn new(axis: Axis) -> Self {
        Self { items: Vec::new(), index: 0, axis }
    }

    /// Add items (builder).
    pub fn with_items(mut self, items: impl IntoIterator<Item = WindowId>) -> Self {
        self.items.extend(items);
        self
    }

    pub fn push(&mut self, item: WindowId) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[WindowId] {
        &self.items
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The selected window.
    pub fn selected(&self) -> Option<WindowId> {
        self.items.get(self.index).copied()
    }

    /// Select the entry at `index`. Out-of-range indices are rejected.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.index = index;
        true
    }

    /// Select the next visible entry. `false` at the end.
    pub fn forward(&mut self, tui: &Tui) -> bool {
        let found = (self.index + 1..self.items.len()).find(|&i| tui.is_visible(self.items[i]));
        self.select_found(found)
    }

    /// Select the previous visible entry. `false` at the start.
    pub fn backward(&mut self, tui: &Tui) -> bool {
        let found = (0..self.index.min(self.items.len()))
            .rev()
            .find(|&i| tui.is_visible(self.items[i]));
        self.select_found(found)
    }

    /// If the selected entry became invisible, move to the nearest visible
    /// one, looking forward first. Returns whether the selection changed.
    pub fn repair(&mut self, tui: &Tui) -> bool {
        match self.selected() {
            Some(item) if !tui.is_visible(item) => self.forward(tui) || self.backward(tui),
            _ => false,
        }
    }

    /// Down/Right and Tab move forward, Up/Left and BackTab backward,
    /// depending on the axis.
    pub fn event(&mut self, tui: &Tui, key: KeyEvent) -> bool {
        match (self.axis, key.code) {
            (Axis::Vertical, Key::Down | Key::Tab) | (Axis::Horizontal, Key::Right | Key::Tab) => {
                self.forward(tui)
            }
            (Axis::Vertical, Key::Up | Key::BackTab) | (Axis::Horizontal, Key::Left | Key::BackTab) => {
                self.backward(tui)
            }
            _ => false,
        }
    }

    fn select_found(&mut self, found: Option<usize>) -> bool {
        match found {
            Some(index) => {
                self.index = index;
                true
            }
            None => false,
        }
    }
}
