//! Layout engine: intrinsic sizes bottom-up, then rects top-down.
//!
//! A frame runs [`measure`] over the root windows and the active menu's
//! windows, then [`arrange`] over the same lists. Results land in each
//! window's [`Frame`](crate::tree::Frame).

pub mod arrange;
pub mod measure;

pub use arrange::{arrange, arrange_window, Flow};
pub use measure::{measure, measure_window};

use crate::geometry::Size;
use crate::tree::{MenuId, WindowTree};

/// Placement along one axis within spare space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Position {
    #[default]
    Start,
    Center,
    End,
}

impl Position {
    /// 0, 1 or 2 halves of the spare space.
    pub const fn factor(self) -> i32 {
        match self {
            Position::Start => 0,
            Position::Center => 1,
            Position::End => 2,
        }
    }

    /// Offset into `space` spare cells. Non-positive space gives 0.
    pub const fn offset(self, space: i32) -> i32 {
        if space <= 0 {
            0
        } else {
            space * self.factor() / 2
        }
    }
}

/// Main-axis distribution of a container's children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Align {
    /// Spare space after the last child.
    #[default]
    Start,
    /// Spare space split before the first and after the last child.
    Center,
    /// Spare space before the first child.
    End,
    /// Spare space between children only.
    Between,
    /// Spare space before, between and after children.
    Around,
    /// Every child gets the same extent.
    Evenly,
}

impl Align {
    /// The equivalent [`Position`] for the three edge modes.
    pub const fn position(self) -> Option<Position> {
        match self {
            Align::Start => Some(Position::Start),
            Align::Center => Some(Position::Center),
            Align::End => Some(Position::End),
            _ => None,
        }
    }
}

/// Run both passes for everything on screen.
pub fn layout(tree: &mut WindowTree, screen: Size, menu: Option<MenuId>) {
    let mut lists = vec![tree.roots().to_vec()];
    if let Some(menu) = menu {
        lists.push(tree.top_level(Some(menu)).to_vec());
    }
    for list in &lists {
        measure(tree, list, screen);
    }
    for list in &lists {
        arrange(tree, list, screen);
    }
}
