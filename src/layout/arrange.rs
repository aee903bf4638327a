//! Rect pass: place windows top-down in screen coordinates.
//!
//! Top-level windows take their requested rect resolved against the screen,
//! or their intrinsic size at the origin. Inside a container, children with a
//! fixed rect are placed directly relative to the container; the rest flow
//! along the container's axis under its [`Align`] mode.

use tracing::debug;

use crate::geometry::{Axis, Offset, Region, Size};
use crate::tree::{Container, WindowId, WindowTree};

use super::{Align, Position};

/// Place each window of `list` and its subtree on a screen of `screen` size.
pub fn arrange(tree: &mut WindowTree, list: &[WindowId], screen: Size) {
    for &id in list {
        arrange_window(tree, id, screen);
    }
}

/// Place a top-level window within `within`.
pub fn arrange_window(tree: &mut WindowTree, id: WindowId, within: Size) {
    let Some(window) = tree.get(id) else { return };
    if window.hidden {
        tree.set_invisible(id);
        return;
    }

    let rect = window
        .rect
        .resolve(within)
        .unwrap_or_else(|| window.frame.size.to_region());
    if rect.is_empty() {
        debug!(?id, "window has no room this frame");
        tree.set_invisible(id);
        return;
    }

    let is_container = window.is_container();
    if let Some(window) = tree.get_mut(id) {
        window.frame.rect = rect;
        window.frame.visible = true;
    }
    if is_container {
        arrange_children(tree, id);
    }
}

fn arrange_children(tree: &mut WindowTree, parent: WindowId) {
    let Some(window) = tree.get(parent) else { return };
    let Some(&container) = window.as_container() else { return };
    let rect = window.frame.rect;
    let axis = container.axis;
    let content = Region::new(0, 0, rect.width, rect.height).shrink(container.insets());
    let max = content.size();
    let children = tree.children(parent).to_vec();

    // First sweep: decide which flowing children take part.
    let mut main = 0;
    let mut cross = 0;
    let mut count = 0;
    let mut grow_count = 0;
    for &child in &children {
        let Some(window) = tree.get_mut(child) else { continue };
        if !window.rect.is_auto() {
            window.frame.visible = !window.hidden;
            continue;
        }
        if window.hidden || window.frame.unwrappable {
            window.frame.visible = false;
            continue;
        }
        let size = window.frame.size;
        if window.atomic
            && (main + size.main(axis) > max.main(axis) || size.cross(axis) > max.cross(axis))
        {
            debug!(id = ?child, "atomic window does not fit");
            window.frame.visible = false;
            continue;
        }
        window.frame.visible = true;
        count += 1;
        main += size.main(axis);
        cross = cross.max(size.cross(axis));
        if window.grows(axis) {
            grow_count += 1;
        }
    }
    let occupied = Size::from_axis(axis, main, cross).min(max);

    let mut flow = Flow::new(
        &container,
        content.offset(),
        max,
        occupied,
        count,
        grow_count,
    );

    // Second sweep: place.
    for &child in &children {
        let Some(window) = tree.get(child) else { continue };
        if !window.frame.visible {
            tree.set_invisible(child);
            continue;
        }

        let region = match window.rect.resolve(rect.size()) {
            Some(region) => region,
            None => flow.next(
                window.frame.size,
                window.grows(axis),
                window.contain || window.grows(axis.cross()),
                window.atomic,
            ),
        };
        if region.is_empty() {
            debug!(id = ?child, "window has no room this frame");
            tree.set_invisible(child);
            continue;
        }

        let is_container = window.is_container();
        if let Some(window) = tree.get_mut(child) {
            window.frame.rect = region.translate(rect.offset());
            window.frame.visible = true;
        }
        if is_container {
            arrange_children(tree, child);
        }
    }
}

/// Cursor state for flowing the aligned children of one container.
///
/// Regions returned by [`Flow::next`] are relative to the container's
/// top-left corner.
#[derive(Debug, Clone)]
pub struct Flow {
    axis: Axis,
    align: Align,
    pos: Position,
    gap: bool,
    origin: Offset,
    max: Size,
    occupied: Size,
    count: i32,
    grow_count: i32,
    index: i32,
    grow_index: i32,
    cursor: i32,
}

impl Flow {
    /// `max` is the content area, `occupied` the summed main extent and
    /// widest cross extent of the `count` flowing children.
    pub fn new(
        container: &Container,
        origin: Offset,
        max: Size,
        occupied: Size,
        count: i32,
        grow_count: i32,
    ) -> Self {
        Self {
            axis: container.axis,
            align: container.align,
            pos: container.pos,
            gap: container.gap,
            origin,
            max,
            occupied,
            count,
            grow_count,
            index: 0,
            grow_index: 0,
            cursor: 0,
        }
    }

    fn main_start(&self) -> i32 {
        match self.axis {
            Axis::Horizontal => self.origin.x,
            Axis::Vertical => self.origin.y,
        }
    }

    fn cross_start(&self) -> i32 {
        match self.axis {
            Axis::Horizontal => self.origin.y,
            Axis::Vertical => self.origin.x,
        }
    }

    /// Region of the next flowing child of intrinsic `size`.
    pub fn next(&mut self, size: Size, grows: bool, fills_cross: bool, atomic: bool) -> Region {
        let axis = self.axis;
        let unit = axis.gap_unit();
        let max_main = self.max.main(axis);
        let max_cross = self.max.cross(axis);
        let count = self.count.max(1);

        if self.index == 0 {
            self.cursor = self.main_start();
        }

        let mut space = max_main - self.occupied.main(axis);
        let mut extent = size.main(axis);
        let mut gap_after = 0;

        if self.align == Align::Evenly {
            let mut total = max_main;
            if self.gap {
                gap_after += unit;
                total = (max_main - (count - 1) * unit).max(0);
            }
            extent = total / count;
            if total - extent * count > self.index {
                extent += 1;
            }
        } else if grows {
            if self.gap {
                gap_after += unit;
                space = (space - (count - 1) * unit).max(0);
            }
            let grow_count = self.grow_count.max(1);
            let share = space / grow_count;
            extent += share;
            if space - share * grow_count > self.grow_index {
                extent += 1;
            }
            self.grow_index += 1;
        } else if self.grow_count > 0 {
            if self.gap {
                gap_after += unit;
            }
        } else {
            match self.align {
                Align::Between => {
                    if count > 1 {
                        let share = space / (count - 1);
                        gap_after += share;
                        if space - share * (count - 1) > self.index {
                            gap_after += 1;
                        }
                    }
                }
                Align::Around => {
                    let share = space / (count + 1);
                    let rest = space - share * (count + 1);
                    if self.index == 0 && rest > 0 {
                        self.cursor += rest / 2;
                    }
                    self.cursor += share;
                }
                Align::Start | Align::Center | Align::End | Align::Evenly => {
                    if self.index == 0 {
                        if self.gap {
                            space = (space - (count - 1) * unit).max(0);
                        }
                        let pos = self.align.position().unwrap_or_default();
                        self.cursor += pos.offset(space);
                    }
                    if self.gap {
                        gap_after += unit;
                    }
                }
            }
        }

        let cross_extent = if fills_cross {
            max_cross
        } else {
            max_cross.min(size.cross(axis))
        };

        let limit = max_main + self.main_start();
        if self.cursor + extent > limit {
            extent = if atomic { 0 } else { (limit - self.cursor).max(0) };
        }

        let cross = self.cross_start() + self.pos.offset(max_cross - cross_extent);
        self.index += 1;

        let region = match axis {
            Axis::Horizontal => Region::new(self.cursor, cross, extent, cross_extent),
            Axis::Vertical => Region::new(cross, self.cursor, cross_extent, extent),
        };
        self.cursor += extent + gap_after;
        region
    }
}
