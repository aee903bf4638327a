//! Size pass: intrinsic size of every window, children before parents.

use tracing::debug;

use crate::geometry::{Rect, Size};
use crate::text::{minimal_width, wrapped_height};
use crate::tree::{WindowId, WindowKind, WindowTree};

/// Measure each window of `list` and its subtree against the screen size.
pub fn measure(tree: &mut WindowTree, list: &[WindowId], screen: Size) {
    for &id in list {
        measure_window(tree, id, screen);
    }
}

/// Measure one window and its subtree. Stores the result in the frame.
pub fn measure_window(tree: &mut WindowTree, id: WindowId, screen: Size) -> Size {
    let children = tree.children(id).to_vec();
    for &child in &children {
        measure_window(tree, child, screen);
    }

    let Some(window) = tree.get(id) else {
        return Size::ZERO;
    };
    let fixed = window.rect.fixed().map(|r| r.size().clamp_positive());

    let mut unwrappable = false;
    let size = match &window.kind {
        WindowKind::Text(text) => match fixed {
            Some(size) => size,
            None if text.plain().is_empty() => Size::new(1, 1),
            None => match wrapped_height(text.plain(), screen.width.max(0) as usize) {
                Ok(height) => {
                    let width = minimal_width(text.plain(), height);
                    Size::new(width as i32, height as i32)
                }
                Err(_) => {
                    debug!(?id, width = screen.width, "text cannot wrap at screen width");
                    unwrappable = true;
                    Size::ZERO
                }
            },
        },
        WindowKind::Grid(grid) => fixed.unwrap_or_else(|| grid.size()),
        WindowKind::Container(container) => match fixed {
            Some(size) => size,
            None if children.is_empty() => Size::ZERO,
            None => {
                let axis = container.axis;
                let mut max_size = Size::ZERO;
                let mut main = 0;
                let mut cross = 0;
                let mut count = 0;

                for &child in &children {
                    let Some(child) = tree.get(child) else { continue };
                    if child.hidden || child.frame.unwrappable {
                        continue;
                    }
                    let measured = child.frame.size;
                    if !child.contain {
                        max_size = max_size.max(measured);
                    }
                    match child.rect {
                        Rect::Fixed(region) => {
                            max_size = max_size.max(Size::new(
                                region.x + region.width,
                                region.y + region.height,
                            ));
                        }
                        Rect::Auto => {
                            count += 1;
                            main += measured.main(axis);
                            if !child.contain {
                                cross = cross.max(measured.cross(axis));
                            }
                        }
                    }
                }

                if container.gap && count > 1 {
                    main += (count - 1) * axis.gap_unit();
                }
                let aligned = Size::from_axis(axis, main, cross) + container.insets().size();
                max_size.max(aligned)
            }
        },
    };

    if let Some(window) = tree.get_mut(id) {
        window.frame.size = size;
        window.frame.unwrappable = unwrappable;
    }
    size
}
