//! The per-frame pipeline: update hooks, layout, drawing, cursor.
//!
//! Windows are drawn parent first. Each visible window owns a backend
//! surface at its rect; the parent's pixels are composited into it, the
//! window draws on top, and the result is composited back into the parent
//! (or the screen). Lists render back to front so that earlier windows end
//! up on top.

use tracing::trace;

use crate::app::Tui;
use crate::error::Result;
use crate::geometry::{Offset, Region};
use crate::layout::layout;
use crate::style::{Color, Palette, PairId};
use crate::text::{line_widths, segments, wrapped_height, Segment, StyleCode};
use crate::tree::{Container, Grid, Text, WindowId, WindowKind};

use super::surface::{Cell, SurfaceId};

const MASK: char = '*';

impl Tui {
    /// Lay out and draw one frame, then present it.
    pub fn render(&mut self) -> Result<()> {
        self.cursor = None;
        self.run_update_hooks();
        self.resize()?;

        let root = self.color;
        for menu in self.tree.menus.values_mut() {
            menu.resolved = menu.color.inherit_from(root);
        }
        let base = self
            .active_menu
            .and_then(|menu| self.tree.menu(menu))
            .map_or(root, |menu| menu.resolved);
        let screen = self.backend.screen();
        let pair = self.pair(base);
        self.backend.fill(screen, Cell::new(' ', pair));

        let roots = self.tree.roots().to_vec();
        for &id in roots.iter().rev() {
            self.render_window(id, None)?;
        }
        if let Some(menu) = self.active_menu {
            let windows = self.tree.top_level(Some(menu)).to_vec();
            for &id in windows.iter().rev() {
                self.render_window(id, None)?;
            }
        }

        match self.cursor {
            Some(Offset { x, y }) if self.size.contains(x, y) => {
                self.backend.set_cursor(x, y);
            }
            _ => {
                self.cursor = None;
                self.backend.hide_cursor();
            }
        }
        self.backend.present()?;
        trace!(width = self.size.width, height = self.size.height, "frame presented");
        Ok(())
    }

    /// Re-read the terminal size and lay everything out again.
    pub fn resize(&mut self) -> Result<()> {
        self.size = self.backend.terminal_size()?;
        layout(&mut self.tree, self.size, self.active_menu);
        Ok(())
    }

    fn run_update_hooks(&mut self) {
        let mut order = Vec::new();
        for &id in self.tree.roots() {
            order.extend(self.tree.pre_order(id));
        }
        if self.active_menu.is_some() {
            for &id in self.tree.top_level(self.active_menu) {
                order.extend(self.tree.pre_order(id));
            }
        }
        for id in order {
            self.fire(id, |h| h.update.clone());
        }
    }

    fn pair(&mut self, color: Color) -> PairId {
        self.pairs.pair(self.backend.as_mut(), color)
    }

    /// Color a window inherits from: its parent, its menu, or the root.
    fn inherited_color(&self, id: WindowId) -> Color {
        if let Some(parent) = self.tree.parent(id).and_then(|p| self.tree.get(p)) {
            return parent.frame.color;
        }
        self.tree
            .get(id)
            .and_then(|w| w.menu)
            .and_then(|menu| self.tree.menu(menu))
            .map_or(self.color, |menu| menu.resolved)
    }

    fn render_window(&mut self, id: WindowId, parent: Option<SurfaceId>) -> Result<()> {
        if !self.is_visible(id) {
            return Ok(());
        }
        self.fire(id, |h| h.render.clone());

        let Some(window) = self.tree.get(id) else {
            return Ok(());
        };
        let rect = window.frame.rect;
        let existing = window.surface;
        let requested = window.color;

        let surface = match existing {
            Some(surface) => {
                self.backend.resize_surface(surface, rect)?;
                surface
            }
            None => match self.backend.create_surface(rect)? {
                Some(surface) => {
                    if let Some(window) = self.tree.get_mut(id) {
                        window.surface = Some(surface);
                    }
                    surface
                }
                None => return Ok(()),
            },
        };
        let target = parent.unwrap_or_else(|| self.backend.screen());
        self.backend.composite(target, surface);

        let resolved = requested.inherit_from(self.inherited_color(id));
        let Some(window) = self.tree.get_mut(id) else {
            return Ok(());
        };
        window.frame.color = resolved;
        let kind = window.kind.clone();

        match kind {
            WindowKind::Container(container) => {
                if requested.bg.is_some() {
                    self.fill_body(surface, rect, container.shadow_size().to_region(), resolved);
                }
                self.draw_container(id, surface, rect, &container, resolved)?;
            }
            WindowKind::Text(text) => {
                if requested.bg.is_some() {
                    let pair = self.pair(resolved);
                    self.backend.fill(surface, Cell::new(' ', pair));
                }
                self.draw_text(id, surface, rect, &text, resolved);
            }
            WindowKind::Grid(grid) => {
                if requested.bg.is_some() {
                    let pair = self.pair(resolved);
                    self.backend.fill(surface, Cell::new(' ', pair));
                }
                self.draw_grid(surface, rect, &grid, resolved);
            }
        }

        self.backend.composite(surface, target);
        Ok(())
    }

    /// Fill everything but the shadow strip.
    fn fill_body(&mut self, surface: SurfaceId, rect: Region, shadow: Region, color: Color) {
        let pair = self.pair(color);
        for y in 0..rect.height - shadow.height {
            for x in 0..rect.width - shadow.width {
                self.backend.draw_char(surface, x, y, ' ', pair);
            }
        }
    }

    fn draw_container(
        &mut self,
        id: WindowId,
        surface: SurfaceId,
        rect: Region,
        container: &Container,
        resolved: Color,
    ) -> Result<()> {
        let shadow = container.shadow_size();
        let w = rect.width - shadow.width;
        let h = rect.height - shadow.height;

        if container.border.active && w > 0 && h > 0 {
            let (top_left, bottom_right) = container.border.bevel(resolved);
            let tl = self.pair(top_left);
            let br = self.pair(bottom_right);
            for x in 1..w - 1 {
                self.backend.draw_char(surface, x, 0, '─', tl);
                self.backend.draw_char(surface, x, h - 1, '─', br);
            }
            for y in 1..h - 1 {
                self.backend.draw_char(surface, 0, y, '│', tl);
                self.backend.draw_char(surface, w - 1, y, '│', br);
            }
            self.backend.draw_char(surface, 0, 0, '┌', tl);
            self.backend.draw_char(surface, w - 1, 0, '┐', br);
            self.backend.draw_char(surface, 0, h - 1, '└', tl);
            self.backend.draw_char(surface, w - 1, h - 1, '┘', br);
        }

        if container.shadow {
            let pair = self.pair(Color::bg(Palette::Black).inherit_from(resolved));
            for y in 1..rect.height {
                for x in (rect.width - 2).max(0)..rect.width {
                    self.backend.draw_char(surface, x, y, ' ', pair);
                }
            }
            for x in 2..rect.width {
                self.backend.draw_char(surface, x, rect.height - 1, ' ', pair);
            }
        }

        let children = self.tree.children(id).to_vec();
        for &child in children.iter().rev() {
            self.render_window(child, Some(surface))?;
        }
        Ok(())
    }

    fn draw_text(&mut self, id: WindowId, surface: SurfaceId, rect: Region, text: &Text, resolved: Color) {
        let Ok(height) = wrapped_height(text.plain(), rect.width.max(0) as usize) else {
            return;
        };
        if height == 0 {
            return;
        }
        let widths = line_widths(text.plain(), height);
        let active = self.active_window == Some(id);
        let y_shift = text.pos.offset(rect.height - height as i32);
        let line_shift = |y: usize| text.align.offset(rect.width - widths[y] as i32);

        let mut color = resolved;
        let (mut x, mut y) = (0usize, 0usize);
        let mut x_shift = line_shift(0);

        for segment in segments(text.string()) {
            match segment {
                Segment::Style(code) => match code {
                    StyleCode::Reset => color = resolved,
                    StyleCode::Cursor => {
                        if active && y < height {
                            self.cursor = Some(Offset::new(
                                rect.x + x_shift + x as i32,
                                rect.y + y_shift + y as i32,
                            ));
                        }
                    }
                    StyleCode::Foreground(palette) => color.fg = Some(palette),
                    StyleCode::Background(palette) => color.bg = Some(palette),
                    StyleCode::Ignored(_) => {}
                },
                Segment::Text(chunk) => {
                    for ch in chunk.chars() {
                        if y >= height {
                            break;
                        }
                        if x >= widths[y] {
                            x = 0;
                            y += 1;
                            if y < height {
                                x_shift = line_shift(y);
                            }
                            continue;
                        }
                        let glyph = if text.secret { MASK } else { ch };
                        let pair = self.pair(color);
                        self.backend.draw_char(
                            surface,
                            x_shift + x as i32,
                            y_shift + y as i32,
                            glyph,
                            pair,
                        );
                        x += 1;
                    }
                }
            }
        }
    }

    fn draw_grid(&mut self, surface: SurfaceId, rect: Region, grid: &Grid, resolved: Color) {
        let size = grid.size();
        let ox = ((rect.width - size.width) / 2).max(0);
        let oy = ((rect.height - size.height) / 2).max(0);
        for (y, row) in grid.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let pair = self.pair(cell.color.inherit_from(resolved));
                self.backend.draw_char(
                    surface,
                    ox + x as i32,
                    oy + y as i32,
                    cell.symbol.unwrap_or(' '),
                    pair,
                );
            }
        }
    }
}
