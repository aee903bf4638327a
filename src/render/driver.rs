//! Crossterm terminal output.
//!
//! The `Driver` wraps a buffered stdout writer and provides methods for
//! entering/leaving the alternate screen, applying cell updates, and
//! controlling the cursor. Color pairs are looked up in the table the backend
//! keeps of registered pairs; unknown pairs draw in the terminal's default
//! colors.

use std::collections::HashMap;
use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor, execute, queue,
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::style::{Color, Palette, PairId};

use super::surface::CellUpdate;

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Terminal output using crossterm.
///
/// Writes are queued into a `BufWriter<Stdout>`; call [`Driver::flush`] to
/// send them.
pub struct Driver {
    writer: BufWriter<Stdout>,
}

impl Driver {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            writer: BufWriter::new(io::stdout()),
        })
    }

    /// Enter the alternate screen and enable raw mode.
    pub fn enter_alt_screen(&mut self) -> io::Result<()> {
        execute!(self.writer, EnterAlternateScreen, Clear(ClearType::All))?;
        terminal::enable_raw_mode()?;
        Ok(())
    }

    /// Leave the alternate screen and disable raw mode.
    pub fn leave_alt_screen(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.writer, cursor::Show, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Queue a batch of cell updates.
    pub fn apply_updates(
        &mut self,
        updates: &[CellUpdate],
        pairs: &HashMap<PairId, Color>,
    ) -> io::Result<()> {
        let mut current = None;
        for update in updates {
            queue!(self.writer, cursor::MoveTo(update.x, update.y))?;
            let color = pairs.get(&update.cell.pair).copied().unwrap_or(Color::INHERIT);
            if current != Some(color) {
                queue!(self.writer, ResetColor)?;
                if let Some(fg) = color.fg {
                    queue!(self.writer, SetForegroundColor(terminal_color(fg)))?;
                }
                if let Some(bg) = color.bg {
                    queue!(self.writer, SetBackgroundColor(terminal_color(bg)))?;
                }
                current = Some(color);
            }
            queue!(self.writer, Print(update.cell.glyph))?;
        }
        queue!(self.writer, ResetColor)?;
        Ok(())
    }

    /// Clear the whole terminal.
    pub fn clear(&mut self) -> io::Result<()> {
        queue!(self.writer, ResetColor, Clear(ClearType::All))
    }

    /// Flush the internal write buffer to the terminal.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Terminal size (columns, rows).
    pub fn terminal_size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Show the cursor at a cell.
    pub fn show_cursor_at(&mut self, x: u16, y: u16) -> io::Result<()> {
        queue!(self.writer, cursor::MoveTo(x, y), cursor::Show)
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        queue!(self.writer, cursor::Hide)
    }
}

/// The crossterm color for a palette entry.
pub fn terminal_color(palette: Palette) -> style::Color {
    match palette {
        Palette::Black => style::Color::Black,
        Palette::DarkRed => style::Color::DarkRed,
        Palette::DarkGreen => style::Color::DarkGreen,
        Palette::DarkYellow => style::Color::DarkYellow,
        Palette::DarkBlue => style::Color::DarkBlue,
        Palette::Purple => style::Color::DarkMagenta,
        Palette::Aqua => style::Color::DarkCyan,
        Palette::Gray => style::Color::Grey,
        Palette::DarkGray => style::Color::DarkGrey,
        Palette::Red => style::Color::Red,
        Palette::Green => style::Color::Green,
        Palette::Yellow => style::Color::Yellow,
        Palette::Blue => style::Color::Blue,
        Palette::Magenta => style::Color::Magenta,
        Palette::Cyan => style::Color::Cyan,
        Palette::White => style::Color::White,
    }
}
