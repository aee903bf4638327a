//! Snapshot rendering helpers.
//!
//! Functions for turning rendered surfaces into plain-text strings suitable
//! for snapshot testing and assertions.

use crate::backend::HeadlessBackend;
use crate::render::surface::Surface;
use crate::Tui;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Convert a surface to text.
///
/// Each row becomes one line with trailing spaces trimmed. Lines are
/// separated by `'\n'`; the last line has no trailing newline.
pub fn surface_to_string(surface: &Surface) -> String {
    lines_to_string(&surface.lines())
}

/// Join rows, trimming trailing spaces from each.
pub fn lines_to_string(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text of the screen a headless [`Tui`] presented last.
///
/// Returns an empty string when the backend is not a [`HeadlessBackend`].
pub fn screen_to_string(tui: &Tui) -> String {
    tui.backend_as::<HeadlessBackend>()
        .map(|backend| surface_to_string(backend.screen_surface()))
        .unwrap_or_default()
}

// ===========================================================================
// Tests
// ===========================================================================
