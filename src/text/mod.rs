//! Text reflow and inline style escapes.

pub mod escape;
pub mod reflow;

pub use escape::{plain_text, segments, Segment, StyleCode};
pub use reflow::{line_widths, minimal_width, wrapped_height, WrapImpossible};
