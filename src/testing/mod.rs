//! Headless testing framework: Pilot, snapshot helpers.
//!
//! Use the [`Pilot`] to drive a [`Tui`](crate::Tui) without a real terminal.
//! Use [`surface_to_string`] and related helpers to capture rendered output
//! as plain text for snapshot-style assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{lines_to_string, screen_to_string, surface_to_string};
