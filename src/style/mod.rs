//! Colors, borders and the color pair cache.

pub mod color;
pub mod pairs;

pub use color::{Border, Color, Depth, Palette};
pub use pairs::{ColorPairs, PairId};
