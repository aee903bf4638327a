//! Window forest: arena-backed windows, menus and path lookup.

pub mod node;
pub mod query;
#[allow(clippy::module_inception)]
pub mod tree;

pub use node::{Container, Frame, Grid, GridCell, Menu, MenuId, Text, Window, WindowId, WindowKind};
pub use tree::WindowTree;
