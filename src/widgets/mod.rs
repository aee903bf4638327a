//! Stateful helpers built on text windows and focus: Input, List.

pub mod input;
pub mod list;

pub use input::Input;
pub use list::List;
