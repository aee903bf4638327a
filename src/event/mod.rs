//! Keys, lifecycle hooks, key routing and focus.

pub mod focus;
pub mod hooks;
pub mod key;
pub mod router;

pub use hooks::{Hook, Hooks, KeyHook};
pub use key::{from_crossterm, Key, KeyEvent, Modifiers};
