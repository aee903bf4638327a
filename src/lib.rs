//! # tui-forest
//!
//! A retained-mode terminal widget toolkit.
//!
//! Applications build a forest of windows (containers, reflowing text blocks
//! and character grids), optionally grouped into menus. Every frame the
//! toolkit sizes the forest bottom-up, places it top-down, draws it through a
//! [`Backend`](backend::Backend), and routes keys along the focus chain.
//!
//! ## Core Systems
//!
//! - **[`geometry`]**: Offset, Size, Region, Spacing, requested Rect, Axis
//! - **[`text`]**: Greedy word wrap and inline style escapes
//! - **[`style`]**: 16-color palette, inheritable colors, borders, pair cache
//! - **[`tree`]**: Slotmap-backed window forest with path search
//! - **[`layout`]**: Size pass and rect pass with alignment, growth, gaps
//! - **[`render`]**: Cell surfaces, the frame renderer and the crossterm driver
//! - **[`event`]**: Keys, lifecycle hooks, key routing, focus and tab order
//! - **[`widgets`]**: Input and List helpers
//! - **[`app`]**: The [`Tui`] root and its main loop
//! - **[`testing`]**: Headless Pilot and snapshot helpers
//!
//! ```
//! use tui_forest::config::{ConfigExt, ContainerConfig, TextConfig};
//! use tui_forest::style::{Border, Depth};
//! use tui_forest::testing::Pilot;
//! use tui_forest::Owner;
//!
//! let mut pilot = Pilot::new(12, 3);
//! let tui = pilot.tui_mut();
//! let frame = tui
//!     .create_container(Owner::Root, ContainerConfig::new().with_border(Border::new(Depth::None)))
//!     .unwrap();
//! tui.create_text(frame, TextConfig::new("hello")).unwrap();
//! pilot.render().unwrap();
//! assert_eq!(pilot.screen_text(), "┌─────┐\n│hello│\n└─────┘");
//! ```

// Foundation
pub mod error;
pub mod geometry;

// Core systems
pub mod layout;
pub mod style;
pub mod text;
pub mod tree;

// Configuration and events
pub mod config;
pub mod event;

// Rendering
pub mod backend;
pub mod render;

// Application
pub mod app;
pub mod widgets;

// Test support
pub mod testing;

pub use app::{Owner, Tui, TuiConfig};
pub use error::{Error, Result};
pub use tree::{MenuId, WindowId};
