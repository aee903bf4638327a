//! Rendering pipeline: cell surfaces, the frame renderer, terminal driver.

pub mod driver;
pub mod frame;
pub mod surface;

pub use driver::Driver;
pub use surface::{Cell, CellUpdate, Surface, SurfaceId, Surfaces};
