//! Crate-wide error type.

use std::result::Result as StdResult;

use thiserror::Error;

use crate::geometry::{Region, Size};

/// Errors surfaced by window construction, mutation and the backend.
#[derive(Error, Debug)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("backend: {0}")]
    Backend(String),
    #[error("could not create a surface for {0:?}")]
    Surface(Region),
    #[error("window handle is stale or unknown")]
    WindowNotFound,
    #[error("menu handle is stale or unknown")]
    MenuNotFound,
    #[error("window is not a {expected}")]
    WrongKind { expected: &'static str },
    #[error("grid size must be positive, got {0:?}")]
    InvalidGridSize(Size),
}

pub type Result<T> = StdResult<T, Error>;
