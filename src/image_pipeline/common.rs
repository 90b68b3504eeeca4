//! Common utilities module
//!
//! Shared error type and the borrowed image views every stage of the
//! pipeline passes around.

pub mod error;
pub mod image;

pub use error::{PipelineError, Result};
pub use image::{ImageView, ImageViewMut, Rect};
