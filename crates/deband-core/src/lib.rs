//! deband-core - Basic data structures for the deband filter
//!
//! This crate provides the containers shared by every stage of the
//! pipeline:
//!
//! - [`Rgb`] - One RGB24 pixel and its colour metrics
//! - [`RgbImage`] - Owned packed RGB24 image
//! - [`FrameRef`] / [`FrameMut`] - Views over strided caller storage
//! - [`Field`] - Per-pixel 2D array (labels, exponents, distances)
//!
//! All scratch storage sized by the pixel count is allocated through
//! [`buffer`], so exhausting memory is reported as an error.

pub mod buffer;
pub mod error;
pub mod field;
pub mod image;
pub mod rgb;

pub use error::{Error, Result};
pub use field::{Field, FloatField, LabelField};
pub use image::{BYTES_PER_PIXEL, FrameMut, FrameRef, RgbImage};
pub use rgb::Rgb;
