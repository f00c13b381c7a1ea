//! deband-filter - Region-blend deband filter
//!
//! This crate provides the back half of the pipeline and the frame driver:
//!
//! - Tent kernels and clamp-to-edge convolution of scalar fields
//! - Exponent fields derived from label populations
//! - The compositor that blends each pixel toward its neighbouring regions
//! - [`DebandOptions`] and the [`deband_frame`] / [`deband_in_place`] /
//!   [`deband_image`] entry points
//!
//! Dithering is injected through [`DitherSource`], so runs can be made
//! reproducible with a seeded generator.
//!
//! # Examples
//!
//! ```
//! use deband_core::{Rgb, RgbImage};
//! use deband_filter::{Deband, DebandOptions, RandomDither};
//!
//! let image = RgbImage::from_fn(32, 8, |x, _| {
//!     let v = 120 + (x / 8) as u8;
//!     Rgb::new(v, v, v)
//! })
//! .unwrap();
//!
//! let mut filter = Deband::new(DebandOptions::default(), RandomDither::from_seed(1)).unwrap();
//! let out = filter.filter_image(&image).unwrap();
//! assert_eq!(out.dimensions(), (32, 8));
//! ```

pub mod blend;
pub mod convolve;
pub mod deband;
pub mod dither;
mod error;
pub mod exponent;
pub mod kernel;
pub mod options;

pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;

// Re-export commonly used functions
pub use blend::{BlendParams, BlendStats, composite, quantize_channel};
pub use convolve::{convolve_field, convolve_field_in_place};
pub use deband::{Deband, deband_frame, deband_image, deband_in_place};
pub use dither::{ConstantDither, DitherSource, RandomDither};
pub use exponent::{ExponentFields, build_exponent_fields, seed_exponents};
pub use options::DebandOptions;
