//! deband - Region-blend debanding for RGB24 frames
//!
//! Removes visible colour steps (banding) left by quantisation. The frame
//! is split into runs of identical colour; every pixel is then blended
//! toward the colours of the nearest neighbouring runs, with a weight that
//! falls off with distance, and optionally dithered.
//!
//! # Overview
//!
//! - Region labeling and label distance fields ([`region`])
//! - Exponent smoothing, compositing and the frame driver ([`filter`])
//! - PNG and PPM reading and writing ([`io`])
//!
//! # Example
//!
//! ```
//! use deband::{ConstantDither, DebandOptions, Rgb, RgbImage, deband_image};
//!
//! let image = RgbImage::from_fn(16, 4, |x, _| {
//!     if x < 8 { Rgb::new(60, 60, 60) } else { Rgb::new(62, 62, 62) }
//! })
//! .unwrap();
//! let out = deband_image(&image, &DebandOptions::default(), &mut ConstantDither(0.5)).unwrap();
//! assert_eq!(out.get_rgb(7, 0), Some(Rgb::new(61, 61, 61)));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use deband_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use deband_filter as filter;
pub use deband_io as io;
pub use deband_region as region;

// The driver is the entry point most callers need
pub use deband_filter::{
    ConstantDither, Deband, DebandOptions, DitherSource, FilterError, FilterResult,
    RandomDither, deband_frame, deband_image, deband_in_place,
};
