//! deband-region - Region analysis for the deband filter
//!
//! This crate provides the region stage of the pipeline:
//!
//! - **Region labeling** - Dense labels for 8-connected runs of one colour
//! - **Region statistics** - Representative colours and label histograms
//! - **Label distance** - Nearest and second-nearest foreign label of each
//!   pixel, measured along paths that stay inside the pixel's region
//!
//! # Examples
//!
//! ```
//! use deband_core::{Rgb, RgbImage};
//! use deband_region::{label_distance, label_regions, region_colours};
//!
//! let image = RgbImage::from_fn(6, 2, |x, _| {
//!     if x < 3 { Rgb::new(100, 100, 100) } else { Rgb::new(102, 102, 102) }
//! })
//! .unwrap();
//!
//! let regions = label_regions(&image).unwrap();
//! assert_eq!(regions.max_label(), 2);
//!
//! let colours = region_colours(&image, &regions).unwrap();
//! assert_eq!(colours.get(2), Some(Rgb::new(102, 102, 102)));
//!
//! let distances = label_distance(&regions).unwrap();
//! assert_eq!(distances.get(2, 0).unwrap().nearest.distance, 5);
//! ```

pub mod distance;
pub mod error;
pub mod label;
pub mod stats;
pub mod sweep;

// Re-export core types
pub use deband_core;

pub use error::{RegionError, RegionResult};

pub use distance::{DistanceField, LabelDistance, NearestLabels, UNREACHED, label_distance};
pub use label::{RegionLabels, colour_keys, label_keys, label_regions};
pub use stats::{ColourTable, label_histogram, region_colours};
pub use sweep::{AXIAL_COST, DIAGONAL_COST, Step, Sweep};
