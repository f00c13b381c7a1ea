//! Filter options
//!
//! The four user-facing parameters and their automatic resolution from the
//! frame width.

use crate::kernel::{MEDIUM_FRAME, WIDE_FRAME, auto_kernel_size, odd_kernel_size};
use crate::{FilterError, FilterResult};
use std::ops::RangeInclusive;

/// Allowed colour distances
pub const COLOUR_DIST_RANGE: RangeInclusive<f32> = 0.0..=30.0;
/// Allowed spatial distances (`-1` selects automatically)
pub const SPATIAL_DIST_RANGE: RangeInclusive<i32> = -1..=40;
/// Allowed dither strengths
pub const DITHER_STRENGTH_RANGE: RangeInclusive<f32> = 0.0..=10.0;
/// Allowed kernel sizes (`-1` selects automatically)
pub const KERNEL_SIZE_RANGE: RangeInclusive<i32> = -1..=9;

/// Value of `spatial_dist` and `kernel_size` that selects by frame width
pub const AUTO: i32 = -1;

/// Options of the deband filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebandOptions {
    /// Largest RGB distance between two regions that are blended
    pub colour_dist: f32,
    /// Blend radius in pixels, or [`AUTO`]
    pub spatial_dist: i32,
    /// Amplitude of the dither noise
    pub dither_strength: f32,
    /// Size of the exponent smoothing kernel, or [`AUTO`]
    pub kernel_size: i32,
}

impl Default for DebandOptions {
    fn default() -> Self {
        Self {
            colour_dist: 5.0,
            spatial_dist: AUTO,
            dither_strength: 1.0,
            kernel_size: AUTO,
        }
    }
}

impl DebandOptions {
    /// Set the colour distance.
    pub fn with_colour_dist(mut self, colour_dist: f32) -> Self {
        self.colour_dist = colour_dist;
        self
    }

    /// Set the spatial distance.
    pub fn with_spatial_dist(mut self, spatial_dist: i32) -> Self {
        self.spatial_dist = spatial_dist;
        self
    }

    /// Set the dither strength.
    pub fn with_dither_strength(mut self, dither_strength: f32) -> Self {
        self.dither_strength = dither_strength;
        self
    }

    /// Set the kernel size.
    pub fn with_kernel_size(mut self, kernel_size: i32) -> Self {
        self.kernel_size = kernel_size;
        self
    }

    /// Check every option against its range.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidParameters` naming the first option out
    /// of range.
    pub fn validate(&self) -> FilterResult<()> {
        if !COLOUR_DIST_RANGE.contains(&self.colour_dist) {
            return Err(out_of_range("colour_dist", self.colour_dist, &COLOUR_DIST_RANGE));
        }
        if !SPATIAL_DIST_RANGE.contains(&self.spatial_dist) {
            return Err(out_of_range("spatial_dist", self.spatial_dist, &SPATIAL_DIST_RANGE));
        }
        if !DITHER_STRENGTH_RANGE.contains(&self.dither_strength) {
            return Err(out_of_range(
                "dither_strength",
                self.dither_strength,
                &DITHER_STRENGTH_RANGE,
            ));
        }
        if !KERNEL_SIZE_RANGE.contains(&self.kernel_size) {
            return Err(out_of_range("kernel_size", self.kernel_size, &KERNEL_SIZE_RANGE));
        }
        Ok(())
    }

    /// Blend radius in pixels for a frame of the given width.
    ///
    /// Automatic selection gives 13 above 1200 pixels, 7 above 720, else 3.
    pub fn resolved_spatial_distance(&self, frame_width: u32) -> u32 {
        match u32::try_from(self.spatial_dist) {
            Ok(radius) => radius,
            Err(_) if frame_width > WIDE_FRAME => 13,
            Err(_) if frame_width > MEDIUM_FRAME => 7,
            Err(_) => 3,
        }
    }

    /// Odd kernel size, at least 3, for a frame of the given width.
    pub fn resolved_kernel_size(&self, frame_width: u32) -> u32 {
        match u32::try_from(self.kernel_size) {
            Ok(size) => odd_kernel_size(size),
            Err(_) => odd_kernel_size(auto_kernel_size(frame_width)),
        }
    }
}

fn out_of_range<T: std::fmt::Display>(
    name: &str,
    value: T,
    range: &RangeInclusive<T>,
) -> FilterError {
    FilterError::InvalidParameters(format!(
        "{name} = {value} outside [{}, {}]",
        range.start(),
        range.end()
    ))
}
