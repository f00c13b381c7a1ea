//! Per-region statistics
//!
//! Representative colours and label histograms.

use crate::error::{RegionError, RegionResult};
use crate::label::RegionLabels;
use deband_core::buffer::try_filled;
use deband_core::{Rgb, RgbImage};

/// Representative colour of every region, indexed by label.
///
/// Slot 0 is unused and holds black.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColourTable {
    colours: Vec<Rgb>,
}

impl ColourTable {
    /// Colour of region `label`, or `None` for label 0 or an unknown label.
    #[inline]
    pub fn get(&self, label: u32) -> Option<Rgb> {
        if label == 0 {
            return None;
        }
        self.colours.get(label as usize).copied()
    }

    /// Number of regions
    #[inline]
    pub fn len(&self) -> usize {
        self.colours.len().saturating_sub(1)
    }

    /// True if the table holds no region
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Record the colour of every region.
///
/// Every pixel of a region has the same colour, so the first sample in
/// row-major order is taken.
///
/// # Errors
///
/// Returns `RegionError::SizeMismatch` if labels and image differ in size.
pub fn region_colours(image: &RgbImage, regions: &RegionLabels) -> RegionResult<ColourTable> {
    check_size(image, regions)?;

    let mut colours = try_filled(regions.max_label() as usize + 1, Rgb::BLACK)?;
    let mut seen = try_filled(regions.max_label() as usize + 1, false)?;
    for (&label, colour) in regions.labels().data().iter().zip(image.pixels()) {
        let slot = label as usize;
        if !seen[slot] {
            seen[slot] = true;
            colours[slot] = colour;
        }
    }

    Ok(ColourTable { colours })
}

/// Count how often each label occurs.
///
/// The result has `max_label + 1` entries; entry 0 counts unlabelled
/// pixels.
///
/// # Errors
///
/// Returns `RegionError::LabelOutOfRange` for a label above `max_label`.
pub fn label_histogram(labels: &[u32], max_label: u32) -> RegionResult<Vec<u32>> {
    let mut hist = try_filled(max_label as usize + 1, 0u32)?;
    for &label in labels {
        match hist.get_mut(label as usize) {
            Some(count) => *count += 1,
            None => return Err(RegionError::LabelOutOfRange { label, max_label }),
        }
    }
    Ok(hist)
}

pub(crate) fn check_size(image: &RgbImage, regions: &RegionLabels) -> RegionResult<()> {
    let labels = (regions.width(), regions.height());
    if labels != image.dimensions() {
        return Err(RegionError::SizeMismatch {
            labels,
            image: image.dimensions(),
        });
    }
    Ok(())
}
