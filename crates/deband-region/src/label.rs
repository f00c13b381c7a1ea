//! Region labeling
//!
//! Assigns every maximal 8-connected run of identical colour its own label.
//! Labels are dense: `1..=max_label`, numbered in order of first appearance
//! in a row-major scan. Label `0` never appears in a finished field.
//!
//! # Algorithm
//!
//! Every pixel is reduced to its integer colour key ([`deband_core::Rgb::key`]). Forward
//! and backward raster sweeps then lower each pixel's provisional label to
//! the smallest label among its already-visited same-key neighbours (forward:
//! left, up, up-left, up-right; backward: the mirrored four). A pixel with
//! no labelled same-key neighbour on the first forward sweep receives a
//! fresh provisional label. Sweep pairs repeat until nothing changes, which
//! resolves U- and S-shaped regions that a single pair cannot merge.

use crate::error::{RegionError, RegionResult};
use crate::sweep::Sweep;
use deband_core::buffer::try_filled;
use deband_core::{Field, LabelField, RgbImage};

/// Dense region labels for one image
#[derive(Debug, Clone)]
pub struct RegionLabels {
    labels: LabelField,
    max_label: u32,
}

impl RegionLabels {
    /// Wrap a label field after checking that its labels are dense.
    ///
    /// # Errors
    ///
    /// Returns `RegionError::LabelOutOfRange` if a label is `0` or exceeds
    /// `max_label`.
    pub fn new(labels: LabelField, max_label: u32) -> RegionResult<Self> {
        if let Some(&label) = labels
            .data()
            .iter()
            .find(|&&l| l == 0 || l > max_label)
        {
            return Err(RegionError::LabelOutOfRange { label, max_label });
        }
        Ok(Self { labels, max_label })
    }

    /// The label field
    #[inline]
    pub fn labels(&self) -> &LabelField {
        &self.labels
    }

    /// Highest label, equal to the number of regions
    #[inline]
    pub fn max_label(&self) -> u32 {
        self.max_label
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.labels.width()
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.labels.height()
    }

    /// Label at (x, y)
    #[inline]
    pub fn label_at(&self, x: u32, y: u32) -> Option<u32> {
        self.labels.get(x, y)
    }
}

/// Compute the colour key `r + 256 g + 65536 b` of every pixel.
pub fn colour_keys(image: &RgbImage) -> RegionResult<Field<u32>> {
    let mut keys = Field::new(image.width(), image.height(), 0u32)?;
    for (key, colour) in keys.data_mut().iter_mut().zip(image.pixels()) {
        *key = colour.key();
    }
    Ok(keys)
}

/// Label the same-colour regions of an RGB image.
///
/// # Examples
///
/// ```
/// use deband_core::{Rgb, RgbImage};
/// use deband_region::label_regions;
///
/// let image = RgbImage::from_fn(4, 4, |x, _| {
///     if x < 2 { Rgb::new(10, 10, 10) } else { Rgb::new(20, 20, 20) }
/// })
/// .unwrap();
/// let regions = label_regions(&image).unwrap();
/// assert_eq!(regions.max_label(), 2);
/// assert_eq!(regions.label_at(0, 3), Some(1));
/// assert_eq!(regions.label_at(3, 0), Some(2));
/// ```
pub fn label_regions(image: &RgbImage) -> RegionResult<RegionLabels> {
    let keys = colour_keys(image)?;
    label_keys(&keys)
}

/// Label the connected runs of equal keys in a key field.
pub fn label_keys(keys: &Field<u32>) -> RegionResult<RegionLabels> {
    let (width, height) = keys.dimensions();
    let mut provisional = Field::new(width, height, 0u32)?;
    let mut next_label = 1u32;
    let mut iterations = 0u32;

    loop {
        iterations += 1;
        let forward = propagate(keys, &mut provisional, Sweep::Forward, &mut next_label);
        let backward = propagate(keys, &mut provisional, Sweep::Backward, &mut next_label);
        if !forward && !backward {
            break;
        }
    }

    let regions = relabel_dense(provisional, next_label)?;
    tracing::debug!(
        width,
        height,
        iterations,
        regions = regions.max_label,
        "labelled colour regions"
    );
    Ok(regions)
}

/// One raster sweep. Returns true if any label changed.
fn propagate(keys: &Field<u32>, labels: &mut LabelField, sweep: Sweep, next_label: &mut u32) -> bool {
    let (width, height) = labels.dimensions();
    let mut changed = false;

    sweep.visit(width, height, |x, y| {
        let i = labels.index(x, y);
        let key = keys.data()[i];
        let mut best = labels.data()[i];

        for step in sweep.steps() {
            if let Some(n) = labels.offset_index(x, y, step.dx, step.dy) {
                let neighbour = labels.data()[n];
                if neighbour != 0 && keys.data()[n] == key && (best == 0 || neighbour < best) {
                    best = neighbour;
                }
            }
        }

        if best == 0 {
            best = *next_label;
            *next_label += 1;
        }

        if best != labels.data()[i] {
            labels.data_mut()[i] = best;
            changed = true;
        }
    });

    changed
}

/// Map provisional labels onto `1..=n` in row-major order of first
/// appearance.
fn relabel_dense(mut labels: LabelField, label_bound: u32) -> RegionResult<RegionLabels> {
    let mut mapping = try_filled(label_bound as usize, 0u32)?;
    let mut current = 0u32;

    for label in labels.data_mut().iter_mut() {
        let slot = &mut mapping[*label as usize];
        if *slot == 0 {
            current += 1;
            *slot = current;
        }
        *label = *slot;
    }

    Ok(RegionLabels {
        labels,
        max_label: current,
    })
}
