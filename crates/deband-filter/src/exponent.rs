//! Blend exponent fields
//!
//! Each pixel gets two exponents, one for its nearest and one for its
//! second-nearest foreign region. The seed value compares how often the
//! foreign label appears in the nearest (or second-nearest) label field with
//! the size of the pixel's own region:
//!
//! ```text
//! e = min(0.25 * count_near[near_label] / count_own[own_label], 0.5)
//! ```
//!
//! Both fields are then smoothed with a tent kernel so the exponent varies
//! gradually across region boundaries.

use crate::convolve::convolve_field_in_place;
use crate::{FilterResult, Kernel};
use deband_core::FloatField;
use deband_core::buffer::try_filled;
use deband_region::{DistanceField, RegionLabels, label_histogram};

/// Upper bound of a seed exponent
pub const MAX_EXPONENT: f32 = 0.5;

const POPULATION_SCALE: f32 = 0.25;

/// Smoothed exponents for the nearest and second-nearest blend stages
#[derive(Debug, Clone)]
pub struct ExponentFields {
    /// Exponent of the nearest-label blend
    pub nearest: FloatField,
    /// Exponent of the second-nearest-label blend
    pub second: FloatField,
}

/// Compute the unsmoothed exponent fields.
pub fn seed_exponents(
    regions: &RegionLabels,
    distances: &DistanceField,
) -> FilterResult<ExponentFields> {
    let (width, height) = regions.labels().dimensions();
    let max_label = regions.max_label();
    let pixel_count = regions.labels().len();

    let mut near_labels = try_filled(pixel_count, 0u32)?;
    let mut second_labels = try_filled(pixel_count, 0u32)?;
    for ((cell, near), second) in distances
        .data()
        .iter()
        .zip(near_labels.iter_mut())
        .zip(second_labels.iter_mut())
    {
        *near = cell.nearest.label;
        *second = cell.second.label;
    }

    let own_hist = label_histogram(regions.labels().data(), max_label)?;
    let near_hist = label_histogram(&near_labels, max_label)?;
    let second_hist = label_histogram(&second_labels, max_label)?;

    let mut nearest = FloatField::new(width, height, 0.0)?;
    let mut second = FloatField::new(width, height, 0.0)?;
    for (i, &own) in regions.labels().data().iter().enumerate() {
        let own_count = own_hist[own as usize] as f32;
        nearest.data_mut()[i] = seed(near_hist[near_labels[i] as usize], own_count);
        second.data_mut()[i] = seed(second_hist[second_labels[i] as usize], own_count);
    }

    Ok(ExponentFields { nearest, second })
}

#[inline]
fn seed(foreign_count: u32, own_count: f32) -> f32 {
    (POPULATION_SCALE * foreign_count as f32 / own_count).min(MAX_EXPONENT)
}

/// Compute both exponent fields and smooth them with `kernel`.
pub fn build_exponent_fields(
    regions: &RegionLabels,
    distances: &DistanceField,
    kernel: &Kernel,
) -> FilterResult<ExponentFields> {
    let mut fields = seed_exponents(regions, distances)?;
    convolve_field_in_place(&mut fields.nearest, kernel)?;
    convolve_field_in_place(&mut fields.second, kernel)?;
    tracing::trace!(kernel = kernel.width(), "smoothed exponent fields");
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use deband_core::{Rgb, RgbImage};
    use deband_region::{label_distance, label_regions};

    fn split(width: u32, height: u32, left: u32) -> (RegionLabels, DistanceField) {
        let img = RgbImage::from_fn(width, height, |x, _| {
            if x < left {
                Rgb::new(50, 50, 50)
            } else {
                Rgb::new(60, 60, 60)
            }
        })
        .unwrap();
        let regions = label_regions(&img).unwrap();
        let distances = label_distance(&regions).unwrap();
        (regions, distances)
    }

    #[test]
    fn test_seed_population_ratio() {
        // left region 2 columns, right region 6 columns, 4 rows
        let (regions, distances) = split(8, 4, 2);
        let seeds = seed_exponents(&regions, &distances).unwrap();
        // every left pixel has nearest = right label, which appears as the
        // nearest label of the 8 left pixels; own count is 8
        assert!((seeds.nearest.get(0, 0).unwrap() - 0.25).abs() < 1e-6);
        // right pixels: nearest = left label, appearing 24 times; own 24
        assert!((seeds.nearest.get(7, 3).unwrap() - 0.25).abs() < 1e-6);
        // no second label anywhere: 32 unlabelled entries over own count
        assert!((seeds.second.get(0, 0).unwrap() - 0.5).abs() < 1e-6);
        assert!((seeds.second.get(7, 0).unwrap() - 0.25 * 32.0 / 24.0).abs() < 1e-6);
    }

    #[test]
    fn test_seed_is_capped() {
        let (regions, distances) = split(8, 2, 1);
        let seeds = seed_exponents(&regions, &distances).unwrap();
        assert!(seeds.nearest.data().iter().all(|&e| e <= MAX_EXPONENT));
        assert!(seeds.second.data().iter().all(|&e| e >= 0.0));
    }

    #[test]
    fn test_smoothed_constant_stays_constant() {
        let (regions, distances) = split(8, 4, 2);
        let fields = build_exponent_fields(&regions, &distances, &Kernel::tent(3)).unwrap();
        assert!(fields.nearest.data().iter().all(|&e| (e - 0.25).abs() < 1e-5));
    }
}
