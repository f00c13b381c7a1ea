//! Synthetic banded images
//!
//! Smooth gradients quantised to a few levels are the input the filter is
//! built for. These generators produce them deterministically so tests
//! need no image files.

use crate::TestResult;
use deband_core::{Rgb, RgbImage};

/// Horizontal grey ramp split into `bands` equal-width flat bands.
///
/// Column `x` belongs to band `x * bands / width`; band `i` has grey level
/// `i * 256 / bands`.
pub fn banded_ramp(width: u32, height: u32, bands: u32) -> TestResult<RgbImage> {
    let bands = bands.clamp(1, 256);
    let image = RgbImage::from_fn(width, height, |x, _| {
        let band = x as u64 * bands as u64 / width as u64;
        let level = (band * 256 / bands as u64) as u8;
        Rgb::new(level, level, level)
    })?;
    Ok(image)
}

/// Concentric rings around the image centre, `ring_width` pixels wide, with
/// neighbouring rings one grey level apart starting from `base`.
pub fn radial_bands(width: u32, height: u32, ring_width: u32, base: u8) -> TestResult<RgbImage> {
    let ring_width = ring_width.max(1) as f32;
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let image = RgbImage::from_fn(width, height, |x, y| {
        let dx = x as f32 + 0.5 - cx;
        let dy = y as f32 + 0.5 - cy;
        let ring = ((dx * dx + dy * dy).sqrt() / ring_width) as u32;
        let level = (base as u32 + ring).min(255) as u8;
        Rgb::new(level, level / 2, 255 - level)
    })?;
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banded_ramp() {
        let img = banded_ramp(8, 2, 4).unwrap();
        let levels: Vec<u8> = (0..8).map(|x| img.get_rgb(x, 1).unwrap().r).collect();
        assert_eq!(levels, vec![0, 0, 64, 64, 128, 128, 192, 192]);
    }

    #[test]
    fn test_radial_bands_centre() {
        let img = radial_bands(9, 9, 2, 100).unwrap();
        assert_eq!(img.get_rgb(4, 4).unwrap().r, 100);
        assert!(img.get_rgb(0, 0).unwrap().r > 100);
    }
}
