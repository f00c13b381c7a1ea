//! Compositor
//!
//! Rebuilds every pixel from its region's representative colour, pulled
//! toward the colour of the nearest foreign region and then toward the
//! second-nearest one. A stage only blends when
//!
//! - the foreign region lies within the spatial limit,
//! - its colour differs from the base by less than the colour threshold,
//! - neither colour is black (squared magnitude below 1).
//!
//! The blend weight of a stage is
//! `clamp(0.5 / (distance / 5)^exponent + amp * (u - 0.5), 0, 1)` with `u`
//! drawn from a [`DitherSource`].

use crate::dither::DitherSource;
use crate::exponent::ExponentFields;
use crate::{FilterError, FilterResult};
use deband_core::{Rgb, RgbImage};
use deband_region::{AXIAL_COST, ColourTable, DistanceField, LabelDistance, RegionError, RegionLabels};

/// Dither amplitude of the second-nearest stage relative to the first.
pub const SECOND_DITHER_SCALE: f32 = 0.1;

/// Thresholds and noise level of the compositor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendParams {
    /// Squared RGB distance below which two colours may blend
    pub colour_dist_sq: f32,
    /// Largest distance-field value that may blend
    pub spatial_limit: u32,
    /// Amplitude of the dither added to the nearest-stage weight
    pub dither_strength: f32,
}

impl BlendParams {
    /// Build from a colour distance, a spatial radius in pixels and a
    /// dither strength.
    pub fn new(colour_dist: f32, spatial_radius: u32, dither_strength: f32) -> Self {
        Self {
            colour_dist_sq: colour_dist * colour_dist,
            spatial_limit: spatial_radius.saturating_mul(AXIAL_COST),
            dither_strength,
        }
    }
}

/// Blend counts of one composite pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlendStats {
    /// Pixels blended toward their nearest region
    pub nearest: usize,
    /// Pixels blended toward their second-nearest region
    pub second: usize,
}

/// Composite the output image.
///
/// # Errors
///
/// Returns `FilterError::InvalidParameters` if the inputs disagree in size
/// and `FilterError::Region` if a label has no colour.
pub fn composite<D: DitherSource + ?Sized>(
    regions: &RegionLabels,
    colours: &ColourTable,
    distances: &DistanceField,
    exponents: &ExponentFields,
    params: &BlendParams,
    dither: &mut D,
) -> FilterResult<(RgbImage, BlendStats)> {
    let dims = regions.labels().dimensions();
    if distances.dimensions() != dims
        || exponents.nearest.dimensions() != dims
        || exponents.second.dimensions() != dims
    {
        return Err(FilterError::InvalidParameters(format!(
            "field sizes disagree with labels {dims:?}"
        )));
    }

    let (width, height) = dims;
    let mut out = RgbImage::new(width, height)?;
    let mut stats = BlendStats::default();
    let max_label = regions.max_label();
    let colour_of = |label: u32| {
        colours
            .get(label)
            .ok_or(RegionError::LabelOutOfRange { label, max_label })
    };

    for y in 0..height {
        for x in 0..width {
            let i = regions.labels().index(x, y);
            let own = colour_of(regions.labels().data()[i])?;
            let cell = distances.data()[i];
            let mut value = own.to_f32();

            if let Some(near_label) = cell.nearest.label() {
                let near = colour_of(near_label)?;
                let low_amp = own.magnitude_sq() < 1 || near.magnitude_sq() < 1;

                if !low_amp
                    && let Some(alpha) = stage_weight(
                        own,
                        near,
                        cell.nearest,
                        exponents.nearest.data()[i],
                        params,
                        params.dither_strength,
                        dither,
                    )
                {
                    mix(&mut value, near, alpha);
                    stats.nearest += 1;
                }

                if !low_amp
                    && let Some(second_label) = cell.second.label()
                {
                    let second = colour_of(second_label)?;
                    // only pure black is excluded; magnitude 1 still blends
                    if second.magnitude_sq() >= 1
                        && let Some(alpha) = stage_weight(
                            own,
                            second,
                            cell.second,
                            exponents.second.data()[i],
                            params,
                            SECOND_DITHER_SCALE * params.dither_strength,
                            dither,
                        )
                    {
                        mix(&mut value, second, alpha);
                        stats.second += 1;
                    }
                }
            }

            let [r, g, b] = value.map(quantize_channel);
            out.set_rgb_unchecked(x, y, Rgb::new(r, g, b));
        }
    }

    tracing::debug!(
        nearest = stats.nearest,
        second = stats.second,
        "composited frame"
    );
    Ok((out, stats))
}

/// Blend weight toward `other`, or `None` if the stage is gated off.
fn stage_weight<D: DitherSource + ?Sized>(
    base: Rgb,
    other: Rgb,
    target: LabelDistance,
    exponent: f32,
    params: &BlendParams,
    dither_amp: f32,
    dither: &mut D,
) -> Option<f32> {
    if target.distance > params.spatial_limit {
        return None;
    }
    if base.distance_sq(other) >= params.colour_dist_sq {
        return None;
    }
    let scaled = target.distance as f32 / AXIAL_COST as f32;
    let alpha = 0.5 / scaled.powf(exponent) + dither_amp * (dither.next_unit() - 0.5);
    Some(alpha.clamp(0.0, 1.0))
}

#[inline]
fn mix(value: &mut [f32; 3], toward: Rgb, alpha: f32) {
    for (v, t) in value.iter_mut().zip(toward.to_f32()) {
        *v = (1.0 - alpha) * *v + alpha * t;
    }
}

/// Round half up and clamp to a byte.
#[inline]
pub fn quantize_channel(value: f32) -> u8 {
    (value + 0.5).floor().clamp(0.0, 255.0) as u8
}
