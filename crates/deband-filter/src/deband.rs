//! Frame driver
//!
//! Runs the full pipeline on one frame:
//!
//! 1. stage the (possibly strided) input into a packed working image
//! 2. label same-colour regions and record their colours
//! 3. find each pixel's nearest and second-nearest foreign region
//! 4. build and smooth the exponent fields
//! 5. composite and write the output frame
//!
//! Every scratch buffer is owned by the call and released on return. Frames
//! one pixel wide or tall are copied through unchanged.

use crate::blend::{BlendParams, composite};
use crate::dither::DitherSource;
use crate::exponent::build_exponent_fields;
use crate::kernel::Kernel;
use crate::options::DebandOptions;
use crate::FilterResult;
use deband_core::{Error, FrameMut, FrameRef, RgbImage};
use deband_region::{label_distance, label_regions, region_colours};

/// Deband a packed image into a new image.
///
/// # Errors
///
/// Returns `FilterError::InvalidParameters` for out-of-range options and
/// `FilterError::Core` if scratch memory cannot be allocated.
///
/// # Examples
///
/// ```
/// use deband_core::{Rgb, RgbImage};
/// use deband_filter::{ConstantDither, DebandOptions, deband_image};
///
/// let image = RgbImage::from_fn(8, 4, |x, _| {
///     if x < 4 { Rgb::new(100, 100, 100) } else { Rgb::new(102, 102, 102) }
/// })
/// .unwrap();
/// let out = deband_image(&image, &DebandOptions::default(), &mut ConstantDither(0.5)).unwrap();
/// assert_eq!(out.get_rgb(3, 0), Some(Rgb::new(101, 101, 101)));
/// ```
pub fn deband_image<D: DitherSource + ?Sized>(
    image: &RgbImage,
    options: &DebandOptions,
    dither: &mut D,
) -> FilterResult<RgbImage> {
    options.validate()?;

    let (width, height) = image.dimensions();
    if width <= 1 || height <= 1 {
        tracing::debug!(width, height, "degenerate frame passed through");
        return Ok(image.clone());
    }

    let spatial = options.resolved_spatial_distance(width);
    let kernel = Kernel::tent(options.resolved_kernel_size(width));
    tracing::debug!(
        width,
        height,
        spatial,
        kernel = kernel.width(),
        colour_dist = options.colour_dist,
        dither_strength = options.dither_strength,
        "debanding frame"
    );

    let regions = label_regions(image)?;
    let colours = region_colours(image, &regions)?;
    let distances = label_distance(&regions)?;
    let exponents = build_exponent_fields(&regions, &distances, &kernel)?;

    let params = BlendParams::new(options.colour_dist, spatial, options.dither_strength);
    let (out, _) = composite(&regions, &colours, &distances, &exponents, &params, dither)?;
    Ok(out)
}

/// Deband a strided frame into a separate strided output frame.
///
/// # Errors
///
/// Returns `FilterError::Core` with `Error::DimensionMismatch` if the frames
/// differ in size; the output is untouched on any error.
pub fn deband_frame<D: DitherSource + ?Sized>(
    src: &FrameRef<'_>,
    dst: &mut FrameMut<'_>,
    options: &DebandOptions,
    dither: &mut D,
) -> FilterResult<()> {
    if (src.width(), src.height()) != (dst.width(), dst.height()) {
        return Err(Error::DimensionMismatch {
            expected: (src.width(), src.height()),
            actual: (dst.width(), dst.height()),
        }
        .into());
    }
    let working = RgbImage::from_frame(src)?;
    let out = deband_image(&working, options, dither)?;
    dst.copy_from_image(&out)?;
    Ok(())
}

/// Deband a writable frame in place.
pub fn deband_in_place<D: DitherSource + ?Sized>(
    frame: &mut FrameMut<'_>,
    options: &DebandOptions,
    dither: &mut D,
) -> FilterResult<()> {
    let working = RgbImage::from_frame(&frame.as_frame())?;
    let out = deband_image(&working, options, dither)?;
    frame.copy_from_image(&out)?;
    Ok(())
}

/// A configured filter instance owning its dither source.
///
/// Options are validated once, when the instance is created.
#[derive(Debug, Clone)]
pub struct Deband<D> {
    options: DebandOptions,
    dither: D,
}

impl<D: DitherSource> Deband<D> {
    /// Create a filter instance.
    pub fn new(options: DebandOptions, dither: D) -> FilterResult<Self> {
        options.validate()?;
        Ok(Self { options, dither })
    }

    /// The options in use
    #[inline]
    pub fn options(&self) -> &DebandOptions {
        &self.options
    }

    /// Filter a packed image.
    pub fn filter_image(&mut self, image: &RgbImage) -> FilterResult<RgbImage> {
        deband_image(image, &self.options, &mut self.dither)
    }

    /// Filter a strided frame into another.
    pub fn filter_frame(&mut self, src: &FrameRef<'_>, dst: &mut FrameMut<'_>) -> FilterResult<()> {
        deband_frame(src, dst, &self.options, &mut self.dither)
    }

    /// Filter a strided frame in place.
    pub fn filter_in_place(&mut self, frame: &mut FrameMut<'_>) -> FilterResult<()> {
        deband_in_place(frame, &self.options, &mut self.dither)
    }
}
