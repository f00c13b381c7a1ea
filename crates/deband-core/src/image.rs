//! RGB24 images and frame views
//!
//! - [`RgbImage`] owns a packed (stride-free) interleaved RGB buffer.
//! - [`FrameRef`] / [`FrameMut`] borrow caller-owned storage whose rows may
//!   be padded, as handed over by a video host.
//!
//! # Memory Layout
//!
//! Rows are stored top to bottom. Pixel (x, y) starts at byte
//! `y * stride + 3 * x`. The last row does not need to carry padding.

use crate::buffer::try_filled;
use crate::error::{Error, Result};
use crate::rgb::Rgb;

/// Bytes per RGB24 pixel.
pub const BYTES_PER_PIXEL: usize = 3;

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    Ok(())
}

fn check_geometry(width: u32, height: u32, stride: usize, len: usize) -> Result<()> {
    check_dimensions(width, height)?;
    let row_bytes = width as usize * BYTES_PER_PIXEL;
    if stride < row_bytes {
        return Err(Error::InvalidStride {
            stride,
            min: row_bytes,
        });
    }
    let expected = stride * (height as usize - 1) + row_bytes;
    if len < expected {
        return Err(Error::BufferTooSmall {
            expected,
            actual: len,
        });
    }
    Ok(())
}

/// Owned, packed RGB24 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbImage {
    /// Create a black image.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, Rgb::BLACK)
    }

    /// Create an image with every pixel set to `colour`.
    pub fn filled(width: u32, height: u32, colour: Rgb) -> Result<Self> {
        check_dimensions(width, height)?;
        let pixels = width as usize * height as usize;
        let mut data = try_filled(pixels * BYTES_PER_PIXEL, 0u8)?;
        for px in data.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&colour.to_array());
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap packed RGB24 bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are zero or `data.len()` is not
    /// exactly `3 * width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{}x3 = {}",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> Rgb,
    {
        let mut image = Self::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                image.set_rgb_unchecked(x, y, f(x, y));
            }
        }
        Ok(image)
    }

    /// Copy a (possibly padded) frame into a packed image.
    pub fn from_frame(frame: &FrameRef<'_>) -> Result<Self> {
        let mut image = Self::new(frame.width(), frame.height())?;
        for y in 0..frame.height() {
            image.row_mut(y).copy_from_slice(frame.row(y));
        }
        Ok(image)
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Bytes per row (always `3 * width`).
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Packed pixel bytes
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable packed pixel bytes
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the image and return its bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Iterate over pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.data
            .chunks_exact(BYTES_PER_PIXEL)
            .map(Rgb::from_bytes)
    }

    /// Get the colour at (x, y), or `None` outside the image.
    #[inline]
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.get_rgb_unchecked(x, y))
    }

    /// Get the colour at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if the pixel lies outside the buffer.
    #[inline]
    pub fn get_rgb_unchecked(&self, x: u32, y: u32) -> Rgb {
        let i = self.offset(x, y);
        Rgb::from_bytes(&self.data[i..i + BYTES_PER_PIXEL])
    }

    /// Set the colour at (x, y).
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    pub fn set_rgb(&mut self, x: u32, y: u32, colour: Rgb) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: y as usize * self.width as usize + x as usize,
                len: self.pixel_count(),
            });
        }
        self.set_rgb_unchecked(x, y, colour);
        Ok(())
    }

    /// Set the colour at (x, y) without bounds checking
    #[inline]
    pub fn set_rgb_unchecked(&mut self, x: u32, y: u32, colour: Rgb) {
        let i = self.offset(x, y);
        self.data[i..i + BYTES_PER_PIXEL].copy_from_slice(&colour.to_array());
    }

    /// Row `y` as `3 * width` bytes.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride();
        &self.data[start..start + self.stride()]
    }

    /// Mutable row `y`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// Borrow as a frame view.
    pub fn as_frame(&self) -> FrameRef<'_> {
        FrameRef {
            data: &self.data[..],
            width: self.width,
            height: self.height,
            stride: self.stride(),
        }
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }
}

/// Read-only view of a strided RGB24 frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameRef<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    stride: usize,
}

impl<'a> FrameRef<'a> {
    /// Wrap caller storage.
    ///
    /// # Errors
    ///
    /// - `InvalidDimension` if width or height is 0
    /// - `InvalidStride` if `stride < 3 * width`
    /// - `BufferTooSmall` if `data` cannot hold `height` rows
    pub fn new(data: &'a [u8], width: u32, height: u32, stride: usize) -> Result<Self> {
        check_geometry(width, height, stride, data.len())?;
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes between the starts of consecutive rows
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Pixel bytes of row `y`, without padding.
    #[inline]
    pub fn row(&self, y: u32) -> &'a [u8] {
        let start = y as usize * self.stride;
        &self.data[start..start + self.width as usize * BYTES_PER_PIXEL]
    }

    /// Colour at (x, y), or `None` outside the frame.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = x as usize * BYTES_PER_PIXEL;
        Some(Rgb::from_bytes(&self.row(y)[i..i + BYTES_PER_PIXEL]))
    }
}

/// Mutable view of a strided RGB24 frame.
#[derive(Debug)]
pub struct FrameMut<'a> {
    data: &'a mut [u8],
    width: u32,
    height: u32,
    stride: usize,
}

impl<'a> FrameMut<'a> {
    /// Wrap caller storage. Same validation as [`FrameRef::new`].
    pub fn new(data: &'a mut [u8], width: u32, height: u32, stride: usize) -> Result<Self> {
        check_geometry(width, height, stride, data.len())?;
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes between the starts of consecutive rows
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Reborrow as a read-only view.
    pub fn as_frame(&self) -> FrameRef<'_> {
        FrameRef {
            data: &*self.data,
            width: self.width,
            height: self.height,
            stride: self.stride,
        }
    }

    /// Pixel bytes of row `y`, without padding.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride;
        &self.data[start..start + self.width as usize * BYTES_PER_PIXEL]
    }

    /// Mutable pixel bytes of row `y`; padding bytes are not exposed.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = y as usize * self.stride;
        let end = start + self.width as usize * BYTES_PER_PIXEL;
        &mut self.data[start..end]
    }

    /// Copy a packed image of the same size into this frame.
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if the sizes differ.
    pub fn copy_from_image(&mut self, image: &RgbImage) -> Result<()> {
        if image.dimensions() != (self.width, self.height) {
            return Err(Error::DimensionMismatch {
                expected: (self.width, self.height),
                actual: image.dimensions(),
            });
        }
        for y in 0..self.height {
            self.row_mut(y).copy_from_slice(image.row(y));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero() {
        assert!(matches!(
            RgbImage::new(0, 4),
            Err(Error::InvalidDimension { width: 0, height: 4 })
        ));
        assert!(RgbImage::new(4, 0).is_err());
    }

    #[test]
    fn test_get_set() {
        let mut img = RgbImage::new(3, 2).unwrap();
        img.set_rgb(2, 1, Rgb::new(1, 2, 3)).unwrap();
        assert_eq!(img.get_rgb(2, 1), Some(Rgb::new(1, 2, 3)));
        assert_eq!(img.get_rgb(0, 0), Some(Rgb::BLACK));
        assert_eq!(img.get_rgb(3, 0), None);
        assert!(img.set_rgb(0, 2, Rgb::BLACK).is_err());
        assert_eq!(&img.data()[15..18], &[1, 2, 3]);
    }

    #[test]
    fn test_from_data_length_check() {
        assert!(RgbImage::from_data(2, 2, vec![0; 12]).is_ok());
        assert!(RgbImage::from_data(2, 2, vec![0; 11]).is_err());
    }

    #[test]
    fn test_frame_stride_validation() {
        let buf = vec![0u8; 64];
        assert!(FrameRef::new(&buf, 4, 4, 16).is_ok());
        assert!(matches!(
            FrameRef::new(&buf, 4, 4, 11),
            Err(Error::InvalidStride { stride: 11, min: 12 })
        ));
        // last row needs only 12 bytes: 3 * 20 + 12 = 72 > 64
        assert!(matches!(
            FrameRef::new(&buf, 4, 4, 20),
            Err(Error::BufferTooSmall { expected: 72, .. })
        ));
        // 3 * 16 + 12 = 60 <= 64
        assert!(FrameRef::new(&buf[..60], 4, 4, 16).is_ok());
    }

    #[test]
    fn test_padded_frame_round_trip() {
        let mut buf = vec![0xAAu8; 2 * 8];
        {
            let mut frame = FrameMut::new(&mut buf, 2, 2, 8).unwrap();
            let img = RgbImage::from_fn(2, 2, |x, y| Rgb::new(x as u8, y as u8, 9)).unwrap();
            frame.copy_from_image(&img).unwrap();
        }
        // padding bytes untouched
        assert_eq!(&buf[6..8], &[0xAA, 0xAA]);
        assert_eq!(&buf[8..14], &[0, 1, 9, 1, 1, 9]);

        let view = FrameRef::new(&buf, 2, 2, 8).unwrap();
        let packed = RgbImage::from_frame(&view).unwrap();
        assert_eq!(packed.get_rgb(1, 1), Some(Rgb::new(1, 1, 9)));
        assert_eq!(packed.data().len(), 12);
    }

    #[test]
    fn test_copy_from_image_size_mismatch() {
        let mut buf = vec![0u8; 12];
        let mut frame = FrameMut::new(&mut buf, 2, 2, 6).unwrap();
        let img = RgbImage::new(1, 1).unwrap();
        assert!(matches!(
            frame.copy_from_image(&img),
            Err(Error::DimensionMismatch { .. })
        ));
    }
}
