//! Field - per-pixel 2D array
//!
//! `Field<T>` stores one value per pixel in row-major order with no padding.
//! The pipeline uses it for the label field (`Field<u32>`), the exponent
//! fields (`Field<f32>`) and the distance quadruple field.
//!
//! # Examples
//!
//! ```
//! use deband_core::Field;
//!
//! let mut field = Field::new(4, 3, 0u32).unwrap();
//! field.set(1, 2, 7).unwrap();
//! assert_eq!(field.get(1, 2), Some(7));
//! assert_eq!(field.clamped(-5, 10), 0);
//! ```

use crate::buffer::{try_filled, try_with_capacity};
use crate::error::{Error, Result};

/// Label field: one region label per pixel, `0` meaning unset.
pub type LabelField = Field<u32>;

/// Floating-point field.
pub type FloatField = Field<f32>;

/// Per-pixel 2D array
///
/// The value at (x, y) is at index `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Field<T> {
    width: u32,
    height: u32,
    data: Vec<T>,
}

impl<T: Copy> Field<T> {
    /// Create a field with every element set to `value`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0 and
    /// `Error::AllocationFailed` if the buffer cannot be reserved.
    pub fn new(width: u32, height: u32, value: T) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let data = try_filled(width as usize * height as usize, value)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap existing row-major data.
    pub fn from_data(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
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

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; a field has at least one element.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Linear index of (x, y)
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Linear index of the pixel at offset (dx, dy) from (x, y), or `None`
    /// when it falls outside the field.
    #[inline]
    pub fn offset_index(&self, x: u32, y: u32, dx: i32, dy: i32) -> Option<usize> {
        let nx = x as i64 + dx as i64;
        let ny = y as i64 + dy as i64;
        if nx < 0 || ny < 0 || nx >= self.width as i64 || ny >= self.height as i64 {
            return None;
        }
        Some(ny as usize * self.width as usize + nx as usize)
    }

    /// Value at (x, y), or `None` outside the field.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[self.index(x, y)])
    }

    /// Value at (x, y) with coordinates clamped to the nearest edge.
    #[inline]
    pub fn clamped(&self, x: i64, y: i64) -> T {
        let cx = x.clamp(0, self.width as i64 - 1) as usize;
        let cy = y.clamp(0, self.height as i64 - 1) as usize;
        self.data[cy * self.width as usize + cx]
    }

    /// Set the value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: T) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: self.index(x, y),
                len: self.data.len(),
            });
        }
        let i = self.index(x, y);
        self.data[i] = value;
        Ok(())
    }

    /// Raw row-major data
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable row-major data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the field and return its data.
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Row `y`
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[T] {
        let start = y as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }

    /// Mutable row `y`
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [T] {
        let start = y as usize * self.width as usize;
        let end = start + self.width as usize;
        &mut self.data[start..end]
    }

    /// Build a field of the same shape by applying `f` to every element.
    pub fn map<U: Copy, F: FnMut(T) -> U>(&self, f: F) -> Result<Field<U>> {
        let mut data = try_with_capacity(self.data.len())?;
        data.extend(self.data.iter().copied().map(f));
        Ok(Field {
            width: self.width,
            height: self.height,
            data,
        })
    }
}
