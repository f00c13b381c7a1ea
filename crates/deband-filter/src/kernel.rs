//! Convolution kernels
//!
//! Defines the kernel used to smooth the exponent fields. The deband filter
//! only ever builds separable tent kernels ([`Kernel::tent`]), but arbitrary
//! kernels can be supplied with [`Kernel::from_slice`].

use crate::{FilterError, FilterResult};

/// Width above which the largest automatic kernel is chosen.
pub const WIDE_FRAME: u32 = 1200;

/// Width above which the medium automatic kernel is chosen.
pub const MEDIUM_FRAME: u32 = 720;

/// Smallest kernel size the filter uses.
pub const MIN_KERNEL_SIZE: u32 = 3;

/// A 2D convolution kernel
#[derive(Debug, Clone)]
pub struct Kernel {
    /// Width of the kernel
    width: u32,
    /// Height of the kernel
    height: u32,
    /// X coordinate of the center
    cx: u32,
    /// Y coordinate of the center
    cy: u32,
    /// Kernel data (row-major order)
    data: Vec<f32>,
}

/// One kernel weight and its offset from the center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelCell {
    pub dx: i32,
    pub dy: i32,
    pub weight: f32,
}

impl Kernel {
    /// Create a zero kernel with the given dimensions, centered at
    /// `(width / 2, height / 2)`.
    pub fn new(width: u32, height: u32) -> FilterResult<Self> {
        if width == 0 || height == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel dimensions must be positive, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data: vec![0.0; width as usize * height as usize],
        })
    }

    /// Create a kernel from a slice of values in row-major order.
    pub fn from_slice(width: u32, height: u32, data: &[f32]) -> FilterResult<Self> {
        let mut kernel = Self::new(width, height)?;
        if data.len() != kernel.data.len() {
            return Err(FilterError::InvalidKernel(format!(
                "expected {} values, got {}",
                kernel.data.len(),
                data.len()
            )));
        }
        kernel.data.copy_from_slice(data);
        Ok(kernel)
    }

    /// Create a normalized square tent kernel.
    ///
    /// `size` is raised to at least 3 and rounded up to the next odd
    /// number. The weight at offset `(dx, dy)` is `ramp[dx] * ramp[dy]`
    /// divided by the total, with `ramp` from [`tent_ramp`].
    ///
    /// # Examples
    ///
    /// ```
    /// use deband_filter::Kernel;
    ///
    /// let k = Kernel::tent(3);
    /// assert_eq!(k.width(), 3);
    /// assert!((k.get(1, 1).unwrap() - 4.0 / 16.0).abs() < 1e-6);
    /// assert!((k.sum() - 1.0).abs() < 1e-6);
    /// ```
    pub fn tent(size: u32) -> Self {
        let size = odd_kernel_size(size);
        let ramp = tent_ramp(size);
        let mut data = Vec::with_capacity(ramp.len() * ramp.len());
        for &wy in &ramp {
            for &wx in &ramp {
                data.push(wx * wy);
            }
        }
        let mut kernel = Self {
            width: size,
            height: size,
            cx: size / 2,
            cy: size / 2,
            data,
        };
        kernel.normalize();
        kernel
    }

    /// Get the kernel width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the kernel height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the kernel data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get a value at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y * self.width + x) as usize])
    }

    /// Set a value at (x, y). Out-of-range coordinates are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) as usize] = value;
        }
    }

    /// Normalize the kernel so that values sum to 1.
    ///
    /// A kernel that sums to zero is left unchanged.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum != 0.0 {
            for v in &mut self.data {
                *v /= sum;
            }
        }
    }

    /// Get the sum of all kernel values.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// Every weight with its offset from the center, row by row.
    pub fn cells(&self) -> impl Iterator<Item = KernelCell> + '_ {
        let w = self.width;
        let (cx, cy) = (self.cx as i32, self.cy as i32);
        self.data.iter().enumerate().map(move |(i, &weight)| {
            let i = i as u32;
            KernelCell {
                dx: (i % w) as i32 - cx,
                dy: (i / w) as i32 - cy,
                weight,
            }
        })
    }
}

/// Kernel size for a frame width: 7 above 1200 pixels, 5 above 720,
/// otherwise 3.
pub fn auto_kernel_size(frame_width: u32) -> u32 {
    if frame_width > WIDE_FRAME {
        7
    } else if frame_width > MEDIUM_FRAME {
        5
    } else {
        3
    }
}

/// Raise `size` to at least 3 and round it up to an odd number.
pub fn odd_kernel_size(size: u32) -> u32 {
    let size = size.max(MIN_KERNEL_SIZE);
    if size % 2 == 0 { size + 1 } else { size }
}

/// 1D tent ramp of length `size`: `1, 2, .., peak, .., 2, 1`.
pub fn tent_ramp(size: u32) -> Vec<f32> {
    let mid = size.div_ceil(2);
    (1..=size)
        .map(|k| {
            let rise = k;
            let fall = size + 1 - k;
            rise.min(fall).min(mid) as f32
        })
        .collect()
}
