//! RGB24 colour triple
//!
//! The filter works on interleaved 3-byte pixels in R, G, B order. [`Rgb`]
//! is the decoded form of one such pixel plus the few colour metrics the
//! pipeline needs.

/// One RGB24 pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Create a colour from its components.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a colour from the first three bytes of `bytes`.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` holds fewer than three bytes.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// The components as `[r, g, b]`.
    #[inline]
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// The components as floats.
    #[inline]
    pub fn to_f32(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    /// Integer colour key `r + 256 g + 65536 b`.
    ///
    /// Two pixels belong to the same region candidate iff their keys match.
    #[inline]
    pub fn key(self) -> u32 {
        self.r as u32 + 256 * self.g as u32 + 65536 * self.b as u32
    }

    /// Squared magnitude `r² + g² + b²`.
    #[inline]
    pub fn magnitude_sq(self) -> u32 {
        let [r, g, b] = self.to_array().map(u32::from);
        r * r + g * g + b * b
    }

    /// Squared Euclidean distance to `other` in RGB space.
    #[inline]
    pub fn distance_sq(self, other: Rgb) -> f32 {
        let a = self.to_f32();
        let b = other.to_f32();
        a.iter().zip(b.iter()).map(|(p, q)| (p - q) * (p - q)).sum()
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(value: [u8; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        assert_eq!(Rgb::new(1, 0, 0).key(), 1);
        assert_eq!(Rgb::new(0, 1, 0).key(), 256);
        assert_eq!(Rgb::new(0, 0, 1).key(), 65536);
        assert_eq!(Rgb::new(255, 255, 255).key(), 0x00ff_ffff);
    }

    #[test]
    fn test_magnitude_and_distance() {
        assert_eq!(Rgb::BLACK.magnitude_sq(), 0);
        assert_eq!(Rgb::new(1, 2, 2).magnitude_sq(), 9);
        assert_eq!(Rgb::new(10, 10, 10).distance_sq(Rgb::new(13, 14, 10)), 25.0);
    }
}
