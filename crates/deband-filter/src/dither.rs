//! Dither noise sources
//!
//! The compositor draws one uniform value in `[0, 1)` for every blend it
//! applies. Any [`rand::Rng`] can drive it through [`RandomDither`];
//! [`ConstantDither`] removes the noise for exact tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform values in `[0, 1)`
pub trait DitherSource {
    /// Next value in `[0, 1)`
    fn next_unit(&mut self) -> f32;
}

impl<D: DitherSource + ?Sized> DitherSource for &mut D {
    #[inline]
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }
}

/// Dither backed by a random number generator
#[derive(Debug, Clone)]
pub struct RandomDither<R> {
    rng: R,
}

impl<R: Rng> RandomDither<R> {
    /// Wrap a generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomDither<StdRng> {
    /// Reproducible dither from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Dither seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> DitherSource for RandomDither<R> {
    #[inline]
    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Dither that always returns the same value.
///
/// `ConstantDither(0.5)` contributes no noise at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantDither(pub f32);

impl Default for ConstantDither {
    fn default() -> Self {
        Self(0.5)
    }
}

impl DitherSource for ConstantDither {
    #[inline]
    fn next_unit(&mut self) -> f32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = RandomDither::from_seed(7);
        let mut b = RandomDither::from_seed(7);
        for _ in 0..100 {
            let v = a.next_unit();
            assert!((0.0..1.0).contains(&v));
            assert_eq!(v, b.next_unit());
        }
    }

    fn draw<D: DitherSource>(mut source: D) -> f32 {
        source.next_unit()
    }

    #[test]
    fn test_constant() {
        let mut d = ConstantDither::default();
        assert_eq!(d.next_unit(), 0.5);
        assert_eq!(draw(&mut d), 0.5);
        assert_eq!(draw(ConstantDither(0.0)), 0.0);
    }
}
