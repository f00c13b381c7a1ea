//! Fallible scratch allocation
//!
//! Per-frame scratch buffers scale with the pixel count. They are reserved
//! with `try_reserve_exact` so that an oversized frame reports
//! [`Error::AllocationFailed`] to the caller instead of aborting the process.

use crate::error::{Error, Result};

/// Allocate a vector of `len` copies of `value`.
///
/// # Errors
///
/// Returns `Error::AllocationFailed` if the allocator refuses the request.
pub fn try_filled<T: Clone>(len: usize, value: T) -> Result<Vec<T>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailed(len))?;
    data.resize(len, value);
    Ok(data)
}

/// Allocate an empty vector able to hold `len` elements without reallocating.
pub fn try_with_capacity<T>(len: usize) -> Result<Vec<T>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailed(len))?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_filled() {
        let v = try_filled(5, 7u32).unwrap();
        assert_eq!(v, vec![7, 7, 7, 7, 7]);
    }

    #[test]
    fn test_try_filled_empty() {
        let v = try_filled(0, 0.0f32).unwrap();
        assert!(v.is_empty());
    }

    #[test]
    fn test_try_filled_refuses_absurd_request() {
        let err = try_filled(usize::MAX, 0u64).unwrap_err();
        assert!(matches!(err, Error::AllocationFailed(n) if n == usize::MAX));
    }

    #[test]
    fn test_try_with_capacity() {
        let v: Vec<u8> = try_with_capacity(64).unwrap();
        assert!(v.capacity() >= 64);
        assert!(v.is_empty());
    }
}
