//! Convolution of scalar fields
//!
//! Uses replicate (clamp) border handling: samples outside the field are
//! taken from the nearest edge element.

use crate::{FilterResult, Kernel};
use deband_core::FloatField;

/// Convolve a float field with a kernel, returning a new field.
///
/// The kernel is applied cell by cell: for each weight, the whole field is
/// shifted by the cell's offset (clamped at the borders) and accumulated.
pub fn convolve_field(field: &FloatField, kernel: &Kernel) -> FilterResult<FloatField> {
    let (w, h) = field.dimensions();
    let mut out = FloatField::new(w, h, 0.0)?;

    for cell in kernel.cells() {
        if cell.weight == 0.0 {
            continue;
        }
        for y in 0..h {
            let sy = y as i64 + cell.dy as i64;
            let row = out.row_mut(y);
            for (x, acc) in row.iter_mut().enumerate() {
                let sx = x as i64 + cell.dx as i64;
                *acc += field.clamped(sx, sy) * cell.weight;
            }
        }
    }

    Ok(out)
}

/// Convolve a float field in place.
pub fn convolve_field_in_place(field: &mut FloatField, kernel: &Kernel) -> FilterResult<()> {
    *field = convolve_field(field, kernel)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_field_unchanged() {
        for size in [3, 5, 7, 9] {
            let kernel = Kernel::tent(size);
            let mut field = FloatField::new(6, 4, 0.375).unwrap();
            convolve_field_in_place(&mut field, &kernel).unwrap();
            assert!(field.data().iter().all(|v| (v - 0.375).abs() < 1e-5));
        }
    }

    #[test]
    fn test_impulse_spreads_kernel() {
        let kernel = Kernel::tent(3);
        let mut field = FloatField::new(5, 5, 0.0).unwrap();
        field.set(2, 2, 1.0).unwrap();
        let out = convolve_field(&field, &kernel).unwrap();
        for y in 0..3 {
            for x in 0..3 {
                let expected = kernel.get(x, y).unwrap();
                assert!((out.get(x + 1, y + 1).unwrap() - expected).abs() < 1e-6);
            }
        }
        assert_eq!(out.get(0, 0), Some(0.0));
    }

    #[test]
    fn test_clamped_border() {
        // a step at the left edge: the clamped sample repeats column 0
        let kernel = Kernel::from_slice(3, 1, &[1.0, 0.0, 0.0]).unwrap();
        let field = FloatField::from_data(3, 1, vec![4.0, 5.0, 6.0]).unwrap();
        let out = convolve_field(&field, &kernel).unwrap();
        assert_eq!(out.data(), &[4.0, 4.0, 5.0]);
    }

    #[test]
    fn test_single_pixel_field() {
        let kernel = Kernel::tent(5);
        let field = FloatField::new(1, 1, 0.2).unwrap();
        let out = convolve_field(&field, &kernel).unwrap();
        assert!((out.data()[0] - 0.2).abs() < 1e-6);
    }
}
