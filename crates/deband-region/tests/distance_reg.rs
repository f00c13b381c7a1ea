//! Label distance regression test
//!
//! Checks chamfer distances and second-nearest labels on banded inputs.

use deband_core::{Rgb, RgbImage};
use deband_region::{AXIAL_COST, DIAGONAL_COST, label_distance, label_regions};
use deband_test::{RegParams, banded_ramp};

#[test]
fn distance_reg() {
    let mut rp = RegParams::new("distance");

    // --- Test 1: distance to the band edge on a ramp ---
    eprintln!("=== Banded ramp ===");
    let ramp = banded_ramp(40, 6, 4).expect("ramp");
    let regions = label_regions(&ramp).expect("label");
    let field = label_distance(&regions).expect("distance");
    for x in 0..40u32 {
        let band_start = x / 10 * 10;
        let band_end = band_start + 9;
        let cell = field.get(x, 3).unwrap();
        let to_left = if band_start > 0 { x - band_start + 1 } else { u32::MAX };
        let to_right = if band_end < 39 { band_end - x + 1 } else { u32::MAX };
        let steps = to_left.min(to_right);
        rp.compare_values(
            (steps * AXIAL_COST) as f64,
            cell.nearest.distance as f64,
            0.0,
        );
    }

    // --- Test 2: the middle bands see both neighbours ---
    eprintln!("=== Second nearest ===");
    let cell = field.get(12, 0).unwrap();
    rp.compare_values(1.0, cell.nearest.label.into(), 0.0);
    rp.compare_values(3.0, cell.second.label.into(), 0.0);
    rp.compare_values((8 * AXIAL_COST) as f64, cell.second.distance as f64, 0.0);
    let edge = field.get(0, 0).unwrap();
    rp.compare_values(0.0, edge.second.label.into(), 0.0);

    // --- Test 3: diagonal steps ---
    eprintln!("=== Diagonal steps ===");
    let corner = RgbImage::from_fn(5, 5, |x, y| {
        if x == 4 && y == 4 {
            Rgb::new(255, 0, 0)
        } else {
            Rgb::new(0, 0, 255)
        }
    })
    .expect("corner");
    let regions = label_regions(&corner).expect("label");
    let field = label_distance(&regions).expect("distance");
    for d in 0..4u32 {
        let cell = field.get(3 - d, 3 - d).unwrap();
        rp.compare_values(
            ((d + 1) * DIAGONAL_COST) as f64,
            cell.nearest.distance as f64,
            0.0,
        );
    }

    // --- Test 4: paths do not cross foreign regions ---
    eprintln!("=== Enclosed region ===");
    // A ring of colour B separates the centre pixel from the outer area.
    let ring = RgbImage::from_fn(7, 7, |x, y| {
        let d = (x as i32 - 3).abs().max((y as i32 - 3).abs());
        match d {
            0 => Rgb::new(10, 10, 10),
            1 => Rgb::new(20, 20, 20),
            _ => Rgb::new(30, 30, 30),
        }
    })
    .expect("ring");
    let regions = label_regions(&ring).expect("label");
    rp.compare_values(3.0, regions.max_label() as f64, 0.0);
    let field = label_distance(&regions).expect("distance");
    let centre = field.get(3, 3).unwrap();
    let ring_label = regions.label_at(2, 2).unwrap();
    rp.compare_values(ring_label as f64, centre.nearest.label as f64, 0.0);
    rp.compare_values(AXIAL_COST as f64, centre.nearest.distance as f64, 0.0);
    rp.compare_values(0.0, centre.second.label as f64, 0.0);

    assert!(rp.cleanup(), "distance regression test failed");
}
