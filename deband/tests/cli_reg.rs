//! Command-line regression test
//!
//! Runs the `deband` binary on a generated PPM and checks the output file.

use deband::io::{ImageFormat, read_image, write_image};
use deband_test::{RegParams, radial_bands, regout_dir};
use std::process::Command;

#[test]
fn cli_reg() {
    let mut rp = RegParams::new("cli");

    let input = format!("{}/cli_input.ppm", regout_dir());
    let rings = radial_bands(40, 30, 3, 100).expect("rings");
    write_image(&rings, &input, ImageFormat::Pnm).expect("write input");

    // --- Test 1: seeded runs are reproducible ---
    eprintln!("=== Seeded runs ===");
    let mut outputs = Vec::new();
    for run in 0..2 {
        let output = format!("{}/cli_output_{}.png", regout_dir(), run);
        let status = Command::new(env!("CARGO_BIN_EXE_deband"))
            .args([input.as_str(), output.as_str(), "--seed", "77", "--kernel-size", "5"])
            .status()
            .expect("spawn deband");
        rp.compare_values(1.0, if status.success() { 1.0 } else { 0.0 }, 0.0);
        outputs.push(read_image(&output).expect("read output"));
    }
    rp.compare_values(40.0, outputs[0].width() as f64, 0.0);
    rp.compare_values(30.0, outputs[0].height() as f64, 0.0);
    rp.compare_images(&outputs[0], &outputs[1]);

    // --- Test 2: out-of-range options fail ---
    eprintln!("=== Invalid options ===");
    let output = format!("{}/cli_rejected.ppm", regout_dir());
    let status = Command::new(env!("CARGO_BIN_EXE_deband"))
        .args([input.as_str(), output.as_str(), "--colour-dist", "31"])
        .status()
        .expect("spawn deband");
    rp.compare_values(0.0, if status.success() { 1.0 } else { 0.0 }, 0.0);

    // --- Test 3: unknown output extension fails ---
    let output = format!("{}/cli_rejected.jpg", regout_dir());
    let status = Command::new(env!("CARGO_BIN_EXE_deband"))
        .args([input.as_str(), output.as_str()])
        .status()
        .expect("spawn deband");
    rp.compare_values(0.0, if status.success() { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "cli regression test failed");
}
