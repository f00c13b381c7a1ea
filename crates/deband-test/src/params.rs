//! Regression test bookkeeping
//!
//! A [`RegParams`] numbers the checks of one `*_reg` test, keeps going after
//! a failed check and reports everything at [`RegParams::cleanup`].
//!
//! Image checks are backed by golden images in `tests/golden/`, named
//! `<test>_<name>.<ext>`. Generate mode (re)writes them; compare mode decodes
//! the golden image and compares it pixel by pixel with the current output.
//! A golden image that does not exist is a failure, never a pass.

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use deband_core::{Rgb, RgbImage};
use deband_io::ImageFormat;
use std::fs;
use std::path::Path;

/// Regression test mode, from `REGTEST_MODE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Write golden images
    Generate,
    /// Check against golden images (default)
    #[default]
    Compare,
    /// Write outputs for inspection only
    Display,
}

impl RegTestMode {
    /// Read the mode from `REGTEST_MODE`; anything unrecognised compares.
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// State of one regression test.
pub struct RegParams {
    /// Test name, the prefix of every output and golden file
    pub test_name: String,
    index: usize,
    /// Mode the test runs in
    pub mode: RegTestMode,
    failures: Vec<String>,
}

impl RegParams {
    /// Start a regression test in the mode given by `REGTEST_MODE`.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();
        let _ = fs::create_dir_all(regout_dir());
        if mode == RegTestMode::Generate {
            let _ = fs::create_dir_all(golden_dir());
        }

        eprintln!();
        eprintln!("==== {}_reg ({:?}) ====", test_name, mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            failures: Vec::new(),
        }
    }

    /// Number of checks made so far
    pub fn index(&self) -> usize {
        self.index
    }

    fn fail(&mut self, what: &str, detail: String) {
        let msg = format!(
            "{}_reg check {} ({}): {}",
            self.test_name, self.index, what, detail
        );
        eprintln!("{}", msg);
        self.failures.push(msg);
    }

    /// Check that `actual` is within `delta` of `expected`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();
        if diff > delta || diff.is_nan() {
            self.fail(
                "value",
                format!("expected {expected}, got {actual} (allowed delta {delta})"),
            );
            return false;
        }
        true
    }

    /// Check that two images have the same size and pixels.
    pub fn compare_images(&mut self, expected: &RgbImage, actual: &RgbImage) -> bool {
        self.index += 1;
        self.match_pixels("image", expected, actual)
    }

    fn match_pixels(&mut self, what: &str, expected: &RgbImage, actual: &RgbImage) -> bool {
        if expected.dimensions() != actual.dimensions() {
            self.fail(
                what,
                format!(
                    "size {:?}, expected {:?}",
                    actual.dimensions(),
                    expected.dimensions()
                ),
            );
            return false;
        }
        match first_difference(expected, actual) {
            None => true,
            Some((x, y, want, got)) => {
                self.fail(what, format!("pixel ({x}, {y}) is {got:?}, expected {want:?}"));
                false
            }
        }
    }

    /// Write `image` to `tests/regout/` and check it against the golden
    /// image `<test>_<name>.<ext>`.
    ///
    /// # Errors
    ///
    /// Returns an error if an image cannot be written or an existing golden
    /// image cannot be decoded. Mismatches and missing golden images are
    /// recorded as failures.
    pub fn write_image_and_check(
        &mut self,
        image: &RgbImage,
        name: &str,
        format: ImageFormat,
    ) -> TestResult<()> {
        self.index += 1;
        let file = format!("{}_{}.{}", self.test_name, name, format.extension());

        write(image, &Path::new(&regout_dir()).join(&file), format)?;

        let golden = Path::new(&golden_dir()).join(&file);
        match self.mode {
            RegTestMode::Generate => {
                write(image, &golden, format)?;
                eprintln!("generated {}", golden.display());
            }
            RegTestMode::Compare => {
                if !golden.exists() {
                    self.fail(name, format!("missing golden image {}", golden.display()));
                    return Ok(());
                }
                let expected = deband_io::read_image(&golden).map_err(|e| TestError::ImageLoad {
                    path: golden.display().to_string(),
                    message: e.to_string(),
                })?;
                self.match_pixels(name, &expected, image);
            }
            RegTestMode::Display => {}
        }
        Ok(())
    }

    /// Print the summary; true if every check passed.
    pub fn cleanup(self) -> bool {
        if self.failures.is_empty() {
            eprintln!("SUCCESS: {}_reg, {} checks", self.test_name, self.index);
            return true;
        }
        eprintln!(
            "FAILURE: {}_reg, {} of {} checks failed",
            self.test_name,
            self.failures.len(),
            self.index
        );
        for failure in &self.failures {
            eprintln!("  {}", failure);
        }
        false
    }

    /// True while no check has failed
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failure messages so far
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

fn write(image: &RgbImage, path: &Path, format: ImageFormat) -> TestResult<()> {
    deband_io::write_image(image, path, format).map_err(|e| TestError::ImageWrite {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// First pixel, in row-major order, where two same-sized images differ.
fn first_difference(expected: &RgbImage, actual: &RgbImage) -> Option<(u32, u32, Rgb, Rgb)> {
    let width = expected.width();
    expected
        .pixels()
        .zip(actual.pixels())
        .position(|(want, got)| want != got)
        .map(|i| {
            let (x, y) = (i as u32 % width, i as u32 / width);
            (x, y, expected.get_rgb_unchecked(x, y), actual.get_rgb_unchecked(x, y))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_env() {
        let mode = RegTestMode::from_env();
        assert!(matches!(
            mode,
            RegTestMode::Compare | RegTestMode::Generate | RegTestMode::Display
        ));
    }

    #[test]
    fn test_compare_values() {
        let mut rp = RegParams::new("params_values");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.compare_values(1.0, f64::NAN, 1.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 2);
    }

    #[test]
    fn test_compare_images() {
        let mut rp = RegParams::new("params_images");
        let a = RgbImage::filled(3, 2, Rgb::new(1, 2, 3)).unwrap();
        let mut b = a.clone();
        assert!(rp.compare_images(&a, &b));
        b.set_rgb(2, 1, Rgb::new(1, 2, 4)).unwrap();
        assert!(!rp.compare_images(&a, &b));
        assert!(rp.failures()[0].contains("(2, 1)"));
        let small = RgbImage::filled(2, 2, Rgb::new(1, 2, 3)).unwrap();
        assert!(!rp.compare_images(&a, &small));
        assert_eq!(rp.index(), 3);
    }

    #[test]
    fn test_first_difference() {
        let a = RgbImage::from_fn(4, 3, |x, y| Rgb::new(x as u8, y as u8, 0)).unwrap();
        assert_eq!(first_difference(&a, &a), None);
        let mut b = a.clone();
        b.set_rgb(1, 2, Rgb::new(9, 9, 9)).unwrap();
        b.set_rgb(3, 2, Rgb::new(9, 9, 9)).unwrap();
        assert_eq!(
            first_difference(&a, &b),
            Some((1, 2, Rgb::new(1, 2, 0), Rgb::new(9, 9, 9)))
        );
    }

    #[test]
    fn test_missing_golden_fails() {
        let mut rp = RegParams::new("params_missing");
        if rp.mode != RegTestMode::Compare {
            return;
        }
        let img = RgbImage::filled(2, 2, Rgb::new(5, 6, 7)).unwrap();
        rp.write_image_and_check(&img, "no_such_golden", ImageFormat::Pnm)
            .unwrap();
        assert!(!rp.is_success());
        assert!(rp.failures()[0].contains("missing golden image"));
        assert!(!Path::new(&golden_dir())
            .join("params_missing_no_such_golden.ppm")
            .exists());
    }
}
