//! Image format detection
//!
//! Detects image formats by examining magic numbers in the file header, or
//! from a file name extension when writing.

use crate::{IoError, IoResult};
use std::path::Path;

/// Supported container formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Portable Network Graphics
    Png,
    /// Binary portable anymap (P5 read, P6 read/write)
    Pnm,
}

impl ImageFormat {
    /// Conventional file extension
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Pnm => "ppm",
        }
    }

    /// Output format for a path's extension.
    ///
    /// Only extensions the writers can honour are accepted: `.pgm` is
    /// rejected because PNM output is always colour (P6).
    ///
    /// # Errors
    ///
    /// Returns `IoError::UnsupportedFormat` for an unknown, missing or
    /// grey-only extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("png") => Ok(ImageFormat::Png),
            Some("ppm" | "pnm") => Ok(ImageFormat::Pnm),
            _ => Err(IoError::UnsupportedFormat(format!(
                "cannot infer format from '{}'",
                path.display()
            ))),
        }
    }
}

/// Magic numbers for image format detection
mod magic {
    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// Binary graymap
    pub const PGM_BINARY: &[u8] = b"P5";

    /// Binary pixmap
    pub const PPM_BINARY: &[u8] = b"P6";
}

/// Detect image format from the leading bytes of a file
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(
            "not enough data to detect format".to_string(),
        ));
    }

    if data.len() >= 8 && data.starts_with(magic::PNG) {
        return Ok(ImageFormat::Png);
    }

    if data.starts_with(magic::PPM_BINARY) || data.starts_with(magic::PGM_BINARY) {
        return Ok(ImageFormat::Pnm);
    }

    Err(IoError::UnsupportedFormat(format!(
        "unrecognised header {:02x?}",
        &data[..data.len().min(8)]
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(
            detect_format_from_bytes(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]).unwrap(),
            ImageFormat::Png
        );
        assert_eq!(detect_format_from_bytes(b"P6\n").unwrap(), ImageFormat::Pnm);
        assert_eq!(detect_format_from_bytes(b"P5 ").unwrap(), ImageFormat::Pnm);
        assert!(detect_format_from_bytes(b"P").is_err());
        assert!(matches!(
            detect_format_from_bytes(b"GIF89a"),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_from_path() {
        assert_eq!(ImageFormat::from_path("a/b.PNG").unwrap(), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path("out.ppm").unwrap(), ImageFormat::Pnm);
        assert!(ImageFormat::from_path("noext").is_err());
        assert!(ImageFormat::from_path("x.jpg").is_err());
    }

    #[test]
    fn test_grey_extension_is_not_an_output() {
        assert!(matches!(
            ImageFormat::from_path("out.pgm"),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert_eq!(ImageFormat::from_path("out.PNM").unwrap(), ImageFormat::Pnm);
    }
}
