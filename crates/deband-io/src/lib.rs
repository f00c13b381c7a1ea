//! deband-io - Image I/O for the deband filter
//!
//! Reads and writes packed RGB24 images in two containers:
//!
//! - **PNG** (feature `png-format`) - any colour type in, 8-bit RGB out
//! - **PNM** (feature `pnm`) - binary P5/P6 in, P6 out
//!
//! The format of an input file is detected from its magic number; the
//! format of an output file is given explicitly or inferred from its
//! extension.

pub mod error;
pub mod format;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format_from_bytes};

use deband_core::RgbImage;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Seek, Write};
use std::path::Path;

/// Read an image from a file path, detecting its format.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<RgbImage> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let image = read_image_from_reader(BufReader::new(file))?;
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "read image"
    );
    Ok(image)
}

/// Read an image from a buffered, seekable reader, detecting its format.
pub fn read_image_from_reader<R: BufRead + Seek>(mut reader: R) -> IoResult<RgbImage> {
    let format = detect_format_from_bytes(reader.fill_buf()?)?;
    read_image_format(reader, format)
}

/// Read an image of a known format.
pub fn read_image_format<R: BufRead + Seek>(reader: R, format: ImageFormat) -> IoResult<RgbImage> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(reader),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{other:?} support not enabled"
        ))),
    }
}

/// Write an image to a file path.
pub fn write_image<P: AsRef<Path>>(image: &RgbImage, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_image_format(image, &mut writer, format)?;
    writer.flush()?;
    tracing::debug!(path = %path.display(), ?format, "wrote image");
    Ok(())
}

/// Encode an image into a writer.
pub fn write_image_format<W: Write>(image: &RgbImage, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(image, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(image, writer),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{other:?} support not enabled"
        ))),
    }
}
