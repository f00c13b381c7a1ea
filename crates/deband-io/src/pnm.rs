//! PNM (Portable Any Map) format support
//!
//! Reads binary PGM (P5) and PPM (P6) with an 8-bit maxval and writes
//! PPM (P6). Grey input is expanded to RGB. Samples with a maxval below
//! 255 are rescaled to the full range.

use crate::{IoError, IoResult};
use deband_core::RgbImage;
use deband_core::buffer::try_filled;
use std::io::{BufRead, Write};

/// Read a P5 or P6 image from a reader.
///
/// # Arguments
/// * `reader` - A buffered reader positioned at the `P5`/`P6` magic
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<RgbImage> {
    let magic = read_token(&mut reader)?;
    let channels = match magic.as_str() {
        "P5" => 1,
        "P6" => 3,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNM variant {other}"
            )));
        }
    };

    let width = read_number(&mut reader, "width")?;
    let height = read_number(&mut reader, "height")?;
    let maxval = read_number(&mut reader, "maxval")?;
    if maxval == 0 || maxval > 255 {
        return Err(IoError::UnsupportedFormat(format!(
            "PNM maxval {maxval}"
        )));
    }
    if width == 0 || height == 0 {
        return Err(IoError::InvalidData(format!(
            "PNM dimensions {width}x{height}"
        )));
    }

    let len = width as usize * height as usize * channels;
    let mut raster = try_filled(len, 0u8)?;
    reader.read_exact(&mut raster)?;

    if maxval != 255 {
        for v in raster.iter_mut() {
            *v = ((*v as u32).min(maxval) * 255 / maxval) as u8;
        }
    }

    let data = if channels == 3 {
        raster
    } else {
        let mut rgb = try_filled(len * 3, 0u8)?;
        for (dst, &g) in rgb.chunks_exact_mut(3).zip(raster.iter()) {
            dst.fill(g);
        }
        rgb
    };

    Ok(RgbImage::from_data(width, height, data)?)
}

/// Write an image as binary PPM (P6).
///
/// # Arguments
/// * `image`  - The image to encode
/// * `writer` - Destination writer
pub fn write_pnm<W: Write>(image: &RgbImage, mut writer: W) -> IoResult<()> {
    write!(writer, "P6\n{} {}\n255\n", image.width(), image.height())?;
    writer.write_all(image.data())?;
    writer.flush()?;
    Ok(())
}

/// Next whitespace-delimited header token, skipping `#` comments.
fn read_token<R: BufRead>(reader: &mut R) -> IoResult<String> {
    let mut token = String::new();
    let mut in_comment = false;

    loop {
        let byte = match next_byte(reader)? {
            Some(b) => b,
            None if token.is_empty() => {
                return Err(IoError::InvalidData("truncated PNM header".to_string()));
            }
            None => return Ok(token),
        };

        if in_comment {
            in_comment = byte != b'\n' && byte != b'\r';
            continue;
        }
        if byte == b'#' {
            in_comment = true;
            continue;
        }
        if byte.is_ascii_whitespace() {
            // The single whitespace after the last token has been consumed,
            // so the raster starts at the next byte.
            if !token.is_empty() {
                return Ok(token);
            }
            continue;
        }
        token.push(byte as char);
    }
}

fn read_number<R: BufRead>(reader: &mut R, what: &str) -> IoResult<u32> {
    let token = read_token(reader)?;
    token
        .parse()
        .map_err(|_| IoError::InvalidData(format!("bad PNM {what}: '{token}'")))
}

fn next_byte<R: BufRead>(reader: &mut R) -> IoResult<Option<u8>> {
    let buf = reader.fill_buf()?;
    let Some(&byte) = buf.first() else {
        return Ok(None);
    };
    reader.consume(1);
    Ok(Some(byte))
}
