//! PNG image format support
//!
//! Any PNG colour type is decoded to 8-bit RGB: palettes are expanded,
//! 16-bit samples are stripped to 8 bits, grey is replicated and alpha is
//! dropped. Output is always 8-bit RGB.

use crate::{IoError, IoResult};
use deband_core::RgbImage;
use deband_core::buffer::try_filled;
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<RgbImage> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = try_filled(buf_size, 0u8)?;
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let samples = match output_info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "PNG palette was not expanded".to_string(),
            ));
        }
    };
    if output_info.bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "PNG bit depth {:?} after normalisation",
            output_info.bit_depth
        )));
    }

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let mut image = RgbImage::new(width, height)?;

    for y in 0..height {
        let src = &data[y as usize * bytes_per_row..][..width as usize * samples];
        let dst = image.row_mut(y);
        for (out, px) in dst.chunks_exact_mut(3).zip(src.chunks_exact(samples)) {
            if samples < 3 {
                out.fill(px[0]);
            } else {
                out.copy_from_slice(&px[..3]);
            }
        }
    }

    tracing::debug!(width, height, samples, "decoded PNG");
    Ok(image)
}

/// Write an image as 8-bit RGB PNG
pub fn write_png<W: Write>(image: &RgbImage, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, image.width(), image.height());
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(image.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deband_core::Rgb;
    use std::io::Cursor;

    fn encode(width: u32, height: u32, color: ColorType, depth: BitDepth, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(depth);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
            writer.finish().unwrap();
        }
        out
    }

    #[test]
    fn test_rgb_round_trip() {
        let img = RgbImage::from_fn(4, 3, |x, y| Rgb::new(x as u8 * 60, y as u8 * 80, 17)).unwrap();
        let mut bytes = Vec::new();
        write_png(&img, &mut bytes).unwrap();
        let back = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn test_grey_expands() {
        let bytes = encode(2, 1, ColorType::Grayscale, BitDepth::Eight, &[7, 200]);
        let img = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(img.get_rgb(0, 0), Some(Rgb::new(7, 7, 7)));
        assert_eq!(img.get_rgb(1, 0), Some(Rgb::new(200, 200, 200)));
    }

    #[test]
    fn test_rgba_drops_alpha() {
        let bytes = encode(1, 1, ColorType::Rgba, BitDepth::Eight, &[1, 2, 3, 0]);
        let img = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(img.get_rgb(0, 0), Some(Rgb::new(1, 2, 3)));
    }

    #[test]
    fn test_sixteen_bit_strips() {
        let bytes = encode(
            1,
            1,
            ColorType::Rgb,
            BitDepth::Sixteen,
            &[0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc],
        );
        let img = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(img.get_rgb(0, 0), Some(Rgb::new(0x12, 0x56, 0x9a)));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        assert!(matches!(
            read_png(Cursor::new(b"not a png".to_vec())),
            Err(IoError::DecodeError(_))
        ));
    }
}
