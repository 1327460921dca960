use crate::error::CodecError;
use pixel_enhance::PixelBuffer;
use std::io::Cursor;

/// PNG codec for the enhancement pipeline.
///
/// Decoding accepts any PNG color type and bit depth and normalizes it to
/// 8-bit RGBA: palettes and low bit depths expand, 16-bit samples are
/// stripped to 8, grayscale is replicated into RGB and a missing alpha
/// channel becomes 255.
///
/// Encoding always writes 8-bit RGBA. With `optimize` set the result is
/// re-compressed with oxipng; if that fails the unoptimized bytes are used.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngCodec {
    optimize: bool,
}

impl PngCodec {
    pub fn new(optimize: bool) -> Self {
        Self { optimize }
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, CodecError> {
        decode_png(bytes)
    }

    pub fn encode(&self, buffer: &PixelBuffer) -> Result<Vec<u8>, CodecError> {
        let png_bytes = encode_png(buffer)?;
        if !self.optimize {
            return Ok(png_bytes);
        }

        let original_len = png_bytes.len();
        let optimized = oxipng::optimize_from_memory(
            &png_bytes,
            &oxipng::Options {
                strip: oxipng::StripChunks::Safe,
                optimize_alpha: false,
                ..Default::default()
            },
        )
        .unwrap_or(png_bytes);
        tracing::debug!(
            before = original_len,
            after = optimized.len(),
            "Optimized PNG"
        );
        Ok(optimized)
    }
}

/// Decode PNG bytes into an RGBA buffer.
pub fn decode_png(bytes: &[u8]) -> Result<PixelBuffer, CodecError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| CodecError::Decode(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| CodecError::Decode(e.to_string()))?;
    buf.truncate(info.buffer_size());

    let rgba = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Indexed => {
            return Err(CodecError::Decode(
                "indexed color was not expanded".to_string(),
            ))
        }
    };

    Ok(PixelBuffer::new(info.width, info.height, rgba)?)
}

/// Encode an RGBA buffer as an 8-bit RGBA PNG.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, CodecError> {
    let (width, height) = buffer.dimensions();
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| CodecError::Encode(e.to_string()))?;
        writer
            .write_image_data(buffer.as_bytes())
            .map_err(|e| CodecError::Encode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
