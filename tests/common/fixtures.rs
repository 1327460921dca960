//! Test fixtures: small images in the forms the API accepts.

use photo_polish::rendering::{encode_base64, encode_png};
use pixel_enhance::{Channel, PixelBuffer};

/// Flat 3x3 mid-gray image
pub fn gray_3x3() -> PixelBuffer {
    PixelBuffer::filled(3, 3, [128, 128, 128, 255])
}

/// 5x5 dark gray image with one bright centre pixel
pub fn bright_centre_5x5() -> PixelBuffer {
    let mut buffer = PixelBuffer::filled(5, 5, [40, 40, 40, 255]);
    for channel in Channel::COLOR {
        buffer.set(2, 2, channel, 200).unwrap();
    }
    buffer
}

/// Colorful gradient with varying alpha
pub fn gradient(width: u32, height: u32) -> PixelBuffer {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                ((x + y) * 7 % 256) as u8,
                (200 + (x + y) % 56) as u8,
            ]);
        }
    }
    PixelBuffer::new(width, height, pixels).unwrap()
}

/// PNG bytes for a buffer
pub fn png_of(buffer: &PixelBuffer) -> Vec<u8> {
    encode_png(buffer).unwrap()
}

/// Base64 PNG for a buffer
pub fn base64_png_of(buffer: &PixelBuffer) -> String {
    encode_base64(&png_of(buffer))
}

/// JSON body for /api/enhance
pub fn enhance_body(buffer: &PixelBuffer, level: Option<i64>) -> String {
    let mut body = serde_json::json!({ "image": base64_png_of(buffer) });
    if let Some(level) = level {
        body["level"] = serde_json::json!(level);
    }
    body.to_string()
}
