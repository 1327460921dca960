pub mod codec;
pub mod payload;

pub use codec::{decode_png, encode_png, PngCodec};
pub use payload::{decode_base64_image, encode_base64};
