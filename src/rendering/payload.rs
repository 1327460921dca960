//! Base64 image payloads as used by the JSON API and the remote polish wire
//! format. Both plain base64 and `data:image/...;base64,` URLs are accepted.

use base64::{engine::general_purpose, Engine as _};

const DATA_URL_MARKER: &str = ";base64,";

/// Decode a base64 payload, stripping a data URL prefix if present.
pub fn decode_base64_image(data: &str) -> Result<Vec<u8>, String> {
    let normalized = data.trim();

    let encoded = if normalized.starts_with("data:") {
        let start = normalized
            .find(DATA_URL_MARKER)
            .ok_or_else(|| "data URL is missing the base64 marker".to_string())?;
        &normalized[start + DATA_URL_MARKER.len()..]
    } else {
        normalized
    };

    if encoded.is_empty() {
        return Err("empty image payload".to_string());
    }

    general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| e.to_string())
}

/// Encode bytes as plain standard base64.
pub fn encode_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_base64() {
        assert_eq!(decode_base64_image("aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn test_data_url() {
        assert_eq!(
            decode_base64_image("data:image/png;base64,aGVsbG8=").unwrap(),
            b"hello"
        );
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(decode_base64_image("  aGVsbG8=\n").unwrap(), b"hello");
    }

    #[test]
    fn test_data_url_without_marker() {
        let err = decode_base64_image("data:image/png,hello").unwrap_err();
        assert!(err.contains("marker"));
    }

    #[test]
    fn test_invalid_base64() {
        assert!(decode_base64_image("not base64!!").is_err());
        assert!(decode_base64_image("").is_err());
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode_base64(b"hello"), "aGVsbG8=");
    }
}
