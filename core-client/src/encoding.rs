//! Base64 helpers for handing binary exports to a document store.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Standard alphabet, padded.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Inverse of [`encode_base64`]. Accepts a `data:...;base64,` prefix.
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(strip_data_uri_prefix(encoded).trim())
}

/// Drop a `data:<mime>;base64,` prefix if present.
pub fn strip_data_uri_prefix(encoded: &str) -> &str {
    if !encoded.starts_with("data:") {
        return encoded;
    }

    match encoded.find(";base64,") {
        Some(index) => &encoded[index + ";base64,".len()..],
        None => encoded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_edge_lengths() {
        let inputs: [&[u8]; 5] = [b"", b"a", b"ab", b"abc", &[0x00, 0xff, 0x50, 0x4b, 0x03, 0x04]];
        for input in inputs {
            assert_eq!(decode_base64(&encode_base64(input)).unwrap(), input);
        }
    }

    #[test]
    fn test_padding_is_kept() {
        assert_eq!(encode_base64(b"a"), "YQ==");
        assert_eq!(encode_base64(b"ab"), "YWI=");
    }

    #[test]
    fn test_strip_data_uri_prefix() {
        let uri = "data:application/vnd.openxmlformats-officedocument.spreadsheetml.sheet;base64,UEsDBA==";
        assert_eq!(strip_data_uri_prefix(uri), "UEsDBA==");
        assert_eq!(strip_data_uri_prefix("UEsDBA=="), "UEsDBA==");
        assert_eq!(strip_data_uri_prefix("data:text/plain,hello"), "data:text/plain,hello");
        assert_eq!(decode_base64(uri).unwrap(), vec![0x50, 0x4b, 0x03, 0x04]);
    }

    #[test]
    fn test_invalid_input() {
        assert!(decode_base64("not base64!").is_err());
    }
}
