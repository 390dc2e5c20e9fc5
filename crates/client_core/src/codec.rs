//! Base64 helpers shared by the upload and download paths.

use base64::{
    alphabet,
    engine::{
        general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD},
        DecodePaddingMode,
    },
    DecodeError, Engine as _,
};

const KB: f64 = 1024.0;
const MB: f64 = KB * 1024.0;

/// Accepts what servers actually send: unpadded input and non-zero trailing
/// bits in the last symbol.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Standard padded base64 without any data-URL prefix.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decodes standard-alphabet base64, ignoring embedded ASCII whitespace such
/// as line wraps. Padding is optional.
pub fn decode_base64(text: &str) -> Result<Vec<u8>, DecodeError> {
    if text.bytes().any(|b| b.is_ascii_whitespace()) {
        let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        LENIENT.decode(compact)
    } else {
        LENIENT.decode(text)
    }
}

/// Display-only size estimate of the bytes behind a base64 string.
pub fn format_base64_size(base64_text: &str) -> String {
    let estimated = (base64_text.len() as f64 * 3.0) / 4.0;
    if estimated < KB {
        format!("{} B", estimated.round())
    } else if estimated < MB {
        format!("{} KB", (estimated / KB).round())
    } else {
        format!("{} MB", (estimated / MB).round())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_estimated_sizes() {
        assert_eq!(format_base64_size(&"A".repeat(4)), "3 B");
        assert_eq!(format_base64_size(&"A".repeat(1368)), "1 KB");
        assert_eq!(format_base64_size(""), "0 B");
        assert_eq!(format_base64_size(&"A".repeat(1364)), "1023 B");
        assert_eq!(format_base64_size(&"A".repeat(4 * 1024 * 1024)), "3 MB");
    }

    #[test]
    fn decode_restores_original_bytes() {
        let original: Vec<u8> = (0..=255u8).cycle().take(4099).collect();
        let encoded = encode_base64(&original);
        assert!(!encoded.starts_with("data:"));
        assert_eq!(decode_base64(&encoded).expect("decode"), original);
    }

    #[test]
    fn decode_tolerates_line_wrapping() {
        assert_eq!(decode_base64("SGVs\nbG8=\r\n").expect("decode"), b"Hello");
    }

    #[test]
    fn decode_allows_non_canonical_trailing_bits() {
        assert_eq!(decode_base64("AA==").expect("decode"), vec![0x00]);
        assert_eq!(decode_base64("BB==").expect("decode"), vec![0x04]);
        assert_eq!(decode_base64("CC==").expect("decode"), vec![0x08]);
    }

    #[test]
    fn decode_accepts_missing_padding() {
        assert_eq!(decode_base64("SGVsbG8").expect("decode"), b"Hello");
        assert_eq!(decode_base64("SGVsbG8=").expect("decode"), b"Hello");
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_base64("not*base64").is_err());
    }
}
