// src/decode.rs

use base64::decode;

use crate::error::UploadResult;

/// Decodes a Base64 encoded string to bytes.
///
/// Leading and trailing whitespace is ignored, so a payload saved with a
/// trailing newline decodes the same as the raw request body.
///
/// # Arguments
///
/// * `encoded_data` - A string containing the Base64 encoded data.
///
/// # Returns
///
/// * A vector of bytes containing the decoded data.
pub fn decode_from_base64(encoded_data: &str) -> UploadResult<Vec<u8>> {
    let decoded_data = decode(encoded_data.trim())?;
    Ok(decoded_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_to_base64;
    use crate::error::UploadError;

    #[test]
    fn test_decode_padding() {
        assert_eq!(decode_from_base64("AA==").unwrap(), vec![0]);
        assert_eq!(decode_from_base64("AAA=").unwrap(), vec![0, 0]);
        assert_eq!(decode_from_base64("AAAA").unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn test_decode_trims_newline() {
        assert_eq!(decode_from_base64("R0lGODlh\n").unwrap(), b"GIF89a");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode_from_base64("not*base64").unwrap_err();
        assert!(matches!(err, UploadError::InvalidBase64 { .. }));
    }

    #[test]
    fn test_decode_inverts_encode() {
        let data: Vec<u8> = (0..=255u8).rev().collect();
        assert_eq!(decode_from_base64(&encode_to_base64(&data)).unwrap(), data);
    }
}
