use std::io::{Read as _, Write as _};

use flate2::{Compression, read::MultiGzDecoder, write::GzEncoder};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    CodecError,
    url_safe::{decode_bytes, encode_bytes},
};

const READ_CHUNK_LEN: usize = 4096;

/// Compresses `bytes` and encodes them as a URL-safe token.
///
/// # Errors
///
/// Returns [`CodecError::Io`] if the compressor fails.
pub fn encode(bytes: &[u8]) -> Result<String, CodecError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    let compressed = encoder.finish()?;
    let token = encode_bytes(&compressed);
    log::debug!(
        "compression: {} raw => {} gzip => {} token",
        bytes.len(),
        compressed.len(),
        token.len()
    );
    Ok(token)
}

/// Decodes a token produced by [`encode`] back into the original bytes.
///
/// The decompressor output is drained chunk by chunk and concatenated in order before
/// the result is returned, so callers only ever observe the complete payload. Every gzip
/// member in the token is decoded; bytes after the last member are an error.
///
/// # Errors
///
/// Returns [`CodecError::Empty`] for an empty token, [`CodecError::Base64`] if the token
/// is not base64, and [`CodecError::Io`] if the compressed stream is malformed or
/// truncated.
pub fn decode(token: &str) -> Result<Vec<u8>, CodecError> {
    if token.is_empty() {
        return Err(CodecError::Empty);
    }
    let compressed = decode_bytes(token)?;
    let mut decoder = MultiGzDecoder::new(compressed.as_slice());
    let mut bytes = Vec::new();
    let mut chunk = [0u8; READ_CHUNK_LEN];
    loop {
        let len = decoder.read(&mut chunk)?;
        if len == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..len]);
    }
    log::debug!(
        "decompression: {} token => {} gzip => {} raw",
        token.len(),
        compressed.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// Serializes `value` as JSON and encodes it with [`encode`].
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialization fails, or any error from [`encode`].
pub fn compress_object<T>(value: &T) -> Result<String, CodecError>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_vec(value)?;
    encode(&json)
}

/// Decodes a token with [`decode`] and parses the payload as JSON.
///
/// # Errors
///
/// Returns any error from [`decode`], or [`CodecError::Json`] if the payload does not
/// parse as `T`.
pub fn decompress_object<T>(token: &str) -> Result<T, CodecError>
where
    T: DeserializeOwned,
{
    let bytes = decode(token)?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        title: String,
        items: Vec<String>,
    }

    #[test]
    fn test_empty_bytes_round_trip() {
        let token = encode(&[]).unwrap();
        assert!(!token.is_empty());
        assert_eq!(decode(&token).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_token_is_url_safe() {
        let bytes: Vec<u8> = (0..=255).cycle().take(2000).collect();
        let token = encode(&bytes).unwrap();
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_payload_larger_than_one_chunk() {
        let bytes: Vec<u8> = (0..READ_CHUNK_LEN * 5)
            .map(|i| u8::try_from((i * 7) % 251).unwrap())
            .collect();
        assert_eq!(decode(&encode(&bytes).unwrap()).unwrap(), bytes);
    }

    #[test]
    fn test_decode_empty_token() {
        assert!(matches!(decode(""), Err(CodecError::Empty)));
    }

    #[test]
    fn test_decode_not_base64() {
        assert!(matches!(decode("$$$$"), Err(CodecError::Base64(_))));
    }

    #[test]
    fn test_decode_not_gzip() {
        let token = encode_bytes(b"definitely not a gzip stream");
        assert!(matches!(decode(&token), Err(CodecError::Io(_))));
    }

    fn gzip(bytes: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(bytes).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_decode_rejects_trailing_data() {
        let mut compressed = gzip(b"hello");
        compressed.extend_from_slice(b"JUNKJUNKJUNKJUNK");
        assert!(matches!(
            decode(&encode_bytes(&compressed)),
            Err(CodecError::Io(_))
        ));
    }

    #[test]
    fn test_decode_concatenated_members() {
        let compressed = [gzip(b"hello "), gzip(b"world")].concat();
        assert_eq!(decode(&encode_bytes(&compressed)).unwrap(), b"hello world");
    }

    #[test]
    fn test_decode_truncated_token() {
        let token = encode(b"some text that will be cut short").unwrap();
        let truncated = &token[..token.len() / 2];
        assert!(decode(truncated).is_err());
    }

    #[test]
    fn test_object_round_trip() {
        let sample = Sample {
            title: "Fruits".to_owned(),
            items: vec!["Apple".to_owned(), "Pear".to_owned()],
        };
        let token = compress_object(&sample).unwrap();
        assert_eq!(decompress_object::<Sample>(&token).unwrap(), sample);
    }

    #[test]
    fn test_decompress_object_wrong_shape() {
        let token = compress_object(&42).unwrap();
        assert!(matches!(
            decompress_object::<Sample>(&token),
            Err(CodecError::Json(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(bytes in proptest::collection::vec(any::<u8>(), 0..2048)) {
            let token = encode(&bytes).unwrap();
            prop_assert_eq!(decode(&token).unwrap(), bytes);
        }
    }
}
