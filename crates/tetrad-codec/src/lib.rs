//! Compact, URL-safe text encoding for puzzle data.
//!
//! This crate turns arbitrary bytes into a token that can be embedded in a URL path
//! segment, and back again. The pipeline is:
//!
//! 1. gzip compression of the raw bytes,
//! 2. standard base64 encoding,
//! 3. a URL-safe remap (`+` → `-`, `/` → `_`, padding stripped).
//!
//! Decoding runs the same stages in reverse. [`decode`] is the exact inverse of
//! [`encode`] for every byte sequence, including the empty one.
//!
//! The same token format is used for share links and for the locally stored catalog of
//! played puzzles, so tokens produced on one device must decode on any other.
//!
//! # Examples
//!
//! ```
//! let token = tetrad_codec::encode(b"hello, tetrad").unwrap();
//! assert!(!token.contains(['+', '/', '=']));
//!
//! let bytes = tetrad_codec::decode(&token).unwrap();
//! assert_eq!(bytes, b"hello, tetrad");
//! ```
//!
//! Serializable values can go through JSON first:
//!
//! ```
//! let token = tetrad_codec::compress_object(&vec!["a", "b", "c"]).unwrap();
//! let items: Vec<String> = tetrad_codec::decompress_object(&token).unwrap();
//! assert_eq!(items, ["a", "b", "c"]);
//! ```

pub use self::{
    compress::{compress_object, decode, decompress_object, encode},
    url_safe::{from_url_safe, to_url_safe},
};

mod compress;
pub mod url_safe;

/// Errors produced while decoding a token or (de)serializing its payload.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum CodecError {
    /// The token was empty.
    #[display("token is empty")]
    Empty,
    /// The token was not valid base64 after undoing the URL-safe remap.
    #[display("invalid base64 data: {_0}")]
    Base64(#[from] base64::DecodeError),
    /// Compression or decompression failed, usually because the data was truncated.
    #[display("invalid compressed data: {_0}")]
    Io(#[from] std::io::Error),
    /// The decompressed payload was not the expected JSON.
    #[display("invalid JSON payload: {_0}")]
    Json(#[from] serde_json::Error),
}
