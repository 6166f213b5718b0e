//! Share links and export files.
//!
//! Both carry a JSON array of [`PuzzleDefinition`]s. A share token is the array run
//! through the codec so it fits in a URL path segment; an export file is the same array
//! as pretty-printed plain JSON.

use std::{
    sync::mpsc::{self, TryRecvError},
    thread,
};

use tetrad_codec::CodecError;
use tetrad_core::PuzzleDefinition;

use crate::CatalogError;

/// Path segment that precedes the token in a share link.
pub const SHARE_PATH: &str = "add/";

/// Encodes definitions into a share token.
///
/// # Errors
///
/// Returns an error if the definitions cannot be serialized or compressed.
pub fn share_token(definitions: &[PuzzleDefinition]) -> Result<String, CodecError> {
    tetrad_codec::compress_object(definitions)
}

/// Builds a share link of the form `<base>add/<token>`.
///
/// # Errors
///
/// Returns an error if the definitions cannot be encoded.
///
/// # Examples
///
/// ```
/// use tetrad_catalog::{share_link, token_from_input};
///
/// let link = share_link("http://example.com/cm/", &[]).unwrap();
/// assert!(link.starts_with("http://example.com/cm/add/"));
/// assert!(!token_from_input(&link).contains('/'));
/// ```
pub fn share_link(base: &str, definitions: &[PuzzleDefinition]) -> Result<String, CodecError> {
    Ok(format!("{base}{SHARE_PATH}{}", share_token(definitions)?))
}

/// Extracts the token from a share link, or returns a bare token unchanged.
#[must_use]
pub fn token_from_input(input: &str) -> &str {
    let input = input.trim();
    match input.rfind(&format!("/{SHARE_PATH}")) {
        Some(pos) => &input[pos + SHARE_PATH.len() + 1..],
        None => input,
    }
}

/// Serializes definitions as the pretty-printed JSON of an export file.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export_json(definitions: &[PuzzleDefinition]) -> Result<String, CatalogError> {
    Ok(serde_json::to_string_pretty(definitions)?)
}

/// A share token being encoded on a background thread.
///
/// The job owns its own copy of the definitions, so the catalog stays free to use while
/// a large export compresses.
pub struct ShareJob {
    receiver: mpsc::Receiver<Result<String, CodecError>>,
}

impl std::fmt::Debug for ShareJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareJob").finish()
    }
}

impl ShareJob {
    /// Starts encoding `definitions` on a new thread.
    #[must_use]
    pub fn spawn(definitions: Vec<PuzzleDefinition>) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(share_token(&definitions));
        });
        Self { receiver: rx }
    }

    /// Returns the token if encoding has finished, without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Codec`] if encoding failed, and
    /// [`CatalogError::WorkerDisconnected`] if the result was already taken or the
    /// thread died.
    pub fn poll(&mut self) -> Result<Option<String>, CatalogError> {
        match self.receiver.try_recv() {
            Ok(result) => Ok(Some(result?)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(CatalogError::WorkerDisconnected),
        }
    }

    /// Blocks until encoding finishes.
    ///
    /// # Errors
    ///
    /// Same as [`poll`](Self::poll).
    pub fn wait(self) -> Result<String, CatalogError> {
        let result = self
            .receiver
            .recv()
            .map_err(|_| CatalogError::WorkerDisconnected)?;
        Ok(result?)
    }
}
