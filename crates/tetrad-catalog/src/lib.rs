//! Local puzzle collection for tetrad.
//!
//! The [`Catalog`] keeps the puzzles a player has received (with their play progress)
//! and the puzzles they are authoring, and writes both through to a [`KeyValueStore`].
//!
//! # Storage layout
//!
//! | Key            | Value                                                   |
//! |----------------|---------------------------------------------------------|
//! | `Puzzles`      | codec-encoded JSON array of played definitions          |
//! | `MadePuzzles`  | plain JSON array of authored definitions                |
//! | `<identity>`   | plain JSON `{"guesses": [...], "score": n}` per puzzle  |
//!
//! Sessions are rebuilt on load by replaying the saved guesses, so the tile order never
//! needs to be stored.
//!
//! # Sharing
//!
//! - [`share_link`] / [`share_token`]: codec-encoded definition arrays for URLs
//! - [`export_json`]: pretty-printed plain JSON for files
//! - [`ShareJob`]: share-token encoding on a background thread
//!
//! # Examples
//!
//! ```
//! use tetrad_catalog::{Catalog, MemoryStore};
//! use tetrad_core::{GroupDefinition, PuzzleDefinition};
//!
//! let definition = PuzzleDefinition::new(
//!     "Letters",
//!     "",
//!     [
//!         GroupDefinition::new("First", ["A", "B", "C", "D"]),
//!         GroupDefinition::new("Second", ["E", "F", "G", "H"]),
//!         GroupDefinition::new("Third", ["I", "J", "K", "L"]),
//!         GroupDefinition::new("Fourth", ["M", "N", "O", "P"]),
//!     ],
//! );
//!
//! let mut catalog = Catalog::load(MemoryStore::new());
//! let id = catalog.add_definition(definition.clone()).unwrap().unwrap();
//! assert!(catalog.add_definition(definition).unwrap().is_none());
//! assert_eq!(catalog.session(id.as_str()).unwrap().title(), "Letters");
//! ```

pub use self::{
    catalog::{AUTHORED_KEY, Catalog, ImportReport, MergeReport, MergeStrategy, PLAYED_KEY},
    selection::Selection,
    share::{SHARE_PATH, ShareJob, export_json, share_link, share_token, token_from_input},
    store::{FileStore, KeyValueStore, MemoryStore, StoreError, is_valid_key},
};

mod catalog;
mod selection;
mod share;
pub mod store;

/// Errors returned by catalog operations.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum CatalogError {
    /// The definition failed validation.
    #[display("{_0}")]
    Invalid(#[from] tetrad_core::ValidityError),
    /// No authored definition exists at the index.
    #[display("no authored puzzle at index {index}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
    },
    /// The input is not valid JSON, or serialization failed.
    #[display("invalid puzzle JSON: {_0}")]
    Json(#[from] serde_json::Error),
    /// Share data could not be encoded or decoded.
    #[display("{_0}")]
    Codec(#[from] tetrad_codec::CodecError),
    /// A background share job stopped without a result.
    #[display("background share job stopped unexpectedly")]
    WorkerDisconnected,
}
