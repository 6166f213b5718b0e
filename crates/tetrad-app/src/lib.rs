//! The `tetrad` command-line front end.
//!
//! A thin layer over [`tetrad_catalog`]: the binary parses [`cli::Args`], loads one
//! [`Catalog`](tetrad_catalog::Catalog) from a [`FileStore`](tetrad_catalog::FileStore)
//! and passes it to [`commands::run`].

pub mod cli;
pub mod commands;
mod play;

/// Errors reported by the command-line front end.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AppError {
    /// Reading input or writing output failed.
    #[display("I/O error: {_0}")]
    Io(#[from] std::io::Error),
    /// A puzzle file is not valid JSON.
    #[display("invalid puzzle JSON: {_0}")]
    Json(#[from] serde_json::Error),
    /// The data directory could not be opened.
    #[display("{_0}")]
    Store(#[from] tetrad_catalog::StoreError),
    /// A catalog operation failed.
    #[display("{_0}")]
    Catalog(#[from] tetrad_catalog::CatalogError),
    /// An authored puzzle cannot be played.
    #[display("{_0}")]
    Game(#[from] tetrad_game::GameError),
    /// No played puzzle has the given identity.
    #[display("no played puzzle with id {id:?}")]
    UnknownPuzzle {
        /// The requested identity.
        id: String,
    },
}
