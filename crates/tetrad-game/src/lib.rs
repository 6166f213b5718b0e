//! Game session management for tetrad puzzles.
//!
//! This crate provides the [`Puzzle`] play session: the board of 16 tiles, the current
//! selection, guess history, score and completion. It builds on the definitions and
//! identities in [`tetrad_core`].
//!
//! # Overview
//!
//! - [`Puzzle`]: one play session, built from a valid [`PuzzleDefinition`]
//! - [`Tile`] / [`TileState`]: a word on the board and its selection state
//! - [`Group`]: a hidden group and its four tiles
//! - [`Guess`]: one submitted set of four tiles
//! - [`SaveData`]: the persisted part of a session, replayed with [`Puzzle::restore`]
//! - [`PuzzleStatus`]: not started, started, or complete
//!
//! # Examples
//!
//! ```
//! use tetrad_core::{GroupDefinition, PuzzleDefinition, TileId};
//! use tetrad_game::{Puzzle, PuzzleStatus};
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
//! let mut puzzle = Puzzle::new(definition).unwrap();
//!
//! let first_group = [0, 1, 2, 3].map(|i| TileId::new(0, i));
//! let guess = puzzle.guess(&first_group).unwrap();
//! assert!(guess.is_correct());
//! assert_eq!(puzzle.score(), 20.0);
//! assert_eq!(puzzle.status(), PuzzleStatus::Started);
//! ```
//!
//! [`PuzzleDefinition`]: tetrad_core::PuzzleDefinition

pub use self::{
    guess::{Guess, SaveData},
    puzzle::Puzzle,
    status::PuzzleStatus,
    tile::{Group, Tile, TileState},
};

mod guess;
mod puzzle;
mod score;
mod status;
mod tile;

/// Errors that can occur while creating a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum GameError {
    /// The definition failed validation and cannot be played.
    #[display("cannot play this puzzle: {_0}")]
    InvalidDefinition(#[from] tetrad_core::ValidityError),
}
