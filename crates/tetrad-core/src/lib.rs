//! Core data structures for tetrad puzzles.
//!
//! A tetrad puzzle hides [`NUM_GROUPS`] groups of [`GROUP_SIZE`] words each. This crate
//! holds the pieces every other component agrees on:
//!
//! 1. **Definitions** - The portable, serializable description of a puzzle
//!    - [`definition`]: [`PuzzleDefinition`] and [`GroupDefinition`]
//!    - [`validity`]: structural checks a definition must pass before it is played or saved
//!
//! 2. **Identity** - Content-derived puzzle keys
//!    - [`identity`]: [`PuzzleId`], a fixed-length URL-safe digest of the words only
//!
//! 3. **Small value types** used by the game engine
//!    - [`color`]: [`GroupColor`], the fixed rank → color/points lookup
//!    - [`tile_id`]: [`TileId`], a stable index for each of the 16 words
//!
//! # Examples
//!
//! ```
//! use tetrad_core::{GroupDefinition, PuzzleDefinition, Validity};
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
//! assert_eq!(definition.check_validity(), Validity::Valid);
//! assert_eq!(definition.identity().as_str().len(), 16);
//! ```

pub mod color;
pub mod definition;
pub mod identity;
pub mod tile_id;
pub mod validity;

pub use self::{
    color::GroupColor,
    definition::{GroupDefinition, PuzzleDefinition},
    identity::{PuzzleId, identity},
    tile_id::TileId,
    validity::{Validity, ValidityError, check_validity},
};

/// Number of words in each group.
pub const GROUP_SIZE: usize = 4;

/// Number of groups in a puzzle.
pub const NUM_GROUPS: usize = 4;

/// Number of tiles on the board.
pub const NUM_TILES: usize = GROUP_SIZE * NUM_GROUPS;

/// Number of incorrect guesses allowed before the puzzle ends.
pub const WRONG_GUESSES: usize = 4;

/// Highest star rating.
pub const MAX_STARS: u8 = 5;

/// Starting (and highest) bonus multiplier, in tenths.
pub const MAX_BONUS_TENTHS: u32 = 20;

/// Lowest bonus multiplier, in tenths.
pub const MIN_BONUS_TENTHS: u32 = 5;

/// Bonus multiplier decrease after a correct guess, in tenths.
pub const BONUS_DECREASE_TENTHS: u32 = 2;

/// Bonus multiplier decrease after an incorrect guess, in tenths.
pub const BONUS_PENALTY_TENTHS: u32 = 5;
