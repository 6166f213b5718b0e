use serde::{Deserialize, Serialize};
use tetrad_core::{GROUP_SIZE, TileId};

/// A submitted set of four tiles and whether they formed a group.
///
/// Guesses are immutable and kept in submission order. Tiles are referred to by their
/// stable [`TileId`], so a history stays meaningful after the board is reshuffled or
/// rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guess {
    tiles: [TileId; GROUP_SIZE],
    is_correct: bool,
}

impl Guess {
    pub(crate) fn new(tiles: [TileId; GROUP_SIZE], is_correct: bool) -> Self {
        Self { tiles, is_correct }
    }

    /// The guessed tiles, in the order they were submitted.
    #[must_use]
    pub fn tiles(&self) -> &[TileId; GROUP_SIZE] {
        &self.tiles
    }

    /// Returns `true` if all four tiles belong to the same group.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }
}

/// The persisted part of a play session.
///
/// Tile order is not stored; the session is rebuilt from its definition and the
/// guesses are replayed (see [`Puzzle::restore`](crate::Puzzle::restore)). `score` is
/// kept for readers that only want to display it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SaveData {
    /// Guess history in submission order.
    pub guesses: Vec<Guess>,
    /// Score at the time of saving.
    #[serde(alias = "points")]
    pub score: f64,
}
