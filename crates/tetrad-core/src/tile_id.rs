//! Stable tile identifiers.

use serde::{Deserialize, Serialize};

use crate::{GROUP_SIZE, GroupColor, NUM_TILES};

/// A stable identifier for one of the 16 tiles of a puzzle.
///
/// The id is derived from the tile's place in the definition, `group * 4 + item`, so it
/// does not depend on the shuffled board order. Guess history stores these ids, which
/// lets a saved history be replayed onto a freshly shuffled session.
///
/// Serialized as a plain integer.
///
/// # Examples
///
/// ```
/// use tetrad_core::{GroupColor, TileId};
///
/// let id = TileId::new(2, 1);
/// assert_eq!(id.index(), 9);
/// assert_eq!(id.group(), 2);
/// assert_eq!(id.item(), 1);
/// assert_eq!(id.color(), GroupColor::Blue);
/// assert_eq!(TileId::from_index(9), Some(id));
/// assert_eq!(TileId::from_index(16), None);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(try_from = "usize", into = "usize")]
pub struct TileId(u8);

impl TileId {
    /// All tile ids in definition order.
    pub const ALL: [Self; NUM_TILES] = {
        let mut all = [Self(0); NUM_TILES];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < NUM_TILES {
            all[i] = Self(i as u8);
            i += 1;
        }
        all
    };

    /// Creates the id of item `item` in group `group`.
    ///
    /// # Panics
    ///
    /// Panics if `group` or `item` is not in the range 0-3.
    #[must_use]
    pub fn new(group: usize, item: usize) -> Self {
        assert!(
            group < GroupColor::ALL.len() && item < GROUP_SIZE,
            "tile position out of range: group {group}, item {item}"
        );
        Self::ALL[group * GROUP_SIZE + item]
    }

    /// Returns the id for a flat index, or `None` if the index is not in the range 0-15.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the flat index (0-15).
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// Returns the group index (0-3).
    #[must_use]
    pub fn group(self) -> usize {
        self.index() / GROUP_SIZE
    }

    /// Returns the item index within the group (0-3).
    #[must_use]
    pub fn item(self) -> usize {
        self.index() % GROUP_SIZE
    }

    /// Returns the color of the group this tile belongs to.
    #[must_use]
    pub fn color(self) -> GroupColor {
        GroupColor::ALL[self.group()]
    }
}

impl TryFrom<usize> for TileId {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::from_index(value).ok_or_else(|| format!("tile id out of range: {value}"))
    }
}

impl From<TileId> for usize {
    fn from(id: TileId) -> Self {
        id.index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_ids_cover_every_group_and_item() {
        for (i, id) in TileId::ALL.into_iter().enumerate() {
            assert_eq!(id.index(), i);
            assert_eq!(TileId::new(id.group(), id.item()), id);
        }
    }

    #[test]
    #[should_panic(expected = "tile position out of range")]
    fn test_new_rejects_large_item() {
        let _ = TileId::new(0, 4);
    }

    #[test]
    fn test_serializes_as_integer() {
        let json = serde_json::to_string(&TileId::new(1, 2)).unwrap();
        assert_eq!(json, "6");
        assert_eq!(serde_json::from_str::<TileId>("6").unwrap(), TileId::new(1, 2));
        assert!(serde_json::from_str::<TileId>("16").is_err());
    }
}
