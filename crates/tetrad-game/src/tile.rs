use tetrad_core::{GROUP_SIZE, GroupColor, TileId};

/// Selection state of a tile.
///
/// Tiles move `Free ⇄ Selected` while the player picks words, and `Free | Selected →
/// Grouped` when their group is found. Nothing leaves `Grouped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum TileState {
    /// On the board and not selected.
    #[default]
    Free,
    /// On the board and selected for the next guess.
    Selected,
    /// Removed from the board as part of a found group.
    Grouped,
}

/// A word on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    id: TileId,
    text: String,
    state: TileState,
}

impl Tile {
    pub(crate) fn new(id: TileId, text: String) -> Self {
        Self {
            id,
            text,
            state: TileState::Free,
        }
    }

    /// The tile's stable id.
    #[must_use]
    pub fn id(&self) -> TileId {
        self.id
    }

    /// The word shown on the tile.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The color of the group the tile belongs to.
    #[must_use]
    pub fn color(&self) -> GroupColor {
        self.id.color()
    }

    /// Current selection state.
    #[must_use]
    pub fn state(&self) -> TileState {
        self.state
    }

    /// Returns `true` if the tile has not been grouped yet.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.state.is_grouped()
    }

    pub(crate) fn toggle_selected(&mut self) {
        self.state = match self.state {
            TileState::Free => TileState::Selected,
            TileState::Selected => TileState::Free,
            TileState::Grouped => TileState::Grouped,
        };
    }

    pub(crate) fn deselect(&mut self) {
        if self.state.is_selected() {
            self.state = TileState::Free;
        }
    }

    pub(crate) fn remove_from_play(&mut self) {
        self.state = TileState::Grouped;
    }
}

/// A hidden group of four tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    title: String,
    color: GroupColor,
    tiles: [TileId; GROUP_SIZE],
}

impl Group {
    pub(crate) fn new(title: String, color: GroupColor) -> Self {
        let tiles = std::array::from_fn(|item| TileId::new(color.index(), item));
        Self {
            title,
            color,
            tiles,
        }
    }

    /// The group's category name.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The group's color, which is also its rank.
    #[must_use]
    pub fn color(&self) -> GroupColor {
        self.color
    }

    /// The ids of the group's tiles, in definition order.
    #[must_use]
    pub fn tiles(&self) -> &[TileId; GROUP_SIZE] {
        &self.tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_and_group() {
        let mut tile = Tile::new(TileId::new(1, 0), "E".to_owned());
        assert!(tile.state().is_free());
        tile.toggle_selected();
        assert!(tile.state().is_selected());
        tile.toggle_selected();
        assert!(tile.state().is_free());

        tile.toggle_selected();
        tile.remove_from_play();
        assert!(!tile.is_visible());
        tile.toggle_selected();
        tile.deselect();
        assert!(tile.state().is_grouped());
    }

    #[test]
    fn test_group_tiles_follow_color() {
        let group = Group::new("Third".to_owned(), GroupColor::Blue);
        assert_eq!(group.tiles().map(TileId::index), [8, 9, 10, 11]);
    }
}
