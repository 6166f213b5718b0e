//! Group ranks and their display colors.

use crate::NUM_GROUPS;

/// The color (and difficulty rank) of a group.
///
/// A group's color is fixed by its position in the definition: the first group is
/// always [`GroupColor::Yellow`], the last always [`GroupColor::Purple`]. Authors order
/// groups from easiest to hardest, so the color doubles as a difficulty rank.
///
/// # Examples
///
/// ```
/// use tetrad_core::GroupColor;
///
/// assert_eq!(GroupColor::from_index(0), Some(GroupColor::Yellow));
/// assert_eq!(GroupColor::Purple.index(), 3);
/// assert_eq!(GroupColor::Blue.base_points(), 16);
/// assert_eq!(GroupColor::from_index(4), None);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display,
)]
pub enum GroupColor {
    /// Rank 0, the easiest group.
    #[display("yellow")]
    Yellow,
    /// Rank 1.
    #[display("green")]
    Green,
    /// Rank 2.
    #[display("blue")]
    Blue,
    /// Rank 3, the hardest group.
    #[display("purple")]
    Purple,
}

impl GroupColor {
    /// All colors in rank order.
    pub const ALL: [Self; NUM_GROUPS] = [Self::Yellow, Self::Green, Self::Blue, Self::Purple];

    /// Returns the color for a group index, or `None` if the index is out of range.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the group index (rank) of this color.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Yellow => 0,
            Self::Green => 1,
            Self::Blue => 2,
            Self::Purple => 3,
        }
    }

    /// Points awarded for finding a group of this rank, before the bonus multiplier.
    #[must_use]
    pub fn base_points(self) -> u32 {
        match self {
            Self::Yellow => 10,
            Self::Green => 13,
            Self::Blue => 16,
            Self::Purple => 20,
        }
    }

    /// Group title suggested to authors for a freshly created puzzle.
    #[must_use]
    pub fn default_name(self) -> &'static str {
        match self {
            Self::Yellow => "Easy Group",
            Self::Green => "Medium Group",
            Self::Blue => "Hard Group",
            Self::Purple => "Very Hard Group",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for (i, color) in GroupColor::ALL.into_iter().enumerate() {
            assert_eq!(color.index(), i);
            assert_eq!(GroupColor::from_index(i), Some(color));
        }
    }

    #[test]
    fn test_base_points_increase_with_rank() {
        let points: Vec<_> = GroupColor::ALL.map(GroupColor::base_points).into();
        assert_eq!(points, [10, 13, 16, 20]);
    }
}
