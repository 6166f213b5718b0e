use std::collections::BTreeSet;

/// A set of selected positions in a list that can shrink.
///
/// Front ends keep one of these next to the authored puzzle list. When an entry is
/// removed from the list, [`on_removed`](Self::on_removed) keeps the remaining indices
/// pointing at the same entries.
///
/// # Examples
///
/// ```
/// use tetrad_catalog::Selection;
///
/// let mut selection: Selection = [1, 3, 4].into_iter().collect();
/// selection.on_removed(3);
/// assert_eq!(selection.iter().collect::<Vec<_>>(), [1, 3]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    indices: BTreeSet<usize>,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `index` if it is not selected, and deselects it otherwise.
    ///
    /// Returns `true` if the index is selected afterwards.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.indices.remove(&index) {
            false
        } else {
            self.indices.insert(index);
            true
        }
    }

    /// Selects `index`.
    pub fn insert(&mut self, index: usize) {
        self.indices.insert(index);
    }

    /// Returns `true` if `index` is selected.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of selected indices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Selected indices in ascending order.
    #[must_use]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = usize> {
        self.indices.iter().copied()
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        self.indices.clear();
    }

    /// Updates the selection after the list entry at `index` was removed.
    ///
    /// `index` itself is deselected and every higher index moves down by one.
    pub fn on_removed(&mut self, index: usize) {
        self.indices = self
            .indices
            .iter()
            .filter(|&&i| i != index)
            .map(|&i| if i > index { i - 1 } else { i })
            .collect();
    }
}

impl FromIterator<usize> for Selection {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            indices: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_toggle() {
        let mut selection = Selection::new();
        assert!(selection.toggle(2));
        assert!(selection.contains(2));
        assert!(!selection.toggle(2));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_on_removed_shifts_higher_indices() {
        let mut selection: Selection = [0, 2, 5].into_iter().collect();
        selection.on_removed(1);
        assert_eq!(selection.iter().collect::<Vec<_>>(), [0, 1, 4]);
        selection.on_removed(1);
        assert_eq!(selection.iter().collect::<Vec<_>>(), [0, 3]);
        selection.on_removed(7);
        assert_eq!(selection.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_on_removed_tracks_entries(
            len in 1usize..20,
            selected in proptest::collection::btree_set(0usize..20, 0..10),
            removed in 0usize..20,
        ) {
            let removed = removed % len;
            let mut list: Vec<usize> = (0..len).collect();
            let selected: Vec<usize> = selected.into_iter().filter(|&i| i < len).collect();
            let mut selection: Selection = selected.iter().copied().collect();

            list.remove(removed);
            selection.on_removed(removed);

            let mut expected: Vec<usize> =
                selected.into_iter().filter(|&i| i != removed).collect();
            expected.sort_unstable();
            let actual: Vec<usize> = selection.iter().map(|i| list[i]).collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
