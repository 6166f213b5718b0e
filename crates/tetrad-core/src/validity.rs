//! Structural validation of puzzle definitions.

use std::collections::HashSet;

use crate::{GROUP_SIZE, NUM_GROUPS, PuzzleDefinition};

/// Result of checking a [`PuzzleDefinition`].
///
/// Every variant other than [`Validity::Valid`] names the first rule the definition
/// breaks. The display text is meant to be shown to the author as-is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant,
)]
pub enum Validity {
    /// All checks passed.
    #[display("the puzzle is valid")]
    Valid,
    /// The puzzle title is empty.
    #[display("the puzzle needs a title")]
    EmptyTitle,
    /// A group title is empty.
    #[display("every group needs a title")]
    EmptyGroupTitle,
    /// An item is the empty string.
    #[display("every group needs 4 words, and none may be blank")]
    EmptyWord,
    /// The puzzle does not have exactly 4 groups.
    #[display("the puzzle must have exactly 4 groups")]
    WrongGroupCount,
    /// A group does not have exactly 4 items.
    #[display("every group must have exactly 4 words")]
    WrongGroupSize,
    /// The same word appears more than once.
    #[display("each word may only appear once in the puzzle")]
    DuplicateWord,
}

impl Validity {
    /// Converts to a `Result`, mapping [`Validity::Valid`] to `Ok(())`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidityError`] for every other variant.
    pub fn into_result(self) -> Result<(), ValidityError> {
        match self {
            Self::Valid => Ok(()),
            reason => Err(ValidityError { reason }),
        }
    }
}

/// A definition failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid puzzle: {reason}")]
pub struct ValidityError {
    reason: Validity,
}

impl ValidityError {
    /// The rule that failed. Never [`Validity::Valid`].
    #[must_use]
    pub fn reason(&self) -> Validity {
        self.reason
    }
}

/// Checks a definition, returning the first rule it breaks.
///
/// Rules are checked in a fixed order:
///
/// 1. the title is not empty,
/// 2. there are exactly 4 groups,
/// 3. for each group in order: its title is not empty, it has exactly 4 items, and each
///    item in order is neither empty nor a repeat of any earlier item in the puzzle.
///
/// Word comparison is exact and case-sensitive.
///
/// # Examples
///
/// ```
/// use tetrad_core::{GroupDefinition, PuzzleDefinition, Validity, check_validity};
///
/// let mut definition = PuzzleDefinition::new(
///     "Letters",
///     "",
///     [
///         GroupDefinition::new("First", ["A", "B", "C", "D"]),
///         GroupDefinition::new("Second", ["E", "F", "G", "H"]),
///         GroupDefinition::new("Third", ["I", "J", "K", "L"]),
///         GroupDefinition::new("Fourth", ["M", "N", "O", "A"]),
///     ],
/// );
/// assert_eq!(check_validity(&definition), Validity::DuplicateWord);
///
/// definition.groups[3].items[3] = "a".to_owned();
/// assert_eq!(check_validity(&definition), Validity::Valid);
/// ```
#[must_use]
pub fn check_validity(definition: &PuzzleDefinition) -> Validity {
    if definition.title.is_empty() {
        return Validity::EmptyTitle;
    }
    if definition.groups.len() != NUM_GROUPS {
        return Validity::WrongGroupCount;
    }

    let mut words = HashSet::new();
    for group in &definition.groups {
        if group.title.is_empty() {
            return Validity::EmptyGroupTitle;
        }
        if group.items.len() != GROUP_SIZE {
            return Validity::WrongGroupSize;
        }
        for word in &group.items {
            if word.is_empty() {
                return Validity::EmptyWord;
            }
            if !words.insert(word.as_str()) {
                return Validity::DuplicateWord;
            }
        }
    }

    Validity::Valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GroupDefinition;

    fn letters() -> PuzzleDefinition {
        PuzzleDefinition::new(
            "Letters",
            "",
            [
                GroupDefinition::new("First", ["A", "B", "C", "D"]),
                GroupDefinition::new("Second", ["E", "F", "G", "H"]),
                GroupDefinition::new("Third", ["I", "J", "K", "L"]),
                GroupDefinition::new("Fourth", ["M", "N", "O", "P"]),
            ],
        )
    }

    #[test]
    fn test_valid() {
        assert_eq!(check_validity(&letters()), Validity::Valid);
        assert!(letters().validate().is_ok());
    }

    #[test]
    fn test_empty_title() {
        let mut definition = letters();
        definition.title.clear();
        assert_eq!(check_validity(&definition), Validity::EmptyTitle);
    }

    #[test]
    fn test_wrong_group_count() {
        let mut definition = letters();
        definition.groups.pop();
        assert_eq!(check_validity(&definition), Validity::WrongGroupCount);

        let mut definition = letters();
        definition
            .groups
            .push(GroupDefinition::new("Fifth", ["Q", "R", "S", "T"]));
        assert_eq!(check_validity(&definition), Validity::WrongGroupCount);
    }

    #[test]
    fn test_empty_group_title() {
        let mut definition = letters();
        definition.groups[2].title.clear();
        assert_eq!(check_validity(&definition), Validity::EmptyGroupTitle);
    }

    #[test]
    fn test_wrong_group_size() {
        let mut definition = letters();
        definition.groups[1].items.push("X".to_owned());
        assert_eq!(check_validity(&definition), Validity::WrongGroupSize);
    }

    #[test]
    fn test_empty_word() {
        let mut definition = letters();
        definition.groups[3].items[0].clear();
        assert_eq!(check_validity(&definition), Validity::EmptyWord);
    }

    #[test]
    fn test_duplicate_across_groups() {
        let mut definition = letters();
        definition.groups[2].items[1] = "B".to_owned();
        assert_eq!(check_validity(&definition), Validity::DuplicateWord);
    }

    #[test]
    fn test_duplicate_within_group() {
        let mut definition = letters();
        definition.groups[0].items[3] = "A".to_owned();
        assert_eq!(check_validity(&definition), Validity::DuplicateWord);
    }

    #[test]
    fn test_first_failing_rule_wins() {
        // An empty title outranks everything else.
        let mut definition = letters();
        definition.title.clear();
        definition.groups.pop();
        assert_eq!(check_validity(&definition), Validity::EmptyTitle);

        // Within the groups, the earlier group is reported first.
        let mut definition = letters();
        definition.groups[0].items[1] = "A".to_owned();
        definition.groups[1].title.clear();
        assert_eq!(check_validity(&definition), Validity::DuplicateWord);

        // A group title is checked before that group's size.
        let mut definition = letters();
        definition.groups[1].title.clear();
        definition.groups[1].items.pop();
        assert_eq!(check_validity(&definition), Validity::EmptyGroupTitle);
    }

    #[test]
    fn test_validate_reports_reason() {
        let mut definition = letters();
        definition.groups[0].items[0].clear();
        let err = definition.validate().unwrap_err();
        assert_eq!(err.reason(), Validity::EmptyWord);
        assert!(err.to_string().contains("blank"));
    }
}
