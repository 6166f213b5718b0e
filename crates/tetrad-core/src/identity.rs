//! Content-derived puzzle identities.
//!
//! The identity is the key under which a played puzzle and its progress are stored, and
//! the value used to recognize a puzzle that was already imported. It depends only on
//! the words and their order. Titles, subtitle and starting configuration do not
//! contribute, so re-titled copies of the same puzzle collapse into one entry.
//!
//! The hash input is each group's items joined by `", "`, with groups joined by `"; "`.
//! The first 12 bytes of the MD5 digest of that string are encoded as URL-safe base64,
//! which always gives 16 characters. Other implementations compute the same value, so
//! the separators and digest must not change.

use std::borrow::Borrow;

use md5::{Digest as _, Md5};
use serde::{Deserialize, Serialize};
use tetrad_codec::url_safe::encode_bytes;

use crate::PuzzleDefinition;

const DIGEST_PREFIX_LEN: usize = 12;

/// A fixed-length, URL-safe puzzle identity.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct PuzzleId(String);

impl PuzzleId {
    /// Wraps an identity string, such as one taken from a link or a command line.
    ///
    /// No validation is performed; an id that no puzzle hashes to simply never matches.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PuzzleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PuzzleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Computes the identity of a definition.
///
/// # Examples
///
/// ```
/// use tetrad_core::{GroupDefinition, PuzzleDefinition, identity};
///
/// let groups = [
///     GroupDefinition::new("First", ["A", "B", "C", "D"]),
///     GroupDefinition::new("Second", ["E", "F", "G", "H"]),
///     GroupDefinition::new("Third", ["I", "J", "K", "L"]),
///     GroupDefinition::new("Fourth", ["M", "N", "O", "P"]),
/// ];
/// let a = PuzzleDefinition::new("Letters", "", groups.clone());
/// let b = PuzzleDefinition::new("Same words, new title", "hint", groups);
/// assert_eq!(identity(&a), identity(&b));
/// ```
#[must_use]
pub fn identity(definition: &PuzzleDefinition) -> PuzzleId {
    let input = definition
        .groups
        .iter()
        .map(crate::GroupDefinition::items_string)
        .collect::<Vec<_>>()
        .join("; ");
    let digest = Md5::digest(input.as_bytes());
    PuzzleId(encode_bytes(&digest[..DIGEST_PREFIX_LEN]))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::GroupDefinition;

    fn definition(words: &[[&str; 4]; 4]) -> PuzzleDefinition {
        PuzzleDefinition::new(
            "Title",
            "Subtitle",
            words
                .iter()
                .enumerate()
                .map(|(i, items)| GroupDefinition::new(format!("Group {i}"), *items)),
        )
    }

    const LETTERS: [[&str; 4]; 4] = [
        ["A", "B", "C", "D"],
        ["E", "F", "G", "H"],
        ["I", "J", "K", "L"],
        ["M", "N", "O", "P"],
    ];

    #[test]
    fn test_known_identities() {
        assert_eq!(identity(&definition(&LETTERS)).as_str(), "sjyUkrTHtUoTfE5n");
        assert_eq!(
            identity(&definition(&[
                ["Apple", "Banana", "Cherry", "Date"],
                ["Red", "Green", "Blue", "Yellow"],
                ["Dog", "Cat", "Horse", "Cow"],
                ["Oak", "Pine", "Elm", "Ash"],
            ]))
            .as_str(),
            "6VExdkiliyTdLRdU"
        );
    }

    #[test]
    fn test_ignores_metadata() {
        let base = definition(&LETTERS);
        let mut other = base.clone();
        other.title = "Something else".to_owned();
        other.subtitle.clear();
        other.groups[0].title = "Renamed".to_owned();
        other.starting_config = Some((0..16).rev().collect());
        assert_eq!(identity(&base), identity(&other));
    }

    #[test]
    fn test_depends_on_word_order() {
        let base = definition(&LETTERS);
        let mut swapped = base.clone();
        swapped.groups[0].items.swap(0, 1);
        assert_ne!(identity(&base), identity(&swapped));

        let mut reordered = base.clone();
        reordered.swap_groups(0, 1);
        assert_ne!(identity(&base), identity(&reordered));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = identity(&definition(&LETTERS));
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"sjyUkrTHtUoTfE5n\""
        );
    }

    proptest! {
        #[test]
        fn prop_identity_is_stable_across_json_round_trip(
            words in proptest::collection::vec("[a-zA-Z ]{1,12}", 16),
            title in ".*",
        ) {
            let groups = words
                .chunks(4)
                .map(|items| GroupDefinition::new("G", items.iter().cloned()));
            let definition = PuzzleDefinition::new(title, "", groups);
            let id = identity(&definition);
            prop_assert_eq!(id.as_str().len(), 16);
            prop_assert!(id.as_str().chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
            prop_assert_eq!(&identity(&definition), &id);

            let json = serde_json::to_string(&definition).unwrap();
            let parsed: PuzzleDefinition = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(identity(&parsed), id);
        }
    }
}
