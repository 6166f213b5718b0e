//! Portable puzzle definitions.
//!
//! A [`PuzzleDefinition`] is what authors write, what gets exported to files, and what
//! travels inside share links. It only describes the puzzle; play state lives in the
//! game engine.
//!
//! The JSON form uses camelCase keys so exports stay readable by other implementations:
//!
//! ```json
//! {
//!   "title": "Letters",
//!   "subtitle": "An easy one",
//!   "groups": [{ "title": "First", "items": ["A", "B", "C", "D"] }, ...],
//!   "startingConfig": [15, 0, 3, ...]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::{GROUP_SIZE, GroupColor, NUM_TILES, PuzzleId, Validity, ValidityError};

/// One hidden group: a title and its words.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupDefinition {
    /// The category name revealed once the group is found.
    pub title: String,
    /// The words of the group, in authoring order.
    pub items: Vec<String>,
}

impl GroupDefinition {
    /// Creates a group definition.
    #[must_use]
    pub fn new<T, I>(title: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            title: title.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the items joined the way the identity hash expects them.
    #[must_use]
    pub fn items_string(&self) -> String {
        self.items.join(", ")
    }
}

/// A complete puzzle description.
///
/// Definitions are not guaranteed to be valid; use [`PuzzleDefinition::check_validity`]
/// before handing one to the game engine or saving it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleDefinition {
    /// Puzzle title.
    pub title: String,
    /// A hint or description shown under the title.
    #[serde(default)]
    pub subtitle: String,
    /// The groups, ordered from easiest to hardest.
    pub groups: Vec<GroupDefinition>,
    /// Optional fixed initial board order, as a permutation of tile indices 0-15.
    ///
    /// Anything other than a permutation of 0-15 is ignored and a random order is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_config: Option<Vec<usize>>,
}

impl PuzzleDefinition {
    /// Creates a definition without a starting configuration.
    #[must_use]
    pub fn new<I>(title: impl Into<String>, subtitle: impl Into<String>, groups: I) -> Self
    where
        I: IntoIterator<Item = GroupDefinition>,
    {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            groups: groups.into_iter().collect(),
            starting_config: None,
        }
    }

    /// Returns the definition with `starting_config` set.
    #[must_use]
    pub fn with_starting_config(mut self, config: impl Into<Vec<usize>>) -> Self {
        self.starting_config = Some(config.into());
        self
    }

    /// Returns a blank definition for authors to fill in.
    ///
    /// Groups get their default names and empty items, so the template itself does not
    /// pass validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrad_core::{PuzzleDefinition, Validity};
    ///
    /// let template = PuzzleDefinition::template();
    /// assert_eq!(template.groups[3].title, "Very Hard Group");
    /// assert_eq!(template.check_validity(), Validity::EmptyWord);
    /// ```
    #[must_use]
    pub fn template() -> Self {
        Self::new(
            "New Puzzle",
            "A puzzle hint or maybe the date.",
            GroupColor::ALL.map(|color| {
                GroupDefinition::new(color.default_name(), [""; GROUP_SIZE])
            }),
        )
    }

    /// Returns the starting configuration if it is a permutation of 0-15.
    #[must_use]
    pub fn valid_starting_config(&self) -> Option<&[usize]> {
        let config = self.starting_config.as_deref()?;
        if config.len() != NUM_TILES {
            return None;
        }
        let mut seen = [false; NUM_TILES];
        for &i in config {
            if i >= NUM_TILES || seen[i] {
                return None;
            }
            seen[i] = true;
        }
        Some(config)
    }

    /// Returns `true` if the definition carries a usable starting configuration.
    #[must_use]
    pub fn has_starting_config(&self) -> bool {
        self.valid_starting_config().is_some()
    }

    /// Swaps two groups, changing their colors.
    ///
    /// Out-of-range indices leave the definition unchanged.
    pub fn swap_groups(&mut self, a: usize, b: usize) {
        if a < self.groups.len() && b < self.groups.len() {
            self.groups.swap(a, b);
        }
    }

    /// Runs the structural checks. See [`crate::check_validity`].
    #[must_use]
    pub fn check_validity(&self) -> Validity {
        crate::check_validity(self)
    }

    /// Like [`check_validity`](Self::check_validity), but as a `Result`.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule as a [`ValidityError`].
    pub fn validate(&self) -> Result<(), ValidityError> {
        self.check_validity().into_result()
    }

    /// Returns the content-derived identity. See [`crate::identity`].
    #[must_use]
    pub fn identity(&self) -> PuzzleId {
        crate::identity(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> PuzzleDefinition {
        PuzzleDefinition::new(
            "Letters",
            "Alphabet soup",
            [
                GroupDefinition::new("First", ["A", "B", "C", "D"]),
                GroupDefinition::new("Second", ["E", "F", "G", "H"]),
                GroupDefinition::new("Third", ["I", "J", "K", "L"]),
                GroupDefinition::new("Fourth", ["M", "N", "O", "P"]),
            ],
        )
    }

    #[test]
    fn test_json_uses_camel_case_and_omits_missing_config() {
        let json = serde_json::to_value(letters()).unwrap();
        assert!(json.get("startingConfig").is_none());
        assert_eq!(json["groups"][1]["items"][2], "G");

        let json = serde_json::to_value(letters().with_starting_config([0; 16])).unwrap();
        assert_eq!(json["startingConfig"].as_array().unwrap().len(), 16);
    }

    #[test]
    fn test_json_without_subtitle_parses() {
        let definition: PuzzleDefinition = serde_json::from_str(
            r#"{"title":"T","groups":[{"title":"G","items":["a","b","c","d"]}]}"#,
        )
        .unwrap();
        assert_eq!(definition.subtitle, "");
        assert_eq!(definition.starting_config, None);
    }

    #[test]
    fn test_valid_starting_config_requires_permutation() {
        let reversed: Vec<usize> = (0..16).rev().collect();
        let definition = letters().with_starting_config(reversed.clone());
        assert_eq!(definition.valid_starting_config(), Some(reversed.as_slice()));

        assert!(!letters().has_starting_config());
        assert!(!letters().with_starting_config([0; 16]).has_starting_config());
        assert!(
            !letters()
                .with_starting_config((0..15).collect::<Vec<_>>())
                .has_starting_config()
        );
        assert!(
            !letters()
                .with_starting_config((1..=16).collect::<Vec<_>>())
                .has_starting_config()
        );
    }

    #[test]
    fn test_swap_groups() {
        let mut definition = letters();
        definition.swap_groups(0, 3);
        assert_eq!(definition.groups[0].title, "Fourth");
        assert_eq!(definition.groups[3].title, "First");

        let before = definition.clone();
        definition.swap_groups(0, 4);
        assert_eq!(definition, before);
    }

    #[test]
    fn test_items_string() {
        assert_eq!(letters().groups[0].items_string(), "A, B, C, D");
    }
}
