use serde_json::Value;
use tetrad_codec::CodecError;
use tetrad_core::{PuzzleDefinition, PuzzleId, Validity, ValidityError};
use tetrad_game::{GameError, Puzzle, SaveData};

use crate::{
    CatalogError, KeyValueStore, Selection,
    share::{self, ShareJob},
};

/// Store key of the played catalog: a codec-encoded JSON array of definitions.
pub const PLAYED_KEY: &str = "Puzzles";

/// Store key of the authored catalog: a plain JSON array of definitions.
pub const AUTHORED_KEY: &str = "MadePuzzles";

/// How incoming authored definitions are merged with existing ones of the same title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::Display)]
pub enum MergeStrategy {
    /// Always append, even if a definition with the same title exists.
    #[default]
    #[display("duplicate")]
    Duplicate,
    /// Overwrite the existing definition with the same title.
    #[display("replace")]
    Replace,
    /// Keep the existing definition and drop the incoming one.
    #[display("skip")]
    Skip,
}

/// Outcome of importing a share token into the played catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Identities of the newly added puzzles.
    pub added: Vec<PuzzleId>,
    /// Number of entries that were already in the catalog.
    pub duplicates: usize,
    /// Number of entries that are not puzzle definitions at all.
    pub malformed: usize,
    /// Validation failures of the remaining entries.
    pub invalid: Vec<Validity>,
}

/// Outcome of merging definitions into the authored catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Number of definitions appended.
    pub added: usize,
    /// Number of existing definitions overwritten.
    pub replaced: usize,
    /// Number of definitions dropped because of a title collision.
    pub skipped: usize,
    /// Number of entries that are not puzzle definitions at all.
    pub malformed: usize,
    /// Validation failures of entries that were not merged.
    pub invalid: Vec<Validity>,
}

/// The local puzzle collection.
///
/// A catalog holds two lists:
///
/// - **played** puzzles, each with its live [`Puzzle`] session, keyed by identity
/// - **authored** definitions, editable and addressed by index
///
/// Every mutation is written through to the backing [`KeyValueStore`]. Store failures
/// are logged and otherwise ignored; the in-memory catalog stays authoritative.
///
/// Construct one catalog at start-up and pass it by reference to whatever needs it.
#[derive(Debug)]
pub struct Catalog<S> {
    store: S,
    played: Vec<Puzzle>,
    authored: Vec<PuzzleDefinition>,
}

impl<S> Catalog<S>
where
    S: KeyValueStore,
{
    /// Loads the catalog from `store`.
    ///
    /// Missing or unreadable entries are treated as empty. Each played puzzle's saved
    /// progress is replayed onto its session.
    pub fn load(store: S) -> Self {
        let mut catalog = Self {
            store,
            played: Vec::new(),
            authored: Vec::new(),
        };

        if let Some(json) = catalog.read(AUTHORED_KEY) {
            match serde_json::from_str(&json) {
                Ok(authored) => catalog.authored = authored,
                Err(err) => log::warn!("ignoring unreadable authored catalog: {err}"),
            }
        }

        if let Some(token) = catalog.read(PLAYED_KEY) {
            match tetrad_codec::decompress_object::<Vec<Value>>(&token) {
                Ok(entries) => {
                    for entry in entries {
                        match serde_json::from_value(entry) {
                            Ok(definition) => {
                                if let Err(err) = catalog.insert_played(definition) {
                                    log::warn!("ignoring stored puzzle: {err}");
                                }
                            }
                            Err(err) => log::warn!("ignoring malformed stored puzzle: {err}"),
                        }
                    }
                }
                Err(err) => log::warn!("ignoring unreadable played catalog: {err}"),
            }
        }

        log::debug!(
            "loaded {} played and {} authored puzzles",
            catalog.played.len(),
            catalog.authored.len()
        );
        catalog
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the catalog, returning the backing store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    fn read(&self, key: &str) -> Option<String> {
        self.store
            .get(key)
            .inspect_err(|err| log::warn!("failed to read {key:?}: {err}"))
            .ok()
            .flatten()
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value) {
            log::warn!("failed to write {key:?}: {err}");
        }
    }

    fn persist_played(&mut self) {
        let definitions: Vec<&PuzzleDefinition> =
            self.played.iter().map(Puzzle::definition).collect();
        match tetrad_codec::compress_object(&definitions) {
            Ok(token) => self.write(PLAYED_KEY, &token),
            Err(err) => log::warn!("failed to encode played catalog: {err}"),
        }
    }

    fn persist_authored(&mut self) {
        match serde_json::to_string(&self.authored) {
            Ok(json) => self.write(AUTHORED_KEY, &json),
            Err(err) => log::warn!("failed to encode authored catalog: {err}"),
        }
    }

    // Builds a session and appends it unless its identity is already present.
    fn insert_played(
        &mut self,
        definition: PuzzleDefinition,
    ) -> Result<Option<PuzzleId>, ValidityError> {
        let mut puzzle = Puzzle::new(definition).map_err(|GameError::InvalidDefinition(err)| err)?;
        let id = puzzle.id().clone();
        if self.session(id.as_str()).is_some() {
            return Ok(None);
        }

        if let Some(json) = self.read(id.as_str()) {
            match serde_json::from_str::<SaveData>(&json) {
                Ok(save) => {
                    puzzle.restore(&save);
                }
                Err(err) => log::warn!("ignoring unreadable progress of {id}: {err}"),
            }
        }
        self.played.push(puzzle);
        Ok(Some(id))
    }

    /// Adds a definition to the played catalog.
    ///
    /// Returns the new puzzle's identity, or `None` if a puzzle with the same identity is
    /// already present.
    ///
    /// # Errors
    ///
    /// Returns an error if the definition fails validation.
    pub fn add_definition(
        &mut self,
        definition: PuzzleDefinition,
    ) -> Result<Option<PuzzleId>, ValidityError> {
        let added = self.insert_played(definition)?;
        match &added {
            Some(id) => {
                log::info!("added puzzle {id}");
                self.persist_played();
            }
            None => log::info!("puzzle already in catalog"),
        }
        Ok(added)
    }

    /// Imports a share token into the played catalog.
    ///
    /// Each entry is parsed, validated and added on its own; the report says what became
    /// of every entry. The played catalog is written once, after all entries.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the catalog untouched, if the token cannot be decoded.
    pub fn import_shared(&mut self, token: &str) -> Result<ImportReport, CodecError> {
        let entries: Vec<Value> = tetrad_codec::decompress_object(token)?;
        let mut report = ImportReport::default();
        for entry in entries {
            let Ok(definition) = serde_json::from_value::<PuzzleDefinition>(entry) else {
                report.malformed += 1;
                continue;
            };
            match self.insert_played(definition) {
                Ok(Some(id)) => report.added.push(id),
                Ok(None) => report.duplicates += 1,
                Err(err) => report.invalid.push(err.reason()),
            }
        }
        if !report.added.is_empty() {
            self.persist_played();
        }
        log::info!(
            "imported {} puzzles ({} duplicates, {} malformed, {} invalid)",
            report.added.len(),
            report.duplicates,
            report.malformed,
            report.invalid.len()
        );
        Ok(report)
    }

    /// Returns the played session with the given identity.
    #[must_use]
    pub fn session(&self, id: &str) -> Option<&Puzzle> {
        self.played.iter().find(|puzzle| puzzle.id().as_str() == id)
    }

    /// Returns the played session with the given identity for playing.
    ///
    /// Call [`save_progress`](Self::save_progress) after changing it.
    pub fn session_mut(&mut self, id: &str) -> Option<&mut Puzzle> {
        self.played
            .iter_mut()
            .find(|puzzle| puzzle.id().as_str() == id)
    }

    /// Writes a session's guesses and score under its identity.
    ///
    /// Returns `false` if there is no such session.
    pub fn save_progress(&mut self, id: &str) -> bool {
        let Some(puzzle) = self.session(id) else {
            return false;
        };
        let key = puzzle.id().clone();
        match serde_json::to_string(&puzzle.save_data()) {
            Ok(json) => self.write(key.as_str(), &json),
            Err(err) => log::warn!("failed to encode progress of {key}: {err}"),
        }
        true
    }

    /// All played sessions, in the order they were added.
    #[must_use]
    pub fn played(&self) -> &[Puzzle] {
        &self.played
    }

    /// Played sessions that are not complete yet.
    pub fn in_progress(&self) -> impl Iterator<Item = &Puzzle> {
        self.played.iter().filter(|puzzle| !puzzle.is_complete())
    }

    /// Played sessions that are complete.
    pub fn completed(&self) -> impl Iterator<Item = &Puzzle> {
        self.played.iter().filter(|puzzle| puzzle.is_complete())
    }

    /// Removes played puzzles and their saved progress.
    ///
    /// Returns the number of puzzles removed.
    pub fn remove_played<'a, I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut removed = 0;
        for id in ids {
            let Some(pos) = self.played.iter().position(|p| p.id().as_str() == id) else {
                continue;
            };
            self.played.remove(pos);
            if let Err(err) = self.store.remove(id) {
                log::warn!("failed to remove progress of {id}: {err}");
            }
            removed += 1;
        }
        if removed > 0 {
            log::info!("removed {removed} played puzzles");
            self.persist_played();
        }
        removed
    }

    /// All authored definitions.
    #[must_use]
    pub fn authored(&self) -> &[PuzzleDefinition] {
        &self.authored
    }

    /// Returns an owned copy of an authored definition for editing.
    #[must_use]
    pub fn authored_copy(&self, index: usize) -> Option<PuzzleDefinition> {
        self.authored.get(index).cloned()
    }

    /// Returns copies of the selected authored definitions, in index order.
    #[must_use]
    pub fn authored_selected(&self, selection: &Selection) -> Vec<PuzzleDefinition> {
        selection
            .iter()
            .filter_map(|index| self.authored_copy(index))
            .collect()
    }

    /// Saves an authored definition.
    ///
    /// `None` appends it; `Some(index)` overwrites the definition at `index`. Returns the
    /// index it was saved at.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Invalid`] if the definition fails validation, and
    /// [`CatalogError::IndexOutOfRange`] if `index` does not exist.
    pub fn save_authored(
        &mut self,
        definition: PuzzleDefinition,
        index: Option<usize>,
    ) -> Result<usize, CatalogError> {
        definition.validate()?;
        let index = if let Some(index) = index {
            let slot = self
                .authored
                .get_mut(index)
                .ok_or(CatalogError::IndexOutOfRange { index })?;
            *slot = definition;
            index
        } else {
            self.authored.push(definition);
            self.authored.len() - 1
        };
        self.persist_authored();
        Ok(index)
    }

    /// Deletes an authored definition, returning it.
    ///
    /// Later definitions move down by one; update any [`Selection`] with
    /// [`Selection::on_removed`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::IndexOutOfRange`] if `index` does not exist.
    pub fn delete_authored(&mut self, index: usize) -> Result<PuzzleDefinition, CatalogError> {
        if index >= self.authored.len() {
            return Err(CatalogError::IndexOutOfRange { index });
        }
        let definition = self.authored.remove(index);
        log::info!("deleted authored puzzle {:?}", definition.title);
        self.persist_authored();
        Ok(definition)
    }

    /// Deletes every selected authored definition and clears the selection.
    ///
    /// Indices past the end are ignored. Returns the number deleted.
    pub fn delete_authored_selected(&mut self, selection: &mut Selection) -> usize {
        let mut deleted = 0;
        for index in selection.iter().rev() {
            if index < self.authored.len() {
                self.authored.remove(index);
                deleted += 1;
            }
        }
        selection.clear();
        if deleted > 0 {
            log::info!("deleted {deleted} authored puzzles");
            self.persist_authored();
        }
        deleted
    }

    /// Merges definitions into the authored catalog.
    ///
    /// An existing definition matches an incoming one when their titles are equal.
    /// Definitions that fail validation are left out and reported in
    /// [`MergeReport::invalid`].
    pub fn import_definitions<I>(&mut self, definitions: I, strategy: MergeStrategy) -> MergeReport
    where
        I: IntoIterator<Item = PuzzleDefinition>,
    {
        let mut report = MergeReport::default();
        for definition in definitions {
            if let Err(err) = definition.validate() {
                report.invalid.push(err.reason());
                continue;
            }
            let existing = self
                .authored
                .iter()
                .position(|d| d.title == definition.title);
            match (strategy, existing) {
                (MergeStrategy::Skip, Some(_)) => report.skipped += 1,
                (MergeStrategy::Replace, Some(index)) => {
                    self.authored[index] = definition;
                    report.replaced += 1;
                }
                _ => {
                    self.authored.push(definition);
                    report.added += 1;
                }
            }
        }
        if report.added + report.replaced > 0 {
            self.persist_authored();
        }
        log::info!(
            "merged authored puzzles with {strategy}: {} added, {} replaced, {} skipped",
            report.added,
            report.replaced,
            report.skipped
        );
        report
    }

    /// Merges the contents of an export file into the authored catalog.
    ///
    /// `json` may hold an array of definitions or a single definition. Entries that are
    /// malformed or invalid are counted in the report and left out.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] if `json` is not JSON at all.
    pub fn import_authored_json(
        &mut self,
        json: &str,
        strategy: MergeStrategy,
    ) -> Result<MergeReport, CatalogError> {
        let entries = match serde_json::from_str::<Value>(json)? {
            Value::Array(entries) => entries,
            entry => vec![entry],
        };

        let mut malformed = 0;
        let mut definitions = Vec::new();
        for entry in entries {
            match serde_json::from_value::<PuzzleDefinition>(entry) {
                Ok(definition) => definitions.push(definition),
                Err(_) => malformed += 1,
            }
        }

        let mut report = self.import_definitions(definitions, strategy);
        report.malformed = malformed;
        Ok(report)
    }

    /// Encodes the selected authored definitions into a share link.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn share_link(&self, base: &str, selection: &Selection) -> Result<String, CodecError> {
        share::share_link(base, &self.authored_selected(selection))
    }

    /// Starts encoding the selected authored definitions on a background thread.
    #[must_use]
    pub fn share_job(&self, selection: &Selection) -> ShareJob {
        ShareJob::spawn(self.authored_selected(selection))
    }

    /// Serializes the selected authored definitions as an export file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_json(&self, selection: &Selection) -> Result<String, CatalogError> {
        share::export_json(&self.authored_selected(selection))
    }
}
