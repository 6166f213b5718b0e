use std::array;

use rand::Rng;
use tetrad_core::{
    BONUS_DECREASE_TENTHS, BONUS_PENALTY_TENTHS, GROUP_SIZE, GroupColor, MAX_BONUS_TENTHS,
    MIN_BONUS_TENTHS, NUM_GROUPS, NUM_TILES, PuzzleDefinition, PuzzleId, TileId, WRONG_GUESSES,
};

use crate::{GameError, Group, Guess, PuzzleStatus, SaveData, Tile, score};

/// A tetrad play session.
///
/// Owns the board (16 tiles in their current order), the selection, the guess history,
/// the score and the bonus multiplier. The definition it was built from never changes.
///
/// Tiles live in a fixed arena indexed by [`TileId`]; the board order is a separate
/// permutation of ids. Found tiles stay in the arena marked
/// [`Grouped`](crate::TileState::Grouped), so the guess history can always refer to them.
///
/// # Scoring
///
/// The bonus multiplier starts at 2.0. A correct guess scores the group's base points
/// times the current multiplier, then lowers the multiplier by 0.2. An incorrect guess
/// scores nothing and lowers it by 0.5. The multiplier never drops below 0.5.
///
/// # Example
///
/// ```
/// use tetrad_core::{GroupDefinition, PuzzleDefinition};
/// use tetrad_game::Puzzle;
///
/// let definition = PuzzleDefinition::new(
///     "Letters",
///     "",
///     [
///         GroupDefinition::new("First", ["A", "B", "C", "D"]),
///         GroupDefinition::new("Second", ["E", "F", "G", "H"]),
///         GroupDefinition::new("Third", ["I", "J", "K", "L"]),
///         GroupDefinition::new("Fourth", ["M", "N", "O", "P"]),
///     ],
/// );
/// let mut puzzle = Puzzle::new(definition).unwrap();
///
/// for word in ["E", "F", "G", "H"] {
///     let id = puzzle.find_tile(word).unwrap();
///     assert!(puzzle.select(id));
/// }
/// let guess = puzzle.submit_selection().unwrap();
/// assert!(guess.is_correct());
/// assert_eq!(puzzle.score(), 26.0);
/// assert_eq!(puzzle.bonus_multiplier(), 1.8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    definition: PuzzleDefinition,
    id: PuzzleId,
    groups: [Group; NUM_GROUPS],
    tiles: [Tile; NUM_TILES],
    order: [TileId; NUM_TILES],
    groups_found: Vec<GroupColor>,
    guesses: Vec<Guess>,
    score_tenths: u32,
    bonus_tenths: u32,
    loaded: bool,
}

impl Puzzle {
    /// Creates a new session from a definition.
    ///
    /// The board follows the definition's starting configuration when it is a valid
    /// permutation of 0-15, and a uniformly random order otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidDefinition`] if the definition fails validation.
    pub fn new(definition: PuzzleDefinition) -> Result<Self, GameError> {
        Self::with_rng(definition, &mut rand::rng())
    }

    /// Creates a new session, drawing the random board order from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidDefinition`] if the definition fails validation.
    pub fn with_rng<R>(definition: PuzzleDefinition, rng: &mut R) -> Result<Self, GameError>
    where
        R: Rng,
    {
        definition.validate()?;

        let groups = array::from_fn(|g| {
            Group::new(definition.groups[g].title.clone(), GroupColor::ALL[g])
        });
        let tiles = array::from_fn(|i| {
            let id = TileId::ALL[i];
            Tile::new(id, definition.groups[id.group()].items[id.item()].clone())
        });
        let order = if let Some(config) = definition.valid_starting_config() {
            array::from_fn(|slot| TileId::ALL[config[slot]])
        } else {
            let mut order = TileId::ALL;
            shuffle_ids(&mut order, rng);
            order
        };

        Ok(Self {
            id: definition.identity(),
            definition,
            groups,
            tiles,
            order,
            groups_found: Vec::new(),
            guesses: Vec::new(),
            score_tenths: 0,
            bonus_tenths: MAX_BONUS_TENTHS,
            loaded: false,
        })
    }

    /// The definition this session was built from.
    #[must_use]
    pub fn definition(&self) -> &PuzzleDefinition {
        &self.definition
    }

    /// The content-derived identity of the puzzle.
    #[must_use]
    pub fn id(&self) -> &PuzzleId {
        &self.id
    }

    /// Puzzle title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.definition.title
    }

    /// Puzzle subtitle.
    #[must_use]
    pub fn subtitle(&self) -> &str {
        &self.definition.subtitle
    }

    /// Returns the tile with the given id.
    #[must_use]
    pub fn tile(&self, id: TileId) -> &Tile {
        &self.tiles[id.index()]
    }

    fn tile_mut(&mut self, id: TileId) -> &mut Tile {
        &mut self.tiles[id.index()]
    }

    /// Returns all tiles in board order, including grouped ones.
    pub fn tiles_in_order(&self) -> impl Iterator<Item = &Tile> {
        self.order.iter().map(|&id| self.tile(id))
    }

    /// Returns the tiles still on the board, in board order.
    pub fn visible_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles_in_order().filter(|tile| tile.is_visible())
    }

    /// Finds a tile by its exact text.
    #[must_use]
    pub fn find_tile(&self, text: &str) -> Option<TileId> {
        self.tiles
            .iter()
            .find(|tile| tile.text() == text)
            .map(Tile::id)
    }

    /// Returns `true` if the tile has not been grouped yet.
    #[must_use]
    pub fn is_in_play(&self, id: TileId) -> bool {
        self.tile(id).is_visible()
    }

    /// Returns the ids of the selected tiles, in board order.
    #[must_use]
    pub fn selected(&self) -> Vec<TileId> {
        self.order
            .iter()
            .copied()
            .filter(|&id| self.tile(id).state().is_selected())
            .collect()
    }

    /// Returns the number of selected tiles.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|tile| tile.state().is_selected())
            .count()
    }

    /// Returns the group of the given color.
    #[must_use]
    pub fn group(&self, color: GroupColor) -> &Group {
        &self.groups[color.index()]
    }

    /// Returns all groups in rank order.
    #[must_use]
    pub fn groups(&self) -> &[Group; NUM_GROUPS] {
        &self.groups
    }

    /// Returns the groups found so far, in the order they were found.
    #[must_use]
    pub fn groups_found(&self) -> impl ExactSizeIterator<Item = &Group> {
        self.groups_found.iter().map(|&color| self.group(color))
    }

    /// Returns the guess history in submission order.
    #[must_use]
    pub fn guesses(&self) -> &[Guess] {
        &self.guesses
    }

    /// Toggles the selection of a tile.
    ///
    /// Does nothing if the puzzle is complete, if the tile is grouped, or if four tiles
    /// are already selected and this is not one of them.
    ///
    /// Returns `true` if the selection changed.
    pub fn select(&mut self, id: TileId) -> bool {
        if self.is_complete() {
            return false;
        }
        let state = self.tile(id).state();
        if state.is_grouped() || (!state.is_selected() && self.selected_count() >= GROUP_SIZE) {
            return false;
        }
        self.tile_mut(id).toggle_selected();
        true
    }

    /// Clears the selection.
    pub fn deselect_all(&mut self) {
        for tile in &mut self.tiles {
            tile.deselect();
        }
    }

    /// Reorders the tiles still on the board at random.
    ///
    /// Grouped tiles keep their slots; only the visible tiles are permuted among the
    /// slots they occupy.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    /// Like [`shuffle`](Self::shuffle), drawing randomness from `rng`.
    pub fn shuffle_with<R>(&mut self, rng: &mut R)
    where
        R: Rng,
    {
        let slots: Vec<usize> = (0..NUM_TILES)
            .filter(|&slot| self.is_in_play(self.order[slot]))
            .collect();
        let mut visible: Vec<TileId> = slots.iter().map(|&slot| self.order[slot]).collect();
        shuffle_ids(&mut visible, rng);
        for (slot, id) in slots.into_iter().zip(visible) {
            self.order[slot] = id;
        }
    }

    /// Submits a guess.
    ///
    /// Returns `None` without changing anything if the puzzle is complete, if `tiles`
    /// does not hold exactly four distinct ids, or if any of them is already grouped.
    ///
    /// Otherwise the guess is scored, appended to the history and returned. A correct
    /// guess removes its tiles from play and records the group as found.
    pub fn guess(&mut self, tiles: &[TileId]) -> Option<Guess> {
        if self.is_complete() {
            return None;
        }
        let tiles: [TileId; GROUP_SIZE] = tiles.try_into().ok()?;
        for (i, id) in tiles.iter().enumerate() {
            if !self.is_in_play(*id) || tiles[..i].contains(id) {
                return None;
            }
        }

        let color = tiles[0].color();
        let is_correct = tiles.iter().all(|id| id.color() == color);
        if is_correct {
            for id in tiles {
                self.tile_mut(id).remove_from_play();
            }
            self.groups_found.push(color);
            self.score_tenths += color.base_points() * self.bonus_tenths;
            self.bonus_tenths = self.bonus_tenths.saturating_sub(BONUS_DECREASE_TENTHS);
        } else {
            self.bonus_tenths = self.bonus_tenths.saturating_sub(BONUS_PENALTY_TENTHS);
        }
        self.bonus_tenths = self.bonus_tenths.max(MIN_BONUS_TENTHS);

        let guess = Guess::new(tiles, is_correct);
        self.guesses.push(guess);
        Some(guess)
    }

    /// Submits the current selection as a guess.
    ///
    /// Returns `None` if no wrong guesses remain or the selection is not a legal guess.
    pub fn submit_selection(&mut self) -> Option<Guess> {
        if self.wrong_guesses_remaining() == 0 {
            return None;
        }
        let selected = self.selected();
        self.guess(&selected)
    }

    /// Replays a saved guess history onto this session.
    ///
    /// Each guess is re-submitted in order through [`guess`](Self::guess), so score,
    /// found groups and status come out exactly as they were. Guesses that are no
    /// longer legal are skipped.
    ///
    /// This works once per session. Returns `false`, doing nothing, on later calls.
    pub fn replay(&mut self, guesses: &[Guess]) -> bool {
        if self.loaded {
            return false;
        }
        for guess in guesses {
            if self.guess(guess.tiles()).is_none() {
                log::debug!("puzzle {}: skipping stale guess {guess:?}", self.id);
            }
        }
        self.loaded = true;
        true
    }

    /// Replays the guesses of a saved session. See [`replay`](Self::replay).
    pub fn restore(&mut self, save: &SaveData) -> bool {
        self.replay(&save.guesses)
    }

    /// Returns the data needed to restore this session later.
    #[must_use]
    pub fn save_data(&self) -> SaveData {
        SaveData {
            guesses: self.guesses.clone(),
            score: self.score(),
        }
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> f64 {
        f64::from(self.score_tenths) / 10.0
    }

    /// Current bonus multiplier, between 0.5 and 2.0.
    #[must_use]
    pub fn bonus_multiplier(&self) -> f64 {
        f64::from(self.bonus_tenths) / 10.0
    }

    /// Number of incorrect guesses still allowed.
    #[must_use]
    pub fn wrong_guesses_remaining(&self) -> usize {
        let mut remaining = WRONG_GUESSES;
        for guess in &self.guesses {
            if !guess.is_correct() {
                remaining -= 1;
            }
            if remaining == 0 {
                break;
            }
        }
        remaining
    }

    /// Overall progress of the session.
    #[must_use]
    pub fn status(&self) -> PuzzleStatus {
        if self.wrong_guesses_remaining() == 0 || self.groups_found.len() == NUM_GROUPS {
            PuzzleStatus::Complete
        } else if self.guesses.is_empty() {
            PuzzleStatus::NotStarted
        } else {
            PuzzleStatus::Started
        }
    }

    /// Returns `true` once the puzzle is over, won or lost.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status().is_complete()
    }

    /// Returns `true` if every group was found.
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.groups_found.len() == NUM_GROUPS
    }

    /// Star rating of the current score, from 0 to 5.
    #[must_use]
    pub fn star_score(&self) -> u8 {
        score::star_score(self.score_tenths)
    }

    /// A short verdict for the current star rating.
    #[must_use]
    pub fn star_score_text(&self) -> &'static str {
        score::star_score_text(self.is_win(), self.star_score())
    }
}

/// Shuffles `ids` by repeatedly drawing a uniformly random remaining id.
fn shuffle_ids<R>(ids: &mut [TileId], rng: &mut R)
where
    R: Rng,
{
    let mut remaining = ids.to_vec();
    for slot in ids {
        let i = rng.random_range(0..remaining.len());
        *slot = remaining.remove(i);
    }
}
