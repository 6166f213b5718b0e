/// Overall progress of a play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum PuzzleStatus {
    /// No guess has been made yet.
    NotStarted,
    /// At least one guess has been made and the puzzle is not over.
    Started,
    /// All groups were found, or no wrong guesses remain.
    Complete,
}

impl PuzzleStatus {
    /// Label for the action that opens a puzzle in this state.
    #[must_use]
    pub fn play_label(self) -> &'static str {
        match self {
            Self::NotStarted => "Play",
            Self::Started => "Resume Playing",
            Self::Complete => "View Results",
        }
    }
}
