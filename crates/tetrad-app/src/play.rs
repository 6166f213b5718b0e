//! The interactive play loop.
//!
//! One command per input line:
//!
//! | Command         | Effect                                  |
//! |-----------------|-----------------------------------------|
//! | `select <word>` | toggle a word                           |
//! | `guess`         | submit the four selected words          |
//! | `shuffle`       | reorder the remaining words             |
//! | `deselect`      | clear the selection                     |
//! | `show`          | print the board                         |
//! | `quit`          | leave (end of input works too)          |

use std::io::{self, BufRead, Write};

use tetrad_core::GROUP_SIZE;
use tetrad_game::{Puzzle, TileState};

use crate::AppError;

/// What a single input line did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Continue,
    Guessed,
    Quit,
}

/// Reads commands from `input` until `quit` or end of input.
///
/// `apply` runs one command line against the session and reports what happened.
pub(crate) fn play_loop<R, W, F>(input: &mut R, out: &mut W, mut apply: F) -> Result<(), AppError>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str, &mut W) -> Result<Step, AppError>,
{
    apply("show", out)?;
    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(());
        }
        if apply(line.trim(), out)? == Step::Quit {
            return Ok(());
        }
    }
}

/// Runs one command line against `puzzle`.
pub(crate) fn step<W>(puzzle: &mut Puzzle, line: &str, out: &mut W) -> io::Result<Step>
where
    W: Write,
{
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    match command {
        "" => {}
        "select" => select(puzzle, rest.trim(), out)?,
        "guess" => {
            if guess(puzzle, out)? {
                return Ok(Step::Guessed);
            }
        }
        "shuffle" => {
            puzzle.shuffle();
            show(puzzle, out)?;
        }
        "deselect" => {
            puzzle.deselect_all();
            show(puzzle, out)?;
        }
        "show" => show(puzzle, out)?,
        "quit" | "exit" => return Ok(Step::Quit),
        _ => writeln!(
            out,
            "commands: select <word>, guess, shuffle, deselect, show, quit"
        )?,
    }
    Ok(Step::Continue)
}

fn select<W>(puzzle: &mut Puzzle, word: &str, out: &mut W) -> io::Result<()>
where
    W: Write,
{
    let Some(id) = puzzle
        .find_tile(word)
        .or_else(|| find_ignoring_case(puzzle, word))
    else {
        return writeln!(out, "no word {word:?} on the board");
    };
    if !puzzle.select(id) {
        return writeln!(out, "cannot select {word:?}");
    }
    let selected: Vec<&str> = puzzle
        .selected()
        .into_iter()
        .map(|id| puzzle.tile(id).text())
        .collect();
    writeln!(out, "selected: {}", selected.join(", "))
}

fn find_ignoring_case(puzzle: &Puzzle, word: &str) -> Option<tetrad_core::TileId> {
    puzzle
        .visible_tiles()
        .find(|tile| tile.text().eq_ignore_ascii_case(word))
        .map(tetrad_game::Tile::id)
}

fn guess<W>(puzzle: &mut Puzzle, out: &mut W) -> io::Result<bool>
where
    W: Write,
{
    if puzzle.is_complete() {
        writeln!(out, "this puzzle is over")?;
        return Ok(false);
    }
    if puzzle.selected_count() != GROUP_SIZE {
        writeln!(out, "select {GROUP_SIZE} words first")?;
        return Ok(false);
    }
    let Some(guess) = puzzle.submit_selection() else {
        writeln!(out, "that guess is not allowed")?;
        return Ok(false);
    };
    if guess.is_correct() {
        let group = puzzle.group(guess.tiles()[0].color());
        writeln!(out, "Correct! {} ({})", group.title(), group.color())?;
    } else {
        writeln!(
            out,
            "Not quite. {} wrong guesses left.",
            puzzle.wrong_guesses_remaining()
        )?;
    }
    show(puzzle, out)?;
    Ok(true)
}

/// Prints the board, found groups and score.
pub(crate) fn show<W>(puzzle: &Puzzle, out: &mut W) -> io::Result<()>
where
    W: Write,
{
    writeln!(out, "{}", puzzle.title())?;
    if !puzzle.subtitle().is_empty() {
        writeln!(out, "{}", puzzle.subtitle())?;
    }

    for group in puzzle.groups_found() {
        let color = group.color().to_string();
        let words: Vec<&str> = group
            .tiles()
            .iter()
            .map(|&id| puzzle.tile(id).text())
            .collect();
        writeln!(out, "  {color:<7} {}: {}", group.title(), words.join(", "))?;
    }

    let visible: Vec<String> = puzzle
        .visible_tiles()
        .map(|tile| match tile.state() {
            TileState::Selected => format!("[{}]", tile.text()),
            _ => tile.text().to_owned(),
        })
        .collect();
    for row in visible.chunks(GROUP_SIZE) {
        writeln!(out, "  {}", row.join(" | "))?;
    }

    writeln!(
        out,
        "score {} | bonus x{} | {} wrong guesses left",
        puzzle.score(),
        puzzle.bonus_multiplier(),
        puzzle.wrong_guesses_remaining()
    )?;
    if puzzle.is_complete() {
        writeln!(
            out,
            "{} ({}/5 stars)",
            puzzle.star_score_text(),
            puzzle.star_score()
        )?;
    }
    Ok(())
}
