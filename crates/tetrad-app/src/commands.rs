//! Subcommand implementations.
//!
//! Every command works on a borrowed [`Catalog`]; the binary loads one at start-up and
//! hands it to [`run`].

use std::{
    fs,
    io::{BufRead, Write},
};

use tetrad_catalog::{Catalog, CatalogError, KeyValueStore, Selection, token_from_input};
use tetrad_core::{PuzzleDefinition, Validity};
use tetrad_game::Puzzle;

use crate::{
    AppError,
    cli::{Command, Config},
    play::{self, Step},
};

/// Runs one subcommand.
///
/// `input` is only read by the interactive commands.
///
/// # Errors
///
/// Returns an error if the command cannot be completed.
pub fn run<S, R, W>(
    catalog: &mut Catalog<S>,
    config: &Config,
    command: Command,
    input: &mut R,
    out: &mut W,
) -> Result<(), AppError>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    match command {
        Command::List => list(catalog, out),
        Command::Template => {
            let json = serde_json::to_string_pretty(&PuzzleDefinition::template())?;
            writeln!(out, "{json}")?;
            Ok(())
        }
        Command::Author { file, index } => {
            let definition: PuzzleDefinition = serde_json::from_str(&fs::read_to_string(file)?)?;
            let title = definition.title.clone();
            let index = catalog.save_authored(definition, index)?;
            writeln!(out, "saved {title:?} at index {index}")?;
            Ok(())
        }
        Command::Delete { indices } => {
            let mut selection = select_authored(catalog, &indices)?;
            let deleted = catalog.delete_authored_selected(&mut selection);
            writeln!(out, "deleted {deleted} puzzles")?;
            Ok(())
        }
        Command::Share { indices } => {
            let selection = select_authored(catalog, &indices)?;
            let token = catalog.share_job(&selection).wait()?;
            writeln!(
                out,
                "{}{}{token}",
                config.share_base_url,
                tetrad_catalog::SHARE_PATH
            )?;
            Ok(())
        }
        Command::Add { token } => add(catalog, &token, out),
        Command::Export { indices, output } => {
            let selection = select_authored(catalog, &indices)?;
            let json = catalog.export_json(&selection)?;
            match output {
                Some(path) => {
                    fs::write(&path, json)?;
                    writeln!(out, "exported {} puzzles to {}", selection.len(), path.display())?;
                }
                None => writeln!(out, "{json}")?,
            }
            Ok(())
        }
        Command::Import { file, strategy } => {
            let json = fs::read_to_string(file)?;
            let report = catalog.import_authored_json(&json, strategy.into())?;
            writeln!(
                out,
                "imported: {} added, {} replaced, {} skipped",
                report.added, report.replaced, report.skipped
            )?;
            report_rejected(report.malformed, &report.invalid, out)?;
            Ok(())
        }
        Command::Remove { ids } => {
            let removed = catalog.remove_played(ids.iter().map(String::as_str));
            writeln!(out, "removed {removed} puzzles")?;
            Ok(())
        }
        Command::Play { id } => {
            if catalog.session(&id).is_none() {
                return Err(AppError::UnknownPuzzle { id });
            }
            play::play_loop(input, out, |line, out| {
                let puzzle = catalog
                    .session_mut(&id)
                    .ok_or_else(|| AppError::UnknownPuzzle { id: id.clone() })?;
                let step = play::step(puzzle, line, out)?;
                if step == Step::Guessed {
                    catalog.save_progress(&id);
                }
                Ok(step)
            })
        }
        Command::Playtest { index } => {
            let definition = catalog
                .authored_copy(index)
                .ok_or(CatalogError::IndexOutOfRange { index })?;
            let mut puzzle = Puzzle::new(definition)?;
            play::play_loop(input, out, |line, out| Ok(play::step(&mut puzzle, line, out)?))
        }
    }
}

fn select_authored<S>(catalog: &Catalog<S>, indices: &[usize]) -> Result<Selection, AppError>
where
    S: KeyValueStore,
{
    if let Some(&index) = indices.iter().find(|&&i| i >= catalog.authored().len()) {
        return Err(CatalogError::IndexOutOfRange { index }.into());
    }
    Ok(indices.iter().copied().collect())
}

fn list<S, W>(catalog: &Catalog<S>, out: &mut W) -> Result<(), AppError>
where
    S: KeyValueStore,
    W: Write,
{
    writeln!(out, "Authored puzzles:")?;
    if catalog.authored().is_empty() {
        writeln!(out, "  (none)")?;
    }
    for (index, definition) in catalog.authored().iter().enumerate() {
        match definition.check_validity() {
            Validity::Valid => writeln!(out, "  [{index}] {}", definition.title)?,
            reason => writeln!(out, "  [{index}] {} (draft: {reason})", definition.title)?,
        }
    }

    writeln!(out, "Played puzzles:")?;
    if catalog.played().is_empty() {
        writeln!(out, "  (none)")?;
    }
    for puzzle in catalog.played() {
        write!(
            out,
            "  {}  {}  [{}]",
            puzzle.id(),
            puzzle.title(),
            puzzle.status().play_label()
        )?;
        if puzzle.is_complete() {
            write!(out, " {}/5 stars", puzzle.star_score())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn add<S, W>(catalog: &mut Catalog<S>, input: &str, out: &mut W) -> Result<(), AppError>
where
    S: KeyValueStore,
    W: Write,
{
    let report = match catalog.import_shared(token_from_input(input)) {
        Ok(report) => report,
        Err(err) => {
            log::warn!("rejected share token: {err}");
            writeln!(out, "could not read shared data")?;
            return Ok(());
        }
    };
    for id in &report.added {
        if let Some(puzzle) = catalog.session(id.as_str()) {
            writeln!(out, "added {id}  {}", puzzle.title())?;
        }
    }
    if report.duplicates > 0 {
        writeln!(out, "{} puzzles were already in the catalog", report.duplicates)?;
    }
    report_rejected(report.malformed, &report.invalid, out)?;
    Ok(())
}

fn report_rejected<W>(malformed: usize, invalid: &[Validity], out: &mut W) -> Result<(), AppError>
where
    W: Write,
{
    if malformed > 0 {
        writeln!(out, "{malformed} entries were not puzzles")?;
    }
    for reason in invalid {
        writeln!(out, "skipped an invalid puzzle: {reason}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{
        io::Cursor,
        path::{Path, PathBuf},
    };

    use tetrad_catalog::{MemoryStore, share_token};
    use tetrad_core::GroupDefinition;

    use super::*;

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
        .with_starting_config((0..16).collect::<Vec<_>>())
    }

    fn exec(catalog: &mut Catalog<MemoryStore>, command: Command, script: &str) -> String {
        let mut out = Vec::new();
        run(
            catalog,
            &Config::default(),
            command,
            &mut Cursor::new(script),
            &mut out,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn write_json(dir: &Path, name: &str, definition: &PuzzleDefinition) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, serde_json::to_string(definition).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_author_share_add_play() {
        let dir = tempfile::tempdir().unwrap();
        let mut author = Catalog::load(MemoryStore::new());
        let file = write_json(dir.path(), "letters.json", &letters());
        let out = exec(&mut author, Command::Author { file, index: None }, "");
        assert_eq!(out, "saved \"Letters\" at index 0\n");

        let link = exec(&mut author, Command::Share { indices: vec![0] }, "");
        assert!(link.starts_with("http://bubbulon.com/cm/add/"));

        let mut player = Catalog::load(MemoryStore::new());
        let out = exec(
            &mut player,
            Command::Add {
                token: link.trim().to_owned(),
            },
            "",
        );
        let id = letters().identity();
        assert!(out.starts_with(&format!("added {id}  Letters")));

        let script = "select A\nselect B\nselect C\nselect D\nguess\nquit\n";
        let out = exec(&mut player, Command::Play { id: id.to_string() }, script);
        assert!(out.contains("Correct! First"));

        // Progress was saved through the store.
        let player = Catalog::load(player.into_store());
        assert_eq!(player.session(id.as_str()).unwrap().score(), 20.0);
    }

    #[test]
    fn test_author_reports_validity() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = Catalog::load(MemoryStore::new());
        let file = write_json(dir.path(), "t.json", &PuzzleDefinition::template());
        let err = run(
            &mut catalog,
            &Config::default(),
            Command::Author { file, index: None },
            &mut Cursor::new(""),
            &mut Vec::new(),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid puzzle: every group needs 4 words, and none may be blank"
        );
    }

    #[test]
    fn test_add_bad_token() {
        let mut catalog = Catalog::load(MemoryStore::new());
        let out = exec(
            &mut catalog,
            Command::Add {
                token: "http://bubbulon.com/cm/add/%%%".to_owned(),
            },
            "",
        );
        assert_eq!(out, "could not read shared data\n");
        assert!(catalog.played().is_empty());
    }

    #[test]
    fn test_add_duplicate() {
        let mut catalog = Catalog::load(MemoryStore::new());
        catalog.add_definition(letters()).unwrap();
        let token = share_token(&[letters()]).unwrap();
        let out = exec(&mut catalog, Command::Add { token }, "");
        assert_eq!(out, "1 puzzles were already in the catalog\n");
    }

    #[test]
    fn test_list() {
        let mut catalog = Catalog::load(MemoryStore::new());
        catalog.save_authored(letters(), None).unwrap();
        catalog.add_definition(letters()).unwrap();
        let out = exec(&mut catalog, Command::List, "");
        assert_eq!(
            out,
            format!(
                "Authored puzzles:\n  [0] Letters\nPlayed puzzles:\n  {}  Letters  [Play]\n",
                letters().identity()
            )
        );
    }

    #[test]
    fn test_export_import_delete() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = Catalog::load(MemoryStore::new());
        catalog.save_authored(letters(), None).unwrap();

        let path = dir.path().join("puzzle-export.json");
        exec(
            &mut catalog,
            Command::Export {
                indices: vec![0],
                output: Some(path.clone()),
            },
            "",
        );
        let out = exec(
            &mut catalog,
            Command::Import {
                file: path,
                strategy: crate::cli::Strategy::Skip,
            },
            "",
        );
        assert_eq!(out, "imported: 0 added, 0 replaced, 1 skipped\n");

        let out = exec(&mut catalog, Command::Delete { indices: vec![0] }, "");
        assert_eq!(out, "deleted 1 puzzles\n");
        assert!(catalog.authored().is_empty());
    }

    #[test]
    fn test_out_of_range_index() {
        let mut catalog = Catalog::load(MemoryStore::new());
        let err = run(
            &mut catalog,
            &Config::default(),
            Command::Share { indices: vec![2] },
            &mut Cursor::new(""),
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::Catalog(CatalogError::IndexOutOfRange { index: 2 })
        ));
    }

    #[test]
    fn test_playtest_saves_nothing() {
        let mut catalog = Catalog::load(MemoryStore::new());
        catalog.save_authored(letters(), None).unwrap();
        let before = catalog.store().clone();
        let out = exec(
            &mut catalog,
            Command::Playtest { index: 0 },
            "select A\nselect B\nselect C\nselect E\nguess\n",
        );
        assert!(out.contains("Not quite."));
        assert_eq!(catalog.store(), &before);
        assert!(catalog.played().is_empty());
    }
}
