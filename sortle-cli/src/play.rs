//! Terminal frontend: board printing and the interactive command loop.

use std::io::{BufRead, Write};

use anyhow::Result;
use rand::Rng;
use sortle_core::{Destination, Game, GameView, Submission};

pub const HELP: &str = "\
commands:
  move <item> <pool|N|slot-N>  move an item to the pool or slot N; <item> is a problem id,
                               or a pool position when no id matches
  submit                       check the current order
  reset                        shuffle everything back into the pool
  share                        print the share text of a solved puzzle
  show                         print the board
  help                         print this help
  quit                         leave the game";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayCommand {
    /// `item` is resolved against the board when the command runs.
    Move { item: String, dest: Destination },
    Submit,
    Reset,
    Share,
    Show,
    Help,
    Quit,
}

/// Slots are numbered from 1 on the board; `slot-N` is the 0-based
/// container id shared with the web page.
fn parse_destination(s: &str) -> Result<Destination, String> {
    if let Ok(n) = s.parse::<usize>() {
        return match n {
            0 => Err("slots are numbered from 1".to_string()),
            n => Ok(Destination::Slot(n - 1)),
        };
    }
    s.parse::<Destination>().map_err(|e| e.to_string())
}

pub fn parse_command(line: &str) -> Result<PlayCommand, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["move" | "m", item, dest] => Ok(PlayCommand::Move {
            item: item.to_string(),
            dest: parse_destination(dest)?,
        }),
        ["move" | "m", ..] => Err("usage: move <item> <pool|N|slot-N>".to_string()),
        ["submit" | "s"] => Ok(PlayCommand::Submit),
        ["reset" | "r"] => Ok(PlayCommand::Reset),
        ["share"] => Ok(PlayCommand::Share),
        ["show" | "ls"] | [] => Ok(PlayCommand::Show),
        ["help" | "h" | "?"] => Ok(PlayCommand::Help),
        ["quit" | "q" | "exit"] => Ok(PlayCommand::Quit),
        [other, ..] => Err(format!("unknown command '{}' (try 'help')", other)),
    }
}

/// Board as printed by `today` and `play`.
pub fn format_board(view: &GameView, brand: &str) -> String {
    let mut out = format!(
        "{} Sortle ({})  attempt {}\n\npool:\n",
        brand, view.date_label, view.attempt
    );
    if view.pool.is_empty() {
        out.push_str("  (empty)\n");
    }
    for (i, card) in view.pool.iter().enumerate() {
        out.push_str(&format!("  {:>2}. {:<12} {}\n", i + 1, card.id, card.name));
    }
    out.push_str("\nslots:\n");
    for (i, slot) in view.slots.iter().enumerate() {
        match &slot.card {
            Some(card) => out.push_str(&format!(
                "  {:>2} [{:<2}] {:<12} {}\n",
                i + 1,
                slot.label,
                card.id,
                card.name
            )),
            None => out.push_str(&format!("  {:>2} [{:<2}] -\n", i + 1, slot.label)),
        }
    }
    if let Some(result) = &view.result {
        out.push_str(&format!("\n{}\n", result));
    }
    out
}

/// A puzzle id wins; otherwise an all-digit token is a 1-based pool
/// position. Anything else is passed through and rejected by the game.
fn resolve_item(game: &Game, item: &str) -> Option<String> {
    if game.puzzle().contains(item) {
        return Some(item.to_string());
    }
    match item.parse::<usize>() {
        Ok(n) => n
            .checked_sub(1)
            .and_then(|i| game.arrangement().pool().get(i))
            .cloned(),
        Err(_) => Some(item.to_string()),
    }
}

pub fn share_text(game: &Game, share_url: Option<&str>) -> Option<String> {
    match share_url {
        Some(url) => game.share_payload(url).map(|p| p.clipboard_text()),
        None => game.session().share_text().map(str::to_string),
    }
}

/// Run the interactive loop until `quit` or end of input.
pub fn run<R, W, G>(
    game: &mut Game,
    input: R,
    mut out: W,
    rng: &mut G,
    share_url: Option<&str>,
    now_ms: impl Fn() -> i64,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    let brand = game.config().display_prefix();
    writeln!(out, "{}\n\n{}", format_board(&game.view(), &brand), HELP)?;
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(PlayCommand::Quit) => break,
            Ok(PlayCommand::Help) => writeln!(out, "{}", HELP)?,
            Ok(PlayCommand::Show) => write!(out, "{}", format_board(&game.view(), &brand))?,
            Ok(PlayCommand::Move { item, dest }) => match resolve_item(game, &item) {
                Some(id) => {
                    if !game.move_item(&id, dest) {
                        writeln!(out, "nothing moved")?;
                    }
                    write!(out, "{}", format_board(&game.view(), &brand))?;
                }
                None => writeln!(out, "no such pool position")?,
            },
            Ok(PlayCommand::Submit) => {
                let submission = game.check_answer(now_ms());
                tracing::debug!(?submission, "submitted");
                if let Some(result) = game.session().result_text() {
                    writeln!(out, "{}", result)?;
                }
                if matches!(submission, Submission::Solved { .. }) {
                    writeln!(out, "type 'share' for the share text")?;
                }
            }
            Ok(PlayCommand::Reset) => {
                game.reset(rng, now_ms());
                write!(out, "{}", format_board(&game.view(), &brand))?;
            }
            Ok(PlayCommand::Share) => match share_text(game, share_url) {
                Some(text) => writeln!(out, "{}", text)?,
                None => writeln!(out, "solve the puzzle first")?,
            },
            Err(message) => writeln!(out, "{}", message)?,
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use sortle_core::{Catalog, DaySeed, GameConfig, Problem};

    fn game() -> Game {
        let problems = ["A", "B", "C"]
            .iter()
            .map(|idx| Problem {
                id: format!("abc300_{}", idx.to_lowercase()),
                contest_id: "abc300".into(),
                problem_index: idx.to_string(),
                name: format!("Task {}", idx),
                title: None,
            })
            .collect();
        Game::new(
            Catalog::new(problems),
            GameConfig::default(),
            DaySeed::parse("2024-05-01").unwrap(),
            0,
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap()
    }

    #[test]
    fn parses_moves() {
        assert_eq!(
            parse_command("move abc300_a 2"),
            Ok(PlayCommand::Move {
                item: "abc300_a".into(),
                dest: Destination::Slot(1),
            })
        );
        assert_eq!(
            parse_command("m 3 pool"),
            Ok(PlayCommand::Move {
                item: "3".into(),
                dest: Destination::Pool,
            })
        );
        assert_eq!(
            parse_command("move x slot-0"),
            Ok(PlayCommand::Move {
                item: "x".into(),
                dest: Destination::Slot(0),
            })
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_command("move x 0").is_err());
        assert!(parse_command("move x trash").is_err());
        assert!(parse_command("move x").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn blank_line_shows_board() {
        assert_eq!(parse_command("   "), Ok(PlayCommand::Show));
        assert_eq!(parse_command("quit"), Ok(PlayCommand::Quit));
    }

    #[test]
    fn board_lists_pool_and_slots() {
        let g = game();
        let board = format_board(&g.view(), "ABC");
        assert!(board.starts_with("ABC Sortle (2024/05/01)  attempt 1"));
        assert!(board.contains("Task B"));
        assert!(board.contains("[A ] -"));
    }

    #[test]
    fn scripted_session_solves_the_puzzle() {
        let mut g = game();
        let script = "move abc300_c 3\nmove abc300_a 1\nsubmit\nmove abc300_b 2\nsubmit\nshare\nquit\n";
        let mut out = Vec::new();
        run(
            &mut g,
            script.as_bytes(),
            &mut out,
            &mut StdRng::seed_from_u64(2),
            Some("https://sortle.test/"),
            || 65_000,
        )
        .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Set All Problems"));
        assert!(out.contains("🎉Correct!(From ABC300) Time:01:05 Attempts:1"));
        assert!(out.contains("ABC Sortle (2024/05/01)\nAttempts:1\nTime:01:05\n#ABCSortle\nhttps://sortle.test/"));
    }

    #[test]
    fn pool_positions_resolve_against_current_pool() {
        let g = game();
        let first = g.arrangement().pool()[0].clone();
        assert_eq!(resolve_item(&g, "1"), Some(first));
        assert_eq!(resolve_item(&g, "0"), None);
        assert_eq!(resolve_item(&g, "4"), None);
        assert_eq!(resolve_item(&g, "abc300_b").as_deref(), Some("abc300_b"));
    }

    #[test]
    fn numeric_ids_win_over_pool_positions() {
        let problems = ["1", "2"]
            .iter()
            .map(|id| Problem {
                id: id.to_string(),
                contest_id: "abc300".into(),
                problem_index: if *id == "1" { "A".into() } else { "B".into() },
                name: format!("Task {}", id),
                title: None,
            })
            .collect();
        let mut g = Game::new(
            Catalog::new(problems),
            GameConfig::default(),
            DaySeed::parse("2024-05-01").unwrap(),
            0,
            &mut StdRng::seed_from_u64(5),
        )
        .unwrap();
        assert_eq!(resolve_item(&g, "2").as_deref(), Some("2"));
        // Slotted items stay reachable by id.
        assert!(g.move_item("2", Destination::Slot(0)));
        assert_eq!(resolve_item(&g, "2").as_deref(), Some("2"));
        assert_eq!(resolve_item(&g, "7"), None);
    }
}
