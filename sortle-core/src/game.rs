use rand::Rng;
use serde::Serialize;

use crate::arrangement::{Arrangement, Destination, MoveEffect};
use crate::catalog::{Catalog, Problem};
use crate::config::GameConfig;
use crate::error::{Result, SortleError};
use crate::palette::slot_color;
use crate::scorer::evaluate;
use crate::selector::{DaySeed, Puzzle, select_puzzle};
use crate::session::{Session, SharePayload, Submission};

/// A problem card as the renderer shows it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SlotView {
    pub container_id: String,
    pub label: String,
    pub color: String,
    pub card: Option<CardView>,
}

/// Read-only snapshot handed to the rendering layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GameView {
    pub loading: bool,
    pub date_label: String,
    pub attempt: u32,
    pub pool: Vec<CardView>,
    pub slots: Vec<SlotView>,
    pub result: Option<String>,
    pub share: Option<String>,
}

impl GameView {
    /// Snapshot shown while the catalog is still being fetched.
    pub fn loading() -> Self {
        GameView {
            loading: true,
            ..Default::default()
        }
    }
}

/// One puzzle session: the only owner of mutable game state.
///
/// Every user action goes through one method here, so the conservation
/// invariant and the session counters are updated in one place.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    catalog: Catalog,
    puzzle: Puzzle,
    arrangement: Arrangement,
    session: Session,
}

impl Game {
    /// Build the puzzle for `day`. The pool shuffle comes from `rng` and is
    /// independent of the day.
    pub fn new<R: Rng + ?Sized>(
        catalog: Catalog,
        config: GameConfig,
        day: DaySeed,
        now_ms: i64,
        rng: &mut R,
    ) -> Result<Self> {
        let puzzle = select_puzzle(&catalog, &config, day)?;
        let arrangement = Arrangement::new(&puzzle, rng);
        tracing::info!(day = %day.label(), slots = puzzle.len(), "puzzle ready");
        Ok(Game {
            config,
            catalog,
            puzzle,
            arrangement,
            session: Session::start(now_ms),
        })
    }

    /// Build the puzzle of the day containing `now_ms` in the configured offset.
    pub fn for_today<R: Rng + ?Sized>(
        catalog: Catalog,
        config: GameConfig,
        now_ms: i64,
        rng: &mut R,
    ) -> Result<Self> {
        let day = DaySeed::from_epoch_millis(now_ms, config.utc_offset_hours);
        Game::new(catalog, config, day, now_ms, rng)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn arrangement(&self) -> &Arrangement {
        &self.arrangement
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Apply a drop. Returns whether anything changed; rejected drops are
    /// logged and ignored.
    pub fn move_item(&mut self, id: &str, dest: Destination) -> bool {
        match self.arrangement.move_item(id, dest) {
            Ok(MoveEffect::Unchanged) => false,
            Ok(effect) => {
                tracing::trace!(id, %dest, ?effect, "moved");
                true
            }
            Err(err) => {
                tracing::warn!(id, %dest, error = %err, "ignored move");
                false
            }
        }
    }

    /// Apply a drop described by the renderer's container id.
    pub fn drop_on(&mut self, id: &str, container_id: &str) -> bool {
        match container_id.parse::<Destination>() {
            Ok(dest) => self.move_item(id, dest),
            Err(err) => {
                tracing::warn!(id, error = %err, "ignored drop");
                false
            }
        }
    }

    /// Reshuffle everything back into the pool and restart the round.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R, now_ms: i64) {
        self.arrangement.reset(&self.puzzle, rng);
        self.session.restart(now_ms);
        debug_assert!(self.arrangement.conserves(&self.puzzle));
    }

    pub fn check_answer(&mut self, now_ms: i64) -> Submission {
        match evaluate(&self.arrangement, &self.puzzle) {
            Ok(result) => self
                .session
                .record_result(result, &self.puzzle, &self.config, now_ms),
            Err(SortleError::Incomplete { empty, .. }) => {
                tracing::debug!(empty, "submission with empty slots");
                self.session.record_incomplete()
            }
            Err(err) => {
                tracing::error!(error = %err, "unexpected scoring failure");
                self.session.record_incomplete()
            }
        }
    }

    /// Payload for the share surface; `None` until the puzzle is solved.
    pub fn share_payload(&self, url: &str) -> Option<SharePayload> {
        self.session
            .share_text()
            .map(|text| SharePayload::new(&self.config, text, url))
    }

    pub fn view(&self) -> GameView {
        let pool = self
            .arrangement
            .pool()
            .iter()
            .map(|id| self.card(id))
            .collect();
        let slots = self
            .arrangement
            .slots()
            .iter()
            .enumerate()
            .map(|(i, slot)| SlotView {
                container_id: Destination::Slot(i).container_id(),
                label: self.puzzle.slot_labels.get(i).cloned().unwrap_or_default(),
                color: slot_color(i),
                card: slot.as_deref().map(|id| self.card(id)),
            })
            .collect();
        GameView {
            loading: false,
            date_label: self.puzzle.day.label(),
            attempt: self.session.attempt_count(),
            pool,
            slots,
            result: self.session.result_text().map(str::to_string),
            share: self.session.share_text().map(str::to_string),
        }
    }

    /// Look up a puzzle problem; every puzzle id came from the catalog.
    pub fn problem(&self, id: &str) -> Option<&Problem> {
        let found = self.catalog.get(id);
        if found.is_none() {
            tracing::error!(id, "puzzle item missing from catalog");
            debug_assert!(false, "puzzle item {id} missing from catalog");
        }
        found
    }

    fn card(&self, id: &str) -> CardView {
        CardView {
            id: id.to_string(),
            name: self
                .problem(id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| id.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn catalog() -> Catalog {
        let problems = ["A", "B", "C"]
            .iter()
            .map(|idx| Problem {
                id: format!("abc200_{}", idx.to_lowercase()),
                contest_id: "abc200".into(),
                problem_index: idx.to_string(),
                name: format!("Problem {}", idx),
                title: None,
            })
            .collect();
        Catalog::new(problems)
    }

    fn game() -> Game {
        Game::new(
            catalog(),
            GameConfig::default(),
            DaySeed::parse("2024-05-01").unwrap(),
            0,
            &mut StdRng::seed_from_u64(3),
        )
        .unwrap()
    }

    #[test]
    fn view_starts_with_full_pool() {
        let g = game();
        let v = g.view();
        assert!(!v.loading);
        assert_eq!(v.pool.len(), 3);
        assert_eq!(v.slots.len(), 3);
        assert_eq!(v.slots[0].container_id, "slot-0");
        assert_eq!(v.slots[2].label, "C");
        assert!(v.slots.iter().all(|s| s.card.is_none()));
        assert_eq!(v.date_label, "2024/05/01");
        assert_eq!(v.attempt, 1);
    }

    #[test]
    fn drop_on_resolves_container_ids() {
        let mut g = game();
        assert!(g.drop_on("abc200_b", "slot-1"));
        assert!(!g.drop_on("abc200_b", "slot-9"));
        assert!(!g.drop_on("abc200_b", "trash"));
        assert!(!g.drop_on("abc200_b", "slot-1"));
        let v = g.view();
        assert_eq!(v.slots[1].card.as_ref().unwrap().name, "Problem B");
        assert_eq!(v.pool.len(), 2);
    }

    #[test]
    fn share_payload_only_after_win() {
        let mut g = game();
        assert!(g.share_payload("https://sortle.test/").is_none());
        for (i, id) in ["abc200_a", "abc200_b", "abc200_c"].iter().enumerate() {
            g.move_item(id, Destination::Slot(i));
        }
        assert!(matches!(g.check_answer(10_000), Submission::Solved { .. }));
        let payload = g.share_payload("https://sortle.test/").unwrap();
        assert!(payload.text.starts_with("ABC Sortle (2024/05/01)"));
    }

    #[test]
    fn loading_view_is_empty() {
        let v = GameView::loading();
        assert!(v.loading);
        assert!(v.pool.is_empty());
        assert!(v.result.is_none());
    }
}
