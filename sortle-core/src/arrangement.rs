use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{Result, SortleError};
use crate::selector::Puzzle;

/// Container id of the pool in the rendering layer.
pub const POOL_CONTAINER_ID: &str = "pool";
/// Container id prefix of answer slots (`slot-0`, `slot-1`, ...).
pub const SLOT_CONTAINER_PREFIX: &str = "slot-";

/// Where an item can be dropped, and where an item currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Destination {
    Pool,
    Slot(usize),
}

impl Destination {
    pub fn container_id(&self) -> String {
        match self {
            Destination::Pool => POOL_CONTAINER_ID.to_string(),
            Destination::Slot(i) => format!("{}{}", SLOT_CONTAINER_PREFIX, i),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.container_id())
    }
}

impl FromStr for Destination {
    type Err = SortleError;

    /// Parse a container id (`pool` or `slot-<n>`). Bounds are checked by
    /// [`Arrangement::move_item`].
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == POOL_CONTAINER_ID {
            return Ok(Destination::Pool);
        }
        s.strip_prefix(SLOT_CONTAINER_PREFIX)
            .filter(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|n| n.parse().ok())
            .map(Destination::Slot)
            .ok_or_else(|| SortleError::InvalidMoveTarget {
                target: s.to_string(),
            })
    }
}

/// What a move did to the arrangement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveEffect {
    /// A pool item entered `slot`; a previous occupant went back to the pool.
    Placed {
        slot: usize,
        displaced: Option<String>,
    },
    /// Two slots exchanged contents; `other` is what now sits in `from`.
    Swapped {
        from: usize,
        to: usize,
        other: Option<String>,
    },
    /// A slotted item went back to the pool.
    Returned { from: usize },
    Unchanged,
}

/// Live partition of the puzzle's items into the unordered pool and the
/// ordered answer slots. Every puzzle item is in exactly one place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Arrangement {
    pool: Vec<String>,
    slots: Vec<Option<String>>,
}

impl Arrangement {
    /// Fresh arrangement: all items shuffled into the pool, all slots empty.
    pub fn new<R: Rng + ?Sized>(puzzle: &Puzzle, rng: &mut R) -> Self {
        let mut pool = puzzle.canonical_order.clone();
        pool.shuffle(rng);
        Arrangement {
            pool,
            slots: vec![None; puzzle.len()],
        }
    }

    /// Rebuild from explicit contents. Returns `None` unless every item
    /// appears exactly once across pool and slots.
    pub fn from_parts(pool: Vec<String>, slots: Vec<Option<String>>) -> Option<Self> {
        let arrangement = Arrangement { pool, slots };
        arrangement.is_consistent().then_some(arrangement)
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, puzzle: &Puzzle, rng: &mut R) {
        *self = Arrangement::new(puzzle, rng);
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    pub fn slots(&self) -> &[Option<String>] {
        &self.slots
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn empty_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_none()).count()
    }

    pub fn is_filled(&self) -> bool {
        self.empty_slots() == 0
    }

    pub fn locate(&self, id: &str) -> Option<Destination> {
        if self.pool.iter().any(|p| p == id) {
            return Some(Destination::Pool);
        }
        self.slots
            .iter()
            .position(|s| s.as_deref() == Some(id))
            .map(Destination::Slot)
    }

    /// Apply one drop. Pool to slot displaces any occupant into the pool,
    /// slot to slot swaps, slot to pool empties the slot. Dropping an item
    /// where it already is changes nothing. Errors leave the state untouched.
    pub fn move_item(&mut self, id: &str, dest: Destination) -> Result<MoveEffect> {
        if let Destination::Slot(target) = dest
            && target >= self.slots.len()
        {
            return Err(SortleError::InvalidMoveTarget {
                target: dest.container_id(),
            });
        }
        let from = self.locate(id).ok_or_else(|| SortleError::UnknownItem {
            id: id.to_string(),
        })?;

        let effect = match (from, dest) {
            (Destination::Pool, Destination::Pool) => MoveEffect::Unchanged,
            (Destination::Slot(f), Destination::Slot(t)) if f == t => MoveEffect::Unchanged,
            (Destination::Pool, Destination::Slot(t)) => {
                self.pool.retain(|p| p != id);
                let displaced = self.slots[t].replace(id.to_string());
                if let Some(d) = &displaced {
                    self.pool.push(d.clone());
                }
                MoveEffect::Placed { slot: t, displaced }
            }
            (Destination::Slot(f), Destination::Slot(t)) => {
                self.slots.swap(f, t);
                MoveEffect::Swapped {
                    from: f,
                    to: t,
                    other: self.slots[f].clone(),
                }
            }
            (Destination::Slot(f), Destination::Pool) => {
                if let Some(item) = self.slots[f].take() {
                    self.pool.push(item);
                }
                MoveEffect::Returned { from: f }
            }
        };
        debug_assert!(self.is_consistent(), "item conservation violated");
        Ok(effect)
    }

    /// No item appears twice across pool and slots.
    pub fn is_consistent(&self) -> bool {
        let mut seen: Vec<&str> = self.items().collect();
        let total = seen.len();
        seen.sort_unstable();
        seen.dedup();
        seen.len() == total
    }

    /// Exactly the puzzle's items, each once.
    pub fn conserves(&self, puzzle: &Puzzle) -> bool {
        if self.slots.len() != puzzle.len() || !self.is_consistent() {
            return false;
        }
        let mut here: Vec<&str> = self.items().collect();
        let mut want: Vec<&str> = puzzle.canonical_order.iter().map(String::as_str).collect();
        here.sort_unstable();
        want.sort_unstable();
        here == want
    }

    fn items(&self) -> impl Iterator<Item = &str> {
        self.pool
            .iter()
            .map(String::as_str)
            .chain(self.slots.iter().filter_map(|s| s.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::DaySeed;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn puzzle(ids: &[&str]) -> Puzzle {
        Puzzle {
            group_id: "abc300".into(),
            group_number: 300,
            canonical_order: ids.iter().map(|s| s.to_string()).collect(),
            slot_labels: (0..ids.len()).map(|i| i.to_string()).collect(),
            day: DaySeed::parse("2024-05-01").unwrap(),
        }
    }

    fn fresh() -> (Puzzle, Arrangement) {
        let p = puzzle(&["p1", "p2", "p3"]);
        let a = Arrangement::new(&p, &mut StdRng::seed_from_u64(7));
        (p, a)
    }

    #[test]
    fn new_puts_everything_in_pool() {
        let (p, a) = fresh();
        assert_eq!(a.pool().len(), 3);
        assert_eq!(a.slots(), &[None, None, None]);
        assert!(a.conserves(&p));
    }

    #[test]
    fn container_ids_parse() {
        assert_eq!("pool".parse::<Destination>().unwrap(), Destination::Pool);
        assert_eq!("slot-4".parse::<Destination>().unwrap(), Destination::Slot(4));
        for bad in ["", "slot-", "slot--1", "slot-x", "pool-1", "slots-1"] {
            assert!(matches!(
                bad.parse::<Destination>(),
                Err(SortleError::InvalidMoveTarget { .. })
            ));
        }
        assert_eq!(Destination::Slot(2).container_id(), "slot-2");
    }

    #[test]
    fn pool_to_empty_slot_shrinks_pool() {
        let (p, mut a) = fresh();
        let effect = a.move_item("p2", Destination::Slot(0)).unwrap();
        assert_eq!(
            effect,
            MoveEffect::Placed {
                slot: 0,
                displaced: None
            }
        );
        assert_eq!(a.pool().len(), 2);
        assert_eq!(a.slots()[0].as_deref(), Some("p2"));
        assert!(a.conserves(&p));
    }

    #[test]
    fn pool_to_occupied_slot_displaces_occupant() {
        let (p, mut a) = fresh();
        a.move_item("p1", Destination::Slot(1)).unwrap();
        let effect = a.move_item("p3", Destination::Slot(1)).unwrap();
        assert_eq!(
            effect,
            MoveEffect::Placed {
                slot: 1,
                displaced: Some("p1".into())
            }
        );
        assert_eq!(a.pool().len(), 2);
        assert!(a.pool().contains(&"p1".to_string()));
        assert_eq!(a.slots()[1].as_deref(), Some("p3"));
        assert!(a.conserves(&p));
    }

    #[test]
    fn slot_to_slot_swaps() {
        let (p, mut a) = fresh();
        a.move_item("p1", Destination::Slot(0)).unwrap();
        a.move_item("p2", Destination::Slot(2)).unwrap();
        let pool_before = a.pool().to_vec();
        a.move_item("p1", Destination::Slot(2)).unwrap();
        assert_eq!(a.slots()[0].as_deref(), Some("p2"));
        assert_eq!(a.slots()[2].as_deref(), Some("p1"));
        assert_eq!(a.pool(), pool_before.as_slice());
        assert!(a.conserves(&p));
    }

    #[test]
    fn slot_to_empty_slot_moves() {
        let (_, mut a) = fresh();
        a.move_item("p1", Destination::Slot(0)).unwrap();
        a.move_item("p1", Destination::Slot(1)).unwrap();
        assert_eq!(a.slots(), &[None, Some("p1".to_string()), None]);
    }

    #[test]
    fn slot_to_pool_empties_slot() {
        let (p, mut a) = fresh();
        a.move_item("p3", Destination::Slot(2)).unwrap();
        let effect = a.move_item("p3", Destination::Pool).unwrap();
        assert_eq!(effect, MoveEffect::Returned { from: 2 });
        assert_eq!(a.slots()[2], None);
        assert_eq!(a.pool().len(), 3);
        assert!(a.conserves(&p));
    }

    #[test]
    fn same_place_moves_are_no_ops() {
        let (_, mut a) = fresh();
        let before = a.clone();
        assert_eq!(a.move_item("p1", Destination::Pool).unwrap(), MoveEffect::Unchanged);
        assert_eq!(a, before);
        a.move_item("p1", Destination::Slot(1)).unwrap();
        let before = a.clone();
        assert_eq!(
            a.move_item("p1", Destination::Slot(1)).unwrap(),
            MoveEffect::Unchanged
        );
        assert_eq!(a, before);
    }

    #[test]
    fn rejected_moves_leave_state_untouched() {
        let (_, mut a) = fresh();
        let before = a.clone();
        assert!(matches!(
            a.move_item("p1", Destination::Slot(3)),
            Err(SortleError::InvalidMoveTarget { .. })
        ));
        assert!(matches!(
            a.move_item("nope", Destination::Slot(0)),
            Err(SortleError::UnknownItem { .. })
        ));
        assert_eq!(a, before);
    }

    #[test]
    fn reset_empties_slots() {
        let (p, mut a) = fresh();
        a.move_item("p1", Destination::Slot(0)).unwrap();
        a.move_item("p2", Destination::Slot(1)).unwrap();
        a.reset(&p, &mut StdRng::seed_from_u64(1));
        assert_eq!(a.empty_slots(), 3);
        assert!(a.conserves(&p));
    }

    #[test]
    fn from_parts_rejects_duplicates() {
        assert!(Arrangement::from_parts(vec!["a".into()], vec![Some("a".into())]).is_none());
        assert!(Arrangement::from_parts(vec!["a".into()], vec![Some("b".into()), None]).is_some());
    }
}
