use crate::arrangement::Arrangement;
use crate::error::{Result, SortleError};
use crate::selector::Puzzle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmissionResult {
    /// Slots holding the canonical item for their position.
    pub hit_count: usize,
    pub is_complete: bool,
}

/// Score a fully filled arrangement against the canonical order.
///
/// Only exact positional matches count. Fails with
/// [`SortleError::Incomplete`] while any slot is empty.
pub fn evaluate(arrangement: &Arrangement, puzzle: &Puzzle) -> Result<SubmissionResult> {
    let empty = arrangement.empty_slots();
    if empty > 0 {
        return Err(SortleError::Incomplete {
            empty,
            total: arrangement.slot_count(),
        });
    }
    let hit_count = arrangement
        .slots()
        .iter()
        .zip(&puzzle.canonical_order)
        .filter(|(slot, want)| slot.as_deref() == Some(want.as_str()))
        .count();
    let result = SubmissionResult {
        hit_count,
        is_complete: hit_count == puzzle.len(),
    };
    tracing::debug!(hit_count, complete = result.is_complete, "scored submission");
    Ok(result)
}
