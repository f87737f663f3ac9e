//! Daily puzzle selection.
//!
//! The selected contest is a pure function of the catalog and the calendar
//! day in the configured reference offset.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, Utc};

use crate::catalog::{Catalog, Problem};
use crate::config::GameConfig;
use crate::error::{Result, SortleError};

/// Calendar day that seeds the puzzle selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DaySeed {
    date: NaiveDate,
}

impl DaySeed {
    pub fn from_date(date: NaiveDate) -> Self {
        DaySeed { date }
    }

    /// Day containing the instant `epoch_ms`, seen from UTC+`utc_offset_hours`.
    /// Timestamps outside chrono's range read as the Unix epoch.
    pub fn from_epoch_millis(epoch_ms: i64, utc_offset_hours: i32) -> Self {
        let utc = DateTime::<Utc>::from_timestamp_millis(epoch_ms).unwrap_or_default();
        let local = utc.with_timezone(&reference_offset(utc_offset_hours));
        DaySeed {
            date: local.date_naive(),
        }
    }

    /// Parse `YYYY-MM-DD`.
    pub fn parse(s: &str) -> Option<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .ok()
            .map(DaySeed::from_date)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Integer encoding `YYYYMMDD`.
    pub fn value(&self) -> u64 {
        let y = self.date.year().max(0) as u64;
        y * 10_000 + self.date.month() as u64 * 100 + self.date.day() as u64
    }

    /// `YYYY/MM/DD`, as shown in share texts.
    pub fn label(&self) -> String {
        format!(
            "{:04}/{:02}/{:02}",
            self.date.year(),
            self.date.month(),
            self.date.day()
        )
    }
}

fn reference_offset(hours: i32) -> FixedOffset {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| {
            tracing::warn!(hours, "utc offset out of range; using UTC");
            Utc.fix()
        })
}

/// The daily puzzle: one contest and the canonical order of its problems.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    pub group_id: String,
    pub group_number: u32,
    /// Problem ids in canonical order.
    pub canonical_order: Vec<String>,
    /// Ordinal label per canonical position (`A`, `B`, ..., `Ex`).
    pub slot_labels: Vec<String>,
    pub day: DaySeed,
}

impl Puzzle {
    /// Slot count `k`.
    pub fn len(&self) -> usize {
        self.canonical_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical_order.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.canonical_order.iter().any(|c| c == id)
    }
}

/// Numeric suffix of `contest_id` when it is exactly `prefix` followed by digits.
pub fn parse_group_number(contest_id: &str, prefix: &str) -> Option<u32> {
    let digits = contest_id.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Contest problem label order: `Ex` goes last, everything else compares
/// naturally so embedded numbers sort by value.
pub fn compare_ordinal_labels(a: &str, b: &str) -> Ordering {
    let is_extra = |s: &str| s.trim().eq_ignore_ascii_case("ex");
    is_extra(a)
        .cmp(&is_extra(b))
        .then_with(|| natural_cmp(a, b))
}

#[derive(Clone, Copy)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn make_chunk(part: &str, digit: bool) -> Chunk<'_> {
    if digit {
        Chunk::Digits(part)
    } else {
        Chunk::Text(part)
    }
}

fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut prev: Option<bool> = None;
    for (i, c) in s.char_indices() {
        let digit = c.is_ascii_digit();
        if let Some(p) = prev
            && p != digit
        {
            out.push(make_chunk(&s[start..i], p));
            start = i;
        }
        prev = Some(digit);
    }
    if let Some(p) = prev {
        out.push(make_chunk(&s[start..], p));
    }
    out
}

fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (ca, cb) = (chunks(a), chunks(b));
    for (x, y) in ca.iter().zip(cb.iter()) {
        let ord = match (*x, *y) {
            (Chunk::Digits(x), Chunk::Digits(y)) => {
                let x = x.trim_start_matches('0');
                let y = y.trim_start_matches('0');
                x.len().cmp(&y.len()).then_with(|| x.cmp(y))
            }
            (Chunk::Text(x), Chunk::Text(y)) => x
                .bytes()
                .map(|c| c.to_ascii_lowercase())
                .cmp(y.bytes().map(|c| c.to_ascii_lowercase())),
            (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    ca.len().cmp(&cb.len()).then_with(|| a.cmp(b))
}

fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

fn pick_index(seed: u64, len: usize) -> usize {
    (splitmix64(seed) % len as u64) as usize
}

/// Pick the contest of the day and derive its canonical problem order.
pub fn select_puzzle(catalog: &Catalog, config: &GameConfig, day: DaySeed) -> Result<Puzzle> {
    let eligible: Vec<(u32, &Problem)> = catalog
        .problems()
        .iter()
        .filter_map(|p| parse_group_number(&p.contest_id, &config.group_prefix).map(|n| (n, p)))
        .filter(|(n, _)| *n >= config.min_group_number)
        .collect();

    let candidates: Vec<u32> = eligible
        .iter()
        .map(|(n, _)| *n)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if candidates.is_empty() {
        return Err(SortleError::NoEligibleGroups {
            prefix: config.group_prefix.clone(),
            min_group_number: config.min_group_number,
        });
    }
    let chosen = candidates[pick_index(day.value(), candidates.len())];

    let mut members: Vec<&Problem> = eligible
        .iter()
        .filter(|(n, _)| *n == chosen)
        .map(|(_, p)| *p)
        .collect();
    members.sort_by(|a, b| {
        compare_ordinal_labels(&a.problem_index, &b.problem_index).then_with(|| a.id.cmp(&b.id))
    });

    let group_id = members
        .first()
        .map(|p| p.contest_id.clone())
        .unwrap_or_else(|| format!("{}{}", config.group_prefix, chosen));
    tracing::debug!(
        day = %day.label(),
        candidates = candidates.len(),
        group = %group_id,
        problems = members.len(),
        "selected daily puzzle"
    );

    Ok(Puzzle {
        group_id,
        group_number: chosen,
        canonical_order: members.iter().map(|p| p.id.clone()).collect(),
        slot_labels: members.iter().map(|p| p.problem_index.clone()).collect(),
        day,
    })
}
