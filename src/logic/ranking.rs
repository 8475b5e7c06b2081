//! Ranking engine: win percentages, ordering by the chosen column, dense ranks.
//!
//! Everything here is a pure function of (records, sort spec). Ranks are never
//! carried over between calls; each call rebuilds the view from the records.

use crate::models::{PlayerRecord, RankedPlayer, SortDirection, SortKey, SortSpec, UnrankedPlayer};
use icu_collator::{Collator, CollatorOptions};
use std::cmp::Ordering;

/// Attach a win percentage to every record. Input order is preserved.
pub fn derive(records: &[PlayerRecord]) -> Vec<UnrankedPlayer> {
    records.iter().map(UnrankedPlayer::from_record).collect()
}

/// Order rows by `spec.key` in `spec.direction`.
///
/// The sort is stable: rows with equal keys keep their relative input order in
/// both directions. Names are compared with the root-locale collator, so
/// accented names sort next to their base letters.
pub fn order(derived: &[UnrankedPlayer], spec: SortSpec) -> Vec<UnrankedPlayer> {
    let collator = match spec.key {
        SortKey::Name => name_collator(),
        _ => None,
    };
    let mut ordered = derived.to_vec();
    ordered.sort_by(|a, b| {
        let ord = compare_by_key(a, b, spec.key, collator.as_ref());
        match spec.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    ordered
}

/// Assign `rank = position + 1`. Equal values still get distinct ranks.
pub fn rank(ordered: Vec<UnrankedPlayer>) -> Vec<RankedPlayer> {
    ordered
        .into_iter()
        .zip(1u32..)
        .map(|(p, rank)| RankedPlayer {
            record: p.record,
            win_percentage: p.win_percentage,
            rank,
        })
        .collect()
}

/// Full pipeline: `rank(order(derive(records), spec))`.
pub fn rank_players(records: &[PlayerRecord], spec: SortSpec) -> Vec<RankedPlayer> {
    log::debug!(
        "Ranking {} player(s) by {} {}",
        records.len(),
        spec.key,
        spec.direction
    );
    rank(order(&derive(records), spec))
}

/// Ascending comparison for one column.
fn compare_by_key(
    a: &UnrankedPlayer,
    b: &UnrankedPlayer,
    key: SortKey,
    collator: Option<&Collator>,
) -> Ordering {
    match key {
        SortKey::Name => collate(collator, &a.record.name, &b.record.name),
        SortKey::Wins => a.record.wins.cmp(&b.record.wins),
        SortKey::Losses => a.record.losses.cmp(&b.record.losses),
        SortKey::Draws => a.record.draws.cmp(&b.record.draws),
        SortKey::MatchesPlayed => a.record.matches_played.cmp(&b.record.matches_played),
        SortKey::WinPercentage => a.win_percentage.cmp(&b.win_percentage),
        // Unranked rows have no rank yet; missing values compare as 0, so all tie.
        SortKey::Rank => Ordering::Equal,
    }
}

/// Root-locale collator with default (tertiary) strength.
fn name_collator() -> Option<Collator> {
    match Collator::try_new(&Default::default(), CollatorOptions::new()) {
        Ok(collator) => Some(collator),
        Err(e) => {
            log::warn!("Root collator unavailable, comparing case-folded names: {}", e);
            None
        }
    }
}

/// Alphabetical order: base letters first, then accents, then case (lowercase first).
fn collate(collator: Option<&Collator>, a: &str, b: &str) -> Ordering {
    match collator {
        Some(c) => c.compare(a, b),
        None => {
            let folded = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
            folded(a).cmp(&folded(b)).then_with(|| b.cmp(a))
        }
    }
}
