use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::types::{ACE, ACE_HIGH, KING};

/// Kind of a legal group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    Set,
    Run,
}

/// Set: 3-4 cards of one rank, all suits pairwise distinct.
pub fn is_valid_set(group: &[Card]) -> bool {
    if group.len() < 3 {
        return false;
    }
    let rank = group[0].rank;
    if group.iter().any(|c| c.rank != rank) {
        return false;
    }
    let mut seen = [false; 4];
    for c in group {
        if seen[c.suit.index()] {
            return false;
        }
        seen[c.suit.index()] = true;
    }
    true
}

/// Run: >=3 cards of one suit with distinct, contiguous ranks. The Ace
/// may sit below the 2 or above the King, but a run never wraps, so
/// `K, A, 2` is rejected.
pub fn is_valid_run(group: &[Card]) -> bool {
    if group.len() < 3 {
        return false;
    }
    let suit = group[0].suit;
    if group.iter().any(|c| c.suit != suit) {
        return false;
    }

    let mut ranks: Vec<u8> = group.iter().map(|c| c.rank).collect();
    ranks.sort_unstable();
    if ranks.windows(2).any(|w| w[0] == w[1]) {
        return false;
    }

    if contiguous(&ranks) {
        return true;
    }

    // Ace-high: remap 1 -> 14 and re-check. Only worth trying when both
    // the Ace and the King are present.
    if ranks.contains(&ACE) && ranks.contains(&KING) {
        let mut high: Vec<u8> = ranks
            .iter()
            .map(|&r| if r == ACE { ACE_HIGH } else { r })
            .collect();
        high.sort_unstable();
        return contiguous(&high);
    }

    false
}

#[inline]
fn contiguous(sorted_ranks: &[u8]) -> bool {
    sorted_ranks.windows(2).all(|w| w[0] + 1 == w[1])
}

pub fn is_valid_group(group: &[Card]) -> bool {
    is_valid_set(group) || is_valid_run(group)
}

/// Classify a group, or `None` when it is not legal. Sets win the tie
/// for the degenerate inputs that satisfy both predicates.
pub fn classify_group(group: &[Card]) -> Option<GroupKind> {
    if is_valid_set(group) {
        Some(GroupKind::Set)
    } else if is_valid_run(group) {
        Some(GroupKind::Run)
    } else {
        None
    }
}
