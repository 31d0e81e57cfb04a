use std::cmp::Reverse;
use std::time::Instant;

use crate::cards::Card;
use crate::pool::CardMultiset;

use super::memo::MemoTable;
use super::search::{search_partition, SearchContext, SearchOutcome, SearchStats};
use super::{combinations, Pool, SearchLimits};

/// Score each floor group by how relevant it is to placing the hand:
/// 2 points per card sharing a rank with the hand, 1 per card sharing a
/// suit. Groups scoring 0 are never worth dissolving.
pub(crate) fn relevance_scores(hand: &[Card], floor_groups: &[Vec<Card>]) -> Vec<(usize, u32)> {
    let mut hand_rank = [false; 14];
    let mut hand_suit = [false; 4];
    for c in hand {
        hand_rank[c.rank as usize] = true;
        hand_suit[c.suit.index()] = true;
    }

    floor_groups
        .iter()
        .enumerate()
        .map(|(i, g)| {
            let mut score = 0u32;
            for c in g {
                if hand_rank[c.rank as usize] {
                    score += 2;
                }
                if hand_suit[c.suit.index()] {
                    score += 1;
                }
            }
            (i, score)
        })
        .collect()
}

#[inline]
fn past(deadline: Option<Instant>) -> bool {
    deadline.is_some_and(|d| Instant::now() > d)
}

fn sub_solve(
    required: CardMultiset,
    optional: &CardMultiset,
    deadline: Option<Instant>,
    memo: &mut dyn MemoTable,
    stats: &mut SearchStats,
) -> SearchOutcome {
    stats.sub_solves += 1;
    let mut pool = Pool::new(required, optional.clone());
    let mut ctx = SearchContext {
        memo,
        deadline,
        stats,
    };
    search_partition(&mut pool, &mut ctx)
}

/// Earlier of the overall deadline and a per-sub-problem budget.
#[inline]
fn sub_deadline(limits: &SearchLimits) -> Option<Instant> {
    let budget = Instant::now() + limits.sub_solve;
    Some(limits.deadline.map_or(budget, |d| d.min(budget)))
}

/// Place the hand while keeping as many floor groups intact as possible.
///
/// Dissolves k = 0, 1, 2, ... of the relevant floor groups (most
/// relevant first) and re-partitions only hand + dissolved cards, with
/// the cross available as optional fillers throughout. Untouched groups
/// pass through to the target unchanged. Falls back to a full
/// re-partition once the sub-problem cap is hit or every subset failed.
pub(crate) fn solve_incremental(
    hand: &[Card],
    floor_groups: &[Vec<Card>],
    cross: &[Card],
    limits: &SearchLimits,
    memo: &mut dyn MemoTable,
    stats: &mut SearchStats,
) -> SearchOutcome {
    let optional = CardMultiset::from_cards(cross);

    if hand.is_empty() {
        return SearchOutcome::Solved(floor_groups.to_vec());
    }

    if floor_groups.is_empty() {
        return sub_solve(
            CardMultiset::from_cards(hand),
            &optional,
            limits.deadline,
            memo,
            stats,
        );
    }

    // Relevant groups, highest score first, input order as tie-break.
    let mut scored = relevance_scores(hand, floor_groups);
    scored.sort_by_key(|&(i, score)| (Reverse(score), i));
    let relevant: Vec<usize> = scored
        .into_iter()
        .filter(|&(_, score)| score > 0)
        .map(|(i, _)| i)
        .collect();

    let mut total_tried = 0usize;
    'deepening: for k in 0..=relevant.len() {
        for subset in combinations(&relevant, k) {
            if past(limits.deadline) {
                return SearchOutcome::DeadlineExceeded;
            }
            total_tried += 1;
            if total_tried > limits.max_attempts {
                break 'deepening;
            }

            let mut required = CardMultiset::from_cards(hand);
            for &i in &subset {
                required.add_group(&floor_groups[i]);
            }

            match sub_solve(required, &optional, sub_deadline(limits), memo, stats) {
                SearchOutcome::Solved(mut groups) => {
                    for (i, g) in floor_groups.iter().enumerate() {
                        if !subset.contains(&i) {
                            groups.push(g.clone());
                        }
                    }
                    return SearchOutcome::Solved(groups);
                }
                SearchOutcome::Exhausted => {}
                // Sub-budget exceeded: give up on this subset, but only
                // abort outright once the overall deadline is gone.
                SearchOutcome::DeadlineExceeded => {
                    if past(limits.deadline) {
                        return SearchOutcome::DeadlineExceeded;
                    }
                }
            }
        }
    }

    // Fallback: dissolve the entire floor and re-partition from scratch.
    if past(limits.deadline) {
        return SearchOutcome::DeadlineExceeded;
    }
    let mut required = CardMultiset::from_cards(hand);
    for g in floor_groups {
        required.add_group(g);
    }
    sub_solve(required, &optional, limits.deadline, memo, stats)
}
