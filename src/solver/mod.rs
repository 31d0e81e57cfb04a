use std::time::{Duration, Instant};

use crate::cards::Card;
use crate::pool::CardMultiset;
use crate::types::Suit;

pub mod groups;
pub mod incremental;
pub mod memo;
pub mod search;

pub use groups::{candidate_groups, order_candidates, runs_containing, sets_containing, Candidate};
pub use memo::{InMemoryMemo, MemoEntry, MemoTable, PoolKey};
pub use search::{search_partition, SearchContext, SearchOutcome, SearchStats};

/// Default wall-clock budget for one solve call.
pub const DEFAULT_DEADLINE_MS: u64 = 60_000;
/// Budget for a single sub-problem inside the incremental driver.
pub const SUB_SOLVE_BUDGET: Duration = Duration::from_secs(5);
/// Cap on the number of sub-problems the incremental driver will try
/// before falling back to a full re-partition.
pub const MAX_SUB_PROBLEMS: usize = 50_000;

#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    /// Hard wall-clock deadline, checked at every recursion entry.
    pub deadline: Option<Instant>,
    /// Per-sub-problem budget for the incremental driver.
    pub sub_solve: Duration,
    /// Sub-problem count cap for the incremental driver.
    pub max_attempts: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            deadline: None,
            sub_solve: SUB_SOLVE_BUDGET,
            max_attempts: MAX_SUB_PROBLEMS,
        }
    }
}

impl SearchLimits {
    #[inline]
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            ..Self::default()
        }
    }
}

/// Which half of the pool a card copy was taken from.
#[derive(Debug, Clone, Copy)]
enum CopySource {
    Required,
    Optional,
}

/// Undo record for one removed group, so backtracking restores the pool
/// bit-for-bit including the required/optional split.
#[derive(Debug)]
pub struct GroupUndo {
    taken: Vec<(Card, CopySource)>,
}

/// The search pool: required cards (hand + dissolved floor) that must
/// all be placed, and optional cards (cross anchors) that may remain.
#[derive(Debug, Clone)]
pub struct Pool {
    required: CardMultiset,
    optional: CardMultiset,
}

impl Pool {
    #[inline]
    pub fn new(required: CardMultiset, optional: CardMultiset) -> Self {
        Self { required, optional }
    }

    /// Combined availability of a `(rank, suit)` across both halves.
    #[inline]
    pub fn avail(&self, rank: u8, suit: Suit) -> u8 {
        self.required.get_at(rank, suit) + self.optional.get_at(rank, suit)
    }

    #[inline]
    pub fn required_total(&self) -> u16 {
        self.required.total()
    }

    #[inline]
    pub fn total(&self) -> u16 {
        self.required.total() + self.optional.total()
    }

    #[inline]
    pub fn key(&self) -> PoolKey {
        PoolKey {
            required: self.required.packed_key(),
            optional: self.optional.packed_key(),
        }
    }

    /// Smallest required card under the card total order. This is the
    /// anchor the search branches on.
    #[inline]
    pub fn smallest_required(&self) -> Option<Card> {
        self.required.iter().next().map(|(c, _)| c)
    }

    /// Remove a group from the pool. Required copies are consumed before
    /// optional ones: leaving a copy behind is only legal for optional
    /// cards, so spending the required copy first loses no solutions.
    pub fn take_group(&mut self, cards: &[Card]) -> GroupUndo {
        let mut taken = Vec::with_capacity(cards.len());
        for &c in cards {
            if self.required.get(c) > 0 {
                self.required.remove(c);
                taken.push((c, CopySource::Required));
            } else {
                self.optional.remove(c);
                taken.push((c, CopySource::Optional));
            }
        }
        GroupUndo { taken }
    }

    pub fn restore(&mut self, undo: GroupUndo) {
        for (c, src) in undo.taken {
            match src {
                CopySource::Required => self.required.add(c),
                CopySource::Optional => self.optional.add(c),
            }
        }
    }
}

/// Outcome of a full hand solve.
#[derive(Debug, Clone)]
pub enum HandOutcome {
    Solved {
        target_groups: Vec<Vec<Card>>,
        remaining_cross: Vec<Card>,
    },
    NoSolution,
    DeadlineExceeded,
}

/// Solver facade owning the memo table and limits for one invocation.
/// The memo is shared across all sub-problems of a single solve and
/// discarded with the solver.
pub struct Solver {
    memo: InMemoryMemo,
    limits: SearchLimits,
    stats: SearchStats,
}

impl Solver {
    #[inline]
    pub fn new(limits: SearchLimits) -> Self {
        Self {
            memo: InMemoryMemo::with_capacity(1 << 12),
            limits,
            stats: SearchStats::default(),
        }
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Partition a bare pool: every `required` card must be placed,
    /// `optional` cards may remain. Mostly a test and CLI surface; the
    /// full driver is [`Solver::solve_hand`].
    pub fn solve_pool(&mut self, required: &[Card], optional: &[Card]) -> SearchOutcome {
        let mut pool = Pool::new(
            CardMultiset::from_cards(required),
            CardMultiset::from_cards(optional),
        );
        let mut ctx = SearchContext {
            memo: &mut self.memo,
            deadline: self.limits.deadline,
            stats: &mut self.stats,
        };
        search_partition(&mut pool, &mut ctx)
    }

    /// Decide whether `hand` can be emptied against the given floor and
    /// cross, producing the target partition and the unincorporated
    /// cross cards.
    pub fn solve_hand(
        &mut self,
        hand: &[Card],
        floor_groups: &[Vec<Card>],
        cross: &[Card],
    ) -> HandOutcome {
        let outcome = incremental::solve_incremental(
            hand,
            floor_groups,
            cross,
            &self.limits,
            &mut self.memo,
            &mut self.stats,
        );

        match outcome {
            SearchOutcome::Solved(target_groups) => {
                let remaining_cross = leftover_cross(hand, floor_groups, cross, &target_groups);
                HandOutcome::Solved {
                    target_groups,
                    remaining_cross,
                }
            }
            SearchOutcome::Exhausted => HandOutcome::NoSolution,
            SearchOutcome::DeadlineExceeded => HandOutcome::DeadlineExceeded,
        }
    }
}

/// Cross cards not used by any target group: target minus (hand + floor)
/// gives the incorporated cross copies; subtract those from the cross.
fn leftover_cross(
    hand: &[Card],
    floor_groups: &[Vec<Card>],
    cross: &[Card],
    target_groups: &[Vec<Card>],
) -> Vec<Card> {
    let mut required = CardMultiset::from_cards(hand);
    for g in floor_groups {
        required.add_group(g);
    }
    let mut placed = CardMultiset::new();
    for g in target_groups {
        placed.add_group(g);
    }
    let used_cross = placed.subtract(&required);
    CardMultiset::from_cards(cross).subtract(&used_cross).cards()
}

/// k-subsets of `items` in lexicographic index order.
pub(crate) fn combinations<T: Copy>(items: &[T], k: usize) -> Vec<Vec<T>> {
    fn rec<T: Copy>(items: &[T], k: usize, start: usize, cur: &mut Vec<T>, out: &mut Vec<Vec<T>>) {
        if cur.len() == k {
            out.push(cur.clone());
            return;
        }
        let need = k - cur.len();
        let last = items.len().saturating_sub(need);
        for i in start..=last {
            cur.push(items[i]);
            rec(items, k, i + 1, cur, out);
            cur.pop();
        }
    }

    let mut out = Vec::new();
    if k > items.len() {
        return out;
    }
    let mut cur = Vec::with_capacity(k);
    rec(items, k, 0, &mut cur, &mut out);
    out
}
