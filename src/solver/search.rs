use std::time::Instant;

use crate::cards::Card;

use super::groups::candidate_groups;
use super::memo::{MemoEntry, MemoTable};
use super::Pool;

/// Counters maintained across one solve invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStats {
    pub nodes: u64,
    pub memo_hits: u64,
    pub sub_solves: u64,
}

#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// A partition of the required cards (plus any consumed optional
    /// cards) into valid groups, in discovery order.
    Solved(Vec<Vec<Card>>),
    /// Every branch exhausted; no partition exists.
    Exhausted,
    /// The wall-clock deadline fired mid-search. Nothing is cached for
    /// the aborted subtree.
    DeadlineExceeded,
}

pub struct SearchContext<'a> {
    pub memo: &'a mut dyn MemoTable,
    pub deadline: Option<Instant>,
    pub stats: &'a mut SearchStats,
}

impl SearchContext<'_> {
    #[inline]
    fn past_deadline(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() > d)
    }
}

/// Recursive partition search.
///
/// Branches on the smallest required card, trying every candidate group
/// that contains it in the deterministic candidate order. The pool
/// shrinks by at least three cards per level, so depth is bounded by
/// |pool| / 3. Outcomes are memoized on the canonical pool key, with a
/// witness partition for positive entries.
pub fn search_partition(pool: &mut Pool, ctx: &mut SearchContext<'_>) -> SearchOutcome {
    if ctx.past_deadline() {
        return SearchOutcome::DeadlineExceeded;
    }
    ctx.stats.nodes += 1;

    let Some(anchor) = pool.smallest_required() else {
        return SearchOutcome::Solved(Vec::new());
    };
    if pool.total() < 3 {
        return SearchOutcome::Exhausted;
    }

    let key = pool.key();
    if let Some(entry) = ctx.memo.get(key) {
        ctx.stats.memo_hits += 1;
        return match entry {
            MemoEntry::Solved(witness) => SearchOutcome::Solved(witness.clone()),
            MemoEntry::Exhausted => SearchOutcome::Exhausted,
        };
    }

    for cand in candidate_groups(anchor, pool) {
        let undo = pool.take_group(&cand.cards);
        let sub = search_partition(pool, ctx);
        pool.restore(undo);

        match sub {
            SearchOutcome::Solved(rest) => {
                let mut partition = Vec::with_capacity(rest.len() + 1);
                partition.push(cand.cards);
                partition.extend(rest);
                ctx.memo.put(key, MemoEntry::Solved(partition.clone()));
                return SearchOutcome::Solved(partition);
            }
            SearchOutcome::Exhausted => {}
            SearchOutcome::DeadlineExceeded => return SearchOutcome::DeadlineExceeded,
        }
    }

    ctx.memo.put(key, MemoEntry::Exhausted);
    SearchOutcome::Exhausted
}
