use crate::cards::Card;
use crate::rules::GroupKind;
use crate::types::{Suit, ACE, KING, RANK_MAX, RANK_MIN};

use super::{combinations, Pool};

/// A legal group that could be removed from the pool, cards sorted
/// canonically (total order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub kind: GroupKind,
    pub cards: Vec<Card>,
}

impl Candidate {
    fn new(kind: GroupKind, mut cards: Vec<Card>) -> Self {
        cards.sort_unstable();
        Self { kind, cards }
    }
}

/// All valid sets containing `card`: the card plus one representative of
/// every chosen subset (size >= 2) of the other suits present at its
/// rank. Suits within a set are distinct, so multiplicity never adds
/// set candidates.
pub fn sets_containing(card: Card, pool: &Pool) -> Vec<Candidate> {
    let others: Vec<Suit> = Suit::ALL
        .into_iter()
        .filter(|&s| s != card.suit && pool.avail(card.rank, s) > 0)
        .collect();

    let mut out = Vec::new();
    for size in 2..=others.len() {
        for combo in combinations(&others, size) {
            let mut cards = Vec::with_capacity(size + 1);
            cards.push(card);
            cards.extend(combo.into_iter().map(|s| Card::new(card.rank, s)));
            out.push(Candidate::new(GroupKind::Set, cards));
        }
    }
    out
}

/// All valid runs containing `card`: every sub-interval of length >= 3
/// of the maximal contiguous rank window around the card within its
/// suit, plus the Ace-high windows (`..., K, A`) when both the Ace and
/// the King are present. Runs never wrap.
pub fn runs_containing(card: Card, pool: &Pool) -> Vec<Candidate> {
    let suit = card.suit;
    let present = |r: u8| pool.avail(r, suit) > 0;

    let mut out = Vec::new();

    let mut lo = card.rank;
    while lo > RANK_MIN && present(lo - 1) {
        lo -= 1;
    }
    let mut hi = card.rank;
    while hi < RANK_MAX && present(hi + 1) {
        hi += 1;
    }

    for start in lo..=card.rank {
        let min_end = card.rank.max(start + 2);
        for end in min_end..=hi {
            let cards: Vec<Card> = (start..=end).map(|r| Card::new(r, suit)).collect();
            out.push(Candidate::new(GroupKind::Run, cards));
        }
    }

    // Ace-high windows: start..=K followed by the Ace counted as 14.
    if present(ACE) && present(KING) {
        let mut ace_lo = KING;
        while ace_lo > 2 && present(ace_lo - 1) {
            ace_lo -= 1;
        }
        for start in ace_lo..KING {
            if card.rank == ACE || (start..=KING).contains(&card.rank) {
                let mut cards: Vec<Card> = (start..=KING).map(|r| Card::new(r, suit)).collect();
                cards.push(Card::new(ACE, suit));
                out.push(Candidate::new(GroupKind::Run, cards));
            }
        }
    }

    out
}

/// Deterministic candidate order, observable through the returned
/// partition: runs before sets, larger groups before smaller, then the
/// lexicographically smaller group under the card total order.
pub fn order_candidates(cands: &mut [Candidate]) {
    #[inline]
    fn kind_rank(kind: GroupKind) -> u8 {
        match kind {
            GroupKind::Run => 0,
            GroupKind::Set => 1,
        }
    }

    cands.sort_by(|a, b| {
        kind_rank(a.kind)
            .cmp(&kind_rank(b.kind))
            .then_with(|| b.cards.len().cmp(&a.cards.len()))
            .then_with(|| a.cards.cmp(&b.cards))
    });
}

/// Every candidate group containing `card`, in trial order.
pub fn candidate_groups(card: Card, pool: &Pool) -> Vec<Candidate> {
    let mut cands = runs_containing(card, pool);
    cands.extend(sets_containing(card, pool));
    order_candidates(&mut cands);
    cands
}
