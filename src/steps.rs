use crate::cards::{format_group, Card};
use crate::error::SolveError;
use crate::pool::CardMultiset;

/// How a target group relates to the initial table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// The target grew out of source group `floor_index` (which may also
    /// have given cards away).
    Extend { floor_index: usize },
    /// No single source group survives inside the target; it is built
    /// from hand cards and released floor cards.
    NewGroup,
}

/// One rearrangement step. The structured fields are the contract (they
/// replay to the target group exactly); `description` is the rendered
/// sentence and carries no additional information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub number: usize,
    pub target_index: usize,
    pub kind: StepKind,
    /// Cards of the matched source group that stay put (Extend only).
    pub kept: Vec<Card>,
    /// Cards played from the hand.
    pub from_hand: Vec<Card>,
    /// Cards taken from broken-up source groups, attributed by source
    /// index.
    pub moved: Vec<(usize, Vec<Card>)>,
    /// Floor cards whose exact source could not be pinned down.
    pub unattributed: Vec<Card>,
    pub description: String,
}

/// Cards of a multiset in reading order (rank first).
fn cards_by_rank(ms: &CardMultiset) -> Vec<Card> {
    let mut cards = ms.cards();
    cards.sort_by_key(|c| (c.rank, c.suit));
    cards
}

fn join_cards(cards: &[Card]) -> String {
    let parts: Vec<String> = cards.iter().map(Card::to_string).collect();
    parts.join(", ")
}

/// Attribute `needed` floor cards to the source groups that released
/// them. Consumes from `released_by_group` only on full attribution;
/// returns `None` when some card cannot be pinned to a source.
fn find_sources(
    needed: &CardMultiset,
    released_by_group: &mut [CardMultiset],
) -> Option<Vec<(usize, Vec<Card>)>> {
    let mut result: Vec<(usize, CardMultiset)> = Vec::new();
    let mut remaining = needed.clone();

    for (fi, freed) in released_by_group.iter().enumerate() {
        if remaining.is_empty() {
            break;
        }
        let overlap = remaining.intersect(freed);
        if !overlap.is_empty() {
            remaining.subtract_assign(&overlap);
            result.push((fi, overlap));
        }
    }

    if !remaining.is_empty() {
        return None;
    }
    let mut out = Vec::with_capacity(result.len());
    for (fi, overlap) in result {
        released_by_group[fi].subtract_assign(&overlap);
        out.push((fi, cards_by_rank(&overlap)));
    }
    Some(out)
}

fn describe_floor_part(moved: &[(usize, Vec<Card>)], unattributed: &[Card]) -> String {
    if moved.is_empty() {
        format!("{} from floor", join_cards(unattributed))
    } else {
        let parts: Vec<String> = moved
            .iter()
            .map(|(fi, cards)| format!("{} from group {fi}", join_cards(cards)))
            .collect();
        parts.join(", ")
    }
}

/// Compare the initial table (floor groups plus incorporated cross
/// cards as singleton groups) against the solver's target partition and
/// produce the ordered rearrangement steps.
///
/// Unchanged target groups produce no step. The step sequence is not
/// guaranteed minimal; its hard contract is that replaying the described
/// card movements reaches the target partition and empties the hand.
pub fn plan_steps(
    floor_groups: &[Vec<Card>],
    target_groups: &[Vec<Card>],
    hand: &[Card],
) -> Result<Vec<Step>, SolveError> {
    let hand_ctr = CardMultiset::from_cards(hand);
    let floor_ctrs: Vec<CardMultiset> = floor_groups
        .iter()
        .map(|g| CardMultiset::from_cards(g))
        .collect();
    let target_ctrs: Vec<CardMultiset> = target_groups
        .iter()
        .map(|g| CardMultiset::from_cards(g))
        .collect();

    // Greedy matching of target to source groups by descending card
    // overlap; ties prefer the lower target index, then the lower
    // source index.
    let mut pairs: Vec<(u16, usize, usize)> = Vec::new();
    for (ti, tc) in target_ctrs.iter().enumerate() {
        for (fi, fc) in floor_ctrs.iter().enumerate() {
            let overlap = tc.intersect(fc).total();
            if overlap > 0 {
                pairs.push((overlap, ti, fi));
            }
        }
    }
    pairs.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));

    let mut match_t2f: Vec<Option<usize>> = vec![None; target_groups.len()];
    let mut used_floor = vec![false; floor_groups.len()];
    for &(_, ti, fi) in &pairs {
        if match_t2f[ti].is_none() && !used_floor[fi] {
            match_t2f[ti] = Some(fi);
            used_floor[fi] = true;
        }
    }

    // Which floor cards stay in their matched target, and which are
    // released into the common pool.
    let mut floor_staying: Vec<CardMultiset> = vec![CardMultiset::new(); floor_groups.len()];
    for (ti, fi) in match_t2f.iter().enumerate() {
        if let Some(fi) = fi {
            floor_staying[*fi] = target_ctrs[ti].intersect(&floor_ctrs[*fi]);
        }
    }
    let mut released_by_group: Vec<CardMultiset> = Vec::with_capacity(floor_groups.len());
    let mut released = CardMultiset::new();
    for (fi, fc) in floor_ctrs.iter().enumerate() {
        let freed = fc.subtract(&floor_staying[fi]);
        released = released.union_add(&freed);
        released_by_group.push(freed);
    }

    let mut steps: Vec<Step> = Vec::new();
    let mut remaining_hand = hand_ctr;
    let mut remaining_released = released;

    for (ti, target) in target_groups.iter().enumerate() {
        let tc = &target_ctrs[ti];

        let (kind, kept, needed) = match match_t2f[ti] {
            Some(fi) => {
                let staying = &floor_staying[fi];
                let needed = tc.subtract(staying);
                if needed.is_empty() {
                    // Group unchanged (or only shrank; the departures
                    // show up in the steps that take its cards).
                    continue;
                }
                (
                    StepKind::Extend { floor_index: fi },
                    cards_by_rank(staying),
                    needed,
                )
            }
            None => (StepKind::NewGroup, Vec::new(), tc.clone()),
        };

        let from_hand = needed.intersect(&remaining_hand);
        remaining_hand.subtract_assign(&from_hand);
        let from_floor = needed.subtract(&from_hand);

        if !from_floor.subtract(&remaining_released).is_empty() {
            return Err(SolveError::ReconstructionFailure(format!(
                "target group {ti} needs cards not released by any source"
            )));
        }
        remaining_released.subtract_assign(&from_floor);

        let sources = find_sources(&from_floor, &mut released_by_group);
        let (moved, unattributed) = match sources {
            Some(moved) => (moved, Vec::new()),
            None => (Vec::new(), cards_by_rank(&from_floor)),
        };

        let description = match kind {
            StepKind::Extend { floor_index } => {
                let mut parts: Vec<String> = Vec::new();
                if !from_hand.is_empty() {
                    parts.push(format!(
                        "play {} from hand",
                        join_cards(&cards_by_rank(&from_hand))
                    ));
                }
                if !from_floor.is_empty() {
                    parts.push(format!("move {}", describe_floor_part(&moved, &unattributed)));
                }
                format!(
                    "{} → {} becomes {}",
                    parts.join(" + "),
                    format_group(&floor_groups[floor_index]),
                    format_group(target)
                )
            }
            StepKind::NewGroup => {
                let mut parts: Vec<String> = Vec::new();
                if !from_hand.is_empty() {
                    parts.push(format!("{} from hand", join_cards(&cards_by_rank(&from_hand))));
                }
                if !from_floor.is_empty() {
                    parts.push(describe_floor_part(&moved, &unattributed));
                }
                format!("new group {} ← {}", format_group(target), parts.join(" + "))
            }
        };

        steps.push(Step {
            number: steps.len() + 1,
            target_index: ti,
            kind,
            kept,
            from_hand: cards_by_rank(&from_hand),
            moved,
            unattributed,
            description,
        });
    }

    if !remaining_hand.is_empty() {
        return Err(SolveError::ReconstructionFailure(
            "hand not emptied by the planned steps".to_string(),
        ));
    }
    if !remaining_released.is_empty() {
        return Err(SolveError::ReconstructionFailure(
            "released floor cards left unplaced".to_string(),
        ));
    }

    Ok(steps)
}
