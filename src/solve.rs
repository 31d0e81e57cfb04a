use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::cards::{display_order, format_group, parse_cards, Card};
use crate::error::{ErrorKind, SolveError};
use crate::pool::CardMultiset;
use crate::rules::{classify_group, is_valid_group, GroupKind};
use crate::solver::{HandOutcome, SearchLimits, Solver, DEFAULT_DEADLINE_MS};
use crate::steps::plan_steps;

pub const MAX_CROSS_CARDS: usize = 4;

/// Solve request as received from callers. Card codes use the grammar
/// `A|2..9|10|J|Q|K` + `S|H|D|C`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolveRequest {
    #[serde(default)]
    pub hand: Vec<String>,
    #[serde(default)]
    pub floor_groups: Vec<Vec<String>>,
    #[serde(default)]
    pub cross: Vec<String>,
    /// Wall-clock budget; defaults to 60 000 ms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_ms: Option<u64>,
}

/// Wire form of a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDto {
    pub code: String,
    pub rank: u8,
    pub suit: char,
    pub display: String,
}

impl CardDto {
    #[inline]
    fn from_card(card: Card) -> Self {
        Self {
            code: card.code(),
            rank: card.rank,
            suit: card.suit.letter(),
            display: card.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDto {
    pub step_number: usize,
    pub description: String,
}

/// Solve response. `target_groups`, `steps` and `remaining_cross` are
/// present iff the hand is solvable; `error` is present iff the request
/// failed (an exhausted search is not an error).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResponse {
    pub solvable: bool,
    pub elapsed_seconds: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_groups: Option<Vec<Vec<CardDto>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<StepDto>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_cross: Option<Vec<CardDto>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
}

impl SolveResponse {
    fn unsolvable(elapsed_seconds: f64) -> Self {
        Self {
            solvable: false,
            elapsed_seconds,
            target_groups: None,
            steps: None,
            remaining_cross: None,
            error: None,
        }
    }
}

/// Report for a single-group validity check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupReport {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_type: Option<GroupKind>,
    pub display: Vec<CardDto>,
}

/// Check one group of card codes against the legality oracle.
pub fn validate_group(codes: &[String]) -> Result<GroupReport, SolveError> {
    let cards = parse_cards(codes)?;
    let kind = classify_group(&cards);
    Ok(GroupReport {
        valid: kind.is_some(),
        group_type: kind,
        display: cards.iter().copied().map(CardDto::from_card).collect(),
    })
}

#[inline]
fn elapsed_secs(started: Instant) -> f64 {
    // Rounded to milliseconds so the field stays readable; everything
    // else in the response is byte-stable for identical inputs.
    (started.elapsed().as_secs_f64() * 1000.0).round() / 1000.0
}

/// The single entry point: parse and validate the request, run the
/// solver, reconstruct the steps. Input errors are reported without
/// entering the search; an exhausted search reports `solvable: false`.
pub fn solve(req: &SolveRequest) -> SolveResponse {
    let started = Instant::now();
    match solve_inner(req, started) {
        Ok(resp) => resp,
        Err(e) => SolveResponse {
            error: Some(e.kind()),
            ..SolveResponse::unsolvable(elapsed_secs(started))
        },
    }
}

fn solve_inner(req: &SolveRequest, started: Instant) -> Result<SolveResponse, SolveError> {
    let hand = parse_cards(&req.hand)?;
    let cross = parse_cards(&req.cross)?;
    let parsed_floor: Vec<Vec<Card>> = req
        .floor_groups
        .iter()
        .map(|g| parse_cards(g))
        .collect::<Result<_, _>>()?;

    if cross.len() > MAX_CROSS_CARDS {
        return Err(SolveError::InvalidInput(format!(
            "{} cross cards given, at most {MAX_CROSS_CARDS} allowed",
            cross.len()
        )));
    }

    // Degenerate floor groups (< 3 cards) are tolerated only when every
    // card is a cross anchor; the cross list already supplies those
    // cards, so the group itself is dropped. Full-size groups failing
    // the oracle are not an error: they are dissolved into the search
    // pool, so the target partition never carries an illegal group.
    let mut cross_cover = CardMultiset::from_cards(&cross);
    let mut floor_groups: Vec<Vec<Card>> = Vec::with_capacity(parsed_floor.len());
    let mut steps_floor: Vec<Vec<Card>> = Vec::with_capacity(parsed_floor.len());
    let mut dissolved: Vec<Card> = Vec::new();
    for g in parsed_floor {
        if g.len() < 3 {
            for c in &g {
                if cross_cover.get(*c) == 0 {
                    return Err(SolveError::InvalidInput(format!(
                        "floor group {} has fewer than three cards",
                        format_group(&g)
                    )));
                }
                cross_cover.remove(*c);
            }
        } else {
            steps_floor.push(g.clone());
            if is_valid_group(&g) {
                floor_groups.push(g);
            } else {
                dissolved.extend(g);
            }
        }
    }

    // Two-deck multiplicity across every zone.
    let mut all = CardMultiset::from_cards(&hand);
    for g in &steps_floor {
        all.add_group(g);
    }
    all.add_group(&cross);
    if let Some((card, n)) = all.iter().find(|&(_, n)| n > 2) {
        return Err(SolveError::InvalidInput(format!(
            "{n} copies of {card} across hand, floor and cross"
        )));
    }

    let deadline = started + Duration::from_millis(req.deadline_ms.unwrap_or(DEFAULT_DEADLINE_MS));
    let mut solver = Solver::new(SearchLimits::with_deadline(deadline));

    // Cards of dissolved groups must be re-placed just like hand cards.
    let mut must_place = hand.clone();
    must_place.extend(dissolved);

    match solver.solve_hand(&must_place, &floor_groups, &cross) {
        HandOutcome::NoSolution => Ok(SolveResponse::unsolvable(elapsed_secs(started))),
        HandOutcome::DeadlineExceeded => Err(SolveError::Timeout),
        HandOutcome::Solved {
            target_groups,
            remaining_cross,
        } => {
            // Incorporated cross cards enter the initial state as
            // singleton source groups so the plan can name them. The
            // initial state keeps dissolved groups too: they sit on the
            // table and the plan must say where their cards went.
            let mut initial = steps_floor;
            let included = CardMultiset::from_cards(&cross)
                .subtract(&CardMultiset::from_cards(&remaining_cross));
            for c in included.cards() {
                initial.push(vec![c]);
            }

            let steps = plan_steps(&initial, &target_groups, &hand)?;

            Ok(SolveResponse {
                solvable: true,
                elapsed_seconds: elapsed_secs(started),
                target_groups: Some(
                    target_groups
                        .iter()
                        .map(|g| {
                            display_order(g)
                                .into_iter()
                                .map(CardDto::from_card)
                                .collect()
                        })
                        .collect(),
                ),
                steps: Some(
                    steps
                        .iter()
                        .map(|s| StepDto {
                            step_number: s.number,
                            description: s.description.clone(),
                        })
                        .collect(),
                ),
                remaining_cross: Some(
                    remaining_cross
                        .iter()
                        .copied()
                        .map(CardDto::from_card)
                        .collect(),
                ),
                error: None,
            })
        }
    }
}
