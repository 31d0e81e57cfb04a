use std::cmp::Ordering;
use std::fmt;

use crate::error::SolveError;
use crate::types::{rank_name, Suit, ACE, ACE_HIGH, JACK, KING, QUEEN, RANK_MAX, RANK_MIN};

/// A playing card: rank 1..=13 (1 = Ace) plus suit. Cards are value
/// objects; with two decks in play the same `(rank, suit)` may exist
/// twice, and the two copies are interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: u8,
    pub suit: Suit,
}

impl Card {
    #[inline]
    pub fn new(rank: u8, suit: Suit) -> Self {
        debug_assert!((RANK_MIN..=RANK_MAX).contains(&rank));
        Self { rank, suit }
    }

    /// Dense index in [0, 52): suit-major, so index order equals the
    /// card total order.
    #[inline]
    pub fn index(self) -> usize {
        self.suit.index() * 13 + (self.rank as usize - 1)
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        debug_assert!(idx < 52);
        let suit = Suit::ALL[idx / 13];
        Self {
            rank: (idx % 13) as u8 + 1,
            suit,
        }
    }

    /// Canonical textual code, e.g. `AS`, `10H`, `KD`.
    #[inline]
    pub fn code(self) -> String {
        format!("{}{}", rank_name(self.rank), self.suit.letter())
    }
}

/// Total order by (suit, rank), used to canonicalize group representations
/// and to pick the next card during search.
impl Ord for Card {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.suit
            .cmp(&other.suit)
            .then_with(|| self.rank.cmp(&other.rank))
    }
}

impl PartialOrd for Card {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", rank_name(self.rank), self.suit.symbol())
    }
}

/// Parse a card code like `7S`, `AH`, `10D`, `KC`. Input is trimmed and
/// upper-cased first, so `jh` parses as the Jack of hearts.
pub fn parse_card(text: &str) -> Result<Card, SolveError> {
    let code = text.trim().to_ascii_uppercase();
    if code.len() < 2 {
        return Err(SolveError::MalformedCode(text.to_string()));
    }

    let suit_ch = code.chars().last().expect("len checked above");
    let Some(suit) = Suit::from_letter(suit_ch) else {
        return Err(SolveError::MalformedCode(text.to_string()));
    };

    let rank_str = &code[..code.len() - 1];
    let rank = match rank_str {
        "A" => ACE,
        "J" => JACK,
        "Q" => QUEEN,
        "K" => KING,
        digits => digits
            .parse::<u8>()
            .ok()
            .filter(|r| (RANK_MIN..=RANK_MAX).contains(r))
            .ok_or_else(|| SolveError::MalformedCode(text.to_string()))?,
    };

    Ok(Card::new(rank, suit))
}

/// Parse a whole list of codes, failing on the first malformed one.
pub fn parse_cards(codes: &[String]) -> Result<Vec<Card>, SolveError> {
    codes.iter().map(|c| parse_card(c)).collect()
}

/// Sort a group the way a player reads it: ascending rank with the Ace
/// counted high when the group is an Ace-high run (same suit, has both
/// A and K, no 2). Ties fall back to suit order.
pub fn display_order(group: &[Card]) -> Vec<Card> {
    let mut cards = group.to_vec();

    let one_suit = cards.windows(2).all(|w| w[0].suit == w[1].suit);
    let has = |r: u8| cards.iter().any(|c| c.rank == r);

    if one_suit && has(ACE) && has(KING) && !has(2) {
        cards.sort_by_key(|c| if c.rank == ACE { ACE_HIGH } else { c.rank });
    } else {
        cards.sort_by_key(|c| (c.rank, c.suit));
    }
    cards
}

/// Format a group for display, e.g. `[5♥, 6♥, 7♥]`.
pub fn format_group(group: &[Card]) -> String {
    if group.is_empty() {
        return "[]".to_string();
    }
    let parts: Vec<String> = display_order(group).iter().map(Card::to_string).collect();
    format!("[{}]", parts.join(", "))
}
