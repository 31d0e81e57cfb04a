use makiaveli::{display_order, format_group, parse_card, Card, CardMultiset, Suit};

fn c(code: &str) -> Card {
    parse_card(code).expect("test card parses")
}

fn cards(codes: &[&str]) -> Vec<Card> {
    codes.iter().map(|s| c(s)).collect()
}

#[test]
fn counts_and_totals() {
    let mut pool = CardMultiset::new();
    pool.add(c("7S"));
    pool.add(c("7S"));
    assert_eq!(pool.get(c("7S")), 2);
    assert_eq!(pool.total(), 2);

    pool.remove(c("7S"));
    assert_eq!(pool.get(c("7S")), 1);
    assert_eq!(pool.total(), 1);
    assert!(!pool.is_empty());
}

#[test]
fn from_cards_counts() {
    let pool = CardMultiset::from_cards(&cards(&["7S", "7H", "7D"]));
    assert_eq!(pool.total(), 3);
    assert_eq!(pool.get(c("7S")), 1);
    assert_eq!(pool.get(c("7C")), 0);
}

#[test]
fn cards_come_out_in_total_order() {
    // total order is suit-major: spades, hearts, diamonds, clubs
    let pool = CardMultiset::from_cards(&cards(&["3C", "AH", "KS", "AS"]));
    assert_eq!(pool.cards(), cards(&["AS", "KS", "AH", "3C"]));
}

#[test]
fn card_total_order_is_suit_major() {
    assert!(c("AS") < c("KS"));
    assert!(c("KS") < c("AH"));
    assert!(c("KC") > c("AD"));
}

#[test]
fn signature_ignores_insertion_order() {
    let a = CardMultiset::from_cards(&cards(&["7S", "2H", "7S", "KC"]));
    let b = CardMultiset::from_cards(&cards(&["KC", "7S", "2H", "7S"]));
    assert_eq!(a.signature(), b.signature());
    assert_eq!(a.packed_key(), b.packed_key());
    assert_eq!(a, b);
}

#[test]
fn packed_key_distinguishes_counts() {
    let one = CardMultiset::from_cards(&cards(&["7S"]));
    let two = CardMultiset::from_cards(&cards(&["7S", "7S"]));
    assert_ne!(one.packed_key(), two.packed_key());
    assert_ne!(one.packed_key(), CardMultiset::new().packed_key());
}

#[test]
fn multiset_algebra() {
    let a = CardMultiset::from_cards(&cards(&["5S", "5S", "6S", "7H"]));
    let b = CardMultiset::from_cards(&cards(&["5S", "7H", "7H", "9C"]));

    let both = a.intersect(&b);
    assert_eq!(both.cards(), cards(&["5S", "7H"]));

    let only_a = a.subtract(&b);
    assert_eq!(only_a.cards(), cards(&["5S", "6S"]));

    let merged = a.union_add(&b);
    assert_eq!(merged.total(), 8);
    assert_eq!(merged.get(c("5S")), 3);
}

#[test]
fn display_order_normal_groups() {
    // rank-major, suit as tie-break
    let set = cards(&["5C", "5S", "5D"]);
    assert_eq!(display_order(&set), cards(&["5S", "5D", "5C"]));
    assert_eq!(format_group(&set), "[5♠, 5♦, 5♣]");

    let run = cards(&["7H", "5H", "6H"]);
    assert_eq!(format_group(&run), "[5♥, 6♥, 7♥]");
}

#[test]
fn display_order_ace_high_run() {
    let run = cards(&["AS", "KS", "QS"]);
    assert_eq!(display_order(&run), cards(&["QS", "KS", "AS"]));
    assert_eq!(format_group(&run), "[Q♠, K♠, A♠]");

    // ace-low keeps the ace in front
    let low = cards(&["3S", "AS", "2S"]);
    assert_eq!(format_group(&low), "[A♠, 2♠, 3♠]");
}

#[test]
fn format_empty_group() {
    assert_eq!(format_group(&[]), "[]");
}

#[test]
fn suit_roundtrip() {
    for suit in Suit::ALL {
        assert_eq!(Suit::from_letter(suit.letter()), Some(suit));
    }
    assert_eq!(Suit::from_letter('X'), None);
}
