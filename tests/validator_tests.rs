use makiaveli::{
    classify_group, is_valid_group, is_valid_run, is_valid_set, parse_card, Card, GroupKind, Suit,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

fn c(code: &str) -> Card {
    parse_card(code).expect("test card parses")
}

fn cards(codes: &[&str]) -> Vec<Card> {
    codes.iter().map(|s| c(s)).collect()
}

#[test]
fn parse_basic_codes() {
    assert_eq!(c("7S"), Card::new(7, Suit::Spades));
    assert_eq!(c("AH"), Card::new(1, Suit::Hearts));
    assert_eq!(c("KD"), Card::new(13, Suit::Diamonds));
    assert_eq!(c("10C"), Card::new(10, Suit::Clubs));
    // lower case is tolerated on input
    assert_eq!(c("jh"), Card::new(11, Suit::Hearts));
}

#[test]
fn parse_rejects_malformed_codes() {
    for bad in ["", "A", "S", "XX", "10X", "0S", "14S", "ASS", "A♠"] {
        assert!(parse_card(bad).is_err(), "'{bad}' should be malformed");
    }
}

#[test]
fn display_strings() {
    assert_eq!(c("AS").to_string(), "A♠");
    assert_eq!(c("KD").to_string(), "K♦");
    assert_eq!(c("10C").to_string(), "10♣");
    assert_eq!(c("7H").to_string(), "7♥");
    assert_eq!(c("10C").code(), "10C");
}

#[test]
fn valid_sets() {
    assert!(is_valid_set(&cards(&["7S", "7H", "7D"])));
    assert!(is_valid_set(&cards(&["7S", "7H", "7D", "7C"])));
    assert_eq!(
        classify_group(&cards(&["7S", "7H", "7D"])),
        Some(GroupKind::Set)
    );
}

#[test]
fn invalid_sets() {
    // too small
    assert!(!is_valid_set(&cards(&["7S", "7H"])));
    // repeated suit
    assert!(!is_valid_set(&cards(&["7S", "7S", "7H"])));
    // mixed ranks
    assert!(!is_valid_set(&cards(&["7S", "8H", "7D"])));
}

#[test]
fn valid_runs() {
    assert!(is_valid_run(&cards(&["5C", "6C", "7C"])));
    assert!(is_valid_run(&cards(&["5C", "6C", "7C", "8C"])));
    assert_eq!(
        classify_group(&cards(&["5C", "6C", "7C"])),
        Some(GroupKind::Run)
    );
}

#[test]
fn ace_low_run() {
    assert!(is_valid_run(&cards(&["AS", "2S", "3S"])));
}

#[test]
fn ace_high_run() {
    assert!(is_valid_run(&cards(&["QS", "KS", "AS"])));
    assert!(is_valid_run(&cards(&["JS", "QS", "KS", "AS"])));
}

#[test]
fn wrap_run_rejected() {
    // K, A, 2 never forms a run
    assert!(!is_valid_run(&cards(&["KS", "AS", "2S"])));
    assert!(!is_valid_group(&cards(&["QS", "KS", "AS", "2S"])));
}

#[test]
fn invalid_runs() {
    // mixed suits
    assert!(!is_valid_run(&cards(&["5C", "6H", "7C"])));
    // duplicate rank
    assert!(!is_valid_run(&cards(&["5C", "5C", "6C"])));
    // too small
    assert!(!is_valid_run(&cards(&["5C", "6C"])));
    // gap
    assert!(!is_valid_run(&cards(&["5C", "6C", "8C"])));
}

#[test]
fn generated_runs_accept_and_perturbations_reject() {
    let mut rng = Pcg64::seed_from_u64(0xA11CE);
    for _ in 0..200 {
        let suit = Suit::ALL[rng.gen_range(0..4)];
        let len = rng.gen_range(3..=8usize);
        let start: u8 = rng.gen_range(1..=(14 - len) as u8);
        let run: Vec<Card> = (start..start + len as u8)
            .map(|r| Card::new(r, suit))
            .collect();

        assert!(is_valid_run(&run), "generated run should be valid: {run:?}");
        assert_eq!(classify_group(&run), Some(GroupKind::Run));

        // punch a hole: contiguity is gone, size stays >= 3
        if len >= 4 {
            let mut holed = run.clone();
            holed.remove(1);
            assert!(!is_valid_group(&holed), "holed run accepted: {holed:?}");
        }

        // bend one card into another suit: neither run nor set
        let mut mixed = run.clone();
        let other = Suit::ALL[(suit.index() + 1) % 4];
        mixed[0] = Card::new(mixed[0].rank, other);
        assert!(!is_valid_group(&mixed), "mixed-suit run accepted: {mixed:?}");
    }
}

#[test]
fn generated_ace_high_runs_never_wrap() {
    let mut rng = Pcg64::seed_from_u64(0xFACADE);
    for _ in 0..100 {
        let suit = Suit::ALL[rng.gen_range(0..4)];
        let len = rng.gen_range(3..=6usize);
        // ranks (15 - len)..=13 then the Ace on top
        let mut run: Vec<Card> = ((15 - len as u8)..=13).map(|r| Card::new(r, suit)).collect();
        run.push(Card::new(1, suit));
        assert!(is_valid_run(&run), "ace-high run should be valid: {run:?}");

        // adding the 2 wraps the corner and must be rejected
        let mut wrapped = run.clone();
        wrapped.push(Card::new(2, suit));
        assert!(!is_valid_group(&wrapped), "wrap accepted: {wrapped:?}");
    }
}

#[test]
fn generated_sets_accept_and_perturbations_reject() {
    let mut rng = Pcg64::seed_from_u64(0x5E7);
    for _ in 0..200 {
        let rank = rng.gen_range(1..=13u8);
        let mut suits = Suit::ALL.to_vec();
        suits.shuffle(&mut rng);
        suits.truncate(rng.gen_range(3..=4));
        let set: Vec<Card> = suits.iter().map(|&s| Card::new(rank, s)).collect();

        assert!(is_valid_set(&set), "generated set should be valid: {set:?}");
        assert_eq!(classify_group(&set), Some(GroupKind::Set));

        // duplicate one suit
        let mut dup = set.clone();
        dup[0] = dup[1];
        assert!(!is_valid_group(&dup), "duplicated suit accepted: {dup:?}");

        // bend one rank
        let mut bent = set.clone();
        let next_rank = if rank == 13 { 12 } else { rank + 1 };
        bent[0] = Card::new(next_rank, bent[0].suit);
        assert!(!is_valid_group(&bent), "mixed-rank set accepted: {bent:?}");
    }
}
