//! Deck, sampling and board composition tests.

use std::collections::{HashMap, HashSet};

use pairs::board::{compose, row_count};
use pairs::card::full_deck;
use pairs::select::{random_int, sample, shuffle};
use pairs::{Board, BoardError, Card, CardKeyError, ColorGroup, PairingMode, Suit, Value};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

fn assert_same_value_board(cards: &[Card], size: usize) {
    assert_eq!(cards.len(), size);

    let mut by_value: HashMap<Value, Vec<Suit>> = HashMap::new();
    for card in cards {
        by_value.entry(card.value).or_default().push(card.suit);
    }

    assert_eq!(by_value.len(), size / 2);
    for suits in by_value.values() {
        assert_eq!(suits.len(), 2);
        assert_ne!(suits[0], suits[1]);
    }
}

fn assert_harder_board(cards: &[Card], size: usize) {
    assert_eq!(cards.len(), size);

    let unique: HashSet<Card> = cards.iter().copied().collect();
    assert_eq!(unique.len(), size, "cards must be unique");

    let mut groups: HashMap<(Value, ColorGroup), usize> = HashMap::new();
    for card in cards {
        *groups.entry((card.value, card.suit.color_group())).or_default() += 1;
    }
    assert!(groups.values().all(|&count| count == 2), "{groups:?}");
}

#[test]
fn card_keys_round_trip_through_from_key() {
    let card = Card::new(Value::Ten, Suit::Diamonds);
    assert_eq!(card.key(), "10-diamonds");
    assert_eq!(card.to_string(), "10-diamonds");
    assert_eq!(Card::from_key("10-diamonds"), Ok(card));
    assert_eq!(card.asset_name(), "10_of_diamonds");
    assert_eq!(card.alt_text(), "Playing card: 10 of diamonds");
}

#[test]
fn card_key_errors() {
    assert_eq!(Card::from_key("ace"), Err(CardKeyError::MissingSeparator));
    assert_eq!(Card::from_key("one-clubs"), Err(CardKeyError::UnknownValue));
    assert_eq!(Card::from_key("ace-stars"), Err(CardKeyError::UnknownSuit));
}

#[test]
fn full_deck_has_every_card_once() {
    let deck = full_deck();
    assert_eq!(deck.len(), pairs::DECK_SIZE);
    let unique: HashSet<Card> = deck.into_iter().collect();
    assert_eq!(unique.len(), pairs::DECK_SIZE);
}

#[test]
fn pairing_relations() {
    let ace_clubs = Card::new(Value::Ace, Suit::Clubs);
    let ace_spades = Card::new(Value::Ace, Suit::Spades);
    let ace_hearts = Card::new(Value::Ace, Suit::Hearts);
    let two_clubs = Card::new(Value::Two, Suit::Clubs);

    assert!(PairingMode::SameValue.is_pair(&ace_clubs, &ace_hearts));
    assert!(!PairingMode::SameValue.is_pair(&ace_clubs, &two_clubs));

    assert!(PairingMode::SameSuitAndValue.is_pair(&ace_clubs, &ace_spades));
    assert!(!PairingMode::SameSuitAndValue.is_pair(&ace_clubs, &ace_hearts));
    assert!(!PairingMode::SameSuitAndValue.is_pair(&ace_clubs, &two_clubs));
}

#[test]
fn sample_returns_distinct_elements_from_source() {
    let source: Vec<u32> = (0..10).collect();
    let mut rng = rng(3);

    for k in 0..=12 {
        let picked = sample(&source, k, &mut rng);
        assert_eq!(picked.len(), k.min(source.len()));
        let unique: HashSet<u32> = picked.iter().copied().collect();
        assert_eq!(unique.len(), picked.len());
        assert!(picked.iter().all(|item| source.contains(item)));
    }

    assert_eq!(source, (0..10).collect::<Vec<_>>());
}

#[test]
fn sample_handles_empty_and_single_sources() {
    let mut rng = rng(5);
    let empty: [u8; 0] = [];

    assert!(sample(&empty, 3, &mut rng).is_empty());
    assert!(sample(&[1, 2, 3], 0, &mut rng).is_empty());
    assert_eq!(sample(&[9], 4, &mut rng), vec![9]);
    assert!(shuffle(&empty, &mut rng).is_empty());
}

#[test]
fn shuffle_is_a_permutation() {
    let mut rng = rng(11);
    let mut shuffled = shuffle(&Value::ALL, &mut rng);
    shuffled.sort();
    assert_eq!(shuffled, Value::ALL.to_vec());
}

#[test]
fn sample_draws_are_uniform() {
    let mut rng = rng(2024);
    let trials = 40_000;
    let mut first_pick = [0_u32; 4];
    let mut lands_first = 0_u32;

    for _ in 0..trials {
        let picked = sample(&[0_usize, 1, 2, 3], 1, &mut rng);
        first_pick[picked[0]] += 1;

        if shuffle(&[0_usize, 1, 2, 3], &mut rng)[0] == 0 {
            lands_first += 1;
        }
    }

    for count in first_pick {
        assert!((9_400..=10_600).contains(&count), "{first_pick:?}");
    }
    assert!((9_400..=10_600).contains(&lands_first), "{lands_first}");
}

#[test]
fn random_int_is_inclusive() {
    let mut rng = rng(8);
    let draws: Vec<u32> = (0..2_000).map(|_| random_int(&mut rng, 3, 6)).collect();

    assert!(draws.iter().all(|draw| (3..=6).contains(draw)));
    assert!(draws.contains(&3));
    assert!(draws.contains(&6));
    assert_eq!(random_int(&mut rng, 4, 4), 4);
    assert_eq!(random_int(&mut rng, 0, 0), 0);
}

#[test]
fn same_value_boards_for_every_size() {
    for size in (6..=26).step_by(2) {
        for seed in 0..25 {
            let cards = compose(PairingMode::SameValue, size, &mut rng(seed)).unwrap();
            assert_same_value_board(&cards, size);
        }
    }
}

#[test]
fn harder_boards_for_every_size() {
    for size in (6..=52).step_by(2) {
        for seed in 0..25 {
            let cards = compose(PairingMode::SameSuitAndValue, size, &mut rng(seed)).unwrap();
            assert_harder_board(&cards, size);
        }
    }
}

#[test]
fn harder_full_board_is_the_whole_deck() {
    let cards = compose(PairingMode::SameSuitAndValue, 52, &mut rng(1)).unwrap();
    assert_eq!(cards, full_deck());
}

#[test]
fn harder_six_card_board_has_three_values() {
    for seed in 0..50 {
        let cards = compose(PairingMode::SameSuitAndValue, 6, &mut rng(seed)).unwrap();
        let values: HashSet<Value> = cards.iter().map(|card| card.value).collect();
        assert_eq!(values.len(), 3);
    }
}

#[test]
fn compose_rejects_invalid_sizes() {
    let mut rng = rng(0);
    assert_eq!(
        compose(PairingMode::SameValue, 7, &mut rng),
        Err(BoardError::OddSize)
    );
    assert_eq!(
        compose(PairingMode::SameValue, 4, &mut rng),
        Err(BoardError::SizeOutOfRange)
    );
    assert_eq!(
        compose(PairingMode::SameValue, 28, &mut rng),
        Err(BoardError::SizeOutOfRange)
    );
    assert_eq!(
        compose(PairingMode::SameSuitAndValue, 54, &mut rng),
        Err(BoardError::SizeOutOfRange)
    );
}

#[test]
fn row_layout() {
    assert_eq!(row_count(6), 1);
    assert_eq!(row_count(10), 1);
    assert_eq!(row_count(14), 2);
    assert_eq!(row_count(20), 4);
    assert_eq!(row_count(26), 2);
    assert_eq!(row_count(30), 3);
    assert_eq!(row_count(34), 2);
    assert_eq!(row_count(42), 3);
    assert_eq!(row_count(52), 4);

    let board = Board::generate(PairingMode::SameSuitAndValue, 52, &mut rng(4)).unwrap();
    assert_eq!(board.row_count(), 4);
    assert_eq!(board.cards_per_row(), 13);
    assert!(board.rows().all(|row| row.len() == 13));
    assert_eq!(board.rows().count(), 4);
}

#[test]
fn placement_keeps_the_composed_cards() {
    let cards = compose(PairingMode::SameValue, 20, &mut rng(6)).unwrap();
    let board = Board::place(&cards, &mut rng(7));

    let mut placed = board.cards().to_vec();
    let mut composed = cards.clone();
    placed.sort();
    composed.sort();
    assert_eq!(placed, composed);

    for (index, card) in board.cards().iter().enumerate() {
        assert_eq!(board.position(card), Some(index));
    }
}

proptest! {
    #[test]
    fn same_value_composition_pairs_values(half in 3_usize..=13, seed in any::<u64>()) {
        let size = half * 2;
        let cards = compose(PairingMode::SameValue, size, &mut rng(seed)).unwrap();
        assert_same_value_board(&cards, size);
    }

    #[test]
    fn harder_composition_partitions_into_pairs(half in 3_usize..=26, seed in any::<u64>()) {
        let size = half * 2;
        let board = Board::generate(PairingMode::SameSuitAndValue, size, &mut rng(seed)).unwrap();
        assert_harder_board(board.cards(), size);
        prop_assert_eq!(board.rows().map(<[Card]>::len).sum::<usize>(), size);
    }
}
