//! Board composition and placement.

use alloc::vec::Vec;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
use rand::Rng;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::card::{Card, ColorGroup, DECK_SIZE, Suit, Value, full_deck};
use crate::error::BoardError;
use crate::options::{MIN_BOARD_SIZE, PairingMode};
use crate::select::{random_int, sample, shuffle};

/// Checks that `size` cards can be composed under `mode`.
///
/// # Errors
///
/// Returns an error if the size is odd, below the minimum, or larger than
/// the mode can fill.
pub const fn check_size(mode: PairingMode, size: usize) -> Result<(), BoardError> {
    if size % 2 != 0 {
        return Err(BoardError::OddSize);
    }
    if size < MIN_BOARD_SIZE || size > mode.max_board_size() {
        return Err(BoardError::SizeOutOfRange);
    }
    Ok(())
}

/// Composes the cards for a board of `size` cards.
///
/// The returned order follows composition, not placement; see
/// [`Board::place`].
///
/// # Errors
///
/// Returns an error if the size is not valid for the mode.
pub fn compose<R: Rng + ?Sized>(
    mode: PairingMode,
    size: usize,
    rng: &mut R,
) -> Result<Vec<Card>, BoardError> {
    check_size(mode, size)?;

    let cards = match mode {
        PairingMode::SameValue => compose_same_value(size, rng),
        PairingMode::SameSuitAndValue if size == DECK_SIZE => full_deck(),
        PairingMode::SameSuitAndValue => compose_same_suit_and_value(size, rng),
    };

    Ok(cards)
}

fn compose_same_value<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Vec<Card> {
    let mut cards = Vec::with_capacity(size);

    for value in sample(&Value::ALL, size / 2, rng) {
        for suit in sample(&Suit::ALL, 2, rng) {
            cards.push(Card::new(value, suit));
        }
    }

    cards
}

/// Composes a partial board where pairs must share value and colour.
///
/// A random noise term trades distinct values for values that appear in
/// all four suits. A four-suit value always splits into one black and one
/// red pair; every other value gets both suits of a single colour group.
fn compose_same_suit_and_value<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Vec<Card> {
    let half = size / 2;

    let noise = if size == MIN_BOARD_SIZE {
        0
    } else {
        random_int(rng, 0, 7) as usize
    };
    let noise = noise + noise % 2;

    // Each four-suit value fills two pairs, so at least half/2 values are needed.
    let min_values = half.div_ceil(2);
    let max_values = half.min(Value::ALL.len());
    let value_count = (size.saturating_sub(noise) / 2).clamp(min_values, max_values);

    let values = sample(&Value::ALL, value_count, rng);
    let repeating = sample(&values, half - value_count, rng);

    let mut cards = Vec::with_capacity(size);
    for value in values {
        let suits = if repeating.contains(&value) {
            shuffle(&Suit::ALL, rng)
        } else {
            let group = ColorGroup::ALL[random_int(rng, 0, 1) as usize];
            shuffle(&group.suits(), rng)
        };
        cards.extend(suits.into_iter().map(|suit| Card::new(value, suit)));
    }

    cards
}

/// Returns how many rows a board of `size` cards is laid out in.
///
/// Four rows when the size is a multiple of four, otherwise roughly one row
/// per thirteen cards, reduced until every row has the same width.
#[must_use]
pub const fn row_count(size: usize) -> usize {
    if size == 0 {
        return 1;
    }
    if size % 4 == 0 {
        return 4;
    }
    let mut rows = size.div_ceil(DECK_SIZE / 4);
    while size % rows != 0 {
        rows -= 1;
    }
    rows
}

/// The cards in play, in placement order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cards: Vec<Card>,
    rows: usize,
    positions: HashMap<Card, usize>,
}

impl Board {
    /// Composes and places a new board.
    ///
    /// # Errors
    ///
    /// Returns an error if the size is not valid for the mode.
    pub fn generate<R: Rng + ?Sized>(
        mode: PairingMode,
        size: usize,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        let cards = compose(mode, size, rng)?;
        Ok(Self::place(&cards, rng))
    }

    /// Shuffles composed cards into their final placement.
    pub fn place<R: Rng + ?Sized>(cards: &[Card], rng: &mut R) -> Self {
        Self::from_cards(shuffle(cards, rng))
    }

    /// Creates a board with the cards in the given order.
    ///
    /// Keys are expected to be unique; a repeated card is only addressable
    /// at its first position.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        let mut positions = HashMap::with_capacity(cards.len());
        for (index, card) in cards.iter().enumerate() {
            positions.entry(*card).or_insert(index);
        }

        Self {
            rows: row_count(cards.len()),
            cards,
            positions,
        }
    }

    /// Returns the cards in placement order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the card at a position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Card> {
        self.cards.get(index).copied()
    }

    /// Returns the position of a card.
    #[must_use]
    pub fn position(&self, card: &Card) -> Option<usize> {
        self.positions.get(card).copied()
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the board has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.rows
    }

    /// Returns the number of cards in each row.
    #[must_use]
    pub fn cards_per_row(&self) -> usize {
        self.cards.len() / self.rows
    }

    /// Iterates over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Card]> {
        self.cards.chunks(self.cards_per_row().max(1))
    }
}
