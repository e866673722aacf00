//! Card types and deck utilities.

use alloc::format;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use crate::error::CardKeyError;

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    /// Clubs.
    Clubs,
    /// Diamonds.
    Diamonds,
    /// Spades.
    Spades,
    /// Hearts.
    Hearts,
}

/// Suit colour group used by the stricter pairing relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorGroup {
    /// Clubs and spades.
    Black,
    /// Hearts and diamonds.
    Red,
}

impl ColorGroup {
    /// Both colour groups.
    pub const ALL: [Self; 2] = [Self::Black, Self::Red];

    /// Returns the two suits belonging to this group.
    #[must_use]
    pub const fn suits(self) -> [Suit; 2] {
        match self {
            Self::Black => [Suit::Clubs, Suit::Spades],
            Self::Red => [Suit::Hearts, Suit::Diamonds],
        }
    }
}

impl Suit {
    /// All suits in deck order.
    pub const ALL: [Self; 4] = [Self::Clubs, Self::Diamonds, Self::Spades, Self::Hearts];

    /// Returns the colour group of the suit.
    #[must_use]
    pub const fn color_group(self) -> ColorGroup {
        match self {
            Self::Clubs | Self::Spades => ColorGroup::Black,
            Self::Diamonds | Self::Hearts => ColorGroup::Red,
        }
    }

    /// Returns the lowercase name used in card keys.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clubs => "clubs",
            Self::Diamonds => "diamonds",
            Self::Spades => "spades",
            Self::Hearts => "hearts",
        }
    }
}

impl FromStr for Suit {
    type Err = CardKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|suit| suit.name() == s)
            .ok_or(CardKeyError::UnknownSuit)
    }
}

/// Card value, ace low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Value {
    /// Ace.
    Ace,
    /// Two.
    Two,
    /// Three.
    Three,
    /// Four.
    Four,
    /// Five.
    Five,
    /// Six.
    Six,
    /// Seven.
    Seven,
    /// Eight.
    Eight,
    /// Nine.
    Nine,
    /// Ten.
    Ten,
    /// Jack.
    Jack,
    /// Queen.
    Queen,
    /// King.
    King,
}

impl Value {
    /// All values in deck order.
    pub const ALL: [Self; 13] = [
        Self::Ace,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
    ];

    /// Returns the lowercase name used in card keys.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ace => "ace",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "jack",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }
}

impl FromStr for Value {
    type Err = CardKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|value| value.name() == s)
            .ok_or(CardKeyError::UnknownValue)
    }
}

/// A playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card {
    /// The value of the card.
    pub value: Value,
    /// The suit of the card.
    pub suit: Suit,
}

impl Card {
    /// Creates a new card.
    #[must_use]
    pub const fn new(value: Value, suit: Suit) -> Self {
        Self { value, suit }
    }

    /// Returns the `value-suit` key that identifies the card on a board.
    ///
    /// ```
    /// use pairs::{Card, Suit, Value};
    ///
    /// assert_eq!(Card::new(Value::Queen, Suit::Hearts).key(), "queen-hearts");
    /// ```
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}-{}", self.value.name(), self.suit.name())
    }

    /// Parses a card from its `value-suit` key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key has no separator or names an unknown
    /// value or suit.
    pub fn from_key(key: &str) -> Result<Self, CardKeyError> {
        let (value, suit) = key.split_once('-').ok_or(CardKeyError::MissingSeparator)?;
        Ok(Self::new(value.parse()?, suit.parse()?))
    }

    /// Returns the face image name, e.g. `ace_of_clubs`.
    #[must_use]
    pub fn asset_name(&self) -> String {
        format!("{}_of_{}", self.value.name(), self.suit.name())
    }

    /// Returns a short description for assistive text.
    #[must_use]
    pub fn alt_text(&self) -> String {
        format!("Playing card: {} of {}", self.value.name(), self.suit.name())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.value.name(), self.suit.name())
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;

/// Returns every card of a deck, value-major.
#[must_use]
pub fn full_deck() -> alloc::vec::Vec<Card> {
    Value::ALL
        .into_iter()
        .flat_map(|value| Suit::ALL.into_iter().map(move |suit| Card::new(value, suit)))
        .collect()
}
