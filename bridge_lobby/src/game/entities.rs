use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fmt::{self},
    str::FromStr,
};

use super::{
    constants::DECK_SIZE,
    errors::{DeckError, DeckResult},
    functional,
};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Spade,
    Heart,
    Diamond,
    Club,
}

impl Suit {
    /// Generation order used when building a fresh deck.
    pub const ALL: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club];

    pub fn color(self) -> Color {
        match self {
            Self::Spade | Self::Club => Color::Black,
            Self::Heart | Self::Diamond => Color::Red,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "♣",
            Self::Spade => "♠",
            Self::Diamond => "♦",
            Self::Heart => "♥",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Color {
    Black,
    Red,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Ordering value, 2 through 14 (ace high).
    pub fn value(self) -> u8 {
        self as u8
    }

    /// High-card points: A=4, K=3, Q=2, J=1.
    pub fn high_card_points(self) -> u32 {
        match self {
            Self::Ace => 4,
            Self::King => 3,
            Self::Queen => 2,
            Self::Jack => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jack => write!(f, "J"),
            Self::Queen => write!(f, "Q"),
            Self::King => write!(f, "K"),
            Self::Ace => write!(f, "A"),
            r => write!(f, "{}", r.value()),
        }
    }
}

/// A single card. Identity is the (rank, suit) pair.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub fn rank_value(&self) -> u8 {
        self.rank.value()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Ordered 52-card deck. Dealing removes cards from the front.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    /// Restore all 52 cards in generation order.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Shuffle with the thread-local RNG.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    /// Fisher-Yates: walk from the last index down to 1, swapping each
    /// position with a uniformly chosen index in `[0, i]`.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for i in (1..self.cards.len()).rev() {
            let j = rng.random_range(0..=i);
            self.cards.swap(i, j);
        }
    }

    /// Remove and return the first `n` cards.
    ///
    /// # Errors
    ///
    /// * `DeckError::InsufficientCards` - Fewer than `n` cards remain; the
    ///   deck is left untouched
    pub fn deal(&mut self, n: usize) -> DeckResult<Vec<Card>> {
        if n > self.cards.len() {
            return Err(DeckError::InsufficientCards {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..n).collect())
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

/// One of the four fixed seats at a table.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeatLabel {
    North,
    South,
    East,
    West,
}

impl SeatLabel {
    /// Order in which hands are drawn from the deck.
    pub const DRAW_ORDER: [SeatLabel; 4] = [
        SeatLabel::South,
        SeatLabel::West,
        SeatLabel::North,
        SeatLabel::East,
    ];

    /// Order in which seats are listed in table summaries.
    pub const DISPLAY_ORDER: [SeatLabel; 4] = [
        SeatLabel::North,
        SeatLabel::West,
        SeatLabel::East,
        SeatLabel::South,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::North => "NORTH",
            Self::South => "SOUTH",
            Self::East => "EAST",
            Self::West => "WEST",
        }
    }
}

impl fmt::Display for SeatLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeatLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NORTH" | "N" => Ok(Self::North),
            "SOUTH" | "S" => Ok(Self::South),
            "EAST" | "E" => Ok(Self::East),
            "WEST" | "W" => Ok(Self::West),
            other => Err(format!("Unknown seat '{other}'")),
        }
    }
}

/// Cards held by one seat after a deal, in canonical display order.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Hand {
    pub seat: SeatLabel,
    pub cards: Vec<Card>,
    pub points: u32,
}

impl Hand {
    /// Build a hand: applies the canonical sort and counts high-card points.
    pub fn new(seat: SeatLabel, cards: &[Card]) -> Self {
        Self {
            seat,
            cards: functional::canonical_sort(cards),
            points: functional::high_card_points(cards),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards grouped by suit; every suit has an entry, possibly empty.
    pub fn suit_distribution(&self) -> BTreeMap<Suit, Vec<Card>> {
        let mut distribution: BTreeMap<Suit, Vec<Card>> =
            Suit::ALL.into_iter().map(|s| (s, Vec::new())).collect();
        for card in &self.cards {
            distribution.entry(card.suit).or_default().push(*card);
        }
        distribution
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cards: Vec<String> = self.cards.iter().map(ToString::to_string).collect();
        write!(f, "{:>5} ({:>2} pts): {}", self.seat, self.points, cards.join(" "))
    }
}
