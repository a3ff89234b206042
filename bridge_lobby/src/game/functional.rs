//! Pure functions over card sequences: canonical display ordering and
//! high-card point counting.

use super::entities::{Card, Color, Suit};

/// Suit precedence inside each color group.
const SUIT_PRECEDENCE: [Suit; 4] = [Suit::Spade, Suit::Club, Suit::Heart, Suit::Diamond];

/// Order in which suit blocks of `cards` are laid out.
///
/// Only suits present in `cards` appear. Black suits keep ♠ before ♣ and red
/// suits keep ♥ before ♦. When both colors are present the color with more
/// suits leads (black on a tie) and the colors alternate from there, so two
/// same-colored blocks only touch once the other color has run out.
pub fn suit_block_order(cards: &[Card]) -> Vec<Suit> {
    let present: Vec<Suit> = SUIT_PRECEDENCE
        .into_iter()
        .filter(|suit| cards.iter().any(|c| c.suit == *suit))
        .collect();

    let (black, red): (Vec<Suit>, Vec<Suit>) = present
        .iter()
        .copied()
        .partition(|suit| suit.color() == Color::Black);

    if black.is_empty() || red.is_empty() {
        return present;
    }

    let (mut lead, mut follow) = if red.len() > black.len() {
        (red.into_iter(), black.into_iter())
    } else {
        (black.into_iter(), red.into_iter())
    };

    let mut order = Vec::with_capacity(present.len());
    loop {
        match lead.next() {
            Some(suit) => order.push(suit),
            None => {
                order.extend(follow);
                break;
            }
        }
        std::mem::swap(&mut lead, &mut follow);
    }
    order
}

/// Reorder `cards` into canonical display order: suit blocks per
/// [`suit_block_order`], ascending rank within each block.
///
/// The output holds exactly the input cards. Sorting an already sorted
/// sequence returns it unchanged.
pub fn canonical_sort(cards: &[Card]) -> Vec<Card> {
    let mut sorted = Vec::with_capacity(cards.len());
    for suit in suit_block_order(cards) {
        let start = sorted.len();
        sorted.extend(cards.iter().filter(|c| c.suit == suit).copied());
        sorted[start..].sort_by_key(|c| c.rank_value());
    }
    sorted
}

/// High-card points of a card sequence (A=4, K=3, Q=2, J=1).
pub fn high_card_points(cards: &[Card]) -> u32 {
    cards.iter().map(|c| c.rank.high_card_points()).sum()
}
