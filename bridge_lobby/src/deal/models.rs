//! Deal result models.

use crate::{
    game::{Hand, SeatLabel},
    table::TableId,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Cosmetic deck back color, flipped after every successful deal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckColor {
    Blue,
    Red,
}

impl DeckColor {
    /// Color used when no deal has been recorded yet
    pub const FIRST: DeckColor = DeckColor::Blue;

    pub fn opposite(self) -> Self {
        match self {
            DeckColor::Blue => DeckColor::Red,
            DeckColor::Red => DeckColor::Blue,
        }
    }

    /// Color for the deal following one dealt with `last`
    pub fn after(last: Option<DeckColor>) -> Self {
        last.map_or(Self::FIRST, DeckColor::opposite)
    }

    /// Decode a stored color record: a JSON string (`"red"`) or the bare
    /// word (`red`) older clients wrote.
    pub fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str(raw)
            .ok()
            .or_else(|| raw.parse().ok())
    }
}

impl FromStr for DeckColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blue" => Ok(DeckColor::Blue),
            "red" => Ok(DeckColor::Red),
            other => Err(format!("unknown deck color '{other}'")),
        }
    }
}

impl fmt::Display for DeckColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckColor::Blue => write!(f, "blue"),
            DeckColor::Red => write!(f, "red"),
        }
    }
}

/// Everything produced by one deal cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealOutcome {
    /// Table the deal was made for; `None` when dealt without a selection
    pub table_id: Option<TableId>,
    pub deck_color: DeckColor,
    /// One hand per seat, in draw order
    pub hands: Vec<Hand>,
    /// Seat occupants at deal time, in draw order
    pub occupants: Vec<(SeatLabel, Option<String>)>,
}

impl DealOutcome {
    pub fn hand(&self, seat: SeatLabel) -> Option<&Hand> {
        self.hands.iter().find(|h| h.seat == seat)
    }

    pub fn occupant(&self, seat: SeatLabel) -> Option<&str> {
        self.occupants
            .iter()
            .find(|(s, _)| *s == seat)
            .and_then(|(_, name)| name.as_deref())
    }

    pub fn total_points(&self) -> u32 {
        self.hands.iter().map(|h| h.points).sum()
    }
}
