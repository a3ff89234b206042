//! Table data models.

use crate::game::{SeatLabel, constants::NUM_SEATS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque table identifier
pub type TableId = String;

/// Seat occupancy. Each field holds the occupant's username, `None` if empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct Positions {
    pub north: Option<String>,
    pub south: Option<String>,
    pub east: Option<String>,
    pub west: Option<String>,
}

impl Positions {
    pub fn get(&self, seat: SeatLabel) -> Option<&str> {
        match seat {
            SeatLabel::North => self.north.as_deref(),
            SeatLabel::South => self.south.as_deref(),
            SeatLabel::East => self.east.as_deref(),
            SeatLabel::West => self.west.as_deref(),
        }
    }

    pub fn set(&mut self, seat: SeatLabel, username: Option<String>) {
        let slot = match seat {
            SeatLabel::North => &mut self.north,
            SeatLabel::South => &mut self.south,
            SeatLabel::East => &mut self.east,
            SeatLabel::West => &mut self.west,
        };
        *slot = username;
    }

    /// Seat held by `username`, if any
    pub fn seat_of(&self, username: &str) -> Option<SeatLabel> {
        SeatLabel::DISPLAY_ORDER
            .into_iter()
            .find(|seat| self.get(*seat) == Some(username))
    }

    /// Seats with their occupants, in display order
    pub fn iter(&self) -> impl Iterator<Item = (SeatLabel, Option<&str>)> + '_ {
        SeatLabel::DISPLAY_ORDER
            .into_iter()
            .map(move |seat| (seat, self.get(seat)))
    }

    pub fn occupied_count(&self) -> usize {
        self.iter().filter(|(_, occupant)| occupant.is_some()).count()
    }
}

/// A persisted table record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: TableId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub positions: Positions,

    /// Usernames watching the table, in join order
    #[serde(default)]
    pub spectators: Vec<String>,

    /// Optimistic concurrency counter, bumped on every committed change
    #[serde(default)]
    pub revision: u64,
}

impl Table {
    /// Create an empty table with a fresh id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: format!("table_{}", uuid::Uuid::new_v4().simple()),
            name: name.into(),
            created_at: Utc::now(),
            positions: Positions::default(),
            spectators: Vec::new(),
            revision: 0,
        }
    }

    pub fn is_full(&self) -> bool {
        self.positions.occupied_count() == NUM_SEATS
    }

    pub fn available_seat_count(&self) -> usize {
        NUM_SEATS - self.positions.occupied_count()
    }

    pub fn is_spectator(&self, username: &str) -> bool {
        self.spectators.iter().any(|s| s == username)
    }
}

/// A single seat/spectator state transition on one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableCommand {
    JoinSeat { seat: SeatLabel, username: String },
    JoinSpectator { username: String },
    LeaveSeat { seat: SeatLabel },
    LeaveSpectator { username: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_is_empty() {
        let table = Table::new("T1");
        assert!(table.id.starts_with("table_"));
        assert_eq!(table.available_seat_count(), 4);
        assert!(!table.is_full());
        assert!(table.spectators.is_empty());
        assert_eq!(table.revision, 0);
    }

    #[test]
    fn test_table_ids_are_unique() {
        assert_ne!(Table::new("a").id, Table::new("a").id);
    }

    #[test]
    fn test_positions_get_set() {
        let mut positions = Positions::default();
        positions.set(SeatLabel::East, Some("alice".to_string()));
        assert_eq!(positions.get(SeatLabel::East), Some("alice"));
        assert_eq!(positions.seat_of("alice"), Some(SeatLabel::East));
        assert_eq!(positions.seat_of("bob"), None);
        assert_eq!(positions.occupied_count(), 1);

        positions.set(SeatLabel::East, None);
        assert_eq!(positions.occupied_count(), 0);
    }

    #[test]
    fn test_full_table() {
        let mut table = Table::new("T");
        for (i, seat) in SeatLabel::DRAW_ORDER.into_iter().enumerate() {
            table.positions.set(seat, Some(format!("p{i}")));
        }
        assert!(table.is_full());
        assert_eq!(table.available_seat_count(), 0);
    }

    #[test]
    fn test_table_json_shape() {
        let mut table = Table::new("Demo");
        table.positions.set(SeatLabel::North, Some("ivan".to_string()));
        table.spectators = vec!["maria".to_string(), "zoe".to_string()];

        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(value["name"], "Demo");
        assert!(value["createdAt"].is_string());
        assert_eq!(value["positions"]["NORTH"], "ivan");
        assert!(value["positions"]["SOUTH"].is_null());
        assert_eq!(value["spectators"][1], "zoe");

        let back: Table = serde_json::from_value(value).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_table_without_revision_loads_as_zero() {
        let json = r#"{
            "id": "table_1",
            "name": "Old",
            "createdAt": "2024-01-01T00:00:00Z",
            "positions": {"NORTH": null, "SOUTH": "bob", "EAST": null, "WEST": null},
            "spectators": []
        }"#;
        let table: Table = serde_json::from_str(json).unwrap();
        assert_eq!(table.revision, 0);
        assert_eq!(table.positions.get(SeatLabel::South), Some("bob"));
    }
}
