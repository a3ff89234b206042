//! Session selection models.

use crate::{game::SeatLabel, table::TableId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the local actor takes part in a table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Player,
    Spectator,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Player => write!(f, "player"),
            Role::Spectator => write!(f, "spectator"),
        }
    }
}

/// The local actor's current table, seat and role.
///
/// Holds the table id only; the table itself is always read from the
/// registry. An empty selection still carries a role, defaulting to player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSelection {
    pub table_id: Option<TableId>,
    #[serde(alias = "position")]
    pub seat_label: Option<SeatLabel>,
    #[serde(default)]
    pub role: Role,
}

impl SessionSelection {
    pub fn player(table_id: impl Into<TableId>, seat: SeatLabel) -> Self {
        Self {
            table_id: Some(table_id.into()),
            seat_label: Some(seat),
            role: Role::Player,
        }
    }

    pub fn spectator(table_id: impl Into<TableId>) -> Self {
        Self {
            table_id: Some(table_id.into()),
            seat_label: None,
            role: Role::Spectator,
        }
    }

    /// True if the selection points at a table
    pub fn is_active(&self) -> bool {
        self.table_id.is_some()
    }

    pub fn is_spectator(&self) -> bool {
        self.role == Role::Spectator
    }

    /// True if this selection is the given seat at the given table
    pub fn is_seat(&self, table_id: &str, seat: SeatLabel) -> bool {
        self.table_id.as_deref() == Some(table_id) && self.seat_label == Some(seat)
    }
}
