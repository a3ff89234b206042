//! Session selector: the local actor's seat or spectator slot.

use super::{
    errors::{SessionError, SessionResult},
    models::{Role, SessionSelection},
};
use crate::{
    game::SeatLabel,
    storage::{KeyValueStore, StorageResult, read_json, write_json},
    table::{Table, TableCommand, TableRegistry},
};
use std::sync::Arc;

/// Tracks which table, seat and role the local actor holds.
///
/// Every join and leave goes through here so the registry and the persisted
/// selection move together: if saving the selection fails after the
/// registry commit, the table is restored before the error is returned.
pub struct SessionSelector {
    registry: TableRegistry,
    store: Arc<dyn KeyValueStore>,
    key: String,
    selection: SessionSelection,
}

impl SessionSelector {
    /// Create a selector, restoring the persisted selection
    ///
    /// An unreadable record is treated as no selection.
    pub fn load(registry: TableRegistry, store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let selection = match read_json::<SessionSelection>(store.as_ref(), &key) {
            Ok(selection) => selection.unwrap_or_default(),
            Err(e) => {
                log::warn!("Failed to read session selection, starting empty: {}", e);
                SessionSelection::default()
            }
        };

        Self {
            registry,
            store,
            key,
            selection,
        }
    }

    pub fn current(&self) -> &SessionSelection {
        &self.selection
    }

    pub fn registry(&self) -> &TableRegistry {
        &self.registry
    }

    /// Table the selection points at, if it still exists
    pub fn current_table(&self) -> Option<Table> {
        self.selection
            .table_id
            .as_deref()
            .and_then(|id| self.registry.get_table(id))
    }

    /// Take a seat and select it
    ///
    /// # Errors
    ///
    /// * `SessionError::Table` - Registry rejected the join
    /// * `SessionError::Storage` - Selection could not be saved
    pub fn join_seat(&mut self, table_id: &str, seat: SeatLabel, username: &str) -> SessionResult<Table> {
        let command = TableCommand::JoinSeat {
            seat,
            username: username.to_string(),
        };
        self.commit(table_id, command, Some(SessionSelection::player(table_id, seat)))
    }

    /// Join as a spectator and select the table
    ///
    /// # Errors
    ///
    /// * `SessionError::Table` - Registry rejected the join
    /// * `SessionError::Storage` - Selection could not be saved
    pub fn join_spectator(&mut self, table_id: &str, username: &str) -> SessionResult<Table> {
        let command = TableCommand::JoinSpectator {
            username: username.to_string(),
        };
        self.commit(table_id, command, Some(SessionSelection::spectator(table_id)))
    }

    /// Empty a seat, clearing the selection if it was this seat
    pub fn leave_seat(&mut self, table_id: &str, seat: SeatLabel) -> SessionResult<Table> {
        let next = self
            .selection
            .is_seat(table_id, seat)
            .then(SessionSelection::default);
        self.commit(table_id, TableCommand::LeaveSeat { seat }, next)
    }

    /// Stop watching a table, clearing the selection if it was this one
    pub fn leave_spectator(&mut self, table_id: &str, username: &str) -> SessionResult<Table> {
        let watching = self.selection.is_spectator()
            && self.selection.table_id.as_deref() == Some(table_id);
        let command = TableCommand::LeaveSpectator {
            username: username.to_string(),
        };
        self.commit(table_id, command, watching.then(SessionSelection::default))
    }

    /// Leave whatever slot the selection points at
    ///
    /// # Returns
    ///
    /// * `SessionResult<Option<Table>>` - The table left, `None` if nothing
    ///   was selected
    pub fn leave_current(&mut self, username: &str) -> SessionResult<Option<Table>> {
        let Some(table_id) = self.selection.table_id.clone() else {
            return Ok(None);
        };

        let table = match (self.selection.role, self.selection.seat_label) {
            (Role::Spectator, _) => self.leave_spectator(&table_id, username)?,
            (Role::Player, Some(seat)) => self.leave_seat(&table_id, seat)?,
            (Role::Player, None) => {
                self.clear()?;
                return Ok(None);
            }
        };
        Ok(Some(table))
    }

    /// Drop the selection without touching the registry
    pub fn clear(&mut self) -> SessionResult<()> {
        self.persist(&SessionSelection::default())?;
        self.selection = SessionSelection::default();
        Ok(())
    }

    fn persist(&self, selection: &SessionSelection) -> StorageResult<()> {
        if selection.is_active() {
            write_json(self.store.as_ref(), &self.key, selection)
        } else {
            self.store.remove(&self.key)
        }
    }

    /// Commit `command` and then save `next`, restoring the table if the
    /// save fails. `None` leaves the selection as is.
    fn commit(
        &mut self,
        table_id: &str,
        command: TableCommand,
        next: Option<SessionSelection>,
    ) -> SessionResult<Table> {
        let before = self.registry.load_table(table_id)?;
        let committed = self.registry.execute(table_id, Some(before.revision), command)?;

        let Some(next) = next else {
            return Ok(committed);
        };

        if let Err(e) = self.persist(&next) {
            if committed.revision != before.revision {
                match self.registry.restore(&before, committed.revision) {
                    Ok(_) => log::warn!("Selection save failed, table {} restored", table_id),
                    Err(revert) => log::error!(
                        "Selection save failed and table {} could not be restored: {}",
                        table_id,
                        revert
                    ),
                }
            }
            return Err(SessionError::Storage(e));
        }

        self.selection = next;
        Ok(committed)
    }
}
