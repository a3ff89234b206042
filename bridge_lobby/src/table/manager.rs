//! Table registry: the persisted, multi-session seat and spectator state.

use super::{
    config::RegistryConfig,
    errors::{TableError, TableResult},
    models::{Table, TableCommand},
};
use crate::{
    game::SeatLabel,
    storage::{KeyValueStore, StorageError, StorageResult, read_json},
};
use std::sync::Arc;

/// Registry handle over the persisted table list.
///
/// The handle holds no table state of its own: every query reads the latest
/// persisted snapshot and every mutation is a read-check-swap cycle guarded
/// by the table's revision. The swap is the store's `compare_and_set`, so a
/// commit never lands on top of a snapshot it did not read. Cloning is cheap
/// and clones share the same store.
#[derive(Clone)]
pub struct TableRegistry {
    store: Arc<dyn KeyValueStore>,
    key: String,
    config: RegistryConfig,
}

impl TableRegistry {
    /// Create a registry handle without touching storage
    ///
    /// # Arguments
    ///
    /// * `store` - Shared persistence store
    /// * `key` - Key the table list is stored under
    /// * `config` - Registry configuration
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>, config: RegistryConfig) -> Self {
        Self {
            store,
            key: key.into(),
            config,
        }
    }

    /// Create a registry handle and seed sample tables if nothing has been
    /// persisted yet
    ///
    /// An unreadable registry is left alone so the seed never overwrites it.
    ///
    /// # Errors
    ///
    /// * `TableError::Storage` - Seeding could not be written
    pub fn open(
        store: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        config: RegistryConfig,
    ) -> TableResult<Self> {
        let registry = Self::new(store, key, config);

        match registry.read_snapshot() {
            Ok(None) if registry.config.seed_sample_tables => registry.seed_sample_tables()?,
            Ok(_) => {}
            Err(e) => log::warn!("Table registry unreadable, not seeding: {}", e),
        }

        Ok(registry)
    }

    fn seed_sample_tables(&self) -> TableResult<()> {
        let mut demo = Table::new("Table 3 - Demo");
        demo.positions.set(SeatLabel::North, Some("ivan".to_string()));
        demo.positions.set(SeatLabel::South, Some("petar".to_string()));
        demo.spectators.push("maria".to_string());

        let tables = vec![Table::new("Table 1"), Table::new("Table 2"), demo];
        let raw = serde_json::to_string(&tables).map_err(StorageError::from)?;
        if self.store.compare_and_set(&self.key, None, &raw)? {
            log::info!("Seeded {} sample tables", tables.len());
        } else {
            log::debug!("Another session seeded the registry first");
        }
        Ok(())
    }

    fn read_snapshot(&self) -> StorageResult<Option<Vec<Table>>> {
        read_json(self.store.as_ref(), &self.key)
    }

    /// Snapshot for mutations, with the raw record it was decoded from.
    /// Storage failures are surfaced so a write can never replace data that
    /// could not be read.
    fn load_for_update(&self) -> TableResult<(Option<String>, Vec<Table>)> {
        let raw = self.store.get(&self.key)?;
        let tables = match raw.as_deref() {
            Some(encoded) => serde_json::from_str(encoded).map_err(StorageError::from)?,
            None => Vec::new(),
        };
        Ok((raw, tables))
    }

    /// Snapshot for queries: storage failures fall back to an empty registry.
    fn load_or_empty(&self) -> Vec<Table> {
        match self.read_snapshot() {
            Ok(tables) => tables.unwrap_or_default(),
            Err(e) => {
                log::warn!("Failed to read table registry, using empty registry: {}", e);
                Vec::new()
            }
        }
    }

    /// Apply `change` to the latest snapshot and swap the result in.
    ///
    /// `change` returns its output and whether it modified the list. When
    /// another session writes between the read and the swap, the swap is
    /// refused and `change` runs again against the newer snapshot, where its
    /// own checks decide whether the commit still holds.
    fn update<T, F>(&self, mut change: F) -> TableResult<T>
    where
        F: FnMut(&mut Vec<Table>) -> TableResult<(T, bool)>,
    {
        loop {
            let (raw, mut tables) = self.load_for_update()?;
            let (output, changed) = change(&mut tables)?;
            if !changed {
                return Ok(output);
            }

            let encoded = serde_json::to_string(&tables).map_err(StorageError::from)?;
            if self
                .store
                .compare_and_set(&self.key, raw.as_deref(), &encoded)?
            {
                return Ok(output);
            }
            log::debug!("Table registry changed during commit, re-reading");
        }
    }

    /// All tables in creation order
    pub fn get_all_tables(&self) -> Vec<Table> {
        self.load_or_empty()
    }

    pub fn get_table(&self, table_id: &str) -> Option<Table> {
        self.load_or_empty().into_iter().find(|t| t.id == table_id)
    }

    /// Look up a table, surfacing storage failures
    ///
    /// # Errors
    ///
    /// * `TableError::TableNotFound` - Unknown table
    /// * `TableError::Storage` - Registry could not be read
    pub fn load_table(&self, table_id: &str) -> TableResult<Table> {
        self.load_for_update()?
            .1
            .into_iter()
            .find(|t| t.id == table_id)
            .ok_or_else(|| TableError::TableNotFound(table_id.to_string()))
    }

    /// True iff all four seats are occupied. Unknown tables are not full.
    pub fn is_full(&self, table_id: &str) -> bool {
        self.get_table(table_id).is_some_and(|t| t.is_full())
    }

    /// Number of empty seats (0-4). Unknown tables have none.
    pub fn available_seat_count(&self, table_id: &str) -> usize {
        self.get_table(table_id)
            .map(|t| t.available_seat_count())
            .unwrap_or(0)
    }

    /// Create a new empty table
    ///
    /// A blank name gets an auto-numbered label (`Table N`).
    ///
    /// # Errors
    ///
    /// * `TableError::InvalidName` - Name longer than the configured maximum
    /// * `TableError::Storage` - Registry could not be read or written
    pub fn create_table(&self, name: &str) -> TableResult<Table> {
        let name = name.trim();
        if name.chars().count() > self.config.max_name_length {
            return Err(TableError::InvalidName(format!(
                "must be at most {} characters",
                self.config.max_name_length
            )));
        }

        let table = self.update(|tables| {
            let label = if name.is_empty() {
                format!("Table {}", tables.len() + 1)
            } else {
                name.to_string()
            };
            let table = Table::new(label);
            tables.push(table.clone());
            Ok((table, true))
        })?;

        log::info!("Table created: {} ({})", table.name, table.id);
        Ok(table)
    }

    /// Take a seat
    ///
    /// # Errors
    ///
    /// * `TableError::TableNotFound` - Unknown table
    /// * `TableError::SeatTaken` - Seat occupied
    /// * `TableError::AlreadySeated` - User holds another seat at this table
    /// * `TableError::AlreadySpectating` - User watches this table
    /// * `TableError::Conflict` - Table changed concurrently
    pub fn join_seat(&self, table_id: &str, seat: SeatLabel, username: &str) -> TableResult<Table> {
        self.execute(
            table_id,
            None,
            TableCommand::JoinSeat {
                seat,
                username: username.to_string(),
            },
        )
    }

    /// Join as a spectator
    ///
    /// # Errors
    ///
    /// * `TableError::TableNotFound` - Unknown table
    /// * `TableError::AlreadySpectating` - User already listed
    /// * `TableError::AlreadySeated` - User holds a seat at this table
    /// * `TableError::Conflict` - Table changed concurrently
    pub fn join_spectator(&self, table_id: &str, username: &str) -> TableResult<Table> {
        self.execute(
            table_id,
            None,
            TableCommand::JoinSpectator {
                username: username.to_string(),
            },
        )
    }

    /// Empty a seat. Leaving an empty seat is a no-op.
    pub fn leave_seat(&self, table_id: &str, seat: SeatLabel) -> TableResult<Table> {
        self.execute(table_id, None, TableCommand::LeaveSeat { seat })
    }

    /// Remove a spectator. Removing an unlisted user is a no-op.
    pub fn leave_spectator(&self, table_id: &str, username: &str) -> TableResult<Table> {
        self.execute(
            table_id,
            None,
            TableCommand::LeaveSpectator {
                username: username.to_string(),
            },
        )
    }

    /// Apply one command to one table as a single atomic read-modify-write
    ///
    /// # Arguments
    ///
    /// * `table_id` - Target table
    /// * `expected_revision` - Revision the caller last saw; `None` uses the
    ///   revision read at the start of this call
    /// * `command` - Transition to apply
    ///
    /// # Returns
    ///
    /// * `TableResult<Table>` - The table as committed
    pub fn execute(
        &self,
        table_id: &str,
        expected_revision: Option<u64>,
        command: TableCommand,
    ) -> TableResult<Table> {
        match command {
            TableCommand::JoinSeat { seat, username } => {
                let username = normalize_username(&username)?;
                let table = self.mutate_table(table_id, expected_revision, |table| {
                    if let Some(occupant) = table.positions.get(seat) {
                        return Err(TableError::SeatTaken {
                            table_id: table.id.clone(),
                            seat,
                            occupant: occupant.to_string(),
                        });
                    }
                    if let Some(held) = table.positions.seat_of(&username) {
                        return Err(TableError::AlreadySeated {
                            table_id: table.id.clone(),
                            seat: held,
                            username: username.clone(),
                        });
                    }
                    if table.is_spectator(&username) {
                        return Err(TableError::AlreadySpectating {
                            table_id: table.id.clone(),
                            username: username.clone(),
                        });
                    }
                    table.positions.set(seat, Some(username.clone()));
                    Ok(true)
                })?;
                log::info!("{} joined {} at {}", username, table_id, seat);
                Ok(table)
            }
            TableCommand::JoinSpectator { username } => {
                let username = normalize_username(&username)?;
                let table = self.mutate_table(table_id, expected_revision, |table| {
                    if table.is_spectator(&username) {
                        return Err(TableError::AlreadySpectating {
                            table_id: table.id.clone(),
                            username: username.clone(),
                        });
                    }
                    if let Some(held) = table.positions.seat_of(&username) {
                        return Err(TableError::AlreadySeated {
                            table_id: table.id.clone(),
                            seat: held,
                            username: username.clone(),
                        });
                    }
                    table.spectators.push(username.clone());
                    Ok(true)
                })?;
                log::info!("{} joined {} as spectator", username, table_id);
                Ok(table)
            }
            TableCommand::LeaveSeat { seat } => {
                let table = self.mutate_table(table_id, expected_revision, |table| {
                    if table.positions.get(seat).is_none() {
                        return Ok(false);
                    }
                    table.positions.set(seat, None);
                    Ok(true)
                })?;
                log::info!("Position {} at {} is now empty", seat, table_id);
                Ok(table)
            }
            TableCommand::LeaveSpectator { username } => {
                let username = username.trim().to_string();
                let table = self.mutate_table(table_id, expected_revision, |table| {
                    let before = table.spectators.len();
                    table.spectators.retain(|s| *s != username);
                    Ok(table.spectators.len() != before)
                })?;
                log::info!("{} stopped watching {}", username, table_id);
                Ok(table)
            }
        }
    }

    /// Put a table's seats and spectators back to an earlier snapshot.
    ///
    /// Used to undo a commit whose companion write failed. The restore is
    /// itself a revision-checked commit against `expected_revision`.
    pub fn restore(&self, snapshot: &Table, expected_revision: u64) -> TableResult<Table> {
        let table = self.mutate_table(&snapshot.id, Some(expected_revision), |table| {
            table.positions = snapshot.positions.clone();
            table.spectators = snapshot.spectators.clone();
            Ok(true)
        })?;
        log::info!("Table {} restored to revision {} state", table.id, snapshot.revision);
        Ok(table)
    }

    /// Remove every table
    ///
    /// The current record is swapped out without being decoded, so an
    /// unreadable registry can still be cleared.
    pub fn clear_all_tables(&self) -> TableResult<()> {
        loop {
            let raw = self.store.get(&self.key)?;
            if self.store.compare_and_set(&self.key, raw.as_deref(), "[]")? {
                break;
            }
        }
        log::warn!("All tables cleared");
        Ok(())
    }

    /// Read-check-swap cycle for one table.
    ///
    /// `mutation` works on a copy and returns whether it changed anything;
    /// an error or `false` leaves storage untouched. The base revision is
    /// fixed on the first read. If the swap loses a race, the newer snapshot
    /// is checked again: a commit to this table since the base shows up as
    /// `Conflict`, while changes to other tables are kept and the mutation
    /// is re-applied.
    fn mutate_table<F>(
        &self,
        table_id: &str,
        expected_revision: Option<u64>,
        mut mutation: F,
    ) -> TableResult<Table>
    where
        F: FnMut(&mut Table) -> TableResult<bool>,
    {
        let mut base = expected_revision;
        self.update(|tables| {
            let slot = tables
                .iter_mut()
                .find(|t| t.id == table_id)
                .ok_or_else(|| TableError::TableNotFound(table_id.to_string()))?;

            let base = *base.get_or_insert(slot.revision);
            if slot.revision != base {
                return Err(self.conflict(table_id, base, slot.revision));
            }

            let mut table = slot.clone();
            if !mutation(&mut table)? {
                return Ok((table, false));
            }
            table.revision = base + 1;
            *slot = table.clone();
            Ok((table, true))
        })
    }

    fn conflict(&self, table_id: &str, expected: u64, actual: u64) -> TableError {
        log::warn!(
            "Stale write rejected on {}: expected revision {}, found {}",
            table_id,
            expected,
            actual
        );
        TableError::Conflict {
            table_id: table_id.to_string(),
            expected,
            actual,
        }
    }
}

fn normalize_username(username: &str) -> TableResult<String> {
    let username = username.trim();
    if username.is_empty() {
        return Err(TableError::InvalidUsername(
            "username cannot be blank".to_string(),
        ));
    }
    Ok(username.to_string())
}
