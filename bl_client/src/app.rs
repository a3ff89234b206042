//! Command execution against the lobby.

use crate::{
    commands::{HELP_TEXT, LobbyCommand, TableRef},
    view,
};
use bridge_lobby::{
    Lobby, LobbyError,
    table::{TableError, TableId},
};

/// What the driver should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this text and keep reading
    Text(String),
    Quit,
}

/// Run one parsed command.
///
/// # Errors
///
/// Any lobby failure; the driver prints its client message and continues.
pub async fn execute(lobby: &mut Lobby, command: LobbyCommand) -> Result<Reply, LobbyError> {
    let text = match command {
        LobbyCommand::Login { username, password } => {
            let user = lobby.login(&username, &password).await?;
            if user.is_admin {
                format!("Logged in as {} (admin)", user.username)
            } else {
                format!("Logged in as {}", user.username)
            }
        }
        LobbyCommand::Logout => {
            lobby.logout()?;
            "Logged out".to_string()
        }
        LobbyCommand::Tables => view::render_tables(&lobby.get_all_tables(), lobby.selection()),
        LobbyCommand::Create { name } => {
            let table = lobby.create_table(&name)?;
            format!("Created {} ({})", table.name, table.id)
        }
        LobbyCommand::Sit { table, seat } => {
            let table_id = resolve(lobby, &table)?;
            let table = lobby.join_seat(&table_id, seat)?;
            format!("Seated at {} ({})", table.name, seat)
        }
        LobbyCommand::Watch { table } => {
            let table_id = resolve(lobby, &table)?;
            let table = lobby.join_spectator(&table_id)?;
            format!("Watching {}", table.name)
        }
        LobbyCommand::Leave => match lobby.leave()? {
            Some(table) => format!("Left {}", table.name),
            None => "Not at a table".to_string(),
        },
        LobbyCommand::Deal => {
            let outcome = lobby.deal().await?;
            view::render_deal(&outcome)
        }
        LobbyCommand::WhoAmI => match lobby.current_user() {
            Some(user) => format!(
                "{} since {}. {}",
                user.username,
                user.login_time
                    .with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M"),
                view::render_selection(lobby.selection(), lobby.current_table().as_ref())
            ),
            None => "Not logged in".to_string(),
        },
        LobbyCommand::Clear => {
            lobby.clear_all_tables()?;
            "All tables removed".to_string()
        }
        LobbyCommand::Help => HELP_TEXT.to_string(),
        LobbyCommand::Quit => return Ok(Reply::Quit),
    };

    Ok(Reply::Text(text))
}

/// Turn a listing position into a table id
fn resolve(lobby: &Lobby, table: &TableRef) -> Result<TableId, LobbyError> {
    match table {
        TableRef::Id(id) => Ok(id.clone()),
        TableRef::Index(index) => lobby
            .get_all_tables()
            .get(index.saturating_sub(1))
            .map(|t| t.id.clone())
            .ok_or_else(|| TableError::TableNotFound(format!("#{index}")).into()),
    }
}
