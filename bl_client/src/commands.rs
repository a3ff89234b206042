use bridge_lobby::game::SeatLabel;
use std::fmt;

/// How a command names a table: its position in the `tables` listing or
/// its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRef {
    /// 1-based position in the listing
    Index(usize),
    Id(String),
}

impl TableRef {
    fn parse(raw: &str) -> Self {
        match raw.parse::<usize>() {
            Ok(index) => Self::Index(index),
            Err(_) => Self::Id(raw.to_string()),
        }
    }
}

/// A parsed lobby command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LobbyCommand {
    Login { username: String, password: String },
    Logout,
    Tables,
    /// Create a table; an empty name gets an automatic label
    Create { name: String },
    Sit { table: TableRef, seat: SeatLabel },
    Watch { table: TableRef },
    Leave,
    Deal,
    WhoAmI,
    /// Remove every table (admin only)
    Clear,
    Help,
    Quit,
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Command is missing a required argument.
    MissingArgument { usage: &'static str },
    /// Seat is not one of NORTH, SOUTH, EAST, WEST.
    InvalidSeat(String),
    /// Table position 0 was given.
    InvalidTableIndex,
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument { usage } => write!(f, "Missing argument. Usage: {}", usage),
            Self::InvalidSeat(value) => write!(
                f,
                "Invalid seat '{}'. Use north, south, east or west (or N, S, E, W)",
                value
            ),
            Self::InvalidTableIndex => write!(f, "Table numbers start at 1"),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{}'. Type 'help' to see available commands",
                cmd
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Usage text printed by `help`.
pub const HELP_TEXT: &str = "\
Commands:
  login USER PASS      Log in (any non-blank credentials)
  logout               Leave your seat and log out
  tables               List tables
  create [NAME]        Create a table
  sit TABLE SEAT       Take a seat (TABLE is a number from 'tables' or an id)
  watch TABLE          Watch a table as a spectator
  leave                Leave your seat or stop watching
  deal                 Deal four new hands
  whoami               Show the logged-in user and selection
  clear                Remove all tables (admin only)
  help                 Show this help
  quit                 Exit";

/// Parse a command string into a LobbyCommand.
///
/// # Arguments
///
/// * `input` - The raw command string from user input
///
/// # Returns
///
/// * `Ok(LobbyCommand)` - Successfully parsed command
/// * `Err(ParseError)` - Parse error with descriptive message
///
/// # Examples
///
/// ```
/// use bl_client::commands::{LobbyCommand, TableRef, parse_command};
/// use bridge_lobby::game::SeatLabel;
///
/// assert_eq!(parse_command("deal"), Ok(LobbyCommand::Deal));
/// assert_eq!(
///     parse_command("sit 2 north"),
///     Ok(LobbyCommand::Sit { table: TableRef::Index(2), seat: SeatLabel::North })
/// );
/// ```
pub fn parse_command(input: &str) -> Result<LobbyCommand, ParseError> {
    let trimmed = input.trim();

    // Try single-word commands first
    match trimmed {
        "logout" => return Ok(LobbyCommand::Logout),
        "tables" | "ls" => return Ok(LobbyCommand::Tables),
        "leave" => return Ok(LobbyCommand::Leave),
        "deal" => return Ok(LobbyCommand::Deal),
        "whoami" => return Ok(LobbyCommand::WhoAmI),
        "clear" => return Ok(LobbyCommand::Clear),
        "help" | "?" => return Ok(LobbyCommand::Help),
        "quit" | "exit" => return Ok(LobbyCommand::Quit),
        _ => {}
    }

    // Parse multi-word commands
    let parts: Vec<&str> = trimmed.split_ascii_whitespace().collect();
    match parts.first() {
        Some(&"login") => parse_login_command(&parts),
        Some(&"create") => Ok(LobbyCommand::Create {
            name: parts[1..].join(" "),
        }),
        Some(&"sit") => parse_sit_command(&parts),
        Some(&"watch") => match parts.get(1) {
            Some(table) => Ok(LobbyCommand::Watch {
                table: parse_table_ref(table)?,
            }),
            None => Err(ParseError::MissingArgument {
                usage: "watch TABLE",
            }),
        },
        _ => Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    }
}

/// Parse a login command: "login USER PASS"
fn parse_login_command(parts: &[&str]) -> Result<LobbyCommand, ParseError> {
    match (parts.get(1), parts.get(2)) {
        (Some(username), Some(password)) => Ok(LobbyCommand::Login {
            username: username.to_string(),
            password: password.to_string(),
        }),
        _ => Err(ParseError::MissingArgument {
            usage: "login USER PASS",
        }),
    }
}

/// Parse a sit command: "sit TABLE SEAT"
fn parse_sit_command(parts: &[&str]) -> Result<LobbyCommand, ParseError> {
    match (parts.get(1), parts.get(2)) {
        (Some(table), Some(seat)) => {
            let seat = seat
                .parse::<SeatLabel>()
                .map_err(|_| ParseError::InvalidSeat(seat.to_string()))?;
            Ok(LobbyCommand::Sit {
                table: parse_table_ref(table)?,
                seat,
            })
        }
        _ => Err(ParseError::MissingArgument {
            usage: "sit TABLE SEAT",
        }),
    }
}

fn parse_table_ref(raw: &str) -> Result<TableRef, ParseError> {
    match TableRef::parse(raw) {
        TableRef::Index(0) => Err(ParseError::InvalidTableIndex),
        table => Ok(table),
    }
}
