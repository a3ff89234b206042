//! A terminal client for the bridge table lobby.
//!
//! The client opens the shared file store, restores the previous session
//! and reads lobby commands line by line from stdin.

use anyhow::{Context, Error};
use bl_client::{
    app::{self, Reply},
    commands::parse_command,
    config::ClientConfig,
};
use bridge_lobby::{Lobby, storage::FileStore};
use ctrlc::set_handler;
use log::info;
use pico_args::Arguments;
use std::{path::PathBuf, sync::Arc};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const HELP: &str = "\
Open the bridge table lobby

USAGE:
  bl_client [OPTIONS]

OPTIONS:
  --data-dir   DIR         Shared data directory  [default: env BRIDGE_DATA_DIR or .bridge_lobby]
  --username   NAME        Log in as NAME on startup
  --password   PASS        Password for --username

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  BRIDGE_DATA_DIR          Shared data directory
  BRIDGE_LOGIN_DELAY_MS    Cosmetic login delay  [default: 500]
  BRIDGE_DEAL_DELAY_MS     Cosmetic deal delay  [default: 300]
  BRIDGE_SEED_TABLES       Seed sample tables into an empty registry  [default: true]
  RUST_LOG                 Log level (e.g. info, debug)
";

struct Args {
    data_dir: Option<PathBuf>,
    username: Option<String>,
    password: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        data_dir: pargs.opt_value_from_str("--data-dir")?,
        username: pargs.opt_value_from_str("--username")?,
        password: pargs.opt_value_from_str("--password")?,
    };

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    env_logger::builder().format_target(false).init();

    let config = ClientConfig::from_env(args.data_dir, args.username, args.password)?;
    run(config).await
}

async fn run(config: ClientConfig) -> Result<(), Error> {
    let data_dir = &config.lobby.storage.data_dir;
    info!("Opening lobby data at {}", data_dir.display());
    let store = FileStore::open(data_dir)
        .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;

    let mut lobby = Lobby::open(Arc::new(store), &config.lobby)
        .map_err(|e| anyhow::anyhow!("Failed to open lobby: {}", e))?;

    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        println!("Logging in as {}...", username);
        match lobby.login(username, password).await {
            Ok(user) => println!("Logged in as {}", user.username),
            Err(e) => println!("Login failed: {}", e.client_message()),
        }
    } else if let Some(user) = lobby.current_user() {
        println!("Welcome back, {}", user.username);
    }

    println!("Type 'help' for commands.");

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match app::execute(&mut lobby, command).await {
            Ok(Reply::Text(text)) => println!("{text}"),
            Ok(Reply::Quit) => break,
            Err(e) => {
                if e.is_rejection() {
                    log::debug!("Command rejected: {}", e);
                } else {
                    log::warn!("Command failed: {:?}", e);
                }
                println!("{}", e.client_message());
            }
        }
    }

    println!("Bye.");
    Ok(())
}
