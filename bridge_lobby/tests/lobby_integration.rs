/// Integration tests for the lobby facade
///
/// These tests drive complete client sessions: login, joining tables,
/// dealing, logging out and resuming after a restart.
use bridge_lobby::{
    Lobby, LobbyConfig, LobbyError,
    deal::{DealError, DeckColor},
    game::SeatLabel,
    session::Role,
    storage::{FileStore, KeyValueStore, MemoryStore},
    table::TableError,
};
use std::{sync::Arc, time::Duration};

fn memory_lobby() -> (Lobby, Arc<dyn KeyValueStore>) {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let lobby = Lobby::open(store.clone(), &LobbyConfig::instant()).unwrap();
    (lobby, store)
}

#[tokio::test]
async fn test_sample_tables_are_listed() {
    let (lobby, _) = memory_lobby();
    let tables = lobby.get_all_tables();
    let names: Vec<&str> = tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Table 1", "Table 2", "Table 3 - Demo"]);

    let demo = &tables[2];
    assert!(!lobby.is_table_full(&demo.id));
    assert_eq!(lobby.get_available_seats(&demo.id), 2);
}

#[tokio::test]
async fn test_two_players_share_a_table() {
    let (mut alice, store) = memory_lobby();
    let mut bob = Lobby::open(store, &LobbyConfig::instant()).unwrap();

    alice.login("alice", "pw").await.unwrap();
    bob.login("bob", "pw").await.unwrap();

    let table = alice.create_table("Club night").unwrap();
    alice.join_seat(&table.id, SeatLabel::South).unwrap();

    let err = bob.join_seat(&table.id, SeatLabel::South).unwrap_err();
    assert!(err.client_message().contains("taken by alice"));

    bob.join_spectator(&table.id).unwrap();
    assert_eq!(bob.selection().role, Role::Spectator);
    assert_eq!(alice.get_table(&table.id).unwrap().spectators, vec!["bob".to_string()]);
}

#[tokio::test]
async fn test_deck_color_alternates_across_clients() {
    let (mut alice, store) = memory_lobby();
    let mut bob = Lobby::open(store, &LobbyConfig::instant()).unwrap();
    alice.login("alice", "pw").await.unwrap();
    bob.login("bob", "pw").await.unwrap();

    assert_eq!(alice.deal().await.unwrap().deck_color, DeckColor::Blue);
    assert_eq!(bob.deal().await.unwrap().deck_color, DeckColor::Red);
    assert_eq!(alice.deal().await.unwrap().deck_color, DeckColor::Blue);
}

#[tokio::test]
async fn test_spectator_deal_does_not_flip_color() {
    let (mut lobby, _) = memory_lobby();
    lobby.login("maria", "pw").await.unwrap();
    assert_eq!(lobby.deal().await.unwrap().deck_color, DeckColor::Blue);

    let table_id = lobby.get_all_tables()[0].id.clone();
    lobby.join_spectator(&table_id).unwrap();
    assert!(matches!(
        lobby.deal().await,
        Err(LobbyError::Deal(DealError::NotAuthorized))
    ));

    lobby.leave().unwrap();
    assert_eq!(lobby.deal().await.unwrap().deck_color, DeckColor::Red);
}

#[tokio::test]
async fn test_logout_survives_deleted_table() {
    let (mut alice, store) = memory_lobby();
    let mut admin = Lobby::open(store, &LobbyConfig::instant()).unwrap();

    alice.login("alice", "pw").await.unwrap();
    let table_id = alice.get_all_tables()[0].id.clone();
    alice.join_seat(&table_id, SeatLabel::North).unwrap();

    admin.login("admin", "pw").await.unwrap();
    admin.clear_all_tables().unwrap();

    assert!(matches!(
        alice.deal().await,
        Err(LobbyError::Deal(DealError::Table(TableError::TableNotFound(_))))
    ));

    alice.logout().unwrap();
    assert!(alice.current_user().is_none());
    assert!(!alice.selection().is_active());
}

#[tokio::test]
async fn test_session_resumes_after_restart() {
    let dir = std::env::temp_dir().join(format!("bridge_lobby_resume_{}", uuid::Uuid::new_v4().simple()));

    let table_id = {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&dir).unwrap());
        let mut lobby = Lobby::open(store, &LobbyConfig::instant()).unwrap();
        lobby.login("alice", "pw").await.unwrap();
        let table_id = lobby.get_all_tables()[1].id.clone();
        lobby.join_seat(&table_id, SeatLabel::West).unwrap();
        table_id
    };

    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&dir).unwrap());
    let mut lobby = Lobby::open(store, &LobbyConfig::instant()).unwrap();
    assert_eq!(lobby.current_user().map(|u| u.username.as_str()), Some("alice"));
    assert!(lobby.selection().is_seat(&table_id, SeatLabel::West));
    assert_eq!(lobby.get_all_tables().len(), 3);

    lobby.logout().unwrap();
    assert_eq!(lobby.get_available_seats(&table_id), 4);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_cancelled_deal_leaves_no_trace() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let config = LobbyConfig {
        deal_delay: Duration::from_secs(60),
        ..LobbyConfig::instant()
    };
    let mut lobby = Lobby::open(store.clone(), &config).unwrap();
    lobby.login("alice", "pw").await.unwrap();

    let pending = lobby.deal();
    assert!(tokio::time::timeout(Duration::from_millis(10), pending).await.is_err());
    assert_eq!(store.get(&config.storage.deck_color_key).unwrap(), None);
}
