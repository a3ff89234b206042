/// Cards in a full deck.
pub const DECK_SIZE: usize = 52;
/// Cards dealt to each seat in one deal cycle.
pub const HAND_SIZE: usize = 13;
/// Fixed seats at a table.
pub const NUM_SEATS: usize = 4;
/// Longest table name accepted by the registry.
pub const MAX_TABLE_NAME_LENGTH: usize = 64;
