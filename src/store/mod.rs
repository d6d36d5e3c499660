//! Room storage.
//!
//! The store is the single owner of each room's state. `MemoryRoomStore`
//! keeps every state as an encoded blob, so a caller only ever holds a
//! decoded copy and can never alias what is stored.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::core::GameState;
use crate::error::StoreError;

const LOG_TARGET: &str = "kingdoms_engine::store";

/// Keyed storage of game states by room code.
pub trait RoomStore {
    /// Load a copy of the room's state.
    fn get(&self, room_code: &str) -> Result<Option<GameState>, StoreError>;

    /// Replace the room's state.
    fn put(&mut self, room_code: &str, state: &GameState) -> Result<(), StoreError>;

    /// Drop a room. Returns whether it existed.
    fn remove(&mut self, room_code: &str) -> bool;

    /// Whether a room with this code exists.
    fn contains(&self, room_code: &str) -> bool;
}

/// In-process store of `bincode` blobs.
#[derive(Debug, Default)]
pub struct MemoryRoomStore {
    rooms: FxHashMap<String, Vec<u8>>,
}

impl MemoryRoomStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rooms held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether no rooms are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

impl RoomStore for MemoryRoomStore {
    fn get(&self, room_code: &str) -> Result<Option<GameState>, StoreError> {
        self.rooms
            .get(room_code)
            .map(|blob| bincode::deserialize(blob))
            .transpose()
            .map_err(StoreError::from)
    }

    fn put(&mut self, room_code: &str, state: &GameState) -> Result<(), StoreError> {
        let blob = bincode::serialize(state)?;
        debug!(target: LOG_TARGET, room = room_code, bytes = blob.len(), "room stored");
        self.rooms.insert(room_code.to_string(), blob);
        Ok(())
    }

    fn remove(&mut self, room_code: &str) -> bool {
        self.rooms.remove(room_code).is_some()
    }

    fn contains(&self, room_code: &str) -> bool {
        self.rooms.contains_key(room_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FixedClock, Player, PlayerColor, PlayerId, SequentialIds, Tile, TileKind};
    use crate::rules::KingdomsBuilder;

    fn game() -> GameState {
        let mut engine = KingdomsBuilder::new()
            .seed(8)
            .ids(SequentialIds::new("id"))
            .clock(FixedClock(0))
            .build()
            .unwrap();
        let players = (0..2)
            .map(|i| Player::new(PlayerId::new(format!("p{i}")), format!("P{i}"), PlayerColor::ALL[i], 0))
            .collect();
        engine.initialize_game("ROOM", players)
    }

    #[test]
    fn test_put_then_get() {
        let mut store = MemoryRoomStore::new();
        let state = game();
        store.put("ROOM", &state).unwrap();

        assert!(store.contains("ROOM"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("ROOM").unwrap(), Some(state));
    }

    #[test]
    fn test_missing_room() {
        let mut store = MemoryRoomStore::new();
        assert_eq!(store.get("NOPE").unwrap(), None);
        assert!(!store.remove("NOPE"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_copies_are_independent() {
        let mut store = MemoryRoomStore::new();
        store.put("ROOM", &game()).unwrap();

        let mut copy = store.get("ROOM").unwrap().unwrap();
        copy.players[0].gold = 999;
        copy.players[0].drawn_tile = Some(Tile::new("x", TileKind::Wizard, 0));

        let stored = store.get("ROOM").unwrap().unwrap();
        assert_eq!(stored.players[0].gold, 50);
        assert!(stored.players[0].drawn_tile.is_none());
    }

    #[test]
    fn test_put_replaces_and_remove_drops() {
        let mut store = MemoryRoomStore::new();
        let mut state = game();
        store.put("ROOM", &state).unwrap();

        state.epoch = 2;
        store.put("ROOM", &state).unwrap();
        assert_eq!(store.get("ROOM").unwrap().map(|s| s.epoch), Some(2));

        assert!(store.remove("ROOM"));
        assert!(!store.contains("ROOM"));
    }
}
