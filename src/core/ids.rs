//! Identity source for game, player, tile and log-entry ids.
//!
//! The engine only requires ids to be unique within their scope; how they
//! are generated is up to the host. Production uses random UUIDs, tests
//! use a counter so snapshots stay stable.

use uuid::Uuid;

/// Supplies fresh unique ids.
pub trait IdSource {
    /// Produce an id that has not been handed out before.
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Counter-based ids (`<prefix>-0`, `<prefix>-1`, ...).
#[derive(Clone, Debug)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    /// Start counting from zero with the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("id")
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
