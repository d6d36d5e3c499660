//! Kingdoms rules.
//!
//! - `validate`: move legality, first failure wins
//! - `execute`: apply an action to a copy of the state
//! - `setup`: deal a new game
//! - `epoch`: pay out scores and reset or finish
//! - `engine`: the `Kingdoms` engine, its builder and the `RulesEngine` seam

pub mod engine;
pub mod epoch;
pub mod execute;
pub mod setup;
pub mod validate;

pub use engine::{final_standings, GameResult, Kingdoms, KingdomsBuilder, RulesEngine, Standing};
pub use epoch::SYSTEM_PLAYER_NAME;
pub use validate::is_valid_move;
