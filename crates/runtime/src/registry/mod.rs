//! In-memory registries for monsters and players.

mod monsters;
mod players;

pub use monsters::{MonsterRegistry, TickSummary};
pub use players::PlayerRegistry;
