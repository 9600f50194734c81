//! Monster domain data shared by the runtime and its tests.
//!
//! `game-core` holds plain state and rules with no I/O: identifiers, ground
//! geometry, clamped health, per-monster combat bookkeeping, the logical
//! broadcast messages and the tunable monster profile. Behavior and
//! scheduling live in the `runtime` crate.
pub mod combat;
pub mod geometry;
pub mod health;
pub mod ids;
pub mod message;
pub mod monster;
pub mod profile;

pub use combat::{AttackKind, CombatState};
pub use geometry::Point;
pub use health::Health;
pub use ids::{MonsterId, PlayerId};
pub use message::{GameMessage, Topic};
pub use monster::MonsterState;
pub use profile::{AttackProfile, MonsterProfile, ProfileError};
