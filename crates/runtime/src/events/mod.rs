//! Topic-based event bus for broadcast messages.
//!
//! Messages are published to the topic they belong to, and consumers
//! subscribe only to the topics they need.

mod bus;

pub use bus::EventBus;
pub use game_core::{GameMessage, Topic};
