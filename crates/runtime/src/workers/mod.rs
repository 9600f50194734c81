//! Worker tasks that back the runtime orchestration.
//!
//! The tick worker owns the monsters; everything else talks to it through
//! commands.

mod tick;

pub use tick::{Command, TickWorker};
