//! Runtime configuration and environment loading.

use std::env;
use std::time::Duration;

use crate::api::{Result, RuntimeError};

/// Runtime configuration shared across the orchestrator and the tick worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Interval between two monster ticks.
    pub tick_interval: Duration,
    /// Upper bound on the time step a single tick may simulate.
    pub max_tick_delta: Duration,
    pub command_buffer_size: usize,
    /// Capacity of each event bus topic.
    pub event_buffer_size: usize,
    /// Seed of the per-monster random sources.
    pub rng_seed: u64,
    /// Monsters the server spawns at startup.
    pub spawn_count: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(50),
            max_tick_delta: Duration::from_millis(250),
            command_buffer_size: 32,
            event_buffer_size: 256,
            rng_seed: 0x5eed,
            spawn_count: 1,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `MONSTER_TICK_MS` - Tick interval in milliseconds (default: 50)
    /// - `MONSTER_MAX_TICK_DELTA_MS` - Longest simulated step (default: 250)
    /// - `MONSTER_COMMAND_BUFFER` - Command queue size (default: 32)
    /// - `MONSTER_EVENT_BUFFER` - Per-topic event capacity (default: 256)
    /// - `MONSTER_RNG_SEED` - Random seed (default: 0x5eed)
    /// - `MONSTER_SPAWN_COUNT` - Monsters spawned at startup (default: 1)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ms) = read_env::<u64>("MONSTER_TICK_MS") {
            config.tick_interval = Duration::from_millis(ms.max(1));
        }
        if let Some(ms) = read_env::<u64>("MONSTER_MAX_TICK_DELTA_MS") {
            config.max_tick_delta = Duration::from_millis(ms);
        }
        if let Some(capacity) = read_env::<usize>("MONSTER_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("MONSTER_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(seed) = read_env::<u64>("MONSTER_RNG_SEED") {
            config.rng_seed = seed;
        }
        if let Some(count) = read_env::<usize>("MONSTER_SPAWN_COUNT") {
            config.spawn_count = count;
        }

        config
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_interval.is_zero() {
            return Err(RuntimeError::InvalidConfig {
                field: "tick_interval",
                reason: "must be positive",
            });
        }
        if self.max_tick_delta < self.tick_interval {
            return Err(RuntimeError::InvalidConfig {
                field: "max_tick_delta",
                reason: "must be at least the tick interval",
            });
        }
        if self.command_buffer_size == 0 {
            return Err(RuntimeError::InvalidConfig {
                field: "command_buffer_size",
                reason: "must be positive",
            });
        }
        if self.event_buffer_size == 0 {
            return Err(RuntimeError::InvalidConfig {
                field: "event_buffer_size",
                reason: "must be positive",
            });
        }
        Ok(())
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
