//! High-level runtime orchestrator.
//!
//! The runtime owns the tick worker, wires up command/event channels, and
//! exposes a builder-based API for servers to drive monsters.

use std::sync::Arc;

use game_core::MonsterProfile;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::api::{Navigator, Result, RuntimeError, RuntimeHandle, Services, StraightLine};
use crate::config::RuntimeConfig;
use crate::events::EventBus;
use crate::registry::{MonsterRegistry, PlayerRegistry};
use crate::workers::{Command, TickWorker};

/// Main runtime that orchestrates monster simulation
///
/// Design: Runtime owns the worker and coordinates shutdown.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across sessions and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    pub async fn shutdown(self) -> Result<()> {
        // A worker that already exited has closed its channel; joining is enough.
        let _ = self.handle.send_shutdown().await;
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;
        info!(target: "runtime::worker", "runtime shut down");
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    profile: MonsterProfile,
    players: Option<Arc<PlayerRegistry>>,
    navigator: Option<Arc<dyn Navigator>>,
    event_bus: Option<EventBus>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            profile: MonsterProfile::default(),
            players: None,
            navigator: None,
            event_bus: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the profile used for spawned monsters
    pub fn profile(mut self, profile: MonsterProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Share an existing player registry (optional)
    pub fn players(mut self, players: Arc<PlayerRegistry>) -> Self {
        self.players = Some(players);
        self
    }

    /// Replace the default straight-line navigator (optional)
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Publish to an existing event bus (optional)
    pub fn event_bus(mut self, event_bus: EventBus) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    /// Build the runtime and start the tick worker
    pub async fn build(self) -> Result<Runtime> {
        self.config.validate()?;

        let players = self.players.unwrap_or_default();
        let event_bus = self
            .event_bus
            .unwrap_or_else(|| EventBus::with_capacity(self.config.event_buffer_size));
        let navigator = self
            .navigator
            .unwrap_or_else(|| Arc::new(StraightLine) as Arc<dyn Navigator>);

        let services = Services::new(players.clone(), Arc::new(event_bus.clone()), navigator);
        let registry = MonsterRegistry::new(services, self.profile, self.config.rng_seed)?
            .with_max_tick_delta(self.config.max_tick_delta);

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus, players);

        let worker = TickWorker::new(registry, command_rx, self.config.tick_interval);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
