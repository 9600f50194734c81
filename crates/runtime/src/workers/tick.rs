//! Tick worker that owns the authoritative [`MonsterRegistry`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), ticks
//! every monster on a fixed interval, and reaps the dead.

use std::time::Duration;

use game_core::{MonsterId, MonsterState, Point};
use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace};

use crate::registry::MonsterRegistry;

/// Commands that can be sent to the tick worker
pub enum Command {
    /// Spawn a monster running the standard tree.
    Spawn {
        position: Point,
        path: Vec<Point>,
        reply: oneshot::Sender<MonsterId>,
    },
    /// Apply relative damage. Replies `None` for unknown monsters.
    Damage {
        monster: MonsterId,
        amount: u32,
        reply: oneshot::Sender<Option<u32>>,
    },
    /// Assign absolute health. Replies `None` for unknown monsters.
    SetHealth {
        monster: MonsterId,
        value: i64,
        reply: oneshot::Sender<Option<u32>>,
    },
    Despawn {
        monster: MonsterId,
        reply: oneshot::Sender<bool>,
    },
    /// Read-only copy of every monster's state.
    Snapshot {
        reply: oneshot::Sender<Vec<MonsterState>>,
    },
    /// Stop the worker loop.
    Shutdown,
}

/// Background task that drives monster ticks and processes commands.
pub struct TickWorker {
    registry: MonsterRegistry,
    command_rx: mpsc::Receiver<Command>,
    tick_interval: Duration,
}

impl TickWorker {
    pub fn new(
        registry: MonsterRegistry,
        command_rx: mpsc::Receiver<Command>,
        tick_interval: Duration,
    ) -> Self {
        info!(
            target: "runtime::worker",
            monsters = registry.len(),
            tick_ms = tick_interval.as_millis() as u64,
            "TickWorker initialized"
        );

        Self {
            registry,
            command_rx,
            tick_interval,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        let mut interval = tokio::time::interval(self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                instant = interval.tick() => {
                    self.tick(instant.into_std());
                }
                cmd = self.command_rx.recv() => match cmd {
                    Some(Command::Shutdown) | None => break,
                    Some(cmd) => self.handle_command(cmd),
                },
            }
        }

        info!(target: "runtime::worker", monsters = self.registry.len(), "TickWorker stopped");
    }

    fn tick(&mut self, now: std::time::Instant) {
        let summary = self.registry.tick_all(now);
        let reaped = self.registry.reap_dead();
        trace!(
            target: "runtime::worker",
            ticked = summary.ticked,
            running = summary.running,
            reaped = reaped.len(),
            "tick complete"
        );
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Spawn {
                position,
                path,
                reply,
            } => {
                let id = self.registry.spawn(position, path);
                if reply.send(id).is_err() {
                    debug!(target: "runtime::worker", "Spawn reply channel closed (caller dropped)");
                }
            }
            Command::Damage {
                monster,
                amount,
                reply,
            } => {
                let result = self
                    .registry
                    .get_mut(monster)
                    .map(|m| m.take_damage(amount));
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "Damage reply channel closed (caller dropped)");
                }
            }
            Command::SetHealth {
                monster,
                value,
                reply,
            } => {
                let result = self.registry.get_mut(monster).map(|m| m.set_health(value));
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "SetHealth reply channel closed (caller dropped)");
                }
            }
            Command::Despawn { monster, reply } => {
                let removed = self.registry.despawn(monster).is_some();
                if reply.send(removed).is_err() {
                    debug!(target: "runtime::worker", "Despawn reply channel closed (caller dropped)");
                }
            }
            Command::Snapshot { reply } => {
                let states = self.registry.iter().map(|m| m.state().clone()).collect();
                if reply.send(states).is_err() {
                    debug!(target: "runtime::worker", "Snapshot reply channel closed (caller dropped)");
                }
            }
            Command::Shutdown => {}
        }
    }
}
