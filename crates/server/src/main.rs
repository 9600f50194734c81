//! Monster server binary.
//!
//! Composition root that assembles:
//! 1. Logging (stderr, `RUST_LOG` aware)
//! 2. Runtime (monster ticking) via `RuntimeBuilder`
//! 3. Startup monsters on square patrol paths
//! 4. A relay that logs every broadcast message as JSON
//!
//! Set `MONSTER_DEMO_PLAYER=1` to seat a stationary player next to the first
//! monster and watch it fight.

use anyhow::Result;
use game_core::{PlayerId, Point, Topic};
use runtime::{Runtime, RuntimeConfig, RuntimeHandle};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let config = RuntimeConfig::from_env();
    tracing::info!(
        tick_ms = config.tick_interval.as_millis() as u64,
        seed = config.rng_seed,
        monsters = config.spawn_count,
        "Starting monster server"
    );

    let runtime = Runtime::builder().config(config.clone()).build().await?;
    let handle = runtime.handle();
    let relays = spawn_relays(&handle);

    for index in 0..config.spawn_count {
        let origin = spawn_point(index);
        let id = handle.spawn_monster(origin, patrol_square(origin, 5.0)).await?;
        tracing::debug!(monster = %id, %origin, "startup monster ready");
    }

    if demo_player_enabled() {
        let player = PlayerId::from("demo");
        let position = Point::new(spawn_point(0).x + 1.5, spawn_point(0).z);
        handle.join_player(player, position, 200);
    }

    tokio::signal::ctrl_c().await?;
    tracing::info!("Ctrl-C received, shutting down");

    runtime.shutdown().await?;
    for relay in relays {
        relay.abort();
    }
    Ok(())
}

/// Setup logging to stderr
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

/// Forward every topic to the log, one task per topic.
fn spawn_relays(handle: &RuntimeHandle) -> Vec<JoinHandle<()>> {
    handle
        .subscribe_multiple(&Topic::ALL)
        .into_iter()
        .map(|(topic, mut rx)| {
            tokio::spawn(async move {
                loop {
                    match rx.recv().await {
                        Ok(message) => match serde_json::to_string(&message) {
                            Ok(json) => tracing::info!(target: "server::relay", %topic, "{json}"),
                            Err(error) => {
                                tracing::warn!(target: "server::relay", %topic, %error, "unencodable message")
                            }
                        },
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(target: "server::relay", %topic, skipped, "relay lagged");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            })
        })
        .collect()
}

fn spawn_point(index: usize) -> Point {
    let column = (index % 8) as f32;
    let row = (index / 8) as f32;
    Point::new(column * 20.0, row * 20.0)
}

fn patrol_square(origin: Point, half_extent: f32) -> Vec<Point> {
    vec![
        Point::new(origin.x - half_extent, origin.z - half_extent),
        Point::new(origin.x + half_extent, origin.z - half_extent),
        Point::new(origin.x + half_extent, origin.z + half_extent),
        Point::new(origin.x - half_extent, origin.z + half_extent),
    ]
}

fn demo_player_enabled() -> bool {
    matches!(
        std::env::var("MONSTER_DEMO_PLAYER").as_deref(),
        Ok("1" | "true" | "yes" | "on")
    )
}
