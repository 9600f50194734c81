use std::time::Duration;

use game_core::{GameMessage, MonsterId, PlayerId, Point, Topic};
use runtime::{Runtime, RuntimeConfig};
use tokio::sync::broadcast;
use tokio::time::timeout;

async fn next_message(rx: &mut broadcast::Receiver<GameMessage>) -> GameMessage {
    timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("message within timeout")
        .expect("channel open")
}

fn fast_config() -> RuntimeConfig {
    RuntimeConfig {
        tick_interval: Duration::from_millis(10),
        ..RuntimeConfig::default()
    }
}

#[tokio::test]
async fn spawn_damage_and_reap_through_handle() {
    let runtime = Runtime::builder()
        .config(fast_config())
        .build()
        .await
        .expect("runtime builds");
    let handle = runtime.handle();
    let mut lifecycle = handle.subscribe(Topic::Lifecycle);

    let id = handle
        .spawn_monster(Point::new(5.0, 5.0), Vec::new())
        .await
        .expect("spawn");
    assert_eq!(id, MonsterId(1));
    assert!(matches!(
        next_message(&mut lifecycle).await,
        GameMessage::SpawnMonster { monster_id, .. } if monster_id == id
    ));

    assert_eq!(handle.set_monster_health(id, 1_000).await.expect("set"), Some(100));
    assert_eq!(handle.damage_monster(id, 250).await.expect("damage"), Some(0));

    // The next tick reaps the corpse.
    assert_eq!(
        next_message(&mut lifecycle).await,
        GameMessage::MonsterDespawned { monster_id: id }
    );
    assert!(handle.monsters().await.expect("snapshot").is_empty());

    runtime.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn unknown_monsters_are_misses_not_errors() {
    let runtime = Runtime::builder().build().await.expect("runtime builds");
    let handle = runtime.handle();

    assert_eq!(handle.damage_monster(MonsterId(7), 5).await.expect("damage"), None);
    assert_eq!(handle.set_monster_health(MonsterId(7), 5).await.expect("set"), None);
    assert!(!handle.despawn_monster(MonsterId(7)).await.expect("despawn"));

    runtime.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn monsters_attack_joined_players() {
    let runtime = Runtime::builder()
        .config(fast_config())
        .build()
        .await
        .expect("runtime builds");
    let handle = runtime.handle();
    let mut combat = handle.subscribe(Topic::Combat);

    let player = PlayerId::from("p1");
    handle.join_player(player.clone(), Point::new(1.0, 0.0), 100);
    handle
        .spawn_monster(Point::ORIGIN, Vec::new())
        .await
        .expect("spawn");

    let damaged = timeout(Duration::from_secs(2), async {
        loop {
            match combat.recv().await {
                Ok(GameMessage::PlayerDamage { player_id, .. }) if player_id == player => break,
                Ok(_) => continue,
                Err(error) => panic!("combat channel failed: {error}"),
            }
        }
    })
    .await;
    assert!(damaged.is_ok(), "player was never attacked");
    assert!(handle.players().health(&player).is_some_and(|hp| hp < 100));

    runtime.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn shutdown_closes_the_command_channel() {
    let runtime = Runtime::builder().build().await.expect("runtime builds");
    let handle = runtime.handle();
    runtime.shutdown().await.expect("clean shutdown");

    assert!(handle.monsters().await.is_err());
}

#[tokio::test]
async fn players_join_move_and_leave_through_handle() {
    let runtime = Runtime::builder().build().await.expect("runtime builds");
    let handle = runtime.handle();
    let player = PlayerId::from("p1");

    handle.join_player(player.clone(), Point::ORIGIN, 50);
    assert!(handle.move_player(&player, Point::new(3.0, 4.0)));
    assert_eq!(handle.players().health(&player), Some(50));
    assert_eq!(handle.players().len(), 1);

    assert!(handle.leave_player(&player));
    assert!(!handle.move_player(&player, Point::ORIGIN));
    assert!(handle.players().is_empty());

    runtime.shutdown().await.expect("clean shutdown");
}
