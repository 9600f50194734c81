mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use behavior_tree::{Behavior, Exclusive, Status, exclusive, mem_sequence, sequence};
use common::World;
use game_core::{MonsterProfile, Point};
use runtime::AiContext;
use runtime::ai::nodes::{Attack, DetectPlayer, Wait};
use runtime::ai::presets;

#[derive(Default)]
struct Tally {
    ticks: AtomicUsize,
    successes: AtomicUsize,
    violations: AtomicUsize,
}

/// Candidate that checks it holds the commitment while it runs.
struct Watcher {
    index: usize,
    tally: Arc<Tally>,
    /// Fail every other tick.
    flaky: bool,
}

impl Behavior<AiContext> for Watcher {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        let held = ctx.commitment();
        if held.map(|c| c.candidate) != Some(self.index) {
            self.tally.violations.fetch_add(1, Ordering::Relaxed);
        }

        let tick = self.tally.ticks.fetch_add(1, Ordering::Relaxed);
        if self.flaky && tick % 2 == 0 {
            return Status::Failure;
        }
        self.tally.successes.fetch_add(1, Ordering::Relaxed);
        Status::Success
    }
}

#[test]
fn selection_frequency_tracks_weight() {
    const RUNS: usize = 10_000;

    let world = World::new();
    let first = Arc::new(Tally::default());
    let second = Arc::new(Tally::default());
    let tree = exclusive(
        0.33,
        vec![
            Box::new(Watcher {
                index: 0,
                tally: first.clone(),
                flaky: true,
            }),
            Box::new(Watcher {
                index: 1,
                tally: second.clone(),
                flaky: false,
            }),
        ],
    );
    let mut monster = world.monster(Point::ORIGIN, 20, tree);

    let start = Instant::now();
    let mut selected = 0;
    for i in 0..RUNS {
        let status = monster.update(start + Duration::from_millis(i as u64));
        if status == Some(Status::Success) {
            selected += 1;
        }
        assert!(monster.combat().commitment().is_none());
    }

    let rate = selected as f64 / RUNS as f64;
    assert!((rate - 0.33).abs() < 0.02, "selection rate {rate}");

    // Every selection ticks the first candidate; its failures fall through to the second.
    assert_eq!(first.ticks.load(Ordering::Relaxed), selected);
    assert_eq!(
        first.successes.load(Ordering::Relaxed) + second.successes.load(Ordering::Relaxed),
        selected
    );
    assert_eq!(first.violations.load(Ordering::Relaxed), 0);
    assert_eq!(second.violations.load(Ordering::Relaxed), 0);
}

#[test]
fn committed_candidate_holds_the_slot_until_recovered() {
    let world = World::new();
    world.join("p1", Point::new(10.0, 0.0), 100);
    let profile = MonsterProfile::default().with_special_weight(1.0);
    let mut monster = world.monster(Point::ORIGIN, 20, presets::monster_behavior_tree(&profile));

    let start = Instant::now();
    assert_eq!(monster.update(start), Some(Status::Running));
    let held = monster.combat().commitment().map(|c| c.candidate);
    assert_eq!(held, Some(0));
    assert_eq!(monster.state().health.current(), 20);

    // Still recovering from the ranged shot; the meteor branch stays locked out.
    assert_eq!(
        monster.update(start + Duration::from_millis(500)),
        Some(Status::Running)
    );
    assert_eq!(monster.combat().commitment().map(|c| c.candidate), Some(0));
    assert_eq!(world.players.health(&"p1".into()), Some(92));

    assert_eq!(
        monster.update(start + Duration::from_secs(1)),
        Some(Status::Success)
    );
    assert!(monster.combat().commitment().is_none());
}

#[test]
fn interruptible_wait_frees_the_slot_and_still_completes() {
    let world = World::new();
    world.join("p1", Point::new(10.0, 0.0), 100);
    let tree = sequence(vec![
        Box::new(DetectPlayer::new(50.0)),
        exclusive(
            1.0,
            vec![mem_sequence(vec![
                Box::new(Attack::ranged(50.0, 8, Duration::from_secs(10))),
                Box::new(Wait::new(Duration::from_secs(1), true)),
            ])],
        ),
    ]);
    let mut monster = world.monster(Point::ORIGIN, 20, tree);

    let start = Instant::now();
    let mut outcomes = Vec::new();
    for ms in [0, 300, 600, 1_000, 1_200] {
        outcomes.push(monster.update(start + Duration::from_millis(ms)));
        assert!(monster.combat().commitment().is_none(), "slot held at {ms}ms");
    }

    // Recovery runs its full second, succeeds once, then the ranged shot is on cooldown.
    assert_eq!(
        outcomes,
        vec![
            Some(Status::Running),
            Some(Status::Running),
            Some(Status::Running),
            Some(Status::Success),
            Some(Status::Failure),
        ]
    );
    assert_eq!(world.players.health(&"p1".into()), Some(92));
}
