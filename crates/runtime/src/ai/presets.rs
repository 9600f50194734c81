//! Complete behavior trees for monster archetypes.
//!
//! # Architecture
//!
//! ```text
//! monster_behavior_tree(profile)
//!   └─ Selector
//!       └─ Sequence
//!           ├─ DetectPlayer(aggro_radius, forget on miss)
//!           └─ Selector
//!               ├─ MemSequence
//!               │   ├─ DetectPlayer(melee_radius)
//!               │   ├─ Attack::melee
//!               │   └─ Wait(melee.recovery)
//!               ├─ MutuallyExclusiveSelector(special_weight)
//!               │   ├─ MemSequence [Attack::ranged, Wait(ranged.recovery)]
//!               │   └─ MemSequence [Attack::meteor, Wait(meteor.recovery)]
//!               └─ Chase(chase_range)
//! ```
//!
//! The priority structure is reactive, so both detectors are re-checked on
//! every tick. Each attack is paired with its recovery in a resuming
//! sequence, which keeps the branch parked on the `Wait` until it elapses.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use runtime::ai::presets;
//!
//! let brain: Arc<dyn Behavior<AiContext>> = Arc::from(presets::monster_behavior_tree(&profile));
//! ```

use behavior_tree::{Behavior, exclusive, mem_sequence, selector, sequence};
use game_core::{AttackKind, MonsterProfile};

use super::context::AiContext;
use super::nodes::{Attack, Chase, DetectPlayer, Wait};

/// Boxed tree over the monster tick context.
pub type BehaviorTree = Box<dyn Behavior<AiContext>>;

/// Standard monster: melee up close, occasional ranged or meteor strikes
/// from afar, otherwise close the distance.
///
/// # Panics
///
/// Panics if `profile.special_weight` is outside `[0, 1]`; run
/// [`MonsterProfile::validate`] first.
pub fn monster_behavior_tree(profile: &MonsterProfile) -> BehaviorTree {
    selector(vec![sequence(vec![
        Box::new(DetectPlayer::aggro(profile.aggro_radius)),
        selector(vec![
            melee_combo(profile),
            exclusive(
                profile.special_weight,
                vec![
                    attack_then_recover(AttackKind::Ranged, profile),
                    attack_then_recover(AttackKind::Meteor, profile),
                ],
            ),
            Box::new(Chase::new(
                profile.chase_range,
                profile.chase_speed,
                profile.arrive_distance,
            )),
        ]),
    ])])
}

/// Detect within melee radius, swing, then recover.
pub fn melee_combo(profile: &MonsterProfile) -> BehaviorTree {
    mem_sequence(vec![
        Box::new(DetectPlayer::new(profile.melee_radius)),
        Box::new(Attack::from_profile(AttackKind::Melee, &profile.melee)),
        Box::new(Wait::new(profile.melee.recovery, false)),
    ])
}

/// Fire an attack of `kind`, then hold for its recovery time.
pub fn attack_then_recover(kind: AttackKind, profile: &MonsterProfile) -> BehaviorTree {
    let attack = match kind {
        AttackKind::Melee => &profile.melee,
        AttackKind::Ranged => &profile.ranged,
        AttackKind::Meteor => &profile.meteor,
    };
    mem_sequence(vec![
        Box::new(Attack::from_profile(kind, attack)),
        Box::new(Wait::new(attack.recovery, false)),
    ])
}

/// Patrol-only monster: follows its path and ignores players.
pub fn patrol(profile: &MonsterProfile) -> BehaviorTree {
    selector(vec![Box::new(Chase::new(
        profile.chase_range,
        profile.chase_speed,
        profile.arrive_distance,
    ))])
}
