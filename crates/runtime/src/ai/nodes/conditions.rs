//! Sensor nodes for monster behavior trees.
//!
//! Sensors query the player directory and bind the monster's target. They
//! never move the monster or deal damage.

use behavior_tree::{Behavior, Status};
use tracing::trace;

use crate::ai::AiContext;

/// Succeeds when a living player is within `radius`, binding the nearest one
/// as the target.
///
/// Several detectors at different radii give layered awareness: an outer
/// aggro radius nested around an inner melee radius.
///
/// # Example
///
/// ```rust,ignore
/// use behavior_tree::mem_sequence;
/// use runtime::ai::nodes::*;
///
/// // Swing only when someone is within arm's reach
/// mem_sequence(vec![
///     Box::new(DetectPlayer::new(2.0)),
///     Box::new(Attack::melee(2.0, 10, Duration::from_secs(4))),
/// ])
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DetectPlayer {
    pub radius: f32,
    /// Clear the target when nobody is in range.
    pub forget_on_miss: bool,
}

impl DetectPlayer {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            forget_on_miss: false,
        }
    }

    /// Detector that also drops the target on a miss. Used for the outermost
    /// (aggro) radius.
    pub fn aggro(radius: f32) -> Self {
        Self {
            radius,
            forget_on_miss: true,
        }
    }
}

impl Behavior<AiContext> for DetectPlayer {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        let origin = ctx.position();
        match ctx.services.players.nearest_within(origin, self.radius) {
            Some(sighting) => {
                trace!(
                    target: "runtime::ai",
                    monster = %ctx.id(),
                    player = %sighting.id,
                    distance = sighting.distance,
                    radius = self.radius,
                    "player detected"
                );
                ctx.set_target(Some(sighting.id));
                Status::Success
            }
            None => {
                if self.forget_on_miss {
                    ctx.set_target(None);
                }
                Status::Failure
            }
        }
    }
}
