//! Tunable parameters of a monster archetype.

use std::time::Duration;

/// Parameters of one attack node plus the pause that follows it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackProfile {
    /// Maximum distance to the target.
    pub range: f32,
    pub damage: u32,
    /// Minimum wall-clock interval between two uses.
    pub cooldown: Duration,
    /// Pause after a successful use.
    pub recovery: Duration,
}

impl AttackProfile {
    pub const fn new(range: f32, damage: u32, cooldown: Duration, recovery: Duration) -> Self {
        Self {
            range,
            damage,
            cooldown,
            recovery,
        }
    }
}

/// Stats and tree constants used to build a monster.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterProfile {
    pub max_health: u32,
    /// Outer detection radius; nothing happens beyond it.
    pub aggro_radius: f32,
    /// Inner detection radius that switches to melee.
    pub melee_radius: f32,
    pub melee: AttackProfile,
    pub ranged: AttackProfile,
    pub meteor: AttackProfile,
    /// Probability of trying a special (ranged or meteor) attack on a tick.
    pub special_weight: f64,
    pub chase_range: f32,
    /// Units per second.
    pub chase_speed: f32,
    /// Chase stops once this close to the target.
    pub arrive_distance: f32,
    /// Time clients take to turn the monster to a new facing.
    pub turn_duration: Duration,
}

impl MonsterProfile {
    pub const DEFAULT_MAX_HEALTH: u32 = 100;
    pub const DEFAULT_AGGRO_RADIUS: f32 = 50.0;
    pub const DEFAULT_MELEE_RADIUS: f32 = 2.0;
    pub const DEFAULT_SPECIAL_WEIGHT: f64 = 0.33;
    pub const DEFAULT_CHASE_RANGE: f32 = 50.0;
    pub const DEFAULT_CHASE_SPEED: f32 = 5.0;
    pub const DEFAULT_ARRIVE_DISTANCE: f32 = 1.5;
    pub const DEFAULT_TURN_DURATION: Duration = Duration::from_millis(200);

    pub const DEFAULT_MELEE: AttackProfile =
        AttackProfile::new(2.0, 10, Duration::from_secs(4), Duration::from_secs(1));
    pub const DEFAULT_RANGED: AttackProfile =
        AttackProfile::new(50.0, 8, Duration::from_secs(10), Duration::from_secs(1));
    pub const DEFAULT_METEOR: AttackProfile =
        AttackProfile::new(59.0, 15, Duration::from_secs(10), Duration::from_secs(2));

    pub fn new() -> Self {
        Self {
            max_health: Self::DEFAULT_MAX_HEALTH,
            aggro_radius: Self::DEFAULT_AGGRO_RADIUS,
            melee_radius: Self::DEFAULT_MELEE_RADIUS,
            melee: Self::DEFAULT_MELEE,
            ranged: Self::DEFAULT_RANGED,
            meteor: Self::DEFAULT_METEOR,
            special_weight: Self::DEFAULT_SPECIAL_WEIGHT,
            chase_range: Self::DEFAULT_CHASE_RANGE,
            chase_speed: Self::DEFAULT_CHASE_SPEED,
            arrive_distance: Self::DEFAULT_ARRIVE_DISTANCE,
            turn_duration: Self::DEFAULT_TURN_DURATION,
        }
    }

    pub fn with_special_weight(mut self, weight: f64) -> Self {
        self.special_weight = weight;
        self
    }

    /// Checks the invariants tree construction relies on.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.max_health == 0 {
            return Err(ProfileError::ZeroHealth);
        }
        if !(0.0..=1.0).contains(&self.special_weight) {
            return Err(ProfileError::WeightOutOfRange(self.special_weight));
        }
        let distances = [
            ("aggro_radius", self.aggro_radius),
            ("melee_radius", self.melee_radius),
            ("melee.range", self.melee.range),
            ("ranged.range", self.ranged.range),
            ("meteor.range", self.meteor.range),
            ("chase_range", self.chase_range),
            ("arrive_distance", self.arrive_distance),
        ];
        for (field, value) in distances {
            if !value.is_finite() || value < 0.0 {
                return Err(ProfileError::InvalidDistance { field, value });
            }
        }
        if !self.chase_speed.is_finite() || self.chase_speed <= 0.0 {
            return Err(ProfileError::InvalidSpeed(self.chase_speed));
        }
        Ok(())
    }
}

impl Default for MonsterProfile {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("max health must be positive")]
    ZeroHealth,

    #[error("special attack weight {0} is outside [0, 1]")]
    WeightOutOfRange(f64),

    #[error("{field} must be a finite non-negative distance, got {value}")]
    InvalidDistance { field: &'static str, value: f32 },

    #[error("chase speed must be positive, got {0}")]
    InvalidSpeed(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_valid() {
        assert_eq!(MonsterProfile::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_weight_out_of_range() {
        let profile = MonsterProfile::default().with_special_weight(1.2);
        assert_eq!(
            profile.validate(),
            Err(ProfileError::WeightOutOfRange(1.2))
        );
    }

    #[test]
    fn rejects_negative_range() {
        let mut profile = MonsterProfile::default();
        profile.ranged.range = -1.0;
        assert!(matches!(
            profile.validate(),
            Err(ProfileError::InvalidDistance {
                field: "ranged.range",
                ..
            })
        ));
    }
}
