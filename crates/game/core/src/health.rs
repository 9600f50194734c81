//! Hit points.

/// Clamped hit-point meter.
///
/// `current` never leaves `[0, maximum]`: relative damage saturates at zero
/// and absolute assignments are clamped on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Health {
    current: u32,
    maximum: u32,
}

impl Health {
    /// A full meter.
    pub fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    /// A meter starting at `current`, clamped into range.
    pub fn new(current: i64, maximum: u32) -> Self {
        let mut health = Self::full(maximum);
        health.set(current);
        health
    }

    #[inline]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[inline]
    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Subtracts `amount`, stopping at zero. Returns the new value.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        self.current = self.current.saturating_sub(amount);
        self.current
    }

    /// Assigns `value` clamped into `[0, maximum]`.
    pub fn set(&mut self, value: i64) -> u32 {
        self.current = value.clamp(0, i64::from(self.maximum)) as u32;
        self.current
    }
}
