//! Line item quantity with a floor of one.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Number of units of one menu item in a cart.
///
/// A quantity is never zero: removing an item is a separate operation, so
/// every adjustment clamps at one.
///
/// ```rust
/// use campus_bite_core::Quantity;
///
/// let three = Quantity::ONE.adjusted(2);
/// assert_eq!(three.get(), 3);
/// assert_eq!(three.adjusted(-100), Quantity::ONE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(1);

    /// Create a quantity, returning `None` for zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        if value == 0 { None } else { Some(Self(value)) }
    }

    /// Get the underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// One more unit, saturating at `u32::MAX`.
    #[must_use]
    pub const fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Apply a signed delta, computing `max(1, current + delta)`.
    #[must_use]
    pub fn adjusted(self, delta: i32) -> Self {
        let next = i64::from(self.0) + i64::from(delta);
        let clamped = next.clamp(1, i64::from(u32::MAX));
        Self(u32::try_from(clamped).unwrap_or(u32::MAX))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero() {
        assert_eq!(Quantity::new(0), None);
        assert_eq!(Quantity::new(2).map(Quantity::get), Some(2));
    }

    #[test]
    fn test_adjusted_floors_at_one() {
        let three = Quantity::ONE.adjusted(2);
        assert_eq!(three.get(), 3);
        assert_eq!(three.adjusted(-100), Quantity::ONE);
        assert_eq!(three.adjusted(-3), Quantity::ONE);
        assert_eq!(three.adjusted(i32::MIN), Quantity::ONE);
    }

    #[test]
    fn test_adjusted_saturates_at_max() {
        let big = Quantity(u32::MAX - 1);
        assert_eq!(big.adjusted(i32::MAX).get(), u32::MAX);
        assert_eq!(big.increment().increment().get(), u32::MAX);
    }
}
