//! Positive line item quantities.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// The quantity of a line item.
///
/// Always at least one. A line item whose quantity would drop to zero or
/// below is removed from the cart instead of being kept at zero, so there is
/// no representable "zero quantity" state. Deserialization rejects `0`,
/// negatives and fractional values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

/// Outcome of applying a signed delta to a [`Quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjusted {
    /// The quantity is still positive.
    To(Quantity),
    /// The quantity reached zero or below; the line item must be removed.
    Depleted,
    /// The quantity would exceed `u32::MAX`.
    Overflow,
}

impl Quantity {
    /// A quantity of one.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity, returning `None` for zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0.get()
    }

    /// Apply a signed delta.
    #[must_use]
    pub fn adjust(self, delta: i64) -> Adjusted {
        let Some(next) = i64::from(self.get()).checked_add(delta) else {
            return Adjusted::Overflow;
        };

        if next <= 0 {
            return Adjusted::Depleted;
        }

        u32::try_from(next)
            .ok()
            .and_then(Self::new)
            .map_or(Adjusted::Overflow, Adjusted::To)
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

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}
