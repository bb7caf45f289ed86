//! Basis-point rate value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A rate expressed in basis points (1 bps = 0.01%).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// Zero rate.
    pub const ZERO: Self = Self(0);

    /// 100%, the denominator of every basis-point calculation.
    pub const FULL: Self = Self(10_000);

    /// Create a rate from raw basis points.
    #[must_use]
    pub const fn new(bps: u32) -> Self {
        Self(bps)
    }

    /// Get the raw basis-point value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Returns true if this rate is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bps", self.0)
    }
}

impl From<u32> for BasisPoints {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basis_points_display() {
        assert_eq!(format!("{}", BasisPoints::new(50)), "50bps");
    }

    #[test]
    fn basis_points_ordering() {
        assert!(BasisPoints::new(1000) > BasisPoints::new(500));
        assert!(BasisPoints::ZERO.is_zero());
        assert_eq!(BasisPoints::FULL.value(), 10_000);
    }
}
